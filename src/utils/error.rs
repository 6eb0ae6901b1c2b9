use thiserror::Error;

#[derive(Error, Debug)]
pub enum DeployError {
    #[error("HTTP request failed: {0}")]
    HttpError(#[from] reqwest::Error),

    #[error("IO error: {0}")]
    IoError(#[from] std::io::Error),

    #[error("Serialization error: {0}")]
    SerializationError(#[from] serde_json::Error),

    #[error("Missing configuration: {field}")]
    MissingConfigError { field: String },

    #[error("Invalid value for {field}: '{value}' ({reason})")]
    InvalidConfigValueError {
        field: String,
        value: String,
        reason: String,
    },

    #[error("Artifact error for {contract}: {message}")]
    ArtifactError { contract: String, message: String },

    #[error("Signing error: {message}")]
    SigningError { message: String },

    #[error("RPC {method} failed with code {code}: {message}")]
    RpcError {
        method: String,
        code: i64,
        message: String,
    },

    #[error("Unexpected RPC response for {method}: {message}")]
    RpcResponseError { method: String, message: String },

    #[error("Deployment transaction {tx_hash} reverted")]
    RevertedError { tx_hash: String },

    #[error("Timed out after {seconds}s waiting for transaction {tx_hash}")]
    TimeoutError { tx_hash: String, seconds: u64 },
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorCategory {
    Configuration,
    Artifact,
    Network,
    Transaction,
    System,
}

impl DeployError {
    pub fn artifact(contract: &str, message: impl Into<String>) -> Self {
        DeployError::ArtifactError {
            contract: contract.to_string(),
            message: message.into(),
        }
    }

    pub fn unexpected(method: &str, message: impl Into<String>) -> Self {
        DeployError::RpcResponseError {
            method: method.to_string(),
            message: message.into(),
        }
    }

    /// Used for log context only; the process exit code does not depend on it.
    pub fn category(&self) -> ErrorCategory {
        match self {
            DeployError::MissingConfigError { .. }
            | DeployError::InvalidConfigValueError { .. } => ErrorCategory::Configuration,
            DeployError::ArtifactError { .. } => ErrorCategory::Artifact,
            DeployError::HttpError(_) | DeployError::RpcResponseError { .. } => {
                ErrorCategory::Network
            }
            DeployError::RpcError { .. }
            | DeployError::SigningError { .. }
            | DeployError::RevertedError { .. }
            | DeployError::TimeoutError { .. } => ErrorCategory::Transaction,
            DeployError::IoError(_) | DeployError::SerializationError(_) => ErrorCategory::System,
        }
    }

    pub fn user_friendly_message(&self) -> String {
        format!("Deployment failed: {}", self)
    }

    pub fn recovery_suggestion(&self) -> &'static str {
        match self.category() {
            ErrorCategory::Configuration => {
                "Check deploy.toml and the NODE_KEY / PRIVATE_KEY environment variables"
            }
            ErrorCategory::Artifact => {
                "Compile the contracts first and point --artifacts at the output directory"
            }
            ErrorCategory::Network => "Check the network RPC URL and that the node is reachable",
            ErrorCategory::Transaction => {
                "Check the deployer balance, nonce and constructor requirements on the target network"
            }
            ErrorCategory::System => "Check file permissions and available disk space",
        }
    }
}

pub type Result<T> = std::result::Result<T, DeployError>;
