use crate::domain::model::TxType;
use crate::utils::error::{DeployError, Result};
use crate::utils::validation::{self, Validate};
use regex::Regex;
use serde::{Deserialize, Serialize};
use std::collections::{BTreeMap, BTreeSet};
use std::fmt;
use std::path::Path;
use std::sync::LazyLock;

static PLACEHOLDER_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"\$\{([^}]+)\}").expect("static regex"));

/// Bundled copy of `deploy.toml`, used when no config file is present.
const BUILTIN_CONFIG: &str = include_str!("../../deploy.toml");

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DeployConfig {
    pub solidity: SolidityConfig,
    #[serde(default)]
    pub networks: BTreeMap<String, NetworkConfig>,
    #[serde(default)]
    pub gas_reporter: GasReporterConfig,
    pub typechain: Option<TypechainConfig>,
    pub etherscan: Option<EtherscanConfig>,
    #[serde(default)]
    pub deploy: DeploySettings,
    /// Environment variables referenced by the file but not set.
    #[serde(skip)]
    pub unresolved: BTreeSet<String>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SolidityConfig {
    pub version: String,
    #[serde(default)]
    pub optimizer: OptimizerConfig,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct OptimizerConfig {
    pub enabled: bool,
    pub runs: u64,
}

impl Default for OptimizerConfig {
    fn default() -> Self {
        Self {
            enabled: false,
            runs: 200,
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct NetworkConfig {
    pub url: String,
    #[serde(default)]
    pub accounts: Vec<SecretKey>,
    pub chain_id: Option<u64>,
    /// Fixed gas limit; estimated when absent.
    pub gas: Option<u64>,
    /// Fixed gas price in wei; queried when absent.
    pub gas_price: Option<u128>,
    /// Fixed priority fee in wei for EIP-1559 transactions.
    pub priority_fee: Option<u128>,
    #[serde(default)]
    pub tx_type: TxType,
}

impl NetworkConfig {
    /// Fails when the network cannot be deployed to as configured.
    pub fn ensure_usable(&self, name: &str) -> Result<()> {
        if let Some(caps) = PLACEHOLDER_RE.captures(&self.url) {
            return Err(DeployError::MissingConfigError {
                field: format!("networks.{}.url (environment variable {})", name, &caps[1]),
            });
        }
        validation::validate_url(&format!("networks.{}.url", name), &self.url)?;
        if self.accounts.is_empty() {
            return Err(DeployError::MissingConfigError {
                field: format!("networks.{}.accounts (is PRIVATE_KEY set?)", name),
            });
        }
        Ok(())
    }
}

/// Hex private key. Never printed.
#[derive(Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct SecretKey(String);

impl SecretKey {
    pub fn new(key: impl Into<String>) -> Self {
        Self(key.into())
    }

    pub fn expose(&self) -> &str {
        &self.0
    }
}

impl fmt::Debug for SecretKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("SecretKey(<redacted>)")
    }
}

/// `true`/`false`, or an environment-backed string whose presence enables it.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(untagged)]
pub enum Toggle {
    Bool(bool),
    Env(String),
}

impl Toggle {
    pub fn is_enabled(&self) -> bool {
        match self {
            Toggle::Bool(b) => *b,
            Toggle::Env(value) => !PLACEHOLDER_RE.is_match(value),
        }
    }
}

impl Default for Toggle {
    fn default() -> Self {
        Toggle::Bool(false)
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct GasReporterConfig {
    #[serde(default)]
    pub enabled: Toggle,
    #[serde(default = "default_currency")]
    pub currency: String,
}

impl Default for GasReporterConfig {
    fn default() -> Self {
        Self {
            enabled: Toggle::default(),
            currency: default_currency(),
        }
    }
}

fn default_currency() -> String {
    "USD".to_string()
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TypechainConfig {
    pub target: String,
    #[serde(default)]
    pub always_generate_overloads: bool,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct EtherscanConfig {
    pub api_key: Option<String>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DeploySettings {
    #[serde(default = "default_network")]
    pub default_network: String,
    #[serde(default = "default_contract")]
    pub contract: String,
    #[serde(default = "default_artifacts")]
    pub artifacts: String,
    #[serde(default = "default_confirmations")]
    pub confirmations: u64,
    #[serde(default = "default_poll_interval_ms")]
    pub poll_interval_ms: u64,
    #[serde(default = "default_timeout_secs")]
    pub timeout_secs: u64,
    #[serde(default = "default_gas_multiplier_percent")]
    pub gas_multiplier_percent: u64,
}

impl Default for DeploySettings {
    fn default() -> Self {
        Self {
            default_network: default_network(),
            contract: default_contract(),
            artifacts: default_artifacts(),
            confirmations: default_confirmations(),
            poll_interval_ms: default_poll_interval_ms(),
            timeout_secs: default_timeout_secs(),
            gas_multiplier_percent: default_gas_multiplier_percent(),
        }
    }
}

fn default_network() -> String {
    "localhost".to_string()
}

fn default_contract() -> String {
    "StakingToken".to_string()
}

fn default_artifacts() -> String {
    "artifacts".to_string()
}

fn default_confirmations() -> u64 {
    1
}

fn default_poll_interval_ms() -> u64 {
    1000
}

fn default_timeout_secs() -> u64 {
    120
}

fn default_gas_multiplier_percent() -> u64 {
    120
}

impl DeployConfig {
    pub fn from_file<P: AsRef<Path>>(path: P) -> Result<Self> {
        let content = std::fs::read_to_string(&path).map_err(DeployError::IoError)?;
        Self::from_toml_str(&content)
    }

    pub fn builtin() -> Result<Self> {
        Self::from_toml_str(BUILTIN_CONFIG)
    }

    /// Parses TOML, then substitutes `${VAR}` placeholders inside string values.
    pub fn from_toml_str(content: &str) -> Result<Self> {
        let mut table: toml::Table = toml::from_str(content).map_err(toml_error)?;

        let mut unresolved = BTreeSet::new();
        for (_, value) in table.iter_mut() {
            Self::substitute_env_vars(value, &mut unresolved);
        }

        let mut config: DeployConfig = toml::Value::Table(table)
            .try_into()
            .map_err(toml_error)?;

        // Credentials whose variable is unset are dropped, leaving the list empty.
        for network in config.networks.values_mut() {
            network
                .accounts
                .retain(|key| !PLACEHOLDER_RE.is_match(key.expose()));
        }

        if let Some(etherscan) = config.etherscan.as_mut() {
            if etherscan
                .api_key
                .as_deref()
                .is_some_and(|key| PLACEHOLDER_RE.is_match(key))
            {
                etherscan.api_key = None;
            }
        }

        config.unresolved = unresolved;
        Ok(config)
    }

    fn substitute_env_vars(value: &mut toml::Value, unresolved: &mut BTreeSet<String>) {
        match value {
            toml::Value::String(text) => {
                let replaced = PLACEHOLDER_RE.replace_all(text.as_str(), |caps: &regex::Captures| {
                    let var_name = &caps[1];
                    match std::env::var(var_name) {
                        Ok(value) => value,
                        Err(_) => {
                            unresolved.insert(var_name.to_string());
                            format!("${{{}}}", var_name)
                        }
                    }
                });
                *text = replaced.into_owned();
            }
            toml::Value::Array(items) => {
                for item in items {
                    Self::substitute_env_vars(item, unresolved);
                }
            }
            toml::Value::Table(table) => {
                for (_, item) in table.iter_mut() {
                    Self::substitute_env_vars(item, unresolved);
                }
            }
            _ => {}
        }
    }

    pub fn validate_config(&self) -> Result<()> {
        validation::validate_semver("solidity.version", &self.solidity.version)?;
        if self.solidity.optimizer.enabled {
            validation::validate_positive_number(
                "solidity.optimizer.runs",
                self.solidity.optimizer.runs,
                1,
            )?;
        }

        for (name, network) in &self.networks {
            // Placeholder URLs are only an error once the network is selected.
            if !PLACEHOLDER_RE.is_match(&network.url) {
                validation::validate_url(&format!("networks.{}.url", name), &network.url)?;
            }
        }

        validation::validate_non_empty_string(
            "gas_reporter.currency",
            &self.gas_reporter.currency,
        )?;

        if let Some(typechain) = &self.typechain {
            validation::validate_non_empty_string("typechain.target", &typechain.target)?;
        }

        let deploy = &self.deploy;
        validation::validate_non_empty_string("deploy.contract", &deploy.contract)?;
        validation::validate_path("deploy.artifacts", &deploy.artifacts)?;
        validation::validate_positive_number("deploy.confirmations", deploy.confirmations, 1)?;
        validation::validate_positive_number("deploy.poll_interval_ms", deploy.poll_interval_ms, 1)?;
        validation::validate_positive_number("deploy.timeout_secs", deploy.timeout_secs, 1)?;
        validation::validate_positive_number(
            "deploy.gas_multiplier_percent",
            deploy.gas_multiplier_percent,
            100,
        )?;

        if !self.networks.contains_key(&deploy.default_network) {
            return Err(DeployError::InvalidConfigValueError {
                field: "deploy.default_network".to_string(),
                value: deploy.default_network.clone(),
                reason: format!(
                    "Not a configured network. Known networks: {}",
                    self.network_names().join(", ")
                ),
            });
        }

        Ok(())
    }

    pub fn network_names(&self) -> Vec<&str> {
        self.networks.keys().map(String::as_str).collect()
    }

    pub fn network(&self, name: &str) -> Result<&NetworkConfig> {
        self.networks.get(name).ok_or_else(|| DeployError::InvalidConfigValueError {
            field: "network".to_string(),
            value: name.to_string(),
            reason: format!("Known networks: {}", self.network_names().join(", ")),
        })
    }

    pub fn gas_reporter_enabled(&self) -> bool {
        self.gas_reporter.enabled.is_enabled()
    }
}

fn toml_error(e: impl std::fmt::Display) -> DeployError {
    DeployError::InvalidConfigValueError {
        field: "toml_parsing".to_string(),
        value: String::new(),
        reason: format!("TOML parsing error: {}", e),
    }
}

impl Validate for DeployConfig {
    fn validate(&self) -> Result<()> {
        self.validate_config()
    }
}
