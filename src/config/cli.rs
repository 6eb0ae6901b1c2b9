use crate::config::DeployConfig;
use clap::Parser;
use std::path::Path;

pub const DEFAULT_CONFIG_PATH: &str = "deploy.toml";

#[derive(Debug, Clone, Parser)]
#[command(name = "staking-deploy")]
#[command(about = "Deploys the StakingToken contract to a configured network")]
pub struct CliArgs {
    /// Path to the TOML configuration file [default: deploy.toml]
    #[arg(short, long)]
    pub config: Option<String>,

    /// Network to deploy to (defaults to deploy.default_network)
    #[arg(short, long, env = "DEPLOY_NETWORK")]
    pub network: Option<String>,

    /// Name of the compiled contract artifact to deploy
    #[arg(long)]
    pub contract: Option<String>,

    /// Directory holding the compiled artifacts
    #[arg(long)]
    pub artifacts: Option<String>,

    /// Blocks to wait for after inclusion
    #[arg(long)]
    pub confirmations: Option<u64>,

    /// Resolve configuration and artifact without sending anything
    #[arg(long)]
    pub dry_run: bool,

    /// Emit logs as JSON lines
    #[arg(long)]
    pub json_logs: bool,

    /// Enable verbose output
    #[arg(short, long)]
    pub verbose: bool,
}

impl CliArgs {
    pub fn config_path(&self) -> &str {
        self.config.as_deref().unwrap_or(DEFAULT_CONFIG_PATH)
    }

    /// The bundled configuration stands in only when no path was given and
    /// the default file is absent.
    pub fn load_config(&self) -> crate::Result<DeployConfig> {
        match &self.config {
            Some(path) => DeployConfig::from_file(path),
            None if Path::new(DEFAULT_CONFIG_PATH).exists() => {
                DeployConfig::from_file(DEFAULT_CONFIG_PATH)
            }
            None => {
                tracing::info!("No {} found, using built-in configuration", DEFAULT_CONFIG_PATH);
                DeployConfig::builtin()
            }
        }
    }

    pub fn apply_overrides(&self, config: &mut DeployConfig) {
        if let Some(contract) = &self.contract {
            config.deploy.contract = contract.clone();
            tracing::info!("🔧 Contract overridden to: {}", contract);
        }
        if let Some(artifacts) = &self.artifacts {
            config.deploy.artifacts = artifacts.clone();
        }
        if let Some(confirmations) = self.confirmations {
            config.deploy.confirmations = confirmations;
        }
    }

    pub fn network_name<'a>(&'a self, config: &'a DeployConfig) -> &'a str {
        self.network
            .as_deref()
            .unwrap_or(config.deploy.default_network.as_str())
    }
}
