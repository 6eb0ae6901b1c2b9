pub mod adapters;
pub mod config;
pub mod core;
pub mod domain;
pub mod utils;

#[cfg(feature = "cli")]
pub use config::CliArgs;
pub use config::DeployConfig;

pub use adapters::{FsArtifactStore, JsonRpcClient};
pub use crate::core::{
    deployer::{DeployOptions, Deployer},
    gas_report::GasReport,
};
pub use domain::model::Deployment;
pub use utils::error::{DeployError, Result};
