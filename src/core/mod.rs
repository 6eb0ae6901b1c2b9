pub mod deployer;
pub mod gas_report;
pub mod signer;

pub use crate::domain::model::{ContractArtifact, Deployment, TransactionReceipt};
pub use crate::domain::ports::{ArtifactSource, ChainClient};
pub use crate::utils::error::Result;
