use crate::domain::model::{ContractArtifact, TransactionReceipt};
use crate::utils::error::Result;
use alloy_primitives::{Address, Bytes, B256, U256};
use async_trait::async_trait;

pub trait ArtifactSource: Send + Sync {
    fn load(&self, contract_name: &str) -> Result<ContractArtifact>;
}

/// The subset of Ethereum JSON-RPC the deployment driver uses.
#[async_trait]
pub trait ChainClient: Send + Sync {
    async fn chain_id(&self) -> Result<u64>;
    async fn block_number(&self) -> Result<u64>;
    async fn pending_nonce(&self, address: Address) -> Result<u64>;
    async fn gas_price(&self) -> Result<u128>;
    async fn max_priority_fee_per_gas(&self) -> Result<u128>;
    async fn estimate_creation_gas(&self, from: Address, init_code: &Bytes, value: U256)
        -> Result<u64>;
    async fn send_raw_transaction(&self, raw: &Bytes) -> Result<B256>;
    async fn transaction_receipt(&self, tx_hash: B256) -> Result<Option<TransactionReceipt>>;
}
