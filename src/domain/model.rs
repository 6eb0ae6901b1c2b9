use crate::utils::error::{DeployError, Result};
use alloy_primitives::{Address, Bytes, B256, U256};
use serde::{Deserialize, Serialize};

/// Compiled contract as emitted by the build tool (`artifacts/**/<Name>.json`).
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ContractArtifact {
    pub contract_name: String,
    #[serde(default)]
    pub source_name: String,
    #[serde(default)]
    pub abi: serde_json::Value,
    pub bytecode: String,
}

impl ContractArtifact {
    /// Number of inputs declared by the ABI constructor, 0 when there is none.
    pub fn constructor_inputs(&self) -> usize {
        self.abi
            .as_array()
            .and_then(|entries| {
                entries
                    .iter()
                    .find(|e| e.get("type").and_then(|t| t.as_str()) == Some("constructor"))
            })
            .and_then(|ctor| ctor.get("inputs"))
            .and_then(|inputs| inputs.as_array())
            .map(|inputs| inputs.len())
            .unwrap_or(0)
    }

    /// Unlinked libraries show up as `__$<hash>$__` placeholders.
    pub fn has_link_references(&self) -> bool {
        self.bytecode.contains("__$")
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum TxType {
    #[default]
    Eip1559,
    Legacy,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FeeParams {
    Eip1559 {
        max_fee_per_gas: u128,
        max_priority_fee_per_gas: u128,
    },
    Legacy {
        gas_price: u128,
    },
}

/// Everything needed to build the creation transaction.
#[derive(Debug, Clone)]
pub struct CreationRequest {
    pub chain_id: u64,
    pub nonce: u64,
    pub gas_limit: u64,
    pub fees: FeeParams,
    pub init_code: Bytes,
    pub value: U256,
}

/// A signed, 2718-encoded transaction ready for `eth_sendRawTransaction`.
#[derive(Debug, Clone)]
pub struct SignedCreation {
    pub raw: Bytes,
    pub tx_hash: B256,
    pub expected_address: Address,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TransactionReceipt {
    pub transaction_hash: B256,
    pub block_number: Option<U256>,
    pub contract_address: Option<Address>,
    pub status: Option<U256>,
    pub gas_used: U256,
    pub effective_gas_price: Option<U256>,
}

impl TransactionReceipt {
    /// Pre-Byzantium receipts carry no status field and count as success.
    pub fn succeeded(&self) -> bool {
        self.status.map(|s| !s.is_zero()).unwrap_or(true)
    }
}

#[derive(Debug, Clone, Serialize)]
pub struct Deployment {
    pub contract: String,
    pub network: String,
    pub address: Address,
    pub tx_hash: B256,
    pub block_number: u64,
    pub gas_used: u64,
    pub effective_gas_price: u128,
}

/// Narrows a JSON-RPC quantity; `context` names the call it came from.
pub fn to_u64(context: &str, value: U256) -> Result<u64> {
    u64::try_from(value)
        .map_err(|_| DeployError::unexpected(context, format!("{} overflows u64", value)))
}

pub fn to_u128(context: &str, value: U256) -> Result<u128> {
    u128::try_from(value)
        .map_err(|_| DeployError::unexpected(context, format!("{} overflows u128", value)))
}
