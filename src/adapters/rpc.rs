use crate::domain::model::{to_u128, to_u64, TransactionReceipt};
use crate::domain::ports::ChainClient;
use crate::utils::error::{DeployError, Result};
use alloy_primitives::{Address, Bytes, B256, U256};
use async_trait::async_trait;
use reqwest::Client;
use serde::de::DeserializeOwned;
use serde::Deserialize;
use serde_json::{json, Value};
use std::sync::atomic::{AtomicU64, Ordering};
use std::time::Duration;

const REQUEST_TIMEOUT: Duration = Duration::from_secs(30);

#[derive(Debug, Deserialize)]
struct RpcResponse {
    #[serde(default)]
    result: Value,
    error: Option<RpcErrorObject>,
}

#[derive(Debug, Deserialize)]
struct RpcErrorObject {
    code: i64,
    message: String,
}

/// Ethereum JSON-RPC over HTTP.
pub struct JsonRpcClient {
    client: Client,
    url: String,
    next_id: AtomicU64,
}

impl JsonRpcClient {
    pub fn new(url: impl Into<String>) -> Result<Self> {
        let client = Client::builder().timeout(REQUEST_TIMEOUT).build()?;
        Ok(Self {
            client,
            url: url.into(),
            next_id: AtomicU64::new(1),
        })
    }

    pub async fn call<T: DeserializeOwned>(&self, method: &str, params: Value) -> Result<T> {
        let id = self.next_id.fetch_add(1, Ordering::Relaxed);
        let request = json!({
            "jsonrpc": "2.0",
            "id": id,
            "method": method,
            "params": params,
        });

        tracing::debug!("RPC {} (id {})", method, id);
        let response = self.client.post(&self.url).json(&request).send().await?;
        let status = response.status();
        let text = response.text().await?;

        let body: RpcResponse = serde_json::from_str(&text).map_err(|e| {
            DeployError::unexpected(method, format!("HTTP {} with unparseable body: {}", status, e))
        })?;

        if let Some(error) = body.error {
            return Err(DeployError::RpcError {
                method: method.to_string(),
                code: error.code,
                message: error.message,
            });
        }

        serde_json::from_value(body.result)
            .map_err(|e| DeployError::unexpected(method, format!("bad result: {}", e)))
    }

    async fn quantity(&self, method: &str, params: Value) -> Result<U256> {
        self.call::<U256>(method, params).await
    }
}

#[async_trait]
impl ChainClient for JsonRpcClient {
    async fn chain_id(&self) -> Result<u64> {
        let value = self.quantity("eth_chainId", json!([])).await?;
        to_u64("eth_chainId", value)
    }

    async fn block_number(&self) -> Result<u64> {
        let value = self.quantity("eth_blockNumber", json!([])).await?;
        to_u64("eth_blockNumber", value)
    }

    async fn pending_nonce(&self, address: Address) -> Result<u64> {
        let value = self
            .quantity("eth_getTransactionCount", json!([address, "pending"]))
            .await?;
        to_u64("eth_getTransactionCount", value)
    }

    async fn gas_price(&self) -> Result<u128> {
        let value = self.quantity("eth_gasPrice", json!([])).await?;
        to_u128("eth_gasPrice", value)
    }

    async fn max_priority_fee_per_gas(&self) -> Result<u128> {
        let value = self.quantity("eth_maxPriorityFeePerGas", json!([])).await?;
        to_u128("eth_maxPriorityFeePerGas", value)
    }

    async fn estimate_creation_gas(
        &self,
        from: Address,
        init_code: &Bytes,
        value: U256,
    ) -> Result<u64> {
        let estimate = self
            .quantity(
                "eth_estimateGas",
                json!([{ "from": from, "data": init_code, "value": value }]),
            )
            .await?;
        to_u64("eth_estimateGas", estimate)
    }

    async fn send_raw_transaction(&self, raw: &Bytes) -> Result<B256> {
        self.call("eth_sendRawTransaction", json!([raw])).await
    }

    async fn transaction_receipt(&self, tx_hash: B256) -> Result<Option<TransactionReceipt>> {
        self.call("eth_getTransactionReceipt", json!([tx_hash])).await
    }
}
