use crate::config::{DeployConfig, NetworkConfig};
use crate::core::signer::DeployerKey;
use crate::core::{ArtifactSource, ChainClient, ContractArtifact, Deployment, TransactionReceipt};
use crate::domain::model::{to_u128, to_u64, CreationRequest, FeeParams, TxType};
use crate::utils::error::{DeployError, Result};
use alloy_primitives::{Bytes, B256, U256};
use std::time::Duration;

#[derive(Debug, Clone)]
pub struct DeployOptions {
    pub contract: String,
    pub network: String,
    pub confirmations: u64,
    pub poll_interval: Duration,
    pub timeout: Duration,
    pub gas_multiplier_percent: u64,
}

impl DeployOptions {
    pub fn from_config(config: &DeployConfig, network: &str) -> Self {
        let deploy = &config.deploy;
        Self {
            contract: deploy.contract.clone(),
            network: network.to_string(),
            confirmations: deploy.confirmations,
            poll_interval: Duration::from_millis(deploy.poll_interval_ms),
            timeout: Duration::from_secs(deploy.timeout_secs),
            gas_multiplier_percent: deploy.gas_multiplier_percent,
        }
    }
}

/// Single-attempt contract deployment: build, sign, submit, wait.
pub struct Deployer<C: ChainClient, A: ArtifactSource> {
    client: C,
    artifacts: A,
    key: DeployerKey,
    network: NetworkConfig,
    options: DeployOptions,
}

impl<C: ChainClient, A: ArtifactSource> Deployer<C, A> {
    /// Uses the first account of the network as deployer.
    pub fn new(client: C, artifacts: A, network: NetworkConfig, options: DeployOptions) -> Result<Self> {
        network.ensure_usable(&options.network)?;
        let secret = network
            .accounts
            .first()
            .ok_or_else(|| DeployError::MissingConfigError {
                field: format!("networks.{}.accounts", options.network),
            })?;
        let key = DeployerKey::from_secret(secret)?;

        Ok(Self {
            client,
            artifacts,
            key,
            network,
            options,
        })
    }

    pub fn deployer_address(&self) -> alloy_primitives::Address {
        self.key.address()
    }

    pub fn load_artifact(&self) -> Result<ContractArtifact> {
        self.artifacts.load(&self.options.contract)
    }

    pub async fn deploy(&self) -> Result<Deployment> {
        let artifact = self.load_artifact()?;
        let init_code: Bytes = artifact
            .bytecode
            .parse()
            .map_err(|e| DeployError::artifact(&artifact.contract_name, format!("bad bytecode hex: {}", e)))?;

        let sender = self.key.address();
        tracing::info!(
            "🚀 Deploying {} to {} from {}",
            artifact.contract_name,
            self.options.network,
            sender
        );

        let chain_id = self.client.chain_id().await?;
        if let Some(expected) = self.network.chain_id {
            if expected != chain_id {
                return Err(DeployError::InvalidConfigValueError {
                    field: format!("networks.{}.chain_id", self.options.network),
                    value: expected.to_string(),
                    reason: format!("node reports chain id {}", chain_id),
                });
            }
        }

        let nonce = self.client.pending_nonce(sender).await?;
        let fees = self.fee_params().await?;
        let gas_limit = match self.network.gas {
            Some(gas) => gas,
            None => {
                let estimate = self
                    .client
                    .estimate_creation_gas(sender, &init_code, U256::ZERO)
                    .await?;
                scale_gas(estimate, self.options.gas_multiplier_percent)
            }
        };
        tracing::debug!(
            "chain_id={} nonce={} gas_limit={} fees={:?}",
            chain_id,
            nonce,
            gas_limit,
            fees
        );

        let signed = self.key.sign_creation(&CreationRequest {
            chain_id,
            nonce,
            gas_limit,
            fees,
            init_code,
            value: U256::ZERO,
        })?;

        let node_hash = self.client.send_raw_transaction(&signed.raw).await?;
        if node_hash != signed.tx_hash {
            tracing::warn!(
                "Node returned transaction hash {} but local hash is {}",
                node_hash,
                signed.tx_hash
            );
        }
        tracing::info!("📨 Transaction sent: {}", signed.tx_hash);

        let receipt = self.await_receipt(signed.tx_hash).await?;

        if !receipt.succeeded() {
            return Err(DeployError::RevertedError {
                tx_hash: signed.tx_hash.to_string(),
            });
        }

        let address = receipt.contract_address.ok_or_else(|| {
            DeployError::unexpected("eth_getTransactionReceipt", "receipt has no contractAddress")
        })?;
        if address != signed.expected_address {
            tracing::warn!(
                "Receipt address {} differs from derived address {}",
                address,
                signed.expected_address
            );
        }

        let block_number = receipt
            .block_number
            .map(|n| to_u64("eth_getTransactionReceipt", n))
            .transpose()?
            .unwrap_or_default();
        let gas_used = to_u64("eth_getTransactionReceipt", receipt.gas_used)?;
        let effective_gas_price = match receipt.effective_gas_price {
            Some(price) => to_u128("eth_getTransactionReceipt", price)?,
            None => match fees {
                FeeParams::Legacy { gas_price } => gas_price,
                FeeParams::Eip1559 { max_fee_per_gas, .. } => max_fee_per_gas,
            },
        };

        Ok(Deployment {
            contract: artifact.contract_name,
            network: self.options.network.clone(),
            address,
            tx_hash: signed.tx_hash,
            block_number,
            gas_used,
            effective_gas_price,
        })
    }

    async fn fee_params(&self) -> Result<FeeParams> {
        let gas_price = match self.network.gas_price {
            Some(price) => price,
            None => self.client.gas_price().await?,
        };

        Ok(match self.network.tx_type {
            TxType::Legacy => FeeParams::Legacy { gas_price },
            TxType::Eip1559 => {
                let priority = match self.network.priority_fee {
                    Some(fee) => fee,
                    None => self.client.max_priority_fee_per_gas().await?,
                };
                FeeParams::Eip1559 {
                    max_fee_per_gas: gas_price.saturating_mul(2).saturating_add(priority),
                    max_priority_fee_per_gas: priority,
                }
            }
        })
    }

    async fn await_receipt(&self, tx_hash: B256) -> Result<TransactionReceipt> {
        tokio::time::timeout(self.options.timeout, self.poll_receipt(tx_hash))
            .await
            .map_err(|_| DeployError::TimeoutError {
                tx_hash: tx_hash.to_string(),
                seconds: self.options.timeout.as_secs(),
            })?
    }

    async fn poll_receipt(&self, tx_hash: B256) -> Result<TransactionReceipt> {
        loop {
            if let Some(receipt) = self.client.transaction_receipt(tx_hash).await? {
                if let Some(included) = receipt.block_number {
                    let included =
                        to_u64("eth_getTransactionReceipt", included)?;
                    if self.confirmed(included).await? {
                        return Ok(receipt);
                    }
                }
            }
            tokio::time::sleep(self.options.poll_interval).await;
        }
    }

    async fn confirmed(&self, included: u64) -> Result<bool> {
        if self.options.confirmations <= 1 {
            return Ok(true);
        }
        let head = self.client.block_number().await?;
        let depth = head.saturating_sub(included) + 1;
        tracing::debug!("{}/{} confirmations", depth, self.options.confirmations);
        Ok(depth >= self.options.confirmations)
    }
}

/// Applies the safety margin to a gas estimate, e.g. 120 => +20%.
pub fn scale_gas(estimate: u64, multiplier_percent: u64) -> u64 {
    ((estimate as u128 * multiplier_percent as u128) / 100).min(u64::MAX as u128) as u64
}
