use crate::config::SecretKey;
use crate::domain::model::{CreationRequest, FeeParams, SignedCreation};
use crate::utils::error::{DeployError, Result};
use alloy_consensus::{SignableTransaction, TxEip1559, TxEnvelope, TxLegacy};
use alloy_eips::eip2718::Encodable2718;
use alloy_primitives::{Address, Bytes, TxKind};
use alloy_signer::SignerSync;
use alloy_signer_local::PrivateKeySigner;

/// The account that signs the creation transaction.
pub struct DeployerKey {
    signer: PrivateKeySigner,
}

impl DeployerKey {
    pub fn from_secret(key: &SecretKey) -> Result<Self> {
        let signer: PrivateKeySigner =
            key.expose()
                .trim()
                .parse()
                .map_err(|e| DeployError::SigningError {
                    message: format!("invalid private key: {}", e),
                })?;
        Ok(Self { signer })
    }

    pub fn address(&self) -> Address {
        self.signer.address()
    }

    pub fn sign_creation(&self, request: &CreationRequest) -> Result<SignedCreation> {
        let envelope: TxEnvelope = match request.fees {
            FeeParams::Eip1559 {
                max_fee_per_gas,
                max_priority_fee_per_gas,
            } => {
                let tx = TxEip1559 {
                    chain_id: request.chain_id,
                    nonce: request.nonce,
                    gas_limit: request.gas_limit,
                    max_fee_per_gas,
                    max_priority_fee_per_gas,
                    to: TxKind::Create,
                    value: request.value,
                    access_list: Default::default(),
                    input: request.init_code.clone(),
                };
                let signature = self.sign_hash(&tx)?;
                tx.into_signed(signature).into()
            }
            FeeParams::Legacy { gas_price } => {
                let tx = TxLegacy {
                    chain_id: Some(request.chain_id),
                    nonce: request.nonce,
                    gas_price,
                    gas_limit: request.gas_limit,
                    to: TxKind::Create,
                    value: request.value,
                    input: request.init_code.clone(),
                };
                let signature = self.sign_hash(&tx)?;
                tx.into_signed(signature).into()
            }
        };

        Ok(SignedCreation {
            tx_hash: *envelope.tx_hash(),
            raw: Bytes::from(envelope.encoded_2718()),
            expected_address: self.address().create(request.nonce),
        })
    }

    fn sign_hash<T: SignableTransaction<alloy_primitives::Signature>>(
        &self,
        tx: &T,
    ) -> Result<alloy_primitives::Signature> {
        self.signer
            .sign_hash_sync(&tx.signature_hash())
            .map_err(|e| DeployError::SigningError {
                message: e.to_string(),
            })
    }
}
