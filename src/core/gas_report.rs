use crate::domain::model::Deployment;
use alloy_primitives::utils::{format_ether, format_units};
use alloy_primitives::U256;
use std::fmt;

/// Gas summary for a finished deployment. Amounts stay in ether; the
/// configured currency is carried as a label only.
#[derive(Debug, Clone)]
pub struct GasReport {
    pub contract: String,
    pub gas_used: u64,
    pub effective_gas_price: u128,
    pub currency: String,
}

impl GasReport {
    pub fn new(deployment: &Deployment, currency: &str) -> Self {
        Self {
            contract: deployment.contract.clone(),
            gas_used: deployment.gas_used,
            effective_gas_price: deployment.effective_gas_price,
            currency: currency.to_string(),
        }
    }

    pub fn cost_wei(&self) -> U256 {
        U256::from(self.gas_used) * U256::from(self.effective_gas_price)
    }

    pub fn price_gwei(&self) -> String {
        format_units(U256::from(self.effective_gas_price), "gwei")
            .unwrap_or_else(|_| self.effective_gas_price.to_string())
    }

    pub fn cost_ether(&self) -> String {
        format_ether(self.cost_wei())
    }
}

impl fmt::Display for GasReport {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{} deployment: {} gas @ {} gwei = {} ETH ({} conversion unavailable)",
            self.contract,
            self.gas_used,
            self.price_gwei(),
            self.cost_ether(),
            self.currency
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use alloy_primitives::{Address, B256};

    #[test]
    fn test_cost() {
        let deployment = Deployment {
            contract: "StakingToken".to_string(),
            network: "localhost".to_string(),
            address: Address::ZERO,
            tx_hash: B256::ZERO,
            block_number: 1,
            gas_used: 1_000_000,
            effective_gas_price: 2_000_000_000,
        };
        let report = GasReport::new(&deployment, "USD");

        assert_eq!(report.cost_wei(), U256::from(2_000_000_000_000_000u128));
        assert!(report.cost_ether().starts_with("0.002"));
        assert!(report.price_gwei().starts_with("2."));
        assert!(report.to_string().contains("1000000 gas"));
    }
}
