//! Shared state handed to every action.

use std::sync::Arc;
use std::time::Duration;

use alloy::primitives::utils::parse_ether;
use alloy::primitives::{Address, U256};

use crate::actions::ActionError;
use crate::api::{PharosApi, ZenithFaucet};
use crate::blockchain::BlockchainClient;
use crate::config::ToolkitConfig;
use crate::lifecycle::Shutdown;
use crate::resilience::RetryPolicy;

/// Contract addresses, parsed once.
#[derive(Debug, Clone, Copy)]
pub struct Contracts {
    pub swap_router: Address,
    pub position_manager: Address,
    pub wrapped_native: Address,
    pub usdc: Address,
    pub usdt: Address,
    pub pool_fee: u32,
}

/// Per-transaction amounts in wei; the LP token amount stays decimal until
/// the token's decimals are known.
#[derive(Debug, Clone)]
pub struct Amounts {
    pub swap_native: U256,
    pub lp_native: U256,
    pub lp_token: String,
    pub transfer_native: U256,
}

/// Everything an action needs besides the wallet it is working on.
#[derive(Debug, Clone)]
pub struct ActionContext {
    pub config: Arc<ToolkitConfig>,
    pub api: PharosApi,
    pub zenith: ZenithFaucet,
    pub chain: BlockchainClient,
    pub contracts: Contracts,
    pub amounts: Amounts,
    pub shutdown: Shutdown,
    /// Transactions per wallet for swaps, liquidity and transfers.
    pub max_transactions: u32,
}

impl ActionContext {
    /// Build the context and check the RPC answers with the configured chain.
    pub async fn new(config: Arc<ToolkitConfig>, shutdown: Shutdown) -> Result<Self, ActionError> {
        let chain = BlockchainClient::new(config.chain.clone()).await?;
        Self::with_chain(config, chain, shutdown)
    }

    /// Build the context without any network access.
    pub fn connect(config: Arc<ToolkitConfig>, shutdown: Shutdown) -> Result<Self, ActionError> {
        let chain = BlockchainClient::connect(config.chain.clone())?;
        Self::with_chain(config, chain, shutdown)
    }

    fn with_chain(
        config: Arc<ToolkitConfig>,
        chain: BlockchainClient,
        shutdown: Shutdown,
    ) -> Result<Self, ActionError> {
        let api = PharosApi::new(&config.api)?;
        let zenith = ZenithFaucet::new(&config.api)?;

        let c = &config.contracts;
        let contracts = Contracts {
            swap_router: address("contracts.swap_router", &c.swap_router)?,
            position_manager: address("contracts.position_manager", &c.position_manager)?,
            wrapped_native: address("contracts.wrapped_native", &c.wrapped_native)?,
            usdc: address("contracts.usdc", &c.usdc)?,
            usdt: address("contracts.usdt", &c.usdt)?,
            pool_fee: c.pool_fee,
        };

        let a = &config.amounts;
        let amounts = Amounts {
            swap_native: ether("amounts.swap_native", &a.swap_native)?,
            lp_native: ether("amounts.lp_native", &a.lp_native)?,
            lp_token: a.lp_token.clone(),
            transfer_native: ether("amounts.transfer_native", &a.transfer_native)?,
        };

        Ok(Self {
            max_transactions: config.run.max_transactions.max(1),
            config,
            api,
            zenith,
            chain,
            contracts,
            amounts,
            shutdown,
        })
    }

    /// Retry policy from configuration.
    pub fn retry_policy(&self) -> RetryPolicy {
        RetryPolicy::from(&self.config.retries)
    }

    pub fn chain_id(&self) -> u64 {
        self.config.chain.chain_id
    }

    pub fn between_wallets(&self) -> Duration {
        Duration::from_millis(self.config.delays.between_wallets_ms)
    }

    pub fn between_transactions(&self) -> Duration {
        Duration::from_millis(self.config.delays.between_transactions_ms)
    }
}

fn address(field: &'static str, value: &str) -> Result<Address, ActionError> {
    value.parse().map_err(|e| ActionError::Config {
        field,
        message: format!("'{}': {}", value, e),
    })
}

fn ether(field: &'static str, value: &str) -> Result<U256, ActionError> {
    parse_ether(value).map_err(|e| ActionError::Config {
        field,
        message: format!("'{}': {}", value, e),
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_connect_parses_config() {
        let ctx =
            ActionContext::connect(Arc::new(ToolkitConfig::default()), Shutdown::new()).unwrap();
        assert_eq!(ctx.amounts.swap_native, U256::from(1_000_000_000_000_000u64));
        assert_eq!(ctx.max_transactions, 5);
        assert_eq!(ctx.contracts.pool_fee, 500);
        assert_eq!(ctx.retry_policy().max_attempts, 5);
    }

    #[test]
    fn test_connect_rejects_bad_address() {
        let mut config = ToolkitConfig::default();
        config.contracts.usdt = "0xnope".to_string();
        let err = ActionContext::connect(Arc::new(config), Shutdown::new()).unwrap_err();
        assert!(err.to_string().contains("contracts.usdt"));
    }
}
