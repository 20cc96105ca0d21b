//! Configuration schema definitions.
//!
//! This module defines the complete configuration structure for the toolkit.
//! All types derive Serde traits for deserialization from config files.

use serde::{Deserialize, Serialize};

/// Root configuration for the toolkit.
#[derive(Debug, Clone, Deserialize, Serialize, Default)]
#[serde(default)]
pub struct ToolkitConfig {
    /// Chain connection and gas settings.
    pub chain: ChainConfig,

    /// REST endpoints of the network and the swap faucet.
    pub api: ApiConfig,

    /// Contract addresses used by swaps and liquidity.
    pub contracts: ContractsConfig,

    /// Per-transaction amounts, in whole token units.
    pub amounts: AmountsConfig,

    /// Retry configuration.
    pub retries: RetryConfig,

    /// Fixed pauses between calls.
    pub delays: DelayConfig,

    /// Local files the toolkit reads and writes.
    pub files: FilesConfig,

    /// Run settings.
    pub run: RunConfig,

    /// Observability settings.
    pub observability: ObservabilityConfig,
}

/// Chain connection configuration.
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(default)]
pub struct ChainConfig {
    /// JSON-RPC endpoint URL.
    pub rpc_url: String,

    /// Failover JSON-RPC endpoint URLs.
    pub failover_urls: Vec<String>,

    /// Chain ID used for signing.
    pub chain_id: u64,

    /// Block explorer base URL (without trailing slash).
    pub explorer_url: String,

    /// RPC request timeout in seconds.
    pub rpc_timeout_secs: u64,

    /// Number of block confirmations to wait for.
    pub confirmation_blocks: u32,

    /// Maximum time to wait for a transaction to confirm, in seconds.
    pub confirmation_timeout_secs: u64,

    /// Gas price multiplier (1.0 = node estimate, 1.2 = 20% buffer).
    pub gas_price_multiplier: f64,

    /// Maximum gas price in gwei (protection against spikes).
    pub max_gas_price_gwei: u64,
}

impl Default for ChainConfig {
    fn default() -> Self {
        Self {
            rpc_url: "https://testnet.dplabs-internal.com".to_string(),
            failover_urls: Vec::new(),
            chain_id: 688688,
            explorer_url: "https://testnet.pharosscan.xyz".to_string(),
            rpc_timeout_secs: 30,
            confirmation_blocks: 1,
            confirmation_timeout_secs: 120,
            gas_price_multiplier: 1.0,
            max_gas_price_gwei: 500,
        }
    }
}

/// HTTP API configuration.
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(default)]
pub struct ApiConfig {
    /// Base URL of the network API.
    pub base_url: String,

    /// Full URL of the swap faucet endpoint.
    pub zenith_faucet_url: String,

    /// Invite code sent with every login.
    pub invite_code: String,

    /// Message signed to log in.
    pub login_message: String,

    /// `Origin` header sent to the API.
    pub origin: String,

    /// `Referer` header sent to the API.
    pub referer: String,

    /// `User-Agent` header sent to the API.
    pub user_agent: String,

    /// Per-request timeout in seconds.
    pub request_timeout_secs: u64,

    /// Social task identifiers to verify.
    pub social_task_ids: Vec<u32>,

    /// IANA timezone used when printing faucet availability.
    pub timezone: String,
}

impl Default for ApiConfig {
    fn default() -> Self {
        Self {
            base_url: "https://api.pharosnetwork.xyz".to_string(),
            zenith_faucet_url: "https://testnet-router.zenithswap.xyz/api/v1/faucet".to_string(),
            invite_code: String::new(),
            login_message: "pharos".to_string(),
            origin: "https://testnet.pharosnetwork.xyz".to_string(),
            referer: "https://testnet.pharosnetwork.xyz/".to_string(),
            user_agent: "Mozilla/5.0 (X11; Linux x86_64) AppleWebKit/537.36 (KHTML, like Gecko) Chrome/124.0.0.0 Safari/537.36".to_string(),
            request_timeout_secs: 120,
            social_task_ids: vec![201, 202, 203, 204],
            timezone: "Asia/Jakarta".to_string(),
        }
    }
}

/// Contract addresses on the target chain.
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(default)]
pub struct ContractsConfig {
    /// Swap router exposing `multicall(deadline, bytes[])`.
    pub swap_router: String,

    /// Concentrated-liquidity position manager.
    pub position_manager: String,

    /// Wrapped native token (WPHRS).
    pub wrapped_native: String,

    /// USDC token.
    pub usdc: String,

    /// USDT token.
    pub usdt: String,

    /// Pool fee tier in hundredths of a bip.
    pub pool_fee: u32,
}

impl Default for ContractsConfig {
    fn default() -> Self {
        Self {
            swap_router: "0x1a4de519154ae51200b0ad7c90f7fac75547888a".to_string(),
            position_manager: "0xf8a1d4ff0f9b9af7ce58e1fc1833688f3bfd6115".to_string(),
            wrapped_native: "0x76aaada469d23216be5f7c596fa25f282ff9b364".to_string(),
            usdc: "0xad902cf99c2de2f1ba5ec4d642fd7e49cae9ee37".to_string(),
            usdt: "0xed59de2d7ad9c043442e381231ee3646fc3c2939".to_string(),
            pool_fee: 500,
        }
    }
}

/// Amounts used per transaction, as decimal strings.
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(default)]
pub struct AmountsConfig {
    /// Native coin swapped per swap transaction.
    pub swap_native: String,

    /// Native coin supplied per liquidity position.
    pub lp_native: String,

    /// Token amount supplied per liquidity position.
    pub lp_token: String,

    /// Native coin sent per random transfer.
    pub transfer_native: String,
}

impl Default for AmountsConfig {
    fn default() -> Self {
        Self {
            swap_native: "0.001".to_string(),
            lp_native: "0.001".to_string(),
            lp_token: "0.1".to_string(),
            transfer_native: "0.0001".to_string(),
        }
    }
}

/// Retry configuration.
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(default)]
pub struct RetryConfig {
    /// Maximum number of attempts, including the first one.
    pub max_attempts: u32,

    /// Delay between attempts in milliseconds.
    pub delay_ms: u64,

    /// Use jittered exponential backoff instead of a fixed delay.
    pub exponential: bool,

    /// Maximum delay for exponential backoff in milliseconds.
    pub max_delay_ms: u64,
}

impl Default for RetryConfig {
    fn default() -> Self {
        Self {
            max_attempts: 5,
            delay_ms: 5000,
            exponential: false,
            max_delay_ms: 30_000,
        }
    }
}

/// Fixed delays, in milliseconds.
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(default)]
pub struct DelayConfig {
    pub between_wallets_ms: u64,
    pub between_transactions_ms: u64,
    pub between_social_tasks_ms: u64,
    pub after_generation_ms: u64,
}

impl Default for DelayConfig {
    fn default() -> Self {
        Self {
            between_wallets_ms: 5000,
            between_transactions_ms: 5000,
            between_social_tasks_ms: 15_000,
            after_generation_ms: 3000,
        }
    }
}

/// Paths of the local files.
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(default)]
pub struct FilesConfig {
    /// Wallet list (`{"wallets": [...]}`).
    pub wallets: String,

    /// Private keys of generated wallets, one per line.
    pub generated_keys: String,

    /// Address that receives swept funds.
    pub main_wallet: String,
}

impl Default for FilesConfig {
    fn default() -> Self {
        Self {
            wallets: "wallet.json".to_string(),
            generated_keys: "address.txt".to_string(),
            main_wallet: "wallet.txt".to_string(),
        }
    }
}

/// Run settings.
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(default)]
pub struct RunConfig {
    /// Transactions per wallet for swaps, liquidity and transfers.
    pub max_transactions: u32,
}

impl Default for RunConfig {
    fn default() -> Self {
        Self { max_transactions: 5 }
    }
}

/// Observability configuration.
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(default)]
pub struct ObservabilityConfig {
    /// Log level (trace, debug, info, warn, error).
    pub log_level: String,

    /// Colored terminal output.
    pub ansi: bool,
}

impl Default for ObservabilityConfig {
    fn default() -> Self {
        Self {
            log_level: "info".to_string(),
            ansi: true,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_minimal_toml_uses_defaults() {
        let config: ToolkitConfig = toml::from_str("").unwrap();
        assert_eq!(config.chain.chain_id, 688688);
        assert_eq!(config.retries.max_attempts, 5);
        assert_eq!(config.api.social_task_ids, vec![201, 202, 203, 204]);
        assert_eq!(config.files.wallets, "wallet.json");
    }

    #[test]
    fn test_partial_section_override() {
        let config: ToolkitConfig = toml::from_str(
            r#"
            [chain]
            chain_id = 31337

            [run]
            max_transactions = 2
            "#,
        )
        .unwrap();
        assert_eq!(config.chain.chain_id, 31337);
        assert_eq!(config.chain.rpc_timeout_secs, 30);
        assert_eq!(config.run.max_transactions, 2);
    }
}
