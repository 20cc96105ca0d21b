//! Command-line arguments.

use std::path::PathBuf;

use clap::Parser;

use crate::actions::Action;
use crate::config::ToolkitConfig;

#[derive(Debug, Parser)]
#[command(name = "testnet-toolkit")]
#[command(version, long_about = None)]
#[command(about = "Drive a list of testnet wallets through faucet, swap and liquidity actions")]
pub struct Args {
    /// Configuration file; defaults apply when it does not exist
    #[arg(short, long, default_value = "toolkit.toml")]
    pub config: PathBuf,

    /// Wallet list, overriding `files.wallets`
    #[arg(short, long)]
    pub wallets: Option<PathBuf>,

    /// Run one action and exit instead of showing the menu
    #[arg(short, long, value_enum)]
    pub action: Option<Action>,

    /// Transactions per wallet, overriding `run.max_transactions`
    #[arg(long)]
    pub tx_count: Option<u32>,

    /// Wallets to create for `generated-faucet`
    #[arg(long, default_value_t = 0)]
    pub generate: usize,
}

impl Args {
    /// Apply command-line overrides on top of the loaded configuration.
    pub fn apply(&self, config: &mut ToolkitConfig) {
        if let Some(path) = &self.wallets {
            config.files.wallets = path.display().to_string();
        }
        if let Some(count) = self.tx_count.filter(|c| *c > 0) {
            config.run.max_transactions = count;
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults() {
        let args = Args::try_parse_from(["testnet-toolkit"]).unwrap();
        assert_eq!(args.config, PathBuf::from("toolkit.toml"));
        assert!(args.action.is_none());
        assert_eq!(args.generate, 0);

        let mut config = ToolkitConfig::default();
        args.apply(&mut config);
        assert_eq!(config.files.wallets, "wallet.json");
        assert_eq!(config.run.max_transactions, 5);
    }

    #[test]
    fn test_overrides() {
        let args = Args::try_parse_from([
            "testnet-toolkit",
            "--wallets",
            "alt.json",
            "--action",
            "swap-usdt",
            "--tx-count",
            "2",
        ])
        .unwrap();
        assert_eq!(args.action, Some(Action::SwapUsdt));

        let mut config = ToolkitConfig::default();
        args.apply(&mut config);
        assert_eq!(config.files.wallets, "alt.json");
        assert_eq!(config.run.max_transactions, 2);
    }

    #[test]
    fn test_zero_tx_count_is_ignored() {
        let args = Args::try_parse_from(["testnet-toolkit", "--tx-count", "0"]).unwrap();
        let mut config = ToolkitConfig::default();
        args.apply(&mut config);
        assert_eq!(config.run.max_transactions, 5);
    }

    #[test]
    fn test_unknown_action_is_rejected() {
        assert!(Args::try_parse_from(["testnet-toolkit", "--action", "mint-nft"]).is_err());
    }
}
