//! Testnet wallet toolkit.
//!
//! # Architecture Overview
//!
//! ```text
//!   toolkit.toml ──► config ──┐
//!                             │
//!   wallet.json ──► wallets ──┼──► ActionContext ──► runner ──► task per wallet
//!                             │         │                          │
//!   args / menu ──► cli ──────┘         │              ┌───────────┼────────────┐
//!                                       │              ▼           ▼            ▼
//!                                       │             api      blockchain   resilience
//!                                       │          (REST)    (alloy RPC)    (retry)
//!                                       ▼
//!                          lifecycle (Ctrl-C ─► Shutdown)
//! ```

use std::path::Path;
use std::sync::Arc;

use clap::Parser;

use testnet_toolkit::actions::{run_action, ActionContext};
use testnet_toolkit::cli::{self, Args, Prompt};
use testnet_toolkit::config::load_or_default;
use testnet_toolkit::lifecycle::{spawn_ctrl_c_listener, Shutdown};
use testnet_toolkit::observability::init_logging;
use testnet_toolkit::wallets::WalletStore;

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    let args = Args::parse();

    let mut config = load_or_default(&args.config)?;
    args.apply(&mut config);
    init_logging(&config.observability);

    tracing::info!(
        version = env!("CARGO_PKG_VERSION"),
        chain_id = config.chain.chain_id,
        rpc_url = %config.chain.rpc_url,
        "testnet-toolkit starting"
    );

    let shutdown = Shutdown::new();
    spawn_ctrl_c_listener(shutdown.clone());

    let wallets_path = Path::new(&config.files.wallets).to_path_buf();
    let mut store = match WalletStore::load(&wallets_path) {
        Ok(store) => {
            tracing::info!(count = store.len(), file = %wallets_path.display(), "Loaded wallets");
            store
        }
        Err(e) => {
            tracing::warn!(error = %e, "No wallets loaded");
            WalletStore::empty(&wallets_path)
        }
    };

    let config = Arc::new(config);
    let mut ctx = ActionContext::new(config, shutdown.clone()).await?;

    match args.action {
        Some(action) => {
            let report = run_action(action, &ctx, &mut store, args.generate).await?;
            println!("{}: {}", action, report);
        }
        None => {
            let mut prompt = Prompt::stdin();
            cli::interactive(&mut ctx, &mut store, &mut prompt).await?;
        }
    }

    tracing::info!("Goodbye");
    Ok(())
}
