//! Testnet wallet toolkit library.

pub mod config;
pub mod observability;
pub mod lifecycle;
pub mod resilience;
pub mod blockchain;
pub mod api;
pub mod wallets;
pub mod actions;
pub mod cli;

pub use actions::{run_action, Action, ActionContext, ActionError, ActionReport, RunSummary};
pub use config::schema::ToolkitConfig;
pub use lifecycle::Shutdown;
