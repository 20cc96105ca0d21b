//! Actions subsystem.
//!
//! # Responsibilities
//! - Name every action the toolkit offers (`Action`)
//! - Hold the shared clients and settings (`ActionContext`)
//! - Run one canonical task per action over the wallet list (`runner`)
//!
//! # Data Flow
//! ```text
//! Action ──► run_action ──► runner::run_for_each ──► WalletTask::run (per wallet)
//!                │                                        │
//!                │                               api / blockchain / retry
//!                └──► generated::run_generated_faucet (own wallet source)
//! ```

pub mod account;
pub mod context;
pub mod faucet;
pub mod generated;
pub mod liquidity;
pub mod runner;
pub mod social;
pub mod swap;
pub mod transfer;

use thiserror::Error;
use tracing::Instrument;

use crate::api::ApiError;
use crate::blockchain::BlockchainError;
use crate::wallets::{WalletError, WalletStore};

pub use context::ActionContext;
pub use generated::GeneratedReport;
pub use runner::{run_for_each, Outcome, RunSummary, WalletSession, WalletTask};

use account::{CheckBalance, CheckIn, Login};
use faucet::{ClaimFaucet, ClaimUsdc};
use liquidity::AddLiquidity;
use social::SocialTask;
use swap::{Stablecoin, Swap};
use transfer::RandomTransfer;

/// Everything an operator can run.
#[derive(Debug, Clone, Copy, PartialEq, Eq, clap::ValueEnum)]
pub enum Action {
    Login,
    CheckIn,
    CheckBalance,
    ClaimFaucet,
    ClaimUsdc,
    SwapUsdc,
    SwapUsdt,
    AddLpUsdc,
    AddLpUsdt,
    RandomTransfer,
    SocialTask,
    GeneratedFaucet,
}

impl Action {
    /// Menu order.
    pub const ALL: [Action; 12] = [
        Action::Login,
        Action::CheckIn,
        Action::CheckBalance,
        Action::ClaimFaucet,
        Action::ClaimUsdc,
        Action::SwapUsdc,
        Action::SwapUsdt,
        Action::AddLpUsdc,
        Action::AddLpUsdt,
        Action::RandomTransfer,
        Action::SocialTask,
        Action::GeneratedFaucet,
    ];

    /// Human-readable name shown in the menu and logs.
    pub fn label(&self) -> &'static str {
        match self {
            Action::Login => "Login",
            Action::CheckIn => "Check-in",
            Action::CheckBalance => "Check Balance",
            Action::ClaimFaucet => "Claim PHRS",
            Action::ClaimUsdc => "Claim USDC",
            Action::SwapUsdc => "Swap PHRS ➜ USDC",
            Action::SwapUsdt => "Swap PHRS ➜ USDT",
            Action::AddLpUsdc => "Add LP PHRS-USDC",
            Action::AddLpUsdt => "Add LP PHRS-USDT",
            Action::RandomTransfer => "Random Transfer",
            Action::SocialTask => "Social Task",
            Action::GeneratedFaucet => "Generated Faucet",
        }
    }

    /// Whether the action sends `max_transactions` transactions per wallet.
    pub fn is_repeated(&self) -> bool {
        matches!(
            self,
            Action::SwapUsdc
                | Action::SwapUsdt
                | Action::AddLpUsdc
                | Action::AddLpUsdt
                | Action::RandomTransfer
        )
    }
}

impl std::fmt::Display for Action {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.label())
    }
}

/// Errors raised while running an action.
#[derive(Debug, Error)]
pub enum ActionError {
    #[error(transparent)]
    Api(#[from] ApiError),

    #[error(transparent)]
    Blockchain(#[from] BlockchainError),

    #[error(transparent)]
    Wallet(#[from] WalletError),

    #[error("invalid {field}: {message}")]
    Config { field: &'static str, message: String },

    #[error("invalid amount: {0}")]
    Amount(String),

    #[error("insufficient {asset} balance: have {available}, need {needed}")]
    InsufficientBalance {
        asset: String,
        available: String,
        needed: String,
    },

    #[error("no auth token, run Login first")]
    MissingToken,

    #[error("interrupted")]
    Interrupted,
}

/// What a run of one action did.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ActionReport {
    /// Per-wallet outcomes; faucet claims for the generated flow.
    pub summary: RunSummary,
    /// Sweep outcomes of the generated flow, when the sweep ran.
    pub sweeps: Option<RunSummary>,
}

impl From<RunSummary> for ActionReport {
    fn from(summary: RunSummary) -> Self {
        Self {
            summary,
            sweeps: None,
        }
    }
}

impl std::fmt::Display for ActionReport {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.summary)?;
        if let Some(sweeps) = &self.sweeps {
            write!(f, "; sweep: {}", sweeps)?;
        }
        Ok(())
    }
}

/// Run `action` over the wallet list.
///
/// `generate_count` is only used by [`Action::GeneratedFaucet`]. Tokens
/// obtained by [`Action::Login`] are written back to the wallet file.
pub async fn run_action(
    action: Action,
    ctx: &ActionContext,
    store: &mut WalletStore,
    generate_count: usize,
) -> Result<ActionReport, ActionError> {
    let run_id = uuid::Uuid::new_v4();
    let span = tracing::info_span!("action", name = action.label(), run_id = %run_id);

    async {
        if action.is_repeated() {
            tracing::info!(
                wallets = store.len(),
                max_transactions = ctx.max_transactions,
                "Starting"
            );
        } else {
            tracing::info!(wallets = store.len(), "Starting");
        }

        let report: ActionReport = match action {
            Action::Login => {
                let summary = run_for_each(ctx, store, &Login).await;
                store.save()?;
                tracing::debug!(file = %store.path().display(), "Saved wallet tokens");
                summary.into()
            }
            Action::CheckIn => run_for_each(ctx, store, &CheckIn).await.into(),
            Action::CheckBalance => run_for_each(ctx, store, &CheckBalance).await.into(),
            Action::ClaimFaucet => run_for_each(ctx, store, &ClaimFaucet).await.into(),
            Action::ClaimUsdc => run_for_each(ctx, store, &ClaimUsdc).await.into(),
            Action::SwapUsdc => {
                run_for_each(ctx, store, &Swap { token: Stablecoin::Usdc }).await.into()
            }
            Action::SwapUsdt => {
                run_for_each(ctx, store, &Swap { token: Stablecoin::Usdt }).await.into()
            }
            Action::AddLpUsdc => {
                run_for_each(ctx, store, &AddLiquidity { token: Stablecoin::Usdc }).await.into()
            }
            Action::AddLpUsdt => {
                run_for_each(ctx, store, &AddLiquidity { token: Stablecoin::Usdt }).await.into()
            }
            Action::RandomTransfer => run_for_each(ctx, store, &RandomTransfer).await.into(),
            Action::SocialTask => run_for_each(ctx, store, &SocialTask).await.into(),
            Action::GeneratedFaucet => {
                let generated = generated::run_generated_faucet(ctx, generate_count).await?;
                ActionReport {
                    summary: generated.claims,
                    sweeps: generated.sweeps,
                }
            }
        };

        tracing::info!(summary = %report, "Finished");
        Ok::<_, ActionError>(report)
    }
    .instrument(span)
    .await
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::ValueEnum;

    #[test]
    fn test_cli_names() {
        let names: Vec<String> = Action::ALL
            .iter()
            .map(|a| a.to_possible_value().unwrap().get_name().to_string())
            .collect();
        assert_eq!(
            names,
            vec![
                "login",
                "check-in",
                "check-balance",
                "claim-faucet",
                "claim-usdc",
                "swap-usdc",
                "swap-usdt",
                "add-lp-usdc",
                "add-lp-usdt",
                "random-transfer",
                "social-task",
                "generated-faucet",
            ]
        );
        assert_eq!(Action::from_str("add-lp-usdt", false).unwrap(), Action::AddLpUsdt);
    }

    #[test]
    fn test_value_variants_match_menu_order() {
        assert_eq!(Action::value_variants(), &Action::ALL[..]);
    }

    #[test]
    fn test_repeated_actions() {
        let repeated: Vec<Action> = Action::ALL.into_iter().filter(Action::is_repeated).collect();
        assert_eq!(
            repeated,
            vec![
                Action::SwapUsdc,
                Action::SwapUsdt,
                Action::AddLpUsdc,
                Action::AddLpUsdt,
                Action::RandomTransfer,
            ]
        );
    }

    #[test]
    fn test_report_display_includes_sweeps() {
        let summary = RunSummary {
            succeeded: 2,
            failed: 1,
            ..RunSummary::default()
        };
        let report = ActionReport::from(summary.clone());
        assert_eq!(report.to_string(), "2 succeeded, 0 skipped, 1 failed");

        let report = ActionReport {
            summary,
            sweeps: Some(RunSummary {
                succeeded: 1,
                skipped: 1,
                ..RunSummary::default()
            }),
        };
        assert_eq!(
            report.to_string(),
            "2 succeeded, 0 skipped, 1 failed; sweep: 1 succeeded, 1 skipped, 0 failed"
        );
    }

    #[test]
    fn test_insufficient_balance_message() {
        let err = ActionError::InsufficientBalance {
            asset: "PHRS".to_string(),
            available: "0.0005".to_string(),
            needed: "0.001".to_string(),
        };
        assert_eq!(err.to_string(), "insufficient PHRS balance: have 0.0005, need 0.001");
    }
}
