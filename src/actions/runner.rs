//! Sequential "for each wallet" execution.
//!
//! # Responsibilities
//! - Walk the wallet list in file order, one wallet at a time
//! - Skip records without a key (or without a token when the task needs one)
//! - Run the task inside a per-wallet span and tally the outcome
//! - Pause between wallets; stop early on shutdown

use std::future::Future;

use alloy::primitives::TxHash;
use tracing::Instrument;

use crate::actions::context::ActionContext;
use crate::actions::ActionError;
use crate::blockchain::Wallet;
use crate::wallets::{mask_address, WalletRecord, WalletStore};

/// Result of one task on one wallet.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Outcome {
    Done,
    Skipped(String),
}

/// Tally of a whole run.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct RunSummary {
    pub succeeded: usize,
    pub skipped: usize,
    pub failed: usize,
    /// Stopped before reaching the end of the list.
    pub interrupted: bool,
}

impl RunSummary {
    pub fn processed(&self) -> usize {
        self.succeeded + self.skipped + self.failed
    }
}

impl std::fmt::Display for RunSummary {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(
            f,
            "{} succeeded, {} skipped, {} failed",
            self.succeeded, self.skipped, self.failed
        )?;
        if self.interrupted {
            write!(f, " (interrupted)")?;
        }
        Ok(())
    }
}

/// The wallet a task is working on.
pub struct WalletSession<'a> {
    pub label: String,
    pub wallet: Wallet,
    pub record: &'a mut WalletRecord,
}

impl WalletSession<'_> {
    /// Auth token from the last login.
    pub fn token(&self) -> Result<String, ActionError> {
        self.record
            .token()
            .map(str::to_string)
            .ok_or(ActionError::MissingToken)
    }
}

/// Work performed once per wallet.
#[allow(async_fn_in_trait)]
pub trait WalletTask {
    /// Whether wallets without an auth token are skipped.
    fn requires_token(&self) -> bool {
        false
    }

    async fn run(
        &self,
        ctx: &ActionContext,
        session: &mut WalletSession<'_>,
    ) -> Result<Outcome, ActionError>;
}

/// Run `task` for every wallet in `store`.
pub async fn run_for_each<T: WalletTask>(
    ctx: &ActionContext,
    store: &mut WalletStore,
    task: &T,
) -> RunSummary {
    let mut summary = RunSummary::default();
    let total = store.len();

    for (index, record) in store.records_mut().iter_mut().enumerate() {
        if ctx.shutdown.is_triggered() {
            summary.interrupted = true;
            break;
        }

        let label = record.label(index);
        let Some(key) = record.private_key() else {
            tracing::warn!(wallet = %label, "Skipping wallet with missing private key");
            summary.skipped += 1;
            continue;
        };
        if task.requires_token() && record.token().is_none() {
            tracing::warn!(wallet = %label, "Skipping wallet without auth token, run Login first");
            summary.skipped += 1;
            continue;
        }

        let wallet = match Wallet::from_private_key(key, ctx.chain_id()) {
            Ok(wallet) => wallet,
            Err(e) => {
                tracing::error!(wallet = %label, error = %e, "Cannot load wallet");
                summary.failed += 1;
                continue;
            }
        };

        let span = tracing::info_span!(
            "wallet",
            name = %label,
            address = %mask_address(&wallet.address().to_string()),
            n = index + 1,
            of = total,
        );
        let mut session = WalletSession {
            label,
            wallet,
            record,
        };

        let result = task.run(ctx, &mut session).instrument(span.clone()).await;
        span.in_scope(|| match result {
            Ok(Outcome::Done) => summary.succeeded += 1,
            Ok(Outcome::Skipped(reason)) => {
                tracing::info!(reason = %reason, "Skipped");
                summary.skipped += 1;
            }
            Err(e) => {
                tracing::error!(error = %e, "Failed");
                summary.failed += 1;
            }
        });

        if index + 1 < total && !ctx.shutdown.sleep(ctx.between_wallets()).await {
            summary.interrupted = true;
            break;
        }
    }

    summary
}

/// Send up to `ctx.max_transactions` transactions for the current wallet.
///
/// Each call to `send` performs one transaction and returns its hash. A failed
/// transaction is logged and the next one is attempted; running out of
/// balance ends the loop.
pub async fn repeat_transactions<F, Fut>(
    ctx: &ActionContext,
    what: &str,
    mut send: F,
) -> Result<Outcome, ActionError>
where
    F: FnMut(u32) -> Fut,
    Fut: Future<Output = Result<TxHash, ActionError>>,
{
    let total = ctx.max_transactions;
    let mut confirmed = 0u32;
    let mut last_error = None;

    for n in 1..=total {
        if ctx.shutdown.is_triggered() {
            break;
        }

        match send(n).await {
            Ok(tx_hash) => {
                confirmed += 1;
                tracing::info!(
                    n,
                    total,
                    tx = %ctx.chain.explorer_tx_url(&tx_hash.to_string()),
                    "{} confirmed",
                    what
                );
            }
            Err(e @ ActionError::InsufficientBalance { .. }) => {
                tracing::warn!(n, total, error = %e, "{} stopped", what);
                last_error = Some(e);
                break;
            }
            Err(e) => {
                tracing::error!(n, total, error = %e, "{} failed", what);
                last_error = Some(e);
            }
        }

        if n < total && !ctx.shutdown.sleep(ctx.between_transactions()).await {
            break;
        }
    }

    if confirmed > 0 {
        return Ok(Outcome::Done);
    }
    match last_error {
        Some(e @ ActionError::InsufficientBalance { .. }) => Ok(Outcome::Skipped(e.to_string())),
        Some(e) => Err(e),
        None => Ok(Outcome::Skipped("interrupted".to_string())),
    }
}
