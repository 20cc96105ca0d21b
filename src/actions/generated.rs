//! Throwaway-wallet faucet farming.
//!
//! # Data Flow
//! ```text
//! generate N keys ──► append to generated_keys file
//!                              │
//!        for each key: login ──► faucet status ──► claim
//!                              │
//!        for each key: balance − 21000·gasPrice ──► main wallet
//! ```
//!
//! Unlike the per-wallet actions this flow reads its wallets from the
//! generated keys file instead of the wallet list.

use std::path::Path;
use std::time::Duration;

use alloy::primitives::utils::format_ether;
use alloy::primitives::Address;
use tracing::Instrument;

use crate::actions::context::ActionContext;
use crate::actions::faucet::unavailable_reason;
use crate::actions::runner::{Outcome, RunSummary};
use crate::actions::ActionError;
use crate::blockchain::{TxBuilder, Wallet};
use crate::resilience::{retry, RetryPolicy};
use crate::wallets::{mask_address, read_main_wallet, GeneratedKeys};

const LOGIN_ATTEMPTS: u32 = 5;
const LOGIN_DELAY: Duration = Duration::from_secs(5);
const STATUS_ATTEMPTS: u32 = 5;
const STATUS_DELAY: Duration = Duration::from_secs(2);

/// What a generated-faucet run did.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct GeneratedReport {
    /// Wallets created in this run.
    pub generated: usize,
    pub claims: RunSummary,
    /// `None` when the main wallet could not be read.
    pub sweeps: Option<RunSummary>,
}

/// Create `count` random wallets and append their keys to the generated keys file.
pub fn generate_wallets(
    ctx: &ActionContext,
    keys: &GeneratedKeys,
    count: usize,
) -> Result<Vec<Address>, ActionError> {
    let mut secrets = Vec::with_capacity(count);
    let mut addresses = Vec::with_capacity(count);

    for _ in 0..count {
        let wallet = Wallet::random(ctx.chain_id())?;
        tracing::info!(address = %wallet.address(), "Generated wallet");
        addresses.push(wallet.address());
        secrets.push(wallet.private_key_hex());
    }

    keys.append(&secrets)?;
    Ok(addresses)
}

/// Generate `count` wallets, claim the faucet with every generated wallet,
/// then sweep their balances to the main wallet.
pub async fn run_generated_faucet(
    ctx: &ActionContext,
    count: usize,
) -> Result<GeneratedReport, ActionError> {
    let files = &ctx.config.files;
    let keys = GeneratedKeys::new(Path::new(&files.generated_keys));
    let mut report = GeneratedReport::default();

    if count > 0 {
        report.generated = generate_wallets(ctx, &keys, count)?.len();
        tracing::info!(
            count = report.generated,
            file = %keys.path().display(),
            "Saved generated wallets"
        );
        let pause = Duration::from_millis(ctx.config.delays.after_generation_ms);
        if !ctx.shutdown.sleep(pause).await {
            report.claims.interrupted = true;
            return Ok(report);
        }
    }

    if !keys.exists() {
        tracing::warn!(file = %keys.path().display(), "No generated wallets found");
        return Ok(report);
    }

    let wallets = load_wallets(ctx, &keys, &mut report.claims)?;

    let claims = std::mem::take(&mut report.claims);
    report.claims = for_each_generated(ctx, &wallets, claims, |wallet| {
        claim_with(ctx, wallet)
    })
    .await;
    tracing::info!(summary = %report.claims, "Faucet claims finished");

    if ctx.shutdown.is_triggered() {
        return Ok(report);
    }

    let main = match read_main_wallet(Path::new(&files.main_wallet)) {
        Ok(address) => address,
        Err(e) => {
            tracing::warn!(error = %e, "Skipping sweep, main wallet unavailable");
            return Ok(report);
        }
    };

    let sweeps = for_each_generated(ctx, &wallets, RunSummary::default(), |wallet| {
        sweep_to(ctx, wallet, main)
    })
    .await;
    tracing::info!(to = %mask_address(&main.to_string()), summary = %sweeps, "Sweep finished");
    report.sweeps = Some(sweeps);

    Ok(report)
}

fn load_wallets(
    ctx: &ActionContext,
    keys: &GeneratedKeys,
    summary: &mut RunSummary,
) -> Result<Vec<Wallet>, ActionError> {
    let mut wallets = Vec::new();
    for (index, key) in keys.read_all()?.iter().enumerate() {
        match Wallet::from_private_key(key, ctx.chain_id()) {
            Ok(wallet) => wallets.push(wallet),
            Err(e) => {
                tracing::error!(line = index + 1, error = %e, "Invalid generated key");
                summary.failed += 1;
            }
        }
    }
    Ok(wallets)
}

async fn for_each_generated<'a, F, Fut>(
    ctx: &ActionContext,
    wallets: &'a [Wallet],
    mut summary: RunSummary,
    mut task: F,
) -> RunSummary
where
    F: FnMut(&'a Wallet) -> Fut,
    Fut: std::future::Future<Output = Result<Outcome, ActionError>>,
{
    for (index, wallet) in wallets.iter().enumerate() {
        if ctx.shutdown.is_triggered() {
            summary.interrupted = true;
            break;
        }

        let span = tracing::info_span!(
            "generated",
            address = %mask_address(&wallet.address().to_string()),
            n = index + 1,
            of = wallets.len(),
        );
        let result = task(wallet).instrument(span.clone()).await;
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

        if index + 1 < wallets.len() && !ctx.shutdown.sleep(ctx.between_wallets()).await {
            summary.interrupted = true;
            break;
        }
    }

    summary
}

async fn claim_with(ctx: &ActionContext, wallet: &Wallet) -> Result<Outcome, ActionError> {
    let address = wallet.address();
    let signature = wallet.sign_message_hex(&ctx.config.api.login_message).await?;

    let api = &ctx.api;
    let signature = signature.as_str();
    let login_policy = RetryPolicy::fixed(LOGIN_ATTEMPTS, LOGIN_DELAY);
    let token = retry(&login_policy, "login", &ctx.shutdown, move || {
        api.login(address, signature)
    })
    .await?;

    let jwt = token.as_str();
    let status_policy = RetryPolicy::fixed(STATUS_ATTEMPTS, STATUS_DELAY);
    let status = retry(&status_policy, "faucet status", &ctx.shutdown, move || {
        api.faucet_status(address, jwt)
    })
    .await?;

    if !status.is_able_to_faucet {
        return Ok(Outcome::Skipped(unavailable_reason(&status, &ctx.config.api.timezone)));
    }

    api.claim_faucet(address, jwt).await?;
    tracing::info!("Faucet claimed");
    Ok(Outcome::Done)
}

async fn sweep_to(
    ctx: &ActionContext,
    wallet: &Wallet,
    to: Address,
) -> Result<Outcome, ActionError> {
    let balance = ctx.chain.get_balance(wallet.address()).await?;
    let tx = TxBuilder::new(ctx.chain.clone(), wallet.clone());

    let Some(request) = tx.build_sweep(to, balance).await? else {
        return Ok(Outcome::Skipped(format!(
            "balance {} PHRS does not cover gas",
            format_ether(balance)
        )));
    };

    let tx_hash = tx.send_and_confirm(request).await?;
    tracing::info!(tx = %ctx.chain.explorer_tx_url(&tx_hash.to_string()), "Swept");
    Ok(Outcome::Done)
}
