//! Login, daily check-in and balance report.

use alloy::primitives::utils::{format_ether, format_units};
use alloy::primitives::Address;

use crate::actions::context::ActionContext;
use crate::actions::runner::{Outcome, WalletSession, WalletTask};
use crate::actions::ActionError;
use crate::resilience::retry;

/// Sign the login message and store the returned JWT on the record.
pub struct Login;

impl WalletTask for Login {
    async fn run(
        &self,
        ctx: &ActionContext,
        session: &mut WalletSession<'_>,
    ) -> Result<Outcome, ActionError> {
        let address = session.wallet.address();
        let signature = session
            .wallet
            .sign_message_hex(&ctx.config.api.login_message)
            .await?;

        let api = &ctx.api;
        let signature = signature.as_str();
        let token = retry(&ctx.retry_policy(), "login", &ctx.shutdown, move || {
            api.login(address, signature)
        })
        .await?;

        session.record.token = Some(token);
        tracing::info!("Login successful");
        Ok(Outcome::Done)
    }
}

/// Daily check-in.
pub struct CheckIn;

impl WalletTask for CheckIn {
    fn requires_token(&self) -> bool {
        true
    }

    async fn run(
        &self,
        ctx: &ActionContext,
        session: &mut WalletSession<'_>,
    ) -> Result<Outcome, ActionError> {
        let address = session.wallet.address();
        let token = session.token()?;

        let api = &ctx.api;
        let token = token.as_str();
        retry(&ctx.retry_policy(), "check-in", &ctx.shutdown, move || {
            api.check_in(address, token)
        })
        .await?;

        tracing::info!("Check-in successful");
        Ok(Outcome::Done)
    }
}

/// Native and stablecoin balances, plus points when logged in.
pub struct CheckBalance;

impl WalletTask for CheckBalance {
    async fn run(
        &self,
        ctx: &ActionContext,
        session: &mut WalletSession<'_>,
    ) -> Result<Outcome, ActionError> {
        let address = session.wallet.address();
        let policy = ctx.retry_policy();
        let chain = &ctx.chain;

        let native = retry(&policy, "native balance", &ctx.shutdown, move || {
            chain.get_balance(address)
        })
        .await?;

        let usdc = token_balance(ctx, ctx.contracts.usdc, address).await?;
        let usdt = token_balance(ctx, ctx.contracts.usdt, address).await?;

        tracing::info!(
            phrs = %format_ether(native),
            usdc = %usdc,
            usdt = %usdt,
            "Balances"
        );

        if let Some(token) = session.record.token() {
            match ctx.api.profile(address, token).await {
                Ok(points) => tracing::info!(points, "Profile"),
                Err(e) => tracing::warn!(error = %e, "Could not fetch profile"),
            }
        }

        Ok(Outcome::Done)
    }
}

async fn token_balance(
    ctx: &ActionContext,
    token: Address,
    owner: Address,
) -> Result<String, ActionError> {
    let policy = ctx.retry_policy();
    let chain = &ctx.chain;

    let raw = retry(&policy, "token balance", &ctx.shutdown, move || {
        chain.token_balance(token, owner)
    })
    .await?;
    let decimals = retry(&policy, "token decimals", &ctx.shutdown, move || {
        chain.token_decimals(token)
    })
    .await?;

    format_units(raw, decimals).map_err(|e| ActionError::Amount(e.to_string()))
}
