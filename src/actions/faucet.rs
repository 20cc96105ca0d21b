//! Daily native faucet and the swap faucet's USDC drip.

use crate::actions::context::ActionContext;
use crate::actions::runner::{Outcome, WalletSession, WalletTask};
use crate::actions::ActionError;
use crate::api::FaucetStatus;
use crate::resilience::retry;

/// Claim the daily native faucet when the window is open.
pub struct ClaimFaucet;

impl WalletTask for ClaimFaucet {
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
        let jwt = token.as_str();
        let status = retry(&ctx.retry_policy(), "faucet status", &ctx.shutdown, move || {
            api.faucet_status(address, jwt)
        })
        .await?;

        if !status.is_able_to_faucet {
            return Ok(Outcome::Skipped(unavailable_reason(&status, &ctx.config.api.timezone)));
        }

        ctx.api.claim_faucet(address, jwt).await?;
        tracing::info!("Faucet claimed");
        Ok(Outcome::Done)
    }
}

/// Log line for a closed faucet window.
pub fn unavailable_reason(status: &FaucetStatus, timezone: &str) -> String {
    match status.next_available(timezone) {
        Some(at) => format!("faucet not available, next claim at {}", at),
        None => "faucet not available".to_string(),
    }
}

/// Request USDC from the swap faucet.
pub struct ClaimUsdc;

impl WalletTask for ClaimUsdc {
    async fn run(
        &self,
        ctx: &ActionContext,
        session: &mut WalletSession<'_>,
    ) -> Result<Outcome, ActionError> {
        let address = session.wallet.address();
        let tx_hash = ctx.zenith.claim(ctx.contracts.usdc, address).await?;

        tracing::info!(tx = %ctx.chain.explorer_tx_url(&tx_hash), "USDC claimed");
        Ok(Outcome::Done)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_unavailable_reason() {
        let status = FaucetStatus {
            is_able_to_faucet: false,
            avaliable_timestamp: Some(1_700_000_000),
        };
        let reason = unavailable_reason(&status, "UTC");
        assert_eq!(reason, "faucet not available, next claim at 2023-11-14 22:13:20 UTC");

        let status = FaucetStatus {
            is_able_to_faucet: false,
            avaliable_timestamp: None,
        };
        assert_eq!(unavailable_reason(&status, "UTC"), "faucet not available");
    }
}
