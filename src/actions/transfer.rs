//! Small native transfers to freshly generated addresses.

use alloy::primitives::{Address, Bytes, TxHash};
use rand::RngCore;

use crate::actions::context::ActionContext;
use crate::actions::runner::{repeat_transactions, Outcome, WalletSession, WalletTask};
use crate::actions::swap::ensure_native_balance;
use crate::actions::ActionError;
use crate::blockchain::TxBuilder;

/// A random address nobody holds the key for.
pub fn random_recipient() -> Address {
    let mut bytes = [0u8; 20];
    rand::thread_rng().fill_bytes(&mut bytes);
    Address::from(bytes)
}

/// Send `amounts.transfer_native` to random addresses, `max_transactions` times.
pub struct RandomTransfer;

impl WalletTask for RandomTransfer {
    async fn run(
        &self,
        ctx: &ActionContext,
        session: &mut WalletSession<'_>,
    ) -> Result<Outcome, ActionError> {
        let tx = TxBuilder::new(ctx.chain.clone(), session.wallet.clone());
        let tx = &tx;

        repeat_transactions(ctx, "Random transfer", move |_| transfer_once(ctx, tx)).await
    }
}

async fn transfer_once(ctx: &ActionContext, tx: &TxBuilder) -> Result<TxHash, ActionError> {
    let amount = ctx.amounts.transfer_native;
    ensure_native_balance(ctx, tx.address(), amount).await?;

    let recipient = random_recipient();
    tracing::debug!(to = %recipient, "Sending transfer");
    let request = tx.build(recipient, amount, Bytes::new()).await?;

    Ok(tx.send_and_confirm(request).await?)
}
