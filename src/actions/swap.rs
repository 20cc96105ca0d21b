//! Native coin → stablecoin swaps through the router's multicall.

use std::time::{SystemTime, UNIX_EPOCH};

use alloy::network::TransactionBuilder;
use alloy::primitives::aliases::{U160, U24};
use alloy::primitives::utils::format_ether;
use alloy::primitives::{Address, TxHash, U256};
use alloy::rpc::types::TransactionRequest;
use alloy::sol_types::SolCall;

use crate::actions::context::ActionContext;
use crate::actions::runner::{repeat_transactions, Outcome, WalletSession, WalletTask};
use crate::actions::ActionError;
use crate::blockchain::contracts::ISwapRouter;
use crate::blockchain::TxBuilder;

/// Seconds a submitted swap or mint stays valid.
pub const DEADLINE_SECS: u64 = 600;

/// Stablecoins the toolkit trades against.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Stablecoin {
    Usdc,
    Usdt,
}

impl Stablecoin {
    pub fn symbol(&self) -> &'static str {
        match self {
            Stablecoin::Usdc => "USDC",
            Stablecoin::Usdt => "USDT",
        }
    }

    pub fn address(&self, ctx: &ActionContext) -> Address {
        match self {
            Stablecoin::Usdc => ctx.contracts.usdc,
            Stablecoin::Usdt => ctx.contracts.usdt,
        }
    }
}

/// Unix timestamp `DEADLINE_SECS` from now.
pub fn deadline() -> U256 {
    let now = SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .map(|d| d.as_secs())
        .unwrap_or_default();
    U256::from(now + DEADLINE_SECS)
}

/// Calldata for `multicall(deadline, [exactInputSingle(...)])`.
pub fn swap_calldata(
    wrapped_native: Address,
    token_out: Address,
    fee: u32,
    recipient: Address,
    amount_in: U256,
    deadline: U256,
) -> Vec<u8> {
    let params = ISwapRouter::ExactInputSingleParams {
        tokenIn: wrapped_native,
        tokenOut: token_out,
        fee: U24::from(fee),
        recipient,
        amountIn: amount_in,
        amountOutMinimum: U256::ZERO,
        sqrtPriceLimitX96: U160::ZERO,
    };
    let inner = ISwapRouter::exactInputSingleCall { params }.abi_encode();

    ISwapRouter::multicallCall {
        deadline,
        data: vec![inner.into()],
    }
    .abi_encode()
}

/// Check the native balance covers `needed`.
pub async fn ensure_native_balance(
    ctx: &ActionContext,
    owner: Address,
    needed: U256,
) -> Result<(), ActionError> {
    let balance = ctx.chain.get_balance(owner).await?;
    if balance < needed {
        return Err(ActionError::InsufficientBalance {
            asset: "PHRS".to_string(),
            available: format_ether(balance),
            needed: format_ether(needed),
        });
    }
    Ok(())
}

/// Swap `amounts.swap_native` into a stablecoin, `max_transactions` times.
pub struct Swap {
    pub token: Stablecoin,
}

impl WalletTask for Swap {
    async fn run(
        &self,
        ctx: &ActionContext,
        session: &mut WalletSession<'_>,
    ) -> Result<Outcome, ActionError> {
        let tx = TxBuilder::new(ctx.chain.clone(), session.wallet.clone());
        let tx = &tx;
        let token_out = self.token.address(ctx);
        let what = format!("Swap PHRS -> {}", self.token.symbol());

        repeat_transactions(ctx, &what, move |_| swap_once(ctx, tx, token_out)).await
    }
}

async fn swap_once(
    ctx: &ActionContext,
    tx: &TxBuilder,
    token_out: Address,
) -> Result<TxHash, ActionError> {
    let amount = ctx.amounts.swap_native;
    let owner = tx.address();
    ensure_native_balance(ctx, owner, amount).await?;

    let calldata = swap_calldata(
        ctx.contracts.wrapped_native,
        token_out,
        ctx.contracts.pool_fee,
        owner,
        amount,
        deadline(),
    );

    let request = TransactionRequest::default()
        .with_to(ctx.contracts.swap_router)
        .with_value(amount)
        .with_input(calldata)
        .with_gas_price(tx.gas_price().await?);

    Ok(tx.send_and_confirm(request).await?)
}
