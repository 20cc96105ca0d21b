//! Full-range liquidity positions pairing the native coin with a stablecoin.
//!
//! # Data Flow
//! ```text
//! decimals ──► amount in token units ──► balance checks
//!                                              │
//!                       allowance < amount ──► approve(position manager, MAX)
//!                                              │
//!            multicall([mint(token0, token1, full range), refundETH()]) + value
//! ```

use alloy::network::TransactionBuilder;
use alloy::primitives::aliases::U24;
use alloy::primitives::utils::{format_units, parse_units};
use alloy::primitives::{Address, TxHash, U256};
use alloy::rpc::types::TransactionRequest;
use alloy::sol_types::SolCall;

use crate::actions::context::ActionContext;
use crate::actions::runner::{repeat_transactions, Outcome, WalletSession, WalletTask};
use crate::actions::swap::{deadline, ensure_native_balance, Stablecoin};
use crate::actions::ActionError;
use crate::blockchain::contracts::{full_range_ticks, IERC20, IPositionManager};
use crate::blockchain::TxBuilder;

/// One side of a position.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Leg {
    pub token: Address,
    pub amount: U256,
}

/// Calldata for `multicall([mint(...), refundETH()])`.
///
/// The legs are ordered by address, as pools require `token0 < token1`.
pub fn mint_calldata(a: Leg, b: Leg, fee: u32, recipient: Address, deadline: U256) -> Vec<u8> {
    let (token0, token1) = if a.token < b.token { (a, b) } else { (b, a) };
    let (tick_lower, tick_upper) = full_range_ticks(fee);

    let params = IPositionManager::MintParams {
        token0: token0.token,
        token1: token1.token,
        fee: U24::from(fee),
        tickLower: tick_lower,
        tickUpper: tick_upper,
        amount0Desired: token0.amount,
        amount1Desired: token1.amount,
        amount0Min: U256::ZERO,
        amount1Min: U256::ZERO,
        recipient,
        deadline,
    };

    let mint = IPositionManager::mintCall { params }.abi_encode();
    let refund = IPositionManager::refundETHCall {}.abi_encode();

    IPositionManager::multicallCall {
        data: vec![mint.into(), refund.into()],
    }
    .abi_encode()
}

/// Add a native/stablecoin position, `max_transactions` times.
pub struct AddLiquidity {
    pub token: Stablecoin,
}

impl WalletTask for AddLiquidity {
    async fn run(
        &self,
        ctx: &ActionContext,
        session: &mut WalletSession<'_>,
    ) -> Result<Outcome, ActionError> {
        let tx = TxBuilder::new(ctx.chain.clone(), session.wallet.clone());
        let tx = &tx;
        let token = self.token;
        let what = format!("Add liquidity PHRS/{}", token.symbol());

        repeat_transactions(ctx, &what, move |_| add_once(ctx, tx, token)).await
    }
}

async fn add_once(
    ctx: &ActionContext,
    tx: &TxBuilder,
    token: Stablecoin,
) -> Result<TxHash, ActionError> {
    let owner = tx.address();
    let token_address = token.address(ctx);
    let native_amount = ctx.amounts.lp_native;

    let decimals = ctx.chain.token_decimals(token_address).await?;
    let token_amount = parse_units(&ctx.amounts.lp_token, decimals)
        .map_err(|e| ActionError::Amount(e.to_string()))?
        .get_absolute();

    let balance = ctx.chain.token_balance(token_address, owner).await?;
    if balance < token_amount {
        return Err(ActionError::InsufficientBalance {
            asset: token.symbol().to_string(),
            available: format_units(balance, decimals).unwrap_or_else(|_| balance.to_string()),
            needed: ctx.amounts.lp_token.clone(),
        });
    }
    ensure_native_balance(ctx, owner, native_amount).await?;

    let spender = ctx.contracts.position_manager;
    let allowance = ctx.chain.token_allowance(token_address, owner, spender).await?;
    if allowance < token_amount {
        tracing::info!(token = token.symbol(), "Approving position manager");
        let approve = IERC20::new(token_address, tx.provider().clone())
            .approve(spender, U256::MAX)
            .into_transaction_request()
            .with_gas_price(tx.gas_price().await?);
        let approve_hash = tx.send_and_confirm(approve).await?;
        tracing::info!(tx = %ctx.chain.explorer_tx_url(&approve_hash.to_string()), "Approved");
    }

    let calldata = mint_calldata(
        Leg {
            token: ctx.contracts.wrapped_native,
            amount: native_amount,
        },
        Leg {
            token: token_address,
            amount: token_amount,
        },
        ctx.contracts.pool_fee,
        owner,
        deadline(),
    );

    let request = TransactionRequest::default()
        .with_to(spender)
        .with_value(native_amount)
        .with_input(calldata)
        .with_gas_price(tx.gas_price().await?);

    Ok(tx.send_and_confirm(request).await?)
}
