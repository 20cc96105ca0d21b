//! Transaction building, signing, and confirmation monitoring.
//!
//! # Responsibilities
//! - Build native transfers with a capped, multiplied gas price
//! - Compute "send everything" sweeps net of gas cost
//! - Sign and broadcast through the wallet's signing provider
//! - Monitor confirmations

use alloy::network::TransactionBuilder;
use alloy::primitives::{Address, Bytes, TxHash, U256};
use alloy::providers::{DynProvider, Provider};
use alloy::rpc::types::TransactionRequest;
use std::time::Duration;
use tokio::time::{interval, timeout};

use crate::blockchain::client::BlockchainClient;
use crate::blockchain::types::{BlockchainError, BlockchainResult, ConfirmationStatus};
use crate::blockchain::wallet::Wallet;
use crate::resilience::Retryable;

/// Gas used by a plain native transfer.
pub const TRANSFER_GAS: u64 = 21_000;

/// Transaction builder for one wallet.
pub struct TxBuilder {
    client: BlockchainClient,
    wallet: Wallet,
    provider: DynProvider,
}

impl TxBuilder {
    /// Create a new transaction builder.
    pub fn new(client: BlockchainClient, wallet: Wallet) -> Self {
        let provider = client.signing_provider(&wallet);
        Self {
            client,
            wallet,
            provider,
        }
    }

    /// Signing provider, for contract bindings.
    pub fn provider(&self) -> &DynProvider {
        &self.provider
    }

    /// Current gas price with the configured multiplier, rejecting spikes.
    pub async fn gas_price(&self) -> BlockchainResult<u128> {
        let gas_price = self.client.get_gas_price().await?;
        let config = self.client.config();
        capped_gas_price(gas_price, config.gas_price_multiplier, config.max_gas_price_gwei)
    }

    /// Build a transaction request with explicit nonce and gas.
    ///
    /// # Arguments
    /// * `to` - Destination address
    /// * `value` - Amount of native token to send
    /// * `data` - Call data (empty for simple transfers)
    pub async fn build(
        &self,
        to: Address,
        value: U256,
        data: Bytes,
    ) -> BlockchainResult<TransactionRequest> {
        let nonce = self.client.get_transaction_count(self.wallet.address()).await?;
        let gas_price = self.gas_price().await?;

        // Base gas + data cost (16 gas per byte, simplified)
        let gas_limit = TRANSFER_GAS + (data.len() as u64 * 16);

        let tx = TransactionRequest::default()
            .with_from(self.wallet.address())
            .with_to(to)
            .with_value(value)
            .with_input(data)
            .with_nonce(nonce)
            .with_gas_price(gas_price)
            .with_chain_id(self.wallet.chain_id())
            .with_gas_limit(gas_limit);

        Ok(tx)
    }

    /// Build a transfer of the whole balance minus gas cost.
    ///
    /// Returns `None` when the balance cannot cover gas.
    pub async fn build_sweep(
        &self,
        to: Address,
        balance: U256,
    ) -> BlockchainResult<Option<TransactionRequest>> {
        let gas_price = self.gas_price().await?;
        let Some(amount) = sweep_amount(balance, gas_price) else {
            return Ok(None);
        };

        let nonce = self.client.get_transaction_count(self.wallet.address()).await?;
        let tx = TransactionRequest::default()
            .with_from(self.wallet.address())
            .with_to(to)
            .with_value(amount)
            .with_nonce(nonce)
            .with_gas_price(gas_price)
            .with_chain_id(self.wallet.chain_id())
            .with_gas_limit(TRANSFER_GAS);

        Ok(Some(tx))
    }

    /// Sign and broadcast a request, returning its hash.
    pub async fn send(&self, request: TransactionRequest) -> BlockchainResult<TxHash> {
        let request = request.with_from(self.wallet.address());
        let pending = self
            .provider
            .send_transaction(request)
            .await
            .map_err(|e| BlockchainError::Contract(e.to_string()))?;

        let tx_hash = *pending.tx_hash();
        tracing::debug!(tx_hash = %tx_hash, "Transaction broadcast");
        Ok(tx_hash)
    }

    /// Broadcast and wait until the transaction is confirmed.
    pub async fn send_and_confirm(&self, request: TransactionRequest) -> BlockchainResult<TxHash> {
        let tx_hash = self.send(request).await?;
        let timeout_secs = self.client.config().confirmation_timeout_secs;

        match self.wait_for_confirmation(tx_hash, timeout_secs).await? {
            ConfirmationStatus::Confirmed { block_number } => {
                tracing::debug!(tx_hash = %tx_hash, block_number, "Transaction confirmed");
                Ok(tx_hash)
            }
            ConfirmationStatus::Failed => Err(BlockchainError::Reverted(tx_hash)),
        }
    }

    /// Wait for a transaction to be confirmed.
    ///
    /// # Arguments
    /// * `tx_hash` - Transaction hash to monitor
    /// * `timeout_secs` - Maximum time to wait for confirmation
    pub async fn wait_for_confirmation(
        &self,
        tx_hash: TxHash,
        timeout_secs: u64,
    ) -> BlockchainResult<ConfirmationStatus> {
        let required_confirmations = self.client.confirmation_blocks();
        let timeout_duration = Duration::from_secs(timeout_secs);
        let poll_interval = Duration::from_secs(2);

        let result = timeout(timeout_duration, async {
            let mut ticker = interval(poll_interval);

            loop {
                ticker.tick().await;

                let receipt = match self.client.get_transaction_receipt(tx_hash).await {
                    Ok(Some(r)) => r,
                    Ok(None) => {
                        tracing::debug!(tx_hash = %tx_hash, "Transaction pending");
                        continue;
                    }
                    Err(e) if e.is_retryable() => {
                        tracing::warn!(tx_hash = %tx_hash, error = %e, "Receipt poll failed");
                        continue;
                    }
                    Err(e) => return Err(e),
                };

                if !receipt.status() {
                    return Ok(ConfirmationStatus::Failed);
                }

                let current_block = match self.client.get_block_number().await {
                    Ok(block) => block,
                    Err(e) if e.is_retryable() => {
                        tracing::warn!(tx_hash = %tx_hash, error = %e, "Block number poll failed");
                        continue;
                    }
                    Err(e) => return Err(e),
                };
                let tx_block = receipt.block_number.unwrap_or(current_block);
                let confirmations = current_block.saturating_sub(tx_block) as u32 + 1;

                if confirmations >= required_confirmations {
                    return Ok(ConfirmationStatus::Confirmed {
                        block_number: tx_block,
                    });
                }

                tracing::debug!(
                    tx_hash = %tx_hash,
                    confirmations = confirmations,
                    required = required_confirmations,
                    "Waiting for confirmations"
                );
            }
        })
        .await;

        match result {
            Ok(status) => status,
            Err(_) => Err(BlockchainError::ConfirmationTimeout(timeout_secs)),
        }
    }

    /// Get the wallet address.
    pub fn address(&self) -> Address {
        self.wallet.address()
    }
}

/// Apply `multiplier` to a node gas price, then reject it above `max_gwei`.
pub fn capped_gas_price(
    gas_price: u128,
    multiplier: f64,
    max_gwei: u64,
) -> BlockchainResult<u128> {
    let adjusted = (gas_price as f64 * multiplier) as u128;
    let adjusted_gwei = adjusted / 1_000_000_000;
    if adjusted_gwei > max_gwei as u128 {
        return Err(BlockchainError::GasPriceTooHigh {
            current_gwei: adjusted_gwei as u64,
            max_gwei,
        });
    }
    Ok(adjusted)
}

/// Balance left after paying for a plain transfer at `gas_price`.
pub fn sweep_amount(balance: U256, gas_price: u128) -> Option<U256> {
    let gas_cost = U256::from(gas_price) * U256::from(TRANSFER_GAS);
    if balance <= gas_cost {
        return None;
    }
    Some(balance - gas_cost)
}
