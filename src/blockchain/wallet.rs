//! Wallet keys and message signing.
//!
//! # Security
//! - Keys are never logged; `Debug` shows the address only
//! - `private_key_hex` exists solely to persist freshly generated wallets

use alloy::network::EthereumWallet;
use alloy::primitives::{Address, B256};
use alloy::signers::local::PrivateKeySigner;
use alloy::signers::Signer;
use rand::RngCore;

use crate::blockchain::types::{BlockchainError, BlockchainResult};

/// A signing key bound to a chain.
#[derive(Clone)]
pub struct Wallet {
    /// The underlying signer (private key).
    signer: PrivateKeySigner,
    /// Chain ID for EIP-155 replay protection.
    chain_id: u64,
}

impl Wallet {
    /// Create a wallet from a hex-encoded private key string.
    ///
    /// # Arguments
    /// * `private_key_hex` - Hex string (with or without 0x prefix)
    /// * `chain_id` - Chain ID for transaction signing
    pub fn from_private_key(private_key_hex: &str, chain_id: u64) -> BlockchainResult<Self> {
        let trimmed = private_key_hex.trim();
        let key_hex = trimmed.strip_prefix("0x").unwrap_or(trimmed);

        let signer: PrivateKeySigner = key_hex
            .parse()
            .map_err(|e| BlockchainError::Wallet(format!("Invalid private key format: {}", e)))?;

        Ok(Self {
            signer: signer.with_chain_id(Some(chain_id)),
            chain_id,
        })
    }

    /// Generate a fresh random wallet.
    pub fn random(chain_id: u64) -> BlockchainResult<Self> {
        let mut bytes = [0u8; 32];
        rand::thread_rng().fill_bytes(&mut bytes);

        let signer = PrivateKeySigner::from_bytes(&B256::from(bytes))
            .map_err(|e| BlockchainError::Wallet(format!("Key generation failed: {}", e)))?;

        Ok(Self {
            signer: signer.with_chain_id(Some(chain_id)),
            chain_id,
        })
    }

    /// Get the wallet's address.
    pub fn address(&self) -> Address {
        self.signer.address()
    }

    /// Get the chain ID this wallet is configured for.
    pub fn chain_id(&self) -> u64 {
        self.chain_id
    }

    /// 0x-prefixed private key, for writing generated wallets to disk.
    pub fn private_key_hex(&self) -> String {
        self.signer.to_bytes().to_string()
    }

    /// Network wallet used by signing providers.
    pub fn ethereum_wallet(&self) -> EthereumWallet {
        EthereumWallet::from(self.signer.clone())
    }

    /// Sign arbitrary message bytes (with Ethereum prefix).
    pub async fn sign_message(
        &self,
        message: &[u8],
    ) -> BlockchainResult<alloy::signers::Signature> {
        self.signer
            .sign_message(message)
            .await
            .map_err(|e| BlockchainError::Wallet(format!("Message signing failed: {}", e)))
    }

    /// Sign a message and return the 65-byte signature as 0x-prefixed hex.
    pub async fn sign_message_hex(&self, message: &str) -> BlockchainResult<String> {
        let signature = self.sign_message(message.as_bytes()).await?;
        Ok(alloy::hex::encode_prefixed(signature.as_bytes()))
    }
}

impl std::fmt::Debug for Wallet {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Wallet")
            .field("address", &self.address())
            .field("chain_id", &self.chain_id)
            .finish()
    }
}
