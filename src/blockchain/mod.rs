//! Blockchain integration subsystem.
//!
//! # Data Flow
//! ```text
//! wallet.json / address.txt (private keys)
//!     → wallet.rs (key parsing, message signing)
//!     → client.rs (RPC reads with timeouts and failover)
//!     → contracts.rs (ABI bindings, calldata encoding)
//!     → transaction.rs (build, sign, broadcast, confirm)
//! ```
//!
//! # Security Constraints
//! - Never log private keys or sensitive data
//! - All RPC calls have configurable timeouts
//! - Graceful degradation when the chain is unreachable

pub mod client;
pub mod contracts;
pub mod transaction;
pub mod types;
pub mod wallet;

pub use client::BlockchainClient;
pub use transaction::TxBuilder;
pub use types::{BlockchainError, BlockchainResult, ChainId};
pub use wallet::Wallet;
