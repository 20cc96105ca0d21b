//! HTTP API subsystem.
//!
//! # Data Flow
//! ```text
//! action (address, signature or JWT)
//!     → client.rs / zenith.rs (reqwest with browser headers + timeout)
//!     → types.rs (envelope → payload or ApiError)
//!     → resilience::retry (ApiError::is_retryable)
//! ```

pub mod client;
pub mod types;
pub mod zenith;

pub use client::PharosApi;
pub use types::{ApiError, FaucetStatus};
pub use zenith::ZenithFaucet;
