//! Resilience subsystem.
//!
//! # Data Flow
//! ```text
//! HTTP or RPC call from an action:
//!     → retries.rs (bounded attempts, error classified via Retryable)
//!     → backoff.rs (fixed delay or jittered exponential delay)
//!     → Shutdown (aborts the wait between attempts)
//! ```

pub mod backoff;
pub mod retries;

pub use retries::{retry, RetryPolicy, Retryable};
