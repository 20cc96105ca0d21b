//! Observability subsystem.
//!
//! # Data Flow
//! ```text
//! actions (span per run: action label + run id)
//!     → runner (span per wallet: name + masked address)
//!     → logging.rs (fmt subscriber, env filter)
//!     → stdout
//! ```
//!
//! Private keys and auth tokens never appear in log fields.

pub mod logging;

pub use logging::init_logging;
