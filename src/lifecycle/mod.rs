//! Lifecycle management subsystem.
//!
//! # Data Flow
//! ```text
//! Signals (signals.rs):
//!     first Ctrl-C → Shutdown::trigger
//!     second Ctrl-C → exit(130)
//!
//! Shutdown (shutdown.rs):
//!     trigger → runner stops before the next wallet
//!             → pending delays and retries return early
//!             → menu loop exits
//! ```

pub mod shutdown;
pub mod signals;

pub use shutdown::Shutdown;
pub use signals::spawn_ctrl_c_listener;
