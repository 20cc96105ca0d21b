//! OS signal handling.
//!
//! # Responsibilities
//! - Listen for Ctrl-C using Tokio's async-safe signal handling
//! - First signal requests a graceful stop, second one exits immediately

use crate::lifecycle::shutdown::Shutdown;

/// Exit status used when the operator forces termination.
pub const FORCED_EXIT_CODE: i32 = 130;

/// Spawn a background task translating Ctrl-C into shutdown events.
pub fn spawn_ctrl_c_listener(shutdown: Shutdown) -> tokio::task::JoinHandle<()> {
    tokio::spawn(async move {
        if let Err(e) = tokio::signal::ctrl_c().await {
            tracing::error!(error = %e, "Failed to listen for Ctrl-C");
            return;
        }
        tracing::warn!("Interrupt received, finishing current wallet (press Ctrl-C again to force exit)");
        shutdown.trigger();

        if tokio::signal::ctrl_c().await.is_ok() {
            tracing::warn!("Second interrupt received, exiting");
            std::process::exit(FORCED_EXIT_CODE);
        }
    })
}
