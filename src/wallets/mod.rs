//! Wallet source subsystem.
//!
//! # Data Flow
//! ```text
//! wallet.json ─▶ store.rs (WalletRecord list) ─▶ runner ─▶ login writes tokens back
//! address.txt ─▶ generated.rs (append / read keys)
//! wallet.txt  ─▶ generated.rs (sweep destination)
//! ```

pub mod generated;
pub mod store;

use std::path::PathBuf;

use thiserror::Error;

pub use generated::{read_main_wallet, GeneratedKeys};
pub use store::{WalletRecord, WalletStore};

/// Errors reading or writing wallet files.
#[derive(Debug, Error)]
pub enum WalletError {
    #[error("{}: {source}", .path.display())]
    Io {
        path: PathBuf,
        source: std::io::Error,
    },

    #[error("{}: invalid wallet file: {source}", .path.display())]
    Parse {
        path: PathBuf,
        source: serde_json::Error,
    },

    #[error("{}: main wallet address is empty", .0.display())]
    EmptyMainWallet(PathBuf),

    #[error("invalid address '{0}'")]
    InvalidAddress(String),
}

/// Shorten an address for logs: `0x1234...abcd`.
pub fn mask_address(address: &str) -> String {
    let chars: Vec<char> = address.chars().collect();
    if chars.len() <= 10 {
        return address.to_string();
    }
    let head: String = chars[..6].iter().collect();
    let tail: String = chars[chars.len() - 4..].iter().collect();
    format!("{}...{}", head, tail)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_mask_address() {
        assert_eq!(
            mask_address("0xf39Fd6e51aad88F6F4ce6aB8827279cffFb92266"),
            "0xf39F...2266"
        );
        assert_eq!(mask_address("0x1234"), "0x1234");
    }
}
