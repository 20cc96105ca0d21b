//! Generated wallets (one private key per line) and the sweep destination.

use std::fs::{self, OpenOptions};
use std::io::Write;
use std::path::{Path, PathBuf};

use alloy::primitives::Address;

use crate::wallets::WalletError;

/// Append-only file of generated private keys.
#[derive(Debug, Clone)]
pub struct GeneratedKeys {
    path: PathBuf,
}

impl GeneratedKeys {
    pub fn new(path: &Path) -> Self {
        Self {
            path: path.to_path_buf(),
        }
    }

    pub fn exists(&self) -> bool {
        self.path.exists()
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Append keys, one per line.
    pub fn append(&self, keys: &[String]) -> Result<(), WalletError> {
        let io_err = |source| WalletError::Io {
            path: self.path.clone(),
            source,
        };

        let mut file = OpenOptions::new()
            .create(true)
            .append(true)
            .open(&self.path)
            .map_err(io_err)?;

        for key in keys {
            writeln!(file, "{}", key).map_err(io_err)?;
        }
        Ok(())
    }

    /// All non-blank lines.
    pub fn read_all(&self) -> Result<Vec<String>, WalletError> {
        let content = fs::read_to_string(&self.path).map_err(|source| WalletError::Io {
            path: self.path.clone(),
            source,
        })?;

        Ok(content
            .lines()
            .map(str::trim)
            .filter(|l| !l.is_empty())
            .map(str::to_string)
            .collect())
    }
}

/// Address of the wallet receiving swept funds: first non-blank line of `path`.
pub fn read_main_wallet(path: &Path) -> Result<Address, WalletError> {
    let content = fs::read_to_string(path).map_err(|source| WalletError::Io {
        path: path.to_path_buf(),
        source,
    })?;

    let line = content
        .lines()
        .map(str::trim)
        .find(|l| !l.is_empty())
        .ok_or_else(|| WalletError::EmptyMainWallet(path.to_path_buf()))?;

    line.parse::<Address>()
        .map_err(|_| WalletError::InvalidAddress(line.to_string()))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_append_and_read() {
        let dir = tempfile::tempdir().unwrap();
        let keys = GeneratedKeys::new(&dir.path().join("address.txt"));
        assert!(!keys.exists());

        keys.append(&["0x01".to_string(), "0x02".to_string()]).unwrap();
        keys.append(&["0x03".to_string()]).unwrap();

        assert!(keys.exists());
        assert_eq!(keys.read_all().unwrap(), vec!["0x01", "0x02", "0x03"]);
    }

    #[test]
    fn test_read_skips_blank_lines() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("address.txt");
        fs::write(&path, "\n0xaa\n\n  0xbb  \n").unwrap();
        assert_eq!(GeneratedKeys::new(&path).read_all().unwrap(), vec!["0xaa", "0xbb"]);
    }

    #[test]
    fn test_read_main_wallet() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("wallet.txt");

        fs::write(&path, "\n  0xf39Fd6e51aad88F6F4ce6aB8827279cffFb92266 \n").unwrap();
        let address = read_main_wallet(&path).unwrap();
        assert_eq!(
            address.to_string().to_lowercase(),
            "0xf39fd6e51aad88f6f4ce6ab8827279cfffb92266"
        );

        fs::write(&path, "   \n").unwrap();
        assert!(matches!(read_main_wallet(&path), Err(WalletError::EmptyMainWallet(_))));

        fs::write(&path, "not-an-address").unwrap();
        assert!(matches!(read_main_wallet(&path), Err(WalletError::InvalidAddress(_))));
    }
}
