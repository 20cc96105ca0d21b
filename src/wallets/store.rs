//! Wallet list persisted as `{"wallets": [{"name", "privatekey", "token"}]}`.

use std::fs;
use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};

use crate::wallets::WalletError;

/// One configured wallet.
#[derive(Clone, Default, Deserialize, Serialize, PartialEq, Eq)]
pub struct WalletRecord {
    #[serde(default)]
    pub name: String,

    /// Hex private key; records without one are skipped.
    #[serde(default, rename = "privatekey")]
    pub private_key: Option<String>,

    /// Session JWT from the last login.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub token: Option<String>,
}

impl WalletRecord {
    /// Display name, falling back to the 1-based position.
    pub fn label(&self, index: usize) -> String {
        if self.name.trim().is_empty() {
            format!("Wallet{}", index + 1)
        } else {
            self.name.clone()
        }
    }

    /// Private key when present and non-blank.
    pub fn private_key(&self) -> Option<&str> {
        self.private_key.as_deref().map(str::trim).filter(|k| !k.is_empty())
    }

    /// Auth token when present and non-blank.
    pub fn token(&self) -> Option<&str> {
        self.token.as_deref().map(str::trim).filter(|t| !t.is_empty())
    }
}

impl std::fmt::Debug for WalletRecord {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("WalletRecord")
            .field("name", &self.name)
            .field("has_private_key", &self.private_key().is_some())
            .field("has_token", &self.token().is_some())
            .finish()
    }
}

#[derive(Debug, Default, Deserialize, Serialize)]
struct WalletFile {
    #[serde(default)]
    wallets: Vec<WalletRecord>,
}

/// Wallet records plus the file they came from.
#[derive(Debug, Default)]
pub struct WalletStore {
    path: PathBuf,
    records: Vec<WalletRecord>,
}

impl WalletStore {
    /// Read and parse the wallet file.
    pub fn load(path: &Path) -> Result<Self, WalletError> {
        let content = fs::read_to_string(path).map_err(|source| WalletError::Io {
            path: path.to_path_buf(),
            source,
        })?;
        let file: WalletFile = serde_json::from_str(&content).map_err(|source| WalletError::Parse {
            path: path.to_path_buf(),
            source,
        })?;

        Ok(Self {
            path: path.to_path_buf(),
            records: file.wallets,
        })
    }

    /// Empty store that saves to `path`.
    pub fn empty(path: &Path) -> Self {
        Self {
            path: path.to_path_buf(),
            records: Vec::new(),
        }
    }

    /// Store over in-memory records.
    pub fn from_records(path: &Path, records: Vec<WalletRecord>) -> Self {
        Self {
            path: path.to_path_buf(),
            records,
        }
    }

    /// Write the records back, pretty-printed.
    pub fn save(&self) -> Result<(), WalletError> {
        let file = WalletFile {
            wallets: self.records.clone(),
        };
        let json = serde_json::to_string_pretty(&file).map_err(|source| WalletError::Parse {
            path: self.path.clone(),
            source,
        })?;
        fs::write(&self.path, json + "\n").map_err(|source| WalletError::Io {
            path: self.path.clone(),
            source,
        })
    }

    pub fn records(&self) -> &[WalletRecord] {
        &self.records
    }

    pub fn records_mut(&mut self) -> &mut [WalletRecord] {
        &mut self.records
    }

    pub fn len(&self) -> usize {
        self.records.len()
    }

    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }

    pub fn path(&self) -> &Path {
        &self.path
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const SAMPLE: &str = r#"{
        "wallets": [
            {"name": "main", "privatekey": "0xabc", "token": "jwt-1"},
            {"name": "", "privatekey": "  "},
            {"privatekey": "0xdef", "token": ""}
        ]
    }"#;

    #[test]
    fn test_load_records() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("wallet.json");
        fs::write(&path, SAMPLE).unwrap();

        let store = WalletStore::load(&path).unwrap();
        assert_eq!(store.len(), 3);

        let records = store.records();
        assert_eq!(records[0].label(0), "main");
        assert_eq!(records[0].private_key(), Some("0xabc"));
        assert_eq!(records[0].token(), Some("jwt-1"));

        assert_eq!(records[1].label(1), "Wallet2");
        assert_eq!(records[1].private_key(), None);

        assert_eq!(records[2].token(), None);
    }

    #[test]
    fn test_save_round_trips_tokens() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("wallet.json");
        fs::write(&path, SAMPLE).unwrap();

        let mut store = WalletStore::load(&path).unwrap();
        store.records_mut()[2].token = Some("jwt-3".to_string());
        store.save().unwrap();

        let reloaded = WalletStore::load(&path).unwrap();
        assert_eq!(reloaded.records()[2].token(), Some("jwt-3"));
        assert_eq!(reloaded.records()[0].token(), Some("jwt-1"));

        let raw = fs::read_to_string(&path).unwrap();
        assert!(raw.contains("\"privatekey\""));
    }

    #[test]
    fn test_missing_file() {
        let dir = tempfile::tempdir().unwrap();
        let err = WalletStore::load(&dir.path().join("none.json")).unwrap_err();
        assert!(matches!(err, WalletError::Io { .. }));
    }

    #[test]
    fn test_debug_hides_secrets() {
        let record = WalletRecord {
            name: "w".to_string(),
            private_key: Some("0xsecretkey".to_string()),
            token: Some("secret-jwt".to_string()),
        };
        let debug = format!("{:?}", record);
        assert!(!debug.contains("secretkey"));
        assert!(!debug.contains("secret-jwt"));
    }
}
