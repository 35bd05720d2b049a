//! Persistent registry of analyzed wallets
//!
//! Every wallet that has ever been analyzed is remembered in `wallets.json`
//! under the data directory; the leaderboard is built over this list. The
//! file previously stored a bare array of address strings, which is still
//! accepted on load.

use crate::error::CoreError;
use crate::models::validate_address;
use chrono::{DateTime, Utc};
use parking_lot::RwLock;
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

/// One remembered wallet
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct WalletRecord {
    pub address: String,
    pub first_seen: DateTime<Utc>,
}

/// Stored form: either the current record shape or a legacy bare address
#[derive(Deserialize)]
#[serde(untagged)]
enum StoredRecord {
    Full(WalletRecord),
    Bare(String),
}

/// Registry of previously analyzed wallets, persisted as JSON
pub struct WalletRegistry {
    path: PathBuf,
    records: RwLock<Vec<WalletRecord>>,
}

impl WalletRegistry {
    /// Load the registry from `<data_dir>/wallets.json`, empty if absent.
    pub fn load(data_dir: &Path) -> Result<Self, CoreError> {
        let path = data_dir.join("wallets.json");

        let records = if path.exists() {
            let content =
                std::fs::read_to_string(&path).map_err(|source| CoreError::FileRead {
                    path: path.clone(),
                    source,
                })?;

            let stored: Vec<StoredRecord> =
                serde_json::from_str(&content).map_err(|e| CoreError::Decode {
                    what: "wallet registry".to_string(),
                    message: e.to_string(),
                })?;

            let now = Utc::now();
            stored
                .into_iter()
                .map(|r| match r {
                    StoredRecord::Full(record) => record,
                    StoredRecord::Bare(address) => WalletRecord {
                        address,
                        first_seen: now,
                    },
                })
                .collect()
        } else {
            Vec::new()
        };

        tracing::debug!(count = records.len(), path = %path.display(), "Loaded wallet registry");

        Ok(Self {
            path,
            records: RwLock::new(records),
        })
    }

    /// Record a wallet if it is not already known. Returns true when added.
    pub fn record(&self, address: &str) -> Result<bool, CoreError> {
        validate_address(address)?;

        {
            let mut records = self.records.write();
            if records.iter().any(|r| r.address == address) {
                return Ok(false);
            }
            records.push(WalletRecord {
                address: address.to_string(),
                first_seen: Utc::now(),
            });
        }

        self.save()?;
        Ok(true)
    }

    /// Remove a wallet. Returns true when it was present.
    pub fn remove(&self, address: &str) -> Result<bool, CoreError> {
        let removed = {
            let mut records = self.records.write();
            let before = records.len();
            records.retain(|r| r.address != address);
            records.len() < before
        };

        if removed {
            self.save()?;
        }
        Ok(removed)
    }

    pub fn contains(&self, address: &str) -> bool {
        self.records.read().iter().any(|r| r.address == address)
    }

    /// All records, oldest first (insertion order).
    pub fn list(&self) -> Vec<WalletRecord> {
        self.records.read().clone()
    }

    /// Just the addresses, insertion order.
    pub fn addresses(&self) -> Vec<String> {
        self.records.read().iter().map(|r| r.address.clone()).collect()
    }

    pub fn len(&self) -> usize {
        self.records.read().len()
    }

    pub fn is_empty(&self) -> bool {
        self.records.read().is_empty()
    }

    fn save(&self) -> Result<(), CoreError> {
        if let Some(parent) = self.path.parent() {
            std::fs::create_dir_all(parent).map_err(|source| CoreError::FileWrite {
                path: parent.to_path_buf(),
                source,
            })?;
        }

        let records = self.records.read();
        let json = serde_json::to_string_pretty(&*records).map_err(|e| CoreError::Decode {
            what: "wallet registry".to_string(),
            message: e.to_string(),
        })?;

        std::fs::write(&self.path, json).map_err(|source| CoreError::FileWrite {
            path: self.path.clone(),
            source,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::tempdir;

    const ADDR_A: &str = "4Nd1mYQaz5Sk1CKQiJ1zCnyvABGt9DEqnkE2tQHgqGXE";
    const ADDR_B: &str = "7xKXtg2CW87d97TXJSDpbD5jBkheTqA83TZRuJosgAsU";

    #[test]
    fn test_record_and_reload() {
        let dir = tempdir().unwrap();

        let registry = WalletRegistry::load(dir.path()).unwrap();
        assert!(registry.is_empty());
        assert!(registry.record(ADDR_A).unwrap());
        assert!(registry.record(ADDR_B).unwrap());

        let reloaded = WalletRegistry::load(dir.path()).unwrap();
        assert_eq!(reloaded.len(), 2);
        assert_eq!(reloaded.addresses(), vec![ADDR_A, ADDR_B]);
    }

    #[test]
    fn test_record_is_idempotent() {
        let dir = tempdir().unwrap();
        let registry = WalletRegistry::load(dir.path()).unwrap();

        assert!(registry.record(ADDR_A).unwrap());
        assert!(!registry.record(ADDR_A).unwrap());
        assert_eq!(registry.len(), 1);
    }

    #[test]
    fn test_record_rejects_invalid_address() {
        let dir = tempdir().unwrap();
        let registry = WalletRegistry::load(dir.path()).unwrap();
        assert!(registry.record("not-a-wallet").is_err());
        assert!(registry.is_empty());
    }

    #[test]
    fn test_remove() {
        let dir = tempdir().unwrap();
        let registry = WalletRegistry::load(dir.path()).unwrap();
        registry.record(ADDR_A).unwrap();

        assert!(registry.remove(ADDR_A).unwrap());
        assert!(!registry.remove(ADDR_A).unwrap());
        assert!(WalletRegistry::load(dir.path()).unwrap().is_empty());
    }

    #[test]
    fn test_loads_legacy_bare_strings() {
        let dir = tempdir().unwrap();
        std::fs::write(
            dir.path().join("wallets.json"),
            format!(r#"["{ADDR_A}", "{ADDR_B}"]"#),
        )
        .unwrap();

        let registry = WalletRegistry::load(dir.path()).unwrap();
        assert_eq!(registry.addresses(), vec![ADDR_A, ADDR_B]);
        assert!(registry.contains(ADDR_A));
    }
}
