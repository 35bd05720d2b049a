//! RPC and indexer configuration
//!
//! The original deployment hardcoded the API key and program ID in source;
//! here both come from `config.toml` with environment overrides.

use crate::error::CoreError;
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};
use std::time::Duration;

/// Default public RPC endpoint (override for an indexer-backed one)
pub const DEFAULT_RPC_URL: &str = "https://api.mainnet-beta.solana.com";

/// Default indexer REST base (token metadata, NFTs, enriched history)
pub const DEFAULT_INDEXER_URL: &str = "https://api.helius.xyz/v0";

/// SPL Token program ID (owner program for classic token accounts)
pub const TOKEN_PROGRAM_ID: &str = "TokenkegQfeZyiNwAJbNbGKPFXCWuBvf9Ss623VQ5DA";

/// Configuration for the RPC/indexer client
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct RpcConfig {
    /// JSON-RPC endpoint URL
    pub rpc_url: String,

    /// Indexer REST base URL
    pub indexer_url: String,

    /// Indexer API key (appended as `api-key` query parameter)
    pub api_key: Option<String>,

    /// Maximum signatures fetched per wallet
    pub signature_limit: usize,

    /// Enriched transactions fetched for the counterparty graph
    pub graph_tx_limit: usize,

    /// Per-request timeout in seconds
    pub request_timeout_secs: u64,

    /// TTL for cached wallet statistics in seconds
    pub stats_cache_ttl_secs: u64,
}

impl Default for RpcConfig {
    fn default() -> Self {
        Self {
            rpc_url: DEFAULT_RPC_URL.to_string(),
            indexer_url: DEFAULT_INDEXER_URL.to_string(),
            api_key: None,
            signature_limit: 1000,
            graph_tx_limit: 50,
            request_timeout_secs: 30,
            stats_cache_ttl_secs: 300,
        }
    }
}

impl RpcConfig {
    /// Load configuration: defaults, then `<dir>/config.toml`, then env.
    ///
    /// Environment variables `SOLSCOPE_RPC_URL`, `SOLSCOPE_INDEXER_URL` and
    /// `SOLSCOPE_API_KEY` win over the file.
    pub fn load(config_dir: &Path) -> Result<Self, CoreError> {
        let path = config_dir.join("config.toml");

        let mut config = if path.exists() {
            let content = std::fs::read_to_string(&path).map_err(|source| {
                CoreError::FileRead {
                    path: path.clone(),
                    source,
                }
            })?;
            toml::from_str(&content).map_err(|e| CoreError::InvalidConfig {
                message: format!("{}: {}", path.display(), e),
            })?
        } else {
            Self::default()
        };

        if let Ok(url) = std::env::var("SOLSCOPE_RPC_URL") {
            config.rpc_url = url;
        }
        if let Ok(url) = std::env::var("SOLSCOPE_INDEXER_URL") {
            config.indexer_url = url;
        }
        if let Ok(key) = std::env::var("SOLSCOPE_API_KEY") {
            if !key.is_empty() {
                config.api_key = Some(key);
            }
        }

        config.validate()?;
        Ok(config)
    }

    fn validate(&self) -> Result<(), CoreError> {
        if self.signature_limit == 0 {
            return Err(CoreError::InvalidConfig {
                message: "signature_limit must be at least 1".to_string(),
            });
        }
        if !self.rpc_url.starts_with("http") {
            return Err(CoreError::InvalidConfig {
                message: format!("rpc_url is not an HTTP endpoint: {}", self.rpc_url),
            });
        }
        Ok(())
    }

    pub fn request_timeout(&self) -> Duration {
        Duration::from_secs(self.request_timeout_secs)
    }

    pub fn stats_cache_ttl(&self) -> Duration {
        Duration::from_secs(self.stats_cache_ttl_secs)
    }
}

/// Resolve the solscope data directory (`~/.local/share/solscope` on Linux).
///
/// Holds the wallet registry, preferences and config file.
pub fn data_dir() -> Result<PathBuf, CoreError> {
    dirs::data_dir()
        .map(|d| d.join("solscope"))
        .ok_or(CoreError::DataDirNotFound)
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::tempdir;

    #[test]
    fn test_defaults() {
        let config = RpcConfig::default();
        assert_eq!(config.signature_limit, 1000);
        assert_eq!(config.graph_tx_limit, 50);
        assert!(config.api_key.is_none());
    }

    #[test]
    fn test_load_missing_file_uses_defaults() {
        let dir = tempdir().unwrap();
        let config = RpcConfig::load(dir.path()).unwrap();
        assert_eq!(config.rpc_url, DEFAULT_RPC_URL);
    }

    #[test]
    fn test_load_from_toml() {
        let dir = tempdir().unwrap();
        std::fs::write(
            dir.path().join("config.toml"),
            r#"
rpc_url = "https://rpc.example.com"
api_key = "test-key"
signature_limit = 500
"#,
        )
        .unwrap();

        let config = RpcConfig::load(dir.path()).unwrap();
        assert_eq!(config.rpc_url, "https://rpc.example.com");
        assert_eq!(config.api_key.as_deref(), Some("test-key"));
        assert_eq!(config.signature_limit, 500);
        // Unspecified fields keep defaults
        assert_eq!(config.graph_tx_limit, 50);
    }

    #[test]
    fn test_invalid_signature_limit_rejected() {
        let dir = tempdir().unwrap();
        std::fs::write(dir.path().join("config.toml"), "signature_limit = 0").unwrap();
        assert!(RpcConfig::load(dir.path()).is_err());
    }
}
