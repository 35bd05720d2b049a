//! Error types for solscope-core
//!
//! Provides an error hierarchy with thiserror plus a FetchReport that tracks
//! partial failures so views can degrade instead of going blank.

use std::path::PathBuf;
use thiserror::Error;

/// Core error type for solscope operations
#[derive(Error, Debug)]
pub enum CoreError {
    // ===================
    // Address Errors
    // ===================
    #[error("Invalid wallet address: {address} - {reason}")]
    InvalidAddress { address: String, reason: String },

    // ===================
    // RPC / Indexer Errors
    // ===================
    #[error("RPC request failed: {method}")]
    RpcTransport {
        method: String,
        #[source]
        source: reqwest::Error,
    },

    #[error("RPC error {code} for {method}: {message}")]
    RpcResponse {
        method: String,
        code: i64,
        message: String,
    },

    #[error("Indexer request failed: {endpoint} (HTTP {status})")]
    IndexerStatus { endpoint: String, status: u16 },

    #[error("Failed to decode {what} response: {message}")]
    Decode { what: String, message: String },

    // ===================
    // IO Errors
    // ===================
    #[error("Failed to read file: {path}")]
    FileRead {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("Failed to write file: {path}")]
    FileWrite {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("Data directory not found")]
    DataDirNotFound,

    // ===================
    // Config Errors
    // ===================
    #[error("Invalid configuration: {message}")]
    InvalidConfig { message: String },

    #[error("Missing API key: set SOLSCOPE_API_KEY or add api_key to config.toml")]
    MissingApiKey,

    // ===================
    // Store Errors
    // ===================
    #[error("Leaderboard refresh already in progress")]
    RefreshInProgress,
}

/// Severity level for errors during a fetch pass
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorSeverity {
    /// Non-critical, result is partial but usable
    Warning,
    /// Significant but not fatal
    Error,
    /// Cannot continue
    Fatal,
}

/// Individual error entry in a fetch report
#[derive(Debug, Clone)]
pub struct FetchError {
    pub source: String,
    pub message: String,
    pub severity: ErrorSeverity,
    /// Actionable suggestion for user (optional)
    pub suggestion: Option<String>,
}

impl FetchError {
    pub fn warning(source: impl Into<String>, message: impl Into<String>) -> Self {
        Self {
            source: source.into(),
            message: message.into(),
            severity: ErrorSeverity::Warning,
            suggestion: None,
        }
    }

    pub fn error(source: impl Into<String>, message: impl Into<String>) -> Self {
        Self {
            source: source.into(),
            message: message.into(),
            severity: ErrorSeverity::Error,
            suggestion: None,
        }
    }

    pub fn fatal(source: impl Into<String>, message: impl Into<String>) -> Self {
        Self {
            source: source.into(),
            message: message.into(),
            severity: ErrorSeverity::Fatal,
            suggestion: None,
        }
    }

    /// Add an actionable suggestion to this error
    pub fn with_suggestion(mut self, suggestion: impl Into<String>) -> Self {
        self.suggestion = Some(suggestion.into());
        self
    }

    /// Create user-friendly error from CoreError with context-aware suggestions
    pub fn from_core_error(source: impl Into<String>, error: &CoreError) -> Self {
        let (message, suggestion) = match error {
            CoreError::InvalidAddress { address, reason } => (
                format!("Invalid address {}: {}", address, reason),
                Some("Solana addresses are 32-44 base58 characters".to_string()),
            ),
            CoreError::RpcTransport { method, .. } => (
                format!("Could not reach RPC endpoint for {}", method),
                Some("Check network connectivity and rpc_url in config.toml".to_string()),
            ),
            CoreError::IndexerStatus { endpoint, status } => (
                format!("Indexer returned HTTP {} for {}", status, endpoint),
                Some("Verify the API key is valid and not rate limited".to_string()),
            ),
            CoreError::MissingApiKey => (
                "No indexer API key configured".to_string(),
                Some("export SOLSCOPE_API_KEY=<key> or add api_key to config.toml".to_string()),
            ),
            _ => (error.to_string(), None),
        };

        let err = Self::error(source, message);
        match suggestion {
            Some(s) => err.with_suggestion(s),
            None => err,
        }
    }
}

/// Report of errors encountered during a fetch pass
///
/// Enables graceful degradation by tracking partial failures instead of
/// failing completely: a wallet whose NFT lookup fails still gets its
/// transaction count.
#[derive(Debug, Default)]
pub struct FetchReport {
    pub errors: Vec<FetchError>,
    pub signatures_fetched: bool,
    pub tokens_fetched: bool,
    pub wallets_scanned: usize,
    pub wallets_failed: usize,
}

impl FetchReport {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn add_error(&mut self, error: FetchError) {
        self.errors.push(error);
    }

    pub fn add_warning(&mut self, source: impl Into<String>, message: impl Into<String>) {
        self.errors.push(FetchError::warning(source, message));
    }

    pub fn add_fatal(&mut self, source: impl Into<String>, message: impl Into<String>) {
        self.errors.push(FetchError::fatal(source, message));
    }

    /// Returns true if there are any fatal errors
    pub fn has_fatal_errors(&self) -> bool {
        self.errors
            .iter()
            .any(|e| e.severity == ErrorSeverity::Fatal)
    }

    /// Returns true if there are any errors (including warnings)
    pub fn has_errors(&self) -> bool {
        !self.errors.is_empty()
    }

    /// Returns count by severity
    pub fn error_count(&self) -> (usize, usize, usize) {
        let warnings = self
            .errors
            .iter()
            .filter(|e| e.severity == ErrorSeverity::Warning)
            .count();
        let errors = self
            .errors
            .iter()
            .filter(|e| e.severity == ErrorSeverity::Error)
            .count();
        let fatal = self
            .errors
            .iter()
            .filter(|e| e.severity == ErrorSeverity::Fatal)
            .count();
        (warnings, errors, fatal)
    }

    /// Merge another report into this one
    pub fn merge(&mut self, other: FetchReport) {
        self.errors.extend(other.errors);
        self.signatures_fetched = self.signatures_fetched || other.signatures_fetched;
        self.tokens_fetched = self.tokens_fetched || other.tokens_fetched;
        self.wallets_scanned += other.wallets_scanned;
        self.wallets_failed += other.wallets_failed;
    }
}

/// Degraded state indicator for the wallet store
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum DegradedState {
    /// Everything fetched successfully
    Healthy,
    /// Some data missing but functional
    PartialData {
        missing: Vec<String>,
        reason: String,
    },
    /// Remote endpoints unreachable, serving cached data only
    Offline { reason: String },
}

impl DegradedState {
    pub fn is_healthy(&self) -> bool {
        matches!(self, DegradedState::Healthy)
    }

    pub fn is_degraded(&self) -> bool {
        !self.is_healthy()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_fetch_report_severity_counting() {
        let mut report = FetchReport::new();
        report.add_warning("metadata", "Symbol lookup failed");
        report.add_error(FetchError::error("nfts", "HTTP 429"));
        report.add_fatal("signatures", "RPC unreachable");

        let (warnings, errors, fatal) = report.error_count();
        assert_eq!(warnings, 1);
        assert_eq!(errors, 1);
        assert_eq!(fatal, 1);
        assert!(report.has_fatal_errors());
    }

    #[test]
    fn test_fetch_report_merge() {
        let mut report1 = FetchReport::new();
        report1.signatures_fetched = true;
        report1.wallets_scanned = 3;

        let mut report2 = FetchReport::new();
        report2.tokens_fetched = true;
        report2.wallets_scanned = 2;
        report2.add_warning("test", "warning");

        report1.merge(report2);

        assert!(report1.signatures_fetched);
        assert!(report1.tokens_fetched);
        assert_eq!(report1.wallets_scanned, 5);
        assert_eq!(report1.errors.len(), 1);
    }

    #[test]
    fn test_suggestion_for_missing_key() {
        let err = FetchError::from_core_error("analyzer", &CoreError::MissingApiKey);
        assert!(err.suggestion.unwrap().contains("SOLSCOPE_API_KEY"));
    }
}
