//! Wallet statistics model
//!
//! The unit of analysis is a wallet public key (base58). Statistics are
//! transient: recomputed on demand, never persisted.

use crate::error::CoreError;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Base58 alphabet used by Solana addresses (Bitcoin alphabet, no 0OIl)
const BASE58_ALPHABET: &str = "123456789ABCDEFGHJKLMNPQRSTUVWXYZabcdefghijkmnopqrstuvwxyz";

/// Age of a wallet derived from its earliest fetched transaction
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
pub enum WalletAge {
    /// No transactions found, or the earliest block time was unavailable
    #[default]
    Unknown,
    /// Age in whole days since the earliest fetched transaction
    Days(u64),
}

impl WalletAge {
    /// Derive the age from a block time (seconds since epoch) and now.
    pub fn from_block_time(block_time: i64, now: DateTime<Utc>) -> Self {
        let elapsed = now.timestamp().saturating_sub(block_time);
        if elapsed < 0 {
            return WalletAge::Days(0);
        }
        WalletAge::Days((elapsed / 86_400) as u64)
    }

    /// Age in days for scoring; Unknown counts as 0.
    pub fn days(&self) -> u64 {
        match self {
            WalletAge::Unknown => 0,
            WalletAge::Days(d) => *d,
        }
    }
}

impl std::fmt::Display for WalletAge {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            WalletAge::Unknown => write!(f, "No transactions or new wallet"),
            WalletAge::Days(0) => write!(f, "< 1 day"),
            WalletAge::Days(1) => write!(f, "1 day"),
            WalletAge::Days(d) => write!(f, "{} days", d),
        }
    }
}

/// A non-zero SPL token holding
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct TokenHolding {
    /// Mint address of the token
    pub mint: String,
    /// UI amount (decimal-adjusted balance)
    pub amount: f64,
    /// Symbol from token metadata, when the lookup succeeded
    pub symbol: Option<String>,
}

/// Aggregated on-chain statistics for a single wallet
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct WalletStats {
    /// Wallet address (base58)
    pub address: String,

    /// Number of signatures fetched (capped at the configured limit)
    pub transaction_count: u64,

    /// Wallet age from the earliest fetched signature's block time
    pub age: WalletAge,

    /// Non-zero token accounts (one entry per account, matching the source
    /// view: a mint held through two accounts counts twice)
    pub tokens: Vec<TokenHolding>,

    /// NFTs minted or held
    pub nft_count: u64,

    /// When these stats were computed
    pub fetched_at: Option<DateTime<Utc>>,
}

impl WalletStats {
    pub fn new(address: impl Into<String>) -> Self {
        Self {
            address: address.into(),
            ..Default::default()
        }
    }

    /// Count of non-zero token accounts
    pub fn token_count(&self) -> u64 {
        self.tokens.len() as u64
    }

    /// Symbols of held tokens, skipping entries without metadata
    pub fn token_symbols(&self) -> Vec<&str> {
        self.tokens
            .iter()
            .filter_map(|t| t.symbol.as_deref())
            .collect()
    }

    /// Display string for the tokens row: symbols when known, count otherwise
    pub fn tokens_display(&self) -> String {
        let symbols = self.token_symbols();
        if symbols.is_empty() {
            self.token_count().to_string()
        } else {
            symbols.join(", ")
        }
    }

    /// Leaderboard score: txs + 3*tokens + 2*nfts + 1.5*age_days
    pub fn score(&self) -> f64 {
        self.transaction_count as f64
            + self.token_count() as f64 * 3.0
            + self.nft_count as f64 * 2.0
            + self.age.days() as f64 * 1.5
    }
}

/// Validate a wallet address: base58 alphabet, plausible decoded length.
///
/// Solana public keys are 32 bytes, which encode to 32-44 base58 chars.
pub fn validate_address(address: &str) -> Result<(), CoreError> {
    if address.len() < 32 || address.len() > 44 {
        return Err(CoreError::InvalidAddress {
            address: address.to_string(),
            reason: format!("expected 32-44 characters, got {}", address.len()),
        });
    }

    if let Some(bad) = address.chars().find(|c| !BASE58_ALPHABET.contains(*c)) {
        return Err(CoreError::InvalidAddress {
            address: address.to_string(),
            reason: format!("invalid base58 character '{}'", bad),
        });
    }

    Ok(())
}

/// Shorten an address for display: first 4 + "..." + last 4
///
/// Counts characters, not bytes: indexer account keys are not validated
/// before display and may contain multi-byte text.
pub fn shorten_address(address: &str) -> String {
    let chars: Vec<char> = address.chars().collect();
    if chars.len() <= 8 {
        return address.to_string();
    }
    let head: String = chars[..4].iter().collect();
    let tail: String = chars[chars.len() - 4..].iter().collect();
    format!("{}...{}", head, tail)
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;

    const ADDR: &str = "4Nd1mYQaz5Sk1CKQiJ1zCnyvABGt9DEqnkE2tQHgqGXE";

    #[test]
    fn test_age_from_block_time() {
        let now = Utc.with_ymd_and_hms(2026, 1, 10, 12, 0, 0).unwrap();
        let ten_days_ago = now.timestamp() - 10 * 86_400;
        assert_eq!(
            WalletAge::from_block_time(ten_days_ago, now),
            WalletAge::Days(10)
        );
    }

    #[test]
    fn test_age_same_day() {
        let now = Utc.with_ymd_and_hms(2026, 1, 10, 12, 0, 0).unwrap();
        let an_hour_ago = now.timestamp() - 3600;
        assert_eq!(
            WalletAge::from_block_time(an_hour_ago, now),
            WalletAge::Days(0)
        );
    }

    #[test]
    fn test_age_display() {
        assert_eq!(WalletAge::Days(0).to_string(), "< 1 day");
        assert_eq!(WalletAge::Days(1).to_string(), "1 day");
        assert_eq!(WalletAge::Days(42).to_string(), "42 days");
        assert_eq!(
            WalletAge::Unknown.to_string(),
            "No transactions or new wallet"
        );
    }

    #[test]
    fn test_score_formula() {
        let mut stats = WalletStats::new(ADDR);
        stats.transaction_count = 100;
        stats.tokens = vec![
            TokenHolding {
                mint: "m1".into(),
                amount: 5.0,
                symbol: Some("USDC".into()),
            },
            TokenHolding {
                mint: "m2".into(),
                amount: 1.0,
                symbol: None,
            },
        ];
        stats.nft_count = 4;
        stats.age = WalletAge::Days(10);

        // 100 + 2*3 + 4*2 + 10*1.5 = 129
        assert!((stats.score() - 129.0).abs() < f64::EPSILON);
    }

    #[test]
    fn test_score_unknown_age_counts_zero() {
        let mut stats = WalletStats::new(ADDR);
        stats.transaction_count = 7;
        assert!((stats.score() - 7.0).abs() < f64::EPSILON);
    }

    #[test]
    fn test_tokens_display_prefers_symbols() {
        let mut stats = WalletStats::new(ADDR);
        stats.tokens = vec![
            TokenHolding {
                mint: "m1".into(),
                amount: 5.0,
                symbol: Some("USDC".into()),
            },
            TokenHolding {
                mint: "m2".into(),
                amount: 2.0,
                symbol: Some("BONK".into()),
            },
        ];
        assert_eq!(stats.tokens_display(), "USDC, BONK");

        stats.tokens.iter_mut().for_each(|t| t.symbol = None);
        assert_eq!(stats.tokens_display(), "2");
    }

    #[test]
    fn test_validate_address_ok() {
        assert!(validate_address(ADDR).is_ok());
    }

    #[test]
    fn test_validate_address_rejects_bad_chars() {
        // '0' and 'O' are not in the base58 alphabet
        let bad = "0OOOOOOOOOOOOOOOOOOOOOOOOOOOOOOOOOOOOOOO";
        assert!(validate_address(bad).is_err());
    }

    #[test]
    fn test_validate_address_rejects_short() {
        assert!(validate_address("abc").is_err());
    }

    #[test]
    fn test_shorten_address() {
        assert_eq!(shorten_address(ADDR), "4Nd1...qGXE");
        assert_eq!(shorten_address("short"), "short");
    }

    #[test]
    fn test_shorten_address_multibyte() {
        // Unvalidated indexer keys can carry non-ASCII text
        assert_eq!(shorten_address("日本語日本語日本語"), "日本語日...語日本語");
        assert_eq!(shorten_address("日本語日本語"), "日本語日本語");
    }
}
