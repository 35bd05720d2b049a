//! Leaderboard rows and sort keys
//!
//! Rows are derived from per-wallet stats; rank is assigned after sorting.

use crate::models::WalletStats;
use serde::{Deserialize, Serialize};

/// Sort key for the leaderboard
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SortKey {
    /// Composite score (default)
    #[default]
    Score,
    /// NFT count descending
    Nfts,
    /// Transaction count descending
    Transactions,
    /// Wallet age descending
    Oldest,
}

impl SortKey {
    pub fn all() -> &'static [SortKey] {
        &[
            SortKey::Score,
            SortKey::Nfts,
            SortKey::Transactions,
            SortKey::Oldest,
        ]
    }

    pub fn label(&self) -> &'static str {
        match self {
            SortKey::Score => "All",
            SortKey::Nfts => "NFT Whales",
            SortKey::Transactions => "Tx Volume",
            SortKey::Oldest => "Oldest",
        }
    }

    /// Parse a CLI value ("score", "nfts", "txs", "oldest")
    pub fn parse(s: &str) -> Option<Self> {
        match s.to_ascii_lowercase().as_str() {
            "score" | "all" => Some(SortKey::Score),
            "nfts" | "nft" => Some(SortKey::Nfts),
            "txs" | "transactions" => Some(SortKey::Transactions),
            "oldest" | "age" => Some(SortKey::Oldest),
            _ => None,
        }
    }

    pub fn next(&self) -> Self {
        match self {
            SortKey::Score => SortKey::Nfts,
            SortKey::Nfts => SortKey::Transactions,
            SortKey::Transactions => SortKey::Oldest,
            SortKey::Oldest => SortKey::Score,
        }
    }
}

/// One ranked leaderboard row
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LeaderboardEntry {
    /// 1-based rank after sorting
    pub rank: usize,
    /// Wallet address
    pub wallet: String,
    /// Transaction count
    pub txs: u64,
    /// Non-zero token account count
    pub tokens: u64,
    /// NFT count
    pub nfts: u64,
    /// Age in whole days (0 when unknown)
    pub age_days: u64,
    /// Composite score
    pub score: f64,
}

impl LeaderboardEntry {
    /// Build an unranked row from wallet stats
    pub fn from_stats(stats: &WalletStats) -> Self {
        Self {
            rank: 0,
            wallet: stats.address.clone(),
            txs: stats.transaction_count,
            tokens: stats.token_count(),
            nfts: stats.nft_count,
            age_days: stats.age.days(),
            score: stats.score(),
        }
    }

    /// All-zero row for a wallet whose fetch failed; it stays on the board.
    pub fn zeroed(wallet: impl Into<String>) -> Self {
        Self {
            rank: 0,
            wallet: wallet.into(),
            txs: 0,
            tokens: 0,
            nfts: 0,
            age_days: 0,
            score: 0.0,
        }
    }
}

/// Sort entries by the given key (descending) and assign 1-based ranks.
pub fn rank_entries(mut entries: Vec<LeaderboardEntry>, key: SortKey) -> Vec<LeaderboardEntry> {
    match key {
        SortKey::Score => entries.sort_by(|a, b| {
            b.score
                .partial_cmp(&a.score)
                .unwrap_or(std::cmp::Ordering::Equal)
        }),
        SortKey::Nfts => entries.sort_by(|a, b| b.nfts.cmp(&a.nfts)),
        SortKey::Transactions => entries.sort_by(|a, b| b.txs.cmp(&a.txs)),
        SortKey::Oldest => entries.sort_by(|a, b| b.age_days.cmp(&a.age_days)),
    }

    for (idx, entry) in entries.iter_mut().enumerate() {
        entry.rank = idx + 1;
    }

    entries
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::{TokenHolding, WalletAge};

    fn entry(wallet: &str, txs: u64, tokens: u64, nfts: u64, age_days: u64) -> LeaderboardEntry {
        let score =
            txs as f64 + tokens as f64 * 3.0 + nfts as f64 * 2.0 + age_days as f64 * 1.5;
        LeaderboardEntry {
            rank: 0,
            wallet: wallet.to_string(),
            txs,
            tokens,
            nfts,
            age_days,
            score,
        }
    }

    #[test]
    fn test_rank_by_score_default() {
        let entries = vec![
            entry("low", 10, 0, 0, 0),
            entry("high", 100, 5, 3, 30),
            entry("mid", 50, 1, 1, 2),
        ];

        let ranked = rank_entries(entries, SortKey::Score);
        assert_eq!(ranked[0].wallet, "high");
        assert_eq!(ranked[0].rank, 1);
        assert_eq!(ranked[1].wallet, "mid");
        assert_eq!(ranked[2].wallet, "low");
        assert_eq!(ranked[2].rank, 3);
    }

    #[test]
    fn test_rank_ties_keep_insertion_order() {
        // Equal scores must not swap: the sort is stable, so rows tie-break
        // by the order the registry produced them.
        let entries = vec![
            entry("first", 10, 0, 0, 0),
            entry("second", 10, 0, 0, 0),
            entry("third", 4, 1, 0, 0),
        ];

        let ranked = rank_entries(entries, SortKey::Score);
        assert_eq!(ranked[0].wallet, "first");
        assert_eq!(ranked[0].rank, 1);
        assert_eq!(ranked[1].wallet, "second");
        assert_eq!(ranked[1].rank, 2);
        assert_eq!(ranked[2].wallet, "third");
    }

    #[test]
    fn test_rank_by_nfts() {
        let entries = vec![entry("a", 1000, 0, 1, 0), entry("b", 1, 0, 9, 0)];
        let ranked = rank_entries(entries, SortKey::Nfts);
        assert_eq!(ranked[0].wallet, "b");
    }

    #[test]
    fn test_rank_by_oldest() {
        let entries = vec![entry("young", 0, 0, 0, 5), entry("old", 0, 0, 0, 900)];
        let ranked = rank_entries(entries, SortKey::Oldest);
        assert_eq!(ranked[0].wallet, "old");
        assert_eq!(ranked[1].rank, 2);
    }

    #[test]
    fn test_from_stats() {
        let mut stats = WalletStats::new("wallet-x");
        stats.transaction_count = 12;
        stats.tokens = vec![TokenHolding {
            mint: "m".into(),
            amount: 1.0,
            symbol: None,
        }];
        stats.nft_count = 2;
        stats.age = WalletAge::Days(4);

        let row = LeaderboardEntry::from_stats(&stats);
        assert_eq!(row.txs, 12);
        assert_eq!(row.tokens, 1);
        // 12 + 3 + 4 + 6 = 25
        assert!((row.score - 25.0).abs() < f64::EPSILON);
    }

    #[test]
    fn test_sort_key_parse() {
        assert_eq!(SortKey::parse("nfts"), Some(SortKey::Nfts));
        assert_eq!(SortKey::parse("TXS"), Some(SortKey::Transactions));
        assert_eq!(SortKey::parse("bogus"), None);
    }

    #[test]
    fn test_sort_key_cycle() {
        let mut key = SortKey::Score;
        for _ in 0..4 {
            key = key.next();
        }
        assert_eq!(key, SortKey::Score);
    }
}
