//! Data models for solscope

pub mod leaderboard;
pub mod wallet;

pub use leaderboard::{rank_entries, LeaderboardEntry, SortKey};
pub use wallet::{shorten_address, validate_address, TokenHolding, WalletAge, WalletStats};
