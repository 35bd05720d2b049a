//! solscope-core - Core library for solscope
//!
//! Provides the RPC/indexer client, wallet statistics analyzer, wallet
//! registry, leaderboard ranking, counterparty graph, and resume export
//! for Solana wallets. The TUI and CLI crates sit on top of [`WalletStore`].

pub mod analyzer;
pub mod config;
pub mod error;
pub mod event;
pub mod export;
pub mod graph;
pub mod models;
pub mod preferences;
pub mod registry;
pub mod rpc;
pub mod store;

pub use analyzer::{AnalyzedWallet, WalletAnalyzer};
pub use config::{data_dir, RpcConfig};
pub use error::{CoreError, DegradedState, FetchError, FetchReport};
pub use event::{DataEvent, EventBus};
pub use export::{render_resume_json, render_resume_svg, render_resume_text, write_resume};
pub use graph::CounterpartyGraph;
pub use models::{LeaderboardEntry, SortKey, WalletStats};
pub use preferences::{ColorScheme, Preferences};
pub use registry::WalletRegistry;
pub use rpc::RpcClient;
pub use store::WalletStore;
