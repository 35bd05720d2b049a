//! Solana JSON-RPC and indexer REST client
//!
//! Two backends feed the analyzer: the node JSON-RPC endpoint (signatures,
//! token accounts) and an indexer REST API (token metadata, NFTs, enriched
//! transaction history).

pub mod client;
pub mod types;

pub use client::RpcClient;
pub use types::{EnrichedTransaction, SignatureInfo, TokenAccountInfo, TokenMetadataEntry};
