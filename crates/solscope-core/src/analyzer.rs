//! Wallet analysis pipeline
//!
//! Single entry point used by every view: fetch signatures, token accounts,
//! metadata and NFTs for a wallet, assemble [`WalletStats`], and cache the
//! result with a TTL so switching views does not refetch.
//!
//! Partial failures degrade instead of aborting: a wallet whose NFT lookup
//! fails still gets its transaction count, with the failure recorded in the
//! accompanying [`FetchReport`].

use crate::error::{CoreError, FetchError, FetchReport};
use crate::models::{validate_address, TokenHolding, WalletAge, WalletStats};
use crate::rpc::types::TokenAccountEntry;
use crate::rpc::{RpcClient, SignatureInfo, TokenMetadataEntry};
use chrono::Utc;
use moka::future::Cache;
use std::collections::HashMap;
use std::sync::Arc;

/// Result of analyzing one wallet
#[derive(Debug)]
pub struct AnalyzedWallet {
    pub stats: Arc<WalletStats>,
    pub report: FetchReport,
    /// True when served from the TTL cache without touching the network
    pub from_cache: bool,
}

/// Shared analyzer with a TTL cache over computed stats
pub struct WalletAnalyzer {
    client: RpcClient,
    cache: Cache<String, Arc<WalletStats>>,
}

impl WalletAnalyzer {
    pub fn new(client: RpcClient) -> Self {
        let cache = Cache::builder()
            .max_capacity(256)
            .time_to_live(client.config().stats_cache_ttl())
            .build();

        Self { client, cache }
    }

    /// Analyze a wallet, serving from cache when fresh.
    ///
    /// Fails hard only on an invalid address or an unreachable signature
    /// endpoint; token, metadata and NFT failures are reported as warnings
    /// and leave the affected fields at their defaults.
    pub async fn analyze(&self, address: &str) -> Result<AnalyzedWallet, CoreError> {
        validate_address(address)?;

        if let Some(stats) = self.cache.get(address).await {
            tracing::debug!(address, "Stats cache hit");
            return Ok(AnalyzedWallet {
                stats,
                report: FetchReport::new(),
                from_cache: true,
            });
        }

        let (stats, report) = self.fetch_stats(address).await?;
        let stats = Arc::new(stats);
        self.cache.insert(address.to_string(), stats.clone()).await;

        Ok(AnalyzedWallet {
            stats,
            report,
            from_cache: false,
        })
    }

    /// Drop any cached entry and analyze again.
    pub async fn refresh(&self, address: &str) -> Result<AnalyzedWallet, CoreError> {
        self.cache.invalidate(address).await;
        self.analyze(address).await
    }

    pub fn invalidate_all(&self) {
        self.cache.invalidate_all();
    }

    async fn fetch_stats(&self, address: &str) -> Result<(WalletStats, FetchReport), CoreError> {
        let mut report = FetchReport::new();

        // Signatures are the backbone; without them there is nothing to show.
        let signatures = self.client.get_signatures(address).await?;
        report.signatures_fetched = true;
        tracing::info!(address, count = signatures.len(), "Fetched signatures");

        let token_accounts = match self.client.get_token_accounts(address).await {
            Ok(accounts) => {
                report.tokens_fetched = true;
                accounts
            }
            Err(e) => {
                tracing::warn!(address, error = %e, "Token account fetch failed");
                report.add_error(FetchError::from_core_error("tokens", &e));
                Vec::new()
            }
        };

        let held: Vec<&TokenAccountEntry> = token_accounts
            .iter()
            .filter(|a| a.ui_amount() > 0.0)
            .collect();

        let mints: Vec<String> = held.iter().map(|a| a.mint().to_string()).collect();
        let symbols = match self.client.get_token_metadata(&mints).await {
            Ok(entries) => symbol_map(&entries),
            Err(e) => {
                tracing::warn!(address, error = %e, "Token metadata fetch failed");
                report.add_warning("metadata", e.to_string());
                HashMap::new()
            }
        };

        let nft_count = match self.client.get_nft_count(address).await {
            Ok(count) => count,
            Err(e) => {
                tracing::warn!(address, error = %e, "NFT fetch failed");
                report.add_error(FetchError::from_core_error("nfts", &e));
                0
            }
        };

        let earliest_block_time = self
            .earliest_block_time(address, &signatures, &mut report)
            .await;

        let stats = assemble_stats(
            address,
            &signatures,
            earliest_block_time,
            &held,
            &symbols,
            nft_count,
        );
        report.wallets_scanned = 1;
        Ok((stats, report))
    }

    /// Block time of the earliest signature, fetching the full transaction
    /// when the listing omitted it.
    async fn earliest_block_time(
        &self,
        address: &str,
        signatures: &[SignatureInfo],
        report: &mut FetchReport,
    ) -> Option<i64> {
        let earliest = signatures.last()?;
        if earliest.block_time.is_some() {
            return earliest.block_time;
        }

        match self.client.get_transaction(&earliest.signature).await {
            Ok(meta) => meta.block_time,
            Err(e) => {
                tracing::warn!(address, error = %e, "Earliest transaction fetch failed");
                report.add_warning("age", e.to_string());
                None
            }
        }
    }
}

/// Map mint address to resolved symbol, skipping entries without one.
fn symbol_map(entries: &[TokenMetadataEntry]) -> HashMap<String, String> {
    entries
        .iter()
        .filter_map(|e| e.symbol().map(|s| (e.account.clone(), s.to_string())))
        .collect()
}

/// Assemble stats from already-fetched pieces.
fn assemble_stats(
    address: &str,
    signatures: &[SignatureInfo],
    earliest_block_time: Option<i64>,
    held: &[&TokenAccountEntry],
    symbols: &HashMap<String, String>,
    nft_count: u64,
) -> WalletStats {
    let now = Utc::now();
    let age = earliest_block_time
        .map(|t| WalletAge::from_block_time(t, now))
        .unwrap_or(WalletAge::Unknown);

    let tokens = held
        .iter()
        .map(|a| TokenHolding {
            mint: a.mint().to_string(),
            amount: a.ui_amount(),
            symbol: symbols.get(a.mint()).cloned(),
        })
        .collect();

    WalletStats {
        address: address.to_string(),
        transaction_count: signatures.len() as u64,
        age,
        tokens,
        nft_count,
        fetched_at: Some(now),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn sig(signature: &str, block_time: Option<i64>) -> SignatureInfo {
        serde_json::from_value(json!({
            "signature": signature,
            "blockTime": block_time,
        }))
        .unwrap()
    }

    fn account(mint: &str, ui_amount: f64) -> TokenAccountEntry {
        serde_json::from_value(json!({
            "pubkey": format!("acc-{mint}"),
            "account": {
                "data": {
                    "parsed": {
                        "info": {
                            "mint": mint,
                            "tokenAmount": { "uiAmount": ui_amount }
                        }
                    }
                }
            }
        }))
        .unwrap()
    }

    #[test]
    fn test_assemble_counts_and_age() {
        let two_days_ago = Utc::now().timestamp() - 2 * 86_400;
        let signatures = vec![sig("newest", None), sig("oldest", Some(two_days_ago))];
        let a1 = account("mint-1", 5.0);
        let held = vec![&a1];
        let mut symbols = HashMap::new();
        symbols.insert("mint-1".to_string(), "USDC".to_string());

        let stats = assemble_stats(
            "wallet-1",
            &signatures,
            Some(two_days_ago),
            &held,
            &symbols,
            3,
        );

        assert_eq!(stats.transaction_count, 2);
        assert_eq!(stats.age, WalletAge::Days(2));
        assert_eq!(stats.tokens.len(), 1);
        assert_eq!(stats.tokens[0].symbol.as_deref(), Some("USDC"));
        assert_eq!(stats.nft_count, 3);
        assert!(stats.fetched_at.is_some());
    }

    #[test]
    fn test_assemble_no_transactions() {
        let stats = assemble_stats("wallet-1", &[], None, &[], &HashMap::new(), 0);
        assert_eq!(stats.transaction_count, 0);
        assert_eq!(stats.age, WalletAge::Unknown);
    }

    #[test]
    fn test_assemble_missing_block_time() {
        // Unresolvable block time means age stays unknown
        let signatures = vec![sig("only", None)];
        let stats = assemble_stats("wallet-1", &signatures, None, &[], &HashMap::new(), 0);
        assert_eq!(stats.age, WalletAge::Unknown);
    }

    #[test]
    fn test_symbol_map_skips_unnamed() {
        let entries: Vec<TokenMetadataEntry> = serde_json::from_value(json!([
            { "account": "m1", "legacyMetadata": { "symbol": "BONK" } },
            { "account": "m2" }
        ]))
        .unwrap();

        let map = symbol_map(&entries);
        assert_eq!(map.len(), 1);
        assert_eq!(map.get("m1").map(String::as_str), Some("BONK"));
    }
}
