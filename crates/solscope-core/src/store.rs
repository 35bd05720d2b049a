//! Central wallet data store
//!
//! Thread-safe hub the TUI and CLI read from: analyzed stats in a DashMap,
//! the ranked leaderboard and degraded state behind parking_lot::RwLock,
//! and an event bus notifying subscribers of changes.

use crate::analyzer::WalletAnalyzer;
use crate::error::{CoreError, DegradedState, FetchError, FetchReport};
use crate::event::{DataEvent, EventBus};
use crate::graph::CounterpartyGraph;
use crate::models::{rank_entries, LeaderboardEntry, SortKey, WalletStats};
use crate::registry::WalletRegistry;
use crate::rpc::RpcClient;
use dashmap::DashMap;
use parking_lot::RwLock;
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;
use tracing::{debug, info, warn};

/// Releases the refresh guard on scope exit, including early returns.
struct RefreshGuard<'a>(&'a AtomicBool);

impl Drop for RefreshGuard<'_> {
    fn drop(&mut self) {
        self.0.store(false, Ordering::Release);
    }
}

/// Central store for analyzed wallets, the leaderboard and graphs
pub struct WalletStore {
    analyzer: WalletAnalyzer,
    client: RpcClient,
    registry: WalletRegistry,

    /// Latest stats per wallet (high contention during leaderboard refresh)
    stats: DashMap<String, Arc<WalletStats>>,

    /// Counterparty graphs per wallet
    graphs: DashMap<String, Arc<CounterpartyGraph>>,

    /// Ranked leaderboard (low contention, frequent reads)
    leaderboard: RwLock<Vec<LeaderboardEntry>>,
    sort_key: RwLock<SortKey>,

    event_bus: EventBus,
    degraded_state: RwLock<DegradedState>,

    /// Re-entry guard: only one leaderboard refresh at a time
    refreshing: AtomicBool,
}

impl WalletStore {
    pub fn new(client: RpcClient, registry: WalletRegistry) -> Self {
        Self {
            analyzer: WalletAnalyzer::new(client.clone()),
            client,
            registry,
            stats: DashMap::new(),
            graphs: DashMap::new(),
            leaderboard: RwLock::new(Vec::new()),
            sort_key: RwLock::new(SortKey::default()),
            event_bus: EventBus::default_capacity(),
            degraded_state: RwLock::new(DegradedState::Healthy),
            refreshing: AtomicBool::new(false),
        }
    }

    pub fn event_bus(&self) -> &EventBus {
        &self.event_bus
    }

    pub fn registry(&self) -> &WalletRegistry {
        &self.registry
    }

    pub fn degraded_state(&self) -> DegradedState {
        self.degraded_state.read().clone()
    }

    /// Analyze a wallet and remember it in the registry.
    ///
    /// Newly seen wallets are appended to the registry; repeat lookups are
    /// served from the analyzer's TTL cache.
    pub async fn analyze_wallet(&self, address: &str) -> Result<Arc<WalletStats>, CoreError> {
        let analyzed = match self.analyzer.analyze(address).await {
            Ok(analyzed) => analyzed,
            Err(e) => {
                self.event_bus.publish(DataEvent::FetchFailed {
                    address: address.to_string(),
                    message: e.to_string(),
                });
                return Err(e);
            }
        };

        debug!(address, from_cache = analyzed.from_cache, "Wallet analyzed");

        if self.registry.record(address)? {
            self.event_bus.publish(DataEvent::RegistryUpdated);
        }

        self.stats
            .insert(address.to_string(), analyzed.stats.clone());
        self.update_degraded_state(&analyzed.report);
        self.event_bus
            .publish(DataEvent::StatsFetched(address.to_string()));

        Ok(analyzed.stats)
    }

    /// Drop cached stats for a wallet and analyze again.
    pub async fn refresh_wallet(&self, address: &str) -> Result<Arc<WalletStats>, CoreError> {
        let analyzed = match self.analyzer.refresh(address).await {
            Ok(analyzed) => analyzed,
            Err(e) => {
                self.event_bus.publish(DataEvent::FetchFailed {
                    address: address.to_string(),
                    message: e.to_string(),
                });
                return Err(e);
            }
        };
        self.stats
            .insert(address.to_string(), analyzed.stats.clone());
        self.update_degraded_state(&analyzed.report);
        self.event_bus
            .publish(DataEvent::StatsFetched(address.to_string()));
        Ok(analyzed.stats)
    }

    /// Latest stats for a wallet without touching the network.
    pub fn stats(&self, address: &str) -> Option<Arc<WalletStats>> {
        self.stats.get(address).map(|r| Arc::clone(r.value()))
    }

    /// Build (or rebuild) the counterparty graph for a wallet.
    pub async fn build_graph(&self, address: &str) -> Result<Arc<CounterpartyGraph>, CoreError> {
        let transactions = self.client.get_enriched_transactions(address).await?;
        let graph = Arc::new(CounterpartyGraph::build(address, &transactions));

        self.graphs.insert(address.to_string(), graph.clone());
        self.event_bus
            .publish(DataEvent::GraphBuilt(address.to_string()));

        Ok(graph)
    }

    /// Cached counterparty graph, if one was built.
    pub fn graph(&self, address: &str) -> Option<Arc<CounterpartyGraph>> {
        self.graphs.get(address).map(|r| Arc::clone(r.value()))
    }

    /// Recompute the leaderboard over every registered wallet.
    ///
    /// Wallets are analyzed sequentially; the TTL cache makes repeat passes
    /// cheap. A second refresh while one is running returns
    /// [`CoreError::RefreshInProgress`] instead of doubling the RPC load.
    pub async fn refresh_leaderboard(&self) -> Result<FetchReport, CoreError> {
        if self
            .refreshing
            .compare_exchange(false, true, Ordering::Acquire, Ordering::Relaxed)
            .is_err()
        {
            return Err(CoreError::RefreshInProgress);
        }
        let _guard = RefreshGuard(&self.refreshing);

        let addresses = self.registry.addresses();
        info!(wallets = addresses.len(), "Refreshing leaderboard");

        let mut report = FetchReport::new();
        let mut entries = Vec::with_capacity(addresses.len());

        for address in &addresses {
            match self.analyzer.analyze(address).await {
                Ok(analyzed) => {
                    self.stats.insert(address.clone(), analyzed.stats.clone());
                    entries.push(LeaderboardEntry::from_stats(&analyzed.stats));
                    report.merge(analyzed.report);
                }
                Err(e) => {
                    warn!(address, error = %e, "Wallet fetch failed, keeping zeroed row");
                    entries.push(LeaderboardEntry::zeroed(address.clone()));
                    report.wallets_failed += 1;
                    // A transport failure means the RPC node itself is down
                    if matches!(e, CoreError::RpcTransport { .. }) {
                        report.add_fatal("rpc", e.to_string());
                    } else {
                        report.add_error(FetchError::from_core_error("leaderboard", &e));
                    }
                }
            }
        }

        let key = *self.sort_key.read();
        {
            let mut leaderboard = self.leaderboard.write();
            *leaderboard = rank_entries(entries, key);
        }

        self.update_degraded_state(&report);
        self.event_bus.publish(DataEvent::LeaderboardUpdated);

        info!(
            scanned = report.wallets_scanned,
            failed = report.wallets_failed,
            "Leaderboard refresh complete"
        );

        Ok(report)
    }

    /// Ranked leaderboard under the current sort key.
    pub fn leaderboard(&self) -> Vec<LeaderboardEntry> {
        self.leaderboard.read().clone()
    }

    pub fn sort_key(&self) -> SortKey {
        *self.sort_key.read()
    }

    /// Change the sort key and re-rank the existing rows in place.
    pub fn set_sort_key(&self, key: SortKey) {
        {
            let mut current = self.sort_key.write();
            if *current == key {
                return;
            }
            *current = key;
        }

        let entries = self.leaderboard.read().clone();
        {
            let mut leaderboard = self.leaderboard.write();
            *leaderboard = rank_entries(entries, key);
        }

        self.event_bus.publish(DataEvent::LeaderboardUpdated);
    }

    /// Drop all cached stats and graphs. Registry entries survive.
    pub fn clear_caches(&self) {
        self.analyzer.invalidate_all();
        self.stats.clear();
        self.graphs.clear();
        debug!("Caches cleared");
    }

    fn update_degraded_state(&self, report: &FetchReport) {
        let mut state = self.degraded_state.write();

        if report.has_fatal_errors() {
            *state = DegradedState::Offline {
                reason: "RPC endpoints unreachable".to_string(),
            };
            return;
        }

        if report.has_errors() {
            let mut missing: Vec<String> =
                report.errors.iter().map(|e| e.source.clone()).collect();
            missing.sort();
            missing.dedup();
            *state = DegradedState::PartialData {
                reason: format!("Missing: {}", missing.join(", ")),
                missing,
            };
        } else {
            *state = DegradedState::Healthy;
        }
    }
}
