//! Integration tests for the wallet registry and store

use solscope_core::models::{TokenHolding, WalletAge, WalletStats};
use solscope_core::{
    render_resume_json, render_resume_text, DataEvent, RpcClient, RpcConfig, SortKey,
    WalletRegistry, WalletStore,
};
use tempfile::tempdir;

const ADDR_A: &str = "4Nd1mYQaz5Sk1CKQiJ1zCnyvABGt9DEqnkE2tQHgqGXE";
const ADDR_B: &str = "7xKXtg2CW87d97TXJSDpbD5jBkheTqA83TZRuJosgAsU";

fn new_store(dir: &std::path::Path) -> WalletStore {
    let client = RpcClient::new(RpcConfig::default()).unwrap();
    let registry = WalletRegistry::load(dir).unwrap();
    WalletStore::new(client, registry)
}

#[test]
fn test_registry_survives_restart() {
    let dir = tempdir().unwrap();

    {
        let registry = WalletRegistry::load(dir.path()).unwrap();
        registry.record(ADDR_A).unwrap();
        registry.record(ADDR_B).unwrap();
        registry.remove(ADDR_A).unwrap();
    }

    let reloaded = WalletRegistry::load(dir.path()).unwrap();
    assert_eq!(reloaded.addresses(), vec![ADDR_B]);
}

#[test]
fn test_registry_migrates_legacy_format_on_save() {
    let dir = tempdir().unwrap();
    std::fs::write(
        dir.path().join("wallets.json"),
        format!(r#"["{ADDR_A}"]"#),
    )
    .unwrap();

    let registry = WalletRegistry::load(dir.path()).unwrap();
    registry.record(ADDR_B).unwrap();

    // After a save the file holds full records
    let content = std::fs::read_to_string(dir.path().join("wallets.json")).unwrap();
    assert!(content.contains("first_seen"));

    let reloaded = WalletRegistry::load(dir.path()).unwrap();
    assert_eq!(reloaded.len(), 2);
}

#[tokio::test]
async fn test_store_sort_key_change_notifies() {
    let dir = tempdir().unwrap();
    let store = new_store(dir.path());
    let mut rx = store.event_bus().subscribe();

    store.set_sort_key(SortKey::Oldest);

    let event = rx.recv().await.unwrap();
    assert!(matches!(event, DataEvent::LeaderboardUpdated));
    assert_eq!(store.sort_key(), SortKey::Oldest);
}

#[tokio::test]
async fn test_store_rejects_invalid_address_without_registering() {
    let dir = tempdir().unwrap();
    let store = new_store(dir.path());

    assert!(store.analyze_wallet("too-short").await.is_err());
    assert!(store.registry().is_empty());
    assert!(store.stats("too-short").is_none());
}

#[test]
fn test_resume_formats_agree_on_score() {
    let mut stats = WalletStats::new(ADDR_A);
    stats.transaction_count = 10;
    stats.nft_count = 1;
    stats.age = WalletAge::Days(2);
    stats.tokens = vec![TokenHolding {
        mint: "m".into(),
        amount: 1.0,
        symbol: Some("SOL".into()),
    }];

    // 10 + 3 + 2 + 3 = 18
    let text = render_resume_text(&stats);
    assert!(text.contains("18.0"));

    let json: serde_json::Value =
        serde_json::from_str(&render_resume_json(&stats).unwrap()).unwrap();
    assert_eq!(json["score"], 18.0);
}
