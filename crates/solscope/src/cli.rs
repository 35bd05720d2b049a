//! CLI output formatting
//!
//! Table and JSON renderers for the analyze, leaderboard, graph and wallets
//! subcommands.

use comfy_table::{Cell, Color, ContentArrangement, Row, Table};
use solscope_core::graph::CounterpartyGraph;
use solscope_core::models::shorten_address;
use solscope_core::registry::WalletRecord;
use solscope_core::{FetchReport, LeaderboardEntry, WalletStats};

/// Format wallet stats as a two-column table or JSON.
pub fn format_stats(stats: &WalletStats, json: bool) -> String {
    if json {
        return solscope_core::render_resume_json(stats)
            .unwrap_or_else(|e| format!("{{\"error\": \"{}\"}}", e));
    }

    let mut table = Table::new();
    table.set_content_arrangement(ContentArrangement::Dynamic);
    table.set_header(Row::from(vec![
        Cell::new("Wallet").fg(Color::Cyan),
        Cell::new(&stats.address).fg(Color::White),
    ]));

    table.add_row(vec![
        Cell::new("Transactions"),
        Cell::new(stats.transaction_count.to_string()),
    ]);
    table.add_row(vec![Cell::new("Wallet age"), Cell::new(stats.age.to_string())]);
    table.add_row(vec![Cell::new("Tokens"), Cell::new(stats.tokens_display())]);
    table.add_row(vec![Cell::new("NFTs"), Cell::new(stats.nft_count.to_string())]);
    table.add_row(vec![
        Cell::new("Score"),
        Cell::new(format!("{:.1}", stats.score())).fg(Color::Magenta),
    ]);

    table.to_string()
}

/// Format the ranked leaderboard as a table or JSON.
pub fn format_leaderboard(entries: &[LeaderboardEntry], json: bool) -> String {
    if json {
        return serde_json::to_string_pretty(entries)
            .unwrap_or_else(|e| format!("{{\"error\": \"{}\"}}", e));
    }

    let mut table = Table::new();
    table.set_content_arrangement(ContentArrangement::Dynamic);
    table.set_header(Row::from(vec![
        Cell::new("#").fg(Color::Cyan),
        Cell::new("Wallet").fg(Color::Cyan),
        Cell::new("Txs").fg(Color::Cyan),
        Cell::new("Tokens").fg(Color::Cyan),
        Cell::new("NFTs").fg(Color::Cyan),
        Cell::new("Age (days)").fg(Color::Cyan),
        Cell::new("Score").fg(Color::Cyan),
    ]));

    for entry in entries {
        table.add_row(vec![
            Cell::new(entry.rank.to_string()),
            Cell::new(shorten_address(&entry.wallet)),
            Cell::new(entry.txs.to_string()),
            Cell::new(entry.tokens.to_string()),
            Cell::new(entry.nfts.to_string()),
            Cell::new(entry.age_days.to_string()),
            Cell::new(format!("{:.1}", entry.score)).fg(Color::Magenta),
        ]);
    }

    table.to_string()
}

/// Format the top counterparties of a graph as a table or JSON.
pub fn format_graph(graph: &CounterpartyGraph, top: usize, json: bool) -> String {
    if json {
        let value = serde_json::json!({
            "wallet": graph.center(),
            "counterparties": graph
                .top(top)
                .iter()
                .map(|n| serde_json::json!({
                    "address": n.address,
                    "frequency": n.frequency,
                }))
                .collect::<Vec<_>>(),
            "total_interactions": graph.total_interactions(),
        });
        return serde_json::to_string_pretty(&value)
            .unwrap_or_else(|e| format!("{{\"error\": \"{}\"}}", e));
    }

    let mut table = Table::new();
    table.set_content_arrangement(ContentArrangement::Dynamic);
    table.set_header(Row::from(vec![
        Cell::new("Counterparty").fg(Color::Cyan),
        Cell::new("Interactions").fg(Color::Cyan),
    ]));

    for node in graph.top(top) {
        table.add_row(vec![
            Cell::new(&node.address),
            Cell::new(node.frequency.to_string()),
        ]);
    }

    table.to_string()
}

/// Format registered wallets as a table or JSON.
pub fn format_wallets(records: &[WalletRecord], json: bool) -> String {
    if json {
        return serde_json::to_string_pretty(records)
            .unwrap_or_else(|e| format!("{{\"error\": \"{}\"}}", e));
    }

    let mut table = Table::new();
    table.set_content_arrangement(ContentArrangement::Dynamic);
    table.set_header(Row::from(vec![
        Cell::new("Wallet").fg(Color::Cyan),
        Cell::new("First seen").fg(Color::Cyan),
    ]));

    for record in records {
        table.add_row(vec![
            Cell::new(&record.address),
            Cell::new(record.first_seen.format("%Y-%m-%d %H:%M").to_string()),
        ]);
    }

    table.to_string()
}

/// Print fetch warnings to stderr, one line each.
pub fn print_warnings(report: &FetchReport) {
    for error in &report.errors {
        eprintln!("warning: {}: {}", error.source, error.message);
        if let Some(suggestion) = &error.suggestion {
            eprintln!("  hint: {}", suggestion);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use solscope_core::models::{TokenHolding, WalletAge};
    use solscope_core::rpc::EnrichedTransaction;

    const ADDR: &str = "4Nd1mYQaz5Sk1CKQiJ1zCnyvABGt9DEqnkE2tQHgqGXE";

    fn sample_stats() -> WalletStats {
        let mut stats = WalletStats::new(ADDR);
        stats.transaction_count = 42;
        stats.age = WalletAge::Days(10);
        stats.tokens = vec![TokenHolding {
            mint: "m".into(),
            amount: 1.0,
            symbol: Some("USDC".into()),
        }];
        stats.nft_count = 3;
        stats
    }

    #[test]
    fn test_stats_table_contains_fields() {
        let out = format_stats(&sample_stats(), false);
        assert!(out.contains("Transactions"));
        assert!(out.contains("42"));
        assert!(out.contains("USDC"));
    }

    #[test]
    fn test_stats_json_parses() {
        let out = format_stats(&sample_stats(), true);
        let value: serde_json::Value = serde_json::from_str(&out).unwrap();
        assert_eq!(value["nfts"], 3);
    }

    #[test]
    fn test_leaderboard_table_shortens_addresses() {
        let entry = LeaderboardEntry {
            rank: 1,
            wallet: ADDR.to_string(),
            txs: 5,
            tokens: 0,
            nfts: 0,
            age_days: 0,
            score: 5.0,
        };
        let out = format_leaderboard(&[entry], false);
        assert!(out.contains("4Nd1...qGXE"));
        assert!(!out.contains(ADDR));
    }

    #[test]
    fn test_graph_json_shape() {
        let tx: EnrichedTransaction = serde_json::from_value(serde_json::json!({
            "events": { "programs": [{ "accounts": ["other-wallet"] }] }
        }))
        .unwrap();
        let graph = CounterpartyGraph::build(ADDR, &[tx]);

        let out = format_graph(&graph, 10, true);
        let value: serde_json::Value = serde_json::from_str(&out).unwrap();
        assert_eq!(value["counterparties"][0]["frequency"], 1);
        assert_eq!(value["total_interactions"], 1);
    }
}
