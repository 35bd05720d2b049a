//! Resume rendering
//!
//! The "resume" is a shareable summary card for one wallet. Three formats:
//! plain text for terminals, JSON for piping, and a standalone SVG card.

use crate::error::CoreError;
use crate::models::{shorten_address, WalletStats};
use std::path::Path;

/// Render the resume as plain text.
pub fn render_resume_text(stats: &WalletStats) -> String {
    let mut out = String::new();
    out.push_str("Solana Wallet Resume\n");
    out.push_str("====================\n");
    out.push_str(&format!("Wallet:       {}\n", shorten_address(&stats.address)));
    out.push_str(&format!("Transactions: {}\n", stats.transaction_count));
    out.push_str(&format!("Wallet age:   {}\n", stats.age));
    out.push_str(&format!("Tokens:       {}\n", stats.tokens_display()));
    out.push_str(&format!("NFTs:         {}\n", stats.nft_count));
    out.push_str(&format!("Score:        {:.1}\n", stats.score()));
    out
}

/// Render the resume as pretty JSON, score included.
pub fn render_resume_json(stats: &WalletStats) -> Result<String, CoreError> {
    let value = serde_json::json!({
        "address": stats.address,
        "transactions": stats.transaction_count,
        "age": stats.age.to_string(),
        "age_days": stats.age.days(),
        "tokens": stats.tokens,
        "token_count": stats.token_count(),
        "nfts": stats.nft_count,
        "score": stats.score(),
        "fetched_at": stats.fetched_at,
    });

    serde_json::to_string_pretty(&value).map_err(|e| CoreError::Decode {
        what: "resume".to_string(),
        message: e.to_string(),
    })
}

/// Render the resume as a standalone SVG card.
pub fn render_resume_svg(stats: &WalletStats) -> String {
    let rows = [
        ("Transactions", stats.transaction_count.to_string()),
        ("Wallet age", stats.age.to_string()),
        ("Tokens", stats.tokens_display()),
        ("NFTs", stats.nft_count.to_string()),
        ("Score", format!("{:.1}", stats.score())),
    ];

    let mut svg = String::from(
        r##"<svg xmlns="http://www.w3.org/2000/svg" width="520" height="300" viewBox="0 0 520 300">
  <rect width="520" height="300" rx="16" fill="#14141f"/>
  <text x="32" y="52" fill="#9945ff" font-family="monospace" font-size="22" font-weight="bold">Solana Wallet Resume</text>
"##,
    );

    svg.push_str(&format!(
        "  <text x=\"32\" y=\"84\" fill=\"#14f195\" font-family=\"monospace\" font-size=\"16\">{}</text>\n",
        xml_escape(&shorten_address(&stats.address))
    ));

    let mut y = 128;
    for (label, value) in rows {
        svg.push_str(&format!(
            "  <text x=\"32\" y=\"{y}\" fill=\"#8888aa\" font-family=\"monospace\" font-size=\"15\">{label}</text>\n"
        ));
        svg.push_str(&format!(
            "  <text x=\"200\" y=\"{y}\" fill=\"#ffffff\" font-family=\"monospace\" font-size=\"15\">{}</text>\n",
            xml_escape(&value)
        ));
        y += 32;
    }

    svg.push_str("</svg>\n");
    svg
}

/// Write rendered resume content to a file.
pub fn write_resume(path: &Path, content: &str) -> Result<(), CoreError> {
    std::fs::write(path, content).map_err(|source| CoreError::FileWrite {
        path: path.to_path_buf(),
        source,
    })
}

fn xml_escape(s: &str) -> String {
    s.replace('&', "&amp;").replace('<', "&lt;").replace('>', "&gt;")
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::{TokenHolding, WalletAge};

    fn sample() -> WalletStats {
        let mut stats = WalletStats::new("4Nd1mYQaz5Sk1CKQiJ1zCnyvABGt9DEqnkE2tQHgqGXE");
        stats.transaction_count = 42;
        stats.age = WalletAge::Days(100);
        stats.tokens = vec![TokenHolding {
            mint: "m1".into(),
            amount: 5.0,
            symbol: Some("USDC".into()),
        }];
        stats.nft_count = 2;
        stats
    }

    #[test]
    fn test_text_resume() {
        let text = render_resume_text(&sample());
        assert!(text.contains("4Nd1...qGXE"));
        assert!(text.contains("Transactions: 42"));
        assert!(text.contains("100 days"));
        assert!(text.contains("USDC"));
        // 42 + 3 + 4 + 150 = 199
        assert!(text.contains("Score:        199.0"));
    }

    #[test]
    fn test_json_resume() {
        let json = render_resume_json(&sample()).unwrap();
        let value: serde_json::Value = serde_json::from_str(&json).unwrap();
        assert_eq!(value["transactions"], 42);
        assert_eq!(value["age_days"], 100);
        assert_eq!(value["score"], 199.0);
    }

    #[test]
    fn test_svg_resume_is_wellformed_enough() {
        let svg = render_resume_svg(&sample());
        assert!(svg.starts_with("<svg"));
        assert!(svg.ends_with("</svg>\n"));
        assert!(svg.contains("Solana Wallet Resume"));
        assert!(svg.contains("USDC"));
    }

    #[test]
    fn test_svg_escapes_symbols() {
        let mut stats = sample();
        stats.tokens[0].symbol = Some("A<B&C".into());
        let svg = render_resume_svg(&stats);
        assert!(svg.contains("A&lt;B&amp;C"));
        assert!(!svg.contains("A<B"));
    }

    #[test]
    fn test_write_resume() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("resume.txt");
        write_resume(&path, "hello").unwrap();
        assert_eq!(std::fs::read_to_string(path).unwrap(), "hello");
    }
}
