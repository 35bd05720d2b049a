//! Wire types for the JSON-RPC and indexer responses
//!
//! Only the fields the analyzer reads are modeled; everything else is
//! ignored by serde.

use serde::Deserialize;
use serde_json::Value;

/// JSON-RPC 2.0 response envelope
#[derive(Debug, Deserialize)]
pub struct RpcResponse<T> {
    pub result: Option<T>,
    pub error: Option<RpcErrorObject>,
}

/// JSON-RPC error object
#[derive(Debug, Deserialize)]
pub struct RpcErrorObject {
    pub code: i64,
    pub message: String,
}

/// One entry from `getSignaturesForAddress`
///
/// The RPC returns newest first; the earliest signature is the last element.
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SignatureInfo {
    pub signature: String,
    #[serde(default)]
    pub slot: Option<u64>,
    #[serde(default)]
    pub block_time: Option<i64>,
    #[serde(default)]
    pub err: Option<Value>,
}

/// Slice of a `getTransaction` response, used to resolve a wallet's age
/// when the signature listing omits the block time.
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TransactionMeta {
    #[serde(default)]
    pub block_time: Option<i64>,
}

/// `getTokenAccountsByOwner` result: `{ context, value: [...] }`
#[derive(Debug, Deserialize)]
pub struct TokenAccountList {
    pub value: Vec<TokenAccountEntry>,
}

#[derive(Debug, Deserialize)]
pub struct TokenAccountEntry {
    pub pubkey: String,
    pub account: TokenAccountWrapper,
}

#[derive(Debug, Deserialize)]
pub struct TokenAccountWrapper {
    pub data: TokenAccountData,
}

#[derive(Debug, Deserialize)]
pub struct TokenAccountData {
    pub parsed: ParsedTokenData,
}

#[derive(Debug, Deserialize)]
pub struct ParsedTokenData {
    pub info: TokenAccountInfo,
}

/// jsonParsed SPL token account info
#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TokenAccountInfo {
    pub mint: String,
    pub token_amount: TokenAmount,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TokenAmount {
    #[serde(default)]
    pub ui_amount: Option<f64>,
}

impl TokenAccountEntry {
    /// Decimal-adjusted balance; missing uiAmount counts as zero.
    pub fn ui_amount(&self) -> f64 {
        self.account
            .data
            .parsed
            .info
            .token_amount
            .ui_amount
            .unwrap_or(0.0)
    }

    pub fn mint(&self) -> &str {
        &self.account.data.parsed.info.mint
    }
}

/// One entry from the indexer's token-metadata batch endpoint
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TokenMetadataEntry {
    pub account: String,
    #[serde(default)]
    pub on_chain_metadata: Option<OnChainMetadata>,
    #[serde(default)]
    pub legacy_metadata: Option<LegacyMetadata>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct OnChainMetadata {
    #[serde(default)]
    pub metadata: Option<MetadataBody>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct MetadataBody {
    #[serde(default)]
    pub data: Option<MetadataFields>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct MetadataFields {
    #[serde(default)]
    pub name: Option<String>,
    #[serde(default)]
    pub symbol: Option<String>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct LegacyMetadata {
    #[serde(default)]
    pub symbol: Option<String>,
}

impl TokenMetadataEntry {
    /// Symbol from on-chain metadata, falling back to the legacy registry.
    pub fn symbol(&self) -> Option<&str> {
        fn clean(s: &Option<String>) -> Option<&str> {
            s.as_deref()
                .map(|s| s.trim_end_matches('\0').trim())
                .filter(|s| !s.is_empty())
        }

        self.on_chain_metadata
            .as_ref()
            .and_then(|m| m.metadata.as_ref())
            .and_then(|m| m.data.as_ref())
            .and_then(|d| clean(&d.symbol))
            .or_else(|| self.legacy_metadata.as_ref().and_then(|l| clean(&l.symbol)))
    }
}

/// One enriched transaction from the indexer history endpoint
///
/// Program events carry the account keys each invoked program touched,
/// which is what the counterparty graph is built from.
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct EnrichedTransaction {
    #[serde(default)]
    pub signature: Option<String>,
    #[serde(default)]
    pub timestamp: Option<i64>,
    #[serde(default)]
    pub events: Option<TransactionEvents>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct TransactionEvents {
    #[serde(default)]
    pub programs: Option<Vec<ProgramEvent>>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct ProgramEvent {
    #[serde(default)]
    pub accounts: Vec<String>,
}

impl EnrichedTransaction {
    /// All account keys across program events, in order, duplicates kept.
    pub fn program_accounts(&self) -> Vec<&str> {
        self.events
            .as_ref()
            .and_then(|e| e.programs.as_ref())
            .map(|programs| {
                programs
                    .iter()
                    .flat_map(|p| p.accounts.iter().map(String::as_str))
                    .collect()
            })
            .unwrap_or_default()
    }
}

/// Count NFTs in an indexer response, which is either a bare array or an
/// object with an `nfts` array.
pub fn nft_count_from_value(value: &Value) -> u64 {
    match value {
        Value::Array(items) => items.len() as u64,
        Value::Object(map) => map
            .get("nfts")
            .and_then(Value::as_array)
            .map(|a| a.len() as u64)
            .unwrap_or(0),
        _ => 0,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_signature_list() {
        let json = r#"{
            "jsonrpc": "2.0",
            "id": 1,
            "result": [
                { "signature": "sig-newest", "slot": 200, "blockTime": 1700000600, "err": null },
                { "signature": "sig-oldest", "slot": 100, "blockTime": 1700000000, "err": null }
            ]
        }"#;

        let resp: RpcResponse<Vec<SignatureInfo>> = serde_json::from_str(json).unwrap();
        let sigs = resp.result.unwrap();
        assert_eq!(sigs.len(), 2);
        assert_eq!(sigs.last().unwrap().signature, "sig-oldest");
        assert_eq!(sigs.last().unwrap().block_time, Some(1_700_000_000));
    }

    #[test]
    fn test_parse_rpc_error() {
        let json = r#"{
            "jsonrpc": "2.0",
            "id": 1,
            "error": { "code": -32602, "message": "Invalid param" }
        }"#;

        let resp: RpcResponse<Vec<SignatureInfo>> = serde_json::from_str(json).unwrap();
        assert!(resp.result.is_none());
        assert_eq!(resp.error.unwrap().code, -32602);
    }

    #[test]
    fn test_parse_token_accounts() {
        let json = r#"{
            "context": { "slot": 1 },
            "value": [
                {
                    "pubkey": "acc-1",
                    "account": {
                        "data": {
                            "parsed": {
                                "info": {
                                    "mint": "mint-1",
                                    "tokenAmount": { "uiAmount": 12.5, "decimals": 6 }
                                },
                                "type": "account"
                            },
                            "program": "spl-token"
                        },
                        "lamports": 2039280
                    }
                },
                {
                    "pubkey": "acc-2",
                    "account": {
                        "data": {
                            "parsed": {
                                "info": {
                                    "mint": "mint-2",
                                    "tokenAmount": { "uiAmount": null, "decimals": 0 }
                                }
                            }
                        }
                    }
                }
            ]
        }"#;

        let list: TokenAccountList = serde_json::from_str(json).unwrap();
        assert_eq!(list.value.len(), 2);
        assert_eq!(list.value[0].mint(), "mint-1");
        assert!((list.value[0].ui_amount() - 12.5).abs() < f64::EPSILON);
        assert_eq!(list.value[1].ui_amount(), 0.0);
    }

    #[test]
    fn test_metadata_symbol_fallback() {
        let json = r#"[
            {
                "account": "mint-1",
                "onChainMetadata": {
                    "metadata": { "data": { "name": "USD Coin", "symbol": "USDC\u0000\u0000" } }
                }
            },
            {
                "account": "mint-2",
                "legacyMetadata": { "symbol": "BONK" }
            },
            {
                "account": "mint-3"
            }
        ]"#;

        let entries: Vec<TokenMetadataEntry> = serde_json::from_str(json).unwrap();
        assert_eq!(entries[0].symbol(), Some("USDC"));
        assert_eq!(entries[1].symbol(), Some("BONK"));
        assert_eq!(entries[2].symbol(), None);
    }

    #[test]
    fn test_enriched_transaction_accounts() {
        let json = r#"{
            "signature": "sig-1",
            "timestamp": 1700000000,
            "events": {
                "programs": [
                    { "accounts": ["wallet-a", "wallet-b"] },
                    { "accounts": ["wallet-a"] }
                ]
            }
        }"#;

        let tx: EnrichedTransaction = serde_json::from_str(json).unwrap();
        assert_eq!(
            tx.program_accounts(),
            vec!["wallet-a", "wallet-b", "wallet-a"]
        );
    }

    #[test]
    fn test_enriched_transaction_without_events() {
        let tx: EnrichedTransaction = serde_json::from_str(r#"{ "signature": "s" }"#).unwrap();
        assert!(tx.program_accounts().is_empty());
    }

    #[test]
    fn test_nft_count_shapes() {
        let array = serde_json::json!([{ "name": "a" }, { "name": "b" }]);
        assert_eq!(nft_count_from_value(&array), 2);

        let object = serde_json::json!({ "numberOfPages": 1, "nfts": [{ "name": "a" }] });
        assert_eq!(nft_count_from_value(&object), 1);

        assert_eq!(nft_count_from_value(&serde_json::json!(null)), 0);
    }
}
