//! HTTP client for the Solana JSON-RPC node and the indexer REST API

use crate::config::{RpcConfig, TOKEN_PROGRAM_ID};
use crate::error::CoreError;
use crate::rpc::types::{
    nft_count_from_value, EnrichedTransaction, RpcResponse, SignatureInfo, TokenAccountEntry,
    TokenAccountList, TokenMetadataEntry, TransactionMeta,
};
use serde::de::DeserializeOwned;
use serde_json::{json, Value};

/// Client over both backends: JSON-RPC node plus indexer REST
#[derive(Debug, Clone)]
pub struct RpcClient {
    http: reqwest::Client,
    config: RpcConfig,
}

/// Build a JSON-RPC 2.0 request body
fn rpc_body(method: &str, params: Value) -> Value {
    json!({
        "jsonrpc": "2.0",
        "id": 1,
        "method": method,
        "params": params,
    })
}

impl RpcClient {
    pub fn new(config: RpcConfig) -> Result<Self, CoreError> {
        let http = reqwest::Client::builder()
            .timeout(config.request_timeout())
            .build()
            .map_err(|source| CoreError::RpcTransport {
                method: "client-init".to_string(),
                source,
            })?;

        Ok(Self { http, config })
    }

    pub fn config(&self) -> &RpcConfig {
        &self.config
    }

    async fn rpc_call<T: DeserializeOwned>(
        &self,
        method: &str,
        params: Value,
    ) -> Result<T, CoreError> {
        tracing::debug!(method, rpc_url = %self.config.rpc_url, "RPC call");

        let response = self
            .http
            .post(&self.config.rpc_url)
            .json(&rpc_body(method, params))
            .send()
            .await
            .map_err(|source| CoreError::RpcTransport {
                method: method.to_string(),
                source,
            })?;

        let envelope: RpcResponse<T> =
            response
                .json()
                .await
                .map_err(|source| CoreError::RpcTransport {
                    method: method.to_string(),
                    source,
                })?;

        if let Some(err) = envelope.error {
            return Err(CoreError::RpcResponse {
                method: method.to_string(),
                code: err.code,
                message: err.message,
            });
        }

        envelope.result.ok_or_else(|| CoreError::Decode {
            what: method.to_string(),
            message: "response carried neither result nor error".to_string(),
        })
    }

    /// Fetch up to `signature_limit` signatures for a wallet, newest first.
    pub async fn get_signatures(&self, address: &str) -> Result<Vec<SignatureInfo>, CoreError> {
        self.rpc_call(
            "getSignaturesForAddress",
            json!([address, { "limit": self.config.signature_limit }]),
        )
        .await
    }

    /// Fetch one transaction by signature, for its block time.
    pub async fn get_transaction(&self, signature: &str) -> Result<TransactionMeta, CoreError> {
        self.rpc_call(
            "getTransaction",
            json!([signature, { "maxSupportedTransactionVersion": 0 }]),
        )
        .await
    }

    /// Fetch jsonParsed SPL token accounts owned by a wallet.
    pub async fn get_token_accounts(
        &self,
        address: &str,
    ) -> Result<Vec<TokenAccountEntry>, CoreError> {
        let list: TokenAccountList = self
            .rpc_call(
                "getTokenAccountsByOwner",
                json!([
                    address,
                    { "programId": TOKEN_PROGRAM_ID },
                    { "encoding": "jsonParsed" }
                ]),
            )
            .await?;

        Ok(list.value)
    }

    fn api_key(&self) -> Result<&str, CoreError> {
        self.config
            .api_key
            .as_deref()
            .ok_or(CoreError::MissingApiKey)
    }

    async fn check_status(
        &self,
        endpoint: &str,
        response: reqwest::Response,
    ) -> Result<reqwest::Response, CoreError> {
        if !response.status().is_success() {
            return Err(CoreError::IndexerStatus {
                endpoint: endpoint.to_string(),
                status: response.status().as_u16(),
            });
        }
        Ok(response)
    }

    /// Batch-resolve token metadata (symbols) for a set of mints.
    pub async fn get_token_metadata(
        &self,
        mints: &[String],
    ) -> Result<Vec<TokenMetadataEntry>, CoreError> {
        if mints.is_empty() {
            return Ok(Vec::new());
        }

        let key = self.api_key()?;
        let url = format!("{}/token-metadata", self.config.indexer_url);
        tracing::debug!(mints = mints.len(), "Fetching token metadata");

        let response = self
            .http
            .post(&url)
            .query(&[("api-key", key)])
            .json(&json!({ "mintAccounts": mints }))
            .send()
            .await
            .map_err(|source| CoreError::RpcTransport {
                method: "token-metadata".to_string(),
                source,
            })?;

        let response = self.check_status("token-metadata", response).await?;
        response
            .json()
            .await
            .map_err(|source| CoreError::RpcTransport {
                method: "token-metadata".to_string(),
                source,
            })
    }

    /// Count NFTs held by a wallet via the indexer.
    pub async fn get_nft_count(&self, address: &str) -> Result<u64, CoreError> {
        let key = self.api_key()?;
        let url = format!("{}/addresses/{}/nfts", self.config.indexer_url, address);

        let response = self
            .http
            .get(&url)
            .query(&[("api-key", key)])
            .send()
            .await
            .map_err(|source| CoreError::RpcTransport {
                method: "nfts".to_string(),
                source,
            })?;

        let response = self.check_status("nfts", response).await?;
        let value: Value = response
            .json()
            .await
            .map_err(|source| CoreError::RpcTransport {
                method: "nfts".to_string(),
                source,
            })?;

        Ok(nft_count_from_value(&value))
    }

    /// Fetch enriched transaction history for the counterparty graph.
    pub async fn get_enriched_transactions(
        &self,
        address: &str,
    ) -> Result<Vec<EnrichedTransaction>, CoreError> {
        let key = self.api_key()?;
        let url = format!(
            "{}/addresses/{}/transactions",
            self.config.indexer_url, address
        );

        let response = self
            .http
            .get(&url)
            .query(&[
                ("api-key", key),
                ("limit", &self.config.graph_tx_limit.to_string()),
            ])
            .send()
            .await
            .map_err(|source| CoreError::RpcTransport {
                method: "transactions".to_string(),
                source,
            })?;

        let response = self.check_status("transactions", response).await?;
        response
            .json()
            .await
            .map_err(|source| CoreError::RpcTransport {
                method: "transactions".to_string(),
                source,
            })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_rpc_body_shape() {
        let body = rpc_body("getSignaturesForAddress", json!(["wallet", { "limit": 1000 }]));
        assert_eq!(body["jsonrpc"], "2.0");
        assert_eq!(body["method"], "getSignaturesForAddress");
        assert_eq!(body["params"][1]["limit"], 1000);
    }

    #[test]
    fn test_missing_api_key_errors() {
        let client = RpcClient::new(RpcConfig::default()).unwrap();
        assert!(matches!(client.api_key(), Err(CoreError::MissingApiKey)));
    }

    #[test]
    fn test_api_key_present() {
        let config = RpcConfig {
            api_key: Some("k".to_string()),
            ..Default::default()
        };
        let client = RpcClient::new(config).unwrap();
        assert_eq!(client.api_key().unwrap(), "k");
    }
}
