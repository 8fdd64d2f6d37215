//! Helius DAS client for Solana collection assets

use async_trait::async_trait;
use reqwest::Client;
use serde::Deserialize;
use std::time::Duration;
use tracing::debug;
use url::Url;

use super::{AssetOwnership, AssetPager};
use crate::error::{Error, Result};
use crate::http::{build_client, read_json};

const PROVIDER: &str = "Helius";

/// Helius RPC client
pub struct HeliusClient {
    /// HTTP client
    client: Client,
    /// RPC URL including the api-key query parameter
    rpc_url: Url,
}

impl HeliusClient {
    /// Create a new Helius client
    pub fn new(rpc_url: &str, api_key: &str, timeout: Duration) -> Result<Self> {
        let mut rpc_url = Url::parse(rpc_url)
            .map_err(|e| Error::Config(format!("Invalid Helius RPC URL: {}", e)))?;
        rpc_url.query_pairs_mut().append_pair("api-key", api_key);

        Ok(Self {
            client: build_client(timeout)?,
            rpc_url,
        })
    }
}

#[async_trait]
impl AssetPager for HeliusClient {
    async fn assets_page(&self, collection: &str, page: u32, limit: u32) -> Result<Vec<AssetOwnership>> {
        let request = serde_json::json!({
            "jsonrpc": "2.0",
            "id": "cluster-snapshot",
            "method": "getAssetsByGroup",
            "params": {
                "groupKey": "collection",
                "groupValue": collection,
                "page": page,
                "limit": limit
            }
        });

        debug!("Fetching asset page {} for {}", page, collection);

        let response = self
            .client
            .post(self.rpc_url.clone())
            .json(&request)
            .send()
            .await?;

        let rpc_response: HeliusRpcResponse<AssetList> = read_json(response, PROVIDER).await?;

        if let Some(error) = rpc_response.error {
            return Err(Error::ProviderRpc {
                provider: PROVIDER,
                message: error.message,
            });
        }

        let result = rpc_response
            .result
            .ok_or_else(|| Error::Deserialization("No result in Helius RPC response".to_string()))?;

        Ok(result
            .items
            .into_iter()
            .map(|asset| AssetOwnership {
                asset_id: asset.id,
                owner: asset.ownership.owner,
            })
            .collect())
    }
}

// ============ Helius API Response Types ============

#[allow(dead_code)]
#[derive(Debug, Deserialize)]
struct HeliusRpcResponse<T> {
    jsonrpc: String,
    result: Option<T>,
    error: Option<RpcError>,
}

#[allow(dead_code)]
#[derive(Debug, Deserialize)]
struct RpcError {
    code: i32,
    message: String,
}

#[derive(Debug, Deserialize)]
struct AssetList {
    items: Vec<Asset>,
}

#[derive(Debug, Deserialize)]
struct Asset {
    id: String,
    ownership: Ownership,
}

#[derive(Debug, Deserialize)]
struct Ownership {
    owner: String,
}
