//! Alchemy NFT API client for EVM collection owners

use async_trait::async_trait;
use reqwest::Client;
use serde::Deserialize;
use std::time::Duration;
use tracing::debug;
use url::Url;

use super::OwnershipApi;
use crate::error::{Error, Result};
use crate::http::{build_client, mask_url, read_json};

const PROVIDER: &str = "Alchemy";

/// Alchemy client bound to one network
pub struct AlchemyClient {
    /// HTTP client
    client: Client,
    /// `https://<network>.g.alchemy.com/v2/<key>`
    base_url: String,
}

impl AlchemyClient {
    /// Create a client for a network slug such as `eth-mainnet`.
    ///
    /// `endpoint_template` may contain a `{network}` placeholder.
    pub fn new(endpoint_template: &str, network: &str, api_key: &str, timeout: Duration) -> Result<Self> {
        let endpoint = endpoint_template
            .replace("{network}", network)
            .trim_end_matches('/')
            .to_string();
        Url::parse(&endpoint).map_err(|e| Error::Config(format!("Invalid Alchemy endpoint: {}", e)))?;

        Ok(Self {
            client: build_client(timeout)?,
            base_url: format!("{}/v2/{}", endpoint, api_key),
        })
    }

    fn owners_url(&self, contract: &str) -> Result<Url> {
        let mut url = Url::parse(&format!("{}/getOwnersForCollection", self.base_url))
            .map_err(|e| Error::Config(format!("Invalid Alchemy endpoint: {}", e)))?;
        url.query_pairs_mut().append_pair("contractAddress", contract);
        Ok(url)
    }
}

#[derive(Debug, Deserialize)]
struct OwnersForCollectionResponse {
    #[serde(rename = "ownerAddresses")]
    owner_addresses: Option<Vec<String>>,
}

#[async_trait]
impl OwnershipApi for AlchemyClient {
    async fn owners_for_collection(&self, contract: &str) -> Result<Option<Vec<String>>> {
        let url = self.owners_url(contract)?;
        debug!("Fetching collection owners from {}", mask_url(url.as_str()));

        let response = self
            .client
            .get(url)
            .header("accept", "application/json")
            .send()
            .await?;

        let body: OwnersForCollectionResponse = read_json(response, PROVIDER).await?;
        Ok(body.owner_addresses)
    }
}
