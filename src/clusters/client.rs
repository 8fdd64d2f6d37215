//! HTTP client for the clusters API

use async_trait::async_trait;
use reqwest::Client;
use std::time::Duration;
use tracing::debug;

use super::{ClusterApi, ClusterRecord, NameLookup};
use crate::error::Result;
use crate::http::{build_client, read_json};

const PROVIDER: &str = "Clusters";

/// Clusters API client
pub struct ClustersClient {
    /// HTTP client
    client: Client,
    /// Base URL, e.g. `https://api.clusters.xyz`
    base_url: String,
}

impl ClustersClient {
    /// Create a new clusters client
    pub fn new(base_url: &str, timeout: Duration) -> Result<Self> {
        Ok(Self {
            client: build_client(timeout)?,
            base_url: base_url.trim_end_matches('/').to_string(),
        })
    }
}

#[async_trait]
impl ClusterApi for ClustersClient {
    async fn lookup_names(&self, addresses: &[String]) -> Result<Vec<NameLookup>> {
        let url = format!("{}/v0.1/name/addresses", self.base_url);
        debug!("Looking up cluster names for {} addresses", addresses.len());

        let response = self.client.post(&url).json(addresses).send().await?;
        read_json(response, PROVIDER).await
    }

    async fn cluster_wallets(&self, keys: &[String]) -> Result<Vec<ClusterRecord>> {
        let url = format!("{}/v0.1/cluster/names", self.base_url);
        debug!("Fetching wallets for {} clusters", keys.len());

        let response = self.client.post(&url).json(keys).send().await?;
        read_json(response, PROVIDER).await
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::Error;
    use serde_json::json;
    use wiremock::matchers::{body_json, method, path};
    use wiremock::{Mock, MockServer, ResponseTemplate};

    fn client(server: &MockServer) -> ClustersClient {
        ClustersClient::new(&server.uri(), Duration::from_secs(5)).unwrap()
    }

    #[tokio::test]
    async fn test_lookup_names_posts_address_list() {
        let server = MockServer::start().await;
        Mock::given(method("POST"))
            .and(path("/v0.1/name/addresses"))
            .and(body_json(json!(["0xa", "0xb"])))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!([
                {"address": "0xa", "name": "alice/main"},
                {"address": "0xb", "name": null}
            ])))
            .expect(1)
            .mount(&server)
            .await;

        let names = client(&server)
            .lookup_names(&["0xa".to_string(), "0xb".to_string()])
            .await
            .unwrap();

        assert_eq!(names.len(), 2);
        assert_eq!(names[0].name.as_deref(), Some("alice/main"));
        assert!(names[1].name.is_none());
    }

    #[tokio::test]
    async fn test_cluster_wallets_posts_keys() {
        let server = MockServer::start().await;
        Mock::given(method("POST"))
            .and(path("/v0.1/cluster/names"))
            .and(body_json(json!(["alice/"])))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!([
                {"name": "alice/", "wallets": [
                    {"type": "evm", "address": "0x1"},
                    {"type": "solana", "address": "So1"}
                ]}
            ])))
            .mount(&server)
            .await;

        let records = client(&server)
            .cluster_wallets(&["alice/".to_string()])
            .await
            .unwrap();

        assert_eq!(records.len(), 1);
        assert_eq!(records[0].name, "alice/");
        assert_eq!(records[0].wallets.len(), 2);
    }

    #[tokio::test]
    async fn test_error_status_is_reported() {
        let server = MockServer::start().await;
        Mock::given(method("POST"))
            .respond_with(ResponseTemplate::new(503).set_body_string("down"))
            .mount(&server)
            .await;

        let err = client(&server)
            .lookup_names(&["0xa".to_string()])
            .await
            .unwrap_err();

        assert!(matches!(err, Error::HttpStatus { status: 503, .. }));
        assert!(err.is_recoverable());
    }

    #[tokio::test]
    async fn test_malformed_body_is_reported() {
        let server = MockServer::start().await;
        Mock::given(method("POST"))
            .respond_with(ResponseTemplate::new(200).set_body_string("not json"))
            .mount(&server)
            .await;

        let err = client(&server)
            .cluster_wallets(&["alice/".to_string()])
            .await
            .unwrap_err();

        assert!(matches!(err, Error::Deserialization(_)));
    }
}
