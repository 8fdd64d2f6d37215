//! Shared HTTP plumbing for provider clients

use reqwest::{Client, Response};
use serde::de::DeserializeOwned;
use std::time::Duration;

use crate::error::{Error, Result};

/// Build the HTTP client used by every provider
pub fn build_client(timeout: Duration) -> Result<Client> {
    Client::builder()
        .timeout(timeout)
        .build()
        .map_err(|e| Error::Http(format!("Failed to create HTTP client: {}", e)))
}

/// Check the status of a provider response and decode its JSON body
pub async fn read_json<T: DeserializeOwned>(response: Response, provider: &'static str) -> Result<T> {
    if !response.status().is_success() {
        let status = response.status().as_u16();
        let body = response.text().await.unwrap_or_default();
        return Err(Error::HttpStatus {
            provider,
            status,
            body,
        });
    }

    response
        .json()
        .await
        .map_err(|e| Error::Deserialization(format!("Failed to parse {} response: {}", provider, e.without_url())))
}

/// Mask URL for display (hide API keys in query params and path segments)
pub fn mask_url(url: &str) -> String {
    let base = match url.find('?') {
        Some(idx) => format!("{}?***", &url[..idx]),
        None => url.to_string(),
    };
    // Alchemy puts the key in the path: /v2/<key>
    match base.find("/v2/") {
        Some(idx) => {
            let rest = &base[idx + 4..];
            let tail = rest.find('/').map(|i| &rest[i..]).unwrap_or("");
            format!("{}/v2/***{}", &base[..idx], tail)
        }
        None => base,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_mask_url() {
        assert_eq!(
            mask_url("https://mainnet.helius-rpc.com/?api-key=secret"),
            "https://mainnet.helius-rpc.com/?***"
        );
        assert_eq!(
            mask_url("https://eth-mainnet.g.alchemy.com/v2/secret/getOwnersForCollection"),
            "https://eth-mainnet.g.alchemy.com/v2/***/getOwnersForCollection"
        );
        assert_eq!(mask_url("https://api.clusters.xyz"), "https://api.clusters.xyz");
    }
}
