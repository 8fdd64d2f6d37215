//! Clusters API data types

use serde::{Deserialize, Serialize};

/// One entry of a name lookup response
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct NameLookup {
    pub address: String,
    pub name: Option<String>,
}

/// A wallet registered to a cluster
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ClusterWallet {
    /// Chain/address-format tag, e.g. `evm` or `bitcoin-p2tr`
    #[serde(rename = "type")]
    pub wallet_type: String,
    pub address: String,
}

/// A resolved cluster and its wallets
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ClusterRecord {
    pub name: String,
    #[serde(default)]
    pub wallets: Vec<ClusterWallet>,
}

/// Normalize a cluster identifier to its join key.
///
/// `alice/primary` and `alice/secondary` both become `alice/`. An identifier
/// without a member suffix gets the separator appended.
pub fn cluster_key(identifier: &str) -> String {
    match identifier.find('/') {
        Some(idx) => identifier[..=idx].to_string(),
        None => format!("{}/", identifier),
    }
}
