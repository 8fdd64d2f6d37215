//! Clusters identity service
//!
//! Two endpoints are used: a name lookup that maps raw addresses to cluster
//! identifiers, and a wallet listing that returns every wallet of a cluster.

use async_trait::async_trait;

use crate::error::Result;

pub mod client;
pub mod types;

pub use client::ClustersClient;
pub use types::{cluster_key, ClusterRecord, ClusterWallet, NameLookup};

/// Seam over the clusters service, one batched call per operation
#[async_trait]
pub trait ClusterApi: Send + Sync {
    /// Look up the cluster identifier of every address in one request
    async fn lookup_names(&self, addresses: &[String]) -> Result<Vec<NameLookup>>;

    /// Fetch the wallets of every cluster key in one request
    async fn cluster_wallets(&self, keys: &[String]) -> Result<Vec<ClusterRecord>>;
}

/// In-memory clusters service for stage tests
#[cfg(test)]
pub(crate) mod testing {
    use super::*;
    use crate::error::Error;
    use std::collections::HashMap;
    use std::sync::Mutex;

    #[derive(Default)]
    pub struct FakeClusters {
        /// address -> cluster identifier
        pub names: HashMap<String, String>,
        /// cluster key -> wallets
        pub wallets: HashMap<String, Vec<ClusterWallet>>,
        pub fail_lookup: bool,
        pub fail_wallets: bool,
        pub lookup_requests: Mutex<Vec<Vec<String>>>,
        pub wallet_requests: Mutex<Vec<Vec<String>>>,
    }

    impl FakeClusters {
        pub fn with_name(mut self, address: &str, identifier: &str) -> Self {
            self.names.insert(address.to_string(), identifier.to_string());
            self
        }

        pub fn with_wallet(mut self, key: &str, wallet_type: &str, address: &str) -> Self {
            self.wallets.entry(key.to_string()).or_default().push(ClusterWallet {
                wallet_type: wallet_type.to_string(),
                address: address.to_string(),
            });
            self
        }
    }

    #[async_trait]
    impl ClusterApi for FakeClusters {
        async fn lookup_names(&self, addresses: &[String]) -> Result<Vec<NameLookup>> {
            self.lookup_requests.lock().unwrap().push(addresses.to_vec());
            if self.fail_lookup {
                return Err(Error::Http("lookup unavailable".to_string()));
            }
            Ok(addresses
                .iter()
                .map(|a| NameLookup {
                    address: a.clone(),
                    name: self.names.get(a).cloned(),
                })
                .collect())
        }

        async fn cluster_wallets(&self, keys: &[String]) -> Result<Vec<ClusterRecord>> {
            self.wallet_requests.lock().unwrap().push(keys.to_vec());
            if self.fail_wallets {
                return Err(Error::Deserialization("unexpected body".to_string()));
            }
            Ok(keys
                .iter()
                .map(|k| ClusterRecord {
                    name: k.clone(),
                    wallets: self.wallets.get(k).cloned().unwrap_or_default(),
                })
                .collect())
        }
    }
}
