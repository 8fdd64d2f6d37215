//! Holder discovery
//!
//! Produces the deduplicated, order-stable list of holder addresses for a
//! run, either from a caller-supplied list or from a chain provider:
//! - EVM collections: one Alchemy ownership request
//! - Solana collections: a sequential Helius asset-group page walk

use async_trait::async_trait;
use indexmap::IndexSet;
use std::fmt;
use tracing::{debug, info};

use crate::chain::{Chain, ChainFamily};
use crate::config::Config;
use crate::error::Result;

pub mod alchemy;
pub mod helius;
pub mod manual;

pub use alchemy::AlchemyClient;
pub use helius::HeliusClient;
pub use manual::{parse_address_list, read_address_list};

/// Fixed page size for asset-group pagination
pub const ASSET_PAGE_LIMIT: u32 = 1000;

/// One asset of a collection and its current owner
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AssetOwnership {
    pub asset_id: String,
    pub owner: String,
}

/// Collection-ownership provider for EVM chains
#[async_trait]
pub trait OwnershipApi: Send + Sync {
    /// Owner list of a collection, `None` when the response carries no owner field
    async fn owners_for_collection(&self, contract: &str) -> Result<Option<Vec<String>>>;
}

/// Paginated asset-group provider for account-model chains
#[async_trait]
pub trait AssetPager: Send + Sync {
    /// Fetch one page (1-based) of a collection's assets
    async fn assets_page(&self, collection: &str, page: u32, limit: u32) -> Result<Vec<AssetOwnership>>;
}

/// Where a run's holders come from
#[derive(Clone, PartialEq, Eq)]
pub enum SourceSpec {
    /// Caller-supplied addresses, already split and trimmed
    Manual(Vec<String>),
    /// Snapshot of a collection on a supported chain
    Collection {
        chain: &'static Chain,
        contract: String,
        api_key: String,
    },
}

// api_key stays out of debug output
impl fmt::Debug for SourceSpec {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            SourceSpec::Manual(addresses) => f.debug_tuple("Manual").field(addresses).finish(),
            SourceSpec::Collection {
                chain,
                contract,
                api_key,
            } => f
                .debug_struct("Collection")
                .field("chain", &chain.slug)
                .field("contract", contract)
                .field("api_key", &if api_key.is_empty() { "(not set)" } else { "***" })
                .finish(),
        }
    }
}

impl SourceSpec {
    pub fn describe(&self) -> String {
        match self {
            SourceSpec::Manual(addresses) => format!("manual list ({} addresses)", addresses.len()),
            SourceSpec::Collection { chain, contract, .. } => {
                format!("collection {} on {}", contract, chain)
            }
        }
    }
}

/// A ready-to-query holder source
pub enum HolderSource {
    Manual(Vec<String>),
    Evm {
        api: Box<dyn OwnershipApi>,
        contract: String,
    },
    AssetGroup {
        pager: Box<dyn AssetPager>,
        collection: String,
    },
}

impl HolderSource {
    /// Build the provider client a source spec needs
    pub fn from_spec(spec: &SourceSpec, config: &Config) -> Result<Self> {
        let timeout = config.http.timeout();
        Ok(match spec {
            SourceSpec::Manual(addresses) => HolderSource::Manual(addresses.clone()),
            SourceSpec::Collection {
                chain,
                contract,
                api_key,
            } => match chain.family {
                ChainFamily::Evm => HolderSource::Evm {
                    api: Box::new(AlchemyClient::new(
                        &config.alchemy.endpoint_template,
                        chain.slug,
                        api_key,
                        timeout,
                    )?),
                    contract: contract.clone(),
                },
                ChainFamily::Solana => HolderSource::AssetGroup {
                    pager: Box::new(HeliusClient::new(&config.helius.rpc_url, api_key, timeout)?),
                    collection: contract.clone(),
                },
            },
        })
    }

    /// Collect the deduplicated holder list
    pub async fn collect(&self) -> Result<Vec<String>> {
        match self {
            HolderSource::Manual(addresses) => Ok(dedup_holders(addresses.iter().cloned())),
            HolderSource::Evm { api, contract } => collect_evm(api.as_ref(), contract).await,
            HolderSource::AssetGroup { pager, collection } => {
                collect_asset_group(pager.as_ref(), collection).await
            }
        }
    }
}

/// Deduplicate holders, keeping the first occurrence of each
pub fn dedup_holders<I>(holders: I) -> Vec<String>
where
    I: IntoIterator<Item = String>,
{
    holders.into_iter().collect::<IndexSet<_>>().into_iter().collect()
}

/// Collect holders of an EVM collection with a single ownership request
pub async fn collect_evm(api: &dyn OwnershipApi, contract: &str) -> Result<Vec<String>> {
    match api.owners_for_collection(contract).await? {
        Some(owners) => {
            let total = owners.len();
            let holders = dedup_holders(owners);
            info!("Found {} holders ({} owner entries)", holders.len(), total);
            Ok(holders)
        }
        None => {
            info!("Ownership response has no owner list for {}", contract);
            Ok(Vec::new())
        }
    }
}

/// Walk a collection's asset pages until a short page, then reduce to owners
pub async fn collect_asset_group(pager: &dyn AssetPager, collection: &str) -> Result<Vec<String>> {
    let mut page = 1;
    let mut assets: Vec<AssetOwnership> = Vec::new();

    loop {
        let items = pager.assets_page(collection, page, ASSET_PAGE_LIMIT).await?;
        let count = items.len();
        debug!("Asset page {} returned {} items", page, count);
        assets.extend(items);

        if count < ASSET_PAGE_LIMIT as usize {
            break;
        }
        page += 1;
    }

    let holders = dedup_holders(assets.into_iter().map(|a| a.owner));
    info!(
        "Found {} holders across {} asset pages",
        holders.len(),
        page
    );
    Ok(holders)
}
