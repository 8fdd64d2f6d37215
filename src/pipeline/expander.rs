//! Cluster expansion: cluster key -> filtered target addresses

use indexmap::{IndexMap, IndexSet};
use tracing::{debug, info};

use super::resolver::ClusterMembership;
use crate::clusters::{cluster_key, ClusterApi};
use crate::error::Result;
use crate::target::TargetType;

/// Cluster key -> target addresses in wallet order. Clusters without a
/// matching wallet keep an empty list.
pub type TargetAddressSet = IndexMap<String, Vec<String>>;

/// Distinct cluster keys referenced by a membership mapping, first-seen order
pub fn distinct_cluster_keys(membership: &ClusterMembership) -> Vec<String> {
    membership
        .values()
        .map(|identifier| cluster_key(identifier))
        .collect::<IndexSet<_>>()
        .into_iter()
        .collect()
}

/// Fetch every referenced cluster's wallets in one request and filter them
pub async fn expand_clusters(
    api: &dyn ClusterApi,
    membership: &ClusterMembership,
    target: &TargetType,
) -> Result<TargetAddressSet> {
    let keys = distinct_cluster_keys(membership);
    if keys.is_empty() {
        debug!("No clusters to expand");
        return Ok(TargetAddressSet::new());
    }

    let records = api.cluster_wallets(&keys).await?;

    let mut targets = TargetAddressSet::new();
    for record in records {
        let addresses = target.filter(&record.wallets);
        debug!(
            "Cluster {} has {} of {} wallets matching {}",
            record.name,
            addresses.len(),
            record.wallets.len(),
            target.name()
        );
        targets.insert(cluster_key(&record.name), addresses);
    }

    let with_targets = targets.values().filter(|a| !a.is_empty()).count();
    info!(
        "Expanded {} clusters, {} with {} addresses",
        targets.len(),
        with_targets,
        target.name()
    );
    Ok(targets)
}
