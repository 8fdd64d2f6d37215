//! Cluster name resolution: raw holder address -> cluster identifier

use indexmap::IndexMap;
use tracing::{debug, info};

use crate::clusters::ClusterApi;
use crate::error::Result;

/// Holder address -> cluster identifier (`name/member`), holders without a
/// cluster are absent
pub type ClusterMembership = IndexMap<String, String>;

/// Resolve every holder's cluster identifier with one lookup request
pub async fn resolve_clusters(api: &dyn ClusterApi, holders: &[String]) -> Result<ClusterMembership> {
    if holders.is_empty() {
        debug!("No holders to resolve");
        return Ok(ClusterMembership::new());
    }

    let lookups = api.lookup_names(holders).await?;

    let mut membership = ClusterMembership::new();
    for entry in lookups {
        if let Some(name) = entry.name {
            membership.entry(entry.address).or_insert(name);
        }
    }

    info!(
        "Resolved clusters for {} of {} holders",
        membership.len(),
        holders.len()
    );
    Ok(membership)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::clusters::testing::FakeClusters;

    fn holders(list: &[&str]) -> Vec<String> {
        list.iter().map(|s| s.to_string()).collect()
    }

    #[tokio::test]
    async fn test_null_names_are_absent() {
        let api = FakeClusters::default()
            .with_name("0xa", "alice/main")
            .with_name("0xc", "carol/vault");

        let membership = resolve_clusters(&api, &holders(&["0xa", "0xb", "0xc"])).await.unwrap();

        assert_eq!(membership.len(), 2);
        assert_eq!(membership["0xa"], "alice/main");
        assert!(!membership.contains_key("0xb"));
        assert_eq!(membership["0xc"], "carol/vault");
    }

    #[tokio::test]
    async fn test_single_request_with_full_list() {
        let api = FakeClusters::default();
        let list = holders(&["0x1", "0x2", "0x3"]);

        resolve_clusters(&api, &list).await.unwrap();

        let requests = api.lookup_requests.lock().unwrap();
        assert_eq!(requests.len(), 1);
        assert_eq!(requests[0], list);
    }

    #[tokio::test]
    async fn test_empty_holders_skip_lookup() {
        let api = FakeClusters::default();
        let membership = resolve_clusters(&api, &[]).await.unwrap();
        assert!(membership.is_empty());
        assert!(api.lookup_requests.lock().unwrap().is_empty());
    }

    #[tokio::test]
    async fn test_lookup_failure_propagates() {
        let api = FakeClusters {
            fail_lookup: true,
            ..Default::default()
        };
        let err = resolve_clusters(&api, &holders(&["0x1"])).await.unwrap_err();
        assert!(err.is_recoverable());
    }
}
