//! Holder-indexed result table

use std::collections::HashSet;

use crate::clusters::cluster_key;
use crate::pipeline::{ClusterMembership, TargetAddressSet};

/// One emitted holder
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ResultRow {
    pub holder: String,
    /// Normalized `name/` key, empty when the holder has no cluster
    pub cluster_key: String,
    pub targets: Vec<String>,
}

/// What a table found, for display
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TableStatus {
    /// The run produced no holders at all
    NoHolders,
    /// Holders exist but no emitted row has a target address
    NoTargets,
    Found,
}

/// Rectangular projection of a run
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ResultTable {
    pub rows: Vec<ResultRow>,
    /// Number of `Target Address N` columns
    pub target_columns: usize,
    /// Distinct holders that went into the projection
    pub holder_count: usize,
}

impl ResultTable {
    /// Join holders with their cluster and target addresses.
    ///
    /// Rows follow holder order, the first occurrence of a holder wins, and
    /// `hide_empty` drops holders without targets. The column count is the
    /// widest emitted row.
    pub fn build(
        holders: &[String],
        membership: &ClusterMembership,
        targets: &TargetAddressSet,
        hide_empty: bool,
    ) -> Self {
        let mut emitted: HashSet<&str> = HashSet::new();
        let mut rows = Vec::new();

        for holder in holders {
            let key = membership
                .get(holder)
                .map(|identifier| cluster_key(identifier))
                .unwrap_or_default();
            let addresses = targets.get(&key).cloned().unwrap_or_default();

            if hide_empty && addresses.is_empty() {
                continue;
            }
            if !emitted.insert(holder.as_str()) {
                continue;
            }

            rows.push(ResultRow {
                holder: holder.clone(),
                cluster_key: key,
                targets: addresses,
            });
        }

        let target_columns = rows.iter().map(|r| r.targets.len()).max().unwrap_or(0);

        Self {
            rows,
            target_columns,
            holder_count: distinct_count(holders),
        }
    }

    pub fn status(&self) -> TableStatus {
        if self.holder_count == 0 {
            TableStatus::NoHolders
        } else if self.rows.iter().all(|r| r.targets.is_empty()) {
            TableStatus::NoTargets
        } else {
            TableStatus::Found
        }
    }

    /// `Holder Address, Cluster Name, Target Address 1 .. K`
    pub fn header(&self) -> Vec<String> {
        let mut header = vec!["Holder Address".to_string(), "Cluster Name".to_string()];
        header.extend((1..=self.target_columns).map(|i| format!("Target Address {}", i)));
        header
    }

    /// Data rows padded with empty cells to the full width
    pub fn records(&self) -> impl Iterator<Item = Vec<&str>> + '_ {
        self.rows.iter().map(move |row| {
            let mut cells = Vec::with_capacity(2 + self.target_columns);
            cells.push(row.holder.as_str());
            cells.push(row.cluster_key.as_str());
            cells.extend(
                (0..self.target_columns).map(|i| row.targets.get(i).map(String::as_str).unwrap_or("")),
            );
            cells
        })
    }
}

fn distinct_count(holders: &[String]) -> usize {
    holders.iter().collect::<HashSet<_>>().len()
}
