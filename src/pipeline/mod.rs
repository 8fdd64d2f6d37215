//! Snapshot pipeline
//!
//! A run is a strict sequence: collect holders, resolve their clusters,
//! expand clusters into target addresses, project the table. Each stage
//! hands its complete output to the next. A failing stage is replaced by an
//! empty output and a notice; the run itself always completes.

use chrono::{DateTime, Utc};
use std::fmt;
use tracing::{info, warn};

use crate::chain::Chain;
use crate::clusters::ClusterApi;
use crate::config::{Config, Credentials};
use crate::error::{Error, Result};
use crate::export::ResultTable;
use crate::source::{HolderSource, SourceSpec};
use crate::target::TargetType;

pub mod expander;
pub mod resolver;

pub use expander::{distinct_cluster_keys, expand_clusters, TargetAddressSet};
pub use resolver::{resolve_clusters, ClusterMembership};

/// Immutable settings of one run
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RunConfig {
    pub source: SourceSpec,
    pub target: TargetType,
    pub hide_empty: bool,
}

/// Raw caller input a run is built from
#[derive(Debug, Clone, Default)]
pub struct RunInputs {
    /// Parsed manual address list, if one was supplied
    pub addresses: Option<Vec<String>>,
    pub chain: Option<String>,
    pub contract: Option<String>,
    pub target: String,
    pub subtypes: Vec<String>,
    pub hide_empty: bool,
}

impl RunConfig {
    /// Validate caller input and pick the holder source
    pub fn from_inputs(inputs: RunInputs, credentials: &Credentials) -> Result<Self> {
        let target = TargetType::parse(&inputs.target, &inputs.subtypes)?;
        let contract = inputs.contract.filter(|c| !c.trim().is_empty());

        let source = match (inputs.addresses, contract) {
            (Some(_), Some(_)) => {
                return Err(Error::ConflictingInput(
                    "use either an address list or a collection contract, not both".to_string(),
                ))
            }
            (Some(addresses), None) => {
                if addresses.is_empty() {
                    return Err(Error::MissingInput("the address list is empty".to_string()));
                }
                SourceSpec::Manual(addresses)
            }
            (None, Some(contract)) => {
                let slug = inputs.chain.ok_or_else(|| {
                    Error::MissingInput("select a source chain for the collection".to_string())
                })?;
                let chain = Chain::from_slug(&slug)?;
                let api_key = credentials.for_chain(chain).ok_or_else(|| Error::MissingCredential {
                    chain: chain.slug.to_string(),
                    key: chain.required_key.to_string(),
                })?;
                SourceSpec::Collection {
                    chain,
                    contract: contract.trim().to_string(),
                    api_key: api_key.to_string(),
                }
            }
            (None, None) => {
                return Err(Error::MissingInput(
                    "enter a collection contract address or supply an address list".to_string(),
                ))
            }
        };

        Ok(Self {
            source,
            target,
            hide_empty: inputs.hide_empty,
        })
    }
}

/// Pipeline stage, for notices
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Stage {
    Collect,
    Resolve,
    Expand,
}

impl fmt::Display for Stage {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Stage::Collect => write!(f, "holder discovery"),
            Stage::Resolve => write!(f, "cluster name lookup"),
            Stage::Expand => write!(f, "cluster address lookup"),
        }
    }
}

/// A stage that failed and was replaced by an empty output
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StageNotice {
    pub stage: Stage,
    pub message: String,
}

impl fmt::Display for StageNotice {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Failed {}: {}", self.stage, self.message)
    }
}

/// Everything a run produced
#[derive(Debug, Clone)]
pub struct RunOutcome {
    pub holders: Vec<String>,
    pub membership: ClusterMembership,
    pub targets: TargetAddressSet,
    pub table: ResultTable,
    pub notices: Vec<StageNotice>,
    pub started_at: DateTime<Utc>,
    pub finished_at: DateTime<Utc>,
}

impl RunOutcome {
    pub fn summary(&self) -> RunSummary<'_> {
        RunSummary(self)
    }
}

/// Run one snapshot from collection to projection.
///
/// Provider failures become stage notices; configuration and input errors
/// abort the run.
pub async fn run(config: &RunConfig, settings: &Config, clusters: &dyn ClusterApi) -> Result<RunOutcome> {
    info!("Collecting holders from {}", config.source.describe());
    let source = HolderSource::from_spec(&config.source, settings)?;
    run_with_source(&source, clusters, &config.target, config.hide_empty).await
}

/// Run against an already built holder source
pub async fn run_with_source(
    source: &HolderSource,
    clusters: &dyn ClusterApi,
    target: &TargetType,
    hide_empty: bool,
) -> Result<RunOutcome> {
    let started_at = Utc::now();
    let mut notices = Vec::new();

    let holders = stage(Stage::Collect, source.collect().await, &mut notices)?;

    let (membership, targets) = if holders.is_empty() {
        info!("No holders found");
        (ClusterMembership::new(), TargetAddressSet::new())
    } else {
        let membership = stage(
            Stage::Resolve,
            resolve_clusters(clusters, &holders).await,
            &mut notices,
        )?;
        info!("Expanding clusters into {} addresses", target);
        let targets = stage(
            Stage::Expand,
            expand_clusters(clusters, &membership, target).await,
            &mut notices,
        )?;
        (membership, targets)
    };

    let table = ResultTable::build(&holders, &membership, &targets, hide_empty);

    Ok(RunOutcome {
        holders,
        membership,
        targets,
        table,
        notices,
        started_at,
        finished_at: Utc::now(),
    })
}

/// Replace a recoverable stage failure by an empty output and a notice
fn stage<T: Default>(stage: Stage, result: Result<T>, notices: &mut Vec<StageNotice>) -> Result<T> {
    match result {
        Ok(output) => Ok(output),
        Err(e) if e.is_recoverable() => {
            warn!("{} failed: {}", stage, e);
            notices.push(StageNotice {
                stage,
                message: e.to_string(),
            });
            Ok(T::default())
        }
        Err(e) => Err(e),
    }
}

/// Human-readable run summary
pub struct RunSummary<'a>(&'a RunOutcome);

impl fmt::Display for RunSummary<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let outcome = self.0;
        let elapsed = outcome.finished_at - outcome.started_at;

        writeln!(f, "Holders:           {}", outcome.holders.len())?;
        writeln!(f, "Clustered holders: {}", outcome.membership.len())?;
        writeln!(f, "Clusters:          {}", outcome.targets.len())?;
        writeln!(f, "Rows:              {}", outcome.table.rows.len())?;
        writeln!(f, "Target columns:    {}", outcome.table.target_columns)?;
        writeln!(f, "Elapsed:           {}ms", elapsed.num_milliseconds())?;
        for notice in &outcome.notices {
            writeln!(f, "Notice: {}", notice)?;
        }
        Ok(())
    }
}
