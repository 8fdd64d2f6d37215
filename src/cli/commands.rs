//! CLI command implementations

use anyhow::Result;
use dialoguer::Password;
use std::path::{Path, PathBuf};
use tracing::{info, warn};

use crate::chain::{Chain, CHAINS};
use crate::clusters::ClustersClient;
use crate::config::{Config, Credentials};
use crate::export::{render_table, write_csv};
use crate::pipeline::{self, RunConfig, RunInputs, RunOutcome};
use crate::source::read_address_list;
use crate::target::TargetType;

/// Arguments of one `run` invocation
#[derive(Debug, Clone, Default)]
pub struct RunArgs {
    pub chain: Option<String>,
    pub contract: Option<String>,
    pub input: Option<PathBuf>,
    pub target: String,
    pub subtypes: Vec<String>,
    /// Overrides `output.hide_empty` when given
    pub hide_empty: Option<bool>,
    pub output: Option<PathBuf>,
    pub alchemy_key: Option<String>,
    pub helius_key: Option<String>,
    pub prompt_keys: bool,
    pub quiet: bool,
}

/// Run one snapshot and write its table
pub async fn run(config: &Config, args: RunArgs) -> Result<()> {
    let mut credentials =
        Credentials::from_config(config).with_overrides(args.alchemy_key.clone(), args.helius_key.clone());

    if args.prompt_keys {
        prompt_missing_key(&mut credentials, args.chain.as_deref())?;
    }

    let addresses = match &args.input {
        Some(path) => Some(read_address_list(path)?),
        None => None,
    };

    let inputs = RunInputs {
        addresses,
        chain: args.chain,
        contract: args.contract,
        target: args.target,
        subtypes: args.subtypes,
        hide_empty: args.hide_empty.unwrap_or(config.output.hide_empty),
    };
    let run_config = RunConfig::from_inputs(inputs, &credentials).map_err(|e| {
        if e.is_input_error() {
            warn!("Invalid run arguments, see `snapshot run --help`");
        }
        e
    })?;

    info!(
        "Snapshot of {} into {} addresses",
        run_config.source.describe(),
        run_config.target
    );

    let clusters = ClustersClient::new(&config.clusters.base_url, config.http.timeout())?;
    let outcome = pipeline::run(&run_config, config, &clusters).await?;
    for notice in &outcome.notices {
        warn!("{}", notice);
    }

    let output = output_path(args.output, config);
    report(&outcome, &output, args.quiet)
}

/// CSV destination: the flag, else the configured path
fn output_path(flag: Option<PathBuf>, config: &Config) -> PathBuf {
    flag.unwrap_or_else(|| PathBuf::from(&config.output.csv_path))
}

fn report(outcome: &RunOutcome, output: &Path, quiet: bool) -> Result<()> {
    // stdout carries the CSV alone when piped
    if output == Path::new("-") {
        write_csv(&outcome.table, output)?;
        eprint!("{}", outcome.summary());
        return Ok(());
    }

    if !quiet {
        println!();
        print!("{}", render_table(&outcome.table));
        println!();
    }
    write_csv(&outcome.table, output)?;
    println!("=== SNAPSHOT SUMMARY ===");
    print!("{}", outcome.summary());
    println!("CSV:               {}", output.display());
    Ok(())
}

fn prompt_missing_key(credentials: &mut Credentials, chain: Option<&str>) -> Result<()> {
    let Some(slug) = chain else {
        return Ok(());
    };
    let chain = Chain::from_slug(slug)?;
    if credentials.for_chain(chain).is_some() {
        return Ok(());
    }

    let key = Password::new()
        .with_prompt(format!("{} API key for {}", chain.required_key, chain.name))
        .interact()?;
    credentials.set(chain.required_key, key.trim().to_string());
    Ok(())
}

/// List supported source chains and their credential status
pub fn list_chains(config: &Config) -> Result<()> {
    let credentials = Credentials::from_config(config);

    println!("\n=== SOURCE CHAINS ===\n");
    println!("{:<18} {:<20} {:<10} {}", "SLUG", "NAME", "PROVIDER", "KEY");
    println!("{}", "-".repeat(60));

    for chain in CHAINS {
        let key_status = if credentials.get(chain.required_key).is_some() {
            "set"
        } else {
            "missing"
        };
        println!(
            "{:<18} {:<20} {:<10} {}",
            chain.slug,
            chain.name,
            chain.required_key.to_string(),
            key_status
        );
    }

    println!();
    Ok(())
}

/// List target types and their valid sub-types
pub fn list_targets() -> Result<()> {
    println!("\n=== TARGET TYPES ===\n");
    println!("{:<12} {}", "TYPE", "SUB-TYPES");
    println!("{}", "-".repeat(60));

    for name in TargetType::NAMES {
        let subtypes = TargetType::subtypes_for(name);
        if subtypes.is_empty() {
            println!("{:<12} -", name);
            continue;
        }
        for (i, (subtype, label)) in subtypes.iter().enumerate() {
            let type_cell = if i == 0 { *name } else { "" };
            println!("{:<12} {:<18} {}", type_cell, subtype, label);
        }
    }

    println!();
    Ok(())
}

/// Show current configuration
pub fn show_config(config: &Config) -> Result<()> {
    println!("{}", config.masked_display());
    Ok(())
}
