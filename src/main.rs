//! Cross-chain holder snapshot CLI
//!
//! Finds the holders of an NFT collection, looks up their identity clusters
//! and exports every cluster address on a chosen target chain to CSV.

use anyhow::Result;
use clap::{Parser, Subcommand};
use std::path::PathBuf;
use tracing::error;
use tracing_subscriber::filter::{Directive, LevelFilter};

use cluster_snapshot::cli::{commands, RunArgs};
use cluster_snapshot::config::Config;

/// Cross-chain holder snapshot
#[derive(Parser)]
#[command(name = "snapshot")]
#[command(author, version, about, long_about = None)]
struct Cli {
    /// Path to config file
    #[arg(short, long, default_value = "config.toml")]
    config: String,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Take a snapshot and export the holder table
    Run {
        /// Source chain slug (see `snapshot chains`)
        #[arg(long, requires = "contract")]
        chain: Option<String>,

        /// Collection contract (EVM) or collection address (Solana)
        #[arg(long, requires = "chain", conflicts_with = "input")]
        contract: Option<String>,

        /// Address list file, one address per line ("-" for stdin)
        #[arg(short, long)]
        input: Option<PathBuf>,

        /// Target address type (see `snapshot targets`)
        #[arg(short, long)]
        target: String,

        /// Target sub-type, repeatable (bitcoin, litecoin and ripple only)
        #[arg(long = "subtype", value_name = "SUBTYPE")]
        subtypes: Vec<String>,

        /// Drop holders without any target address; `--hide-empty false`
        /// overrides output.hide_empty
        #[arg(long, value_name = "BOOL", num_args = 0..=1, default_missing_value = "true")]
        hide_empty: Option<bool>,

        /// CSV destination ("-" for stdout), defaults to output.csv_path
        #[arg(short, long)]
        output: Option<PathBuf>,

        /// Alchemy API key for this run
        #[arg(long, env = "ALCHEMY_API_KEY", hide_env_values = true)]
        alchemy_key: Option<String>,

        /// Helius API key for this run
        #[arg(long, env = "HELIUS_API_KEY", hide_env_values = true)]
        helius_key: Option<String>,

        /// Prompt for the source chain's API key when it is not set
        #[arg(long)]
        prompt_keys: bool,

        /// Skip the terminal table
        #[arg(short, long)]
        quiet: bool,
    },

    /// List supported source chains
    Chains,

    /// List target address types and sub-types
    Targets,

    /// Show current configuration (secrets masked)
    Config,
}

#[tokio::main]
async fn main() -> Result<()> {
    // Load environment variables from .env file
    dotenvy::dotenv().ok();

    // Initialize tracing
    let default_directive: Directive = "cluster_snapshot=info"
        .parse()
        .unwrap_or_else(|_| LevelFilter::INFO.into());
    tracing_subscriber::fmt()
        .with_env_filter(tracing_subscriber::EnvFilter::from_default_env().add_directive(default_directive))
        .with_target(true)
        .with_writer(std::io::stderr)
        .init();

    // Parse CLI arguments
    let cli = Cli::parse();

    // Load configuration
    let config = match Config::load(&cli.config) {
        Ok(cfg) => cfg,
        Err(e) => {
            error!("Failed to load configuration: {:#}", e);
            std::process::exit(1);
        }
    };

    // Execute command
    let result = match cli.command {
        Commands::Run {
            chain,
            contract,
            input,
            target,
            subtypes,
            hide_empty,
            output,
            alchemy_key,
            helius_key,
            prompt_keys,
            quiet,
        } => {
            let args = RunArgs {
                chain,
                contract,
                input,
                target,
                subtypes,
                hide_empty,
                output,
                alchemy_key,
                helius_key,
                prompt_keys,
                quiet,
            };
            commands::run(&config, args).await
        }
        Commands::Chains => commands::list_chains(&config),
        Commands::Targets => commands::list_targets(),
        Commands::Config => commands::show_config(&config),
    };

    if let Err(e) = result {
        error!("Command failed: {:#}", e);
        std::process::exit(1);
    }

    Ok(())
}
