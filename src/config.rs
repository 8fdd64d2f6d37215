//! Configuration loading and validation

use anyhow::{Context, Result};
use serde::Deserialize;
use std::path::Path;
use std::time::Duration;

use crate::chain::{Chain, RequiredKey};
use crate::http::mask_url;

/// Main configuration structure
#[derive(Debug, Clone, Deserialize)]
pub struct Config {
    #[serde(default)]
    pub alchemy: AlchemyConfig,
    #[serde(default)]
    pub helius: HeliusConfig,
    #[serde(default)]
    pub clusters: ClustersConfig,
    #[serde(default)]
    pub http: HttpConfig,
    #[serde(default)]
    pub output: OutputConfig,
}

#[derive(Debug, Clone, Deserialize)]
pub struct AlchemyConfig {
    /// Endpoint with a `{network}` placeholder for the chain slug
    #[serde(default = "default_alchemy_endpoint")]
    pub endpoint_template: String,
    #[serde(default)]
    pub api_key: String,
}

#[derive(Debug, Clone, Deserialize)]
pub struct HeliusConfig {
    #[serde(default = "default_helius_rpc_url")]
    pub rpc_url: String,
    #[serde(default)]
    pub api_key: String,
}

#[derive(Debug, Clone, Deserialize)]
pub struct ClustersConfig {
    #[serde(default = "default_clusters_url")]
    pub base_url: String,
}

#[derive(Debug, Clone, Deserialize)]
pub struct HttpConfig {
    #[serde(default = "default_timeout_ms")]
    pub timeout_ms: u64,
}

impl HttpConfig {
    pub fn timeout(&self) -> Duration {
        Duration::from_millis(self.timeout_ms)
    }
}

#[derive(Debug, Clone, Deserialize)]
pub struct OutputConfig {
    /// CSV destination, `-` for stdout
    #[serde(default = "default_csv_path")]
    pub csv_path: String,
    /// Hide holders without target addresses by default
    #[serde(default)]
    pub hide_empty: bool,
}

/// Provider API keys for one run
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Credentials {
    pub alchemy: Option<String>,
    pub helius: Option<String>,
}

impl Credentials {
    /// Keys from config, falling back to the plain provider env vars
    pub fn from_config(config: &Config) -> Self {
        Self {
            alchemy: non_empty(&config.alchemy.api_key).or_else(|| env_key("ALCHEMY_API_KEY")),
            helius: non_empty(&config.helius.api_key).or_else(|| env_key("HELIUS_API_KEY")),
        }
    }

    /// Replace keys with per-run overrides where given
    pub fn with_overrides(self, alchemy: Option<String>, helius: Option<String>) -> Self {
        Self {
            alchemy: alchemy.filter(|k| !k.is_empty()).or(self.alchemy),
            helius: helius.filter(|k| !k.is_empty()).or(self.helius),
        }
    }

    /// API key the chain's provider needs, if set
    pub fn for_chain(&self, chain: &Chain) -> Option<&str> {
        self.get(chain.required_key)
    }

    pub fn get(&self, key: RequiredKey) -> Option<&str> {
        let value = match key {
            RequiredKey::Alchemy => self.alchemy.as_deref(),
            RequiredKey::Helius => self.helius.as_deref(),
        };
        value.filter(|k| !k.is_empty())
    }

    pub fn set(&mut self, key: RequiredKey, value: String) {
        match key {
            RequiredKey::Alchemy => self.alchemy = Some(value),
            RequiredKey::Helius => self.helius = Some(value),
        }
    }
}

fn non_empty(value: &str) -> Option<String> {
    if value.is_empty() {
        None
    } else {
        Some(value.to_string())
    }
}

fn env_key(name: &str) -> Option<String> {
    std::env::var(name).ok().filter(|v| !v.is_empty())
}

fn default_alchemy_endpoint() -> String {
    "https://{network}.g.alchemy.com".to_string()
}

fn default_helius_rpc_url() -> String {
    "https://mainnet.helius-rpc.com/".to_string()
}

fn default_clusters_url() -> String {
    "https://api.clusters.xyz".to_string()
}

fn default_timeout_ms() -> u64 {
    30_000
}

fn default_csv_path() -> String {
    "results.csv".to_string()
}

impl Default for AlchemyConfig {
    fn default() -> Self {
        Self {
            endpoint_template: default_alchemy_endpoint(),
            api_key: String::new(),
        }
    }
}

impl Default for HeliusConfig {
    fn default() -> Self {
        Self {
            rpc_url: default_helius_rpc_url(),
            api_key: String::new(),
        }
    }
}

impl Default for ClustersConfig {
    fn default() -> Self {
        Self {
            base_url: default_clusters_url(),
        }
    }
}

impl Default for HttpConfig {
    fn default() -> Self {
        Self {
            timeout_ms: default_timeout_ms(),
        }
    }
}

impl Default for OutputConfig {
    fn default() -> Self {
        Self {
            csv_path: default_csv_path(),
            hide_empty: false,
        }
    }
}

impl Default for Config {
    fn default() -> Self {
        Self {
            alchemy: AlchemyConfig::default(),
            helius: HeliusConfig::default(),
            clusters: ClustersConfig::default(),
            http: HttpConfig::default(),
            output: OutputConfig::default(),
        }
    }
}

impl Config {
    /// Load configuration from file and environment variables
    pub fn load<P: AsRef<Path>>(path: P) -> Result<Self> {
        let path = path.as_ref();

        let settings = config::Config::builder()
            // Start with defaults
            .set_default("alchemy.endpoint_template", default_alchemy_endpoint())?
            .set_default("helius.rpc_url", default_helius_rpc_url())?
            .set_default("clusters.base_url", default_clusters_url())?
            .set_default("http.timeout_ms", default_timeout_ms() as i64)?
            .set_default("output.csv_path", default_csv_path())?
            // Load from file if exists
            .add_source(config::File::from(path).required(false))
            // Override with environment variables (prefix SNAPSHOT__)
            .add_source(
                config::Environment::with_prefix("SNAPSHOT")
                    .prefix_separator("__")
                    .separator("__")
                    .try_parsing(true),
            )
            .build()
            .context("Failed to build configuration")?;

        let config: Config = settings
            .try_deserialize()
            .context("Failed to deserialize configuration")?;

        // Validate configuration
        config.validate()?;

        Ok(config)
    }

    /// Validate configuration values
    pub fn validate(&self) -> Result<()> {
        if self.http.timeout_ms == 0 {
            anyhow::bail!("http.timeout_ms must be positive");
        }

        for (name, value) in [
            ("alchemy.endpoint_template", &self.alchemy.endpoint_template),
            ("helius.rpc_url", &self.helius.rpc_url),
            ("clusters.base_url", &self.clusters.base_url),
        ] {
            if value.trim().is_empty() {
                anyhow::bail!("{} must not be empty", name);
            }
        }

        let alchemy_endpoint = self.alchemy.endpoint_template.replace("{network}", "eth-mainnet");
        url::Url::parse(&alchemy_endpoint).with_context(|| {
            format!(
                "Invalid alchemy.endpoint_template: {}",
                self.alchemy.endpoint_template
            )
        })?;
        url::Url::parse(&self.helius.rpc_url)
            .with_context(|| format!("Invalid helius.rpc_url: {}", self.helius.rpc_url))?;
        url::Url::parse(&self.clusters.base_url)
            .with_context(|| format!("Invalid clusters.base_url: {}", self.clusters.base_url))?;

        if self.output.csv_path.trim().is_empty() {
            anyhow::bail!("output.csv_path must not be empty");
        }

        Ok(())
    }

    /// Get masked configuration for display (hide secrets)
    pub fn masked_display(&self) -> String {
        format!(
            r#"Configuration:
  Alchemy:
    endpoint: {}
    api_key: {}
  Helius:
    rpc_url: {}
    api_key: {}
  Clusters:
    base_url: {}
  HTTP:
    timeout: {}ms
  Output:
    csv_path: {}
    hide_empty: {}
"#,
            self.alchemy.endpoint_template,
            mask_secret(&self.alchemy.api_key),
            mask_url(&self.helius.rpc_url),
            mask_secret(&self.helius.api_key),
            self.clusters.base_url,
            self.http.timeout_ms,
            self.output.csv_path,
            self.output.hide_empty,
        )
    }
}

fn mask_secret(value: &str) -> &'static str {
    if value.is_empty() {
        "(not set)"
    } else {
        "***"
    }
}
