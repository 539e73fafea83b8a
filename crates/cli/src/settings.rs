use anyhow::{Context, Result};
use config::{Config, Environment, File as ConfigFile};
use respect_issuance::{IssuanceConfig, DEFAULT_NAME, DEFAULT_RANKS_DELAY_SECS, DEFAULT_SYMBOL};
use respect_types::Address;
use serde::Deserialize;
use std::path::{Path, PathBuf};

pub const DEFAULT_CONFIG_PATH: &str = "respect.toml";
pub const DEFAULT_STATE_PATH: &str = "respect-state.json";

/// CLI settings. Sources, lowest priority first: built-in defaults, the
/// TOML file, then `RESPECT_*` environment variables.
#[derive(Debug, Clone, Deserialize)]
pub struct CliConfig {
    pub state_path: PathBuf,
    pub log_level: String,
    /// `pretty` or `compact`.
    pub log_format: String,

    // Used by `init` only; later commands read everything from the snapshot.
    pub name: String,
    pub symbol: String,
    pub base_uri: String,
    pub issuer: Option<String>,
    pub executor: Option<String>,
    pub ranks_delay: u64,
}

impl CliConfig {
    pub fn load(config_path_override: Option<&str>) -> Result<Self> {
        let resolved_path = if let Some(path) = config_path_override {
            let path = PathBuf::from(path);
            if !path.exists() {
                anyhow::bail!(
                    "Configuration file {} not found (specified via --config)",
                    path.display()
                );
            }
            Some(path)
        } else {
            let path = PathBuf::from(DEFAULT_CONFIG_PATH);
            if path.exists() {
                Some(path)
            } else {
                None
            }
        };

        Self::load_from(resolved_path.as_deref(), Environment::with_prefix("RESPECT"))
    }

    fn load_from(path: Option<&Path>, environment: Environment) -> Result<Self> {
        let mut builder = Config::builder()
            .set_default("state_path", DEFAULT_STATE_PATH)?
            .set_default("log_level", "warn")?
            .set_default("log_format", "compact")?
            .set_default("name", DEFAULT_NAME)?
            .set_default("symbol", DEFAULT_SYMBOL)?
            .set_default("base_uri", "")?
            .set_default("ranks_delay", DEFAULT_RANKS_DELAY_SECS)?;

        if let Some(path) = path {
            builder = builder.add_source(ConfigFile::from(path));
        }

        builder = builder.add_source(environment.try_parsing(true));

        let config = builder.build().context("failed to build configuration")?;
        config
            .try_deserialize()
            .context("invalid configuration")
    }

    /// Issuance settings for a fresh instance. Requires `issuer`.
    pub fn issuance_config(&self) -> Result<IssuanceConfig> {
        let issuer = self
            .issuer
            .as_deref()
            .context("`issuer` must be configured to initialize state")?;
        let issuer: Address = issuer
            .parse()
            .with_context(|| format!("invalid issuer address {issuer}"))?;

        let mut config = IssuanceConfig::new(issuer)
            .with_ranks_delay(self.ranks_delay)
            .with_base_uri(self.base_uri.clone());
        config.name = self.name.clone();
        config.symbol = self.symbol.clone();

        if let Some(executor) = self.executor.as_deref() {
            let executor: Address = executor
                .parse()
                .with_context(|| format!("invalid executor address {executor}"))?;
            config = config.with_executor(executor);
        }
        Ok(config)
    }
}
