//! Issuance configuration

use respect_types::Address;
use serde::{Deserialize, Serialize};

/// Six days, the interval between weekly ranking meetings minus a day of slack.
pub const DEFAULT_RANKS_DELAY_SECS: u64 = 518_400;

pub const DEFAULT_NAME: &str = "Fractal Respect";
pub const DEFAULT_SYMBOL: &str = "RESPECT";

/// Initial settings for a respect issuance instance.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct IssuanceConfig {
    #[serde(default = "default_name")]
    pub name: String,
    #[serde(default = "default_symbol")]
    pub symbol: String,
    /// Prefix for token URIs; the decimal token id is appended.
    #[serde(default)]
    pub base_uri: String,
    /// Fixed authority. Can submit, mint, burn and change every setting.
    pub issuer: Address,
    /// Delegated submitter. Zero means no executor.
    #[serde(default)]
    pub executor: Address,
    /// Minimum seconds between ranking submissions.
    #[serde(default = "default_ranks_delay")]
    pub ranks_delay: u64,
}

impl IssuanceConfig {
    pub fn new(issuer: Address) -> Self {
        Self {
            name: default_name(),
            symbol: default_symbol(),
            base_uri: String::new(),
            issuer,
            executor: Address::ZERO,
            ranks_delay: DEFAULT_RANKS_DELAY_SECS,
        }
    }

    pub fn with_executor(mut self, executor: Address) -> Self {
        self.executor = executor;
        self
    }

    pub fn with_ranks_delay(mut self, ranks_delay: u64) -> Self {
        self.ranks_delay = ranks_delay;
        self
    }

    pub fn with_base_uri(mut self, base_uri: impl Into<String>) -> Self {
        self.base_uri = base_uri.into();
        self
    }
}

fn default_name() -> String {
    DEFAULT_NAME.to_string()
}

fn default_symbol() -> String {
    DEFAULT_SYMBOL.to_string()
}

fn default_ranks_delay() -> u64 {
    DEFAULT_RANKS_DELAY_SECS
}
