//! Advisor Configuration
//!
//! Read from environment variables (a `.env` file is loaded by the binary).

use std::fmt;
use std::str::FromStr;
use std::sync::Arc;
use std::time::Duration;

use serde::{Deserialize, Serialize};

use crate::error::{AdvisorError, Result};
use crate::provider::{AttributeProvider, CoinGeckoConfig, CoinGeckoProvider, StaticProvider};

/// Where market attributes come from
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum DataMode {
    /// Fixed table, no network
    #[default]
    Static,
    /// Live CoinGecko data, fetched per query
    Live,
}

impl FromStr for DataMode {
    type Err = AdvisorError;

    fn from_str(s: &str) -> Result<Self> {
        match s.trim().to_lowercase().as_str() {
            "static" => Ok(DataMode::Static),
            "live" => Ok(DataMode::Live),
            other => Err(AdvisorError::Config(format!(
                "unknown ADVISOR_MODE '{other}' (expected 'static' or 'live')"
            ))),
        }
    }
}

impl fmt::Display for DataMode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            DataMode::Static => f.write_str("static"),
            DataMode::Live => f.write_str("live"),
        }
    }
}

#[derive(Clone, Debug)]
pub struct AdvisorConfig {
    pub mode: DataMode,

    /// Market-data client settings (live mode only)
    pub coingecko: CoinGeckoConfig,

    /// Pause after each live answer, in milliseconds
    pub turn_pause_ms: u64,
}

impl Default for AdvisorConfig {
    fn default() -> Self {
        Self {
            mode: DataMode::default(),
            coingecko: CoinGeckoConfig::default(),
            turn_pause_ms: 500,
        }
    }
}

impl AdvisorConfig {
    pub fn from_env() -> Result<Self> {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Build from a variable lookup
    ///
    /// An unrecognised mode is an error; unparsable numbers keep defaults.
    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Result<Self> {
        let defaults = Self::default();

        let mode = match lookup("ADVISOR_MODE") {
            Some(value) if !value.trim().is_empty() => value.parse()?,
            _ => defaults.mode,
        };
        let turn_pause_ms = lookup("ADVISOR_TURN_PAUSE_MS")
            .and_then(|ms| ms.trim().parse().ok())
            .unwrap_or(defaults.turn_pause_ms);

        Ok(Self {
            mode,
            coingecko: CoinGeckoConfig::from_lookup(&lookup),
            turn_pause_ms,
        })
    }

    /// Pause between interactive turns; zero when no network is involved
    pub fn turn_pause(&self) -> Duration {
        match self.mode {
            DataMode::Static => Duration::ZERO,
            DataMode::Live => Duration::from_millis(self.turn_pause_ms),
        }
    }

    /// Build the attribute provider for the configured mode
    pub fn build_provider(&self) -> Result<Arc<dyn AttributeProvider>> {
        let provider: Arc<dyn AttributeProvider> = match self.mode {
            DataMode::Static => Arc::new(StaticProvider::new()),
            DataMode::Live => Arc::new(CoinGeckoProvider::new(self.coingecko.clone())?),
        };
        Ok(provider)
    }
}
