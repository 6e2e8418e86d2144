//! Error Types for Coin Advisor

use thiserror::Error;

use crate::model::Coin;

pub type Result<T> = std::result::Result<T, AdvisorError>;

#[derive(Error, Debug)]
pub enum AdvisorError {
    #[error("Market data unavailable for {0}")]
    MarketDataUnavailable(Coin),

    #[error("Coin not tracked: {0}")]
    UnsupportedCoin(String),

    #[error("Configuration error: {0}")]
    Config(String),

    #[error("Network error: {0}")]
    Network(#[from] reqwest::Error),

    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),
}
