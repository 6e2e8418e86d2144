//! Attribute Providers
//!
//! Sources of per-coin attribute records: a fixed table or live market data
//! merged with the sustainability table.

mod coingecko;
mod fixed;

pub use coingecko::{CoinGeckoConfig, CoinGeckoProvider, DEFAULT_BASE_URL};
pub use fixed::StaticProvider;

use async_trait::async_trait;

use crate::error::Result;
use crate::model::{Coin, CoinRecord};
use crate::sustainability::SustainabilityTable;

/// Attribute source trait (Strategy pattern)
///
/// Implementors only supply [`fetch`](AttributeProvider::fetch); the provided
/// methods turn per-coin failures into absent records so callers never see
/// an error.
#[async_trait]
pub trait AttributeProvider: Send + Sync {
    /// Build the full record for one coin
    async fn fetch(&self, coin: Coin) -> Result<CoinRecord>;

    /// Record for one coin, or `None` if it could not be built
    async fn get_coin(&self, coin: Coin) -> Option<CoinRecord> {
        match self.fetch(coin).await {
            Ok(record) => Some(record),
            Err(e) => {
                tracing::warn!(provider = self.name(), %coin, error = %e, "coin lookup failed");
                None
            }
        }
    }

    /// Record for a coin given by name; `None` for untracked names
    async fn lookup(&self, name: &str) -> Option<CoinRecord> {
        match Coin::from_name(name) {
            Some(coin) => self.get_coin(coin).await,
            None => {
                tracing::debug!(name, "not a tracked coin");
                None
            }
        }
    }

    /// Records for every tracked coin in table order, skipping failures
    async fn get_all(&self) -> Vec<CoinRecord> {
        let mut records = Vec::with_capacity(Coin::ALL.len());
        for coin in Coin::ALL {
            if let Some(record) = self.get_coin(coin).await {
                records.push(record);
            }
        }
        records
    }

    /// Table merged into every record this provider builds
    fn sustainability(&self) -> &SustainabilityTable;

    /// Check if the upstream source is reachable
    async fn health_check(&self) -> bool {
        true
    }

    /// Whether records carry live market figures
    fn is_live(&self) -> bool {
        false
    }

    /// Provider name
    fn name(&self) -> &str;
}
