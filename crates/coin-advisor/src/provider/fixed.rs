//! Static Attribute Provider
//!
//! Fixed market attributes for the tracked coins. Used for offline runs and
//! tests; never fails.

use std::collections::BTreeMap;

use async_trait::async_trait;

use super::AttributeProvider;
use crate::error::{AdvisorError, Result};
use crate::model::{Coin, CoinRecord, MarketCapTier, PriceTrend};
use crate::sustainability::SustainabilityTable;

/// Provider backed by a fixed market table
pub struct StaticProvider {
    records: BTreeMap<Coin, CoinRecord>,
    sustainability: SustainabilityTable,
}

impl Default for StaticProvider {
    fn default() -> Self {
        Self::new()
    }
}

impl StaticProvider {
    pub fn new() -> Self {
        Self::with_sustainability(SustainabilityTable::builtin())
    }

    /// Merge the fixed market table with a custom sustainability table
    pub fn with_sustainability(sustainability: SustainabilityTable) -> Self {
        let records = Coin::ALL
            .into_iter()
            .map(|coin| {
                let (price_trend, market_cap) = market_attributes(coin);
                let profile = sustainability.profile(coin);
                let record = CoinRecord {
                    coin,
                    price_trend,
                    market_cap,
                    energy_use: profile.energy_use,
                    sustainability_score: profile.score,
                    live: None,
                };
                (coin, record)
            })
            .collect();

        Self {
            records,
            sustainability,
        }
    }
}

/// (price trend, market cap) per coin
fn market_attributes(coin: Coin) -> (PriceTrend, MarketCapTier) {
    match coin {
        Coin::Bitcoin => (PriceTrend::Rising, MarketCapTier::High),
        Coin::Ethereum => (PriceTrend::Stable, MarketCapTier::High),
        Coin::Cardano => (PriceTrend::Rising, MarketCapTier::Medium),
        Coin::Polkadot => (PriceTrend::Falling, MarketCapTier::Medium),
    }
}

#[async_trait]
impl AttributeProvider for StaticProvider {
    async fn fetch(&self, coin: Coin) -> Result<CoinRecord> {
        self.records
            .get(&coin)
            .cloned()
            .ok_or_else(|| AdvisorError::UnsupportedCoin(coin.to_string()))
    }

    fn sustainability(&self) -> &SustainabilityTable {
        &self.sustainability
    }

    fn name(&self) -> &str {
        "StaticTable"
    }
}
