//! Domain Models
//!
//! The tracked coin set and the uniform attribute record every provider
//! produces. Market figures use `rust_decimal` - never use f64 for money!

use std::fmt;
use std::str::FromStr;

use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use rust_decimal_macros::dec;
use serde::{Deserialize, Serialize};

use crate::error::AdvisorError;

/// 24h change (percent) above which a coin counts as rising
pub const RISING_THRESHOLD_PCT: Decimal = dec!(1.0);

/// 24h change (percent) below which a coin counts as falling
pub const FALLING_THRESHOLD_PCT: Decimal = dec!(-1.0);

/// Market cap (USD) from which a coin is large cap, inclusive
pub const HIGH_CAP_USD: Decimal = dec!(50_000_000_000);

/// Market cap (USD) from which a coin is mid cap, inclusive
pub const MEDIUM_CAP_USD: Decimal = dec!(10_000_000_000);

/// A tracked cryptocurrency
///
/// The set is closed; variant order is the table order used for listing and
/// for breaking ranking ties.
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub enum Coin {
    Bitcoin,
    Ethereum,
    Cardano,
    Polkadot,
}

impl Coin {
    /// Every tracked coin in table order
    pub const ALL: [Coin; 4] = [Coin::Bitcoin, Coin::Ethereum, Coin::Cardano, Coin::Polkadot];

    /// Display name (e.g., "Bitcoin")
    pub fn name(self) -> &'static str {
        match self {
            Coin::Bitcoin => "Bitcoin",
            Coin::Ethereum => "Ethereum",
            Coin::Cardano => "Cardano",
            Coin::Polkadot => "Polkadot",
        }
    }

    /// Identifier used by the market-data provider (lowercase slug)
    pub fn provider_id(self) -> &'static str {
        match self {
            Coin::Bitcoin => "bitcoin",
            Coin::Ethereum => "ethereum",
            Coin::Cardano => "cardano",
            Coin::Polkadot => "polkadot",
        }
    }

    /// Case-insensitive name lookup
    pub fn from_name(name: &str) -> Option<Coin> {
        let name = name.trim();
        Coin::ALL
            .into_iter()
            .find(|coin| coin.name().eq_ignore_ascii_case(name))
    }

    /// Coins whose name occurs anywhere in `text`, in table order
    pub fn mentioned_in(text: &str) -> Vec<Coin> {
        let text = text.to_lowercase();
        Coin::ALL
            .into_iter()
            .filter(|coin| text.contains(coin.provider_id()))
            .collect()
    }
}

impl fmt::Display for Coin {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl FromStr for Coin {
    type Err = AdvisorError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Coin::from_name(s).ok_or_else(|| AdvisorError::UnsupportedCoin(s.to_string()))
    }
}

/// Direction of the last 24h of price action
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum PriceTrend {
    Rising,
    Stable,
    Falling,
}

impl PriceTrend {
    /// Categorize a 24h percentage change. Both thresholds are strict.
    pub fn from_change_24h(pct: Decimal) -> Self {
        if pct > RISING_THRESHOLD_PCT {
            PriceTrend::Rising
        } else if pct < FALLING_THRESHOLD_PCT {
            PriceTrend::Falling
        } else {
            PriceTrend::Stable
        }
    }

    pub fn as_str(self) -> &'static str {
        match self {
            PriceTrend::Rising => "rising",
            PriceTrend::Stable => "stable",
            PriceTrend::Falling => "falling",
        }
    }
}

impl fmt::Display for PriceTrend {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Market capitalization bucket
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum MarketCapTier {
    High,
    Medium,
    Low,
}

impl MarketCapTier {
    /// Categorize a market cap in USD. Lower bounds are inclusive.
    pub fn from_usd(market_cap_usd: Decimal) -> Self {
        if market_cap_usd >= HIGH_CAP_USD {
            MarketCapTier::High
        } else if market_cap_usd >= MEDIUM_CAP_USD {
            MarketCapTier::Medium
        } else {
            MarketCapTier::Low
        }
    }

    pub fn as_str(self) -> &'static str {
        match self {
            MarketCapTier::High => "high",
            MarketCapTier::Medium => "medium",
            MarketCapTier::Low => "low",
        }
    }
}

impl fmt::Display for MarketCapTier {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Relative energy footprint of the consensus mechanism
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum EnergyUse {
    High,
    Medium,
    Low,
    /// Coin has no entry in the sustainability table
    Unknown,
}

impl EnergyUse {
    pub fn as_str(self) -> &'static str {
        match self {
            EnergyUse::High => "high",
            EnergyUse::Medium => "medium",
            EnergyUse::Low => "low",
            EnergyUse::Unknown => "unknown",
        }
    }
}

impl fmt::Display for EnergyUse {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Raw market figures behind a live record, kept for display only
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct LiveQuote {
    /// 24-hour price change percentage
    pub price_change_24h: Decimal,

    /// Market capitalization in USD
    pub market_cap_usd: Decimal,

    /// When the quote was fetched
    pub fetched_at: DateTime<Utc>,
}

/// Uniform attribute record for one coin
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct CoinRecord {
    pub coin: Coin,

    pub price_trend: PriceTrend,

    pub market_cap: MarketCapTier,

    pub energy_use: EnergyUse,

    /// Fraction in [0, 1]
    pub sustainability_score: Decimal,

    /// Present only when the market attributes came from a live fetch
    #[serde(skip_serializing_if = "Option::is_none")]
    pub live: Option<LiveQuote>,
}

impl CoinRecord {
    pub fn is_rising(&self) -> bool {
        self.price_trend == PriceTrend::Rising
    }

    /// Rising price on a large-cap coin
    pub fn has_momentum(&self) -> bool {
        self.is_rising() && self.market_cap == MarketCapTier::High
    }
}
