//! Sustainability Table
//!
//! Energy footprint and sustainability score per coin. Market-data providers
//! do not publish these, so they are fixed domain constants merged into every
//! record regardless of where the market attributes came from.

use std::collections::BTreeMap;

use rust_decimal::Decimal;
use rust_decimal::prelude::ToPrimitive;
use rust_decimal_macros::dec;
use serde::{Deserialize, Serialize};

use crate::model::{Coin, EnergyUse};

/// Static sustainability attributes for one coin
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct SustainabilityProfile {
    pub energy_use: EnergyUse,

    /// Fraction in [0, 1]
    pub score: Decimal,
}

impl SustainabilityProfile {
    /// Profile for coins missing from the table
    pub const UNKNOWN: SustainabilityProfile = SustainabilityProfile {
        energy_use: EnergyUse::Unknown,
        score: Decimal::ZERO,
    };

    pub fn new(energy_use: EnergyUse, score: Decimal) -> Self {
        Self { energy_use, score }
    }
}

/// Coin → sustainability profile, iterated in coin table order
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct SustainabilityTable {
    entries: BTreeMap<Coin, SustainabilityProfile>,
}

impl Default for SustainabilityTable {
    fn default() -> Self {
        Self::builtin()
    }
}

impl SustainabilityTable {
    /// The built-in profiles for every tracked coin
    pub fn builtin() -> Self {
        Self::from_entries([
            (Coin::Bitcoin, SustainabilityProfile::new(EnergyUse::High, dec!(0.30))),
            (Coin::Ethereum, SustainabilityProfile::new(EnergyUse::Medium, dec!(0.60))),
            (Coin::Cardano, SustainabilityProfile::new(EnergyUse::Low, dec!(0.80))),
            (Coin::Polkadot, SustainabilityProfile::new(EnergyUse::Low, dec!(0.70))),
        ])
    }

    /// Build a table from explicit entries; coins left out resolve to
    /// [`SustainabilityProfile::UNKNOWN`]
    pub fn from_entries(entries: impl IntoIterator<Item = (Coin, SustainabilityProfile)>) -> Self {
        Self {
            entries: entries.into_iter().collect(),
        }
    }

    /// Profile for a coin
    ///
    /// A missing entry does not fail the lookup: the coin gets unknown energy
    /// use and a zero score. Market-data failures, by contrast, drop the whole
    /// record.
    pub fn profile(&self, coin: Coin) -> SustainabilityProfile {
        match self.entries.get(&coin) {
            Some(profile) => *profile,
            None => {
                tracing::debug!(%coin, "no sustainability entry, using unknown profile");
                SustainabilityProfile::UNKNOWN
            }
        }
    }

    /// Entries in coin table order
    pub fn iter(&self) -> impl Iterator<Item = (Coin, &SustainabilityProfile)> + '_ {
        self.entries.iter().map(|(coin, profile)| (*coin, profile))
    }

    /// Coin with the highest score; ties go to the earliest coin in table order
    pub fn most_sustainable(&self) -> Option<(Coin, SustainabilityProfile)> {
        let mut best: Option<(Coin, SustainabilityProfile)> = None;
        for (coin, profile) in self.iter() {
            match best {
                Some((_, current)) if profile.score <= current.score => {}
                _ => best = Some((coin, *profile)),
            }
        }
        best
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

/// Score on a 0-10 scale for display
///
/// Stored scores are fractions and get scaled by ten. Anything above one is
/// taken to be on the 0-10 scale already and is only rounded. Rounding is to
/// nearest, with halves going to the even neighbour.
pub fn display_score(score: Decimal) -> u32 {
    let scaled = if score <= Decimal::ONE {
        score * Decimal::TEN
    } else {
        score
    };
    scaled.round().to_u32().unwrap_or(0)
}
