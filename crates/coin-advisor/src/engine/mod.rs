//! Recommendation Engine
//!
//! Classifies a query, looks up what the intent needs, and ranks coins.
//! Every path ends in an [`Answer`]; nothing here returns an error.

mod answer;
mod intent;

pub use answer::{Answer, BOT_NAME, Comparison};
pub use intent::{INTENT_RULES, Intent};

use std::sync::Arc;

use crate::model::{Coin, CoinRecord};
use crate::provider::AttributeProvider;
use crate::query::normalize;
/// Rule-based coin advisor
///
/// Sustainability rankings read the provider's own table, so every answer
/// reports the same score for a coin.
pub struct Advisor {
    provider: Arc<dyn AttributeProvider>,
}

impl Advisor {
    pub fn new(provider: Arc<dyn AttributeProvider>) -> Self {
        Self { provider }
    }

    /// Reply text for a query
    pub async fn respond(&self, query: &str) -> String {
        self.answer(query).await.to_string()
    }

    /// Structured answer for a query
    pub async fn answer(&self, query: &str) -> Answer {
        let signals = normalize(query);
        let intent = Intent::classify(&signals);
        tracing::debug!(?intent, stems = signals.len(), "classified query");

        match intent {
            Intent::MostSustainable => self.most_sustainable(),
            Intent::HighestMomentum => self.highest_momentum().await,
            Intent::Compare => self.compare(query).await,
            Intent::List => Answer::CoinList(Coin::ALL.to_vec()),
            Intent::Help => Answer::Help,
            Intent::Unknown => Answer::Fallback,
        }
    }

    /// Highest score in the sustainability table; no market data involved
    pub fn most_sustainable(&self) -> Answer {
        match self.provider.sustainability().most_sustainable() {
            Some((coin, profile)) => Answer::MostSustainable {
                coin,
                score: profile.score,
            },
            None => Answer::Fallback,
        }
    }

    /// Best rising, high market cap coin by sustainability score
    pub async fn highest_momentum(&self) -> Answer {
        let records = self.provider.get_all().await;
        tracing::debug!(
            provider = self.provider.name(),
            available = records.len(),
            "ranking momentum"
        );

        match best_momentum(records) {
            Some(record) => Answer::Momentum(record),
            None => Answer::NoMomentum,
        }
    }

    /// Side-by-side view of the first two tracked coins named in `query`
    pub async fn compare(&self, query: &str) -> Answer {
        let mentioned = Coin::mentioned_in(query);
        let [first, second] = match mentioned.as_slice() {
            [first, second, ..] => [*first, *second],
            _ => return Answer::NeedTwoCoins,
        };

        let first_record = self.provider.get_coin(first).await;
        let second_record = self.provider.get_coin(second).await;

        match (first_record, second_record) {
            (Some(a), Some(b)) => Answer::Comparison(Comparison::new(a, b)),
            (a, b) => {
                let coins = [(first, a.is_none()), (second, b.is_none())]
                    .into_iter()
                    .filter_map(|(coin, missing)| missing.then_some(coin))
                    .collect();
                Answer::DataUnavailable { coins }
            }
        }
    }
}

/// Highest-scoring record with momentum; ties go to the earliest record
pub fn best_momentum(records: impl IntoIterator<Item = CoinRecord>) -> Option<CoinRecord> {
    let mut best: Option<CoinRecord> = None;
    for record in records.into_iter().filter(CoinRecord::has_momentum) {
        match &best {
            Some(current) if record.sustainability_score <= current.sustainability_score => {}
            _ => best = Some(record),
        }
    }
    best
}
