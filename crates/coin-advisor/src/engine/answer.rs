//! Advisor Answers
//!
//! Structured outcome of one query. `Display` renders the reply text.

use std::fmt;

use rust_decimal::Decimal;
use serde::Serialize;

use crate::model::{Coin, CoinRecord, LiveQuote};
use crate::sustainability::display_score;

/// Name the advisor speaks under
pub const BOT_NAME: &str = "CoinSage";

/// Two coins side by side
#[derive(Clone, Debug, PartialEq, Serialize)]
pub struct Comparison {
    pub first: CoinRecord,
    pub second: CoinRecord,

    /// Set only when both coins are rising
    pub preferred: Option<Coin>,
}

impl Comparison {
    /// Compare two records; when both are rising the higher score is
    /// preferred, and an equal score goes to `second`
    pub fn new(first: CoinRecord, second: CoinRecord) -> Self {
        let preferred = (first.is_rising() && second.is_rising()).then(|| {
            if first.sustainability_score > second.sustainability_score {
                first.coin
            } else {
                second.coin
            }
        });

        Self {
            first,
            second,
            preferred,
        }
    }
}

#[derive(Clone, Debug, PartialEq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum Answer {
    /// Highest sustainability score in the table
    MostSustainable { coin: Coin, score: Decimal },

    /// Rising, high market cap coin with the best score
    Momentum(CoinRecord),

    /// Nothing is both rising and high market cap
    NoMomentum,

    Comparison(Comparison),

    /// Fewer than two tracked coins named in a comparison
    NeedTwoCoins,

    /// A lookup needed for the answer failed
    DataUnavailable { coins: Vec<Coin> },

    CoinList(Vec<Coin>),

    Help,

    Fallback,
}

impl fmt::Display for Answer {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Answer::MostSustainable { coin, score } => write!(
                f,
                "{BOT_NAME}: I recommend **{coin}** (sustainability score: {}/10). \
                 It's eco-friendly and has long-term potential!",
                display_score(*score)
            ),
            Answer::Momentum(record) => {
                write!(f, "{BOT_NAME}: **{}** is trending {}", record.coin, record.price_trend)?;
                if let Some(live) = &record.live {
                    write!(f, " (24h change: {:+.2}%)", live.price_change_24h.round_dp(2))?;
                }
                write!(f, " with a {} market cap", record.market_cap)?;
                if let Some(live) = &record.live {
                    write!(f, " (≈ ${})", format_usd(live.market_cap_usd))?;
                }
                write!(
                    f,
                    ". Its sustainability score is {}/10. Win-win!",
                    display_score(record.sustainability_score)
                )
            }
            Answer::NoMomentum => write!(
                f,
                "{BOT_NAME}: I don't see any coin that's both rising and high market cap \
                 right now. Maybe check again later?"
            ),
            Answer::Comparison(comparison) => {
                writeln!(f, "{BOT_NAME}: Here's a quick comparison:")?;
                write_comparison_line(f, &comparison.first)?;
                write_comparison_line(f, &comparison.second)?;
                if let Some(coin) = comparison.preferred {
                    write!(f, "Both are rising, but {coin} has a higher sustainability score!")?;
                }
                Ok(())
            }
            Answer::NeedTwoCoins => write!(
                f,
                "{BOT_NAME}: I need two valid coin names to compare \
                 (e.g., 'Compare Bitcoin vs Cardano')."
            ),
            Answer::DataUnavailable { coins } => write!(
                f,
                "{BOT_NAME}: Sorry, I couldn't fetch market data for {}.",
                join_names(coins)
            ),
            Answer::CoinList(coins) => {
                write!(f, "{BOT_NAME}: Currently I track: {}.", join_names(coins))
            }
            Answer::Help => {
                writeln!(f, "{BOT_NAME} Help:")?;
                writeln!(f, "- Ask 'Which crypto is trending up?' or 'What's the most sustainable coin?'")?;
                writeln!(f, "- Ask 'Compare Bitcoin vs Cardano'")?;
                writeln!(f, "- Ask 'List all coins' to see all options")?;
                write!(f, "- Type 'exit' or 'quit' to leave")
            }
            Answer::Fallback => {
                writeln!(f, "{BOT_NAME}: I'm not quite sure what you mean. Try:")?;
                writeln!(f, "- 'Which crypto is trending up?'")?;
                writeln!(f, "- 'Most sustainable coin?'")?;
                writeln!(f, "- 'Compare Ethereum vs Cardano'")?;
                writeln!(f, "- 'List all coins'")?;
                write!(f, "- 'Help'")
            }
        }
    }
}

fn write_comparison_line(f: &mut fmt::Formatter<'_>, record: &CoinRecord) -> fmt::Result {
    write!(f, "- {}: price_trend={}", record.coin, record.price_trend)?;
    if let Some(LiveQuote { price_change_24h, .. }) = &record.live {
        write!(f, " (24h change: {:+.2}%)", price_change_24h.round_dp(2))?;
    }
    writeln!(
        f,
        ", market_cap={}, sustainability={}/10.",
        record.market_cap,
        display_score(record.sustainability_score)
    )
}

fn join_names(coins: &[Coin]) -> String {
    coins.iter().map(|c| c.name()).collect::<Vec<_>>().join(", ")
}

/// Whole dollars with thousands separators (e.g., "1,234,567")
fn format_usd(amount: Decimal) -> String {
    let whole = amount.round().abs().to_string();
    let mut grouped = String::with_capacity(whole.len() + whole.len() / 3);
    for (i, digit) in whole.chars().enumerate() {
        if i > 0 && (whole.len() - i) % 3 == 0 {
            grouped.push(',');
        }
        grouped.push(digit);
    }
    if amount.is_sign_negative() && !grouped.chars().all(|c| c == '0') {
        grouped.insert(0, '-');
    }
    grouped
}
