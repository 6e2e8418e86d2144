//! # coin-advisor
//!
//! Rule-based cryptocurrency advisor that answers plain-language questions
//! about a fixed set of coins.
//!
//! ## Pipeline
//!
//! ```text
//! ┌──────────┐   ┌────────────┐   ┌────────────┐   ┌───────────────────┐
//! │  query   │──▶│ normalize  │──▶│   Intent   │──▶│ AttributeProvider │
//! │  (text)  │   │  (stems)   │   │ (rule tbl) │   │ static | CoinGecko│
//! └──────────┘   └────────────┘   └────────────┘   └─────────┬─────────┘
//!                                                            │
//!                                  ┌────────────┐   ┌────────▼─────────┐
//!                                  │   reply    │◀──│ Answer (ranked)  │
//!                                  └────────────┘   └──────────────────┘
//! ```
//!
//! ## Ranking Rules
//!
//! - **Sustainability** - highest score in the sustainability table
//! - **Momentum** - rising price *and* high market cap, best score wins
//! - **Comparison** - two named coins side by side; if both are rising the
//!   more sustainable one is pointed out
//!
//! Market lookups that fail are treated as missing records, never as errors.
//!
//! ## Usage
//!
//! ```rust,ignore
//! use std::sync::Arc;
//! use coin_advisor::{Advisor, StaticProvider};
//!
//! let advisor = Advisor::new(Arc::new(StaticProvider::new()));
//! let reply = advisor.respond("Most sustainable coin?").await;
//! ```

pub mod config;
pub mod engine;
pub mod error;
pub mod model;
pub mod provider;
pub mod query;
pub mod sustainability;

pub use config::{AdvisorConfig, DataMode};
pub use engine::{Advisor, Answer, Intent};
pub use error::{AdvisorError, Result};
pub use model::{Coin, CoinRecord, EnergyUse, LiveQuote, MarketCapTier, PriceTrend};
pub use provider::{AttributeProvider, CoinGeckoConfig, CoinGeckoProvider, StaticProvider};
pub use query::{QuerySignals, normalize};
pub use sustainability::{SustainabilityProfile, SustainabilityTable};
