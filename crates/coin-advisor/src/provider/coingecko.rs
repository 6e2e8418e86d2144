//! CoinGecko Attribute Provider
//!
//! Fetches 24h price change and market cap from the public CoinGecko API (no
//! key needed), buckets them, and merges in the sustainability table.

use std::time::Duration;

use async_trait::async_trait;
use chrono::Utc;
use reqwest::Client;
use rust_decimal::Decimal;
use serde::Deserialize;

use super::AttributeProvider;
use crate::error::{AdvisorError, Result};
use crate::model::{Coin, CoinRecord, LiveQuote, MarketCapTier, PriceTrend};
use crate::sustainability::SustainabilityTable;

pub const DEFAULT_BASE_URL: &str = "https://api.coingecko.com/api/v3";

/// Only market data is needed; everything else is switched off
const MARKET_QUERY: [(&str, &str); 6] = [
    ("localization", "false"),
    ("tickers", "false"),
    ("market_data", "true"),
    ("community_data", "false"),
    ("developer_data", "false"),
    ("sparkline", "false"),
];

/// CoinGecko client configuration
#[derive(Clone, Debug)]
pub struct CoinGeckoConfig {
    /// API base URL, without trailing slash
    pub base_url: String,

    /// Per-request timeout in seconds
    pub timeout_secs: u64,
}

impl Default for CoinGeckoConfig {
    fn default() -> Self {
        Self {
            base_url: DEFAULT_BASE_URL.into(),
            timeout_secs: 10,
        }
    }
}

impl CoinGeckoConfig {
    pub fn from_env() -> Self {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Build from a variable lookup; unset or unparsable values keep defaults
    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Self {
        let defaults = Self::default();
        let base_url = lookup("COINGECKO_BASE_URL")
            .filter(|url| !url.trim().is_empty())
            .unwrap_or(defaults.base_url);
        let timeout_secs = lookup("COINGECKO_TIMEOUT_SECS")
            .and_then(|t| t.trim().parse().ok())
            .filter(|t| *t > 0)
            .unwrap_or(defaults.timeout_secs);

        Self {
            base_url,
            timeout_secs,
        }
    }
}

/// `GET /coins/{id}` body, reduced to the fields we read
#[derive(Debug, Deserialize)]
struct CoinResponse {
    market_data: Option<MarketData>,
}

#[derive(Debug, Deserialize)]
struct MarketData {
    price_change_percentage_24h: Option<Decimal>,
    market_cap: Option<CurrencyFigures>,
}

#[derive(Debug, Deserialize)]
struct CurrencyFigures {
    usd: Option<Decimal>,
}

impl CoinResponse {
    /// (24h change %, market cap USD) if both are present
    fn market_figures(&self) -> Option<(Decimal, Decimal)> {
        let data = self.market_data.as_ref()?;
        let change = data.price_change_percentage_24h?;
        let market_cap = data.market_cap.as_ref()?.usd?;
        Some((change, market_cap))
    }
}

/// Live provider backed by CoinGecko
pub struct CoinGeckoProvider {
    client: Client,
    config: CoinGeckoConfig,
    sustainability: SustainabilityTable,
}

impl CoinGeckoProvider {
    /// Create a provider; fails only if the HTTP client cannot be built
    pub fn new(config: CoinGeckoConfig) -> Result<Self> {
        let client = Client::builder()
            .timeout(Duration::from_secs(config.timeout_secs))
            .user_agent(concat!("coinsage/", env!("CARGO_PKG_VERSION")))
            .build()?;

        Ok(Self {
            client,
            config,
            sustainability: SustainabilityTable::builtin(),
        })
    }

    /// Create from environment variables
    pub fn from_env() -> Result<Self> {
        Self::new(CoinGeckoConfig::from_env())
    }

    /// Replace the sustainability table merged into every record
    pub fn with_sustainability(mut self, table: SustainabilityTable) -> Self {
        self.sustainability = table;
        self
    }

    fn url(&self, path: &str) -> String {
        format!("{}/{}", self.config.base_url.trim_end_matches('/'), path)
    }

    async fn fetch_figures(&self, coin: Coin) -> Result<(Decimal, Decimal)> {
        let url = self.url(&format!("coins/{}", coin.provider_id()));
        tracing::debug!(%coin, %url, "fetching market data");

        let response = self
            .client
            .get(&url)
            .query(&MARKET_QUERY[..])
            .header("Accept", "application/json")
            .send()
            .await?
            .error_for_status()?;

        let body = response.text().await?;
        let payload: CoinResponse = serde_json::from_str(&body)?;

        payload
            .market_figures()
            .ok_or(AdvisorError::MarketDataUnavailable(coin))
    }
}

#[async_trait]
impl AttributeProvider for CoinGeckoProvider {
    async fn fetch(&self, coin: Coin) -> Result<CoinRecord> {
        let (price_change_24h, market_cap_usd) = self.fetch_figures(coin).await?;
        let profile = self.sustainability.profile(coin);

        let record = CoinRecord {
            coin,
            price_trend: PriceTrend::from_change_24h(price_change_24h),
            market_cap: MarketCapTier::from_usd(market_cap_usd),
            energy_use: profile.energy_use,
            sustainability_score: profile.score,
            live: Some(LiveQuote {
                price_change_24h,
                market_cap_usd,
                fetched_at: Utc::now(),
            }),
        };

        tracing::debug!(
            %coin,
            trend = %record.price_trend,
            market_cap = %record.market_cap,
            "categorized market data"
        );
        Ok(record)
    }

    async fn health_check(&self) -> bool {
        match self.client.get(self.url("ping")).send().await {
            Ok(response) => response.status().is_success(),
            Err(e) => {
                tracing::debug!(error = %e, "ping failed");
                false
            }
        }
    }

    fn sustainability(&self) -> &SustainabilityTable {
        &self.sustainability
    }

    fn is_live(&self) -> bool {
        true
    }

    fn name(&self) -> &str {
        "CoinGecko"
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use httpmock::prelude::*;
    use rust_decimal_macros::dec;
    use serde_json::json;

    use crate::model::EnergyUse;
    use crate::sustainability::SustainabilityProfile;

    fn provider_for(server: &MockServer) -> CoinGeckoProvider {
        CoinGeckoProvider::new(CoinGeckoConfig {
            base_url: server.base_url(),
            timeout_secs: 1,
        })
        .unwrap()
    }

    fn market_body(change: f64, market_cap: f64) -> serde_json::Value {
        json!({
            "id": "bitcoin",
            "symbol": "btc",
            "market_data": {
                "price_change_percentage_24h": change,
                "market_cap": { "usd": market_cap, "eur": 1.0 }
            }
        })
    }

    #[tokio::test]
    async fn test_live_record_is_categorized_and_merged() {
        let server = MockServer::start_async().await;
        let mock = server
            .mock_async(|when, then| {
                when.method(GET)
                    .path("/coins/bitcoin")
                    .query_param("localization", "false")
                    .query_param("tickers", "false")
                    .query_param("market_data", "true")
                    .query_param("community_data", "false")
                    .query_param("developer_data", "false")
                    .query_param("sparkline", "false");
                then.status(200).json_body(market_body(2.53, 1_900_000_000_000.0));
            })
            .await;

        let provider = provider_for(&server);
        let record = provider.fetch(Coin::Bitcoin).await.unwrap();
        mock.assert_async().await;

        assert_eq!(record.price_trend, PriceTrend::Rising);
        assert_eq!(record.market_cap, MarketCapTier::High);
        assert_eq!(record.energy_use, EnergyUse::High);
        assert_eq!(record.sustainability_score, dec!(0.30));

        let live = record.live.unwrap();
        assert_eq!(live.price_change_24h, dec!(2.53));
        assert_eq!(live.market_cap_usd, dec!(1_900_000_000_000));
        assert!(provider.is_live());
    }

    #[tokio::test]
    async fn test_boundary_values() {
        let server = MockServer::start_async().await;
        server
            .mock_async(|when, then| {
                when.method(GET).path("/coins/cardano");
                then.status(200).json_body(market_body(1.0, 10_000_000_000.0));
            })
            .await;

        let record = provider_for(&server).fetch(Coin::Cardano).await.unwrap();
        assert_eq!(record.price_trend, PriceTrend::Stable);
        assert_eq!(record.market_cap, MarketCapTier::Medium);
    }

    #[tokio::test]
    async fn test_error_status_is_absent() {
        let server = MockServer::start_async().await;
        server
            .mock_async(|when, then| {
                when.method(GET).path("/coins/ethereum");
                then.status(429).body("rate limited");
            })
            .await;

        let provider = provider_for(&server);
        assert!(matches!(
            provider.fetch(Coin::Ethereum).await,
            Err(AdvisorError::Network(_))
        ));
        assert!(provider.get_coin(Coin::Ethereum).await.is_none());
    }

    #[tokio::test]
    async fn test_malformed_body_is_absent() {
        let server = MockServer::start_async().await;
        server
            .mock_async(|when, then| {
                when.method(GET).path("/coins/polkadot");
                then.status(200).body("<html>maintenance</html>");
            })
            .await;

        let provider = provider_for(&server);
        assert!(matches!(
            provider.fetch(Coin::Polkadot).await,
            Err(AdvisorError::Serialization(_))
        ));
        assert!(provider.get_coin(Coin::Polkadot).await.is_none());
    }

    #[tokio::test]
    async fn test_missing_market_data_is_absent() {
        let server = MockServer::start_async().await;
        server
            .mock_async(|when, then| {
                when.method(GET).path("/coins/bitcoin");
                then.status(200).json_body(json!({ "id": "bitcoin" }));
            })
            .await;
        server
            .mock_async(|when, then| {
                when.method(GET).path("/coins/ethereum");
                then.status(200).json_body(json!({
                    "id": "ethereum",
                    "market_data": {
                        "price_change_percentage_24h": null,
                        "market_cap": { "usd": 400_000_000_000.0 }
                    }
                }));
            })
            .await;

        let provider = provider_for(&server);
        assert!(matches!(
            provider.fetch(Coin::Bitcoin).await,
            Err(AdvisorError::MarketDataUnavailable(Coin::Bitcoin))
        ));
        assert!(matches!(
            provider.fetch(Coin::Ethereum).await,
            Err(AdvisorError::MarketDataUnavailable(Coin::Ethereum))
        ));
    }

    #[tokio::test]
    async fn test_slow_response_times_out() {
        let server = MockServer::start_async().await;
        server
            .mock_async(|when, then| {
                when.method(GET).path("/coins/bitcoin");
                then.status(200)
                    .delay(Duration::from_secs(3))
                    .json_body(market_body(5.0, 1_000_000_000_000.0));
            })
            .await;

        let provider = provider_for(&server);
        match provider.fetch(Coin::Bitcoin).await {
            Err(AdvisorError::Network(e)) => assert!(e.is_timeout()),
            other => panic!("expected timeout, got {other:?}"),
        }
    }

    #[tokio::test]
    async fn test_partial_failures_are_skipped() {
        let server = MockServer::start_async().await;
        server
            .mock_async(|when, then| {
                when.method(GET).path("/coins/bitcoin");
                then.status(200).json_body(market_body(3.0, 1_000_000_000_000.0));
            })
            .await;
        server
            .mock_async(|when, then| {
                when.method(GET).path("/coins/cardano");
                then.status(200).json_body(market_body(-4.0, 20_000_000_000.0));
            })
            .await;

        let records = provider_for(&server).get_all().await;
        let coins: Vec<Coin> = records.iter().map(|r| r.coin).collect();
        assert_eq!(coins, vec![Coin::Bitcoin, Coin::Cardano]);
        assert_eq!(records[1].price_trend, PriceTrend::Falling);
    }

    #[tokio::test]
    async fn test_unknown_sustainability_does_not_fail_record() {
        let server = MockServer::start_async().await;
        server
            .mock_async(|when, then| {
                when.method(GET).path("/coins/polkadot");
                then.status(200).json_body(market_body(-0.5, 9_000_000_000.0));
            })
            .await;

        let table = SustainabilityTable::from_entries([(
            Coin::Bitcoin,
            SustainabilityProfile::new(EnergyUse::High, dec!(0.3)),
        )]);
        let provider = provider_for(&server).with_sustainability(table);
        let record = provider.get_coin(Coin::Polkadot).await.unwrap();

        assert_eq!(record.energy_use, EnergyUse::Unknown);
        assert_eq!(record.sustainability_score, Decimal::ZERO);
        assert_eq!(record.market_cap, MarketCapTier::Low);
        assert_eq!(provider.sustainability().len(), 1);
    }

    #[tokio::test]
    async fn test_health_check() {
        let server = MockServer::start_async().await;
        server
            .mock_async(|when, then| {
                when.method(GET).path("/ping");
                then.status(200).json_body(json!({ "gecko_says": "(V3) To the Moon!" }));
            })
            .await;

        assert!(provider_for(&server).health_check().await);

        let offline = CoinGeckoProvider::new(CoinGeckoConfig {
            base_url: "http://127.0.0.1:9".into(),
            timeout_secs: 1,
        })
        .unwrap();
        assert!(!offline.health_check().await);
    }
}
