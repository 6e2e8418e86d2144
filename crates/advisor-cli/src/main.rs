//! coinsage - terminal front end for the coin advisor
//!
//! Configuration comes from the environment (or a `.env` file):
//!
//! - `ADVISOR_MODE` - `static` (default) or `live`
//! - `COINGECKO_BASE_URL`, `COINGECKO_TIMEOUT_SECS` - live market data
//! - `ADVISOR_TURN_PAUSE_MS` - pause after each live answer
//! - `RUST_LOG` - log filter, logs go to stderr

mod repl;

use tokio::io::BufReader;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use coin_advisor::{Advisor, AdvisorConfig};

#[tokio::main(flavor = "current_thread")]
async fn main() -> anyhow::Result<()> {
    // Load environment
    dotenvy::dotenv().ok();

    // Initialize tracing
    tracing_subscriber::registry()
        .with(tracing_subscriber::EnvFilter::new(
            std::env::var("RUST_LOG").unwrap_or_else(|_| "warn".into()),
        ))
        .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
        .init();

    let config = AdvisorConfig::from_env()?;
    let provider = config.build_provider()?;
    tracing::info!(mode = %config.mode, provider = provider.name(), "starting advisor");

    // Verify market-data connection
    if provider.is_live() {
        if provider.health_check().await {
            tracing::info!("✓ Connected to {}", provider.name());
        } else {
            tracing::warn!("⚠ {} not reachable - live answers may be unavailable", provider.name());
            tracing::warn!("  Check COINGECKO_BASE_URL or switch to ADVISOR_MODE=static");
        }
    }

    let advisor = Advisor::new(provider);
    let end = repl::run(
        &advisor,
        BufReader::new(tokio::io::stdin()),
        tokio::io::stdout(),
        config.turn_pause(),
        repl::ctrl_c(),
    )
    .await?;

    tracing::info!(?end, "goodbye");
    Ok(())
}
