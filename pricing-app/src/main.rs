//! # Pricing Calculator Application
//!
//! Binary that wires together all the components:
//! - Load configuration from environment
//! - Fetch the tariff catalog and exchange rates over HTTP
//! - Apply the configured selections to the calculator
//! - Print the quote and submit a complete selection

mod config;

use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use pricing_client::HttpDataSource;
use pricing_core::{Calculator, LoadOutcome, LoggingSubmissionHandler, PeriodDiscount};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Load environment variables
    dotenvy::dotenv().ok();

    // Initialize tracing subscriber
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "info,pricing_app=debug,pricing_core=debug".into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    // Load configuration
    let config = config::Config::from_env()?;

    tracing::info!("Loading calculator data from {}", config.api_url);

    let mut source = HttpDataSource::new(&config.api_url).with_timeout(config.timeout)?;
    if let Some(key) = &config.api_key {
        source = source.with_api_key(key);
    }

    let mut calculator = Calculator::with_discount_rule(PeriodDiscount);
    if calculator.load(&source).await == LoadOutcome::Failed {
        tracing::warn!("Continuing without data; selectors will be empty");
    }

    for tariff in calculator.tariff_options() {
        tracing::info!("Tariff {}: {}", tariff.id, tariff.name);
    }

    // Same order a user would pick in: the tariff first, since it resets the rest
    if let Some(tariff_id) = config.tariff_id {
        calculator.set_tariff(Some(tariff_id));
    }
    if let Some(currency) = config.currency {
        calculator.set_currency(Some(currency));
    }
    if let Some(payment_option_id) = config.payment_option_id {
        calculator.set_payment_option(Some(payment_option_id));
    }

    let quote = calculator.quote();
    println!("{}", serde_json::to_string_pretty(&quote)?);

    if calculator.can_submit() {
        let handler = LoggingSubmissionHandler::new();
        let id = calculator.submit(&handler).await?;
        tracing::info!("Submitted selection {}", id);
    } else {
        tracing::info!(
            "Selection incomplete ({:?} missing), nothing submitted",
            calculator.selection().missing_fields()
        );
    }

    Ok(())
}
