//! Configuration loading from environment.

use std::env;
use std::str::FromStr;
use std::time::Duration;

use pricing_types::{PaymentOptionId, TariffId, Ticker};

/// Application configuration.
pub struct Config {
    pub api_url: String,
    pub api_key: Option<String>,
    pub timeout: Duration,
    pub tariff_id: Option<TariffId>,
    pub currency: Option<Ticker>,
    pub payment_option_id: Option<PaymentOptionId>,
}

impl Config {
    /// Loads configuration from environment variables.
    pub fn from_env() -> anyhow::Result<Self> {
        let api_url =
            env::var("PRICING_API_URL").unwrap_or_else(|_| "http://localhost:3000".to_string());

        let timeout_secs: u64 = env::var("PRICING_TIMEOUT_SECS")
            .unwrap_or_else(|_| "10".to_string())
            .parse()?;

        Ok(Self {
            api_url,
            api_key: env::var("PRICING_API_KEY").ok().filter(|key| !key.is_empty()),
            timeout: Duration::from_secs(timeout_secs),
            tariff_id: optional_var("PRICING_TARIFF_ID")?,
            currency: optional_var("PRICING_CURRENCY")?,
            payment_option_id: optional_var("PRICING_PAYMENT_OPTION_ID")?,
        })
    }
}

/// Parses `name` if it is set and non-empty.
fn optional_var<T>(name: &str) -> anyhow::Result<Option<T>>
where
    T: FromStr,
    T::Err: std::fmt::Display,
{
    match env::var(name) {
        Ok(raw) if !raw.trim().is_empty() => raw
            .parse()
            .map(Some)
            .map_err(|e| anyhow::anyhow!("{} is invalid: {}", name, e)),
        _ => Ok(None),
    }
}
