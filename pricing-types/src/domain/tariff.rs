//! Tariff catalog model.

use exchange_rates::Currency;
use serde::{Deserialize, Deserializer, Serialize};

/// Unique identifier for a Tariff.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct TariffId(u64);

impl TariffId {
    pub fn new(id: u64) -> Self {
        Self(id)
    }

    pub fn get(&self) -> u64 {
        self.0
    }
}

impl From<u64> for TariffId {
    fn from(id: u64) -> Self {
        Self(id)
    }
}

impl std::fmt::Display for TariffId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl std::str::FromStr for TariffId {
    type Err = std::num::ParseIntError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Ok(Self(s.trim().parse()?))
    }
}

/// Identifier of a payment option, unique within its tariff.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct PaymentOptionId(u64);

impl PaymentOptionId {
    pub fn new(id: u64) -> Self {
        Self(id)
    }

    pub fn get(&self) -> u64 {
        self.0
    }
}

impl From<u64> for PaymentOptionId {
    fn from(id: u64) -> Self {
        Self(id)
    }
}

impl std::fmt::Display for PaymentOptionId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl std::str::FromStr for PaymentOptionId {
    type Err = std::num::ParseIntError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Ok(Self(s.trim().parse()?))
    }
}

/// Billing interval of a payment option.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum PaymentPeriod {
    #[serde(alias = "monthly")]
    Month,
    #[serde(alias = "quarterly")]
    Quarter,
    #[serde(alias = "half_yearly")]
    HalfYear,
    #[serde(alias = "yearly")]
    Year,
    #[serde(other)]
    Other,
}

impl PaymentPeriod {
    /// Length of the interval in months.
    pub fn months(&self) -> u32 {
        match self {
            PaymentPeriod::Month | PaymentPeriod::Other => 1,
            PaymentPeriod::Quarter => 3,
            PaymentPeriod::HalfYear => 6,
            PaymentPeriod::Year => 12,
        }
    }

    pub fn label(&self) -> &'static str {
        match self {
            PaymentPeriod::Month => "1 month",
            PaymentPeriod::Quarter => "3 months",
            PaymentPeriod::HalfYear => "6 months",
            PaymentPeriod::Year => "12 months",
            PaymentPeriod::Other => "other",
        }
    }
}

impl std::fmt::Display for PaymentPeriod {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.label())
    }
}

/// A price and billing period pairing within a tariff.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PaymentOption {
    pub id: PaymentOptionId,
    /// Price in the tariff's base currency
    pub base_price: f64,
    pub payment_period: PaymentPeriod,
}

/// A subscription plan.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Tariff {
    pub id: TariffId,
    pub name: String,
    pub base_currency: Currency,
    /// Ordered; the first entry is the default after a tariff change.
    /// Missing or `null` on the wire reads as empty.
    #[serde(default, deserialize_with = "null_as_empty")]
    pub payment_options: Vec<PaymentOption>,
}

impl Tariff {
    pub fn option(&self, id: PaymentOptionId) -> Option<&PaymentOption> {
        self.payment_options.iter().find(|option| option.id == id)
    }

    pub fn first_option(&self) -> Option<&PaymentOption> {
        self.payment_options.first()
    }
}

fn null_as_empty<'de, D>(deserializer: D) -> Result<Vec<PaymentOption>, D::Error>
where
    D: Deserializer<'de>,
{
    Ok(Option::<Vec<PaymentOption>>::deserialize(deserializer)?.unwrap_or_default())
}
