//! Data Transfer Objects for the data source, the selectors and submission.

use chrono::{DateTime, Utc};
use exchange_rates::{Currency, ExchangeRateEntry, Ticker};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::domain::{FormSelection, PaymentOptionId, PaymentPeriod, Tariff, TariffId};

// ─────────────────────────────────────────────────────────────────────────────
// Loader DTOs
// ─────────────────────────────────────────────────────────────────────────────

/// Everything the calculator needs from the data source.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CalculatorData {
    #[serde(default)]
    pub tariffs: Vec<Tariff>,
    #[serde(default)]
    pub exchange_rates: Vec<ExchangeRateEntry>,
}

// ─────────────────────────────────────────────────────────────────────────────
// Selector DTOs
// ─────────────────────────────────────────────────────────────────────────────

/// Entry of the tariff selector.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TariffOptionView {
    pub id: TariffId,
    pub name: String,
}

/// Entry of the billing period selector.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PeriodOptionView {
    pub id: PaymentOptionId,
    pub payment_period: PaymentPeriod,
    pub label: String,
}

/// Entry of the currency selector.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CurrencyOptionView {
    pub code: Ticker,
    /// Display symbol, when the ticker is a known currency
    #[serde(skip_serializing_if = "Option::is_none")]
    pub symbol: Option<String>,
}

impl CurrencyOptionView {
    pub fn from_ticker(code: Ticker) -> Self {
        let symbol = Currency::from_ticker(&code).symbol().map(String::from);
        Self { code, symbol }
    }
}

// ─────────────────────────────────────────────────────────────────────────────
// Quote DTOs
// ─────────────────────────────────────────────────────────────────────────────

/// Derived values for the total display, read in one pass.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct QuoteView {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub tariff_name: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub payment_period: Option<PaymentPeriod>,
    pub exchange_rate: f64,
    /// Total in the selected currency, two decimals
    pub total_amount: f64,
    /// Discount in the selected currency, two decimals
    pub discount: f64,
    /// `""` or `" XXX"`
    pub currency_label: String,
    /// e.g. `"8.99 EUR"`
    pub display: String,
    pub can_submit: bool,
}

// ─────────────────────────────────────────────────────────────────────────────
// Submission DTOs
// ─────────────────────────────────────────────────────────────────────────────

/// Unique identifier for a submission.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct SubmissionId(Uuid);

impl SubmissionId {
    /// Creates a new random SubmissionId.
    pub fn new() -> Self {
        Self(Uuid::new_v4())
    }

    pub fn as_uuid(&self) -> &Uuid {
        &self.0
    }
}

impl Default for SubmissionId {
    fn default() -> Self {
        Self::new()
    }
}

impl std::fmt::Display for SubmissionId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Detached copy of the form handed to a submission handler.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SubmissionSnapshot {
    pub id: SubmissionId,
    pub selection: FormSelection,
    pub quote: QuoteView,
    pub captured_at: DateTime<Utc>,
}

impl SubmissionSnapshot {
    pub fn new(selection: FormSelection, quote: QuoteView) -> Self {
        Self {
            id: SubmissionId::new(),
            selection,
            quote,
            captured_at: Utc::now(),
        }
    }
}
