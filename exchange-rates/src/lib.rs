//! Currency Metadata and Exchange Rate Tables
//!
//! Currencies are defined declaratively with the `define_currencies!` macro,
//! which generates the `Currency` enum together with its metadata accessors.
//! Rates themselves are not compiled in: they arrive at runtime as a list of
//! [`ExchangeRateEntry`] values, one per base currency, in the shape served by
//! common exchange-rate APIs (`base_code` plus a `conversion_rates` map).
//!
//! # Adding a New Currency
//! Add a line to the `define_currencies!` invocation:
//! ```ignore
//! define_currencies! {
//!     // ... existing currencies ...
//!     JPY => ("JPY", "¥", "sen", 100),
//! }
//! ```
//!
//! # Example
//! ```
//! use exchange_rates::{lookup_rate, round2, Currency, ExchangeRateEntry, Ticker};
//!
//! let table = vec![ExchangeRateEntry::new("USD", [("EUR", 0.9)])];
//! let eur: Ticker = "eur".parse().unwrap();
//!
//! let rate = lookup_rate(&table, &Currency::USD.ticker().unwrap(), &eur);
//! assert_eq!(rate, Some(0.9));
//! assert_eq!(round2(9.99 * 0.9), 8.99);
//! ```

use std::collections::HashMap;

use rust_decimal::{Decimal, RoundingStrategy};
use std::fmt;

use serde::{Deserialize, Serialize};

// ─────────────────────────────────────────────────────────────────────────────
// Errors
// ─────────────────────────────────────────────────────────────────────────────

/// Errors produced when parsing currency codes.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum CurrencyError {
    #[error("Invalid ticker '{0}': expected three ASCII letters")]
    InvalidTicker(String),

    #[error("Unknown currency: {0}")]
    UnknownCurrency(String),
}

// ─────────────────────────────────────────────────────────────────────────────
// Ticker
// ─────────────────────────────────────────────────────────────────────────────

/// Three-letter currency code in upper case, e.g. `USD`.
///
/// This is the form used by exchange-rate tables and by the user's currency
/// selection. It is deliberately wider than [`Currency`]: a rate table may list
/// tickers the enumeration does not know about.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct Ticker(String);

impl Ticker {
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl TryFrom<String> for Ticker {
    type Error = CurrencyError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        let trimmed = value.trim();
        if trimmed.len() != 3 || !trimmed.chars().all(|c| c.is_ascii_alphabetic()) {
            return Err(CurrencyError::InvalidTicker(value));
        }
        Ok(Self(trimmed.to_ascii_uppercase()))
    }
}

impl From<Ticker> for String {
    fn from(ticker: Ticker) -> Self {
        ticker.0
    }
}

impl std::str::FromStr for Ticker {
    type Err = CurrencyError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::try_from(s.to_string())
    }
}

impl fmt::Display for Ticker {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

// ─────────────────────────────────────────────────────────────────────────────
// THE MACRO: Defines the Currency enum and its metadata
// ─────────────────────────────────────────────────────────────────────────────

/// Macro to define currencies with auto-generated metadata accessors.
///
/// Every invocation also generates an `Unknown` variant that absorbs codes
/// outside the defined set during deserialization. `Unknown` has no ticker.
///
/// # Syntax
/// ```ignore
/// define_currencies! {
///     CurrencyName => ("CODE", "SYMBOL", "minor_unit", minor_per_major),
/// }
/// ```
#[macro_export]
macro_rules! define_currencies {
    (
        $(
            $name:ident => ($code:literal, $symbol:literal, $minor:literal, $minor_per_major:expr)
        ),* $(,)?
    ) => {
        /// Currencies known to the calculator.
        #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, serde::Serialize, serde::Deserialize)]
        pub enum Currency {
            $(
                #[serde(rename = $code)]
                $name,
            )*
            #[serde(other)]
            Unknown,
        }

        impl Currency {
            /// The ISO code, or `None` for `Unknown`.
            pub fn code(&self) -> Option<&'static str> {
                match self {
                    $(Currency::$name => Some($code),)*
                    Currency::Unknown => None,
                }
            }

            pub fn symbol(&self) -> Option<&'static str> {
                match self {
                    $(Currency::$name => Some($symbol),)*
                    Currency::Unknown => None,
                }
            }

            pub fn minor_unit(&self) -> Option<&'static str> {
                match self {
                    $(Currency::$name => Some($minor),)*
                    Currency::Unknown => None,
                }
            }

            pub fn minor_units_per_major(&self) -> i32 {
                match self {
                    $(Currency::$name => $minor_per_major,)*
                    Currency::Unknown => 100,
                }
            }

            /// Every defined currency, excluding `Unknown`.
            pub fn all() -> &'static [Currency] {
                &[$(Currency::$name),*]
            }

            /// Maps a ticker back onto the enumeration; unlisted tickers become `Unknown`.
            pub fn from_ticker(ticker: &$crate::Ticker) -> Currency {
                match ticker.as_str() {
                    $($code => Currency::$name,)*
                    _ => Currency::Unknown,
                }
            }
        }

        impl std::fmt::Display for Currency {
            fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
                write!(f, "{}", self.code().unwrap_or("UNKNOWN"))
            }
        }

        impl std::str::FromStr for Currency {
            type Err = $crate::CurrencyError;

            fn from_str(s: &str) -> Result<Self, Self::Err> {
                match s.trim().to_uppercase().as_str() {
                    $($code => Ok(Currency::$name),)*
                    _ => Err($crate::CurrencyError::UnknownCurrency(s.to_string())),
                }
            }
        }
    };
}

// ─────────────────────────────────────────────────────────────────────────────
// CURRENCY DEFINITIONS - Add new currencies here!
// ─────────────────────────────────────────────────────────────────────────────

define_currencies! {
    RUB => ("RUB", "₽", "kopeck", 100),
    USD => ("USD", "$", "cent", 100),
    EUR => ("EUR", "€", "cent", 100),
    GBP => ("GBP", "£", "penny", 100),
    KZT => ("KZT", "₸", "tiyn", 100),
    BYN => ("BYN", "Br", "kopeck", 100),
    CNY => ("CNY", "¥", "fen", 100),
    TRY => ("TRY", "₺", "kurus", 100),
}

impl Currency {
    /// Ticker form of this currency. `Unknown` yields nothing.
    pub fn ticker(&self) -> Option<Ticker> {
        self.code().map(|code| Ticker(code.to_string()))
    }
}

// ─────────────────────────────────────────────────────────────────────────────
// Exchange Rate Table
// ─────────────────────────────────────────────────────────────────────────────

/// Conversion multipliers from one base currency to other tickers.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ExchangeRateEntry {
    pub base_code: String,
    #[serde(default)]
    pub conversion_rates: HashMap<String, f64>,
}

impl ExchangeRateEntry {
    pub fn new<K: Into<String>>(
        base_code: impl Into<String>,
        rates: impl IntoIterator<Item = (K, f64)>,
    ) -> Self {
        Self {
            base_code: base_code.into(),
            conversion_rates: rates.into_iter().map(|(k, v)| (k.into(), v)).collect(),
        }
    }

    pub fn is_for(&self, base: &Ticker) -> bool {
        self.base_code.eq_ignore_ascii_case(base.as_str())
    }

    /// Multiplier from the base currency into `target`, if listed.
    pub fn rate_for(&self, target: &Ticker) -> Option<f64> {
        self.conversion_rates.get(target.as_str()).copied()
    }

    /// Listed targets that parse as tickers, sorted.
    pub fn targets(&self) -> Vec<Ticker> {
        let mut targets: Vec<Ticker> = self
            .conversion_rates
            .keys()
            .filter_map(|code| code.parse().ok())
            .collect();
        targets.sort();
        targets
    }
}

/// First entry whose base code matches `base`.
pub fn find_entry<'a>(
    entries: &'a [ExchangeRateEntry],
    base: &Ticker,
) -> Option<&'a ExchangeRateEntry> {
    entries.iter().find(|entry| entry.is_for(base))
}

/// Looks up the multiplier from `base` into `target`.
///
/// Returns `None` when the table has no entry for `base` or the entry does
/// not list `target`.
pub fn lookup_rate(entries: &[ExchangeRateEntry], base: &Ticker, target: &Ticker) -> Option<f64> {
    find_entry(entries, base).and_then(|entry| entry.rate_for(target))
}

/// Rounds to two decimal places, halves away from zero.
///
/// The exact binary value of `value` is rounded, so `1.005` (stored just
/// below the midpoint) becomes `1.00`. The result is the fixed-point string
/// reparsed as `f64`. Non-finite input, and input too large for a `Decimal`,
/// rounds to zero.
pub fn round2(value: f64) -> f64 {
    Decimal::from_f64_retain(value)
        .map(|exact| exact.round_dp_with_strategy(2, RoundingStrategy::MidpointAwayFromZero))
        .and_then(|rounded| rounded.to_string().parse::<f64>().ok())
        .filter(|rounded| rounded.is_finite())
        .unwrap_or(0.0)
}

// ─────────────────────────────────────────────────────────────────────────────
// Tests
// ─────────────────────────────────────────────────────────────────────────────
