//! The user's in-progress form selection.

use exchange_rates::Ticker;
use serde::{Deserialize, Serialize};

use super::tariff::{PaymentOptionId, TariffId};

/// One of the three selectable form fields.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SelectionField {
    Tariff,
    Currency,
    PaymentOption,
}

impl std::fmt::Display for SelectionField {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let name = match self {
            SelectionField::Tariff => "tariff",
            SelectionField::Currency => "currency",
            SelectionField::PaymentOption => "payment option",
        };
        f.write_str(name)
    }
}

/// Tariff, currency and payment option picked by the user.
///
/// `payment_option_id`, when set, belongs to the tariff named by `tariff_id`.
/// The calculator re-establishes this whenever `tariff_id` changes; nothing
/// re-checks it if the catalog itself changes.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct FormSelection {
    pub tariff_id: Option<TariffId>,
    pub currency: Option<Ticker>,
    pub payment_option_id: Option<PaymentOptionId>,
}

impl FormSelection {
    pub fn is_complete(&self) -> bool {
        self.tariff_id.is_some() && self.currency.is_some() && self.payment_option_id.is_some()
    }

    /// Fields still unset, in form order.
    pub fn missing_fields(&self) -> Vec<SelectionField> {
        let mut missing = Vec::new();
        if self.tariff_id.is_none() {
            missing.push(SelectionField::Tariff);
        }
        if self.currency.is_none() {
            missing.push(SelectionField::Currency);
        }
        if self.payment_option_id.is_none() {
            missing.push(SelectionField::PaymentOption);
        }
        missing
    }
}
