//! Derivation graph.
//!
//! Pure functions from the datasets and the form selection to the values the
//! selectors and the total display show. Every function is total: a lookup
//! miss degrades to `0.0`, an empty vector, `None` or `""`.
//!
//! Dependency order:
//! `selected_tariff` → `currency_default` / `period_options_view` →
//! `exchange_rate` → `total_amount` / `discount`; `amount_currency_label` and
//! `can_submit` read the selection directly.

use exchange_rates::{find_entry, lookup_rate, round2, Currency, ExchangeRateEntry, Ticker};
use pricing_types::{
    CurrencyOptionView, DiscountRule, FormSelection, PaymentOption, PaymentOptionId,
    PeriodOptionView, Tariff, TariffId, TariffOptionView,
};

/// Currency shown before any tariff is picked.
pub const FALLBACK_CURRENCY: Currency = Currency::RUB;

/// Position of the first tariff with the given id.
pub fn selected_tariff_index(tariffs: &[Tariff], tariff_id: Option<TariffId>) -> Option<usize> {
    let id = tariff_id?;
    tariffs.iter().position(|tariff| tariff.id == id)
}

/// First tariff with the given id.
pub fn selected_tariff(tariffs: &[Tariff], tariff_id: Option<TariffId>) -> Option<&Tariff> {
    selected_tariff_index(tariffs, tariff_id).and_then(|index| tariffs.get(index))
}

pub fn tariff_options_view(tariffs: &[Tariff]) -> Vec<TariffOptionView> {
    tariffs
        .iter()
        .map(|tariff| TariffOptionView {
            id: tariff.id,
            name: tariff.name.clone(),
        })
        .collect()
}

pub fn currency_default(selected: Option<&Tariff>) -> Currency {
    selected.map_or(FALLBACK_CURRENCY, |tariff| tariff.base_currency)
}

pub fn period_options_view(selected: Option<&Tariff>) -> Vec<PeriodOptionView> {
    selected
        .map(|tariff| {
            tariff
                .payment_options
                .iter()
                .map(|option| PeriodOptionView {
                    id: option.id,
                    payment_period: option.payment_period,
                    label: option.payment_period.label().to_string(),
                })
                .collect()
        })
        .unwrap_or_default()
}

pub fn selected_payment_option(
    selected: Option<&Tariff>,
    payment_option_id: Option<PaymentOptionId>,
) -> Option<&PaymentOption> {
    selected?.option(payment_option_id?)
}

/// Targets offered for the selected tariff.
///
/// Lists the tickers the rate entry for the tariff's base currency converts
/// into. Falls back to every known currency when there is no such entry.
pub fn currency_options_view(
    selected: Option<&Tariff>,
    exchange_rates: &[ExchangeRateEntry],
) -> Vec<CurrencyOptionView> {
    let targets = selected
        .and_then(|tariff| tariff.base_currency.ticker())
        .and_then(|base| find_entry(exchange_rates, &base))
        .map(ExchangeRateEntry::targets)
        .filter(|targets| !targets.is_empty());

    match targets {
        Some(targets) => targets
            .into_iter()
            .map(CurrencyOptionView::from_ticker)
            .collect(),
        None => Currency::all()
            .iter()
            .filter_map(Currency::ticker)
            .map(CurrencyOptionView::from_ticker)
            .collect(),
    }
}

/// Multiplier from the tariff's base currency into the selected currency.
///
/// Zero unless a tariff, a currency and a payment option are all selected.
/// Zero as well when the table has no entry for the base currency or the
/// entry does not list the target.
pub fn exchange_rate(
    selected: Option<&Tariff>,
    currency: Option<&Ticker>,
    payment_option_id: Option<PaymentOptionId>,
    exchange_rates: &[ExchangeRateEntry],
) -> f64 {
    let (Some(tariff), Some(target), Some(_)) = (selected, currency, payment_option_id) else {
        return 0.0;
    };
    tariff
        .base_currency
        .ticker()
        .and_then(|base| lookup_rate(exchange_rates, &base, target))
        .filter(|rate| rate.is_finite())
        .unwrap_or(0.0)
}

/// Option price converted at `exchange_rate`, rounded to cents.
pub fn total_amount(
    selected: Option<&Tariff>,
    payment_option_id: Option<PaymentOptionId>,
    exchange_rate: f64,
) -> f64 {
    selected_payment_option(selected, payment_option_id)
        .map_or(0.0, |option| round2(option.base_price * exchange_rate))
}

fn raw_discount<R: DiscountRule + ?Sized>(
    selected: Option<&Tariff>,
    payment_option_id: Option<PaymentOptionId>,
    currency: Option<&Ticker>,
    tariff_id: Option<TariffId>,
    rule: &R,
) -> Option<f64> {
    if currency.is_none() || tariff_id.is_none() {
        return None;
    }
    let tariff = selected?;
    let option = tariff.option(payment_option_id?)?;
    Some(rule.discount(tariff, option)).filter(|amount| amount.is_finite())
}

/// Discount in the tariff's base currency, rounded to cents.
pub fn base_discount<R: DiscountRule + ?Sized>(
    selected: Option<&Tariff>,
    payment_option_id: Option<PaymentOptionId>,
    currency: Option<&Ticker>,
    tariff_id: Option<TariffId>,
    rule: &R,
) -> f64 {
    raw_discount(selected, payment_option_id, currency, tariff_id, rule).map_or(0.0, round2)
}

/// Discount in the selected currency.
///
/// Converted before rounding, the same order `total_amount` uses.
pub fn discount<R: DiscountRule + ?Sized>(
    selected: Option<&Tariff>,
    payment_option_id: Option<PaymentOptionId>,
    currency: Option<&Ticker>,
    tariff_id: Option<TariffId>,
    rule: &R,
    exchange_rate: f64,
) -> f64 {
    raw_discount(selected, payment_option_id, currency, tariff_id, rule)
        .map_or(0.0, |amount| round2(amount * exchange_rate))
}

/// Suffix for the amount display: `""` or `" XXX"`.
pub fn amount_currency_label(currency: Option<&Ticker>) -> String {
    currency.map_or_else(String::new, |ticker| format!(" {}", ticker))
}

pub fn can_submit(selection: &FormSelection) -> bool {
    selection.is_complete()
}

/// Field values the reset rule writes after a tariff change.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TariffReset {
    pub currency: Option<Ticker>,
    pub payment_option_id: Option<PaymentOptionId>,
}

/// Currency and payment option implied by a newly selected tariff.
///
/// A tariff missing from the catalog clears both fields.
pub fn tariff_reset(selected: Option<&Tariff>) -> TariffReset {
    match selected {
        Some(tariff) => TariffReset {
            currency: tariff.base_currency.ticker(),
            payment_option_id: tariff.first_option().map(|option| option.id),
        },
        None => TariffReset {
            currency: None,
            payment_option_id: None,
        },
    }
}
