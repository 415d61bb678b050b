//! Pricing Calculator Component
//!
//! Owns the fetched datasets and the user's form selection, and exposes the
//! derivation graph through memoized reads. All logic here is synchronous
//! except the one-shot loader.

use exchange_rates::{Currency, ExchangeRateEntry, Ticker};
use pricing_types::{
    CalculatorData, CalculatorDataSource, CurrencyOptionView, DiscountRule, FormSelection,
    PaymentOption, PaymentOptionId, PeriodOptionView, QuoteView, SubmissionHandler, SubmissionId,
    SubmissionSnapshot, SubmitError, Tariff, TariffId, TariffOptionView,
};

use crate::derive;
use crate::discount::PeriodDiscount;
use crate::memo::Memo;

/// Identity of the selected tariff: catalog revision plus catalog index.
type TariffKey = (u64, Option<usize>);

/// Result of a load attempt. Failures are logged, never returned as errors.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LoadOutcome {
    Loaded { tariffs: usize, exchange_rates: usize },
    Failed,
    /// The calculator had already loaded; nothing was fetched.
    AlreadyLoaded,
}

#[derive(Debug, Default)]
struct DerivedCells {
    selected_tariff: Memo<(u64, Option<TariffId>), Option<usize>>,
    tariff_options: Memo<u64, Vec<TariffOptionView>>,
    currency_default: Memo<TariffKey, Currency>,
    period_options: Memo<TariffKey, Vec<PeriodOptionView>>,
    currency_options: Memo<(TariffKey, u64), Vec<CurrencyOptionView>>,
    exchange_rate: Memo<(TariffKey, Option<Ticker>, Option<PaymentOptionId>, u64), f64>,
    total_amount: Memo<(TariffKey, Option<PaymentOptionId>, f64), f64>,
    base_discount: Memo<(TariffKey, FormSelection), f64>,
    discount: Memo<(TariffKey, FormSelection, f64), f64>,
    currency_label: Memo<Option<Ticker>, String>,
}

/// Tariff pricing calculator.
///
/// Generic over `D: DiscountRule` so the discount policy is injected, the
/// same way adapters are injected elsewhere in the workspace.
#[derive(Debug)]
pub struct Calculator<D: DiscountRule = PeriodDiscount> {
    tariffs: Vec<Tariff>,
    exchange_rates: Vec<ExchangeRateEntry>,
    tariffs_revision: u64,
    rates_revision: u64,
    selection: FormSelection,
    loading: bool,
    loaded: bool,
    discount_rule: D,
    cells: DerivedCells,
}

impl Calculator<PeriodDiscount> {
    /// Creates an empty calculator with the default discount rule.
    pub fn new() -> Self {
        Self::with_discount_rule(PeriodDiscount)
    }
}

impl Default for Calculator<PeriodDiscount> {
    fn default() -> Self {
        Self::new()
    }
}

impl<D: DiscountRule> Calculator<D> {
    /// Creates an empty calculator. It reports `is_loading()` until
    /// [`Calculator::load`] completes.
    pub fn with_discount_rule(discount_rule: D) -> Self {
        Self {
            tariffs: Vec::new(),
            exchange_rates: Vec::new(),
            tariffs_revision: 0,
            rates_revision: 0,
            selection: FormSelection::default(),
            loading: true,
            loaded: false,
            discount_rule,
            cells: DerivedCells::default(),
        }
    }

    /// Creates a calculator and runs the loader against `source`.
    pub async fn mount<S>(source: &S, discount_rule: D) -> Self
    where
        S: CalculatorDataSource + ?Sized,
    {
        let mut calculator = Self::with_discount_rule(discount_rule);
        calculator.load(source).await;
        calculator
    }

    // ─────────────────────────────────────────────────────────────────────────────
    // State Store
    // ─────────────────────────────────────────────────────────────────────────────

    pub fn is_loading(&self) -> bool {
        self.loading
    }

    pub fn tariffs(&self) -> &[Tariff] {
        &self.tariffs
    }

    pub fn exchange_rates(&self) -> &[ExchangeRateEntry] {
        &self.exchange_rates
    }

    pub fn selection(&self) -> &FormSelection {
        &self.selection
    }

    pub fn discount_rule(&self) -> &D {
        &self.discount_rule
    }

    // ─────────────────────────────────────────────────────────────────────────────
    // Loader
    // ─────────────────────────────────────────────────────────────────────────────

    /// Fetches both datasets once.
    ///
    /// On success the catalog and the rate table are replaced back to back.
    /// On failure the error is logged and both stay empty. Either way the
    /// loading flag is cleared last. Calls after the first are ignored.
    #[tracing::instrument(skip_all)]
    pub async fn load<S>(&mut self, source: &S) -> LoadOutcome
    where
        S: CalculatorDataSource + ?Sized,
    {
        if self.loaded {
            tracing::warn!("Calculator data already loaded, ignoring reload");
            return LoadOutcome::AlreadyLoaded;
        }

        let outcome = match source.fetch().await {
            Ok(data) => {
                let outcome = LoadOutcome::Loaded {
                    tariffs: data.tariffs.len(),
                    exchange_rates: data.exchange_rates.len(),
                };
                self.replace_data(data);
                tracing::info!(?outcome, "Calculator data loaded");
                outcome
            }
            Err(e) => {
                tracing::error!("Failed to load calculator data: {}", e);
                LoadOutcome::Failed
            }
        };

        self.loaded = true;
        self.loading = false;
        outcome
    }

    fn replace_data(&mut self, data: CalculatorData) {
        self.tariffs = data.tariffs;
        self.tariffs_revision += 1;
        self.exchange_rates = data.exchange_rates;
        self.rates_revision += 1;
    }

    // ─────────────────────────────────────────────────────────────────────────────
    // Selection Setters
    // ─────────────────────────────────────────────────────────────────────────────

    /// Selects a tariff. A change of value resets currency and payment option.
    pub fn set_tariff(&mut self, tariff_id: Option<TariffId>) {
        tracing::debug!(?tariff_id, "Tariff selected");
        let previous = std::mem::replace(&mut self.selection.tariff_id, tariff_id);
        if previous != tariff_id {
            self.apply_tariff_reset();
        }
    }

    pub fn set_currency(&mut self, currency: Option<Ticker>) {
        tracing::debug!(?currency, "Currency selected");
        self.selection.currency = currency;
    }

    pub fn set_payment_option(&mut self, payment_option_id: Option<PaymentOptionId>) {
        tracing::debug!(?payment_option_id, "Payment option selected");
        self.selection.payment_option_id = payment_option_id;
    }

    fn apply_tariff_reset(&mut self) {
        let reset = derive::tariff_reset(self.selected_tariff());
        tracing::debug!(
            tariff_id = ?self.selection.tariff_id,
            currency = ?reset.currency,
            payment_option_id = ?reset.payment_option_id,
            "Selection reset after tariff change"
        );
        self.selection.currency = reset.currency;
        self.selection.payment_option_id = reset.payment_option_id;
    }

    // ─────────────────────────────────────────────────────────────────────────────
    // Derived Values
    // ─────────────────────────────────────────────────────────────────────────────

    fn selected_index(&self) -> Option<usize> {
        let key = (self.tariffs_revision, self.selection.tariff_id);
        self.cells.selected_tariff.get(key, || {
            derive::selected_tariff_index(&self.tariffs, self.selection.tariff_id)
        })
    }

    fn tariff_key(&self) -> TariffKey {
        (self.tariffs_revision, self.selected_index())
    }

    pub fn selected_tariff(&self) -> Option<&Tariff> {
        self.selected_index().and_then(|index| self.tariffs.get(index))
    }

    pub fn selected_payment_option(&self) -> Option<&PaymentOption> {
        derive::selected_payment_option(self.selected_tariff(), self.selection.payment_option_id)
    }

    pub fn tariff_options(&self) -> Vec<TariffOptionView> {
        self.cells
            .tariff_options
            .get(self.tariffs_revision, || derive::tariff_options_view(&self.tariffs))
    }

    pub fn currency_default(&self) -> Currency {
        self.cells.currency_default.get(self.tariff_key(), || {
            derive::currency_default(self.selected_tariff())
        })
    }

    pub fn period_options(&self) -> Vec<PeriodOptionView> {
        self.cells.period_options.get(self.tariff_key(), || {
            derive::period_options_view(self.selected_tariff())
        })
    }

    pub fn currency_options(&self) -> Vec<CurrencyOptionView> {
        let key = (self.tariff_key(), self.rates_revision);
        self.cells.currency_options.get(key, || {
            derive::currency_options_view(self.selected_tariff(), &self.exchange_rates)
        })
    }

    pub fn exchange_rate(&self) -> f64 {
        let key = (
            self.tariff_key(),
            self.selection.currency.clone(),
            self.selection.payment_option_id,
            self.rates_revision,
        );
        self.cells.exchange_rate.get(key, || {
            derive::exchange_rate(
                self.selected_tariff(),
                self.selection.currency.as_ref(),
                self.selection.payment_option_id,
                &self.exchange_rates,
            )
        })
    }

    pub fn total_amount(&self) -> f64 {
        let exchange_rate = self.exchange_rate();
        let key = (
            self.tariff_key(),
            self.selection.payment_option_id,
            exchange_rate,
        );
        self.cells.total_amount.get(key, || {
            derive::total_amount(
                self.selected_tariff(),
                self.selection.payment_option_id,
                exchange_rate,
            )
        })
    }

    /// Discount in the tariff's base currency.
    pub fn base_discount(&self) -> f64 {
        let key = (self.tariff_key(), self.selection.clone());
        self.cells.base_discount.get(key, || {
            derive::base_discount(
                self.selected_tariff(),
                self.selection.payment_option_id,
                self.selection.currency.as_ref(),
                self.selection.tariff_id,
                &self.discount_rule,
            )
        })
    }

    /// Discount in the selected currency.
    pub fn discount(&self) -> f64 {
        let exchange_rate = self.exchange_rate();
        let key = (self.tariff_key(), self.selection.clone(), exchange_rate);
        self.cells.discount.get(key, || {
            derive::discount(
                self.selected_tariff(),
                self.selection.payment_option_id,
                self.selection.currency.as_ref(),
                self.selection.tariff_id,
                &self.discount_rule,
                exchange_rate,
            )
        })
    }

    pub fn amount_currency_label(&self) -> String {
        self.cells
            .currency_label
            .get(self.selection.currency.clone(), || {
                derive::amount_currency_label(self.selection.currency.as_ref())
            })
    }

    pub fn can_submit(&self) -> bool {
        derive::can_submit(&self.selection)
    }

    /// Everything the total display needs, read in one pass.
    pub fn quote(&self) -> QuoteView {
        let total_amount = self.total_amount();
        let currency_label = self.amount_currency_label();
        QuoteView {
            tariff_name: self.selected_tariff().map(|tariff| tariff.name.clone()),
            payment_period: self
                .selected_payment_option()
                .map(|option| option.payment_period),
            exchange_rate: self.exchange_rate(),
            total_amount,
            discount: self.discount(),
            display: format!("{:.2}{}", total_amount, currency_label),
            currency_label,
            can_submit: self.can_submit(),
        }
    }

    /// Number of recomputations per derived cell, for diagnostics.
    pub fn recomputations(&self) -> DerivedStats {
        DerivedStats {
            selected_tariff: self.cells.selected_tariff.computations(),
            exchange_rate: self.cells.exchange_rate.computations(),
            total_amount: self.cells.total_amount.computations(),
            discount: self.cells.discount.computations(),
        }
    }

    // ─────────────────────────────────────────────────────────────────────────────
    // Submission
    // ─────────────────────────────────────────────────────────────────────────────

    /// Hands a detached snapshot of the form to `handler`.
    ///
    /// Refuses without calling the handler unless all three fields are set.
    #[tracing::instrument(skip_all)]
    pub async fn submit<H>(&self, handler: &H) -> Result<SubmissionId, SubmitError>
    where
        H: SubmissionHandler + ?Sized,
    {
        if !self.can_submit() {
            let missing = self.selection.missing_fields();
            tracing::warn!(?missing, "Submit refused, selection incomplete");
            return Err(SubmitError::Incomplete { missing });
        }

        let snapshot = SubmissionSnapshot::new(self.selection.clone(), self.quote());
        let id = snapshot.id;
        handler.submit(snapshot).await?;

        tracing::info!(submission_id = %id, "Selection submitted");
        Ok(id)
    }
}

/// Recomputation counters of the main derived cells.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct DerivedStats {
    pub selected_tariff: u64,
    pub exchange_rate: u64,
    pub total_amount: u64,
    pub discount: u64,
}
