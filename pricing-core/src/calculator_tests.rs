//! Calculator component tests.

#[cfg(test)]
pub(crate) mod tests {
    use std::sync::atomic::{AtomicUsize, Ordering};

    use async_trait::async_trait;

    use pricing_types::{
        CalculatorData, CalculatorDataSource, Currency, ExchangeRateEntry, FormSelection, LoadError,
        PaymentOption, PaymentOptionId, PaymentPeriod, SelectionField, SubmissionHandler,
        SubmissionSnapshot, SubmitError, Tariff, TariffId, Ticker,
    };

    use crate::{Calculator, LoadOutcome, LoggingSubmissionHandler, NoDiscount, PeriodDiscount};

    /// Data source that either serves fixed data or fails, counting calls.
    pub struct MockSource {
        data: Option<CalculatorData>,
        calls: AtomicUsize,
    }

    impl MockSource {
        pub fn serving(data: CalculatorData) -> Self {
            Self {
                data: Some(data),
                calls: AtomicUsize::new(0),
            }
        }

        pub fn failing() -> Self {
            Self {
                data: None,
                calls: AtomicUsize::new(0),
            }
        }

        pub fn calls(&self) -> usize {
            self.calls.load(Ordering::SeqCst)
        }
    }

    #[async_trait]
    impl CalculatorDataSource for MockSource {
        async fn fetch(&self) -> Result<CalculatorData, LoadError> {
            self.calls.fetch_add(1, Ordering::SeqCst);
            self.data
                .clone()
                .ok_or_else(|| LoadError::Unavailable("connection refused".into()))
        }
    }

    struct RejectingHandler;

    #[async_trait]
    impl SubmissionHandler for RejectingHandler {
        async fn submit(&self, _snapshot: SubmissionSnapshot) -> Result<(), SubmitError> {
            Err(SubmitError::Handler("checkout offline".into()))
        }
    }

    fn option(id: u64, base_price: f64, payment_period: PaymentPeriod) -> PaymentOption {
        PaymentOption {
            id: PaymentOptionId::new(id),
            base_price,
            payment_period,
        }
    }

    fn ticker(code: &str) -> Ticker {
        code.parse().unwrap()
    }

    fn sample_data() -> CalculatorData {
        CalculatorData {
            tariffs: vec![
                Tariff {
                    id: TariffId::new(1),
                    name: "Pro".into(),
                    base_currency: Currency::USD,
                    payment_options: vec![
                        option(10, 9.99, PaymentPeriod::Month),
                        option(11, 99.0, PaymentPeriod::Year),
                    ],
                },
                Tariff {
                    id: TariffId::new(2),
                    name: "Starter".into(),
                    base_currency: Currency::RUB,
                    payment_options: vec![],
                },
                Tariff {
                    id: TariffId::new(3),
                    name: "Bullion".into(),
                    base_currency: Currency::Unknown,
                    payment_options: vec![option(30, 5.0, PaymentPeriod::Month)],
                },
            ],
            exchange_rates: vec![
                ExchangeRateEntry::new("USD", [("EUR", 0.9), ("RUB", 92.5), ("USD", 1.0)]),
                ExchangeRateEntry::new("EUR", [("USD", 1.11)]),
            ],
        }
    }

    async fn loaded_calculator() -> Calculator {
        Calculator::mount(&MockSource::serving(sample_data()), PeriodDiscount).await
    }

    // ─────────────────────────────────────────────────────────────────────────────
    // Loader
    // ─────────────────────────────────────────────────────────────────────────────

    #[test]
    fn test_new_calculator_is_loading_and_empty() {
        let calculator = Calculator::new();

        assert!(calculator.is_loading());
        assert!(calculator.tariffs().is_empty());
        assert!(calculator.exchange_rates().is_empty());
        assert_eq!(calculator.selection(), &FormSelection::default());
    }

    #[tokio::test]
    async fn test_load_success_populates_both_datasets() {
        let source = MockSource::serving(sample_data());
        let mut calculator = Calculator::new();

        let outcome = calculator.load(&source).await;

        assert_eq!(
            outcome,
            LoadOutcome::Loaded {
                tariffs: 3,
                exchange_rates: 2
            }
        );
        assert!(!calculator.is_loading());
        assert_eq!(calculator.tariffs().len(), 3);
        assert_eq!(calculator.exchange_rates().len(), 2);
    }

    #[tokio::test]
    async fn test_load_failure_clears_loading_and_stays_empty() {
        let source = MockSource::failing();
        let mut calculator = Calculator::new();

        let outcome = calculator.load(&source).await;

        assert_eq!(outcome, LoadOutcome::Failed);
        assert!(!calculator.is_loading());
        assert!(calculator.tariffs().is_empty());
        assert!(calculator.exchange_rates().is_empty());
        assert!(calculator.tariff_options().is_empty());
        assert!(!calculator.can_submit());
    }

    #[tokio::test]
    async fn test_load_runs_once() {
        let source = MockSource::serving(sample_data());
        let mut calculator = Calculator::new();

        calculator.load(&source).await;
        let second = calculator.load(&source).await;

        assert_eq!(second, LoadOutcome::AlreadyLoaded);
        assert_eq!(source.calls(), 1);
    }

    #[tokio::test]
    async fn test_failed_load_is_not_retried() {
        let source = MockSource::failing();
        let mut calculator = Calculator::new();

        calculator.load(&source).await;
        calculator.load(&MockSource::serving(sample_data())).await;

        assert!(calculator.tariffs().is_empty());
        assert_eq!(source.calls(), 1);
    }

    // ─────────────────────────────────────────────────────────────────────────────
    // Reset Rule
    // ─────────────────────────────────────────────────────────────────────────────

    #[tokio::test]
    async fn test_selecting_tariff_defaults_currency_and_option() {
        let mut calculator = loaded_calculator().await;

        calculator.set_tariff(Some(TariffId::new(1)));

        assert_eq!(calculator.selection().currency, Some(ticker("USD")));
        assert_eq!(
            calculator.selection().payment_option_id,
            Some(PaymentOptionId::new(10))
        );
    }

    #[tokio::test]
    async fn test_switching_tariff_overwrites_user_choices() {
        let mut calculator = loaded_calculator().await;
        calculator.set_tariff(Some(TariffId::new(1)));
        calculator.set_currency(Some(ticker("EUR")));
        calculator.set_payment_option(Some(PaymentOptionId::new(11)));

        calculator.set_tariff(Some(TariffId::new(2)));

        assert_eq!(calculator.selection().currency, Some(ticker("RUB")));
        assert_eq!(calculator.selection().payment_option_id, None);
    }

    #[tokio::test]
    async fn test_reselecting_same_tariff_keeps_choices() {
        let mut calculator = loaded_calculator().await;
        calculator.set_tariff(Some(TariffId::new(1)));
        calculator.set_currency(Some(ticker("EUR")));
        calculator.set_payment_option(Some(PaymentOptionId::new(11)));

        calculator.set_tariff(Some(TariffId::new(1)));

        assert_eq!(calculator.selection().currency, Some(ticker("EUR")));
        assert_eq!(
            calculator.selection().payment_option_id,
            Some(PaymentOptionId::new(11))
        );
    }

    #[tokio::test]
    async fn test_unknown_tariff_clears_dependent_fields() {
        let mut calculator = loaded_calculator().await;
        calculator.set_tariff(Some(TariffId::new(1)));

        calculator.set_tariff(Some(TariffId::new(404)));

        assert_eq!(calculator.selection().tariff_id, Some(TariffId::new(404)));
        assert_eq!(calculator.selection().currency, None);
        assert_eq!(calculator.selection().payment_option_id, None);
        assert!(calculator.selected_tariff().is_none());
    }

    #[tokio::test]
    async fn test_clearing_tariff_clears_dependent_fields() {
        let mut calculator = loaded_calculator().await;
        calculator.set_tariff(Some(TariffId::new(1)));

        calculator.set_tariff(None);

        assert_eq!(calculator.selection(), &FormSelection::default());
    }

    #[tokio::test]
    async fn test_duplicate_tariff_id_selects_first_match() {
        let mut data = sample_data();
        let mut shadow = data.tariffs[0].clone();
        shadow.name = "Shadow".into();
        shadow.base_currency = Currency::EUR;
        data.tariffs.push(shadow);
        let mut calculator = Calculator::mount(&MockSource::serving(data), PeriodDiscount).await;

        calculator.set_tariff(Some(TariffId::new(1)));

        assert_eq!(
            calculator.selected_tariff().map(|tariff| tariff.name.as_str()),
            Some("Pro")
        );
        assert_eq!(calculator.currency_default(), Currency::USD);
        assert_eq!(calculator.selection().currency, Some(ticker("USD")));
    }

    #[tokio::test]
    async fn test_tariff_without_ticker_leaves_currency_unset() {
        let mut calculator = loaded_calculator().await;

        calculator.set_tariff(Some(TariffId::new(3)));

        assert_eq!(calculator.selection().currency, None);
        assert_eq!(
            calculator.selection().payment_option_id,
            Some(PaymentOptionId::new(30))
        );
        assert!(!calculator.can_submit());
    }

    #[tokio::test]
    async fn test_setters_do_not_validate() {
        let mut calculator = loaded_calculator().await;
        calculator.set_tariff(Some(TariffId::new(1)));

        calculator.set_currency(Some(ticker("JPY")));
        calculator.set_payment_option(Some(PaymentOptionId::new(999)));

        assert_eq!(calculator.selection().currency, Some(ticker("JPY")));
        assert_eq!(calculator.exchange_rate(), 0.0);
        assert_eq!(calculator.total_amount(), 0.0);
        assert!(calculator.can_submit());
    }

    // ─────────────────────────────────────────────────────────────────────────────
    // Derived Values
    // ─────────────────────────────────────────────────────────────────────────────

    #[tokio::test]
    async fn test_usd_to_eur_scenario() {
        let mut calculator = loaded_calculator().await;

        calculator.set_tariff(Some(TariffId::new(1)));
        calculator.set_currency(Some(ticker("EUR")));

        assert_eq!(calculator.exchange_rate(), 0.9);
        assert_eq!(calculator.total_amount(), 8.99);
        assert_eq!(calculator.amount_currency_label(), " EUR");
        assert_eq!(calculator.quote().display, "8.99 EUR");
        assert!(calculator.can_submit());
    }

    #[tokio::test]
    async fn test_nothing_selected_yields_zeros() {
        let calculator = loaded_calculator().await;

        assert_eq!(calculator.total_amount(), 0.0);
        assert_eq!(calculator.discount(), 0.0);
        assert_eq!(calculator.exchange_rate(), 0.0);
        assert_eq!(calculator.amount_currency_label(), "");
        assert_eq!(calculator.currency_default(), Currency::RUB);
        assert!(calculator.period_options().is_empty());
        assert!(!calculator.can_submit());
    }

    #[tokio::test]
    async fn test_total_matches_rate_for_every_option_and_target() {
        let mut calculator = loaded_calculator().await;
        calculator.set_tariff(Some(TariffId::new(1)));
        let tariff = calculator.selected_tariff().unwrap().clone();
        let entry = sample_data().exchange_rates[0].clone();

        for option in &tariff.payment_options {
            for target in entry.targets() {
                let rate = entry.rate_for(&target).unwrap();
                calculator.set_payment_option(Some(option.id));
                calculator.set_currency(Some(target.clone()));

                assert_eq!(
                    calculator.total_amount(),
                    exchange_rates::round2(option.base_price * rate),
                    "option {} into {}",
                    option.id,
                    target
                );
            }
        }
    }

    #[tokio::test]
    async fn test_exchange_rate_zero_cases() {
        let mut calculator = loaded_calculator().await;
        calculator.set_tariff(Some(TariffId::new(1)));

        calculator.set_currency(None);
        assert_eq!(calculator.exchange_rate(), 0.0);

        calculator.set_currency(Some(ticker("EUR")));
        calculator.set_payment_option(None);
        assert_eq!(calculator.exchange_rate(), 0.0);

        // Starter is priced in RUB and the table has no RUB entry
        calculator.set_tariff(Some(TariffId::new(2)));
        calculator.set_payment_option(Some(PaymentOptionId::new(1)));
        assert_eq!(calculator.exchange_rate(), 0.0);
    }

    #[tokio::test]
    async fn test_selector_views() {
        let mut calculator = loaded_calculator().await;

        let tariffs = calculator.tariff_options();
        assert_eq!(tariffs.len(), 3);
        assert_eq!(tariffs[1].name, "Starter");

        calculator.set_tariff(Some(TariffId::new(1)));
        let periods = calculator.period_options();
        assert_eq!(periods.len(), 2);
        assert_eq!(periods[0].payment_period, PaymentPeriod::Month);
        assert_eq!(calculator.currency_default(), Currency::USD);

        let currencies: Vec<String> = calculator
            .currency_options()
            .into_iter()
            .map(|view| view.code.to_string())
            .collect();
        assert_eq!(currencies, vec!["EUR", "RUB", "USD"]);
    }

    #[tokio::test]
    async fn test_period_discount_converted_to_selected_currency() {
        let mut calculator = loaded_calculator().await;
        calculator.set_tariff(Some(TariffId::new(1)));
        calculator.set_payment_option(Some(PaymentOptionId::new(11)));

        // 12 x 9.99 = 119.88 against 99.00
        assert_eq!(calculator.base_discount(), 20.88);
        assert_eq!(calculator.discount(), 20.88);

        calculator.set_currency(Some(ticker("EUR")));
        assert_eq!(calculator.base_discount(), 20.88);
        assert_eq!(calculator.discount(), 18.79);
    }

    #[tokio::test]
    async fn test_no_discount_rule() {
        let mut calculator =
            Calculator::mount(&MockSource::serving(sample_data()), NoDiscount).await;
        calculator.set_tariff(Some(TariffId::new(1)));
        calculator.set_payment_option(Some(PaymentOptionId::new(11)));

        assert_eq!(calculator.discount(), 0.0);
        assert_eq!(calculator.total_amount(), 99.0);
    }

    #[tokio::test]
    async fn test_repeated_reads_are_identical_and_cached() {
        let mut calculator = loaded_calculator().await;
        calculator.set_tariff(Some(TariffId::new(1)));
        calculator.set_currency(Some(ticker("EUR")));

        let first = calculator.quote();
        let stats = calculator.recomputations();
        let second = calculator.quote();

        assert_eq!(first, second);
        assert_eq!(calculator.recomputations(), stats);
    }

    #[tokio::test]
    async fn test_input_change_recomputes_dependents_only() {
        let mut calculator = loaded_calculator().await;
        calculator.set_tariff(Some(TariffId::new(1)));
        calculator.set_currency(Some(ticker("EUR")));
        calculator.total_amount();
        let before = calculator.recomputations();

        calculator.set_currency(Some(ticker("USD")));
        assert_eq!(calculator.total_amount(), 9.99);

        let after = calculator.recomputations();
        assert_eq!(after.selected_tariff, before.selected_tariff);
        assert_eq!(after.exchange_rate, before.exchange_rate + 1);
        assert_eq!(after.total_amount, before.total_amount + 1);
    }

    // ─────────────────────────────────────────────────────────────────────────────
    // Submission
    // ─────────────────────────────────────────────────────────────────────────────

    #[tokio::test]
    async fn test_submit_incomplete_selection_fails() {
        let calculator = loaded_calculator().await;
        let handler = LoggingSubmissionHandler::new();

        let result = calculator.submit(&handler).await;

        match result {
            Err(SubmitError::Incomplete { missing }) => assert_eq!(
                missing,
                vec![
                    SelectionField::Tariff,
                    SelectionField::Currency,
                    SelectionField::PaymentOption
                ]
            ),
            other => panic!("expected Incomplete, got {:?}", other),
        }
        assert!(handler.submissions().is_empty());
    }

    #[tokio::test]
    async fn test_submit_hands_off_detached_snapshot() {
        let mut calculator = loaded_calculator().await;
        let handler = LoggingSubmissionHandler::new();
        calculator.set_tariff(Some(TariffId::new(1)));
        calculator.set_currency(Some(ticker("EUR")));

        let id = calculator.submit(&handler).await.unwrap();
        calculator.set_tariff(Some(TariffId::new(2)));

        let submissions = handler.submissions();
        assert_eq!(submissions.len(), 1);
        assert_eq!(submissions[0].id, id);
        assert_eq!(submissions[0].selection.tariff_id, Some(TariffId::new(1)));
        assert_eq!(submissions[0].selection.currency, Some(ticker("EUR")));
        assert_eq!(submissions[0].quote.total_amount, 8.99);
    }

    #[tokio::test]
    async fn test_submit_propagates_handler_error() {
        let mut calculator = loaded_calculator().await;
        calculator.set_tariff(Some(TariffId::new(1)));

        let result = calculator.submit(&RejectingHandler).await;

        assert!(matches!(result, Err(SubmitError::Handler(_))));
    }
}
