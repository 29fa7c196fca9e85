//! Tests for equity-curve construction.

#[cfg(test)]
mod tests {
    use std::collections::BTreeMap;
    use std::sync::Arc;

    use async_trait::async_trait;
    use chrono::{NaiveDate, TimeZone, Utc};
    use rust_decimal::Decimal;
    use rust_decimal_macros::dec;

    use profitfolio_market_data::{MarketDataError, Quote, QuoteHistoryProvider};

    use crate::activities::Activity;
    use crate::portfolio::series::DailySeries;
    use crate::portfolio::{build_equity_curve, EquityCurveService};

    fn d(day: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(2023, 6, day).unwrap()
    }

    fn trade(day: u32, symbol: &str, quantity: Decimal, price: Decimal) -> Activity {
        let timestamp = d(day).and_hms_opt(10, 0, 0).unwrap();
        Activity::trade(timestamp, symbol, quantity, price, -quantity * price, None)
    }

    fn prices(entries: &[(u32, Decimal)]) -> DailySeries {
        entries.iter().map(|(day, px)| (d(*day), *px)).collect()
    }

    #[test]
    fn test_equity_is_position_times_price_when_fully_priced() {
        let activities = vec![
            trade(1, "AAPL", dec!(10), dec!(100)),
            trade(3, "AAPL", dec!(5), dec!(110)),
        ];
        let priced = BTreeMap::from([(
            "AAPL".to_string(),
            prices(&[(1, dec!(100)), (2, dec!(105)), (3, dec!(110)), (4, dec!(120))]),
        )]);

        let equity = build_equity_curve(&activities, &priced);

        assert_eq!(equity[&d(1)], dec!(1000)); // 10 x 100
        assert_eq!(equity[&d(2)], dec!(1050)); // 10 x 105
        assert_eq!(equity[&d(3)], dec!(1650)); // 15 x 110
        assert_eq!(equity[&d(4)], dec!(1800)); // 15 x 120
        assert_eq!(equity.len(), 4);
    }

    #[test]
    fn test_positions_forward_fill_across_price_only_dates() {
        let activities = vec![trade(1, "VTI", dec!(2), dec!(200))];
        let priced = BTreeMap::from([(
            "VTI".to_string(),
            prices(&[(1, dec!(200)), (5, dec!(210))]),
        )]);

        let equity = build_equity_curve(&activities, &priced);

        // no price between the 1st and the 5th: last close carries forward
        assert_eq!(equity[&d(1)], dec!(400));
        assert_eq!(equity[&d(5)], dec!(420));
        assert_eq!(equity.len(), 2);
    }

    #[test]
    fn test_days_before_first_quote_contribute_zero() {
        // the symbol traded before its first available quote; until the
        // first close arrives its position is unpriced and invisible
        let activities = vec![trade(1, "NEWCO", dec!(100), dec!(10))];
        let priced = BTreeMap::from([("NEWCO".to_string(), prices(&[(3, dec!(12))]))]);

        let equity = build_equity_curve(&activities, &priced);

        assert_eq!(equity[&d(1)], Decimal::ZERO);
        assert_eq!(equity[&d(3)], dec!(1200));
    }

    #[test]
    fn test_unpriced_symbol_is_excluded_not_fatal() {
        // an option contract the provider declined to price: its cost shows
        // up only in cash flows, never in mark-to-market value
        let activities = vec![
            trade(1, "AAPL", dec!(10), dec!(100)),
            trade(2, "TSLA250613P00360000", dec!(1), dec!(360)),
        ];
        let priced = BTreeMap::from([(
            "AAPL".to_string(),
            prices(&[(1, dec!(100)), (2, dec!(100))]),
        )]);

        let equity = build_equity_curve(&activities, &priced);

        assert_eq!(equity[&d(1)], dec!(1000));
        assert_eq!(equity[&d(2)], dec!(1000));
    }

    #[test]
    fn test_fallback_to_cumulative_cash_flows_when_nothing_priced() {
        let activities = vec![
            trade(1, "TSLA250613P00360000", dec!(1), dec!(360)),
            trade(3, "TSLA250613P00360000", dec!(-1), dec!(400)),
        ];

        let equity = build_equity_curve(&activities, &BTreeMap::new());

        assert_eq!(equity[&d(1)], dec!(-360));
        assert_eq!(equity[&d(3)], dec!(40));
        assert_eq!(equity.len(), 2);
    }

    #[test]
    fn test_build_is_idempotent() {
        let activities = vec![
            trade(1, "AAPL", dec!(10), dec!(100)),
            trade(3, "AAPL", dec!(-4), dec!(110)),
        ];
        let priced = BTreeMap::from([(
            "AAPL".to_string(),
            prices(&[(1, dec!(100)), (2, dec!(104)), (3, dec!(110))]),
        )]);

        let first = build_equity_curve(&activities, &priced);
        let second = build_equity_curve(&activities, &priced);

        assert_eq!(first, second);
    }

    // ------------------------------------------------------------------
    // EquityCurveService against a fixture provider
    // ------------------------------------------------------------------

    struct FixtureProvider {
        histories: BTreeMap<String, Vec<(NaiveDate, Decimal)>>,
        fail_with: Option<fn() -> MarketDataError>,
    }

    impl FixtureProvider {
        fn new(histories: BTreeMap<String, Vec<(NaiveDate, Decimal)>>) -> Self {
            Self {
                histories,
                fail_with: None,
            }
        }
    }

    #[async_trait]
    impl QuoteHistoryProvider for FixtureProvider {
        fn id(&self) -> &'static str {
            "FIXTURE"
        }

        async fn history(
            &self,
            symbol: &str,
            _start: NaiveDate,
            _end: NaiveDate,
        ) -> Result<Vec<Quote>, MarketDataError> {
            match self.histories.get(symbol) {
                Some(entries) => Ok(entries
                    .iter()
                    .map(|(date, close)| {
                        Quote::new(
                            Utc.from_utc_datetime(&date.and_hms_opt(21, 0, 0).unwrap()),
                            *close,
                            "USD".to_string(),
                            "FIXTURE".to_string(),
                        )
                    })
                    .collect()),
                None => match self.fail_with {
                    Some(make_error) => Err(make_error()),
                    None => Err(MarketDataError::SymbolNotFound(symbol.to_string())),
                },
            }
        }
    }

    #[tokio::test]
    async fn test_service_prices_known_symbols_and_skips_unknown() {
        let provider = FixtureProvider::new(BTreeMap::from([(
            "AAPL".to_string(),
            vec![(d(1), dec!(100)), (d(2), dec!(110))],
        )]));
        let service = EquityCurveService::new(Arc::new(provider));

        let activities = vec![
            trade(1, "AAPL", dec!(10), dec!(100)),
            trade(2, "TSLA250613P00360000", dec!(1), dec!(360)),
        ];

        let equity = service.daily_equity(&activities, d(2)).await.unwrap();

        assert_eq!(equity[&d(1)], dec!(1000));
        assert_eq!(equity[&d(2)], dec!(1100));
    }

    #[tokio::test]
    async fn test_service_falls_back_when_no_symbol_is_priceable() {
        let provider = FixtureProvider::new(BTreeMap::new());
        let service = EquityCurveService::new(Arc::new(provider));

        let activities = vec![trade(1, "UNKNOWN", dec!(2), dec!(50))];

        let equity = service.daily_equity(&activities, d(3)).await.unwrap();

        assert_eq!(equity[&d(1)], dec!(-100));
    }

    #[tokio::test]
    async fn test_service_propagates_hard_provider_failures() {
        let provider = FixtureProvider {
            histories: BTreeMap::new(),
            fail_with: Some(|| MarketDataError::ProviderError {
                provider: "FIXTURE".to_string(),
                message: "connection reset".to_string(),
            }),
        };
        let service = EquityCurveService::new(Arc::new(provider));

        let activities = vec![trade(1, "AAPL", dec!(1), dec!(100))];

        assert!(service.daily_equity(&activities, d(2)).await.is_err());
    }

    #[tokio::test]
    async fn test_service_rejects_empty_activity_sets() {
        let provider = FixtureProvider::new(BTreeMap::new());
        let service = EquityCurveService::new(Arc::new(provider));

        assert!(service.daily_equity(&[], d(1)).await.is_err());
    }
}
