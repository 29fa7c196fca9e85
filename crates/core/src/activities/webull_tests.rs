//! Tests for the Webull export parsers.

#[cfg(test)]
mod tests {
    use crate::activities::webull::{parse_decimal, parse_timestamp};
    use crate::activities::{ActivityError, CsvBatch, WebullOrdersParser, WebullTransfersParser};
    use chrono::{NaiveDate, NaiveDateTime};
    use rust_decimal_macros::dec;

    fn orders_batch(rows: Vec<Vec<&str>>) -> CsvBatch {
        CsvBatch {
            source_file: "Webull_Orders_Records.csv".to_string(),
            headers: [
                "Name",
                "Symbol",
                "Side",
                "Status",
                "Filled",
                "Total Qty",
                "Price",
                "Avg Price",
                "Placed Time",
                "Filled Time",
            ]
            .iter()
            .map(|s| s.to_string())
            .collect(),
            rows: rows
                .into_iter()
                .map(|r| r.into_iter().map(|c| c.to_string()).collect())
                .collect(),
        }
    }

    fn transfers_batch(rows: Vec<Vec<&str>>) -> CsvBatch {
        CsvBatch {
            source_file: "Webull_Transfers.csv".to_string(),
            headers: ["Date", "Type", "Amount", "Status"]
                .iter()
                .map(|s| s.to_string())
                .collect(),
            rows: rows
                .into_iter()
                .map(|r| r.into_iter().map(|c| c.to_string()).collect())
                .collect(),
        }
    }

    #[test]
    fn test_parse_timestamp_strips_timezone_suffix() {
        let ts = parse_timestamp("07/05/2023 09:31:22 EDT").unwrap();
        assert_eq!(
            ts,
            NaiveDateTime::parse_from_str("2023-07-05 09:31:22", "%Y-%m-%d %H:%M:%S").unwrap()
        );
    }

    #[test]
    fn test_parse_timestamp_date_only_resolves_to_midnight() {
        let ts = parse_timestamp("07/05/2023").unwrap();
        assert_eq!(ts.date(), NaiveDate::from_ymd_opt(2023, 7, 5).unwrap());
        assert_eq!(ts.time(), chrono::NaiveTime::from_hms_opt(0, 0, 0).unwrap());
    }

    #[test]
    fn test_parse_timestamp_rejects_garbage() {
        assert!(parse_timestamp("pending").is_none());
        assert!(parse_timestamp("").is_none());
    }

    #[test]
    fn test_parse_decimal_tolerates_broker_formatting() {
        assert_eq!(parse_decimal("$1,234.56"), Some(dec!(1234.56)));
        assert_eq!(parse_decimal(" 3.5 "), Some(dec!(3.5)));
        assert_eq!(parse_decimal("-"), None);
        assert_eq!(parse_decimal("n/a"), None);
    }

    #[test]
    fn test_orders_buy_and_sell_signs() {
        let batch = orders_batch(vec![
            vec![
                "Apple",
                "AAPL",
                "Buy",
                "Filled",
                "10",
                "10",
                "150.00",
                "149.50",
                "07/03/2023 09:30:00 EDT",
                "07/03/2023 09:30:05 EDT",
            ],
            vec![
                "Apple",
                "AAPL",
                "Sell",
                "Filled",
                "4",
                "4",
                "160.00",
                "161.00",
                "07/10/2023 10:00:00 EDT",
                "07/10/2023 10:00:02 EDT",
            ],
        ]);

        let activities = WebullOrdersParser::parse(&[batch]).unwrap();

        assert_eq!(activities.len(), 2);
        let buy = &activities[0];
        assert_eq!(buy.symbol, "AAPL");
        assert_eq!(buy.quantity, dec!(10));
        assert_eq!(buy.unit_price, dec!(149.50));
        assert_eq!(buy.cash_flow, dec!(-1495.00));

        let sell = &activities[1];
        assert_eq!(sell.quantity, dec!(-4));
        assert_eq!(sell.cash_flow, dec!(644.00));
    }

    #[test]
    fn test_orders_unfilled_rows_are_skipped() {
        let batch = orders_batch(vec![
            vec![
                "Apple",
                "AAPL",
                "Buy",
                "Cancelled",
                "0",
                "10",
                "150.00",
                "",
                "07/03/2023 09:30:00 EDT",
                "",
            ],
            vec![
                "Apple",
                "AAPL",
                "Buy",
                "Partially Filled",
                "5",
                "10",
                "150.00",
                "149.90",
                "07/03/2023 09:30:00 EDT",
                "07/03/2023 09:31:00 EDT",
            ],
        ]);

        let activities = WebullOrdersParser::parse(&[batch]).unwrap();

        assert_eq!(activities.len(), 1);
        assert_eq!(activities[0].quantity, dec!(5));
    }

    #[test]
    fn test_orders_price_falls_back_when_avg_price_missing() {
        let batch = orders_batch(vec![vec![
            "Vanguard",
            "VTI",
            "Buy",
            "Filled",
            "2",
            "2",
            "220.00",
            "",
            "07/03/2023 09:30:00 EDT",
            "07/03/2023 09:30:05 EDT",
        ]]);

        let activities = WebullOrdersParser::parse(&[batch]).unwrap();
        assert_eq!(activities[0].unit_price, dec!(220.00));
        assert_eq!(activities[0].cash_flow, dec!(-440.00));
    }

    #[test]
    fn test_orders_rows_without_timestamp_or_price_are_dropped() {
        let batch = orders_batch(vec![vec![
            "Apple", "AAPL", "Buy", "Filled", "10", "10", "", "", "", "",
        ]]);

        let activities = WebullOrdersParser::parse(&[batch]).unwrap();
        assert!(activities.is_empty());
    }

    #[test]
    fn test_orders_output_is_sorted_by_timestamp() {
        let batch = orders_batch(vec![
            vec![
                "B", "VTI", "Buy", "Filled", "1", "1", "220", "220",
                "07/10/2023 10:00:00", "07/10/2023 10:00:00",
            ],
            vec![
                "A", "AAPL", "Buy", "Filled", "1", "1", "150", "150",
                "07/03/2023 09:30:00", "07/03/2023 09:30:00",
            ],
        ]);

        let activities = WebullOrdersParser::parse(&[batch]).unwrap();
        assert_eq!(activities[0].symbol, "AAPL");
        assert_eq!(activities[1].symbol, "VTI");
    }

    #[test]
    fn test_orders_missing_symbol_column_is_an_error() {
        let batch = CsvBatch {
            source_file: "broken.csv".to_string(),
            headers: vec!["Side".to_string(), "Price".to_string()],
            rows: vec![vec!["Buy".to_string(), "1.0".to_string()]],
        };

        let err = WebullOrdersParser::parse(&[batch]).unwrap_err();
        assert!(matches!(err, ActivityError::MissingColumn { .. }));
    }

    #[test]
    fn test_transfers_sign_convention() {
        let batch = transfers_batch(vec![
            vec!["01/15/2023", "Deposit", "$2,000.00", "Completed"],
            vec!["03/20/2023", "Withdrawal", "500.00", "Completed"],
        ]);

        let activities = WebullTransfersParser::parse(&[batch]).unwrap();

        assert_eq!(activities.len(), 2);
        assert!(activities[0].is_transfer());
        assert_eq!(activities[0].cash_flow, dec!(-2000.00));
        assert_eq!(activities[1].cash_flow, dec!(500.00));
    }

    #[test]
    fn test_transfers_pending_rows_are_skipped() {
        let batch = transfers_batch(vec![
            vec!["01/15/2023", "Deposit", "2000.00", "Pending"],
            vec!["01/16/2023", "Deposit", "1000.00", "Completed"],
        ]);

        let activities = WebullTransfersParser::parse(&[batch]).unwrap();
        assert_eq!(activities.len(), 1);
        assert_eq!(activities[0].cash_flow, dec!(-1000.00));
    }
}
