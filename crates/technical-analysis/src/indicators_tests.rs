#[cfg(test)]
mod tests {
    use super::super::indicators::*;
    use super::super::series::*;
    use super::super::trend::*;
    use chrono::NaiveDate;
    use radar_core::{PriceBar, PricePoint};

    fn day(offset: i64) -> NaiveDate {
        NaiveDate::from_ymd_opt(2025, 1, 1).unwrap() + chrono::Duration::days(offset)
    }

    // Helper function to create points from (close, moving average) pairs
    fn points(rows: &[(f64, Option<f64>)]) -> Vec<PricePoint> {
        rows.iter()
            .enumerate()
            .map(|(i, &(close, ma))| PricePoint::new(day(i as i64), close, ma))
            .collect()
    }

    fn bar(offset: i64, close: Option<f64>) -> PriceBar {
        PriceBar {
            date: day(offset),
            open: close,
            high: close.map(|c| c + 1.0),
            low: close.map(|c| c - 1.0),
            close,
            volume: Some(1_000_000.0),
            moving_average: None,
        }
    }

    #[test]
    fn test_rolling_mean_min_periods_one() {
        let result = rolling_mean(&[2.0, 4.0, 6.0, 8.0], 3);

        assert_eq!(result.len(), 4);
        assert!((result[0] - 2.0).abs() < 1e-12); // only one value so far
        assert!((result[1] - 3.0).abs() < 1e-12);
        assert!((result[2] - 4.0).abs() < 1e-12);
        assert!((result[3] - 6.0).abs() < 1e-12); // (4+6+8)/3
    }

    #[test]
    fn test_rolling_mean_zero_window() {
        let result = rolling_mean(&[1.0, 5.0], 0);
        assert_eq!(result, vec![1.0, 5.0]);
    }

    #[test]
    fn test_percent_change() {
        assert!((percent_change(100.0, 110.0).unwrap() - 10.0).abs() < 1e-9);
        assert_eq!(percent_change(0.0, 10.0), None);
    }

    #[test]
    fn test_period_mappings() {
        assert_eq!(moving_average_window("5d"), 3);
        assert_eq!(moving_average_window("6mo"), 30);
        assert_eq!(moving_average_window("max"), 300);
        assert_eq!(moving_average_window("10y"), 20);

        assert_eq!(bar_interval("3mo"), "1d");
        assert_eq!(bar_interval("1y"), "1wk");
        assert_eq!(bar_interval("5y"), "1mo");
        assert_eq!(bar_interval("??"), "1d");

        assert_eq!(Period::default(), Period::SixMonths);
        assert_eq!("1MO".parse::<Period>(), Ok(Period::OneMonth));
    }

    #[test]
    fn test_series_from_bars_drops_missing_close_and_sorts() {
        let bars = vec![bar(2, Some(12.0)), bar(0, Some(10.0)), bar(1, None), bar(3, Some(14.0))];
        let series = PriceSeries::from_bars(&bars, Some(2));

        assert_eq!(series.len(), 3);
        assert_eq!(series.closes(), vec![10.0, 12.0, 14.0]);
        let mas: Vec<Option<f64>> = series.points().iter().map(|p| p.moving_average).collect();
        assert_eq!(mas, vec![Some(10.0), Some(11.0), Some(13.0)]);
    }

    #[test]
    fn test_series_keeps_precomputed_average() {
        let mut with_ma = bar(0, Some(10.0));
        with_ma.moving_average = Some(9.5);
        let series = PriceSeries::from_bars(&[with_ma], None);
        assert_eq!(series.points()[0].moving_average, Some(9.5));
    }

    #[test]
    fn test_snapshot() {
        let series = PriceSeries::new(points(&[(100.0, None), (105.0, None)]));
        let snapshot = PriceSnapshot::from_series(&series).unwrap();
        assert_eq!(snapshot.current_price, 105.0);
        assert!((snapshot.change_percent - 5.0).abs() < 1e-9);

        let single = PriceSeries::new(points(&[(50.0, None)]));
        assert_eq!(PriceSnapshot::from_series(&single).unwrap().change_percent, 0.0);
        assert!(PriceSnapshot::from_series(&PriceSeries::default()).is_none());
    }

    #[test]
    fn test_trend_empty_series_is_insufficient() {
        let classifier = TrendClassifier::default();
        assert_eq!(classifier.classify(&[]), Trend::InsufficientData);
    }

    #[test]
    fn test_trend_without_any_average_is_insufficient() {
        let classifier = TrendClassifier::default();
        let rows = points(&[(10.0, None), (11.0, None)]);
        assert_eq!(classifier.classify(&rows), Trend::InsufficientData);
    }

    #[test]
    fn test_gap_in_window_keeps_the_remaining_slope() {
        let classifier = TrendClassifier::default();
        let rows = points(&[
            (11.0, None),
            (12.0, Some(10.5)),
            (13.0, Some(11.0)),
            (14.0, Some(11.5)),
            (15.0, Some(12.0)),
        ]);
        let reading = classifier.reading(&rows).unwrap();
        assert_eq!(reading.trend, Trend::Uptrend);
        assert!((reading.slope.unwrap() - 0.5).abs() < 1e-12);

        // a gap mid-window drops the two steps around it
        let rows = points(&[
            (9.0, Some(12.0)),
            (8.0, None),
            (7.0, Some(11.0)),
            (6.0, Some(10.0)),
        ]);
        assert_eq!(classifier.classify(&rows), Trend::Downtrend);
    }

    #[test]
    fn test_last_row_without_average_is_sideways() {
        let classifier = TrendClassifier::default();
        let rows = points(&[(11.0, Some(10.0)), (12.0, Some(10.5)), (15.0, None)]);
        let reading = classifier.reading(&rows).unwrap();
        assert_eq!(reading.trend, Trend::Sideways);
        assert_eq!(reading.current_ma, None);
    }

    #[test]
    fn test_uptrend() {
        let classifier = TrendClassifier::default();
        let rows = points(&[
            (11.0, Some(10.0)),
            (12.0, Some(10.5)),
            (13.0, Some(11.0)),
            (14.0, Some(11.5)),
            (15.0, Some(12.0)),
        ]);
        let reading = classifier.reading(&rows).unwrap();
        assert_eq!(reading.trend, Trend::Uptrend);
        assert!((reading.slope.unwrap() - 0.5).abs() < 1e-12);
    }

    #[test]
    fn test_downtrend() {
        let classifier = TrendClassifier::default();
        let rows = points(&[(9.0, Some(12.0)), (8.5, Some(11.0)), (8.0, Some(10.0))]);
        assert_eq!(classifier.classify(&rows), Trend::Downtrend);
    }

    #[test]
    fn test_only_last_five_rows_count() {
        let classifier = TrendClassifier::default();
        // Early rows fall steeply, the last five rise
        let rows = points(&[
            (1.0, Some(100.0)),
            (1.0, Some(50.0)),
            (11.0, Some(10.0)),
            (12.0, Some(10.5)),
            (13.0, Some(11.0)),
            (14.0, Some(11.5)),
            (15.0, Some(12.0)),
        ]);
        assert_eq!(classifier.classify(&rows), Trend::Uptrend);
    }

    #[test]
    fn test_boundaries_fall_to_sideways() {
        let classifier = TrendClassifier::default();

        // close equals the average while the average rises
        let flat_close = points(&[(10.0, Some(9.0)), (10.0, Some(10.0))]);
        assert_eq!(classifier.classify(&flat_close), Trend::Sideways);

        // close above a flat average
        let flat_ma = points(&[(12.0, Some(10.0)), (13.0, Some(10.0))]);
        assert_eq!(classifier.classify(&flat_ma), Trend::Sideways);

        // above the average but the average is falling
        let mixed = points(&[(12.0, Some(11.0)), (12.0, Some(10.0))]);
        assert_eq!(classifier.classify(&mixed), Trend::Sideways);
    }

    #[test]
    fn test_single_row_is_sideways() {
        let classifier = TrendClassifier::default();
        let reading = classifier.reading(&points(&[(15.0, Some(10.0))])).unwrap();
        assert_eq!(reading.trend, Trend::Sideways);
        assert_eq!(reading.slope, None);
    }

    #[test]
    fn test_trend_serializes_snake_case() {
        let json = serde_json::to_value(Trend::InsufficientData).unwrap();
        assert_eq!(json, "insufficient_data");
        assert_eq!(Trend::Uptrend.to_string(), "Tendência de alta");
    }
}
