use crate::core::currency::{CurrencyCode, MISSING_RATE};
use crate::core::table::RateTable;
use chrono::{Duration, NaiveDate};
use log::debug;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

/// Day-indexed rate curves for two currencies over `[start, end)`.
///
/// Index `i` of every series is the calendar day `start + i`. A zero in
/// `to` or `from` means no rate had been observed yet at that point of
/// the walk, not a literal zero rate.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RangeSeries {
    pub from_currency: CurrencyCode,
    pub to_currency: CurrencyCode,
    /// First day covered (index 0).
    pub start: NaiveDate,
    /// Forward-filled rates of `to_currency`.
    pub to: Vec<Decimal>,
    /// Forward-filled rates of `from_currency`.
    pub from: Vec<Decimal>,
    /// Constant baseline of 1 for each day: a currency against itself.
    pub reference: Vec<Decimal>,
}

impl RangeSeries {
    /// Number of days covered.
    pub fn len(&self) -> usize {
        self.reference.len()
    }

    pub fn is_empty(&self) -> bool {
        self.reference.is_empty()
    }

    /// Calendar day of each index, in order.
    pub fn days(&self) -> impl Iterator<Item = NaiveDate> + '_ {
        (0..self.len()).map(move |offset| self.start + Duration::days(offset as i64))
    }

    /// Largest value across both currency series; the natural upper bound
    /// of a chart's rate axis.
    pub fn max_rate(&self) -> Option<Decimal> {
        self.to.iter().chain(self.from.iter()).copied().max()
    }
}

impl std::fmt::Display for RangeSeries {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        writeln!(
            f,
            "=== {} vs {} ({} day(s) from {}) ===",
            self.to_currency,
            self.from_currency,
            self.len(),
            self.start
        )?;
        let rows = self.to.iter().zip(&self.from).zip(&self.reference);
        for (i, (day, ((to, from), reference))) in self.days().zip(rows).enumerate() {
            writeln!(
                f,
                "{:>4}  {}  {}={:<12} {}={:<12} ref={}",
                i, day, self.to_currency, to, self.from_currency, from, reference
            )?;
        }
        Ok(())
    }
}

/// Builds forward-filled [`RangeSeries`] from a [`RateTable`].
pub struct RangeSeriesBuilder;

impl RangeSeriesBuilder {
    /// Build both currencies' series for every day in `[start, end)`.
    ///
    /// An `end` not after `start` yields empty series. Unknown currencies
    /// and unrecorded dates are never errors: they simply have not been
    /// observed, and emit the current carry value (initially zero).
    ///
    /// # Examples
    ///
    /// ```
    /// use chrono::NaiveDate;
    /// use fx_history::core::currency::CurrencyCode;
    /// use fx_history::parse::parser::parse;
    /// use fx_history::query::range::RangeSeriesBuilder;
    /// use rust_decimal_macros::dec;
    ///
    /// let table = parse(["Date,USD", "2024-01-05,1.10", "2024-01-02,1.09"]).unwrap();
    /// let series = RangeSeriesBuilder::build_range(
    ///     &table,
    ///     &CurrencyCode::new("USD"),
    ///     &CurrencyCode::new("USD"),
    ///     NaiveDate::from_ymd_opt(2024, 1, 2).unwrap(),
    ///     NaiveDate::from_ymd_opt(2024, 1, 6).unwrap(),
    /// );
    /// assert_eq!(series.from, vec![dec!(1.09), dec!(1.09), dec!(1.09), dec!(1.10)]);
    /// ```
    pub fn build_range(
        table: &RateTable,
        from: &CurrencyCode,
        to: &CurrencyCode,
        start: NaiveDate,
        end: NaiveDate,
    ) -> RangeSeries {
        let days = usize::try_from((end - start).num_days()).unwrap_or(0);
        debug!("building {days}-day range {from}/{to} from {start}");

        RangeSeries {
            from_currency: from.clone(),
            to_currency: to.clone(),
            start,
            to: Self::forward_fill(table.rates_for(to), start, days),
            from: Self::forward_fill(table.rates_for(from), start, days),
            reference: vec![Decimal::ONE; days],
        }
    }

    /// Build the range the table charts by default: the week ending on
    /// its most recent date.
    pub fn build_default(table: &RateTable, from: &CurrencyCode, to: &CurrencyCode) -> RangeSeries {
        let (start, end) = table.default_window();
        Self::build_range(table, from, to, start, end)
    }

    /// Walk `days` calendar days from `start`, emitting the recorded rate
    /// where one exists and the last emitted value otherwise.
    fn forward_fill(
        observations: Option<&BTreeMap<NaiveDate, Decimal>>,
        start: NaiveDate,
        days: usize,
    ) -> Vec<Decimal> {
        let mut carry = MISSING_RATE;
        (0..days)
            .map(|offset| {
                let day = start + Duration::days(offset as i64);
                if let Some(rate) = observations.and_then(|obs| obs.get(&day)) {
                    carry = *rate;
                }
                carry
            })
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::parse::parser::{parse, DATE_FORMAT};
    use rust_decimal_macros::dec;

    fn date(s: &str) -> NaiveDate {
        NaiveDate::parse_from_str(s, DATE_FORMAT).unwrap()
    }

    fn table() -> RateTable {
        parse([
            "Date,USD,GBP",
            "2024-01-08,1.12,0.86",
            "2024-01-05,1.11,N/A",
            "2024-01-03,1.10,0.85",
            "2024-01-02,1.09,N/A",
        ])
        .unwrap()
    }

    #[test]
    fn test_two_day_scenario() {
        let series = RangeSeriesBuilder::build_range(
            &table(),
            &CurrencyCode::new("USD"),
            &CurrencyCode::new("GBP"),
            date("2024-01-02"),
            date("2024-01-04"),
        );
        assert_eq!(series.len(), 2);
        assert_eq!(series.to, vec![dec!(0), dec!(0.85)]);
        assert_eq!(series.from, vec![dec!(1.09), dec!(1.10)]);
        assert_eq!(series.reference, vec![dec!(1), dec!(1)]);
    }

    #[test]
    fn test_forward_fill_across_gaps() {
        let series = RangeSeriesBuilder::build_range(
            &table(),
            &CurrencyCode::new("USD"),
            &CurrencyCode::new("GBP"),
            date("2024-01-03"),
            date("2024-01-09"),
        );
        // 03 04 05 06 07 08
        assert_eq!(
            series.from,
            vec![dec!(1.10), dec!(1.10), dec!(1.11), dec!(1.11), dec!(1.11), dec!(1.12)]
        );
        // A recorded N/A resets the carry to the missing sentinel.
        assert_eq!(
            series.to,
            vec![dec!(0.85), dec!(0.85), dec!(0), dec!(0), dec!(0), dec!(0.86)]
        );
    }

    #[test]
    fn test_carry_starts_at_zero() {
        // 2024-01-04 is unrecorded; the earlier 01-03 observation lies
        // outside the window and is not carried in.
        let series = RangeSeriesBuilder::build_range(
            &table(),
            &CurrencyCode::new("USD"),
            &CurrencyCode::new("USD"),
            date("2024-01-04"),
            date("2024-01-06"),
        );
        assert_eq!(series.from, vec![dec!(0), dec!(1.11)]);
    }

    #[test]
    fn test_empty_and_inverted_ranges() {
        let usd = CurrencyCode::new("USD");
        let same = RangeSeriesBuilder::build_range(
            &table(),
            &usd,
            &usd,
            date("2024-01-03"),
            date("2024-01-03"),
        );
        assert!(same.is_empty());
        assert!(same.to.is_empty() && same.from.is_empty());
        assert_eq!(same.max_rate(), None);

        let inverted = RangeSeriesBuilder::build_range(
            &table(),
            &usd,
            &usd,
            date("2024-01-08"),
            date("2024-01-02"),
        );
        assert_eq!(inverted.len(), 0);
    }

    #[test]
    fn test_unknown_currency_is_unobserved() {
        let series = RangeSeriesBuilder::build_range(
            &table(),
            &CurrencyCode::new("XAU"),
            &CurrencyCode::new("USD"),
            date("2024-01-02"),
            date("2024-01-05"),
        );
        assert_eq!(series.from, vec![dec!(0); 3]);
        assert_eq!(series.to.len(), 3);
    }

    #[test]
    fn test_days_and_max_rate() {
        let series = RangeSeriesBuilder::build_range(
            &table(),
            &CurrencyCode::new("USD"),
            &CurrencyCode::new("GBP"),
            date("2024-01-02"),
            date("2024-01-04"),
        );
        let days: Vec<NaiveDate> = series.days().collect();
        assert_eq!(days, vec![date("2024-01-02"), date("2024-01-03")]);
        assert_eq!(series.max_rate(), Some(dec!(1.10)));
    }

    #[test]
    fn test_display_report() {
        let series = RangeSeriesBuilder::build_range(
            &table(),
            &CurrencyCode::new("USD"),
            &CurrencyCode::new("GBP"),
            date("2024-01-02"),
            date("2024-01-04"),
        );
        let report = series.to_string();
        assert!(report.starts_with("=== GBP vs USD (2 day(s) from 2024-01-02) ==="));
        assert_eq!(report.lines().count(), 3);
        assert!(report.contains("2024-01-03"));
    }

    #[test]
    fn test_display_tolerates_uneven_series() {
        let mut series = RangeSeriesBuilder::build_range(
            &table(),
            &CurrencyCode::new("USD"),
            &CurrencyCode::new("GBP"),
            date("2024-01-02"),
            date("2024-01-05"),
        );
        series.to.truncate(1);
        series.from.clear();
        let report = series.to_string();
        assert_eq!(report.lines().count(), 1);

        let json = r#"{"from_currency":"USD","to_currency":"GBP","start":"2024-01-02",
            "to":["0.85","0.86"],"from":["1.10"],"reference":["1","1","1"]}"#;
        let series: RangeSeries = serde_json::from_str(json).unwrap();
        assert_eq!(series.to_string().lines().count(), 2);
    }

    #[test]
    fn test_default_window() {
        let series = RangeSeriesBuilder::build_default(
            &table(),
            &CurrencyCode::new("USD"),
            &CurrencyCode::new("GBP"),
        );
        assert_eq!(series.len(), 7);
        assert_eq!(series.start, date("2024-01-01"));
        // The window stops short of the most recent date itself.
        assert_eq!(series.from.last(), Some(&dec!(1.11)));
    }
}
