use crate::core::currency::CurrencyCode;
use chrono::{Duration, NaiveDate};
use rust_decimal::Decimal;
use std::collections::{BTreeMap, HashMap};

/// Days covered by the default chart window, ending on the most recent date.
pub const DEFAULT_WINDOW_DAYS: i64 = 7;

/// Historical exchange rates of every currency against one reference currency.
///
/// Built once by [`RateTableParser`](crate::parse::parser::RateTableParser)
/// and read-only afterwards, so any number of queries may share it.
///
/// Stores rates as `currency -> (date -> rate)`. The inner `BTreeMap`
/// keeps each currency's observations in calendar order. A rate equal to
/// [`MISSING_RATE`](crate::core::currency::MISSING_RATE) means the source
/// listed the date but had no value for it.
#[derive(Debug, Clone, PartialEq)]
pub struct RateTable {
    /// Sorted lexicographically.
    currencies: Vec<CurrencyCode>,
    rates: HashMap<CurrencyCode, BTreeMap<NaiveDate, Decimal>>,
    most_recent_date: NaiveDate,
}

impl RateTable {
    /// Assemble a table from already-validated parts.
    ///
    /// Callers guarantee that every code in `currencies` has an entry in
    /// `rates` for `most_recent_date`.
    pub(crate) fn from_parts(
        mut currencies: Vec<CurrencyCode>,
        rates: HashMap<CurrencyCode, BTreeMap<NaiveDate, Decimal>>,
        most_recent_date: NaiveDate,
    ) -> Self {
        currencies.sort();
        Self {
            currencies,
            rates,
            most_recent_date,
        }
    }

    /// Currency codes in lexicographic order.
    pub fn currencies(&self) -> &[CurrencyCode] {
        &self.currencies
    }

    pub fn contains(&self, currency: &CurrencyCode) -> bool {
        self.rates.contains_key(currency)
    }

    /// Date of the first data row of the source.
    pub fn most_recent_date(&self) -> NaiveDate {
        self.most_recent_date
    }

    /// Oldest date recorded for any currency.
    pub fn earliest_date(&self) -> NaiveDate {
        self.rates
            .values()
            .filter_map(|dates| dates.keys().next().copied())
            .min()
            .unwrap_or(self.most_recent_date)
    }

    /// Number of distinct dates recorded across the table.
    pub fn date_count(&self) -> usize {
        let mut dates: Vec<&NaiveDate> = self.rates.values().flat_map(|d| d.keys()).collect();
        dates.sort();
        dates.dedup();
        dates.len()
    }

    /// Exact lookup. `None` if the date was never recorded for `currency`;
    /// `Some(MISSING_RATE)` if it was recorded as unavailable.
    pub fn rate(&self, currency: &CurrencyCode, date: NaiveDate) -> Option<Decimal> {
        self.rates.get(currency)?.get(&date).copied()
    }

    /// The rate on the most recent date.
    pub fn latest_rate(&self, currency: &CurrencyCode) -> Option<Decimal> {
        self.rate(currency, self.most_recent_date)
    }

    /// All recorded observations for one currency, oldest first.
    pub fn rates_for(&self, currency: &CurrencyCode) -> Option<&BTreeMap<NaiveDate, Decimal>> {
        self.rates.get(currency)
    }

    /// The window charted when nothing else is selected: the week ending
    /// on the most recent date, as `(start, end)`.
    pub fn default_window(&self) -> (NaiveDate, NaiveDate) {
        (
            self.most_recent_date - Duration::days(DEFAULT_WINDOW_DAYS),
            self.most_recent_date,
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rust_decimal_macros::dec;

    fn date(s: &str) -> NaiveDate {
        NaiveDate::parse_from_str(s, "%Y-%m-%d").unwrap()
    }

    fn sample_table() -> RateTable {
        let usd = CurrencyCode::new("USD");
        let gbp = CurrencyCode::new("GBP");
        let mut rates = HashMap::new();
        rates.insert(
            usd.clone(),
            BTreeMap::from([
                (date("2024-01-03"), dec!(1.10)),
                (date("2024-01-02"), dec!(1.09)),
            ]),
        );
        rates.insert(
            gbp.clone(),
            BTreeMap::from([
                (date("2024-01-03"), dec!(0.85)),
                (date("2024-01-02"), dec!(0)),
            ]),
        );
        RateTable::from_parts(vec![usd, gbp], rates, date("2024-01-03"))
    }

    #[test]
    fn test_currencies_sorted() {
        let table = sample_table();
        let names: Vec<&str> = table.currencies().iter().map(|c| c.as_str()).collect();
        assert_eq!(names, vec!["GBP", "USD"]);
    }

    #[test]
    fn test_exact_lookup() {
        let table = sample_table();
        let gbp = CurrencyCode::new("GBP");
        assert_eq!(table.rate(&gbp, date("2024-01-03")), Some(dec!(0.85)));
        assert_eq!(table.rate(&gbp, date("2024-01-02")), Some(dec!(0)));
        assert_eq!(table.rate(&gbp, date("2024-01-01")), None);
        assert_eq!(table.rate(&CurrencyCode::new("JPY"), date("2024-01-03")), None);
    }

    #[test]
    fn test_date_bounds() {
        let table = sample_table();
        assert_eq!(table.most_recent_date(), date("2024-01-03"));
        assert_eq!(table.earliest_date(), date("2024-01-02"));
        assert_eq!(table.date_count(), 2);
        assert_eq!(table.latest_rate(&CurrencyCode::new("USD")), Some(dec!(1.10)));
    }

    #[test]
    fn test_default_window() {
        let table = sample_table();
        assert_eq!(
            table.default_window(),
            (date("2023-12-27"), date("2024-01-03"))
        );
    }
}
