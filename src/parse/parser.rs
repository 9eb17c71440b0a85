use crate::core::currency::{CurrencyCode, MISSING_RATE};
use crate::core::error::TableError;
use crate::core::table::RateTable;
use crate::parse::options::{DateOrdering, ParseOptions};
use chrono::NaiveDate;
use log::{debug, warn};
use rust_decimal::Decimal;
use std::collections::{BTreeMap, HashMap, HashSet};
use std::str::FromStr;

/// ISO calendar date, as written in the date column.
pub const DATE_FORMAT: &str = "%Y-%m-%d";

/// Turns decoded text lines into a [`RateTable`].
///
/// The first non-blank line is the header: a date-column label followed by
/// one currency code per column, optionally closed by a trailing delimiter.
/// Every following line is `date,rate,rate,...` in the same column order.
/// Rows are expected newest-first; the first row's date becomes the table's
/// most recent date.
///
/// # Examples
///
/// ```
/// use fx_history::parse::parser::RateTableParser;
///
/// let table = RateTableParser::default()
///     .parse(["Date,USD,GBP,", "2024-01-03,1.10,0.85,"])
///     .unwrap();
/// assert_eq!(table.currencies().len(), 2);
/// ```
#[derive(Debug, Clone, Default)]
pub struct RateTableParser {
    options: ParseOptions,
}

impl RateTableParser {
    pub fn new(options: ParseOptions) -> Self {
        Self { options }
    }

    pub fn options(&self) -> &ParseOptions {
        &self.options
    }

    /// Parse a whole table held in one string.
    pub fn parse_str(&self, content: &str) -> Result<RateTable, TableError> {
        self.parse(content.lines())
    }

    /// Parse a header line followed by data lines.
    ///
    /// Blank lines are skipped. Line terminators left on the input
    /// (`\n`, `\r\n`) are ignored.
    pub fn parse<I, S>(&self, lines: I) -> Result<RateTable, TableError>
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        let rows: Vec<(usize, S)> = lines
            .into_iter()
            .enumerate()
            .filter(|(_, line)| !line.as_ref().trim().is_empty())
            .map(|(idx, line)| (idx + 1, line))
            .collect();

        if rows.len() < 2 {
            return Err(TableError::TooFewRows { lines: rows.len() });
        }

        let header = self.split_fields(rows[0].1.as_ref());
        let currencies = Self::header_currencies(&header)?;
        let expected = currencies.len() + 1;

        let mut rates: HashMap<CurrencyCode, BTreeMap<NaiveDate, Decimal>> = currencies
            .iter()
            .map(|c| (c.clone(), BTreeMap::new()))
            .collect();
        let mut most_recent_date = None;
        let mut previous: Option<NaiveDate> = None;

        for (row, line) in &rows[1..] {
            let row = *row;
            let fields = self.split_fields(line.as_ref());
            if fields.len() != expected {
                return Err(TableError::FieldCountMismatch {
                    row,
                    expected,
                    found: fields.len(),
                });
            }

            let date = NaiveDate::parse_from_str(fields[0], DATE_FORMAT).map_err(|_| {
                TableError::InvalidDate {
                    row,
                    value: fields[0].to_string(),
                }
            })?;

            if let Some(prev) = previous {
                if date >= prev {
                    match self.options.ordering {
                        DateOrdering::Strict => {
                            return Err(TableError::OutOfOrder {
                                row,
                                date,
                                previous: prev,
                            });
                        }
                        DateOrdering::Trust => {
                            warn!("row {row}: date {date} is not older than {prev}; keeping first row as most recent");
                        }
                    }
                }
            }
            previous = Some(date);
            most_recent_date.get_or_insert(date);

            for (currency, field) in currencies.iter().zip(&fields[1..]) {
                let rate = self.parse_rate(row, currency, field)?;
                if let Some(dates) = rates.get_mut(currency) {
                    // A repeated date keeps the value nearest the top of the file.
                    dates.entry(date).or_insert(rate);
                }
            }
        }

        // rows.len() >= 2 guarantees at least one data row was read.
        let most_recent_date = most_recent_date.ok_or(TableError::TooFewRows { lines: 1 })?;

        debug!(
            "parsed rate table: {} currencies, {} rows, most recent {}",
            currencies.len(),
            rows.len() - 1,
            most_recent_date
        );

        Ok(RateTable::from_parts(currencies, rates, most_recent_date))
    }

    fn split_fields<'a>(&self, line: &'a str) -> Vec<&'a str> {
        let line = line.trim_end_matches(['\r', '\n']);
        let mut fields: Vec<&str> = line.split(self.options.delimiter).map(str::trim).collect();
        if fields.len() > 1 && fields.last().is_some_and(|f| f.is_empty()) {
            fields.pop();
        }
        fields
    }

    fn header_currencies(header: &[&str]) -> Result<Vec<CurrencyCode>, TableError> {
        let codes = header.get(1..).unwrap_or_default();
        if codes.is_empty() {
            return Err(TableError::EmptyHeader);
        }

        let mut seen = HashSet::new();
        let mut currencies = Vec::with_capacity(codes.len());
        for code in codes {
            let currency = CurrencyCode::new(*code);
            if !seen.insert(currency.clone()) {
                return Err(TableError::DuplicateCurrency(currency));
            }
            currencies.push(currency);
        }
        Ok(currencies)
    }

    fn parse_rate(
        &self,
        row: usize,
        currency: &CurrencyCode,
        field: &str,
    ) -> Result<Decimal, TableError> {
        if field == self.options.missing_marker {
            return Ok(MISSING_RATE);
        }
        Decimal::from_str(field).map_err(|_| TableError::InvalidRate {
            row,
            currency: currency.clone(),
            value: field.to_string(),
        })
    }
}

/// Parse with the default options: comma-delimited, `N/A` for missing
/// values, row order trusted.
pub fn parse<I, S>(lines: I) -> Result<RateTable, TableError>
where
    I: IntoIterator<Item = S>,
    S: AsRef<str>,
{
    RateTableParser::default().parse(lines)
}
