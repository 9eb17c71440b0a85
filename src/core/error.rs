use crate::core::currency::CurrencyCode;
use chrono::NaiveDate;
use thiserror::Error;

/// Structural failures while building a rate table.
///
/// Fatal to construction: no partial table is ever returned.
/// Row numbers are 1-based source line numbers (the header is line 1).
#[derive(Debug, Error, PartialEq, Eq)]
pub enum TableError {
    #[error("rate table needs a header and at least one data row, got {lines} line(s)")]
    TooFewRows { lines: usize },
    #[error("header row declares no currency columns")]
    EmptyHeader,
    #[error("header declares currency {0} more than once")]
    DuplicateCurrency(CurrencyCode),
    #[error("row {row} has {found} field(s), header declares {expected}")]
    FieldCountMismatch {
        row: usize,
        expected: usize,
        found: usize,
    },
    #[error("row {row}: invalid date '{value}'")]
    InvalidDate { row: usize, value: String },
    #[error("row {row}: invalid rate '{value}' for {currency}")]
    InvalidRate {
        row: usize,
        currency: CurrencyCode,
        value: String,
    },
    #[error("row {row}: date {date} is not older than the previous row's {previous}")]
    OutOfOrder {
        row: usize,
        date: NaiveDate,
        previous: NaiveDate,
    },
}

/// Failures local to a single query. The table itself is unaffected.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum QueryError {
    #[error("currency {0} is not present in the rate table")]
    UnknownCurrency(CurrencyCode),
    #[error("no rate available for {currency} on {date}")]
    MissingRate {
        currency: CurrencyCode,
        date: NaiveDate,
    },
    #[error("converting {from} -> {to} overflows the decimal range")]
    Overflow {
        from: CurrencyCode,
        to: CurrencyCode,
    },
}
