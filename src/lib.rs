//! # fx-history
//!
//! Historical foreign-exchange rate table with conversion and range queries.
//!
//! Given a rate table with one row per date and one column per currency,
//! all quoted against a single reference currency, this crate converts
//! amounts at the most recent rates and builds forward-filled daily rate
//! series for charting.
//!
//! ## Architecture
//!
//! - **core** — Currency codes, the missing-rate sentinel, the rate table, errors
//! - **parse** — Reading decoded text lines into a rate table
//! - **query** — Currency conversion and forward-filled range series

pub mod core;
pub mod parse;
pub mod query;

/// Convenience re-exports for common usage.
pub mod prelude {
    pub use crate::core::currency::{is_missing, CurrencyCode, MISSING_RATE};
    pub use crate::core::error::{QueryError, TableError};
    pub use crate::core::table::RateTable;
    pub use crate::parse::options::{DateOrdering, ParseOptions};
    pub use crate::parse::parser::{parse, RateTableParser};
    pub use crate::query::conversion::ConversionCalculator;
    pub use crate::query::range::{RangeSeries, RangeSeriesBuilder};
}
