use crate::core::currency::{is_missing, CurrencyCode};
use crate::core::error::QueryError;
use crate::core::table::RateTable;
use chrono::NaiveDate;
use log::debug;
use rust_decimal::{Decimal, RoundingStrategy};

/// Decimal places shown for a converted amount.
pub const DISPLAY_DECIMALS: u32 = 2;

/// Converts amounts between two currencies of a [`RateTable`].
///
/// Every rate in the table is quoted against the same reference currency,
/// so `amount` of `from` is worth `amount * rate(to) / rate(from)` of `to`.
/// All arithmetic stays in `Decimal`.
///
/// # Examples
///
/// ```
/// use fx_history::core::currency::CurrencyCode;
/// use fx_history::parse::parser::parse;
/// use fx_history::query::conversion::ConversionCalculator;
/// use rust_decimal_macros::dec;
///
/// let table = parse(["Date,USD,GBP", "2024-01-03,1.25,0.50"]).unwrap();
/// let amount = ConversionCalculator::convert(
///     &table,
///     &CurrencyCode::new("USD"),
///     &CurrencyCode::new("GBP"),
///     dec!(10),
/// )
/// .unwrap();
/// assert_eq!(amount, dec!(4));
/// ```
pub struct ConversionCalculator;

impl ConversionCalculator {
    /// Convert using the rates of the table's most recent date.
    pub fn convert(
        table: &RateTable,
        from: &CurrencyCode,
        to: &CurrencyCode,
        amount: Decimal,
    ) -> Result<Decimal, QueryError> {
        Self::convert_on(table, from, to, amount, table.most_recent_date())
    }

    /// Convert using the rates recorded on `date`.
    ///
    /// A date the table never recorded is treated the same as a rate
    /// reported unavailable.
    pub fn convert_on(
        table: &RateTable,
        from: &CurrencyCode,
        to: &CurrencyCode,
        amount: Decimal,
        date: NaiveDate,
    ) -> Result<Decimal, QueryError> {
        for currency in [from, to] {
            if !table.contains(currency) {
                return Err(QueryError::UnknownCurrency(currency.clone()));
            }
        }
        let rate_from = Self::lookup(table, from, date)?;
        let rate_to = Self::lookup(table, to, date)?;

        debug!("converting {amount} {from} -> {to} at {rate_to}/{rate_from} ({date})");
        rate_to
            .checked_div(rate_from)
            .and_then(|cross| amount.checked_mul(cross))
            .ok_or_else(|| QueryError::Overflow {
                from: from.clone(),
                to: to.clone(),
            })
    }

    /// Round a converted amount for display, half away from zero.
    pub fn display_amount(amount: Decimal) -> Decimal {
        amount.round_dp_with_strategy(DISPLAY_DECIMALS, RoundingStrategy::MidpointAwayFromZero)
    }

    fn lookup(
        table: &RateTable,
        currency: &CurrencyCode,
        date: NaiveDate,
    ) -> Result<Decimal, QueryError> {
        match table.rate(currency, date) {
            Some(rate) if !is_missing(rate) => Ok(rate),
            _ => Err(QueryError::MissingRate {
                currency: currency.clone(),
                date,
            }),
        }
    }
}
