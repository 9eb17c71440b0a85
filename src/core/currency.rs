use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use std::fmt;

/// Sentinel stored for a rate the source reported as unavailable.
///
/// A real exchange rate is never exactly zero, so zero doubles as
/// "no rate recorded". Range series emit it for days before the first
/// observation as well.
pub const MISSING_RATE: Decimal = Decimal::ZERO;

/// Returns `true` if `rate` is the missing sentinel.
pub fn is_missing(rate: Decimal) -> bool {
    rate == MISSING_RATE
}

/// ISO 4217-style currency code, as it appears in a rate table header.
///
/// Codes are taken verbatim from the source; no validation beyond
/// presence in a table is performed.
///
/// # Examples
///
/// ```
/// use fx_history::core::currency::CurrencyCode;
///
/// let usd = CurrencyCode::new("USD");
/// let gbp = CurrencyCode::new("GBP");
/// assert!(gbp < usd);
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct CurrencyCode(String);

impl CurrencyCode {
    pub fn new(code: impl Into<String>) -> Self {
        Self(code.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for CurrencyCode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl From<&str> for CurrencyCode {
    fn from(s: &str) -> Self {
        Self::new(s)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rust_decimal_macros::dec;

    #[test]
    fn test_currency_code_equality() {
        let a = CurrencyCode::new("USD");
        let b = CurrencyCode::from("USD");
        assert_eq!(a, b);
        assert_ne!(a, CurrencyCode::new("GBP"));
    }

    #[test]
    fn test_currency_code_ordering() {
        let mut codes = vec![
            CurrencyCode::new("USD"),
            CurrencyCode::new("AUD"),
            CurrencyCode::new("GBP"),
        ];
        codes.sort();
        let names: Vec<&str> = codes.iter().map(|c| c.as_str()).collect();
        assert_eq!(names, vec!["AUD", "GBP", "USD"]);
    }

    #[test]
    fn test_currency_code_display() {
        assert_eq!(format!("{}", CurrencyCode::new("JPY")), "JPY");
    }

    #[test]
    fn test_missing_sentinel() {
        assert!(is_missing(dec!(0)));
        assert!(is_missing(dec!(0.0000)));
        assert!(!is_missing(dec!(1.0856)));
    }
}
