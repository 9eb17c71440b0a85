/// How the parser treats the row order of the source.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum DateOrdering {
    /// Take the first data row as the most recent date without checking.
    /// Rows that break newest-first order are logged and kept.
    #[default]
    Trust,
    /// Reject any row whose date is not strictly older than the row above it.
    Strict,
}

/// Configuration for reading a rate table.
#[derive(Debug, Clone)]
pub struct ParseOptions {
    /// Field separator for the header and every data row.
    pub delimiter: char,
    /// Literal field value meaning "no rate available".
    pub missing_marker: String,
    /// Row order policy.
    pub ordering: DateOrdering,
}

impl Default for ParseOptions {
    fn default() -> Self {
        Self {
            delimiter: ',',
            missing_marker: "N/A".to_string(),
            ordering: DateOrdering::Trust,
        }
    }
}

impl ParseOptions {
    /// Defaults with newest-first order enforced.
    pub fn strict() -> Self {
        Self {
            ordering: DateOrdering::Strict,
            ..Default::default()
        }
    }
}
