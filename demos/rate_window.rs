//! Forward-filled rate window.
//!
//! Builds the default one-week window for two currencies over a table
//! with weekend gaps, then a custom range starting before the first
//! observation.

use chrono::NaiveDate;
use fx_history::core::currency::CurrencyCode;
use fx_history::parse::parser::parse;
use fx_history::query::range::RangeSeriesBuilder;

fn main() {
    let table = match parse([
        "Date,USD,GBP,",
        "2024-01-08,1.0946,0.85960,",
        "2024-01-05,1.0921,0.86085,",
        "2024-01-04,1.0953,N/A,",
        "2024-01-03,1.0919,0.86465,",
        "2024-01-02,1.0956,0.86650,",
    ]) {
        Ok(table) => table,
        Err(e) => {
            eprintln!("Malformed table: {}", e);
            return;
        }
    };

    let usd = CurrencyCode::new("USD");
    let gbp = CurrencyCode::new("GBP");

    println!("━━━ Default window ━━━\n");
    let series = RangeSeriesBuilder::build_default(&table, &usd, &gbp);
    print!("{}", series);
    if let Some(max) = series.max_rate() {
        println!("Chart upper bound: {}\n", max);
    }

    println!("━━━ Range starting before the data ━━━\n");
    let (Some(start), Some(end)) = (
        NaiveDate::from_ymd_opt(2023, 12, 30),
        NaiveDate::from_ymd_opt(2024, 1, 4),
    ) else {
        return;
    };
    let series = RangeSeriesBuilder::build_range(&table, &usd, &gbp, start, end);
    print!("{}", series);
    println!("\n(0 means no rate observed yet in the window)");
}
