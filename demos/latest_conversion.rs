//! Conversion at the most recent rates.
//!
//! Parses a small newest-first table and converts between every pair of
//! currencies, showing how a missing rate surfaces.

use fx_history::core::error::QueryError;
use fx_history::parse::parser::parse;
use fx_history::query::conversion::ConversionCalculator;
use rust_decimal_macros::dec;

const TABLE: [&str; 4] = [
    "Date,USD,JPY,GBP,ISK,",
    "2024-01-05,1.0921,158.09,0.86085,N/A,",
    "2024-01-04,1.0953,158.40,0.86255,150.50,",
    "2024-01-03,1.0919,156.13,0.86465,150.30,",
];

fn main() {
    println!("╔═══════════════════════════════════════════╗");
    println!("║  fx-history: Most Recent Rate Conversion  ║");
    println!("╚═══════════════════════════════════════════╝\n");

    let table = match parse(TABLE) {
        Ok(table) => table,
        Err(e) => {
            eprintln!("Malformed table: {}", e);
            return;
        }
    };

    println!("Most recent date: {}\n", table.most_recent_date());

    let amount = dec!(100);
    for from in table.currencies() {
        for to in table.currencies() {
            if from == to {
                continue;
            }
            match ConversionCalculator::convert(&table, from, to, amount) {
                Ok(converted) => println!(
                    "  {} {} = {:>12} {}",
                    amount,
                    from,
                    ConversionCalculator::display_amount(converted),
                    to
                ),
                Err(QueryError::MissingRate { currency, .. }) => {
                    println!("  {} {} -> {}: unknown due to missing {} data", amount, from, to, currency)
                }
                Err(e) => println!("  {}", e),
            }
        }
    }
}
