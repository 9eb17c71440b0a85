//! fx-history CLI
//!
//! Query a historical exchange-rate table from the command line.
//!
//! # Usage
//!
//! ```bash
//! # List currencies and the most recent date
//! fx-history currencies --input eurofxref-hist.csv
//!
//! # Convert 250 USD to GBP at the most recent rates
//! fx-history convert --input eurofxref-hist.csv --from USD --to GBP --amount 250
//!
//! # Daily USD and GBP rates for the first week of 2024, as JSON
//! fx-history range --input eurofxref-hist.csv --from USD --to GBP \
//!     --start 2024-01-01 --end 2024-01-08 --format json
//! ```

use chrono::NaiveDate;
use fx_history::core::currency::CurrencyCode;
use fx_history::core::error::QueryError;
use fx_history::core::table::RateTable;
use fx_history::parse::options::ParseOptions;
use fx_history::parse::parser::{RateTableParser, DATE_FORMAT};
use fx_history::query::conversion::ConversionCalculator;
use fx_history::query::range::RangeSeriesBuilder;
use log::info;
use rust_decimal::Decimal;
use std::fs;
use std::process;

fn print_usage() {
    eprintln!(
        r#"fx-history — historical exchange rates: conversion and daily series

USAGE:
    fx-history <COMMAND> [OPTIONS]

COMMANDS:
    currencies  List currency codes and the most recent date
    convert     Convert an amount at the most recent rates
    range       Print forward-filled daily rates for two currencies
    help        Show this message

OPTIONS (all commands):
    --input <FILE>      Path to the decompressed rate table (CSV)
    --strict            Reject tables whose rows are not newest-first
    --format <FORMAT>   Output format: text (default) or json

OPTIONS (convert):
    --from <CODE>       Source currency
    --to <CODE>         Target currency
    --amount <N>        Amount to convert (default: 1)

OPTIONS (range):
    --from <CODE>       First currency
    --to <CODE>         Second currency
    --start <DATE>      First day, yyyy-mm-dd (default: a week before the most recent date)
    --end <DATE>        Day after the last, yyyy-mm-dd (default: the most recent date)

EXAMPLES:
    fx-history currencies --input eurofxref-hist.csv
    fx-history convert --input eurofxref-hist.csv --from USD --to GBP --amount 250
    fx-history range --input eurofxref-hist.csv --from USD --to JPY --start 2024-01-01 --end 2024-02-01"#
    );
}

fn fail(message: impl std::fmt::Display) -> ! {
    eprintln!("Error: {}", message);
    process::exit(1);
}

#[derive(Default)]
struct Args {
    input: Option<String>,
    strict: bool,
    json: bool,
    from: Option<String>,
    to: Option<String>,
    amount: Option<String>,
    start: Option<String>,
    end: Option<String>,
}

fn parse_args(args: &[String]) -> Args {
    let mut parsed = Args::default();
    let mut i = 0;
    while i < args.len() {
        let flag = args[i].as_str();
        if flag == "--strict" {
            parsed.strict = true;
            i += 1;
            continue;
        }
        i += 1;
        let value = args
            .get(i)
            .cloned()
            .unwrap_or_else(|| fail(format!("{} requires a value", flag)));
        match flag {
            "--input" => parsed.input = Some(value),
            "--format" => match value.as_str() {
                "text" => parsed.json = false,
                "json" => parsed.json = true,
                other => fail(format!("unknown format '{}', expected text or json", other)),
            },
            "--from" => parsed.from = Some(value),
            "--to" => parsed.to = Some(value),
            "--amount" => parsed.amount = Some(value),
            "--start" => parsed.start = Some(value),
            "--end" => parsed.end = Some(value),
            _ => fail(format!("unknown option: {}", flag)),
        }
        i += 1;
    }
    parsed
}

fn load_table(args: &Args) -> RateTable {
    let path = args
        .input
        .as_deref()
        .unwrap_or_else(|| fail("--input <FILE> is required"));
    let content = fs::read_to_string(path)
        .unwrap_or_else(|e| fail(format!("reading file '{}': {}", path, e)));

    let options = if args.strict {
        ParseOptions::strict()
    } else {
        ParseOptions::default()
    };
    let table = RateTableParser::new(options)
        .parse_str(&content)
        .unwrap_or_else(|e| fail(format!("malformed rate table '{}': {}", path, e)));

    info!(
        "loaded {} currencies from {} ({} to {})",
        table.currencies().len(),
        path,
        table.earliest_date(),
        table.most_recent_date()
    );
    table
}

fn required_currency(value: &Option<String>, flag: &str) -> CurrencyCode {
    match value {
        Some(code) => CurrencyCode::new(code.trim().to_uppercase()),
        None => fail(format!("{} <CODE> is required", flag)),
    }
}

fn parse_date(value: &str) -> NaiveDate {
    NaiveDate::parse_from_str(value, DATE_FORMAT)
        .unwrap_or_else(|e| fail(format!("invalid date '{}': {}", value, e)))
}

fn print_json<T: serde::Serialize>(value: &T) {
    match serde_json::to_string_pretty(value) {
        Ok(json) => println!("{}", json),
        Err(e) => fail(format!("serializing output: {}", e)),
    }
}

#[derive(serde::Serialize)]
struct CurrenciesOutput<'a> {
    most_recent_date: NaiveDate,
    earliest_date: NaiveDate,
    currencies: &'a [CurrencyCode],
}

#[derive(serde::Serialize)]
struct ConversionOutput {
    from: CurrencyCode,
    to: CurrencyCode,
    date: NaiveDate,
    amount: Decimal,
    /// `None` when either rate is unavailable.
    result: Option<Decimal>,
}

fn cmd_currencies(args: &[String]) {
    let args = parse_args(args);
    let table = load_table(&args);

    if args.json {
        print_json(&CurrenciesOutput {
            most_recent_date: table.most_recent_date(),
            earliest_date: table.earliest_date(),
            currencies: table.currencies(),
        });
    } else {
        println!("Most recent date: {}", table.most_recent_date());
        println!("Earliest date:    {}", table.earliest_date());
        let codes: Vec<&str> = table.currencies().iter().map(|c| c.as_str()).collect();
        println!("Currencies ({}): {}", codes.len(), codes.join(", "));
    }
}

fn cmd_convert(args: &[String]) {
    let args = parse_args(args);
    let from = required_currency(&args.from, "--from");
    let to = required_currency(&args.to, "--to");
    let amount: Decimal = match &args.amount {
        Some(value) => value
            .parse()
            .unwrap_or_else(|e| fail(format!("invalid amount '{}': {}", value, e))),
        None => Decimal::ONE,
    };
    let table = load_table(&args);

    let result = match ConversionCalculator::convert(&table, &from, &to, amount) {
        Ok(converted) => Some(ConversionCalculator::display_amount(converted)),
        Err(QueryError::MissingRate { currency, date }) => {
            info!("no rate for {} on {}", currency, date);
            None
        }
        Err(e @ (QueryError::UnknownCurrency(_) | QueryError::Overflow { .. })) => fail(e),
    };

    if args.json {
        print_json(&ConversionOutput {
            from,
            to,
            date: table.most_recent_date(),
            amount,
            result,
        });
    } else {
        match result {
            Some(converted) => println!(
                "{} {} = {} {} (rates of {})",
                amount,
                from,
                converted,
                to,
                table.most_recent_date()
            ),
            None => println!("Unknown due to missing data"),
        }
    }
}

fn cmd_range(args: &[String]) {
    let args = parse_args(args);
    let from = required_currency(&args.from, "--from");
    let to = required_currency(&args.to, "--to");
    let table = load_table(&args);

    for currency in [&from, &to] {
        if !table.contains(currency) {
            fail(QueryError::UnknownCurrency(currency.clone()));
        }
    }

    let (default_start, default_end) = table.default_window();
    let start = args.start.as_deref().map(parse_date).unwrap_or(default_start);
    let end = args.end.as_deref().map(parse_date).unwrap_or(default_end);

    let series = RangeSeriesBuilder::build_range(&table, &from, &to, start, end);

    if args.json {
        print_json(&series);
    } else if series.is_empty() {
        println!("Empty range: {} is not after {}", end, start);
    } else {
        print!("{}", series);
        if let Some(max) = series.max_rate() {
            println!("Max rate: {}", max);
        }
    }
}

fn main() {
    env_logger::init();

    let args: Vec<String> = std::env::args().collect();

    if args.len() < 2 {
        print_usage();
        process::exit(1);
    }

    let command = args[1].as_str();
    let rest = &args[2..];

    match command {
        "currencies" => cmd_currencies(rest),
        "convert" => cmd_convert(rest),
        "range" => cmd_range(rest),
        "help" | "--help" | "-h" => print_usage(),
        _ => {
            eprintln!("Unknown command: {}", command);
            print_usage();
            process::exit(1);
        }
    }
}
