//! Command-line parsing for the mortgage and valuation calculators.
//!
//! The goal of this module is to keep **argument parsing** and **command dispatch**
//! separate from the calculation code.

use std::path::PathBuf;

use clap::{Args, Parser, Subcommand};

use crate::domain::{Condition, PropertyType};
use crate::loan::{DEFAULT_RATES, DEFAULT_TERMS};

/// Top-level CLI.
#[derive(Debug, Parser)]
#[command(name = "immo", version, about = "Mortgage simulator and property value estimator")]
pub struct Cli {
    #[command(subcommand)]
    pub command: Command,
}

/// CLI subcommands.
#[derive(Debug, Subcommand)]
pub enum Command {
    /// Simulate a fixed-rate loan and print the payment summary.
    Loan(LoanCmdArgs),
    /// Print the amortization schedule, optionally plotting/exporting it.
    Schedule(ScheduleArgs),
    /// Compare monthly payments across several rates and terms.
    Compare(CompareArgs),
    /// Estimate a property's value from its attributes.
    Estimate(EstimateArgs),
    /// Re-display a previously saved quote JSON.
    Show(ShowArgs),
    /// Launch the interactive calculator.
    ///
    /// Every change to a field recomputes the result immediately.
    Tui(LoanArgs),
}

/// Loan parameters shared by every loan-related subcommand.
#[derive(Debug, Args, Clone)]
pub struct LoanArgs {
    /// Property price.
    #[arg(short = 'p', long, default_value_t = 300_000.0)]
    pub price: f64,

    /// Down payment (must be below the price).
    #[arg(short = 'd', long, default_value_t = 60_000.0)]
    pub down: f64,

    /// Loan term in years.
    #[arg(short = 'y', long, default_value_t = 20)]
    pub years: u32,

    /// Nominal annual interest rate in percent.
    #[arg(short = 'r', long, default_value_t = 3.5)]
    pub rate: f64,

    /// Add borrower insurance (3.6% of the monthly payment).
    #[arg(long)]
    pub insurance: bool,

    /// Add notary fees (8% of the price).
    #[arg(long)]
    pub notary: bool,
}

#[derive(Debug, Parser, Clone)]
pub struct LoanCmdArgs {
    #[command(flatten)]
    pub loan: LoanArgs,

    /// Save the request and result to a quote JSON file.
    #[arg(long, value_name = "JSON")]
    pub save: Option<PathBuf>,
}

#[derive(Debug, Parser, Clone)]
pub struct ScheduleArgs {
    #[command(flatten)]
    pub loan: LoanArgs,

    /// Show one row per installment instead of one per year.
    #[arg(long)]
    pub monthly: bool,

    /// Render an ASCII plot of the outstanding balance.
    #[arg(long)]
    pub plot: bool,

    /// Plot width (columns).
    #[arg(long, default_value_t = 80)]
    pub width: usize,

    /// Plot height (rows).
    #[arg(long, default_value_t = 20)]
    pub height: usize,

    /// Export every installment to CSV.
    #[arg(long, value_name = "CSV")]
    pub export: Option<PathBuf>,
}

#[derive(Debug, Parser, Clone)]
pub struct CompareArgs {
    #[command(flatten)]
    pub loan: LoanArgs,

    /// Rates to compare (percent, comma-separated).
    #[arg(long, value_delimiter = ',', default_values_t = DEFAULT_RATES)]
    pub rates: Vec<f64>,

    /// Terms to compare (years, comma-separated).
    #[arg(long, value_delimiter = ',', default_values_t = DEFAULT_TERMS)]
    pub terms: Vec<u32>,
}

#[derive(Debug, Parser, Clone)]
pub struct EstimateArgs {
    /// Street address (informational).
    #[arg(long, default_value = "")]
    pub address: String,

    /// City; drives the location multiplier.
    #[arg(short = 'c', long, default_value = "")]
    pub city: String,

    /// Postal code (informational).
    #[arg(long, default_value = "")]
    pub postal_code: String,

    /// Property type.
    #[arg(short = 't', long = "type", value_enum, default_value_t = PropertyType::Apartment)]
    pub property_type: PropertyType,

    /// Living area in square meters.
    #[arg(short = 'a', long)]
    pub area: f64,

    /// Number of rooms.
    #[arg(long, default_value_t = 1)]
    pub rooms: u32,

    /// Number of bedrooms.
    #[arg(long, default_value_t = 0)]
    pub bedrooms: u32,

    /// Floor (optional).
    #[arg(long, allow_hyphen_values = true)]
    pub floor: Option<i32>,

    /// Construction year (optional).
    #[arg(long = "built")]
    pub construction_year: Option<i32>,

    /// Overall condition.
    #[arg(long, value_enum, default_value_t = Condition::Good)]
    pub condition: Condition,

    #[arg(long)]
    pub parking: bool,

    #[arg(long)]
    pub balcony: bool,

    #[arg(long)]
    pub elevator: bool,

    /// Save the request and result to a quote JSON file.
    #[arg(long, value_name = "JSON")]
    pub save: Option<PathBuf>,
}

/// Options for displaying a saved quote.
#[derive(Debug, Parser)]
pub struct ShowArgs {
    /// Quote JSON produced by `immo loan --save` or `immo estimate --save`.
    #[arg(long, value_name = "JSON")]
    pub file: PathBuf,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn loan_defaults() {
        let cli = Cli::parse_from(["immo", "loan"]);
        let Command::Loan(args) = cli.command else {
            panic!("expected loan subcommand");
        };
        assert_eq!(args.loan.price, 300_000.0);
        assert_eq!(args.loan.years, 20);
        assert!(!args.loan.insurance);
        assert!(args.save.is_none());
    }

    #[test]
    fn compare_lists_are_comma_separated() {
        let cli = Cli::parse_from(["immo", "compare", "--rates", "1.5,2.5", "--terms", "10,15,20"]);
        let Command::Compare(args) = cli.command else {
            panic!("expected compare subcommand");
        };
        assert_eq!(args.rates, vec![1.5, 2.5]);
        assert_eq!(args.terms, vec![10, 15, 20]);

        let cli = Cli::parse_from(["immo", "compare"]);
        let Command::Compare(args) = cli.command else {
            panic!("expected compare subcommand");
        };
        assert_eq!(args.rates, DEFAULT_RATES.to_vec());
        assert_eq!(args.terms, DEFAULT_TERMS.to_vec());
    }

    #[test]
    fn estimate_flags() {
        let cli = Cli::parse_from([
            "immo", "estimate", "--area", "75", "--city", "Paris", "--type", "house",
            "--condition", "excellent", "--parking", "--floor", "-1",
        ]);
        let Command::Estimate(args) = cli.command else {
            panic!("expected estimate subcommand");
        };
        assert_eq!(args.area, 75.0);
        assert_eq!(args.property_type, PropertyType::House);
        assert_eq!(args.condition, Condition::Excellent);
        assert!(args.parking && !args.balcony);
        assert_eq!(args.floor, Some(-1));
    }

    #[test]
    fn estimate_requires_area() {
        assert!(Cli::try_parse_from(["immo", "estimate", "--city", "Lyon"]).is_err());
    }
}
