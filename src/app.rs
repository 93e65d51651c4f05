//! Top-level application orchestration.
//!
//! `src/main.rs` is intentionally tiny; this module is the "real main" that:
//! - loads settings and installs logging
//! - parses CLI arguments
//! - runs the calculators
//! - prints reports/plots
//! - writes optional exports

use clap::Parser;
use tracing::debug;

use crate::cli::{
    Command, CompareArgs, EstimateArgs, LoanArgs, LoanCmdArgs, ScheduleArgs, ShowArgs,
};
use crate::config::Settings;
use crate::domain::{Amenities, EstimationRequest, LoanRequest, Quote};
use crate::error::AppError;

pub mod pipeline;

/// Entry point for the `immo` binary.
pub fn run() -> Result<(), AppError> {
    let settings = Settings::from_env()?;
    crate::logging::init(&settings.log_filter)?;

    // We want `immo` and `immo -p 250000` to behave like `immo tui ...`.
    //
    // Clap requires a subcommand name, so we do a small, explicit rewrite of the
    // argv list before parsing.
    let argv = rewrite_args(std::env::args().collect());
    let cli = crate::cli::Cli::parse_from(argv);
    debug!(command = ?cli.command, "parsed command line");

    match cli.command {
        Command::Loan(args) => handle_loan(args, &settings),
        Command::Schedule(args) => handle_schedule(args, &settings),
        Command::Compare(args) => handle_compare(args, &settings),
        Command::Estimate(args) => handle_estimate(args, &settings),
        Command::Show(args) => handle_show(args),
        Command::Tui(args) => crate::tui::run(loan_request_from_args(&args), settings),
    }
}

fn handle_loan(args: LoanCmdArgs, settings: &Settings) -> Result<(), AppError> {
    let request = loan_request_from_args(&args.loan);
    let result = crate::loan::simulate_loan(&request)?;

    println!(
        "{}",
        crate::report::format_loan_summary(&request, &result, &settings.currency)
    );

    if let Some(path) = &args.save {
        let file = crate::io::new_quote_file(Quote::Loan { request, result }, &settings.currency);
        crate::io::write_quote_json(path, &file)?;
    }
    Ok(())
}

fn handle_schedule(args: ScheduleArgs, settings: &Settings) -> Result<(), AppError> {
    let request = loan_request_from_args(&args.loan);
    let run = pipeline::run_loan(&request)?;

    println!(
        "{}",
        crate::report::format_loan_summary(&request, run.simulation(), &settings.currency)
    );
    let table = if args.monthly {
        crate::report::format_monthly_table(&run.schedule.rows, &settings.currency)
    } else {
        crate::report::format_yearly_table(&run.schedule.yearly_summary(), &settings.currency)
    };
    println!("{table}");

    if args.plot {
        let balance = run.schedule.balance_curve();
        let interest = run.schedule.cumulative_interest_curve();
        let plot = crate::plot::render_balance_plot(&balance, Some(&interest), args.width, args.height);
        println!("{plot}");
        println!("  - balance   . cumulative interest");
    }

    if let Some(path) = &args.export {
        crate::io::write_schedule_csv(path, &run.schedule.rows)?;
    }
    Ok(())
}

fn handle_compare(args: CompareArgs, settings: &Settings) -> Result<(), AppError> {
    let base = loan_request_from_args(&args.loan);
    let cells = crate::loan::compare_rates_terms(&base, &args.rates, &args.terms)?;
    println!(
        "{}",
        crate::report::format_grid(&cells, &args.rates, &args.terms, &settings.currency)
    );
    Ok(())
}

fn handle_estimate(args: EstimateArgs, settings: &Settings) -> Result<(), AppError> {
    let request = estimation_request_from_args(&args);
    let run = pipeline::run_estimate(&request, &settings.tables)?;

    println!(
        "{}",
        crate::report::format_estimate(&run.request, &run.result, &settings.currency)
    );

    if let Some(path) = &args.save {
        let file = crate::io::new_quote_file(
            Quote::Estimate {
                request: run.request,
                result: run.result,
            },
            &settings.currency,
        );
        crate::io::write_quote_json(path, &file)?;
    }
    Ok(())
}

fn handle_show(args: ShowArgs) -> Result<(), AppError> {
    let file = crate::io::read_quote_json(&args.file)?;
    println!("{}", crate::report::format_quote(&file));
    Ok(())
}

pub fn loan_request_from_args(args: &LoanArgs) -> LoanRequest {
    LoanRequest {
        property_price: args.price,
        down_payment: args.down,
        loan_term_years: args.years,
        annual_rate_percent: args.rate,
        include_insurance: args.insurance,
        include_notary_fees: args.notary,
    }
}

pub fn estimation_request_from_args(args: &EstimateArgs) -> EstimationRequest {
    EstimationRequest {
        address: args.address.clone(),
        city: args.city.clone(),
        postal_code: args.postal_code.clone(),
        property_type: args.property_type,
        area_sqm: args.area,
        rooms: args.rooms,
        bedrooms: args.bedrooms,
        floor: args.floor,
        construction_year: args.construction_year,
        condition: args.condition,
        amenities: Amenities {
            parking: args.parking,
            balcony: args.balcony,
            elevator: args.elevator,
        },
    }
}

/// Rewrite argv so `immo` defaults to `immo tui`.
///
/// Rules:
/// - `immo`                      -> `immo tui`
/// - `immo -p 250000 ...`        -> `immo tui -p 250000 ...`
/// - `immo --help/--version/-h`  -> unchanged (show top-level help/version)
fn rewrite_args(mut argv: Vec<String>) -> Vec<String> {
    let Some(arg1) = argv.get(1).cloned() else {
        argv.push("tui".to_string());
        return argv;
    };

    let is_top_level_help_or_version = matches!(
        arg1.as_str(),
        "-h" | "--help" | "-V" | "--version" | "help"
    );
    if is_top_level_help_or_version {
        return argv;
    }

    let is_subcommand = matches!(
        arg1.as_str(),
        "loan" | "schedule" | "compare" | "estimate" | "show" | "tui"
    );
    if is_subcommand {
        return argv;
    }

    // If the first token is a flag, treat it as "tui flags".
    if arg1.starts_with('-') {
        argv.insert(1, "tui".to_string());
        return argv;
    }

    // Otherwise, leave as-is.
    argv
}

#[cfg(test)]
mod tests {
    use super::*;

    fn argv(items: &[&str]) -> Vec<String> {
        items.iter().map(|s| s.to_string()).collect()
    }

    #[test]
    fn bare_invocation_opens_tui() {
        assert_eq!(rewrite_args(argv(&["immo"])), argv(&["immo", "tui"]));
        assert_eq!(
            rewrite_args(argv(&["immo", "-p", "250000"])),
            argv(&["immo", "tui", "-p", "250000"])
        );
    }

    #[test]
    fn subcommands_and_help_are_untouched() {
        for items in [&["immo", "loan"][..], &["immo", "--help"][..], &["immo", "estimate", "-a", "40"][..]] {
            assert_eq!(rewrite_args(argv(items)), argv(items));
        }
    }

    #[test]
    fn estimate_args_map_onto_request() {
        let cli = crate::cli::Cli::parse_from([
            "immo", "estimate", "--area", "40", "--city", "Marseille", "--balcony", "--built", "1975",
        ]);
        let Command::Estimate(args) = cli.command else {
            panic!("expected estimate subcommand");
        };
        let req = estimation_request_from_args(&args);
        assert_eq!(req.area_sqm, 40.0);
        assert_eq!(req.city, "Marseille");
        assert_eq!(req.construction_year, Some(1975));
        assert!(req.amenities.balcony && !req.amenities.parking);
    }
}
