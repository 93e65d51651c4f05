//! `immo-calc` library crate.
//!
//! Loan amortization and property valuation calculators for a real-estate
//! brokerage. The binary (`immo`) is a thin wrapper around this library so that:
//!
//! - calculators are testable without spawning processes
//! - other front-ends can call `simulate_loan` / `estimate_value` directly

pub mod app;
pub mod cli;
pub mod config;
pub mod domain;
pub mod error;
pub mod io;
pub mod loan;
pub mod logging;
pub mod math;
pub mod plot;
pub mod report;
pub mod tui;
pub mod valuation;

pub use error::{AppError, CalcError};
pub use loan::{amortization_schedule, compare_rates_terms, simulate_loan};
pub use valuation::{ValuationTables, estimate_value};
