//! Domain types used throughout the crate.
//!
//! This module defines:
//!
//! - loan inputs/outputs (`LoanRequest`, `LoanSimulation`, schedule rows)
//! - valuation inputs/outputs (`EstimationRequest`, `EstimationResult`)
//! - the saved quote schema (`QuoteFile`)

pub mod types;

pub use types::*;
