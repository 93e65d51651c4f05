//! Mathematical utilities: fixed-rate annuity formulas.

pub mod annuity;

pub use annuity::*;
