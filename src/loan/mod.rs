//! Mortgage calculations.
//!
//! Responsibilities:
//!
//! - validate a loan request and compute the payment summary
//! - expand it into a per-installment amortization schedule
//! - evaluate rate × term comparison grids (parallel)

pub mod grid;
pub mod schedule;
pub mod simulate;

pub use grid::*;
pub use schedule::*;
pub use simulate::*;
