//! Valuation heuristic.
//!
//! The estimator is a small, pure function over a property description and a
//! parameter table, so the table can be swapped without touching the formula.

pub mod estimator;
pub mod tables;

pub use estimator::*;
pub use tables::*;
