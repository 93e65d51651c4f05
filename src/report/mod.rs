//! Reporting utilities: formatted terminal output for simulations, schedules,
//! comparison grids and estimates.

pub mod format;

pub use format::*;
