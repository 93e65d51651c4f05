//! Input/output helpers.
//!
//! - schedule exports (CSV) (`export`)
//! - quote JSON read/write (`quote`)

pub mod export;
pub mod quote;

pub use export::*;
pub use quote::*;
