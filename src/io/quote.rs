//! Read/write quote JSON files.
//!
//! A quote is the "portable" record of one calculation:
//! - the request exactly as entered
//! - the computed result
//! - metadata (tool, timestamp, currency label)
//!
//! The schema is defined by `domain::QuoteFile`.

use std::fs::File;
use std::path::Path;

use chrono::Utc;
use tracing::info;

use crate::domain::{Quote, QuoteFile};
use crate::error::AppError;

pub const TOOL_NAME: &str = "immo";

/// Wrap a quote with metadata stamped now.
pub fn new_quote_file(quote: Quote, currency: &str) -> QuoteFile {
    QuoteFile {
        tool: TOOL_NAME.to_string(),
        generated_at: Utc::now(),
        currency: currency.to_string(),
        quote,
    }
}

/// Write a quote JSON file.
pub fn write_quote_json(path: &Path, file: &QuoteFile) -> Result<(), AppError> {
    let out = File::create(path)
        .map_err(|e| AppError::new(2, format!("Failed to create quote JSON '{}': {e}", path.display())))?;

    serde_json::to_writer_pretty(out, file)
        .map_err(|e| AppError::new(2, format!("Failed to write quote JSON: {e}")))?;

    info!(path = %path.display(), "quote saved");
    Ok(())
}

/// Read a quote JSON file.
pub fn read_quote_json(path: &Path) -> Result<QuoteFile, AppError> {
    let file = File::open(path)
        .map_err(|e| AppError::new(2, format!("Failed to open quote JSON '{}': {e}", path.display())))?;
    let quote: QuoteFile =
        serde_json::from_reader(file).map_err(|e| AppError::new(2, format!("Invalid quote JSON: {e}")))?;
    Ok(quote)
}
