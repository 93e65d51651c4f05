//! Export an amortization schedule to CSV.
//!
//! The export is meant to be easy to consume in spreadsheets or downstream scripts.

use std::fs::File;
use std::io::{BufWriter, Write};
use std::path::Path;

use tracing::info;

use crate::domain::AmortizationRow;
use crate::error::AppError;

pub const SCHEDULE_CSV_HEADER: &str = "period,year,payment,principal,interest,balance";

/// Write per-installment rows to a CSV file.
pub fn write_schedule_csv(path: &Path, rows: &[AmortizationRow]) -> Result<(), AppError> {
    let file = File::create(path)
        .map_err(|e| AppError::new(2, format!("Failed to create export CSV '{}': {e}", path.display())))?;
    let mut file = BufWriter::new(file);

    write_schedule(&mut file, rows)
        .map_err(|e| AppError::new(2, format!("Failed to write export CSV: {e}")))?;
    file.flush()
        .map_err(|e| AppError::new(2, format!("Failed to flush export CSV: {e}")))?;

    info!(path = %path.display(), rows = rows.len(), "schedule exported");
    Ok(())
}

fn write_schedule<W: Write>(out: &mut W, rows: &[AmortizationRow]) -> std::io::Result<()> {
    writeln!(out, "{SCHEDULE_CSV_HEADER}")?;
    for r in rows {
        writeln!(
            out,
            "{},{},{:.2},{:.2},{:.2},{:.2}",
            r.period, r.year, r.payment, r.principal, r.interest, r.balance
        )?;
    }
    Ok(())
}
