//! Export fitted points to CSV.
//!
//! The export is meant to be easy to consume in spreadsheets or downstream scripts.
//! Missing observations and non-finite predictions are written as empty cells.

use std::io::Write;
use std::path::Path;

use crate::domain::{FitResult, Sample};
use crate::error::AppError;

/// Write `x,y_obs,y_fit` rows to a CSV file.
pub fn write_points_csv(path: &Path, samples: &[Sample], result: &FitResult) -> Result<(), AppError> {
    let file = std::fs::File::create(path)
        .map_err(|e| AppError::new(2, format!("Failed to create export CSV '{}': {e}", path.display())))?;
    write_points(file, samples, result)
}

/// Write `x,y_obs,y_fit` rows to any writer.
pub fn write_points<W: Write>(out: W, samples: &[Sample], result: &FitResult) -> Result<(), AppError> {
    let mut writer = csv::Writer::from_writer(out);

    writer
        .write_record(["x", "y_obs", "y_fit"])
        .map_err(|e| AppError::new(2, format!("Failed to write export CSV header: {e}")))?;

    for (sample, &(x, y_fit)) in samples.iter().zip(result.points.iter()) {
        writer
            .write_record([cell(x), sample.y.map(cell).unwrap_or_default(), cell(y_fit)])
            .map_err(|e| AppError::new(2, format!("Failed to write export CSV row: {e}")))?;
    }

    writer
        .flush()
        .map_err(|e| AppError::new(2, format!("Failed to flush export CSV: {e}")))?;
    Ok(())
}

fn cell(v: f64) -> String {
    if v.is_finite() { format!("{v}") } else { String::new() }
}
