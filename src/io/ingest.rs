//! CSV ingest and normalization.
//!
//! Turns an `x,y` CSV into an ordered list of `Sample`s.
//!
//! Design goals:
//! - **Strict schema** for the required `x`/`y` headers (clear errors + exit code 2)
//! - **Row-level validation** (skip rows with a bad `x`, report what happened)
//! - **Order preserved**: samples keep file order; `lastValue` depends on it
//! - **Missing y is data**: empty, `null`, `NA`, or `NaN` cells become `y = None`

use std::collections::HashMap;
use std::io::Read;
use std::path::Path;

use csv::StringRecord;

use crate::domain::Sample;
use crate::error::AppError;

/// Summary stats about the samples loaded.
#[derive(Debug, Clone, PartialEq)]
pub struct DatasetStats {
    pub n_samples: usize,
    pub n_missing: usize,
    pub x_min: f64,
    pub x_max: f64,
    /// Range over present `y` values (`NaN` when every `y` is missing).
    pub y_min: f64,
    pub y_max: f64,
}

/// A row-level error encountered during ingest.
#[derive(Debug, Clone, PartialEq)]
pub struct RowError {
    pub line: usize,
    pub message: String,
}

/// Ingest output: samples in file order + stats + row errors.
#[derive(Debug, Clone)]
pub struct IngestedData {
    pub samples: Vec<Sample>,
    pub stats: DatasetStats,
    pub row_errors: Vec<RowError>,
    pub rows_read: usize,
    pub rows_used: usize,
}

/// Load samples from a CSV file.
pub fn load_samples(path: &Path) -> Result<IngestedData, AppError> {
    let file = std::fs::File::open(path)
        .map_err(|e| AppError::new(2, format!("Failed to open CSV '{}': {e}", path.display())))?;
    read_samples(file)
}

/// Load samples from any CSV reader.
pub fn read_samples<R: Read>(input: R) -> Result<IngestedData, AppError> {
    let mut reader = csv::ReaderBuilder::new()
        .flexible(true)
        .trim(csv::Trim::All)
        .from_reader(input);

    let headers = reader
        .headers()
        .map_err(|e| AppError::new(2, format!("Failed to read CSV headers: {e}")))?;
    let columns = column_lookup(headers);
    let column = |name: &str| {
        columns
            .get(name)
            .copied()
            .ok_or_else(|| AppError::new(2, format!("Missing required column: `{name}`")))
    };
    let (x_col, y_col) = (column("x")?, column("y")?);

    let mut samples = Vec::new();
    let mut row_errors = Vec::new();
    let mut rows_read = 0usize;

    // Line 1 is the header.
    for (line, record) in (2..).zip(reader.records()) {
        rows_read += 1;
        let parsed = record
            .map_err(|e| format!("CSV parse error: {e}"))
            .and_then(|record| parse_row(&record, x_col, y_col));
        match parsed {
            Ok(sample) => samples.push(sample),
            Err(message) => row_errors.push(RowError { line, message }),
        }
    }

    if samples.is_empty() {
        return Err(AppError::new(3, "No valid rows in CSV."));
    }

    Ok(IngestedData {
        stats: compute_stats(&samples),
        rows_used: samples.len(),
        samples,
        row_errors,
        rows_read,
    })
}

/// Column index by normalized header name (trimmed, lowercase, BOM removed).
///
/// Spreadsheet exports may prefix the first header with a UTF-8 BOM.
fn column_lookup(headers: &StringRecord) -> HashMap<String, usize> {
    let mut lookup = HashMap::with_capacity(headers.len());
    for (idx, name) in headers.iter().enumerate() {
        let key = name.trim_start_matches('\u{feff}').trim().to_ascii_lowercase();
        lookup.entry(key).or_insert(idx);
    }
    lookup
}

fn parse_row(record: &StringRecord, x_col: usize, y_col: usize) -> Result<Sample, String> {
    let raw_x = record.get(x_col).unwrap_or("");
    let x = raw_x
        .parse::<f64>()
        .ok()
        .filter(|v| !v.is_nan())
        .ok_or_else(|| format!("Missing/invalid `x` value: '{raw_x}'."))?;

    let raw_y = record.get(y_col).unwrap_or("");
    let y = if is_missing_token(raw_y) {
        None
    } else {
        Some(
            raw_y
                .parse::<f64>()
                .map_err(|_| format!("Invalid `y` value: '{raw_y}'."))?,
        )
    };

    Ok(Sample { x, y })
}

fn is_missing_token(s: &str) -> bool {
    s.is_empty()
        || s.eq_ignore_ascii_case("null")
        || s.eq_ignore_ascii_case("na")
        || s.eq_ignore_ascii_case("nan")
}

fn compute_stats(samples: &[Sample]) -> DatasetStats {
    let mut x_min = f64::INFINITY;
    let mut x_max = f64::NEG_INFINITY;
    let mut y_min = f64::INFINITY;
    let mut y_max = f64::NEG_INFINITY;
    let mut n_missing = 0usize;

    for s in samples {
        x_min = x_min.min(s.x);
        x_max = x_max.max(s.x);
        match s.y {
            Some(y) => {
                y_min = y_min.min(y);
                y_max = y_max.max(y);
            }
            None => n_missing += 1,
        }
    }

    if n_missing == samples.len() {
        y_min = f64::NAN;
        y_max = f64::NAN;
    }

    DatasetStats {
        n_samples: samples.len(),
        n_missing,
        x_min,
        x_max,
        y_min,
        y_max,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn reads_samples_in_file_order() {
        let csv = "x,y\n3,1.5\n1,\n2,null\n0,-4\n";
        let data = read_samples(csv.as_bytes()).unwrap();
        assert_eq!(
            data.samples,
            vec![
                Sample::new(3.0, 1.5),
                Sample::missing(1.0),
                Sample::missing(2.0),
                Sample::new(0.0, -4.0),
            ]
        );
        assert_eq!(data.stats.n_missing, 2);
        assert_eq!(data.stats.x_min, 0.0);
        assert_eq!(data.stats.y_max, 1.5);
        assert!(data.row_errors.is_empty());
    }

    #[test]
    fn headers_are_case_insensitive_and_bom_tolerant() {
        let csv = "\u{feff}X, Y ,label\n1,2,a\n";
        let data = read_samples(csv.as_bytes()).unwrap();
        assert_eq!(data.samples, vec![Sample::new(1.0, 2.0)]);
    }

    #[test]
    fn bad_rows_are_reported_and_skipped() {
        let csv = "x,y\n1,2\nabc,3\n4,oops\n5,6\n";
        let data = read_samples(csv.as_bytes()).unwrap();
        assert_eq!(data.rows_read, 4);
        assert_eq!(data.rows_used, 2);
        let lines: Vec<usize> = data.row_errors.iter().map(|e| e.line).collect();
        assert_eq!(lines, vec![3, 4]);
    }

    #[test]
    fn missing_y_column_is_an_error() {
        let err = read_samples("x,z\n1,2\n".as_bytes()).unwrap_err();
        assert_eq!(err.exit_code(), 2);
    }

    #[test]
    fn empty_file_is_an_error() {
        let err = read_samples("x,y\n".as_bytes()).unwrap_err();
        assert_eq!(err.exit_code(), 3);
    }
}
