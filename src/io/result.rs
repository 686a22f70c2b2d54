//! Read/write fit result JSON files.
//!
//! A result file is the portable representation of one fit:
//! - model token and per-model parameter
//! - the input samples
//! - the `FitResult` (equation, points, string, optional sigmoid span)
//!
//! Non-finite numbers are written as `null` and read back as `NaN`.
//! The schema is defined by `domain::ResultFile`.

use std::fs::File;
use std::path::Path;

use chrono::Utc;

use crate::domain::{FitParam, FitResult, ModelKind, ResultFile, Sample};
use crate::error::AppError;

/// Assemble a result file for the current run.
pub fn build_result_file(
    model: ModelKind,
    param: Option<FitParam>,
    samples: &[Sample],
    result: &FitResult,
) -> ResultFile {
    ResultFile {
        tool: "regress".to_string(),
        generated_at: Utc::now(),
        model,
        param,
        samples: samples.to_vec(),
        result: result.clone(),
    }
}

/// Write a result JSON file.
pub fn write_result_json(path: &Path, file: &ResultFile) -> Result<(), AppError> {
    let out = File::create(path)
        .map_err(|e| AppError::new(2, format!("Failed to create result JSON '{}': {e}", path.display())))?;

    serde_json::to_writer_pretty(out, file)
        .map_err(|e| AppError::new(2, format!("Failed to write result JSON: {e}")))?;

    Ok(())
}

/// Read a result JSON file.
pub fn read_result_json(path: &Path) -> Result<ResultFile, AppError> {
    let file = File::open(path)
        .map_err(|e| AppError::new(2, format!("Failed to open result JSON '{}': {e}", path.display())))?;
    let result: ResultFile =
        serde_json::from_reader(file).map_err(|e| AppError::new(2, format!("Invalid result JSON: {e}")))?;
    result
        .model
        .check_equation(&result.result.equation)
        .map_err(|e| AppError::new(2, format!("Invalid result JSON '{}': {e}", path.display())))?;
    Ok(result)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::SpanConfig;
    use crate::fit::fit;

    #[test]
    fn result_file_survives_json() {
        let samples = vec![Sample::new(0.0, 1.0), Sample::missing(10.0), Sample::new(20.0, 9.0)];
        let param = Some(FitParam::Span(SpanConfig { offset: 5.0, grain: 5.0 }));
        let result = fit(ModelKind::Sigmoid, &samples, param).unwrap();
        let file = build_result_file(ModelKind::Sigmoid, param, &samples, &result);

        let json = serde_json::to_string(&file).unwrap();
        let back: ResultFile = serde_json::from_str(&json).unwrap();

        assert_eq!(back.model, ModelKind::Sigmoid);
        assert_eq!(back.param, param);
        assert_eq!(back.samples, samples);
        assert_eq!(back.result.equation, result.equation);
        assert_eq!(back.result.string, result.string);
        assert_eq!(back.result.span.map(|s| s.xspan.len()), Some(6));
    }

    #[test]
    fn short_equation_is_rejected_on_read() {
        let samples = vec![Sample::new(1.0, 1.0), Sample::new(2.0, 2.0)];
        let mut result = fit(ModelKind::Linear, &samples, None).unwrap();
        result.equation.truncate(1);
        let file = build_result_file(ModelKind::Sigmoid, None, &samples, &result);

        let path = std::env::temp_dir().join(format!("regress_short_eq_{}.json", std::process::id()));
        write_result_json(&path, &file).unwrap();
        let err = read_result_json(&path).unwrap_err();
        std::fs::remove_file(&path).ok();

        assert_eq!(err.exit_code(), 2);
        assert!(err.message().contains("coefficient"));
    }
}
