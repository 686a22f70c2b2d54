//! Shared "fit pipeline" logic.
//!
//! Keeping this separate from `app` keeps the workflow testable without
//! touching stdout: CSV ingest -> fit by model kind.

use crate::domain::{FitConfig, FitResult};
use crate::error::AppError;
use crate::io::IngestedData;

/// All computed outputs of a single `regress fit` run.
#[derive(Debug, Clone)]
pub struct RunOutput {
    pub ingest: IngestedData,
    pub result: FitResult,
}

/// Execute the fitting pipeline and return the computed outputs.
pub fn run_fit(config: &FitConfig) -> Result<RunOutput, AppError> {
    let ingest = crate::io::load_samples(&config.csv_path)?;
    let result = crate::fit::fit(config.model, &ingest.samples, config.param)?;
    Ok(RunOutput { ingest, result })
}
