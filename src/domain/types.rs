//! Shared domain types.
//!
//! These types are plain values created fresh for every fit. They are kept
//! serializable so a fit can be exported to JSON and reloaded for plotting.

use std::path::PathBuf;
use std::str::FromStr;

use chrono::{DateTime, Utc};
use clap::ValueEnum;
use serde::{Deserialize, Deserializer, Serialize};

use crate::error::AppError;

/// One observation. `y = None` marks a missing value.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Sample {
    pub x: f64,
    pub y: Option<f64>,
}

impl Sample {
    pub fn new(x: f64, y: f64) -> Self {
        Self { x, y: Some(y) }
    }

    pub fn missing(x: f64) -> Self {
        Self { x, y: None }
    }
}

impl From<(f64, f64)> for Sample {
    fn from((x, y): (f64, f64)) -> Self {
        Self::new(x, y)
    }
}

impl From<(f64, Option<f64>)> for Sample {
    fn from((x, y): (f64, Option<f64>)) -> Self {
        Self { x, y }
    }
}

/// Curve families that can be fitted.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, ValueEnum)]
#[serde(rename_all = "camelCase")]
pub enum ModelKind {
    Linear,
    #[value(name = "linearThroughOrigin")]
    LinearThroughOrigin,
    Exponential,
    Logarithmic,
    Power,
    Polynomial,
    Sigmoid,
    #[value(name = "lastValue", alias = "lastvalue")]
    #[serde(alias = "lastvalue")]
    LastValue,
}

impl ModelKind {
    pub const ALL: [ModelKind; 8] = [
        ModelKind::Linear,
        ModelKind::LinearThroughOrigin,
        ModelKind::Exponential,
        ModelKind::Logarithmic,
        ModelKind::Power,
        ModelKind::Polynomial,
        ModelKind::Sigmoid,
        ModelKind::LastValue,
    ];

    /// Name token accepted by the dispatcher and the CLI.
    pub fn token(self) -> &'static str {
        match self {
            ModelKind::Linear => "linear",
            ModelKind::LinearThroughOrigin => "linearThroughOrigin",
            ModelKind::Exponential => "exponential",
            ModelKind::Logarithmic => "logarithmic",
            ModelKind::Power => "power",
            ModelKind::Polynomial => "polynomial",
            ModelKind::Sigmoid => "sigmoid",
            ModelKind::LastValue => "lastValue",
        }
    }

    /// Human-readable label for terminal output.
    pub fn display_name(self) -> &'static str {
        match self {
            ModelKind::Linear => "Linear",
            ModelKind::LinearThroughOrigin => "Linear (through origin)",
            ModelKind::Exponential => "Exponential",
            ModelKind::Logarithmic => "Logarithmic",
            ModelKind::Power => "Power",
            ModelKind::Polynomial => "Polynomial",
            ModelKind::Sigmoid => "Sigmoid",
            ModelKind::LastValue => "Last value",
        }
    }

    /// Length of the fitted equation, or `None` when it depends on the order.
    pub fn equation_len(self) -> Option<usize> {
        match self {
            ModelKind::LinearThroughOrigin | ModelKind::LastValue => Some(1),
            ModelKind::Linear | ModelKind::Exponential | ModelKind::Logarithmic | ModelKind::Power => {
                Some(2)
            }
            ModelKind::Sigmoid => Some(4),
            ModelKind::Polynomial => None,
        }
    }

    /// Check that `equation` has the shape this model evaluates.
    ///
    /// Polynomials need at least one coefficient; every other family needs
    /// exactly [`ModelKind::equation_len`] values.
    pub fn check_equation(self, equation: &[f64]) -> Result<(), AppError> {
        let ok = match self.equation_len() {
            Some(len) => equation.len() == len,
            None => !equation.is_empty(),
        };
        if ok {
            Ok(())
        } else {
            let expected = self
                .equation_len()
                .map_or_else(|| "at least 1".to_string(), |len| len.to_string());
            Err(AppError::new(
                2,
                format!(
                    "Equation for model '{}' needs {expected} coefficient(s), got {}.",
                    self.token(),
                    equation.len()
                ),
            ))
        }
    }
}

impl std::fmt::Display for ModelKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.token())
    }
}

impl FromStr for ModelKind {
    type Err = AppError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        if s == "lastvalue" {
            return Ok(ModelKind::LastValue);
        }
        ModelKind::ALL
            .into_iter()
            .find(|kind| kind.token() == s)
            .ok_or_else(|| {
                let known: Vec<&str> = ModelKind::ALL.iter().map(|k| k.token()).collect();
                AppError::new(
                    2,
                    format!("Unknown model '{s}' (expected one of: {}).", known.join(", ")),
                )
            })
    }
}

/// Dense resampling settings for a sigmoid fit.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct SpanConfig {
    /// Extra domain added on both sides of `[x_min, x_max]`.
    pub offset: f64,
    /// Spacing used to derive the number of span points.
    pub grain: f64,
}

/// Optional per-model parameter forwarded by the dispatcher.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum FitParam {
    /// Polynomial order (ignored by other models).
    Order(usize),
    /// Sigmoid span configuration (ignored by other models).
    Span(SpanConfig),
}

/// Fitted sigmoid evaluated over a dense grid.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SigmoidSpan {
    #[serde(deserialize_with = "nullable_f64_vec")]
    pub xspan: Vec<f64>,
    #[serde(deserialize_with = "nullable_f64_vec")]
    pub yspan: Vec<f64>,
}

/// Output of a single fit.
///
/// Non-finite coefficients are kept as-is; JSON export writes them as `null`
/// and reading maps `null` back to `NaN`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FitResult {
    /// Coefficients in the model's fixed order.
    #[serde(deserialize_with = "nullable_f64_vec")]
    pub equation: Vec<f64>,
    /// `(x, ŷ)` for every input sample, in input order.
    #[serde(deserialize_with = "nullable_points")]
    pub points: Vec<(f64, f64)>,
    /// Display equation with rounded coefficients.
    pub string: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub span: Option<SigmoidSpan>,
}

/// A run's configuration as understood by the pipeline.
///
/// This is derived from CLI flags (plus defaults and environment).
#[derive(Debug, Clone)]
pub struct FitConfig {
    pub csv_path: PathBuf,
    pub model: ModelKind,
    pub param: Option<FitParam>,

    pub plot: bool,
    pub plot_width: usize,
    pub plot_height: usize,

    pub export_points: Option<PathBuf>,
    pub export_result: Option<PathBuf>,

    /// Directory for the debug bundle, when enabled.
    pub debug_dir: Option<PathBuf>,
}

/// A saved fit (JSON).
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ResultFile {
    pub tool: String,
    pub generated_at: DateTime<Utc>,
    pub model: ModelKind,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub param: Option<FitParam>,
    pub samples: Vec<Sample>,
    pub result: FitResult,
}

fn nullable_f64_vec<'de, D>(deserializer: D) -> Result<Vec<f64>, D::Error>
where
    D: Deserializer<'de>,
{
    let raw: Vec<Option<f64>> = Vec::deserialize(deserializer)?;
    Ok(raw.into_iter().map(|v| v.unwrap_or(f64::NAN)).collect())
}

fn nullable_points<'de, D>(deserializer: D) -> Result<Vec<(f64, f64)>, D::Error>
where
    D: Deserializer<'de>,
{
    let raw: Vec<(Option<f64>, Option<f64>)> = Vec::deserialize(deserializer)?;
    Ok(raw
        .into_iter()
        .map(|(x, y)| (x.unwrap_or(f64::NAN), y.unwrap_or(f64::NAN)))
        .collect())
}
