//! Model dispatch.
//!
//! Maps a `ModelKind` to its fitter and forwards the optional per-model
//! parameter. Parameters that do not apply to the selected model are ignored.

use crate::domain::{FitParam, FitResult, ModelKind, Sample};
use crate::error::AppError;
use crate::fit::closed_form::{exponential, linear, linear_through_origin, logarithmic, power};
use crate::fit::last_value::last_value;
use crate::fit::polynomial::{DEFAULT_ORDER, polynomial};
use crate::fit::sigmoid::sigmoid;

/// Fit `data` with the given model.
///
/// Numeric failures surface as non-finite coefficients; the only error is an
/// invalid sigmoid span configuration.
pub fn fit(kind: ModelKind, data: &[Sample], param: Option<FitParam>) -> Result<FitResult, AppError> {
    let result = match kind {
        ModelKind::Linear => linear(data),
        ModelKind::LinearThroughOrigin => linear_through_origin(data),
        ModelKind::Exponential => exponential(data),
        ModelKind::Logarithmic => logarithmic(data),
        ModelKind::Power => power(data),
        ModelKind::Polynomial => {
            let order = match param {
                Some(FitParam::Order(order)) => order,
                _ => DEFAULT_ORDER,
            };
            polynomial(data, order)
        }
        ModelKind::Sigmoid => {
            let span = match param {
                Some(FitParam::Span(config)) => Some(config),
                _ => None,
            };
            sigmoid(data, span)?
        }
        ModelKind::LastValue => last_value(data),
    };
    Ok(result)
}

/// Fit by model token (e.g. `"linearThroughOrigin"`).
///
/// Unknown tokens are rejected before any fitting happens.
pub fn fit_named(name: &str, data: &[Sample], param: Option<FitParam>) -> Result<FitResult, AppError> {
    let kind: ModelKind = name.parse()?;
    fit(kind, data, param)
}
