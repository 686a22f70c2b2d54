//! Model evaluation for every curve family.
//!
//! The fitters use these to build `points`, the sigmoid span, plots, and
//! exports. Coefficients are read in the same order the fitters emit them.

use crate::domain::ModelKind;

/// Evaluate the sigmoid `(ymin + ymax·e^((x−xc)/b)) / (1 + e^((x−xc)/b))`.
#[inline]
pub fn sigmoid(x: f64, y_min: f64, y_max: f64, b: f64, xc: f64) -> f64 {
    let sub = ((x - xc) / b).exp();
    (y_min + y_max * sub) / (1.0 + sub)
}

/// Evaluate a polynomial given coefficients lowest degree first.
pub fn polynomial(x: f64, coefficients: &[f64]) -> f64 {
    coefficients
        .iter()
        .enumerate()
        .fold(0.0, |acc, (w, &c)| acc + c * x.powi(w as i32))
}

/// Predict `ŷ(x)` for a fitted equation.
///
/// `LastValue` is order dependent; evaluated on its own it continues the
/// terminal carried value as a constant.
///
/// # Panics
/// Panics if `equation` is shorter than `kind.equation_len()`.
pub fn predict(kind: ModelKind, x: f64, equation: &[f64]) -> f64 {
    match kind {
        ModelKind::Linear => x * equation[0] + equation[1],
        ModelKind::LinearThroughOrigin => x * equation[0],
        ModelKind::Exponential => equation[0] * (equation[1] * x).exp(),
        ModelKind::Logarithmic => equation[0] + equation[1] * x.ln(),
        ModelKind::Power => equation[0] * x.powf(equation[1]),
        ModelKind::Polynomial => polynomial(x, equation),
        ModelKind::Sigmoid => sigmoid(x, equation[0], equation[1], equation[2], equation[3]),
        ModelKind::LastValue => equation[0],
    }
}
