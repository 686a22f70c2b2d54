//! Polynomial least squares via the normal equations.

use nalgebra::DMatrix;

use crate::domain::{FitResult, ModelKind, Sample};
use crate::fit::closed_form::finish;
use crate::math::gaussian_elimination;

/// Order used when the caller does not pass one.
pub const DEFAULT_ORDER: usize = 2;

/// Build the augmented normal-equations matrix for `order`.
///
/// Row `i` holds `Σ x^(i+j)` for `j = 0..=order` followed by `Σ x^i·y`.
/// Samples with a missing `y` are skipped in every sum.
pub fn normal_equations(samples: &[Sample], order: usize) -> DMatrix<f64> {
    let k = order + 1;
    let mut a = DMatrix::<f64>::zeros(k, k + 1);

    for s in samples {
        let Some(y) = s.y else { continue };
        for i in 0..k {
            a[(i, k)] += s.x.powi(i as i32) * y;
            for j in 0..k {
                a[(i, j)] += s.x.powi((i + j) as i32);
            }
        }
    }

    a
}

/// `y = c0 + c1·x + … + c_order·x^order`. Equation: coefficients lowest degree first.
///
/// Too few distinct `x` values for the order make the system singular; the
/// coefficients then come back non-finite.
pub fn polynomial(samples: &[Sample], order: usize) -> FitResult {
    let a = normal_equations(samples, order);
    let equation = gaussian_elimination(a, order + 1);
    finish(ModelKind::Polynomial, samples, equation)
}
