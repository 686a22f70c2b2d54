//! Closed-form least-squares fits.
//!
//! Each fitter accumulates a few running sums over samples with a present `y`
//! and derives its coefficients directly.
//!
//! `n` is the total number of samples, missing ones included, so fits on data
//! with gaps are biased towards zero. Filter missing samples first when a
//! textbook estimate is needed.
//!
//! Inputs outside a family's domain (`x ≤ 0` for logarithmic/power, `y ≤ 0`
//! for exponential/power) produce `NaN` coefficients rather than errors.

use crate::domain::{FitResult, ModelKind, Sample};
use crate::models::predict;
use crate::report::equation_string;

/// Samples with a present `y`, as `(x, y)`.
fn observed(samples: &[Sample]) -> impl Iterator<Item = (f64, f64)> + '_ {
    samples.iter().filter_map(|s| s.y.map(|y| (s.x, y)))
}

/// Package an equation: predicted point per sample plus display string.
pub(crate) fn finish(kind: ModelKind, samples: &[Sample], equation: Vec<f64>) -> FitResult {
    let points = samples
        .iter()
        .map(|s| (s.x, predict(kind, s.x, &equation)))
        .collect();
    let string = equation_string(kind, &equation);
    FitResult {
        equation,
        points,
        string,
        span: None,
    }
}

/// `y = m·x + b`. Equation: `[gradient, intercept]`.
pub fn linear(samples: &[Sample]) -> FitResult {
    let (mut sx, mut sy, mut sxx, mut sxy) = (0.0, 0.0, 0.0, 0.0);
    for (x, y) in observed(samples) {
        sx += x;
        sy += y;
        sxx += x * x;
        sxy += x * y;
    }

    let n = samples.len() as f64;
    let gradient = (n * sxy - sx * sy) / (n * sxx - sx * sx);
    let intercept = (sy / n) - (gradient * sx) / n;

    finish(ModelKind::Linear, samples, vec![gradient, intercept])
}

/// `y = m·x`. Equation: `[gradient]`.
pub fn linear_through_origin(samples: &[Sample]) -> FitResult {
    let (mut sxx, mut sxy) = (0.0, 0.0);
    for (x, y) in observed(samples) {
        sxx += x * x;
        sxy += x * y;
    }

    let gradient = sxy / sxx;
    finish(ModelKind::LinearThroughOrigin, samples, vec![gradient])
}

/// `y = A·e^(B·x)`, fitted on `ln y` with each point weighted by `y`.
/// Equation: `[A, B]`.
pub fn exponential(samples: &[Sample]) -> FitResult {
    let (mut sy, mut sxxy, mut sylny, mut sxylny, mut sxy) = (0.0, 0.0, 0.0, 0.0, 0.0);
    for (x, y) in observed(samples) {
        let ln_y = y.ln();
        sy += y;
        sxxy += x * x * y;
        sylny += y * ln_y;
        sxylny += x * y * ln_y;
        sxy += x * y;
    }

    let denominator = sy * sxxy - sxy * sxy;
    let a = ((sxxy * sylny - sxy * sxylny) / denominator).exp();
    let b = (sy * sxylny - sxy * sylny) / denominator;

    finish(ModelKind::Exponential, samples, vec![a, b])
}

/// `y = A + B·ln(x)`. Equation: `[A, B]`.
pub fn logarithmic(samples: &[Sample]) -> FitResult {
    let (mut slnx, mut sylnx, mut sy, mut slnx2) = (0.0, 0.0, 0.0, 0.0);
    for (x, y) in observed(samples) {
        let ln_x = x.ln();
        slnx += ln_x;
        sylnx += y * ln_x;
        sy += y;
        slnx2 += ln_x * ln_x;
    }

    let n = samples.len() as f64;
    let b = (n * sylnx - sy * slnx) / (n * slnx2 - slnx * slnx);
    let a = (sy - b * slnx) / n;

    finish(ModelKind::Logarithmic, samples, vec![a, b])
}

/// `y = A·x^B`, a linear regression of `ln y` on `ln x`. Equation: `[A, B]`.
pub fn power(samples: &[Sample]) -> FitResult {
    let (mut slnx, mut slnxlny, mut slny, mut slnx2) = (0.0, 0.0, 0.0, 0.0);
    for (x, y) in observed(samples) {
        let (ln_x, ln_y) = (x.ln(), y.ln());
        slnx += ln_x;
        slnxlny += ln_y * ln_x;
        slny += ln_y;
        slnx2 += ln_x * ln_x;
    }

    let n = samples.len() as f64;
    let b = (n * slnxlny - slny * slnx) / (n * slnx2 - slnx * slnx);
    let a = ((slny - b * slnx) / n).exp();

    finish(ModelKind::Power, samples, vec![a, b])
}

#[cfg(test)]
mod tests {
    use super::*;

    fn samples(pairs: &[(f64, f64)]) -> Vec<Sample> {
        pairs.iter().copied().map(Sample::from).collect()
    }

    #[test]
    fn linear_recovers_identity() {
        let fit = linear(&samples(&[(1.0, 1.0), (2.0, 2.0), (3.0, 3.0)]));
        assert!((fit.equation[0] - 1.0).abs() < 1e-12);
        assert!(fit.equation[1].abs() < 1e-12);
        assert_eq!(fit.string, "y = 1x + 0");
        assert_eq!(fit.points, vec![(1.0, 1.0), (2.0, 2.0), (3.0, 3.0)]);
    }

    #[test]
    fn linear_counts_missing_samples_in_n() {
        let complete = samples(&[(1.0, 1.0), (2.0, 3.0), (3.0, 2.0)]);
        let mut with_gap = complete.clone();
        with_gap.push(Sample::missing(4.0));

        // Sums over the three observed points, n = 3 vs n = 4.
        let plain = linear(&complete);
        assert!((plain.equation[0] - 0.5).abs() < 1e-12);

        let fit = linear(&with_gap);
        let (n, sx, sy, sxx, sxy) = (4.0, 6.0, 6.0, 14.0, 13.0);
        let gradient = (n * sxy - sx * sy) / (n * sxx - sx * sx);
        let intercept = sy / n - gradient * sx / n;
        assert!((fit.equation[0] - gradient).abs() < 1e-12);
        assert!((fit.equation[1] - intercept).abs() < 1e-12);
        assert!((fit.equation[0] - 0.8).abs() < 1e-12);
        assert_eq!(fit.points.len(), 4);
    }

    #[test]
    fn linear_through_origin_ignores_missing() {
        let mut data = samples(&[(1.0, 2.0), (2.0, 4.0), (3.0, 6.0)]);
        data.insert(1, Sample::missing(10.0));
        let fit = linear_through_origin(&data);
        assert!((fit.equation[0] - 2.0).abs() < 1e-12);
        assert_eq!(fit.string, "y = 2x");
        assert_eq!(fit.points[1], (10.0, 20.0));
    }

    #[test]
    fn exponential_recovers_exact_curve() {
        let data: Vec<Sample> = (0..6)
            .map(|i| {
                let x = i as f64 * 0.5;
                Sample::new(x, 3.0 * (0.4 * x).exp())
            })
            .collect();
        let fit = exponential(&data);
        assert!((fit.equation[0] - 3.0).abs() < 1e-9);
        assert!((fit.equation[1] - 0.4).abs() < 1e-9);
        assert_eq!(fit.string, "y = 3e^(0.4x)");
    }

    #[test]
    fn exponential_non_positive_y_is_nan() {
        let fit = exponential(&samples(&[(1.0, 1.0), (2.0, -1.0), (3.0, 4.0)]));
        assert!(fit.equation.iter().all(|v| v.is_nan()));
    }

    #[test]
    fn logarithmic_recovers_exact_curve() {
        let data: Vec<Sample> = [1.0, 2.0, 4.0, 8.0]
            .iter()
            .map(|&x: &f64| Sample::new(x, 1.5 + 2.0 * x.ln()))
            .collect();
        let fit = logarithmic(&data);
        assert!((fit.equation[0] - 1.5).abs() < 1e-9);
        assert!((fit.equation[1] - 2.0).abs() < 1e-9);
        assert_eq!(fit.string, "y = 1.5 + 2 ln(x)");
    }

    #[test]
    fn power_recovers_square() {
        let fit = power(&samples(&[(1.0, 2.0), (2.0, 8.0), (4.0, 32.0)]));
        assert!((fit.equation[0] - 2.0).abs() < 1e-9);
        assert!((fit.equation[1] - 2.0).abs() < 1e-9);
        assert!((fit.points[2].1 - 32.0).abs() < 1e-9);
    }

    #[test]
    fn logarithmic_counts_missing_samples_in_n() {
        let complete = samples(&[(1.0, 1.0), (2.0, 3.0), (4.0, 2.0)]);
        let mut with_gap = complete.clone();
        with_gap.push(Sample::missing(8.0));

        let plain = logarithmic(&complete);
        assert!((plain.equation[0] - 1.5).abs() < 1e-12);

        // Same sums over the observed points, divided with n = 4.
        let fit = logarithmic(&with_gap);
        assert!((fit.equation[0] - 9.0 / 11.0).abs() < 1e-12);
        assert!((fit.equation[1] - 1.311_540_946_262_694).abs() < 1e-12);
        assert_eq!(fit.points.len(), 4);
    }

    #[test]
    fn power_counts_missing_samples_in_n() {
        let complete = samples(&[(1.0, 1.0), (2.0, 3.0), (4.0, 2.0)]);
        let mut with_gap = complete.clone();
        with_gap.insert(0, Sample::missing(8.0));

        let plain = power(&complete);
        assert!((plain.equation[1] - 0.5).abs() < 1e-12);

        let fit = power(&with_gap);
        assert!((fit.equation[0] - 1.146_523_486_845_706).abs() < 1e-12);
        assert!((fit.equation[1] - 0.598_632_954_611_014_2).abs() < 1e-12);
        assert_eq!(fit.points[0].0, 8.0);
    }

    #[test]
    fn power_with_zero_x_is_non_finite() {
        let fit = power(&samples(&[(0.0, 1.0), (1.0, 2.0)]));
        assert!(fit.equation.iter().any(|v| !v.is_finite()));
    }
}
