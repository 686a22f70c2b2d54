//! Step function carrying the last observed value forward.

use crate::domain::{FitResult, ModelKind, Sample};
use crate::report::equation_string;

/// Whether a `y` counts as observed: present, non-zero, and not `NaN`.
///
/// Zero is treated as missing, matching the loose truthiness of the
/// historical implementation.
fn is_observed(y: Option<f64>) -> bool {
    matches!(y, Some(v) if v != 0.0 && !v.is_nan())
}

/// Carry the last observed `y` forward over missing samples.
///
/// Positions before the first observation hold `NaN`. Equation: `[last]`.
/// The display string is the last value, or `null` when nothing was observed.
pub fn last_value(samples: &[Sample]) -> FitResult {
    let mut last: Option<f64> = None;
    let mut points = Vec::with_capacity(samples.len());

    for s in samples {
        if is_observed(s.y) {
            last = s.y;
        }
        points.push((s.x, last.unwrap_or(f64::NAN)));
    }

    let equation = vec![last.unwrap_or(f64::NAN)];
    let string = match last {
        Some(_) => equation_string(ModelKind::LastValue, &equation),
        None => "null".to_string(),
    };

    FitResult {
        equation,
        points,
        string,
        span: None,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn carries_forward_over_gaps() {
        let data = vec![
            Sample::new(1.0, 5.0),
            Sample::missing(2.0),
            Sample::new(3.0, 7.0),
            Sample::missing(4.0),
        ];
        let fit = last_value(&data);
        let ys: Vec<f64> = fit.points.iter().map(|p| p.1).collect();
        assert_eq!(ys, vec![5.0, 5.0, 7.0, 7.0]);
        assert_eq!(fit.equation, vec![7.0]);
        assert_eq!(fit.string, "7");
    }

    #[test]
    fn zero_is_treated_as_missing() {
        let data = vec![Sample::new(1.0, 2.5), Sample::new(2.0, 0.0), Sample::new(3.0, f64::NAN)];
        let fit = last_value(&data);
        let ys: Vec<f64> = fit.points.iter().map(|p| p.1).collect();
        assert_eq!(ys, vec![2.5, 2.5, 2.5]);
        assert_eq!(fit.string, "2.5");
    }

    #[test]
    fn leading_gap_uses_sentinel() {
        let data = vec![Sample::missing(1.0), Sample::new(2.0, -3.0)];
        let fit = last_value(&data);
        assert!(fit.points[0].1.is_nan());
        assert_eq!(fit.points[1], (2.0, -3.0));
    }

    #[test]
    fn nothing_observed() {
        let fit = last_value(&[Sample::missing(1.0), Sample::new(2.0, 0.0)]);
        assert!(fit.equation[0].is_nan());
        assert_eq!(fit.string, "null");
        assert_eq!(fit.points.len(), 2);
    }
}
