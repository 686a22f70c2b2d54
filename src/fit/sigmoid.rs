//! Four-parameter sigmoid fitted by exhaustive grid search.
//!
//! `ymin`/`ymax` are pinned to the observed range of `y`; only `b` and `xc`
//! are searched. A missing `y` takes part as `0`, both in the range and in the
//! residuals.
//!
//! Each `b` row of the grid is scanned on a rayon worker without allocating.
//! Rows are reduced by lowest residual sum of squares, ties going to the
//! earlier grid position, which selects the same pair as a sequential scan
//! that only accepts strictly smaller sums.

use rayon::prelude::*;

use crate::domain::{FitResult, ModelKind, Sample, SigmoidSpan, SpanConfig};
use crate::error::AppError;
use crate::fit::sigmoid_grid::{b_axis, xc_axis};
use crate::math::linspace;
use crate::models::sigmoid as sigmoid_at;
use crate::report::equation_string;

/// Residual sum a candidate must beat to be accepted at all.
pub const SSR_CEILING: f64 = 99_999_999.0;

/// Largest span a caller may request.
pub const MAX_SPAN_POINTS: usize = 10_000_000;

/// Outcome of the `(b, xc)` grid search.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SigmoidSearch {
    pub b: f64,
    pub xc: f64,
    /// Residual sum of squares of the chosen pair ([`SSR_CEILING`] when none was accepted).
    pub ssr: f64,
    /// Number of `(b, xc)` pairs evaluated.
    pub evaluated: usize,
}

#[derive(Debug, Clone, Copy)]
struct Candidate {
    idx: usize,
    b: f64,
    xc: f64,
    ssr: f64,
}

/// Observed bounds used by the sigmoid: `(x_min, x_max, y_min, y_max)`.
///
/// A `NaN` anywhere poisons the matching bounds, which then leave the
/// search without an accepted pair.
pub fn observed_bounds(samples: &[Sample]) -> (f64, f64, f64, f64) {
    samples.iter().fold(
        (f64::INFINITY, f64::NEG_INFINITY, f64::INFINITY, f64::NEG_INFINITY),
        |(x_lo, x_hi, y_lo, y_hi), s| {
            let y = s.y.unwrap_or(0.0);
            (
                nan_min(x_lo, s.x),
                nan_max(x_hi, s.x),
                nan_min(y_lo, y),
                nan_max(y_hi, y),
            )
        },
    )
}

fn nan_min(a: f64, b: f64) -> f64 {
    if a.is_nan() || b.is_nan() { f64::NAN } else { a.min(b) }
}

fn nan_max(a: f64, b: f64) -> f64 {
    if a.is_nan() || b.is_nan() { f64::NAN } else { a.max(b) }
}

/// Search `b` and `xc` for the lowest residual sum of squares.
///
/// Falls back to `b = 0, xc = 0` when no pair beats [`SSR_CEILING`].
pub fn grid_search(xs: &[f64], ys: &[f64], y_min: f64, y_max: f64, x_min: f64, x_max: f64) -> SigmoidSearch {
    let bs = b_axis();
    let xcs = xc_axis(x_min, x_max);
    let row_len = xcs.len();

    let best = bs
        .par_iter()
        .enumerate()
        .filter_map(|(bi, &b)| {
            let mut row_best: Option<(usize, f64)> = None;
            for (ci, &xc) in xcs.iter().enumerate() {
                let mut ssr = 0.0;
                for (&x, &y) in xs.iter().zip(ys) {
                    let r = sigmoid_at(x, y_min, y_max, b, xc) - y;
                    ssr += r * r;
                }
                let bar = row_best.map_or(SSR_CEILING, |(_, s)| s);
                if ssr < bar {
                    row_best = Some((ci, ssr));
                }
            }
            row_best.map(|(ci, ssr)| Candidate {
                idx: bi * row_len + ci,
                b,
                xc: xcs[ci],
                ssr,
            })
        })
        .reduce_with(|best, c| {
            if c.ssr < best.ssr || (c.ssr == best.ssr && c.idx < best.idx) {
                c
            } else {
                best
            }
        });

    let evaluated = bs.len() * row_len;
    match best {
        Some(c) => SigmoidSearch {
            b: c.b,
            xc: c.xc,
            ssr: c.ssr,
            evaluated,
        },
        None => SigmoidSearch {
            b: 0.0,
            xc: 0.0,
            ssr: SSR_CEILING,
            evaluated,
        },
    }
}

/// Resample a fitted sigmoid over `[x_min − offset, x_max + offset]`.
///
/// The point count is `(x_max − x_min + 2·offset) / grain`, truncated.
pub fn sigmoid_span(
    equation: &[f64],
    x_min: f64,
    x_max: f64,
    config: SpanConfig,
) -> Result<SigmoidSpan, AppError> {
    let SpanConfig { offset, grain } = config;
    if !(grain.is_finite() && grain > 0.0) {
        return Err(AppError::new(2, format!("Invalid span grain: {grain} (must be finite and > 0).")));
    }
    if !offset.is_finite() {
        return Err(AppError::new(2, format!("Invalid span offset: {offset} (must be finite).")));
    }

    let count = (x_max - x_min + 2.0 * offset) / grain;
    if !(count.is_finite() && count >= 0.0) {
        return Err(AppError::new(
            2,
            format!("Invalid span: point count {count} from x=[{x_min}, {x_max}], offset={offset}, grain={grain}."),
        ));
    }
    if count >= (MAX_SPAN_POINTS + 1) as f64 {
        return Err(AppError::new(
            2,
            format!("Span too dense: {count} points requested (limit {MAX_SPAN_POINTS}); increase the grain."),
        ));
    }

    let xspan = linspace(x_min - offset, x_max + offset, count as usize);
    let (y_min, y_max, b, xc) = (equation[0], equation[1], equation[2], equation[3]);
    let yspan = xspan.iter().map(|&x| sigmoid_at(x, y_min, y_max, b, xc)).collect();

    Ok(SigmoidSpan { xspan, yspan })
}

/// Fit the sigmoid; also resample it when a span configuration is given.
///
/// Equation: `[ymin, ymax, b, xc]`.
pub fn sigmoid(samples: &[Sample], span: Option<SpanConfig>) -> Result<FitResult, AppError> {
    let fit = search(samples);
    let equation = vec![fit.y_min, fit.y_max, fit.search.b, fit.search.xc];

    let points = samples
        .iter()
        .map(|s| (s.x, sigmoid_at(s.x, fit.y_min, fit.y_max, fit.search.b, fit.search.xc)))
        .collect();
    let span = span
        .map(|config| sigmoid_span(&equation, fit.x_min, fit.x_max, config))
        .transpose()?;
    let string = equation_string(ModelKind::Sigmoid, &equation);

    Ok(FitResult {
        equation,
        points,
        string,
        span,
    })
}

/// Bounds plus search outcome; exposed for diagnostics.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SigmoidFit {
    pub x_min: f64,
    pub x_max: f64,
    pub y_min: f64,
    pub y_max: f64,
    pub search: SigmoidSearch,
}

/// Run the grid search on samples.
pub fn search(samples: &[Sample]) -> SigmoidFit {
    let (x_min, x_max, y_min, y_max) = observed_bounds(samples);
    let xs: Vec<f64> = samples.iter().map(|s| s.x).collect();
    let ys: Vec<f64> = samples.iter().map(|s| s.y.unwrap_or(0.0)).collect();

    let search = grid_search(&xs, &ys, y_min, y_max, x_min, x_max);
    SigmoidFit {
        x_min,
        x_max,
        y_min,
        y_max,
        search,
    }
}

impl SigmoidFit {
    /// Rebuild the search outcome from a finished fit without searching again.
    ///
    /// `b = 0` only comes from the fallback, since the `b` axis excludes zero;
    /// its residual is reported as [`SSR_CEILING`].
    pub fn from_result(samples: &[Sample], result: &FitResult) -> Self {
        let (x_min, x_max, _, _) = observed_bounds(samples);
        let (y_min, y_max, b, xc) = match result.equation[..] {
            [y_min, y_max, b, xc] => (y_min, y_max, b, xc),
            _ => (f64::NAN, f64::NAN, 0.0, 0.0),
        };
        let ssr = if b == 0.0 {
            SSR_CEILING
        } else {
            samples
                .iter()
                .map(|s| {
                    let r = sigmoid_at(s.x, y_min, y_max, b, xc) - s.y.unwrap_or(0.0);
                    r * r
                })
                .sum()
        };
        SigmoidFit {
            x_min,
            x_max,
            y_min,
            y_max,
            search: SigmoidSearch {
                b,
                xc,
                ssr,
                evaluated: b_axis().len() * xc_axis(x_min, x_max).len(),
            },
        }
    }
}
