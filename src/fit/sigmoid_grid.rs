//! Parameter grids for the sigmoid search.
//!
//! The sigmoid is fitted with a deterministic grid search over the steepness
//! `b` and the midpoint `xc`. Both axes step by [`GRID_STEP`]; the spacing
//! bounds the achievable precision and no refinement is attempted.

/// Spacing of both search axes.
pub const GRID_STEP: f64 = 10.0;

/// Inclusive bound of the `b` axis (`-B_LIMIT ..= B_LIMIT`).
pub const B_LIMIT: i32 = 1000;

/// `b` candidates: `-1000, -990, …, -10, 10, …, 1000`. Zero is excluded.
pub fn b_axis() -> Vec<f64> {
    (-B_LIMIT..=B_LIMIT)
        .step_by(GRID_STEP as usize)
        .filter(|&b| b != 0)
        .map(f64::from)
        .collect()
}

/// Upper bound on the length of the `xc` axis.
pub const MAX_XC_CANDIDATES: usize = 1_000_000;

/// `xc` candidates: `x_min, x_min + 10, …` while strictly below `x_max`.
///
/// Values are produced by repeated addition, matching a running loop counter.
/// A non-finite bound yields an empty axis. The axis stops early when adding
/// the step no longer changes `xc` (magnitudes around `3e17` and up) or after
/// [`MAX_XC_CANDIDATES`] values.
pub fn xc_axis(x_min: f64, x_max: f64) -> Vec<f64> {
    if !(x_min.is_finite() && x_max.is_finite()) {
        return Vec::new();
    }

    let mut out = Vec::new();
    let mut xc = x_min;
    while xc < x_max && out.len() < MAX_XC_CANDIDATES {
        out.push(xc);
        let next = xc + GRID_STEP;
        if next <= xc {
            break;
        }
        xc = next;
    }
    out
}
