//! ASCII plotting for terminal output.
//!
//! This is intentionally "dumb" (fixed-size grid), optimized for:
//! - quick visual sanity checks in a terminal
//! - deterministic output (helpful for golden tests)
//!
//! Plot elements:
//! - observed samples: `o`
//! - fitted curve: `-` line

use crate::domain::{FitResult, ModelKind, Sample};
use crate::models::predict;

/// Render observed samples over the fitted curve.
///
/// The curve is sampled on a uniform grid across the observed x-range. A
/// sigmoid span, when present, is drawn instead. `LastValue`, and any
/// equation of the wrong length for `kind`, draws the stored points.
pub fn render_ascii_plot(
    samples: &[Sample],
    kind: ModelKind,
    fit: &FitResult,
    width: usize,
    height: usize,
) -> String {
    let observed: Vec<(f64, f64)> = samples.iter().filter_map(|s| s.y.map(|y| (s.x, y))).collect();
    let curve = fitted_curve(samples, kind, fit, width.max(2));
    render_plot(&observed, &curve, width, height)
}

fn fitted_curve(samples: &[Sample], kind: ModelKind, fit: &FitResult, n: usize) -> Vec<(f64, f64)> {
    if let Some(span) = &fit.span {
        return span.xspan.iter().copied().zip(span.yspan.iter().copied()).collect();
    }
    if kind == ModelKind::LastValue || kind.check_equation(&fit.equation).is_err() {
        let mut points = fit.points.clone();
        points.sort_by(|a, b| a.0.partial_cmp(&b.0).unwrap_or(std::cmp::Ordering::Equal));
        return points;
    }

    let Some((x_min, x_max)) = range(samples.iter().map(|s| s.x)) else {
        return fit.points.clone();
    };
    let mut out = Vec::with_capacity(n);
    for i in 0..n {
        let u = i as f64 / (n as f64 - 1.0);
        let x = x_min + u * (x_max - x_min);
        out.push((x, predict(kind, x, &fit.equation)));
    }
    out
}

fn render_plot(observed: &[(f64, f64)], curve: &[(f64, f64)], width: usize, height: usize) -> String {
    let xs = observed.iter().chain(curve).map(|p| p.0);
    let (x_lo, x_hi) = range(xs).unwrap_or((0.0, 1.0));
    let ys = observed.iter().chain(curve).map(|p| p.1);
    let (y_lo, y_hi) = range(ys).unwrap_or((0.0, 1.0));
    let pad = ((y_hi - y_lo) * 0.05).max(1e-12);

    let mut canvas = Canvas::new(width.max(10), height.max(5), (x_lo, x_hi), (y_lo - pad, y_hi + pad));

    // Samples are stamped last so they sit on top of the curve.
    let mut prev = None;
    for &(x, y) in curve {
        let cell = canvas.cell(x, y);
        if let (Some(from), Some(to)) = (prev, cell) {
            canvas.line(from, to, '-');
        } else if let Some(to) = cell {
            canvas.put(to, '-');
        }
        prev = cell;
    }
    for &(x, y) in observed {
        if let Some(cell) = canvas.cell(x, y) {
            canvas.stamp(cell, 'o');
        }
    }

    canvas.render()
}

/// Finite `(min, max)` with `max > min`.
fn range(values: impl Iterator<Item = f64>) -> Option<(f64, f64)> {
    let (lo, hi) = values
        .filter(|v| v.is_finite())
        .fold((f64::INFINITY, f64::NEG_INFINITY), |(lo, hi), v| (lo.min(v), hi.max(v)));
    (lo.is_finite() && hi.is_finite() && hi > lo).then_some((lo, hi))
}

/// Character grid with data-space axes. Row 0 is the top line.
struct Canvas {
    cells: Vec<Vec<char>>,
    x_axis: (f64, f64),
    y_axis: (f64, f64),
}

impl Canvas {
    fn new(width: usize, height: usize, x_axis: (f64, f64), y_axis: (f64, f64)) -> Self {
        Self {
            cells: vec![vec![' '; width]; height],
            x_axis,
            y_axis,
        }
    }

    fn width(&self) -> usize {
        self.cells[0].len()
    }

    fn height(&self) -> usize {
        self.cells.len()
    }

    /// Grid cell `(col, row)` for a data point; `None` for non-finite input.
    fn cell(&self, x: f64, y: f64) -> Option<(usize, usize)> {
        if !(x.is_finite() && y.is_finite()) {
            return None;
        }
        let col = scale(x, self.x_axis, self.width());
        let row = self.height() - 1 - scale(y, self.y_axis, self.height());
        Some((col, row))
    }

    /// Write `ch` only into an empty cell.
    fn put(&mut self, (col, row): (usize, usize), ch: char) {
        let cell = &mut self.cells[row][col];
        if *cell == ' ' {
            *cell = ch;
        }
    }

    fn stamp(&mut self, (col, row): (usize, usize), ch: char) {
        self.cells[row][col] = ch;
    }

    /// Bresenham between two cells, both ends included.
    fn line(&mut self, from: (usize, usize), to: (usize, usize), ch: char) {
        let (mut col, mut row) = (from.0 as i64, from.1 as i64);
        let (end_col, end_row) = (to.0 as i64, to.1 as i64);
        let step_col = if col < end_col { 1 } else { -1 };
        let step_row = if row < end_row { 1 } else { -1 };
        let d_col = (end_col - col).abs();
        let d_row = -(end_row - row).abs();
        let mut err = d_col + d_row;

        loop {
            self.put((col as usize, row as usize), ch);
            if col == end_col && row == end_row {
                return;
            }
            let twice = 2 * err;
            if twice >= d_row {
                err += d_row;
                col += step_col;
            }
            if twice <= d_col {
                err += d_col;
                row += step_row;
            }
        }
    }

    fn render(self) -> String {
        let (x_lo, x_hi) = self.x_axis;
        let (y_lo, y_hi) = self.y_axis;
        let mut out = format!("Plot: x=[{x_lo:.3}, {x_hi:.3}] | y=[{y_lo:.2}, {y_hi:.2}]\n");
        for row in self.cells {
            out.extend(row);
            out.push('\n');
        }
        out
    }
}

/// Map `v` from `axis` onto `0 ..= cells - 1`, clamped.
fn scale(v: f64, (lo, hi): (f64, f64), cells: usize) -> usize {
    let u = ((v - lo) / (hi - lo)).clamp(0.0, 1.0);
    (u * (cells as f64 - 1.0)).round() as usize
}
