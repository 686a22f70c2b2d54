//! Equation strings and formatted terminal output.
//!
//! Equation strings follow the historical display rules: coefficients are
//! rounded half-up to 2 decimals (polynomial terms of degree `i ≥ 2` keep `i`
//! decimals) and numbers are printed the way a JavaScript runtime prints them,
//! so strings stay comparable with previously exported results.

use crate::domain::{FitConfig, FitResult, ModelKind, Sample};
use crate::io::ingest::IngestedData;

/// Round half-up to `places` decimals (`floor(v·10^p + 0.5) / 10^p`).
pub fn round_half_up(v: f64, places: u32) -> f64 {
    let scale = 10f64.powi(places as i32);
    (v * scale + 0.5).floor() / scale
}

/// Print a number as text the way a JavaScript `Number` stringifies.
///
/// - `NaN`, `Infinity`, `-Infinity` for non-finite values
/// - `0` for both signed zeros
/// - exponent notation (`1e-7`, `1e+21`) outside `[1e-6, 1e21)`
pub fn fmt_number(v: f64) -> String {
    if v.is_nan() {
        return "NaN".to_string();
    }
    if v.is_infinite() {
        return if v > 0.0 { "Infinity" } else { "-Infinity" }.to_string();
    }
    if v == 0.0 {
        return "0".to_string();
    }

    let abs = v.abs();
    if (1e-6..1e21).contains(&abs) {
        return format!("{v}");
    }

    let exp = format!("{v:e}");
    match exp.split_once('e') {
        Some((mantissa, power)) if !power.starts_with('-') => format!("{mantissa}e+{power}"),
        _ => exp,
    }
}

fn r2(v: f64) -> String {
    fmt_number(round_half_up(v, 2))
}

/// Render the display string for a fitted equation.
///
/// `LastValue` is rendered from its terminal carried value; the fitter passes
/// `NaN` when nothing was carried and overrides the text itself.
pub fn equation_string(kind: ModelKind, equation: &[f64]) -> String {
    match kind {
        ModelKind::Linear => format!("y = {}x + {}", r2(equation[0]), r2(equation[1])),
        ModelKind::LinearThroughOrigin => format!("y = {}x", r2(equation[0])),
        ModelKind::Exponential => format!("y = {}e^({}x)", r2(equation[0]), r2(equation[1])),
        ModelKind::Logarithmic => format!("y = {} + {} ln(x)", r2(equation[0]), r2(equation[1])),
        ModelKind::Power => format!("y = {}x^{}", r2(equation[0]), r2(equation[1])),
        ModelKind::Polynomial => polynomial_string(equation),
        ModelKind::Sigmoid => {
            let (y_min, y_max) = (fmt_number(equation[0]), fmt_number(equation[1]));
            let (b, xc) = (fmt_number(equation[2]), fmt_number(equation[3]));
            format!("y = ({y_min} + {y_max}*e^((x-{xc})/{b}))/(1+e^((x-{xc})/{b}))")
        }
        ModelKind::LastValue => fmt_number(equation[0]),
    }
}

fn polynomial_string(coefficients: &[f64]) -> String {
    let mut out = String::from("y = ");
    for (i, &c) in coefficients.iter().enumerate().rev() {
        match i {
            0 => out.push_str(&r2(c)),
            1 => out.push_str(&format!("{}x + ", r2(c))),
            _ => out.push_str(&format!(
                "{}x^{i} + ",
                fmt_number(round_half_up(c, i as u32))
            )),
        }
    }
    out
}

/// Format the full run summary (dataset stats + fitted model).
pub fn format_run_summary(ingest: &IngestedData, result: &FitResult, config: &FitConfig) -> String {
    let mut out = String::new();

    out.push_str("=== regress - curve fit ===\n");
    out.push_str(&format!(
        "Model: {} ({})\n",
        config.model.display_name(),
        config.model.token()
    ));
    out.push_str(&format!("Input: {}\n", config.csv_path.display()));
    out.push_str(&format!(
        "Samples: n={} | missing y={} | x=[{}, {}] | y=[{}, {}]\n",
        ingest.stats.n_samples,
        ingest.stats.n_missing,
        fmt_number(ingest.stats.x_min),
        fmt_number(ingest.stats.x_max),
        fmt_number(ingest.stats.y_min),
        fmt_number(ingest.stats.y_max),
    ));
    if !ingest.row_errors.is_empty() {
        out.push_str(&format!(
            "Rows: read={} used={} skipped={}\n",
            ingest.rows_read,
            ingest.rows_used,
            ingest.row_errors.len()
        ));
    }

    out.push_str("\nFitted model:\n");
    out.push_str(&format!("- {}\n", result.string));
    out.push_str(&format!("- equation: {}\n", fmt_vec(&result.equation)));
    if let Some(span) = &result.span {
        out.push_str(&format!("- span: {} points\n", span.xspan.len()));
    }
    out.push('\n');

    out
}

/// Format the observed vs fitted table.
pub fn format_points(samples: &[Sample], result: &FitResult) -> String {
    let mut out = String::new();
    out.push_str(format!("{:>14} {:>14} {:>14} {:>14}", "x", "y_obs", "y_fit", "residual").trim_end());
    out.push('\n');
    out.push_str(format!("{:-<14} {:-<14} {:-<14} {:-<14}", "", "", "", "").trim_end());
    out.push('\n');

    for (sample, &(x, y_fit)) in samples.iter().zip(result.points.iter()) {
        let (y_obs, residual) = match sample.y {
            Some(y) => (fmt_cell(y), fmt_cell(y - y_fit)),
            None => ("-".to_string(), "-".to_string()),
        };
        out.push_str(
            format!("{:>14} {:>14} {:>14} {:>14}", fmt_cell(x), y_obs, fmt_cell(y_fit), residual).trim_end(),
        );
        out.push('\n');
    }

    out
}

fn fmt_cell(v: f64) -> String {
    if v.is_finite() {
        format!("{v:.4}")
    } else {
        fmt_number(v)
    }
}

fn fmt_vec(v: &[f64]) -> String {
    let parts: Vec<String> = v.iter().map(|&x| fmt_number(x)).collect();
    format!("[{}]", parts.join(", "))
}

/// List the model tokens accepted by `fit --model`.
pub fn format_model_list() -> String {
    let mut out = String::new();
    for kind in ModelKind::ALL {
        out.push_str(&format!("{:<22} {}\n", kind.token(), kind.display_name()));
    }
    out
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn round_half_up_matches_historical_rounding() {
        assert_eq!(round_half_up(1.005, 2), 1.0);
        assert_eq!(round_half_up(2.345, 1), 2.3);
        assert_eq!(round_half_up(-2.5, 0), -2.0);
        assert_eq!(round_half_up(1.2346, 3), 1.235);
    }

    #[test]
    fn fmt_number_follows_js_text() {
        assert_eq!(fmt_number(1.0), "1");
        assert_eq!(fmt_number(-0.0), "0");
        assert_eq!(fmt_number(0.25), "0.25");
        assert_eq!(fmt_number(f64::NAN), "NaN");
        assert_eq!(fmt_number(f64::NEG_INFINITY), "-Infinity");
        assert_eq!(fmt_number(1e-7), "1e-7");
        assert_eq!(fmt_number(2e21), "2e+21");
    }

    #[test]
    fn linear_and_power_strings() {
        assert_eq!(equation_string(ModelKind::Linear, &[2.0, -1.0]), "y = 2x + -1");
        assert_eq!(equation_string(ModelKind::Power, &[2.004, 1.996]), "y = 2x^2");
        assert_eq!(equation_string(ModelKind::LinearThroughOrigin, &[0.333333]), "y = 0.33x");
    }

    #[test]
    fn log_and_exp_strings() {
        assert_eq!(equation_string(ModelKind::Logarithmic, &[1.5, 0.25]), "y = 1.5 + 0.25 ln(x)");
        assert_eq!(equation_string(ModelKind::Exponential, &[3.0, 0.5]), "y = 3e^(0.5x)");
    }

    #[test]
    fn polynomial_string_uses_degree_scaled_precision() {
        let s = equation_string(ModelKind::Polynomial, &[1.2345, 2.3456, 0.12345, 0.0012345]);
        assert_eq!(s, "y = 0.001x^3 + 0.12x^2 + 2.35x + 1.23");
    }

    #[test]
    fn sigmoid_string_is_unrounded() {
        let s = equation_string(ModelKind::Sigmoid, &[0.5, 9.25, -30.0, 12.5]);
        assert_eq!(s, "y = (0.5 + 9.25*e^((x-12.5)/-30))/(1+e^((x-12.5)/-30))");
    }
}
