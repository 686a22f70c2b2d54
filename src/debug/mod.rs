//! Debug bundle writer for inspecting inputs, fitted values and the sigmoid search.

use std::fs::{File, create_dir_all};
use std::io::Write;
use std::path::{Path, PathBuf};

use chrono::Local;

use crate::domain::{FitConfig, FitResult, ModelKind};
use crate::error::AppError;
use crate::fit::{SSR_CEILING, SigmoidFit, b_axis, xc_axis};
use crate::io::IngestedData;
use crate::report::fmt_number;

/// Write a markdown bundle describing one fit and return its path.
pub fn write_debug_bundle(
    dir: &Path,
    config: &FitConfig,
    ingest: &IngestedData,
    result: &FitResult,
) -> Result<PathBuf, AppError> {
    create_dir_all(dir).map_err(|e| AppError::new(4, format!("Failed to create debug dir: {e}")))?;

    let ts = Local::now().format("%Y%m%d_%H%M%S");
    let path = dir.join(format!("regress_debug_{}_{ts}.md", config.model.token()));

    let mut file = File::create(&path)
        .map_err(|e| AppError::new(4, format!("Failed to create debug file: {e}")))?;
    file.write_all(render_debug_bundle(config, ingest, result).as_bytes())
        .map_err(|e| AppError::new(4, format!("Failed to write debug: {e}")))?;

    Ok(path)
}

/// Markdown body of the debug bundle.
pub fn render_debug_bundle(config: &FitConfig, ingest: &IngestedData, result: &FitResult) -> String {
    let mut out = String::new();

    out.push_str("# regress debug bundle\n");
    out.push_str(&format!("- generated: {}\n", Local::now().to_rfc3339()));
    out.push_str(&format!("- input: {}\n", config.csv_path.display()));
    out.push_str(&format!("- model: {}\n", config.model.token()));
    out.push_str(&format!("- param: {:?}\n", config.param));
    out.push_str(&format!(
        "- rows: read={} used={} errors={} missing_y={}\n",
        ingest.rows_read,
        ingest.rows_used,
        ingest.row_errors.len(),
        ingest.stats.n_missing
    ));
    out.push_str(&format!("- result: {}\n", result.string));
    out.push_str(&format!("- equation: {}\n", fmt_vec(&result.equation)));

    if !ingest.row_errors.is_empty() {
        out.push_str("\n## Row errors\n");
        for err in &ingest.row_errors {
            out.push_str(&format!("- line {}: {}\n", err.line, err.message));
        }
    }

    out.push_str("\n## Samples\n");
    out.push_str("| idx | x | y_obs | y_fit | residual |\n");
    out.push_str("| - | - | - | - | - |\n");
    for (idx, (sample, point)) in ingest.samples.iter().zip(&result.points).enumerate() {
        let residual = sample.y.map(|y| y - point.1);
        out.push_str(&format!(
            "| {idx} | {} | {} | {} | {} |\n",
            fmt_number(sample.x),
            fmt_opt(sample.y),
            fmt_number(point.1),
            fmt_opt(residual)
        ));
    }

    if config.model == ModelKind::Sigmoid {
        let fit = SigmoidFit::from_result(&ingest.samples, result);
        out.push_str("\n## Sigmoid search\n");
        out.push_str(&format!(
            "- bounds: x=[{}, {}] y=[{}, {}]\n",
            fmt_number(fit.x_min),
            fmt_number(fit.x_max),
            fmt_number(fit.y_min),
            fmt_number(fit.y_max)
        ));
        out.push_str(&format!(
            "- grid: b={} values, xc={} values, evaluated={}\n",
            b_axis().len(),
            xc_axis(fit.x_min, fit.x_max).len(),
            fit.search.evaluated
        ));
        out.push_str(&format!(
            "- best: b={} xc={} ssr={}\n",
            fmt_number(fit.search.b),
            fmt_number(fit.search.xc),
            fmt_number(fit.search.ssr)
        ));
        if fit.search.ssr >= SSR_CEILING {
            out.push_str("- no pair beat the residual ceiling; defaults used\n");
        }
    }

    out
}

fn fmt_vec(values: &[f64]) -> String {
    let parts: Vec<String> = values.iter().map(|&v| fmt_number(v)).collect();
    format!("[{}]", parts.join(", "))
}

fn fmt_opt(value: Option<f64>) -> String {
    match value {
        Some(v) if v.is_finite() => fmt_number(v),
        _ => "-".to_string(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::io::read_samples;

    fn config(model: ModelKind) -> FitConfig {
        FitConfig {
            csv_path: PathBuf::from("in.csv"),
            model,
            param: None,
            plot: false,
            plot_width: 80,
            plot_height: 20,
            export_points: None,
            export_result: None,
            debug_dir: None,
        }
    }

    #[test]
    fn bundle_lists_samples_and_residuals() {
        let ingest = read_samples("x,y\n1,2\n2,\n3,6\n".as_bytes()).unwrap();
        let result = crate::fit::fit(ModelKind::LinearThroughOrigin, &ingest.samples, None).unwrap();
        let md = render_debug_bundle(&config(ModelKind::LinearThroughOrigin), &ingest, &result);

        assert!(md.starts_with("# regress debug bundle\n"));
        assert!(md.contains("- model: linearThroughOrigin\n"));
        assert!(md.contains("| 2 | 3 | 6 | 6 | 0 |\n"));
        assert!(md.contains("| 1 | 2 | - | 4 | - |\n"));
        assert!(!md.contains("## Sigmoid search"));
    }

    #[test]
    fn sigmoid_bundle_includes_search_summary() {
        let ingest = read_samples("x,y\n0,1\n10,5\n20,9\n".as_bytes()).unwrap();
        let result = crate::fit::fit(ModelKind::Sigmoid, &ingest.samples, None).unwrap();
        let md = render_debug_bundle(&config(ModelKind::Sigmoid), &ingest, &result);
        assert!(md.contains("## Sigmoid search"));
        assert!(md.contains("- grid: b=200 values, xc=2 values, evaluated=400\n"));
    }

    #[test]
    fn bundle_is_written_to_disk() {
        let dir = std::env::temp_dir().join(format!("regress_debug_test_{}", std::process::id()));
        let ingest = read_samples("x,y\n1,1\n2,2\n".as_bytes()).unwrap();
        let result = crate::fit::fit(ModelKind::Linear, &ingest.samples, None).unwrap();

        let path = write_debug_bundle(&dir, &config(ModelKind::Linear), &ingest, &result).unwrap();
        let body = std::fs::read_to_string(&path).unwrap();
        assert!(body.contains("- result: y = 1x + 0\n"));
        std::fs::remove_dir_all(&dir).ok();
    }
}
