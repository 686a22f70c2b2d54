//! Top-level application orchestration.
//!
//! `src/main.rs` is intentionally tiny; this module is the "real main" that:
//! - parses CLI arguments
//! - loads the input CSV
//! - runs the selected fit
//! - prints reports/plots
//! - writes optional exports and the debug bundle

use std::path::PathBuf;

use clap::Parser;

use crate::cli::{Command, FitArgs, PlotArgs};
use crate::domain::{FitConfig, FitParam, SpanConfig};
use crate::error::AppError;

pub mod pipeline;

/// Default directory for debug bundles when `REGRESS_DEBUG_DIR` is unset.
pub const DEFAULT_DEBUG_DIR: &str = "debug";

/// Entry point for the `regress` binary.
pub fn run() -> Result<(), AppError> {
    // A missing `.env` is fine; real environment variables still apply.
    dotenvy::dotenv().ok();

    let cli = crate::cli::Cli::parse();

    match cli.command {
        Command::Fit(args) => handle_fit(args),
        Command::Models => handle_models(),
        Command::Plot(args) => handle_plot(args),
    }
}

fn handle_fit(args: FitArgs) -> Result<(), AppError> {
    let config = fit_config_from_args(&args);
    let run = pipeline::run_fit(&config)?;

    for err in &run.ingest.row_errors {
        eprintln!("warning: line {}: {}", err.line, err.message);
    }
    if run.ingest.stats.n_missing > 0 {
        eprintln!(
            "warning: {} of {} samples have no y value",
            run.ingest.stats.n_missing, run.ingest.stats.n_samples
        );
    }
    if run.result.equation.iter().any(|v| !v.is_finite()) {
        eprintln!("warning: fit produced non-finite coefficients (degenerate or unsuitable data)");
    }

    println!(
        "{}",
        crate::report::format_run_summary(&run.ingest, &run.result, &config)
    );
    println!(
        "{}",
        crate::report::format_points(&run.ingest.samples, &run.result)
    );

    if config.plot {
        let plot = crate::plot::render_ascii_plot(
            &run.ingest.samples,
            config.model,
            &run.result,
            config.plot_width,
            config.plot_height,
        );
        println!("{plot}");
    }

    // Optional exports.
    if let Some(path) = &config.export_points {
        crate::io::write_points_csv(path, &run.ingest.samples, &run.result)?;
    }
    if let Some(path) = &config.export_result {
        let file = crate::io::build_result_file(
            config.model,
            config.param,
            &run.ingest.samples,
            &run.result,
        );
        crate::io::write_result_json(path, &file)?;
    }
    if let Some(dir) = &config.debug_dir {
        let path = crate::debug::write_debug_bundle(dir, &config, &run.ingest, &run.result)?;
        eprintln!("Debug bundle written to {}", path.display());
    }

    Ok(())
}

fn handle_models() -> Result<(), AppError> {
    print!("{}", crate::report::format_model_list());
    Ok(())
}

fn handle_plot(args: PlotArgs) -> Result<(), AppError> {
    let file = crate::io::read_result_json(&args.result)?;
    println!("{}: {}", file.model.display_name(), file.result.string);

    let plot = crate::plot::render_ascii_plot(
        &file.samples,
        file.model,
        &file.result,
        args.width,
        args.height,
    );
    println!("{plot}");
    Ok(())
}

pub fn fit_config_from_args(args: &FitArgs) -> FitConfig {
    let param = match (args.order, args.offset, args.grain) {
        (Some(order), _, _) => Some(FitParam::Order(order)),
        (None, Some(offset), Some(grain)) => Some(FitParam::Span(SpanConfig { offset, grain })),
        _ => None,
    };

    let debug_dir = args.debug.then(|| {
        std::env::var("REGRESS_DEBUG_DIR")
            .ok()
            .filter(|dir| !dir.trim().is_empty())
            .map(PathBuf::from)
            .unwrap_or_else(|| PathBuf::from(DEFAULT_DEBUG_DIR))
    });

    FitConfig {
        csv_path: args.csv.clone(),
        model: args.model,
        param,
        plot: args.plot && !args.no_plot,
        plot_width: args.width,
        plot_height: args.height,
        export_points: args.export.clone(),
        export_result: args.export_result.clone(),
        debug_dir,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::ModelKind;

    fn args(argv: &[&str]) -> FitArgs {
        let mut full = vec!["regress", "fit", "--csv", "in.csv"];
        full.extend_from_slice(argv);
        match crate::cli::Cli::parse_from(full).command {
            Command::Fit(args) => args,
            _ => unreachable!(),
        }
    }

    #[test]
    fn order_becomes_polynomial_param() {
        let config = fit_config_from_args(&args(&["-m", "polynomial", "--order", "3"]));
        assert_eq!(config.model, ModelKind::Polynomial);
        assert_eq!(config.param, Some(FitParam::Order(3)));
    }

    #[test]
    fn offset_and_grain_become_span() {
        let config = fit_config_from_args(&args(&["-m", "sigmoid", "--offset", "5", "--grain", "2"]));
        assert_eq!(
            config.param,
            Some(FitParam::Span(SpanConfig { offset: 5.0, grain: 2.0 }))
        );
    }

    #[test]
    fn no_plot_wins_and_debug_is_off_by_default() {
        let config = fit_config_from_args(&args(&["--no-plot"]));
        assert!(!config.plot);
        assert!(config.param.is_none());
        assert!(config.debug_dir.is_none());
    }
}
