//! Command-line parsing for the `regress` curve fitter.
//!
//! The goal of this module is to keep **argument parsing** and **command dispatch**
//! separate from the fitting/math code.

use std::path::PathBuf;

use clap::{Parser, Subcommand};

use crate::domain::ModelKind;

/// Top-level CLI.
#[derive(Debug, Parser)]
#[command(name = "regress", version, about = "Least-squares curve fitting for x/y series")]
pub struct Cli {
    #[command(subcommand)]
    pub command: Command,
}

/// CLI subcommands.
#[derive(Debug, Subcommand)]
pub enum Command {
    /// Fit a model to a CSV series, print the result, and optionally plot/export.
    Fit(FitArgs),
    /// List the supported models.
    Models,
    /// Plot a previously exported result JSON.
    Plot(PlotArgs),
}

/// Options for fitting.
#[derive(Debug, Parser, Clone)]
pub struct FitArgs {
    /// Input CSV with `x` and `y` columns.
    #[arg(long, value_name = "CSV")]
    pub csv: PathBuf,

    /// Model to fit.
    #[arg(short = 'm', long, value_enum, default_value_t = ModelKind::Linear)]
    pub model: ModelKind,

    /// Polynomial order (polynomial only, default 2).
    #[arg(long)]
    pub order: Option<usize>,

    /// Sigmoid span: distance to extend past the observed x-range.
    #[arg(long, requires = "grain", conflicts_with = "order")]
    pub offset: Option<f64>,

    /// Sigmoid span: step between generated x values.
    #[arg(long, requires = "offset", conflicts_with = "order")]
    pub grain: Option<f64>,

    /// Render an ASCII plot in the terminal (enabled by default).
    #[arg(long, default_value_t = true)]
    pub plot: bool,

    /// Disable the terminal plot.
    #[arg(long)]
    pub no_plot: bool,

    /// Plot width (columns).
    #[arg(long, default_value_t = 80)]
    pub width: usize,

    /// Plot height (rows).
    #[arg(long, default_value_t = 20)]
    pub height: usize,

    /// Export observed and fitted points to CSV.
    #[arg(long, value_name = "CSV")]
    pub export: Option<PathBuf>,

    /// Export the full result (equation, points, string, span) to JSON.
    #[arg(long = "export-result", value_name = "JSON")]
    pub export_result: Option<PathBuf>,

    /// Write a markdown debug bundle (directory from `REGRESS_DEBUG_DIR`, default `debug`).
    #[arg(long)]
    pub debug: bool,
}

/// Options for plotting a saved result.
#[derive(Debug, Parser)]
pub struct PlotArgs {
    /// Result JSON file produced by `regress fit --export-result`.
    #[arg(long, value_name = "JSON")]
    pub result: PathBuf,

    /// Plot width (columns).
    #[arg(long, default_value_t = 80)]
    pub width: usize,

    /// Plot height (rows).
    #[arg(long, default_value_t = 20)]
    pub height: usize,
}
