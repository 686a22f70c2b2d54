//! Domain types used throughout the pipeline.
//!
//! This module defines:
//!
//! - input observations (`Sample`)
//! - model selection and per-model parameters (`ModelKind`, `FitParam`, `SpanConfig`)
//! - fit outputs (`FitResult`, `SigmoidSpan`, `ResultFile`)

pub mod types;

pub use types::*;
