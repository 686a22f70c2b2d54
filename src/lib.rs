//! `regression-curves` library crate.
//!
//! The binary (`regress`) is a thin wrapper around this library so that:
//!
//! - the fitters are testable without spawning processes
//! - callers can fit in-memory series via [`fit::fit`] / [`fit::fit_named`]
//! - code stays easy to navigate as the project grows

pub mod app;
pub mod cli;
pub mod debug;
pub mod domain;
pub mod error;
pub mod fit;
pub mod io;
pub mod math;
pub mod models;
pub mod plot;
pub mod report;
