//! Reporting utilities: equation strings and terminal output.
//!
//! Formatting lives here so the fitters stay numeric and output changes are
//! localized.

pub mod format;

pub use format::*;
