//! Curve fitting.
//!
//! Responsibilities:
//!
//! - closed-form least squares for the linear, exponential, logarithmic and power families
//! - polynomial normal equations (solved by `math::solver`)
//! - sigmoid grid search (parallel over the steepness axis)
//! - last-value step function
//! - dispatch by model kind

pub mod closed_form;
pub mod dispatch;
pub mod last_value;
pub mod polynomial;
pub mod sigmoid;
pub mod sigmoid_grid;

pub use closed_form::*;
pub use dispatch::*;
pub use last_value::*;
pub use polynomial::*;
pub use sigmoid::*;
pub use sigmoid_grid::*;
