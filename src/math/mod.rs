//! Mathematical utilities: the dense linear solver and grid spacing.

pub mod solver;
pub mod spacing;

pub use solver::*;
pub use spacing::*;
