//! Curve family evaluation.
//!
//! Models are implemented as small, pure functions so that fitting, plotting,
//! and export code can stay generic over the family.

pub mod model;

pub use model::*;
