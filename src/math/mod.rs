//! Mathematical utilities shared by the estimators: affine maps and reductions.

pub mod affine;

pub use affine::*;
