//! Fitted estimators and the model bundle that groups them.
//!
//! The estimators are trained elsewhere (scikit-learn) and exported to JSON; this
//! module only evaluates them. Each estimator is deserialized into a plain
//! `*Artifact` enum first and then compiled into an evaluation-ready form
//! (`nalgebra` matrices, validated trees). Shape problems surface at load time so
//! prediction code can index without re-checking.

pub mod bundle;
pub mod classifier;
pub mod error;
pub mod regressor;
pub mod scaler;
pub mod tree;

#[cfg(test)]
pub(crate) mod fixtures;

pub use bundle::*;
pub use classifier::*;
pub use error::*;
pub use regressor::*;
pub use scaler::*;
pub use tree::*;
