//! Prediction service over a loaded model bundle.
//!
//! Per feature vector:
//!
//! 1. validate width and finiteness
//! 2. scale with the bundle's scaler
//! 3. classify into a damping label
//! 4. run exactly one branch's regressor pair (`DampingType::from_label`)
//! 5. reject poles that overflowed to a non-finite value
//!
//! A `Predictor` can only be built from a `ModelBundle`, so there is no
//! "not loaded yet" path. The bundle sits behind an `Arc` and is never mutated;
//! clones of the predictor share it.

use std::sync::Arc;

use nalgebra::DVector;
use rayon::prelude::*;

use crate::domain::{DampingType, PolePrediction, Prediction};
use crate::models::ModelBundle;

/// Per-request prediction failure.
#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum PredictError {
    #[error("no feature vectors were provided")]
    EmptyBatch,

    #[error("expected {expected} features, got {got}")]
    FeatureCount { expected: usize, got: usize },

    #[error("feature {index} is not a finite number")]
    NonFinite { index: usize },

    #[error("prediction produced a non-finite pole")]
    NonFinitePole,
}

#[derive(Debug, Clone)]
pub struct Predictor {
    bundle: Arc<ModelBundle>,
}

impl Predictor {
    pub fn new(bundle: ModelBundle) -> Self {
        Self {
            bundle: Arc::new(bundle),
        }
    }

    /// A predictor always wraps a fully loaded bundle.
    pub fn is_loaded(&self) -> bool {
        true
    }

    pub fn n_features(&self) -> usize {
        self.bundle.n_features()
    }

    /// Predict label and poles for one raw feature vector.
    pub fn predict_one(&self, features: &[f64]) -> Result<PolePrediction, PredictError> {
        let x = self.validated(features)?;
        let z = self.bundle.scaler().transform(&x);

        let label = self.bundle.classifier().predict(&z);
        let damping = DampingType::from_label(label);
        let (s1, s2) = self.bundle.branch(damping).predict(&z);
        if ![s1.re, s1.im, s2.re, s2.im].iter().all(|v| v.is_finite()) {
            return Err(PredictError::NonFinitePole);
        }

        Ok(PolePrediction {
            damping,
            label,
            s1,
            s2,
        })
    }

    /// Predict a batch of rows, keeping input order.
    ///
    /// A batch with one row collapses to `Prediction::Single`. Any invalid row
    /// fails the whole batch.
    pub fn predict(&self, rows: &[Vec<f64>]) -> Result<Prediction, PredictError> {
        if rows.is_empty() {
            return Err(PredictError::EmptyBatch);
        }
        let results = rows
            .par_iter()
            .map(|row| self.predict_one(row))
            .collect::<Result<Vec<_>, _>>()?;
        Ok(Prediction::from_rows(results))
    }

    fn validated(&self, features: &[f64]) -> Result<DVector<f64>, PredictError> {
        let expected = self.n_features();
        if features.len() != expected {
            return Err(PredictError::FeatureCount {
                expected,
                got: features.len(),
            });
        }
        if let Some(index) = features.iter().position(|v| !v.is_finite()) {
            return Err(PredictError::NonFinite { index });
        }
        Ok(DVector::from_row_slice(features))
    }
}
