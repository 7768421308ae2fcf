//! Pole regressors.
//!
//! Every regressor in the bundle predicts one pole as a 2-vector
//! `[real, imaginary]`.

use nalgebra::{Complex, DMatrix, DVector};
use serde::{Deserialize, Serialize};

use super::tree::{Tree, validate_forest};
use super::ArtifactError;
use crate::math::{affine, matrix_from_rows};

/// Outputs per pole regressor (real and imaginary part).
pub const POLE_OUTPUTS: usize = 2;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum RegressorArtifact {
    /// `LinearRegression` / `Ridge` with two targets: `coef` is `2 x n_features`.
    Linear {
        coef: Vec<Vec<f64>>,
        intercept: Vec<f64>,
    },
    DecisionTree {
        n_features: usize,
        tree: Tree,
    },
    RandomForest {
        n_features: usize,
        trees: Vec<Tree>,
    },
}

#[derive(Debug, Clone)]
enum RegressorModel {
    Linear {
        weights: DMatrix<f64>,
        bias: DVector<f64>,
    },
    Forest(Vec<Tree>),
}

#[derive(Debug, Clone)]
pub struct Regressor {
    kind: &'static str,
    n_features: usize,
    model: RegressorModel,
}

impl Regressor {
    pub fn from_artifact(name: &str, artifact: RegressorArtifact) -> Result<Self, ArtifactError> {
        match artifact {
            RegressorArtifact::Linear { coef, intercept } => {
                let weights = matrix_from_rows(&coef).ok_or_else(|| {
                    ArtifactError::invalid(name, "`coef` must be a non-empty rectangular matrix")
                })?;
                if weights.nrows() != POLE_OUTPUTS || intercept.len() != POLE_OUTPUTS {
                    return Err(ArtifactError::invalid(
                        name,
                        format!(
                            "pole regressor must have {POLE_OUTPUTS} outputs (coef rows={}, intercept={})",
                            weights.nrows(),
                            intercept.len()
                        ),
                    ));
                }
                if weights.iter().chain(&intercept).any(|v| !v.is_finite()) {
                    return Err(ArtifactError::invalid(name, "regressor holds non-finite weights"));
                }
                Ok(Self {
                    kind: "linear",
                    n_features: weights.ncols(),
                    model: RegressorModel::Linear {
                        weights,
                        bias: DVector::from_vec(intercept),
                    },
                })
            }
            RegressorArtifact::DecisionTree { n_features, tree } => {
                Self::forest(name, "decision_tree", n_features, vec![tree])
            }
            RegressorArtifact::RandomForest { n_features, trees } => {
                Self::forest(name, "random_forest", n_features, trees)
            }
        }
    }

    fn forest(
        name: &str,
        kind: &'static str,
        n_features: usize,
        trees: Vec<Tree>,
    ) -> Result<Self, ArtifactError> {
        if n_features == 0 {
            return Err(ArtifactError::invalid(name, "`n_features` must be positive"));
        }
        validate_forest(&trees, n_features, POLE_OUTPUTS)
            .map_err(|reason| ArtifactError::invalid(name, reason))?;
        Ok(Self {
            kind,
            n_features,
            model: RegressorModel::Forest(trees),
        })
    }

    pub fn n_features(&self) -> usize {
        self.n_features
    }

    pub fn kind_name(&self) -> &'static str {
        self.kind
    }

    /// Predict one pole from an (already scaled) feature vector.
    pub fn predict(&self, x: &DVector<f64>) -> Complex<f64> {
        match &self.model {
            RegressorModel::Linear { weights, bias } => {
                let y = affine(weights, bias, x);
                Complex::new(y[0], y[1])
            }
            RegressorModel::Forest(trees) => {
                let mut sum = [0.0; POLE_OUTPUTS];
                for tree in trees {
                    let leaf = tree.leaf_value(x.as_slice());
                    sum[0] += leaf[0];
                    sum[1] += leaf[1];
                }
                let n = trees.len() as f64;
                Complex::new(sum[0] / n, sum[1] / n)
            }
        }
    }
}
