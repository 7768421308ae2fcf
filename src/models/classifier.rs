//! Damping-type classifiers.
//!
//! Supported exports:
//! - `logistic`: any linear model with a `decision_function` (`LogisticRegression`,
//!   `LinearSVC`, ...). Binary models carry one coefficient row and pick
//!   `classes[1]` when the score is positive; multiclass models carry one row per
//!   class and pick the argmax.
//! - `decision_tree` / `random_forest`: per-tree class weights are normalized and
//!   averaged, then the argmax selects from `classes` (matches `predict_proba`).

use nalgebra::{DMatrix, DVector};
use serde::{Deserialize, Serialize};

use super::tree::{Tree, validate_forest};
use super::ArtifactError;
use crate::math::{affine, argmax, matrix_from_rows, normalize_in_place};

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum ClassifierArtifact {
    Logistic {
        classes: Vec<i64>,
        coef: Vec<Vec<f64>>,
        intercept: Vec<f64>,
    },
    DecisionTree {
        n_features: usize,
        classes: Vec<i64>,
        tree: Tree,
    },
    RandomForest {
        n_features: usize,
        classes: Vec<i64>,
        trees: Vec<Tree>,
    },
}

#[derive(Debug, Clone)]
enum ClassifierModel {
    Linear {
        weights: DMatrix<f64>,
        bias: DVector<f64>,
    },
    Forest(Vec<Tree>),
}

/// Compiled classifier.
#[derive(Debug, Clone)]
pub struct Classifier {
    kind: &'static str,
    classes: Vec<i64>,
    n_features: usize,
    model: ClassifierModel,
}

impl Classifier {
    pub fn from_artifact(name: &str, artifact: ClassifierArtifact) -> Result<Self, ArtifactError> {
        match artifact {
            ClassifierArtifact::Logistic {
                classes,
                coef,
                intercept,
            } => {
                check_classes(name, &classes)?;
                let weights = matrix_from_rows(&coef).ok_or_else(|| {
                    ArtifactError::invalid(name, "`coef` must be a non-empty rectangular matrix")
                })?;

                let rows = weights.nrows();
                let binary = classes.len() == 2 && rows == 1;
                if !binary && rows != classes.len() {
                    return Err(ArtifactError::invalid(
                        name,
                        format!(
                            "`coef` has {rows} rows for {} classes (expected 1 for binary or one per class)",
                            classes.len()
                        ),
                    ));
                }
                if intercept.len() != rows {
                    return Err(ArtifactError::invalid(
                        name,
                        format!("`intercept` has {} entries, `coef` has {rows} rows", intercept.len()),
                    ));
                }
                if weights.iter().chain(&intercept).any(|v| !v.is_finite()) {
                    return Err(ArtifactError::invalid(name, "classifier holds non-finite weights"));
                }

                Ok(Self {
                    kind: "logistic",
                    n_features: weights.ncols(),
                    classes,
                    model: ClassifierModel::Linear {
                        weights,
                        bias: DVector::from_vec(intercept),
                    },
                })
            }
            ClassifierArtifact::DecisionTree {
                n_features,
                classes,
                tree,
            } => Self::forest(name, "decision_tree", n_features, classes, vec![tree]),
            ClassifierArtifact::RandomForest {
                n_features,
                classes,
                trees,
            } => Self::forest(name, "random_forest", n_features, classes, trees),
        }
    }

    fn forest(
        name: &str,
        kind: &'static str,
        n_features: usize,
        classes: Vec<i64>,
        trees: Vec<Tree>,
    ) -> Result<Self, ArtifactError> {
        check_classes(name, &classes)?;
        if n_features == 0 {
            return Err(ArtifactError::invalid(name, "`n_features` must be positive"));
        }
        validate_forest(&trees, n_features, classes.len())
            .map_err(|reason| ArtifactError::invalid(name, reason))?;

        Ok(Self {
            kind,
            classes,
            n_features,
            model: ClassifierModel::Forest(trees),
        })
    }

    pub fn n_features(&self) -> usize {
        self.n_features
    }

    pub fn classes(&self) -> &[i64] {
        &self.classes
    }

    pub fn kind_name(&self) -> &'static str {
        self.kind
    }

    /// Predict the class label of one (already scaled) feature vector.
    pub fn predict(&self, x: &DVector<f64>) -> i64 {
        let idx = match &self.model {
            ClassifierModel::Linear { weights, bias } => {
                let scores = affine(weights, bias, x);
                if scores.len() == 1 {
                    usize::from(scores[0] > 0.0)
                } else {
                    argmax(scores.as_slice()).unwrap_or(0)
                }
            }
            ClassifierModel::Forest(trees) => {
                let mut proba = vec![0.0; self.classes.len()];
                for tree in trees {
                    let mut leaf = tree.leaf_value(x.as_slice()).to_vec();
                    normalize_in_place(&mut leaf);
                    for (acc, v) in proba.iter_mut().zip(&leaf) {
                        *acc += v;
                    }
                }
                argmax(&proba).unwrap_or(0)
            }
        };
        self.classes[idx]
    }
}

fn check_classes(name: &str, classes: &[i64]) -> Result<(), ArtifactError> {
    if classes.len() < 2 {
        return Err(ArtifactError::invalid(
            name,
            format!("classifier needs at least two classes, found {}", classes.len()),
        ));
    }
    Ok(())
}
