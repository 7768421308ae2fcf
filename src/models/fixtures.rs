//! Small hand-built bundle shared by unit tests.
//!
//! Three features. The scaler is `StandardScaler(mean=[1, 2, 3], scale=[1, 2, 0])`
//! and the classifier labels a row `1` (overdamped) when its first raw feature is
//! greater than `1`. Pole regressors are linear:
//!
//! - overdamped: `s1 = -z0 - 1`, `s2 = -2 z0 - 3` (both real)
//! - underdamped: `s1 = -0.5 + (z1 + 2) i`, `s2` its conjugate
//!
//! where `z` is the scaled vector.

use std::path::Path;

use super::*;
use crate::io::write_artifact;

pub const N_FEATURES: usize = 3;

/// Scales to `[2, 1, 2]`: label 1, poles `-3` and `-7`.
pub const OVERDAMPED_INPUT: [f64; N_FEATURES] = [3.0, 4.0, 5.0];

/// Scales to `[-1, 1, 2]`: label 0, poles `-0.5 ± 3i`.
pub const UNDERDAMPED_INPUT: [f64; N_FEATURES] = [0.0, 4.0, 5.0];

pub fn scaler() -> ScalerArtifact {
    ScalerArtifact::Standard {
        mean: vec![1.0, 2.0, 3.0],
        scale: vec![1.0, 2.0, 0.0],
    }
}

pub fn classifier() -> ClassifierArtifact {
    ClassifierArtifact::Logistic {
        classes: vec![0, 1],
        coef: vec![vec![1.0, 0.0, 0.0]],
        intercept: vec![0.0],
    }
}

pub fn linear(real: [f64; N_FEATURES], imag: [f64; N_FEATURES], intercept: [f64; 2]) -> RegressorArtifact {
    RegressorArtifact::Linear {
        coef: vec![real.to_vec(), imag.to_vec()],
        intercept: intercept.to_vec(),
    }
}

pub fn regressors() -> [(&'static str, RegressorArtifact); 4] {
    [
        (OVERDAMPED_S1_FILE, linear([-1.0, 0.0, 0.0], [0.0; 3], [-1.0, 0.0])),
        (OVERDAMPED_S2_FILE, linear([-2.0, 0.0, 0.0], [0.0; 3], [-3.0, 0.0])),
        (UNDERDAMPED_S1_FILE, linear([0.0; 3], [0.0, 1.0, 0.0], [-0.5, 2.0])),
        (UNDERDAMPED_S2_FILE, linear([0.0; 3], [0.0, -1.0, 0.0], [-0.5, -2.0])),
    ]
}

fn compile(name: &str, artifact: RegressorArtifact) -> Regressor {
    Regressor::from_artifact(name, artifact).unwrap()
}

/// Fixture bundle with a custom classifier.
pub fn bundle_with_classifier(classifier: ClassifierArtifact) -> ModelBundle {
    let [(_, os1), (_, os2), (_, us1), (_, us2)] = regressors();
    ModelBundle::from_parts(
        Scaler::from_artifact(SCALER_FILE, scaler()).unwrap(),
        Classifier::from_artifact(CLASSIFIER_FILE, classifier).unwrap(),
        PoleRegressors {
            s1: compile(OVERDAMPED_S1_FILE, os1),
            s2: compile(OVERDAMPED_S2_FILE, os2),
        },
        PoleRegressors {
            s1: compile(UNDERDAMPED_S1_FILE, us1),
            s2: compile(UNDERDAMPED_S2_FILE, us2),
        },
    )
    .unwrap()
}

pub fn bundle() -> ModelBundle {
    bundle_with_classifier(classifier())
}

/// Write the six fixture artifacts into `dir`.
pub fn write_bundle_dir(dir: &Path) {
    write_artifact(&dir.join(SCALER_FILE), &scaler()).unwrap();
    write_artifact(&dir.join(CLASSIFIER_FILE), &classifier()).unwrap();
    for (file, artifact) in regressors() {
        write_artifact(&dir.join(file), &artifact).unwrap();
    }
}
