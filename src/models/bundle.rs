//! The model bundle: six estimators loaded together or not at all.
//!
//! Layout of a models directory:
//!
//! ```text
//! models/
//!   modelo_tipo.json      damping-type classifier
//!   scaler_X.json         feature scaler
//!   modelo_sobre_s1.json  overdamped pole s1
//!   modelo_sobre_s2.json  overdamped pole s2
//!   modelo_sub_s1.json    underdamped pole s1
//!   modelo_sub_s2.json    underdamped pole s2
//! ```
//!
//! `ModelBundle::load` either returns a fully validated bundle or an error; there
//! is no partially loaded state. All estimators must agree with the scaler on the
//! number of input features.

use std::path::{Path, PathBuf};

use chrono::{DateTime, Utc};
use nalgebra::{Complex, DVector};
use tracing::{debug, info};

use super::{
    ArtifactError, Classifier, ClassifierArtifact, Regressor, RegressorArtifact, Scaler,
    ScalerArtifact,
};
use crate::domain::DampingType;
use crate::io::read_artifact;

pub const CLASSIFIER_FILE: &str = "modelo_tipo.json";
pub const SCALER_FILE: &str = "scaler_X.json";
pub const OVERDAMPED_S1_FILE: &str = "modelo_sobre_s1.json";
pub const OVERDAMPED_S2_FILE: &str = "modelo_sobre_s2.json";
pub const UNDERDAMPED_S1_FILE: &str = "modelo_sub_s1.json";
pub const UNDERDAMPED_S2_FILE: &str = "modelo_sub_s2.json";

/// Every file a complete bundle needs.
pub const ARTIFACT_FILES: [&str; 6] = [
    CLASSIFIER_FILE,
    SCALER_FILE,
    OVERDAMPED_S1_FILE,
    OVERDAMPED_S2_FILE,
    UNDERDAMPED_S1_FILE,
    UNDERDAMPED_S2_FILE,
];

/// The two regressors of one damping branch.
#[derive(Debug, Clone)]
pub struct PoleRegressors {
    pub s1: Regressor,
    pub s2: Regressor,
}

impl PoleRegressors {
    pub fn predict(&self, x: &DVector<f64>) -> (Complex<f64>, Complex<f64>) {
        (self.s1.predict(x), self.s2.predict(x))
    }
}

/// One line of the bundle summary printed by `poles check`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ArtifactSummary {
    pub file: &'static str,
    pub kind: &'static str,
    pub n_features: usize,
}

#[derive(Debug, Clone)]
pub struct ModelBundle {
    scaler: Scaler,
    classifier: Classifier,
    overdamped: PoleRegressors,
    underdamped: PoleRegressors,
    source_dir: Option<PathBuf>,
    loaded_at: DateTime<Utc>,
}

impl ModelBundle {
    /// Load and validate all six artifacts from `dir`.
    pub fn load(dir: &Path) -> Result<Self, ArtifactError> {
        debug!(dir = %dir.display(), "loading model bundle");

        let scaler_raw: ScalerArtifact = read_artifact(&dir.join(SCALER_FILE))?;
        let scaler = Scaler::from_artifact(SCALER_FILE, scaler_raw)?;

        let classifier_raw: ClassifierArtifact = read_artifact(&dir.join(CLASSIFIER_FILE))?;
        let classifier = Classifier::from_artifact(CLASSIFIER_FILE, classifier_raw)?;

        let overdamped = PoleRegressors {
            s1: load_regressor(dir, OVERDAMPED_S1_FILE)?,
            s2: load_regressor(dir, OVERDAMPED_S2_FILE)?,
        };
        let underdamped = PoleRegressors {
            s1: load_regressor(dir, UNDERDAMPED_S1_FILE)?,
            s2: load_regressor(dir, UNDERDAMPED_S2_FILE)?,
        };

        let mut bundle = Self::from_parts(scaler, classifier, overdamped, underdamped)?;
        bundle.source_dir = Some(dir.to_path_buf());

        info!(
            dir = %dir.display(),
            n_features = bundle.n_features(),
            scaler = bundle.scaler.kind_name(),
            classifier = bundle.classifier.kind_name(),
            loaded_at = %bundle.loaded_at.to_rfc3339(),
            "model bundle loaded"
        );
        Ok(bundle)
    }

    /// Assemble a bundle from compiled estimators, checking that they agree on
    /// the input width.
    pub fn from_parts(
        scaler: Scaler,
        classifier: Classifier,
        overdamped: PoleRegressors,
        underdamped: PoleRegressors,
    ) -> Result<Self, ArtifactError> {
        let expected = scaler.n_features();
        let widths = [
            (CLASSIFIER_FILE, classifier.n_features()),
            (OVERDAMPED_S1_FILE, overdamped.s1.n_features()),
            (OVERDAMPED_S2_FILE, overdamped.s2.n_features()),
            (UNDERDAMPED_S1_FILE, underdamped.s1.n_features()),
            (UNDERDAMPED_S2_FILE, underdamped.s2.n_features()),
        ];
        for (file, n) in widths {
            if n != expected {
                return Err(ArtifactError::invalid(
                    file,
                    format!("expects {n} features but {SCALER_FILE} was fitted on {expected}"),
                ));
            }
        }

        Ok(Self {
            scaler,
            classifier,
            overdamped,
            underdamped,
            source_dir: None,
            loaded_at: Utc::now(),
        })
    }

    /// Number of raw features each input vector must have.
    pub fn n_features(&self) -> usize {
        self.scaler.n_features()
    }

    pub fn scaler(&self) -> &Scaler {
        &self.scaler
    }

    pub fn classifier(&self) -> &Classifier {
        &self.classifier
    }

    /// Regressor pair for a damping branch.
    pub fn branch(&self, damping: DampingType) -> &PoleRegressors {
        match damping {
            DampingType::Overdamped => &self.overdamped,
            DampingType::Underdamped => &self.underdamped,
        }
    }

    pub fn source_dir(&self) -> Option<&Path> {
        self.source_dir.as_deref()
    }

    pub fn loaded_at(&self) -> DateTime<Utc> {
        self.loaded_at
    }

    pub fn summary(&self) -> Vec<ArtifactSummary> {
        let regressor = |file: &'static str, r: &Regressor| ArtifactSummary {
            file,
            kind: r.kind_name(),
            n_features: r.n_features(),
        };
        vec![
            ArtifactSummary {
                file: SCALER_FILE,
                kind: self.scaler.kind_name(),
                n_features: self.scaler.n_features(),
            },
            ArtifactSummary {
                file: CLASSIFIER_FILE,
                kind: self.classifier.kind_name(),
                n_features: self.classifier.n_features(),
            },
            regressor(OVERDAMPED_S1_FILE, &self.overdamped.s1),
            regressor(OVERDAMPED_S2_FILE, &self.overdamped.s2),
            regressor(UNDERDAMPED_S1_FILE, &self.underdamped.s1),
            regressor(UNDERDAMPED_S2_FILE, &self.underdamped.s2),
        ]
    }
}

fn load_regressor(dir: &Path, file: &str) -> Result<Regressor, ArtifactError> {
    let raw: RegressorArtifact = read_artifact(&dir.join(file))?;
    Regressor::from_artifact(file, raw)
}
