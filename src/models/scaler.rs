//! Feature scalers.

use nalgebra::DVector;
use serde::{Deserialize, Serialize};

use super::ArtifactError;

/// Serialized scaler as exported from a fitted `StandardScaler` / `MinMaxScaler`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum ScalerArtifact {
    /// `(x - mean) / scale`
    Standard { mean: Vec<f64>, scale: Vec<f64> },
    /// `x * scale + min`
    MinMax { min: Vec<f64>, scale: Vec<f64> },
}

/// Compiled scaler.
#[derive(Debug, Clone, PartialEq)]
pub enum Scaler {
    Standard {
        mean: DVector<f64>,
        scale: DVector<f64>,
    },
    MinMax {
        min: DVector<f64>,
        scale: DVector<f64>,
    },
}

impl Scaler {
    pub fn from_artifact(name: &str, artifact: ScalerArtifact) -> Result<Self, ArtifactError> {
        match artifact {
            ScalerArtifact::Standard { mean, scale } => {
                check_pair(name, "mean", &mean, &scale)?;
                // A constant training column has scale 0; it is left unscaled.
                let scale: Vec<f64> = scale
                    .into_iter()
                    .map(|s| if s == 0.0 { 1.0 } else { s })
                    .collect();
                Ok(Scaler::Standard {
                    mean: DVector::from_vec(mean),
                    scale: DVector::from_vec(scale),
                })
            }
            ScalerArtifact::MinMax { min, scale } => {
                check_pair(name, "min", &min, &scale)?;
                Ok(Scaler::MinMax {
                    min: DVector::from_vec(min),
                    scale: DVector::from_vec(scale),
                })
            }
        }
    }

    /// Number of raw input features the scaler was fitted on.
    pub fn n_features(&self) -> usize {
        match self {
            Scaler::Standard { mean, .. } => mean.len(),
            Scaler::MinMax { min, .. } => min.len(),
        }
    }

    pub fn kind_name(&self) -> &'static str {
        match self {
            Scaler::Standard { .. } => "standard",
            Scaler::MinMax { .. } => "min_max",
        }
    }

    /// Scale one feature vector. `x.len()` must equal `n_features()`.
    pub fn transform(&self, x: &DVector<f64>) -> DVector<f64> {
        match self {
            Scaler::Standard { mean, scale } => (x - mean).component_div(scale),
            Scaler::MinMax { min, scale } => x.component_mul(scale) + min,
        }
    }
}

fn check_pair(name: &str, label: &str, offset: &[f64], scale: &[f64]) -> Result<(), ArtifactError> {
    if offset.is_empty() {
        return Err(ArtifactError::invalid(name, format!("scaler has an empty `{label}`")));
    }
    if offset.len() != scale.len() {
        return Err(ArtifactError::invalid(
            name,
            format!(
                "scaler `{label}` has {} entries but `scale` has {}",
                offset.len(),
                scale.len()
            ),
        ));
    }
    if offset.iter().chain(scale).any(|v| !v.is_finite()) {
        return Err(ArtifactError::invalid(name, "scaler holds non-finite values"));
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn standard_scaler_centers_and_divides() {
        let scaler = Scaler::from_artifact(
            "scaler",
            ScalerArtifact::Standard {
                mean: vec![1.0, 2.0],
                scale: vec![2.0, 0.0],
            },
        )
        .unwrap();

        let y = scaler.transform(&DVector::from_row_slice(&[5.0, 7.0]));
        assert!((y[0] - 2.0).abs() < 1e-12);
        // Zero scale is treated as one.
        assert!((y[1] - 5.0).abs() < 1e-12);
    }

    #[test]
    fn min_max_scaler_applies_affine_map() {
        let scaler = Scaler::from_artifact(
            "scaler",
            ScalerArtifact::MinMax {
                min: vec![-0.5],
                scale: vec![0.25],
            },
        )
        .unwrap();
        assert_eq!(scaler.n_features(), 1);
        assert_eq!(scaler.kind_name(), "min_max");

        let y = scaler.transform(&DVector::from_row_slice(&[4.0]));
        assert!((y[0] - 0.5).abs() < 1e-12);
    }

    #[test]
    fn mismatched_lengths_are_rejected() {
        let err = Scaler::from_artifact(
            "scaler_X.json",
            ScalerArtifact::Standard {
                mean: vec![0.0, 0.0],
                scale: vec![1.0],
            },
        )
        .unwrap_err();
        assert!(err.to_string().contains("scaler_X.json"));
    }

    #[test]
    fn artifact_json_is_tagged_by_kind() {
        let raw = r#"{"kind": "standard", "mean": [0.0], "scale": [1.0]}"#;
        let artifact: ScalerArtifact = serde_json::from_str(raw).unwrap();
        assert!(matches!(artifact, ScalerArtifact::Standard { .. }));
    }
}
