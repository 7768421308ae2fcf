//! Shared domain types.
//!
//! Two groups live here:
//!
//! - prediction values used in-process (`DampingType`, `PolePrediction`)
//! - JSON wire types exchanged over HTTP (`PredictRequest`, `PolesResponse`, ...)
//!
//! The wire types keep the exact field names the service has always exposed
//! (`datos`, `polo_s1_real`, `tipo_sistema`, ...) so existing clients keep working.

use nalgebra::Complex;
use serde::{Deserialize, Serialize};

/// Classifier label that selects the overdamped branch.
pub const OVERDAMPED_LABEL: i64 = 1;

/// Damping regime of a second-order RLC response.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum DampingType {
    /// Two distinct real poles.
    #[serde(rename = "sobre")]
    Overdamped,
    /// Complex-conjugate pole pair.
    #[serde(rename = "sub")]
    Underdamped,
}

impl DampingType {
    /// Map a raw classifier label to a branch.
    ///
    /// Only `1` means overdamped; every other label falls through to the
    /// underdamped branch.
    pub fn from_label(label: i64) -> Self {
        if label == OVERDAMPED_LABEL {
            DampingType::Overdamped
        } else {
            DampingType::Underdamped
        }
    }

    /// Short wire name (`"sobre"` / `"sub"`).
    pub fn as_str(self) -> &'static str {
        match self {
            DampingType::Overdamped => "sobre",
            DampingType::Underdamped => "sub",
        }
    }

    /// Human-readable label for terminal output.
    pub fn display_name(self) -> &'static str {
        match self {
            DampingType::Overdamped => "overdamped",
            DampingType::Underdamped => "underdamped",
        }
    }
}

/// Prediction for a single feature vector.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct PolePrediction {
    pub damping: DampingType,
    /// Label exactly as emitted by the classifier.
    pub label: i64,
    pub s1: Complex<f64>,
    pub s2: Complex<f64>,
}

impl PolePrediction {
    pub fn poles_response(&self) -> PolesResponse {
        PolesResponse {
            polo_s1_real: self.s1.re,
            polo_s1_imag: self.s1.im,
            polo_s2_real: self.s2.re,
            polo_s2_imag: self.s2.im,
        }
    }

    pub fn type_response(&self) -> TypeResponse {
        TypeResponse {
            tipo_sistema: self.label,
        }
    }

    pub fn record(&self) -> PredictionRecord {
        PredictionRecord {
            tipo: self.damping,
            tipo_int: self.label,
            polo_s1_real: self.s1.re,
            polo_s1_imag: self.s1.im,
            polo_s2_real: self.s2.re,
            polo_s2_imag: self.s2.im,
        }
    }
}

/// Result of a batch call.
///
/// A batch of exactly one row collapses into `Single`.
#[derive(Debug, Clone, PartialEq)]
pub enum Prediction {
    Single(PolePrediction),
    Batch(Vec<PolePrediction>),
}

impl Prediction {
    pub fn from_rows(mut rows: Vec<PolePrediction>) -> Self {
        if rows.len() == 1 {
            Prediction::Single(rows.remove(0))
        } else {
            Prediction::Batch(rows)
        }
    }

    /// Iterate over the underlying predictions regardless of shape.
    pub fn iter(&self) -> impl Iterator<Item = &PolePrediction> {
        let slice: &[PolePrediction] = match self {
            Prediction::Single(p) => std::slice::from_ref(p),
            Prediction::Batch(rows) => rows,
        };
        slice.iter()
    }

    pub fn len(&self) -> usize {
        match self {
            Prediction::Single(_) => 1,
            Prediction::Batch(rows) => rows.len(),
        }
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

impl Serialize for Prediction {
    fn serialize<S: serde::Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        match self {
            Prediction::Single(p) => p.record().serialize(serializer),
            Prediction::Batch(rows) => {
                let records: Vec<PredictionRecord> = rows.iter().map(PolePrediction::record).collect();
                records.serialize(serializer)
            }
        }
    }
}

/// Flat record with label and both poles.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct PredictionRecord {
    pub tipo: DampingType,
    pub tipo_int: i64,
    pub polo_s1_real: f64,
    pub polo_s1_imag: f64,
    pub polo_s2_real: f64,
    pub polo_s2_imag: f64,
}

/// Body of `POST /predecir_polos` and `POST /predecir_tipo`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PredictRequest {
    pub datos: Vec<f64>,
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct PolesResponse {
    pub polo_s1_real: f64,
    pub polo_s1_imag: f64,
    pub polo_s2_real: f64,
    pub polo_s2_imag: f64,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct TypeResponse {
    pub tipo_sistema: i64,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct HealthResponse {
    pub status: String,
    pub modelo_cargado: bool,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct IndexResponse {
    pub mensaje: String,
    pub version: String,
    pub endpoints: Vec<String>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ErrorResponse {
    pub error: String,
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample(label: i64) -> PolePrediction {
        PolePrediction {
            damping: DampingType::from_label(label),
            label,
            s1: Complex::new(-1.0, 2.0),
            s2: Complex::new(-1.0, -2.0),
        }
    }

    #[test]
    fn only_label_one_is_overdamped() {
        assert_eq!(DampingType::from_label(1), DampingType::Overdamped);
        assert_eq!(DampingType::from_label(0), DampingType::Underdamped);
        assert_eq!(DampingType::from_label(2), DampingType::Underdamped);
        assert_eq!(DampingType::from_label(-1), DampingType::Underdamped);
    }

    #[test]
    fn single_row_collapses() {
        let p = Prediction::from_rows(vec![sample(0)]);
        assert!(matches!(p, Prediction::Single(_)));
        assert_eq!(p.len(), 1);
        assert!(!p.is_empty());

        let json = serde_json::to_value(&p).unwrap();
        assert!(json.is_object());
        assert_eq!(json["tipo"], "sub");
        assert_eq!(json["tipo_int"], 0);
    }

    #[test]
    fn no_rows_is_an_empty_batch() {
        let p = Prediction::from_rows(Vec::new());
        assert!(p.is_empty());
        assert_eq!(serde_json::to_value(&p).unwrap(), serde_json::json!([]));
    }

    #[test]
    fn multiple_rows_serialize_as_list() {
        let p = Prediction::from_rows(vec![sample(0), sample(1)]);
        assert_eq!(p.len(), 2);

        let json = serde_json::to_value(&p).unwrap();
        let rows = json.as_array().unwrap();
        assert_eq!(rows.len(), 2);
        assert_eq!(rows[1]["tipo"], "sobre");
    }

    #[test]
    fn poles_response_uses_fixed_keys() {
        let json = serde_json::to_value(sample(0).poles_response()).unwrap();
        let obj = json.as_object().unwrap();
        let mut keys: Vec<&str> = obj.keys().map(String::as_str).collect();
        keys.sort_unstable();
        assert_eq!(keys, ["polo_s1_imag", "polo_s1_real", "polo_s2_imag", "polo_s2_real"]);
        assert_eq!(obj["polo_s1_imag"], 2.0);
    }
}
