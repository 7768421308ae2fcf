//! Domain types used throughout the service.
//!
//! This module defines:
//!
//! - the damping regime enum (`DampingType`)
//! - per-row and batch prediction values (`PolePrediction`, `Prediction`)
//! - HTTP request/response payloads (`PredictRequest`, `PolesResponse`, etc.)

pub mod types;

pub use types::*;
