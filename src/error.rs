//! Process-level error type.
//!
//! Library code reports failures through the `thiserror` enums of each module
//! (`ArtifactError`, `PredictError`); at the binary boundary they are folded
//! into an `AppError` that carries the process exit code.
//!
//! Exit codes:
//! - `2` configuration or model bundle could not be loaded
//! - `3` invalid prediction input on the command line
//! - `4` server or network failure

use crate::models::ArtifactError;
use crate::predict::PredictError;

#[derive(Clone)]
pub struct AppError {
    exit_code: u8,
    message: String,
}

impl AppError {
    pub fn new(exit_code: u8, message: impl Into<String>) -> Self {
        Self {
            exit_code,
            message: message.into(),
        }
    }

    pub fn exit_code(&self) -> u8 {
        self.exit_code
    }

    pub fn message(&self) -> &str {
        &self.message
    }
}

impl std::fmt::Display for AppError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.message)
    }
}

impl std::fmt::Debug for AppError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("AppError")
            .field("exit_code", &self.exit_code)
            .field("message", &self.message)
            .finish()
    }
}

impl std::error::Error for AppError {}

impl From<ArtifactError> for AppError {
    fn from(err: ArtifactError) -> Self {
        AppError::new(2, format!("Failed to load model bundle: {err}"))
    }
}

impl From<PredictError> for AppError {
    fn from(err: PredictError) -> Self {
        AppError::new(3, format!("Prediction failed: {err}"))
    }
}
