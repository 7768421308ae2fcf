//! Request-level error mapped to `400 {"error": ...}`.

use axum::Json;
use axum::extract::rejection::JsonRejection;
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use tracing::warn;

use crate::domain::ErrorResponse;
use crate::predict::PredictError;

#[derive(Debug, thiserror::Error)]
pub enum ApiError {
    #[error("{0}")]
    Body(String),

    #[error(transparent)]
    Predict(#[from] PredictError),
}

impl From<JsonRejection> for ApiError {
    fn from(rejection: JsonRejection) -> Self {
        ApiError::Body(rejection.body_text())
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let message = self.to_string();
        warn!(error = %message, "rejected prediction request");
        (StatusCode::BAD_REQUEST, Json(ErrorResponse { error: message })).into_response()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn predict_errors_keep_their_message() {
        let err = ApiError::from(PredictError::FeatureCount { expected: 4, got: 2 });
        assert_eq!(err.to_string(), "expected 4 features, got 2");
        assert_eq!(err.into_response().status(), StatusCode::BAD_REQUEST);
    }
}
