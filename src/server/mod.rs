//! HTTP surface of the inference service.
//!
//! Routes:
//!
//! - `POST /predecir_polos`  `{"datos": [..]}` -> four pole components
//! - `POST /predecir_tipo`   `{"datos": [..]}` -> integer damping label
//! - `GET  /health`          load status
//! - `GET  /`                static description of the endpoints
//!
//! Every failure on the prediction routes, including body extraction failures
//! that axum would otherwise answer with 415/422, is returned as
//! `400 {"error": "<message>"}`.

use std::net::SocketAddr;

use axum::Router;
use axum::extract::State;
use axum::extract::rejection::JsonRejection;
use axum::routing::{get, post};
use axum::Json;
use tracing::{debug, error, info};

use crate::domain::{
    HealthResponse, IndexResponse, PolePrediction, PolesResponse, PredictRequest, TypeResponse,
};
use crate::error::AppError;
use crate::predict::Predictor;

pub mod error;

pub use error::ApiError;

pub const SERVICE_MESSAGE: &str = "API para predicción de polos en sistemas RLC";
pub const SERVICE_VERSION: &str = "2.0 - Modelo Especializado Optimizado";

/// Shared handler state: the predictor over the immutable bundle.
#[derive(Debug, Clone)]
pub struct AppState {
    predictor: Predictor,
}

impl AppState {
    pub fn new(predictor: Predictor) -> Self {
        Self { predictor }
    }

    pub fn predictor(&self) -> &Predictor {
        &self.predictor
    }
}

pub fn router(state: AppState) -> Router {
    Router::new()
        .route("/", get(index))
        .route("/health", get(health))
        .route("/predecir_polos", post(predict_poles))
        .route("/predecir_tipo", post(predict_type))
        .with_state(state)
}

/// Bind `addr` and serve until Ctrl-C.
pub async fn serve(addr: SocketAddr, state: AppState) -> Result<(), AppError> {
    let listener = tokio::net::TcpListener::bind(addr).await.map_err(|e| {
        error!("failed to bind {addr}: {e}");
        AppError::new(4, format!("Failed to bind {addr}: {e}"))
    })?;

    info!(
        %addr,
        n_features = state.predictor().n_features(),
        "serving pole predictions"
    );

    axum::serve(listener, router(state))
        .with_graceful_shutdown(shutdown_signal())
        .await
        .map_err(|e| {
            error!("server error: {e}");
            AppError::new(4, format!("Server error: {e}"))
        })?;

    info!("server stopped");
    Ok(())
}

async fn shutdown_signal() {
    if let Err(e) = tokio::signal::ctrl_c().await {
        error!("failed to listen for shutdown signal: {e}");
        std::future::pending::<()>().await;
    }
}

async fn index() -> Json<IndexResponse> {
    Json(IndexResponse {
        mensaje: SERVICE_MESSAGE.to_string(),
        version: SERVICE_VERSION.to_string(),
        endpoints: vec![
            "/predecir_polos - POST: Predice polos de una señal".to_string(),
            "/predecir_tipo - POST: Predice tipo de sistema".to_string(),
            "/health - GET: Estado de la API".to_string(),
        ],
    })
}

async fn health(State(state): State<AppState>) -> Json<HealthResponse> {
    Json(HealthResponse {
        status: "ok".to_string(),
        modelo_cargado: state.predictor().is_loaded(),
    })
}

async fn predict_poles(
    State(state): State<AppState>,
    body: Result<Json<PredictRequest>, JsonRejection>,
) -> Result<Json<PolesResponse>, ApiError> {
    let prediction = run_prediction(&state, body)?;
    Ok(Json(prediction.poles_response()))
}

async fn predict_type(
    State(state): State<AppState>,
    body: Result<Json<PredictRequest>, JsonRejection>,
) -> Result<Json<TypeResponse>, ApiError> {
    let prediction = run_prediction(&state, body)?;
    Ok(Json(prediction.type_response()))
}

fn run_prediction(
    state: &AppState,
    body: Result<Json<PredictRequest>, JsonRejection>,
) -> Result<PolePrediction, ApiError> {
    let Json(request) = body?;
    let prediction = state.predictor().predict_one(&request.datos)?;
    debug!(
        n_features = request.datos.len(),
        label = prediction.label,
        damping = prediction.damping.as_str(),
        "prediction served"
    );
    Ok(prediction)
}
