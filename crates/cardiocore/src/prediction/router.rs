use std::sync::Arc;

use axum::{
    extract::{Path, State},
    http::StatusCode,
    response::{IntoResponse, Response},
    routing::{get, post},
    Router,
};
use serde::Deserialize;
use serde_json::json;

use super::domain::RawPredictionInput;
use super::oracle::ScoringOracle;
use super::repository::{PredictionRepository, RepositoryError};
use super::service::{PredictionService, PredictionServiceError};

/// Router builder exposing HTTP endpoints for assessment and reporting.
pub fn prediction_router<O, R>(service: Arc<PredictionService<O, R>>) -> Router
where
    O: ScoringOracle + 'static,
    R: PredictionRepository + 'static,
{
    Router::new()
        .route("/api/v1/predictions/assess", post(assess_handler::<O, R>))
        .route(
            "/api/v1/predictions/assess/batch",
            post(batch_handler::<O, R>),
        )
        .route(
            "/api/v1/predictions/stats/:owner",
            get(stats_handler::<O, R>),
        )
        .route("/api/v1/predictions/model", get(model_handler::<O, R>))
        .with_state(service)
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub(crate) struct AssessRequest {
    #[serde(default = "default_owner")]
    pub(crate) owner: String,
    #[serde(default)]
    pub(crate) patient_ref: Option<String>,
    #[serde(flatten)]
    pub(crate) input: RawPredictionInput,
}

fn default_owner() -> String {
    "anonymous".to_string()
}

#[derive(Debug, Deserialize)]
pub(crate) struct BatchRequest {
    pub(crate) items: Vec<RawPredictionInput>,
}

pub(crate) async fn assess_handler<O, R>(
    State(service): State<Arc<PredictionService<O, R>>>,
    axum::Json(request): axum::Json<AssessRequest>,
) -> Response
where
    O: ScoringOracle + 'static,
    R: PredictionRepository + 'static,
{
    match service
        .assess_and_record(&request.owner, request.patient_ref, request.input)
        .await
    {
        Ok(assessment) => (StatusCode::OK, axum::Json(assessment)).into_response(),
        Err(PredictionServiceError::Validation(error)) => {
            let payload = json!({
                "error": error.to_string(),
                "field": error.field,
            });
            (StatusCode::UNPROCESSABLE_ENTITY, axum::Json(payload)).into_response()
        }
        Err(other) => {
            let payload = json!({
                "error": other.to_string(),
            });
            (StatusCode::INTERNAL_SERVER_ERROR, axum::Json(payload)).into_response()
        }
    }
}

pub(crate) async fn batch_handler<O, R>(
    State(service): State<Arc<PredictionService<O, R>>>,
    axum::Json(request): axum::Json<BatchRequest>,
) -> Response
where
    O: ScoringOracle + 'static,
    R: PredictionRepository + 'static,
{
    match service.assess_batch(request.items).await {
        Ok(batch) => (StatusCode::OK, axum::Json(batch)).into_response(),
        Err(error) => {
            let payload = json!({
                "error": error.to_string(),
                "field": error.field,
            });
            (StatusCode::UNPROCESSABLE_ENTITY, axum::Json(payload)).into_response()
        }
    }
}

pub(crate) async fn stats_handler<O, R>(
    State(service): State<Arc<PredictionService<O, R>>>,
    Path(owner): Path<String>,
) -> Response
where
    O: ScoringOracle + 'static,
    R: PredictionRepository + 'static,
{
    match service.aggregate_stats(&owner) {
        Ok(stats) => (StatusCode::OK, axum::Json(stats)).into_response(),
        Err(RepositoryError::NotFound) => {
            let payload = json!({ "error": "owner has no prediction history" });
            (StatusCode::NOT_FOUND, axum::Json(payload)).into_response()
        }
        Err(other) => {
            let payload = json!({ "error": other.to_string() });
            (StatusCode::INTERNAL_SERVER_ERROR, axum::Json(payload)).into_response()
        }
    }
}

pub(crate) async fn model_handler<O, R>(
    State(service): State<Arc<PredictionService<O, R>>>,
) -> Response
where
    O: ScoringOracle + 'static,
    R: PredictionRepository + 'static,
{
    (StatusCode::OK, axum::Json(service.model_info())).into_response()
}
