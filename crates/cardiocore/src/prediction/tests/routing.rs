use std::sync::Arc;

use axum::body::Body;
use axum::http::{header, Request, StatusCode};
use serde_json::json;
use tower::util::ServiceExt;

use super::common::*;
use crate::prediction::router::prediction_router;
use crate::prediction::service::PredictionService;

fn fallback_router() -> axum::Router {
    let service = PredictionService::new(
        Arc::new(FailingOracle {
            kind: FailureKind::Timeout,
        }),
        Arc::new(MemoryRepository::default()),
    );
    prediction_router(Arc::new(service))
}

fn json_request(uri: &str, payload: serde_json::Value) -> Request<Body> {
    Request::builder()
        .method("POST")
        .uri(uri)
        .header(header::CONTENT_TYPE, "application/json")
        .body(Body::from(payload.to_string()))
        .expect("request builds")
}

fn assess_payload() -> serde_json::Value {
    json!({
        "owner": "clinic-a",
        "age": 70,
        "sex": "male",
        "chestPainType": "typical angina",
        "restingBP": 190,
        "cholesterol": 320,
        "fastingBS": 1,
        "restingECG": "left ventricular hypertrophy",
        "maxHR": 90,
        "exerciseAngina": true,
        "oldpeak": 2.5,
        "stSlope": "down"
    })
}

#[tokio::test]
async fn assess_endpoint_returns_the_full_assessment() {
    let response = fallback_router()
        .oneshot(json_request("/api/v1/predictions/assess", assess_payload()))
        .await
        .expect("router responds");

    assert_eq!(response.status(), StatusCode::OK);
    let body = read_json_body(response).await;
    assert_eq!(body["riskLevel"], "critical");
    assert_eq!(body["method"], "simplified");
    assert_eq!(body["percentage"], 100);
    assert!(body["recommendations"].as_array().expect("list").len() >= 2);
}

#[tokio::test]
async fn assess_endpoint_rejects_invalid_input_naming_the_field() {
    let mut payload = assess_payload();
    payload["stSlope"] = json!("sideways");

    let response = fallback_router()
        .oneshot(json_request("/api/v1/predictions/assess", payload))
        .await
        .expect("router responds");

    assert_eq!(response.status(), StatusCode::UNPROCESSABLE_ENTITY);
    let body = read_json_body(response).await;
    assert_eq!(body["field"], "stSlope");
}

#[tokio::test]
async fn batch_endpoint_reports_per_item_results() {
    let mut invalid = assess_payload();
    invalid["age"] = json!(400);
    invalid.as_object_mut().expect("object").remove("owner");
    let mut valid = assess_payload();
    valid.as_object_mut().expect("object").remove("owner");

    let response = fallback_router()
        .oneshot(json_request(
            "/api/v1/predictions/assess/batch",
            json!({ "items": [valid, invalid] }),
        ))
        .await
        .expect("router responds");

    assert_eq!(response.status(), StatusCode::OK);
    let body = read_json_body(response).await;
    assert_eq!(body["summary"]["total"], 2);
    assert_eq!(body["summary"]["successful"], 1);
    assert_eq!(body["summary"]["failed"], 1);
    assert_eq!(body["results"][0]["success"], true);
    assert_eq!(body["results"][1]["success"], false);
}

#[tokio::test]
async fn stats_endpoint_returns_owner_scoped_aggregates() {
    let repository = Arc::new(MemoryRepository::default());
    {
        use crate::prediction::repository::PredictionRepository;
        repository
            .insert(record("clinic-a", 0.8, month(2026, 8)))
            .expect("insert");
    }
    let service = PredictionService::new(
        Arc::new(FailingOracle {
            kind: FailureKind::Process,
        }),
        repository,
    );
    let router = prediction_router(Arc::new(service));

    let response = router
        .oneshot(
            Request::builder()
                .uri("/api/v1/predictions/stats/clinic-a")
                .body(Body::empty())
                .expect("request builds"),
        )
        .await
        .expect("router responds");

    assert_eq!(response.status(), StatusCode::OK);
    let body = read_json_body(response).await;
    assert_eq!(body["total"], 1);
    assert_eq!(body["criticalRiskCount"], 1);
}

#[tokio::test]
async fn model_endpoint_is_byte_identical_across_calls() {
    let first = fallback_router()
        .oneshot(
            Request::builder()
                .uri("/api/v1/predictions/model")
                .body(Body::empty())
                .expect("request builds"),
        )
        .await
        .expect("router responds");
    let second = fallback_router()
        .oneshot(
            Request::builder()
                .uri("/api/v1/predictions/model")
                .body(Body::empty())
                .expect("request builds"),
        )
        .await
        .expect("router responds");

    let first_bytes = axum::body::to_bytes(first.into_body(), 64 * 1024)
        .await
        .expect("read body");
    let second_bytes = axum::body::to_bytes(second.into_body(), 64 * 1024)
        .await
        .expect("read body");
    assert_eq!(first_bytes, second_bytes);
}
