use crate::infra::AppState;
use axum::http::{header, StatusCode};
use axum::response::IntoResponse;
use axum::Extension;
use axum::Json;
use brokerage_intake::workflows::intake::{
    identifier_router, intake_router, IntakeService, SubmissionNotifier, SubmissionRepository,
};
use brokerage_intake::workflows::registry::{registry_router, CompanyRegistry};
use serde_json::json;
use std::sync::Arc;

pub(crate) fn with_intake_routes<R, N, G>(
    service: Arc<IntakeService<R, N>>,
    registry: Arc<G>,
) -> axum::Router
where
    R: SubmissionRepository + 'static,
    N: SubmissionNotifier + 'static,
    G: CompanyRegistry + 'static,
{
    intake_router(service)
        .merge(identifier_router())
        .merge(registry_router(registry))
        .route("/health", axum::routing::get(healthcheck))
        .route("/ready", axum::routing::get(readiness_endpoint))
        .route("/metrics", axum::routing::get(metrics_endpoint))
}

pub(crate) async fn healthcheck() -> Json<serde_json::Value> {
    Json(json!({ "status": "ok" }))
}

pub(crate) async fn readiness_endpoint(Extension(state): Extension<AppState>) -> impl IntoResponse {
    let ready = state.readiness.load(std::sync::atomic::Ordering::Relaxed);
    let status = if ready {
        StatusCode::OK
    } else {
        StatusCode::SERVICE_UNAVAILABLE
    };

    let payload = if ready {
        json!({ "status": "ready" })
    } else {
        json!({ "status": "initializing" })
    };

    (status, Json(payload))
}

pub(crate) async fn metrics_endpoint(Extension(state): Extension<AppState>) -> impl IntoResponse {
    (
        StatusCode::OK,
        [(header::CONTENT_TYPE, "text/plain; version=0.0.4")],
        state.metrics.render(),
    )
}
