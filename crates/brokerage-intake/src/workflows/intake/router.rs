use std::sync::Arc;

use axum::{
    extract::{Path, State},
    http::StatusCode,
    response::{IntoResponse, Response},
    routing::{get, post},
    Router,
};
use serde_json::json;

use super::domain::FormDraft;
use super::identifiers::IdentifierKind;
use super::repository::{RepositoryError, SubmissionId, SubmissionNotifier, SubmissionRepository};
use super::service::{IntakeService, IntakeServiceError};

/// Router exposing draft validation, progress and submission endpoints.
pub fn intake_router<R, N>(service: Arc<IntakeService<R, N>>) -> Router
where
    R: SubmissionRepository + 'static,
    N: SubmissionNotifier + 'static,
{
    Router::new()
        .route("/api/v1/intake/validate", post(validate_handler::<R, N>))
        .route("/api/v1/intake/progress", post(progress_handler::<R, N>))
        .route("/api/v1/intake/submissions", post(submit_handler::<R, N>))
        .route(
            "/api/v1/intake/submissions/:submission_id",
            get(status_handler::<R, N>),
        )
        .with_state(service)
}

/// Stateless single-identifier checks used by the form while the client types.
pub fn identifier_router() -> Router {
    Router::new().route(
        "/api/v1/identifiers/:kind/validate",
        post(identifier_handler),
    )
}

pub(crate) async fn validate_handler<R, N>(
    State(service): State<Arc<IntakeService<R, N>>>,
    axum::Json(draft): axum::Json<FormDraft>,
) -> Response
where
    R: SubmissionRepository + 'static,
    N: SubmissionNotifier + 'static,
{
    match service.validate(&draft) {
        Ok(form) => {
            let payload = json!({ "valid": true, "form": form });
            (StatusCode::OK, axum::Json(payload)).into_response()
        }
        Err(report) => {
            let payload = json!({ "valid": false, "issues": report.issues });
            (StatusCode::UNPROCESSABLE_ENTITY, axum::Json(payload)).into_response()
        }
    }
}

pub(crate) async fn progress_handler<R, N>(
    State(service): State<Arc<IntakeService<R, N>>>,
    axum::Json(draft): axum::Json<FormDraft>,
) -> Response
where
    R: SubmissionRepository + 'static,
    N: SubmissionNotifier + 'static,
{
    let progress = service.progress(&draft);
    (StatusCode::OK, axum::Json(progress)).into_response()
}

pub(crate) async fn submit_handler<R, N>(
    State(service): State<Arc<IntakeService<R, N>>>,
    axum::Json(draft): axum::Json<FormDraft>,
) -> Response
where
    R: SubmissionRepository + 'static,
    N: SubmissionNotifier + 'static,
{
    match service.submit(&draft) {
        Ok(envelope) => {
            let view = envelope.status_view();
            (StatusCode::ACCEPTED, axum::Json(view)).into_response()
        }
        Err(IntakeServiceError::Validation(report)) => {
            let payload = json!({
                "error": report.to_string(),
                "issues": report.issues,
            });
            (StatusCode::UNPROCESSABLE_ENTITY, axum::Json(payload)).into_response()
        }
        Err(IntakeServiceError::Repository(RepositoryError::Conflict)) => {
            let payload = json!({
                "error": "submission already exists",
            });
            (StatusCode::CONFLICT, axum::Json(payload)).into_response()
        }
        Err(other) => {
            let payload = json!({
                "error": other.to_string(),
            });
            (StatusCode::INTERNAL_SERVER_ERROR, axum::Json(payload)).into_response()
        }
    }
}

pub(crate) async fn status_handler<R, N>(
    State(service): State<Arc<IntakeService<R, N>>>,
    Path(submission_id): Path<String>,
) -> Response
where
    R: SubmissionRepository + 'static,
    N: SubmissionNotifier + 'static,
{
    let id = SubmissionId(submission_id);
    match service.get(&id) {
        Ok(envelope) => {
            let view = envelope.status_view();
            (StatusCode::OK, axum::Json(view)).into_response()
        }
        Err(IntakeServiceError::Repository(RepositoryError::NotFound)) => {
            let payload = json!({
                "submission_id": id.0,
                "error": "submission not found",
            });
            (StatusCode::NOT_FOUND, axum::Json(payload)).into_response()
        }
        Err(other) => {
            let payload = json!({
                "error": other.to_string(),
            });
            (StatusCode::INTERNAL_SERVER_ERROR, axum::Json(payload)).into_response()
        }
    }
}

#[derive(Debug, serde::Deserialize)]
pub(crate) struct IdentifierInput {
    #[serde(default)]
    pub value: String,
}

pub(crate) async fn identifier_handler(
    Path(kind): Path<String>,
    axum::Json(input): axum::Json<IdentifierInput>,
) -> Response {
    match IdentifierKind::parse(&kind) {
        Some(kind) => (StatusCode::OK, axum::Json(kind.validate(&input.value))).into_response(),
        None => {
            let payload = json!({
                "error": format!("unknown identifier kind '{kind}'"),
            });
            (StatusCode::NOT_FOUND, axum::Json(payload)).into_response()
        }
    }
}
