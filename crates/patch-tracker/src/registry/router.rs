use std::sync::Arc;

use axum::{
    extract::{Path, State},
    http::StatusCode,
    response::{IntoResponse, Response},
    routing::{get, post},
    Router,
};
use serde_json::json;

use super::domain::{FixSubmission, SubmissionId, SystemRegistration};
use super::repository::{ModerationQueue, RepositoryError, SubmissionRepository};
use super::service::{RegistryError, RegistryService};

/// Router builder exposing the two intake forms and submission status lookup.
pub fn registry_router<R, Q>(service: Arc<RegistryService<R, Q>>) -> Router
where
    R: SubmissionRepository + 'static,
    Q: ModerationQueue + 'static,
{
    Router::new()
        .route("/api/v1/registrations", post(register_handler::<R, Q>))
        .route("/api/v1/fixes", post(fix_handler::<R, Q>))
        .route(
            "/api/v1/submissions/:submission_id",
            get(status_handler::<R, Q>),
        )
        .with_state(service)
}

fn error_response(error: RegistryError) -> Response {
    match error {
        RegistryError::Validation(validation) => {
            let payload = json!({
                "error": validation.to_string(),
                "fields": validation.fields(),
            });
            (StatusCode::UNPROCESSABLE_ENTITY, axum::Json(payload)).into_response()
        }
        RegistryError::UnknownSystem(id) => {
            let payload = json!({
                "error": format!("no registered system with id '{id}'"),
            });
            (StatusCode::NOT_FOUND, axum::Json(payload)).into_response()
        }
        RegistryError::Repository(RepositoryError::Conflict) => {
            let payload = json!({ "error": "submission already exists" });
            (StatusCode::CONFLICT, axum::Json(payload)).into_response()
        }
        other => {
            let payload = json!({ "error": other.to_string() });
            (StatusCode::INTERNAL_SERVER_ERROR, axum::Json(payload)).into_response()
        }
    }
}

pub(crate) async fn register_handler<R, Q>(
    State(service): State<Arc<RegistryService<R, Q>>>,
    axum::Json(registration): axum::Json<SystemRegistration>,
) -> Response
where
    R: SubmissionRepository + 'static,
    Q: ModerationQueue + 'static,
{
    match service.register_system(registration) {
        Ok(record) => (StatusCode::ACCEPTED, axum::Json(record.receipt())).into_response(),
        Err(error) => error_response(error),
    }
}

pub(crate) async fn fix_handler<R, Q>(
    State(service): State<Arc<RegistryService<R, Q>>>,
    axum::Json(fix): axum::Json<FixSubmission>,
) -> Response
where
    R: SubmissionRepository + 'static,
    Q: ModerationQueue + 'static,
{
    match service.submit_fix(fix) {
        Ok(record) => (StatusCode::ACCEPTED, axum::Json(record.receipt())).into_response(),
        Err(error) => error_response(error),
    }
}

pub(crate) async fn status_handler<R, Q>(
    State(service): State<Arc<RegistryService<R, Q>>>,
    Path(submission_id): Path<String>,
) -> Response
where
    R: SubmissionRepository + 'static,
    Q: ModerationQueue + 'static,
{
    let id = SubmissionId(submission_id);
    match service.get(&id) {
        Ok(record) => (StatusCode::OK, axum::Json(record.receipt())).into_response(),
        Err(RegistryError::Repository(RepositoryError::NotFound)) => {
            let payload = json!({
                "error": format!("no submission with id '{}'", id.0),
            });
            (StatusCode::NOT_FOUND, axum::Json(payload)).into_response()
        }
        Err(other) => error_response(other),
    }
}
