use std::sync::Arc;

use axum::{
    extract::State,
    http::StatusCode,
    response::{IntoResponse, Response},
    routing::post,
    Router,
};
use serde_json::json;

use super::domain::ApplicationSubmission;
use super::repository::ApplicantRepository;
use super::service::{ApplicationService, SubmissionError};
use crate::catalog::{EventRepository, RepositoryError};

/// Router builder exposing the public intake endpoint.
pub fn application_router<E, R>(service: Arc<ApplicationService<E, R>>) -> Router
where
    E: EventRepository + 'static,
    R: ApplicantRepository + 'static,
{
    Router::new()
        .route("/api/v1/applications", post(submit_handler::<E, R>))
        .with_state(service)
}

pub(crate) async fn submit_handler<E, R>(
    State(service): State<Arc<ApplicationService<E, R>>>,
    axum::Json(submission): axum::Json<ApplicationSubmission>,
) -> Response
where
    E: EventRepository + 'static,
    R: ApplicantRepository + 'static,
{
    match service.submit(submission) {
        Ok(applicant) => {
            let payload = json!({
                "applicant_id": applicant.id,
                "status": applicant.status.label(),
            });
            (StatusCode::CREATED, axum::Json(payload)).into_response()
        }
        Err(error) => submission_error_response(error),
    }
}

pub(crate) fn submission_error_response(error: SubmissionError) -> Response {
    let status = match &error {
        SubmissionError::EventNotFound => StatusCode::NOT_FOUND,
        SubmissionError::EventClosed => StatusCode::CONFLICT,
        SubmissionError::BlankFullName
        | SubmissionError::BlankPhone
        | SubmissionError::Invalid(_) => StatusCode::UNPROCESSABLE_ENTITY,
        SubmissionError::Repository(RepositoryError::Conflict) => StatusCode::CONFLICT,
        SubmissionError::Repository(_) => StatusCode::INTERNAL_SERVER_ERROR,
    };
    let payload = json!({ "error": error.to_string() });
    (status, axum::Json(payload)).into_response()
}
