//! Admin console surface. Every route below requires a live session issued by
//! the [`crate::auth`] gate; deleting an event also removes its applicants.

use std::sync::Arc;

use axum::{
    extract::{Path, Query, State},
    http::StatusCode,
    response::{IntoResponse, Response},
    routing::{delete, get, put},
    Extension, Router,
};
use chrono::Utc;
use serde::Deserialize;
use serde_json::json;

use crate::applications::domain::{ApplicantId, ApplicantStatus};
use crate::applications::repository::ApplicantRepository;
use crate::applications::service::ApplicationService;
use crate::auth::{auth_router, AdminGate, AdminSession};
use crate::catalog::router::catalog_error_response;
use crate::catalog::{
    CatalogService, EventDraft, EventId, EventPatch, EventRepository, EventScope, MessageId,
    MessageRepository, RepositoryError, SectionDraft, SectionId, SectionPatch, SectionRepository,
    VideoDraft, VideoId, VideoPatch, VideoRepository,
};

/// Shared state for admin handlers: both services plus nothing else, the gate
/// travels as a router extension so the session extractor can reach it.
pub struct AdminState<E, V, S, M, R> {
    pub catalog: Arc<CatalogService<E, V, S, M>>,
    pub applications: Arc<ApplicationService<E, R>>,
}

impl<E, V, S, M, R> Clone for AdminState<E, V, S, M, R> {
    fn clone(&self) -> Self {
        Self {
            catalog: self.catalog.clone(),
            applications: self.applications.clone(),
        }
    }
}

/// Router builder for the whole admin console, login and logout included.
pub fn admin_router<E, V, S, M, R>(
    catalog: Arc<CatalogService<E, V, S, M>>,
    applications: Arc<ApplicationService<E, R>>,
    gate: Arc<AdminGate>,
) -> Router
where
    E: EventRepository + 'static,
    V: VideoRepository + 'static,
    S: SectionRepository + 'static,
    M: MessageRepository + 'static,
    R: ApplicantRepository + 'static,
{
    let state = AdminState {
        catalog,
        applications,
    };

    Router::new()
        .route(
            "/api/v1/admin/events",
            get(list_events::<E, V, S, M, R>).post(create_event::<E, V, S, M, R>),
        )
        .route(
            "/api/v1/admin/events/:event_id",
            put(update_event::<E, V, S, M, R>).delete(delete_event::<E, V, S, M, R>),
        )
        .route(
            "/api/v1/admin/events/:event_id/applicants",
            get(event_applicants::<E, V, S, M, R>),
        )
        .route(
            "/api/v1/admin/applicants/:applicant_id",
            get(get_applicant::<E, V, S, M, R>).delete(delete_applicant::<E, V, S, M, R>),
        )
        .route(
            "/api/v1/admin/applicants/:applicant_id/status",
            put(set_applicant_status::<E, V, S, M, R>),
        )
        .route(
            "/api/v1/admin/videos",
            get(list_videos::<E, V, S, M, R>).post(create_video::<E, V, S, M, R>),
        )
        .route(
            "/api/v1/admin/videos/:video_id",
            put(update_video::<E, V, S, M, R>).delete(delete_video::<E, V, S, M, R>),
        )
        .route(
            "/api/v1/admin/about",
            get(list_sections::<E, V, S, M, R>).post(create_section::<E, V, S, M, R>),
        )
        .route(
            "/api/v1/admin/about/:section_id",
            put(update_section::<E, V, S, M, R>).delete(delete_section::<E, V, S, M, R>),
        )
        .route(
            "/api/v1/admin/messages",
            get(list_messages::<E, V, S, M, R>),
        )
        .route(
            "/api/v1/admin/messages/:message_id",
            delete(delete_message::<E, V, S, M, R>),
        )
        .layer(Extension(gate.clone()))
        .with_state(state)
        .merge(auth_router(gate))
}

#[derive(Debug, Default, Deserialize)]
struct AdminEventQuery {
    #[serde(default)]
    scope: EventScope,
}

#[derive(Debug, Deserialize)]
struct StatusPatch {
    status: ApplicantStatus,
}

fn repository_error_response(error: RepositoryError) -> Response {
    let status = match &error {
        RepositoryError::NotFound => StatusCode::NOT_FOUND,
        RepositoryError::Conflict => StatusCode::CONFLICT,
        RepositoryError::Unavailable(_) => StatusCode::INTERNAL_SERVER_ERROR,
    };
    (status, axum::Json(json!({ "error": error.to_string() }))).into_response()
}

async fn list_events<E, V, S, M, R>(
    _session: AdminSession,
    State(state): State<AdminState<E, V, S, M, R>>,
    Query(query): Query<AdminEventQuery>,
) -> Response
where
    E: EventRepository + 'static,
    V: VideoRepository + 'static,
    S: SectionRepository + 'static,
    M: MessageRepository + 'static,
    R: ApplicantRepository + 'static,
{
    match state.catalog.events(query.scope, Utc::now()) {
        Ok(events) => (StatusCode::OK, axum::Json(events)).into_response(),
        Err(error) => catalog_error_response(error),
    }
}

async fn create_event<E, V, S, M, R>(
    _session: AdminSession,
    State(state): State<AdminState<E, V, S, M, R>>,
    axum::Json(draft): axum::Json<EventDraft>,
) -> Response
where
    E: EventRepository + 'static,
    V: VideoRepository + 'static,
    S: SectionRepository + 'static,
    M: MessageRepository + 'static,
    R: ApplicantRepository + 'static,
{
    match state.catalog.create_event(draft) {
        Ok(event) => (StatusCode::CREATED, axum::Json(event)).into_response(),
        Err(error) => catalog_error_response(error),
    }
}

async fn update_event<E, V, S, M, R>(
    _session: AdminSession,
    State(state): State<AdminState<E, V, S, M, R>>,
    Path(event_id): Path<String>,
    axum::Json(patch): axum::Json<EventPatch>,
) -> Response
where
    E: EventRepository + 'static,
    V: VideoRepository + 'static,
    S: SectionRepository + 'static,
    M: MessageRepository + 'static,
    R: ApplicantRepository + 'static,
{
    match state.catalog.update_event(&EventId(event_id), patch) {
        Ok(event) => (StatusCode::OK, axum::Json(event)).into_response(),
        Err(error) => catalog_error_response(error),
    }
}

/// Event deletion cascades: the applicants attached to the event go first so
/// no orphaned records survive the event they applied to.
async fn delete_event<E, V, S, M, R>(
    _session: AdminSession,
    State(state): State<AdminState<E, V, S, M, R>>,
    Path(event_id): Path<String>,
) -> Response
where
    E: EventRepository + 'static,
    V: VideoRepository + 'static,
    S: SectionRepository + 'static,
    M: MessageRepository + 'static,
    R: ApplicantRepository + 'static,
{
    let event_id = EventId(event_id);
    let removed = match state.applications.remove_for_event(&event_id) {
        Ok(removed) => removed,
        Err(error) => return repository_error_response(error),
    };
    match state.catalog.delete_event(&event_id) {
        Ok(()) => {
            tracing::info!(applicants = removed, "event deleted");
            (
                StatusCode::OK,
                axum::Json(json!({ "removed_applicants": removed })),
            )
                .into_response()
        }
        Err(error) => catalog_error_response(error),
    }
}

async fn event_applicants<E, V, S, M, R>(
    _session: AdminSession,
    State(state): State<AdminState<E, V, S, M, R>>,
    Path(event_id): Path<String>,
) -> Response
where
    E: EventRepository + 'static,
    V: VideoRepository + 'static,
    S: SectionRepository + 'static,
    M: MessageRepository + 'static,
    R: ApplicantRepository + 'static,
{
    match state.applications.for_event(&EventId(event_id)) {
        Ok(applicants) => (StatusCode::OK, axum::Json(applicants)).into_response(),
        Err(error) => repository_error_response(error),
    }
}

async fn get_applicant<E, V, S, M, R>(
    _session: AdminSession,
    State(state): State<AdminState<E, V, S, M, R>>,
    Path(applicant_id): Path<String>,
) -> Response
where
    E: EventRepository + 'static,
    V: VideoRepository + 'static,
    S: SectionRepository + 'static,
    M: MessageRepository + 'static,
    R: ApplicantRepository + 'static,
{
    match state.applications.get(&ApplicantId(applicant_id)) {
        Ok(applicant) => (StatusCode::OK, axum::Json(applicant)).into_response(),
        Err(error) => repository_error_response(error),
    }
}

async fn delete_applicant<E, V, S, M, R>(
    _session: AdminSession,
    State(state): State<AdminState<E, V, S, M, R>>,
    Path(applicant_id): Path<String>,
) -> Response
where
    E: EventRepository + 'static,
    V: VideoRepository + 'static,
    S: SectionRepository + 'static,
    M: MessageRepository + 'static,
    R: ApplicantRepository + 'static,
{
    match state.applications.remove(&ApplicantId(applicant_id)) {
        Ok(()) => StatusCode::NO_CONTENT.into_response(),
        Err(error) => repository_error_response(error),
    }
}

async fn set_applicant_status<E, V, S, M, R>(
    _session: AdminSession,
    State(state): State<AdminState<E, V, S, M, R>>,
    Path(applicant_id): Path<String>,
    axum::Json(patch): axum::Json<StatusPatch>,
) -> Response
where
    E: EventRepository + 'static,
    V: VideoRepository + 'static,
    S: SectionRepository + 'static,
    M: MessageRepository + 'static,
    R: ApplicantRepository + 'static,
{
    match state
        .applications
        .set_status(&ApplicantId(applicant_id), patch.status)
    {
        Ok(applicant) => (StatusCode::OK, axum::Json(applicant)).into_response(),
        Err(error) => repository_error_response(error),
    }
}

async fn list_videos<E, V, S, M, R>(
    _session: AdminSession,
    State(state): State<AdminState<E, V, S, M, R>>,
) -> Response
where
    E: EventRepository + 'static,
    V: VideoRepository + 'static,
    S: SectionRepository + 'static,
    M: MessageRepository + 'static,
    R: ApplicantRepository + 'static,
{
    match state.catalog.videos() {
        Ok(videos) => (StatusCode::OK, axum::Json(videos)).into_response(),
        Err(error) => catalog_error_response(error),
    }
}

async fn create_video<E, V, S, M, R>(
    _session: AdminSession,
    State(state): State<AdminState<E, V, S, M, R>>,
    axum::Json(draft): axum::Json<VideoDraft>,
) -> Response
where
    E: EventRepository + 'static,
    V: VideoRepository + 'static,
    S: SectionRepository + 'static,
    M: MessageRepository + 'static,
    R: ApplicantRepository + 'static,
{
    match state.catalog.add_video(draft) {
        Ok(video) => (StatusCode::CREATED, axum::Json(video)).into_response(),
        Err(error) => catalog_error_response(error),
    }
}

async fn update_video<E, V, S, M, R>(
    _session: AdminSession,
    State(state): State<AdminState<E, V, S, M, R>>,
    Path(video_id): Path<String>,
    axum::Json(patch): axum::Json<VideoPatch>,
) -> Response
where
    E: EventRepository + 'static,
    V: VideoRepository + 'static,
    S: SectionRepository + 'static,
    M: MessageRepository + 'static,
    R: ApplicantRepository + 'static,
{
    match state.catalog.update_video(&VideoId(video_id), patch) {
        Ok(video) => (StatusCode::OK, axum::Json(video)).into_response(),
        Err(error) => catalog_error_response(error),
    }
}

async fn delete_video<E, V, S, M, R>(
    _session: AdminSession,
    State(state): State<AdminState<E, V, S, M, R>>,
    Path(video_id): Path<String>,
) -> Response
where
    E: EventRepository + 'static,
    V: VideoRepository + 'static,
    S: SectionRepository + 'static,
    M: MessageRepository + 'static,
    R: ApplicantRepository + 'static,
{
    match state.catalog.delete_video(&VideoId(video_id)) {
        Ok(()) => StatusCode::NO_CONTENT.into_response(),
        Err(error) => catalog_error_response(error),
    }
}

async fn list_sections<E, V, S, M, R>(
    _session: AdminSession,
    State(state): State<AdminState<E, V, S, M, R>>,
) -> Response
where
    E: EventRepository + 'static,
    V: VideoRepository + 'static,
    S: SectionRepository + 'static,
    M: MessageRepository + 'static,
    R: ApplicantRepository + 'static,
{
    match state.catalog.sections() {
        Ok(sections) => (StatusCode::OK, axum::Json(sections)).into_response(),
        Err(error) => catalog_error_response(error),
    }
}

async fn create_section<E, V, S, M, R>(
    _session: AdminSession,
    State(state): State<AdminState<E, V, S, M, R>>,
    axum::Json(draft): axum::Json<SectionDraft>,
) -> Response
where
    E: EventRepository + 'static,
    V: VideoRepository + 'static,
    S: SectionRepository + 'static,
    M: MessageRepository + 'static,
    R: ApplicantRepository + 'static,
{
    match state.catalog.create_section(draft) {
        Ok(section) => (StatusCode::CREATED, axum::Json(section)).into_response(),
        Err(error) => catalog_error_response(error),
    }
}

async fn update_section<E, V, S, M, R>(
    _session: AdminSession,
    State(state): State<AdminState<E, V, S, M, R>>,
    Path(section_id): Path<String>,
    axum::Json(patch): axum::Json<SectionPatch>,
) -> Response
where
    E: EventRepository + 'static,
    V: VideoRepository + 'static,
    S: SectionRepository + 'static,
    M: MessageRepository + 'static,
    R: ApplicantRepository + 'static,
{
    match state.catalog.update_section(&SectionId(section_id), patch) {
        Ok(section) => (StatusCode::OK, axum::Json(section)).into_response(),
        Err(error) => catalog_error_response(error),
    }
}

async fn delete_section<E, V, S, M, R>(
    _session: AdminSession,
    State(state): State<AdminState<E, V, S, M, R>>,
    Path(section_id): Path<String>,
) -> Response
where
    E: EventRepository + 'static,
    V: VideoRepository + 'static,
    S: SectionRepository + 'static,
    M: MessageRepository + 'static,
    R: ApplicantRepository + 'static,
{
    match state.catalog.delete_section(&SectionId(section_id)) {
        Ok(()) => StatusCode::NO_CONTENT.into_response(),
        Err(error) => catalog_error_response(error),
    }
}

async fn list_messages<E, V, S, M, R>(
    _session: AdminSession,
    State(state): State<AdminState<E, V, S, M, R>>,
) -> Response
where
    E: EventRepository + 'static,
    V: VideoRepository + 'static,
    S: SectionRepository + 'static,
    M: MessageRepository + 'static,
    R: ApplicantRepository + 'static,
{
    match state.catalog.messages() {
        Ok(messages) => (StatusCode::OK, axum::Json(messages)).into_response(),
        Err(error) => catalog_error_response(error),
    }
}

async fn delete_message<E, V, S, M, R>(
    _session: AdminSession,
    State(state): State<AdminState<E, V, S, M, R>>,
    Path(message_id): Path<String>,
) -> Response
where
    E: EventRepository + 'static,
    V: VideoRepository + 'static,
    S: SectionRepository + 'static,
    M: MessageRepository + 'static,
    R: ApplicantRepository + 'static,
{
    match state.catalog.delete_message(&MessageId(message_id)) {
        Ok(()) => StatusCode::NO_CONTENT.into_response(),
        Err(error) => catalog_error_response(error),
    }
}
