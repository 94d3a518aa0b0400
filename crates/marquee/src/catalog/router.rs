use std::sync::Arc;

use axum::{
    extract::{Path, Query, State},
    http::StatusCode,
    response::{IntoResponse, Response},
    routing::{get, post},
    Router,
};
use chrono::Utc;
use serde::Deserialize;
use serde_json::json;

use super::domain::{EventId, EventScope, MessageDraft};
use super::repository::{
    EventRepository, MessageRepository, RepositoryError, SectionRepository, VideoRepository,
};
use super::service::{CatalogError, CatalogService, DEFAULT_VIDEO_LIMIT};

/// Router builder for the public site surface: event listings, the schema
/// fetch backing the application modal, videos, about blocks, and the
/// contact form.
pub fn catalog_router<E, V, S, M>(service: Arc<CatalogService<E, V, S, M>>) -> Router
where
    E: EventRepository + 'static,
    V: VideoRepository + 'static,
    S: SectionRepository + 'static,
    M: MessageRepository + 'static,
{
    Router::new()
        .route("/api/v1/events", get(list_events_handler::<E, V, S, M>))
        .route(
            "/api/v1/events/:event_id",
            get(event_handler::<E, V, S, M>),
        )
        .route("/api/v1/videos", get(videos_handler::<E, V, S, M>))
        .route("/api/v1/about", get(about_handler::<E, V, S, M>))
        .route("/api/v1/contact", post(contact_handler::<E, V, S, M>))
        .with_state(service)
}

#[derive(Debug, Default, Deserialize)]
pub(crate) struct EventListQuery {
    #[serde(default)]
    scope: EventScope,
}

#[derive(Debug, Deserialize)]
pub(crate) struct VideoListQuery {
    limit: Option<usize>,
}

pub(crate) async fn list_events_handler<E, V, S, M>(
    State(service): State<Arc<CatalogService<E, V, S, M>>>,
    Query(query): Query<EventListQuery>,
) -> Response
where
    E: EventRepository + 'static,
    V: VideoRepository + 'static,
    S: SectionRepository + 'static,
    M: MessageRepository + 'static,
{
    match service.events(query.scope, Utc::now()) {
        Ok(events) => (StatusCode::OK, axum::Json(events)).into_response(),
        Err(error) => catalog_error_response(error),
    }
}

pub(crate) async fn event_handler<E, V, S, M>(
    State(service): State<Arc<CatalogService<E, V, S, M>>>,
    Path(event_id): Path<String>,
) -> Response
where
    E: EventRepository + 'static,
    V: VideoRepository + 'static,
    S: SectionRepository + 'static,
    M: MessageRepository + 'static,
{
    match service.event(&EventId(event_id)) {
        Ok(event) => (StatusCode::OK, axum::Json(event)).into_response(),
        Err(error) => catalog_error_response(error),
    }
}

pub(crate) async fn videos_handler<E, V, S, M>(
    State(service): State<Arc<CatalogService<E, V, S, M>>>,
    Query(query): Query<VideoListQuery>,
) -> Response
where
    E: EventRepository + 'static,
    V: VideoRepository + 'static,
    S: SectionRepository + 'static,
    M: MessageRepository + 'static,
{
    let limit = query.limit.unwrap_or(DEFAULT_VIDEO_LIMIT);
    match service.active_videos(limit) {
        Ok(videos) => (StatusCode::OK, axum::Json(videos)).into_response(),
        Err(error) => catalog_error_response(error),
    }
}

pub(crate) async fn about_handler<E, V, S, M>(
    State(service): State<Arc<CatalogService<E, V, S, M>>>,
) -> Response
where
    E: EventRepository + 'static,
    V: VideoRepository + 'static,
    S: SectionRepository + 'static,
    M: MessageRepository + 'static,
{
    match service.sections() {
        Ok(sections) => (StatusCode::OK, axum::Json(sections)).into_response(),
        Err(error) => catalog_error_response(error),
    }
}

pub(crate) async fn contact_handler<E, V, S, M>(
    State(service): State<Arc<CatalogService<E, V, S, M>>>,
    axum::Json(draft): axum::Json<MessageDraft>,
) -> Response
where
    E: EventRepository + 'static,
    V: VideoRepository + 'static,
    S: SectionRepository + 'static,
    M: MessageRepository + 'static,
{
    match service.submit_message(draft) {
        Ok(message) => (StatusCode::CREATED, axum::Json(message)).into_response(),
        Err(error) => catalog_error_response(error),
    }
}

/// Shared error mapping for catalog handlers, public and admin alike.
pub(crate) fn catalog_error_response(error: CatalogError) -> Response {
    let status = match &error {
        CatalogError::BlankField { .. } => StatusCode::UNPROCESSABLE_ENTITY,
        CatalogError::Repository(RepositoryError::NotFound) => StatusCode::NOT_FOUND,
        CatalogError::Repository(RepositoryError::Conflict) => StatusCode::CONFLICT,
        CatalogError::Repository(RepositoryError::Unavailable(_)) => {
            StatusCode::INTERNAL_SERVER_ERROR
        }
    };
    let payload = json!({ "error": error.to_string() });
    (status, axum::Json(payload)).into_response()
}
