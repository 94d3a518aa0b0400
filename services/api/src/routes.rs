use crate::infra::AppState;
use axum::http::{header, StatusCode};
use axum::response::IntoResponse;
use axum::Extension;
use axum::Json;
use marquee::admin::admin_router;
use marquee::applications::{application_router, ApplicantRepository, ApplicationService};
use marquee::auth::AdminGate;
use marquee::catalog::{
    catalog_router, CatalogService, EventRepository, MessageRepository, SectionRepository,
    VideoRepository,
};
use serde_json::json;
use std::sync::Arc;

/// The full HTTP surface: public catalog and intake routes, the gated admin
/// console, and the operational endpoints.
pub(crate) fn site_routes<E, V, S, M, R>(
    catalog: Arc<CatalogService<E, V, S, M>>,
    applications: Arc<ApplicationService<E, R>>,
    gate: Arc<AdminGate>,
) -> axum::Router
where
    E: EventRepository + 'static,
    V: VideoRepository + 'static,
    S: SectionRepository + 'static,
    M: MessageRepository + 'static,
    R: ApplicantRepository + 'static,
{
    catalog_router(catalog.clone())
        .merge(application_router(applications.clone()))
        .merge(admin_router(catalog, applications, gate))
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

#[cfg(test)]
mod tests {
    use super::*;
    use crate::infra::{
        InMemoryApplicantRepository, InMemoryEventRepository, InMemoryMessageRepository,
        InMemorySectionRepository, InMemoryVideoRepository,
    };
    use axum::body::Body;
    use axum::http::Request;
    use chrono::Duration;
    use tower::ServiceExt;

    fn router() -> axum::Router {
        let events = Arc::new(InMemoryEventRepository::default());
        let videos = Arc::new(InMemoryVideoRepository::default());
        let sections = Arc::new(InMemorySectionRepository::default());
        let messages = Arc::new(InMemoryMessageRepository::default());
        let applicants = Arc::new(InMemoryApplicantRepository::default());

        let catalog = Arc::new(CatalogService::new(
            events.clone(),
            videos,
            sections,
            messages,
        ));
        let applications = Arc::new(ApplicationService::new(events, applicants));
        let gate = Arc::new(AdminGate::new("backstage", Duration::hours(1)));

        site_routes(catalog, applications, gate)
    }

    #[tokio::test]
    async fn healthcheck_reports_ok() {
        let response = router()
            .oneshot(Request::get("/health").body(Body::empty()).unwrap())
            .await
            .expect("route executes");
        assert_eq!(response.status(), StatusCode::OK);
    }

    #[tokio::test]
    async fn public_event_listing_is_open() {
        let response = router()
            .oneshot(Request::get("/api/v1/events").body(Body::empty()).unwrap())
            .await
            .expect("route executes");
        assert_eq!(response.status(), StatusCode::OK);
    }

    #[tokio::test]
    async fn admin_routes_reject_anonymous_callers() {
        let response = router()
            .oneshot(
                Request::get("/api/v1/admin/events")
                    .body(Body::empty())
                    .unwrap(),
            )
            .await
            .expect("route executes");
        assert_eq!(response.status(), StatusCode::UNAUTHORIZED);
    }

    #[tokio::test]
    async fn login_then_admin_listing_succeeds() {
        let router = router();

        let login = router
            .clone()
            .oneshot(
                Request::post("/api/v1/admin/login")
                    .header(header::CONTENT_TYPE, "application/json")
                    .body(Body::from(r#"{"password":"backstage"}"#))
                    .unwrap(),
            )
            .await
            .expect("route executes");
        assert_eq!(login.status(), StatusCode::OK);

        let cookie = login
            .headers()
            .get(header::SET_COOKIE)
            .and_then(|value| value.to_str().ok())
            .and_then(|value| value.split(';').next())
            .map(str::to_string)
            .expect("session cookie issued");

        let listing = router
            .oneshot(
                Request::get("/api/v1/admin/events")
                    .header(header::COOKIE, cookie)
                    .body(Body::empty())
                    .unwrap(),
            )
            .await
            .expect("route executes");
        assert_eq!(listing.status(), StatusCode::OK);
    }
}
