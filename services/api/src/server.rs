use crate::cli::ServeArgs;
use crate::infra::{
    AppState, InMemoryApplicantRepository, InMemoryEventRepository, InMemoryMessageRepository,
    InMemorySectionRepository, InMemoryVideoRepository,
};
use crate::routes::site_routes;
use axum::Extension;
use axum_prometheus::PrometheusMetricLayer;
use chrono::Duration;
use marquee::applications::ApplicationService;
use marquee::auth::AdminGate;
use marquee::catalog::CatalogService;
use marquee::config::AppConfig;
use marquee::error::AppError;
use marquee::telemetry;
use std::sync::atomic::Ordering;
use std::sync::Arc;
use tracing::info;

pub(crate) async fn run(mut args: ServeArgs) -> Result<(), AppError> {
    let mut config = AppConfig::load()?;

    if let Some(host) = args.host.take() {
        config.server.host = host;
    }
    if let Some(port) = args.port.take() {
        config.server.port = port;
    }

    telemetry::init(&config.telemetry)?;

    let (prometheus_layer, prometheus_handle) = PrometheusMetricLayer::pair();
    let readiness_flag = Arc::new(std::sync::atomic::AtomicBool::new(false));
    let app_state = AppState {
        readiness: readiness_flag.clone(),
        metrics: Arc::new(prometheus_handle),
    };

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
    let gate = Arc::new(AdminGate::new(
        &config.admin.password,
        Duration::hours(config.admin.session_hours),
    ));

    let app = site_routes(catalog, applications, gate)
        .layer(Extension(app_state))
        .layer(prometheus_layer);

    let addr = config.server.socket_addr()?;
    let listener = tokio::net::TcpListener::bind(addr).await?;
    readiness_flag.store(true, Ordering::Release);

    info!(?config.environment, %addr, "marquee event platform ready");

    axum::serve(listener, app).await?;
    Ok(())
}
