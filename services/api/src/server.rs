use crate::cli::ServeArgs;
use crate::infra::{seed_records, AppState, InMemoryModerationQueue, InMemorySubmissionRepository};
use crate::routes::with_directory_routes;
use axum::Extension;
use axum_prometheus::PrometheusMetricLayer;
use patch_tracker::config::AppConfig;
use patch_tracker::directory::SystemCatalog;
use patch_tracker::error::AppError;
use patch_tracker::registry::RegistryService;
use patch_tracker::telemetry;
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
    let catalog = Arc::new(SystemCatalog::new(seed_records()));
    let readiness_flag = Arc::new(std::sync::atomic::AtomicBool::new(false));
    let app_state = AppState {
        readiness: readiness_flag.clone(),
        metrics: Arc::new(prometheus_handle),
        catalog: catalog.clone(),
    };

    let repository = Arc::new(InMemorySubmissionRepository::default());
    let queue = Arc::new(InMemoryModerationQueue::default());
    let registry_service = Arc::new(RegistryService::new(catalog.clone(), repository, queue));

    let app = with_directory_routes(registry_service)
        .layer(Extension(app_state))
        .layer(prometheus_layer);

    let addr = config.server.socket_addr()?;
    let listener = tokio::net::TcpListener::bind(addr).await?;
    readiness_flag.store(true, Ordering::Release);

    info!(?config.environment, %addr, systems = catalog.len(), "patch tracker directory ready");

    axum::serve(listener, app).await?;
    Ok(())
}
