use crate::cli::ServeArgs;
use crate::infra::{build_store, AppState};
use crate::routes::with_fleet_routes;
use axum::Extension;
use axum_prometheus::PrometheusMetricLayer;
use chrono::Local;
use std::sync::atomic::Ordering;
use std::sync::Arc;
use tracing::info;
use wisar_fleet::config::AppConfig;
use wisar_fleet::error::AppError;
use wisar_fleet::fleet::FleetLogService;
use wisar_fleet::telemetry;

pub(crate) async fn run(mut args: ServeArgs) -> Result<(), AppError> {
    let mut config = AppConfig::load()?;

    if let Some(host) = args.host.take() {
        config.server.host = host;
    }
    if let Some(port) = args.port.take() {
        config.server.port = port;
    }
    if let Some(roster) = args.roster.take() {
        config.fleet.roster_path = Some(roster);
    }

    telemetry::init(&config.telemetry)?;

    let (prometheus_layer, prometheus_handle) = PrometheusMetricLayer::pair();
    let readiness_flag = Arc::new(std::sync::atomic::AtomicBool::new(false));
    let app_state = AppState {
        readiness: readiness_flag.clone(),
        metrics: Arc::new(prometheus_handle),
    };

    let store = build_store(
        config.fleet.roster_path.as_deref(),
        config.fleet.drivers_path.as_deref(),
        Local::now().date_naive(),
    )?;
    let fleet_service = Arc::new(
        FleetLogService::new(Arc::new(store)).with_history_limit(config.fleet.history_limit),
    );
    fleet_service.load()?;

    let app = with_fleet_routes(fleet_service)
        .layer(Extension(app_state))
        .layer(prometheus_layer);

    let addr = config.server.socket_addr()?;
    let listener = tokio::net::TcpListener::bind(addr).await?;
    readiness_flag.store(true, Ordering::Release);

    info!(?config.environment, %addr, "fleet log service ready");

    axum::serve(listener, app).await?;
    Ok(())
}
