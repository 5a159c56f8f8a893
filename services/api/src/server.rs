use crate::cli::ServeArgs;
use crate::infra::{AppState, ConfiguredStore};
use crate::routes::with_optimizer_routes;
use axum::Extension;
use axum_prometheus::PrometheusMetricLayer;
use cro_advisor::config::AppConfig;
use cro_advisor::error::AppError;
use cro_advisor::optimizer::{OptimizerService, RuleSet};
use cro_advisor::telemetry;
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

    let store = ConfiguredStore::from_config(&config.storage);
    let artifact_location = store.describe();
    let optimizer_service = Arc::new(OptimizerService::new(
        Arc::new(store),
        config.analysis.aggregate_policy(),
        config.analysis.synthesis_options(),
    ));

    let app = with_optimizer_routes(optimizer_service)
        .layer(Extension(app_state))
        .layer(prometheus_layer);

    let addr = config.server.socket_addr()?;
    let listener = tokio::net::TcpListener::bind(addr).await?;
    readiness_flag.store(true, Ordering::Release);

    info!(
        ?config.environment,
        %addr,
        rules = RuleSet::standard().len(),
        artifacts = %artifact_location,
        "conversion optimizer ready"
    );

    axum::serve(listener, app).await?;
    Ok(())
}
