use crate::cli::ServeArgs;
use crate::infra::{
    spawn_session_sweeper, AppState, InMemorySessionRepository, InMemorySubmissionLog,
};
use crate::routes::with_site_routes;
use axum::Extension;
use axum_prometheus::PrometheusMetricLayer;
use belong::cards::BoardStore;
use belong::config::AppConfig;
use belong::error::AppError;
use belong::intake::IntakeService;
use belong::telemetry;
use belong::wizard::CompletionProtocol;
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

    let intake_service = Arc::new(IntakeService::new(
        Arc::new(InMemorySessionRepository::default()),
        Arc::new(InMemorySubmissionLog::default()),
        CompletionProtocol::new(config.wizard.submit_delay),
    ));
    let _sweeper =
        spawn_session_sweeper(intake_service.clone(), config.wizard.closed_session_ttl);
    let boards = Arc::new(BoardStore::new());

    let app = with_site_routes(intake_service, boards)
        .layer(Extension(app_state))
        .layer(prometheus_layer);

    let addr = config.server.socket_addr()?;
    let listener = tokio::net::TcpListener::bind(addr).await?;
    readiness_flag.store(true, Ordering::Release);

    info!(
        ?config.environment,
        %addr,
        submit_delay_ms = config.wizard.submit_delay.as_millis() as u64,
        closed_session_ttl_secs = config.wizard.closed_session_ttl.as_secs(),
        "belong site backend ready"
    );

    axum::serve(listener, app).await?;
    Ok(())
}
