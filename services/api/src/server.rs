use crate::cli::ServeArgs;
use crate::infra::{
    AppState, InMemoryNotifier, InMemorySubmissionRepository, StaticCompanyRegistry,
};
use crate::routes::with_intake_routes;
use axum::Extension;
use axum_prometheus::PrometheusMetricLayer;
use brokerage_intake::config::AppConfig;
use brokerage_intake::error::AppError;
use brokerage_intake::telemetry;
use brokerage_intake::workflows::intake::{FormSchema, IntakeService};
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

    let repository = Arc::new(InMemorySubmissionRepository::default());
    let notifier = Arc::new(InMemoryNotifier::default());
    let intake_service = Arc::new(IntakeService::new(
        FormSchema::from_config(&config.intake),
        repository,
        notifier,
    ));
    let registry = Arc::new(StaticCompanyRegistry::with_sample_companies());

    let app = with_intake_routes(intake_service, registry)
        .layer(Extension(app_state))
        .layer(prometheus_layer);

    let addr = config.server.socket_addr()?;
    let listener = tokio::net::TcpListener::bind(addr).await?;
    readiness_flag.store(true, Ordering::Release);

    info!(
        ?config.environment,
        %addr,
        default_calling_code = config.intake.default_calling_code,
        "brokerage intake service ready"
    );

    axum::serve(listener, app).await?;
    Ok(())
}
