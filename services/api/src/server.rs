use crate::cli::ServeArgs;
use crate::infra::{load_snapshot, AppState};
use crate::routes::with_ranking_routes;
use axum::Extension;
use axum_prometheus::PrometheusMetricLayer;
use impact_rank::config::{AppConfig, AppEnvironment, DataConfig};
use impact_rank::error::AppError;
use impact_rank::rankings::{RankingService, SnapshotSource};
use impact_rank::telemetry;
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;
use tracing::{error, info, warn};

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
    let readiness_flag = Arc::new(AtomicBool::new(false));
    let app_state = AppState {
        readiness: readiness_flag.clone(),
        metrics: Arc::new(prometheus_handle),
    };

    let source = Arc::new(SnapshotSource::default());
    let ranking_service = Arc::new(RankingService::new(
        source.clone(),
        config.grading.clone(),
    ));

    let app = with_ranking_routes(ranking_service.clone())
        .layer(Extension(app_state))
        .layer(prometheus_layer);

    let addr = config.server.socket_addr()?;
    let listener = tokio::net::TcpListener::bind(addr).await?;

    info!(?config.environment, %addr, "impact rankings listening; loading snapshot");

    tokio::spawn(publish_snapshot(
        config.data.clone(),
        config.environment,
        source,
        ranking_service,
        readiness_flag,
    ));

    axum::serve(listener, app).await?;
    Ok(())
}

/// Load rankings off the request path. Until this finishes the ranking
/// endpoints answer with the loading state.
async fn publish_snapshot(
    data: DataConfig,
    environment: AppEnvironment,
    source: Arc<SnapshotSource>,
    service: Arc<RankingService<SnapshotSource>>,
    readiness: Arc<AtomicBool>,
) {
    let loaded = tokio::task::spawn_blocking(move || load_snapshot(&data, environment)).await;

    match loaded {
        Ok(Ok(Some(loaded))) => {
            info!(
                origin = ?loaded.origin,
                as_of = %loaded.snapshot.as_of,
                leaderboard = loaded.snapshot.leaderboard.len(),
                solutions = loaded.snapshot.solutions.len(),
                organizations = loaded.snapshot.organizations.len(),
                leaderboard_imported = loaded.leaderboard_imported,
                "ranking snapshot published"
            );
            source.publish(loaded.snapshot);
            report_grade_mismatches(&service);
            readiness.store(true, Ordering::Release);
        }
        Ok(Ok(None)) => {
            warn!("no ranking data configured; set APP_SNAPSHOT_PATH or APP_LEADERBOARD_CSV");
            source.fail("no ranking data configured");
        }
        Ok(Err(err)) => {
            error!(error = %err, "failed to load ranking snapshot");
            source.fail(err.to_string());
        }
        Err(err) => {
            error!(error = %err, "snapshot loader stopped unexpectedly");
            source.fail("snapshot loader stopped unexpectedly");
        }
    }
}

fn report_grade_mismatches(service: &RankingService<SnapshotSource>) {
    match service.audit_grades() {
        Ok(mismatches) => {
            for mismatch in &mismatches {
                warn!(
                    name = %mismatch.name,
                    score = mismatch.score.value(),
                    recorded = %mismatch.recorded,
                    expected = %mismatch.expected,
                    "stored grade disagrees with the grade scale"
                );
            }
        }
        Err(err) => warn!(error = %err, "grade audit skipped"),
    }
}
