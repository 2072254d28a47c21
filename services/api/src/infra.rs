use chrono::Local;
use impact_rank::config::{AppEnvironment, DataConfig};
use impact_rank::error::AppError;
use impact_rank::rankings::{LeaderboardCsvImporter, RankingSnapshot, SnapshotError};
use metrics_exporter_prometheus::PrometheusHandle;
use std::sync::atomic::AtomicBool;
use std::sync::Arc;

const SAMPLE_SNAPSHOT: &str = include_str!("../data/sample_snapshot.json");

#[derive(Clone)]
pub(crate) struct AppState {
    pub(crate) readiness: Arc<AtomicBool>,
    pub(crate) metrics: Arc<PrometheusHandle>,
}

/// Where the published snapshot came from, for startup logging.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) enum SnapshotOrigin {
    File,
    Sample,
    LeaderboardOnly,
}

#[derive(Debug)]
pub(crate) struct LoadedSnapshot {
    pub(crate) snapshot: RankingSnapshot,
    pub(crate) origin: SnapshotOrigin,
    pub(crate) leaderboard_imported: bool,
}

pub(crate) fn sample_snapshot() -> Result<RankingSnapshot, SnapshotError> {
    RankingSnapshot::from_reader(SAMPLE_SNAPSHOT.as_bytes())
}

/// Resolve the configured data into one snapshot.
///
/// The snapshot file wins over the built-in sample; a leaderboard CSV then
/// replaces the leaderboard section. Returns `None` when nothing is
/// configured and the environment does not serve sample data.
pub(crate) fn load_snapshot(
    data: &DataConfig,
    environment: AppEnvironment,
) -> Result<Option<LoadedSnapshot>, AppError> {
    let (base, origin) = match (&data.snapshot_path, &data.leaderboard_csv) {
        (Some(path), _) => (RankingSnapshot::from_path(path)?, SnapshotOrigin::File),
        (None, _) if environment.allows_sample_data() => {
            (sample_snapshot()?, SnapshotOrigin::Sample)
        }
        (None, Some(_)) => (empty_snapshot(), SnapshotOrigin::LeaderboardOnly),
        (None, None) => return Ok(None),
    };

    let (snapshot, leaderboard_imported) = match &data.leaderboard_csv {
        Some(path) => {
            let entries = LeaderboardCsvImporter::from_path(path)?;
            (base.with_leaderboard(entries)?, true)
        }
        None => (base, false),
    };

    Ok(Some(LoadedSnapshot {
        snapshot,
        origin,
        leaderboard_imported,
    }))
}

fn empty_snapshot() -> RankingSnapshot {
    RankingSnapshot {
        as_of: Local::now().date_naive(),
        leaderboard: Vec::new(),
        solutions: Vec::new(),
        organizations: Vec::new(),
    }
}
