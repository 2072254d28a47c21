use std::sync::{Arc, RwLock};

use serde::Serialize;

use super::domain::{LeaderboardEntry, OrganizationId, OrganizationProfile, SolutionEntry};
use super::snapshot::RankingSnapshot;

/// Where the public views fetch their records from.
pub trait RankingSource: Send + Sync {
    fn leaderboard(&self) -> Result<Vec<LeaderboardEntry>, SourceError>;
    fn solutions(&self) -> Result<Vec<SolutionEntry>, SourceError>;
    fn organizations(&self) -> Result<Vec<OrganizationProfile>, SourceError>;
    fn organization(&self, id: &OrganizationId)
        -> Result<Option<OrganizationProfile>, SourceError>;
}

#[derive(Debug, thiserror::Error)]
pub enum SourceError {
    /// No data yet; callers should show a loading state.
    #[error("rankings are still loading")]
    Warming,
    #[error("rankings unavailable: {0}")]
    Unavailable(String),
}

/// Loading / failed / ready tri-state the views render from.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "status", rename_all = "snake_case")]
pub enum FetchStatus<T> {
    Loading,
    Failed { error: String },
    Ready { data: T },
}

impl<T> From<Result<T, SourceError>> for FetchStatus<T> {
    fn from(result: Result<T, SourceError>) -> Self {
        match result {
            Ok(data) => Self::Ready { data },
            Err(SourceError::Warming) => Self::Loading,
            Err(err @ SourceError::Unavailable(_)) => Self::Failed {
                error: err.to_string(),
            },
        }
    }
}

#[derive(Debug, Default)]
enum Slot {
    #[default]
    Warming,
    Failed(String),
    Published(Arc<RankingSnapshot>),
}

/// Serves a published snapshot. Starts empty (warming) unless built with one.
#[derive(Debug, Default, Clone)]
pub struct SnapshotSource {
    slot: Arc<RwLock<Slot>>,
}

impl SnapshotSource {
    pub fn new(snapshot: RankingSnapshot) -> Self {
        let source = Self::default();
        source.publish(snapshot);
        source
    }

    /// Swap in a new snapshot. Readers holding the previous one keep it.
    pub fn publish(&self, snapshot: RankingSnapshot) {
        self.replace(Slot::Published(Arc::new(snapshot)));
    }

    /// Record that loading gave up; readers see `SourceError::Unavailable`.
    pub fn fail(&self, reason: impl Into<String>) {
        self.replace(Slot::Failed(reason.into()));
    }

    pub fn current(&self) -> Result<Arc<RankingSnapshot>, SourceError> {
        let guard = self
            .slot
            .read()
            .map_err(|_| SourceError::Unavailable("snapshot lock poisoned".to_string()))?;
        match &*guard {
            Slot::Warming => Err(SourceError::Warming),
            Slot::Failed(reason) => Err(SourceError::Unavailable(reason.clone())),
            Slot::Published(snapshot) => Ok(Arc::clone(snapshot)),
        }
    }

    fn replace(&self, slot: Slot) {
        let mut guard = match self.slot.write() {
            Ok(guard) => guard,
            Err(poisoned) => poisoned.into_inner(),
        };
        *guard = slot;
    }
}

impl RankingSource for SnapshotSource {
    fn leaderboard(&self) -> Result<Vec<LeaderboardEntry>, SourceError> {
        Ok(self.current()?.leaderboard.clone())
    }

    fn solutions(&self) -> Result<Vec<SolutionEntry>, SourceError> {
        Ok(self.current()?.solutions.clone())
    }

    fn organizations(&self) -> Result<Vec<OrganizationProfile>, SourceError> {
        Ok(self.current()?.organizations.clone())
    }

    fn organization(
        &self,
        id: &OrganizationId,
    ) -> Result<Option<OrganizationProfile>, SourceError> {
        Ok(self.current()?.organization(id).cloned())
    }
}
