use std::collections::HashSet;
use std::io::Read;
use std::path::Path;

use chrono::{Datelike, NaiveDate};
use serde::{Deserialize, Serialize};

use super::domain::{LeaderboardEntry, OrganizationId, OrganizationProfile, SolutionEntry};

/// Everything the public views read, as published on `as_of`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RankingSnapshot {
    pub as_of: NaiveDate,
    #[serde(default)]
    pub leaderboard: Vec<LeaderboardEntry>,
    #[serde(default)]
    pub solutions: Vec<SolutionEntry>,
    #[serde(default)]
    pub organizations: Vec<OrganizationProfile>,
}

#[derive(Debug, thiserror::Error)]
pub enum SnapshotError {
    #[error("failed to read snapshot: {0}")]
    Io(#[from] std::io::Error),
    #[error("snapshot is not valid JSON: {0}")]
    Json(#[from] serde_json::Error),
    #[error("leaderboard entry '{name}' has rank 0; ranks start at 1")]
    ZeroRank { name: String },
    #[error("rank {rank} is assigned to more than one leaderboard entry")]
    DuplicateRank { rank: u32 },
    #[error("organization '{id}' appears more than once")]
    DuplicateOrganization { id: OrganizationId },
    #[error("yearly trend for '{id}' is not in chronological order")]
    TrendOutOfOrder { id: OrganizationId },
    #[error("organization '{id}' claims to be founded in {year}, after the snapshot date")]
    FoundedAfterSnapshot { id: OrganizationId, year: i32 },
}

impl RankingSnapshot {
    pub fn from_path<P: AsRef<Path>>(path: P) -> Result<Self, SnapshotError> {
        let file = std::fs::File::open(path)?;
        Self::from_reader(file)
    }

    pub fn from_reader<R: Read>(reader: R) -> Result<Self, SnapshotError> {
        let snapshot: Self = serde_json::from_reader(reader)?;
        snapshot.validate()?;
        Ok(snapshot)
    }

    pub fn validate(&self) -> Result<(), SnapshotError> {
        validate_ranks(&self.leaderboard)?;

        let mut seen = HashSet::new();
        for profile in &self.organizations {
            if !seen.insert(&profile.id) {
                return Err(SnapshotError::DuplicateOrganization {
                    id: profile.id.clone(),
                });
            }
            if profile
                .yearly_trend
                .windows(2)
                .any(|pair| pair[0].year >= pair[1].year)
            {
                return Err(SnapshotError::TrendOutOfOrder {
                    id: profile.id.clone(),
                });
            }
            if let Some(year) = profile.founded.filter(|year| *year > self.as_of.year()) {
                return Err(SnapshotError::FoundedAfterSnapshot {
                    id: profile.id.clone(),
                    year,
                });
            }
        }
        Ok(())
    }

    /// Replace the leaderboard, e.g. with a CSV import.
    pub fn with_leaderboard(
        mut self,
        leaderboard: Vec<LeaderboardEntry>,
    ) -> Result<Self, SnapshotError> {
        validate_ranks(&leaderboard)?;
        self.leaderboard = leaderboard;
        Ok(self)
    }

    pub fn organization(&self, id: &OrganizationId) -> Option<&OrganizationProfile> {
        self.organizations.iter().find(|profile| &profile.id == id)
    }
}

fn validate_ranks(entries: &[LeaderboardEntry]) -> Result<(), SnapshotError> {
    let mut ranks = HashSet::new();
    for entry in entries {
        if entry.rank == 0 {
            return Err(SnapshotError::ZeroRank {
                name: entry.name.clone(),
            });
        }
        if !ranks.insert(entry.rank) {
            return Err(SnapshotError::DuplicateRank { rank: entry.rank });
        }
    }
    Ok(())
}
