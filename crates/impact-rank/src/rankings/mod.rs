//! Public impact rankings: option catalogs, graded records, faceted search,
//! and metric explanations behind the leaderboard, solution finder, and
//! organization profile views.

pub mod catalog;
pub mod domain;
pub mod explain;
pub mod filter;
pub mod grade;
pub mod import;
pub mod router;
pub mod service;
pub mod snapshot;
pub mod source;
pub mod views;

#[cfg(test)]
mod tests;

pub use catalog::{
    BusinessType, CatalogOption, Demographic, OrganizationSize, Region, Sdg, Sector,
};
pub use domain::{
    ImpactGrade, LeaderboardEntry, MetricBreakdown, OrganizationId, OrganizationProfile,
    OrganizationStats, ProgramHighlight, ScorePercent, SolutionEntry, SolutionId, SubScore,
    TrendPoint, VerificationType,
};
pub use explain::{ExplanationContent, ExplanationDirectory, ExplanationField, MetricId};
pub use filter::{
    filter, Criterion, FilterCriteria, FilterParams, Filterable, LeaderboardSort, SolutionSort,
};
pub use grade::{GradeScale, GradeScaleError};
pub use import::{LeaderboardCsvImporter, LeaderboardImportError};
pub use router::ranking_router;
pub use service::RankingService;
pub use snapshot::{RankingSnapshot, SnapshotError};
pub use source::{FetchStatus, RankingSource, SnapshotSource, SourceError};
