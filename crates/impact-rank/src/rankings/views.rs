use serde::Serialize;

use super::domain::{
    ImpactGrade, LeaderboardEntry, OrganizationId, OrganizationProfile, ScorePercent,
    SolutionEntry,
};
use super::explain::MetricId;
use super::grade::GradeBand;
use crate::display::DisplayContext;

/// Navigable path of an organization profile page.
pub fn profile_path(id: &OrganizationId) -> String {
    format!("/organizations/{}", id.0)
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct OptionView {
    pub value: &'static str,
    pub label: String,
}

#[derive(Debug, Clone, Serialize)]
pub struct CatalogsView {
    pub display: DisplayContext,
    pub sectors: Vec<OptionView>,
    pub regions: Vec<OptionView>,
    pub sdgs: Vec<OptionView>,
    pub demographics: Vec<OptionView>,
    pub business_types: Vec<OptionView>,
    pub organization_sizes: Vec<OptionView>,
    pub verification: Vec<OptionView>,
    pub grades: Vec<GradeBand>,
}

#[derive(Debug, Clone, Serialize)]
pub struct LeaderboardRowView {
    #[serde(flatten)]
    pub entry: LeaderboardEntry,
    pub sector_label: String,
    pub region_label: String,
    pub profile_path: String,
}

#[derive(Debug, Clone, Serialize)]
pub struct LeaderboardView {
    pub display: DisplayContext,
    pub total: usize,
    pub matched: usize,
    pub entries: Vec<LeaderboardRowView>,
}

#[derive(Debug, Clone, Serialize)]
pub struct SolutionRowView {
    #[serde(flatten)]
    pub entry: SolutionEntry,
    pub sector_label: String,
    pub region_label: String,
    pub business_type_label: String,
}

#[derive(Debug, Clone, Serialize)]
pub struct SolutionsView {
    pub display: DisplayContext,
    pub total: usize,
    pub matched: usize,
    pub entries: Vec<SolutionRowView>,
}

/// Compact profile listing used by organization search.
#[derive(Debug, Clone, Serialize)]
pub struct OrganizationCardView {
    pub id: OrganizationId,
    pub name: String,
    pub sector_label: String,
    pub region_label: String,
    pub impact_score: ScorePercent,
    pub impact_grade: ImpactGrade,
    pub profile_path: String,
}

/// One sub-metric progress bar.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct MetricBarView {
    pub metric: MetricId,
    pub score: f32,
    pub max: f32,
    pub percent: f32,
}

#[derive(Debug, Clone, Serialize)]
pub struct OrganizationView {
    pub display: DisplayContext,
    #[serde(flatten)]
    pub profile: OrganizationProfile,
    pub sector_label: String,
    pub region_label: String,
    pub sdg_labels: Vec<OptionView>,
    pub metric_bars: Vec<MetricBarView>,
    /// Whether the stored grade agrees with the configured grade scale.
    pub grade_consistent: bool,
}

/// A record whose stored grade disagrees with the grade scale.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct GradeMismatchView {
    pub name: String,
    pub score: ScorePercent,
    pub recorded: ImpactGrade,
    pub expected: ImpactGrade,
}
