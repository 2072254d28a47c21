use std::collections::BTreeSet;
use std::fmt;

use serde::{Deserialize, Serialize};

use super::catalog::{BusinessType, OrganizationSize, Region, Sdg, Sector};

/// Identifier wrapper for ranked organizations.
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct OrganizationId(pub String);

impl fmt::Display for OrganizationId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// Identifier wrapper for solution finder entries.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct SolutionId(pub String);

/// A value outside the bounds of a score newtype.
#[derive(Debug, Clone, Copy, PartialEq, thiserror::Error)]
#[error("score {value} is outside 0..={max}")]
pub struct ScoreError {
    pub value: f32,
    pub max: f32,
}

/// Normalized composite score on a 0–100 scale.
#[derive(Debug, Clone, Copy, PartialEq, PartialOrd, Serialize, Deserialize)]
#[serde(try_from = "f32", into = "f32")]
pub struct ScorePercent(f32);

impl ScorePercent {
    pub const MAX: f32 = 100.0;

    pub fn new(value: f32) -> Result<Self, ScoreError> {
        bounded(value, Self::MAX).map(Self)
    }

    pub fn value(self) -> f32 {
        self.0
    }
}

impl TryFrom<f32> for ScorePercent {
    type Error = ScoreError;

    fn try_from(value: f32) -> Result<Self, Self::Error> {
        Self::new(value)
    }
}

impl From<ScorePercent> for f32 {
    fn from(score: ScorePercent) -> Self {
        score.0
    }
}

/// One component of the impact score, bounded to 0–20.
#[derive(Debug, Clone, Copy, PartialEq, PartialOrd, Serialize, Deserialize)]
#[serde(try_from = "f32", into = "f32")]
pub struct SubScore(f32);

impl SubScore {
    pub const MAX: f32 = 20.0;

    pub fn new(value: f32) -> Result<Self, ScoreError> {
        bounded(value, Self::MAX).map(Self)
    }

    pub fn value(self) -> f32 {
        self.0
    }

    /// Fill ratio for progress bars, 0–100.
    pub fn percent(self) -> f32 {
        self.0 / Self::MAX * 100.0
    }
}

impl TryFrom<f32> for SubScore {
    type Error = ScoreError;

    fn try_from(value: f32) -> Result<Self, Self::Error> {
        Self::new(value)
    }
}

impl From<SubScore> for f32 {
    fn from(score: SubScore) -> Self {
        score.0
    }
}

fn bounded(value: f32, max: f32) -> Result<f32, ScoreError> {
    if value.is_finite() && (0.0..=max).contains(&value) {
        Ok(value)
    } else {
        Err(ScoreError { value, max })
    }
}

/// Letter projection of the impact score. Declared worst-first so that
/// `Ord` reads as "better than".
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub enum ImpactGrade {
    #[serde(rename = "F")]
    F,
    #[serde(rename = "D")]
    D,
    #[serde(rename = "C-")]
    CMinus,
    #[serde(rename = "C")]
    C,
    #[serde(rename = "C+")]
    CPlus,
    #[serde(rename = "B-")]
    BMinus,
    #[serde(rename = "B")]
    B,
    #[serde(rename = "B+")]
    BPlus,
    #[serde(rename = "A-")]
    AMinus,
    #[serde(rename = "A")]
    A,
    #[serde(rename = "A+")]
    APlus,
}

impl ImpactGrade {
    /// Best grade first.
    pub const fn ordered() -> [Self; 11] {
        [
            Self::APlus,
            Self::A,
            Self::AMinus,
            Self::BPlus,
            Self::B,
            Self::BMinus,
            Self::CPlus,
            Self::C,
            Self::CMinus,
            Self::D,
            Self::F,
        ]
    }

    pub const fn label(self) -> &'static str {
        match self {
            Self::APlus => "A+",
            Self::A => "A",
            Self::AMinus => "A-",
            Self::BPlus => "B+",
            Self::B => "B",
            Self::BMinus => "B-",
            Self::CPlus => "C+",
            Self::C => "C",
            Self::CMinus => "C-",
            Self::D => "D",
            Self::F => "F",
        }
    }

    pub fn parse(raw: &str) -> Option<Self> {
        let wanted = raw.trim().to_ascii_uppercase();
        Self::ordered()
            .into_iter()
            .find(|grade| grade.label() == wanted)
    }
}

impl fmt::Display for ImpactGrade {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

/// Trust tier of reported data, least trusted first.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum VerificationType {
    SelfReported,
    Verified,
    Audited,
}

impl VerificationType {
    pub const fn ordered() -> [Self; 3] {
        [Self::SelfReported, Self::Verified, Self::Audited]
    }

    pub const fn slug(self) -> &'static str {
        match self {
            Self::SelfReported => "self_reported",
            Self::Verified => "verified",
            Self::Audited => "audited",
        }
    }

    pub const fn label(self) -> &'static str {
        match self {
            Self::SelfReported => "Self-Reported",
            Self::Verified => "Verified",
            Self::Audited => "Audited",
        }
    }

    pub fn parse(raw: &str) -> Option<Self> {
        match raw.trim().to_ascii_lowercase().replace(['-', ' '], "_").as_str() {
            "self_reported" => Some(Self::SelfReported),
            "verified" => Some(Self::Verified),
            "audited" => Some(Self::Audited),
            _ => None,
        }
    }
}

/// One row of the public leaderboard.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LeaderboardEntry {
    pub id: OrganizationId,
    pub rank: u32,
    pub name: String,
    pub sector: Sector,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub logo: Option<String>,
    pub impact_score: ScorePercent,
    pub yearly_change: f32,
    pub social_roi: f32,
    pub region: Region,
    pub impact_grade: ImpactGrade,
    pub verification: VerificationType,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub organization_size: Option<OrganizationSize>,
}

/// A program or product listed in the solution finder.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SolutionEntry {
    pub id: SolutionId,
    pub name: String,
    pub organization_name: String,
    pub icon: String,
    pub sector: Sector,
    pub business_type: BusinessType,
    pub region: Region,
    pub description: String,
    pub people_reached: u64,
    pub social_roi: f32,
    pub impact_grade: ImpactGrade,
    pub verification: VerificationType,
    pub effectiveness: ScorePercent,
    #[serde(default)]
    pub tags: BTreeSet<String>,
}

/// Sub-metric breakdown behind the impact score.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct MetricBreakdown {
    pub reporting_quality: SubScore,
    pub reach: SubScore,
    pub social_roi: f32,
    pub outcome_effectiveness: SubScore,
    pub transparency_governance: SubScore,
}

/// Pre-formatted headline numbers shown on a profile.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct OrganizationStats {
    pub people_reached: String,
    pub annual_funding: String,
    pub active_programs: String,
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct TrendPoint {
    pub year: i32,
    pub score: ScorePercent,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ProgramHighlight {
    pub name: String,
    pub people_reached: u64,
    pub social_roi: f32,
    pub impact_grade: ImpactGrade,
}

/// Full organization profile.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct OrganizationProfile {
    pub id: OrganizationId,
    pub name: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub logo: Option<String>,
    pub mission: String,
    pub sector: Sector,
    pub region: Region,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub founded: Option<i32>,
    pub impact_score: ScorePercent,
    pub impact_grade: ImpactGrade,
    pub verification: VerificationType,
    pub yearly_change: f32,
    #[serde(default)]
    pub sdg_alignment: BTreeSet<Sdg>,
    pub metrics: MetricBreakdown,
    pub stats: OrganizationStats,
    /// Chronological.
    #[serde(default)]
    pub yearly_trend: Vec<TrendPoint>,
    #[serde(default)]
    pub top_programs: Vec<ProgramHighlight>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub organization_size: Option<OrganizationSize>,
}

/// Record kinds that carry a graded impact score.
pub trait Graded {
    fn impact_score(&self) -> ScorePercent;
    fn impact_grade(&self) -> ImpactGrade;
    fn display_name(&self) -> &str;
}

impl Graded for LeaderboardEntry {
    fn impact_score(&self) -> ScorePercent {
        self.impact_score
    }

    fn impact_grade(&self) -> ImpactGrade {
        self.impact_grade
    }

    fn display_name(&self) -> &str {
        &self.name
    }
}

impl Graded for OrganizationProfile {
    fn impact_score(&self) -> ScorePercent {
        self.impact_score
    }

    fn impact_grade(&self) -> ImpactGrade {
        self.impact_grade
    }

    fn display_name(&self) -> &str {
        &self.name
    }
}
