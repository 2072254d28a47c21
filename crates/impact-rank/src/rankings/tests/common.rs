use std::collections::BTreeSet;
use std::sync::Arc;

use axum::http::StatusCode;
use axum::response::Response;
use chrono::NaiveDate;
use serde_json::Value;

use crate::rankings::catalog::{BusinessType, OrganizationSize, Region, Sdg, Sector};
use crate::rankings::domain::{
    ImpactGrade, LeaderboardEntry, MetricBreakdown, OrganizationId, OrganizationProfile,
    OrganizationStats, ProgramHighlight, ScorePercent, SolutionEntry, SolutionId, SubScore,
    TrendPoint, VerificationType,
};
use crate::rankings::grade::GradeScale;
use crate::rankings::service::RankingService;
use crate::rankings::snapshot::RankingSnapshot;
use crate::rankings::source::{RankingSource, SnapshotSource, SourceError};

pub(super) fn score(value: f32) -> ScorePercent {
    ScorePercent::new(value).expect("valid score")
}

fn sub(value: f32) -> SubScore {
    SubScore::new(value).expect("valid sub-score")
}

pub(super) fn entry(
    rank: u32,
    name: &str,
    sector: Sector,
    region: Region,
    impact_score: f32,
) -> LeaderboardEntry {
    LeaderboardEntry {
        id: OrganizationId(name.to_lowercase().replace(' ', "-")),
        rank,
        name: name.to_string(),
        sector,
        logo: None,
        impact_score: score(impact_score),
        yearly_change: 0.0,
        social_roi: 1.0,
        region,
        impact_grade: GradeScale::default().grade_for(score(impact_score)),
        verification: VerificationType::Verified,
        organization_size: None,
    }
}

pub(super) fn leaderboard() -> Vec<LeaderboardEntry> {
    let mut food_bank = entry(1, "Harvest Food Bank", Sector::FoodSecurity, Region::NorthAmerica, 94.0);
    food_bank.yearly_change = 4.5;
    food_bank.social_roi = 6.1;
    food_bank.organization_size = Some(OrganizationSize::Large);

    let mut literacy = entry(2, "Open Books Literacy", Sector::Education, Region::Africa, 91.0);
    literacy.yearly_change = 12.0;
    literacy.social_roi = 4.4;
    literacy.organization_size = Some(OrganizationSize::Small);

    let mut shelter = entry(3, "Safe Harbor Housing", Sector::Housing, Region::NorthAmerica, 88.0);
    shelter.yearly_change = -2.0;
    shelter.social_roi = 3.2;

    let mut clinics = entry(4, "Rural Clinics Network", Sector::Health, Region::SouthAsia, 88.0);
    clinics.yearly_change = 7.5;
    clinics.social_roi = 8.0;
    clinics.organization_size = Some(OrganizationSize::Medium);

    let mut tutors = entry(5, "Tutors Without Borders", Sector::Education, Region::Global, 79.0);
    tutors.yearly_change = 1.0;
    tutors.social_roi = 2.5;
    tutors.organization_size = Some(OrganizationSize::Large);

    vec![food_bank, literacy, shelter, clinics, tutors]
}

pub(super) fn solution(
    id: &str,
    name: &str,
    organization_name: &str,
    sector: Sector,
    business_type: BusinessType,
    effectiveness: f32,
    people_reached: u64,
) -> SolutionEntry {
    SolutionEntry {
        id: SolutionId(id.to_string()),
        name: name.to_string(),
        organization_name: organization_name.to_string(),
        icon: "sprout".to_string(),
        sector,
        business_type,
        region: Region::Global,
        description: format!("{name} delivered by {organization_name}."),
        people_reached,
        social_roi: 3.0,
        impact_grade: ImpactGrade::B,
        verification: VerificationType::SelfReported,
        effectiveness: score(effectiveness),
        tags: BTreeSet::new(),
    }
}

pub(super) fn solutions() -> Vec<SolutionEntry> {
    let mut filters = solution(
        "sol-1",
        "Solar Water Filters",
        "Clear Springs Cooperative",
        Sector::Health,
        BusinessType::Cooperative,
        82.0,
        120_000,
    );
    filters.description =
        "Low-cost filtration for rural households: no electricity required.".to_string();
    filters.region = Region::Africa;

    let meals = solution(
        "sol-2",
        "School Meals Program",
        "Harvest Food Bank",
        Sector::FoodSecurity,
        BusinessType::Nonprofit,
        91.0,
        45_000,
    );

    let mut microloans = solution(
        "sol-3",
        "Village Microloans",
        "Open Ledger",
        Sector::EconomicDevelopment,
        BusinessType::SocialEnterprise,
        76.0,
        300_000,
    );
    microloans.region = Region::SouthAsia;

    vec![filters, meals, microloans]
}

pub(super) fn profile(id: &str, name: &str, impact_score: f32, grade: ImpactGrade) -> OrganizationProfile {
    OrganizationProfile {
        id: OrganizationId(id.to_string()),
        name: name.to_string(),
        logo: None,
        mission: "End hunger in every neighborhood we serve.".to_string(),
        sector: Sector::FoodSecurity,
        region: Region::NorthAmerica,
        founded: Some(1998),
        impact_score: score(impact_score),
        impact_grade: grade,
        verification: VerificationType::Audited,
        yearly_change: 4.5,
        sdg_alignment: [Sdg::NoPoverty, Sdg::ZeroHunger].into_iter().collect(),
        metrics: MetricBreakdown {
            reporting_quality: sub(19.0),
            reach: sub(18.0),
            social_roi: 6.1,
            outcome_effectiveness: sub(15.0),
            transparency_governance: sub(20.0),
        },
        stats: OrganizationStats {
            people_reached: "1.2M".to_string(),
            annual_funding: "$48M".to_string(),
            active_programs: "14".to_string(),
        },
        yearly_trend: vec![
            TrendPoint {
                year: 2022,
                score: score(88.0),
            },
            TrendPoint {
                year: 2023,
                score: score(90.0),
            },
            TrendPoint {
                year: 2024,
                score: score(impact_score),
            },
        ],
        top_programs: vec![ProgramHighlight {
            name: "School Meals Program".to_string(),
            people_reached: 45_000,
            social_roi: 5.0,
            impact_grade: ImpactGrade::A,
        }],
        organization_size: Some(OrganizationSize::Large),
    }
}

pub(super) fn snapshot() -> RankingSnapshot {
    RankingSnapshot {
        as_of: NaiveDate::from_ymd_opt(2025, 1, 15).expect("valid date"),
        leaderboard: leaderboard(),
        solutions: solutions(),
        organizations: vec![profile("harvest-food-bank", "Harvest Food Bank", 94.0, ImpactGrade::A)],
    }
}

pub(super) fn build_service() -> Arc<RankingService<SnapshotSource>> {
    Arc::new(RankingService::new(
        Arc::new(SnapshotSource::new(snapshot())),
        GradeScale::default(),
    ))
}

/// Source that always reports an outage.
pub(super) struct UnavailableSource;

impl RankingSource for UnavailableSource {
    fn leaderboard(&self) -> Result<Vec<LeaderboardEntry>, SourceError> {
        Err(SourceError::Unavailable("upstream timeout".to_string()))
    }

    fn solutions(&self) -> Result<Vec<SolutionEntry>, SourceError> {
        Err(SourceError::Unavailable("upstream timeout".to_string()))
    }

    fn organizations(&self) -> Result<Vec<OrganizationProfile>, SourceError> {
        Err(SourceError::Unavailable("upstream timeout".to_string()))
    }

    fn organization(
        &self,
        _id: &OrganizationId,
    ) -> Result<Option<OrganizationProfile>, SourceError> {
        Err(SourceError::Unavailable("upstream timeout".to_string()))
    }
}

pub(super) async fn json_body(response: Response) -> (StatusCode, Value) {
    let status = response.status();
    let bytes = axum::body::to_bytes(response.into_body(), usize::MAX)
        .await
        .expect("body collected");
    let value = serde_json::from_slice(&bytes).expect("json body");
    (status, value)
}
