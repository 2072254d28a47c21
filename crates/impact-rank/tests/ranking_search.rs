use std::sync::Arc;

use impact_rank::display::{DisplayContext, Language, Localizer, StaticLocalizer};
use impact_rank::rankings::{
    filter, FetchStatus, FilterCriteria, FilterParams, GradeScale, ImpactGrade, LeaderboardSort,
    OrganizationId, RankingService, RankingSnapshot, Region, ScorePercent, SnapshotSource,
    SolutionSort,
};

const SNAPSHOT: &str = r#"{
  "as_of": "2025-03-01",
  "leaderboard": [
    {"id": "clean-rivers", "rank": 1, "name": "Clean Rivers Trust", "sector": "environment",
     "impact_score": 95.0, "yearly_change": 2.5, "social_roi": 5.0, "region": "europe",
     "impact_grade": "A", "verification": "audited", "organization_size": "large"},
    {"id": "first-steps", "rank": 2, "name": "First Steps Learning", "sector": "education",
     "impact_score": 89.0, "yearly_change": 6.0, "social_roi": 4.1, "region": "africa",
     "impact_grade": "B+", "verification": "verified", "organization_size": "small"},
    {"id": "river-schools", "rank": 3, "name": "River Schools", "sector": "education",
     "impact_score": 71.0, "yearly_change": -4.0, "social_roi": 2.0, "region": "europe",
     "impact_grade": "C-", "verification": "self_reported"}
  ],
  "solutions": [
    {"id": "s1", "name": "Wetland Restoration", "organization_name": "Clean Rivers Trust",
     "icon": "leaf", "sector": "environment", "business_type": "foundation", "region": "europe",
     "description": "Restores floodplain wetlands with volunteer crews.", "people_reached": 9000,
     "social_roi": 5.0, "impact_grade": "A", "verification": "audited", "effectiveness": 88.0},
    {"id": "s2", "name": "Mobile Classrooms", "organization_name": "First Steps Learning",
     "icon": "bus", "sector": "education", "business_type": "nonprofit", "region": "africa",
     "description": "Buses converted into classrooms for river communities.", "people_reached": 15000,
     "social_roi": 4.1, "impact_grade": "B+", "verification": "verified", "effectiveness": 90.0}
  ],
  "organizations": [
    {"id": "clean-rivers", "name": "Clean Rivers Trust", "mission": "Swimmable rivers in every city.",
     "sector": "environment", "region": "europe", "founded": 1990, "impact_score": 95.0,
     "impact_grade": "A", "verification": "audited", "yearly_change": 2.5,
     "sdg_alignment": ["clean_water", "life_below_water"],
     "metrics": {"reporting_quality": 19.0, "reach": 18.0, "social_roi": 5.0,
                 "outcome_effectiveness": 19.0, "transparency_governance": 19.0},
     "stats": {"people_reached": "2M", "annual_funding": "$12M", "active_programs": "9"},
     "yearly_trend": [{"year": 2023, "score": 93.0}, {"year": 2024, "score": 95.0}]}
  ]
}"#;

fn service() -> RankingService<SnapshotSource> {
    let snapshot = RankingSnapshot::from_reader(SNAPSHOT.as_bytes()).expect("valid snapshot");
    RankingService::new(Arc::new(SnapshotSource::new(snapshot)), GradeScale::default())
}

fn parsed(params: FilterParams) -> FilterCriteria {
    FilterCriteria::from(&params)
}

#[test]
fn query_string_filters_narrow_the_leaderboard() {
    let service = service();
    let criteria = parsed(FilterParams {
        query: Some("river".to_string()),
        region: Some("Europe".to_string()),
        ..FilterParams::default()
    });

    let view = service
        .leaderboard(&criteria, LeaderboardSort::Rank, DisplayContext::default())
        .expect("snapshot published");
    let names: Vec<&str> = view.entries.iter().map(|row| row.entry.name.as_str()).collect();
    assert_eq!(names, vec!["Clean Rivers Trust", "River Schools"]);
    assert_eq!(view.total, 3);
}

#[test]
fn solution_search_reaches_descriptions_and_sorts_after_filtering() {
    let service = service();
    let criteria = FilterCriteria::default().query("BUSES");

    let view = service
        .solutions(&criteria, SolutionSort::Effectiveness, DisplayContext::default())
        .expect("snapshot published");
    assert_eq!(view.matched, 1);
    assert_eq!(view.entries[0].entry.name, "Mobile Classrooms");

    let view = service
        .solutions(&FilterCriteria::default(), SolutionSort::SocialRoi, DisplayContext::default())
        .expect("snapshot published");
    assert_eq!(view.entries[0].entry.name, "Wetland Restoration");
}

#[test]
fn profile_view_is_localized_and_checks_its_grade() {
    let service = service();
    let display = DisplayContext {
        language: Language::Spanish,
        ..DisplayContext::default()
    };

    let view = service
        .organization(&OrganizationId("clean-rivers".to_string()), display)
        .expect("snapshot published")
        .expect("profile exists");
    assert!(view.grade_consistent);
    assert_eq!(view.sdg_labels.len(), 2);
    assert_eq!(view.region_label, "Europa");
    assert_eq!(view.metric_bars.len(), 4);
}

#[test]
fn filter_helper_works_on_plain_slices() {
    let snapshot = RankingSnapshot::from_reader(SNAPSHOT.as_bytes()).expect("valid snapshot");
    let criteria = FilterCriteria::default().region(Region::Africa);
    let matched = filter(&snapshot.leaderboard, &criteria);
    assert_eq!(matched.len(), 1);
    assert_eq!(matched[0].rank, 2);
}

#[test]
fn stricter_scale_flags_recorded_grades() {
    let snapshot = RankingSnapshot::from_reader(SNAPSHOT.as_bytes()).expect("valid snapshot");
    let strict = GradeScale::parse("99,97,95,92,90,87,84,80,75,65").expect("valid thresholds");
    assert_eq!(
        strict.grade_for(ScorePercent::new(95.0).expect("in range")),
        ImpactGrade::AMinus
    );

    let service = RankingService::new(Arc::new(SnapshotSource::new(snapshot)), strict);
    let mismatches = service.audit_grades().expect("snapshot published");
    assert!(mismatches
        .iter()
        .any(|mismatch| mismatch.name == "Clean Rivers Trust"
            && mismatch.expected == ImpactGrade::AMinus));
}

#[test]
fn warming_source_renders_loading_state() {
    let service = RankingService::new(Arc::new(SnapshotSource::default()), GradeScale::default());
    let status = FetchStatus::from(
        service
            .leaderboard(&FilterCriteria::default(), LeaderboardSort::Rank, DisplayContext::default())
            .map(|view| view.matched),
    );
    assert_eq!(status, FetchStatus::Loading);
}

#[test]
fn static_localizer_falls_back_to_english_keys() {
    let localizer = StaticLocalizer::default();
    assert_eq!(
        localizer.translate("region.europe", Language::Spanish).as_deref(),
        Some("Europa")
    );
    assert_eq!(localizer.translate("region.europe", Language::English), None);
}
