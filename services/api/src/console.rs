use crate::cli::{DataArgs, ExplainArgs, LeaderboardArgs, SolutionArgs};
use crate::infra::load_snapshot;
use impact_rank::config::{AppConfig, DataConfig};
use impact_rank::display::{DisplayContext, Language};
use impact_rank::error::AppError;
use impact_rank::rankings::views::{LeaderboardView, SolutionsView};
use impact_rank::rankings::{
    ExplanationContent, ExplanationDirectory, FilterCriteria, LeaderboardSort, RankingService,
    SnapshotSource, SolutionSort, SourceError,
};
use serde::Serialize;
use std::sync::Arc;

pub(crate) fn run_leaderboard(args: LeaderboardArgs) -> Result<(), AppError> {
    let (service, display) = load_service(&args.data)?;

    let mut params = args.filters.params();
    params.organization_size = args.size.clone();
    let criteria = FilterCriteria::from(&params);
    let sort = args
        .sort
        .as_deref()
        .and_then(LeaderboardSort::parse)
        .unwrap_or_default();

    let view = service.leaderboard(&criteria, sort, display)?;
    if args.data.json {
        return print_json(&view);
    }
    for line in leaderboard_lines(&view) {
        println!("{line}");
    }
    Ok(())
}

pub(crate) fn run_solutions(args: SolutionArgs) -> Result<(), AppError> {
    let (service, display) = load_service(&args.data)?;

    let mut params = args.filters.params();
    params.business_type = args.business_type.clone();
    params.demographic = args.demographic.clone();
    let criteria = FilterCriteria::from(&params);
    let sort = args
        .sort
        .as_deref()
        .and_then(SolutionSort::parse)
        .unwrap_or_default();

    let view = service.solutions(&criteria, sort, display)?;
    if args.data.json {
        return print_json(&view);
    }
    for line in solution_lines(&view) {
        println!("{line}");
    }
    Ok(())
}

pub(crate) fn run_explain(args: ExplainArgs) -> Result<(), AppError> {
    let directory = ExplanationDirectory::standard();
    match directory.lookup(&args.metric) {
        Some(content) => {
            for line in explanation_lines(&content) {
                println!("{line}");
            }
        }
        None => {
            println!("No explanation for '{}'. Known metrics:", args.metric);
            for metric in directory.metrics() {
                println!("  - {}", metric.key());
            }
        }
    }
    Ok(())
}

fn load_service(
    args: &DataArgs,
) -> Result<(RankingService<SnapshotSource>, DisplayContext), AppError> {
    let config = AppConfig::load()?;
    let data = DataConfig {
        snapshot_path: args.snapshot.clone().or(config.data.snapshot_path),
        leaderboard_csv: args.leaderboard_csv.clone().or(config.data.leaderboard_csv),
    };

    let loaded = load_snapshot(&data, config.environment)?.ok_or_else(|| {
        SourceError::Unavailable("pass --snapshot or set APP_SNAPSHOT_PATH".to_string())
    })?;
    let service = RankingService::new(
        Arc::new(SnapshotSource::new(loaded.snapshot)),
        config.grading,
    );
    let display = DisplayContext {
        language: Language::parse(&args.lang).unwrap_or_default(),
        ..DisplayContext::default()
    };
    Ok((service, display))
}

fn print_json<T: Serialize>(value: &T) -> Result<(), AppError> {
    println!("{}", serde_json::to_string_pretty(value)?);
    Ok(())
}

fn leaderboard_lines(view: &LeaderboardView) -> Vec<String> {
    let mut lines = vec![format!(
        "Leaderboard: {} of {} organizations",
        view.matched, view.total
    )];
    for row in &view.entries {
        let entry = &row.entry;
        lines.push(format!(
            "{:>3}. {} [{}] score {:.1} | {:+.1}% | ROI {:.1}x | {} | {} | {}",
            entry.rank,
            entry.name,
            entry.impact_grade,
            entry.impact_score.value(),
            entry.yearly_change,
            entry.social_roi,
            row.sector_label,
            row.region_label,
            entry.verification.label(),
        ));
    }
    lines
}

fn solution_lines(view: &SolutionsView) -> Vec<String> {
    let mut lines = vec![format!(
        "Solutions: {} of {} programs",
        view.matched, view.total
    )];
    for row in &view.entries {
        let entry = &row.entry;
        lines.push(format!(
            "- {} by {} [{}] effectiveness {:.0}% | {} reached | {} | {}",
            entry.name,
            entry.organization_name,
            entry.impact_grade,
            entry.effectiveness.value(),
            entry.people_reached,
            row.sector_label,
            row.business_type_label,
        ));
    }
    lines
}

fn explanation_lines(content: &ExplanationContent) -> Vec<String> {
    match content {
        ExplanationContent::Plain { text } => vec![text.clone()],
        ExplanationContent::Breakdown { title, fields } => {
            let mut lines = vec![title.clone()];
            lines.extend(fields.iter().map(|field| {
                if field.label.is_empty() {
                    format!("  {}", field.text)
                } else {
                    format!("  {}: {}", field.label, field.text)
                }
            }));
            lines
        }
    }
}
