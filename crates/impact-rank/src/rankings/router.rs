use std::sync::Arc;

use axum::{
    extract::{Path, Query, State},
    http::StatusCode,
    response::{IntoResponse, Response},
    routing::get,
    Router,
};
use serde::{Deserialize, Serialize};
use serde_json::json;

use super::domain::OrganizationId;
use super::filter::{FilterCriteria, FilterParams, LeaderboardSort, SolutionSort};
use super::service::RankingService;
use super::source::{FetchStatus, RankingSource, SourceError};
use crate::display::{DisplayContext, DisplayParams};

/// Router builder exposing the public ranking endpoints.
pub fn ranking_router<S>(service: Arc<RankingService<S>>) -> Router
where
    S: RankingSource + 'static,
{
    Router::new()
        .route("/api/v1/catalogs", get(catalogs_handler::<S>))
        .route("/api/v1/grades", get(grades_handler::<S>))
        .route("/api/v1/leaderboard", get(leaderboard_handler::<S>))
        .route("/api/v1/solutions", get(solutions_handler::<S>))
        .route("/api/v1/organizations", get(organizations_handler::<S>))
        .route(
            "/api/v1/organizations/:organization_id",
            get(organization_handler::<S>),
        )
        .route("/api/v1/metrics/:metric_id", get(metric_handler::<S>))
        .with_state(service)
}

/// `?sort=`; unknown values fall back to the default order.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct SortParams {
    #[serde(default)]
    pub sort: Option<String>,
}

/// Render a fetch result as the loading / failed / ready tri-state.
fn fetch_response<T: Serialize>(result: Result<T, SourceError>) -> Response {
    let status = FetchStatus::from(result);
    let code = match &status {
        FetchStatus::Ready { .. } => StatusCode::OK,
        FetchStatus::Loading => StatusCode::ACCEPTED,
        FetchStatus::Failed { .. } => StatusCode::SERVICE_UNAVAILABLE,
    };
    (code, axum::Json(status)).into_response()
}

pub(crate) async fn catalogs_handler<S>(
    State(service): State<Arc<RankingService<S>>>,
    Query(display): Query<DisplayParams>,
) -> Response
where
    S: RankingSource + 'static,
{
    let view = service.catalogs(DisplayContext::from(&display));
    (StatusCode::OK, axum::Json(view)).into_response()
}

pub(crate) async fn grades_handler<S>(State(service): State<Arc<RankingService<S>>>) -> Response
where
    S: RankingSource + 'static,
{
    let bands = service.grading().bands();
    (StatusCode::OK, axum::Json(json!({ "grades": bands }))).into_response()
}

pub(crate) async fn leaderboard_handler<S>(
    State(service): State<Arc<RankingService<S>>>,
    Query(filters): Query<FilterParams>,
    Query(sort): Query<SortParams>,
    Query(display): Query<DisplayParams>,
) -> Response
where
    S: RankingSource + 'static,
{
    let criteria = FilterCriteria::from(&filters);
    let sort = sort
        .sort
        .as_deref()
        .and_then(LeaderboardSort::parse)
        .unwrap_or_default();
    fetch_response(service.leaderboard(&criteria, sort, DisplayContext::from(&display)))
}

pub(crate) async fn solutions_handler<S>(
    State(service): State<Arc<RankingService<S>>>,
    Query(filters): Query<FilterParams>,
    Query(sort): Query<SortParams>,
    Query(display): Query<DisplayParams>,
) -> Response
where
    S: RankingSource + 'static,
{
    let criteria = FilterCriteria::from(&filters);
    let sort = sort
        .sort
        .as_deref()
        .and_then(SolutionSort::parse)
        .unwrap_or_default();
    fetch_response(service.solutions(&criteria, sort, DisplayContext::from(&display)))
}

pub(crate) async fn organizations_handler<S>(
    State(service): State<Arc<RankingService<S>>>,
    Query(filters): Query<FilterParams>,
    Query(display): Query<DisplayParams>,
) -> Response
where
    S: RankingSource + 'static,
{
    let criteria = FilterCriteria::from(&filters);
    fetch_response(service.organizations(&criteria, DisplayContext::from(&display)))
}

pub(crate) async fn organization_handler<S>(
    State(service): State<Arc<RankingService<S>>>,
    Path(organization_id): Path<String>,
    Query(display): Query<DisplayParams>,
) -> Response
where
    S: RankingSource + 'static,
{
    let id = OrganizationId(organization_id);
    match service.organization(&id, DisplayContext::from(&display)) {
        Ok(Some(view)) => fetch_response(Ok::<_, SourceError>(view)),
        Ok(None) => {
            let payload = json!({
                "error": "organization not found",
                "organization_id": id.0,
            });
            (StatusCode::NOT_FOUND, axum::Json(payload)).into_response()
        }
        Err(err) => fetch_response(Err::<(), _>(err)),
    }
}

pub(crate) async fn metric_handler<S>(
    State(service): State<Arc<RankingService<S>>>,
    Path(metric_id): Path<String>,
) -> Response
where
    S: RankingSource + 'static,
{
    match service.explain(&metric_id) {
        Some(content) => (StatusCode::OK, axum::Json(content)).into_response(),
        None => {
            let payload = json!({
                "error": "unknown metric",
                "metric_id": metric_id,
            });
            (StatusCode::NOT_FOUND, axum::Json(payload)).into_response()
        }
    }
}
