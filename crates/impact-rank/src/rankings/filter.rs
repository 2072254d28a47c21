//! Faceted search over already-fetched record lists.
//!
//! Filtering is a stable, pure narrowing of its input: every specified
//! dimension must match (AND), survivors keep their relative order, and
//! nothing here fails. Ordering is a separate step, see [`LeaderboardSort`]
//! and [`SolutionSort`].

use std::cmp::Ordering;
use std::collections::BTreeSet;

use serde::Deserialize;

use super::catalog::{
    BusinessType, CatalogOption, Demographic, OrganizationSize, Region, Sdg, Sector,
};
use super::domain::{LeaderboardEntry, OrganizationProfile, SolutionEntry};

/// Sentinel the browser sends for "no constraint".
pub const ALL: &str = "all";

/// Constraint on a single catalog dimension.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Criterion<T> {
    Any,
    Is(T),
    /// A value that is not in the catalog. Matches nothing.
    Unrecognized(String),
}

impl<T> Default for Criterion<T> {
    fn default() -> Self {
        Self::Any
    }
}

impl<T: CatalogOption> Criterion<T> {
    pub fn parse(raw: Option<&str>) -> Self {
        let Some(raw) = raw.map(str::trim).filter(|value| !value.is_empty()) else {
            return Self::Any;
        };
        if raw.eq_ignore_ascii_case(ALL) {
            return Self::Any;
        }
        match T::parse(raw) {
            Some(value) => Self::Is(value),
            None => Self::Unrecognized(raw.to_string()),
        }
    }
}

impl<T> Criterion<T> {
    pub fn is_any(&self) -> bool {
        matches!(self, Self::Any)
    }
}

/// What a record exposes on one dimension.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Facet<'a, T> {
    /// The record kind does not carry this dimension; a recognized value
    /// does not constrain it.
    Unsupported,
    /// The record kind carries the dimension but this record left it empty.
    Absent,
    One(T),
    Many(&'a BTreeSet<T>),
    /// Free-form tags; a tag counts when it parses as the wanted option.
    Tagged(&'a BTreeSet<String>),
}

impl<'a, T> From<Option<T>> for Facet<'a, T> {
    fn from(value: Option<T>) -> Self {
        match value {
            Some(value) => Facet::One(value),
            None => Facet::Absent,
        }
    }
}

fn facet_matches<T: CatalogOption + Ord>(criterion: &Criterion<T>, facet: Facet<'_, T>) -> bool {
    match (criterion, facet) {
        (Criterion::Any, _) => true,
        (Criterion::Unrecognized(_), _) => false,
        (Criterion::Is(_), Facet::Unsupported) => true,
        (Criterion::Is(_), Facet::Absent) => false,
        (Criterion::Is(wanted), Facet::One(value)) => *wanted == value,
        (Criterion::Is(wanted), Facet::Many(values)) => values.contains(wanted),
        (Criterion::Is(wanted), Facet::Tagged(tags)) => {
            tags.iter().any(|tag| T::parse(tag) == Some(*wanted))
        }
    }
}

/// Record kinds the evaluator can narrow.
pub trait Filterable {
    /// Fields searched by the free-text query.
    fn search_fields(&self) -> Vec<&str>;

    fn sector_facet(&self) -> Facet<'_, Sector> {
        Facet::Unsupported
    }

    fn region_facet(&self) -> Facet<'_, Region> {
        Facet::Unsupported
    }

    fn sdg_facet(&self) -> Facet<'_, Sdg> {
        Facet::Unsupported
    }

    fn demographic_facet(&self) -> Facet<'_, Demographic> {
        Facet::Unsupported
    }

    fn business_type_facet(&self) -> Facet<'_, BusinessType> {
        Facet::Unsupported
    }

    fn organization_size_facet(&self) -> Facet<'_, OrganizationSize> {
        Facet::Unsupported
    }
}

impl Filterable for LeaderboardEntry {
    fn search_fields(&self) -> Vec<&str> {
        vec![self.name.as_str()]
    }

    fn sector_facet(&self) -> Facet<'_, Sector> {
        Facet::One(self.sector)
    }

    fn region_facet(&self) -> Facet<'_, Region> {
        Facet::One(self.region)
    }

    fn organization_size_facet(&self) -> Facet<'_, OrganizationSize> {
        self.organization_size.into()
    }
}

impl Filterable for SolutionEntry {
    fn search_fields(&self) -> Vec<&str> {
        vec![
            self.name.as_str(),
            self.organization_name.as_str(),
            self.description.as_str(),
        ]
    }

    fn sector_facet(&self) -> Facet<'_, Sector> {
        Facet::One(self.sector)
    }

    fn region_facet(&self) -> Facet<'_, Region> {
        Facet::One(self.region)
    }

    fn demographic_facet(&self) -> Facet<'_, Demographic> {
        Facet::Tagged(&self.tags)
    }

    fn business_type_facet(&self) -> Facet<'_, BusinessType> {
        Facet::One(self.business_type)
    }
}

impl Filterable for OrganizationProfile {
    fn search_fields(&self) -> Vec<&str> {
        vec![self.name.as_str(), self.mission.as_str()]
    }

    fn sector_facet(&self) -> Facet<'_, Sector> {
        Facet::One(self.sector)
    }

    fn region_facet(&self) -> Facet<'_, Region> {
        Facet::One(self.region)
    }

    fn sdg_facet(&self) -> Facet<'_, Sdg> {
        Facet::Many(&self.sdg_alignment)
    }

    fn organization_size_facet(&self) -> Facet<'_, OrganizationSize> {
        self.organization_size.into()
    }
}

/// Query-string shape of the filter controls.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct FilterParams {
    #[serde(default, alias = "q")]
    pub query: Option<String>,
    #[serde(default)]
    pub sector: Option<String>,
    #[serde(default)]
    pub region: Option<String>,
    #[serde(default)]
    pub sdg: Option<String>,
    #[serde(default)]
    pub demographic: Option<String>,
    #[serde(default)]
    pub business_type: Option<String>,
    #[serde(default, alias = "size")]
    pub organization_size: Option<String>,
}

/// Parsed filter selection. Every dimension is independently optional.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct FilterCriteria {
    pub query: Option<String>,
    pub sector: Criterion<Sector>,
    pub region: Criterion<Region>,
    pub sdg: Criterion<Sdg>,
    pub demographic: Criterion<Demographic>,
    pub business_type: Criterion<BusinessType>,
    pub organization_size: Criterion<OrganizationSize>,
}

impl From<&FilterParams> for FilterCriteria {
    fn from(params: &FilterParams) -> Self {
        Self {
            query: params.query.clone(),
            sector: Criterion::parse(params.sector.as_deref()),
            region: Criterion::parse(params.region.as_deref()),
            sdg: Criterion::parse(params.sdg.as_deref()),
            demographic: Criterion::parse(params.demographic.as_deref()),
            business_type: Criterion::parse(params.business_type.as_deref()),
            organization_size: Criterion::parse(params.organization_size.as_deref()),
        }
    }
}

impl FilterCriteria {
    pub fn query(mut self, query: impl Into<String>) -> Self {
        self.query = Some(query.into());
        self
    }

    pub fn sector(mut self, sector: Sector) -> Self {
        self.sector = Criterion::Is(sector);
        self
    }

    pub fn region(mut self, region: Region) -> Self {
        self.region = Criterion::Is(region);
        self
    }

    pub fn sdg(mut self, sdg: Sdg) -> Self {
        self.sdg = Criterion::Is(sdg);
        self
    }

    pub fn business_type(mut self, business_type: BusinessType) -> Self {
        self.business_type = Criterion::Is(business_type);
        self
    }

    pub fn organization_size(mut self, size: OrganizationSize) -> Self {
        self.organization_size = Criterion::Is(size);
        self
    }

    /// Lower-cased query, or `None` when blank.
    pub fn search_term(&self) -> Option<String> {
        self.query
            .as_deref()
            .map(str::trim)
            .filter(|term| !term.is_empty())
            .map(str::to_lowercase)
    }

    pub fn is_unconstrained(&self) -> bool {
        self.search_term().is_none()
            && self.sector.is_any()
            && self.region.is_any()
            && self.sdg.is_any()
            && self.demographic.is_any()
            && self.business_type.is_any()
            && self.organization_size.is_any()
    }

    pub fn matches<T: Filterable>(&self, record: &T) -> bool {
        self.matches_term(record, self.search_term().as_deref())
    }

    fn matches_term<T: Filterable>(&self, record: &T, term: Option<&str>) -> bool {
        let text_matches = match term {
            Some(term) => record
                .search_fields()
                .iter()
                .any(|field| field.to_lowercase().contains(term)),
            None => true,
        };

        text_matches
            && facet_matches(&self.sector, record.sector_facet())
            && facet_matches(&self.region, record.region_facet())
            && facet_matches(&self.sdg, record.sdg_facet())
            && facet_matches(&self.demographic, record.demographic_facet())
            && facet_matches(&self.business_type, record.business_type_facet())
            && facet_matches(&self.organization_size, record.organization_size_facet())
    }
}

/// Order-preserving subset of `records` satisfying every specified constraint.
pub fn filter<T: Filterable + Clone>(records: &[T], criteria: &FilterCriteria) -> Vec<T> {
    if criteria.is_unconstrained() {
        return records.to_vec();
    }
    let term = criteria.search_term();
    records
        .iter()
        .filter(|record| criteria.matches_term(*record, term.as_deref()))
        .cloned()
        .collect()
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum LeaderboardSort {
    /// Published rank, ascending.
    #[default]
    Rank,
    ImpactScore,
    YearlyChange,
    SocialRoi,
}

impl LeaderboardSort {
    pub fn parse(raw: &str) -> Option<Self> {
        match raw.trim().to_ascii_lowercase().replace('-', "_").as_str() {
            "rank" => Some(Self::Rank),
            "impact_score" | "score" => Some(Self::ImpactScore),
            "yearly_change" | "change" => Some(Self::YearlyChange),
            "social_roi" | "roi" => Some(Self::SocialRoi),
            _ => None,
        }
    }

    /// Stable; ties keep their filtered order.
    pub fn apply(self, entries: &mut [LeaderboardEntry]) {
        match self {
            Self::Rank => entries.sort_by_key(|entry| entry.rank),
            Self::ImpactScore => entries.sort_by(|a, b| {
                descending(a.impact_score.value(), b.impact_score.value())
            }),
            Self::YearlyChange => {
                entries.sort_by(|a, b| descending(a.yearly_change, b.yearly_change))
            }
            Self::SocialRoi => entries.sort_by(|a, b| descending(a.social_roi, b.social_roi)),
        }
    }
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SolutionSort {
    #[default]
    Effectiveness,
    PeopleReached,
    SocialRoi,
    Name,
}

impl SolutionSort {
    pub fn parse(raw: &str) -> Option<Self> {
        match raw.trim().to_ascii_lowercase().replace('-', "_").as_str() {
            "effectiveness" => Some(Self::Effectiveness),
            "people_reached" | "reach" => Some(Self::PeopleReached),
            "social_roi" | "roi" => Some(Self::SocialRoi),
            "name" => Some(Self::Name),
            _ => None,
        }
    }

    /// Stable; ties keep their filtered order.
    pub fn apply(self, entries: &mut [SolutionEntry]) {
        match self {
            Self::Effectiveness => entries.sort_by(|a, b| {
                descending(a.effectiveness.value(), b.effectiveness.value())
            }),
            Self::PeopleReached => {
                entries.sort_by(|a, b| b.people_reached.cmp(&a.people_reached))
            }
            Self::SocialRoi => entries.sort_by(|a, b| descending(a.social_roi, b.social_roi)),
            Self::Name => entries.sort_by_cached_key(|entry| entry.name.to_lowercase()),
        }
    }
}

fn descending(a: f32, b: f32) -> Ordering {
    b.total_cmp(&a)
}
