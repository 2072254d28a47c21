use std::sync::Arc;

use super::catalog::{
    BusinessType, CatalogOption, Demographic, OrganizationSize, Region, Sdg, Sector,
};
use super::domain::{OrganizationId, OrganizationProfile, SubScore, VerificationType};
use super::explain::{ExplanationContent, ExplanationDirectory, MetricId};
use super::filter::{filter, FilterCriteria, LeaderboardSort, SolutionSort};
use super::grade::GradeScale;
use super::source::{RankingSource, SourceError};
use super::views::{
    profile_path, CatalogsView, GradeMismatchView, LeaderboardRowView, LeaderboardView,
    MetricBarView, OptionView, OrganizationCardView, OrganizationView, SolutionRowView,
    SolutionsView,
};
use crate::display::{option_label, DisplayContext, Localizer, StaticLocalizer};

/// Service composing the ranking source, grade scale, and explanation directory.
pub struct RankingService<S> {
    source: Arc<S>,
    grading: GradeScale,
    explanations: ExplanationDirectory,
    localizer: Arc<dyn Localizer>,
}

impl<S> RankingService<S>
where
    S: RankingSource + 'static,
{
    pub fn new(source: Arc<S>, grading: GradeScale) -> Self {
        Self::with_localizer(source, grading, Arc::new(StaticLocalizer::default()))
    }

    pub fn with_localizer(
        source: Arc<S>,
        grading: GradeScale,
        localizer: Arc<dyn Localizer>,
    ) -> Self {
        Self {
            source,
            grading,
            explanations: ExplanationDirectory::standard(),
            localizer,
        }
    }

    pub fn grading(&self) -> &GradeScale {
        &self.grading
    }

    /// Every option list the filter controls need, labelled for `display`.
    pub fn catalogs(&self, display: DisplayContext) -> CatalogsView {
        CatalogsView {
            display,
            sectors: self.options::<Sector>(display),
            regions: self.options::<Region>(display),
            sdgs: self.options::<Sdg>(display),
            demographics: self.options::<Demographic>(display),
            business_types: self.options::<BusinessType>(display),
            organization_sizes: self.options::<OrganizationSize>(display),
            verification: VerificationType::ordered()
                .into_iter()
                .map(|tier| OptionView {
                    value: tier.slug(),
                    label: tier.label().to_string(),
                })
                .collect(),
            grades: self.grading.bands(),
        }
    }

    /// Filter, then sort, the published leaderboard.
    pub fn leaderboard(
        &self,
        criteria: &FilterCriteria,
        sort: LeaderboardSort,
        display: DisplayContext,
    ) -> Result<LeaderboardView, SourceError> {
        let all = self.source.leaderboard()?;
        let mut matched = filter(&all, criteria);
        sort.apply(&mut matched);

        let entries = matched
            .into_iter()
            .map(|entry| LeaderboardRowView {
                sector_label: self.label(entry.sector, display),
                region_label: self.label(entry.region, display),
                profile_path: profile_path(&entry.id),
                entry,
            })
            .collect::<Vec<_>>();

        Ok(LeaderboardView {
            display,
            total: all.len(),
            matched: entries.len(),
            entries,
        })
    }

    pub fn solutions(
        &self,
        criteria: &FilterCriteria,
        sort: SolutionSort,
        display: DisplayContext,
    ) -> Result<SolutionsView, SourceError> {
        let all = self.source.solutions()?;
        let mut matched = filter(&all, criteria);
        sort.apply(&mut matched);

        let entries = matched
            .into_iter()
            .map(|entry| SolutionRowView {
                sector_label: self.label(entry.sector, display),
                region_label: self.label(entry.region, display),
                business_type_label: self.label(entry.business_type, display),
                entry,
            })
            .collect::<Vec<_>>();

        Ok(SolutionsView {
            display,
            total: all.len(),
            matched: entries.len(),
            entries,
        })
    }

    /// Profiles matching `criteria`, in published order.
    pub fn organizations(
        &self,
        criteria: &FilterCriteria,
        display: DisplayContext,
    ) -> Result<Vec<OrganizationCardView>, SourceError> {
        let all = self.source.organizations()?;
        Ok(filter(&all, criteria)
            .into_iter()
            .map(|profile| OrganizationCardView {
                sector_label: self.label(profile.sector, display),
                region_label: self.label(profile.region, display),
                profile_path: profile_path(&profile.id),
                impact_score: profile.impact_score,
                impact_grade: profile.impact_grade,
                id: profile.id,
                name: profile.name,
            })
            .collect())
    }

    pub fn organization(
        &self,
        id: &OrganizationId,
        display: DisplayContext,
    ) -> Result<Option<OrganizationView>, SourceError> {
        let profile = self.source.organization(id)?;
        Ok(profile.map(|profile| self.organization_view(profile, display)))
    }

    fn organization_view(
        &self,
        profile: OrganizationProfile,
        display: DisplayContext,
    ) -> OrganizationView {
        let metrics = profile.metrics;
        let metric_bars = [
            (MetricId::ReportingQuality, metrics.reporting_quality),
            (MetricId::Reach, metrics.reach),
            (MetricId::OutcomeEffectiveness, metrics.outcome_effectiveness),
            (MetricId::TransparencyGovernance, metrics.transparency_governance),
        ]
        .into_iter()
        .map(|(metric, score)| MetricBarView {
            metric,
            score: score.value(),
            max: SubScore::MAX,
            percent: score.percent(),
        })
        .collect();

        let sdg_labels = profile
            .sdg_alignment
            .iter()
            .map(|goal| OptionView {
                value: goal.slug(),
                label: self.label(*goal, display),
            })
            .collect();

        OrganizationView {
            display,
            sector_label: self.label(profile.sector, display),
            region_label: self.label(profile.region, display),
            sdg_labels,
            metric_bars,
            grade_consistent: self
                .grading
                .is_consistent(profile.impact_score, profile.impact_grade),
            profile,
        }
    }

    /// Tooltip content for a metric id as the browser spells it.
    pub fn explain(&self, metric_id: &str) -> Option<ExplanationContent> {
        self.explanations.lookup(metric_id)
    }

    /// Leaderboard rows and profiles whose stored grade disagrees with the
    /// configured scale.
    pub fn audit_grades(&self) -> Result<Vec<GradeMismatchView>, SourceError> {
        let leaderboard = self.source.leaderboard()?;
        let organizations = self.source.organizations()?;

        let mut mismatches = Vec::new();
        for mismatch in self
            .grading
            .audit(&leaderboard)
            .into_iter()
            .chain(self.grading.audit(&organizations))
        {
            mismatches.push(GradeMismatchView {
                name: mismatch.name.to_string(),
                score: mismatch.score,
                recorded: mismatch.recorded,
                expected: mismatch.expected,
            });
        }
        Ok(mismatches)
    }

    fn options<T: CatalogOption>(&self, display: DisplayContext) -> Vec<OptionView> {
        T::ordered()
            .iter()
            .map(|option| OptionView {
                value: option.slug(),
                label: self.label(*option, display),
            })
            .collect()
    }

    fn label<T: CatalogOption>(&self, option: T, display: DisplayContext) -> String {
        option_label(self.localizer.as_ref(), option, display.language)
    }
}
