//! Tooltip text for every metric shown on the leaderboard, solution finder,
//! and profile pages.
//!
//! Breakdown entries are stored as `"Label: description"` strings and split
//! on the first colon when looked up, so descriptions may contain colons.

use std::collections::HashMap;

use serde::Serialize;

/// Metrics the views annotate.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum MetricId {
    ImpactScore,
    ImpactGrade,
    Verification,
    SocialRoi,
    YearlyChange,
    PeopleReached,
    Effectiveness,
    Rank,
    ReportingQuality,
    Reach,
    OutcomeEffectiveness,
    TransparencyGovernance,
    SdgAlignment,
}

impl MetricId {
    pub const fn ordered() -> [Self; 13] {
        [
            Self::ImpactScore,
            Self::ImpactGrade,
            Self::Verification,
            Self::SocialRoi,
            Self::YearlyChange,
            Self::PeopleReached,
            Self::Effectiveness,
            Self::Rank,
            Self::ReportingQuality,
            Self::Reach,
            Self::OutcomeEffectiveness,
            Self::TransparencyGovernance,
            Self::SdgAlignment,
        ]
    }

    pub const fn key(self) -> &'static str {
        match self {
            Self::ImpactScore => "impact_score",
            Self::ImpactGrade => "impact_grade",
            Self::Verification => "verification",
            Self::SocialRoi => "social_roi",
            Self::YearlyChange => "yearly_change",
            Self::PeopleReached => "people_reached",
            Self::Effectiveness => "effectiveness",
            Self::Rank => "rank",
            Self::ReportingQuality => "reporting_quality",
            Self::Reach => "reach",
            Self::OutcomeEffectiveness => "outcome_effectiveness",
            Self::TransparencyGovernance => "transparency_governance",
            Self::SdgAlignment => "sdg_alignment",
        }
    }

    /// Accepts `impact_score`, `impactScore`, `impact-score`, and the browser's
    /// older `verificationType` / `socialROI` spellings.
    pub fn parse(raw: &str) -> Option<Self> {
        let key = snake_case(raw.trim());
        let key = match key.as_str() {
            "verification_type" => "verification",
            "social_r_o_i" => "social_roi",
            other => other,
        };
        Self::ordered().into_iter().find(|metric| metric.key() == key)
    }
}

fn snake_case(raw: &str) -> String {
    let mut out = String::with_capacity(raw.len() + 4);
    for (index, ch) in raw.chars().enumerate() {
        if ch == '-' || ch == ' ' {
            out.push('_');
        } else if ch.is_ascii_uppercase() {
            if index > 0 && !out.ends_with('_') {
                out.push('_');
            }
            out.push(ch.to_ascii_lowercase());
        } else {
            out.push(ch);
        }
    }
    out
}

enum StoredExplanation {
    Plain(&'static str),
    Breakdown {
        title: &'static str,
        fields: &'static [&'static str],
    },
}

/// One labelled line of a breakdown.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ExplanationField {
    pub label: String,
    pub text: String,
}

impl ExplanationField {
    /// Split on the first colon. Without a colon the whole line is the text.
    pub fn from_line(line: &str) -> Self {
        match line.split_once(':') {
            Some((label, text)) => Self {
                label: label.trim_end().to_string(),
                text: text.trim_start().to_string(),
            },
            None => Self {
                label: String::new(),
                text: line.trim().to_string(),
            },
        }
    }
}

/// What a tooltip renders.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum ExplanationContent {
    Plain { text: String },
    Breakdown {
        title: String,
        fields: Vec<ExplanationField>,
    },
}

/// Read-only mapping from metric to explanation.
pub struct ExplanationDirectory {
    entries: HashMap<MetricId, StoredExplanation>,
}

impl Default for ExplanationDirectory {
    fn default() -> Self {
        Self::standard()
    }
}

impl ExplanationDirectory {
    pub fn standard() -> Self {
        let entries = MetricId::ordered()
            .into_iter()
            .map(|metric| (metric, stored(metric)))
            .collect();
        Self { entries }
    }

    /// Lookup by the identifier the browser sends. Unknown ids yield `None`.
    pub fn lookup(&self, metric_id: &str) -> Option<ExplanationContent> {
        MetricId::parse(metric_id).and_then(|metric| self.get(metric))
    }

    pub fn get(&self, metric: MetricId) -> Option<ExplanationContent> {
        self.entries.get(&metric).map(|stored| match stored {
            StoredExplanation::Plain(text) => ExplanationContent::Plain {
                text: (*text).to_string(),
            },
            StoredExplanation::Breakdown { title, fields } => ExplanationContent::Breakdown {
                title: (*title).to_string(),
                fields: fields
                    .iter()
                    .map(|line| ExplanationField::from_line(line))
                    .collect(),
            },
        })
    }

    pub fn metrics(&self) -> impl Iterator<Item = MetricId> + '_ {
        MetricId::ordered()
            .into_iter()
            .filter(|metric| self.entries.contains_key(metric))
    }
}

fn stored(metric: MetricId) -> StoredExplanation {
    use StoredExplanation::{Breakdown, Plain};

    match metric {
        MetricId::ImpactScore => Breakdown {
            title: "Impact Score (0-100) is the sum of five sub-metrics",
            fields: &[
                "Reporting Quality (0-20): How complete, timely, and consistent the organization's impact reporting is.",
                "Reach (0-20): Evaluates the organization's scale relative to its sector and budget.",
                "Social ROI (0-20): Social value created per dollar invested, normalized across sectors.",
                "Outcome Effectiveness (0-20): Evidence that programs change outcomes, not just outputs.",
                "Transparency & Governance (0-20): Board independence, audited financials, and public disclosures.",
            ],
        },
        MetricId::ImpactGrade => Plain(
            "Letter grade from A+ to F derived from the Impact Score using the published grade scale.",
        ),
        MetricId::Verification => Breakdown {
            title: "How the reported data was checked",
            fields: &[
                "Self-Reported: Figures supplied by the organization without outside review.",
                "Verified: A third party has reviewed the methodology and sampled the data.",
                "Audited: An independent audit confirmed the figures against source records.",
            ],
        },
        MetricId::SocialRoi => Plain(
            "Estimated social value returned for every dollar invested. A ratio of 4.2 means $4.20 of value per $1.",
        ),
        MetricId::YearlyChange => Plain(
            "Percentage change in Impact Score compared with the previous reporting year.",
        ),
        MetricId::PeopleReached => Plain(
            "Number of people who directly benefited from the program in the last reporting year.",
        ),
        MetricId::Effectiveness => Plain(
            "Share of intended outcomes achieved by the program (0-100), based on its most recent evaluation.",
        ),
        MetricId::Rank => Plain(
            "Position on the leaderboard among all ranked organizations, ordered by Impact Score.",
        ),
        MetricId::ReportingQuality => Breakdown {
            title: "Reporting Quality (0-20)",
            fields: &[
                "Completeness: Share of required indicators the organization reports.",
                "Timeliness: Reports published within 6 months of fiscal year end (target: 3 months).",
                "Consistency: Indicators tracked the same way year over year.",
            ],
        },
        MetricId::Reach => Breakdown {
            title: "Reach (0-20)",
            fields: &[
                "Scale: People served relative to sector peers.",
                "Depth: Intensity of services per beneficiary.",
                "Efficiency: Reach per dollar of program spending.",
            ],
        },
        MetricId::OutcomeEffectiveness => Breakdown {
            title: "Outcome Effectiveness (0-20)",
            fields: &[
                "Evidence: Strength of evaluation design, e.g. randomized or quasi-experimental.",
                "Results: Measured change in the outcomes the programs target.",
                "Durability: Whether results persist after services end.",
            ],
        },
        MetricId::TransparencyGovernance => Breakdown {
            title: "Transparency & Governance (0-20)",
            fields: &[
                "Financials: Audited statements published each year.",
                "Board: Share of independent board members.",
                "Disclosure: Public policies on conflicts of interest, whistleblowing, and data use.",
            ],
        },
        MetricId::SdgAlignment => Plain(
            "UN Sustainable Development Goals the organization's programs contribute to.",
        ),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_browser_metric_spellings() {
        assert_eq!(MetricId::parse("impactScore"), Some(MetricId::ImpactScore));
        assert_eq!(MetricId::parse("impact-score"), Some(MetricId::ImpactScore));
        assert_eq!(MetricId::parse("socialROI"), Some(MetricId::SocialRoi));
        assert_eq!(
            MetricId::parse("verificationType"),
            Some(MetricId::Verification)
        );
        assert_eq!(
            MetricId::parse("transparencyGovernance"),
            Some(MetricId::TransparencyGovernance)
        );
        assert_eq!(MetricId::parse("carbonFootprint"), None);
    }

    #[test]
    fn field_without_colon_is_all_text() {
        let field = ExplanationField::from_line("  No label here ");
        assert_eq!(field.label, "");
        assert_eq!(field.text, "No label here");
    }
}
