//! Step function from impact score to letter grade.
//!
//! The cut-offs are configuration. [`GradeScale::default`] is the development
//! table; deployments that publish grades set `APP_GRADE_THRESHOLDS`.

use serde::Serialize;

use super::domain::{Graded, ImpactGrade, ScorePercent};

const GRADED_BANDS: usize = 10;

/// Minimum scores for A+ through D, strictly descending. Anything below the
/// last cut-off is an F.
#[derive(Debug, Clone, PartialEq)]
pub struct GradeScale {
    thresholds: [f32; GRADED_BANDS],
}

impl Default for GradeScale {
    fn default() -> Self {
        Self {
            thresholds: [97.0, 93.0, 90.0, 87.0, 83.0, 80.0, 77.0, 73.0, 70.0, 60.0],
        }
    }
}

#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum GradeScaleError {
    #[error("expected 10 thresholds (A+ through D), found {found}")]
    WrongCount { found: usize },
    #[error("threshold '{value}' is not a number")]
    NotANumber { value: String },
    #[error("threshold {value} is outside 0..=100")]
    OutOfRange { value: f32 },
    #[error("threshold for {grade} must be lower than the one before it")]
    NotDescending { grade: ImpactGrade },
}

/// One published band of the scale.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct GradeBand {
    pub grade: ImpactGrade,
    pub min_score: f32,
}

impl GradeScale {
    pub fn new(thresholds: [f32; GRADED_BANDS]) -> Result<Self, GradeScaleError> {
        let grades = ImpactGrade::ordered();
        for (index, value) in thresholds.iter().copied().enumerate() {
            if ScorePercent::new(value).is_err() {
                return Err(GradeScaleError::OutOfRange { value });
            }
            if index > 0 && value >= thresholds[index - 1] {
                return Err(GradeScaleError::NotDescending {
                    grade: grades[index],
                });
            }
        }
        Ok(Self { thresholds })
    }

    /// Parse a comma separated list such as `97,93,90,87,83,80,77,73,70,60`.
    pub fn parse(raw: &str) -> Result<Self, GradeScaleError> {
        let values = raw
            .split(',')
            .map(str::trim)
            .filter(|part| !part.is_empty())
            .map(|part| {
                part.parse::<f32>()
                    .map_err(|_| GradeScaleError::NotANumber {
                        value: part.to_string(),
                    })
            })
            .collect::<Result<Vec<_>, _>>()?;

        let thresholds: [f32; GRADED_BANDS] =
            values
                .as_slice()
                .try_into()
                .map_err(|_| GradeScaleError::WrongCount {
                    found: values.len(),
                })?;
        Self::new(thresholds)
    }

    pub fn grade_for(&self, score: ScorePercent) -> ImpactGrade {
        let grades = ImpactGrade::ordered();
        self.thresholds
            .iter()
            .position(|min| score.value() >= *min)
            .map(|index| grades[index])
            .unwrap_or(ImpactGrade::F)
    }

    pub fn is_consistent(&self, score: ScorePercent, grade: ImpactGrade) -> bool {
        self.grade_for(score) == grade
    }

    /// Bands best-first, ending with F at 0.
    pub fn bands(&self) -> Vec<GradeBand> {
        ImpactGrade::ordered()
            .into_iter()
            .enumerate()
            .map(|(index, grade)| GradeBand {
                grade,
                min_score: self.thresholds.get(index).copied().unwrap_or(0.0),
            })
            .collect()
    }

    /// Records whose stored grade disagrees with this scale.
    pub fn audit<'a, T: Graded>(&self, records: &'a [T]) -> Vec<GradeMismatch<'a>> {
        records
            .iter()
            .filter_map(|record| {
                let score = record.impact_score();
                let expected = self.grade_for(score);
                (expected != record.impact_grade()).then(|| GradeMismatch {
                    name: record.display_name(),
                    score,
                    recorded: record.impact_grade(),
                    expected,
                })
            })
            .collect()
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct GradeMismatch<'a> {
    pub name: &'a str,
    pub score: ScorePercent,
    pub recorded: ImpactGrade,
    pub expected: ImpactGrade,
}

#[cfg(test)]
mod tests {
    use super::*;

    fn score(value: f32) -> ScorePercent {
        ScorePercent::new(value).expect("valid score")
    }

    #[test]
    fn default_scale_is_a_monotonic_step_function() {
        let scale = GradeScale::default();
        let mut previous = ImpactGrade::F;
        for whole in 0..=100 {
            let grade = scale.grade_for(score(whole as f32));
            assert!(grade >= previous, "grade dropped at {whole}");
            previous = grade;
        }
        assert_eq!(scale.grade_for(score(100.0)), ImpactGrade::APlus);
        assert_eq!(scale.grade_for(score(0.0)), ImpactGrade::F);
    }

    #[test]
    fn cut_offs_are_inclusive() {
        let scale = GradeScale::default();
        assert_eq!(scale.grade_for(score(93.0)), ImpactGrade::A);
        assert_eq!(scale.grade_for(score(92.9)), ImpactGrade::AMinus);
        assert_eq!(scale.grade_for(score(60.0)), ImpactGrade::D);
        assert_eq!(scale.grade_for(score(59.9)), ImpactGrade::F);
    }

    #[test]
    fn parse_validates_shape_and_order() {
        assert_eq!(
            GradeScale::parse("97,93"),
            Err(GradeScaleError::WrongCount { found: 2 })
        );
        assert_eq!(
            GradeScale::parse("97,93,90,87,x,80,77,73,70,60"),
            Err(GradeScaleError::NotANumber {
                value: "x".to_string()
            })
        );
        assert_eq!(
            GradeScale::parse("97,93,93,87,83,80,77,73,70,60"),
            Err(GradeScaleError::NotDescending {
                grade: ImpactGrade::AMinus
            })
        );
        assert_eq!(
            GradeScale::parse("101,93,90,87,83,80,77,73,70,60"),
            Err(GradeScaleError::OutOfRange { value: 101.0 })
        );
        assert_eq!(
            GradeScale::parse(" 97, 93,90,87,83,80,77,73,70,60 "),
            Ok(GradeScale::default())
        );
    }

    #[test]
    fn bands_list_every_grade_best_first() {
        let bands = GradeScale::default().bands();
        assert_eq!(bands.len(), 11);
        assert_eq!(bands[0].grade, ImpactGrade::APlus);
        assert_eq!(bands[0].min_score, 97.0);
        assert_eq!(bands[10].grade, ImpactGrade::F);
        assert_eq!(bands[10].min_score, 0.0);
    }

    #[test]
    fn consistency_check_uses_the_configured_table() {
        let strict = GradeScale::parse("99,98,97,96,95,94,93,92,91,90").expect("valid");
        assert!(strict.is_consistent(score(95.5), ImpactGrade::B));
        assert!(!GradeScale::default().is_consistent(score(95.5), ImpactGrade::B));
    }

    struct FixedScore {
        name: &'static str,
        grade: ImpactGrade,
    }

    impl Graded for FixedScore {
        fn impact_score(&self) -> ScorePercent {
            score(95.0)
        }

        fn impact_grade(&self) -> ImpactGrade {
            self.grade
        }

        fn display_name(&self) -> &str {
            self.name
        }
    }

    #[test]
    fn audit_reports_only_disagreeing_records() {
        let records = [
            FixedScore {
                name: "consistent",
                grade: ImpactGrade::A,
            },
            FixedScore {
                name: "overgraded",
                grade: ImpactGrade::APlus,
            },
        ];
        let mismatches = GradeScale::default().audit(&records);
        assert_eq!(
            mismatches,
            vec![GradeMismatch {
                name: "overgraded",
                score: score(95.0),
                recorded: ImpactGrade::APlus,
                expected: ImpactGrade::A,
            }]
        );
    }
}
