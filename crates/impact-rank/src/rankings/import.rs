//! Leaderboard import from the ranking team's spreadsheet export.

use std::io::Read;
use std::path::Path;

use serde::{Deserialize, Deserializer};

use super::catalog::{CatalogOption, OrganizationSize, Region, Sector};
use super::domain::{
    ImpactGrade, LeaderboardEntry, OrganizationId, ScorePercent, VerificationType,
};

#[derive(Debug)]
pub enum LeaderboardImportError {
    Io(std::io::Error),
    Csv(csv::Error),
    InvalidField {
        row: usize,
        column: &'static str,
        value: String,
    },
}

impl std::fmt::Display for LeaderboardImportError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            LeaderboardImportError::Io(err) => write!(f, "failed to read leaderboard export: {}", err),
            LeaderboardImportError::Csv(err) => write!(f, "invalid leaderboard CSV data: {}", err),
            LeaderboardImportError::InvalidField { row, column, value } => write!(
                f,
                "row {}: '{}' is not a valid value for column '{}'",
                row, value, column
            ),
        }
    }
}

impl std::error::Error for LeaderboardImportError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            LeaderboardImportError::Io(err) => Some(err),
            LeaderboardImportError::Csv(err) => Some(err),
            LeaderboardImportError::InvalidField { .. } => None,
        }
    }
}

impl From<std::io::Error> for LeaderboardImportError {
    fn from(err: std::io::Error) -> Self {
        Self::Io(err)
    }
}

impl From<csv::Error> for LeaderboardImportError {
    fn from(err: csv::Error) -> Self {
        Self::Csv(err)
    }
}

pub struct LeaderboardCsvImporter;

impl LeaderboardCsvImporter {
    pub fn from_path<P: AsRef<Path>>(
        path: P,
    ) -> Result<Vec<LeaderboardEntry>, LeaderboardImportError> {
        let file = std::fs::File::open(path)?;
        Self::from_reader(file)
    }

    /// Rows without a `Rank` take their 1-based position in the file.
    pub fn from_reader<R: Read>(reader: R) -> Result<Vec<LeaderboardEntry>, LeaderboardImportError> {
        let mut csv_reader = csv::ReaderBuilder::new()
            .trim(csv::Trim::All)
            .from_reader(reader);
        let mut entries = Vec::new();

        for (index, record) in csv_reader.deserialize::<LeaderboardRow>().enumerate() {
            let row = record?;
            entries.push(row.into_entry(index + 1)?);
        }

        Ok(entries)
    }
}

#[derive(Debug, Deserialize)]
struct LeaderboardRow {
    #[serde(rename = "Id", default, deserialize_with = "empty_string_as_none")]
    id: Option<String>,
    #[serde(rename = "Rank", default, deserialize_with = "empty_string_as_none")]
    rank: Option<String>,
    #[serde(rename = "Name")]
    name: String,
    #[serde(rename = "Sector")]
    sector: String,
    #[serde(rename = "Region")]
    region: String,
    #[serde(rename = "Impact Score")]
    impact_score: String,
    #[serde(rename = "Grade")]
    grade: String,
    #[serde(rename = "Yearly Change", default, deserialize_with = "empty_string_as_none")]
    yearly_change: Option<String>,
    #[serde(rename = "Social ROI", default, deserialize_with = "empty_string_as_none")]
    social_roi: Option<String>,
    #[serde(rename = "Verification")]
    verification: String,
    #[serde(rename = "Size", default, deserialize_with = "empty_string_as_none")]
    size: Option<String>,
    #[serde(rename = "Logo", default, deserialize_with = "empty_string_as_none")]
    logo: Option<String>,
}

impl LeaderboardRow {
    fn into_entry(self, row: usize) -> Result<LeaderboardEntry, LeaderboardImportError> {
        let invalid = |column: &'static str, value: &str| LeaderboardImportError::InvalidField {
            row,
            column,
            value: value.to_string(),
        };

        let rank = match self.rank.as_deref() {
            Some(raw) => raw
                .parse::<u32>()
                .ok()
                .filter(|rank| *rank > 0)
                .ok_or_else(|| invalid("Rank", raw))?,
            None => u32::try_from(row).map_err(|_| invalid("Rank", &row.to_string()))?,
        };
        let sector = Sector::parse(&self.sector).ok_or_else(|| invalid("Sector", &self.sector))?;
        let region = Region::parse(&self.region).ok_or_else(|| invalid("Region", &self.region))?;
        let impact_score = parse_number(&self.impact_score)
            .and_then(|value| ScorePercent::new(value).ok())
            .ok_or_else(|| invalid("Impact Score", &self.impact_score))?;
        let impact_grade =
            ImpactGrade::parse(&self.grade).ok_or_else(|| invalid("Grade", &self.grade))?;
        let yearly_change = match self.yearly_change.as_deref() {
            Some(raw) => parse_number(raw).ok_or_else(|| invalid("Yearly Change", raw))?,
            None => 0.0,
        };
        let social_roi = match self.social_roi.as_deref() {
            Some(raw) => parse_number(raw).ok_or_else(|| invalid("Social ROI", raw))?,
            None => 0.0,
        };
        let verification = VerificationType::parse(&self.verification)
            .ok_or_else(|| invalid("Verification", &self.verification))?;
        let organization_size = match self.size.as_deref() {
            Some(raw) => Some(OrganizationSize::parse(raw).ok_or_else(|| invalid("Size", raw))?),
            None => None,
        };
        let id = self
            .id
            .unwrap_or_else(|| slugify(&self.name));

        Ok(LeaderboardEntry {
            id: OrganizationId(id),
            rank,
            name: self.name,
            sector,
            logo: self.logo,
            impact_score,
            yearly_change,
            social_roi,
            region,
            impact_grade,
            verification,
            organization_size,
        })
    }
}

/// Tolerates the spreadsheet's `+12.5%` and `4.2x` formatting.
fn parse_number(raw: &str) -> Option<f32> {
    raw.trim()
        .trim_start_matches('+')
        .trim_end_matches(['%', 'x', 'X'])
        .trim()
        .parse::<f32>()
        .ok()
        .filter(|value| value.is_finite())
}

fn slugify(name: &str) -> String {
    name.split(|ch: char| !ch.is_alphanumeric())
        .filter(|part| !part.is_empty())
        .map(str::to_lowercase)
        .collect::<Vec<_>>()
        .join("-")
}

fn empty_string_as_none<'de, D>(deserializer: D) -> Result<Option<String>, D::Error>
where
    D: Deserializer<'de>,
{
    let opt = Option::<String>::deserialize(deserializer)?;
    Ok(opt.filter(|value| !value.trim().is_empty()))
}
