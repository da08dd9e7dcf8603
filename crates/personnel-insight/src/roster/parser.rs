use super::domain::{GradeTier, MedicalCategory, PerformanceRating, PersonnelRecord, RosterSnapshot};
use chrono::{DateTime, NaiveDate};
use serde::{Deserialize, Deserializer};
use std::io::Read;
use std::path::Path;

/// Failure loading a roster CSV. Cell-level problems never land here:
/// unparseable optional values degrade to `None` during conversion.
#[derive(Debug, thiserror::Error)]
pub enum RosterImportError {
    #[error("failed to read roster file: {0}")]
    Io(#[from] std::io::Error),
    #[error("invalid roster CSV data: {0}")]
    Csv(#[from] csv::Error),
}

pub struct RosterLoader;

impl RosterLoader {
    pub fn from_path<P: AsRef<Path>>(path: P) -> Result<RosterSnapshot, RosterImportError> {
        let file = std::fs::File::open(path)?;
        Self::from_reader(file)
    }

    pub fn from_reader<R: Read>(reader: R) -> Result<RosterSnapshot, RosterImportError> {
        let mut csv_reader = csv::ReaderBuilder::new()
            .trim(csv::Trim::All)
            .from_reader(reader);

        let has_attrition_column = csv_reader
            .headers()?
            .iter()
            .any(|header| header.trim() == "Attrition_Risk");

        let mut records = Vec::new();
        for row in csv_reader.deserialize::<RosterRow>() {
            records.push(row?.into_record());
        }

        Ok(RosterSnapshot::new(records, has_attrition_column))
    }
}

#[derive(Debug, Deserialize)]
struct RosterRow {
    #[serde(rename = "Personnel_ID", default, deserialize_with = "empty_string_as_none")]
    id: Option<String>,
    #[serde(rename = "Name", default, deserialize_with = "empty_string_as_none")]
    name: Option<String>,
    #[serde(rename = "Rank", default, deserialize_with = "empty_string_as_none")]
    rank: Option<String>,
    #[serde(rename = "Primary_Skill", default, deserialize_with = "empty_string_as_none")]
    primary_skill: Option<String>,
    #[serde(rename = "Years_of_Service", default, deserialize_with = "empty_string_as_none")]
    years_of_service: Option<String>,
    #[serde(rename = "Performance_Rating", default, deserialize_with = "empty_string_as_none")]
    performance_rating: Option<String>,
    #[serde(rename = "Training_Score", default, deserialize_with = "empty_string_as_none")]
    training_score: Option<String>,
    #[serde(rename = "Training_Course", default, deserialize_with = "empty_string_as_none")]
    training_course: Option<String>,
    #[serde(rename = "Medical_Category", default, deserialize_with = "empty_string_as_none")]
    medical_category: Option<String>,
    #[serde(rename = "BMI", default, deserialize_with = "empty_string_as_none")]
    bmi: Option<String>,
    #[serde(rename = "Last_Medical_Checkup", default, deserialize_with = "empty_string_as_none")]
    last_medical_checkup: Option<String>,
    #[serde(rename = "Leadership_Potential", default, deserialize_with = "empty_string_as_none")]
    leadership_potential: Option<String>,
    #[serde(rename = "Readiness_Level", default, deserialize_with = "empty_string_as_none")]
    readiness_level: Option<String>,
    #[serde(rename = "Attrition_Risk", default, deserialize_with = "empty_string_as_none")]
    attrition_risk: Option<String>,
    #[serde(rename = "Missions_Completed", default, deserialize_with = "empty_string_as_none")]
    missions_completed: Option<String>,
}

impl RosterRow {
    fn into_record(self) -> PersonnelRecord {
        PersonnelRecord {
            id: self.id.unwrap_or_default(),
            name: self.name.unwrap_or_default(),
            rank: self.rank.unwrap_or_default(),
            primary_skill: self.primary_skill,
            years_of_service: parse_number(self.years_of_service.as_deref()),
            performance: self
                .performance_rating
                .as_deref()
                .and_then(PerformanceRating::parse),
            training_score: parse_number(self.training_score.as_deref()),
            training_course: self.training_course,
            medical_category: self
                .medical_category
                .as_deref()
                .and_then(MedicalCategory::parse),
            bmi: parse_number(self.bmi.as_deref()),
            last_medical_checkup: self
                .last_medical_checkup
                .as_deref()
                .and_then(parse_date),
            leadership_potential: self
                .leadership_potential
                .as_deref()
                .and_then(GradeTier::parse_leadership),
            readiness_level: self.readiness_level.as_deref().and_then(GradeTier::parse),
            attrition_risk: self.attrition_risk.as_deref().and_then(GradeTier::parse),
            missions_completed: parse_number(self.missions_completed.as_deref()),
        }
    }
}

fn empty_string_as_none<'de, D>(deserializer: D) -> Result<Option<String>, D::Error>
where
    D: Deserializer<'de>,
{
    let opt = Option::<String>::deserialize(deserializer)?;
    Ok(opt.filter(|value| !value.trim().is_empty()))
}

fn parse_number(value: Option<&str>) -> Option<f64> {
    value
        .map(str::trim)
        .and_then(|raw| raw.parse::<f64>().ok())
        .filter(|parsed| parsed.is_finite())
}

fn parse_date(value: &str) -> Option<NaiveDate> {
    let trimmed = value.trim();
    if trimmed.is_empty() {
        return None;
    }

    if let Ok(dt) = DateTime::parse_from_rfc3339(trimmed) {
        return Some(dt.naive_utc().date());
    }

    NaiveDate::parse_from_str(trimmed, "%Y-%m-%d").ok()
}
