use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

/// Performance rating normalized to a single 1-5 scale.
///
/// Source datasets carry this column either as a categorical label
/// (Excellent/Good/Average/Below Average) or as a numeric 1-5 grade.
/// Both forms collapse into this enum at ingestion so every downstream
/// comparison is numeric.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum PerformanceRating {
    Poor,
    BelowAverage,
    Average,
    Good,
    Excellent,
}

impl PerformanceRating {
    pub const fn numeric(self) -> u8 {
        match self {
            Self::Poor => 1,
            Self::BelowAverage => 2,
            Self::Average => 3,
            Self::Good => 4,
            Self::Excellent => 5,
        }
    }

    pub const fn label(self) -> &'static str {
        match self {
            Self::Poor => "Poor",
            Self::BelowAverage => "Below Average",
            Self::Average => "Average",
            Self::Good => "Good",
            Self::Excellent => "Excellent",
        }
    }

    /// Numeric grades outside 1-5 clamp to the nearest bound.
    pub fn from_numeric(value: f64) -> Self {
        match value.round() as i64 {
            i64::MIN..=1 => Self::Poor,
            2 => Self::BelowAverage,
            3 => Self::Average,
            4 => Self::Good,
            _ => Self::Excellent,
        }
    }

    pub fn parse(raw: &str) -> Option<Self> {
        let trimmed = raw.trim();
        if trimmed.is_empty() {
            return None;
        }

        if let Ok(value) = trimmed.parse::<f64>() {
            return Some(Self::from_numeric(value));
        }

        match trimmed.to_ascii_lowercase().as_str() {
            "excellent" => Some(Self::Excellent),
            "good" => Some(Self::Good),
            "average" => Some(Self::Average),
            "below average" | "below-average" => Some(Self::BelowAverage),
            "poor" => Some(Self::Poor),
            _ => None,
        }
    }
}

/// Medical fitness category from periodic examination boards.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum MedicalCategory {
    A1,
    A2,
    B1,
    B2,
    C1,
    C2,
}

impl MedicalCategory {
    pub const fn label(self) -> &'static str {
        match self {
            Self::A1 => "A1",
            Self::A2 => "A2",
            Self::B1 => "B1",
            Self::B2 => "B2",
            Self::C1 => "C1",
            Self::C2 => "C2",
        }
    }

    pub fn parse(raw: &str) -> Option<Self> {
        match raw.trim().to_ascii_uppercase().as_str() {
            "A1" => Some(Self::A1),
            "A2" => Some(Self::A2),
            "B1" => Some(Self::B1),
            "B2" => Some(Self::B2),
            "C1" => Some(Self::C1),
            "C2" => Some(Self::C2),
            _ => None,
        }
    }
}

/// Three-tier grading shared by leadership, readiness, and attrition columns.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum GradeTier {
    High,
    Medium,
    Low,
}

impl GradeTier {
    pub const fn label(self) -> &'static str {
        match self {
            Self::High => "High",
            Self::Medium => "Medium",
            Self::Low => "Low",
        }
    }

    pub fn parse(raw: &str) -> Option<Self> {
        match raw.trim().to_ascii_lowercase().as_str() {
            "high" => Some(Self::High),
            "medium" => Some(Self::Medium),
            "low" => Some(Self::Low),
            _ => None,
        }
    }

    /// Leadership columns may carry Yes/No instead of High/Medium/Low.
    pub fn parse_leadership(raw: &str) -> Option<Self> {
        match raw.trim().to_ascii_lowercase().as_str() {
            "yes" => Some(Self::High),
            "no" => Some(Self::Low),
            other => Self::parse(other),
        }
    }
}

/// One roster row, with optional columns preserved as `None` when the
/// source omits or garbles them.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct PersonnelRecord {
    pub id: String,
    pub name: String,
    pub rank: String,
    pub primary_skill: Option<String>,
    pub years_of_service: Option<f64>,
    pub performance: Option<PerformanceRating>,
    pub training_score: Option<f64>,
    pub training_course: Option<String>,
    pub medical_category: Option<MedicalCategory>,
    pub bmi: Option<f64>,
    pub last_medical_checkup: Option<NaiveDate>,
    pub leadership_potential: Option<GradeTier>,
    pub readiness_level: Option<GradeTier>,
    pub attrition_risk: Option<GradeTier>,
    pub missions_completed: Option<f64>,
}

/// Immutable roster table handed to every analytics operation.
///
/// Derived scores are never written back here; enrichment copies rows
/// into a request-scoped [`crate::insights::EnrichedRoster`].
#[derive(Debug, Clone, Default)]
pub struct RosterSnapshot {
    records: Vec<PersonnelRecord>,
    has_attrition_column: bool,
}

impl RosterSnapshot {
    pub fn new(records: Vec<PersonnelRecord>, has_attrition_column: bool) -> Self {
        Self {
            records,
            has_attrition_column,
        }
    }

    pub fn records(&self) -> &[PersonnelRecord] {
        &self.records
    }

    pub fn len(&self) -> usize {
        self.records.len()
    }

    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }

    /// Whether the source dataset carried an attrition-risk column at all,
    /// as opposed to individual rows leaving the cell blank.
    pub fn has_attrition_column(&self) -> bool {
        self.has_attrition_column
    }

    /// Distinct primary-skill values in first-appearance order.
    pub fn distinct_skills(&self) -> Vec<String> {
        let mut skills: Vec<String> = Vec::new();
        for record in &self.records {
            if let Some(skill) = &record.primary_skill {
                if !skills.iter().any(|known| known == skill) {
                    skills.push(skill.clone());
                }
            }
        }
        skills
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn performance_parses_labels_and_numbers() {
        assert_eq!(
            PerformanceRating::parse("Excellent"),
            Some(PerformanceRating::Excellent)
        );
        assert_eq!(
            PerformanceRating::parse("below average"),
            Some(PerformanceRating::BelowAverage)
        );
        assert_eq!(
            PerformanceRating::parse("4"),
            Some(PerformanceRating::Good)
        );
        assert_eq!(
            PerformanceRating::parse("4.6"),
            Some(PerformanceRating::Excellent)
        );
        assert_eq!(PerformanceRating::parse("unrated"), None);
        assert_eq!(PerformanceRating::parse(""), None);
    }

    #[test]
    fn performance_clamps_out_of_range_numbers() {
        assert_eq!(PerformanceRating::from_numeric(0.0), PerformanceRating::Poor);
        assert_eq!(
            PerformanceRating::from_numeric(9.0),
            PerformanceRating::Excellent
        );
    }

    #[test]
    fn performance_orders_by_grade() {
        assert!(PerformanceRating::Excellent > PerformanceRating::Good);
        assert!(PerformanceRating::BelowAverage < PerformanceRating::Average);
    }

    #[test]
    fn leadership_accepts_yes_no_synonyms() {
        assert_eq!(GradeTier::parse_leadership("Yes"), Some(GradeTier::High));
        assert_eq!(GradeTier::parse_leadership("no"), Some(GradeTier::Low));
        assert_eq!(GradeTier::parse_leadership("Medium"), Some(GradeTier::Medium));
        assert_eq!(GradeTier::parse_leadership("maybe"), None);
    }

    #[test]
    fn medical_category_parse_is_case_insensitive() {
        assert_eq!(MedicalCategory::parse("a1"), Some(MedicalCategory::A1));
        assert_eq!(MedicalCategory::parse(" C2 "), Some(MedicalCategory::C2));
        assert_eq!(MedicalCategory::parse("D1"), None);
    }

    #[test]
    fn distinct_skills_preserves_first_appearance_order() {
        let mut records = Vec::new();
        for skill in ["Pilot", "Engineer", "Pilot", "Medical"] {
            records.push(PersonnelRecord {
                id: format!("P-{}", records.len()),
                name: "Test".to_string(),
                rank: "Sergeant".to_string(),
                primary_skill: Some(skill.to_string()),
                years_of_service: None,
                performance: None,
                training_score: None,
                training_course: None,
                medical_category: None,
                bmi: None,
                last_medical_checkup: None,
                leadership_potential: None,
                readiness_level: None,
                attrition_risk: None,
                missions_completed: None,
            });
        }

        let snapshot = RosterSnapshot::new(records, false);
        assert_eq!(snapshot.distinct_skills(), vec!["Pilot", "Engineer", "Medical"]);
    }
}
