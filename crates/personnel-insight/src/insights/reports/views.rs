use crate::roster::{GradeTier, MedicalCategory, PerformanceRating};
use chrono::NaiveDate;
use serde::Serialize;

pub(crate) const UNCLASSIFIED: &str = "Unclassified";
pub(crate) const UNRATED: &str = "Unrated";

/// Where an attrition tier came from: the dataset itself, or the
/// fallback heuristic applied when the column is missing.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum RiskSource {
    Reported,
    Heuristic,
}

impl RiskSource {
    pub const fn label(self) -> &'static str {
        match self {
            Self::Reported => "Reported",
            Self::Heuristic => "Heuristic",
        }
    }
}

#[derive(Debug, Clone, Serialize)]
pub struct AttritionRow {
    pub id: String,
    pub name: String,
    pub rank: String,
    pub years_of_service: Option<f64>,
    pub risk: GradeTier,
    pub risk_label: &'static str,
    pub risk_source: RiskSource,
    pub performance_label: &'static str,
}

#[derive(Debug, Clone, Serialize)]
pub struct MedicalRow {
    pub id: String,
    pub name: String,
    pub rank: String,
    pub medical_category: Option<MedicalCategory>,
    pub category_label: &'static str,
    pub medical_score: f64,
    pub bmi: Option<f64>,
    pub last_medical_checkup: Option<NaiveDate>,
}

#[derive(Debug, Clone, Serialize)]
pub struct TrainingGapRow {
    pub id: String,
    pub name: String,
    pub rank: String,
    pub training_course: Option<String>,
    pub training_score: f64,
    pub performance_label: &'static str,
}

#[derive(Debug, Clone, Serialize)]
pub struct LeadershipRow {
    pub id: String,
    pub name: String,
    pub rank: String,
    pub primary_skill: Option<String>,
    pub leadership_potential: Option<GradeTier>,
    pub leadership_label: &'static str,
    pub performance_label: &'static str,
    pub missions_completed: Option<f64>,
}

#[derive(Debug, Clone, Serialize)]
pub struct SkillGroupMember {
    pub id: String,
    pub name: String,
    pub rank: String,
    pub performance_label: &'static str,
    pub readiness_label: &'static str,
    pub category_label: &'static str,
}

#[derive(Debug, Clone, Serialize)]
pub struct TeamMemberRow {
    pub id: String,
    pub name: String,
    pub rank: String,
    pub primary_skill: Option<String>,
    pub readiness_label: &'static str,
    pub category_label: &'static str,
    pub leadership_label: &'static str,
    pub performance_label: &'static str,
    pub overall: f64,
}

pub(crate) fn performance_label(rating: Option<PerformanceRating>) -> &'static str {
    rating.map(PerformanceRating::label).unwrap_or(UNRATED)
}

pub(crate) fn tier_label(tier: Option<GradeTier>) -> &'static str {
    tier.map(GradeTier::label).unwrap_or(UNRATED)
}

pub(crate) fn category_label(category: Option<MedicalCategory>) -> &'static str {
    category.map(MedicalCategory::label).unwrap_or(UNCLASSIFIED)
}
