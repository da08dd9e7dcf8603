use crate::roster::{GradeTier, MedicalCategory, PersonnelRecord, RosterSnapshot};

pub const DEFAULT_MEDICAL_SCORE: f64 = 60.0;
pub const DEFAULT_LEADERSHIP_SCORE: u8 = 1;
pub const DEFAULT_READINESS_SCORE: u8 = 1;
pub const DEFAULT_ATTRITION_SCORE: u8 = 2;

/// Medical category to fitness score. Total function: anything the
/// examination board did not map lands on the default.
pub fn medical_score(category: Option<MedicalCategory>) -> f64 {
    match category {
        Some(MedicalCategory::A1) => 100.0,
        Some(MedicalCategory::A2) => 95.0,
        Some(MedicalCategory::B1) => 88.0,
        Some(MedicalCategory::B2) => 82.0,
        Some(MedicalCategory::C1) => 75.0,
        Some(MedicalCategory::C2) => 68.0,
        None => DEFAULT_MEDICAL_SCORE,
    }
}

pub fn leadership_score(tier: Option<GradeTier>) -> u8 {
    tier.map(tier_score).unwrap_or(DEFAULT_LEADERSHIP_SCORE)
}

pub fn readiness_score(tier: Option<GradeTier>) -> u8 {
    tier.map(tier_score).unwrap_or(DEFAULT_READINESS_SCORE)
}

pub fn attrition_score(tier: Option<GradeTier>) -> u8 {
    tier.map(tier_score).unwrap_or(DEFAULT_ATTRITION_SCORE)
}

pub const fn tier_score(tier: GradeTier) -> u8 {
    match tier {
        GradeTier::High => 3,
        GradeTier::Medium => 2,
        GradeTier::Low => 1,
    }
}

/// The four derived columns attached to each row during enrichment.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct DerivedScores {
    pub medical: f64,
    pub leadership: u8,
    pub readiness: u8,
    pub attrition: u8,
}

#[derive(Debug, Clone)]
pub struct EnrichedRow {
    pub record: PersonnelRecord,
    pub scores: DerivedScores,
}

impl EnrichedRow {
    fn from_record(record: &PersonnelRecord) -> Self {
        let scores = DerivedScores {
            medical: medical_score(record.medical_category),
            leadership: leadership_score(record.leadership_potential),
            readiness: readiness_score(record.readiness_level),
            attrition: attrition_score(record.attrition_risk),
        };

        Self {
            record: record.clone(),
            scores,
        }
    }
}

/// Request-scoped copy of the roster with derived scores attached.
/// Row order matches the source snapshot; the snapshot itself is never
/// touched.
#[derive(Debug, Clone)]
pub struct EnrichedRoster {
    rows: Vec<EnrichedRow>,
    has_attrition_column: bool,
}

impl EnrichedRoster {
    pub fn from_snapshot(snapshot: &RosterSnapshot) -> Self {
        let rows = snapshot
            .records()
            .iter()
            .map(EnrichedRow::from_record)
            .collect();

        Self {
            rows,
            has_attrition_column: snapshot.has_attrition_column(),
        }
    }

    pub fn rows(&self) -> &[EnrichedRow] {
        &self.rows
    }

    pub fn len(&self) -> usize {
        self.rows.len()
    }

    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }

    pub fn has_attrition_column(&self) -> bool {
        self.has_attrition_column
    }

    /// Largest observed mission count, floored at one so normalization
    /// never divides by zero.
    pub fn max_missions(&self) -> f64 {
        self.rows
            .iter()
            .filter_map(|row| row.record.missions_completed)
            .fold(1.0_f64, f64::max)
    }

    pub fn distinct_skills(&self) -> Vec<String> {
        let mut skills: Vec<String> = Vec::new();
        for row in &self.rows {
            if let Some(skill) = &row.record.primary_skill {
                if !skills.iter().any(|known| known == skill) {
                    skills.push(skill.clone());
                }
            }
        }
        skills
    }
}

impl RosterSnapshot {
    pub fn enrich(&self) -> EnrichedRoster {
        EnrichedRoster::from_snapshot(self)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::roster::PerformanceRating;

    pub(crate) fn record(id: &str) -> PersonnelRecord {
        PersonnelRecord {
            id: id.to_string(),
            name: format!("Member {id}"),
            rank: "Sergeant".to_string(),
            primary_skill: None,
            years_of_service: None,
            performance: Some(PerformanceRating::Average),
            training_score: None,
            training_course: None,
            medical_category: None,
            bmi: None,
            last_medical_checkup: None,
            leadership_potential: None,
            readiness_level: None,
            attrition_risk: None,
            missions_completed: None,
        }
    }

    #[test]
    fn medical_lookup_matches_examination_table() {
        assert_eq!(medical_score(Some(MedicalCategory::A1)), 100.0);
        assert_eq!(medical_score(Some(MedicalCategory::A2)), 95.0);
        assert_eq!(medical_score(Some(MedicalCategory::B1)), 88.0);
        assert_eq!(medical_score(Some(MedicalCategory::B2)), 82.0);
        assert_eq!(medical_score(Some(MedicalCategory::C1)), 75.0);
        assert_eq!(medical_score(Some(MedicalCategory::C2)), 68.0);
        assert_eq!(medical_score(None), DEFAULT_MEDICAL_SCORE);
    }

    #[test]
    fn tier_lookups_default_instead_of_failing() {
        assert_eq!(leadership_score(Some(GradeTier::High)), 3);
        assert_eq!(leadership_score(None), 1);
        assert_eq!(readiness_score(Some(GradeTier::Medium)), 2);
        assert_eq!(readiness_score(None), 1);
        assert_eq!(attrition_score(Some(GradeTier::Low)), 1);
        assert_eq!(attrition_score(None), 2);
    }

    #[test]
    fn enrichment_preserves_rows_and_order() {
        let records = vec![record("A"), record("B"), record("C")];
        let snapshot = RosterSnapshot::new(records.clone(), false);
        let enriched = snapshot.enrich();

        assert_eq!(enriched.len(), 3);
        for (row, source) in enriched.rows().iter().zip(&records) {
            assert_eq!(&row.record, source);
        }
        // Source snapshot untouched by enrichment.
        assert_eq!(snapshot.records(), records.as_slice());
    }

    #[test]
    fn every_row_receives_scores_within_range() {
        let mut bad = record("X");
        bad.performance = None;
        let snapshot = RosterSnapshot::new(vec![record("A"), bad], false);

        for row in snapshot.enrich().rows() {
            assert!((60.0..=100.0).contains(&row.scores.medical));
            assert!((1..=3).contains(&row.scores.leadership));
            assert!((1..=3).contains(&row.scores.readiness));
            assert!((1..=3).contains(&row.scores.attrition));
        }
    }

    #[test]
    fn max_missions_floors_at_one() {
        let snapshot = RosterSnapshot::new(vec![record("A")], false);
        assert_eq!(snapshot.enrich().max_missions(), 1.0);

        let mut flown = record("B");
        flown.missions_completed = Some(42.0);
        let snapshot = RosterSnapshot::new(vec![record("A"), flown], false);
        assert_eq!(snapshot.enrich().max_missions(), 42.0);
    }
}
