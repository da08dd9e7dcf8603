pub mod views;

use super::scores::{tier_score, EnrichedRoster, EnrichedRow};
use crate::roster::GradeTier;
use std::cmp::Ordering;
use std::collections::BTreeMap;

use views::{
    category_label, performance_label, tier_label, AttritionRow, LeadershipRow, MedicalRow,
    RiskSource, SkillGroupMember, TrainingGapRow,
};

pub const DEFAULT_ATTRITION_TOP_N: usize = 50;
pub const DEFAULT_TRAINING_THRESHOLD: f64 = 60.0;

/// Personnel most at risk of leaving, highest risk first and shortest
/// tenure first within a tier. Falls back to a heuristic tier when the
/// dataset never carried an attrition-risk column.
pub fn attrition_ranking(roster: &EnrichedRoster, top_n: usize) -> Vec<AttritionRow> {
    let source = if roster.has_attrition_column() {
        RiskSource::Reported
    } else {
        RiskSource::Heuristic
    };

    let mut ranked: Vec<(u8, AttritionRow)> = roster
        .rows()
        .iter()
        .map(|row| {
            let risk = match source {
                RiskSource::Reported => row.record.attrition_risk.unwrap_or(GradeTier::Medium),
                RiskSource::Heuristic => heuristic_attrition_tier(row),
            };
            let score = match source {
                RiskSource::Reported => row.scores.attrition,
                RiskSource::Heuristic => tier_score(risk),
            };

            let view = AttritionRow {
                id: row.record.id.clone(),
                name: row.record.name.clone(),
                rank: row.record.rank.clone(),
                years_of_service: row.record.years_of_service,
                risk,
                risk_label: risk.label(),
                risk_source: source,
                performance_label: performance_label(row.record.performance),
            };
            (score, view)
        })
        .collect();

    ranked.sort_by(|(score_a, a), (score_b, b)| {
        score_b.cmp(score_a).then_with(|| {
            years_for_sort(a.years_of_service)
                .partial_cmp(&years_for_sort(b.years_of_service))
                .unwrap_or(Ordering::Equal)
        })
    });

    ranked
        .into_iter()
        .take(top_n)
        .map(|(_, view)| view)
        .collect()
}

/// Heuristic risk tier used when no attrition column exists: one point
/// each for long tenure, weak performance, and a low training score.
fn heuristic_attrition_tier(row: &EnrichedRow) -> GradeTier {
    let long_tenure = row.record.years_of_service.unwrap_or(0.0) > 20.0;
    let weak_performance = row
        .record
        .performance
        .map(|rating| rating.numeric() <= 2)
        .unwrap_or(false);
    let low_training = row.record.training_score.unwrap_or(60.0) < 50.0;

    let points = [long_tenure, weak_performance, low_training]
        .iter()
        .filter(|flag| **flag)
        .count();

    match points {
        0 => GradeTier::Low,
        1 => GradeTier::Medium,
        _ => GradeTier::High,
    }
}

// Rows without a tenure value sort after everyone else within a tier.
fn years_for_sort(years: Option<f64>) -> f64 {
    years.unwrap_or(f64::INFINITY)
}

/// Identity and medical columns for every row, unfiltered.
pub fn medical_summary(roster: &EnrichedRoster) -> Vec<MedicalRow> {
    roster
        .rows()
        .iter()
        .map(|row| MedicalRow {
            id: row.record.id.clone(),
            name: row.record.name.clone(),
            rank: row.record.rank.clone(),
            medical_category: row.record.medical_category,
            category_label: category_label(row.record.medical_category),
            medical_score: row.scores.medical,
            bmi: row.record.bmi,
            last_medical_checkup: row.record.last_medical_checkup,
        })
        .collect()
}

/// Rows scoring below the threshold, weakest first. A missing training
/// score counts as zero so untested personnel surface at the top.
pub fn training_gaps(roster: &EnrichedRoster, threshold: f64) -> Vec<TrainingGapRow> {
    let mut rows: Vec<TrainingGapRow> = roster
        .rows()
        .iter()
        .filter_map(|row| {
            let score = row.record.training_score.unwrap_or(0.0);
            if score >= threshold {
                return None;
            }
            Some(TrainingGapRow {
                id: row.record.id.clone(),
                name: row.record.name.clone(),
                rank: row.record.rank.clone(),
                training_course: row.record.training_course.clone(),
                training_score: score,
                performance_label: performance_label(row.record.performance),
            })
        })
        .collect();

    rows.sort_by(|a, b| {
        a.training_score
            .partial_cmp(&b.training_score)
            .unwrap_or(Ordering::Equal)
    });
    rows
}

/// Leadership candidates, strongest potential first, better performers
/// first within a tier.
pub fn leadership_ranking(roster: &EnrichedRoster) -> Vec<LeadershipRow> {
    let mut ranked: Vec<(u8, u8, LeadershipRow)> = roster
        .rows()
        .iter()
        .map(|row| {
            let performance = row
                .record
                .performance
                .map(|rating| rating.numeric())
                .unwrap_or(0);
            let view = LeadershipRow {
                id: row.record.id.clone(),
                name: row.record.name.clone(),
                rank: row.record.rank.clone(),
                primary_skill: row.record.primary_skill.clone(),
                leadership_potential: row.record.leadership_potential,
                leadership_label: tier_label(row.record.leadership_potential),
                performance_label: performance_label(row.record.performance),
                missions_completed: row.record.missions_completed,
            };
            (row.scores.leadership, performance, view)
        })
        .collect();

    ranked.sort_by(|(lead_a, perf_a, _), (lead_b, perf_b, _)| {
        lead_b.cmp(lead_a).then(perf_b.cmp(perf_a))
    });

    ranked.into_iter().map(|(_, _, view)| view).collect()
}

/// Rows partitioned by primary skill. Datasets without a skill column
/// produce an empty map rather than an error.
pub fn skill_groups(roster: &EnrichedRoster) -> BTreeMap<String, Vec<SkillGroupMember>> {
    let mut groups: BTreeMap<String, Vec<SkillGroupMember>> = BTreeMap::new();

    for row in roster.rows() {
        let Some(skill) = &row.record.primary_skill else {
            continue;
        };

        groups
            .entry(skill.clone())
            .or_default()
            .push(SkillGroupMember {
                id: row.record.id.clone(),
                name: row.record.name.clone(),
                rank: row.record.rank.clone(),
                performance_label: performance_label(row.record.performance),
                readiness_label: tier_label(row.record.readiness_level),
                category_label: category_label(row.record.medical_category),
            });
    }

    groups
}
