//! The five what-if scenario analyzers. Each one filters the enriched
//! roster to an affected cohort, derives a handful of summary metrics,
//! and packages the result as an outcome with a bullet-point analysis.

use super::query;
use super::{WhatIfAction, WhatIfData, WhatIfOutcome};
use crate::insights::reports::views::{category_label, performance_label, tier_label};
use crate::insights::scores::{EnrichedRoster, EnrichedRow};
use crate::roster::{GradeTier, MedicalCategory, PerformanceRating};
use serde::Serialize;

const OFFICER_RANK_TERMS: &[&str] = &["officer", "captain", "major", "colonel"];

const SENIOR_YEARS: f64 = 15.0;
const TRAINING_COST_MULTIPLIER: f64 = 100.0;
const MEDICAL_COST_MULTIPLIER: f64 = 50.0;

#[derive(Debug, Clone, Serialize)]
pub struct RetirementRow {
    pub id: String,
    pub name: String,
    pub rank: String,
    pub primary_skill: Option<String>,
    pub years_of_service: Option<f64>,
    pub performance_label: &'static str,
    pub leadership_label: &'static str,
}

#[derive(Debug, Clone, Serialize)]
pub struct RedeploymentRow {
    pub id: String,
    pub name: String,
    pub rank: String,
    pub primary_skill: Option<String>,
    pub performance_label: &'static str,
    pub training_score: Option<f64>,
}

#[derive(Debug, Clone, Serialize)]
pub struct GroundingRow {
    pub id: String,
    pub name: String,
    pub rank: String,
    pub category_label: &'static str,
    pub medical_score: f64,
    pub bmi: Option<f64>,
}

#[derive(Debug, Clone, Serialize)]
pub struct PromotionRow {
    pub id: String,
    pub name: String,
    pub rank: String,
    pub primary_skill: Option<String>,
    pub years_of_service: Option<f64>,
    pub performance_label: &'static str,
    pub leadership_label: &'static str,
}

#[derive(Debug, Clone, Serialize)]
pub struct BudgetRow {
    pub id: String,
    pub name: String,
    pub rank: String,
    pub training_score: Option<f64>,
    pub medical_score: f64,
    pub performance_label: &'static str,
}

fn skill_contains(row: &EnrichedRow, needle: &str) -> bool {
    row.record
        .primary_skill
        .as_deref()
        .map(|skill| skill.to_lowercase().contains(needle))
        .unwrap_or(false)
}

fn mean(values: impl Iterator<Item = f64>) -> f64 {
    let mut sum = 0.0;
    let mut count = 0usize;
    for value in values {
        sum += value;
        count += 1;
    }
    if count == 0 {
        0.0
    } else {
        sum / count as f64
    }
}

// "Excellent 3, Good 1" style summary, strongest rating first.
fn performance_distribution(rows: &[&EnrichedRow]) -> String {
    let ladder = [
        Some(PerformanceRating::Excellent),
        Some(PerformanceRating::Good),
        Some(PerformanceRating::Average),
        Some(PerformanceRating::BelowAverage),
        Some(PerformanceRating::Poor),
        None,
    ];

    let parts: Vec<String> = ladder
        .iter()
        .filter_map(|rating| {
            let count = rows
                .iter()
                .filter(|row| row.record.performance == *rating)
                .count();
            if count == 0 {
                return None;
            }
            Some(format!("{} {count}", performance_label(*rating)))
        })
        .collect();

    if parts.is_empty() {
        "none".to_string()
    } else {
        parts.join(", ")
    }
}

/// Losses if the mentioned cohort retired. Criteria stack: a query naming
/// both "senior" and "pilot" narrows to senior pilots; a query naming
/// none keeps the whole roster in scope.
pub(super) fn retirement(roster: &EnrichedRoster, text: &str) -> WhatIfOutcome {
    let wants_senior = text.contains("senior");
    let wants_officer = text.contains("officer");
    let wants_pilot = text.contains("pilot");
    let wants_engineer = text.contains("engineer");

    let affected: Vec<&EnrichedRow> = roster
        .rows()
        .iter()
        .filter(|row| {
            if wants_senior && row.record.years_of_service.unwrap_or(0.0) < SENIOR_YEARS {
                return false;
            }
            if wants_officer {
                let rank = row.record.rank.to_lowercase();
                if !OFFICER_RANK_TERMS.iter().any(|term| rank.contains(term)) {
                    return false;
                }
            }
            if wants_pilot && !skill_contains(row, "pilot") {
                return false;
            }
            if wants_engineer && !skill_contains(row, "engineer") {
                return false;
            }
            true
        })
        .collect();

    let average_years = mean(
        affected
            .iter()
            .filter_map(|row| row.record.years_of_service),
    );
    let leadership_loss = affected
        .iter()
        .filter(|row| row.record.leadership_potential == Some(GradeTier::High))
        .count();

    let analysis = format!(
        "Retirement Impact Analysis:\n\
         - {} personnel would be affected\n\
         - Average experience loss: {average_years:.1} years\n\
         - Performance distribution: {}\n\
         - Leadership potential loss: {leadership_loss} high-potential individuals",
        affected.len(),
        performance_distribution(&affected),
    );

    let recommendations = vec![
        "Begin knowledge transfer programs immediately".to_string(),
        "Identify and fast-track successors for key positions".to_string(),
        "Consider phased retirement to retain expertise".to_string(),
        "Document critical institutional knowledge".to_string(),
    ];

    let rows = affected
        .iter()
        .map(|row| RetirementRow {
            id: row.record.id.clone(),
            name: row.record.name.clone(),
            rank: row.record.rank.clone(),
            primary_skill: row.record.primary_skill.clone(),
            years_of_service: row.record.years_of_service,
            performance_label: performance_label(row.record.performance),
            leadership_label: tier_label(row.record.leadership_potential),
        })
        .collect();

    WhatIfOutcome {
        action: WhatIfAction::RetirementImpact,
        analysis,
        recommendations,
        data: WhatIfData::Retirement(rows),
    }
}

/// Movement between skills. With a source skill the cohort is everyone
/// holding it and the vacancy count equals the cohort; without one the
/// cohort falls back to mid-band performers available for a move.
pub(super) fn redeployment(roster: &EnrichedRoster, text: &str) -> WhatIfOutcome {
    let skills = roster.distinct_skills();
    let (from_skill, to_skill) = query::from_to_skills(text, &skills);

    let affected: Vec<&EnrichedRow> = match &from_skill {
        Some(from) => {
            let needle = from.to_lowercase();
            roster
                .rows()
                .iter()
                .filter(|row| skill_contains(row, &needle))
                .collect()
        }
        None => roster
            .rows()
            .iter()
            .filter(|row| {
                row.record
                    .performance
                    .map(|rating| (2..=3).contains(&rating.numeric()))
                    .unwrap_or(false)
            })
            .collect(),
    };

    let mut lines = vec![
        "Redeployment Impact Analysis:".to_string(),
        format!("- {} personnel available for redeployment", affected.len()),
    ];
    if let (Some(from), Some(to)) = (&from_skill, &to_skill) {
        lines.push(format!("- Moving personnel from {from} to {to}"));
    }
    if let Some(from) = &from_skill {
        lines.push(format!(
            "- Projected vacancy in {from}: {} position(s)",
            affected.len()
        ));
    }

    let recommendations = vec![
        "Provide cross-training before redeployment".to_string(),
        "Stagger moves to avoid capability gaps".to_string(),
        "Backfill vacated roles from the training pipeline".to_string(),
    ];

    let rows = affected
        .iter()
        .map(|row| RedeploymentRow {
            id: row.record.id.clone(),
            name: row.record.name.clone(),
            rank: row.record.rank.clone(),
            primary_skill: row.record.primary_skill.clone(),
            performance_label: performance_label(row.record.performance),
            training_score: row.record.training_score,
        })
        .collect();

    WhatIfOutcome {
        action: WhatIfAction::RedeploymentImpact,
        analysis: lines.join("\n"),
        recommendations,
        data: WhatIfData::Redeployment(rows),
    }
}

fn is_grounded(row: &EnrichedRow) -> bool {
    let poor_category = matches!(
        row.record.medical_category,
        Some(MedicalCategory::C1) | Some(MedicalCategory::C2)
    );
    let low_score = row.scores.medical < 70.0;
    let out_of_band_bmi = row
        .record
        .bmi
        .map(|bmi| !(18.5..=30.0).contains(&bmi))
        .unwrap_or(false);

    poor_category || low_score || out_of_band_bmi
}

fn is_replacement_grade(row: &EnrichedRow) -> bool {
    let fit_category = matches!(
        row.record.medical_category,
        Some(MedicalCategory::A1) | Some(MedicalCategory::A2) | Some(MedicalCategory::B1)
    );
    let strong_performer = row
        .record
        .performance
        .map(|rating| rating.numeric() >= 4)
        .unwrap_or(false);
    let well_trained = row.record.training_score.unwrap_or(0.0) >= 80.0;

    fit_category && strong_performer && well_trained
}

/// Medical grounding of the pilot force: who fails the fitness screen,
/// who among the remaining pilots could step in, and how hard readiness
/// is hit.
pub(super) fn grounding(roster: &EnrichedRoster) -> WhatIfOutcome {
    let pilots: Vec<&EnrichedRow> = roster
        .rows()
        .iter()
        .filter(|row| skill_contains(row, "pilot"))
        .collect();

    let grounded: Vec<&EnrichedRow> = pilots
        .iter()
        .copied()
        .filter(|row| is_grounded(row))
        .collect();
    let replacements = pilots
        .iter()
        .filter(|row| !is_grounded(row) && is_replacement_grade(row))
        .count();

    let grounded_share = if pilots.is_empty() {
        0.0
    } else {
        100.0 * grounded.len() as f64 / pilots.len() as f64
    };
    let impact = if grounded_share > 20.0 {
        "High"
    } else if grounded_share > 10.0 {
        "Medium"
    } else {
        "Low"
    };

    let analysis = format!(
        "Pilot Grounding Impact Analysis:\n\
         - {} pilots would be grounded ({grounded_share:.1}% of pilot force)\n\
         - {replacements} pilots available as replacements\n\
         - Operational readiness impact: {impact}",
        grounded.len(),
    );

    let recommendations = vec![
        "Schedule medical reviews for borderline cases".to_string(),
        "Accelerate readiness checks for replacement pilots".to_string(),
        "Adjust sortie schedules while capacity is reduced".to_string(),
    ];

    let rows = grounded
        .iter()
        .map(|row| GroundingRow {
            id: row.record.id.clone(),
            name: row.record.name.clone(),
            rank: row.record.rank.clone(),
            category_label: category_label(row.record.medical_category),
            medical_score: row.scores.medical,
            bmi: row.record.bmi,
        })
        .collect();

    WhatIfOutcome {
        action: WhatIfAction::GroundingImpact,
        analysis,
        recommendations,
        data: WhatIfData::Grounding(rows),
    }
}

/// Promotion-ready cohort: high leadership potential backed by strong
/// performance and at least five years in service.
pub(super) fn promotion(roster: &EnrichedRoster) -> WhatIfOutcome {
    let mut candidates: Vec<&EnrichedRow> = roster
        .rows()
        .iter()
        .filter(|row| {
            row.record.leadership_potential == Some(GradeTier::High)
                && row
                    .record
                    .performance
                    .map(|rating| rating.numeric() >= 4)
                    .unwrap_or(false)
                && row.record.years_of_service.unwrap_or(0.0) >= 5.0
        })
        .collect();

    candidates.sort_by(|a, b| {
        b.scores.leadership.cmp(&a.scores.leadership).then(
            b.record
                .performance
                .map(|rating| rating.numeric())
                .unwrap_or(0)
                .cmp(&a.record.performance.map(|rating| rating.numeric()).unwrap_or(0)),
        )
    });

    let mut by_skill: std::collections::BTreeMap<String, usize> = std::collections::BTreeMap::new();
    for row in &candidates {
        let skill = row
            .record
            .primary_skill
            .clone()
            .unwrap_or_else(|| "Unassigned".to_string());
        *by_skill.entry(skill).or_default() += 1;
    }
    let skill_summary = if by_skill.is_empty() {
        "none".to_string()
    } else {
        by_skill
            .iter()
            .map(|(skill, count)| format!("{skill} {count}"))
            .collect::<Vec<_>>()
            .join(", ")
    };

    let bench = if candidates.len() > 20 {
        "Strong"
    } else if candidates.len() > 10 {
        "Moderate"
    } else {
        "Weak"
    };

    let analysis = format!(
        "Promotion Pipeline Analysis:\n\
         - {} personnel meet the promotion criteria\n\
         - Candidates by skill: {skill_summary}\n\
         - Leadership bench strength: {bench}",
        candidates.len(),
    );

    let recommendations = vec![
        "Convene a promotion board for the identified cohort".to_string(),
        "Pair candidates with senior mentors ahead of selection".to_string(),
        "Broaden the pipeline in under-represented skills".to_string(),
    ];

    let rows = candidates
        .iter()
        .map(|row| PromotionRow {
            id: row.record.id.clone(),
            name: row.record.name.clone(),
            rank: row.record.rank.clone(),
            primary_skill: row.record.primary_skill.clone(),
            years_of_service: row.record.years_of_service,
            performance_label: performance_label(row.record.performance),
            leadership_label: tier_label(row.record.leadership_potential),
        })
        .collect();

    WhatIfOutcome {
        action: WhatIfAction::PromotionImpact,
        analysis,
        recommendations,
        data: WhatIfData::Promotion(rows),
    }
}

/// Cost picture: estimated training and medical spend across the whole
/// roster, plus the rows likely to drive it.
pub(super) fn budget(roster: &EnrichedRoster) -> WhatIfOutcome {
    let headcount = roster.len();

    let average_training = mean(
        roster
            .rows()
            .iter()
            .filter_map(|row| row.record.training_score),
    );
    let average_medical = mean(roster.rows().iter().map(|row| row.scores.medical));

    let training_cost = average_training * TRAINING_COST_MULTIPLIER * headcount as f64;
    let medical_cost = average_medical * MEDICAL_COST_MULTIPLIER * headcount as f64;

    let high_cost: Vec<&EnrichedRow> = roster
        .rows()
        .iter()
        .filter(|row| {
            let heavy_training = row.record.training_score.unwrap_or(0.0) > 80.0;
            let heavy_medical = row.scores.medical < 70.0;
            let mid_performer = row
                .record
                .performance
                .map(|rating| (2..=3).contains(&rating.numeric()))
                .unwrap_or(false);
            heavy_training || heavy_medical || mid_performer
        })
        .collect();

    let analysis = format!(
        "Budget Impact Analysis:\n\
         - Total personnel: {headcount}\n\
         - Estimated training costs: ${training_cost:.0}\n\
         - Estimated medical costs: ${medical_cost:.0}\n\
         - High-cost personnel: {}",
        high_cost.len(),
    );

    let recommendations = vec![
        "Review training plans for the highest-cost cohort".to_string(),
        "Negotiate bulk rates for recurring medical screening".to_string(),
        "Target development spend at mid-band performers".to_string(),
    ];

    let rows = high_cost
        .iter()
        .map(|row| BudgetRow {
            id: row.record.id.clone(),
            name: row.record.name.clone(),
            rank: row.record.rank.clone(),
            training_score: row.record.training_score,
            medical_score: row.scores.medical,
            performance_label: performance_label(row.record.performance),
        })
        .collect();

    WhatIfOutcome {
        action: WhatIfAction::BudgetImpact,
        analysis,
        recommendations,
        data: WhatIfData::Budget(rows),
    }
}
