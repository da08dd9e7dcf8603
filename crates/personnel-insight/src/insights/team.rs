use super::reports::views::{category_label, performance_label, tier_label, TeamMemberRow};
use super::scores::{EnrichedRoster, EnrichedRow};
use std::cmp::Ordering;

const READINESS_WEIGHT: f64 = 2.5;
const LEADERSHIP_WEIGHT: f64 = 1.5;
const PERFORMANCE_WEIGHT: f64 = 1.2;
const MEDICAL_WEIGHT: f64 = 1.0;
const TRAINING_WEIGHT: f64 = 0.6;
const MISSIONS_WEIGHT: f64 = 0.4;

pub const DEFAULT_TEAM_HEADCOUNT: usize = 10;

/// Team-composition request. With `restrict_to_roles` set, only the
/// named skills are candidates; otherwise the named skills are each
/// guaranteed one slot before the rest fill on merit.
#[derive(Debug, Clone, Default)]
pub struct TeamRequest {
    pub headcount: usize,
    pub required_roles: Vec<String>,
    pub restrict_to_roles: bool,
}

impl TeamRequest {
    pub fn sized(headcount: usize) -> Self {
        Self {
            headcount,
            ..Self::default()
        }
    }
}

/// Composite ranking metric. Weighted sum of readiness, leadership, and
/// normalized performance/medical/training/mission components; identical
/// inputs always produce identical scores and ordering.
fn overall_score(row: &EnrichedRow, performance_denominator: f64, missions_denominator: f64) -> f64 {
    let performance = row
        .record
        .performance
        .map(|rating| f64::from(rating.numeric()))
        .unwrap_or(0.0);
    let training = row.record.training_score.unwrap_or(0.0);
    let missions = row.record.missions_completed.unwrap_or(0.0);

    READINESS_WEIGHT * f64::from(row.scores.readiness)
        + LEADERSHIP_WEIGHT * f64::from(row.scores.leadership)
        + PERFORMANCE_WEIGHT * (performance / performance_denominator)
        + MEDICAL_WEIGHT * (row.scores.medical / 100.0)
        + TRAINING_WEIGHT * (training / 100.0)
        + MISSIONS_WEIGHT * (missions / missions_denominator)
}

// Performance normalizes against the 1-5 scale, or the observed maximum
// when a dataset sneaks in a larger one.
fn performance_denominator(roster: &EnrichedRoster) -> f64 {
    roster
        .rows()
        .iter()
        .filter_map(|row| row.record.performance)
        .map(|rating| f64::from(rating.numeric()))
        .fold(5.0_f64, f64::max)
}

pub fn select_team(roster: &EnrichedRoster, request: &TeamRequest) -> Vec<TeamMemberRow> {
    let perf_denominator = performance_denominator(roster);
    let missions_denominator = roster.max_missions();

    let mut candidates: Vec<(usize, f64)> = roster
        .rows()
        .iter()
        .enumerate()
        .map(|(index, row)| {
            (
                index,
                overall_score(row, perf_denominator, missions_denominator),
            )
        })
        .collect();

    if request.restrict_to_roles && !request.required_roles.is_empty() {
        candidates.retain(|(index, _)| {
            roster.rows()[*index]
                .record
                .primary_skill
                .as_deref()
                .map(|skill| {
                    request
                        .required_roles
                        .iter()
                        .any(|role| role.eq_ignore_ascii_case(skill))
                })
                .unwrap_or(false)
        });
    }

    let mut picked: Vec<(usize, f64)> = Vec::new();

    // Coverage mode: one reserved slot for the best candidate per
    // requested role; roles with no match are skipped silently.
    if !request.restrict_to_roles {
        for role in &request.required_roles {
            let best = candidates
                .iter()
                .filter(|(index, _)| {
                    roster.rows()[*index]
                        .record
                        .primary_skill
                        .as_deref()
                        .map(|skill| role.eq_ignore_ascii_case(skill))
                        .unwrap_or(false)
                })
                .filter(|(index, _)| !picked.iter().any(|(taken, _)| taken == index))
                .max_by(|(_, a), (_, b)| a.partial_cmp(b).unwrap_or(Ordering::Equal));

            if let Some(&choice) = best {
                picked.push(choice);
            }
        }
    }

    let mut remainder: Vec<(usize, f64)> = candidates
        .into_iter()
        .filter(|(index, _)| !picked.iter().any(|(taken, _)| taken == index))
        .collect();
    remainder.sort_by(|(_, a), (_, b)| b.partial_cmp(a).unwrap_or(Ordering::Equal));

    let open_slots = request.headcount.saturating_sub(picked.len());
    picked.extend(remainder.into_iter().take(open_slots));

    picked.sort_by(|(_, a), (_, b)| b.partial_cmp(a).unwrap_or(Ordering::Equal));
    picked.truncate(request.headcount);

    picked
        .into_iter()
        .map(|(index, overall)| {
            let row = &roster.rows()[index];
            TeamMemberRow {
                id: row.record.id.clone(),
                name: row.record.name.clone(),
                rank: row.record.rank.clone(),
                primary_skill: row.record.primary_skill.clone(),
                readiness_label: tier_label(row.record.readiness_level),
                category_label: category_label(row.record.medical_category),
                leadership_label: tier_label(row.record.leadership_potential),
                performance_label: performance_label(row.record.performance),
                overall,
            }
        })
        .collect()
}
