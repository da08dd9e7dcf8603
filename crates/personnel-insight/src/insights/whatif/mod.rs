//! Keyword-routed what-if engine. A free-text question is normalized,
//! matched against an ordered rule table, and dispatched either to one
//! of the scenario analyzers or to a direct roster lookup. Unrecognized
//! questions fall back to the attrition ranking so the caller always
//! gets an answer.

pub mod scenarios;

mod query;

use super::reports::views::{AttritionRow, LeadershipRow, TeamMemberRow, TrainingGapRow};
use super::reports;
use super::scores::EnrichedRoster;
use super::team::{self, TeamRequest, DEFAULT_TEAM_HEADCOUNT};
use scenarios::{BudgetRow, GroundingRow, PromotionRow, RedeploymentRow, RetirementRow};
use serde::{Serialize, Serializer};
use std::sync::Arc;

const RETIREMENT_TERMS: &[&str] = &["retire", "retiring", "retirement"];
const REDEPLOYMENT_TERMS: &[&str] = &["redeploy", "redeployment", "transfer", "move"];
const GROUNDING_TERMS: &[&str] = &["ground", "grounding", "medical", "unfit", "disqualify"];
const PROMOTION_TERMS: &[&str] = &["promote", "promotion", "advance"];
const BUDGET_TERMS: &[&str] = &["budget", "cost", "financial", "expense"];
const THRESHOLD_TERMS: &[&str] = &["threshold", "score", "<", "less than", "below"];
const LEADERSHIP_TERMS: &[&str] = &["leaders", "leadership"];
const TEAM_TERMS: &[&str] = &["team", "readiness"];

/// Machine-readable tag describing how a question was interpreted.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum WhatIfAction {
    RetirementImpact,
    RedeploymentImpact,
    GroundingImpact,
    PromotionImpact,
    BudgetImpact,
    TrainingBelow(u32),
    ShowLeadership,
    SelectTeam,
    ShowAttrition,
}

impl WhatIfAction {
    pub fn tag(self) -> String {
        match self {
            Self::RetirementImpact => "retirement_impact".to_string(),
            Self::RedeploymentImpact => "redeployment_impact".to_string(),
            Self::GroundingImpact => "grounding_impact".to_string(),
            Self::PromotionImpact => "promotion_impact".to_string(),
            Self::BudgetImpact => "budget_impact".to_string(),
            Self::TrainingBelow(threshold) => format!("show_training_below_{threshold}"),
            Self::ShowLeadership => "show_leadership".to_string(),
            Self::SelectTeam => "select_team".to_string(),
            Self::ShowAttrition => "show_attrition".to_string(),
        }
    }
}

impl Serialize for WhatIfAction {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(&self.tag())
    }
}

/// Tabular payload backing an outcome; the variant matches the action.
#[derive(Debug, Clone, Serialize)]
#[serde(untagged)]
pub enum WhatIfData {
    Retirement(Vec<RetirementRow>),
    Redeployment(Vec<RedeploymentRow>),
    Grounding(Vec<GroundingRow>),
    Promotion(Vec<PromotionRow>),
    Budget(Vec<BudgetRow>),
    TrainingGaps(Vec<TrainingGapRow>),
    Leadership(Vec<LeadershipRow>),
    Team(Vec<TeamMemberRow>),
    Attrition(Vec<AttritionRow>),
}

#[derive(Debug, Clone, Serialize)]
pub struct WhatIfOutcome {
    pub action: WhatIfAction,
    pub analysis: String,
    pub recommendations: Vec<String>,
    pub data: WhatIfData,
}

/// Optional hook for prose enrichment of an analysis, e.g. by a language
/// model behind a gateway. Returning `None` leaves the analysis as-is.
pub trait NarrativeClient: Send + Sync {
    fn enhance(&self, action: &str, analysis: &str) -> Option<String>;
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Intent {
    Retirement,
    Redeployment,
    Grounding,
    Promotion,
    Budget,
    TrainingThreshold,
    Leadership,
    Team,
}

type Matcher = fn(&str) -> bool;

fn matches_retirement(text: &str) -> bool {
    query::contains_any(text, RETIREMENT_TERMS)
}

fn matches_redeployment(text: &str) -> bool {
    query::contains_any(text, REDEPLOYMENT_TERMS)
}

fn matches_grounding(text: &str) -> bool {
    query::contains_any(text, GROUNDING_TERMS)
}

fn matches_promotion(text: &str) -> bool {
    query::contains_any(text, PROMOTION_TERMS)
}

fn matches_budget(text: &str) -> bool {
    query::contains_any(text, BUDGET_TERMS)
}

fn matches_training_threshold(text: &str) -> bool {
    text.contains("training") && query::contains_any(text, THRESHOLD_TERMS)
}

fn matches_leadership(text: &str) -> bool {
    query::contains_any(text, LEADERSHIP_TERMS)
}

fn matches_team(text: &str) -> bool {
    query::contains_any(text, TEAM_TERMS)
}

// Order is the routing priority: the first matching rule wins, so
// "retire the leadership team" is a retirement question.
const ROUTES: [(Matcher, Intent); 8] = [
    (matches_retirement, Intent::Retirement),
    (matches_redeployment, Intent::Redeployment),
    (matches_grounding, Intent::Grounding),
    (matches_promotion, Intent::Promotion),
    (matches_budget, Intent::Budget),
    (matches_training_threshold, Intent::TrainingThreshold),
    (matches_leadership, Intent::Leadership),
    (matches_team, Intent::Team),
];

fn classify(text: &str) -> Option<Intent> {
    ROUTES
        .iter()
        .find(|(matcher, _)| matcher(text))
        .map(|(_, intent)| *intent)
}

/// Entry point for free-text questions against an enriched roster.
#[derive(Default)]
pub struct WhatIfEngine {
    narrative: Option<Arc<dyn NarrativeClient>>,
}

impl WhatIfEngine {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_narrative(narrative: Arc<dyn NarrativeClient>) -> Self {
        Self {
            narrative: Some(narrative),
        }
    }

    pub fn run(&self, roster: &EnrichedRoster, question: &str) -> WhatIfOutcome {
        let text = query::normalize(question);
        let intent = classify(&text);
        tracing::debug!(?intent, "routed what-if question");

        let mut outcome = match intent {
            Some(Intent::Retirement) => scenarios::retirement(roster, &text),
            Some(Intent::Redeployment) => scenarios::redeployment(roster, &text),
            Some(Intent::Grounding) => scenarios::grounding(roster),
            Some(Intent::Promotion) => scenarios::promotion(roster),
            Some(Intent::Budget) => scenarios::budget(roster),
            Some(Intent::TrainingThreshold) => training_lookup(roster, &text),
            Some(Intent::Leadership) => leadership_lookup(roster, &text),
            Some(Intent::Team) => team_lookup(roster, &text),
            None => attrition_lookup(roster),
        };

        if let Some(client) = &self.narrative {
            if let Some(extra) = client.enhance(&outcome.action.tag(), &outcome.analysis) {
                outcome.analysis.push('\n');
                outcome.analysis.push_str(&extra);
            }
        }

        outcome
    }
}

fn training_lookup(roster: &EnrichedRoster, text: &str) -> WhatIfOutcome {
    let threshold = query::first_number(text, 2, 2)
        .unwrap_or(reports::DEFAULT_TRAINING_THRESHOLD as u32);
    let rows = reports::training_gaps(roster, f64::from(threshold));

    WhatIfOutcome {
        action: WhatIfAction::TrainingBelow(threshold),
        analysis: format!(
            "{} personnel score below the {threshold}% training threshold",
            rows.len()
        ),
        recommendations: Vec::new(),
        data: WhatIfData::TrainingGaps(rows),
    }
}

fn leadership_lookup(roster: &EnrichedRoster, text: &str) -> WhatIfOutcome {
    let skills = roster.distinct_skills();
    let skill_filter = query::mentioned_skills(text, &skills).into_iter().next();

    let mut rows = reports::leadership_ranking(roster);
    if let Some(skill) = &skill_filter {
        rows.retain(|row| {
            row.primary_skill
                .as_deref()
                .map(|candidate| candidate.eq_ignore_ascii_case(skill))
                .unwrap_or(false)
        });
    }
    rows.truncate(reports::DEFAULT_ATTRITION_TOP_N);

    let analysis = match &skill_filter {
        Some(skill) => format!("{} leadership candidates among {skill}", rows.len()),
        None => format!("{} leadership candidates, strongest potential first", rows.len()),
    };

    WhatIfOutcome {
        action: WhatIfAction::ShowLeadership,
        analysis,
        recommendations: Vec::new(),
        data: WhatIfData::Leadership(rows),
    }
}

fn team_lookup(roster: &EnrichedRoster, text: &str) -> WhatIfOutcome {
    let headcount = query::first_number(text, 1, 3)
        .map(|n| n as usize)
        .unwrap_or(DEFAULT_TEAM_HEADCOUNT);
    let required_roles = query::mentioned_skills(text, &roster.distinct_skills());

    let request = TeamRequest {
        headcount,
        required_roles: required_roles.clone(),
        restrict_to_roles: false,
    };
    let rows = team::select_team(roster, &request);

    let analysis = if required_roles.is_empty() {
        format!("Optimal team of {} personnel by overall score", rows.len())
    } else {
        format!(
            "Optimal team of {} personnel covering {}",
            rows.len(),
            required_roles.join(", ")
        )
    };

    WhatIfOutcome {
        action: WhatIfAction::SelectTeam,
        analysis,
        recommendations: Vec::new(),
        data: WhatIfData::Team(rows),
    }
}

fn attrition_lookup(roster: &EnrichedRoster) -> WhatIfOutcome {
    let rows = reports::attrition_ranking(roster, reports::DEFAULT_ATTRITION_TOP_N);

    WhatIfOutcome {
        action: WhatIfAction::ShowAttrition,
        analysis: format!(
            "{} personnel most at risk of leaving the organization",
            rows.len()
        ),
        recommendations: Vec::new(),
        data: WhatIfData::Attrition(rows),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::roster::{GradeTier, PerformanceRating, PersonnelRecord, RosterSnapshot};

    fn record(id: &str, skill: &str) -> PersonnelRecord {
        PersonnelRecord {
            id: id.to_string(),
            name: format!("Member {id}"),
            rank: "Sergeant".to_string(),
            primary_skill: Some(skill.to_string()),
            years_of_service: Some(6.0),
            performance: Some(PerformanceRating::Good),
            training_score: Some(70.0),
            training_course: None,
            medical_category: None,
            bmi: None,
            last_medical_checkup: None,
            leadership_potential: Some(GradeTier::Medium),
            readiness_level: Some(GradeTier::Medium),
            attrition_risk: None,
            missions_completed: Some(5.0),
        }
    }

    fn roster() -> EnrichedRoster {
        RosterSnapshot::new(
            vec![
                record("p1", "Pilot"),
                record("p2", "Pilot"),
                record("e1", "Engineer"),
                record("m1", "Medical"),
            ],
            false,
        )
        .enrich()
    }

    fn run(question: &str) -> WhatIfOutcome {
        WhatIfEngine::new().run(&roster(), question)
    }

    #[test]
    fn retirement_wins_over_later_rules() {
        let outcome = run("should the leadership team retire early?");
        assert_eq!(outcome.action, WhatIfAction::RetirementImpact);
    }

    #[test]
    fn grounding_routes_on_medical_terms() {
        let outcome = run("what if pilots are medically unfit?");
        assert_eq!(outcome.action, WhatIfAction::GroundingImpact);
    }

    #[test]
    fn training_threshold_needs_both_keyword_groups() {
        let outcome = run("show training below 45");
        assert_eq!(outcome.action, WhatIfAction::TrainingBelow(45));

        // "training" alone is not a threshold question.
        let outcome = run("how is training going for the team");
        assert_eq!(outcome.action, WhatIfAction::SelectTeam);
    }

    #[test]
    fn training_threshold_defaults_to_sixty() {
        let outcome = run("training scores that are too low");
        assert_eq!(outcome.action, WhatIfAction::TrainingBelow(60));
        assert_eq!(outcome.action.tag(), "show_training_below_60");
    }

    #[test]
    fn leadership_lookup_can_filter_by_skill() {
        let outcome = run("who are the leaders among our engineer staff?");
        assert_eq!(outcome.action, WhatIfAction::ShowLeadership);

        let WhatIfData::Leadership(rows) = &outcome.data else {
            panic!("expected leadership rows");
        };
        assert_eq!(rows.len(), 1);
        assert_eq!(rows[0].id, "e1");
    }

    #[test]
    fn team_lookup_reads_headcount_and_roles() {
        let outcome = run("build a team of 3 with an engineer");
        assert_eq!(outcome.action, WhatIfAction::SelectTeam);

        let WhatIfData::Team(rows) = &outcome.data else {
            panic!("expected team rows");
        };
        assert_eq!(rows.len(), 3);
        assert!(rows
            .iter()
            .any(|row| row.primary_skill.as_deref() == Some("Engineer")));
    }

    #[test]
    fn medical_terms_outrank_team_terms() {
        let outcome = run("build a team of 3 with a medical specialist");
        assert_eq!(outcome.action, WhatIfAction::GroundingImpact);
    }

    #[test]
    fn unrecognized_question_falls_back_to_attrition() {
        let outcome = run("random unrelated text");
        assert_eq!(outcome.action, WhatIfAction::ShowAttrition);

        let WhatIfData::Attrition(rows) = &outcome.data else {
            panic!("expected attrition rows");
        };
        assert_eq!(rows.len(), 4);
    }

    #[test]
    fn narrative_client_appends_to_analysis() {
        struct CannedNarrative;

        impl NarrativeClient for CannedNarrative {
            fn enhance(&self, action: &str, _analysis: &str) -> Option<String> {
                Some(format!("narrative for {action}"))
            }
        }

        let engine = WhatIfEngine::with_narrative(Arc::new(CannedNarrative));
        let outcome = engine.run(&roster(), "promotion readiness");
        assert!(outcome.analysis.ends_with("narrative for promotion_impact"));
    }
}
