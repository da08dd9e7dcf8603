//! Free-text what-if questions routed end to end over a CSV roster.

use personnel_insight::insights::{EnrichedRoster, WhatIfAction, WhatIfData, WhatIfEngine};
use personnel_insight::roster::RosterLoader;
use std::io::Cursor;

const HEADER: &str = "Personnel_ID,Name,Rank,Primary_Skill,Years_of_Service,Performance_Rating,Training_Score,Training_Course,Medical_Category,BMI,Last_Medical_Checkup,Leadership_Potential,Readiness_Level,Attrition_Risk,Missions_Completed";

fn roster() -> EnrichedRoster {
    let csv = format!(
        "{HEADER}\n\
         IAF-001,Arjun Rao,Squadron Leader,Fighter Pilot,18,Excellent,88,,A1,23.1,,High,High,Low,40\n\
         IAF-002,Meera Iyer,Flight Lieutenant,Fighter Pilot,4,Good,85,,A2,22.0,,Medium,High,High,12\n\
         IAF-003,Dev Nair,Corporal,Engineer,9,Average,55,,B1,26.3,,Low,Medium,Medium,6\n\
         IAF-004,Sana Qureshi,Sergeant,Medical,2,Below Average,38,,C1,29.0,,Low,Low,High,1\n\
         IAF-005,Rohit Sen,Wing Commander,Engineer,22,Good,91,,B2,24.8,,High,Medium,Low,28\n\
         IAF-006,Kiran Shah,Corporal,Fighter Pilot,16,Good,70,,C2,31.0,,Medium,High,Medium,22\n"
    );
    RosterLoader::from_reader(Cursor::new(csv))
        .expect("roster loads")
        .enrich()
}

fn ask(question: &str) -> personnel_insight::insights::WhatIfOutcome {
    WhatIfEngine::new().run(&roster(), question)
}

#[test]
fn senior_pilot_retirement_is_scoped_to_senior_pilots() {
    let outcome = ask("who should retire, senior pilots");

    assert_eq!(outcome.action, WhatIfAction::RetirementImpact);
    assert_eq!(outcome.action.tag(), "retirement_impact");
    assert!(!outcome.recommendations.is_empty());

    let WhatIfData::Retirement(rows) = &outcome.data else {
        panic!("expected retirement rows");
    };
    assert_eq!(rows.len(), 2);
    for row in rows {
        assert!(row.years_of_service.unwrap_or(0.0) >= 15.0);
        assert!(row
            .primary_skill
            .as_deref()
            .unwrap_or_default()
            .contains("Pilot"));
    }
}

#[test]
fn redeployment_question_reports_the_vacated_skill() {
    let outcome = ask("what happens if we transfer people from engineer to medical duty?");

    assert_eq!(outcome.action, WhatIfAction::RedeploymentImpact);
    assert!(outcome.analysis.contains("2 personnel available"));
    assert!(outcome
        .analysis
        .contains("Projected vacancy in Engineer: 2 position(s)"));
}

#[test]
fn grounding_question_screens_the_pilot_force() {
    let outcome = ask("which pilots are medically unfit to fly?");

    assert_eq!(outcome.action, WhatIfAction::GroundingImpact);
    let WhatIfData::Grounding(rows) = &outcome.data else {
        panic!("expected grounding rows");
    };
    // Only IAF-006 fails the screen: C2 category and out-of-band BMI.
    assert_eq!(rows.len(), 1);
    assert_eq!(rows[0].id, "IAF-006");
}

#[test]
fn promotion_question_applies_all_three_gates() {
    let outcome = ask("who is ready for promotion?");

    assert_eq!(outcome.action, WhatIfAction::PromotionImpact);
    let WhatIfData::Promotion(rows) = &outcome.data else {
        panic!("expected promotion rows");
    };
    // High leadership, performance >= Good, five years served.
    let ids: Vec<&str> = rows.iter().map(|row| row.id.as_str()).collect();
    assert_eq!(ids, vec!["IAF-001", "IAF-005"]);
}

#[test]
fn budget_question_totals_training_and_medical_spend() {
    let outcome = ask("what does the budget look like?");

    assert_eq!(outcome.action, WhatIfAction::BudgetImpact);
    assert!(outcome.analysis.contains("Total personnel: 6"));
    assert!(outcome.analysis.contains("Estimated training costs"));
    assert!(outcome.analysis.contains("Estimated medical costs"));
}

#[test]
fn training_threshold_question_parses_the_number() {
    let outcome = ask("show everyone with a training score below 56");

    assert_eq!(outcome.action, WhatIfAction::TrainingBelow(56));
    assert_eq!(outcome.action.tag(), "show_training_below_56");

    let WhatIfData::TrainingGaps(rows) = &outcome.data else {
        panic!("expected training rows");
    };
    assert_eq!(rows.len(), 2);
    assert_eq!(rows[0].id, "IAF-004");
    assert_eq!(rows[1].id, "IAF-003");
}

#[test]
fn team_question_reads_headcount_from_the_text() {
    let outcome = ask("pick a strike team of 3");

    assert_eq!(outcome.action, WhatIfAction::SelectTeam);
    let WhatIfData::Team(rows) = &outcome.data else {
        panic!("expected team rows");
    };
    assert_eq!(rows.len(), 3);
    assert!(rows.windows(2).all(|pair| pair[0].overall >= pair[1].overall));
}

#[test]
fn unrecognized_question_defaults_to_attrition() {
    let outcome = ask("random unrelated text");

    assert_eq!(outcome.action, WhatIfAction::ShowAttrition);
    assert_eq!(outcome.action.tag(), "show_attrition");

    let WhatIfData::Attrition(rows) = &outcome.data else {
        panic!("expected attrition rows");
    };
    assert_eq!(rows.len(), 6);
}
