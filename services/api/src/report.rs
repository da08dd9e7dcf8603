use crate::infra::sample_roster;
use clap::{Args, ValueEnum};
use personnel_insight::config::AppConfig;
use personnel_insight::error::AppError;
use personnel_insight::insights::reports::{
    self, DEFAULT_ATTRITION_TOP_N, DEFAULT_TRAINING_THRESHOLD,
};
use personnel_insight::insights::{
    select_team, EnrichedRoster, TeamRequest, WhatIfData, WhatIfEngine, DEFAULT_TEAM_HEADCOUNT,
};
use personnel_insight::roster::RosterLoader;
use std::path::PathBuf;

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub(crate) enum ReportKind {
    Attrition,
    Medical,
    Training,
    Leadership,
    Skills,
    Team,
}

#[derive(Args, Debug)]
pub(crate) struct ReportArgs {
    /// Which report to generate
    #[arg(value_enum)]
    pub(crate) kind: ReportKind,
    /// Roster CSV to load (defaults to ROSTER_CSV_PATH, then sample data)
    #[arg(long)]
    pub(crate) roster_csv: Option<PathBuf>,
    /// Row cap for the attrition report
    #[arg(long)]
    pub(crate) top_n: Option<usize>,
    /// Training score threshold for the training report
    #[arg(long)]
    pub(crate) threshold: Option<f64>,
    /// Team size for the team report
    #[arg(long)]
    pub(crate) headcount: Option<usize>,
    /// Role to include in the team (repeatable)
    #[arg(long = "role")]
    pub(crate) roles: Vec<String>,
    /// Only consider personnel holding one of the requested roles
    #[arg(long)]
    pub(crate) restrict: bool,
}

#[derive(Args, Debug)]
pub(crate) struct AskArgs {
    /// Free-text question, e.g. "who should retire, senior pilots"
    pub(crate) question: String,
    /// Roster CSV to load (defaults to ROSTER_CSV_PATH, then sample data)
    #[arg(long)]
    pub(crate) roster_csv: Option<PathBuf>,
    /// Print the full outcome as JSON instead of a summary
    #[arg(long)]
    pub(crate) json: bool,
}

fn load_enriched(roster_csv: Option<PathBuf>) -> Result<EnrichedRoster, AppError> {
    let path = match roster_csv {
        Some(path) => Some(path),
        None => AppConfig::load()?.data.roster_csv_path,
    };

    let snapshot = match path {
        Some(path) => RosterLoader::from_path(path)?,
        None => sample_roster(),
    };
    Ok(snapshot.enrich())
}

pub(crate) fn run_report(args: ReportArgs) -> Result<(), AppError> {
    let ReportArgs {
        kind,
        roster_csv,
        top_n,
        threshold,
        headcount,
        roles,
        restrict,
    } = args;

    let roster = load_enriched(roster_csv)?;
    println!("Roster: {} personnel", roster.len());

    match kind {
        ReportKind::Attrition => {
            let rows = reports::attrition_ranking(&roster, top_n.unwrap_or(DEFAULT_ATTRITION_TOP_N));
            println!("Attrition risk ({} rows, highest risk first)", rows.len());
            for row in rows {
                println!(
                    "  - {} {} [{}] risk {} ({}) | {} years | {}",
                    row.id,
                    row.name,
                    row.rank,
                    row.risk_label,
                    row.risk_source.label(),
                    row.years_of_service
                        .map(|years| format!("{years:.0}"))
                        .unwrap_or_else(|| "?".to_string()),
                    row.performance_label
                );
            }
        }
        ReportKind::Medical => {
            let rows = reports::medical_summary(&roster);
            println!("Medical summary ({} rows)", rows.len());
            for row in rows {
                println!(
                    "  - {} {} [{}] category {} score {:.0}",
                    row.id, row.name, row.rank, row.category_label, row.medical_score
                );
            }
        }
        ReportKind::Training => {
            let threshold = threshold.unwrap_or(DEFAULT_TRAINING_THRESHOLD);
            let rows = reports::training_gaps(&roster, threshold);
            println!("Training gaps below {threshold:.0} ({} rows, weakest first)", rows.len());
            for row in rows {
                println!(
                    "  - {} {} [{}] score {:.0} | {}",
                    row.id,
                    row.name,
                    row.rank,
                    row.training_score,
                    row.training_course.as_deref().unwrap_or("no course on record")
                );
            }
        }
        ReportKind::Leadership => {
            let rows = reports::leadership_ranking(&roster);
            println!("Leadership candidates ({} rows, strongest first)", rows.len());
            for row in rows {
                println!(
                    "  - {} {} [{}] potential {} | {} | {}",
                    row.id,
                    row.name,
                    row.rank,
                    row.leadership_label,
                    row.performance_label,
                    row.primary_skill.as_deref().unwrap_or("unassigned")
                );
            }
        }
        ReportKind::Skills => {
            let groups = reports::skill_groups(&roster);
            println!("Skill groups ({} groups)", groups.len());
            for (skill, members) in groups {
                println!("  {skill} ({} personnel)", members.len());
                for member in members {
                    println!(
                        "    - {} {} [{}] {} | readiness {}",
                        member.id,
                        member.name,
                        member.rank,
                        member.performance_label,
                        member.readiness_label
                    );
                }
            }
        }
        ReportKind::Team => {
            let request = TeamRequest {
                headcount: headcount.unwrap_or(DEFAULT_TEAM_HEADCOUNT),
                required_roles: roles,
                restrict_to_roles: restrict,
            };
            let members = select_team(&roster, &request);
            println!(
                "Selected team ({} of {} requested)",
                members.len(),
                request.headcount
            );
            for member in members {
                println!(
                    "  - {} {} [{}] {} | overall {:.2}",
                    member.id,
                    member.name,
                    member.rank,
                    member.primary_skill.as_deref().unwrap_or("unassigned"),
                    member.overall
                );
            }
        }
    }

    Ok(())
}

pub(crate) fn run_ask(args: AskArgs) -> Result<(), AppError> {
    let AskArgs {
        question,
        roster_csv,
        json,
    } = args;

    let roster = load_enriched(roster_csv)?;
    let outcome = WhatIfEngine::new().run(&roster, &question);

    if json {
        match serde_json::to_string_pretty(&outcome) {
            Ok(payload) => println!("{payload}"),
            Err(err) => println!("outcome unavailable as JSON: {err}"),
        }
        return Ok(());
    }

    println!("Action: {}", outcome.action.tag());
    println!("{}", outcome.analysis);
    if !outcome.recommendations.is_empty() {
        println!("Recommendations:");
        for recommendation in &outcome.recommendations {
            println!("  - {recommendation}");
        }
    }
    println!("Matching rows: {}", outcome_rows(&outcome.data));

    Ok(())
}

fn outcome_rows(data: &WhatIfData) -> usize {
    match data {
        WhatIfData::Retirement(rows) => rows.len(),
        WhatIfData::Redeployment(rows) => rows.len(),
        WhatIfData::Grounding(rows) => rows.len(),
        WhatIfData::Promotion(rows) => rows.len(),
        WhatIfData::Budget(rows) => rows.len(),
        WhatIfData::TrainingGaps(rows) => rows.len(),
        WhatIfData::Leadership(rows) => rows.len(),
        WhatIfData::Team(rows) => rows.len(),
        WhatIfData::Attrition(rows) => rows.len(),
    }
}
