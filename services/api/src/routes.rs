use crate::infra::AppState;
use axum::http::{header, StatusCode};
use axum::response::IntoResponse;
use axum::Extension;
use axum::Json;
use personnel_insight::error::AppError;
use personnel_insight::insights::reports::views::{
    AttritionRow, LeadershipRow, MedicalRow, SkillGroupMember, TeamMemberRow, TrainingGapRow,
};
use personnel_insight::insights::reports::{
    self, DEFAULT_ATTRITION_TOP_N, DEFAULT_TRAINING_THRESHOLD,
};
use personnel_insight::insights::{
    select_team, EnrichedRoster, TeamRequest, WhatIfEngine, WhatIfOutcome, DEFAULT_TEAM_HEADCOUNT,
};
use personnel_insight::predict::{PredictionInput, PredictionOutcome};
use personnel_insight::roster::RosterLoader;
use serde::{Deserialize, Serialize};
use serde_json::json;
use std::collections::BTreeMap;
use std::io::Cursor;

#[derive(Debug, Default, Deserialize)]
pub(crate) struct AttritionReportRequest {
    #[serde(default)]
    pub(crate) top_n: Option<usize>,
    #[serde(default)]
    pub(crate) roster_csv: Option<String>,
}

#[derive(Debug, Default, Deserialize)]
pub(crate) struct RosterScopedRequest {
    #[serde(default)]
    pub(crate) roster_csv: Option<String>,
}

#[derive(Debug, Default, Deserialize)]
pub(crate) struct TrainingReportRequest {
    #[serde(default)]
    pub(crate) threshold: Option<f64>,
    #[serde(default)]
    pub(crate) roster_csv: Option<String>,
}

#[derive(Debug, Default, Deserialize)]
pub(crate) struct TeamSelectionRequest {
    #[serde(default)]
    pub(crate) headcount: Option<usize>,
    #[serde(default)]
    pub(crate) required_roles: Vec<String>,
    #[serde(default)]
    pub(crate) restrict_to_roles: bool,
    #[serde(default)]
    pub(crate) roster_csv: Option<String>,
}

#[derive(Debug, Deserialize)]
pub(crate) struct WhatIfRequest {
    pub(crate) question: String,
    #[serde(default)]
    pub(crate) roster_csv: Option<String>,
}

#[derive(Debug, Serialize)]
pub(crate) struct AttritionReportResponse {
    pub(crate) count: usize,
    pub(crate) rows: Vec<AttritionRow>,
}

#[derive(Debug, Serialize)]
pub(crate) struct MedicalReportResponse {
    pub(crate) count: usize,
    pub(crate) rows: Vec<MedicalRow>,
}

#[derive(Debug, Serialize)]
pub(crate) struct TrainingReportResponse {
    pub(crate) threshold: f64,
    pub(crate) count: usize,
    pub(crate) rows: Vec<TrainingGapRow>,
}

#[derive(Debug, Serialize)]
pub(crate) struct LeadershipReportResponse {
    pub(crate) count: usize,
    pub(crate) rows: Vec<LeadershipRow>,
}

#[derive(Debug, Serialize)]
pub(crate) struct SkillReportResponse {
    pub(crate) group_count: usize,
    pub(crate) groups: BTreeMap<String, Vec<SkillGroupMember>>,
}

#[derive(Debug, Serialize)]
pub(crate) struct TeamSelectionResponse {
    pub(crate) requested: usize,
    pub(crate) selected: usize,
    pub(crate) members: Vec<TeamMemberRow>,
}

pub(crate) fn app_router() -> axum::Router {
    axum::Router::new()
        .route("/health", axum::routing::get(healthcheck))
        .route("/ready", axum::routing::get(readiness_endpoint))
        .route("/metrics", axum::routing::get(metrics_endpoint))
        .route(
            "/api/v1/reports/attrition",
            axum::routing::post(attrition_report_endpoint),
        )
        .route(
            "/api/v1/reports/medical",
            axum::routing::post(medical_report_endpoint),
        )
        .route(
            "/api/v1/reports/training",
            axum::routing::post(training_report_endpoint),
        )
        .route(
            "/api/v1/reports/leadership",
            axum::routing::post(leadership_report_endpoint),
        )
        .route(
            "/api/v1/reports/skills",
            axum::routing::post(skill_report_endpoint),
        )
        .route("/api/v1/team", axum::routing::post(team_endpoint))
        .route("/api/v1/whatif", axum::routing::post(whatif_endpoint))
        .route("/api/v1/predict", axum::routing::post(predict_endpoint))
}

pub(crate) async fn healthcheck() -> Json<serde_json::Value> {
    Json(json!({ "status": "ok" }))
}

pub(crate) async fn readiness_endpoint(Extension(state): Extension<AppState>) -> impl IntoResponse {
    let ready = state.readiness.load(std::sync::atomic::Ordering::Relaxed);
    let status = if ready {
        StatusCode::OK
    } else {
        StatusCode::SERVICE_UNAVAILABLE
    };

    let payload = if ready {
        json!({ "status": "ready" })
    } else {
        json!({ "status": "initializing" })
    };

    (status, Json(payload))
}

pub(crate) async fn metrics_endpoint(Extension(state): Extension<AppState>) -> impl IntoResponse {
    (
        StatusCode::OK,
        [(header::CONTENT_TYPE, "text/plain; version=0.0.4")],
        state.metrics.render(),
    )
}

/// Roster to answer against: the inline CSV override when the request
/// carries one, otherwise the snapshot loaded at startup.
fn resolve_roster(state: &AppState, roster_csv: Option<String>) -> Result<EnrichedRoster, AppError> {
    match roster_csv {
        Some(csv) => {
            let snapshot = RosterLoader::from_reader(Cursor::new(csv.into_bytes()))?;
            Ok(snapshot.enrich())
        }
        None => Ok(state.roster.enrich()),
    }
}

pub(crate) async fn attrition_report_endpoint(
    Extension(state): Extension<AppState>,
    Json(payload): Json<AttritionReportRequest>,
) -> Result<Json<AttritionReportResponse>, AppError> {
    let roster = resolve_roster(&state, payload.roster_csv)?;
    let rows = reports::attrition_ranking(&roster, payload.top_n.unwrap_or(DEFAULT_ATTRITION_TOP_N));

    Ok(Json(AttritionReportResponse {
        count: rows.len(),
        rows,
    }))
}

pub(crate) async fn medical_report_endpoint(
    Extension(state): Extension<AppState>,
    Json(payload): Json<RosterScopedRequest>,
) -> Result<Json<MedicalReportResponse>, AppError> {
    let roster = resolve_roster(&state, payload.roster_csv)?;
    let rows = reports::medical_summary(&roster);

    Ok(Json(MedicalReportResponse {
        count: rows.len(),
        rows,
    }))
}

pub(crate) async fn training_report_endpoint(
    Extension(state): Extension<AppState>,
    Json(payload): Json<TrainingReportRequest>,
) -> Result<Json<TrainingReportResponse>, AppError> {
    let roster = resolve_roster(&state, payload.roster_csv)?;
    let threshold = payload.threshold.unwrap_or(DEFAULT_TRAINING_THRESHOLD);
    let rows = reports::training_gaps(&roster, threshold);

    Ok(Json(TrainingReportResponse {
        threshold,
        count: rows.len(),
        rows,
    }))
}

pub(crate) async fn leadership_report_endpoint(
    Extension(state): Extension<AppState>,
    Json(payload): Json<RosterScopedRequest>,
) -> Result<Json<LeadershipReportResponse>, AppError> {
    let roster = resolve_roster(&state, payload.roster_csv)?;
    let rows = reports::leadership_ranking(&roster);

    Ok(Json(LeadershipReportResponse {
        count: rows.len(),
        rows,
    }))
}

pub(crate) async fn skill_report_endpoint(
    Extension(state): Extension<AppState>,
    Json(payload): Json<RosterScopedRequest>,
) -> Result<Json<SkillReportResponse>, AppError> {
    let roster = resolve_roster(&state, payload.roster_csv)?;
    let groups = reports::skill_groups(&roster);

    Ok(Json(SkillReportResponse {
        group_count: groups.len(),
        groups,
    }))
}

pub(crate) async fn team_endpoint(
    Extension(state): Extension<AppState>,
    Json(payload): Json<TeamSelectionRequest>,
) -> Result<Json<TeamSelectionResponse>, AppError> {
    let TeamSelectionRequest {
        headcount,
        required_roles,
        restrict_to_roles,
        roster_csv,
    } = payload;

    let roster = resolve_roster(&state, roster_csv)?;
    let request = TeamRequest {
        headcount: headcount.unwrap_or(DEFAULT_TEAM_HEADCOUNT),
        required_roles,
        restrict_to_roles,
    };
    let members = select_team(&roster, &request);

    Ok(Json(TeamSelectionResponse {
        requested: request.headcount,
        selected: members.len(),
        members,
    }))
}

pub(crate) async fn whatif_endpoint(
    Extension(state): Extension<AppState>,
    Json(payload): Json<WhatIfRequest>,
) -> Result<Json<WhatIfOutcome>, AppError> {
    let WhatIfRequest {
        question,
        roster_csv,
    } = payload;

    let roster = resolve_roster(&state, roster_csv)?;
    let outcome = WhatIfEngine::new().run(&roster, &question);
    Ok(Json(outcome))
}

pub(crate) async fn predict_endpoint(
    Extension(state): Extension<AppState>,
    Json(payload): Json<PredictionInput>,
) -> Result<Json<PredictionOutcome>, AppError> {
    let outcome = state.predictor.predict_all(&payload)?;
    Ok(Json(outcome))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::infra::{sample_roster, HeuristicPredictor};
    use axum::body::Body;
    use axum::http::Request;
    use metrics_exporter_prometheus::PrometheusBuilder;
    use personnel_insight::insights::WhatIfAction;
    use std::sync::atomic::AtomicBool;
    use std::sync::Arc;
    use tower::ServiceExt;

    fn test_state() -> AppState {
        AppState {
            readiness: Arc::new(AtomicBool::new(true)),
            metrics: Arc::new(PrometheusBuilder::new().build_recorder().handle()),
            roster: Arc::new(sample_roster()),
            predictor: Arc::new(HeuristicPredictor),
        }
    }

    #[tokio::test]
    async fn health_endpoint_answers_over_the_router() {
        let app = app_router().layer(Extension(test_state()));
        let response = app
            .oneshot(
                Request::builder()
                    .uri("/health")
                    .body(Body::empty())
                    .expect("request builds"),
            )
            .await
            .expect("router responds");

        assert_eq!(response.status(), StatusCode::OK);
    }

    #[tokio::test]
    async fn attrition_report_defaults_to_top_fifty() {
        let Json(body) = attrition_report_endpoint(
            Extension(test_state()),
            Json(AttritionReportRequest::default()),
        )
        .await
        .expect("report builds");

        assert_eq!(body.count, 8);
        assert_eq!(body.rows[0].risk_label, "High");
    }

    #[tokio::test]
    async fn training_report_honors_custom_threshold() {
        let Json(body) = training_report_endpoint(
            Extension(test_state()),
            Json(TrainingReportRequest {
                threshold: Some(56.0),
                roster_csv: None,
            }),
        )
        .await
        .expect("report builds");

        assert_eq!(body.threshold, 56.0);
        assert_eq!(body.count, 2);
        assert!(body.rows.iter().all(|row| row.training_score < 56.0));
    }

    #[tokio::test]
    async fn inline_roster_override_replaces_the_startup_snapshot() {
        let csv = "Personnel_ID,Name,Rank,Primary_Skill\nX-1,Solo Tester,Corporal,Pilot\n";
        let Json(body) = medical_report_endpoint(
            Extension(test_state()),
            Json(RosterScopedRequest {
                roster_csv: Some(csv.to_string()),
            }),
        )
        .await
        .expect("report builds");

        assert_eq!(body.count, 1);
        assert_eq!(body.rows[0].id, "X-1");
    }

    #[tokio::test]
    async fn malformed_inline_roster_is_a_bad_request() {
        let csv = "Personnel_ID,Name,Rank\nX-1,Unbalanced\n";
        let error = medical_report_endpoint(
            Extension(test_state()),
            Json(RosterScopedRequest {
                roster_csv: Some(csv.to_string()),
            }),
        )
        .await
        .expect_err("uneven csv rejected");

        let response = error.into_response();
        assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    }

    #[tokio::test]
    async fn team_endpoint_caps_selection_at_headcount() {
        let Json(body) = team_endpoint(
            Extension(test_state()),
            Json(TeamSelectionRequest {
                headcount: Some(3),
                required_roles: vec!["Engineer".to_string()],
                restrict_to_roles: false,
                roster_csv: None,
            }),
        )
        .await
        .expect("team builds");

        assert_eq!(body.requested, 3);
        assert_eq!(body.selected, 3);
        assert!(body
            .members
            .iter()
            .any(|member| member.primary_skill.as_deref() == Some("Engineer")));
    }

    #[tokio::test]
    async fn whatif_endpoint_routes_free_text() {
        let Json(outcome) = whatif_endpoint(
            Extension(test_state()),
            Json(WhatIfRequest {
                question: "who should retire, senior pilots".to_string(),
                roster_csv: None,
            }),
        )
        .await
        .expect("outcome builds");

        assert_eq!(outcome.action, WhatIfAction::RetirementImpact);
        assert!(!outcome.recommendations.is_empty());
    }

    #[tokio::test]
    async fn predict_endpoint_delegates_to_the_predictor() {
        let Json(outcome) = predict_endpoint(
            Extension(test_state()),
            Json(PredictionInput {
                role: "Pilot".to_string(),
                skills: "navigation".to_string(),
                experience_years: 12,
                training_completed: true,
                medical_score: 92.0,
            }),
        )
        .await
        .expect("prediction returns");

        assert_eq!(outcome.mission_readiness, "High");
    }
}
