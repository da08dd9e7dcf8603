use metrics_exporter_prometheus::PrometheusHandle;
use personnel_insight::config::DataConfig;
use personnel_insight::error::AppError;
use personnel_insight::predict::{
    PredictionError, PredictionInput, PredictionOutcome, ReadinessPredictor,
};
use personnel_insight::roster::{
    GradeTier, MedicalCategory, PerformanceRating, PersonnelRecord, RosterLoader, RosterSnapshot,
};
use std::sync::atomic::AtomicBool;
use std::sync::Arc;
use tracing::info;

#[derive(Clone)]
pub(crate) struct AppState {
    pub(crate) readiness: Arc<AtomicBool>,
    pub(crate) metrics: Arc<PrometheusHandle>,
    pub(crate) roster: Arc<RosterSnapshot>,
    pub(crate) predictor: Arc<dyn ReadinessPredictor>,
}

/// Roster for the service to answer against: the configured CSV when
/// one is set, otherwise a built-in sample squadron so every endpoint
/// works out of the box.
pub(crate) fn load_roster(data: &DataConfig) -> Result<RosterSnapshot, AppError> {
    match &data.roster_csv_path {
        Some(path) => {
            let snapshot = RosterLoader::from_path(path)?;
            info!(path = %path.display(), rows = snapshot.len(), "roster loaded from csv");
            Ok(snapshot)
        }
        None => {
            let snapshot = sample_roster();
            info!(rows = snapshot.len(), "no roster csv configured, using sample data");
            Ok(snapshot)
        }
    }
}

pub(crate) fn sample_roster() -> RosterSnapshot {
    let seed: [(&str, &str, &str, &str, f64, PerformanceRating, f64, MedicalCategory, GradeTier, GradeTier, GradeTier, f64); 8] = [
        ("IAF-001", "Arjun Rao", "Squadron Leader", "Fighter Pilot", 18.0, PerformanceRating::Excellent, 88.0, MedicalCategory::A1, GradeTier::High, GradeTier::High, GradeTier::Low, 40.0),
        ("IAF-002", "Meera Iyer", "Flight Lieutenant", "Fighter Pilot", 4.0, PerformanceRating::Good, 72.0, MedicalCategory::A2, GradeTier::Medium, GradeTier::High, GradeTier::High, 12.0),
        ("IAF-003", "Dev Nair", "Corporal", "Engineer", 9.0, PerformanceRating::Average, 55.0, MedicalCategory::B1, GradeTier::Low, GradeTier::Medium, GradeTier::Medium, 6.0),
        ("IAF-004", "Sana Qureshi", "Sergeant", "Medical", 2.0, PerformanceRating::BelowAverage, 38.0, MedicalCategory::C1, GradeTier::Low, GradeTier::Low, GradeTier::High, 1.0),
        ("IAF-005", "Rohit Sen", "Wing Commander", "Engineer", 22.0, PerformanceRating::Good, 91.0, MedicalCategory::B2, GradeTier::High, GradeTier::Medium, GradeTier::Low, 28.0),
        ("IAF-006", "Kiran Shah", "Corporal", "Logistics", 6.0, PerformanceRating::Average, 64.0, MedicalCategory::A2, GradeTier::Medium, GradeTier::Medium, GradeTier::Medium, 9.0),
        ("IAF-007", "Priya Menon", "Flight Officer", "Fighter Pilot", 16.0, PerformanceRating::Good, 81.0, MedicalCategory::B1, GradeTier::High, GradeTier::High, GradeTier::Low, 33.0),
        ("IAF-008", "Vikram Das", "Sergeant", "Technician", 11.0, PerformanceRating::Average, 59.0, MedicalCategory::B2, GradeTier::Medium, GradeTier::Low, GradeTier::Medium, 14.0),
    ];

    let records = seed
        .into_iter()
        .map(
            |(id, name, rank, skill, years, perf, training, medical, leadership, readiness, attrition, missions)| {
                PersonnelRecord {
                    id: id.to_string(),
                    name: name.to_string(),
                    rank: rank.to_string(),
                    primary_skill: Some(skill.to_string()),
                    years_of_service: Some(years),
                    performance: Some(perf),
                    training_score: Some(training),
                    training_course: None,
                    medical_category: Some(medical),
                    bmi: None,
                    last_medical_checkup: None,
                    leadership_potential: Some(leadership),
                    readiness_level: Some(readiness),
                    attrition_risk: Some(attrition),
                    missions_completed: Some(missions),
                }
            },
        )
        .collect();

    RosterSnapshot::new(records, true)
}

/// Stand-in for the trained model backend: banded thresholds over the
/// same inputs the real models consume. Swappable behind
/// [`ReadinessPredictor`] without touching the routes.
#[derive(Debug, Default, Clone)]
pub(crate) struct HeuristicPredictor;

impl ReadinessPredictor for HeuristicPredictor {
    fn predict_all(&self, input: &PredictionInput) -> Result<PredictionOutcome, PredictionError> {
        if input.role.trim().is_empty() {
            return Err(PredictionError::InvalidInput("role must not be empty".to_string()));
        }
        if !(0.0..=100.0).contains(&input.medical_score) {
            return Err(PredictionError::InvalidInput(
                "medical_score must be between 0 and 100".to_string(),
            ));
        }

        let mission_readiness = if input.medical_score >= 85.0 && input.training_completed {
            "High"
        } else if input.medical_score >= 70.0 {
            "Medium"
        } else {
            "Low"
        };

        let performance_score = if input.experience_years >= 10 && input.training_completed {
            "Excellent"
        } else if input.experience_years >= 5 {
            "Good"
        } else {
            "Average"
        };

        let leadership_potential =
            if input.experience_years >= 8 && mission_readiness != "Low" {
                "High"
            } else if input.experience_years >= 4 {
                "Medium"
            } else {
                "Low"
            };

        Ok(PredictionOutcome {
            mission_readiness: mission_readiness.to_string(),
            performance_score: performance_score.to_string(),
            leadership_potential: leadership_potential.to_string(),
        })
    }
}
