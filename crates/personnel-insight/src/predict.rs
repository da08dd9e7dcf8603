use serde::{Deserialize, Serialize};

/// Inputs accepted by the external prediction models.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PredictionInput {
    pub role: String,
    pub skills: String,
    pub experience_years: u32,
    pub training_completed: bool,
    pub medical_score: f64,
}

/// Categorical predictions returned by the model backend.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PredictionOutcome {
    pub mission_readiness: String,
    pub performance_score: String,
    pub leadership_potential: String,
}

#[derive(Debug, thiserror::Error)]
pub enum PredictionError {
    #[error("prediction backend unavailable: {0}")]
    Unavailable(String),
    #[error("prediction rejected input: {0}")]
    InvalidInput(String),
}

/// Seam for the pre-trained prediction models. The analytics core never
/// looks inside; adapters in the service layer decide how predictions
/// are produced.
pub trait ReadinessPredictor: Send + Sync {
    fn predict_all(&self, input: &PredictionInput) -> Result<PredictionOutcome, PredictionError>;
}
