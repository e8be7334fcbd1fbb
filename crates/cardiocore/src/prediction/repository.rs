use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use super::domain::{EstimationMethod, RawPredictionInput, RiskLevel};

/// Persisted outcome of one assessment. The engine produces these fields
/// exactly once, at creation time, and never re-derives them from a stored
/// record afterwards.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PredictionRecord {
    pub owner: String,
    #[serde(default)]
    pub patient_ref: Option<String>,
    pub input: RawPredictionInput,
    pub probability: f64,
    pub confidence: f64,
    pub method: EstimationMethod,
    pub risk_level: RiskLevel,
    pub recommendations: Vec<String>,
    /// Records imported from older deployments may lack a timestamp; such
    /// records are skipped by the month bucketing, not treated as fatal.
    #[serde(default)]
    pub created_at: Option<DateTime<Utc>>,
    pub active: bool,
}

/// Storage abstraction so the prediction service can be exercised in
/// isolation. Implementations are expected to hand back only active records
/// belonging to the requested owner.
pub trait PredictionRepository: Send + Sync {
    fn insert(&self, record: PredictionRecord) -> Result<(), RepositoryError>;
    fn records_for_owner(&self, owner: &str) -> Result<Vec<PredictionRecord>, RepositoryError>;
}

/// Error enumeration for repository failures.
#[derive(Debug, thiserror::Error)]
pub enum RepositoryError {
    #[error("record not found")]
    NotFound,
    #[error("repository unavailable: {0}")]
    Unavailable(String),
}
