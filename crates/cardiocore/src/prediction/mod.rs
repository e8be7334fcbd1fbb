//! Heart-failure risk estimation pipeline: input normalization, dual-path
//! probability estimation (external scoring process with a deterministic
//! local fallback), fixed-band classification, rule-based recommendations,
//! and aggregate reporting over historical predictions.

pub mod aggregate;
pub mod classifier;
pub mod domain;
pub(crate) mod encoding;
pub mod heuristic;
pub mod normalizer;
pub mod oracle;
pub mod recommendations;
pub mod repository;
pub mod router;
pub mod service;

#[cfg(test)]
mod tests;

pub use aggregate::{aggregate, AggregateStats, MonthBucket, RiskLevelCounts};
pub use classifier::classify;
pub use domain::{
    EstimationMethod, EstimationResult, ModelInfo, NormalizedFeatures, RawPredictionInput,
    RiskAssessment, RiskBandInfo, RiskLevel, MODEL_INFO,
};
pub use normalizer::{normalize, ValidationError};
pub use oracle::{OracleFailure, PythonModelClient, ScoringOracle};
pub use recommendations::{recommend, RecommendationProfile};
pub use repository::{PredictionRecord, PredictionRepository, RepositoryError};
pub use router::prediction_router;
pub use service::{
    BatchAssessment, BatchItem, BatchSummary, PredictionService, PredictionServiceError,
    MAX_BATCH_ITEMS,
};
