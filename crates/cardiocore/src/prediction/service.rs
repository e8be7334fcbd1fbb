use std::sync::Arc;

use chrono::Utc;
use serde::Serialize;
use tracing::{info, warn};

use super::aggregate::{aggregate, AggregateStats, RiskLevelCounts};
use super::classifier::classify;
use super::domain::{
    EstimationResult, ModelInfo, NormalizedFeatures, RawPredictionInput, RiskAssessment,
    MODEL_INFO,
};
use super::heuristic;
use super::normalizer::{normalize, ValidationError};
use super::oracle::ScoringOracle;
use super::recommendations::{recommend, RecommendationProfile};
use super::repository::{PredictionRecord, PredictionRepository, RepositoryError};

/// Upper bound on items accepted by one batch call.
pub const MAX_BATCH_ITEMS: usize = 50;

/// Service composing the external scoring oracle, the local heuristic, the
/// classifier, and the recommendation rules behind one estimation surface.
pub struct PredictionService<O, R> {
    oracle: Arc<O>,
    repository: Arc<R>,
}

impl<O, R> PredictionService<O, R>
where
    O: ScoringOracle + 'static,
    R: PredictionRepository + 'static,
{
    pub fn new(oracle: Arc<O>, repository: Arc<R>) -> Self {
        Self { oracle, repository }
    }

    /// Best-effort estimation: one oracle attempt, then the heuristic. Never
    /// fails; which path produced the value is only visible via the method
    /// tag, and callers must treat both paths as equally valid.
    pub async fn estimate(&self, features: &NormalizedFeatures) -> EstimationResult {
        match self.oracle.invoke(features).await {
            Ok(result) => result,
            Err(failure) => {
                warn!(%failure, "scoring oracle unavailable, using simplified estimator");
                heuristic::score(features)
            }
        }
    }

    /// Assess one submission: validate, estimate, classify, recommend.
    pub async fn assess(
        &self,
        input: &RawPredictionInput,
        profile: RecommendationProfile,
    ) -> Result<RiskAssessment, ValidationError> {
        let features = normalize(input)?;
        let estimation = self.estimate(&features).await;
        let risk_level = classify(estimation.probability);
        let recommendations = recommend(estimation.probability, input, profile);

        Ok(RiskAssessment {
            probability: estimation.probability,
            percentage: (estimation.probability * 100.0).round() as u8,
            risk_level,
            confidence: estimation.confidence,
            method: estimation.method,
            recommendations,
        })
    }

    /// Assess a single patient submission and persist the resulting record
    /// under the given owner. The stored fields are produced here, once, and
    /// never re-derived from the record later.
    pub async fn assess_and_record(
        &self,
        owner: &str,
        patient_ref: Option<String>,
        input: RawPredictionInput,
    ) -> Result<RiskAssessment, PredictionServiceError> {
        let assessment = self.assess(&input, RecommendationProfile::Patient).await?;

        let record = PredictionRecord {
            owner: owner.to_string(),
            patient_ref,
            input,
            probability: assessment.probability,
            confidence: assessment.confidence,
            method: assessment.method,
            risk_level: assessment.risk_level,
            recommendations: assessment.recommendations.clone(),
            created_at: Some(Utc::now()),
            active: true,
        };
        self.repository.insert(record)?;

        info!(
            risk_level = assessment.risk_level.label(),
            method = assessment.method.label(),
            "assessment recorded"
        );
        Ok(assessment)
    }

    /// Assess up to [`MAX_BATCH_ITEMS`] submissions. Results preserve input
    /// order and each item succeeds or fails on its own: a validation error
    /// on one item never aborts the rest.
    pub async fn assess_batch(
        &self,
        inputs: Vec<RawPredictionInput>,
    ) -> Result<BatchAssessment, ValidationError> {
        if inputs.len() > MAX_BATCH_ITEMS {
            return Err(ValidationError {
                field: "items",
                reason: format!(
                    "batch of {} items exceeds the limit of {MAX_BATCH_ITEMS}",
                    inputs.len()
                ),
            });
        }

        let total = inputs.len();
        let mut results = Vec::with_capacity(total);
        let mut risk_distribution = RiskLevelCounts::default();
        let mut successful = 0;

        for (index, input) in inputs.iter().enumerate() {
            match self.assess(input, RecommendationProfile::Batch).await {
                Ok(assessment) => {
                    risk_distribution.record(assessment.risk_level);
                    successful += 1;
                    results.push(BatchItem {
                        index,
                        success: true,
                        assessment: Some(assessment),
                        error: None,
                    });
                }
                Err(err) => {
                    results.push(BatchItem {
                        index,
                        success: false,
                        assessment: None,
                        error: Some(err.to_string()),
                    });
                }
            }
        }

        Ok(BatchAssessment {
            results,
            summary: BatchSummary {
                total,
                successful,
                failed: total - successful,
                risk_distribution,
            },
        })
    }

    /// Summary statistics over the owner's active records. The repository
    /// does the owner/active filtering; the arithmetic is pure.
    pub fn aggregate_stats(&self, owner: &str) -> Result<AggregateStats, RepositoryError> {
        let records = self.repository.records_for_owner(owner)?;
        Ok(aggregate(&records))
    }

    /// Static model descriptor. Constant, byte-identical across calls.
    pub fn model_info(&self) -> &'static ModelInfo {
        &MODEL_INFO
    }
}

/// Outcome of one batch item, kept at its submitted position.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct BatchItem {
    pub index: usize,
    pub success: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub assessment: Option<RiskAssessment>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
}

/// Roll-up over one batch call.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct BatchSummary {
    pub total: usize,
    pub successful: usize,
    pub failed: usize,
    pub risk_distribution: RiskLevelCounts,
}

/// Ordered per-item results plus the batch summary.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct BatchAssessment {
    pub results: Vec<BatchItem>,
    pub summary: BatchSummary,
}

/// Error raised by the prediction service.
#[derive(Debug, thiserror::Error)]
pub enum PredictionServiceError {
    #[error(transparent)]
    Validation(#[from] ValidationError),
    #[error(transparent)]
    Repository(#[from] RepositoryError),
}
