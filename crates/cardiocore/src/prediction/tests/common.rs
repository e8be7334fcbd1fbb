use std::future::Future;
use std::sync::{Arc, Mutex};
use std::time::Duration;

use chrono::{DateTime, TimeZone, Utc};
use serde_json::Value;

use crate::prediction::domain::{
    EstimationMethod, EstimationResult, NormalizedFeatures, RawPredictionInput,
};
use crate::prediction::oracle::{OracleFailure, ScoringOracle};
use crate::prediction::repository::{
    PredictionRecord, PredictionRepository, RepositoryError,
};
use crate::prediction::service::PredictionService;
use crate::prediction::{classify, RiskLevel};

/// Elderly male with every adverse factor present; the heuristic saturates.
pub(super) fn high_risk_input() -> RawPredictionInput {
    RawPredictionInput {
        age: 70,
        sex: "male".to_string(),
        chest_pain_type: "typical angina".to_string(),
        resting_bp: 190,
        cholesterol: 320,
        fasting_bs: 1,
        resting_ecg: "left ventricular hypertrophy".to_string(),
        max_hr: 90,
        exercise_angina: true,
        oldpeak: 2.5,
        st_slope: "down".to_string(),
    }
}

/// Young female with no adverse factors; the heuristic scores zero.
pub(super) fn low_risk_input() -> RawPredictionInput {
    RawPredictionInput {
        age: 25,
        sex: "female".to_string(),
        chest_pain_type: "asymptomatic".to_string(),
        resting_bp: 110,
        cholesterol: 150,
        fasting_bs: 0,
        resting_ecg: "normal".to_string(),
        max_hr: 180,
        exercise_angina: false,
        oldpeak: 0.0,
        st_slope: "up".to_string(),
    }
}

#[derive(Debug, Clone, Copy)]
pub(super) enum FailureKind {
    Timeout,
    Process,
    MalformedOutput,
}

/// Oracle stub whose every invocation fails with the configured kind.
pub(super) struct FailingOracle {
    pub(super) kind: FailureKind,
}

impl ScoringOracle for FailingOracle {
    fn invoke(
        &self,
        _features: &NormalizedFeatures,
    ) -> impl Future<Output = Result<EstimationResult, OracleFailure>> + Send {
        let failure = match self.kind {
            FailureKind::Timeout => OracleFailure::Timeout(Duration::from_millis(5)),
            FailureKind::Process => OracleFailure::Process("exit status 1".to_string()),
            FailureKind::MalformedOutput => {
                OracleFailure::MalformedOutput("payload is missing 'prediction'".to_string())
            }
        };
        async move { Err(failure) }
    }
}

/// Oracle stub that always answers with a fixed estimate.
pub(super) struct StubOracle {
    pub(super) probability: f64,
    pub(super) confidence: f64,
}

impl ScoringOracle for StubOracle {
    fn invoke(
        &self,
        _features: &NormalizedFeatures,
    ) -> impl Future<Output = Result<EstimationResult, OracleFailure>> + Send {
        let result = EstimationResult {
            probability: self.probability,
            confidence: self.confidence,
            method: EstimationMethod::MlModel,
        };
        async move { Ok(result) }
    }
}

#[derive(Default)]
pub(super) struct MemoryRepository {
    pub(super) records: Mutex<Vec<PredictionRecord>>,
}

impl PredictionRepository for MemoryRepository {
    fn insert(&self, record: PredictionRecord) -> Result<(), RepositoryError> {
        self.records
            .lock()
            .expect("repository mutex poisoned")
            .push(record);
        Ok(())
    }

    fn records_for_owner(&self, owner: &str) -> Result<Vec<PredictionRecord>, RepositoryError> {
        let guard = self.records.lock().expect("repository mutex poisoned");
        Ok(guard
            .iter()
            .filter(|record| record.active && record.owner == owner)
            .cloned()
            .collect())
    }
}

pub(super) struct UnavailableRepository;

impl PredictionRepository for UnavailableRepository {
    fn insert(&self, _record: PredictionRecord) -> Result<(), RepositoryError> {
        Err(RepositoryError::Unavailable("database offline".to_string()))
    }

    fn records_for_owner(&self, _owner: &str) -> Result<Vec<PredictionRecord>, RepositoryError> {
        Err(RepositoryError::Unavailable("database offline".to_string()))
    }
}

pub(super) fn fallback_service() -> (
    PredictionService<FailingOracle, MemoryRepository>,
    Arc<MemoryRepository>,
) {
    let repository = Arc::new(MemoryRepository::default());
    let service = PredictionService::new(
        Arc::new(FailingOracle {
            kind: FailureKind::Process,
        }),
        repository.clone(),
    );
    (service, repository)
}

pub(super) fn oracle_service(
    probability: f64,
    confidence: f64,
) -> PredictionService<StubOracle, MemoryRepository> {
    PredictionService::new(
        Arc::new(StubOracle {
            probability,
            confidence,
        }),
        Arc::new(MemoryRepository::default()),
    )
}

pub(super) fn record(
    owner: &str,
    probability: f64,
    created_at: Option<DateTime<Utc>>,
) -> PredictionRecord {
    let risk_level = classify(probability);
    PredictionRecord {
        owner: owner.to_string(),
        patient_ref: None,
        input: low_risk_input(),
        probability,
        confidence: 0.85,
        method: EstimationMethod::Simplified,
        risk_level,
        recommendations: vec!["Maintain your current healthy lifestyle".to_string()],
        created_at,
        active: true,
    }
}

pub(super) fn month(year: i32, month: u32) -> Option<DateTime<Utc>> {
    Some(
        Utc.with_ymd_and_hms(year, month, 15, 12, 0, 0)
            .single()
            .expect("valid timestamp"),
    )
}

pub(super) async fn read_json_body(response: axum::response::Response) -> Value {
    let body = axum::body::to_bytes(response.into_body(), 64 * 1024)
        .await
        .expect("read body");
    serde_json::from_slice(&body).expect("json payload")
}

pub(super) fn assert_critical(level: RiskLevel) {
    assert_eq!(level, RiskLevel::Critical);
}
