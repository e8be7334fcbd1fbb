use cardiocore::prediction::{PredictionRecord, PredictionRepository, RepositoryError};
use metrics_exporter_prometheus::PrometheusHandle;
use std::sync::atomic::AtomicBool;
use std::sync::{Arc, Mutex};

#[derive(Clone)]
pub(crate) struct AppState {
    pub(crate) readiness: Arc<AtomicBool>,
    pub(crate) metrics: Arc<PrometheusHandle>,
}

/// In-memory stand-in for the document store. Owner scoping and the
/// soft-delete flag are applied here so the aggregation stays pure.
#[derive(Default, Clone)]
pub(crate) struct InMemoryPredictionRepository {
    records: Arc<Mutex<Vec<PredictionRecord>>>,
}

impl PredictionRepository for InMemoryPredictionRepository {
    fn insert(&self, record: PredictionRecord) -> Result<(), RepositoryError> {
        let mut guard = self.records.lock().expect("repository mutex poisoned");
        guard.push(record);
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
