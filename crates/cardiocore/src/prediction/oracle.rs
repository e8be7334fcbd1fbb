use std::future::Future;
use std::path::PathBuf;
use std::process::Stdio;
use std::time::Duration;

use serde::Deserialize;
use tokio::process::Command;
use tracing::debug;

use crate::config::ModelConfig;

use super::domain::{EstimationMethod, EstimationResult, NormalizedFeatures};

/// Confidence assumed when the scoring process omits one.
const DEFAULT_ORACLE_CONFIDENCE: f64 = 0.9;

/// Capability shared by anything that can turn a feature vector into a
/// probability estimate. The orchestration layer composes one of these with
/// the local heuristic; tests substitute stubs.
pub trait ScoringOracle: Send + Sync {
    fn invoke(
        &self,
        features: &NormalizedFeatures,
    ) -> impl Future<Output = Result<EstimationResult, OracleFailure>> + Send;
}

/// Every variant is recoverable: the orchestrator falls back to the local
/// heuristic and the caller never sees these as errors.
#[derive(Debug, thiserror::Error)]
pub enum OracleFailure {
    #[error("scoring invocation exceeded {0:?}")]
    Timeout(Duration),
    #[error("scoring process failed: {0}")]
    Process(String),
    #[error("scoring output could not be parsed: {0}")]
    MalformedOutput(String),
}

#[derive(Debug, Deserialize)]
struct OraclePayload {
    success: bool,
    #[serde(default)]
    prediction: Option<f64>,
    #[serde(default)]
    confidence: Option<f64>,
    #[serde(default)]
    error: Option<String>,
}

/// Client for the out-of-process scoring script. One invocation per call,
/// bounded by the configured timeout, no retries: retry and fallback policy
/// live in the orchestrator.
#[derive(Debug, Clone)]
pub struct PythonModelClient {
    python_bin: String,
    script_path: PathBuf,
    timeout: Duration,
}

impl PythonModelClient {
    pub fn new(python_bin: impl Into<String>, script_path: PathBuf, timeout: Duration) -> Self {
        Self {
            python_bin: python_bin.into(),
            script_path,
            timeout,
        }
    }

    pub fn from_config(config: &ModelConfig) -> Self {
        Self::new(
            config.python_bin.clone(),
            config.script_path.clone(),
            config.timeout,
        )
    }

    async fn run(&self, features: &NormalizedFeatures) -> Result<EstimationResult, OracleFailure> {
        let payload = serde_json::to_string(features)
            .map_err(|err| OracleFailure::MalformedOutput(err.to_string()))?;

        // kill_on_drop ensures a timed-out child is reaped instead of
        // lingering after the orchestrator has moved on to the fallback.
        let invocation = Command::new(&self.python_bin)
            .arg(&self.script_path)
            .arg(payload)
            .stdin(Stdio::null())
            .stdout(Stdio::piped())
            .stderr(Stdio::null())
            .kill_on_drop(true)
            .output();

        let output = match tokio::time::timeout(self.timeout, invocation).await {
            Ok(spawned) => spawned.map_err(|err| OracleFailure::Process(err.to_string()))?,
            Err(_) => return Err(OracleFailure::Timeout(self.timeout)),
        };

        if !output.status.success() {
            return Err(OracleFailure::Process(format!(
                "scoring process exited with {}",
                output.status
            )));
        }

        let result = interpret_output(&output.stdout)?;
        debug!(
            probability = result.probability,
            confidence = result.confidence,
            "external model responded"
        );
        Ok(result)
    }
}

/// Turn the script's stdout into an estimate. The script reports its own
/// failures in-band with `success: false`; those surface as
/// [`OracleFailure::MalformedOutput`] like any other contract violation.
fn interpret_output(stdout: &[u8]) -> Result<EstimationResult, OracleFailure> {
    let parsed: OraclePayload = serde_json::from_slice(stdout)
        .map_err(|err| OracleFailure::MalformedOutput(err.to_string()))?;

    if !parsed.success {
        return Err(OracleFailure::MalformedOutput(
            parsed
                .error
                .unwrap_or_else(|| "scoring script reported failure".to_string()),
        ));
    }

    let probability = parsed.prediction.ok_or_else(|| {
        OracleFailure::MalformedOutput("payload is missing 'prediction'".to_string())
    })?;
    if !(0.0..=1.0).contains(&probability) {
        return Err(OracleFailure::MalformedOutput(format!(
            "prediction {probability} is outside [0, 1]"
        )));
    }

    Ok(EstimationResult {
        probability,
        confidence: parsed.confidence.unwrap_or(DEFAULT_ORACLE_CONFIDENCE),
        method: EstimationMethod::MlModel,
    })
}

impl ScoringOracle for PythonModelClient {
    fn invoke(
        &self,
        features: &NormalizedFeatures,
    ) -> impl Future<Output = Result<EstimationResult, OracleFailure>> + Send {
        self.run(features)
    }
}
