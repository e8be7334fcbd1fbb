use serde::{Deserialize, Serialize};

/// Clinical parameters exactly as submitted by a caller. Categorical values
/// arrive as human-readable labels and are only turned into numbers by the
/// normalizer, so an unknown label can be rejected with the offending field
/// named instead of silently defaulting.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RawPredictionInput {
    pub age: i64,
    pub sex: String,
    pub chest_pain_type: String,
    #[serde(rename = "restingBP")]
    pub resting_bp: i64,
    pub cholesterol: i64,
    #[serde(rename = "fastingBS")]
    pub fasting_bs: i64,
    #[serde(rename = "restingECG")]
    pub resting_ecg: String,
    #[serde(rename = "maxHR")]
    pub max_hr: i64,
    pub exercise_angina: bool,
    pub oldpeak: f64,
    pub st_slope: String,
}

/// Numeric encoding of a [`RawPredictionInput`], in the fixed feature order
/// the scoring model was trained against. Field order here matches
/// [`MODEL_INFO`]'s feature list and must not be reordered.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct NormalizedFeatures {
    pub age: f64,
    pub sex: f64,
    pub chest_pain_type: f64,
    #[serde(rename = "restingBP")]
    pub resting_bp: f64,
    pub cholesterol: f64,
    #[serde(rename = "fastingBS")]
    pub fasting_bs: f64,
    #[serde(rename = "restingECG")]
    pub resting_ecg: f64,
    #[serde(rename = "maxHR")]
    pub max_hr: f64,
    pub exercise_angina: f64,
    pub oldpeak: f64,
    pub st_slope: f64,
}

impl NormalizedFeatures {
    pub fn as_vector(&self) -> [f64; 11] {
        [
            self.age,
            self.sex,
            self.chest_pain_type,
            self.resting_bp,
            self.cholesterol,
            self.fasting_bs,
            self.resting_ecg,
            self.max_hr,
            self.exercise_angina,
            self.oldpeak,
            self.st_slope,
        ]
    }
}

/// Which estimator produced a probability.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum EstimationMethod {
    MlModel,
    Simplified,
}

impl EstimationMethod {
    pub const fn label(self) -> &'static str {
        match self {
            EstimationMethod::MlModel => "ml_model",
            EstimationMethod::Simplified => "simplified",
        }
    }
}

/// A single probability estimate. Produced fresh on every call, never cached.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct EstimationResult {
    pub probability: f64,
    pub confidence: f64,
    pub method: EstimationMethod,
}

/// Ordered risk bands over the probability range.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum RiskLevel {
    Low,
    Medium,
    High,
    Critical,
}

impl RiskLevel {
    pub const fn label(self) -> &'static str {
        match self {
            RiskLevel::Low => "low",
            RiskLevel::Medium => "medium",
            RiskLevel::High => "high",
            RiskLevel::Critical => "critical",
        }
    }
}

/// Full assessment returned to callers and persisted verbatim into a
/// prediction record at creation time.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RiskAssessment {
    pub probability: f64,
    pub percentage: u8,
    pub risk_level: RiskLevel,
    pub confidence: f64,
    pub method: EstimationMethod,
    pub recommendations: Vec<String>,
}

/// Boundaries of one classification band, closed at the lower end.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct RiskBandInfo {
    pub level: RiskLevel,
    pub lower: f64,
    pub upper: f64,
}

/// Static descriptor of the scoring model. Pure constant so repeated calls
/// serialize byte-identically.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ModelInfo {
    pub name: &'static str,
    pub version: &'static str,
    pub accuracy: &'static str,
    pub features: &'static [&'static str],
    pub risk_bands: &'static [RiskBandInfo],
}

pub const MODEL_INFO: ModelInfo = ModelInfo {
    name: "heart-failure-risk",
    version: "1.0.0",
    accuracy: "trained on synthetic data; not clinically validated",
    features: &[
        "age",
        "sex",
        "chestPainType",
        "restingBP",
        "cholesterol",
        "fastingBS",
        "restingECG",
        "maxHR",
        "exerciseAngina",
        "oldpeak",
        "stSlope",
    ],
    risk_bands: &[
        RiskBandInfo {
            level: RiskLevel::Low,
            lower: 0.0,
            upper: 0.25,
        },
        RiskBandInfo {
            level: RiskLevel::Medium,
            lower: 0.25,
            upper: 0.5,
        },
        RiskBandInfo {
            level: RiskLevel::High,
            lower: 0.5,
            upper: 0.75,
        },
        RiskBandInfo {
            level: RiskLevel::Critical,
            lower: 0.75,
            upper: 1.0,
        },
    ],
};
