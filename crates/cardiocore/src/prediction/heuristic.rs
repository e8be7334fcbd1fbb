//! Deterministic local scorer used whenever the external model is unavailable.
//!
//! Each clinical factor contributes additively; within a factor the brackets
//! are mutually exclusive, tested from most to least severe so only the
//! highest matching bracket counts. The sum is clamped to [0, 1].

use super::domain::{EstimationMethod, EstimationResult, NormalizedFeatures};

pub const SIMPLIFIED_CONFIDENCE: f64 = 0.85;

/// Score a feature vector. Pure and total: always succeeds, identical input
/// always yields the identical result.
pub fn score(features: &NormalizedFeatures) -> EstimationResult {
    let mut risk_score: f64 = 0.0;

    risk_score += if features.age > 65.0 {
        0.3
    } else if features.age > 50.0 {
        0.2
    } else if features.age > 35.0 {
        0.1
    } else {
        0.0
    };

    if features.sex == 1.0 {
        risk_score += 0.1;
    }

    // Chest pain encoding: 0 typical angina, 1 atypical, 2 non-anginal,
    // 3 asymptomatic (no contribution).
    risk_score += match features.chest_pain_type as i64 {
        0 => 0.3,
        1 => 0.2,
        2 => 0.1,
        _ => 0.0,
    };

    risk_score += if features.resting_bp > 180.0 {
        0.4
    } else if features.resting_bp > 140.0 {
        0.3
    } else if features.resting_bp > 120.0 {
        0.1
    } else {
        0.0
    };

    risk_score += if features.cholesterol > 300.0 {
        0.3
    } else if features.cholesterol > 200.0 {
        0.2
    } else {
        0.0
    };

    if features.fasting_bs == 1.0 {
        risk_score += 0.2;
    }

    // ECG encoding: 1 ST-T abnormality, 2 left ventricular hypertrophy.
    risk_score += match features.resting_ecg as i64 {
        2 => 0.3,
        1 => 0.2,
        _ => 0.0,
    };

    risk_score += if features.max_hr < 100.0 {
        0.2
    } else if features.max_hr > 200.0 {
        0.1
    } else {
        0.0
    };

    if features.exercise_angina == 1.0 {
        risk_score += 0.3;
    }

    risk_score += if features.oldpeak > 2.0 {
        0.4
    } else if features.oldpeak > 1.0 {
        0.3
    } else if features.oldpeak > 0.0 {
        0.1
    } else {
        0.0
    };

    // Slope encoding: 1 flat, 2 down.
    risk_score += match features.st_slope as i64 {
        2 => 0.3,
        1 => 0.2,
        _ => 0.0,
    };

    EstimationResult {
        probability: risk_score.clamp(0.0, 1.0),
        confidence: SIMPLIFIED_CONFIDENCE,
        method: EstimationMethod::Simplified,
    }
}
