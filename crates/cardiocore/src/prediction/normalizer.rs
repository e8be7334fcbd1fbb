use serde::Serialize;

use super::domain::{NormalizedFeatures, RawPredictionInput};
use super::encoding;

/// Raised when caller-supplied input violates a range or enum constraint.
/// Never retried and never produces a partial effect.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error, Serialize)]
#[error("invalid {field}: {reason}")]
pub struct ValidationError {
    pub field: &'static str,
    pub reason: String,
}

fn check_range(field: &'static str, value: i64, min: i64, max: i64) -> Result<f64, ValidationError> {
    if (min..=max).contains(&value) {
        Ok(value as f64)
    } else {
        Err(ValidationError {
            field,
            reason: format!("{value} is outside the allowed range {min}..={max}"),
        })
    }
}

/// Validate a raw submission and encode it into the canonical feature vector.
/// Numeric fields pass through unchanged; each categorical label is replaced
/// by its fixed index from the shared encoding tables. No side effects.
pub fn normalize(raw: &RawPredictionInput) -> Result<NormalizedFeatures, ValidationError> {
    let age = check_range("age", raw.age, 0, 150)?;
    let resting_bp = check_range("restingBP", raw.resting_bp, 0, 300)?;
    let cholesterol = check_range("cholesterol", raw.cholesterol, 0, 1000)?;
    let max_hr = check_range("maxHR", raw.max_hr, 0, 300)?;

    if !(-10.0..=10.0).contains(&raw.oldpeak) {
        return Err(ValidationError {
            field: "oldpeak",
            reason: format!("{} is outside the allowed range -10..=10", raw.oldpeak),
        });
    }

    let fasting_bs = match raw.fasting_bs {
        0 | 1 => raw.fasting_bs as f64,
        other => {
            return Err(ValidationError {
                field: "fastingBS",
                reason: format!("{other} must be 0 or 1"),
            })
        }
    };

    Ok(NormalizedFeatures {
        age,
        sex: encoding::SEX.encode(&raw.sex)?,
        chest_pain_type: encoding::CHEST_PAIN_TYPE.encode(&raw.chest_pain_type)?,
        resting_bp,
        cholesterol,
        fasting_bs,
        resting_ecg: encoding::RESTING_ECG.encode(&raw.resting_ecg)?,
        max_hr,
        exercise_angina: if raw.exercise_angina { 1.0 } else { 0.0 },
        oldpeak: raw.oldpeak,
        st_slope: encoding::ST_SLOPE.encode(&raw.st_slope)?,
    })
}
