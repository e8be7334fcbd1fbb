//! Rule-based advisory synthesis.
//!
//! Two named profiles exist on purpose: the patient endpoint historically
//! served plain-text messages without the exercise-angina advisory, while the
//! batch scoring endpoint served decorated variants of the same bands plus
//! that advisory. Product has not confirmed whether the divergence is
//! intentional, so the two rule sets stay separate rather than being unified
//! silently.

use super::domain::{RawPredictionInput, RiskLevel};

/// Selects which of the two historical rule sets applies.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RecommendationProfile {
    /// Single patient assessments: plain messages, no stress-test advisory.
    Patient,
    /// Batch scoring: decorated messages, includes the stress-test advisory.
    Batch,
}

fn base_messages(level: RiskLevel, profile: RecommendationProfile) -> &'static [&'static str] {
    match (profile, level) {
        (RecommendationProfile::Patient, RiskLevel::Critical) => &[
            "Seek urgent cardiology consultation",
            "Schedule a comprehensive cardiac evaluation as soon as possible",
            "Review all current medications with your physician",
        ],
        (RecommendationProfile::Patient, RiskLevel::High) => &[
            "Schedule an appointment with a cardiologist soon",
            "Begin monitoring blood pressure and heart rate daily",
        ],
        (RecommendationProfile::Patient, RiskLevel::Medium) => &[
            "Discuss cardiovascular risk factors with your doctor",
            "Adopt a heart-healthy diet and regular exercise routine",
        ],
        (RecommendationProfile::Patient, RiskLevel::Low) => &[
            "Maintain your current healthy lifestyle",
            "Continue routine preventive checkups",
        ],
        (RecommendationProfile::Batch, RiskLevel::Critical) => &[
            "🚨 URGENT: Consult a cardiologist immediately",
            "📋 Schedule a comprehensive cardiac evaluation",
            "💊 Review all current medications with a physician",
        ],
        (RecommendationProfile::Batch, RiskLevel::High) => &[
            "⚠️ See a cardiologist within the next few weeks",
            "📈 Monitor blood pressure and heart rate daily",
        ],
        (RecommendationProfile::Batch, RiskLevel::Medium) => &[
            "🩺 Discuss cardiovascular risk factors with a doctor",
            "🥗 Adopt a heart-healthy diet and regular exercise",
        ],
        (RecommendationProfile::Batch, RiskLevel::Low) => &[
            "✅ Maintain the current healthy lifestyle",
            "🗓️ Continue routine preventive checkups",
        ],
    }
}

/// Produce the ordered advisory list for an assessment: band messages first
/// (most urgent first), then the conditional advisories in their fixed order.
/// Always non-empty.
pub fn recommend(
    probability: f64,
    input: &RawPredictionInput,
    profile: RecommendationProfile,
) -> Vec<String> {
    let level = super::classifier::classify(probability);
    let mut messages: Vec<String> = base_messages(level, profile)
        .iter()
        .map(|message| (*message).to_string())
        .collect();

    if input.resting_bp > 140 {
        messages.push("Monitor and manage your blood pressure".to_string());
    }
    if input.cholesterol > 200 {
        messages.push("Work on lowering your cholesterol levels".to_string());
    }
    if input.fasting_bs == 1 {
        messages.push("Keep your blood sugar under control".to_string());
    }
    if profile == RecommendationProfile::Batch && input.exercise_angina {
        messages.push("Discuss an exercise stress test with your doctor".to_string());
    }

    messages
}
