use super::common::*;
use crate::prediction::classify;
use crate::prediction::domain::EstimationMethod;
use crate::prediction::heuristic::{score, SIMPLIFIED_CONFIDENCE};
use crate::prediction::normalizer::normalize;

#[test]
fn saturated_profile_clamps_to_one() {
    let features = normalize(&high_risk_input()).expect("valid input");
    let result = score(&features);

    assert_eq!(result.probability, 1.0);
    assert_eq!(result.confidence, SIMPLIFIED_CONFIDENCE);
    assert_eq!(result.method, EstimationMethod::Simplified);
    assert_critical(classify(result.probability));
}

#[test]
fn clean_profile_scores_zero() {
    let features = normalize(&low_risk_input()).expect("valid input");
    let result = score(&features);

    assert_eq!(result.probability, 0.0);
    assert_eq!(classify(result.probability).label(), "low");
}

#[test]
fn scoring_is_deterministic() {
    let features = normalize(&high_risk_input()).expect("valid input");

    let first = score(&features);
    let second = score(&features);

    assert_eq!(first.probability, second.probability);
    assert_eq!(first.confidence, second.confidence);
    assert_eq!(first.method, second.method);
}

#[test]
fn only_highest_age_bracket_counts() {
    let mut input = low_risk_input();

    input.age = 36;
    let young = score(&normalize(&input).expect("valid"));
    input.age = 51;
    let middle = score(&normalize(&input).expect("valid"));
    input.age = 66;
    let elderly = score(&normalize(&input).expect("valid"));

    assert!((young.probability - 0.1).abs() < 1e-9);
    assert!((middle.probability - 0.2).abs() < 1e-9);
    assert!((elderly.probability - 0.3).abs() < 1e-9);
}

#[test]
fn bradycardia_and_tachycardia_brackets_are_exclusive() {
    let mut input = low_risk_input();

    input.max_hr = 95;
    let low_hr = score(&normalize(&input).expect("valid"));
    input.max_hr = 205;
    let high_hr = score(&normalize(&input).expect("valid"));
    input.max_hr = 150;
    let normal_hr = score(&normalize(&input).expect("valid"));

    assert!((low_hr.probability - 0.2).abs() < 1e-9);
    assert!((high_hr.probability - 0.1).abs() < 1e-9);
    assert_eq!(normal_hr.probability, 0.0);
}

#[test]
fn probability_stays_in_unit_interval_under_extremes() {
    let mut input = high_risk_input();
    input.age = 150;
    input.resting_bp = 300;
    input.cholesterol = 1000;
    input.oldpeak = 10.0;

    let result = score(&normalize(&input).expect("valid"));
    assert!(result.probability <= 1.0);
    assert!(result.probability >= 0.0);
}
