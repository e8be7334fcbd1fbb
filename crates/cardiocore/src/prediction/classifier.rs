use super::domain::RiskLevel;

/// Band a probability into a risk level. Bands are closed at the lower end
/// so the four of them exactly partition [0, 1].
pub fn classify(probability: f64) -> RiskLevel {
    if probability >= 0.75 {
        RiskLevel::Critical
    } else if probability >= 0.5 {
        RiskLevel::High
    } else if probability >= 0.25 {
        RiskLevel::Medium
    } else {
        RiskLevel::Low
    }
}
