use std::collections::BTreeMap;

use chrono::Datelike;
use serde::Serialize;

use super::domain::RiskLevel;
use super::repository::PredictionRecord;

/// Month buckets are truncated to this many most-recent entries.
const MAX_MONTH_BUCKETS: usize = 12;

/// Per-level counts for a population of predictions.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
pub struct RiskLevelCounts {
    pub low: usize,
    pub medium: usize,
    pub high: usize,
    pub critical: usize,
}

impl RiskLevelCounts {
    pub fn record(&mut self, level: RiskLevel) {
        match level {
            RiskLevel::Low => self.low += 1,
            RiskLevel::Medium => self.medium += 1,
            RiskLevel::High => self.high += 1,
            RiskLevel::Critical => self.critical += 1,
        }
    }

    pub fn total(&self) -> usize {
        self.low + self.medium + self.high + self.critical
    }
}

/// One calendar month of prediction activity.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct MonthBucket {
    pub year: i32,
    pub month: u32,
    pub count: usize,
    pub average_probability: f64,
}

/// Summary statistics over a supplied collection of historical predictions.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct AggregateStats {
    pub total: usize,
    pub average_probability: f64,
    pub high_risk_count: usize,
    pub critical_risk_count: usize,
    pub risk_levels: RiskLevelCounts,
    pub monthly: Vec<MonthBucket>,
}

/// Compute summary statistics over an already-filtered record set. Pure;
/// owner scoping and the active flag are the repository's concern. Records
/// without a usable timestamp still count toward the totals but are skipped
/// by the month grouping.
pub fn aggregate(records: &[PredictionRecord]) -> AggregateStats {
    let total = records.len();
    let probability_sum: f64 = records.iter().map(|record| record.probability).sum();
    let average_probability = if total == 0 {
        0.0
    } else {
        probability_sum / total as f64
    };

    let high_risk_count = records
        .iter()
        .filter(|record| record.probability >= 0.5)
        .count();
    let critical_risk_count = records
        .iter()
        .filter(|record| record.probability >= 0.75)
        .count();

    // Levels were assigned when each record was created; count the stored
    // value so records classified under earlier band boundaries keep it.
    let mut risk_levels = RiskLevelCounts::default();
    for record in records {
        risk_levels.record(record.risk_level);
    }

    let mut months: BTreeMap<(i32, u32), (usize, f64)> = BTreeMap::new();
    for record in records {
        let Some(created_at) = record.created_at else {
            continue;
        };
        let entry = months
            .entry((created_at.year(), created_at.month()))
            .or_insert((0, 0.0));
        entry.0 += 1;
        entry.1 += record.probability;
    }

    let monthly = months
        .into_iter()
        .rev()
        .take(MAX_MONTH_BUCKETS)
        .map(|((year, month), (count, sum))| MonthBucket {
            year,
            month,
            count,
            average_probability: sum / count as f64,
        })
        .collect();

    AggregateStats {
        total,
        average_probability,
        high_risk_count,
        critical_risk_count,
        risk_levels,
        monthly,
    }
}
