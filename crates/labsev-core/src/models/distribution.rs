use serde::{Deserialize, Serialize};
use ts_rs::TS;

use super::severity::SeverityCategory;

/// Number of records classified into one category.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, TS)]
#[ts(export)]
pub struct CategoryCount {
    pub category: SeverityCategory,
    pub count: usize,
}

/// Cohort-wide label frequencies. Always holds one entry per category, in
/// display order, with zero counts kept.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, TS)]
#[ts(export)]
pub struct CohortDistribution {
    pub entries: Vec<CategoryCount>,
}

impl CohortDistribution {
    /// Build from category tallies. Categories absent from `counts` get 0.
    pub fn from_counts(counts: impl IntoIterator<Item = SeverityCategory>) -> Self {
        let mut tally = [0usize; SeverityCategory::ALL.len()];
        for category in counts {
            tally[category.rank()] += 1;
        }
        Self {
            entries: SeverityCategory::ALL
                .into_iter()
                .map(|category| CategoryCount {
                    category,
                    count: tally[category.rank()],
                })
                .collect(),
        }
    }

    pub fn count(&self, category: SeverityCategory) -> usize {
        self.entries
            .iter()
            .find(|e| e.category == category)
            .map(|e| e.count)
            .unwrap_or(0)
    }

    pub fn total(&self) -> usize {
        self.entries.iter().map(|e| e.count).sum()
    }

    /// `(category, count)` pairs in display order.
    pub fn pairs(&self) -> Vec<(SeverityCategory, usize)> {
        self.entries.iter().map(|e| (e.category, e.count)).collect()
    }
}

/// How much of the cohort carries an upstream severity label.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize, TS)]
#[ts(export)]
pub struct CoverageSummary {
    pub total: usize,
    pub with_severity: usize,
    /// Percentage rounded to two decimals; 0.0 for an empty cohort.
    pub coverage_pct: f64,
}

impl CoverageSummary {
    pub fn new(total: usize, with_severity: usize) -> Self {
        let coverage_pct = if total == 0 {
            0.0
        } else {
            let pct = with_severity as f64 / total as f64 * 100.0;
            (pct * 100.0).round() / 100.0
        };
        Self {
            total,
            with_severity,
            coverage_pct,
        }
    }
}
