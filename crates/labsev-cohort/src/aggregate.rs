//! Cohort-wide aggregates.

use labsev_core::classify::classify_severity;
use labsev_core::models::distribution::{CohortDistribution, CoverageSummary};

use crate::table::CohortTable;

/// Classified label counts for the whole table, one entry per category in
/// display order. Zero-count categories are kept.
pub fn cohort_distribution(table: &CohortTable) -> CohortDistribution {
    CohortDistribution::from_counts(table.iter().map(|r| classify_severity(r).label))
}

/// Rows carrying any upstream label. Present-but-unrecognized labels count
/// as covered; only absence reduces coverage.
pub fn coverage_summary(table: &CohortTable) -> CoverageSummary {
    let with_severity = table.iter().filter(|r| r.has_severity_label()).count();
    CoverageSummary::new(table.len(), with_severity)
}
