//! Record-level classification rules.
//!
//! Every function here is pure and total. Presentation layers call these
//! instead of re-deriving labels or null checks themselves.

use crate::models::condition::ConditionTag;
use crate::models::patient::PatientRecord;
use crate::models::severity::{Classification, SeverityCategory};

/// Sentinel returned for a per-disease severity that is absent.
pub const NOT_AVAILABLE: &str = "Not Available";

/// Normalize the record's label and pair it with the stored score.
pub fn classify_severity(record: &PatientRecord) -> Classification {
    Classification {
        label: SeverityCategory::from_label(record.final_severity_label.as_deref()),
        score: record.final_severity_score,
    }
}

/// Flagged conditions in priority order (CKD, Diabetes, Thyroid).
pub fn list_conditions(record: &PatientRecord) -> Vec<ConditionTag> {
    ConditionTag::ALL
        .into_iter()
        .filter(|c| record.has_condition(*c))
        .collect()
}

/// Stored severity for `disease`, or [`NOT_AVAILABLE`]. Never empty.
pub fn per_disease_severity(record: &PatientRecord, disease: ConditionTag) -> String {
    match record.disease_severity.get(disease).map(str::trim) {
        Some(value) if !value.is_empty() => value.to_string(),
        _ => NOT_AVAILABLE.to_string(),
    }
}
