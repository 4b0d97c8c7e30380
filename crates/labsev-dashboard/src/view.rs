//! Serializable views handed to the presentation layer. Everything here is
//! derived through the cohort model; a UI renders these without
//! re-deriving labels, colors, or counts.

use labsev_cohort::table::IntegrityReport;
use labsev_core::classify::{classify_severity, list_conditions, per_disease_severity};
use labsev_core::models::condition::ConditionTag;
use labsev_core::models::distribution::{CohortDistribution, CoverageSummary};
use labsev_core::models::indicator::SeverityIndicator;
use labsev_core::models::patient::{AdmissionId, PatientRecord};
use labsev_core::models::severity::{Classification, SeverityCategory};
use serde::Serialize;

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ConditionView {
    pub condition: ConditionTag,
    pub severity: String,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct PatientView {
    pub subject_id: String,
    pub admission_id: AdmissionId,
    pub classification: Classification,
    pub indicator: SeverityIndicator,
    pub conditions: Vec<ConditionView>,
    pub recommended_action: Option<&'static str>,
}

impl PatientView {
    pub fn from_record(record: &PatientRecord) -> Self {
        let classification = classify_severity(record);
        let conditions = list_conditions(record)
            .into_iter()
            .map(|condition| ConditionView {
                condition,
                severity: per_disease_severity(record, condition),
            })
            .collect();

        Self {
            subject_id: record.subject_id.clone(),
            admission_id: record.admission_id,
            classification,
            indicator: classification.label.indicator(),
            conditions,
            recommended_action: classification.label.recommended_action(),
        }
    }
}

/// One bar of the cohort distribution chart.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct ChartBar {
    pub category: SeverityCategory,
    pub count: usize,
    pub color: &'static str,
}

pub fn chart_bars(distribution: &CohortDistribution) -> Vec<ChartBar> {
    distribution
        .entries
        .iter()
        .map(|e| ChartBar {
            category: e.category,
            count: e.count,
            color: e.category.indicator().color,
        })
        .collect()
}

/// Everything one dashboard render needs.
#[derive(Debug, Clone, Serialize)]
pub struct DashboardSnapshot {
    pub admissions: Vec<AdmissionId>,
    pub patient: PatientView,
    pub distribution: CohortDistribution,
    pub chart: Vec<ChartBar>,
    pub coverage: CoverageSummary,
    pub integrity: IntegrityReport,
    pub loaded_at: jiff::Timestamp,
}

pub const APPROVAL_MESSAGE: &str = "Lab summary approved and ready for patient communication.";

/// Outcome of approving the current patient's lab summary.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct LabSummaryApproval {
    pub subject_id: String,
    pub admission_id: AdmissionId,
    pub label: SeverityCategory,
    pub message: &'static str,
    pub schedule_appointment: bool,
    pub approved_at: jiff::Timestamp,
}
