use std::sync::Arc;

use labsev_cohort::aggregate::{cohort_distribution, coverage_summary};
use labsev_cohort::cache::CohortCache;
use labsev_cohort::error::CohortError;
use labsev_cohort::query::{list_admission_ids, select_patient};
use labsev_cohort::table::CohortTable;
use labsev_core::models::patient::{AdmissionId, PatientRecord};
use labsev_core::models::severity::SeverityCategory;

use crate::config::DashboardConfig;
use crate::view::{
    chart_bars, DashboardSnapshot, LabSummaryApproval, PatientView, APPROVAL_MESSAGE,
};

/// One user's dashboard: a shared read-only table plus the current
/// selection.
pub struct DashboardSession {
    table: Arc<CohortTable>,
    admissions: Vec<AdmissionId>,
    current: AdmissionId,
}

impl DashboardSession {
    /// Load (or reuse) the configured table and pick the initial patient.
    pub fn open(config: &DashboardConfig, cache: &CohortCache) -> Result<Self, CohortError> {
        let table = cache.get_or_load(&config.source())?;
        Self::from_table(table, config.selected_admission)
    }

    /// Fails with [`CohortError::EmptyCohort`] when there is nothing to
    /// select. An unknown `preferred` id falls back to the first row.
    pub fn from_table(
        table: Arc<CohortTable>,
        preferred: Option<AdmissionId>,
    ) -> Result<Self, CohortError> {
        let admissions = list_admission_ids(&table)?;
        let first = admissions.first().copied().ok_or(CohortError::EmptyCohort)?;

        let current = match preferred {
            Some(id) if admissions.contains(&id) => id,
            Some(id) => {
                tracing::warn!(
                    admission_id = %id,
                    "configured admission not in cohort; using first row"
                );
                first
            }
            None => first,
        };

        Ok(Self {
            table,
            admissions,
            current,
        })
    }

    pub fn table(&self) -> &CohortTable {
        &self.table
    }

    /// Selection menu in table order.
    pub fn admissions(&self) -> &[AdmissionId] {
        &self.admissions
    }

    pub fn current(&self) -> AdmissionId {
        self.current
    }

    pub fn current_record(&self) -> Result<&PatientRecord, CohortError> {
        select_patient(&self.table, self.current)
    }

    /// Switch to `admission_id`. On [`CohortError::PatientNotFound`] the
    /// previous selection stays in place.
    pub fn select(&mut self, admission_id: AdmissionId) -> Result<&PatientRecord, CohortError> {
        select_patient(&self.table, admission_id)?;
        self.current = admission_id;
        self.current_record()
    }

    pub fn patient_view(&self) -> Result<PatientView, CohortError> {
        Ok(PatientView::from_record(self.current_record()?))
    }

    pub fn snapshot(&self) -> Result<DashboardSnapshot, CohortError> {
        let distribution = cohort_distribution(&self.table);
        Ok(DashboardSnapshot {
            admissions: self.admissions.clone(),
            patient: self.patient_view()?,
            chart: chart_bars(&distribution),
            distribution,
            coverage: coverage_summary(&self.table),
            integrity: self.table.integrity().clone(),
            loaded_at: self.table.loaded_at(),
        })
    }

    pub fn approve_summary(&self) -> Result<LabSummaryApproval, CohortError> {
        let view = self.patient_view()?;
        let label = view.classification.label;
        tracing::info!(admission_id = %view.admission_id, label = %label, "lab summary approved");
        Ok(LabSummaryApproval {
            subject_id: view.subject_id,
            admission_id: view.admission_id,
            label,
            message: APPROVAL_MESSAGE,
            schedule_appointment: label == SeverityCategory::Severe,
            approved_at: jiff::Timestamp::now(),
        })
    }
}
