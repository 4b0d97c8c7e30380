//! Selection queries over a loaded [`CohortTable`].

use std::collections::HashSet;

use labsev_core::models::patient::{AdmissionId, PatientRecord};

use crate::error::CohortError;
use crate::table::CohortTable;

/// Distinct admission ids in table order, for a selection menu.
pub fn list_admission_ids(table: &CohortTable) -> Result<Vec<AdmissionId>, CohortError> {
    if table.is_empty() {
        return Err(CohortError::EmptyCohort);
    }
    let mut seen = HashSet::with_capacity(table.len());
    Ok(table
        .iter()
        .map(|r| r.admission_id)
        .filter(|id| seen.insert(*id))
        .collect())
}

/// The record for `admission_id`. When the id is duplicated the first row
/// wins and a warning is logged.
pub fn select_patient(
    table: &CohortTable,
    admission_id: AdmissionId,
) -> Result<&PatientRecord, CohortError> {
    let record = table
        .iter()
        .find(|r| r.admission_id == admission_id)
        .ok_or(CohortError::PatientNotFound(admission_id))?;

    if table.integrity().duplicate_admissions.contains(&admission_id) {
        let rows = table
            .iter()
            .filter(|r| r.admission_id == admission_id)
            .count();
        tracing::warn!(
            admission_id = %admission_id,
            rows,
            "admission id is not unique; returning first row"
        );
    }

    tracing::debug!(admission_id = %admission_id, "patient selected");
    Ok(record)
}
