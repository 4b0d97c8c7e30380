use std::path::PathBuf;

use labsev_core::models::patient::AdmissionId;
use thiserror::Error;

use crate::source::SourceError;

#[derive(Debug, Error)]
pub enum CohortError {
    /// Source missing, unreadable, or with an unusable schema. Fatal to
    /// session start.
    #[error("failed to load cohort from {}: {source}", path.display())]
    DataLoad {
        path: PathBuf,
        #[source]
        source: SourceError,
    },

    /// The table loaded but holds no rows. Fatal to session start.
    #[error("cohort table has no rows")]
    EmptyCohort,

    /// Requested admission is not in the table. Recoverable: re-prompt.
    #[error("no patient with admission id {0}")]
    PatientNotFound(AdmissionId),
}

impl CohortError {
    /// Whether the session can continue after this error.
    pub fn is_recoverable(&self) -> bool {
        matches!(self, CohortError::PatientNotFound(_))
    }
}
