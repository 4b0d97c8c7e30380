use std::collections::{BTreeMap, HashSet};
use std::path::{Path, PathBuf};

use labsev_core::models::patient::{AdmissionId, PatientRecord};
use labsev_core::models::severity::SeverityCategory;
use serde::Serialize;

use crate::source::ColumnConvention;

/// Data-integrity findings. Never fatal; surfaced so they are not silently
/// ignored.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct IntegrityReport {
    /// Admission ids shared by more than one row, in first-seen order.
    pub duplicate_admissions: Vec<AdmissionId>,
    /// Present labels outside the recognized categories, with row counts.
    pub unrecognized_labels: BTreeMap<String, usize>,
}

impl IntegrityReport {
    pub fn scan(records: &[PatientRecord]) -> Self {
        let mut seen = HashSet::new();
        let mut reported = HashSet::new();
        let mut report = IntegrityReport::default();

        for record in records {
            let id = record.admission_id;
            if !seen.insert(id) && reported.insert(id) {
                report.duplicate_admissions.push(id);
            }
            if let Some(label) = record.final_severity_label.as_deref()
                && !SeverityCategory::is_recognized(label)
            {
                *report
                    .unrecognized_labels
                    .entry(label.to_string())
                    .or_default() += 1;
            }
        }
        report
    }

    pub fn is_clean(&self) -> bool {
        self.duplicate_admissions.is_empty() && self.unrecognized_labels.is_empty()
    }

    /// Emit one warning per finding.
    pub fn log(&self) {
        for id in &self.duplicate_admissions {
            tracing::warn!(admission_id = %id, "duplicate admission id; first row wins");
        }
        for (label, count) in &self.unrecognized_labels {
            tracing::warn!(
                label = %label,
                count,
                "unrecognized severity label; classified as Unknown"
            );
        }
    }
}

/// The immutable, in-memory cohort.
#[derive(Debug, Clone)]
pub struct CohortTable {
    records: Vec<PatientRecord>,
    source: Option<PathBuf>,
    convention: ColumnConvention,
    loaded_at: jiff::Timestamp,
    integrity: IntegrityReport,
}

impl CohortTable {
    /// Build a table from records already in memory.
    pub fn from_records(records: Vec<PatientRecord>) -> Self {
        Self::assemble(records, None, ColumnConvention::Final)
    }

    pub(crate) fn assemble(
        records: Vec<PatientRecord>,
        source: Option<PathBuf>,
        convention: ColumnConvention,
    ) -> Self {
        let integrity = IntegrityReport::scan(&records);
        Self {
            records,
            source,
            convention,
            loaded_at: jiff::Timestamp::now(),
            integrity,
        }
    }

    pub fn records(&self) -> &[PatientRecord] {
        &self.records
    }

    pub fn iter(&self) -> impl Iterator<Item = &PatientRecord> {
        self.records.iter()
    }

    pub fn len(&self) -> usize {
        self.records.len()
    }

    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }

    /// File the table was read from, if any.
    pub fn source(&self) -> Option<&Path> {
        self.source.as_deref()
    }

    /// Severity column convention the table was read with.
    pub fn convention(&self) -> ColumnConvention {
        self.convention
    }

    pub fn loaded_at(&self) -> jiff::Timestamp {
        self.loaded_at
    }

    pub fn integrity(&self) -> &IntegrityReport {
        &self.integrity
    }
}
