use std::fmt;

use serde::{Deserialize, Serialize};
use ts_rs::TS;

use crate::models::condition::ConditionTag;

/// Hospital encounter key (`hadm_id`). Unique per table; the sole key used
/// to select a patient.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize, TS,
)]
#[ts(export)]
pub struct AdmissionId(pub i64);

impl fmt::Display for AdmissionId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Per-disease severity values. `None` means not present or not assessed,
/// which is distinct from a stored zero.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize, TS)]
#[ts(export)]
pub struct DiseaseSeverities {
    pub ckd: Option<String>,
    pub diabetes: Option<String>,
    pub thyroid: Option<String>,
}

impl DiseaseSeverities {
    pub fn get(&self, condition: ConditionTag) -> Option<&str> {
        match condition {
            ConditionTag::Ckd => self.ckd.as_deref(),
            ConditionTag::Diabetes => self.diabetes.as_deref(),
            ConditionTag::Thyroid => self.thyroid.as_deref(),
        }
    }

    pub fn set(&mut self, condition: ConditionTag, value: Option<String>) {
        match condition {
            ConditionTag::Ckd => self.ckd = value,
            ConditionTag::Diabetes => self.diabetes = value,
            ConditionTag::Thyroid => self.thyroid = value,
        }
    }
}

/// One row of the cohort table.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, TS)]
#[ts(export)]
pub struct PatientRecord {
    /// Opaque patient identifier, stable across admissions.
    pub subject_id: String,
    pub admission_id: AdmissionId,
    pub has_ckd: bool,
    pub has_diabetes: bool,
    pub has_thyroid: bool,
    pub disease_severity: DiseaseSeverities,
    pub final_severity_score: Option<f64>,
    /// Raw label as stored upstream, before normalization.
    pub final_severity_label: Option<String>,
}

impl PatientRecord {
    /// A record with no conditions flagged and no severity data.
    pub fn new(subject_id: impl Into<String>, admission_id: i64) -> Self {
        Self {
            subject_id: subject_id.into(),
            admission_id: AdmissionId(admission_id),
            has_ckd: false,
            has_diabetes: false,
            has_thyroid: false,
            disease_severity: DiseaseSeverities::default(),
            final_severity_score: None,
            final_severity_label: None,
        }
    }

    pub fn with_label(mut self, label: impl Into<String>) -> Self {
        self.final_severity_label = Some(label.into());
        self
    }

    pub fn with_score(mut self, score: f64) -> Self {
        self.final_severity_score = Some(score);
        self
    }

    pub fn with_condition(mut self, condition: ConditionTag, severity: Option<&str>) -> Self {
        match condition {
            ConditionTag::Ckd => self.has_ckd = true,
            ConditionTag::Diabetes => self.has_diabetes = true,
            ConditionTag::Thyroid => self.has_thyroid = true,
        }
        self.disease_severity
            .set(condition, severity.map(str::to_string));
        self
    }

    pub fn has_condition(&self, condition: ConditionTag) -> bool {
        match condition {
            ConditionTag::Ckd => self.has_ckd,
            ConditionTag::Diabetes => self.has_diabetes,
            ConditionTag::Thyroid => self.has_thyroid,
        }
    }

    /// Whether an upstream label is present at all, recognized or not.
    pub fn has_severity_label(&self) -> bool {
        self.final_severity_label.is_some()
    }
}
