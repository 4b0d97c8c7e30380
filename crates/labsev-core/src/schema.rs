//! Column names of the precomputed severity table.
//!
//! `final_*` is the canonical severity convention; `lab_*` is the legacy
//! alias some exports still carry. Resolution between the two happens at
//! load time in `labsev-cohort`.

/// Canonical column names.
pub mod column {
    pub const SUBJECT_ID: &str = "subject_id";
    pub const HADM_ID: &str = "hadm_id";
    pub const HAS_CKD: &str = "has_ckd";
    pub const HAS_DIABETES: &str = "has_diabetes";
    pub const HAS_THYROID: &str = "has_thyroid";
    pub const CKD_SEVERITY: &str = "ckd_severity";
    pub const DIABETES_SEVERITY: &str = "diabetes_severity_final";
    pub const THYROID_SEVERITY: &str = "thyroid_severity_final";
    pub const FINAL_SEVERITY_LABEL: &str = "final_severity_label";
    pub const FINAL_SEVERITY_SCORE: &str = "final_severity_score";
}

/// Alternate names accepted for canonical columns.
pub mod alias {
    pub const ADMISSION_ID: &str = "admission_id";
    pub const LAB_SEVERITY_LABEL: &str = "lab_severity_label";
    pub const LAB_SEVERITY_SCORE: &str = "lab_severity_score";
}

/// Columns every source must provide (admission id and severity columns
/// are resolved separately because they have aliases).
pub const REQUIRED_FLAGS: [&str; 4] = [
    column::SUBJECT_ID,
    column::HAS_CKD,
    column::HAS_DIABETES,
    column::HAS_THYROID,
];
