use std::sync::Arc;

use labsev_cohort::cache::CohortCache;
use labsev_cohort::error::CohortError;
use labsev_cohort::table::CohortTable;
use labsev_core::classify::NOT_AVAILABLE;
use labsev_core::models::condition::ConditionTag;
use labsev_core::models::indicator::Tone;
use labsev_core::models::patient::{AdmissionId, PatientRecord};
use labsev_core::models::severity::SeverityCategory;
use labsev_dashboard::config::DashboardConfig;
use labsev_dashboard::session::DashboardSession;
use labsev_dashboard::view::APPROVAL_MESSAGE;

fn cohort() -> Arc<CohortTable> {
    Arc::new(CohortTable::from_records(vec![
        PatientRecord::new("s1", 1)
            .with_label("Stable")
            .with_score(0.0)
            .with_condition(ConditionTag::Ckd, Some("Stage 2"))
            .with_condition(ConditionTag::Thyroid, None),
        PatientRecord::new("s2", 2)
            .with_label("Severe")
            .with_score(3.0)
            .with_condition(ConditionTag::Diabetes, Some("Uncontrolled")),
        PatientRecord::new("s3", 3),
    ]))
}

#[test]
fn opens_on_first_admission_by_default() {
    let session = DashboardSession::from_table(cohort(), None).unwrap();
    assert_eq!(session.current(), AdmissionId(1));
    assert_eq!(
        session.admissions(),
        &[AdmissionId(1), AdmissionId(2), AdmissionId(3)]
    );
}

#[test]
fn opens_on_preferred_admission() {
    let session = DashboardSession::from_table(cohort(), Some(AdmissionId(3))).unwrap();
    assert_eq!(session.current(), AdmissionId(3));
}

#[test]
fn unknown_preferred_admission_falls_back() {
    let session = DashboardSession::from_table(cohort(), Some(AdmissionId(999))).unwrap();
    assert_eq!(session.current(), AdmissionId(1));
}

#[test]
fn empty_cohort_cannot_open() {
    let empty = Arc::new(CohortTable::from_records(Vec::new()));
    let err = DashboardSession::from_table(empty, None).err().unwrap();
    assert!(matches!(err, CohortError::EmptyCohort));
}

#[test]
fn failed_selection_keeps_previous_patient() {
    let mut session = DashboardSession::from_table(cohort(), None).unwrap();
    session.select(AdmissionId(2)).unwrap();

    let err = session.select(AdmissionId(999)).unwrap_err();
    assert!(err.is_recoverable());
    assert_eq!(session.current(), AdmissionId(2));
}

#[test]
fn patient_view_lists_conditions_with_severity() {
    let session = DashboardSession::from_table(cohort(), None).unwrap();
    let view = session.patient_view().unwrap();

    assert_eq!(view.classification.label, SeverityCategory::Stable);
    assert_eq!(view.indicator.tone, Tone::Success);
    assert_eq!(view.recommended_action, None);
    let conditions: Vec<_> = view
        .conditions
        .iter()
        .map(|c| (c.condition, c.severity.as_str()))
        .collect();
    assert_eq!(
        conditions,
        vec![(ConditionTag::Ckd, "Stage 2"), (ConditionTag::Thyroid, NOT_AVAILABLE)]
    );
}

#[test]
fn severe_patient_recommends_scheduling() {
    let mut session = DashboardSession::from_table(cohort(), None).unwrap();
    session.select(AdmissionId(2)).unwrap();

    let view = session.patient_view().unwrap();
    assert!(view.recommended_action.is_some());

    let approval = session.approve_summary().unwrap();
    assert_eq!(approval.admission_id, AdmissionId(2));
    assert_eq!(approval.label, SeverityCategory::Severe);
    assert!(approval.schedule_appointment);
    assert_eq!(approval.message, APPROVAL_MESSAGE);
}

#[test]
fn snapshot_covers_whole_cohort() {
    let session = DashboardSession::from_table(cohort(), None).unwrap();
    let snapshot = session.snapshot().unwrap();

    assert_eq!(snapshot.admissions.len(), 3);
    assert_eq!(snapshot.distribution.total(), 3);
    assert_eq!(snapshot.chart.len(), 5);
    assert_eq!(snapshot.chart[4].category, SeverityCategory::Unknown);
    assert_eq!(snapshot.chart[4].count, 1);
    assert_eq!(snapshot.coverage.coverage_pct, 66.67);
    assert!(snapshot.integrity.is_clean());

    let json = serde_json::to_value(&snapshot).unwrap();
    assert_eq!(json["patient"]["indicator"]["headline"], "Stable");
    assert_eq!(json["chart"][1]["category"], "Mild");
    assert_eq!(json["chart"][1]["count"], 0);
}

#[test]
fn open_reads_configured_file_through_cache() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("cohort.csv");
    std::fs::write(
        &path,
        "subject_id,hadm_id,has_ckd,has_diabetes,has_thyroid,final_severity_label,final_severity_score\n\
         1,500,0,0,0,Mild,1.0\n\
         2,501,1,0,0,Severe,3.0\n",
    )
    .unwrap();

    let mut config = DashboardConfig::new(&path);
    config.selected_admission = Some(AdmissionId(501));
    let cache = CohortCache::new();

    let first = DashboardSession::open(&config, &cache).unwrap();
    let second = DashboardSession::open(&config, &cache).unwrap();
    assert_eq!(first.current(), AdmissionId(501));
    assert_eq!(cache.len(), 1);
    assert_eq!(second.table().len(), 2);
}
