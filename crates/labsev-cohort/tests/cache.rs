use std::sync::Arc;

use labsev_cohort::cache::CohortCache;
use labsev_cohort::source::CohortSource;

const CSV: &str = "\
subject_id,hadm_id,has_ckd,has_diabetes,has_thyroid,final_severity_label,final_severity_score
1,100,0,0,0,Mild,1.0
";

#[test]
fn second_load_reuses_table() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("cohort.csv");
    std::fs::write(&path, CSV).unwrap();
    let source = CohortSource::new(&path);

    let cache = CohortCache::new();
    let first = cache.get_or_load(&source).unwrap();
    // Changes on disk are not seen until the entry is invalidated.
    std::fs::remove_file(&path).unwrap();
    let second = cache.get_or_load(&source).unwrap();

    assert!(Arc::ptr_eq(&first, &second));
    assert_eq!(cache.len(), 1);
}

#[test]
fn failed_loads_are_not_cached() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("cohort.csv");
    let source = CohortSource::new(&path);

    let cache = CohortCache::new();
    assert!(cache.get_or_load(&source).is_err());
    assert!(cache.is_empty());

    std::fs::write(&path, CSV).unwrap();
    assert_eq!(cache.get_or_load(&source).unwrap().len(), 1);
}

#[test]
fn invalidate_forces_reload() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("cohort.csv");
    std::fs::write(&path, CSV).unwrap();
    let source = CohortSource::new(&path);

    let cache = CohortCache::new();
    let first = cache.get_or_load(&source).unwrap();
    assert!(cache.invalidate(&source));
    assert!(!cache.invalidate(&source));
    let second = cache.get_or_load(&source).unwrap();
    assert!(!Arc::ptr_eq(&first, &second));
}
