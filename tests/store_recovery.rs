//! 저장 파일 손상 복구(격리 후 재생성) 회귀 테스트.
use chrono::NaiveDate;
use std::fs;

use displacement_volume_analyzer::records::{seed_samples, Project, ProjectForm, Sample};
use displacement_volume_analyzer::store::JsonStore;

fn projects() -> Vec<Project> {
    let day = NaiveDate::from_ymd_opt(2025, 3, 14).unwrap();
    let now = day.and_hms_opt(15, 9, 26).unwrap();
    let mut form = ProjectForm::new(day);
    let first = form.to_project(1000, now).unwrap();
    form.project_name = "Bottle".into();
    form.weight = 0.5;
    let second = form.to_project(1001, now).unwrap();
    vec![first, second]
}

#[test]
fn samples_round_trip() {
    let dir = tempfile::tempdir().unwrap();
    let store = JsonStore::new(dir.path().join("dva_data.json"));
    store.save(&seed_samples()).unwrap();
    assert_eq!(store.load(), seed_samples());
}

#[test]
fn projects_round_trip_as_pretty_json_array() {
    let dir = tempfile::tempdir().unwrap();
    let store = JsonStore::new(dir.path().join("dva_projects.json"));
    store.save(&projects()).unwrap();
    assert_eq!(store.load(), projects());

    let text = fs::read_to_string(store.path()).unwrap();
    assert!(text.starts_with("[\n  {"), "not pretty-printed: {text}");
    assert!(text.contains("\"date\": \"2025-03-14\""));
    assert!(text.contains("\"last_modified\": \"2025-03-14 15:09:26\""));
}

#[test]
fn corrupt_file_is_quarantined_and_reset() {
    let dir = tempfile::tempdir().unwrap();
    let store: JsonStore<Sample> = JsonStore::new(dir.path().join("dva_data.json"));
    let garbage = b"\x00\xffnot json at all {";
    fs::write(store.path(), garbage).unwrap();

    store.ensure_valid(&[]).unwrap();

    assert!(store.load().is_empty());
    assert_eq!(fs::read(store.backup_path()).unwrap(), garbage);
    assert_eq!(fs::read_to_string(store.path()).unwrap().trim(), "[]");
}

#[test]
fn load_alone_quarantines_then_validation_recreates() {
    let dir = tempfile::tempdir().unwrap();
    let store: JsonStore<Project> = JsonStore::new(dir.path().join("dva_projects.json"));
    fs::write(store.path(), "[{\"project_number\": \"x\"}]").unwrap();

    assert!(store.load().is_empty());
    assert!(store.backup_path().exists());
    assert!(!store.path().exists());

    store.ensure_valid(&[]).unwrap();
    assert!(store.path().exists());
    assert!(store.load().is_empty());
}

#[test]
fn ensure_valid_leaves_good_file_alone() {
    let dir = tempfile::tempdir().unwrap();
    let store = JsonStore::new(dir.path().join("dva_projects.json"));
    store.save(&projects()).unwrap();
    for _ in 0..3 {
        store.ensure_valid(&[]).unwrap();
    }
    assert_eq!(store.load(), projects());
    assert!(!store.backup_path().exists());
}

#[test]
fn empty_file_is_rewritten_with_default() {
    let dir = tempfile::tempdir().unwrap();
    let store = JsonStore::new(dir.path().join("dva_data.json"));
    fs::write(store.path(), "").unwrap();
    store.ensure_valid(&seed_samples()).unwrap();
    assert_eq!(store.load(), seed_samples());
    assert!(!store.backup_path().exists());
}
