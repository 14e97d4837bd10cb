//! Integration tests for the file-backed plan store

use tempfile::TempDir;
use virtual_counselor::engine::models::{Course, DegreePlan, GradeCategory, Gradebook, Term, TermKey};
use virtual_counselor::store::{self, keys, FileStore, PlanStore, StoreError};

fn plan() -> DegreePlan {
    let mut plan = DegreePlan::new("Computer Science");
    plan.additional_majors.push("Mathematics".to_string());
    plan.add_course(
        TermKey::new(1, Term::Fall),
        Course::new("CPTS 121", 4.0).completed("A-"),
    );
    plan
}

#[test]
fn test_plan_survives_a_new_store_instance() {
    let dir = TempDir::new().unwrap();
    let mut first = FileStore::new(dir.path().join("data"));
    store::save_plan(&mut first, &plan()).unwrap();

    let second = FileStore::new(dir.path().join("data"));
    assert_eq!(store::load_plan(&second).unwrap(), Some(plan()));
    assert!(dir.path().join("data").join("wsu_vc_degree_plan.json").exists());
    assert!(dir.path().join("data").join("vc-degree-plan.json").exists());
}

#[test]
fn test_gradebooks_persist_per_course() {
    let dir = TempDir::new().unwrap();
    let mut file_store = FileStore::new(dir.path());

    let mut book = Gradebook::new("CPTS 121");
    book.categories[1] = GradeCategory::new("Midterm", 30.0).graded(27.0, 30.0);
    store::save_gradebook(&mut file_store, &book).unwrap();

    let loaded = store::load_gradebook(&file_store, "CPTS  121").unwrap().unwrap();
    assert_eq!(loaded.gradebook, book);
    assert!(store::load_gradebook(&file_store, "MATH 171").unwrap().is_none());
}

#[test]
fn test_corrupt_file_is_a_json_error() {
    let dir = TempDir::new().unwrap();
    std::fs::write(dir.path().join(format!("{}.json", keys::DEGREE_PLAN)), "{not json").unwrap();

    let file_store = FileStore::new(dir.path());
    assert!(matches!(
        store::load_plan(&file_store),
        Err(StoreError::Json { .. })
    ));
}

#[test]
fn test_invalid_key_rejected() {
    let dir = TempDir::new().unwrap();
    let mut file_store = FileStore::new(dir.path());
    assert!(matches!(
        file_store.write("../escape", &serde_json::json!(1)),
        Err(StoreError::InvalidKey(_))
    ));
}

#[test]
fn test_clear_all_empties_directory() {
    let dir = TempDir::new().unwrap();
    let mut file_store = FileStore::new(dir.path());
    store::save_plan(&mut file_store, &plan()).unwrap();
    store::save_user_courses(&mut file_store, &plan().course_list()).unwrap();

    store::clear_all(&mut file_store).unwrap();
    assert_eq!(std::fs::read_dir(dir.path()).unwrap().count(), 0);
    assert!(store::load_user_courses(&file_store).unwrap().is_empty());
}
