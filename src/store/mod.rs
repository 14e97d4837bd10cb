//! Key-value persistence for plan state
//!
//! Values are JSON documents under string keys. The typed helpers below
//! read and write the degree plan, the user's course list and per-course
//! gradebooks on top of any [`PlanStore`].

mod error;
mod file;
mod memory;

pub use error::StoreError;
pub use file::FileStore;
pub use memory::MemoryStore;

use crate::engine::models::{Course, DegreePlan, Gradebook};
use serde::de::DeserializeOwned;
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};
use std::time::{SystemTime, UNIX_EPOCH};

/// Storage keys
pub mod keys {
    /// Degree plan
    pub const DEGREE_PLAN: &str = "wsu_vc_degree_plan";
    /// Degree plan key written by earlier builds
    pub const LEGACY_DEGREE_PLAN: &str = "vc-degree-plan";
    /// Selected degree program
    pub const SELECTED_DEGREE: &str = "wsu_vc_selected_degree";
    /// User's flat course list
    pub const USER_COURSES: &str = "wsu_vc_user_courses";
    /// Course list key written by earlier builds
    pub const LEGACY_USER_COURSES: &str = "vc_course_schedule";
    /// UI preferences
    pub const PREFERENCES: &str = "wsu_vc_preferences";
    /// Gradebooks keyed by course
    pub const GRADE_CALCULATOR: &str = "wsu_vc_grade_calculator";
    /// Recently viewed courses
    pub const RECENT_COURSES: &str = "wsu_vc_recent_courses";
    /// UI theme
    pub const THEME: &str = "wsu_vc_theme";

    /// Every key the application owns, legacy keys included
    pub const ALL: [&str; 9] = [
        DEGREE_PLAN,
        LEGACY_DEGREE_PLAN,
        SELECTED_DEGREE,
        USER_COURSES,
        LEGACY_USER_COURSES,
        PREFERENCES,
        GRADE_CALCULATOR,
        RECENT_COURSES,
        THEME,
    ];
}

/// Narrow key-value interface the planner persists through
pub trait PlanStore {
    /// Value under `key`, `None` if absent
    ///
    /// # Errors
    /// Returns an error if the backing storage cannot be read or holds invalid JSON
    fn read(&self, key: &str) -> Result<Option<Value>, StoreError>;

    /// Replace the value under `key`
    ///
    /// # Errors
    /// Returns an error if the backing storage cannot be written
    fn write(&mut self, key: &str, value: &Value) -> Result<(), StoreError>;

    /// Remove `key`; removing an absent key succeeds
    ///
    /// # Errors
    /// Returns an error if the backing storage cannot be modified
    fn clear(&mut self, key: &str) -> Result<(), StoreError>;
}

/// Read and deserialize the value under `key`
///
/// # Errors
/// Returns an error if reading fails or the value has the wrong shape
pub fn load<T: DeserializeOwned>(store: &dyn PlanStore, key: &str) -> Result<Option<T>, StoreError> {
    store
        .read(key)?
        .map(|value| serde_json::from_value(value).map_err(|e| StoreError::json(key, e)))
        .transpose()
}

/// Serialize and write a value under `key`
///
/// # Errors
/// Returns an error if serialization or writing fails
pub fn save<T: Serialize>(store: &mut dyn PlanStore, key: &str, value: &T) -> Result<(), StoreError> {
    let value = serde_json::to_value(value).map_err(|e| StoreError::json(key, e))?;
    store.write(key, &value)
}

/// Save the degree plan under the current and the legacy key
///
/// # Errors
/// Returns an error if either write fails
pub fn save_plan(store: &mut dyn PlanStore, plan: &DegreePlan) -> Result<(), StoreError> {
    save(store, keys::DEGREE_PLAN, plan)?;
    save(store, keys::LEGACY_DEGREE_PLAN, plan)?;
    crate::debug!("Saved degree plan ({} courses)", plan.course_count());
    Ok(())
}

/// Load the degree plan, falling back to the legacy key
///
/// # Errors
/// Returns an error if a stored plan cannot be read or parsed
pub fn load_plan(store: &dyn PlanStore) -> Result<Option<DegreePlan>, StoreError> {
    match load(store, keys::DEGREE_PLAN)? {
        Some(plan) => Ok(Some(plan)),
        None => load(store, keys::LEGACY_DEGREE_PLAN),
    }
}

/// Save the user's course list under the current and the legacy key
///
/// # Errors
/// Returns an error if either write fails
pub fn save_user_courses(store: &mut dyn PlanStore, courses: &[Course]) -> Result<(), StoreError> {
    save(store, keys::USER_COURSES, &courses)?;
    save(store, keys::LEGACY_USER_COURSES, &courses)
}

/// Load the user's course list, falling back to the legacy key; empty if neither exists
///
/// # Errors
/// Returns an error if a stored list cannot be read or parsed
pub fn load_user_courses(store: &dyn PlanStore) -> Result<Vec<Course>, StoreError> {
    if let Some(courses) = load(store, keys::USER_COURSES)? {
        return Ok(courses);
    }
    Ok(load(store, keys::LEGACY_USER_COURSES)?.unwrap_or_default())
}

/// Map key for a course's gradebook: trimmed, lowercase, whitespace as '_'
#[must_use]
pub fn gradebook_key(course_name: &str) -> String {
    let key = course_name
        .split_whitespace()
        .collect::<Vec<_>>()
        .join("_")
        .to_lowercase();
    if key.is_empty() {
        "default".to_string()
    } else {
        key
    }
}

/// Gradebook as persisted, with a save timestamp
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SavedGradebook {
    /// Stored gradebook
    #[serde(flatten)]
    pub gradebook: Gradebook,
    /// Milliseconds since the Unix epoch at save time
    #[serde(default)]
    pub updated_at: u64,
}

fn now_millis() -> u64 {
    SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .map_or(0, |d| u64::try_from(d.as_millis()).unwrap_or(u64::MAX))
}

fn gradebook_map(store: &dyn PlanStore) -> Result<Map<String, Value>, StoreError> {
    Ok(load(store, keys::GRADE_CALCULATOR)?.unwrap_or_default())
}

/// Save a gradebook under its course name
///
/// # Errors
/// Returns an error if the gradebook map cannot be read or written
pub fn save_gradebook(store: &mut dyn PlanStore, gradebook: &Gradebook) -> Result<(), StoreError> {
    let mut all = gradebook_map(store)?;
    let entry = SavedGradebook {
        gradebook: gradebook.clone(),
        updated_at: now_millis(),
    };
    let value =
        serde_json::to_value(entry).map_err(|e| StoreError::json(keys::GRADE_CALCULATOR, e))?;
    all.insert(gradebook_key(&gradebook.course_name), value);
    store.write(keys::GRADE_CALCULATOR, &Value::Object(all))
}

/// Load the gradebook saved for a course
///
/// # Errors
/// Returns an error if the gradebook map cannot be read or the entry is malformed
pub fn load_gradebook(
    store: &dyn PlanStore,
    course_name: &str,
) -> Result<Option<SavedGradebook>, StoreError> {
    gradebook_map(store)?
        .remove(&gradebook_key(course_name))
        .map(|v| serde_json::from_value(v).map_err(|e| StoreError::json(keys::GRADE_CALCULATOR, e)))
        .transpose()
}

/// Remove one course's gradebook, or all of them when `course_name` is `None`
///
/// # Errors
/// Returns an error if the gradebook map cannot be read or written
pub fn clear_gradebook(store: &mut dyn PlanStore, course_name: Option<&str>) -> Result<(), StoreError> {
    let Some(name) = course_name else {
        return store.clear(keys::GRADE_CALCULATOR);
    };
    let mut all = gradebook_map(store)?;
    if all.remove(&gradebook_key(name)).is_some() {
        store.write(keys::GRADE_CALCULATOR, &Value::Object(all))?;
    }
    Ok(())
}

/// Remove every key the application owns
///
/// # Errors
/// Returns the first clearing failure
pub fn clear_all(store: &mut dyn PlanStore) -> Result<(), StoreError> {
    for key in keys::ALL {
        store.clear(key)?;
    }
    Ok(())
}
