//! Degree plan import and export
//!
//! Plans come from JSON (the persisted shape of [`DegreePlan`]) or from CSV
//! in the tabular export layout; [`load_plan_file`] picks by extension.

mod csv_parser;

pub use csv_parser::{parse_plan_csv, write_plan_csv, CSV_HEADERS, DEFAULT_CREDITS};

use crate::engine::models::{DegreePlan, Gradebook};
use std::fs;
use std::path::{Path, PathBuf};
use thiserror::Error;

/// Plan and gradebook file loading errors
#[derive(Debug, Error)]
pub enum PlanLoadError {
    /// File could not be read or written
    #[error("Failed to access {path}: {source}")]
    Io {
        /// File involved
        path: PathBuf,
        /// Underlying error
        #[source]
        source: std::io::Error,
    },

    /// JSON document did not match the expected shape
    #[error("Invalid JSON: {0}")]
    Json(#[from] serde_json::Error),

    /// TOML document did not match the expected shape
    #[error("Invalid TOML: {0}")]
    Toml(#[from] toml::de::Error),

    /// CSV row could not be interpreted
    #[error("Invalid CSV at line {line}: {message}")]
    Csv {
        /// 1-based line number
        line: usize,
        /// What was wrong
        message: String,
    },

    /// Extension is not one the loader understands
    #[error("Unsupported file format: '{0}' (expected .json or .csv)")]
    UnsupportedFormat(String),
}

fn read_file(path: &Path) -> Result<String, PlanLoadError> {
    fs::read_to_string(path).map_err(|source| PlanLoadError::Io {
        path: path.to_path_buf(),
        source,
    })
}

fn extension(path: &Path) -> String {
    path.extension()
        .and_then(|e| e.to_str())
        .unwrap_or_default()
        .to_ascii_lowercase()
}

/// Parse a plan from its JSON form
///
/// # Errors
/// Returns an error if the document is not a valid plan
pub fn parse_plan_json(content: &str) -> Result<DegreePlan, PlanLoadError> {
    Ok(serde_json::from_str(content)?)
}

/// Load a plan from a `.json` or `.csv` file
///
/// # Errors
/// Returns an error if the file cannot be read, has another extension, or
/// does not parse
pub fn load_plan_file<P: AsRef<Path>>(path: P) -> Result<DegreePlan, PlanLoadError> {
    let path = path.as_ref();
    let plan = match extension(path).as_str() {
        "json" => parse_plan_json(&read_file(path)?)?,
        "csv" => parse_plan_csv(&read_file(path)?)?,
        other => return Err(PlanLoadError::UnsupportedFormat(other.to_string())),
    };
    crate::info!(
        "Loaded plan from {} ({} courses)",
        path.display(),
        plan.course_count()
    );
    Ok(plan)
}

/// Write a plan as `.json` or `.csv`, chosen by extension
///
/// # Errors
/// Returns an error if the extension is unsupported or the file cannot be written
pub fn save_plan_file<P: AsRef<Path>>(plan: &DegreePlan, path: P) -> Result<(), PlanLoadError> {
    let path = path.as_ref();
    let content = match extension(path).as_str() {
        "json" => serde_json::to_string_pretty(plan)?,
        "csv" => write_plan_csv(plan)?,
        other => return Err(PlanLoadError::UnsupportedFormat(other.to_string())),
    };
    fs::write(path, content).map_err(|source| PlanLoadError::Io {
        path: path.to_path_buf(),
        source,
    })
}

/// Load a gradebook from a `.toml` or `.json` file
///
/// # Errors
/// Returns an error if the file cannot be read, has another extension, or
/// does not parse
pub fn load_gradebook_file<P: AsRef<Path>>(path: P) -> Result<Gradebook, PlanLoadError> {
    let path = path.as_ref();
    let content = read_file(path)?;
    match extension(path).as_str() {
        "toml" => Ok(toml::from_str(&content)?),
        "json" => Ok(serde_json::from_str(&content)?),
        other => Err(PlanLoadError::UnsupportedFormat(other.to_string())),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_plan_json_defaults() {
        let plan = parse_plan_json(
            r#"{"primaryMajor":"Computer Science","courses":{"1-Fall":[{"name":"CPTS 121","credits":4}]}}"#,
        )
        .unwrap();
        assert_eq!(plan.course_count(), 1);
        assert_eq!(plan.years, 4);
        assert!(plan.additional_majors.is_empty());
    }

    #[test]
    fn test_bad_term_key_is_json_error() {
        let err = parse_plan_json(r#"{"courses":{"Fall-1":[]}}"#).unwrap_err();
        assert!(matches!(err, PlanLoadError::Json(_)));
    }

    #[test]
    fn test_unsupported_extension() {
        let err = load_plan_file("plan.xlsx").unwrap_err();
        assert!(matches!(err, PlanLoadError::UnsupportedFormat(ext) if ext == "xlsx"));
    }

    #[test]
    fn test_missing_file_is_io_error() {
        let err = load_plan_file("/nonexistent/plan.json").unwrap_err();
        assert!(matches!(err, PlanLoadError::Io { .. }));
        assert!(err.to_string().contains("/nonexistent/plan.json"));
    }
}
