//! Course record model

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Enrollment status of a course inside a degree plan
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum CourseStatus {
    /// Not started and not scheduled
    NotTaken,
    /// Currently enrolled
    InProgress,
    /// Finished with a recorded grade
    Completed,
    /// Scheduled for a future term
    Planned,
    /// Finished with a failing outcome
    Failed,
}

impl CourseStatus {
    /// Kebab-case label used in plan files and exports
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::NotTaken => "not-taken",
            Self::InProgress => "in-progress",
            Self::Completed => "completed",
            Self::Planned => "planned",
            Self::Failed => "failed",
        }
    }
}

impl FromStr for CourseStatus {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().replace(['_', ' '], "-").as_str() {
            "not-taken" | "" => Ok(Self::NotTaken),
            "in-progress" => Ok(Self::InProgress),
            "completed" => Ok(Self::Completed),
            "planned" => Ok(Self::Planned),
            "failed" => Ok(Self::Failed),
            _ => Err(format!("Unknown course status: '{s}'")),
        }
    }
}

impl fmt::Display for CourseStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Explicit UCORE attribute as stored on a course: either one comma-delimited
/// string or an already split list.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum UcoreTags {
    /// Pre-split tag list (e.g. `["WRTG", "COMM"]`)
    List(Vec<String>),
    /// Comma-delimited tag string (e.g. `"WRTG, COMM"`)
    Text(String),
}

impl Default for UcoreTags {
    fn default() -> Self {
        Self::List(Vec::new())
    }
}

impl UcoreTags {
    /// Individual trimmed, non-empty entries in declaration order
    #[must_use]
    pub fn entries(&self) -> Vec<&str> {
        match self {
            Self::List(items) => items
                .iter()
                .map(|s| s.trim())
                .filter(|s| !s.is_empty())
                .collect(),
            Self::Text(text) => text
                .split(',')
                .map(str::trim)
                .filter(|s| !s.is_empty())
                .collect(),
        }
    }

    /// True when no entry is present
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.entries().is_empty()
    }
}

/// A single entry of a degree plan: a concrete course ("CPTS 121") or a
/// placeholder slot ("UCORE Inquiry", "Technical Elective").
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Course {
    /// Free-text name, optionally starting with "PREFIX NUMBER"
    pub name: String,

    /// Credit hours (zero means no contribution to any aggregate)
    #[serde(default)]
    pub credits: f32,

    /// Enrollment status; `None` for legacy records that only carry a grade
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub status: Option<CourseStatus>,

    /// Letter grade as entered (e.g. "A-", "S", "W"); kept verbatim
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub grade: Option<String>,

    /// Explicit UCORE attribute
    #[serde(default, skip_serializing_if = "UcoreTags::is_empty")]
    pub ucore: UcoreTags,

    /// Course was placed by the degree requirements rather than the student
    #[serde(default)]
    pub is_required: bool,

    /// Course is a retake of an earlier failed attempt
    #[serde(default)]
    pub is_retake: bool,

    /// Catalog footnote or requirement text attached to the slot
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub footnote: Option<String>,
}

impl Course {
    /// Create a course with a name and credits; status not-taken, no grade
    #[must_use]
    pub fn new(name: impl Into<String>, credits: f32) -> Self {
        Self {
            name: name.into(),
            credits,
            status: Some(CourseStatus::NotTaken),
            grade: None,
            ucore: UcoreTags::default(),
            is_required: false,
            is_retake: false,
            footnote: None,
        }
    }

    /// Builder: mark completed with the given grade
    #[must_use]
    pub fn completed(mut self, grade: impl Into<String>) -> Self {
        self.status = Some(CourseStatus::Completed);
        self.grade = Some(grade.into());
        self
    }

    /// Builder: set the status
    #[must_use]
    pub const fn with_status(mut self, status: CourseStatus) -> Self {
        self.status = Some(status);
        self
    }

    /// Builder: set the explicit UCORE attribute
    #[must_use]
    pub fn with_ucore(mut self, ucore: UcoreTags) -> Self {
        self.ucore = ucore;
        self
    }

    /// Builder: attach footnote text
    #[must_use]
    pub fn with_footnote(mut self, footnote: impl Into<String>) -> Self {
        self.footnote = Some(footnote.into());
        self
    }

    /// Status used by every aggregate.
    ///
    /// A record with no status but a non-empty grade is read as completed.
    #[must_use]
    pub fn effective_status(&self) -> CourseStatus {
        match self.status {
            Some(status) => status,
            None if self.grade().is_some() => CourseStatus::Completed,
            None => CourseStatus::NotTaken,
        }
    }

    /// Trimmed grade text, `None` when absent or blank
    #[must_use]
    pub fn grade(&self) -> Option<&str> {
        self.grade
            .as_deref()
            .map(str::trim)
            .filter(|g| !g.is_empty())
    }

    /// True when the course carries positive credit
    #[must_use]
    pub fn has_credit(&self) -> bool {
        self.credits > 0.0
    }

    /// True for completed courses (counts toward credits achieved)
    #[must_use]
    pub fn is_completed(&self) -> bool {
        self.effective_status() == CourseStatus::Completed
    }

    /// True for in-progress or planned courses (counts toward credits planned)
    #[must_use]
    pub fn is_pending(&self) -> bool {
        matches!(
            self.effective_status(),
            CourseStatus::InProgress | CourseStatus::Planned
        )
    }
}
