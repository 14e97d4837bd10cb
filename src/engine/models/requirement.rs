//! Requirement descriptor model produced by the elective classifier

use serde::{Deserialize, Serialize};
use std::fmt;

/// Kind of requirement a footnote or slot name describes
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum RequirementKind {
    /// A UCORE-designated course, optionally of one category
    #[serde(rename = "UCORE")]
    Ucore,
    /// A computer science elective
    #[serde(rename = "CS")]
    Cs,
    /// A technical elective
    Technical,
    /// Any course
    General,
    /// A closed list of courses with no named category
    CourseList,
}

impl fmt::Display for RequirementKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let label = match self {
            Self::Ucore => "UCORE",
            Self::Cs => "CS",
            Self::Technical => "Technical",
            Self::General => "General",
            Self::CourseList => "CourseList",
        };
        f.write_str(label)
    }
}

/// Inclusive course-level bounds (e.g. 300 to 400 level)
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct LevelRange {
    /// Lowest level, e.g. 300
    pub min: u16,
    /// Highest level, e.g. 400
    pub max: u16,
}

/// One course reference pulled out of requirement text
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum AllowedCourse {
    /// A specific course, e.g. "CPT S 321"
    Exact {
        /// Normalized prefix ("CPT S")
        prefix: String,
        /// Course number, optionally with a letter suffix ("321", "150B")
        number: String,
        /// "PREFIX NUMBER"
        code: String,
    },
    /// Any course of a prefix within a level band, e.g. "300-400-level CPT S"
    LevelRange {
        /// Normalized prefix
        prefix: String,
        /// Level bounds
        #[serde(rename = "levelRange")]
        level_range: LevelRange,
        /// "PREFIX MIN-MAX level"
        code: String,
    },
}

impl AllowedCourse {
    /// Build an exact entry from an already normalized prefix and number
    #[must_use]
    pub fn exact(prefix: &str, number: &str) -> Self {
        Self::Exact {
            prefix: prefix.to_string(),
            number: number.to_string(),
            code: format!("{prefix} {number}"),
        }
    }

    /// Build a level-range entry
    #[must_use]
    pub fn level_range(prefix: &str, min: u16, max: u16) -> Self {
        Self::LevelRange {
            prefix: prefix.to_string(),
            level_range: LevelRange { min, max },
            code: format!("{prefix} {min}-{max} level"),
        }
    }

    /// Display code of the entry
    #[must_use]
    pub fn code(&self) -> &str {
        match self {
            Self::Exact { code, .. } | Self::LevelRange { code, .. } => code,
        }
    }

    /// Prefix of the entry
    #[must_use]
    pub fn prefix(&self) -> &str {
        match self {
            Self::Exact { prefix, .. } | Self::LevelRange { prefix, .. } => prefix,
        }
    }

    /// Whether a catalog course (`prefix`, `number`) satisfies this entry.
    ///
    /// Prefixes compare with whitespace removed so "CPT S" equals "CPTS".
    /// Level ranges compare the hundreds level of the number's leading digits.
    #[must_use]
    pub fn matches(&self, prefix: &str, number: &str) -> bool {
        if squash(self.prefix()) != squash(prefix) {
            return false;
        }
        match self {
            Self::Exact { number: own, .. } => own.eq_ignore_ascii_case(number.trim()),
            Self::LevelRange { level_range, .. } => {
                let digits: String = number
                    .trim()
                    .chars()
                    .take_while(char::is_ascii_digit)
                    .collect();
                digits.parse::<u16>().is_ok_and(|n| {
                    let level = n / 100 * 100;
                    level >= level_range.min && level <= level_range.max
                })
            }
        }
    }
}

fn squash(prefix: &str) -> String {
    prefix
        .chars()
        .filter(|c| !c.is_whitespace())
        .collect::<String>()
        .to_ascii_uppercase()
}

/// A structured, best-effort reading of one piece of requirement text
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Requirement {
    /// Detected requirement kind
    #[serde(rename = "type")]
    pub kind: RequirementKind,

    /// UCORE category tag for UCORE requirements
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub category: Option<String>,

    /// Courses named by the text, if any
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub allowed_courses: Vec<AllowedCourse>,

    /// Human-readable summary
    pub description: String,

    /// The text this requirement was read from, kept for manual review
    #[serde(default)]
    pub source_text: String,
}

impl Requirement {
    /// Create a requirement without a category or course list
    #[must_use]
    pub fn new(kind: RequirementKind, description: impl Into<String>, source_text: &str) -> Self {
        Self {
            kind,
            category: None,
            allowed_courses: Vec::new(),
            description: description.into(),
            source_text: source_text.to_string(),
        }
    }
}
