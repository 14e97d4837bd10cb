//! Catalog search filters derived from requirement descriptors

use super::course_codes::{parse_course_code, CourseCode};
use crate::engine::models::{AllowedCourse, Course, Requirement, RequirementKind};
use serde::Serialize;
use std::collections::BTreeSet;

/// Prefixes searched for a computer science elective
pub const CS_PREFIXES: [&str; 2] = ["CPT S", "CPTS"];

/// Scope of a catalog query
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "kind")]
pub enum FilterKind {
    /// Only the listed courses
    #[serde(rename = "COURSELIST", rename_all = "camelCase")]
    CourseList {
        /// Courses (or level bands) to offer
        allowed_courses: Vec<AllowedCourse>,
    },
    /// Courses carrying a UCORE designation
    #[serde(rename = "UCORE", rename_all = "camelCase")]
    Ucore {
        /// Designation to search for, any UCORE course when absent
        ucore_category: Option<String>,
    },
    /// Courses under one of the given prefixes
    #[serde(rename = "PREFIX")]
    Prefix {
        /// Accepted prefixes
        prefixes: Vec<String>,
    },
    /// Approved technical electives; the catalog side decides the prefixes
    #[serde(rename = "TECHNICAL")]
    Technical,
    /// Any course
    #[serde(rename = "GENERAL")]
    General,
}

/// Query handed to the catalog search for filling an elective slot
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ElectiveFilter {
    /// What the search is scoped to
    #[serde(flatten)]
    pub kind: FilterKind,
    /// Codes already in the plan, prefix spaces squeezed ("CPTS 321")
    pub exclude_codes: BTreeSet<String>,
}

impl ElectiveFilter {
    /// Whether a catalog course passes the filter.
    ///
    /// UCORE and technical scoping depend on catalog attributes that are not
    /// part of a course code, so those kinds only apply the exclusion set.
    #[must_use]
    pub fn admits(&self, code: &CourseCode) -> bool {
        if self.is_excluded(code) {
            return false;
        }
        match &self.kind {
            FilterKind::CourseList { allowed_courses } => allowed_courses
                .iter()
                .any(|entry| entry.matches(&code.prefix, &code.number)),
            FilterKind::Prefix { prefixes } => {
                let compact = code.compact_prefix();
                prefixes
                    .iter()
                    .any(|p| p.split_whitespace().collect::<String>() == compact)
            }
            FilterKind::Ucore { .. } | FilterKind::Technical | FilterKind::General => true,
        }
    }

    fn is_excluded(&self, code: &CourseCode) -> bool {
        self.exclude_codes.contains(&exclusion_key(code))
    }
}

fn exclusion_key(code: &CourseCode) -> String {
    format!("{} {}", code.compact_prefix(), code.number)
}

/// Normalized codes of every real course in the plan
///
/// Split and joined prefixes collapse to one entry: "CPT S 321" and
/// "CPTS 321" both become "CPTS 321".
#[must_use]
pub fn exclusion_codes(plan_courses: &[Course]) -> BTreeSet<String> {
    plan_courses
        .iter()
        .filter_map(|c| parse_course_code(&c.name))
        .map(|code| exclusion_key(&code))
        .collect()
}

/// Derive a catalog filter for one requirement.
///
/// An explicit course list always wins, whatever the requirement kind.
/// Courses already in the plan are always excluded.
#[must_use]
pub fn build_elective_filter(requirement: &Requirement, plan_courses: &[Course]) -> ElectiveFilter {
    let kind = if requirement.allowed_courses.is_empty() {
        match requirement.kind {
            RequirementKind::Ucore => FilterKind::Ucore {
                ucore_category: requirement.category.clone(),
            },
            RequirementKind::Cs => FilterKind::Prefix {
                prefixes: CS_PREFIXES.iter().map(ToString::to_string).collect(),
            },
            RequirementKind::Technical => FilterKind::Technical,
            RequirementKind::CourseList => FilterKind::CourseList {
                allowed_courses: Vec::new(),
            },
            RequirementKind::General => FilterKind::General,
        }
    } else {
        FilterKind::CourseList {
            allowed_courses: requirement.allowed_courses.clone(),
        }
    };

    ElectiveFilter {
        kind,
        exclude_codes: exclusion_codes(plan_courses),
    }
}
