//! Cross-counting analysis for students with more than one major

use super::matching::CaseMode;
use super::models::{Course, DegreePlan};
use super::requirements::extract_ucore_categories;

const UCORE_ADVICE: &str =
    "UCORE courses that can count toward both general education and major requirements.";
const ELECTIVE_ADVICE: &str = "Consider using electives to double-count for multiple majors.";
const CHOICE_ADVICE: &str =
    "Review courses with multiple options to ensure they satisfy requirements for all your programs.";
const FALLBACK_ADVICE: &str =
    "Plan strategically to maximize course overlaps between your programs.";

/// Matching options for the overlap partitions
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct OverlapOptions {
    /// Case handling for the "elective" and " or " name checks
    pub case: CaseMode,
}

/// Courses that may count toward more than one program.
///
/// The partitions are independent; one course can sit in several.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct CourseOverlaps<'a> {
    /// Courses with any UCORE designation
    pub ucore_courses: Vec<&'a Course>,
    /// Elective slots
    pub major_electives: Vec<&'a Course>,
    /// Entries offering a choice ("MATH 315 or STAT 360")
    pub potential_cross_listed: Vec<&'a Course>,
}

impl CourseOverlaps<'_> {
    /// True when every partition is empty
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.ucore_courses.is_empty()
            && self.major_electives.is_empty()
            && self.potential_cross_listed.is_empty()
    }
}

/// Partition courses by how they could be double-counted
#[must_use]
pub fn analyze_course_overlaps(courses: &[Course], options: OverlapOptions) -> CourseOverlaps<'_> {
    let mut overlaps = CourseOverlaps::default();
    for course in courses {
        if !course.ucore.is_empty() || !extract_ucore_categories(course).is_empty() {
            overlaps.ucore_courses.push(course);
        }
        if options.case.contains(&course.name, "elective") {
            overlaps.major_electives.push(course);
        }
        if options.case.contains(&course.name, " or ") {
            overlaps.potential_cross_listed.push(course);
        }
    }
    overlaps
}

/// Advice for students with additional majors, case-insensitive matching
#[must_use]
pub fn overlap_summary(plan: &DegreePlan, courses: &[Course]) -> Option<String> {
    overlap_summary_with(plan, courses, OverlapOptions::default())
}

/// Advice for students with additional majors.
///
/// `None` when the plan declares no additional major; minors and
/// certificates alone never trigger it.
#[must_use]
pub fn overlap_summary_with(
    plan: &DegreePlan,
    courses: &[Course],
    options: OverlapOptions,
) -> Option<String> {
    if plan.additional_majors.is_empty() {
        return None;
    }

    let overlaps = analyze_course_overlaps(courses, options);
    let mut sentences = Vec::new();
    if !overlaps.ucore_courses.is_empty() {
        sentences.push(format!(
            "You have {} {UCORE_ADVICE}",
            overlaps.ucore_courses.len()
        ));
    }
    if !overlaps.major_electives.is_empty() {
        sentences.push(ELECTIVE_ADVICE.to_string());
    }
    if !overlaps.potential_cross_listed.is_empty() {
        sentences.push(CHOICE_ADVICE.to_string());
    }

    if sentences.is_empty() {
        Some(FALLBACK_ADVICE.to_string())
    } else {
        Some(sentences.join(" "))
    }
}
