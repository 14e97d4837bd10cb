//! Credit-weighted GPA and credit accounting
//!
//! Every function here is a single pass over borrowed course records.
//! A course contributes grade points only when it is completed, carries
//! positive credit and has a GPA-bearing grade on the chosen scale.

use super::grading::GradeScale;
use super::models::{Course, DegreePlan};
use serde::{Deserialize, Serialize};

/// Grade points for a course if it takes part in GPA math
fn gpa_points(course: &Course, scale: GradeScale) -> Option<f64> {
    if !course.is_completed() || !course.has_credit() {
        return None;
    }
    course.grade().and_then(|grade| scale.lookup(grade))
}

/// Credit-weighted GPA over eligible courses.
///
/// # Arguments
/// * `courses` - Course records in any order
/// * `scale` - Grade-point scale variant
///
/// # Returns
/// `Σ(points × credits) / Σ(credits)` over eligible courses, or 0 when
/// no course is eligible.
#[must_use]
pub fn compute_gpa(courses: &[Course], scale: GradeScale) -> f64 {
    let (points, credits) = courses
        .iter()
        .filter_map(|c| gpa_points(c, scale).map(|p| (p, f64::from(c.credits))))
        .fold((0.0, 0.0), |(pts, cr), (p, c)| (p.mul_add(c, pts), cr + c));

    if credits > 0.0 {
        points / credits
    } else {
        0.0
    }
}

/// Credits of completed courses (pass/fail grades included)
#[must_use]
pub fn credits_achieved(courses: &[Course]) -> f32 {
    courses
        .iter()
        .filter(|c| c.is_completed() && c.has_credit())
        .map(|c| c.credits)
        .sum()
}

/// Credits of in-progress and planned courses
#[must_use]
pub fn credits_planned(courses: &[Course]) -> f32 {
    courses
        .iter()
        .filter(|c| c.is_pending() && c.has_credit())
        .map(|c| c.credits)
        .sum()
}

/// Credits of every course with positive credit, whatever its status
#[must_use]
pub fn total_credits(courses: &[Course]) -> f32 {
    courses
        .iter()
        .filter(|c| c.has_credit())
        .map(|c| c.credits)
        .sum()
}

/// Credits still needed to reach `required`; never negative
#[must_use]
pub fn remaining_credits(courses: &[Course], required: f32) -> f32 {
    (required - credits_achieved(courses)).max(0.0)
}

/// GPA after merging prior history with newly graded courses.
///
/// The prior GPA and credits act as one pseudo-course block. A non-positive
/// `prior_credits` means there is no prior history.
#[must_use]
pub fn cumulative_gpa(
    prior_gpa: f64,
    prior_credits: f32,
    new_courses: &[Course],
    scale: GradeScale,
) -> f64 {
    let prior_credits = f64::from(prior_credits.max(0.0));
    let (points, credits) = new_courses
        .iter()
        .filter_map(|c| gpa_points(c, scale).map(|p| (p, f64::from(c.credits))))
        .fold(
            (prior_gpa * prior_credits, prior_credits),
            |(pts, cr), (p, c)| (p.mul_add(c, pts), cr + c),
        );

    if credits > 0.0 {
        points / credits
    } else {
        0.0
    }
}

/// Credit increments used to size a degree with several declared programs
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct CreditPolicy {
    /// Credits for the primary degree
    pub base: f32,
    /// Extra credits per additional major
    pub additional_major: f32,
    /// Extra credits per minor
    pub minor: f32,
    /// Extra credits per certificate
    pub certificate: f32,
}

impl Default for CreditPolicy {
    fn default() -> Self {
        Self {
            base: 120.0,
            additional_major: 40.0,
            minor: 20.0,
            certificate: 15.0,
        }
    }
}

/// Credits required by a plan's declared programs
#[must_use]
#[allow(clippy::cast_precision_loss)]
pub fn total_required_credits(plan: &DegreePlan, policy: &CreditPolicy) -> f32 {
    policy.base
        + policy.additional_major * plan.additional_majors.len() as f32
        + policy.minor * plan.minors.len() as f32
        + policy.certificate * plan.certificates.len() as f32
}

/// Credit and GPA snapshot of a degree plan
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct CreditSummary {
    /// Credits required by the declared programs
    pub required: f32,
    /// Credits of completed courses
    pub achieved: f32,
    /// Credits in progress or planned
    pub planned: f32,
    /// Credits still missing after completed work
    pub remaining: f32,
    /// Credit-weighted GPA of completed courses
    pub gpa: f64,
}

/// Build a [`CreditSummary`] for a plan
#[must_use]
pub fn summarize(plan: &DegreePlan, policy: &CreditPolicy, scale: GradeScale) -> CreditSummary {
    let courses = plan.course_list();
    let required = total_required_credits(plan, policy);
    let summary = CreditSummary {
        required,
        achieved: credits_achieved(&courses),
        planned: credits_planned(&courses),
        remaining: remaining_credits(&courses, required),
        gpa: compute_gpa(&courses, scale),
    };
    crate::debug!(
        "Plan summary: {} courses, {:.1}/{:.1} credits, GPA {:.2}",
        courses.len(),
        summary.achieved,
        summary.required,
        summary.gpa
    );
    summary
}
