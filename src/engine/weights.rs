//! Weighted-category grade engine
//!
//! Categories are never renormalized: an ungraded category simply adds
//! nothing to the current grade, and the weight actually used is reported
//! separately so callers can show "27 of 30 points so far".

use super::grading::{LetterGrade, ThresholdPreset};
use super::models::GradeCategory;
use serde::Serialize;
use thiserror::Error;

/// Precondition failures of [`needed_score`]
#[derive(Debug, Clone, PartialEq, Error)]
pub enum ProjectionError {
    /// The selected category already has recorded points
    #[error("Selected category already has grades entered")]
    AlreadyGraded,

    /// The selected index does not name a category
    #[error("No grading category at index {0}")]
    NoSuchCategory(usize),

    /// The selected category carries no weight, so no score can move the grade
    #[error("Category '{0}' has zero weight")]
    ZeroWeight(String),
}

fn round2(value: f64) -> f64 {
    (value * 100.0).round() / 100.0
}

/// Current weighted grade in percentage points.
///
/// Sum over graded categories of `earned / total × 100 × weight / 100`.
/// Returns `None` when no category has been graded.
#[must_use]
pub fn current_grade(categories: &[GradeCategory]) -> Option<f64> {
    categories
        .iter()
        .filter_map(GradeCategory::contribution)
        .fold(None, |acc, c| Some(acc.unwrap_or(0.0) + c))
}

/// Weight of graded categories, in percentage points
#[must_use]
pub fn weight_used(categories: &[GradeCategory]) -> f64 {
    categories
        .iter()
        .filter(|c| c.is_graded())
        .map(|c| c.weight)
        .sum()
}

/// Snapshot of a gradebook's progress
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct GradebookSummary {
    /// Locked-in weighted grade, `None` before anything is graded
    pub current: Option<f64>,
    /// Weight of the graded categories
    pub weight_used: f64,
    /// Sum of all declared weights
    pub total_weight: f64,
    /// Declared weights do not add up to 100
    pub weight_mismatch: bool,
}

impl GradebookSummary {
    /// Letter for the locked-in grade under `preset`
    #[must_use]
    pub fn letter(&self, preset: ThresholdPreset) -> Option<LetterGrade> {
        self.current.map(|pct| preset.letter_for(pct))
    }
}

/// Summarize a set of categories
#[must_use]
pub fn summarize(categories: &[GradeCategory]) -> GradebookSummary {
    let total_weight: f64 = categories.iter().map(|c| c.weight).sum();
    GradebookSummary {
        current: current_grade(categories),
        weight_used: weight_used(categories),
        total_weight,
        weight_mismatch: (total_weight - 100.0).abs() > 1e-6,
    }
}

/// Score needed on one ungraded category to reach a target letter
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct NeededScore {
    /// Target letter as resolved by the threshold preset
    pub target: String,
    /// Minimum final percentage for the target
    pub threshold: f64,
    /// Percent needed on the selected category, two decimals
    pub needed_percentage: f64,
    /// Locked-in weighted grade, two decimals
    pub current_grade: f64,
    /// Selected weight plus the weight of every other ungraded category
    pub remaining_weight: f64,
}

impl NeededScore {
    /// More than a perfect score would be needed
    #[must_use]
    pub fn is_unreachable(&self) -> bool {
        self.needed_percentage > 100.0
    }

    /// The target is met even with a zero on the selected category
    #[must_use]
    pub fn is_guaranteed(&self) -> bool {
        self.needed_percentage <= 0.0
    }
}

/// Percent needed on `categories[target_index]` to finish at `target`.
///
/// A target the preset does not list falls back to the A cutoff. The
/// result may exceed 100 (see [`NeededScore::is_unreachable`]) or be
/// non-positive (see [`NeededScore::is_guaranteed`]); both are data.
///
/// # Errors
/// * [`ProjectionError::NoSuchCategory`] if the index is out of range
/// * [`ProjectionError::AlreadyGraded`] if the category already has points
/// * [`ProjectionError::ZeroWeight`] if the category weight is not positive
pub fn needed_score(
    categories: &[GradeCategory],
    target: &str,
    target_index: usize,
    preset: ThresholdPreset,
) -> Result<NeededScore, ProjectionError> {
    let selected = categories
        .get(target_index)
        .ok_or(ProjectionError::NoSuchCategory(target_index))?;
    if selected.is_graded() {
        return Err(ProjectionError::AlreadyGraded);
    }
    if selected.weight <= 0.0 {
        return Err(ProjectionError::ZeroWeight(selected.name.clone()));
    }

    let (letter, threshold) = target
        .parse::<LetterGrade>()
        .ok()
        .and_then(|letter| preset.threshold(letter).map(|t| (letter, t)))
        .unwrap_or_else(|| {
            let a = preset.threshold(LetterGrade::A).unwrap_or(93.0);
            (LetterGrade::A, a)
        });

    let locked_in = current_grade(categories).unwrap_or(0.0);
    let other_ungraded: f64 = categories
        .iter()
        .enumerate()
        .filter(|(i, c)| *i != target_index && !c.is_graded())
        .map(|(_, c)| c.weight)
        .sum();

    let needed = NeededScore {
        target: letter.to_string(),
        threshold,
        needed_percentage: round2((threshold - locked_in) / selected.weight * 100.0),
        current_grade: round2(locked_in),
        remaining_weight: selected.weight + other_ungraded,
    };
    crate::debug!(
        "Needed {}% on '{}' for {} (locked in {})",
        needed.needed_percentage,
        selected.name,
        needed.target,
        needed.current_grade
    );
    Ok(needed)
}

/// Outcome of the single-bucket projection used by the per-course calculator
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
#[serde(rename_all = "camelCase", tag = "outcome")]
pub enum RemainingProjection {
    /// The target is secured regardless of the remaining work
    AlreadyAchieved,
    /// Even a perfect score on the remaining work misses the target.
    /// `needed` is absent once nothing remains to be graded.
    NotAchievable {
        /// Percent that would be needed on the remaining work
        needed: Option<f64>,
    },
    /// The target is reachable with `percentage` on the remaining share
    Needed {
        /// Percent needed on the remaining work
        percentage: f64,
        /// Share of the course still ungraded, in percent
        remaining: f64,
    },
}

/// Project what is needed on the rest of a course.
///
/// `earned` is the points earned so far and `completed` the share of the
/// course graded so far (both in percentage points of the whole course).
/// Returns `None` until something has been graded.
#[must_use]
pub fn project_remaining(earned: f64, completed: f64, threshold: f64) -> Option<RemainingProjection> {
    if completed.is_nan() || earned.is_nan() || completed <= 0.0 {
        return None;
    }
    let current = earned / completed * 100.0;
    let remaining = 100.0 - completed;

    if remaining <= 0.0 {
        return Some(if current >= threshold {
            RemainingProjection::AlreadyAchieved
        } else {
            RemainingProjection::NotAchievable { needed: None }
        });
    }

    let needed = threshold.mul_add(completed + remaining, -(earned * 100.0)) / remaining;
    Some(if needed > 100.0 {
        RemainingProjection::NotAchievable {
            needed: Some(needed),
        }
    } else if needed < 0.0 {
        RemainingProjection::AlreadyAchieved
    } else {
        RemainingProjection::Needed {
            percentage: needed,
            remaining,
        }
    })
}
