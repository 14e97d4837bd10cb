//! Grading category and gradebook models

use serde::{Deserialize, Serialize};

/// A weighted grading category within one class (homework, exams, ...)
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct GradeCategory {
    /// Display label
    pub name: String,

    /// Share of the final grade in percentage points
    pub weight: f64,

    /// Raw points earned so far
    #[serde(default)]
    pub earned_points: f64,

    /// Raw points possible so far; zero means the category is not graded yet
    #[serde(default)]
    pub total_points: f64,
}

impl GradeCategory {
    /// Create an ungraded category
    #[must_use]
    pub fn new(name: impl Into<String>, weight: f64) -> Self {
        Self {
            name: name.into(),
            weight,
            earned_points: 0.0,
            total_points: 0.0,
        }
    }

    /// Builder: record earned and possible points
    #[must_use]
    pub const fn graded(mut self, earned_points: f64, total_points: f64) -> Self {
        self.earned_points = earned_points;
        self.total_points = total_points;
        self
    }

    /// True once any points have been recorded as possible
    #[must_use]
    pub fn is_graded(&self) -> bool {
        self.total_points > 0.0
    }

    /// Score in percent, `None` while ungraded
    #[must_use]
    pub fn percentage(&self) -> Option<f64> {
        self.is_graded()
            .then(|| self.earned_points / self.total_points * 100.0)
    }

    /// Percentage points this category adds to the final grade, `None` while ungraded
    #[must_use]
    pub fn contribution(&self) -> Option<f64> {
        self.percentage().map(|pct| pct * self.weight / 100.0)
    }
}

/// The categories of one class plus the student's chosen target letter
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Gradebook {
    /// Class the gradebook belongs to (e.g. "CPTS 121")
    #[serde(default)]
    pub course_name: String,

    /// Weighted categories in display order
    #[serde(default = "default_categories")]
    pub categories: Vec<GradeCategory>,

    /// Target letter for the needed-score projection
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub target_grade: Option<String>,
}

fn default_categories() -> Vec<GradeCategory> {
    vec![
        GradeCategory::new("Homework", 20.0),
        GradeCategory::new("Midterm", 30.0),
        GradeCategory::new("Final", 40.0),
        GradeCategory::new("Participation", 10.0),
    ]
}

impl Default for Gradebook {
    fn default() -> Self {
        Self {
            course_name: String::new(),
            categories: default_categories(),
            target_grade: None,
        }
    }
}

impl Gradebook {
    /// Create a gradebook with the standard four-category layout
    #[must_use]
    pub fn new(course_name: impl Into<String>) -> Self {
        Self {
            course_name: course_name.into(),
            ..Self::default()
        }
    }

    /// Sum of declared weights across all categories
    #[must_use]
    pub fn total_weight(&self) -> f64 {
        self.categories.iter().map(|c| c.weight).sum()
    }

    /// Index of the first category whose name matches (case-insensitive)
    #[must_use]
    pub fn position(&self, name: &str) -> Option<usize> {
        self.categories
            .iter()
            .position(|c| c.name.trim().eq_ignore_ascii_case(name.trim()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_ungraded_category_has_no_percentage() {
        let cat = GradeCategory::new("Final", 40.0);
        assert!(!cat.is_graded());
        assert!(cat.percentage().is_none());
        assert!(cat.contribution().is_none());
    }

    #[test]
    fn test_contribution_scales_by_weight() {
        let cat = GradeCategory::new("Homework", 20.0).graded(18.0, 20.0);
        assert!((cat.percentage().unwrap() - 90.0).abs() < 1e-9);
        assert!((cat.contribution().unwrap() - 18.0).abs() < 1e-9);
    }

    #[test]
    fn test_default_gradebook_sums_to_100() {
        let book = Gradebook::new("CPTS 121");
        assert_eq!(book.categories.len(), 4);
        assert!((book.total_weight() - 100.0).abs() < 1e-9);
        assert_eq!(book.position("final"), Some(2));
        assert_eq!(book.position("Quizzes"), None);
    }

    #[test]
    fn test_gradebook_toml_without_categories_uses_defaults() {
        let book: Gradebook = toml::from_str("courseName = \"MATH 171\"").unwrap();
        assert_eq!(book.course_name, "MATH 171");
        assert_eq!(book.categories.len(), 4);
    }
}
