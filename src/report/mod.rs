//! Plan summary reports
//!
//! Renders a degree plan with its credit totals, UCORE coverage, retake
//! placement and multi-major advice as Markdown or HTML.

pub mod formats;

use crate::engine::gpa::{self, CreditPolicy, CreditSummary};
use crate::engine::grading::GradeScale;
use crate::engine::models::{Course, CourseStatus, DegreePlan, TermKey, MAX_TERM_CREDITS};
use crate::engine::overlap::overlap_summary;
use crate::engine::requirements::{ucore_satisfaction, UcoreCategory, UcoreSatisfaction};
use std::error::Error;
use std::path::Path;

pub use formats::{HtmlReporter, MarkdownReporter, ReportFormat};

/// A failed course and where its retake could go
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RetakeSuggestion {
    /// Course name as planned
    pub course: String,
    /// Term the failed attempt sits in
    pub failed_in: TermKey,
    /// First later term with room, `None` if the plan is full
    pub suggested: Option<TermKey>,
}

/// Everything a report renders, computed once
#[derive(Debug, Clone)]
pub struct ReportContext<'a> {
    /// Plan being reported
    pub plan: &'a DegreePlan,
    /// Credit totals and GPA
    pub summary: CreditSummary,
    /// Coverage of every UCORE category
    pub ucore: UcoreSatisfaction<'a>,
    /// Multi-major advice, present only with an additional major
    pub overlap: Option<String>,
    /// Grade scale the GPA was computed on
    pub scale: GradeScale,
}

impl<'a> ReportContext<'a> {
    /// Build the context for a plan; `courses` must be the plan's flattened course list
    #[must_use]
    pub fn new(
        plan: &'a DegreePlan,
        courses: &'a [Course],
        policy: &CreditPolicy,
        scale: GradeScale,
    ) -> Self {
        Self {
            plan,
            summary: gpa::summarize(plan, policy, scale),
            ucore: ucore_satisfaction(&UcoreCategory::ALL, courses),
            overlap: overlap_summary(plan, courses),
            scale,
        }
    }

    /// Primary major or a placeholder
    #[must_use]
    pub fn major_name(&self) -> &str {
        self.plan.primary_major.as_deref().unwrap_or("Undeclared")
    }

    /// Declared programs beyond the primary major, one per line item
    #[must_use]
    pub fn other_programs(&self) -> Vec<String> {
        let plan = self.plan;
        plan.additional_majors
            .iter()
            .map(|m| format!("Major: {m}"))
            .chain(plan.minors.iter().map(|m| format!("Minor: {m}")))
            .chain(plan.certificates.iter().map(|c| format!("Certificate: {c}")))
            .collect()
    }

    /// Total number of course entries
    #[must_use]
    pub fn course_count(&self) -> usize {
        self.plan.course_count()
    }

    /// Failed courses without a scheduled retake, with a suggested term
    #[must_use]
    pub fn retake_suggestions(&self) -> Vec<RetakeSuggestion> {
        let retaken: Vec<&str> = self
            .plan
            .all_courses()
            .filter(|c| c.is_retake)
            .map(|c| c.name.as_str())
            .collect();

        self.plan
            .courses
            .iter()
            .flat_map(|(key, courses)| courses.iter().map(move |c| (*key, c)))
            .filter(|(_, c)| c.effective_status() == CourseStatus::Failed)
            .filter(|(_, c)| !retaken.contains(&c.name.as_str()))
            .map(|(key, c)| RetakeSuggestion {
                course: c.name.clone(),
                failed_in: key,
                suggested: self.plan.next_open_term(key, MAX_TERM_CREDITS),
            })
            .collect()
    }
}

/// Trait for report generators
pub trait ReportGenerator {
    /// Write a report to a file
    ///
    /// # Errors
    /// Returns an error if rendering or writing fails
    fn generate(&self, ctx: &ReportContext, output_path: &Path) -> Result<(), Box<dyn Error>>;

    /// Render a report to a string
    ///
    /// # Errors
    /// Returns an error if rendering fails
    fn render(&self, ctx: &ReportContext) -> Result<String, Box<dyn Error>>;
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::engine::models::Term;

    fn plan() -> DegreePlan {
        let mut plan = DegreePlan::new("Computer Science");
        plan.minors.push("Mathematics".to_string());
        plan.add_course(
            TermKey::new(1, Term::Fall),
            Course::new("ENGLISH 101 [WRTG]", 3.0).completed("B"),
        );
        plan.add_course(
            TermKey::new(1, Term::Fall),
            Course::new("CPTS 121", 4.0).with_status(CourseStatus::Failed),
        );
        plan.add_course(
            TermKey::new(1, Term::Spring),
            Course::new("MATH 171", 4.0).completed("F").with_status(CourseStatus::Failed),
        );
        let mut retake = Course::new("MATH 171", 4.0);
        retake.is_retake = true;
        plan.add_course(TermKey::new(2, Term::Fall), retake);
        plan
    }

    #[test]
    fn test_context_totals() {
        let plan = plan();
        let courses = plan.course_list();
        let ctx = ReportContext::new(&plan, &courses, &CreditPolicy::default(), GradeScale::Standard);

        assert!((ctx.summary.required - 140.0).abs() < f32::EPSILON);
        assert!((ctx.summary.achieved - 3.0).abs() < f32::EPSILON);
        assert_eq!(ctx.ucore.satisfied, vec![UcoreCategory::Wrtg]);
        assert_eq!(ctx.overlap, None);
        assert_eq!(ctx.other_programs(), vec!["Minor: Mathematics"]);
    }

    #[test]
    fn test_retake_suggestions_skip_scheduled_retakes() {
        let plan = plan();
        let courses = plan.course_list();
        let ctx = ReportContext::new(&plan, &courses, &CreditPolicy::default(), GradeScale::Standard);

        let suggestions = ctx.retake_suggestions();
        assert_eq!(suggestions.len(), 1);
        assert_eq!(suggestions[0].course, "CPTS 121");
        assert_eq!(suggestions[0].suggested, Some(TermKey::new(1, Term::Spring)));
    }
}
