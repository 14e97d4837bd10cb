//! Markdown report generator
//!
//! Plain pipe tables; renders in GitHub, GitLab and most editors.

use super::{fill_template, format_gpa};
use crate::report::{ReportContext, ReportGenerator};
use std::error::Error;
use std::fmt::Write;
use std::fs;
use std::path::Path;

/// Embedded Markdown report template
const MARKDOWN_TEMPLATE: &str = include_str!("../templates/report.md");

/// Markdown report generator
pub struct MarkdownReporter;

impl MarkdownReporter {
    /// Create a new Markdown reporter
    #[must_use]
    pub const fn new() -> Self {
        Self
    }

    /// Render the report using template substitution
    #[allow(clippy::unused_self)]
    fn render_template(&self, ctx: &ReportContext) -> String {
        let summary = &ctx.summary;
        let programs = ctx
            .other_programs()
            .iter()
            .map(|p| format!("- {p}"))
            .collect::<Vec<_>>()
            .join("\n");

        let overlap = ctx
            .overlap
            .as_deref()
            .unwrap_or("No additional major declared.")
            .to_string();

        fill_template(
            MARKDOWN_TEMPLATE,
            &[
                ("major", ctx.major_name().to_string()),
                ("programs", programs),
                ("required", format!("{:.1}", summary.required)),
                ("achieved", format!("{:.1}", summary.achieved)),
                ("planned", format!("{:.1}", summary.planned)),
                ("remaining", format!("{:.1}", summary.remaining)),
                ("scale", ctx.scale.as_str().to_string()),
                ("gpa", format_gpa(summary.gpa)),
                ("course_count", ctx.course_count().to_string()),
                ("term_table", Self::generate_term_table(ctx)),
                ("ucore_table", Self::generate_ucore_table(ctx)),
                ("retakes", Self::generate_retakes(ctx)),
                ("overlap", overlap),
            ],
        )
    }

    fn generate_term_table(ctx: &ReportContext) -> String {
        let mut table = String::new();
        table.push_str("| Term | Course | Credits | Status | Grade |\n");
        table.push_str("|---|---|---|---|---|\n");

        for (key, courses) in &ctx.plan.courses {
            for course in courses {
                let _ = writeln!(
                    table,
                    "| {key} | {} | {:.1} | {} | {} |",
                    course.name.replace('|', "\\|"),
                    course.credits,
                    course.effective_status(),
                    course.grade().unwrap_or("-"),
                );
            }
        }
        table
    }

    fn generate_ucore_table(ctx: &ReportContext) -> String {
        let mut table = String::new();
        table.push_str("| Category | Satisfied by |\n");
        table.push_str("|---|---|\n");

        for category in &ctx.ucore.required {
            let courses = ctx
                .ucore
                .satisfied_by
                .get(category)
                .filter(|c| !c.is_empty())
                .map_or_else(
                    || "⚠️ Missing".to_string(),
                    |c| c.iter().map(|c| c.name.as_str()).collect::<Vec<_>>().join(", "),
                );
            let _ = writeln!(table, "| {category} | {courses} |");
        }
        table
    }

    fn generate_retakes(ctx: &ReportContext) -> String {
        let suggestions = ctx.retake_suggestions();
        if suggestions.is_empty() {
            return "No failed courses awaiting a retake.".to_string();
        }

        let mut out = String::new();
        for s in suggestions {
            let _ = match s.suggested {
                Some(term) => writeln!(
                    out,
                    "- {} (failed {}): retake in {term}",
                    s.course, s.failed_in
                ),
                None => writeln!(
                    out,
                    "- {} (failed {}): no term with room, add a year",
                    s.course, s.failed_in
                ),
            };
        }
        out
    }
}

impl Default for MarkdownReporter {
    fn default() -> Self {
        Self::new()
    }
}

impl ReportGenerator for MarkdownReporter {
    fn generate(&self, ctx: &ReportContext, output_path: &Path) -> Result<(), Box<dyn Error>> {
        let report_content = self.render(ctx)?;
        fs::write(output_path, report_content)?;
        Ok(())
    }

    fn render(&self, ctx: &ReportContext) -> Result<String, Box<dyn Error>> {
        Ok(self.render_template(ctx))
    }
}
