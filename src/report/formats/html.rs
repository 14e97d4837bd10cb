//! HTML report generator
//!
//! Produces one self-contained page with embedded CSS.

use super::{fill_template, format_gpa};
use crate::report::{ReportContext, ReportGenerator};
use std::error::Error;
use std::fmt::Write;
use std::fs;
use std::path::Path;

/// Embedded HTML report template
const HTML_TEMPLATE: &str = include_str!("../templates/report.html");

/// Escape text for element content and attribute values
fn escape(text: &str) -> String {
    let mut out = String::with_capacity(text.len());
    for c in text.chars() {
        match c {
            '&' => out.push_str("&amp;"),
            '<' => out.push_str("&lt;"),
            '>' => out.push_str("&gt;"),
            '"' => out.push_str("&quot;"),
            '\'' => out.push_str("&#39;"),
            _ => out.push(c),
        }
    }
    out
}

/// HTML report generator
pub struct HtmlReporter;

impl HtmlReporter {
    /// Create a new HTML reporter
    #[must_use]
    pub const fn new() -> Self {
        Self
    }

    /// Render the report using template substitution
    #[allow(clippy::unused_self)]
    fn render_template(&self, ctx: &ReportContext) -> String {
        let summary = &ctx.summary;
        let overlap = ctx
            .overlap
            .as_deref()
            .map_or_else(|| "<p>No additional major declared.</p>".to_string(), |o| {
                format!("<p>{}</p>", escape(o))
            });

        fill_template(
            HTML_TEMPLATE,
            &[
                ("major", escape(ctx.major_name())),
                ("programs", Self::generate_programs(ctx)),
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

    fn generate_programs(ctx: &ReportContext) -> String {
        let programs = ctx.other_programs();
        if programs.is_empty() {
            return String::new();
        }
        let mut html = String::from("<ul>\n");
        for program in programs {
            let _ = writeln!(html, "  <li>{}</li>", escape(&program));
        }
        html.push_str("</ul>");
        html
    }

    fn generate_term_table(ctx: &ReportContext) -> String {
        let mut html = String::from(
            "<table>\n  <tr><th>Term</th><th>Course</th><th>Credits</th><th>Status</th><th>Grade</th></tr>\n",
        );
        for (key, courses) in &ctx.plan.courses {
            for course in courses {
                let status = course.effective_status();
                let _ = writeln!(
                    html,
                    "  <tr><td>{key}</td><td>{}</td><td>{:.1}</td><td class=\"status-{status}\">{status}</td><td>{}</td></tr>",
                    escape(&course.name),
                    course.credits,
                    escape(course.grade().unwrap_or("-")),
                );
            }
        }
        html.push_str("</table>");
        html
    }

    fn generate_ucore_table(ctx: &ReportContext) -> String {
        let mut html =
            String::from("<table>\n  <tr><th>Category</th><th>Satisfied by</th></tr>\n");
        for category in &ctx.ucore.required {
            let cell = ctx
                .ucore
                .satisfied_by
                .get(category)
                .filter(|c| !c.is_empty())
                .map_or_else(
                    || "<span class=\"missing\">Missing</span>".to_string(),
                    |c| {
                        c.iter()
                            .map(|c| escape(&c.name))
                            .collect::<Vec<_>>()
                            .join(", ")
                    },
                );
            let _ = writeln!(html, "  <tr><td>{category}</td><td>{cell}</td></tr>");
        }
        html.push_str("</table>");
        html
    }

    fn generate_retakes(ctx: &ReportContext) -> String {
        let suggestions = ctx.retake_suggestions();
        if suggestions.is_empty() {
            return "<p>No failed courses awaiting a retake.</p>".to_string();
        }

        let mut html = String::from("<ul>\n");
        for s in suggestions {
            let advice = s.suggested.map_or_else(
                || "no term with room, add a year".to_string(),
                |term| format!("retake in {term}"),
            );
            let _ = writeln!(
                html,
                "  <li>{} (failed {}): {advice}</li>",
                escape(&s.course),
                s.failed_in
            );
        }
        html.push_str("</ul>");
        html
    }
}

impl Default for HtmlReporter {
    fn default() -> Self {
        Self::new()
    }
}

impl ReportGenerator for HtmlReporter {
    fn generate(&self, ctx: &ReportContext, output_path: &Path) -> Result<(), Box<dyn Error>> {
        let report_content = self.render(ctx)?;
        fs::write(output_path, report_content)?;
        Ok(())
    }

    fn render(&self, ctx: &ReportContext) -> Result<String, Box<dyn Error>> {
        Ok(self.render_template(ctx))
    }
}
