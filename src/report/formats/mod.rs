//! Report format implementations

pub mod html;
pub mod markdown;

pub use html::HtmlReporter;
pub use markdown::MarkdownReporter;

use super::ReportGenerator;
use std::fmt;
use std::str::FromStr;

/// Supported report formats
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum ReportFormat {
    /// Markdown tables
    #[default]
    Markdown,
    /// Self-contained HTML page
    Html,
}

impl ReportFormat {
    /// File extension for this format
    #[must_use]
    pub const fn extension(&self) -> &'static str {
        match self {
            Self::Markdown => "md",
            Self::Html => "html",
        }
    }

    /// Generator for this format
    #[must_use]
    pub fn generator(&self) -> Box<dyn ReportGenerator> {
        match self {
            Self::Markdown => Box::new(MarkdownReporter::new()),
            Self::Html => Box::new(HtmlReporter::new()),
        }
    }
}

impl FromStr for ReportFormat {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "md" | "markdown" => Ok(Self::Markdown),
            "html" | "htm" => Ok(Self::Html),
            _ => Err(format!("Unknown report format: {s}")),
        }
    }
}

impl fmt::Display for ReportFormat {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Markdown => write!(f, "markdown"),
            Self::Html => write!(f, "html"),
        }
    }
}

/// Fill `{{name}}` placeholders in one pass over the template.
///
/// Substituted text is never rescanned, so user data containing `{{...}}`
/// comes through verbatim. Unknown placeholders are left as written.
fn fill_template(template: &str, values: &[(&str, String)]) -> String {
    let mut out = String::with_capacity(template.len());
    let mut rest = template;
    while let Some(start) = rest.find("{{") {
        out.push_str(&rest[..start]);
        let after = &rest[start + 2..];
        let Some(end) = after.find("}}") else {
            rest = &rest[start..];
            break;
        };
        let name = &after[..end];
        match values.iter().find(|(key, _)| *key == name) {
            Some((_, value)) => out.push_str(value),
            None => out.push_str(&rest[start..start + end + 4]),
        }
        rest = &after[end + 2..];
    }
    out.push_str(rest);
    out
}

/// Two-decimal GPA, or a dash when nothing is graded yet
fn format_gpa(gpa: f64) -> String {
    if gpa > 0.0 {
        format!("{gpa:.2}")
    } else {
        "-".to_string()
    }
}
