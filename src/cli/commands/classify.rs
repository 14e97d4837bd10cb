//! Requirement classification command handler

use super::load_plan;
use std::path::Path;
use virtual_counselor::engine::matching::CaseMode;
use virtual_counselor::engine::requirements::{
    build_elective_filter, is_placeholder, parse_elective_requirements_with, FilterKind,
};

/// Classify requirement text and print the catalog filter for each reading
pub fn run(text: &str, plan_path: Option<&Path>, exact_case: bool) -> Result<(), String> {
    let mode = if exact_case {
        CaseMode::Exact
    } else {
        CaseMode::Insensitive
    };
    let courses = plan_path
        .map(load_plan)
        .transpose()?
        .map(|plan| plan.course_list())
        .unwrap_or_default();

    let requirements = parse_elective_requirements_with(text, mode);
    println!(
        "{} requirement(s) in \"{text}\"{}",
        requirements.len(),
        if is_placeholder(text) { " (placeholder slot)" } else { "" }
    );

    for req in &requirements {
        println!("\n[{}] {}", req.kind, req.description);
        if let Some(category) = &req.category {
            println!("  UCORE category: {category}");
        }
        for allowed in &req.allowed_courses {
            println!("  - {}", allowed.code());
        }

        let filter = build_elective_filter(req, &courses);
        let scope = match &filter.kind {
            FilterKind::CourseList { allowed_courses } => {
                format!("{} listed course(s)", allowed_courses.len())
            }
            FilterKind::Ucore { ucore_category } => format!(
                "UCORE {}",
                ucore_category.as_deref().unwrap_or("(any category)")
            ),
            FilterKind::Prefix { prefixes } => format!("prefixes {}", prefixes.join(", ")),
            FilterKind::Technical => "approved technical electives".to_string(),
            FilterKind::General => "any course".to_string(),
        };
        println!("  Search: {scope}");
        if !filter.exclude_codes.is_empty() {
            println!(
                "  Excluding: {}",
                filter.exclude_codes.iter().cloned().collect::<Vec<_>>().join(", ")
            );
        }
        virtual_counselor::verbose!(
            "  Filter JSON: {}",
            serde_json::to_string(&filter).unwrap_or_default()
        );
    }
    Ok(())
}
