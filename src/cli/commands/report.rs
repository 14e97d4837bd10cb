//! Report command handler

use super::load_plan;
use std::fs;
use std::path::{Path, PathBuf};
use virtual_counselor::config::Config;
use virtual_counselor::engine::grading::GradeScale;
use virtual_counselor::report::{ReportContext, ReportFormat};

/// Default output path: `reports_dir/<plan file stem>.<ext>`
fn default_output(plan_path: &Path, format: ReportFormat, config: &Config) -> PathBuf {
    let stem = plan_path
        .file_stem()
        .map_or_else(|| "plan".into(), |s| s.to_string_lossy());
    PathBuf::from(&config.paths.reports_dir).join(format!("{stem}.{}", format.extension()))
}

/// Render a plan report to a file
pub fn run(
    plan_path: &Path,
    output: Option<&Path>,
    format: ReportFormat,
    scale: GradeScale,
    config: &Config,
) -> Result<(), String> {
    let plan = load_plan(plan_path)?;
    let courses = plan.course_list();
    let ctx = ReportContext::new(&plan, &courses, &config.credit_policy(), scale);

    let output_path = output.map_or_else(|| default_output(plan_path, format, config), Path::to_path_buf);
    if let Some(parent) = output_path.parent().filter(|p| !p.as_os_str().is_empty()) {
        fs::create_dir_all(parent)
            .map_err(|e| format!("Failed to create {}: {e}", parent.display()))?;
    }

    format
        .generator()
        .generate(&ctx, &output_path)
        .map_err(|e| format!("Failed to generate {format} report: {e}"))?;

    virtual_counselor::info!("Report written to {}", output_path.display());
    println!("✓ Report generated: {}", output_path.display());
    println!(
        "  {:.1}/{:.1} credits, GPA {:.2}, {} UCORE categories open",
        ctx.summary.achieved,
        ctx.summary.required,
        ctx.summary.gpa,
        ctx.ucore.remaining.len()
    );
    Ok(())
}
