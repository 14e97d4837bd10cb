//! GPA command handler

use super::load_plan;
use std::path::Path;
use virtual_counselor::config::Config;
use virtual_counselor::engine::gpa::{self, cumulative_gpa};
use virtual_counselor::engine::grading::GradeScale;

/// Print credit totals and GPA for a plan file.
///
/// `prior` is the transcript GPA and the credits behind it, merged into a
/// cumulative GPA when present.
pub fn run(
    plan_path: &Path,
    scale: GradeScale,
    prior: Option<(f64, f32)>,
    json: bool,
    config: &Config,
) -> Result<(), String> {
    let plan = load_plan(plan_path)?;
    let courses = plan.course_list();
    let summary = gpa::summarize(&plan, &config.credit_policy(), scale);
    let cumulative = prior.map(|(prior_gpa, prior_credits)| {
        cumulative_gpa(prior_gpa, prior_credits, &courses, scale)
    });

    if json {
        let mut value = serde_json::to_value(summary).map_err(|e| e.to_string())?;
        if let (Some(cumulative), Some(obj)) = (cumulative, value.as_object_mut()) {
            obj.insert("cumulativeGpa".to_string(), cumulative.into());
        }
        let text = serde_json::to_string_pretty(&value).map_err(|e| e.to_string())?;
        println!("{text}");
        return Ok(());
    }

    println!("\n=== {} ===", plan.primary_major.as_deref().unwrap_or("Degree Plan"));
    println!("Scale:             {scale}");
    println!("Courses:           {}", courses.len());
    println!("Credits required:  {:.1}", summary.required);
    println!("Credits achieved:  {:.1}", summary.achieved);
    println!("Credits planned:   {:.1}", summary.planned);
    println!("Credits remaining: {:.1}", summary.remaining);
    println!("GPA:               {:.2}", summary.gpa);
    if let Some(cumulative) = cumulative {
        println!("Cumulative GPA:    {cumulative:.2}");
    }
    virtual_counselor::verbose!("Total scheduled credits: {:.1}", gpa::total_credits(&courses));
    Ok(())
}
