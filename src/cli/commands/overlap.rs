//! Overlap command handler

use super::load_plan;
use std::path::Path;
use virtual_counselor::engine::matching::CaseMode;
use virtual_counselor::engine::models::Course;
use virtual_counselor::engine::overlap::{analyze_course_overlaps, overlap_summary_with, OverlapOptions};

fn print_group(title: &str, courses: &[&Course]) {
    println!("\n{title} ({})", courses.len());
    for course in courses {
        println!("  - {}", course.name);
    }
}

/// Print the double-counting partitions of a plan and the multi-major advice
pub fn run(plan_path: &Path, exact_case: bool) -> Result<(), String> {
    let plan = load_plan(plan_path)?;
    let courses = plan.course_list();
    let options = OverlapOptions {
        case: if exact_case {
            CaseMode::Exact
        } else {
            CaseMode::Insensitive
        },
    };

    let overlaps = analyze_course_overlaps(&courses, options);
    print_group("UCORE courses", &overlaps.ucore_courses);
    print_group("Elective slots", &overlaps.major_electives);
    print_group("Courses with options", &overlaps.potential_cross_listed);

    match overlap_summary_with(&plan, &courses, options) {
        Some(advice) => println!("\n{advice}"),
        None => println!("\nNo additional major declared; overlap advice applies to double majors only."),
    }
    Ok(())
}
