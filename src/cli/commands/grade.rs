//! Grade calculator command handler

use std::path::Path;
use virtual_counselor::config::Config;
use virtual_counselor::engine::grading::ThresholdPreset;
use virtual_counselor::engine::weights::{self, needed_score, project_remaining, RemainingProjection};
use virtual_counselor::planner::load_gradebook_file;
use virtual_counselor::store::{self, FileStore};

/// Print the locked-in grade of a gradebook and what the target still needs.
///
/// Without `category`, the first ungraded category with positive weight is
/// projected.
pub fn run(
    gradebook_path: &Path,
    target: Option<&str>,
    category: Option<usize>,
    preset: ThresholdPreset,
    save: bool,
    config: &Config,
) -> Result<(), String> {
    let gradebook = load_gradebook_file(gradebook_path)
        .map_err(|e| format!("Failed to load {}: {e}", gradebook_path.display()))?;
    let categories = &gradebook.categories;
    let target = target
        .or(gradebook.target_grade.as_deref())
        .unwrap_or("A");

    let summary = weights::summarize(categories);
    let title = if gradebook.course_name.is_empty() {
        "Gradebook"
    } else {
        gradebook.course_name.as_str()
    };
    println!("\n=== {title} ===");
    for (idx, cat) in categories.iter().enumerate() {
        let score = cat
            .percentage()
            .map_or_else(|| "not graded".to_string(), |p| format!("{p:.2}%"));
        println!("  [{idx}] {:<16} {:>5.1}%  {score}", cat.name, cat.weight);
    }
    if summary.weight_mismatch {
        println!("⚠️  Weights add up to {:.1}%, not 100%", summary.total_weight);
    }

    match (summary.current, summary.letter(preset)) {
        (Some(current), Some(letter)) => println!(
            "Current grade: {current:.2} of {:.1} graded ({letter})",
            summary.weight_used
        ),
        _ => println!("Current grade: nothing graded yet"),
    }

    let index = category.or_else(|| {
        categories
            .iter()
            .position(|c| !c.is_graded() && c.weight > 0.0)
    });
    if let Some(index) = index {
        let needed = needed_score(categories, target, index, preset).map_err(|e| e.to_string())?;
        let name = &categories[index].name;
        if needed.is_guaranteed() {
            println!("✓ {} is secured regardless of {name}", needed.target);
        } else if needed.is_unreachable() {
            println!(
                "✗ {} needs {:.2}% on {name}, which is not reachable",
                needed.target, needed.needed_percentage
            );
        } else {
            println!(
                "✓ {} needs {:.2}% on {name} ({:.1}% of the course still open)",
                needed.target, needed.needed_percentage, needed.remaining_weight
            );
        }
    }

    if let (Some(current), Some(threshold)) = (
        summary.current,
        target.parse().ok().and_then(|letter| preset.threshold(letter)),
    ) {
        match project_remaining(current, summary.weight_used, threshold) {
            Some(RemainingProjection::Needed { percentage, remaining }) => virtual_counselor::verbose!(
                "Average needed on the remaining {remaining:.1}%: {percentage:.2}%"
            ),
            Some(RemainingProjection::AlreadyAchieved) => {
                virtual_counselor::verbose!("Target already achieved");
            }
            Some(RemainingProjection::NotAchievable { .. }) | None => {}
        }
    }

    if save {
        let mut file_store = FileStore::new(&config.paths.data_dir);
        store::save_gradebook(&mut file_store, &gradebook).map_err(|e| e.to_string())?;
        println!("✓ Saved gradebook for '{title}'");
    }
    Ok(())
}
