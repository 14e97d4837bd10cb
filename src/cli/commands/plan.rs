//! Plan store command handler
//!
//! Keeps the degree plan in the file-backed store under `paths.data_dir`.

use crate::args::PlanSubcommand;
use std::path::Path;
use virtual_counselor::config::Config;
use virtual_counselor::engine::models::DegreePlan;
use virtual_counselor::planner::{load_plan_file, save_plan_file};
use virtual_counselor::store::{self, FileStore};

/// Dispatch plan subcommands
pub fn run(subcommand: PlanSubcommand, config: &Config) -> Result<(), String> {
    let mut file_store = FileStore::new(&config.paths.data_dir);
    virtual_counselor::debug!("Plan store at {}", file_store.root().display());

    match subcommand {
        PlanSubcommand::Import { file } => import(&mut file_store, &file),
        PlanSubcommand::Show { json } => show(&file_store, json),
        PlanSubcommand::Export { file } => {
            let plan = stored_plan(&file_store)?;
            save_plan_file(&plan, &file).map_err(|e| e.to_string())?;
            println!("✓ Exported {} courses to {}", plan.course_count(), file.display());
            Ok(())
        }
        PlanSubcommand::Reset => {
            let mut plan = stored_plan(&file_store)?;
            plan.reset();
            store::save_plan(&mut file_store, &plan).map_err(|e| e.to_string())?;
            println!("✓ Plan reset ({} years kept)", plan.years);
            Ok(())
        }
        PlanSubcommand::Clear => {
            store::clear_all(&mut file_store).map_err(|e| e.to_string())?;
            println!("✓ Cleared all stored data in {}", file_store.root().display());
            Ok(())
        }
    }
}

fn stored_plan(file_store: &FileStore) -> Result<DegreePlan, String> {
    store::load_plan(file_store)
        .map_err(|e| e.to_string())?
        .ok_or_else(|| "No plan stored yet; run `vcounsel plan import <FILE>` first".to_string())
}

fn import(file_store: &mut FileStore, file: &Path) -> Result<(), String> {
    let plan = load_plan_file(file).map_err(|e| format!("Failed to load {}: {e}", file.display()))?;
    store::save_plan(file_store, &plan).map_err(|e| e.to_string())?;
    store::save_user_courses(file_store, &plan.course_list()).map_err(|e| e.to_string())?;
    virtual_counselor::info!("Imported plan from {}", file.display());
    println!("✓ Imported {} courses from {}", plan.course_count(), file.display());
    Ok(())
}

fn show(file_store: &FileStore, json: bool) -> Result<(), String> {
    let plan = stored_plan(file_store)?;
    if json {
        let text = serde_json::to_string_pretty(&plan).map_err(|e| e.to_string())?;
        println!("{text}");
        return Ok(());
    }

    println!("\n=== {} ===", plan.primary_major.as_deref().unwrap_or("Degree Plan"));
    for (key, courses) in &plan.courses {
        println!("\n{key} ({:.1} credits)", plan.term_credits(*key));
        for course in courses {
            let grade = course.grade().map(|g| format!(" [{g}]")).unwrap_or_default();
            println!(
                "  {:<28} {:>4.1}  {}{grade}",
                course.name,
                course.credits,
                course.effective_status()
            );
        }
    }
    Ok(())
}
