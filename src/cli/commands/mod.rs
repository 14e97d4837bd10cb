//! CLI command handlers for `vcounsel`.
//!
//! Each subcommand lives in its own module. Handlers other than `config`
//! return `Err(message)` and leave printing of the failure to `main`.

pub mod classify;
pub mod config;
pub mod gpa;
pub mod grade;
pub mod overlap;
pub mod plan;
pub mod report;

use std::path::Path;
use virtual_counselor::engine::models::DegreePlan;
use virtual_counselor::planner::load_plan_file;

/// Load a plan file, logging the failure
fn load_plan(path: &Path) -> Result<DegreePlan, String> {
    load_plan_file(path).map_err(|e| {
        virtual_counselor::error!("Failed to load plan {}: {e}", path.display());
        format!("Failed to load {}: {e}", path.display())
    })
}
