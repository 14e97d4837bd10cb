//! Planning engine for the Virtual Counselor degree planner
//!
//! GPA and grade calculators, UCORE and elective requirement classification,
//! multi-major overlap analysis, plan import/export, persistence and reports.
//! The `vcounsel` binary is a thin CLI over this library.

pub mod config;
pub mod engine;
pub mod logger;
pub mod planner;
pub mod report;
pub mod store;

/// Returns the current version of the `virtual-counselor` crate
#[must_use]
pub const fn get_version() -> &'static str {
    env!("CARGO_PKG_VERSION")
}
