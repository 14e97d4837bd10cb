//! Data models exchanged between the engine and its callers

pub mod category;
pub mod course;
pub mod plan;
pub mod requirement;

pub use category::{GradeCategory, Gradebook};
pub use course::{Course, CourseStatus, UcoreTags};
pub use plan::{DegreePlan, Term, TermKey, DEFAULT_PLAN_YEARS, MAX_TERM_CREDITS};
pub use requirement::{AllowedCourse, LevelRange, Requirement, RequirementKind};
