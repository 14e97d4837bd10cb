//! Requirement and UCORE classification
//!
//! Reads catalog footnotes and plan slot names into [`Requirement`]
//! descriptors, turns those into catalog filters, and tracks UCORE coverage.
//!
//! [`Requirement`]: crate::engine::models::Requirement

pub mod course_codes;
pub mod electives;
pub mod filter;
pub mod ucore;

pub use course_codes::{
    extract_allowed_courses, extract_allowed_courses_with, is_actual_course, is_placeholder,
    parse_course_code, CourseCode,
};
pub use electives::{parse_elective_requirements, parse_elective_requirements_with};
pub use filter::{build_elective_filter, exclusion_codes, ElectiveFilter, FilterKind, CS_PREFIXES};
pub use ucore::{extract_ucore_categories, ucore_satisfaction, UcoreCategory, UcoreSatisfaction};
