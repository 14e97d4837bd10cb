//! Grade, credit and requirement computations
//!
//! Everything under this module is synchronous and side-effect free apart
//! from debug logging: functions borrow plain records and return owned
//! results.

pub mod gpa;
pub mod grading;
pub mod matching;
pub mod models;
pub mod overlap;
pub mod requirements;
pub mod weights;

pub use gpa::{
    compute_gpa, credits_achieved, credits_planned, cumulative_gpa, remaining_credits,
    total_credits, total_required_credits, CreditPolicy, CreditSummary,
};
pub use grading::{letter_grade, GradeScale, LetterGrade, ThresholdPreset};
pub use matching::CaseMode;
pub use overlap::{analyze_course_overlaps, overlap_summary, CourseOverlaps, OverlapOptions};
pub use weights::{current_grade, needed_score, project_remaining, NeededScore, ProjectionError};
