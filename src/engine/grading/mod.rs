//! Grade-point scales and percentage thresholds

pub mod scale;
pub mod thresholds;

pub use scale::{GradeScale, LetterGrade};
pub use thresholds::{letter_grade, ThresholdPreset};
