//! Percentage thresholds for letter grades

use super::scale::LetterGrade;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

const STANDARD: [(LetterGrade, f64); 12] = [
    (LetterGrade::A, 93.0),
    (LetterGrade::AMinus, 90.0),
    (LetterGrade::BPlus, 87.0),
    (LetterGrade::B, 83.0),
    (LetterGrade::BMinus, 80.0),
    (LetterGrade::CPlus, 77.0),
    (LetterGrade::C, 73.0),
    (LetterGrade::CMinus, 70.0),
    (LetterGrade::DPlus, 67.0),
    (LetterGrade::D, 63.0),
    (LetterGrade::DMinus, 60.0),
    (LetterGrade::F, 0.0),
];

const INLINE: [(LetterGrade, f64); 11] = [
    (LetterGrade::A, 93.0),
    (LetterGrade::AMinus, 90.0),
    (LetterGrade::BPlus, 87.0),
    (LetterGrade::B, 83.0),
    (LetterGrade::BMinus, 80.0),
    (LetterGrade::CPlus, 77.0),
    (LetterGrade::C, 73.0),
    (LetterGrade::CMinus, 70.0),
    (LetterGrade::DPlus, 67.0),
    (LetterGrade::D, 60.0),
    (LetterGrade::F, 0.0),
];

/// Named letter-to-minimum-percentage table
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum ThresholdPreset {
    /// D at 63, D- at 60
    #[default]
    Standard,
    /// D at 60 with no D- (the per-course inline calculator)
    Inline,
}

impl ThresholdPreset {
    /// Config/CLI name of the preset
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Standard => "standard",
            Self::Inline => "inline",
        }
    }

    /// Letter and minimum percentage pairs, best first, ending with F at 0
    #[must_use]
    pub const fn entries(self) -> &'static [(LetterGrade, f64)] {
        match self {
            Self::Standard => &STANDARD,
            Self::Inline => &INLINE,
        }
    }

    /// Minimum percentage for a letter, `None` if the preset does not list it
    #[must_use]
    pub fn threshold(self, grade: LetterGrade) -> Option<f64> {
        // A+ shares the A cutoff
        let grade = if grade == LetterGrade::APlus {
            LetterGrade::A
        } else {
            grade
        };
        self.entries()
            .iter()
            .find(|(letter, _)| *letter == grade)
            .map(|(_, pct)| *pct)
    }

    /// Letter earned by a percentage under this preset.
    ///
    /// Total over all inputs: anything below the lowest passing cutoff,
    /// including NaN, is an F.
    #[must_use]
    pub fn letter_for(self, percentage: f64) -> LetterGrade {
        self.entries()
            .iter()
            .find(|(_, min)| percentage >= *min)
            .map_or(LetterGrade::F, |(letter, _)| *letter)
    }
}

impl FromStr for ThresholdPreset {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "standard" | "" => Ok(Self::Standard),
            "inline" => Ok(Self::Inline),
            _ => Err(format!("Unknown threshold preset: '{s}'")),
        }
    }
}

impl fmt::Display for ThresholdPreset {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Letter grade for a percentage on the standard ladder
#[must_use]
pub fn letter_grade(percentage: f64) -> LetterGrade {
    ThresholdPreset::Standard.letter_for(percentage)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_standard_ladder_boundaries() {
        assert_eq!(letter_grade(100.0), LetterGrade::A);
        assert_eq!(letter_grade(93.0), LetterGrade::A);
        assert_eq!(letter_grade(92.99), LetterGrade::AMinus);
        assert_eq!(letter_grade(83.0), LetterGrade::B);
        assert_eq!(letter_grade(63.0), LetterGrade::D);
        assert_eq!(letter_grade(60.0), LetterGrade::DMinus);
        assert_eq!(letter_grade(59.99), LetterGrade::F);
    }

    #[test]
    fn test_ladder_is_total() {
        assert_eq!(letter_grade(f64::NAN), LetterGrade::F);
        assert_eq!(letter_grade(-12.0), LetterGrade::F);
        assert_eq!(letter_grade(f64::INFINITY), LetterGrade::A);
        assert_eq!(letter_grade(f64::NEG_INFINITY), LetterGrade::F);
    }

    #[test]
    fn test_inline_preset_has_lower_d() {
        let inline = ThresholdPreset::Inline;
        assert_eq!(inline.threshold(LetterGrade::D), Some(60.0));
        assert_eq!(inline.threshold(LetterGrade::DMinus), None);
        assert_eq!(inline.letter_for(61.0), LetterGrade::D);
        assert_eq!(ThresholdPreset::Standard.letter_for(61.0), LetterGrade::DMinus);
    }

    #[test]
    fn test_a_plus_uses_a_threshold() {
        assert_eq!(ThresholdPreset::Standard.threshold(LetterGrade::APlus), Some(93.0));
        assert_eq!(ThresholdPreset::Standard.threshold(LetterGrade::W), None);
    }

    #[test]
    fn test_preset_entries_descend() {
        for preset in [ThresholdPreset::Standard, ThresholdPreset::Inline] {
            let entries = preset.entries();
            assert!(entries.windows(2).all(|w| w[0].1 > w[1].1));
            assert_eq!(entries.last().map(|e| e.0), Some(LetterGrade::F));
        }
    }

    #[test]
    fn test_preset_names_parse() {
        assert_eq!("Inline".parse(), Ok(ThresholdPreset::Inline));
        assert!("loose".parse::<ThresholdPreset>().is_err());
    }
}
