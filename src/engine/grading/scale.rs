//! Letter grades and grade-point scales

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// The closed letter-grade vocabulary, including non-GPA markers
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum LetterGrade {
    /// A+
    #[serde(rename = "A+")]
    APlus,
    /// A
    A,
    /// A-
    #[serde(rename = "A-")]
    AMinus,
    /// B+
    #[serde(rename = "B+")]
    BPlus,
    /// B
    B,
    /// B-
    #[serde(rename = "B-")]
    BMinus,
    /// C+
    #[serde(rename = "C+")]
    CPlus,
    /// C
    C,
    /// C-
    #[serde(rename = "C-")]
    CMinus,
    /// D+
    #[serde(rename = "D+")]
    DPlus,
    /// D
    D,
    /// D-
    #[serde(rename = "D-")]
    DMinus,
    /// F
    F,
    /// Satisfactory (pass/fail)
    S,
    /// Unsatisfactory (pass/fail)
    U,
    /// Withdrawn
    W,
    /// Incomplete
    I,
}

impl LetterGrade {
    /// GPA-bearing letters from best to worst
    pub const RANKED: [Self; 13] = [
        Self::APlus,
        Self::A,
        Self::AMinus,
        Self::BPlus,
        Self::B,
        Self::BMinus,
        Self::CPlus,
        Self::C,
        Self::CMinus,
        Self::DPlus,
        Self::D,
        Self::DMinus,
        Self::F,
    ];

    /// Letter as written on a transcript
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::APlus => "A+",
            Self::A => "A",
            Self::AMinus => "A-",
            Self::BPlus => "B+",
            Self::B => "B",
            Self::BMinus => "B-",
            Self::CPlus => "C+",
            Self::C => "C",
            Self::CMinus => "C-",
            Self::DPlus => "D+",
            Self::D => "D",
            Self::DMinus => "D-",
            Self::F => "F",
            Self::S => "S",
            Self::U => "U",
            Self::W => "W",
            Self::I => "I",
        }
    }

    /// S, U, W and I carry no grade points on any scale
    #[must_use]
    pub const fn is_marker(self) -> bool {
        matches!(self, Self::S | Self::U | Self::W | Self::I)
    }
}

impl FromStr for LetterGrade {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let grade = match s.trim().to_ascii_uppercase().as_str() {
            "A+" => Self::APlus,
            "A" => Self::A,
            "A-" => Self::AMinus,
            "B+" => Self::BPlus,
            "B" => Self::B,
            "B-" => Self::BMinus,
            "C+" => Self::CPlus,
            "C" => Self::C,
            "C-" => Self::CMinus,
            "D+" => Self::DPlus,
            "D" => Self::D,
            "D-" => Self::DMinus,
            "F" => Self::F,
            "S" => Self::S,
            "U" => Self::U,
            "W" => Self::W,
            "I" => Self::I,
            _ => return Err(format!("Unknown letter grade: '{s}'")),
        };
        Ok(grade)
    }
}

impl fmt::Display for LetterGrade {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Named grade-point scale variant.
///
/// The planner and the standalone calculator historically disagreed on D-;
/// callers pick one explicitly instead of carrying private tables.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum GradeScale {
    /// Full 4.0 scale with D- = 0.7
    #[default]
    Standard,
    /// 4.0 scale without D-; a D- earns the same 0.0 as an F
    NoDMinus,
}

impl GradeScale {
    /// Every variant, for listings
    pub const ALL: [Self; 2] = [Self::Standard, Self::NoDMinus];

    /// Config/CLI name of the variant
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Standard => "standard",
            Self::NoDMinus => "no-d-minus",
        }
    }

    /// Grade points for a letter, `None` for non-GPA markers (S/U/W/I)
    #[must_use]
    pub const fn points(self, grade: LetterGrade) -> Option<f64> {
        let value = match grade {
            LetterGrade::APlus | LetterGrade::A => 4.0,
            LetterGrade::AMinus => 3.7,
            LetterGrade::BPlus => 3.3,
            LetterGrade::B => 3.0,
            LetterGrade::BMinus => 2.7,
            LetterGrade::CPlus => 2.3,
            LetterGrade::C => 2.0,
            LetterGrade::CMinus => 1.7,
            LetterGrade::DPlus => 1.3,
            LetterGrade::D => 1.0,
            LetterGrade::DMinus => match self {
                Self::Standard => 0.7,
                Self::NoDMinus => 0.0,
            },
            LetterGrade::F => 0.0,
            LetterGrade::S | LetterGrade::U | LetterGrade::W | LetterGrade::I => return None,
        };
        Some(value)
    }

    /// Grade points for raw grade text.
    ///
    /// `None` means the text is not a GPA-bearing grade (unknown or a marker),
    /// which is different from `Some(0.0)` for a valid F.
    #[must_use]
    pub fn lookup(self, grade: &str) -> Option<f64> {
        grade
            .parse::<LetterGrade>()
            .ok()
            .and_then(|letter| self.points(letter))
    }

    /// Grade points for raw grade text, 0 for anything unrecognized
    #[must_use]
    pub fn points_or_zero(self, grade: &str) -> f64 {
        self.lookup(grade).unwrap_or(0.0)
    }

    /// Letters listed on this scale with their points, best first
    #[must_use]
    pub fn table(self) -> Vec<(LetterGrade, f64)> {
        LetterGrade::RANKED
            .into_iter()
            .filter(|g| !(self == Self::NoDMinus && *g == LetterGrade::DMinus))
            .filter_map(|g| self.points(g).map(|p| (g, p)))
            .collect()
    }
}

impl FromStr for GradeScale {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "standard" | "" => Ok(Self::Standard),
            "no-d-minus" | "no_d_minus" | "calculator" => Ok(Self::NoDMinus),
            _ => Err(format!("Unknown grade scale: '{s}'")),
        }
    }
}

impl fmt::Display for GradeScale {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_standard_points() {
        let scale = GradeScale::Standard;
        assert_eq!(scale.lookup("A+"), Some(4.0));
        assert_eq!(scale.lookup("A"), Some(4.0));
        assert_eq!(scale.lookup("a-"), Some(3.7));
        assert_eq!(scale.lookup("B"), Some(3.0));
        assert_eq!(scale.lookup("D-"), Some(0.7));
        assert_eq!(scale.lookup("F"), Some(0.0));
    }

    #[test]
    fn test_no_d_minus_treats_d_minus_as_f() {
        let scale = GradeScale::NoDMinus;
        assert_eq!(scale.lookup("D-"), Some(0.0));
        assert_eq!(scale.lookup("D"), Some(1.0));
        assert!(scale.table().iter().all(|(g, _)| *g != LetterGrade::DMinus));
        assert_eq!(GradeScale::Standard.table().len(), 13);
        assert_eq!(scale.table().len(), 12);
    }

    #[test]
    fn test_markers_have_no_points() {
        for marker in ["S", "U", "W", "I"] {
            assert_eq!(GradeScale::Standard.lookup(marker), None);
            assert!(marker.parse::<LetterGrade>().unwrap().is_marker());
        }
    }

    #[test]
    fn test_unknown_grade_is_distinguishable_from_f() {
        let scale = GradeScale::Standard;
        assert_eq!(scale.lookup("P"), None);
        assert_eq!(scale.lookup("F"), Some(0.0));
        assert!((scale.points_or_zero("P") - 0.0).abs() < f64::EPSILON);
    }

    #[test]
    fn test_ranked_points_never_increase() {
        for scale in GradeScale::ALL {
            let points: Vec<f64> = LetterGrade::RANKED
                .iter()
                .filter_map(|g| scale.points(*g))
                .collect();
            assert!(points.windows(2).all(|w| w[0] >= w[1]));
        }
    }

    #[test]
    fn test_scale_names_parse() {
        assert_eq!("standard".parse(), Ok(GradeScale::Standard));
        assert_eq!("No-D-Minus".parse(), Ok(GradeScale::NoDMinus));
        assert!("weighted".parse::<GradeScale>().is_err());
        assert_eq!(GradeScale::NoDMinus.to_string(), "no-d-minus");
    }
}
