//! Case handling for free-text classification

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// How keyword and pattern matching treats letter case
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum CaseMode {
    /// "Elective", "ELECTIVE" and "elective" all match
    #[default]
    Insensitive,
    /// Keywords match only as written
    Exact,
}

impl CaseMode {
    /// Whether `haystack` contains `needle` under this mode
    #[must_use]
    pub fn contains(self, haystack: &str, needle: &str) -> bool {
        match self {
            Self::Insensitive => haystack
                .to_lowercase()
                .contains(&needle.to_lowercase()),
            Self::Exact => haystack.contains(needle),
        }
    }

    /// Whether `haystack` contains any of `needles`
    #[must_use]
    pub fn contains_any(self, haystack: &str, needles: &[&str]) -> bool {
        match self {
            Self::Insensitive => {
                let lower = haystack.to_lowercase();
                needles.iter().any(|n| lower.contains(&n.to_lowercase()))
            }
            Self::Exact => needles.iter().any(|n| haystack.contains(n)),
        }
    }

    /// Config/CLI name
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Insensitive => "insensitive",
            Self::Exact => "exact",
        }
    }
}

impl FromStr for CaseMode {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "insensitive" | "" => Ok(Self::Insensitive),
            "exact" | "sensitive" => Ok(Self::Exact),
            _ => Err(format!("Unknown case mode: '{s}'")),
        }
    }
}

impl fmt::Display for CaseMode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}
