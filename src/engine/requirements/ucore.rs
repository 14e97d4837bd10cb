//! UCORE category tags and satisfaction tracking

use crate::engine::models::Course;
use regex::Regex;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::fmt;
use std::str::FromStr;
use std::sync::LazyLock;

static BRACKET_TAG: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"(?i)\[([A-Z]{3,5})\]").unwrap());

/// University core curriculum category
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum UcoreCategory {
    /// Written communication
    Wrtg,
    /// Quantitative reasoning
    Quan,
    /// Biological sciences
    Bsci,
    /// Physical sciences
    Psci,
    /// Humanities
    Hum,
    /// Arts
    Arts,
    /// Capstone
    Caps,
    /// Diversity
    Divr,
    /// Roots of contemporary issues
    Root,
    /// Communication
    Comm,
}

impl UcoreCategory {
    /// Every recognized category
    pub const ALL: [Self; 10] = [
        Self::Wrtg,
        Self::Quan,
        Self::Bsci,
        Self::Psci,
        Self::Hum,
        Self::Arts,
        Self::Caps,
        Self::Divr,
        Self::Root,
        Self::Comm,
    ];

    /// Catalog tag, e.g. "WRTG"
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Wrtg => "WRTG",
            Self::Quan => "QUAN",
            Self::Bsci => "BSCI",
            Self::Psci => "PSCI",
            Self::Hum => "HUM",
            Self::Arts => "ARTS",
            Self::Caps => "CAPS",
            Self::Divr => "DIVR",
            Self::Root => "ROOT",
            Self::Comm => "COMM",
        }
    }
}

impl FromStr for UcoreCategory {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let wanted = s.trim();
        Self::ALL
            .into_iter()
            .find(|c| c.as_str().eq_ignore_ascii_case(wanted))
            .ok_or_else(|| format!("Unknown UCORE category: '{s}'"))
    }
}

impl fmt::Display for UcoreCategory {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// UCORE categories carried by a course.
///
/// Bracketed tags in the name come first, then the explicit `ucore`
/// attribute. Unrecognized tags are dropped and each category appears once,
/// in first-seen order.
#[must_use]
pub fn extract_ucore_categories(course: &Course) -> Vec<UcoreCategory> {
    let from_name = BRACKET_TAG
        .captures_iter(&course.name)
        .filter_map(|caps| caps.get(1))
        .filter_map(|m| m.as_str().parse::<UcoreCategory>().ok());
    let from_field = course
        .ucore
        .entries()
        .into_iter()
        .filter_map(|tag| tag.parse::<UcoreCategory>().ok());

    let mut categories = Vec::new();
    for category in from_name.chain(from_field) {
        if !categories.contains(&category) {
            categories.push(category);
        }
    }
    categories
}

/// Which required UCORE categories a set of courses covers
#[derive(Debug, Clone, PartialEq)]
pub struct UcoreSatisfaction<'a> {
    /// Categories asked for, deduplicated, in request order
    pub required: Vec<UcoreCategory>,
    /// Required categories covered by at least one course
    pub satisfied: Vec<UcoreCategory>,
    /// Required categories with no covering course
    pub remaining: Vec<UcoreCategory>,
    /// Covering courses per required category
    pub satisfied_by: BTreeMap<UcoreCategory, Vec<&'a Course>>,
}

impl UcoreSatisfaction<'_> {
    /// True once every required category is covered
    #[must_use]
    pub fn is_complete(&self) -> bool {
        self.remaining.is_empty()
    }
}

/// Match plan courses against required UCORE categories
#[must_use]
pub fn ucore_satisfaction<'a>(
    required: &[UcoreCategory],
    plan_courses: &'a [Course],
) -> UcoreSatisfaction<'a> {
    let mut wanted: Vec<UcoreCategory> = Vec::with_capacity(required.len());
    for category in required {
        if !wanted.contains(category) {
            wanted.push(*category);
        }
    }

    let mut satisfied_by: BTreeMap<UcoreCategory, Vec<&Course>> =
        wanted.iter().map(|c| (*c, Vec::new())).collect();
    for course in plan_courses {
        for category in extract_ucore_categories(course) {
            if let Some(courses) = satisfied_by.get_mut(&category) {
                courses.push(course);
            }
        }
    }

    let (satisfied, remaining): (Vec<_>, Vec<_>) = wanted
        .iter()
        .copied()
        .partition(|c| satisfied_by.get(c).is_some_and(|v| !v.is_empty()));

    UcoreSatisfaction {
        required: wanted,
        satisfied,
        remaining,
        satisfied_by,
    }
}
