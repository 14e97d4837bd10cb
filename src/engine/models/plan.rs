//! Degree plan model

use super::course::Course;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::fmt;
use std::str::FromStr;

/// Default number of academic years a plan spans
pub const DEFAULT_PLAN_YEARS: u32 = 4;

/// Credit load above which a term is considered full for retake placement
pub const MAX_TERM_CREDITS: f32 = 18.0;

/// Academic term, ordered as it occurs within one academic year
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub enum Term {
    /// Fall semester (starts the academic year)
    Fall,
    /// Spring semester
    Spring,
    /// Summer session
    Summer,
}

impl Term {
    /// All terms in academic-year order
    pub const ALL: [Self; 3] = [Self::Fall, Self::Spring, Self::Summer];

    /// Display name
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Fall => "Fall",
            Self::Spring => "Spring",
            Self::Summer => "Summer",
        }
    }
}

impl FromStr for Term {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "fall" => Ok(Self::Fall),
            "spring" => Ok(Self::Spring),
            "summer" => Ok(Self::Summer),
            _ => Err(format!("Unknown term: '{s}'")),
        }
    }
}

impl fmt::Display for Term {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Plan slot key, serialized as `"<year>-<Term>"` (e.g. `"1-Fall"`)
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct TermKey {
    /// Plan year, starting at 1
    pub year: u32,
    /// Term within the year
    pub term: Term,
}

impl TermKey {
    /// Create a key
    #[must_use]
    pub const fn new(year: u32, term: Term) -> Self {
        Self { year, term }
    }
}

impl fmt::Display for TermKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}-{}", self.year, self.term)
    }
}

impl FromStr for TermKey {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let (year, term) = s
            .trim()
            .split_once('-')
            .ok_or_else(|| format!("Invalid term key: '{s}' (expected YEAR-TERM)"))?;
        let year = year
            .trim()
            .parse::<u32>()
            .map_err(|_| format!("Invalid year in term key: '{s}'"))?;
        Ok(Self::new(year, term.parse()?))
    }
}

impl TryFrom<String> for TermKey {
    type Error = String;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        value.parse()
    }
}

impl From<TermKey> for String {
    fn from(key: TermKey) -> Self {
        key.to_string()
    }
}

/// A student's degree plan: declared programs plus courses by term
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DegreePlan {
    /// Primary major name
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub primary_major: Option<String>,

    /// Additional majors (each adds a credit increment)
    #[serde(default)]
    pub additional_majors: Vec<String>,

    /// Declared minors
    #[serde(default)]
    pub minors: Vec<String>,

    /// Declared certificates
    #[serde(default)]
    pub certificates: Vec<String>,

    /// Number of plan years
    #[serde(default = "default_years")]
    pub years: u32,

    /// Courses grouped by term
    #[serde(default)]
    pub courses: BTreeMap<TermKey, Vec<Course>>,
}

const fn default_years() -> u32 {
    DEFAULT_PLAN_YEARS
}

impl Default for DegreePlan {
    fn default() -> Self {
        Self {
            primary_major: None,
            additional_majors: Vec::new(),
            minors: Vec::new(),
            certificates: Vec::new(),
            years: DEFAULT_PLAN_YEARS,
            courses: BTreeMap::new(),
        }
    }
}

impl DegreePlan {
    /// Create an empty plan for a primary major
    #[must_use]
    pub fn new(primary_major: impl Into<String>) -> Self {
        Self {
            primary_major: Some(primary_major.into()),
            ..Self::default()
        }
    }

    /// Append a course to a term
    pub fn add_course(&mut self, key: TermKey, course: Course) {
        if key.year > self.years {
            self.years = key.year;
        }
        self.courses.entry(key).or_default().push(course);
    }

    /// Courses of one term (empty when the term has none)
    #[must_use]
    pub fn term_courses(&self, key: TermKey) -> &[Course] {
        self.courses.get(&key).map(Vec::as_slice).unwrap_or(&[])
    }

    /// Every course in term order
    pub fn all_courses(&self) -> impl Iterator<Item = &Course> {
        self.courses.values().flatten()
    }

    /// Owned copy of every course in term order
    #[must_use]
    pub fn course_list(&self) -> Vec<Course> {
        self.all_courses().cloned().collect()
    }

    /// Total number of course entries
    #[must_use]
    pub fn course_count(&self) -> usize {
        self.courses.values().map(Vec::len).sum()
    }

    /// Credits scheduled in one term, whatever their status
    #[must_use]
    pub fn term_credits(&self, key: TermKey) -> f32 {
        self.term_courses(key)
            .iter()
            .filter(|c| c.has_credit())
            .map(|c| c.credits)
            .sum()
    }

    /// First term after `after` whose scheduled credits are below `max_credits`.
    ///
    /// Used to place a retake of a failed course. Searches up to the last plan year.
    #[must_use]
    pub fn next_open_term(&self, after: TermKey, max_credits: f32) -> Option<TermKey> {
        (after.year..=self.years)
            .flat_map(|year| Term::ALL.into_iter().map(move |term| TermKey::new(year, term)))
            .filter(|key| *key > after)
            .find(|key| self.term_credits(*key) < max_credits)
    }

    /// Drop every course and declared program, keeping the year span
    pub fn reset(&mut self) {
        let years = self.years;
        *self = Self {
            years,
            ..Self::default()
        };
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn key(year: u32, term: Term) -> TermKey {
        TermKey::new(year, term)
    }

    #[test]
    fn test_term_key_round_trip() {
        let k: TermKey = "2-Spring".parse().unwrap();
        assert_eq!(k, key(2, Term::Spring));
        assert_eq!(k.to_string(), "2-Spring");
        assert!("Spring-2".parse::<TermKey>().is_err());
        assert!("2-Winter".parse::<TermKey>().is_err());
    }

    #[test]
    fn test_term_keys_order_within_year() {
        assert!(key(1, Term::Fall) < key(1, Term::Spring));
        assert!(key(1, Term::Summer) < key(2, Term::Fall));
    }

    #[test]
    fn test_add_and_count_courses() {
        let mut plan = DegreePlan::new("Computer Science");
        plan.add_course(key(1, Term::Fall), Course::new("CPTS 121", 4.0));
        plan.add_course(key(1, Term::Fall), Course::new("MATH 171", 4.0));
        plan.add_course(key(1, Term::Spring), Course::new("CPTS 122", 4.0));

        assert_eq!(plan.course_count(), 3);
        assert!((plan.term_credits(key(1, Term::Fall)) - 8.0).abs() < f32::EPSILON);
        assert!(plan.term_courses(key(3, Term::Fall)).is_empty());
        let names: Vec<_> = plan.all_courses().map(|c| c.name.as_str()).collect();
        assert_eq!(names, vec!["CPTS 121", "MATH 171", "CPTS 122"]);
    }

    #[test]
    fn test_add_course_extends_years() {
        let mut plan = DegreePlan::default();
        plan.add_course(key(6, Term::Fall), Course::new("CPTS 421", 3.0));
        assert_eq!(plan.years, 6);
    }

    #[test]
    fn test_next_open_term_skips_full_terms() {
        let mut plan = DegreePlan::new("Computer Science");
        for n in 0..6 {
            plan.add_course(key(1, Term::Spring), Course::new(format!("X {n}"), 3.0));
        }

        // 1-Spring holds 18 credits, so the retake lands in 1-Summer
        assert_eq!(
            plan.next_open_term(key(1, Term::Fall), 18.0),
            Some(key(1, Term::Summer))
        );
        assert_eq!(
            plan.next_open_term(key(1, Term::Summer), 18.0),
            Some(key(2, Term::Fall))
        );
        assert_eq!(plan.next_open_term(key(4, Term::Summer), 18.0), None);
    }

    #[test]
    fn test_reset_keeps_year_span() {
        let mut plan = DegreePlan::new("Computer Science");
        plan.minors.push("Mathematics".to_string());
        plan.add_course(key(5, Term::Fall), Course::new("CPTS 121", 4.0));
        plan.reset();

        assert_eq!(plan.course_count(), 0);
        assert!(plan.minors.is_empty());
        assert!(plan.primary_major.is_none());
        assert_eq!(plan.years, 5);
    }

    #[test]
    fn test_plan_json_uses_term_key_strings() {
        let mut plan = DegreePlan::new("Computer Science");
        plan.add_course(key(1, Term::Fall), Course::new("CPTS 121", 4.0));

        let json = serde_json::to_string(&plan).unwrap();
        assert!(json.contains("\"1-Fall\""));
        assert!(json.contains("\"primaryMajor\""));

        let back: DegreePlan = serde_json::from_str(&json).unwrap();
        assert_eq!(back, plan);
    }
}
