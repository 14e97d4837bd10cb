//! Course-code recognition in names and free text

use crate::engine::matching::CaseMode;
use crate::engine::models::AllowedCourse;
use regex::{Regex, RegexBuilder};
use serde::{Deserialize, Serialize};
use std::collections::HashSet;
use std::fmt;
use std::sync::LazyLock;

static COURSE_NAME: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"(?i)^\s*([A-Z]{2,7}(?:\s+[A-Z]{1,2})?)\s*(\d{3}[A-Z]?)\b").unwrap()
});

static NUMBER_SEPARATOR: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"(?i)\s*,\s*|\s+and\s+|\s+or\s+").unwrap());

static NUMBER: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"(?i)^\d{3}[A-Z]?$").unwrap());

const ENUMERATED: &str = r"\b([A-Z]{1,4}(?:\s+[A-Z]{1,4})?)\s+(\d{3}[A-Z]?(?:(?:\s*,\s*|\s+and\s+|\s+or\s+)\d{3}[A-Z]?)*)\b";
const LEVEL_RANGE: &str = r"(\d{3})-(\d{3})-level\s+([A-Z]{1,4}(?:\s+[A-Z]{1,4})?)\b";

/// Words that the prefix pattern can swallow from surrounding prose
const STOPWORDS: [&str; 18] = [
    "OR", "AND", "OF", "IN", "FROM", "TAKE", "ANY", "ONE", "TWO", "THE", "SEE", "ALSO", "WITH",
    "PLUS", "EITHER", "BOTH", "ALL", "FOR",
];

struct TextPatterns {
    enumerated: Regex,
    level_range: Regex,
}

impl TextPatterns {
    fn build(case_insensitive: bool) -> Self {
        let compile = |pattern: &str| {
            RegexBuilder::new(pattern)
                .case_insensitive(case_insensitive)
                .build()
                .unwrap()
        };
        Self {
            enumerated: compile(ENUMERATED),
            level_range: compile(LEVEL_RANGE),
        }
    }
}

static INSENSITIVE: LazyLock<TextPatterns> = LazyLock::new(|| TextPatterns::build(true));
static EXACT: LazyLock<TextPatterns> = LazyLock::new(|| TextPatterns::build(false));

fn patterns(mode: CaseMode) -> &'static TextPatterns {
    match mode {
        CaseMode::Insensitive => &INSENSITIVE,
        CaseMode::Exact => &EXACT,
    }
}

/// A catalog course code split into prefix and number
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub struct CourseCode {
    /// Uppercase prefix with single spaces ("CPT S", "MATH")
    pub prefix: String,
    /// Number with optional letter suffix ("121", "150B")
    pub number: String,
}

impl CourseCode {
    /// Prefix with all whitespace removed, so "CPT S" and "CPTS" compare equal
    #[must_use]
    pub fn compact_prefix(&self) -> String {
        self.prefix.split_whitespace().collect()
    }
}

impl fmt::Display for CourseCode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} {}", self.prefix, self.number)
    }
}

/// Uppercase a matched prefix and shed prose words the pattern swallowed.
/// `None` when nothing but prose remains ("or any 300").
fn normalize_prefix(raw: &str) -> Option<String> {
    let mut tokens: Vec<String> = raw
        .split_whitespace()
        .map(str::to_ascii_uppercase)
        .collect();
    while tokens
        .first()
        .is_some_and(|t| STOPWORDS.contains(&t.as_str()))
    {
        tokens.remove(0);
    }
    if tokens.len() == 2 && STOPWORDS.contains(&tokens[1].as_str()) {
        tokens.pop();
    }
    (!tokens.is_empty()).then(|| tokens.join(" "))
}

/// Read the leading "PREFIX NUMBER" of a course name.
///
/// Accepts both "CPTS 121" and the split form "CPT S 121". Returns `None`
/// for placeholder slots such as "UCORE Inquiry".
#[must_use]
pub fn parse_course_code(name: &str) -> Option<CourseCode> {
    let caps = COURSE_NAME.captures(name)?;
    Some(CourseCode {
        prefix: normalize_prefix(caps.get(1)?.as_str())?,
        number: caps.get(2)?.as_str().to_ascii_uppercase(),
    })
}

/// True when the name starts with a real course code
#[must_use]
pub fn is_actual_course(name: &str) -> bool {
    parse_course_code(name).is_some()
}

const PLACEHOLDER_KEYWORDS: [&str; 10] = [
    "elective",
    "ucore",
    "requirement",
    "tbd",
    "to be determined",
    "option",
    "choose",
    "select",
    "any",
    "general",
];

/// True for requirement slots ("Technical Elective", "UCORE Inquiry")
/// rather than real courses
#[must_use]
pub fn is_placeholder(name: &str) -> bool {
    !name.trim().is_empty()
        && CaseMode::Insensitive.contains_any(name, &PLACEHOLDER_KEYWORDS)
        && !is_actual_course(name)
}

/// Course references in free text, case-insensitively
#[must_use]
pub fn extract_allowed_courses(text: &str) -> Vec<AllowedCourse> {
    extract_allowed_courses_with(text, CaseMode::Insensitive)
}

/// Course references in free text.
///
/// Two passes run over the whole text. The enumerated pass reads
/// "CPT S 321, 323 or 422" style lists and yields one entry per number,
/// skipping codes already seen. The level-range pass reads
/// "300-400-level CPT S" and always appends its entries.
#[must_use]
pub fn extract_allowed_courses_with(text: &str, mode: CaseMode) -> Vec<AllowedCourse> {
    let patterns = patterns(mode);
    let mut courses = Vec::new();
    let mut seen = HashSet::new();

    for caps in patterns.enumerated.captures_iter(text) {
        let (Some(prefix), Some(numbers)) = (caps.get(1), caps.get(2)) else {
            continue;
        };
        let Some(prefix) = normalize_prefix(prefix.as_str()) else {
            continue;
        };
        for number in NUMBER_SEPARATOR.split(numbers.as_str()) {
            let number = number.trim();
            if !NUMBER.is_match(number) {
                continue;
            }
            let entry = AllowedCourse::exact(&prefix, &number.to_ascii_uppercase());
            if seen.insert(entry.code().to_string()) {
                courses.push(entry);
            }
        }
    }

    for caps in patterns.level_range.captures_iter(text) {
        let (Some(min), Some(max), Some(prefix)) = (caps.get(1), caps.get(2), caps.get(3)) else {
            continue;
        };
        let (Ok(min), Ok(max)) = (min.as_str().parse::<u16>(), max.as_str().parse::<u16>()) else {
            continue;
        };
        if let Some(prefix) = normalize_prefix(prefix.as_str()) {
            courses.push(AllowedCourse::level_range(&prefix, min, max));
        }
    }

    courses
}

#[cfg(test)]
mod tests {
    use super::*;

    fn codes(entries: &[AllowedCourse]) -> Vec<&str> {
        entries.iter().map(AllowedCourse::code).collect()
    }

    #[test]
    fn test_parse_course_code_forms() {
        let code = parse_course_code("CPTS 121").unwrap();
        assert_eq!(code.prefix, "CPTS");
        assert_eq!(code.number, "121");

        let split = parse_course_code("CPT S 121 Program Design").unwrap();
        assert_eq!(split.prefix, "CPT S");
        assert_eq!(split.compact_prefix(), "CPTS");
        assert_eq!(split.to_string(), "CPT S 121");

        assert_eq!(parse_course_code("math171").unwrap().to_string(), "MATH 171");
        assert_eq!(parse_course_code("ENGLISH 101 [WRTG]").unwrap().prefix, "ENGLISH");
        assert!(parse_course_code("UCORE Inquiry").is_none());
        assert!(parse_course_code("Any 300-level course").is_none());
        assert!(parse_course_code("").is_none());
    }

    #[test]
    fn test_placeholder_detection() {
        assert!(is_placeholder("Technical Elective"));
        assert!(is_placeholder("UCORE Inquiry"));
        assert!(is_placeholder("TBD"));
        assert!(!is_placeholder("CPTS 121"));
        assert!(!is_placeholder("MATH 300 Elective"));
        assert!(!is_placeholder("Internship"));
        assert!(!is_placeholder(""));
    }

    #[test]
    fn test_enumerated_list_shares_prefix() {
        let entries = extract_allowed_courses("CPT S 321, 323, 422");
        assert_eq!(codes(&entries), vec!["CPT S 321", "CPT S 323", "CPT S 422"]);
        assert!(entries.iter().all(|e| e.prefix() == "CPT S"));
    }

    #[test]
    fn test_and_or_separators_and_suffixes() {
        let entries = extract_allowed_courses("Take MATH 315 and 401 or 420, or STAT 360B");
        assert_eq!(
            codes(&entries),
            vec!["MATH 315", "MATH 401", "MATH 420", "STAT 360B"]
        );
    }

    #[test]
    fn test_duplicate_codes_suppressed() {
        let entries = extract_allowed_courses("E E 234, 235; also E E 234");
        assert_eq!(codes(&entries), vec!["E E 234", "E E 235"]);
    }

    #[test]
    fn test_level_range_entries_not_deduplicated() {
        let entries =
            extract_allowed_courses("CPT S 422 or any 300-400-level CPT S course; 300-400-level CPT S");
        assert_eq!(
            codes(&entries),
            vec!["CPT S 422", "CPT S 300-400 level", "CPT S 300-400 level"]
        );
    }

    #[test]
    fn test_level_range_drops_trailing_connective() {
        let entries = extract_allowed_courses("any 300-400-level MATH or STAT course");
        assert_eq!(codes(&entries), vec!["MATH 300-400 level"]);
    }

    #[test]
    fn test_exact_mode_ignores_lowercase_prefixes() {
        assert!(extract_allowed_courses_with("cpt s 321", CaseMode::Exact).is_empty());
        assert_eq!(extract_allowed_courses("cpt s 321").len(), 1);
        assert_eq!(
            codes(&extract_allowed_courses_with("CPT S 321 or 322", CaseMode::Exact)),
            vec!["CPT S 321", "CPT S 322"]
        );
    }

    #[test]
    fn test_prose_connectors_are_not_prefixes() {
        let entries = extract_allowed_courses("also MATH 315, with STAT 360 plus HIST 105");
        assert_eq!(codes(&entries), vec!["MATH 315", "STAT 360", "HIST 105"]);
        let entries = extract_allowed_courses("either BIOL 106 or 107");
        assert_eq!(codes(&entries), vec!["BIOL 106", "BIOL 107"]);
    }

    #[test]
    fn test_no_codes_in_plain_prose() {
        assert!(extract_allowed_courses("Choose any approved course").is_empty());
        assert!(extract_allowed_courses("").is_empty());
    }
}
