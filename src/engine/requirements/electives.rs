//! Elective requirement detection from footnote and slot text

use super::course_codes::extract_allowed_courses_with;
use crate::engine::matching::CaseMode;
use crate::engine::models::{Requirement, RequirementKind};
use regex::{Regex, RegexBuilder};
use std::sync::LazyLock;

const UCORE_ELECTIVE: &str = r"UCORE\s*\[?([A-Z]{3,5})\]?\s*elective";

static UCORE_INSENSITIVE: LazyLock<Regex> = LazyLock::new(|| {
    RegexBuilder::new(UCORE_ELECTIVE)
        .case_insensitive(true)
        .build()
        .unwrap()
});
static UCORE_EXACT: LazyLock<Regex> = LazyLock::new(|| Regex::new(UCORE_ELECTIVE).unwrap());

const CS_KEYWORDS: [&str; 4] = ["cs elective", "computer science elective", "cpt s", "cpts"];
const TECHNICAL_KEYWORDS: [&str; 1] = ["technical elective"];
const GENERAL_KEYWORDS: [&str; 2] = ["general elective", "free elective"];

/// Requirements described by a piece of text, case-insensitively
#[must_use]
pub fn parse_elective_requirements(text: &str) -> Vec<Requirement> {
    parse_elective_requirements_with(text, CaseMode::Insensitive)
}

/// Requirements described by a piece of text.
///
/// UCORE, CS, technical and general electives are detected independently,
/// so one text can yield several descriptors, always in that order. When
/// none is detected but the text names course codes, a single course-list
/// descriptor carries them.
#[must_use]
pub fn parse_elective_requirements_with(text: &str, mode: CaseMode) -> Vec<Requirement> {
    if text.trim().is_empty() {
        return Vec::new();
    }

    let mut requirements = Vec::new();

    let ucore = match mode {
        CaseMode::Insensitive => &*UCORE_INSENSITIVE,
        CaseMode::Exact => &*UCORE_EXACT,
    };
    if let Some(tag) = ucore.captures(text).and_then(|caps| caps.get(1)) {
        let tag = tag.as_str().to_ascii_uppercase();
        let mut req = Requirement::new(
            RequirementKind::Ucore,
            format!("UCORE {tag} Elective: Choose a {tag}-designated course"),
            text,
        );
        req.category = Some(tag);
        requirements.push(req);
    }

    if mode.contains_any(text, &CS_KEYWORDS) {
        let mut req = Requirement::new(
            RequirementKind::Cs,
            "CS Elective: Choose a Computer Science course (CPTS prefix)",
            text,
        );
        req.allowed_courses = extract_allowed_courses_with(text, mode);
        requirements.push(req);
    }

    if mode.contains_any(text, &TECHNICAL_KEYWORDS) {
        let mut req = Requirement::new(
            RequirementKind::Technical,
            "Technical Elective: Choose an approved technical course",
            text,
        );
        req.allowed_courses = extract_allowed_courses_with(text, mode);
        requirements.push(req);
    }

    if mode.contains_any(text, &GENERAL_KEYWORDS) {
        requirements.push(Requirement::new(
            RequirementKind::General,
            "General Elective: Choose any course",
            text,
        ));
    }

    if requirements.is_empty() {
        let allowed = extract_allowed_courses_with(text, mode);
        if !allowed.is_empty() {
            let mut req = Requirement::new(
                RequirementKind::CourseList,
                "Choose from the listed courses",
                text,
            );
            req.allowed_courses = allowed;
            requirements.push(req);
        }
    }

    crate::debug!(
        "Classified {:?} into {} requirement(s)",
        text,
        requirements.len()
    );
    requirements
}

#[cfg(test)]
mod tests {
    use super::*;

    fn kinds(reqs: &[Requirement]) -> Vec<RequirementKind> {
        reqs.iter().map(|r| r.kind).collect()
    }

    #[test]
    fn test_ucore_elective_with_brackets() {
        let reqs = parse_elective_requirements("UCORE [HUM] Elective");
        assert_eq!(kinds(&reqs), vec![RequirementKind::Ucore]);
        assert_eq!(reqs[0].category.as_deref(), Some("HUM"));
        assert_eq!(
            reqs[0].description,
            "UCORE HUM Elective: Choose a HUM-designated course"
        );
        assert_eq!(reqs[0].source_text, "UCORE [HUM] Elective");
    }

    #[test]
    fn test_ucore_tag_is_uppercased() {
        let reqs = parse_elective_requirements("ucore arts elective");
        assert_eq!(reqs[0].category.as_deref(), Some("ARTS"));
    }

    #[test]
    fn test_cs_elective_carries_courses() {
        let reqs = parse_elective_requirements("CS Elective: CPT S 321, 323, 422");
        assert_eq!(kinds(&reqs), vec![RequirementKind::Cs]);
        assert_eq!(reqs[0].allowed_courses.len(), 3);
    }

    #[test]
    fn test_multiple_kinds_follow_detection_order() {
        let text = "General elective or technical elective; UCORE [ARTS] elective";
        let reqs = parse_elective_requirements(text);
        assert_eq!(
            kinds(&reqs),
            vec![
                RequirementKind::Ucore,
                RequirementKind::Technical,
                RequirementKind::General
            ]
        );
        assert!(reqs[1].allowed_courses.is_empty());
    }

    #[test]
    fn test_course_list_fallback() {
        let reqs = parse_elective_requirements("Select one of MATH 315, 401 or 420");
        assert_eq!(kinds(&reqs), vec![RequirementKind::CourseList]);
        assert_eq!(reqs[0].description, "Choose from the listed courses");
        assert_eq!(reqs[0].allowed_courses.len(), 3);
    }

    #[test]
    fn test_free_elective_is_general() {
        let reqs = parse_elective_requirements("Free Elective");
        assert_eq!(kinds(&reqs), vec![RequirementKind::General]);
        assert!(reqs[0].allowed_courses.is_empty());
    }

    #[test]
    fn test_plain_text_yields_nothing() {
        assert!(parse_elective_requirements("Internship").is_empty());
        assert!(parse_elective_requirements("").is_empty());
    }

    #[test]
    fn test_exact_mode_needs_written_case() {
        assert!(parse_elective_requirements_with("Technical Elective", CaseMode::Exact).is_empty());
        assert_eq!(
            kinds(&parse_elective_requirements_with("technical elective", CaseMode::Exact)),
            vec![RequirementKind::Technical]
        );
    }
}
