//! CSV reader and writer for the tabular plan layout
//!
//! One row per course: `Year, Term, Course, Credits, Status, Grade, Required, Retake`.
//! Columns are located by header name, so extra or reordered columns are fine.
//! `Semester` is accepted as an alias for `Term`.

use super::PlanLoadError;
use crate::engine::models::{Course, CourseStatus, DegreePlan, Term, TermKey};
use csv::{ReaderBuilder, StringRecord, Trim, Writer};

/// Header row written by [`write_plan_csv`]
pub const CSV_HEADERS: [&str; 8] = [
    "Year", "Term", "Course", "Credits", "Status", "Grade", "Required", "Retake",
];

/// Credits assumed when the cell is blank or unreadable
pub const DEFAULT_CREDITS: f32 = 3.0;

const YEAR_WORDS: [&str; 8] = [
    "first", "second", "third", "fourth", "fifth", "sixth", "seventh", "eighth",
];

/// Get a field value by header name
fn get_field<'a>(
    record: &'a StringRecord,
    header_names: &[&str],
    headers: &StringRecord,
) -> Option<&'a str> {
    headers
        .iter()
        .position(|h| header_names.iter().any(|name| h.eq_ignore_ascii_case(name)))
        .and_then(|idx| record.get(idx))
}

/// Plan year from "2", "Year 2" or "Second Year"
fn parse_year(raw: &str) -> Option<u32> {
    let lower = raw.trim().to_ascii_lowercase();
    if let Ok(year) = lower.parse::<u32>() {
        return (year > 0).then_some(year);
    }
    if let Some(rest) = lower.strip_prefix("year") {
        return rest.trim().parse::<u32>().ok().filter(|y| *y > 0);
    }
    let word = lower.strip_suffix("year")?.trim();
    YEAR_WORDS
        .iter()
        .position(|w| *w == word)
        .and_then(|idx| u32::try_from(idx + 1).ok())
}

fn parse_flag(raw: Option<&str>) -> bool {
    raw.is_some_and(|v| v.eq_ignore_ascii_case("yes"))
}

/// Explicit zero is kept; blank, negative or non-numeric cells take the default
fn parse_credits(raw: Option<&str>) -> f32 {
    raw.and_then(|v| v.parse::<f32>().ok())
        .filter(|c| c.is_finite() && *c >= 0.0)
        .unwrap_or(DEFAULT_CREDITS)
}

fn csv_error(line: usize, err: &csv::Error) -> PlanLoadError {
    PlanLoadError::Csv {
        line,
        message: err.to_string(),
    }
}

fn parse_row(
    record: &StringRecord,
    headers: &StringRecord,
    line_no: usize,
) -> Result<Option<(TermKey, Course)>, PlanLoadError> {
    if record.iter().all(str::is_empty) {
        return Ok(None);
    }

    let year_cell = get_field(record, &["Year"], headers).unwrap_or_default();
    let Some(year) = parse_year(year_cell) else {
        crate::warn!("Line {line_no}: skipping row with unrecognized year '{year_cell}'");
        return Ok(None);
    };
    let term_cell = get_field(record, &["Term", "Semester"], headers).unwrap_or_default();
    let Ok(term) = term_cell.parse::<Term>() else {
        crate::warn!("Line {line_no}: skipping row with unrecognized term '{term_cell}'");
        return Ok(None);
    };

    let name = get_field(record, &["Course", "Name"], headers).unwrap_or_default();
    let status = get_field(record, &["Status"], headers)
        .unwrap_or_default()
        .parse::<CourseStatus>()
        .map_err(|message| PlanLoadError::Csv {
            line: line_no,
            message,
        })?;
    let grade = get_field(record, &["Grade"], headers)
        .filter(|g| !g.is_empty())
        .map(str::to_string);

    let mut course = Course::new(name, parse_credits(get_field(record, &["Credits"], headers)))
        .with_status(status);
    course.grade = grade;
    course.is_required = parse_flag(get_field(record, &["Required"], headers));
    course.is_retake = parse_flag(get_field(record, &["Retake"], headers));

    Ok(Some((TermKey::new(year, term), course)))
}

/// Parse a plan from CSV text
///
/// Rows whose year or term cannot be read are skipped with a warning; blank
/// rows are ignored. Quoted fields may span lines.
///
/// # Errors
/// Returns an error if the header row is missing a required column, a
/// record is malformed, or a status cell holds an unknown value
pub fn parse_plan_csv(content: &str) -> Result<DegreePlan, PlanLoadError> {
    let mut reader = ReaderBuilder::new()
        .flexible(true)
        .trim(Trim::All)
        .from_reader(content.trim_start_matches('\u{feff}').as_bytes());

    let headers = reader.headers().map_err(|e| csv_error(1, &e))?.clone();
    if headers.iter().all(str::is_empty) {
        return Err(PlanLoadError::Csv {
            line: 1,
            message: "File is empty".to_string(),
        });
    }
    for required in ["Year", "Course"] {
        if !headers.iter().any(|h| h.eq_ignore_ascii_case(required)) {
            return Err(PlanLoadError::Csv {
                line: 1,
                message: format!("Missing '{required}' column"),
            });
        }
    }

    let mut plan = DegreePlan::default();
    for result in reader.records() {
        let record = result.map_err(|e| {
            let line = e.position().map_or(0, |p| p.line());
            csv_error(usize::try_from(line).unwrap_or(usize::MAX), &e)
        })?;
        let line_no = record
            .position()
            .and_then(|p| usize::try_from(p.line()).ok())
            .unwrap_or_default();
        if let Some((key, course)) = parse_row(&record, &headers, line_no)? {
            plan.add_course(key, course);
        }
    }

    crate::debug!("Parsed {} courses from CSV", plan.course_count());
    Ok(plan)
}

const fn yes_no(flag: bool) -> &'static str {
    if flag {
        "Yes"
    } else {
        "No"
    }
}

/// Render a plan in the tabular layout, one row per course in term order
///
/// # Errors
/// Returns an error if a record cannot be written
pub fn write_plan_csv(plan: &DegreePlan) -> Result<String, PlanLoadError> {
    let mut wtr = Writer::from_writer(Vec::new());
    wtr.write_record(CSV_HEADERS)
        .map_err(|e| csv_error(1, &e))?;

    for (key, courses) in &plan.courses {
        for course in courses {
            wtr.write_record([
                format!("Year {}", key.year),
                key.term.to_string(),
                course.name.clone(),
                course.credits.to_string(),
                course.effective_status().to_string(),
                course.grade().unwrap_or_default().to_string(),
                yes_no(course.is_required).to_string(),
                yes_no(course.is_retake).to_string(),
            ])
            .map_err(|e| csv_error(0, &e))?;
        }
    }

    let bytes = wtr.into_inner().map_err(|e| PlanLoadError::Csv {
        line: 0,
        message: e.error().to_string(),
    })?;
    Ok(String::from_utf8_lossy(&bytes).into_owned())
}

#[cfg(test)]
mod tests {
    use super::*;

    const SAMPLE: &str = "\
Year,Semester,Course,Credits,Status,Grade,Required,Retake
First Year,Fall,CPTS 121,4,completed,A,Yes,No
First Year,Fall,\"MATH 315 or STAT 360, see note\",,planned,,No,No
Year 2,Spring,CPTS 122,4,failed,F,Yes,No

3,Summer,CPTS 122,4,,,Yes,Yes
";

    #[test]
    fn test_quoted_fields_with_escapes() {
        let plan = parse_plan_csv(
            "Year,Term,Course\n1,Fall,\"Seminar, \"\"Topics\"\"\"\n",
        )
        .unwrap();
        let fall = plan.term_courses(TermKey::new(1, Term::Fall));
        assert_eq!(fall[0].name, r#"Seminar, "Topics""#);
    }

    #[test]
    fn test_parse_year_forms() {
        assert_eq!(parse_year("2"), Some(2));
        assert_eq!(parse_year("Year 3"), Some(3));
        assert_eq!(parse_year("Fourth Year"), Some(4));
        assert_eq!(parse_year("0"), None);
        assert_eq!(parse_year("2024-2025"), None);
    }

    #[test]
    fn test_parse_plan_csv() {
        let plan = parse_plan_csv(SAMPLE).unwrap();
        assert_eq!(plan.course_count(), 4);

        let fall = plan.term_courses(TermKey::new(1, Term::Fall));
        assert_eq!(fall[0].grade(), Some("A"));
        assert!(fall[0].is_required);
        assert_eq!(fall[1].name, "MATH 315 or STAT 360, see note");
        assert!((fall[1].credits - DEFAULT_CREDITS).abs() < f32::EPSILON);
        assert_eq!(fall[1].effective_status(), CourseStatus::Planned);

        let retake = &plan.term_courses(TermKey::new(3, Term::Summer))[0];
        assert!(retake.is_retake);
        assert_eq!(retake.effective_status(), CourseStatus::NotTaken);
        assert_eq!(plan.years, 4);
    }

    #[test]
    fn test_unknown_year_rows_are_skipped() {
        let plan = parse_plan_csv("Year,Term,Course\nSomeday,Fall,CPTS 121\n1,Fall,CPTS 122\n").unwrap();
        assert_eq!(plan.course_count(), 1);
    }

    #[test]
    fn test_unknown_status_is_an_error() {
        let err = parse_plan_csv("Year,Term,Course,Status\n1,Fall,CPTS 121,dropped\n").unwrap_err();
        assert!(matches!(err, PlanLoadError::Csv { line: 2, .. }));
    }

    #[test]
    fn test_missing_columns() {
        assert!(parse_plan_csv("").is_err());
        assert!(parse_plan_csv("Term,Course\nFall,CPTS 121\n").is_err());
    }

    #[test]
    fn test_write_then_parse_keeps_courses() {
        let plan = parse_plan_csv(SAMPLE).unwrap();
        let text = write_plan_csv(&plan).unwrap();
        assert!(text.starts_with("Year,Term,Course,Credits,Status,Grade,Required,Retake\n"));
        assert!(text.contains("\"MATH 315 or STAT 360, see note\""));
        assert_eq!(parse_plan_csv(&text).unwrap().courses, plan.courses);
    }

    #[test]
    fn test_write_then_parse_keeps_awkward_names() {
        let mut plan = DegreePlan::default();
        let fall = TermKey::new(1, Term::Fall);
        plan.add_course(fall, Course::new("Intro\nLab", 3.0));
        plan.add_course(fall, Course::new(r#"Topics: "Ethics", Law"#, 3.0));
        plan.add_course(fall, Course::new("HD 101", 1.0).completed("A"));

        let parsed = parse_plan_csv(&write_plan_csv(&plan).unwrap()).unwrap();
        let names: Vec<_> = parsed.term_courses(fall).iter().map(|c| c.name.as_str()).collect();
        assert_eq!(names, vec!["Intro\nLab", r#"Topics: "Ethics", Law"#, "HD 101"]);
        assert_eq!(parsed.courses, plan.courses);
    }

    #[test]
    fn test_zero_credits_survive_round_trip() {
        let mut plan = DegreePlan::default();
        plan.add_course(TermKey::new(2, Term::Spring), Course::new("SEM 101", 0.0));

        let text = write_plan_csv(&plan).unwrap();
        let parsed = parse_plan_csv(&text).unwrap();
        let course = &parsed.term_courses(TermKey::new(2, Term::Spring))[0];
        assert!(course.credits.abs() < f32::EPSILON);
    }

    #[test]
    fn test_blank_or_bad_credits_take_default() {
        assert!((parse_credits(Some("")) - DEFAULT_CREDITS).abs() < f32::EPSILON);
        assert!((parse_credits(Some("four")) - DEFAULT_CREDITS).abs() < f32::EPSILON);
        assert!((parse_credits(None) - DEFAULT_CREDITS).abs() < f32::EPSILON);
        assert!(parse_credits(Some("0")).abs() < f32::EPSILON);
    }
}
