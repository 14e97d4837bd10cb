//! Property tests for the grade and requirement engine

use proptest::prelude::*;
use virtual_counselor::engine::models::{Course, CourseStatus, DegreePlan, GradeCategory, UcoreTags};
use virtual_counselor::engine::requirements::{extract_allowed_courses, extract_ucore_categories};
use virtual_counselor::engine::{
    compute_gpa, credits_achieved, credits_planned, current_grade, letter_grade, needed_score,
    overlap_summary, total_credits, GradeScale, LetterGrade, ThresholdPreset,
};

const STATUSES: [CourseStatus; 5] = [
    CourseStatus::NotTaken,
    CourseStatus::InProgress,
    CourseStatus::Completed,
    CourseStatus::Planned,
    CourseStatus::Failed,
];

fn graded_course() -> impl Strategy<Value = (usize, f32)> {
    (0..LetterGrade::RANKED.len(), 1u8..=5).prop_map(|(rank, credits)| (rank, f32::from(credits)))
}

fn courses_from(spec: &[(usize, f32)]) -> Vec<Course> {
    spec.iter()
        .enumerate()
        .map(|(i, (rank, credits))| {
            Course::new(format!("CPTS {}", 100 + i), *credits)
                .completed(LetterGrade::RANKED[*rank].as_str())
        })
        .collect()
}

proptest! {
    #[test]
    fn prop_gpa_monotone_under_grade_improvement(
        spec in prop::collection::vec(graded_course(), 1..12),
        pick in any::<prop::sample::Index>(),
        no_d_minus in any::<bool>(),
    ) {
        let scale = if no_d_minus { GradeScale::NoDMinus } else { GradeScale::Standard };
        let before = compute_gpa(&courses_from(&spec), scale);

        let mut improved = spec.clone();
        let idx = pick.index(improved.len());
        improved[idx].0 = improved[idx].0.saturating_sub(1);
        let after = compute_gpa(&courses_from(&improved), scale);

        prop_assert!(after >= before - 1e-12, "{after} < {before}");
        prop_assert!((0.0..=4.0).contains(&after));
    }

    #[test]
    fn prop_achieved_and_planned_are_disjoint(
        spec in prop::collection::vec((0..STATUSES.len(), 0u8..=5), 0..20),
    ) {
        let courses: Vec<Course> = spec
            .iter()
            .map(|(s, c)| Course::new("X 100", f32::from(*c)).with_status(STATUSES[*s]))
            .collect();

        let achieved = credits_achieved(&courses);
        let planned = credits_planned(&courses);
        prop_assert!(achieved + planned <= total_credits(&courses) + f32::EPSILON);
        for course in &courses {
            prop_assert!(!(course.is_completed() && course.is_pending()));
        }
    }

    #[test]
    fn prop_letter_grade_is_total_and_monotone(a in -50.0..150.0f64, b in -50.0..150.0f64) {
        let (lo, hi) = if a <= b { (a, b) } else { (b, a) };
        let rank = |g: LetterGrade| LetterGrade::RANKED.iter().position(|r| *r == g);
        let lo_rank = rank(letter_grade(lo));
        let hi_rank = rank(letter_grade(hi));
        prop_assert!(lo_rank.is_some() && hi_rank.is_some());
        prop_assert!(hi_rank <= lo_rank);
    }

    #[test]
    fn prop_ucore_extraction_is_idempotent(tags in prop::collection::vec("WRTG|QUAN|ARTS|ROOT|HUM|XYZ", 0..6)) {
        let name = format!("COURSE 101 {}", tags.iter().map(|t| format!("[{t}]")).collect::<String>());
        let course = Course::new(name, 3.0).with_ucore(UcoreTags::Text(tags.join(",")));

        let first = extract_ucore_categories(&course);
        prop_assert_eq!(&first, &extract_ucore_categories(&course));
        for (i, cat) in first.iter().enumerate() {
            prop_assert!(!first[i + 1..].contains(cat));
        }
    }

    #[test]
    fn prop_current_grade_bounded_by_weight_used(
        cats in prop::collection::vec((1.0..50.0f64, 0.0..=1.0f64, prop::bool::ANY), 0..6),
    ) {
        let categories: Vec<GradeCategory> = cats
            .iter()
            .enumerate()
            .map(|(i, (weight, ratio, graded))| {
                let cat = GradeCategory::new(format!("C{i}"), *weight);
                if *graded { cat.graded(ratio * 20.0, 20.0) } else { cat }
            })
            .collect();

        match current_grade(&categories) {
            None => prop_assert!(categories.iter().all(|c| !c.is_graded())),
            Some(grade) => {
                let used: f64 = categories.iter().filter(|c| c.is_graded()).map(|c| c.weight).sum();
                prop_assert!(grade >= 0.0 && grade <= used + 1e-9);
            }
        }
    }
}

#[test]
fn empty_inputs_give_sentinels() {
    assert!(compute_gpa(&[], GradeScale::Standard).abs() < f64::EPSILON);
    assert!(compute_gpa(&[Course::new("CPTS 121", 4.0)], GradeScale::Standard).abs() < f64::EPSILON);
    assert_eq!(current_grade(&[]), None);
}

#[test]
fn weighted_example_needs_an_unreachable_score() {
    let categories = vec![
        GradeCategory::new("Homework", 20.0).graded(18.0, 20.0),
        GradeCategory::new("Quizzes", 10.0).graded(9.0, 10.0),
        GradeCategory::new("Final", 40.0),
        GradeCategory::new("Project", 30.0),
    ];
    let current = current_grade(&categories).unwrap();
    assert!((current - 27.0).abs() < 1e-9);

    let needed = needed_score(&categories, "B", 2, ThresholdPreset::Standard).unwrap();
    assert!((needed.needed_percentage - 140.0).abs() < 1e-9);
    assert!(needed.is_unreachable());
}

#[test]
fn enumerated_list_shares_prefix() {
    let courses = extract_allowed_courses("CPT S 321, 323, 422");
    let codes: Vec<&str> = courses.iter().map(|c| c.code()).collect();
    assert_eq!(codes, vec!["CPT S 321", "CPT S 323", "CPT S 422"]);
}

#[test]
fn overlap_summary_requires_additional_major() {
    let mut plan = DegreePlan::new("Computer Science");
    plan.minors.push("Mathematics".to_string());
    assert_eq!(overlap_summary(&plan, &[Course::new("ENGLISH 101 [WRTG]", 3.0)]), None);
}
