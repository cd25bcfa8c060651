use std::path::Path;

use chrono::NaiveDate;

use degreeplan::catalog::Catalog;
use degreeplan::models::ProgramId;
use degreeplan::report::{advising_summary, export_csv, import_csv, render_text_report, AdvisingStep};

const EXPORT: &str = "\u{feff}ENGLISH_ADVISING_EXPORT,v1\r
name,Jane Doe\r
program,english\r
expectedGraduation,Spring 2027\r
totalCreditHours,54\r
completedCourses,ENGL 20503;ENGL 20523;ENGL 20533;ENGL 10803\r
plannedCourses,ENGL 30103;ENGL 10803\r
notes,\"Ask about study abroad, and \"\"Sports and American Literature\"\"\"\r
";

fn shipped_catalog() -> Catalog {
    Catalog::load(&Path::new(env!("CARGO_MANIFEST_DIR")).join("src/datafiles")).unwrap()
}

#[test]
fn imported_export_renders_full_report() {
    let catalog = shipped_catalog();
    let record = import_csv(EXPORT).unwrap();
    assert_eq!(record.program, Some(ProgramId::English));
    assert_eq!(record.total_credit_hours, 54);
    assert_eq!(record.planned_courses, vec!["ENGL 30103"]);
    assert_eq!(record.notes, "Ask about study abroad, and \"Sports and American Literature\"");

    let today = NaiveDate::from_ymd_opt(2026, 10, 19).unwrap();
    let report = render_text_report(&catalog, &record, today).unwrap();

    assert!(report.contains("Student: Jane Doe"));
    assert!(report.contains("9 of 33 hours completed (27%) | +3 planned (36% projected)"));
    assert!(report.contains("[x] American Literature  6/6 hrs"));
    assert!(report.contains("    ✓ ENGL 20503  American Writers"));
    assert!(report.contains("    → ENGL 30103  Intro to Literary Theory"));
    assert!(report.contains("Lower-division hours: 9 of 9 max"));
    assert!(report.contains("WARNING: At or over lower-division hour limit"));
    assert!(report.contains("  Spring 2027 (21 hrs)"));
    assert!(report.contains("    English Electives - 12 hrs"));
    assert!(report.contains("Notes & Questions"));
}

#[test]
fn export_survives_reimport() {
    let record = import_csv(EXPORT).unwrap();
    let again = import_csv(&export_csv(&record)).unwrap();
    assert_eq!(again, record);
}

#[test]
fn summary_needs_a_program() {
    let catalog = shipped_catalog();
    let mut record = import_csv(EXPORT).unwrap();
    assert!(advising_summary(&catalog, &record, AdvisingStep::ReviewSummary).is_some());

    record.program = None;
    assert!(advising_summary(&catalog, &record, AdvisingStep::ReviewSummary).is_none());
    assert!(render_text_report(&catalog, &record, NaiveDate::from_ymd_opt(2026, 10, 19).unwrap()).is_none());
}
