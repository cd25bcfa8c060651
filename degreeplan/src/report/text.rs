use std::fmt::Write as _;

use chrono::NaiveDate;

use crate::algorithm::{
    compute_progress, compute_projected_progress, generate_semester_plan_from, get_lower_division_hours,
    get_remaining_categories,
};
use crate::catalog::Catalog;
use crate::models::StudentRecord;

const BAR_WIDTH: usize = 30;
const RULE: &str = "------------------------------------------------------------";

fn progress_bar(percent: u32, projected: u32) -> String {
    let done = (percent.min(100) as usize * BAR_WIDTH) / 100;
    let planned = (projected.min(100) as usize * BAR_WIDTH) / 100;
    let planned = planned.max(done);
    format!("[{}{}{}]", "#".repeat(done), "+".repeat(planned - done), ".".repeat(BAR_WIDTH - planned))
}

/// Reporte de asesoría en texto plano. `None` si el estudiante no eligió programa.
///
/// `today` se usa para la fecha del reporte y para el plan semestral.
pub fn render_text_report(catalog: &Catalog, record: &StudentRecord, today: NaiveDate) -> Option<String> {
    let id = record.program?;
    let program = catalog.program(id);
    let completed = &record.completed_courses;
    let planned = &record.planned_courses;

    let current = compute_progress(catalog, id, completed);
    let projected = compute_projected_progress(catalog, id, completed, planned);
    let date = today.format("%B %-d, %Y").to_string();

    let mut out = String::new();
    let _ = writeln!(out, "English Department");
    let _ = writeln!(out, "{} - Advising Report", program.name);
    let _ = writeln!(out, "{RULE}");
    if !record.name.is_empty() {
        let _ = writeln!(out, "Student: {}", record.name);
    }
    if let Some(grad) = record.expected_graduation.as_deref() {
        let _ = writeln!(out, "Expected Graduation: {grad}");
    }
    let _ = writeln!(out, "Date: {date}");
    let _ = writeln!(out);

    // Avance general
    let _ = writeln!(out, "Overall Progress");
    let _ = writeln!(out, "{}", progress_bar(current.percent, projected.percent));
    let planned_hours = projected.completed_hours.saturating_sub(current.completed_hours);
    let _ = write!(
        out,
        "{} of {} hours completed ({}%)",
        current.completed_hours, projected.total_hours, current.percent
    );
    if planned_hours > 0 {
        let _ = write!(out, " | +{planned_hours} planned ({}% projected)", projected.percent);
    }
    let _ = writeln!(out);
    let _ = writeln!(out);

    let _ = writeln!(out, "Requirements by Category");
    for (key, category) in &program.requirements {
        let done = current.by_category.get(key).map_or(0, |c| c.completed);
        let proj = projected.by_category.get(key).map_or(0, |c| c.completed);
        let marker = if proj >= category.hours { "[x]" } else { "[ ]" };
        let mut status = format!("{done}/{} hrs", category.hours);
        if proj > done {
            let _ = write!(status, " +{} planned", proj - done);
        }
        let _ = writeln!(out, "{marker} {}  {status}", category.name);

        if category.is_elective() {
            let _ = writeln!(out, "      Elective courses from department catalog");
            continue;
        }
        let mut listed_any = false;
        for course in category.listed_courses().filter(|c| completed.contains(&c.code)) {
            let _ = writeln!(out, "    ✓ {}  {}", course.code, course.title);
            listed_any = true;
        }
        for course in category.listed_courses().filter(|c| planned.contains(&c.code)) {
            let _ = writeln!(out, "    → {}  {}", course.code, course.title);
            listed_any = true;
        }
        if !listed_any {
            let _ = writeln!(out, "      No courses selected");
        }
    }

    if let Some(max) = program.max_lower_division {
        let all: Vec<&String> = completed.iter().chain(planned.iter()).collect();
        let lower = get_lower_division_hours(catalog, &all, id);
        let _ = writeln!(out);
        let _ = writeln!(out, "Lower-division hours: {lower} of {max} max");
        if lower >= max {
            let _ = writeln!(out, "WARNING: At or over lower-division hour limit");
        }
    }

    if let Some(grad) = record.expected_graduation.as_deref() {
        let remaining = get_remaining_categories(catalog, id, completed, planned);
        let plan = generate_semester_plan_from(today, grad, &remaining);
        if !plan.is_empty() {
            let _ = writeln!(out);
            let _ = writeln!(out, "Suggested Semester Plan");
            for semester in &plan {
                let _ = writeln!(out, "  {} ({} hrs)", semester.semester, semester.total_hours());
                for cat in &semester.categories {
                    let _ = writeln!(out, "    {} - {} hrs", cat.name, cat.hours_needed);
                }
            }
        }
    }

    if !record.notes.is_empty() {
        let _ = writeln!(out);
        let _ = writeln!(out, "Notes & Questions");
        for line in record.notes.lines() {
            let _ = writeln!(out, "  {line}");
        }
    }

    let _ = writeln!(out);
    let _ = writeln!(out, "{RULE}");
    let _ = writeln!(
        out,
        "Generated {date}. For planning purposes only. Use the official degree audit for degree certification."
    );
    Some(out)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::catalog::test_support::small_catalog;
    use crate::models::ProgramId;

    #[test]
    fn test_progress_bar() {
        assert_eq!(progress_bar(0, 0), format!("[{}]", ".".repeat(BAR_WIDTH)));
        assert_eq!(progress_bar(50, 50).matches('#').count(), 15);
        let bar = progress_bar(20, 40);
        assert_eq!(bar.matches('#').count(), 6);
        assert_eq!(bar.matches('+').count(), 6);
    }

    #[test]
    fn test_report_sections() {
        let catalog = small_catalog();
        let mut rec = StudentRecord::new("Jane Doe", Some(ProgramId::English));
        rec.expected_graduation = Some("Fall 2027".into());
        rec.completed_courses = vec!["ENGL 20503".into(), "ENGL 20523".into()];
        rec.planned_courses = vec!["ENGL 30103".into()];
        rec.notes = "Ask about study abroad".into();

        let today = NaiveDate::from_ymd_opt(2026, 10, 19).unwrap();
        let report = render_text_report(&catalog, &rec, today).unwrap();

        assert!(report.contains("Student: Jane Doe"));
        assert!(report.contains("Date: October 19, 2026"));
        assert!(report.contains("6 of 15 hours completed (40%) | +3 planned (60% projected)"));
        assert!(report.contains("[x] American Literature  6/6 hrs"));
        assert!(report.contains("[x] Literary Theory  0/3 hrs +3 planned"));
        assert!(report.contains("    ✓ ENGL 20503  Course ENGL 20503"));
        assert!(report.contains("    → ENGL 30103  Course ENGL 30103"));
        assert!(report.contains("Elective courses from department catalog"));
        assert!(report.contains("Lower-division hours: 6 of 6 max"));
        assert!(report.contains("WARNING: At or over lower-division hour limit"));
        assert!(report.contains("  Spring 2027 (6 hrs)"));
        assert!(report.contains("  Ask about study abroad"));
    }

    #[test]
    fn test_no_program_no_report() {
        let catalog = small_catalog();
        let today = NaiveDate::from_ymd_opt(2026, 10, 19).unwrap();
        assert!(render_text_report(&catalog, &StudentRecord::default(), today).is_none());
    }
}
