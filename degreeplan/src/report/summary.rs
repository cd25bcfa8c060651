use serde::{Deserialize, Serialize};

use crate::algorithm::{compute_progress, compute_projected_progress, get_lower_division_hours};
use crate::catalog::Catalog;
use crate::models::StudentRecord;

/// Paso del asistente de planificación en que se encuentra el estudiante.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum AdvisingStep {
    Welcome,
    Setup,
    Completed,
    Semester,
    Future,
    #[default]
    ReviewSummary,
    ReviewActions,
}

impl AdvisingStep {
    pub fn label(&self) -> &'static str {
        match self {
            AdvisingStep::Welcome => "Welcome",
            AdvisingStep::Setup => "Setup",
            AdvisingStep::Completed => "Marking Completed Courses",
            AdvisingStep::Semester => "Planning Next Semester",
            AdvisingStep::Future => "Reviewing Future Plan",
            AdvisingStep::ReviewSummary => "Reviewing Degree Summary",
            AdvisingStep::ReviewActions => "Saving & Submitting Plan",
        }
    }
}

fn course_list(catalog: &Catalog, codes: &[String]) -> String {
    codes
        .iter()
        .map(|code| match catalog.course_title(code) {
            Some(title) => format!("{code} ({title})"),
            None => code.clone(),
        })
        .collect::<Vec<_>>()
        .join(", ")
}

/// Resumen compacto del estado del estudiante para un asesor (humano o asistente).
/// `None` si todavía no hay programa elegido.
pub fn advising_summary(catalog: &Catalog, record: &StudentRecord, step: AdvisingStep) -> Option<String> {
    let id = record.program?;
    let program = catalog.program(id);
    let completed = &record.completed_courses;
    let planned = &record.planned_courses;

    let mut lines = vec![
        "Wizard: English Department Advising Wizard".to_string(),
        format!("Program: {} ({} hours required)", program.name, program.total_hours),
        format!("Current step: {}", step.label()),
    ];
    if let Some(grad) = record.expected_graduation.as_deref() {
        lines.push(format!("Expected graduation: {grad}"));
    }

    let current = compute_progress(catalog, id, completed);
    lines.push(format!(
        "Completed: {} of {} hours ({}%)",
        current.completed_hours, program.total_hours, current.percent
    ));
    if !completed.is_empty() {
        lines.push(format!("Completed courses: {}", course_list(catalog, completed)));
    }
    if !planned.is_empty() {
        let projected = compute_projected_progress(catalog, id, completed, planned);
        lines.push(format!("Planned for next semester: {}", course_list(catalog, planned)));
        lines.push(format!(
            "Projected total with planned: {} of {} hours",
            projected.completed_hours, program.total_hours
        ));
    }

    // Faltantes según lo ya aprobado (sin contar planificados)
    let still_needed: Vec<String> = current
        .by_category
        .values()
        .filter(|cat| cat.completed < cat.required)
        .map(|cat| format!("{} ({} hrs needed)", cat.name, cat.required - cat.completed))
        .collect();
    if !still_needed.is_empty() {
        lines.push(format!("Still needed: {}", still_needed.join(", ")));
    }

    if let Some(max) = program.max_lower_division.filter(|m| *m > 0) {
        let all: Vec<&String> = completed.iter().chain(planned.iter()).collect();
        let lower = get_lower_division_hours(catalog, &all, id);
        lines.push(format!("Lower-division hours: {lower} of {max} max"));
        if lower >= max {
            lines.push("WARNING: At or over lower-division hour limit".to_string());
        }
    }

    Some(lines.join("\n"))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::catalog::test_support::small_catalog;
    use crate::models::ProgramId;

    #[test]
    fn test_summary_lines() {
        let catalog = small_catalog();
        let mut rec = StudentRecord::new("Jane", Some(ProgramId::English));
        rec.expected_graduation = Some("Spring 2028".into());
        rec.completed_courses = vec!["ENGL 20503".into(), "FAKE 99999".into()];
        rec.planned_courses = vec!["ENGL 30133".into()];

        let text = advising_summary(&catalog, &rec, AdvisingStep::Semester).unwrap();
        let lines: Vec<&str> = text.lines().collect();
        assert_eq!(lines[1], "Program: Test (15 hours required)");
        assert_eq!(lines[2], "Current step: Planning Next Semester");
        assert_eq!(lines[3], "Expected graduation: Spring 2028");
        assert_eq!(lines[4], "Completed: 3 of 15 hours (20%)");
        assert_eq!(lines[5], "Completed courses: ENGL 20503 (Course ENGL 20503), FAKE 99999");
        assert_eq!(lines[7], "Projected total with planned: 6 of 15 hours");
        assert!(text.contains("Still needed: American Literature (3 hrs needed), Literary Theory (3 hrs needed), Electives (6 hrs needed)"));
        assert!(text.contains("Lower-division hours: 3 of 6 max"));
        assert!(!text.contains("WARNING"));
    }

    #[test]
    fn test_summary_requires_program() {
        let catalog = small_catalog();
        assert!(advising_summary(&catalog, &StudentRecord::default(), AdvisingStep::Welcome).is_none());
    }
}
