//! Reparte las categorías pendientes en los semestres que quedan hasta la graduación.

use std::cmp::Reverse;

use chrono::{Local, NaiveDate};
use tracing::debug;

use super::terms::{next_term_after, Season, Term};
use crate::models::{PlannedCategory, RemainingCategory, SemesterPlan};

/// Tope de semestres generados, incluso con una graduación inválida o pasada.
pub const MAX_PLAN_SEMESTERS: usize = 12;

/// Plan semestral a partir de la fecha local de hoy.
pub fn generate_semester_plan(graduation: &str, remaining: &[RemainingCategory]) -> Vec<SemesterPlan> {
    generate_semester_plan_from(Local::now().date_naive(), graduation, remaining)
}

/// Lectura tolerante de la etiqueta de graduación: la estación y el año se
/// interpretan por separado y cualquiera de los dos puede faltar.
fn parse_graduation(label: &str) -> (Option<Season>, Option<i32>) {
    let mut parts = label.split_whitespace();
    let season = parts.next().and_then(|s| s.parse::<Season>().ok());
    let year = parts.next().and_then(|y| y.parse::<i32>().ok());
    (season, year)
}

/// Semestres Spring/Fall desde el próximo semestre hasta la graduación (inclusive).
pub fn semester_slots(today: NaiveDate, graduation: &str) -> Vec<Term> {
    let (grad_season, grad_year) = parse_graduation(graduation);
    let mut slots = Vec::new();
    let mut slot = next_term_after(today);

    while slots.len() < MAX_PLAN_SEMESTERS {
        slots.push(slot);
        if Some(slot.season) == grad_season && Some(slot.year) == grad_year {
            break;
        }
        slot = slot.next_regular();
        if grad_year.is_some_and(|year| slot.year > year) {
            break;
        }
    }
    slots
}

// Orden por nombre: "prerequisite" primero, luego "junior"/"seminar", luego más horas.
fn priority_key(cat: &RemainingCategory) -> (bool, bool, Reverse<u32>) {
    let name = cat.name.to_lowercase();
    let gateway = name.contains("prerequisite");
    let seminar = name.contains("junior") || name.contains("seminar");
    (!gateway, !seminar, Reverse(cat.hours_needed))
}

/// Igual que `generate_semester_plan` con la fecha inyectada.
///
/// Cada categoría completa va a un solo semestre, en turno rotativo sobre los
/// semestres disponibles; los semestres que quedan vacíos no se devuelven.
pub fn generate_semester_plan_from(
    today: NaiveDate,
    graduation: &str,
    remaining: &[RemainingCategory],
) -> Vec<SemesterPlan> {
    if remaining.is_empty() {
        return Vec::new();
    }

    let slots = semester_slots(today, graduation);
    if slots.is_empty() {
        return Vec::new();
    }

    let mut prioritized: Vec<&RemainingCategory> = remaining.iter().collect();
    prioritized.sort_by_key(|cat| priority_key(cat));

    let mut plan: Vec<SemesterPlan> = slots
        .iter()
        .map(|term| SemesterPlan { semester: term.to_string(), categories: Vec::new() })
        .collect();

    for (i, cat) in prioritized.into_iter().enumerate() {
        plan[i % slots.len()].categories.push(PlannedCategory {
            key: cat.key.clone(),
            name: cat.name.clone(),
            hours_needed: cat.hours_needed,
        });
    }

    plan.retain(|semester| !semester.categories.is_empty());
    debug!(graduation, slots = slots.len(), semesters = plan.len(), "semester plan generated");
    plan
}

#[cfg(test)]
mod tests {
    use super::*;

    fn remaining(key: &str, name: &str, hours_needed: u32) -> RemainingCategory {
        RemainingCategory {
            key: key.into(),
            name: name.into(),
            hours_needed,
            total_required: hours_needed,
            scheduled: 0,
        }
    }

    fn date(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    fn labels(slots: &[Term]) -> Vec<String> {
        slots.iter().map(Term::to_string).collect()
    }

    #[test]
    fn test_slots_stop_at_graduation() {
        let slots = semester_slots(date(2026, 10, 19), "Fall 2028");
        assert_eq!(labels(&slots), vec!["Spring 2027", "Fall 2027", "Spring 2028", "Fall 2028"]);

        let slots = semester_slots(date(2026, 3, 1), "Spring 2027");
        assert_eq!(labels(&slots), vec!["Fall 2026", "Spring 2027"]);
    }

    #[test]
    fn test_slots_past_or_invalid_graduation() {
        // graduación ya pasada: un solo semestre
        assert_eq!(labels(&semester_slots(date(2026, 10, 19), "Spring 2025")), vec!["Spring 2027"]);
        // etiqueta ilegible: tope de seguridad
        assert_eq!(semester_slots(date(2026, 10, 19), "someday").len(), MAX_PLAN_SEMESTERS);
        // verano: se corta cuando el año supera la graduación
        assert_eq!(
            labels(&semester_slots(date(2026, 10, 19), "Summer 2027")),
            vec!["Spring 2027", "Fall 2027"]
        );
    }

    #[test]
    fn test_priority_and_round_robin() {
        let cats = vec![
            remaining("electives", "Writing Electives", 9),
            remaining("rhetoric", "Rhetoric Core", 6),
            remaining("juniorSeminar", "Junior Seminar", 3),
            remaining("professional", "Professional Writing", 3),
            remaining("prerequisites", "Writing Prerequisites", 6),
        ];
        let plan = generate_semester_plan_from(date(2026, 10, 19), "Fall 2027", &cats);

        assert_eq!(plan.len(), 2);
        assert_eq!(plan[0].semester, "Spring 2027");
        let first: Vec<&str> = plan[0].categories.iter().map(|c| c.key.as_str()).collect();
        let second: Vec<&str> = plan[1].categories.iter().map(|c| c.key.as_str()).collect();
        // orden: prerequisites, juniorSeminar, electives (9), rhetoric (6), professional (3)
        assert_eq!(first, vec!["prerequisites", "electives", "professional"]);
        assert_eq!(second, vec!["juniorSeminar", "rhetoric"]);
        assert_eq!(plan[0].total_hours(), 18);
    }

    #[test]
    fn test_empty_inputs_and_trailing_empty_semesters() {
        assert!(generate_semester_plan_from(date(2026, 10, 19), "Fall 2030", &[]).is_empty());

        let cats = vec![remaining("theory", "Literary Theory", 3)];
        let plan = generate_semester_plan_from(date(2026, 10, 19), "Fall 2030", &cats);
        assert_eq!(plan.len(), 1);
        assert_eq!(plan[0].semester, "Spring 2027");
    }
}
