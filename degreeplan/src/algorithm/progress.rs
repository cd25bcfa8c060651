// Cálculo de avance por categoría y total del programa.

use std::collections::HashSet;

use indexmap::IndexMap;
use tracing::trace;

use crate::catalog::Catalog;
use crate::models::{CategoryProgress, DegreeProgress, ProgramId};

pub(crate) fn code_set<S: AsRef<str>>(codes: &[S]) -> HashSet<&str> {
    codes.iter().map(AsRef::as_ref).collect()
}

/// Avance del estudiante en el programa `id` con los cursos `completed`.
///
/// - Categorías normales: suma de horas de los cursos listados que aparecen en la entrada.
/// - Categoría electiva: horas de catálogo de los cursos de la entrada que no están
///   listados en ninguna categoría normal (códigos desconocidos suman 0).
/// - Cada categoría se trunca a sus horas requeridas y el total es la suma de
///   los valores truncados.
///
/// Los códigos repetidos en la entrada cuentan una sola vez.
/// Precondición: `id` existe en el catálogo.
pub fn compute_progress<S: AsRef<str>>(catalog: &Catalog, id: ProgramId, completed: &[S]) -> DegreeProgress {
    let taken = code_set(completed);
    compute_progress_for_set(catalog, id, &taken)
}

pub(crate) fn compute_progress_for_set(catalog: &Catalog, id: ProgramId, taken: &HashSet<&str>) -> DegreeProgress {
    let program = catalog.program(id);
    let claimed = program.claimed_codes();

    let mut by_category = IndexMap::with_capacity(program.requirements.len());
    let mut completed_hours = 0;

    for (key, category) in &program.requirements {
        let raw: u32 = if category.is_elective() {
            taken
                .iter()
                .filter(|code| !claimed.contains(**code))
                .map(|code| catalog.course_hours(code))
                .sum()
        } else {
            category
                .listed_courses()
                .filter(|course| taken.contains(course.code.as_str()))
                .map(|course| course.hours)
                .sum()
        };

        let capped = raw.min(category.hours);
        trace!(program = %id, category = %key, raw, capped, "category hours");
        by_category.insert(
            key.clone(),
            CategoryProgress { name: category.name.clone(), required: category.hours, completed: capped },
        );
        completed_hours += capped;
    }

    let total_hours = program.total_hours;
    let percent = if total_hours > 0 {
        (f64::from(completed_hours) / f64::from(total_hours) * 100.0).round() as u32
    } else {
        0
    };

    DegreeProgress { total_hours, completed_hours, percent, by_category }
}

/// Avance si además se aprobaran los cursos planificados: `compute_progress`
/// sobre la unión de ambas listas (un curso en las dos cuenta una vez).
pub fn compute_projected_progress<S: AsRef<str>>(
    catalog: &Catalog,
    id: ProgramId,
    completed: &[S],
    planned: &[S],
) -> DegreeProgress {
    let mut taken = code_set(completed);
    taken.extend(planned.iter().map(AsRef::as_ref));
    compute_progress_for_set(catalog, id, &taken)
}

/// Horas de división inferior: cursos marcados `lower` en cualquier categoría del
/// programa que aparecen en la entrada, contando cada código una sola vez.
pub fn get_lower_division_hours<S: AsRef<str>>(catalog: &Catalog, codes: &[S], id: ProgramId) -> u32 {
    let taken = code_set(codes);
    let mut counted: HashSet<&str> = HashSet::new();
    let mut hours = 0;

    for category in catalog.program(id).requirements.values() {
        for course in category.listed_courses() {
            if course.is_lower_division()
                && taken.contains(course.code.as_str())
                && counted.insert(course.code.as_str())
            {
                hours += course.hours;
            }
        }
    }
    hours
}
