use super::progress::compute_projected_progress;
use crate::catalog::Catalog;
use crate::models::{ProgramId, RemainingCategory};

/// Categorías que todavía faltan por programar, según el avance proyectado
/// (aprobados + planificados). Las categorías completas no aparecen.
pub fn get_remaining_categories<S: AsRef<str>>(
    catalog: &Catalog,
    id: ProgramId,
    completed: &[S],
    planned: &[S],
) -> Vec<RemainingCategory> {
    let projected = compute_projected_progress(catalog, id, completed, planned);

    projected
        .by_category
        .into_iter()
        .filter(|(_, cat)| cat.completed < cat.required)
        .map(|(key, cat)| RemainingCategory {
            key,
            name: cat.name,
            hours_needed: cat.required - cat.completed,
            total_required: cat.required,
            scheduled: cat.completed,
        })
        .collect()
}
