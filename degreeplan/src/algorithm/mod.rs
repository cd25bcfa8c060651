// Motor de evaluación: funciones puras sobre el catálogo y listas de códigos.
// Ninguna función de este módulo hace I/O ni falla con entradas válidas.

mod planner;
mod prereqs;
mod progress;
mod remaining;
pub mod terms;

pub use planner::{generate_semester_plan, generate_semester_plan_from, semester_slots, MAX_PLAN_SEMESTERS};
pub use prereqs::check_prerequisites;
pub use progress::{compute_progress, compute_projected_progress, get_lower_division_hours};
pub use remaining::get_remaining_categories;
pub use terms::{graduation_terms, next_term_after, Season, Term};
