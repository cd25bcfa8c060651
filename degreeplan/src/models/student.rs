use serde::{Deserialize, Serialize};

use super::{FutureCourses, ProgramId};

/// Registro editable del estudiante. El motor nunca lo modifica: sólo recibe
/// copias de `completed_courses` y `planned_courses`.
///
/// Invariante: un código nunca está a la vez en `completed_courses` y en
/// `planned_courses`. Todos los métodos de mutación lo mantienen.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct StudentRecord {
    pub name: String,
    pub email: String,
    pub program: Option<ProgramId>,
    pub expected_graduation: Option<String>,
    pub total_credit_hours: u32,
    pub completed_courses: Vec<String>,
    pub planned_courses: Vec<String>,
    pub future_courses: FutureCourses,
    pub notes: String,
}

impl StudentRecord {
    pub fn new(name: impl Into<String>, program: Option<ProgramId>) -> Self {
        StudentRecord { name: name.into(), program, ..Default::default() }
    }

    pub fn is_completed(&self, code: &str) -> bool {
        self.completed_courses.iter().any(|c| c == code)
    }

    pub fn is_planned(&self, code: &str) -> bool {
        self.planned_courses.iter().any(|c| c == code)
    }

    /// Marca o desmarca un curso como aprobado. Al marcarlo se quita de planificados.
    pub fn toggle_completed(&mut self, code: &str) {
        if self.is_completed(code) {
            self.completed_courses.retain(|c| c != code);
        } else {
            self.completed_courses.push(code.to_string());
            self.planned_courses.retain(|c| c != code);
        }
    }

    /// Marca o desmarca un curso como planificado. Al marcarlo se quita de aprobados.
    pub fn toggle_planned(&mut self, code: &str) {
        if self.is_planned(code) {
            self.planned_courses.retain(|c| c != code);
        } else {
            self.planned_courses.push(code.to_string());
            self.completed_courses.retain(|c| c != code);
        }
    }

    /// Reemplaza el conjunto planificado. Los códigos repetidos se colapsan y los
    /// que estaban aprobados pasan a planificados.
    pub fn set_planned<I, S>(&mut self, codes: I)
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        let mut planned: Vec<String> = Vec::new();
        for code in codes {
            let code = code.into();
            if !planned.contains(&code) {
                planned.push(code);
            }
        }
        self.completed_courses.retain(|c| !planned.contains(c));
        self.planned_courses = planned;
    }

    /// Asigna la lista de cursos de un semestre futuro; una lista vacía lo elimina.
    pub fn set_future_courses(&mut self, semester: &str, codes: Vec<String>) {
        if codes.is_empty() {
            self.future_courses.remove(semester);
        } else {
            self.future_courses.insert(semester.to_string(), codes);
        }
    }

    /// Vuelve al estado inicial, conservando sólo el email (clave de almacenamiento).
    pub fn reset(&mut self) {
        let email = std::mem::take(&mut self.email);
        *self = StudentRecord { email, ..Default::default() };
    }
}
