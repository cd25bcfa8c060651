// Estructuras de datos principales: catálogo, programas, prerequisitos y
// los resultados derivados que produce el motor de evaluación.

use std::collections::{BTreeMap, HashSet};
use std::fmt;
use std::str::FromStr;

use indexmap::IndexMap;
use serde::{Deserialize, Serialize};

use crate::error::AdvisingError;

mod student;

pub use student::StudentRecord;

/// Código reservado que marca una categoría de electivos en `programs.json`.
pub const ELECTIVE_WILDCARD_CODE: &str = "ANY";

/// Token reservado que acepta cualquier curso de división inferior.
pub const ANY_LOWER_DIVISION_TOKEN: &str = "@any-lower-div";

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub enum ProgramId {
    #[serde(rename = "english")]
    English,
    #[serde(rename = "writing")]
    Writing,
    #[serde(rename = "creativeWriting")]
    CreativeWriting,
}

impl ProgramId {
    pub const ALL: [ProgramId; 3] = [ProgramId::English, ProgramId::Writing, ProgramId::CreativeWriting];

    pub fn as_str(&self) -> &'static str {
        match self {
            ProgramId::English => "english",
            ProgramId::Writing => "writing",
            ProgramId::CreativeWriting => "creativeWriting",
        }
    }

    /// Prefijo de los nombres de archivo exportados (`English_Plan_...`).
    pub fn export_label(&self) -> &'static str {
        match self {
            ProgramId::English => "English",
            ProgramId::Writing => "Writing",
            ProgramId::CreativeWriting => "CreativeWriting",
        }
    }
}

impl fmt::Display for ProgramId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for ProgramId {
    type Err = AdvisingError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let trimmed = s.trim();
        ProgramId::ALL
            .into_iter()
            .find(|id| id.as_str().eq_ignore_ascii_case(trimmed))
            .ok_or_else(|| AdvisingError::UnknownProgram(trimmed.to_string()))
    }
}

/// Curso del catálogo general del departamento.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CatalogCourse {
    pub code: String,
    pub title: String,
    pub hours: u32,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum CourseLevel {
    Lower,
}

/// Curso tal como aparece listado dentro de una categoría.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ListedCourse {
    pub code: String,
    pub title: String,
    pub hours: u32,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub level: Option<CourseLevel>,
}

impl ListedCourse {
    pub fn is_lower_division(&self) -> bool {
        self.level == Some(CourseLevel::Lower)
    }
}

/// Entrada de la lista de cursos de una categoría: un curso concreto o el
/// comodín de electivos. En JSON el comodín es `{"code": "ANY", ...}`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(from = "ListedCourse", into = "ListedCourse")]
pub enum CourseRef {
    Concrete(ListedCourse),
    ElectiveWildcard,
}

impl From<ListedCourse> for CourseRef {
    fn from(course: ListedCourse) -> Self {
        if course.code.trim() == ELECTIVE_WILDCARD_CODE {
            CourseRef::ElectiveWildcard
        } else {
            CourseRef::Concrete(course)
        }
    }
}

impl From<CourseRef> for ListedCourse {
    fn from(course: CourseRef) -> Self {
        match course {
            CourseRef::Concrete(c) => c,
            CourseRef::ElectiveWildcard => ListedCourse {
                code: ELECTIVE_WILDCARD_CODE.to_string(),
                title: "Any department course".to_string(),
                hours: 3,
                level: None,
            },
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RequirementCategory {
    pub name: String,
    /// Horas requeridas: es un tope, no la suma de los cursos listados.
    pub hours: u32,
    pub courses: Vec<CourseRef>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub note: Option<String>,
}

impl RequirementCategory {
    pub fn is_elective(&self) -> bool {
        self.courses.iter().any(|c| matches!(c, CourseRef::ElectiveWildcard))
    }

    /// Cursos concretos de la categoría (el comodín se omite).
    pub fn listed_courses(&self) -> impl Iterator<Item = &ListedCourse> {
        self.courses.iter().filter_map(|c| match c {
            CourseRef::Concrete(course) => Some(course),
            CourseRef::ElectiveWildcard => None,
        })
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Overlay {
    pub name: String,
    pub hours: u32,
    pub description: String,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Internship {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub course: Option<String>,
    pub description: String,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Contact {
    pub name: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub email: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub url: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Program {
    pub name: String,
    pub description: String,
    pub total_hours: u32,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub max_lower_division: Option<u32>,
    /// Categorías en el orden en que aparecen en el archivo de datos.
    pub requirements: IndexMap<String, RequirementCategory>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub overlays: Vec<Overlay>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub internship: Option<Internship>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub contact: Option<Contact>,
}

impl Program {
    /// Códigos listados en categorías no electivas: nunca cuentan como electivo.
    pub fn claimed_codes(&self) -> HashSet<&str> {
        self.requirements
            .values()
            .filter(|cat| !cat.is_elective())
            .flat_map(|cat| cat.listed_courses())
            .map(|course| course.code.as_str())
            .collect()
    }
}

/// Alternativa dentro de un grupo OR de prerequisitos.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(from = "String", into = "String")]
pub enum RequirementToken {
    Course(String),
    AnyLowerDivision,
}

impl From<String> for RequirementToken {
    fn from(raw: String) -> Self {
        if raw.trim() == ANY_LOWER_DIVISION_TOKEN {
            RequirementToken::AnyLowerDivision
        } else {
            RequirementToken::Course(raw)
        }
    }
}

impl From<RequirementToken> for String {
    fn from(token: RequirementToken) -> Self {
        match token {
            RequirementToken::Course(code) => code,
            RequirementToken::AnyLowerDivision => ANY_LOWER_DIVISION_TOKEN.to_string(),
        }
    }
}

impl fmt::Display for RequirementToken {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            RequirementToken::Course(code) => f.write_str(code),
            RequirementToken::AnyLowerDivision => f.write_str("any 10000- or 20000-level ENGL/WRIT/CRWT course"),
        }
    }
}

/// Grupo de alternativas: basta con que una se cumpla.
pub type OrGroup = Vec<RequirementToken>;

#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct PrerequisiteEntry {
    /// AND de grupos OR. Ausente en entradas sólo administrativas.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub require: Option<Vec<OrGroup>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub note: Option<String>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub recommend: Vec<String>,
}

impl PrerequisiteEntry {
    /// Grupos verificables mecánicamente; vacío en entradas que sólo tienen nota.
    pub fn groups(&self) -> &[OrGroup] {
        self.require.as_deref().unwrap_or(&[])
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct PrerequisiteCheck<'a> {
    pub met: bool,
    pub unmet_groups: Vec<OrGroup>,
    pub entry: Option<&'a PrerequisiteEntry>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CategoryProgress {
    pub name: String,
    pub required: u32,
    pub completed: u32,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DegreeProgress {
    pub total_hours: u32,
    pub completed_hours: u32,
    pub percent: u32,
    pub by_category: IndexMap<String, CategoryProgress>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RemainingCategory {
    pub key: String,
    pub name: String,
    pub hours_needed: u32,
    pub total_required: u32,
    /// Horas ya cubiertas por cursos aprobados o planificados.
    pub scheduled: u32,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PlannedCategory {
    pub key: String,
    pub name: String,
    pub hours_needed: u32,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SemesterPlan {
    pub semester: String,
    pub categories: Vec<PlannedCategory>,
}

impl SemesterPlan {
    pub fn total_hours(&self) -> u32 {
        self.categories.iter().map(|c| c.hours_needed).sum()
    }
}

/// Cursos planificados para semestres futuros, por etiqueta de semestre.
pub type FutureCourses = BTreeMap<String, Vec<String>>;
