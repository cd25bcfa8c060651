//! Datos estáticos: catálogo de cursos, programas y tabla de prerequisitos.
//!
//! Se cargan una vez al inicio (`Catalog::load`), se validan y quedan
//! inmutables durante toda la vida del proceso.

use std::collections::{HashMap, HashSet};
use std::path::Path;

use indexmap::IndexMap;
use tracing::{info, warn};

use crate::error::{AdvisingError, Result};
use crate::models::{CatalogCourse, PrerequisiteEntry, Program, ProgramId, RequirementCategory};

pub mod cache;
pub mod codes;
pub mod derive;
pub mod import;
pub mod io;

pub use cache::{init_shared, shared};
pub use io::{get_datafiles_dir, resolve_datafiles_dir};

#[derive(Debug, Clone)]
pub struct Catalog {
    courses: Vec<CatalogCourse>,
    course_index: HashMap<String, usize>,
    programs: HashMap<ProgramId, Program>,
    prerequisites: HashMap<String, PrerequisiteEntry>,
}

impl Catalog {
    /// Construye el catálogo sin validar (tests y uso embebido).
    pub fn from_parts(
        courses: Vec<CatalogCourse>,
        programs: HashMap<ProgramId, Program>,
        prerequisites: HashMap<String, PrerequisiteEntry>,
    ) -> Self {
        let mut course_index = HashMap::with_capacity(courses.len());
        for (i, course) in courses.iter().enumerate() {
            // primera aparición gana; `validate` reporta los duplicados
            course_index.entry(course.code.clone()).or_insert(i);
        }
        Catalog { courses, course_index, programs, prerequisites }
    }

    /// Lee `courses.json`, `programs.json` y `prerequisites.json` desde `dir` y valida.
    pub fn load(dir: &Path) -> Result<Self> {
        let courses: Vec<CatalogCourse> = io::read_json(&dir.join(io::COURSES_FILE))?;
        let raw_programs: IndexMap<String, Program> = io::read_json(&dir.join(io::PROGRAMS_FILE))?;
        let prerequisites: HashMap<String, PrerequisiteEntry> =
            io::read_json(&dir.join(io::PREREQUISITES_FILE))?;

        let mut programs = HashMap::with_capacity(raw_programs.len());
        for (key, program) in raw_programs {
            let id: ProgramId = key.parse()?;
            // "english" y "English" resuelven al mismo programa
            if programs.insert(id, program).is_some() {
                return Err(AdvisingError::Validation(format!("program `{id}` defined twice (key `{key}`)")));
            }
        }

        let catalog = Catalog::from_parts(courses, programs, prerequisites);
        catalog.validate()?;
        info!(
            dir = %dir.display(),
            courses = catalog.courses.len(),
            programs = catalog.programs.len(),
            prerequisites = catalog.prerequisites.len(),
            "catalog loaded"
        );
        Ok(catalog)
    }

    /// Chequeos fail-fast sobre los datos cargados.
    pub fn validate(&self) -> Result<()> {
        for id in ProgramId::ALL {
            if !self.programs.contains_key(&id) {
                return Err(AdvisingError::Validation(format!("program `{id}` missing from programs data")));
            }
        }

        let mut seen = HashSet::with_capacity(self.courses.len());
        for course in &self.courses {
            if !codes::is_valid_code(&course.code) {
                return Err(AdvisingError::Validation(format!("malformed course code `{}`", course.code)));
            }
            if !seen.insert(course.code.as_str()) {
                return Err(AdvisingError::Validation(format!("duplicate course code `{}`", course.code)));
            }
        }

        for id in ProgramId::ALL {
            let program = self.program(id);
            let electives = program.requirements.values().filter(|c| c.is_elective()).count();
            if electives > 1 {
                warn!(program = %id, electives, "more than one elective category; hours may be counted twice");
            }
            for (key, category) in &program.requirements {
                for course in category.listed_courses() {
                    if !codes::is_valid_code(&course.code) {
                        return Err(AdvisingError::Validation(format!(
                            "malformed course code `{}` in {id}.{key}",
                            course.code
                        )));
                    }
                    if self.course(&course.code).is_none() {
                        warn!(program = %id, category = %key, code = %course.code, "listed course not in catalog");
                    }
                }
            }
        }
        Ok(())
    }

    pub fn courses(&self) -> &[CatalogCourse] {
        &self.courses
    }

    pub fn course(&self, code: &str) -> Option<&CatalogCourse> {
        self.course_index.get(code).map(|&i| &self.courses[i])
    }

    pub fn course_title(&self, code: &str) -> Option<&str> {
        self.course(code).map(|c| c.title.as_str())
    }

    /// Horas de catálogo del curso; 0 si el código no existe.
    pub fn course_hours(&self, code: &str) -> u32 {
        self.course(code).map_or(0, |c| c.hours)
    }

    /// Precondición: `id` está cargado. `load` lo garantiza para todo `ProgramId`;
    /// con `from_parts` un programa ausente hace panic.
    pub fn program(&self, id: ProgramId) -> &Program {
        &self.programs[&id]
    }

    /// Programas en el orden de `ProgramId::ALL`, omitiendo los que no se cargaron.
    pub fn programs(&self) -> Vec<(ProgramId, &Program)> {
        ProgramId::ALL
            .into_iter()
            .filter_map(|id| self.programs.get(&id).map(|p| (id, p)))
            .collect()
    }

    pub fn categories(&self, id: ProgramId) -> impl Iterator<Item = (&str, &RequirementCategory)> {
        self.program(id).requirements.iter().map(|(k, c)| (k.as_str(), c))
    }

    pub fn prerequisites(&self, code: &str) -> Option<&PrerequisiteEntry> {
        self.prerequisites.get(code)
    }

    pub fn prerequisite_table(&self) -> &HashMap<String, PrerequisiteEntry> {
        &self.prerequisites
    }

    /// Cursos del catálogo que cuentan como electivo en el programa: todos los
    /// que no están listados en una categoría no electiva.
    pub fn elective_courses(&self, id: ProgramId) -> Vec<&CatalogCourse> {
        let claimed = self.program(id).claimed_codes();
        self.courses.iter().filter(|c| !claimed.contains(c.code.as_str())).collect()
    }
}


#[cfg(test)]
mod tests {
    use super::test_support::*;
    use super::*;

    #[test]
    fn test_small_catalog_validates() {
        small_catalog().validate().unwrap();
    }

    #[test]
    fn test_lookups() {
        let catalog = small_catalog();
        assert_eq!(catalog.course_hours("ENGL 40001"), 1);
        assert_eq!(catalog.course_hours("FAKE 99999"), 0);
        assert_eq!(catalog.course_title("ENGL 30133"), Some("Course ENGL 30133"));
        assert!(catalog.prerequisites("ENGL 30143").is_none());
        let keys: Vec<&str> = catalog.categories(ProgramId::English).map(|(k, _)| k).collect();
        assert_eq!(keys, vec!["americanLit", "theory", "electives"]);
        let ids: Vec<ProgramId> = catalog.programs().into_iter().map(|(id, _)| id).collect();
        assert_eq!(ids, ProgramId::ALL.to_vec());
    }

    #[test]
    fn test_elective_courses_exclude_claimed() {
        let catalog = small_catalog();
        let electives: Vec<&str> =
            catalog.elective_courses(ProgramId::English).iter().map(|c| c.code.as_str()).collect();
        assert!(!electives.contains(&"ENGL 20503"));
        assert!(!electives.contains(&"ENGL 30103"));
        assert!(electives.contains(&"ENGL 30143"));
        assert!(electives.contains(&"CRWT 10203"));
    }

    #[test]
    fn test_validate_rejects_duplicates_and_bad_codes() {
        let base = small_catalog();
        let mut courses = base.courses().to_vec();
        courses.push(course("ENGL 30133", 3));
        let dup = Catalog::from_parts(courses, base.programs.clone(), HashMap::new());
        assert!(matches!(dup.validate(), Err(AdvisingError::Validation(msg)) if msg.contains("duplicate")));

        let mut courses = base.courses().to_vec();
        courses.push(course("ENGL3013", 3));
        let bad = Catalog::from_parts(courses, base.programs.clone(), HashMap::new());
        assert!(matches!(bad.validate(), Err(AdvisingError::Validation(msg)) if msg.contains("malformed")));
    }

    #[test]
    fn test_validate_requires_every_program() {
        let base = small_catalog();
        let mut programs = base.programs.clone();
        programs.remove(&ProgramId::Writing);
        let catalog = Catalog::from_parts(base.courses().to_vec(), programs, HashMap::new());
        assert!(catalog.validate().is_err());
    }

    #[test]
    fn test_load_rejects_program_defined_twice() {
        let shipped = Path::new(env!("CARGO_MANIFEST_DIR")).join(io::DATAFILES_DIR);
        let dir = tempfile::tempdir().unwrap();
        for file in [io::COURSES_FILE, io::PREREQUISITES_FILE] {
            std::fs::copy(shipped.join(file), dir.path().join(file)).unwrap();
        }
        let mut programs: serde_json::Map<String, serde_json::Value> =
            io::read_json(&shipped.join(io::PROGRAMS_FILE)).unwrap();
        let english = programs["english"].clone();
        programs.insert("English".to_string(), english);
        std::fs::write(dir.path().join(io::PROGRAMS_FILE), serde_json::to_string(&programs).unwrap()).unwrap();

        let err = Catalog::load(dir.path()).unwrap_err();
        assert!(matches!(err, AdvisingError::Validation(msg) if msg.contains("defined twice")));
        assert!(Catalog::load(&shipped).is_ok());
    }
}
