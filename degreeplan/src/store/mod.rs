//! Persistencia de registros de estudiantes en un archivo JSON (arreglo de registros).
//!
//! La clave es el email, sin distinguir mayúsculas. Cada escritura reescribe el
//! archivo completo a través de un temporal en el mismo directorio que luego se
//! renombra, así un lector nunca ve un archivo a medio escribir.
//!
//! En lectura, un archivo ausente, vacío o corrupto se lee como vacío. En
//! escritura, un archivo corrupto es un error y no se toca. Los registros que
//! no se pueden interpretar (p. ej. un programa que ya no existe) se omiten al
//! leer pero se conservan tal cual al reescribir.

use std::fs;
use std::io::Write;
use std::path::{Path, PathBuf};
use std::sync::{Mutex, PoisonError};

use serde_json::Value;
use tempfile::NamedTempFile;
use tracing::{info, warn};

use crate::error::{AdvisingError, Result};
use crate::models::StudentRecord;

pub const DEFAULT_STUDENTS_FILE: &str = "data/students.json";

#[derive(Debug)]
pub struct StudentStore {
    path: PathBuf,
    // lectura-modificación-escritura de a una
    write_lock: Mutex<()>,
}

fn same_email(a: &str, b: &str) -> bool {
    a.trim().eq_ignore_ascii_case(b.trim())
}

fn raw_email(value: &Value) -> Option<&str> {
    value.get("email").and_then(Value::as_str)
}

impl StudentStore {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        StudentStore { path: path.into(), write_lock: Mutex::new(()) }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Contenido crudo del archivo. Ausente o vacío es `[]`; JSON inválido es error.
    fn read_raw(&self) -> Result<Vec<Value>> {
        let contents = match fs::read_to_string(&self.path) {
            Ok(c) => c,
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => return Ok(Vec::new()),
            Err(e) => return Err(AdvisingError::io(&self.path, e)),
        };
        if contents.trim().is_empty() {
            return Ok(Vec::new());
        }
        serde_json::from_str(&contents).map_err(|e| AdvisingError::json(self.path.display().to_string(), e))
    }

    pub fn load_all(&self) -> Result<Vec<StudentRecord>> {
        let raw = match self.read_raw() {
            Ok(raw) => raw,
            Err(AdvisingError::Json { source, .. }) => {
                warn!(path = %self.path.display(), error = %source, "students file unreadable, reading as empty");
                return Ok(Vec::new());
            }
            Err(e) => return Err(e),
        };
        Ok(raw
            .into_iter()
            .filter_map(|value| match serde_json::from_value::<StudentRecord>(value.clone()) {
                Ok(record) => Some(record),
                Err(e) => {
                    warn!(email = raw_email(&value).unwrap_or("?"), error = %e, "skipping unreadable student record");
                    None
                }
            })
            .collect())
    }

    pub fn get(&self, email: &str) -> Result<Option<StudentRecord>> {
        Ok(self.load_all()?.into_iter().find(|r| same_email(&r.email, email)))
    }

    /// Inserta o reemplaza el registro con el mismo email. Devuelve la cantidad total.
    pub fn upsert(&self, record: StudentRecord) -> Result<usize> {
        if record.email.trim().is_empty() {
            return Err(AdvisingError::Validation("email is required".to_string()));
        }
        let _guard = self.write_lock.lock().unwrap_or_else(PoisonError::into_inner);
        let mut raw = self.read_raw()?;
        raw.retain(|v| !raw_email(v).is_some_and(|e| same_email(e, &record.email)));
        let value = serde_json::to_value(&record).map_err(|e| AdvisingError::json(record.email.clone(), e))?;
        raw.push(value);
        self.write_all(&raw)?;
        info!(email = %record.email, "student record saved");
        Ok(raw.len())
    }

    /// Elimina el registro; `false` si no existía.
    pub fn remove(&self, email: &str) -> Result<bool> {
        let _guard = self.write_lock.lock().unwrap_or_else(PoisonError::into_inner);
        let mut raw = self.read_raw()?;
        let before = raw.len();
        raw.retain(|v| !raw_email(v).is_some_and(|e| same_email(e, email)));
        if raw.len() == before {
            return Ok(false);
        }
        self.write_all(&raw)?;
        info!(email, "student record removed");
        Ok(true)
    }

    fn write_all(&self, records: &[Value]) -> Result<()> {
        let dir = match self.path.parent().filter(|p| !p.as_os_str().is_empty()) {
            Some(parent) => {
                fs::create_dir_all(parent).map_err(|e| AdvisingError::io(parent, e))?;
                parent
            }
            None => Path::new("."),
        };
        let json = serde_json::to_string_pretty(records)
            .map_err(|e| AdvisingError::json(self.path.display().to_string(), e))?;

        let mut tmp = NamedTempFile::new_in(dir).map_err(|e| AdvisingError::io(dir, e))?;
        tmp.write_all(json.as_bytes()).map_err(|e| AdvisingError::io(dir, e))?;
        tmp.persist(&self.path).map_err(|e| AdvisingError::io(&self.path, e.error))?;
        Ok(())
    }
}
