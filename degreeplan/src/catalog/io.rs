// Lectura de los archivos JSON del catálogo y resolución del directorio de datos.

use std::fs;
use std::path::{Path, PathBuf};

use serde::de::DeserializeOwned;
use tracing::{debug, info};

use crate::error::{AdvisingError, Result};

pub const DATAFILES_DIR: &str = "src/datafiles";
pub const DATA_DIR_ENV: &str = "ADVISING_DATA_DIR";

pub const COURSES_FILE: &str = "courses.json";
pub const PROGRAMS_FILE: &str = "programs.json";
pub const PREREQUISITES_FILE: &str = "prerequisites.json";

/// Busca el directorio de datafiles.
///
/// Orden: variable `ADVISING_DATA_DIR` (si existe), candidatos desde el CWD,
/// candidatos relativos al ejecutable y finalmente `src/datafiles` tal cual.
pub fn get_datafiles_dir() -> PathBuf {
    resolve_datafiles_dir(std::env::var(DATA_DIR_ENV).ok().as_deref())
}

/// Igual que `get_datafiles_dir` pero con el override explícito (CLI o config).
pub fn resolve_datafiles_dir(override_dir: Option<&str>) -> PathBuf {
    // Opción 1: override explícito / variable de entorno
    if let Some(path) = override_dir.filter(|p| !p.trim().is_empty()) {
        let p = PathBuf::from(path);
        if p.exists() {
            info!(dir = %p.display(), "using configured datafiles dir");
            return p;
        }
        debug!(dir = %p.display(), "configured datafiles dir does not exist, searching");
    }

    // Opción 2: desde el directorio de trabajo actual
    let cwd = std::env::current_dir().unwrap_or_else(|_| PathBuf::from("."));
    let candidates_from_cwd = [
        cwd.join("degreeplan/src/datafiles"),
        cwd.join(DATAFILES_DIR),
        cwd.join("datafiles"),
    ];
    if let Some(found) = candidates_from_cwd.into_iter().find(|c| c.join(PROGRAMS_FILE).exists()) {
        debug!(dir = %found.display(), "datafiles found from cwd");
        return found;
    }

    // Opción 3: relativo al ejecutable (cargo run / binario instalado)
    if let Some(exe_dir) = std::env::current_exe().ok().as_deref().and_then(Path::parent) {
        let candidates_from_exe = [
            exe_dir.join("../../degreeplan/src/datafiles"),
            exe_dir.join("../degreeplan/src/datafiles"),
            exe_dir.join("datafiles"),
        ];
        for candidate in candidates_from_exe {
            if let Ok(canonical) = candidate.canonicalize() {
                if canonical.join(PROGRAMS_FILE).exists() {
                    debug!(dir = %canonical.display(), "datafiles found next to executable");
                    return canonical;
                }
            }
        }
    }

    PathBuf::from(DATAFILES_DIR)
}

/// Lee y deserializa un archivo JSON, anotando la ruta en los errores.
pub fn read_json<T: DeserializeOwned>(path: &Path) -> Result<T> {
    let contents = fs::read_to_string(path).map_err(|e| AdvisingError::io(path, e))?;
    serde_json::from_str(&contents).map_err(|e| AdvisingError::json(path.display().to_string(), e))
}
