// Configuración de ejecución: `.env` + variables de entorno, con override desde la CLI.

use std::path::PathBuf;

use crate::catalog::io::DATA_DIR_ENV;
use crate::store::DEFAULT_STUDENTS_FILE;

pub const BIND_ENV: &str = "ADVISING_BIND";
pub const STUDENTS_FILE_ENV: &str = "ADVISING_STUDENTS_FILE";
pub const LOG_ENV: &str = "RUST_LOG";

pub const DEFAULT_BIND: &str = "127.0.0.1:8080";
pub const DEFAULT_LOG_FILTER: &str = "info";

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Settings {
    pub bind_addr: String,
    /// `None`: se resuelve con la cadena de búsqueda de datafiles.
    pub data_dir: Option<PathBuf>,
    pub students_file: PathBuf,
    pub log_filter: String,
}

impl Default for Settings {
    fn default() -> Self {
        Settings {
            bind_addr: DEFAULT_BIND.to_string(),
            data_dir: None,
            students_file: PathBuf::from(DEFAULT_STUDENTS_FILE),
            log_filter: DEFAULT_LOG_FILTER.to_string(),
        }
    }
}

impl Settings {
    /// Carga `.env` si existe y lee el entorno del proceso.
    pub fn from_env() -> Self {
        dotenv::dotenv().ok();
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Construye la configuración a partir de una función de búsqueda de variables.
    /// Los valores vacíos cuentan como ausentes.
    pub fn from_lookup<F>(lookup: F) -> Self
    where
        F: Fn(&str) -> Option<String>,
    {
        let get = |key: &str| lookup(key).filter(|v| !v.trim().is_empty());
        let defaults = Settings::default();
        Settings {
            bind_addr: get(BIND_ENV).unwrap_or(defaults.bind_addr),
            data_dir: get(DATA_DIR_ENV).map(PathBuf::from),
            students_file: get(STUDENTS_FILE_ENV).map(PathBuf::from).unwrap_or(defaults.students_file),
            log_filter: get(LOG_ENV).unwrap_or(defaults.log_filter),
        }
    }

    /// Directorio de datafiles efectivo (configurado o encontrado por búsqueda).
    pub fn resolved_data_dir(&self) -> PathBuf {
        crate::catalog::resolve_datafiles_dir(self.data_dir.as_deref().and_then(|p| p.to_str()))
    }
}
