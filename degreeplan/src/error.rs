use std::path::PathBuf;

use thiserror::Error;

/// Errores al cargar el catálogo, importar planillas o leer y escribir registros
/// de estudiantes. El motor de evaluación en sí nunca falla.
#[derive(Debug, Error)]
pub enum AdvisingError {
    #[error("failed to read {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("invalid JSON in {context}: {source}")]
    Json {
        context: String,
        #[source]
        source: serde_json::Error,
    },

    #[error("spreadsheet error: {0}")]
    Spreadsheet(#[from] calamine::Error),

    #[error("catalog validation failed: {0}")]
    Validation(String),

    #[error("unknown program id `{0}`")]
    UnknownProgram(String),

    #[error("invalid term label `{0}` (expected e.g. \"Spring 2027\")")]
    InvalidTerm(String),

    #[error("invalid CSV export: {0}")]
    Csv(String),
}

impl AdvisingError {
    pub fn io(path: impl Into<PathBuf>, source: std::io::Error) -> Self {
        AdvisingError::Io { path: path.into(), source }
    }

    pub fn json(context: impl Into<String>, source: serde_json::Error) -> Self {
        AdvisingError::Json { context: context.into(), source }
    }
}

pub type Result<T> = std::result::Result<T, AdvisingError>;
