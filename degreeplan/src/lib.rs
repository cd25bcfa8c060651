// Biblioteca raíz del crate `degreeplan`.
// Motor de avance de carrera para las carreras del departamento de inglés:
// datos estáticos (`catalog`), motor puro (`algorithm`), exportación (`report`),
// persistencia de estudiantes (`store`) y la API HTTP (`api_json` + `server`).
pub mod algorithm;
pub mod api_json;
pub mod catalog;
pub mod config;
pub mod error;
pub mod models;
pub mod report;
pub mod server;
pub mod store;

pub use catalog::Catalog;
pub use error::{AdvisingError, Result};

/// Ejecuta el servidor HTTP (reexport para facilitar uso desde `main`)
pub use server::run_server;
