use actix_web::HttpResponse;
use serde_json::json;
use tracing::error;

use crate::error::AdvisingError;
use crate::models::ProgramId;

pub mod catalog;
pub mod docs;
pub mod progress;
pub mod students;

pub use catalog::*;
pub use docs::*;
pub use progress::*;
pub use students::*;

/// Convierte un error del dominio en respuesta JSON `{"error": ...}`.
pub(crate) fn error_response(err: &AdvisingError) -> HttpResponse {
    match err {
        AdvisingError::Validation(_)
        | AdvisingError::UnknownProgram(_)
        | AdvisingError::InvalidTerm(_)
        | AdvisingError::Csv(_) => HttpResponse::BadRequest().json(json!({"error": err.to_string()})),
        _ => {
            error!(error = %err, "request failed");
            HttpResponse::InternalServerError().json(json!({"error": err.to_string()}))
        }
    }
}

/// El id de programa llega como texto; uno desconocido es un 400, nunca llega al motor.
pub(crate) fn parse_program(raw: &str) -> Result<ProgramId, HttpResponse> {
    raw.parse::<ProgramId>().map_err(|e| error_response(&e))
}
