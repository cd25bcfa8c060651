use serde::{Deserialize, Serialize};

use crate::catalog::{codes, Catalog};

pub mod handlers;

/// Similitud mínima (Jaro-Winkler) para aceptar un título aproximado.
pub const TITLE_MATCH_THRESHOLD: f64 = 0.92;

/// Parámetros de entrada para `/progress` y `/plan`.
///
/// # Estructura del JSON esperado:
/// ```json
/// {
///   "program": "english",
///   "completed": ["ENGL 20503", "ENGL30133", "American Writers"],
///   "planned": ["ENGL 30103"],
///   "expectedGraduation": "Spring 2028",
///   "name": "Jane Doe"
/// }
/// ```
///
/// # Campos:
/// - `program`: id del programa (`english`, `writing`, `creativeWriting`), requerido
/// - `completed` / `planned`: códigos de curso; también se aceptan títulos del catálogo
/// - `expectedGraduation`: semestre objetivo para el plan (opcional)
/// - `name`: nombre del estudiante (opcional, sólo informativo)
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PlanRequest {
    pub program: String,
    #[serde(default)]
    pub completed: Vec<String>,
    #[serde(default)]
    pub planned: Vec<String>,
    #[serde(default)]
    pub expected_graduation: Option<String>,
    #[serde(default)]
    pub name: Option<String>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PrerequisiteCheckRequest {
    pub course: String,
    #[serde(default)]
    pub completed: Vec<String>,
    #[serde(default)]
    pub planned: Vec<String>,
}

pub fn parse_json_input(json_str: &str) -> Result<PlanRequest, serde_json::Error> {
    serde_json::from_str::<PlanRequest>(json_str)
}

// heurística simple: si la cadena contiene un dígito la consideramos código
fn looks_like_code(s: &str) -> bool {
    s.chars().any(|c| c.is_ascii_digit())
}

fn normalize_title(s: &str) -> String {
    s.to_lowercase()
        .chars()
        .map(|c| if c.is_alphanumeric() { c } else { ' ' })
        .collect::<String>()
        .split_whitespace()
        .collect::<Vec<_>>()
        .join(" ")
}

/// Busca el código de un curso por su título: primero coincidencia exacta
/// normalizada, luego el título más parecido por Jaro-Winkler sobre el umbral.
pub fn title_to_code(catalog: &Catalog, title: &str) -> Option<String> {
    let wanted = normalize_title(title);
    if wanted.is_empty() {
        return None;
    }
    if let Some(course) = catalog.courses().iter().find(|c| normalize_title(&c.title) == wanted) {
        return Some(course.code.clone());
    }

    catalog
        .courses()
        .iter()
        .map(|c| (strsim::jaro_winkler(&wanted, &normalize_title(&c.title)), c))
        .filter(|(score, _)| *score >= TITLE_MATCH_THRESHOLD)
        .max_by(|a, b| a.0.total_cmp(&b.0))
        .map(|(_, c)| c.code.clone())
}

/// Normaliza una entrada de curso: los códigos se llevan a `ENGL 30133` y los
/// textos sin dígitos se pasan al `resolver`. Lo que no se resuelve queda igual.
pub fn resolve_course_with_resolver<F>(raw: String, resolver: &F) -> String
where
    F: Fn(&str) -> Option<String>,
{
    let trimmed = raw.trim();
    if looks_like_code(trimmed) {
        return codes::normalize_code(trimmed).unwrap_or_else(|| trimmed.to_string());
    }
    resolver(trimmed).unwrap_or(raw)
}

/// Versión parametrizable para pruebas: recibe un `resolver` que intenta mapear
/// un título a su código, sin depender del catálogo real.
pub fn resolve_courses_with_resolver<F>(mut req: PlanRequest, resolver: F) -> PlanRequest
where
    F: Fn(&str) -> Option<String>,
{
    req.completed = req.completed.into_iter().map(|r| resolve_course_with_resolver(r, &resolver)).collect();
    req.planned = req.planned.into_iter().map(|r| resolve_course_with_resolver(r, &resolver)).collect();
    req
}

/// Resuelve títulos y variantes de código contra el catálogo.
pub fn resolve_courses(req: PlanRequest, catalog: &Catalog) -> PlanRequest {
    resolve_courses_with_resolver(req, |title| title_to_code(catalog, title))
}

/// Parsea el JSON de entrada y resuelve los cursos dados por título.
pub fn parse_and_resolve_courses(json_str: &str, catalog: &Catalog) -> Result<PlanRequest, serde_json::Error> {
    Ok(resolve_courses(parse_json_input(json_str)?, catalog))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::catalog::test_support::small_catalog;

    #[test]
    fn test_parse_minimal_request() {
        let req = parse_json_input(r#"{"program":"writing"}"#).unwrap();
        assert_eq!(req.program, "writing");
        assert!(req.completed.is_empty());
        assert!(req.expected_graduation.is_none());
    }

    #[test]
    fn test_resolver_only_called_for_titles() {
        let req = parse_json_input(
            r#"{"program":"english","completed":["engl30133","Intro to Theory","Unknown Course"],"planned":[" ENGL 30103 "]}"#,
        )
        .unwrap();
        let resolved = resolve_courses_with_resolver(req, |title| {
            assert!(!title.chars().any(|c| c.is_ascii_digit()));
            (title == "Intro to Theory").then(|| "ENGL 30103".to_string())
        });
        assert_eq!(resolved.completed, vec!["ENGL 30133", "ENGL 30103", "Unknown Course"]);
        assert_eq!(resolved.planned, vec!["ENGL 30103"]);
    }

    #[test]
    fn test_title_to_code() {
        let catalog = small_catalog();
        assert_eq!(title_to_code(&catalog, "course engl 30133").as_deref(), Some("ENGL 30133"));
        assert_eq!(title_to_code(&catalog, "Poetry of the Moon"), None);
        assert_eq!(title_to_code(&catalog, "   "), None);
    }
}
