//! Importación del catálogo desde la exportación del registro académico
//! (hoja de cálculo con columnas `code, href, title, description`).

use std::collections::HashSet;
use std::path::Path;

use calamine::{open_workbook_auto, Data, Reader};
use tracing::{debug, info};

use super::codes;
use crate::error::{AdvisingError, Result};
use crate::models::CatalogCourse;

/// Convierte una celda de calamine a String.
pub fn cell_to_string(c: &Data) -> String {
    match c {
        Data::String(s) => s.trim().to_string(),
        Data::Float(f) => {
            if (f.floor() - f).abs() < f64::EPSILON {
                format!("{}", *f as i64)
            } else {
                format!("{}", f)
            }
        }
        Data::Int(i) => i.to_string(),
        Data::Bool(b) => b.to_string(),
        Data::DateTime(d) => d.to_string(),
        Data::DateTimeIso(s) | Data::DurationIso(s) => s.clone(),
        Data::Empty | Data::Error(_) => String::new(),
    }
}

/// Lee la primera hoja del archivo y la transforma en cursos de catálogo.
pub fn import_courses(path: &Path) -> Result<Vec<CatalogCourse>> {
    let mut workbook = open_workbook_auto(path)?;
    let first = workbook
        .sheet_names()
        .first()
        .cloned()
        .ok_or_else(|| AdvisingError::Validation(format!("{} has no sheets", path.display())))?;
    let range = workbook.worksheet_range(&first)?;

    let rows: Vec<Vec<String>> = range.rows().map(|r| r.iter().map(cell_to_string).collect()).collect();
    debug!(sheet = %first, rows = rows.len(), "catalog sheet read");

    let courses = courses_from_rows(&rows);
    info!(path = %path.display(), courses = courses.len(), "catalog imported");
    Ok(courses)
}

/// Créditos: último dígito del número de curso si es 1-9, si no 3
/// (cursos de créditos variables y equivalencias de transferencia).
pub fn hours_from_code(code: &str) -> u32 {
    code.chars()
        .last()
        .and_then(|c| c.to_digit(10))
        .filter(|&d| d > 0)
        .unwrap_or(3)
}

/// Filas -> cursos. La primera fila es el encabezado.
///
/// Filas con menos de tres columnas se ignoran, los códigos se normalizan
/// (`ENGL30553` -> `ENGL 30553`), sólo quedan prefijos del departamento y de
/// pregrado, y ante duplicados gana la primera aparición. Salida ordenada por código.
pub fn courses_from_rows(rows: &[Vec<String>]) -> Vec<CatalogCourse> {
    let mut seen = HashSet::new();
    let mut courses = Vec::new();

    for row in rows.iter().skip(1) {
        if row.len() < 3 {
            continue;
        }
        let Some(code) = codes::normalize_department_code(&row[0]) else {
            continue;
        };
        if codes::course_level(&code).is_none_or(|level| level >= 5) {
            continue;
        }
        if !seen.insert(code.clone()) {
            continue;
        }

        let title = row[2].trim().to_string();
        let description = row.get(3).map(|d| d.trim()).filter(|d| !d.is_empty()).map(str::to_string);
        courses.push(CatalogCourse { hours: hours_from_code(&code), code, title, description });
    }

    courses.sort_by(|a, b| a.code.cmp(&b.code));
    courses
}

#[cfg(test)]
mod tests {
    use super::*;

    fn row(cells: &[&str]) -> Vec<String> {
        cells.iter().map(|s| s.to_string()).collect()
    }

    #[test]
    fn test_hours_from_code() {
        assert_eq!(hours_from_code("ENGL 30553"), 3);
        assert_eq!(hours_from_code("WRIT 40271"), 1);
        assert_eq!(hours_from_code("ENGL 40970"), 3);
    }

    #[test]
    fn test_courses_from_rows_filters_and_sorts() {
        let rows = vec![
            row(&["pill-label", "href", "title", "desc"]),
            row(&["WRIT20113", "/c/1", "Technical and Professional Writing", "Prerequisite: ENGL 10803."]),
            row(&["ENGL30553", "/c/2", "19th Century American Novel"]),
            row(&["HIST10103", "/c/3", "World History", ""]),
            row(&["ENGL50003", "/c/4", "Graduate Seminar", ""]),
            row(&["ENGL30553", "/c/5", "Duplicate", ""]),
            row(&["ENGL10803"]),
            row(&["CRWT10203", "/c/6", "Intro to Creative Writing", "  "]),
        ];
        let courses = courses_from_rows(&rows);
        let codes: Vec<&str> = courses.iter().map(|c| c.code.as_str()).collect();
        assert_eq!(codes, vec!["CRWT 10203", "ENGL 30553", "WRIT 20113"]);
        assert_eq!(courses[1].title, "19th Century American Novel");
        assert!(courses[0].description.is_none());
        assert_eq!(courses[2].description.as_deref(), Some("Prerequisite: ENGL 10803."));
    }

    #[test]
    fn test_cell_to_string_integral_float() {
        assert_eq!(cell_to_string(&Data::Float(30553.0)), "30553");
        assert_eq!(cell_to_string(&Data::String("  x ".into())), "x");
        assert_eq!(cell_to_string(&Data::Empty), "");
    }
}
