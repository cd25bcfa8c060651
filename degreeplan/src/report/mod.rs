//! Exportación del registro del estudiante (CSV, reporte de texto, resumen).

use chrono::NaiveDate;
use tracing::debug;

use crate::error::{AdvisingError, Result};
use crate::models::{ProgramId, StudentRecord};

mod summary;
mod text;

pub use summary::{advising_summary, AdvisingStep};
pub use text::render_text_report;

pub const CSV_HEADER: &str = "ENGLISH_ADVISING_EXPORT,v1";

/// `<Programa>_Plan_<nombre o "Student">_<AAAA-MM-DD>.<ext>`. El nombre se
/// recorta y cada tramo de espacios pasa a ser un solo `_`.
pub fn export_filename(program: Option<ProgramId>, name: &str, date: NaiveDate, ext: &str) -> String {
    let label = program.unwrap_or(ProgramId::English).export_label();
    let words: Vec<&str> = name.split_whitespace().collect();
    let student = if words.is_empty() { "Student".to_string() } else { words.join("_") };
    format!("{label}_Plan_{student}_{}.{ext}", date.format("%Y-%m-%d"))
}

fn escape_csv(value: &str) -> String {
    if value.contains([',', '"', '\n']) {
        format!("\"{}\"", value.replace('"', "\"\""))
    } else {
        value.to_string()
    }
}

/// Serializa el registro en el formato de exportación línea por línea.
pub fn export_csv(record: &StudentRecord) -> String {
    let mut lines = vec![
        CSV_HEADER.to_string(),
        format!("name,{}", escape_csv(&record.name)),
        format!("program,{}", record.program.map(|p| p.as_str()).unwrap_or("")),
        format!("expectedGraduation,{}", escape_csv(record.expected_graduation.as_deref().unwrap_or(""))),
        format!("totalCreditHours,{}", record.total_credit_hours),
        format!("completedCourses,{}", record.completed_courses.join(";")),
        format!("plannedCourses,{}", record.planned_courses.join(";")),
    ];
    if !record.notes.is_empty() {
        lines.push(format!("notes,{}", escape_csv(&record.notes)));
    }
    lines.join("\n")
}

/// Separa el texto en pares (clave, valor). Los valores entre comillas pueden
/// contener comas, saltos de línea y comillas dobladas.
fn csv_fields(text: &str) -> Result<Vec<(String, String)>> {
    let mut out = Vec::new();
    let mut chars = text.chars().peekable();

    loop {
        while chars.next_if(|c| *c == '\n' || *c == '\r').is_some() {}
        if chars.peek().is_none() {
            break;
        }
        let mut key = String::new();
        let mut value = String::new();

        for c in chars.by_ref() {
            match c {
                ',' => break,
                '\n' => return Err(AdvisingError::Csv(format!("line `{}` has no value", key.trim_end()))),
                _ => key.push(c),
            }
        }

        if chars.peek() == Some(&'"') {
            chars.next();
            loop {
                match chars.next() {
                    Some('"') if chars.peek() == Some(&'"') => {
                        chars.next();
                        value.push('"');
                    }
                    Some('"') => break,
                    Some(c) => value.push(c),
                    None => return Err(AdvisingError::Csv(format!("unterminated quoted value for `{key}`"))),
                }
            }
            // lo que queda hasta el fin de línea se descarta
            for c in chars.by_ref() {
                if c == '\n' {
                    break;
                }
            }
        } else {
            for c in chars.by_ref() {
                if c == '\n' {
                    break;
                }
                value.push(c);
            }
        }

        out.push((key.trim_end_matches('\r').to_string(), value.trim_end_matches('\r').to_string()));
    }
    Ok(out)
}

fn split_codes(value: &str) -> Vec<String> {
    let mut codes: Vec<String> = Vec::new();
    for code in value.split(';').map(str::trim).filter(|c| !c.is_empty()) {
        if !codes.iter().any(|c| c == code) {
            codes.push(code.to_string());
        }
    }
    codes
}

/// Lee un archivo generado por `export_csv`.
///
/// Rechaza encabezados ausentes o de otra versión. Los cursos planificados
/// que ya figuran como aprobados se descartan.
pub fn import_csv(text: &str) -> Result<StudentRecord> {
    let text = text.strip_prefix('\u{feff}').unwrap_or(text);
    let (first, rest) = text.split_once('\n').unwrap_or((text, ""));
    if first.trim_end_matches('\r') != CSV_HEADER {
        return Err(AdvisingError::Csv(format!("expected header `{CSV_HEADER}`")));
    }

    let mut record = StudentRecord::default();
    for (key, value) in csv_fields(rest)? {
        match key.as_str() {
            "name" => record.name = value,
            "program" if value.is_empty() => record.program = None,
            "program" => {
                record.program = Some(value.parse().map_err(|_| AdvisingError::Csv(format!("unknown program `{value}`")))?)
            }
            "expectedGraduation" => record.expected_graduation = Some(value).filter(|v| !v.is_empty()),
            "totalCreditHours" if value.is_empty() => record.total_credit_hours = 0,
            "totalCreditHours" => {
                record.total_credit_hours = value
                    .trim()
                    .parse()
                    .map_err(|_| AdvisingError::Csv(format!("invalid totalCreditHours `{value}`")))?
            }
            "completedCourses" => record.completed_courses = split_codes(&value),
            "plannedCourses" => record.planned_courses = split_codes(&value),
            "notes" => record.notes = value,
            "" => {}
            other => debug!(key = other, "ignoring unknown export field"),
        }
    }

    let completed = record.completed_courses.clone();
    record.planned_courses.retain(|c| !completed.contains(c));
    Ok(record)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn jane() -> StudentRecord {
        StudentRecord {
            name: "Jane Doe".into(),
            program: Some(ProgramId::English),
            expected_graduation: Some("Spring 2027".into()),
            total_credit_hours: 45,
            completed_courses: vec!["ENGL 20503".into(), "ENGL 20403".into()],
            planned_courses: vec!["ENGL 30133".into()],
            ..Default::default()
        }
    }

    #[test]
    fn test_export_filename() {
        let date = NaiveDate::from_ymd_opt(2026, 10, 19).unwrap();
        assert_eq!(
            export_filename(Some(ProgramId::English), "Jane  Doe", date, "csv"),
            "English_Plan_Jane_Doe_2026-10-19.csv"
        );
        assert_eq!(
            export_filename(Some(ProgramId::Writing), " Jane\tDoe ", date, "csv"),
            "Writing_Plan_Jane_Doe_2026-10-19.csv"
        );
        assert_eq!(export_filename(Some(ProgramId::CreativeWriting), " ", date, "txt"), "CreativeWriting_Plan_Student_2026-10-19.txt");
        assert_eq!(export_filename(None, "", date, "csv"), "English_Plan_Student_2026-10-19.csv");
    }

    #[test]
    fn test_csv_structure() {
        let csv = export_csv(&jane());
        let lines: Vec<&str> = csv.split('\n').collect();
        assert_eq!(
            lines,
            vec![
                "ENGLISH_ADVISING_EXPORT,v1",
                "name,Jane Doe",
                "program,english",
                "expectedGraduation,Spring 2027",
                "totalCreditHours,45",
                "completedCourses,ENGL 20503;ENGL 20403",
                "plannedCourses,ENGL 30133",
            ]
        );
    }

    #[test]
    fn test_csv_escaping_and_notes() {
        let mut rec = jane();
        rec.name = "Jane \"JD\" Doe".into();
        rec.notes = "Ask about minor, and\nstudy abroad".into();
        let csv = export_csv(&rec);
        assert!(csv.contains("name,\"Jane \"\"JD\"\" Doe\""));
        assert!(csv.contains("notes,\"Ask about minor, and\nstudy abroad\""));

        rec.name = "Doe, Jane".into();
        assert!(export_csv(&rec).contains("name,\"Doe, Jane\""));

        rec.notes.clear();
        assert!(!export_csv(&rec).contains("notes,"));
    }

    #[test]
    fn test_import_reads_export() {
        let mut rec = jane();
        rec.name = "Doe, \"Jane\"".into();
        rec.notes = "line one\nline two".into();
        let back = import_csv(&export_csv(&rec)).unwrap();
        assert_eq!(back, rec);
    }

    #[test]
    fn test_import_rejects_bad_input_and_restores_invariant() {
        assert!(import_csv("name,Jane").is_err());
        assert!(import_csv("ENGLISH_ADVISING_EXPORT,v1\nprogram,history").is_err());
        assert!(import_csv("ENGLISH_ADVISING_EXPORT,v1\nnotes,\"open").is_err());

        let rec = import_csv(
            "ENGLISH_ADVISING_EXPORT,v1\r\nprogram,writing\r\ncompletedCourses,ENGL 10803\r\nplannedCourses,ENGL 10803;WRIT 30243\r\n",
        )
        .unwrap();
        assert_eq!(rec.program, Some(ProgramId::Writing));
        assert_eq!(rec.completed_courses, vec!["ENGL 10803"]);
        assert_eq!(rec.planned_courses, vec!["WRIT 30243"]);
    }
}
