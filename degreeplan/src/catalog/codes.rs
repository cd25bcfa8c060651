//! Sintaxis de códigos de curso: `<PREFIJO> <NNNNN>`.
//!
//! El primer dígito del número codifica el nivel: 1-2 división inferior,
//! 3-4 división superior, 5 en adelante posgrado (fuera del catálogo).

use std::sync::LazyLock;

use regex::Regex;

/// Prefijos de departamento reconocidos por el catálogo.
pub const PREFIXES: [&str; 3] = ["ENGL", "WRIT", "CRWT"];

static CODE_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^(ENGL|WRIT|CRWT) ([0-9]{5})$").expect("valid course code regex"));

static LOWER_DIVISION_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^(ENGL|WRIT|CRWT) [12][0-9]{4}$").expect("valid lower-division regex"));

// Acepta "ENGL30553", "engl 30553", "ENGL-30553"
static LOOSE_CODE_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^\s*([A-Za-z]{4})[\s\-]*([0-9]{5})\s*$").expect("valid loose code regex"));

pub fn is_valid_code(code: &str) -> bool {
    CODE_RE.is_match(code)
}

/// Nivel del curso (primer dígito del número), o `None` si el código no es válido.
pub fn course_level(code: &str) -> Option<u8> {
    let caps = CODE_RE.captures(code)?;
    caps.get(2)?.as_str().bytes().next().map(|b| b - b'0')
}

pub fn is_lower_division(code: &str) -> bool {
    LOWER_DIVISION_RE.is_match(code)
}

/// Normaliza variantes como `ENGL30553` o `engl-30553` a `ENGL 30553`.
/// Devuelve `None` si el texto no tiene forma de código.
pub fn normalize_code(raw: &str) -> Option<String> {
    let caps = LOOSE_CODE_RE.captures(raw)?;
    Some(format!("{} {}", caps[1].to_ascii_uppercase(), &caps[2]))
}

/// Igual que `normalize_code`, pero exige un prefijo de departamento conocido.
pub fn normalize_department_code(raw: &str) -> Option<String> {
    normalize_code(raw).filter(|code| is_valid_code(code))
}
