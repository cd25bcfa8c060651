//! Deriva la tabla de prerequisitos a partir de las descripciones del catálogo.
//!
//! Se reconocen los formatos de redacción habituales del catálogo
//! ("Prerequisites: ENGL 10803, ENGL 20803, and at least one ...").
//! Lo que no encaja en ningún patrón queda en `unmatched` para revisión manual.

use std::collections::BTreeMap;
use std::sync::LazyLock;

use regex::Regex;
use serde::Serialize;
use tracing::{debug, info};

use crate::models::{CatalogCourse, OrGroup, PrerequisiteEntry, RequirementToken};

#[derive(Debug, Clone, Default, Serialize)]
pub struct DerivedPrerequisites {
    pub entries: BTreeMap<String, PrerequisiteEntry>,
    pub unmatched: Vec<(String, String)>,
}

// Cursos con listado cruzado ENGL/WRIT/CRWT -> código canónico
const CROSS_LISTED: [(&str, &str); 7] = [
    ("10203", "CRWT 10203"),
    ("20103", "CRWT 20103"),
    ("20133", "CRWT 20133"),
    ("10803", "ENGL 10803"),
    ("10833", "ENGL 10833"),
    ("20803", "ENGL 20803"),
    ("20833", "ENGL 20833"),
];

const CRWT_INTRO: [&str; 3] = ["CRWT 10203", "CRWT 20103", "CRWT 20133"];
const CRWT_WORKSHOPS: [&str; 5] = ["CRWT 30343", "CRWT 30353", "CRWT 30233", "CRWT 30373", "CRWT 30363"];

struct Patterns {
    prereq_text: Regex,
    cross_listed: Regex,
    plain_code: Regex,
    gateway: Regex,
    gateway_loose: Regex,
    honors_alternatives: Regex,
    lower_div_clause: Regex,
    crwt_intro: Regex,
    crwt_workshop: Regex,
    grade_b_minus: Regex,
    encouraged_code: Regex,
    encouraged_upper: Regex,
    writ_alternative: Regex,
    comp_pair: Regex,
    extra_clause: Regex,
    trailing_period: Regex,
    single_exact: Regex,
    single_leading: Regex,
    and_or_comma: Regex,
    sophomore: Regex,
    majors_only: Regex,
    administrative: Regex,
    whitespace: Regex,
    writ_any: Regex,
    word_or: Regex,
    cross_dept_loose: Regex,
    cross_dept: Regex,
    digital_culture: Regex,
}

fn re(pattern: &str) -> Regex {
    Regex::new(pattern).expect("valid prerequisite pattern")
}

static PATTERNS: LazyLock<Patterns> = LazyLock::new(|| Patterns {
    prereq_text: re(r"(?is)^Prerequisites?:\s*(.+?)(?:\.\s+[A-Z]|$)"),
    cross_listed: re(r"(?:ENGL|WRIT|CRWT)(?:/(?:ENGL|WRIT|CRWT))* ([0-9]{5})"),
    plain_code: re(r"((?:ENGL|WRIT|CRWT) [0-9]{5})"),
    gateway: re(r"(?i)10803.*20803.*(?:at least|one|a least).*(?:10000|20000|10,000|20,000)"),
    gateway_loose: re(r"(?i)10803.*20803.*(?:at least|one).*(?:ENGL|WRIT|CRWT)"),
    honors_alternatives: re(r"(?i)10803\s*(?:or|/)\s*10833.*20803\s*(?:or|/)\s*20833"),
    lower_div_clause: re(r"(?i)(?:at least|one).*(?:10000|20000)"),
    crwt_intro: re(r"(?i)10203.*20103.*20133"),
    crwt_workshop: re(r"(?i)(?:30000|40000|30000-\s*or\s*40000).*(?:workshop|creative writing)"),
    grade_b_minus: re(r"(?i)grade\s+of\s+(?:at\s+least\s+)?B-"),
    encouraged_code: re(r"(?i)strongly encouraged to take (?:ENGL/WRIT/CRWT |CRWT )?([0-9]{5})"),
    encouraged_upper: re(r"(?i)strongly encouraged.*30000-level"),
    writ_alternative: re(r"(?i)10803.*(?:and|,)\s*(?:either\s+)?(?:ENGL\s+)?20803.*(?:or|,)\s*(?:WRIT\s+)?20113"),
    comp_pair: re(r"(?i)10803\b.*(?:and|,)\s*(?:ENGL\s+)?20803\b"),
    extra_clause: re(r"(?i)(?:at least|one|additional)"),
    trailing_period: re(r"\s*\.?\s*$"),
    single_exact: re(r"(?i)^(?:ENGL|WRIT|CRWT)\s+[0-9]{5}\s*$"),
    single_leading: re(r"^((?:ENGL|WRIT|CRWT)\s+[0-9]{5})\b"),
    and_or_comma: re(r"(?i)(?:or|and|,)"),
    sophomore: re(r"(?i)sophomore standing"),
    majors_only: re(r"(?i)(?:majors?|minors?)\s+only"),
    administrative: re(r"(?i)credit hours|GPA|approval of"),
    whitespace: re(r"\s+"),
    writ_any: re(r"(?i)(WRIT\s+[0-9]{5})"),
    word_or: re(r"(?i)\bor\b"),
    cross_dept_loose: re(r"(?i)^[A-Z]{3,4}\s+[0-9]{5}"),
    cross_dept: re(r"^([A-Z]{3,4}\s+[0-9]{5})"),
    digital_culture: re(r"(?i)Digital Culture"),
});

/// `"ENGL/WRIT/CRWT 10203"` -> `"CRWT 10203"`; otros códigos quedan igual.
pub fn canonical_code(raw: &str) -> String {
    let p = &*PATTERNS;
    if let Some(num) = p.cross_listed.captures(raw).and_then(|c| c.get(1)) {
        if let Some((_, canonical)) = CROSS_LISTED.iter().find(|(n, _)| *n == num.as_str()) {
            return canonical.to_string();
        }
    }
    if let Some(code) = p.plain_code.captures(raw).and_then(|c| c.get(1)) {
        return code.as_str().to_string();
    }
    raw.trim().to_string()
}

fn group<S: AsRef<str>>(codes: &[S]) -> OrGroup {
    codes.iter().map(|c| RequirementToken::from(c.as_ref().to_string())).collect()
}

fn requires(groups: Vec<OrGroup>) -> PrerequisiteEntry {
    PrerequisiteEntry { require: Some(groups), ..Default::default() }
}

fn note_only(text: &str) -> PrerequisiteEntry {
    let collapsed = PATTERNS.whitespace.replace_all(text, " ");
    PrerequisiteEntry { note: Some(collapsed.trim().to_string()), ..Default::default() }
}

/// Texto que sigue a "Prerequisite(s):" hasta el fin de esa oración.
pub fn prerequisite_text(description: &str) -> Option<&str> {
    PATTERNS.prereq_text.captures(description).and_then(|c| c.get(1)).map(|m| m.as_str().trim())
}

/// Aplica los patrones en orden; el primero que produce una entrada gana.
pub fn entry_from_text(text: &str) -> Option<PrerequisiteEntry> {
    let p = &*PATTERNS;
    let lower_div = || vec![RequirementToken::AnyLowerDivision];

    // Gateway común de cursos ENGL 30000+
    if p.gateway.is_match(text) || p.gateway_loose.is_match(text) {
        return Some(requires(vec![group(&["ENGL 10803"]), group(&["ENGL 20803"]), lower_div()]));
    }

    if p.honors_alternatives.is_match(text) {
        let mut groups = vec![group(&["ENGL 10803", "ENGL 10833"]), group(&["ENGL 20803", "ENGL 20833"])];
        if p.lower_div_clause.is_match(text) {
            groups.push(lower_div());
        }
        return Some(requires(groups));
    }

    // Introducción a escritura creativa (una de tres)
    if p.crwt_intro.is_match(text) {
        if p.crwt_workshop.is_match(text) {
            let mut entry = requires(vec![group(&CRWT_INTRO), group(&CRWT_WORKSHOPS)]);
            if p.grade_b_minus.is_match(text) {
                entry.note = Some("Grade of B- or higher required in workshop".to_string());
            }
            return Some(entry);
        }
        let mut entry = requires(vec![group(&CRWT_INTRO)]);
        match p.encouraged_code.captures(text).and_then(|c| c.get(1)) {
            Some(num) => entry.recommend = vec![canonical_code(&format!("CRWT {}", num.as_str()))],
            None if p.encouraged_upper.is_match(text) => {
                entry.note = Some("Prior 30000-level creative writing course strongly recommended".to_string());
            }
            None => {}
        }
        return Some(entry);
    }

    if p.writ_alternative.is_match(text) {
        return Some(requires(vec![group(&["ENGL 10803"]), group(&["ENGL 20803", "WRIT 20113"])]));
    }

    if p.comp_pair.is_match(text) && !p.extra_clause.is_match(text) {
        return Some(requires(vec![group(&["ENGL 10803"]), group(&["ENGL 20803"])]));
    }

    // Un solo curso
    let stripped = p.trailing_period.replace(text, "");
    if p.single_exact.is_match(&stripped) {
        return Some(requires(vec![group(&[canonical_code(&stripped)])]));
    }
    let head: String = text.chars().take(20).collect();
    if !p.and_or_comma.is_match(&head) {
        if let Some(single) = p.single_leading.captures(text).and_then(|c| c.get(1)) {
            let mut entry = requires(vec![group(&[canonical_code(single.as_str())])]);
            if p.sophomore.is_match(text) {
                entry.note = Some("Sophomore standing (24 hours) required".to_string());
            }
            return Some(entry);
        }
    }

    // Requisitos administrativos: sólo texto
    if p.majors_only.is_match(text) || p.administrative.is_match(text) {
        return Some(note_only(text));
    }

    let writ: Vec<&str> = p.writ_any.captures_iter(text).filter_map(|c| c.get(1)).map(|m| m.as_str()).collect();
    match writ.len() {
        0 => {}
        1 => return Some(requires(vec![group(&writ)])),
        _ if p.word_or.is_match(text) => return Some(requires(vec![group(&writ)])),
        _ => return Some(requires(writ.iter().map(|c| group(&[*c])).collect())),
    }

    // Curso de otro departamento (p. ej. WGST 20003)
    if p.cross_dept_loose.is_match(text) {
        if let Some(code) = p.cross_dept.captures(text).and_then(|c| c.get(1)) {
            return Some(requires(vec![group(&[code.as_str()])]));
        }
    }

    if p.digital_culture.is_match(text) && text.contains("10203") {
        let mut entry = requires(vec![group(&CRWT_INTRO)]);
        entry.note = Some("Also open to Digital Culture and Data Analytics majors/minors".to_string());
        return Some(entry);
    }

    None
}

/// Recorre el catálogo y construye la tabla; los cursos de posgrado se omiten.
pub fn derive_prerequisites(courses: &[CatalogCourse]) -> DerivedPrerequisites {
    let mut out = DerivedPrerequisites::default();

    for course in courses {
        let Some(text) = course.description.as_deref().and_then(prerequisite_text) else {
            continue;
        };
        if crate::catalog::codes::course_level(&course.code).is_some_and(|level| level >= 5) {
            continue;
        }
        match entry_from_text(text) {
            Some(entry) => {
                out.entries.insert(course.code.clone(), entry);
            }
            None => {
                debug!(code = %course.code, text, "no prerequisite pattern matched");
                out.unmatched.push((course.code.clone(), text.to_string()));
            }
        }
    }

    info!(matched = out.entries.len(), unmatched = out.unmatched.len(), "prerequisites derived");
    out
}

#[cfg(test)]
mod tests {
    use super::*;

    fn course(code: &str, description: &str) -> CatalogCourse {
        CatalogCourse { code: code.into(), title: code.into(), hours: 3, description: Some(description.into()) }
    }

    #[test]
    fn test_prerequisite_text_stops_at_sentence() {
        let desc = "Prerequisites: ENGL 10803 and ENGL 20803. Surveys the novel.";
        assert_eq!(prerequisite_text(desc), Some("ENGL 10803 and ENGL 20803"));
        assert_eq!(prerequisite_text("Surveys the novel."), None);
    }

    #[test]
    fn test_gateway_pattern() {
        let entry = entry_from_text(
            "ENGL 10803, ENGL 20803, and at least one 10000- or 20000-level ENGL, WRIT, or CRWT course",
        )
        .unwrap();
        let groups = entry.groups();
        assert_eq!(groups.len(), 3);
        assert_eq!(groups[2], vec![RequirementToken::AnyLowerDivision]);
    }

    #[test]
    fn test_crwt_advanced_with_grade_note() {
        let entry = entry_from_text(
            "ENGL/WRIT/CRWT 10203 or ENGL/WRIT/CRWT 20103 or ENGL/WRIT/CRWT 20133 and a 30000-level creative writing workshop with a grade of B- or better",
        )
        .unwrap();
        assert_eq!(entry.groups().len(), 2);
        assert!(entry.groups()[1].contains(&RequirementToken::Course("CRWT 30343".into())));
        assert_eq!(entry.note.as_deref(), Some("Grade of B- or higher required in workshop"));
    }

    #[test]
    fn test_single_course_and_notes() {
        let single = entry_from_text("WRIT 20113.").unwrap();
        assert_eq!(single.groups(), &[vec![RequirementToken::Course("WRIT 20113".into())]]);

        let standing = entry_from_text("ENGL 20803 with sophomore standing").unwrap();
        assert_eq!(standing.groups()[0], vec![RequirementToken::Course("ENGL 20803".into())]);
        assert!(standing.note.unwrap().contains("Sophomore"));

        let majors = entry_from_text("English   majors only").unwrap();
        assert!(majors.require.is_none());
        assert_eq!(majors.note.as_deref(), Some("English majors only"));
    }

    #[test]
    fn test_canonical_code() {
        assert_eq!(canonical_code("ENGL/WRIT/CRWT 10203"), "CRWT 10203");
        assert_eq!(canonical_code("CRWT 30343"), "CRWT 30343");
        assert_eq!(canonical_code(" something else "), "something else");
    }

    #[test]
    fn test_derive_skips_graduate_and_collects_unmatched() {
        let courses = vec![
            course("ENGL 30133", "Prerequisites: ENGL 10803 and ENGL 20803. Survey."),
            course("ENGL 50133", "Prerequisites: ENGL 10803 and ENGL 20803. Survey."),
            course("ENGL 40973", "Prerequisite: something unusual"),
            course("ENGL 20503", "No prerequisites listed here."),
        ];
        let derived = derive_prerequisites(&courses);
        assert_eq!(derived.entries.len(), 1);
        assert!(derived.entries.contains_key("ENGL 30133"));
        assert_eq!(derived.unmatched, vec![("ENGL 40973".to_string(), "something unusual".to_string())]);
    }
}
