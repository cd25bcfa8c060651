use std::collections::HashSet;

use tracing::debug;

use super::progress::code_set;
use crate::catalog::{codes, Catalog};
use crate::models::{PrerequisiteCheck, RequirementToken};

fn token_satisfied(token: &RequirementToken, taken: &HashSet<&str>) -> bool {
    match token {
        RequirementToken::Course(code) => taken.contains(code.as_str()),
        RequirementToken::AnyLowerDivision => taken.iter().any(|code| codes::is_lower_division(code)),
    }
}

/// ¿Se cumplirán los prerequisitos de `code` cuando se curse?
///
/// Cuenta tanto los aprobados como los planificados. Sin entrada en la tabla,
/// o con una entrada sólo de nota, el resultado es `met = true`. Los grupos OR
/// sin ningún token satisfecho se devuelven tal cual en `unmet_groups`.
pub fn check_prerequisites<'a, S: AsRef<str>>(
    catalog: &'a Catalog,
    code: &str,
    completed: &[S],
    planned: &[S],
) -> PrerequisiteCheck<'a> {
    let entry = catalog.prerequisites(code);
    let groups = entry.map(|e| e.groups()).unwrap_or_default();
    if groups.is_empty() {
        return PrerequisiteCheck { met: true, unmet_groups: Vec::new(), entry };
    }

    let mut taken = code_set(completed);
    taken.extend(planned.iter().map(AsRef::as_ref));

    let unmet_groups: Vec<_> = groups
        .iter()
        .filter(|group| !group.iter().any(|token| token_satisfied(token, &taken)))
        .cloned()
        .collect();

    debug!(code, groups = groups.len(), unmet = unmet_groups.len(), "prerequisite check");
    PrerequisiteCheck { met: unmet_groups.is_empty(), unmet_groups, entry }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::catalog::test_support::small_catalog;

    #[test]
    fn test_missing_and_note_only_entries_are_met() {
        let catalog = small_catalog();
        let none: &[&str] = &[];

        let missing = check_prerequisites(&catalog, "ENGL 30143", none, none);
        assert!(missing.met);
        assert!(missing.entry.is_none());

        let note = check_prerequisites(&catalog, "ENGL 38023", none, none);
        assert!(note.met);
        assert!(note.unmet_groups.is_empty());
        assert_eq!(note.entry.and_then(|e| e.note.as_deref()), Some("English majors only"));

        let empty = check_prerequisites(&catalog, "ENGL 40001", none, none);
        assert!(empty.met);
    }

    #[test]
    fn test_and_of_or_groups() {
        let catalog = small_catalog();
        let ok = check_prerequisites(&catalog, "ENGL 30133", &["ENGL 10803"], &[]);
        // ENGL 10803 cubre también el grupo de división inferior
        assert!(ok.met);

        let missing_lower = check_prerequisites(&catalog, "ENGL 30133", &["ENGL 30143"], &[]);
        assert!(!missing_lower.met);
        assert_eq!(missing_lower.unmet_groups.len(), 2);
        assert_eq!(missing_lower.unmet_groups[1], vec![RequirementToken::AnyLowerDivision]);
    }

    #[test]
    fn test_planned_courses_count() {
        let catalog = small_catalog();
        let check = check_prerequisites(&catalog, "CRWT 30343", &[], &["CRWT 10203"]);
        assert!(check.met);
        assert_eq!(check.entry.and_then(|e| e.note.as_deref()), Some("B- or better"));
    }

    #[test]
    fn test_upper_division_never_satisfies_lower_sentinel() {
        let catalog = small_catalog();
        let check = check_prerequisites(&catalog, "ENGL 30133", &["ENGL 10803X", "ENGL 30103", "HIST 10103"], &[]);
        assert!(!check.met);
        assert_eq!(check.unmet_groups.len(), 2);
    }

    #[test]
    fn test_non_ascii_digits_never_satisfy_lower_sentinel() {
        let catalog = small_catalog();
        let check = check_prerequisites(&catalog, "ENGL 30133", &["ENGL 30143"], &["ENGL 1\u{660}\u{668}\u{660}\u{663}"]);
        assert!(!check.met);
        assert_eq!(check.unmet_groups[1], vec![RequirementToken::AnyLowerDivision]);
    }
}
