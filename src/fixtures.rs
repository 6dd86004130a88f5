//! Builders shared by the unit tests.

use crate::data::{Class, ClassSpec, Language, Student, StudentId};

pub fn student(id: StudentId) -> Student {
    Student {
        id,
        gender: if id % 2 == 0 { "F".into() } else { "M".into() },
        language: None,
        sva: false,
        svast: false,
        supported: false,
        flagged: false,
        preferred: Vec::new(),
    }
}

pub fn speaking(id: StudentId, language: Language) -> Student {
    Student {
        language: Some(language),
        ..student(id)
    }
}

pub fn preferring(id: StudentId, preferred: &[StudentId]) -> Student {
    Student {
        preferred: preferred.to_vec(),
        ..student(id)
    }
}

/// A class spec whose quota ceilings never bind before the size cap.
pub fn open_spec(name: &str) -> ClassSpec {
    ClassSpec {
        name: name.to_string(),
        max_sva: 32,
        max_svast: 32,
        max_spanish: 32,
        max_french: 32,
        max_german: 32,
    }
}

pub fn open_classes(names: &[&str]) -> Vec<Class> {
    names.iter().map(|name| Class::new(open_spec(name))).collect()
}

pub fn sizes(classes: &[Class]) -> Vec<usize> {
    classes.iter().map(Class::len).collect()
}

/// Asserts every quota ceiling and the size cap hold for each class.
pub fn assert_quotas_hold(classes: &[Class]) {
    for class in classes {
        assert!(class.len() <= crate::data::MAX_CLASS_SIZE, "{} over size cap", class.name());
        assert!(class.sva_count() <= class.spec.max_sva, "{} over sva", class.name());
        assert!(class.svast_count() <= class.spec.max_svast, "{} over svast", class.name());
        for language in Language::PRIORITY {
            assert!(
                class.language_count(language) <= class.spec.language_ceiling(language),
                "{} over {language}",
                class.name()
            );
        }
    }
}

/// Asserts every id appears exactly once across the classes and the leftovers.
pub fn assert_conserved(ids: &[StudentId], classes: &[Class], unassigned: &[Student]) {
    let mut seen: Vec<StudentId> = classes
        .iter()
        .flat_map(|c| c.students.iter().map(|s| s.id))
        .chain(unassigned.iter().map(|s| s.id))
        .collect();
    seen.sort_unstable();
    let mut expected = ids.to_vec();
    expected.sort_unstable();
    assert_eq!(seen, expected);
}
