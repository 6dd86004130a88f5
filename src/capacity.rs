use crate::data::{Class, MAX_CLASS_SIZE, Student};

/// Whether `class` has room for `student` under its quota ceilings.
///
/// Pure: the answer depends only on the class's current membership and the
/// student's own flags. Students without a support flag or an elective are
/// never blocked by (or counted against) that ceiling.
pub fn can_admit(class: &Class, student: &Student) -> bool {
    // hard cap, not configurable per class
    if class.len() >= MAX_CLASS_SIZE {
        return false;
    }

    if student.sva && class.sva_count() >= class.spec.max_sva {
        return false;
    }

    if student.svast && class.svast_count() >= class.spec.max_svast {
        return false;
    }

    if let Some(language) = student.language {
        if class.language_count(language) >= class.spec.language_ceiling(language) {
            return false;
        }
    }

    true
}
