use crate::data::{Class, ClassSummary, Language, PreferenceIssue, Student};
use log::{info, warn};

/// Reports every roster student who is unassigned or shares a class with
/// none of their preferred peers. Read-only.
pub fn audit(roster: &[Student], classes: &[Class]) -> Vec<PreferenceIssue> {
    let issues: Vec<PreferenceIssue> = roster
        .iter()
        .filter_map(|student| {
            let Some(class) = classes.iter().find(|c| c.contains(student.id)) else {
                return Some(PreferenceIssue::Unassigned {
                    student_id: student.id,
                });
            };
            let with_peer = student.preferred.iter().any(|peer| class.contains(*peer));
            (!with_peer).then_some(PreferenceIssue::NoPreferredPeer {
                student_id: student.id,
            })
        })
        .collect();

    info!(
        "Preference audit found {} issues across {} students.",
        issues.len(),
        roster.len()
    );
    issues
}

/// Occupied seats per quota category, one summary per class.
pub fn summarize(classes: &[Class]) -> Vec<ClassSummary> {
    classes
        .iter()
        .map(|class| {
            if class.is_empty() {
                warn!("Class {} is empty.", class.name());
            }
            let summary = ClassSummary {
                name: class.name().to_string(),
                size: class.len(),
                sva: class.sva_count(),
                svast: class.svast_count(),
                spanish: class.language_count(Language::Spanish),
                french: class.language_count(Language::French),
                german: class.language_count(Language::German),
            };
            info!("{}", summary);
            summary
        })
        .collect()
}
