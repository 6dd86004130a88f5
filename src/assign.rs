use crate::capacity::can_admit;
use crate::data::{Class, Language, Student, StudentId};
use log::{info, trace};
use rand::Rng;
use rand::seq::SliceRandom;

/// Drains `pool` into `classes` and returns the students that could not be
/// placed anywhere.
///
/// Each round runs three strategies in order: elective-quota priority,
/// preferred-peer affinity, then a shuffled first-fit. Rounds repeat until
/// the pool is empty or a whole round places nobody. Earlier placements are
/// never revisited.
pub fn assign<R: Rng + ?Sized>(
    pool: Vec<Student>,
    classes: &mut [Class],
    rng: &mut R,
) -> Vec<Student> {
    let mut pool = pool;
    let mut round = 0;

    while !pool.is_empty() {
        round += 1;
        let before = pool.len();

        for language in Language::PRIORITY {
            pool = place_by_language(pool, language, classes);
        }
        pool = place_by_preference(pool, classes);
        pool.shuffle(rng);
        pool = place_first_fit(pool, classes);

        let placed = before - pool.len();
        trace!(
            "Round {}: placed {} students, {} still unassigned.",
            round,
            placed,
            pool.len()
        );
        if placed == 0 {
            break;
        }
    }

    info!(
        "Assignment finished after {} rounds with {} students unassigned.",
        round,
        pool.len()
    );
    pool
}

/// Places `student` in the first class, in declared order, that admits them.
/// Hands the student back if none does.
fn place_in_first_admitting(student: Student, classes: &mut [Class]) -> Result<(), Student> {
    match classes.iter_mut().find(|class| can_admit(class, &student)) {
        Some(class) => {
            class.students.push(student);
            Ok(())
        }
        None => Err(student),
    }
}

fn place_by_language(pool: Vec<Student>, language: Language, classes: &mut [Class]) -> Vec<Student> {
    let mut remaining = Vec::with_capacity(pool.len());
    for student in pool {
        if student.language != Some(language) {
            remaining.push(student);
            continue;
        }
        if let Err(student) = place_in_first_admitting(student, classes) {
            remaining.push(student);
        }
    }
    remaining
}

/// Index of the first class, in preference order, that holds a placed peer
/// and admits `student`. Each placed peer's class is tried once; unplaced
/// and unknown ids are skipped.
fn class_of_admitting_peer(student: &Student, classes: &[Class]) -> Option<usize> {
    student
        .preferred
        .iter()
        .filter_map(|peer| classes.iter().position(|class| class.contains(*peer)))
        .find(|&index| can_admit(&classes[index], student))
}

fn place_by_preference(pool: Vec<Student>, classes: &mut [Class]) -> Vec<Student> {
    let mut remaining = Vec::with_capacity(pool.len());
    for student in pool {
        match class_of_admitting_peer(&student, classes) {
            Some(index) => classes[index].students.push(student),
            None => remaining.push(student),
        }
    }
    remaining
}

fn place_first_fit(pool: Vec<Student>, classes: &mut [Class]) -> Vec<Student> {
    pool.into_iter()
        .filter_map(|student| place_in_first_admitting(student, classes).err())
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::data::ClassSpec;
    use crate::fixtures::{
        assert_conserved, assert_quotas_hold, open_classes, open_spec, preferring, sizes, speaking,
        student,
    };
    use rand::SeedableRng;
    use rand::rngs::SmallRng;

    fn rng() -> SmallRng {
        SmallRng::seed_from_u64(7)
    }

    #[test]
    fn language_quota_spreads_students_across_classes() {
        let spec = |name: &str| ClassSpec {
            max_spanish: 2,
            ..open_spec(name)
        };
        let mut classes: Vec<Class> = ["A", "B", "C"].iter().map(|n| Class::new(spec(n))).collect();
        let pool: Vec<Student> = (1..=6).map(|id| speaking(id, Language::Spanish)).collect();

        let unassigned = assign(pool, &mut classes, &mut rng());

        assert!(unassigned.is_empty());
        assert_eq!(sizes(&classes), vec![2, 2, 2]);
        assert_quotas_hold(&classes);
    }

    #[test]
    fn overflow_is_returned_not_raised() {
        let spec = ClassSpec {
            max_german: 1,
            ..open_spec("A")
        };
        let mut classes = vec![Class::new(spec)];
        let pool = vec![speaking(1, Language::German), speaking(2, Language::German)];

        let unassigned = assign(pool, &mut classes, &mut rng());

        assert_eq!(classes[0].len(), 1);
        assert_eq!(unassigned.len(), 1);
        assert_conserved(&[1, 2], &classes, &unassigned);
    }

    #[test]
    fn size_cap_leaves_the_33rd_student_out() {
        let mut classes = open_classes(&["A"]);
        let ids: Vec<StudentId> = (1..=33).collect();
        let pool = ids.iter().copied().map(student).collect();

        let unassigned = assign(pool, &mut classes, &mut rng());

        assert_eq!(classes[0].len(), 32);
        assert_eq!(unassigned.len(), 1);
        assert_conserved(&ids, &classes, &unassigned);
    }

    #[test]
    fn scarce_electives_are_claimed_before_general_seats() {
        let spec = ClassSpec {
            max_french: 1,
            ..open_spec("A")
        };
        let mut classes = vec![Class::new(spec)];
        let mut pool: Vec<Student> = (1..=32).map(student).collect();
        pool.push(speaking(40, Language::French));

        let unassigned = assign(pool, &mut classes, &mut rng());

        assert_eq!(classes[0].students[0].id, 40);
        assert_eq!(unassigned.len(), 1);
        assert_ne!(unassigned[0].id, 40);
    }

    #[test]
    fn preference_follows_an_already_placed_peer() {
        let mut classes = open_classes(&["A", "B"]);
        classes[1].students.push(speaking(2, Language::Spanish));

        let remaining = place_by_preference(vec![preferring(1, &[2])], &mut classes);

        assert!(remaining.is_empty());
        assert!(classes[1].contains(1));
        assert!(!classes[0].contains(1));
    }

    #[test]
    fn preference_moves_on_when_a_peer_class_is_closed() {
        let mut classes = vec![
            Class::new(open_spec("A")),
            Class::new(ClassSpec {
                max_sva: 0,
                ..open_spec("B")
            }),
            Class::new(open_spec("C")),
        ];
        classes[1].students.push(student(2));
        classes[2].students.push(student(3));
        let picky = Student {
            sva: true,
            ..preferring(1, &[2, 3])
        };

        let remaining = place_by_preference(vec![picky], &mut classes);

        assert!(remaining.is_empty());
        assert!(classes[2].contains(1));
        assert!(!classes[0].contains(1));
        assert!(!classes[1].contains(1));
    }

    #[test]
    fn preference_never_falls_back_to_a_class_without_a_peer() {
        let mut classes = vec![
            Class::new(open_spec("A")),
            Class::new(ClassSpec {
                max_sva: 0,
                ..open_spec("B")
            }),
        ];
        classes[1].students.push(student(2));
        let picky = Student {
            sva: true,
            ..preferring(1, &[2, 404])
        };

        let remaining = place_by_preference(vec![picky], &mut classes);

        assert_eq!(remaining.len(), 1);
        assert!(classes.iter().all(|c| !c.contains(1)));
    }

    #[test]
    fn spanish_outranks_french_for_the_last_seat() {
        let mut classes = open_classes(&["A"]);
        classes[0].students = (1..=31).map(student).collect();
        let pool = vec![speaking(40, Language::French), speaking(41, Language::Spanish)];

        let unassigned = assign(pool, &mut classes, &mut rng());

        assert!(classes[0].contains(41));
        assert_eq!(unassigned.len(), 1);
        assert_eq!(unassigned[0].id, 40);
    }

    #[test]
    fn french_outranks_german_for_the_last_seat() {
        let mut classes = open_classes(&["A"]);
        classes[0].students = (1..=31).map(student).collect();
        let pool = vec![speaking(40, Language::German), speaking(41, Language::French)];

        let unassigned = assign(pool, &mut classes, &mut rng());

        assert!(classes[0].contains(41));
        assert_eq!(unassigned[0].id, 40);
    }

    #[test]
    fn preference_skips_unplaced_and_unknown_peers() {
        let mut classes = open_classes(&["A", "B"]);
        classes[1].students.push(student(5));

        let remaining = place_by_preference(
            vec![preferring(1, &[999]), preferring(2, &[3, 5])],
            &mut classes,
        );

        assert_eq!(remaining.len(), 1);
        assert_eq!(remaining[0].id, 1);
        assert!(classes[1].contains(2));
    }

    #[test]
    fn full_run_places_a_preferring_student_with_their_placed_peer() {
        let spec = |name: &str, german| ClassSpec {
            max_german: german,
            ..open_spec(name)
        };
        let mut classes = vec![Class::new(spec("A", 0)), Class::new(spec("B", 1))];
        let pool = vec![preferring(1, &[2]), speaking(2, Language::German)];

        let unassigned = assign(pool, &mut classes, &mut rng());

        assert!(unassigned.is_empty());
        assert!(classes[1].contains(1));
        assert!(classes[1].contains(2));
    }

    #[test]
    fn seeded_runs_are_reproducible() {
        let pool: Vec<Student> = (1..=40).map(student).collect();
        let run = || {
            let mut classes = open_classes(&["A", "B"]);
            let mut rng = SmallRng::seed_from_u64(42);
            assign(pool.clone(), &mut classes, &mut rng);
            classes
                .iter()
                .map(|c| c.students.iter().map(|s| s.id).collect::<Vec<_>>())
                .collect::<Vec<_>>()
        };

        assert_eq!(run(), run());
    }

    #[test]
    fn empty_pool_terminates_immediately() {
        let mut classes = open_classes(&["A"]);
        let unassigned = assign(Vec::new(), &mut classes, &mut rng());
        assert!(unassigned.is_empty());
        assert!(classes[0].is_empty());
    }

    #[test]
    fn mixed_roster_respects_quotas_and_conserves_students() {
        let mut classes: Vec<Class> = ClassSpec::default_layout().into_iter().map(Class::new).collect();
        let ids: Vec<StudentId> = (1..=170).collect();
        let pool: Vec<Student> = ids
            .iter()
            .map(|&id| Student {
                language: match id % 4 {
                    0 => Some(Language::Spanish),
                    1 => Some(Language::French),
                    2 => Some(Language::German),
                    _ => None,
                },
                sva: id % 5 == 0,
                svast: id % 7 == 0,
                preferred: vec![id + 1, id + 300],
                ..student(id)
            })
            .collect();

        let unassigned = assign(pool, &mut classes, &mut rng());

        assert_quotas_hold(&classes);
        assert_conserved(&ids, &classes, &unassigned);
    }
}
