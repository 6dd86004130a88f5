use crate::assign::assign;
use crate::audit::{audit, summarize};
use crate::balance::{balance, evenly};
use crate::data::{Class, ClassRoster, MixInput, MixOutput};
use log::{info, trace, warn};
use rand::SeedableRng;
use rand::rngs::SmallRng;
use std::time::Instant;

/// Places the input roster into its classes, rebalances them and audits
/// the preference requests.
///
/// Students that fit nowhere come back in `unassigned`; that is not an
/// error. The only rejected input is a run without any classes.
pub fn solve(input: &MixInput) -> Result<MixOutput, String> {
    let start_time = Instant::now();
    if input.classes.is_empty() {
        return Err("At least one class is required to place students.".to_string());
    }

    info!(
        "Mixing {} students into {} classes...",
        input.students.len(),
        input.classes.len()
    );
    let mut rng = match input.seed {
        Some(seed) => {
            trace!("Using fixed seed {} for the randomized fill.", seed);
            SmallRng::seed_from_u64(seed)
        }
        None => SmallRng::from_entropy(),
    };

    let mut classes: Vec<Class> = input.classes.iter().cloned().map(Class::new).collect();
    let unassigned = assign(input.students.clone(), &mut classes, &mut rng);
    if !unassigned.is_empty() {
        warn!(
            "{} students could not be placed under the class quotas.",
            unassigned.len()
        );
    }
    summarize(&classes);

    balance(&mut classes, input.students.len());
    evenly(&mut classes, input.students.len());

    let preference_issues = audit(&input.students, &classes);
    let summaries = summarize(&classes);

    info!("Mix finished in {:.2?}", start_time.elapsed());

    Ok(MixOutput {
        classes: classes.into_iter().map(ClassRoster::from).collect(),
        unassigned,
        summaries,
        preference_issues,
    })
}
