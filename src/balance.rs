use crate::capacity::can_admit;
use crate::data::Class;
use log::{info, trace};

/// Moves students out of classes larger than `ceil(student_count / classes)`
/// into the currently smallest class, one student per iteration.
///
/// Stops at the first iteration that cannot move anyone. That may leave
/// classes imbalanced when every member of the largest class is blocked by a
/// quota at the smallest one.
pub fn balance(classes: &mut [Class], student_count: usize) {
    if classes.is_empty() {
        return;
    }
    let avg = student_count.div_ceil(classes.len());
    let moves = reduce_while_above(classes, avg);
    info!("Balance pass made {} moves (target size {}); spread now {}.", moves, avg, spread(classes));
}

/// Like [`balance`] but targets `round(student_count / classes)`, halves
/// rounding up, and keeps going while any class is above it.
pub fn evenly(classes: &mut [Class], student_count: usize) {
    if classes.is_empty() {
        return;
    }
    let ideal = rounded_quotient(student_count, classes.len());
    let moves = reduce_while_above(classes, ideal);
    info!("Evenly pass made {} moves (target size {}); spread now {}.", moves, ideal, spread(classes));
}

fn rounded_quotient(numerator: usize, denominator: usize) -> usize {
    (2 * numerator + denominator) / (2 * denominator)
}

fn reduce_while_above(classes: &mut [Class], target: usize) -> usize {
    let mut moves = 0;
    while let Some((from, to)) = extremes(classes) {
        if classes[from].len() <= target {
            break;
        }
        // a move has to narrow the gap or the pair just trades places forever
        if classes[to].len() + 1 >= classes[from].len() {
            break;
        }
        if !move_first_admissible(classes, from, to) {
            break;
        }
        moves += 1;
    }
    moves
}

/// Indices of the largest and smallest classes, first one wins on ties.
fn extremes(classes: &[Class]) -> Option<(usize, usize)> {
    let first = classes.first()?;
    let (mut largest, mut smallest) = (0, 0);
    let (mut max, mut min) = (first.len(), first.len());
    for (index, class) in classes.iter().enumerate().skip(1) {
        if class.len() > max {
            largest = index;
            max = class.len();
        }
        if class.len() < min {
            smallest = index;
            min = class.len();
        }
    }
    Some((largest, smallest))
}

fn move_first_admissible(classes: &mut [Class], from: usize, to: usize) -> bool {
    let position = classes[from]
        .students
        .iter()
        .position(|student| can_admit(&classes[to], student));
    match position {
        Some(position) => {
            let student = classes[from].students.remove(position);
            trace!(
                "Moving student {} from class {} to class {}.",
                student.id,
                classes[from].name(),
                classes[to].name()
            );
            classes[to].students.push(student);
            true
        }
        None => false,
    }
}

fn spread(classes: &[Class]) -> usize {
    match extremes(classes) {
        Some((largest, smallest)) => classes[largest].len() - classes[smallest].len(),
        None => 0,
    }
}
