//! Constraint generators, one per hard scheduling rule.
//!
//! Each generator only reads the variable grids and returns linear
//! constraints; the builder decides which ones to compose.

use good_lp::{Constraint, Expression, Variable, constraint};
use itertools::Itertools;

use crate::data::{RuleSet, SchedulingInput};
use crate::grid::{Grid, SlotAxis};

/// Every slot is staffed by exactly `required[s % num_shifts]` workers.
pub fn coverage(input: &SchedulingInput, axis: SlotAxis, x: &Grid<Variable>) -> Vec<Constraint> {
    (0..axis.num_slots())
        .map(|slot| {
            let assigned: Expression = (0..input.num_workers()).map(|i| x[(i, slot)]).sum();
            let required = input.required(axis.shift_of(slot)) as f64;
            constraint!(assigned == required)
        })
        .collect()
}

/// At most one assignment in every window of `min_rest_slots + 1` consecutive slots.
pub fn minimum_rest(num_workers: u32, axis: SlotAxis, rules: &RuleSet, x: &Grid<Variable>) -> Vec<Constraint> {
    let width = rules.rest_window();
    if width < 2 {
        return Vec::new();
    }
    (0..num_workers)
        .cartesian_product(axis.slot_windows(width))
        .map(|(i, start)| {
            let in_window: Expression = (start..start + width).map(|s| x[(i, s)]).sum();
            constraint!(in_window <= 1)
        })
        .collect()
}

/// No more than `max_consecutive_days` work days in any rolling window one day longer.
pub fn max_consecutive_days(
    num_workers: u32,
    axis: SlotAxis,
    rules: &RuleSet,
    work_day: &Grid<Variable>,
) -> Vec<Constraint> {
    let width = rules.day_window();
    let limit = rules.max_consecutive_days as f64;
    (0..num_workers)
        .cartesian_product(axis.day_windows(width))
        .map(|(i, start)| {
            let worked: Expression = (start..start + width).map(|d| work_day[(i, d)]).sum();
            constraint!(worked <= limit)
        })
        .collect()
}

/// Total shifts per worker over the horizon lie in `[min_shifts, max_shifts]`.
pub fn workload_band(num_workers: u32, axis: SlotAxis, rules: &RuleSet, x: &Grid<Variable>) -> Vec<Constraint> {
    let (min, max) = (rules.min_shifts as f64, rules.max_shifts as f64);
    (0..num_workers)
        .flat_map(|i| {
            let total: Expression = (0..axis.num_slots()).map(|s| x[(i, s)]).sum();
            [constraint!(total.clone() >= min), constraint!(total <= max)]
        })
        .collect()
}

/// A worker takes at most one shift type per day.
pub fn one_shift_per_day(num_workers: u32, axis: SlotAxis, x: &Grid<Variable>) -> Vec<Constraint> {
    (0..num_workers)
        .cartesian_product(0..axis.num_days)
        .map(|(i, day)| {
            let today: Expression = axis.slots_of_day(day).map(|s| x[(i, s)]).sum();
            constraint!(today <= 1)
        })
        .collect()
}

/// Ties `work_day[i, d]` to the maximum of the worker's slots on day `d`.
///
/// `work_day >= x` for each slot forces it up, `work_day <= sum` forces it
/// down when the worker is off.
pub fn link_work_days(
    num_workers: u32,
    axis: SlotAxis,
    x: &Grid<Variable>,
    work_day: &Grid<Variable>,
) -> Vec<Constraint> {
    let mut constraints = Vec::new();
    for (i, day) in (0..num_workers).cartesian_product(0..axis.num_days) {
        let flag = work_day[(i, day)];
        for slot in axis.slots_of_day(day) {
            let shift = x[(i, slot)];
            constraints.push(constraint!(flag >= shift));
        }
        let today: Expression = axis.slots_of_day(day).map(|s| x[(i, s)]).sum();
        constraints.push(constraint!(flag <= today));
    }
    constraints
}

#[cfg(test)]
mod tests {
    use super::*;
    use good_lp::{ProblemVariables, variable};

    fn binary_grid(vars: &mut ProblemVariables, rows: u32, cols: u32) -> Grid<Variable> {
        Grid::from_fn(rows as usize, cols as usize, |_, _| vars.add(variable().binary()))
    }

    #[test]
    fn generator_counts_follow_the_horizon() {
        let input = SchedulingInput::sample();
        let axis = SlotAxis::new(input.num_shifts(), input.num_days);
        let workers = input.num_workers();
        let mut vars = ProblemVariables::new();
        let x = binary_grid(&mut vars, workers, axis.num_slots());
        let work_day = binary_grid(&mut vars, workers, axis.num_days);
        let rules = &input.rules;

        assert_eq!(coverage(&input, axis, &x).len(), 93);
        // s + 2 < 93 gives 91 windows per worker
        assert_eq!(minimum_rest(workers, axis, rules, &x).len(), 7 * 91);
        // 31 - 6 windows per worker
        assert_eq!(max_consecutive_days(workers, axis, rules, &work_day).len(), 7 * 25);
        assert_eq!(workload_band(workers, axis, rules, &x).len(), 7 * 2);
        assert_eq!(one_shift_per_day(workers, axis, &x).len(), 7 * 31);
        assert_eq!(link_work_days(workers, axis, &x, &work_day).len(), 7 * 31 * 4);
    }

    #[test]
    fn zero_rest_posts_no_windows() {
        let axis = SlotAxis::new(3, 7);
        let mut vars = ProblemVariables::new();
        let x = binary_grid(&mut vars, 2, axis.num_slots());
        let rules = RuleSet { min_rest_slots: 0, ..RuleSet::default() };
        assert!(minimum_rest(2, axis, &rules, &x).is_empty());
    }
}
