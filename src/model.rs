use good_lp::{Constraint, Expression, ProblemVariables, Variable, variable};
use log::{info, trace};

use crate::data::SchedulingInput;
use crate::grid::{Grid, SlotAxis};
use crate::rules;
use crate::validate::{InputError, validate_input};

/// A fully specified shift-scheduling MIP, ready to hand to a solver.
///
/// Built in one go by [`ShiftModel::build`]; solving consumes it.
pub struct ShiftModel {
    pub(crate) variables: ProblemVariables,
    pub(crate) objective: Expression,
    pub(crate) constraints: Vec<Constraint>,
    /// `x[(i, s)]` is 1 iff worker `i` works slot `s`.
    pub(crate) assignments: Grid<Variable>,
    pub(crate) axis: SlotAxis,
}

impl ShiftModel {
    /// Validates `input`, declares the variables and composes every rule.
    pub fn build(input: &SchedulingInput) -> Result<Self, InputError> {
        validate_input(input)?;

        let workers = input.num_workers();
        let axis = SlotAxis::new(input.num_shifts(), input.num_days);
        info!(
            "Setting up MIP model with {} workers, {} shift types and {} days ({} slots)...",
            workers,
            axis.num_shifts,
            axis.num_days,
            axis.num_slots()
        );

        let mut variables = ProblemVariables::new();
        let assignments = Grid::from_fn(workers as usize, axis.num_slots() as usize, |_, _| {
            variables.add(variable().binary())
        });
        // work_day[(i, d)] is 1 iff worker i works any slot on day d
        let work_days = Grid::from_fn(workers as usize, axis.num_days as usize, |_, _| {
            variables.add(variable().binary())
        });
        trace!(
            "Declared {} assignment and {} work-day variables.",
            assignments.rows() * assignments.cols(),
            work_days.rows() * work_days.cols()
        );

        let objective = preference_cost(input, axis, &assignments);
        info!("Objective defined as total preference rank of assigned shifts.");

        let rule_set = &input.rules;
        let mut constraints = Vec::new();
        let mut compose = |name: &str, batch: Vec<Constraint>| {
            info!("Adding {} '{}' constraints...", batch.len(), name);
            constraints.extend(batch);
        };
        compose("work-day link", rules::link_work_days(workers, axis, &assignments, &work_days));
        compose("coverage", rules::coverage(input, axis, &assignments));
        compose("minimum rest", rules::minimum_rest(workers, axis, rule_set, &assignments));
        compose(
            "max consecutive days",
            rules::max_consecutive_days(workers, axis, rule_set, &work_days),
        );
        compose("workload band", rules::workload_band(workers, axis, rule_set, &assignments));
        if rule_set.one_shift_per_day {
            compose("one shift per day", rules::one_shift_per_day(workers, axis, &assignments));
        }

        Ok(Self {
            variables,
            objective,
            constraints,
            assignments,
            axis,
        })
    }

    pub fn num_constraints(&self) -> usize {
        self.constraints.len()
    }
}

/// Sum over workers and slots of `preference[i][s % num_shifts] * x[i, s]`.
fn preference_cost(input: &SchedulingInput, axis: SlotAxis, x: &Grid<Variable>) -> Expression {
    (0..input.num_workers())
        .flat_map(|i| (0..axis.num_slots()).map(move |s| (i, s)))
        .map(|(i, s)| input.preference(i, axis.shift_of(s)) as f64 * Expression::from(x[(i, s)]))
        .fold(Expression::from(0.0), |acc, term| acc + term)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn sample_model_has_every_rule() {
        let model = ShiftModel::build(&SchedulingInput::sample()).unwrap();
        assert_eq!(model.axis.num_slots(), 93);
        assert_eq!(model.assignments.rows(), 7);
        assert_eq!(model.assignments.cols(), 93);
        let link = 7 * 31 * 4;
        let coverage = 93;
        let rest = 7 * 91;
        let consecutive = 7 * 25;
        let band = 7 * 2;
        let per_day = 7 * 31;
        assert_eq!(
            model.num_constraints(),
            link + coverage + rest + consecutive + band + per_day
        );
    }

    #[test]
    fn per_day_rule_is_optional() {
        let mut input = SchedulingInput::sample();
        input.rules.one_shift_per_day = false;
        let model = ShiftModel::build(&input).unwrap();
        assert_eq!(model.num_constraints(), 7 * 31 * 4 + 93 + 7 * 91 + 7 * 25 + 7 * 2);
    }

    #[test]
    fn invalid_input_never_builds() {
        let mut input = SchedulingInput::sample();
        input.num_days = 5;
        assert!(matches!(
            ShiftModel::build(&input),
            Err(InputError::HorizonTooShort { .. })
        ));
    }
}
