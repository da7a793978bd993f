use good_lp::{ResolutionError, Solution, SolutionStatus, SolverModel, default_solver};
use log::{info, warn};
use std::time::Instant;

use crate::data::{SchedulingInput, SolveOutcome, SolveStatus};
use crate::model::ShiftModel;
use crate::report::{check_schedule, materialize};
use crate::validate::InputError;

/// solves the shift scheduling problem using the HiGHS MIP solver.
///
/// Invalid input is an error; infeasible or undecided models are a
/// [`SolveOutcome::NoSolution`], never an error.
pub fn solve(input: &SchedulingInput) -> Result<SolveOutcome, InputError> {
    let model = ShiftModel::build(input)?;
    Ok(solve_model(input, model))
}

/// Hands an already built model to HiGHS and materializes the answer.
pub fn solve_model(input: &SchedulingInput, model: ShiftModel) -> SolveOutcome {
    let start_time = Instant::now();
    info!("Starting MIP solver on {} constraints...", model.num_constraints());
    let ShiftModel {
        variables,
        objective,
        constraints,
        assignments,
        axis,
        ..
    } = model;
    let log_flag = if input.solver_log { "true" } else { "false" };

    let mut problem = variables
        .minimise(objective)
        .using(default_solver)
        .set_option("threads", 1) // limit to 1 thread for reproducibility
        .set_option("random_seed", 1234) //set seed for reproducibility
        .set_option("output_flag", log_flag)
        .set_option("log_to_console", log_flag);
    if let Some(secs) = input.time_limit_seconds {
        problem = problem.set_option("time_limit", secs);
    }
    for constraint in constraints {
        problem.add_constraint(constraint);
    }

    let solution = match problem.solve() {
        Ok(s) => s,
        Err(ResolutionError::Infeasible) => {
            warn!("Solver proved the model infeasible after {:.2?}", start_time.elapsed());
            return SolveOutcome::NoSolution {
                status: SolveStatus::Infeasible,
                detail: ResolutionError::Infeasible.to_string(),
            };
        }
        Err(e) => {
            warn!("Solver stopped without a schedule: {}", e);
            return SolveOutcome::NoSolution {
                status: SolveStatus::Unknown,
                detail: e.to_string(),
            };
        }
    };
    let status = match solution.status() {
        SolutionStatus::Optimal => SolveStatus::Optimal,
        _ => SolveStatus::Feasible,
    };
    info!("{} solution found in {:.2?}", status, start_time.elapsed());

    let assigned = assignments.map(|&var| solution.value(var) > 0.5);

    // a budget-limited run can hand back values that are not a schedule
    let violations = check_schedule(input, axis, &assigned);
    if let Some(first) = violations.first() {
        warn!("Discarding solver values: {} rule violations, first {}", violations.len(), first);
        return SolveOutcome::NoSolution {
            status: SolveStatus::Unknown,
            detail: format!("solver returned an invalid schedule: {}", first),
        };
    }

    SolveOutcome::Scheduled(materialize(input, axis, &assigned, status))
}
