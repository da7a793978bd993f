use std::fmt::Write as _;

use itertools::Itertools;

use crate::data::{
    Cell, ScheduleOutput, SchedulingInput, SolveOutcome, SolveStatus, Violation, WorkerSummary,
};
use crate::grid::{Grid, SlotAxis};

/// Turns a solved assignment grid into summaries and a worker × day timetable.
pub fn materialize(
    input: &SchedulingInput,
    axis: SlotAxis,
    assigned: &Grid<bool>,
    status: SolveStatus,
) -> ScheduleOutput {
    let mut workers = Vec::with_capacity(assigned.rows());
    let mut timetable = Vec::with_capacity(assigned.rows());

    for worker in 0..input.num_workers() {
        let mut row = vec![Cell::Rest; axis.num_days as usize];
        let mut total_shifts = 0;
        let mut total_score = 0;
        for slot in 0..axis.num_slots() {
            if assigned[(worker, slot)] {
                let shift = axis.shift_of(slot);
                // validation keeps this to one slot per worker and day
                row[axis.day_of(slot) as usize] = Cell::Shift(shift);
                total_shifts += 1;
                total_score += input.preference(worker, shift);
            }
        }
        workers.push(WorkerSummary { worker, total_shifts, total_score });
        timetable.push(row);
    }

    ScheduleOutput {
        status,
        total_score: workers.iter().map(|w| w.total_score).sum(),
        workers,
        timetable,
    }
}

// re-verifies every hard rule on a materialized assignment
pub fn check_schedule(input: &SchedulingInput, axis: SlotAxis, assigned: &Grid<bool>) -> Vec<Violation> {
    let mut violations = Vec::new();
    let rules = &input.rules;
    let workers = input.num_workers();
    let works = |worker: u32, slots: &mut dyn Iterator<Item = u32>| -> u32 {
        slots.filter(|&s| assigned[(worker, s)]).count() as u32
    };
    let works_day = |worker: u32, day: u32| axis.slots_of_day(day).any(|s| assigned[(worker, s)]);

    for slot in 0..axis.num_slots() {
        let staffed = (0..workers).filter(|&i| assigned[(i, slot)]).count() as u32;
        let required = input.required(axis.shift_of(slot));
        if staffed != required {
            violations.push(Violation {
                rule: "Coverage".to_string(),
                description: format!(
                    "Day {} shift {} has {} workers, {} required.",
                    axis.day_of(slot) + 1,
                    axis.shift_of(slot) + 1,
                    staffed,
                    required
                ),
            });
        }
    }

    let width = rules.rest_window();
    if width >= 2 {
        for (worker, start) in (0..workers).cartesian_product(axis.slot_windows(width)) {
            let count = works(worker, &mut (start..start + width));
            if count > 1 {
                violations.push(Violation {
                    rule: "Minimum Rest".to_string(),
                    description: format!(
                        "Worker {} works {} of the {} slots starting at slot {}.",
                        worker + 1,
                        count,
                        width,
                        start
                    ),
                });
            }
        }
    }

    let width = rules.day_window();
    for (worker, start) in (0..workers).cartesian_product(axis.day_windows(width)) {
        let worked = (start..start + width).filter(|&d| works_day(worker, d)).count() as u32;
        if worked > rules.max_consecutive_days {
            violations.push(Violation {
                rule: "Max Consecutive Days".to_string(),
                description: format!(
                    "Worker {} works {} of the {} days starting at day {}.",
                    worker + 1,
                    worked,
                    width,
                    start + 1
                ),
            });
        }
    }

    for worker in 0..workers {
        let total = works(worker, &mut (0..axis.num_slots()));
        if total < rules.min_shifts || total > rules.max_shifts {
            violations.push(Violation {
                rule: "Workload Band".to_string(),
                description: format!(
                    "Worker {} works {} shifts, outside [{}, {}].",
                    worker + 1,
                    total,
                    rules.min_shifts,
                    rules.max_shifts
                ),
            });
        }
    }

    if rules.one_shift_per_day {
        for (worker, day) in (0..workers).cartesian_product(0..axis.num_days) {
            let count = works(worker, &mut axis.slots_of_day(day));
            if count > 1 {
                violations.push(Violation {
                    rule: "One Shift Per Day".to_string(),
                    description: format!("Worker {} works {} shifts on day {}.", worker + 1, count, day + 1),
                });
            }
        }
    }

    violations
}

/// Plain-text report: score, per-worker lines, then the timetable grid.
pub fn render_text(outcome: &SolveOutcome) -> String {
    let mut out = String::new();
    match outcome {
        SolveOutcome::Scheduled(output) => {
            let _ = writeln!(out, "total preference score: {}", output.total_score);
            for w in &output.workers {
                let _ = writeln!(
                    out,
                    "Worker {} total shifts: {}, total score: {}",
                    w.worker + 1,
                    w.total_shifts,
                    w.total_score
                );
            }
            out.push('\n');
            out.push_str(&render_timetable(output));
        }
        SolveOutcome::NoSolution { status, detail } => {
            let _ = writeln!(out, "no solution found");
            let _ = writeln!(out, "{}", status);
            let _ = writeln!(out, "{}", detail);
        }
    }
    out
}

fn render_timetable(output: &ScheduleOutput) -> String {
    let labels = (0..output.timetable.len()).map(|i| format!("Worker {}", i + 1)).collect_vec();
    let label_width = labels.iter().map(String::len).max().unwrap_or(0);
    let headers = (0..output.num_days()).map(|d| format!("Day {}", d + 1)).collect_vec();

    let mut out = String::new();
    let _ = writeln!(
        out,
        "{:label_width$} {}",
        "",
        headers.iter().join(" "),
        label_width = label_width
    );
    for (label, row) in labels.iter().zip(&output.timetable) {
        let cells = row
            .iter()
            .zip(&headers)
            .map(|(cell, header)| format!("{:>width$}", cell.to_string(), width = header.len()))
            .join(" ");
        let _ = writeln!(out, "{:label_width$} {}", label, cells, label_width = label_width);
    }
    out
}

/// Workers on each shift type on `day`.
#[cfg(test)]
pub(crate) fn coverage_on(output: &ScheduleOutput, day: u32, num_shifts: u32) -> Vec<u32> {
    let mut counts = vec![0; num_shifts as usize];
    for row in &output.timetable {
        if let Cell::Shift(shift) = row[day as usize] {
            counts[shift as usize] += 1;
        }
    }
    counts
}
