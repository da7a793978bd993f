use serde::{Deserialize, Serialize};
use std::fmt;

// Type aliases for clarity
pub type WorkerId = u32;
pub type ShiftType = u32;
pub type Day = u32;
pub type Slot = u32;

/// Parameters of the hard scheduling rules.
#[derive(Debug, Clone, PartialEq, Deserialize, Serialize)]
#[serde(rename_all = "camelCase", default)]
pub struct RuleSet {
    /// Slots a worker must stay off after starting a shift.
    pub min_rest_slots: u32,
    /// Longest allowed run of work days inside any rolling window.
    pub max_consecutive_days: u32,
    pub min_shifts: u32,
    pub max_shifts: u32,
    pub one_shift_per_day: bool,
}

impl Default for RuleSet {
    fn default() -> Self {
        Self {
            min_rest_slots: 2,
            max_consecutive_days: 6,
            min_shifts: 15,
            max_shifts: 20,
            one_shift_per_day: true,
        }
    }
}

impl RuleSet {
    pub fn rest_window(&self) -> u32 {
        self.min_rest_slots.saturating_add(1)
    }

    pub fn day_window(&self) -> u32 {
        self.max_consecutive_days.saturating_add(1)
    }
}

/// The complete input for the scheduling problem.
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct SchedulingInput {
    /// `worker_preferences[i][j]` ranks shift type `j` for worker `i`, 1 = most preferred.
    pub worker_preferences: Vec<Vec<u32>>,
    /// Workers needed for each shift type on every day.
    pub shift_staffing: Vec<u32>,
    #[serde(default = "default_num_days")]
    pub num_days: u32,
    #[serde(default)]
    pub rules: RuleSet,
    #[serde(default)]
    pub time_limit_seconds: Option<f64>,
    #[serde(default)]
    pub solver_log: bool,
}

fn default_num_days() -> u32 {
    31
}

impl SchedulingInput {
    pub fn new(worker_preferences: Vec<Vec<u32>>, shift_staffing: Vec<u32>, num_days: u32) -> Self {
        Self {
            worker_preferences,
            shift_staffing,
            num_days,
            rules: RuleSet::default(),
            time_limit_seconds: None,
            solver_log: false,
        }
    }

    /// Seven workers, staffing `[2, 1, 1]`, one 31 day month.
    pub fn sample() -> Self {
        Self::new(
            vec![
                vec![1, 2, 3],
                vec![2, 1, 3],
                vec![3, 2, 1],
                vec![2, 1, 3],
                vec![1, 2, 3],
                vec![2, 3, 1],
                vec![3, 2, 1],
            ],
            vec![2, 1, 1],
            default_num_days(),
        )
    }

    pub fn num_workers(&self) -> u32 {
        self.worker_preferences.len() as u32
    }

    pub fn num_shifts(&self) -> u32 {
        self.shift_staffing.len() as u32
    }

    pub fn preference(&self, worker: WorkerId, shift: ShiftType) -> u32 {
        self.worker_preferences[worker as usize][shift as usize]
    }

    pub fn required(&self, shift: ShiftType) -> u32 {
        self.shift_staffing[shift as usize]
    }
}

/// Terminal status reported for a solve.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum SolveStatus {
    Optimal,
    Feasible,
    Infeasible,
    Unknown,
}

impl fmt::Display for SolveStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            SolveStatus::Optimal => "OPTIMAL",
            SolveStatus::Feasible => "FEASIBLE",
            SolveStatus::Infeasible => "INFEASIBLE",
            SolveStatus::Unknown => "UNKNOWN",
        };
        f.write_str(name)
    }
}

/// One cell of the timetable.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Cell {
    /// Zero-based shift type worked that day.
    Shift(ShiftType),
    Rest,
}

impl fmt::Display for Cell {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Cell::Shift(shift) => write!(f, "{}", shift + 1), // +1 for human readability
            Cell::Rest => f.write_str("F"),
        }
    }
}

impl Serialize for Cell {
    fn serialize<S: serde::Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.collect_str(self)
    }
}

/// Shift count and preference cost of a single worker.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct WorkerSummary {
    pub worker: WorkerId,
    pub total_shifts: u32,
    pub total_score: u32,
}

/// Describes a hard rule that a materialized schedule breaks.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Violation {
    pub rule: String,
    pub description: String,
}

impl fmt::Display for Violation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "[{}] {}", self.rule, self.description)
    }
}

/// A solved timetable.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ScheduleOutput {
    pub status: SolveStatus,
    pub total_score: u32,
    pub workers: Vec<WorkerSummary>,
    /// `timetable[i][d]` is worker `i` on day `d`.
    pub timetable: Vec<Vec<Cell>>,
}

impl ScheduleOutput {
    pub fn num_days(&self) -> usize {
        self.timetable.first().map_or(0, Vec::len)
    }
}

/// Final result of a run: a schedule, or the solver status explaining why not.
#[derive(Debug, Clone, Serialize)]
#[serde(tag = "outcome", rename_all = "camelCase")]
pub enum SolveOutcome {
    Scheduled(ScheduleOutput),
    NoSolution { status: SolveStatus, detail: String },
}

impl SolveOutcome {
    pub fn status(&self) -> SolveStatus {
        match self {
            SolveOutcome::Scheduled(output) => output.status,
            SolveOutcome::NoSolution { status, .. } => *status,
        }
    }
}
