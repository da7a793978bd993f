//! Input checks run before any solver variable is declared.

use std::fmt;

use crate::data::SchedulingInput;

/// Shape or range problem in a [`SchedulingInput`], naming the offending field.
#[derive(Debug, Clone, PartialEq)]
pub enum InputError {
    NoWorkers,
    NoShiftTypes,
    RaggedPreferences { worker: usize, expected: usize, found: usize },
    ZeroPreference { worker: usize, shift: usize },
    StaffingLength { expected: usize, found: usize },
    StaffingExceedsWorkforce { shift: usize, required: u32, workers: u32 },
    NoDays,
    HorizonTooShort { num_days: u32, window: u32 },
    RuleWindow { field: &'static str, value: u32, limit: u32 },
    ShiftsPerDayUnbounded { rest_window: u32, num_shifts: u32 },
    WorkloadBand { min: u32, max: u32 },
    TimeLimit(f64),
}

impl fmt::Display for InputError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            InputError::NoWorkers => write!(f, "workerPreferences: at least one worker is required"),
            InputError::NoShiftTypes => {
                write!(f, "workerPreferences: worker 1 ranks no shift types")
            }
            InputError::RaggedPreferences { worker, expected, found } => write!(
                f,
                "workerPreferences: worker {} ranks {} shift types, expected {}",
                worker + 1,
                found,
                expected
            ),
            InputError::ZeroPreference { worker, shift } => write!(
                f,
                "workerPreferences: worker {} gives shift type {} rank 0, ranks start at 1",
                worker + 1,
                shift + 1
            ),
            InputError::StaffingLength { expected, found } => write!(
                f,
                "shiftStaffing: {} entries for {} shift types",
                found, expected
            ),
            InputError::StaffingExceedsWorkforce { shift, required, workers } => write!(
                f,
                "shiftStaffing: shift type {} needs {} workers but only {} exist",
                shift + 1,
                required,
                workers
            ),
            InputError::NoDays => write!(f, "numDays: must be at least 1"),
            InputError::HorizonTooShort { num_days, window } => write!(
                f,
                "numDays: {} days is shorter than the {} day consecutive-work window",
                num_days, window
            ),
            InputError::RuleWindow { field, value, limit } => write!(
                f,
                "{}: {} is too large, at most {} fits the horizon",
                field, value, limit
            ),
            InputError::ShiftsPerDayUnbounded { rest_window, num_shifts } => write!(
                f,
                "rules: oneShiftPerDay is off and a {} slot rest window cannot keep {} shift types apart",
                rest_window, num_shifts
            ),
            InputError::WorkloadBand { min, max } => write!(
                f,
                "rules: minShifts ({}) is greater than maxShifts ({})",
                min, max
            ),
            InputError::TimeLimit(secs) => {
                write!(f, "timeLimitSeconds: {} is not a positive number of seconds", secs)
            }
        }
    }
}

impl std::error::Error for InputError {}

/// Checks dimensions and ranges, reporting the first problem found.
pub fn validate_input(input: &SchedulingInput) -> Result<(), InputError> {
    let prefs = &input.worker_preferences;
    let Some(first) = prefs.first() else {
        return Err(InputError::NoWorkers);
    };
    if first.is_empty() {
        return Err(InputError::NoShiftTypes);
    }

    let num_shifts = first.len();
    for (worker, row) in prefs.iter().enumerate() {
        if row.len() != num_shifts {
            return Err(InputError::RaggedPreferences {
                worker,
                expected: num_shifts,
                found: row.len(),
            });
        }
        if let Some(shift) = row.iter().position(|&rank| rank == 0) {
            return Err(InputError::ZeroPreference { worker, shift });
        }
    }

    if input.shift_staffing.len() != num_shifts {
        return Err(InputError::StaffingLength {
            expected: num_shifts,
            found: input.shift_staffing.len(),
        });
    }
    let workers = input.num_workers();
    for (shift, &required) in input.shift_staffing.iter().enumerate() {
        if required > workers {
            return Err(InputError::StaffingExceedsWorkforce { shift, required, workers });
        }
    }

    if input.num_days == 0 {
        return Err(InputError::NoDays);
    }
    let rules = &input.rules;
    if rules.max_consecutive_days == u32::MAX {
        return Err(InputError::RuleWindow {
            field: "rules.maxConsecutiveDays",
            value: rules.max_consecutive_days,
            limit: input.num_days - 1,
        });
    }
    let window = input.rules.day_window();
    if input.num_days < window {
        return Err(InputError::HorizonTooShort { num_days: input.num_days, window });
    }

    // a rest window longer than the horizon would post no window at all
    let num_slots = input.num_days.saturating_mul(num_shifts as u32);
    if rules.min_rest_slots >= num_slots {
        return Err(InputError::RuleWindow {
            field: "rules.minRestSlots",
            value: rules.min_rest_slots,
            limit: num_slots - 1,
        });
    }
    // the timetable holds one cell per worker and day
    if !rules.one_shift_per_day && rules.rest_window() < num_shifts as u32 {
        return Err(InputError::ShiftsPerDayUnbounded {
            rest_window: rules.rest_window(),
            num_shifts: num_shifts as u32,
        });
    }

    if input.rules.min_shifts > input.rules.max_shifts {
        return Err(InputError::WorkloadBand {
            min: input.rules.min_shifts,
            max: input.rules.max_shifts,
        });
    }

    if let Some(secs) = input.time_limit_seconds {
        if !secs.is_finite() || secs <= 0.0 {
            return Err(InputError::TimeLimit(secs));
        }
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn sample_is_valid() {
        assert_eq!(validate_input(&SchedulingInput::sample()), Ok(()));
    }

    #[test]
    fn empty_preferences_rejected() {
        let input = SchedulingInput::new(vec![], vec![1], 31);
        assert_eq!(validate_input(&input), Err(InputError::NoWorkers));

        let input = SchedulingInput::new(vec![vec![]], vec![], 31);
        assert_eq!(validate_input(&input), Err(InputError::NoShiftTypes));
    }

    #[test]
    fn ragged_matrix_names_the_worker() {
        let input = SchedulingInput::new(vec![vec![1, 2], vec![1]], vec![1, 1], 31);
        let err = validate_input(&input).unwrap_err();
        assert_eq!(
            err,
            InputError::RaggedPreferences { worker: 1, expected: 2, found: 1 }
        );
        assert!(err.to_string().starts_with("workerPreferences"));
        assert!(err.to_string().contains("worker 2"));
    }

    #[test]
    fn zero_rank_rejected() {
        let input = SchedulingInput::new(vec![vec![1, 0]], vec![1, 0], 31);
        assert_eq!(
            validate_input(&input),
            Err(InputError::ZeroPreference { worker: 0, shift: 1 })
        );
    }

    #[test]
    fn staffing_length_must_match_shift_types() {
        let input = SchedulingInput::new(vec![vec![1, 2, 3]], vec![1, 1], 31);
        let err = validate_input(&input).unwrap_err();
        assert_eq!(err, InputError::StaffingLength { expected: 3, found: 2 });
        assert!(err.to_string().starts_with("shiftStaffing"));
    }

    #[test]
    fn overstaffing_rejected_before_solving() {
        let mut input = SchedulingInput::sample();
        let workers = input.num_workers();
        input.shift_staffing = vec![workers + 1, 0, 0];
        assert_eq!(
            validate_input(&input),
            Err(InputError::StaffingExceedsWorkforce {
                shift: 0,
                required: workers + 1,
                workers
            })
        );
    }

    #[test]
    fn horizon_must_cover_a_week() {
        let mut input = SchedulingInput::sample();
        input.num_days = 0;
        assert_eq!(validate_input(&input), Err(InputError::NoDays));

        input.num_days = 6;
        let err = validate_input(&input).unwrap_err();
        assert_eq!(err, InputError::HorizonTooShort { num_days: 6, window: 7 });
        assert!(err.to_string().starts_with("numDays"));

        input.num_days = 7;
        assert_eq!(validate_input(&input), Ok(()));
    }

    #[test]
    fn oversized_consecutive_day_limit_is_an_error() {
        let json = r#"{
            "workerPreferences": [[1, 2, 3]],
            "shiftStaffing": [1, 0, 0],
            "rules": { "maxConsecutiveDays": 4294967295 }
        }"#;
        let input: SchedulingInput = serde_json::from_str(json).unwrap();
        let err = validate_input(&input).unwrap_err();
        assert_eq!(
            err,
            InputError::RuleWindow {
                field: "rules.maxConsecutiveDays",
                value: u32::MAX,
                limit: 30
            }
        );
        assert!(err.to_string().starts_with("rules.maxConsecutiveDays"));
    }

    #[test]
    fn rest_window_must_fit_the_horizon() {
        let mut input = SchedulingInput::sample();
        input.rules.min_rest_slots = 93;
        assert_eq!(
            validate_input(&input),
            Err(InputError::RuleWindow { field: "rules.minRestSlots", value: 93, limit: 92 })
        );
        input.rules.min_rest_slots = u32::MAX;
        assert!(matches!(validate_input(&input), Err(InputError::RuleWindow { .. })));
        input.rules.min_rest_slots = 92;
        assert_eq!(validate_input(&input), Ok(()));
    }

    #[test]
    fn two_shifts_a_day_need_a_guard() {
        let mut input = SchedulingInput::sample();
        input.rules.one_shift_per_day = false;
        // default rest window of 3 already spans a whole day
        assert_eq!(validate_input(&input), Ok(()));

        input.rules.min_rest_slots = 0;
        assert_eq!(
            validate_input(&input),
            Err(InputError::ShiftsPerDayUnbounded { rest_window: 1, num_shifts: 3 })
        );

        input.rules.one_shift_per_day = true;
        assert_eq!(validate_input(&input), Ok(()));
    }

    #[test]
    fn inverted_workload_band_rejected() {
        let mut input = SchedulingInput::sample();
        input.rules.min_shifts = 21;
        assert_eq!(
            validate_input(&input),
            Err(InputError::WorkloadBand { min: 21, max: 20 })
        );
    }

    #[test]
    fn time_limit_must_be_positive() {
        let mut input = SchedulingInput::sample();
        input.time_limit_seconds = Some(0.0);
        assert_eq!(validate_input(&input), Err(InputError::TimeLimit(0.0)));
        input.time_limit_seconds = Some(30.0);
        assert_eq!(validate_input(&input), Ok(()));
    }
}
