use std::ops::{Index, IndexMut};

use crate::data::{Day, ShiftType, Slot, WorkerId};

/// Dense row-major grid, one row per worker.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Grid<T> {
    rows: usize,
    cols: usize,
    cells: Vec<T>,
}

impl<T> Grid<T> {
    pub fn from_fn(rows: usize, cols: usize, mut f: impl FnMut(usize, usize) -> T) -> Self {
        let mut cells = Vec::with_capacity(rows * cols);
        for r in 0..rows {
            for c in 0..cols {
                cells.push(f(r, c));
            }
        }
        Self { rows, cols, cells }
    }

    pub fn rows(&self) -> usize {
        self.rows
    }

    pub fn cols(&self) -> usize {
        self.cols
    }

    pub fn map<U>(&self, f: impl FnMut(&T) -> U) -> Grid<U> {
        Grid {
            rows: self.rows,
            cols: self.cols,
            cells: self.cells.iter().map(f).collect(),
        }
    }
}

impl<T> Index<(WorkerId, u32)> for Grid<T> {
    type Output = T;

    fn index(&self, (worker, col): (WorkerId, u32)) -> &T {
        &self.cells[worker as usize * self.cols + col as usize]
    }
}

impl<T> IndexMut<(WorkerId, u32)> for Grid<T> {
    fn index_mut(&mut self, (worker, col): (WorkerId, u32)) -> &mut T {
        &mut self.cells[worker as usize * self.cols + col as usize]
    }
}

/// The flattened (day, shift type) time axis.
///
/// Slot `s` is shift type `s % num_shifts` on day `s / num_shifts`, so
/// "consecutive shifts" are consecutive integers even across midnight.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SlotAxis {
    pub num_shifts: u32,
    pub num_days: u32,
}

impl SlotAxis {
    pub fn new(num_shifts: u32, num_days: u32) -> Self {
        Self { num_shifts, num_days }
    }

    pub fn num_slots(&self) -> u32 {
        self.num_shifts * self.num_days
    }

    pub fn slot(&self, day: Day, shift: ShiftType) -> Slot {
        day * self.num_shifts + shift
    }

    pub fn day_of(&self, slot: Slot) -> Day {
        slot / self.num_shifts
    }

    pub fn shift_of(&self, slot: Slot) -> ShiftType {
        slot % self.num_shifts
    }

    /// All slots belonging to `day`, in shift-type order.
    pub fn slots_of_day(&self, day: Day) -> impl Iterator<Item = Slot> + Clone {
        let first = self.slot(day, 0);
        first..first + self.num_shifts
    }

    /// Start slots of every full window of `width` consecutive slots.
    pub fn slot_windows(&self, width: u32) -> impl Iterator<Item = Slot> + Clone {
        full_windows(self.num_slots(), width)
    }

    /// Start days of every full window of `width` consecutive days.
    pub fn day_windows(&self, width: u32) -> impl Iterator<Item = Day> + Clone {
        full_windows(self.num_days, width)
    }
}

fn full_windows(len: u32, width: u32) -> std::ops::Range<u32> {
    0..(len + 1).saturating_sub(width)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn slot_flattening_round_trips_day_and_shift() {
        let axis = SlotAxis::new(3, 31);
        assert_eq!(axis.num_slots(), 93);
        assert_eq!(axis.slot(4, 2), 14);
        assert_eq!(axis.day_of(14), 4);
        assert_eq!(axis.shift_of(14), 2);
        assert_eq!(axis.slots_of_day(1).collect::<Vec<_>>(), vec![3, 4, 5]);
    }

    #[test]
    fn windows_stay_inside_the_horizon() {
        let axis = SlotAxis::new(3, 7);
        // s + 2 < 21
        assert_eq!(axis.slot_windows(3).count(), 19);
        assert_eq!(axis.slot_windows(3).last(), Some(18));
        assert_eq!(axis.day_windows(7).collect::<Vec<_>>(), vec![0]);
        assert_eq!(SlotAxis::new(3, 6).day_windows(7).count(), 0);
    }

    #[test]
    fn grid_indexes_by_worker_and_column() {
        let mut grid = Grid::from_fn(2, 3, |r, c| r * 10 + c);
        assert_eq!(grid[(1, 2)], 12);
        grid[(0, 1)] = 99;
        assert_eq!(grid.map(|&v| v % 10)[(0, 1)], 9);
        assert_eq!(grid.rows(), 2);
        assert_eq!(grid.cols(), 3);
    }
}
