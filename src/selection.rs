use chrono::{Duration, NaiveDate};
use derive_more::Display;
use std::convert::TryFrom;

use crate::provider::datetime::{first_of_month, same_month, shift_months};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Display)]
pub enum Direction {
    #[display(fmt = "forward")]
    Forward,
    #[display(fmt = "backward")]
    Backward,
}

impl Direction {
    pub fn sign(self) -> i32 {
        match self {
            Direction::Forward => 1,
            Direction::Backward => -1,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Change {
    Month(Direction),
    Selected(NaiveDate),
    Ignored,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CalendarViewState {
    displayed_month: NaiveDate,
    selected: Option<NaiveDate>,
    direction: Direction,
}

impl CalendarViewState {
    pub fn new(seed: NaiveDate, selected: Option<NaiveDate>) -> Self {
        CalendarViewState {
            displayed_month: first_of_month(seed),
            selected,
            direction: Direction::Forward,
        }
    }

    pub fn displayed_month(&self) -> NaiveDate {
        self.displayed_month
    }

    pub fn selected(&self) -> Option<NaiveDate> {
        self.selected
    }

    pub fn direction(&self) -> Direction {
        self.direction
    }

    pub fn change_month(&mut self, direction: Direction) -> Change {
        self.shift_month(direction, 1)
    }

    pub fn shift_month(&mut self, direction: Direction, count: u32) -> Change {
        if count == 0 {
            return Change::Ignored;
        }

        let target = i32::try_from(count)
            .ok()
            .and_then(|count| shift_months(self.displayed_month, direction.sign() * count));

        match target {
            Some(month) => {
                log::debug!(
                    "Month {} -> {} ({})",
                    self.displayed_month.format("%Y-%m"),
                    month.format("%Y-%m"),
                    direction
                );
                self.displayed_month = month;
                self.direction = direction;
                Change::Month(direction)
            }
            None => {
                log::warn!(
                    "Cannot move {} months {} from {}",
                    count,
                    direction,
                    self.displayed_month.format("%Y-%m")
                );
                Change::Ignored
            }
        }
    }

    pub fn goto_month(&mut self, target: NaiveDate) -> Change {
        let target = first_of_month(target);
        if target == self.displayed_month {
            return Change::Ignored;
        }

        self.direction = if target > self.displayed_month {
            Direction::Forward
        } else {
            Direction::Backward
        };
        self.displayed_month = target;
        Change::Month(self.direction)
    }

    pub fn select_day(&mut self, day: NaiveDate) -> Change {
        if !same_month(&day, &self.displayed_month) {
            log::debug!(
                "Ignoring selection of {} outside of {}",
                day,
                self.displayed_month.format("%Y-%m")
            );
            return Change::Ignored;
        }

        self.selected = Some(day);
        Change::Selected(day)
    }

    pub fn reset_to_today(&mut self, today: NaiveDate) -> Change {
        self.displayed_month = first_of_month(today);
        Change::Month(self.direction)
    }

    pub fn move_selection(&mut self, days: i64, today: NaiveDate) -> Change {
        let origin = match self.selected {
            Some(day) if same_month(&day, &self.displayed_month) => day,
            _ if same_month(&today, &self.displayed_month) => today,
            _ => self.displayed_month,
        };

        match origin.checked_add_signed(Duration::days(days)) {
            Some(day) => self.select_day(day),
            None => Change::Ignored,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn ymd(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    fn february() -> CalendarViewState {
        CalendarViewState::new(ymd(2026, 2, 1), Some(ymd(2026, 2, 12)))
    }

    #[test]
    fn seed_is_normalized_to_first_of_month() {
        let state = CalendarViewState::new(ymd(2026, 2, 17), None);
        assert_eq!(state.displayed_month(), ymd(2026, 2, 1));
        assert_eq!(state.selected(), None);
        assert_eq!(state.direction(), Direction::Forward);
    }

    #[test]
    fn next_then_prev_round_trips() {
        let mut state = february();
        let original = state.displayed_month();

        assert_eq!(
            state.change_month(Direction::Forward),
            Change::Month(Direction::Forward)
        );
        assert_eq!(state.displayed_month(), ymd(2026, 3, 1));

        assert_eq!(
            state.change_month(Direction::Backward),
            Change::Month(Direction::Backward)
        );
        assert_eq!(state.displayed_month(), original);
        assert_eq!(state.direction(), Direction::Backward);
        assert_eq!(state.selected(), Some(ymd(2026, 2, 12)));
    }

    #[test]
    fn month_changes_cross_years() {
        let mut state = CalendarViewState::new(ymd(2025, 12, 31), None);
        state.change_month(Direction::Forward);
        assert_eq!(state.displayed_month(), ymd(2026, 1, 1));
        state.change_month(Direction::Backward);
        state.change_month(Direction::Backward);
        assert_eq!(state.displayed_month(), ymd(2025, 11, 1));
    }

    #[test]
    fn shifting_several_months_at_once() {
        let mut state = february();

        assert_eq!(
            state.shift_month(Direction::Forward, 13),
            Change::Month(Direction::Forward)
        );
        assert_eq!(state.displayed_month(), ymd(2027, 3, 1));

        assert_eq!(state.shift_month(Direction::Backward, 0), Change::Ignored);
        assert_eq!(state.shift_month(Direction::Backward, u32::MAX), Change::Ignored);
        assert_eq!(
            state.shift_month(Direction::Forward, i32::MAX as u32),
            Change::Ignored
        );
        assert_eq!(state.displayed_month(), ymd(2027, 3, 1));
        assert_eq!(state.direction(), Direction::Forward);
    }

    #[test]
    fn selecting_inside_month() {
        let mut state = CalendarViewState::new(ymd(2026, 2, 1), None);
        assert_eq!(
            state.select_day(ymd(2026, 2, 12)),
            Change::Selected(ymd(2026, 2, 12))
        );
        assert_eq!(state.selected(), Some(ymd(2026, 2, 12)));
    }

    #[test]
    fn selecting_adjacent_month_is_ignored() {
        let mut state = february();
        assert_eq!(state.select_day(ymd(2026, 1, 25)), Change::Ignored);
        assert_eq!(state.select_day(ymd(2026, 3, 7)), Change::Ignored);
        assert_eq!(state.selected(), Some(ymd(2026, 2, 12)));
    }

    #[test]
    fn reset_keeps_selection_and_direction() {
        let mut state = february();
        state.change_month(Direction::Backward);

        let change = state.reset_to_today(ymd(2026, 10, 16));
        assert_eq!(change, Change::Month(Direction::Backward));
        assert_eq!(state.displayed_month(), ymd(2026, 10, 1));
        assert_eq!(state.selected(), Some(ymd(2026, 2, 12)));
    }

    #[test]
    fn goto_picks_direction() {
        let mut state = february();
        assert_eq!(
            state.goto_month(ymd(2025, 6, 9)),
            Change::Month(Direction::Backward)
        );
        assert_eq!(state.displayed_month(), ymd(2025, 6, 1));
        assert_eq!(
            state.goto_month(ymd(2027, 1, 1)),
            Change::Month(Direction::Forward)
        );
        assert_eq!(state.goto_month(ymd(2027, 1, 20)), Change::Ignored);
    }

    #[test]
    fn moving_selection_stays_in_month() {
        let today = ymd(2026, 10, 16);
        let mut state = february();

        assert_eq!(
            state.move_selection(7, today),
            Change::Selected(ymd(2026, 2, 19))
        );
        assert_eq!(state.move_selection(14, today), Change::Ignored);
        assert_eq!(state.selected(), Some(ymd(2026, 2, 19)));

        let mut empty = CalendarViewState::new(ymd(2026, 2, 1), None);
        assert_eq!(
            empty.move_selection(1, today),
            Change::Selected(ymd(2026, 2, 2))
        );

        let mut current = CalendarViewState::new(today, None);
        assert_eq!(
            current.move_selection(-1, today),
            Change::Selected(ymd(2026, 10, 15))
        );
    }
}
