use chrono::{Datelike, NaiveDate, Weekday};

use crate::agenda::Agenda;
use crate::provider::datetime::{
    end_of_week, first_of_month, last_of_month, same_month, start_of_week, weekday_label,
};
use crate::provider::Event;

pub const GRID_ROWS: usize = 6;
pub const GRID_COLUMNS: usize = 7;
pub const GRID_CELLS: usize = GRID_ROWS * GRID_COLUMNS;

pub const WEEKDAYS: [Weekday; GRID_COLUMNS] = [
    Weekday::Sun,
    Weekday::Mon,
    Weekday::Tue,
    Weekday::Wed,
    Weekday::Thu,
    Weekday::Fri,
    Weekday::Sat,
];

pub fn weekday_labels() -> impl Iterator<Item = &'static str> {
    WEEKDAYS.iter().map(|&wd| weekday_label(wd))
}

pub fn month_label(month: &NaiveDate) -> (String, String) {
    (month.format("%Y").to_string(), month.format("%B").to_string())
}

pub fn build_grid(month: NaiveDate) -> Vec<NaiveDate> {
    let begin = start_of_week(first_of_month(month));
    let end = end_of_week(last_of_month(month));

    let mut days: Vec<NaiveDate> = begin
        .iter_days()
        .take_while(|day| *day <= end)
        .take(GRID_CELLS)
        .collect();

    while days.len() < GRID_CELLS {
        match days.last().and_then(|day| day.succ_opt()) {
            Some(next) => days.push(next),
            None => break,
        }
    }

    if days.len() != GRID_CELLS {
        log::warn!(
            "Month grid for {} has {} cells instead of {}",
            month.format("%Y-%m"),
            days.len(),
            GRID_CELLS
        );
    }

    days
}

#[derive(Debug, Clone, PartialEq)]
pub struct CalendarDay<'a> {
    pub date: NaiveDate,
    pub in_current_month: bool,
    pub is_today: bool,
    pub is_selected: bool,
    pub events: Vec<&'a Event>,
}

impl CalendarDay<'_> {
    pub fn has_events(&self) -> bool {
        !self.events.is_empty()
    }
}

#[derive(Debug, Clone)]
pub struct MonthGrid<'a> {
    month: NaiveDate,
    days: Vec<CalendarDay<'a>>,
}

impl<'a> MonthGrid<'a> {
    pub fn new(
        month: NaiveDate,
        today: NaiveDate,
        selected: Option<NaiveDate>,
        agenda: &Agenda<'a>,
    ) -> Self {
        let month = first_of_month(month);

        let days = build_grid(month)
            .into_iter()
            .map(|date| {
                let in_current_month = same_month(&date, &month);
                CalendarDay {
                    date,
                    in_current_month,
                    is_today: date == today,
                    is_selected: in_current_month && selected == Some(date),
                    events: agenda.events_of_day(&date).collect(),
                }
            })
            .collect();

        MonthGrid { month, days }
    }

    pub fn month(&self) -> NaiveDate {
        self.month
    }

    pub fn days(&self) -> &[CalendarDay<'a>] {
        &self.days
    }

    pub fn dates(&self) -> Vec<NaiveDate> {
        self.days.iter().map(|day| day.date).collect()
    }

    pub fn rows(&self) -> impl Iterator<Item = &[CalendarDay<'a>]> + '_ {
        self.days.chunks(GRID_COLUMNS)
    }

    pub fn get(&self, date: &NaiveDate) -> Option<&CalendarDay<'a>> {
        self.days.iter().find(|day| day.date == *date)
    }

    pub fn label(&self) -> (String, String) {
        month_label(&self.month)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::provider::datetime::days_of_month;
    use crate::provider::EventList;
    use chrono::Duration;

    fn ymd(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    fn all_months() -> impl Iterator<Item = NaiveDate> {
        (1990..=2040).flat_map(|y| (1..=12).map(move |m| ymd(y, m, 1)))
    }

    #[test]
    fn every_grid_is_six_contiguous_weeks() {
        for month in all_months() {
            let grid = build_grid(month);
            assert_eq!(grid.len(), GRID_CELLS, "{}", month);
            assert_eq!(grid[0].weekday(), Weekday::Sun, "{}", month);
            assert_eq!(grid[GRID_CELLS - 1].weekday(), Weekday::Sat, "{}", month);
            assert_eq!(grid[GRID_CELLS - 1], grid[0] + Duration::days(41));

            for pair in grid.windows(2) {
                assert_eq!(pair[1], pair[0] + Duration::days(1));
            }
        }
    }

    #[test]
    fn current_month_cells_match_month_length() {
        let list = EventList::default();
        let agenda = Agenda::new(&list);

        for month in all_months() {
            let grid = MonthGrid::new(month, month, None, &agenda);
            let in_month = grid.days().iter().filter(|d| d.in_current_month).count();
            assert_eq!(in_month as u32, days_of_month(month), "{}", month);
            assert!(grid
                .days()
                .iter()
                .filter(|d| d.in_current_month)
                .all(|d| same_month(&d.date, &month)));
        }
    }

    #[test]
    fn only_day_of_month_is_ignored() {
        assert_eq!(build_grid(ymd(2026, 2, 1)), build_grid(ymd(2026, 2, 27)));
    }

    #[test]
    fn short_months_are_padded() {
        // February 2026 starts on a Sunday and fits in exactly four weeks
        let grid = build_grid(ymd(2026, 2, 1));
        assert_eq!(grid[0], ymd(2026, 2, 1));
        assert_eq!(grid[27], ymd(2026, 2, 28));
        assert_eq!(grid[41], ymd(2026, 3, 14));
    }

    #[test]
    fn leading_days_of_previous_month() {
        let grid = build_grid(ymd(2026, 3, 1));
        assert_eq!(grid[0], ymd(2026, 3, 1));

        let grid = build_grid(ymd(2026, 10, 1));
        assert_eq!(grid[0], ymd(2026, 9, 27));
        assert_eq!(grid[41], ymd(2026, 11, 7));
    }

    #[test]
    fn annotations() {
        let list = EventList::showcase();
        let agenda = Agenda::new(&list);
        let grid = MonthGrid::new(
            ymd(2026, 2, 1),
            ymd(2026, 2, 3),
            Some(ymd(2026, 2, 12)),
            &agenda,
        );

        let selected: Vec<_> = grid.days().iter().filter(|d| d.is_selected).collect();
        assert_eq!(selected.len(), 1);
        assert_eq!(selected[0].date, ymd(2026, 2, 12));
        assert_eq!(selected[0].events.len(), 2);

        let today = grid.get(&ymd(2026, 2, 3)).unwrap();
        assert!(today.is_today);
        assert!(!today.has_events());

        assert_eq!(grid.rows().count(), GRID_ROWS);
        assert!(grid.rows().all(|row| row.len() == GRID_COLUMNS));
        assert_eq!(grid.label(), ("2026".to_owned(), "February".to_owned()));
    }

    #[test]
    fn selection_outside_month_is_not_highlighted() {
        let list = EventList::default();
        let agenda = Agenda::new(&list);
        let grid = MonthGrid::new(
            ymd(2026, 2, 1),
            ymd(2026, 2, 3),
            Some(ymd(2026, 3, 2)),
            &agenda,
        );

        assert!(grid.days().iter().all(|d| !d.is_selected));
        assert!(grid.get(&ymd(2026, 3, 2)).is_some());
    }

    #[test]
    fn weekday_header_starts_on_sunday() {
        let labels: Vec<_> = weekday_labels().collect();
        assert_eq!(labels, ["SUN", "MON", "TUE", "WED", "THU", "FRI", "SAT"]);
    }
}
