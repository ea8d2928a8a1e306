use chrono::Datelike;
use std::fmt::{Display, Write};
use std::time::Instant;
use unsegen::base::*;
use unsegen::widget::*;

use crate::calendar::{weekday_labels, CalendarDay, GRID_COLUMNS, GRID_ROWS};

use super::animator::CellAppearance;
use super::{Context, Theme};

pub struct DayCell<'d, 'a> {
    day: &'d CalendarDay<'a>,
    theme: &'d Theme,
    hidden: bool,
}

impl<'d, 'a> DayCell<'d, 'a> {
    pub const CELL_WIDTH: usize = 6;

    fn new(day: &'d CalendarDay<'a>, theme: &'d Theme) -> Self {
        DayCell {
            day,
            theme,
            hidden: false,
        }
    }

    fn hidden(mut self, hidden: bool) -> Self {
        self.hidden = hidden;
        self
    }

    fn style(&self, appearance: &CellAppearance) -> StyleModifier {
        let theme = self.theme;
        let mut style = if !self.day.in_current_month {
            theme.outside_day_style
        } else if self.day.is_selected {
            theme.focus_day_style
        } else if self.day.is_today {
            theme.today_day_style
        } else {
            theme.day_style
        };

        if !appearance.is_settled() {
            style = theme.animating_day_style;
        }
        if appearance.is_pulsing() {
            style = style.format(theme.pulse_day_text_style);
        }
        style
    }
}

impl Display for DayCell<'_, '_> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        if self.hidden {
            return write!(f, "{:width$}", "", width = Self::CELL_WIDTH);
        }

        let today = if self.day.is_today {
            self.theme.today_day_char
        } else {
            ' '
        };

        // Event markers are only shown for the displayed month
        let events = if self.day.in_current_month {
            self.day.events.len()
        } else {
            0
        };
        let markers: String = match events {
            0 => "  ".to_owned(),
            1 => format!("{} ", self.theme.event_char),
            2 => format!("{}{}", self.theme.event_char, self.theme.event_char),
            _ => format!("{}+", self.theme.event_char),
        };

        write!(f, "{}{:>2}{} ", today, self.day.date.day(), markers)
    }
}

pub struct MonthPane<'c, 'a> {
    context: &'c Context<'a>,
    now: Instant,
}

impl<'c, 'a> MonthPane<'c, 'a> {
    const HEADER_ROWS: usize = 3;
    const FOOTER_ROWS: usize = 2;

    pub fn new(context: &'c Context<'a>) -> Self {
        MonthPane {
            context,
            now: Instant::now(),
        }
    }
}

impl Widget for MonthPane<'_, '_> {
    fn space_demand(&self) -> Demand2D {
        Demand2D {
            width: ColDemand::exact(GRID_COLUMNS * DayCell::CELL_WIDTH),
            height: RowDemand::exact(Self::HEADER_ROWS + GRID_ROWS + Self::FOOTER_ROWS),
        }
    }

    fn draw(&self, mut window: Window, _hints: RenderingHints) {
        let context = self.context;
        let theme = &context.theme;
        let grid = context.grid();
        let (year, month) = grid.label();

        let mut cursor = Cursor::new(&mut window).style_modifier(theme.footer_style);

        if let Err(e) = writeln!(&mut cursor, "{}", year) {
            log::warn!("Error while drawing month header: {}", e);
        }

        cursor.set_style_modifier(
            theme
                .month_header_style
                .format(theme.month_header_text_style),
        );
        let _ = writeln!(&mut cursor, "{}", month);

        cursor.set_style_modifier(theme.weekday_style);
        for label in weekday_labels() {
            let _ = write!(
                &mut cursor,
                "{:^width$}",
                label,
                width = DayCell::CELL_WIDTH
            );
        }
        cursor.fill_and_wrap_line();

        let animator = context.animator();
        for (row_idx, row) in grid.rows().enumerate() {
            for (col_idx, day) in row.iter().enumerate() {
                let index = row_idx * GRID_COLUMNS + col_idx;
                let appearance = animator.appearance(index, &day.date, self.now);
                let cell = DayCell::new(day, theme).hidden(appearance.is_hidden());

                cursor.set_style_modifier(cell.style(&appearance));
                let _ = write!(&mut cursor, "{}", cell);
            }
            cursor.set_style_modifier(theme.day_style);
            cursor.fill_and_wrap_line();
        }

        cursor.set_style_modifier(theme.footer_style);
        cursor.fill_and_wrap_line();

        let this_month = context
            .agenda()
            .events_of_month(&grid.month())
            .count();
        let _ = write!(&mut cursor, "{} Events this month", this_month);

        if let Some(summary) = context
            .state()
            .selected()
            .and_then(|day| grid.get(&day))
            .and_then(|day| context.agenda().day_summary(&day.date))
        {
            let _ = write!(&mut cursor, "  {}", summary.first.id);
            if summary.more > 0 {
                let _ = write!(&mut cursor, " +{}", summary.more);
            }
        }
        cursor.fill_and_wrap_line();
    }
}
