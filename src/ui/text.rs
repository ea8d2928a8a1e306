use std::fmt::Write;

use chrono::Datelike;
use itertools::Itertools;

use crate::agenda::Agenda;
use crate::calendar::{weekday_labels, CalendarDay, MonthGrid};

fn cell(day: &CalendarDay) -> String {
    let num = day.date.day();
    if !day.in_current_month {
        format!("({:>2})", num)
    } else if day.is_selected {
        format!("<{:>2}>", num)
    } else if day.is_today {
        format!("[{:>2}]", num)
    } else if day.has_events() {
        format!(" {:>2}*", num)
    } else {
        format!(" {:>2} ", num)
    }
}

pub fn render_month_text(grid: &MonthGrid, agenda: &Agenda) -> String {
    let (year, month) = grid.label();
    let mut out = String::new();

    let _ = writeln!(out, "{} {}", month, year);
    let _ = writeln!(out, "{}", weekday_labels().map(|l| format!("{:^4}", l)).join(" "));

    for row in grid.rows() {
        let _ = writeln!(out, "{}", row.iter().map(cell).join(" "));
    }

    let _ = writeln!(
        out,
        "{} Events this month",
        agenda.events_of_month(&grid.month()).count()
    );

    out
}
