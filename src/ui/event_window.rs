use chrono::{Datelike, NaiveDate};
use std::fmt::{Display, Write};
use unsegen::base::*;
use unsegen::widget::*;

use crate::provider::datetime::ordinal_suffix;
use crate::provider::Event;

use super::Context;

pub fn schedule_heading(date: &NaiveDate) -> String {
    format!(
        "{} {}{}",
        date.format("%A, %b"),
        date.day(),
        ordinal_suffix(date.day())
    )
}

struct Entry<'a>(&'a Event);

impl Display for Entry<'_> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{:<12} {}", self.0.id, self.0.icon)
    }
}

pub struct ScheduleWindow<'c, 'a> {
    context: &'c Context<'a>,
}

impl<'c, 'a> ScheduleWindow<'c, 'a> {
    pub fn new(context: &'c Context<'a>) -> Self {
        ScheduleWindow { context }
    }
}

impl Widget for ScheduleWindow<'_, '_> {
    fn space_demand(&self) -> Demand2D {
        Demand2D {
            width: ColDemand::at_least(10),
            height: RowDemand::at_least(10),
        }
    }

    fn draw(&self, mut window: Window, _hints: RenderingHints) {
        let theme = &self.context.theme;
        let date = self.context.schedule_date();
        let events: Vec<&Event> = self.context.agenda().events_of_day(&date).collect();

        let mut cursor = Cursor::new(&mut window).style_modifier(theme.footer_style);

        let _ = writeln!(&mut cursor, "SCHEDULE FOR");

        cursor.set_style_modifier(
            theme
                .month_header_style
                .format(theme.month_header_text_style),
        );
        let _ = write!(&mut cursor, "{}", schedule_heading(&date));

        cursor.set_style_modifier(theme.footer_style);
        let _ = write!(&mut cursor, "  [{} Events]", events.len());
        cursor.fill_and_wrap_line();
        cursor.fill_and_wrap_line();

        if events.is_empty() {
            cursor.set_style_modifier(theme.footer_style);
            let _ = writeln!(&mut cursor, "No events scheduled");
            return;
        }

        for event in events {
            let swatch = match event.rgb() {
                Some((r, g, b)) => StyleModifier::new().fg_color(Color::Rgb { r, g, b }),
                None => theme.day_style,
            };

            cursor.set_style_modifier(swatch);
            let _ = write!(&mut cursor, "■ ");

            cursor.set_style_modifier(theme.day_style);
            if let Err(err) = write!(&mut cursor, "{}", Entry(event)) {
                log::warn!("Error while writing event: {}", err);
            }
            cursor.fill_and_wrap_line();
        }
    }
}
