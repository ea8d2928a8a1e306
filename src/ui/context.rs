use chrono::{Local, NaiveDate};
use std::time::Instant;

use crate::agenda::Agenda;
use crate::calendar::MonthGrid;
use crate::config::Config;
use crate::selection::{CalendarViewState, Change, Direction};
use crate::transition::Sequencer;

use unsegen::base::style::*;
use unsegen::widget::builtin::PromptLine;

use super::animator::TerminalAnimator;

#[derive(Clone, Copy, Debug, PartialEq)]
pub enum Mode {
    Normal,
    Command,
}

#[derive(Clone, Debug)]
pub struct Theme {
    pub day_style: StyleModifier,
    pub outside_day_style: StyleModifier,
    pub animating_day_style: StyleModifier,
    pub focus_day_style: StyleModifier,
    pub pulse_day_text_style: TextFormatModifier,
    pub today_day_style: StyleModifier,
    pub today_day_char: char,
    pub event_char: char,
    pub month_header_style: StyleModifier,
    pub month_header_text_style: TextFormatModifier,
    pub weekday_style: StyleModifier,
    pub footer_style: StyleModifier,
    pub error_style: StyleModifier,
}

impl Default for Theme {
    fn default() -> Self {
        Theme {
            day_style: StyleModifier::default(),
            outside_day_style: StyleModifier::default().fg_color(Color::LightBlack),
            animating_day_style: StyleModifier::default().fg_color(Color::LightBlack),
            focus_day_style: StyleModifier::default()
                .bg_color(Color::White)
                .fg_color(Color::Black),
            pulse_day_text_style: TextFormatModifier::default().bold(true),
            today_day_style: StyleModifier::default().fg_color(Color::Blue),
            today_day_char: '*',
            event_char: '·',
            month_header_style: StyleModifier::default().fg_color(Color::Yellow),
            month_header_text_style: TextFormatModifier::default().bold(true),
            weekday_style: StyleModifier::default().fg_color(Color::LightBlack),
            footer_style: StyleModifier::default().fg_color(Color::LightBlack),
            error_style: StyleModifier::default().fg_color(Color::LightRed),
        }
    }
}

pub struct Context<'a> {
    pub mode: Mode,
    pub theme: Theme,
    pub command_line: PromptLine,
    pub last_error_message: Option<String>,
    pub quit: bool,
    state: CalendarViewState,
    agenda: Agenda<'a>,
    sequencer: Sequencer,
    animator: TerminalAnimator,
    today: NaiveDate,
}

impl<'a> Context<'a> {
    pub fn new(config: &Config, agenda: Agenda<'a>) -> Self {
        let today = Local::now().date_naive();
        let seed = config.seed_month.unwrap_or(today);

        Context {
            mode: Mode::Normal,
            theme: Theme::default(),
            command_line: PromptLine::with_prompt(":".to_owned()),
            last_error_message: None,
            quit: false,
            state: CalendarViewState::new(seed, config.selected),
            agenda,
            sequencer: Sequencer::new(config.animation.clone()),
            animator: TerminalAnimator::default(),
            today,
        }
    }

    pub fn with_today(mut self, today: NaiveDate) -> Self {
        self.today = today;
        self
    }

    pub fn state(&self) -> &CalendarViewState {
        &self.state
    }

    pub fn agenda(&self) -> &Agenda<'a> {
        &self.agenda
    }

    pub fn animator(&self) -> &TerminalAnimator {
        &self.animator
    }

    pub fn today(&self) -> NaiveDate {
        self.today
    }

    pub fn schedule_date(&self) -> NaiveDate {
        self.state.selected().unwrap_or(self.today)
    }

    pub fn grid(&self) -> MonthGrid<'a> {
        MonthGrid::new(
            self.state.displayed_month(),
            self.today,
            self.state.selected(),
            &self.agenda,
        )
    }

    pub fn input_sink(&self, _mode: Mode) -> &PromptLine {
        &self.command_line
    }

    pub fn input_sink_mut(&mut self, _mode: Mode) -> &mut PromptLine {
        &mut self.command_line
    }

    pub fn start(&mut self) {
        self.play(Change::Month(Direction::Forward));
    }

    pub fn update(&mut self) -> bool {
        let now = Instant::now();
        let today = Local::now().date_naive();
        let day_changed = today != self.today;
        self.today = today;

        let animating = self.animator.is_animating(now);
        let settled = self.animator.discard_finished(now);

        day_changed || animating || settled
    }

    pub fn change_month(&mut self, direction: Direction) -> Change {
        let change = self.state.change_month(direction);
        self.play(change)
    }

    pub fn shift_month(&mut self, direction: Direction, count: u32) -> Change {
        let change = self.state.shift_month(direction, count);
        self.play(change)
    }

    pub fn goto_month(&mut self, month: NaiveDate) -> Change {
        let change = self.state.goto_month(month);
        self.play(change)
    }

    pub fn select_day(&mut self, day: NaiveDate) -> Change {
        let change = self.state.select_day(day);
        self.play(change)
    }

    pub fn move_selection(&mut self, days: i64) -> Change {
        let change = self.state.move_selection(days, self.today);
        self.play(change)
    }

    pub fn reset_to_today(&mut self) -> Change {
        let change = self.state.reset_to_today(self.today);
        self.play(change)
    }

    fn play(&mut self, change: Change) -> Change {
        match change {
            Change::Month(direction) => {
                let cells = self.grid().dates();
                self.sequencer
                    .play_month(&cells, direction, &mut self.animator);
            }
            Change::Selected(day) => self.sequencer.play_pulse(day, &mut self.animator),
            Change::Ignored => {}
        }
        change
    }
}
