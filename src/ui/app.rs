use std::fmt::Write;

use crate::config::Config;
use crate::events::{Dispatcher, Event};
use crate::selection::Direction;

use super::{CommandParser, Context, Mode, MonthPane, ScheduleWindow};

use unsegen::base::{Cursor, GraphemeCluster, Terminal, Window};
use unsegen::input::{
    Behavior, EditBehavior, Event as InputEvent, Input, Key, ScrollBehavior,
};
use unsegen::widget::*;

const KEY_HINTS: &str = "n/p month  h/j/k/l day  t today  : command  q quit";

pub struct App<'a> {
    context: Context<'a>,
}

impl<'a> App<'a> {
    pub fn new(context: Context<'a>) -> App<'a> {
        App { context }
    }

    pub fn from_config(config: &Config, agenda: crate::agenda::Agenda<'a>) -> App<'a> {
        App::new(Context::new(config, agenda))
    }

    fn bottom_bar<'w>(&'w self) -> impl Widget + 'w {
        let spacer = " ".with_demand(|_| Demand2D {
            width: ColDemand::exact(1),
            height: RowDemand::exact(1),
        });

        let mut layout = HLayout::new()
            .separator(GraphemeCluster::try_from(' ').unwrap())
            .widget(spacer);
        if let mode @ Mode::Command = self.context.mode {
            layout = layout.widget(self.context.input_sink(mode).as_widget());
        } else {
            layout = layout.widget(StatusLine(&self.context));
        }

        layout
    }

    fn as_widget<'w>(&'w self) -> impl Widget + 'w
    where
        'a: 'w,
    {
        VLayout::new()
            .widget(
                HLayout::new()
                    .separator(GraphemeCluster::try_from('│').unwrap())
                    .widget(MonthPane::new(&self.context))
                    .widget(ScheduleWindow::new(&self.context)),
            )
            .widget(self.bottom_bar())
    }

    pub fn run(
        &mut self,
        dispatcher: Dispatcher,
        mut term: Terminal,
    ) -> Result<(), Box<dyn std::error::Error>> {
        self.context.start();
        let mut redraw = true;

        while !self.context.quit {
            if redraw {
                let root = term.create_root_window();
                self.as_widget().draw(root, RenderingHints::new());
                term.present();
            }

            match dispatcher.next()? {
                Event::Frame => redraw = self.context.update(),
                Event::Input(input) => {
                    self.handle_input(input);
                    redraw = true;
                }
            }
        }

        Ok(())
    }

    fn handle_input(&mut self, input: Input) {
        if input.matches(Key::Esc) {
            self.context.mode = Mode::Normal;
            self.context.last_error_message = None;
            return;
        }

        match self.context.mode {
            Mode::Normal => {
                input.chain(NormalBehaviour(&mut self.context)).finish();
            }
            mode @ Mode::Command => {
                input
                    .chain(
                        EditBehavior::new(self.context.input_sink_mut(mode))
                            .delete_forwards_on(Key::Delete)
                            .delete_backwards_on(Key::Backspace)
                            .left_on(Key::Left)
                            .right_on(Key::Right),
                    )
                    .chain(
                        ScrollBehavior::new(self.context.input_sink_mut(mode))
                            .backwards_on(Key::Up)
                            .forwards_on(Key::Down),
                    )
                    .chain(CommandParser::new(&mut self.context))
                    .finish();
            }
        }
    }
}

struct NormalBehaviour<'c, 'a>(&'c mut Context<'a>);

impl Behavior for NormalBehaviour<'_, '_> {
    fn input(self, input: Input) -> Option<Input> {
        let context = self.0;
        let key = match input.event {
            InputEvent::Key(key) => key,
            _ => return Some(input),
        };

        match key {
            Key::Char('q') => context.quit = true,
            Key::Char(':') => context.mode = Mode::Command,
            Key::Char('n') | Key::Right | Key::PageDown => {
                context.change_month(Direction::Forward);
            }
            Key::Char('p') | Key::Left | Key::PageUp => {
                context.change_month(Direction::Backward);
            }
            Key::Char('t') => {
                context.reset_to_today();
            }
            Key::Char('l') => {
                context.move_selection(1);
            }
            Key::Char('h') => {
                context.move_selection(-1);
            }
            Key::Char('j') | Key::Down => {
                context.move_selection(7);
            }
            Key::Char('k') | Key::Up => {
                context.move_selection(-7);
            }
            _ => return Some(input),
        }

        None
    }
}

struct StatusLine<'c, 'a>(&'c Context<'a>);

impl Widget for StatusLine<'_, '_> {
    fn space_demand(&self) -> Demand2D {
        Demand2D {
            width: ColDemand::at_least(KEY_HINTS.len()),
            height: RowDemand::exact(1),
        }
    }

    fn draw(&self, mut window: Window, _hints: RenderingHints) {
        let theme = &self.0.theme;
        let mut cursor = Cursor::new(&mut window);

        match &self.0.last_error_message {
            Some(msg) => {
                cursor.set_style_modifier(theme.error_style);
                let _ = write!(&mut cursor, "{}", msg);
            }
            None => {
                cursor.set_style_modifier(theme.footer_style);
                let _ = write!(&mut cursor, "{}", KEY_HINTS);
            }
        }
    }
}
