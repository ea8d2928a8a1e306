pub mod animator;
pub mod app;
pub mod calendar_window;
pub mod command;
pub mod context;
pub mod event_window;
pub mod text;

pub use animator::TerminalAnimator;
pub use app::App;
pub use calendar_window::MonthPane;
pub use command::CommandParser;
pub use context::{Context, Mode, Theme};
pub use event_window::{schedule_heading, ScheduleWindow};
pub use text::render_month_text;
