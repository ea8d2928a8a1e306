use chrono::{Datelike, NaiveDate};
use unsegen::input::*;

use nom::{
    bytes::complete::take_while1,
    character::complete::{char, digit1, space1},
    combinator::{all_consuming, map_res, opt, rest},
    sequence::{preceded, separated_pair, tuple},
    IResult,
};

use super::context::{Context, Mode};
use crate::provider::{Error, ErrorKind, Result};
use crate::selection::{Change, Direction};

pub type ActionResult = Result<()>;

pub enum Action {
    Arg(fn(&mut Context, &str) -> ActionResult),
    NoArg(fn(&mut Context) -> ActionResult),
    Repeatable(fn(&mut Context, u32) -> ActionResult),
}

const COMMANDS: &[(&str, Action)] = &[
    (
        "next",
        Action::Repeatable(|c, n| shift(c, Direction::Forward, n)),
    ),
    (
        "prev",
        Action::Repeatable(|c, n| shift(c, Direction::Backward, n)),
    ),
    (
        "today",
        Action::NoArg(|c| {
            c.reset_to_today();
            Ok(())
        }),
    ),
    (
        "select",
        Action::Arg(|c, arg| {
            let day = parse_day(arg, c.state().displayed_month())?;
            match c.select_day(day) {
                Change::Ignored => Err(Error::new(
                    ErrorKind::DateParse,
                    &format!("{} is not in the displayed month", day),
                )),
                _ => Ok(()),
            }
        }),
    ),
    (
        "goto",
        Action::Arg(|c, arg| {
            c.goto_month(parse_month(arg)?);
            Ok(())
        }),
    ),
    (
        "q",
        Action::NoArg(|c| {
            c.quit = true;
            Ok(())
        }),
    ),
    (
        "quit",
        Action::NoArg(|c| {
            c.quit = true;
            Ok(())
        }),
    ),
];

fn shift(c: &mut Context, direction: Direction, count: u32) -> ActionResult {
    match c.shift_month(direction, count) {
        Change::Ignored => Err(Error::new(
            ErrorKind::CommandParse,
            &format!("cannot move {} months {}", count, direction),
        )),
        _ => Ok(()),
    }
}

fn number<T: std::str::FromStr>(input: &str) -> IResult<&str, T> {
    map_res(digit1, str::parse::<T>)(input)
}

// [count]name[ argument]
fn command_line(input: &str) -> IResult<&str, (Option<u32>, &str, Option<&str>)> {
    all_consuming(tuple((
        opt(number::<u32>),
        take_while1(|c: char| c.is_ascii_alphabetic()),
        opt(preceded(space1, rest)),
    )))(input)
}

fn year_month(input: &str) -> IResult<&str, (i32, u32)> {
    all_consuming(separated_pair(number::<i32>, char('-'), number::<u32>))(input)
}

pub fn parse_month(arg: &str) -> Result<NaiveDate> {
    let (_, (year, month)) = year_month(arg.trim())?;
    NaiveDate::from_ymd_opt(year, month, 1).ok_or_else(|| {
        Error::new(
            ErrorKind::DateParse,
            &format!("'{}' is not a month", arg.trim()),
        )
    })
}

pub fn parse_day(arg: &str, month: NaiveDate) -> Result<NaiveDate> {
    let arg = arg.trim();

    if let Ok((_, day)) = all_consuming(number::<u32>)(arg) {
        return NaiveDate::from_ymd_opt(month.year(), month.month(), day).ok_or_else(|| {
            Error::new(
                ErrorKind::DateParse,
                &format!("{} has no day {}", month.format("%B %Y"), day),
            )
        });
    }

    Ok(NaiveDate::parse_from_str(arg, "%Y-%m-%d")?)
}

pub struct CommandParser<'c, 'a> {
    context: &'c mut Context<'a>,
}

impl<'c, 'a> CommandParser<'c, 'a> {
    pub fn new(context: &'c mut Context<'a>) -> Self {
        CommandParser { context }
    }

    pub fn run_command(&mut self, cmd: &str) -> ActionResult {
        let cmd = cmd.trim();
        let unknown = || Error::new(ErrorKind::CommandParse, cmd);

        let (_, (count, name, arg)) = command_line(cmd).map_err(|_| unknown())?;
        let act = COMMANDS
            .iter()
            .find(|(cmd_name, _)| *cmd_name == name)
            .map(|(_, act)| act)
            .ok_or_else(unknown)?;

        log::debug!("Running command '{}'", cmd);

        match (act, count, arg) {
            (Action::Repeatable(a), count, None) => a(self.context, count.unwrap_or(1)),
            (Action::NoArg(a), None, None) => a(self.context),
            (Action::Arg(a), None, Some(arg)) if !arg.trim().is_empty() => a(self.context, arg),
            _ => Err(unknown().with_msg(&format!("invalid use of '{}'", name))),
        }
    }

    fn report_error(&mut self, error: Error) {
        log::debug!("{}", error);
        self.context.last_error_message = Some(error.to_string());
    }
}

impl Behavior for CommandParser<'_, '_> {
    fn input(mut self, input: Input) -> Option<Input> {
        if let Event::Key(key) = input.event {
            match key {
                Key::Char('\n') => {
                    let cmd = self
                        .context
                        .input_sink_mut(Mode::Command)
                        .finish_line()
                        .to_owned();
                    if let Err(e) = self.run_command(&cmd) {
                        self.report_error(e);
                    } else {
                        self.context.last_error_message = None;
                    }
                    self.context.mode = Mode::Normal;
                    None
                }
                _ => Some(input),
            }
        } else {
            Some(input)
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::agenda::Agenda;
    use crate::config::Config;
    use crate::provider::EventList;

    fn ymd(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    fn config() -> Config {
        Config {
            seed_month: Some(ymd(2026, 2, 1)),
            ..Config::default()
        }
    }

    #[test]
    fn grammar() {
        assert_eq!(command_line("next"), Ok(("", (None, "next", None))));
        assert_eq!(command_line("3prev"), Ok(("", (Some(3), "prev", None))));
        assert_eq!(
            command_line("select 12"),
            Ok(("", (None, "select", Some("12"))))
        );
        assert!(command_line("").is_err());
        assert!(command_line("12").is_err());
    }

    #[test]
    fn month_and_day_arguments() {
        assert_eq!(parse_month("2027-03").unwrap(), ymd(2027, 3, 1));
        assert!(parse_month("2027-13").is_err());
        assert!(parse_month("March").is_err());

        let feb = ymd(2026, 2, 1);
        assert_eq!(parse_day("12", feb).unwrap(), ymd(2026, 2, 12));
        assert_eq!(parse_day("2026-02-28", feb).unwrap(), ymd(2026, 2, 28));
        assert!(parse_day("30", feb).is_err());
        assert!(parse_day("soon", feb).is_err());
    }

    #[test]
    fn commands_drive_the_context() {
        let list = EventList::default();
        let mut context = Context::new(&config(), Agenda::new(&list)).with_today(ymd(2026, 10, 16));
        let mut parser = CommandParser::new(&mut context);

        parser.run_command("3next").unwrap();
        assert!(parser.run_command("4294967295next").is_err());
        assert!(parser.run_command("4294967295prev").is_err());
        assert!(parser.run_command("0next").is_err());
        parser.run_command("prev").unwrap();
        parser.run_command("select 9").unwrap();
        assert!(parser.run_command("select 2026-01-09").is_err());
        parser.run_command("goto 2025-12").unwrap();
        assert!(parser.run_command("today 2").is_err());
        assert!(parser.run_command("fly").is_err());
        parser.run_command("q").unwrap();

        assert_eq!(context.state().displayed_month(), ymd(2025, 12, 1));
        assert_eq!(context.state().selected(), Some(ymd(2026, 4, 9)));
        assert_eq!(context.state().direction(), Direction::Backward);
        assert!(context.quit);
    }
}
