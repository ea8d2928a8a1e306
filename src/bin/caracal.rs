extern crate caracal as lib;

use chrono::NaiveDate;
use flexi_logger::{FileSpec, Logger};
use lib::agenda::Agenda;
use lib::events::Dispatcher;
use lib::ui::{render_month_text, App, Context};
use nix::sys::termios;
use std::io::stdout;
use std::path::PathBuf;
use structopt::StructOpt;
use unsegen::base::Terminal;

#[derive(Debug, StructOpt)]
#[structopt(
    name = "caracal",
    about = "Caracal - A month calendar with animated transitions."
)]
pub struct Args {
    #[structopt(
        name = "CONFIG",
        short = "c",
        long = "config",
        help = "path to config file",
        parse(from_os_str)
    )]
    pub configfile: Option<PathBuf>,

    #[structopt(
        short = "s",
        long = "show",
        help = "only print the month non-interactively"
    )]
    pub show: bool,

    #[structopt(
        short = "m",
        long = "month",
        help = "month to show first (YYYY-MM)",
        parse(try_from_str = lib::ui::command::parse_month)
    )]
    pub month: Option<NaiveDate>,

    #[structopt(long = "log-file", help = "path to log file", parse(from_os_str))]
    pub log_file: Option<PathBuf>,
}

fn main() -> Result<(), Box<dyn std::error::Error>> {
    let args = Args::from_args();

    const DEFAULT_LOG_LEVEL: &str = if cfg!(debug_assertions) {
        "debug"
    } else {
        "info"
    };

    let mut logger = Logger::try_with_env_or_str(DEFAULT_LOG_LEVEL)?;

    if let Some(log_file) = args.log_file {
        logger = logger
            .log_to_file(FileSpec::try_from(log_file)?)
            .print_message();
    }

    logger.start()?;

    let mut config = lib::config::load_suitable_config(args.configfile.as_deref())?;
    if let Some(month) = args.month {
        config.seed_month = Some(month);
    }

    let events = config.event_list()?;
    if events.is_empty() {
        log::info!("No events loaded");
    } else {
        log::info!("Loaded {} events", events.len());
    }
    let agenda = Agenda::new(&events);

    if args.show {
        let context = Context::new(&config, agenda);
        print!("{}", render_month_text(&context.grid(), context.agenda()));
        return Ok(());
    }

    const STDOUT: std::os::unix::io::RawFd = 0;
    let orig_attr = std::sync::Mutex::new(termios::tcgetattr(STDOUT)?);

    std::panic::set_hook(Box::new(move |info| {
        // Switch to main terminal screen
        println!("{}{}", termion::screen::ToMainScreen, termion::cursor::Show);

        if let Ok(attr) = orig_attr.lock() {
            let _ = termios::tcsetattr(STDOUT, termios::SetArg::TCSANOW, &attr);
        }

        println!("Caracal ran into a fatal error!");
        println!("Consider filing an issue with a log file and the backtrace below.");

        println!("{}", info);
        println!("{:?}", backtrace::Backtrace::new());
    }));

    let dispatcher = Dispatcher::from_config(&config);

    let stdout = stdout();
    let term = Terminal::new(stdout.lock())?;

    let mut app = App::from_config(&config, agenda);

    app.run(dispatcher, term)
}
