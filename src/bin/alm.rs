extern crate almanac as lib;

use chrono::Local;
use flexi_logger::{FileSpec, Logger};
use lib::calendar::DateKey;
use lib::context::Context;
use lib::events::Dispatcher;
use lib::ui::app::App;
use nix::sys::{signal, termios};
use std::io::stdout;
use std::path::PathBuf;
use structopt::StructOpt;
use unsegen::base::Terminal;

#[derive(Debug, StructOpt)]
#[structopt(name = "alm", about = "Almanac - A month calendar with a small agenda.")]
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

    #[structopt(long = "log-file", help = "path to log file", parse(from_os_str))]
    pub log_file: Option<PathBuf>,

    #[structopt(
        short = "d",
        long = "date",
        help = "start on this day instead of today (YYYY-MM-DD)"
    )]
    pub date: Option<DateKey>,
}

fn main() -> Result<(), Box<dyn std::error::Error>> {
    let args = Args::from_args();

    const DEFAULT_LOG_LEVEL: &'static str = if cfg!(debug_assertions) {
        "debug"
    } else {
        "info"
    };

    let mut logger = Logger::try_with_env_or_str(DEFAULT_LOG_LEVEL)?;

    if let Some(log_file) = &args.log_file {
        logger = logger
            .log_to_file(FileSpec::try_from(log_file)?)
            .print_message();
    }

    // Logging to stderr would garble the terminal UI.
    let _logger = if args.log_file.is_some() || args.show {
        Some(logger.start()?)
    } else {
        None
    };

    let config = lib::config::load_suitable_config(args.configfile.as_deref())?;

    let mut calendar = Context::from_config(&config, Local::now().date_naive());
    if let Some(date) = args.date {
        calendar = calendar.with_selected(date)?;
    }

    if args.show {
        println!("{}", calendar.grid());
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

        println!("Almanac ran into a fatal error!");
        println!("Consider filing an issue with a log file and the backtrace below.");

        println!("{}", info);
        println!("{:?}", backtrace::Backtrace::new());
    }));

    let mut signals_to_wait = signal::SigSet::empty();
    signals_to_wait.add(signal::SIGWINCH);

    let dispatcher = Dispatcher::from_config(&config, signals_to_wait);
    // Setup unsegen terminal
    let stdout = stdout();
    let term = Terminal::new(stdout.lock())?;

    let mut app = App::new(&config, calendar);

    app.run(dispatcher, term)
}
