mod app;
mod calendar;
mod config;
mod help;
mod theme;
use crate::app::App;
use crate::calendar::{CalendarMode, CalendarProperties, CalendarView};
use crate::config::Config;
use anyhow::Context;
use lexopt::{Arg, Parser, ValueExt};
use ratatui::DefaultTerminal;
use std::fs::File;
use std::path::PathBuf;
use time::{format_description::FormatItem, macros::format_description, Date, OffsetDateTime};

static YMD_FMT: &[FormatItem<'_>] = format_description!("[year]-[month]-[day]");

#[derive(Clone, Debug, Eq, PartialEq)]
enum Command {
    Run {
        date: Option<Date>,
        config: Option<PathBuf>,
        mode: Option<CalendarMode>,
        log_file: Option<PathBuf>,
    },
    Help,
    Version,
}

impl Command {
    fn from_parser(mut parser: Parser) -> Result<Command, lexopt::Error> {
        let mut date = None;
        let mut config = None;
        let mut mode = None;
        let mut log_file = None;
        while let Some(arg) = parser.next()? {
            match arg {
                Arg::Short('h') | Arg::Long("help") => return Ok(Command::Help),
                Arg::Short('V') | Arg::Long("version") => return Ok(Command::Version),
                Arg::Short('c') | Arg::Long("config") => {
                    config = Some(PathBuf::from(parser.value()?));
                }
                Arg::Short('m') | Arg::Long("mode") => {
                    mode = Some(parser.value()?.parse()?);
                }
                Arg::Long("log-file") => {
                    log_file = Some(PathBuf::from(parser.value()?));
                }
                Arg::Value(value) if date.is_none() => {
                    let value = value.string()?;
                    match Date::parse(&value, &YMD_FMT) {
                        Ok(d) => date = Some(d),
                        Err(e) => {
                            return Err(lexopt::Error::ParsingFailed {
                                value,
                                error: Box::new(e),
                            })
                        }
                    }
                }
                _ => return Err(arg.unexpected()),
            }
        }
        Ok(Command::Run {
            date,
            config,
            mode,
            log_file,
        })
    }

    fn run(self) -> anyhow::Result<()> {
        match self {
            Command::Run {
                date,
                config,
                mode,
                log_file,
            } => {
                if let Some(path) = log_file {
                    init_logging(path)?;
                }
                let mut props = match config {
                    Some(path) => Config::load(&path)?
                        .into_properties()
                        .with_context(|| format!("invalid configuration in {}", path.display()))?,
                    None => CalendarProperties::default(),
                };
                if let Some(mode) = mode {
                    props.mode = mode;
                }
                let today = OffsetDateTime::now_local()
                    .context("failed to determine local date")?
                    .date();
                log::debug!("starting in {} mode; today is {today}", props.mode);
                let selected = with_terminal(|mut terminal| {
                    terminal.hide_cursor().context("failed to hide cursor")?;
                    let mut view = CalendarView::new(today, props);
                    if let Some(date) = date {
                        view = view.start_date(date);
                    }
                    Ok(App::new(view).run(terminal)?)
                })?;
                for date in selected {
                    println!("{date}");
                }
                Ok(())
            }
            Command::Help => {
                println!("Usage: daypick [OPTIONS] [YYYY-MM-DD]");
                println!();
                println!("Terminal calendar for picking a day, several days, or a range of days");
                println!();
                println!("Options:");
                println!("  -c, --config FILE   Read calendar settings from a TOML file");
                println!("  -m, --mode MODE     Selection mode: classic, one-day, many-days, or range");
                println!("      --log-file FILE Write log messages to FILE");
                println!("  -h, --help          Display this help message and exit");
                println!("  -V, --version       Show the program version and exit");
                Ok(())
            }
            Command::Version => {
                println!("{} {}", env!("CARGO_PKG_NAME"), env!("CARGO_PKG_VERSION"));
                Ok(())
            }
        }
    }
}

fn main() -> anyhow::Result<()> {
    Command::from_parser(Parser::from_env())?.run()
}

// The terminal belongs to the calendar, so log messages go to a file.
fn init_logging(path: PathBuf) -> anyhow::Result<()> {
    let file = File::create(&path)
        .with_context(|| format!("failed to create log file {}", path.display()))?;
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("debug"))
        .target(env_logger::Target::Pipe(Box::new(file)))
        .init();
    Ok(())
}

fn with_terminal<F, T>(func: F) -> anyhow::Result<T>
where
    F: FnOnce(DefaultTerminal) -> anyhow::Result<T>,
{
    let terminal = ratatui::init();
    let r = func(terminal);
    ratatui::restore();
    r
}
