mod app;
mod command;
mod config;
mod consts;
mod game;
mod leaderboard;
mod logging;
mod menu;
mod session;
mod store;
mod util;
mod widgets;
use crate::app::App;
use crate::config::Config;
use crate::game::BoardView;
use crate::leaderboard::Leaderboard;
use crate::session::{IntervalTicker, Session};
use anyhow::Context;
use lexopt::{Arg, Parser};
use std::io::{self, ErrorKind};
use std::path::PathBuf;
use std::process::ExitCode;

#[derive(Clone, Debug, Eq, PartialEq)]
enum Arguments {
    Run(RunOptions),
    Help,
    Version,
}

#[derive(Clone, Debug, Default, Eq, PartialEq)]
struct RunOptions {
    config: Option<PathBuf>,
    log_file: Option<PathBuf>,
}

impl Arguments {
    fn from_parser(mut parser: Parser) -> Result<Arguments, lexopt::Error> {
        let mut opts = RunOptions::default();
        while let Some(arg) = parser.next()? {
            match arg {
                Arg::Short('c') | Arg::Long("config") => {
                    opts.config = Some(PathBuf::from(parser.value()?));
                }
                Arg::Short('l') | Arg::Long("log-file") => {
                    opts.log_file = Some(PathBuf::from(parser.value()?));
                }
                Arg::Short('h') | Arg::Long("help") => return Ok(Arguments::Help),
                Arg::Short('V') | Arg::Long("version") => return Ok(Arguments::Version),
                _ => return Err(arg.unexpected()),
            }
        }
        Ok(Arguments::Run(opts))
    }

    fn run(self) -> ExitCode {
        match self {
            Arguments::Run(opts) => exit_code(opts.run()),
            Arguments::Help => {
                println!("Usage: gridsnake [-c|--config <path>] [-l|--log-file <path>]");
                println!();
                println!("Play Snake in your terminal");
                println!();
                println!("Options:");
                println!("  -c <path>, --config <path>");
                println!("                    Read configuration from the given file");
                println!();
                println!("  -l <path>, --log-file <path>");
                println!("                    Append log messages to the given file");
                println!();
                println!("  -h, --help        Display this help message and exit");
                println!("  -V, --version     Show the program version and exit");
                ExitCode::SUCCESS
            }
            Arguments::Version => {
                println!("{} {}", env!("CARGO_PKG_NAME"), env!("CARGO_PKG_VERSION"));
                ExitCode::SUCCESS
            }
        }
    }
}

impl RunOptions {
    fn run(self) -> anyhow::Result<()> {
        let (config_path, allow_missing) = match self.config {
            Some(p) => (p, false),
            None => (Config::default_path()?, true),
        };
        let config = Config::load(&config_path, allow_missing).with_context(|| {
            format!(
                "failed to load configuration from {}",
                config_path.display()
            )
        })?;
        if let Some(log_file) = self.log_file.or_else(|| config.files.log_file.clone()) {
            logging::init(&log_file)
                .with_context(|| format!("failed to set up logging to {}", log_file.display()))?;
        }
        log::info!("Starting {} {}", env!("CARGO_PKG_NAME"), env!("CARGO_PKG_VERSION"));
        let store = config.open_store()?;
        let session = Session::new(
            Leaderboard::new(store),
            IntervalTicker::new(),
            BoardView::new(),
            rand::rng(),
        );
        let terminal = ratatui::init();
        let r = App::new(session).run(terminal);
        ratatui::restore();
        r?;
        Ok(())
    }
}

fn main() -> ExitCode {
    match Arguments::from_parser(Parser::from_env()) {
        Ok(args) => args.run(),
        Err(e) => {
            eprintln!("gridsnake: {e}");
            ExitCode::from(2)
        }
    }
}

fn exit_code(r: anyhow::Result<()>) -> ExitCode {
    match r {
        Ok(()) => ExitCode::SUCCESS,
        Err(e)
            if e.downcast_ref::<io::Error>()
                .is_some_and(|e| e.kind() == ErrorKind::BrokenPipe) =>
        {
            ExitCode::SUCCESS
        }
        Err(e) => {
            log::error!("{e:#}");
            eprintln!("gridsnake: {e:#}");
            ExitCode::from(2)
        }
    }
}
