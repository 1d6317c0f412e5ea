mod app;
mod command;
mod config;
mod consts;
mod events;
mod game;
mod menu;
mod settings;
mod store;
mod util;
use crate::app::App;
use crate::config::Config;
use crate::game::{Game, Grid};
use crate::settings::Settings;
use crate::store::JsonStore;
use anyhow::Context;
use lexopt::{Arg, Parser};
use std::io::{self, ErrorKind};
use std::path::{Path, PathBuf};
use std::process::ExitCode;

/// Grid snake arcade game
#[derive(Clone, Debug, Eq, PartialEq)]
enum Cli {
    Run { config: Option<PathBuf> },
    Help,
    Version,
}

impl Cli {
    fn from_parser(mut parser: Parser) -> Result<Cli, lexopt::Error> {
        let mut config = None;
        while let Some(arg) = parser.next()? {
            match arg {
                Arg::Short('c') | Arg::Long("config") => {
                    config = Some(PathBuf::from(parser.value()?));
                }
                Arg::Short('h') | Arg::Long("help") => return Ok(Cli::Help),
                Arg::Short('V') | Arg::Long("version") => return Ok(Cli::Version),
                _ => return Err(arg.unexpected()),
            }
        }
        Ok(Cli::Run { config })
    }
}

const HELP: &str = "\
Usage: gridsnake [-c|--config <path>]

Play snake on a grid in the terminal.

Options:
  -c, --config <path>   Read configuration from the given file
  -h, --help            Display this help message and exit
  -V, --version         Show the program version and exit
";

fn main() -> ExitCode {
    let cli = match Cli::from_parser(Parser::from_env()) {
        Ok(cli) => cli,
        Err(e) => {
            eprintln!("gridsnake: {e}");
            return ExitCode::from(2);
        }
    };
    match cli {
        Cli::Help => {
            print!("{HELP}");
            ExitCode::SUCCESS
        }
        Cli::Version => {
            println!("gridsnake {}", env!("CARGO_PKG_VERSION"));
            ExitCode::SUCCESS
        }
        Cli::Run { config } => {
            let app = match setup(config.as_deref()) {
                Ok(app) => app,
                Err(e) => {
                    eprintln!("gridsnake: {e:?}");
                    return ExitCode::from(2);
                }
            };
            let terminal = ratatui::init();
            let r = app.run(terminal);
            ratatui::restore();
            io_exit(r)
        }
    }
}

/// Load the configuration, start logging, open the records store, and build
/// the application
fn setup(config_path: Option<&Path>) -> anyhow::Result<App<JsonStore>> {
    let config = match config_path {
        Some(p) => Config::load(p, false),
        None => Config::load(&Config::default_path()?, true),
    }
    .context("failed to load configuration")?;
    if let Some(ref path) = config.files.log_file {
        simplelog::WriteLogger::init(
            config.files.log_level,
            simplelog::Config::default(),
            fs_err::File::create(path).context("failed to create log file")?,
        )
        .context("failed to initialize logging")?;
    }
    log::info!("Starting gridsnake {}", env!("CARGO_PKG_VERSION"));
    let store = config.open_store().unwrap_or_else(|e| {
        log::warn!("{:#}; records will not be kept", anyhow::Error::new(e));
        JsonStore::in_memory()
    });
    if let Some(p) = store.path() {
        log::debug!("Records file: {}", p.display());
    }
    let game = Game::new(
        Grid::new(config.game.grid_width, config.game.grid_height),
        config.game.base_score_per_food,
        store,
    );
    let settings = Settings::new(config.game.difficulty, game.records().high_score);
    Ok(App::new(game, settings))
}

fn io_exit(r: io::Result<()>) -> ExitCode {
    match r {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) if e.kind() == ErrorKind::BrokenPipe => ExitCode::SUCCESS,
        Err(e) => {
            eprintln!("{e}");
            ExitCode::from(2)
        }
    }
}
