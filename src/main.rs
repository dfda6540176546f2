mod app;
mod audio;
mod command;
mod config;
mod consts;
mod game;
mod menu;
mod options;
mod scores;
mod ticker;
mod util;
use crate::app::App;
use crate::audio::{Audio, CueSink, Silent, TerminalBell};
use crate::config::Config;
use crate::game::Game;
use crate::menu::MainMenu;
use anyhow::Context;
use lexopt::{Arg, Parser};
use std::io::{self, ErrorKind};
use std::path::{Path, PathBuf};
use std::process::ExitCode;
use std::sync::Mutex;
use tracing_subscriber::EnvFilter;

/// Environment variable consulted for the log filter when `--log-file` is given
const LOG_ENV_VAR: &str = "WRAPSNAKE_LOG";

#[derive(Clone, Debug, Eq, PartialEq)]
enum Cli {
    Run(Arguments),
    Help,
    Version,
}

#[derive(Clone, Debug, Default, Eq, PartialEq)]
struct Arguments {
    config: Option<PathBuf>,
    log_file: Option<PathBuf>,
}

impl Cli {
    fn from_parser(mut parser: Parser) -> Result<Cli, lexopt::Error> {
        let mut args = Arguments::default();
        while let Some(arg) = parser.next()? {
            match arg {
                Arg::Short('c') | Arg::Long("config") => {
                    args.config = Some(PathBuf::from(parser.value()?));
                }
                Arg::Long("log-file") => {
                    args.log_file = Some(PathBuf::from(parser.value()?));
                }
                Arg::Short('h') | Arg::Long("help") => return Ok(Cli::Help),
                Arg::Short('V') | Arg::Long("version") => return Ok(Cli::Version),
                _ => return Err(arg.unexpected()),
            }
        }
        Ok(Cli::Run(args))
    }

    fn run(self) -> ExitCode {
        match self {
            Cli::Run(args) => match args.run() {
                Ok(()) => ExitCode::SUCCESS,
                Err(e) => error_exit(&e),
            },
            Cli::Help => {
                println!("Usage: wrapsnake [-c|--config <PATH>] [--log-file <PATH>]");
                println!();
                println!("Play Snake on a board whose edges wrap around");
                println!();
                println!("Options:");
                println!("  -c <PATH>, --config <PATH>");
                println!("                    Read configuration from the given file");
                println!();
                println!("  --log-file <PATH> Write log messages to the given file");
                println!();
                println!("  -h, --help        Display this help message and exit");
                println!("  -V, --version     Show the program version and exit");
                ExitCode::SUCCESS
            }
            Cli::Version => {
                println!("{} {}", env!("CARGO_PKG_NAME"), env!("CARGO_PKG_VERSION"));
                ExitCode::SUCCESS
            }
        }
    }
}

impl Arguments {
    fn run(self) -> anyhow::Result<()> {
        if let Some(ref path) = self.log_file {
            init_logging(path)?;
        }
        let config = match self.config {
            Some(path) => Config::load(&path, false)
                .with_context(|| format!("failed to load configuration from {}", path.display()))?,
            None => Config::load(&Config::default_path()?, true)
                .context("failed to load default configuration")?,
        };
        tracing::debug!(?config, "Loaded configuration");
        let scores = config.open_scores()?;
        let sink: Box<dyn CueSink> = if config.game.bell {
            Box::new(TerminalBell::stdout())
        } else {
            Box::new(Silent)
        };
        let options = config.options();
        let game = Game::new(config.intervals, scores, Audio::new(sink, !options.sound));
        let app = App::new(game, MainMenu::new(options));
        let terminal = ratatui::init();
        let r = app.run(terminal);
        ratatui::restore();
        r.context("terminal I/O failed")
    }
}

fn init_logging(path: &Path) -> anyhow::Result<()> {
    let file = fs_err::File::create(path).context("failed to open log file")?;
    let filter = EnvFilter::try_from_env(LOG_ENV_VAR).unwrap_or_else(|_| EnvFilter::new("info"));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(Mutex::new(file))
        .with_ansi(false)
        .init();
    tracing::info!(version = env!("CARGO_PKG_VERSION"), "Starting wrapsnake");
    Ok(())
}

fn error_exit(e: &anyhow::Error) -> ExitCode {
    if is_broken_pipe(e) {
        return ExitCode::SUCCESS;
    }
    tracing::error!("Fatal error: {e:#}");
    eprintln!("wrapsnake: {e:#}");
    ExitCode::from(2)
}

fn is_broken_pipe(e: &anyhow::Error) -> bool {
    e.chain()
        .filter_map(|src| src.downcast_ref::<io::Error>())
        .any(|ioe| ioe.kind() == ErrorKind::BrokenPipe)
}

fn main() -> ExitCode {
    match Cli::from_parser(Parser::from_env()) {
        Ok(cli) => cli.run(),
        Err(e) => {
            eprintln!("wrapsnake: {e}");
            ExitCode::from(2)
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;

    fn parse_args(args: &[&str]) -> Result<Cli, lexopt::Error> {
        Cli::from_parser(Parser::from_args(args.iter().copied()))
    }

    fn parse(args: &[&str]) -> Cli {
        parse_args(args).unwrap()
    }

    #[test]
    fn no_args() {
        assert_eq!(parse(&[]), Cli::Run(Arguments::default()));
    }

    #[rstest]
    #[case(&["-c", "snake.toml"])]
    #[case(&["--config", "snake.toml"])]
    #[case(&["--config=snake.toml"])]
    fn config_flag(#[case] args: &[&str]) {
        assert_eq!(
            parse(args),
            Cli::Run(Arguments {
                config: Some(PathBuf::from("snake.toml")),
                log_file: None,
            })
        );
    }

    #[test]
    fn log_file_flag() {
        assert_eq!(
            parse(&["--log-file", "snake.log", "-c", "cfg.toml"]),
            Cli::Run(Arguments {
                config: Some(PathBuf::from("cfg.toml")),
                log_file: Some(PathBuf::from("snake.log")),
            })
        );
    }

    #[rstest]
    #[case(&["-h"], Cli::Help)]
    #[case(&["--help", "--bogus"], Cli::Help)]
    #[case(&["-V"], Cli::Version)]
    #[case(&["--version"], Cli::Version)]
    fn info_flags(#[case] args: &[&str], #[case] cli: Cli) {
        assert_eq!(parse(args), cli);
    }

    #[test]
    fn unknown_flag() {
        assert!(parse_args(&["--bogus"]).is_err());
        assert!(parse_args(&["stray"]).is_err());
    }

    #[test]
    fn missing_value() {
        assert!(parse_args(&["--config"]).is_err());
    }

    #[test]
    fn broken_pipe_detected_through_context() {
        let e = anyhow::Error::new(io::Error::from(ErrorKind::BrokenPipe)).context("drawing");
        assert!(is_broken_pipe(&e));
        let e = anyhow::Error::new(io::Error::from(ErrorKind::NotFound)).context("drawing");
        assert!(!is_broken_pipe(&e));
    }
}
