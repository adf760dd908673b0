mod calendar;
mod config;
mod directive;
mod document;
mod error;
mod html;
mod month;
mod render;
use crate::config::{config_path, Settings};
use crate::document::render_document;
use crate::render::render_source;
use anyhow::Context;
use lexopt::{Arg, Parser, ValueExt};
use std::fs;
use std::io::{self, Read};
use std::path::{Path, PathBuf};

#[derive(Clone, Debug, Eq, PartialEq)]
enum Command {
    Run { options: Options, action: Action },
    Help,
    Version,
}

#[derive(Clone, Debug, Default, Eq, PartialEq)]
struct Options {
    config: Option<PathBuf>,
    verbosity: u8,
}

#[derive(Clone, Debug, Eq, PartialEq)]
enum Action {
    Render {
        input: Option<PathBuf>,
        document: bool,
    },
    Configure {
        edits: Vec<(String, String)>,
        show: bool,
    },
}

impl Command {
    fn from_parser(mut parser: Parser) -> Result<Command, lexopt::Error> {
        let mut options = Options::default();
        let mut input = None;
        let mut document = false;
        let mut edits = Vec::new();
        let mut show = false;
        while let Some(arg) = parser.next()? {
            match arg {
                Arg::Short('h') | Arg::Long("help") => return Ok(Command::Help),
                Arg::Short('V') | Arg::Long("version") => return Ok(Command::Version),
                Arg::Short('c') | Arg::Long("config") => {
                    options.config = Some(PathBuf::from(parser.value()?));
                }
                Arg::Short('d') | Arg::Long("document") => document = true,
                Arg::Short('s') | Arg::Long("set") => {
                    let value = parser.value()?.string()?;
                    match value.split_once('=') {
                        Some((key, v)) => edits.push((key.trim().to_owned(), v.to_owned())),
                        None => {
                            return Err(lexopt::Error::ParsingFailed {
                                value,
                                error: "expected KEY=VALUE".into(),
                            })
                        }
                    }
                }
                Arg::Long("show-config") => show = true,
                Arg::Short('v') | Arg::Long("verbose") => {
                    options.verbosity = options.verbosity.saturating_add(1);
                }
                Arg::Value(value) if input.is_none() => input = Some(PathBuf::from(value)),
                _ => return Err(arg.unexpected()),
            }
        }
        let action = if edits.is_empty() && !show {
            Action::Render { input, document }
        } else if input.is_some() || document {
            return Err(lexopt::Error::from(
                "--set and --show-config cannot be combined with rendering",
            ));
        } else {
            Action::Configure { edits, show }
        };
        Ok(Command::Run { options, action })
    }

    fn run(self) -> anyhow::Result<()> {
        match self {
            Command::Run { options, action } => {
                init_logging(options.verbosity);
                let path = config_path(options.config)?;
                let mut settings = Settings::open(path)?;
                match action {
                    Action::Render { input, document } => {
                        let source = read_input(input.as_deref())?;
                        if document {
                            print!("{}", render_document(&source, settings.config()));
                        } else {
                            println!("{}", render_source(&source, settings.config()));
                        }
                    }
                    Action::Configure { edits, show } => {
                        for (key, value) in edits {
                            settings
                                .edit(&key, &value)
                                .with_context(|| format!("failed to update setting {key}"))?;
                        }
                        if show {
                            print!("{}", settings.config().to_toml()?);
                        }
                    }
                }
                Ok(())
            }
            Command::Help => {
                println!("Usage: habitgrid [OPTIONS] [FILE]");
                println!("       habitgrid [OPTIONS] --set KEY=VALUE ...");
                println!();
                println!("Render a month of marked days as an HTML calendar table");
                println!();
                println!("Reads the markup from FILE, or standard input if FILE is omitted or \"-\".");
                println!();
                println!("Options:");
                println!("  -c, --config PATH    Read and store settings in PATH");
                println!("  -d, --document       Render every ```habitt block in a Markdown document");
                println!("  -s, --set KEY=VALUE  Change a setting and save it");
                println!("      --show-config    Print the current settings");
                println!("  -v, --verbose        Log more; may be repeated");
                println!("  -h, --help           Display this help message and exit");
                println!("  -V, --version        Show the program version and exit");
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

fn init_logging(verbosity: u8) {
    let level = match verbosity {
        0 => "warn",
        1 => "info",
        2 => "debug",
        _ => "trace",
    };
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or(level))
        .target(env_logger::Target::Stderr)
        .init();
}

fn read_input(path: Option<&Path>) -> anyhow::Result<String> {
    match path {
        Some(path) if path != Path::new("-") => fs::read_to_string(path)
            .with_context(|| format!("failed to read {}", path.display())),
        _ => {
            let mut source = String::new();
            io::stdin()
                .read_to_string(&mut source)
                .context("failed to read standard input")?;
            Ok(source)
        }
    }
}
