//! Main CLI application

use crate::config::load_cli;
use crate::error::Result;
use crate::render::{Completer, Shell};
use clap::{Arg, ArgAction, ArgMatches, Command};
use std::ffi::OsString;
use std::fs;
use std::io::{self, Write};
use std::path::PathBuf;
use tracing::{debug, info};
use tracing_subscriber::EnvFilter;

/// How much the binary logs on stderr
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Verbosity {
    Silent,
    Quiet,
    Normal,
    Verbose,
}

impl Verbosity {
    /// Filter directive used when `RUST_LOG` is not set
    pub fn directive(self) -> &'static str {
        match self {
            Verbosity::Silent => "off",
            Verbosity::Quiet => "error",
            Verbosity::Normal => "warn",
            Verbosity::Verbose => "rcomplete=debug",
        }
    }
}

/// Build the clap command
pub fn build_command() -> Command {
    Command::new("rcomplete")
        .version(env!("CARGO_PKG_VERSION"))
        .about("Generate shell completion scripts from a command definition")
        .arg(
            Arg::new("cli")
                .value_name("CLI")
                .help("Command definition as FILE[:KEY.PATH], e.g. tools.yml:apps.server")
                .required(true),
        )
        .arg(
            Arg::new("shell")
                .value_name("SHELL")
                .help("bash, zsh, fish or powershell; guessed from $SHELL when omitted"),
        )
        .arg(
            Arg::new("prog")
                .short('p')
                .long("prog")
                .value_name("PROG")
                .help("Program name to complete; repeat to register aliases")
                .action(ArgAction::Append),
        )
        .arg(
            Arg::new("output")
                .short('o')
                .long("output")
                .value_name("FILE")
                .help("Write the script to FILE instead of stdout")
                .value_parser(clap::value_parser!(PathBuf)),
        )
        .arg(
            Arg::new("quiet")
                .short('q')
                .long("quiet")
                .help("Only log errors")
                .action(ArgAction::SetTrue),
        )
        .arg(
            Arg::new("silent")
                .short('s')
                .long("silent")
                .help("Log nothing")
                .action(ArgAction::SetTrue),
        )
        .arg(
            Arg::new("verbose")
                .short('v')
                .long("verbose")
                .help("Print debug logs")
                .action(ArgAction::SetTrue),
        )
}

/// Get verbosity level from matches
fn get_verbosity(matches: &ArgMatches) -> Verbosity {
    if matches.get_flag("silent") {
        Verbosity::Silent
    } else if matches.get_flag("quiet") {
        Verbosity::Quiet
    } else if matches.get_flag("verbose") {
        Verbosity::Verbose
    } else {
        Verbosity::Normal
    }
}

/// Install the stderr subscriber; `RUST_LOG` overrides the flags
fn init_logging(verbosity: Verbosity) {
    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(verbosity.directive()));
    // a subscriber may already be installed when embedded or under test
    let _ = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(false)
        .with_writer(io::stderr)
        .try_init();
}

/// Run the CLI application with the process arguments
pub fn run() -> Result<()> {
    run_from(std::env::args_os())
}

/// Run the CLI application with provided arguments.
///
/// Usage errors, `--help` and `--version` are handled by clap and exit the
/// process.
pub fn run_from<I, T>(args: I) -> Result<()>
where
    I: IntoIterator<Item = T>,
    T: Into<OsString> + Clone,
{
    let matches = build_command().get_matches_from(args);
    init_logging(get_verbosity(&matches));
    generate(&matches)
}

/// Render the script described by parsed arguments
fn generate(matches: &ArgMatches) -> Result<()> {
    let spec = matches
        .get_one::<String>("cli")
        .map(String::as_str)
        .unwrap_or_default();
    let definition = load_cli(spec)?;

    let prog: Vec<String> = matches
        .get_many::<String>("prog")
        .map(|values| values.cloned().collect())
        .unwrap_or_default();
    let completer = Completer::new(&definition)?.with_prog(prog);

    let shell = match matches.get_one::<String>("shell") {
        Some(name) => name.parse()?,
        None => Shell::detect()?,
    };
    debug!(%shell, names = ?completer.prog(), "resolved target");

    // render fully before touching the sink
    let script = completer.render_shell(shell);

    match matches.get_one::<PathBuf>("output") {
        Some(path) => {
            fs::write(path, script)?;
            info!(path = %path.display(), "completion script written");
        }
        None => {
            let mut stdout = io::stdout().lock();
            stdout.write_all(script.as_bytes())?;
            stdout.flush()?;
        }
    }

    Ok(())
}
