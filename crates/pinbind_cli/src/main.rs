//! pinbind CLI: inspect board catalogs and check pin bindings.
//!
//! Provides `pinbind resources` to list what a board offers,
//! `pinbind candidates` to list the resources that could serve a signal,
//! and `pinbind check` to apply bindings to a design and report whether it
//! is ready for generation.

#![warn(missing_docs)]

mod candidates;
mod check;
mod pipeline;
mod resources;

use std::io::IsTerminal;
use std::path::PathBuf;
use std::process;

use clap::{ArgAction, Parser, Subcommand, ValueEnum};
use tracing_subscriber::EnvFilter;

/// pinbind: bind design I/O to board resources.
#[derive(Parser, Debug)]
#[command(name = "pinbind", version, about = "Board pin-binding resolver")]
pub struct Cli {
    /// Suppress all output except errors.
    #[arg(short, long, global = true)]
    pub quiet: bool,

    /// Increase log verbosity (-v info, -vv debug, -vvv trace).
    #[arg(short, long, global = true, action = ArgAction::Count)]
    pub verbose: u8,

    /// Control colored output.
    #[arg(long, global = true, value_enum, default_value_t = ColorChoice::Auto)]
    pub color: ColorChoice,

    /// The subcommand to run.
    #[command(subcommand)]
    pub command: Command,
}

/// Available CLI commands.
#[derive(Subcommand, Debug)]
pub enum Command {
    /// List the resources of a board file.
    Resources(ResourcesArgs),
    /// List the resources that could serve a signal.
    Candidates(CandidatesArgs),
    /// Apply bindings to a design and report what is left unbound.
    Check(CheckArgs),
}

/// Arguments for the `pinbind resources` subcommand.
#[derive(Parser, Debug)]
pub struct ResourcesArgs {
    /// Board file.
    pub board: PathBuf,

    /// Also list the synthetic resources every board provides.
    #[arg(short, long)]
    pub all: bool,

    /// Output format.
    #[arg(short, long, value_enum, default_value_t = ReportFormat::Text)]
    pub format: ReportFormat,
}

/// Arguments for the `pinbind candidates` subcommand.
#[derive(Parser, Debug)]
pub struct CandidatesArgs {
    /// Board file.
    #[arg(short, long)]
    pub board: PathBuf,

    /// Design file.
    #[arg(short, long)]
    pub design: PathBuf,

    /// Signal display name (e.g. `LED:/main/LED1`). Lists every signal
    /// name when omitted.
    pub signal: Option<String>,
}

/// Arguments for the `pinbind check` subcommand.
#[derive(Parser, Debug)]
pub struct CheckArgs {
    /// Board file.
    #[arg(short, long)]
    pub board: PathBuf,

    /// Design file.
    #[arg(short, long)]
    pub design: PathBuf,

    /// Saved map to apply first.
    #[arg(short, long)]
    pub map: Option<PathBuf>,

    /// Signal paths to map bit by bit.
    #[arg(long, value_name = "PATH")]
    pub alternate: Vec<String>,

    /// Extra bindings, applied after the map (`SIGNAL=RESOURCE`).
    #[arg(long, value_name = "SIGNAL=RESOURCE")]
    pub bind: Vec<String>,

    /// Extra constant bindings (`SIGNAL=VALUE`).
    #[arg(long, value_name = "SIGNAL=VALUE")]
    pub constant: Vec<String>,

    /// Write the resulting bindings to a map file.
    #[arg(long)]
    pub save: Option<PathBuf>,

    /// Output format for the report.
    #[arg(short, long, value_enum, default_value_t = ReportFormat::Text)]
    pub format: ReportFormat,
}

/// Controls whether colored output is produced.
#[derive(Clone, Copy, Debug, PartialEq, Eq, ValueEnum)]
pub enum ColorChoice {
    /// Detect from terminal capabilities.
    Auto,
    /// Always produce colored output.
    Always,
    /// Never produce colored output.
    Never,
}

/// Report output format.
#[derive(Clone, Copy, Debug, PartialEq, Eq, ValueEnum)]
pub enum ReportFormat {
    /// Human-readable terminal output.
    Text,
    /// Machine-readable JSON output.
    Json,
}

/// Global settings derived from CLI flags.
pub struct GlobalArgs {
    /// Whether to suppress non-error output.
    pub quiet: bool,
    /// Whether to use colored output.
    pub color: bool,
}

fn main() {
    let cli = Cli::parse();
    init_logging(cli.quiet, cli.verbose);

    let color = match cli.color {
        ColorChoice::Auto => std::io::stderr().is_terminal(),
        ColorChoice::Always => true,
        ColorChoice::Never => false,
    };
    let global = GlobalArgs {
        quiet: cli.quiet,
        color,
    };

    let result = match cli.command {
        Command::Resources(ref args) => resources::run(args, &global),
        Command::Candidates(ref args) => candidates::run(args, &global),
        Command::Check(ref args) => check::run(args, &global),
    };

    match result {
        Ok(code) => process::exit(code),
        Err(e) => {
            eprintln!("error: {e}");
            process::exit(1);
        }
    }
}

/// Installs the log subscriber. `RUST_LOG` overrides the flag-derived level.
fn init_logging(quiet: bool, verbose: u8) {
    let level = if quiet {
        "error"
    } else {
        match verbose {
            0 => "warn",
            1 => "info",
            2 => "debug",
            _ => "trace",
        }
    };
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(level));
    let _ = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .try_init();
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::Parser;

    #[test]
    fn parse_resources() {
        let cli = Cli::parse_from(["pinbind", "resources", "board.toml", "--all"]);
        match cli.command {
            Command::Resources(ref args) => {
                assert_eq!(args.board, PathBuf::from("board.toml"));
                assert!(args.all);
                assert_eq!(args.format, ReportFormat::Text);
            }
            _ => panic!("expected Resources command"),
        }
    }

    #[test]
    fn parse_candidates() {
        let cli = Cli::parse_from([
            "pinbind",
            "candidates",
            "--board",
            "b.toml",
            "--design",
            "d.toml",
            "LED:/main/LED1",
        ]);
        match cli.command {
            Command::Candidates(ref args) => {
                assert_eq!(args.design, PathBuf::from("d.toml"));
                assert_eq!(args.signal.as_deref(), Some("LED:/main/LED1"));
            }
            _ => panic!("expected Candidates command"),
        }
    }

    #[test]
    fn parse_candidates_without_signal() {
        let cli = Cli::parse_from(["pinbind", "candidates", "-b", "b.toml", "-d", "d.toml"]);
        match cli.command {
            Command::Candidates(ref args) => assert!(args.signal.is_none()),
            _ => panic!("expected Candidates command"),
        }
    }

    #[test]
    fn parse_check_default() {
        let cli = Cli::parse_from(["pinbind", "check", "-b", "b.toml", "-d", "d.toml"]);
        match cli.command {
            Command::Check(ref args) => {
                assert!(args.map.is_none());
                assert!(args.bind.is_empty());
                assert!(args.save.is_none());
                assert_eq!(args.format, ReportFormat::Text);
            }
            _ => panic!("expected Check command"),
        }
    }

    #[test]
    fn parse_check_with_args() {
        let cli = Cli::parse_from([
            "pinbind",
            "check",
            "--board",
            "b.toml",
            "--design",
            "d.toml",
            "--map",
            "m.toml",
            "--alternate",
            "/main/sw",
            "--bind",
            "LED:/main/LED1=LEDR#0",
            "--bind",
            "Pin:/main/sw#0=SW#0",
            "--constant",
            "Bus:/main/cfg=5",
            "--save",
            "out.toml",
            "--format",
            "json",
        ]);
        match cli.command {
            Command::Check(ref args) => {
                assert_eq!(args.map, Some(PathBuf::from("m.toml")));
                assert_eq!(args.alternate, vec!["/main/sw"]);
                assert_eq!(args.bind.len(), 2);
                assert_eq!(args.constant, vec!["Bus:/main/cfg=5"]);
                assert_eq!(args.save, Some(PathBuf::from("out.toml")));
                assert_eq!(args.format, ReportFormat::Json);
            }
            _ => panic!("expected Check command"),
        }
    }

    #[test]
    fn parse_global_flags() {
        let cli = Cli::parse_from([
            "pinbind", "--quiet", "--color", "never", "resources", "b.toml",
        ]);
        assert!(cli.quiet);
        assert_eq!(cli.verbose, 0);
        assert_eq!(cli.color, ColorChoice::Never);
    }

    #[test]
    fn parse_verbosity_count() {
        let cli = Cli::parse_from(["pinbind", "-vv", "resources", "b.toml"]);
        assert_eq!(cli.verbose, 2);
        assert!(!cli.quiet);
    }

    #[test]
    fn check_requires_board_and_design() {
        assert!(Cli::try_parse_from(["pinbind", "check", "--board", "b.toml"]).is_err());
    }
}
