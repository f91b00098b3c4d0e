// ownercheck CLI - employee / company-owner cross-check

mod adhoc;
mod exit_codes;
mod report;
mod run;

use std::path::PathBuf;
use std::process::ExitCode;

use clap::{ArgAction, Parser, Subcommand};

use exit_codes::{EXIT_EXPORT, EXIT_LOAD, EXIT_SUCCESS, EXIT_USAGE};

#[derive(Parser)]
#[command(name = "ownercheck")]
#[command(about = "Find employees who also appear as company owners")]
#[command(long_version = long_version())]
#[command(version)]
struct Cli {
    /// Increase log verbosity (-v info, -vv debug); RUST_LOG overrides
    #[arg(short, long, action = ArgAction::Count, global = true)]
    verbose: u8,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Run matching from a TOML config file
    #[command(after_help = "\
Examples:
  ownercheck run check.toml
  ownercheck run check.toml --json
  ownercheck run check.toml --output run.json
  ownercheck run check.toml --fail-on-match")]
    Run {
        /// Path to the config file
        config: PathBuf,

        /// Output JSON to stdout in addition to the human summary
        #[arg(long)]
        json: bool,

        /// Write JSON output to file
        #[arg(long)]
        output: Option<PathBuf>,

        /// Exit with code 6 when any match is found
        #[arg(long)]
        fail_on_match: bool,
    },

    /// Match an employee file against an owner file without a config
    #[command(after_help = "\
Examples:
  ownercheck match --employees employees.xlsx --owners companies.xlsx -o matches.xlsx
  ownercheck match --employees staff.csv --owners owners.csv --criteria pesel,name
  ownercheck match --employees hr.xlsx --employees-sheet Staff --owners krs.csv --json")]
    Match {
        /// Employee table (csv, tsv, xlsx, xls, xlsb, ods)
        #[arg(long)]
        employees: PathBuf,

        /// Company-owner table (csv, tsv, xlsx, xls, xlsb, ods)
        #[arg(long)]
        owners: PathBuf,

        /// Comma-separated criteria: pesel, name, phonetic, address (default: all)
        #[arg(long, value_name = "LIST")]
        criteria: Option<String>,

        /// Report file (.xlsx, .csv or .json)
        #[arg(long, short = 'o')]
        output: Option<PathBuf>,

        /// Worksheet to read from the employee spreadsheet (default: first)
        #[arg(long, value_name = "SHEET")]
        employees_sheet: Option<String>,

        /// Worksheet to read from the owner spreadsheet (default: first)
        #[arg(long, value_name = "SHEET")]
        owners_sheet: Option<String>,

        /// Output JSON to stdout in addition to the human summary
        #[arg(long)]
        json: bool,

        /// Exit with code 6 when any match is found
        #[arg(long)]
        fail_on_match: bool,
    },

    /// Validate a config file without running
    #[command(after_help = "\
Examples:
  ownercheck validate check.toml")]
    Validate {
        /// Path to the config file
        config: PathBuf,
    },
}

fn long_version() -> &'static str {
    concat!(
        env!("CARGO_PKG_VERSION"),
        " (", env!("GIT_COMMIT_HASH"), ")",
        "\nengine:  ownercheck-match ", env!("CARGO_PKG_VERSION"),
        "\ntarget:  ", env!("TARGET"),
    )
}

fn init_logging(verbose: u8) {
    let default_level = match verbose {
        0 => "warn",
        1 => "info",
        _ => "debug",
    };
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or(default_level))
        .format_timestamp(None)
        .init();
}

fn main() -> ExitCode {
    let cli = Cli::parse();
    init_logging(cli.verbose);

    let result = match cli.command {
        Commands::Run {
            config,
            json,
            output,
            fail_on_match,
        } => run::cmd_run(config, json, output, fail_on_match),
        Commands::Match {
            employees,
            owners,
            criteria,
            output,
            employees_sheet,
            owners_sheet,
            json,
            fail_on_match,
        } => adhoc::cmd_match(adhoc::MatchArgs {
            employees,
            owners,
            criteria,
            output,
            employees_sheet,
            owners_sheet,
            json,
            fail_on_match,
        }),
        Commands::Validate { config } => run::cmd_validate(config),
    };

    match result {
        Ok(()) => ExitCode::from(EXIT_SUCCESS),
        Err(CliError { code, message, hint }) => {
            if !message.is_empty() {
                eprintln!("error: {}", message);
            }
            if let Some(hint) = hint {
                eprintln!("hint:  {}", hint);
            }
            ExitCode::from(code)
        }
    }
}

#[derive(Debug)]
pub struct CliError {
    pub code: u8,
    pub message: String,
    pub hint: Option<String>,
}

impl CliError {
    pub fn args(msg: impl Into<String>) -> Self {
        Self { code: EXIT_USAGE, message: msg.into(), hint: None }
    }

    pub fn load(msg: impl Into<String>) -> Self {
        Self {
            code: EXIT_LOAD,
            message: msg.into(),
            hint: Some("inputs need a header row; see `ownercheck match --help`".to_string()),
        }
    }

    pub fn export(msg: impl Into<String>) -> Self {
        Self { code: EXIT_EXPORT, message: msg.into(), hint: None }
    }

    /// Add a hint to an existing error.
    pub fn with_hint(mut self, hint: impl Into<String>) -> Self {
        self.hint = Some(hint.into());
        self
    }
}
