//! Shared output for `run` and `match`: reports, JSON, human summary.

use std::path::PathBuf;

use ownercheck_match::MatchRun;

use crate::exit_codes::{EXIT_ERROR, EXIT_EXPORT, EXIT_MATCHES_FOUND};
use crate::CliError;

pub struct OutputOptions {
    /// Print the run as JSON to stdout.
    pub json: bool,
    /// Also write the JSON run to this file.
    pub json_file: Option<PathBuf>,
    /// Report files; format follows each extension.
    pub reports: Vec<PathBuf>,
    pub fail_on_match: bool,
}

pub fn emit(result: &MatchRun, opts: &OutputOptions) -> Result<(), CliError> {
    for path in &opts.reports {
        ownercheck_io::export_run(result, path).map_err(CliError::export)?;
        eprintln!("wrote {}", path.display());
    }

    if opts.json || opts.json_file.is_some() {
        let json_str = serde_json::to_string_pretty(result).map_err(|e| CliError {
            code: EXIT_ERROR,
            message: format!("JSON serialization error: {e}"),
            hint: None,
        })?;

        if let Some(ref path) = opts.json_file {
            std::fs::write(path, &json_str).map_err(|e| CliError {
                code: EXIT_EXPORT,
                message: format!("cannot write output: {e}"),
                hint: None,
            })?;
            eprintln!("wrote {}", path.display());
        }

        if opts.json {
            println!("{json_str}");
        }
    }

    print_summary(result);

    if opts.fail_on_match && !result.rows.is_empty() {
        return Err(CliError {
            code: EXIT_MATCHES_FOUND,
            message: format!("{} match row(s) found", result.rows.len()),
            hint: None,
        });
    }

    Ok(())
}

/// Human summary to stderr.
fn print_summary(result: &MatchRun) {
    let s = &result.summary;
    eprintln!(
        "{} employee(s) x {} owner(s): {} matched pair(s), {} row(s) after dedup",
        s.employees, s.owners, s.matched_pairs, s.rows,
    );

    if !s.reason_counts.is_empty() {
        let reasons: Vec<String> = s
            .reason_counts
            .iter()
            .map(|(reason, count)| format!("{reason} {count}"))
            .collect();
        eprintln!("reasons: {}", reasons.join(", "));
    }
}
