//! `ownercheck run` / `ownercheck validate`: config-driven matching.

use std::path::{Path, PathBuf};

use ownercheck_match::{MatchConfig, MatchInput};

use crate::exit_codes::EXIT_INVALID_CONFIG;
use crate::report::{emit, OutputOptions};
use crate::CliError;

pub fn cmd_run(
    config_path: PathBuf,
    json_output: bool,
    output_file: Option<PathBuf>,
    fail_on_match: bool,
) -> Result<(), CliError> {
    let config = load_config(&config_path)?;

    // Resolve file paths relative to config file's directory
    let base_dir = config_path.parent().unwrap_or_else(|| Path::new("."));
    log::info!("running '{}' from {}", config.name, config_path.display());

    let employees = ownercheck_io::load_employees(
        &base_dir.join(&config.employees.file),
        config.employees.sheet.as_deref(),
    )
    .map_err(CliError::load)?;
    let owners = ownercheck_io::load_owners(
        &base_dir.join(&config.owners.file),
        config.owners.sheet.as_deref(),
    )
    .map_err(CliError::load)?;

    let result = ownercheck_match::run(&config, MatchInput { employees, owners });

    let reports = [&config.output.xlsx, &config.output.csv, &config.output.json]
        .into_iter()
        .flatten()
        .map(|p| base_dir.join(p))
        .collect();

    emit(
        &result,
        &OutputOptions {
            json: json_output,
            json_file: output_file,
            reports,
            fail_on_match,
        },
    )
}

pub fn cmd_validate(config_path: PathBuf) -> Result<(), CliError> {
    let config = load_config(&config_path)?;

    let criteria: Vec<String> =
        config.criteria().enabled().iter().map(|c| c.to_string()).collect();
    eprintln!("valid: '{}' with criteria {}", config.name, criteria.join(", "));

    let base_dir = config_path.parent().unwrap_or_else(|| Path::new("."));
    for (role, file) in [("employees", &config.employees.file), ("owners", &config.owners.file)] {
        let path = base_dir.join(file);
        if !path.exists() {
            eprintln!("warning: {role} file {} does not exist", path.display());
        }
    }

    Ok(())
}

fn load_config(path: &Path) -> Result<MatchConfig, CliError> {
    let config_str = std::fs::read_to_string(path).map_err(|e| CliError {
        code: EXIT_INVALID_CONFIG,
        message: format!("cannot read config: {e}"),
        hint: None,
    })?;

    MatchConfig::from_toml(&config_str).map_err(|e| CliError {
        code: EXIT_INVALID_CONFIG,
        message: e.to_string(),
        hint: None,
    })
}
