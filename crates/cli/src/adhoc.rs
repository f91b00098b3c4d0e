//! `ownercheck match`: match two files directly, no config.

use std::path::PathBuf;

use ownercheck_match::{run_with_criteria, Criteria, MatchInput};

use crate::report::{emit, OutputOptions};
use crate::CliError;

pub struct MatchArgs {
    pub employees: PathBuf,
    pub owners: PathBuf,
    pub criteria: Option<String>,
    pub output: Option<PathBuf>,
    pub employees_sheet: Option<String>,
    pub owners_sheet: Option<String>,
    pub json: bool,
    pub fail_on_match: bool,
}

pub fn cmd_match(args: MatchArgs) -> Result<(), CliError> {
    let criteria = match args.criteria {
        Some(ref list) => Criteria::parse_list(list).map_err(|e| {
            CliError::args(e.to_string()).with_hint("e.g. --criteria pesel,name,phonetic,address")
        })?,
        None => Criteria::all(),
    };

    let employees = ownercheck_io::load_employees(&args.employees, args.employees_sheet.as_deref())
        .map_err(CliError::load)?;
    let owners = ownercheck_io::load_owners(&args.owners, args.owners_sheet.as_deref())
        .map_err(CliError::load)?;

    let name = format!(
        "{} vs {}",
        args.employees.display(),
        args.owners.display()
    );
    let result = run_with_criteria(&name, criteria, MatchInput { employees, owners });

    emit(
        &result,
        &OutputOptions {
            json: args.json,
            json_file: None,
            reports: args.output.into_iter().collect(),
            fail_on_match: args.fail_on_match,
        },
    )
}
