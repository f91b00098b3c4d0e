// Input loading (CSV, TSV, spreadsheets) and match-report export

pub mod csv;
pub mod json;
pub mod records;
pub mod table;
pub mod xlsx;

use std::path::Path;

use ownercheck_match::MatchRun;

pub use records::{load_employees, load_owners};
pub use table::{load_table, normalize_column_name, Table};

/// Export a run, choosing the writer from the file extension
/// (`.xlsx`, `.csv` or `.json`).
pub fn export_run(run: &MatchRun, path: &Path) -> Result<(), String> {
    let ext = path
        .extension()
        .and_then(|e| e.to_str())
        .map(|e| e.to_ascii_lowercase())
        .unwrap_or_default();

    match ext.as_str() {
        "xlsx" => xlsx::export_matches(run, path),
        "csv" => csv::export_matches(run, path),
        "json" => json::export_run(run, path),
        other => Err(format!(
            "{}: unsupported output format '.{other}' (expected xlsx, csv or json)",
            path.display()
        )),
    }
}
