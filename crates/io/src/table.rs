// Tabular input: header row + optional-text cells, loaded from CSV/TSV or a
// spreadsheet chosen by file extension.

use std::path::Path;
use std::sync::LazyLock;

use regex::Regex;

static NON_WORD: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"\W+").expect("valid non-word pattern"));

/// A loaded sheet. Column names are normalized; `None` is an absent cell.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Table {
    pub columns: Vec<String>,
    pub rows: Vec<Vec<Option<String>>>,
}

impl Table {
    /// Build from a raw grid whose first row is the header.
    ///
    /// Entirely blank data rows are skipped. A blank header cell becomes
    /// `column_<n>` (1-based).
    pub fn from_grid(grid: Vec<Vec<Option<String>>>) -> Table {
        let mut rows = grid.into_iter();
        let columns = match rows.next() {
            Some(header) => header
                .iter()
                .enumerate()
                .map(|(i, cell)| {
                    let name = cell.as_deref().map(normalize_column_name).unwrap_or_default();
                    if name.is_empty() {
                        format!("column_{}", i + 1)
                    } else {
                        name
                    }
                })
                .collect(),
            None => Vec::new(),
        };

        let mut skipped = 0usize;
        let rows: Vec<_> = rows
            .filter(|row| {
                let blank = row.iter().all(Option::is_none);
                if blank {
                    skipped += 1;
                }
                !blank
            })
            .collect();
        if skipped > 0 {
            log::debug!("skipped {skipped} blank row(s)");
        }

        Table { columns, rows }
    }

    /// Index of the first column with this (normalized) name.
    pub fn column_index(&self, name: &str) -> Option<usize> {
        self.columns.iter().position(|c| c == name)
    }

    /// Cell at `col` in `row`; short rows read as absent.
    pub fn cell<'a>(row: &'a [Option<String>], col: usize) -> Option<&'a str> {
        row.get(col).and_then(|c| c.as_deref())
    }
}

/// Lowercase, collapse every run of non-word characters to `_`, strip
/// leading/trailing `_`.
pub fn normalize_column_name(name: &str) -> String {
    let lower = name.trim().to_lowercase();
    NON_WORD
        .replace_all(&lower, "_")
        .trim_matches('_')
        .to_string()
}

/// Load a table, choosing the reader from the file extension.
///
/// `sheet` applies to spreadsheet formats only (first sheet when `None`).
pub fn load_table(path: &Path, sheet: Option<&str>) -> Result<Table, String> {
    let ext = path
        .extension()
        .and_then(|e| e.to_str())
        .map(|e| e.to_ascii_lowercase())
        .unwrap_or_default();

    let table = match ext.as_str() {
        "csv" | "txt" => crate::csv::read_table(path)?,
        "tsv" => crate::csv::read_table_with_delimiter(path, b'\t')?,
        "xlsx" | "xlsm" | "xls" | "xlsb" | "ods" => crate::xlsx::read_table(path, sheet)?,
        other => {
            return Err(format!(
                "{}: unsupported input format '.{other}' (expected csv, tsv, xlsx, xls, xlsb or ods)",
                path.display()
            ))
        }
    };

    log::debug!(
        "{}: {} column(s), {} row(s)",
        path.display(),
        table.columns.len(),
        table.rows.len()
    );
    Ok(table)
}
