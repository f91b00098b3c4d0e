// Spreadsheet import (xlsx, xlsm, xls, xlsb, ods) and match-report export (xlsx only)

use std::path::Path;

use calamine::{open_workbook_auto, Data, Reader, Sheets};
use rust_xlsxwriter::{Color, Format, FormatAlign, FormatBorder, Workbook};

use ownercheck_match::model::CellValue;
use ownercheck_match::MatchRun;

use crate::table::Table;

/// Worksheet name used for exported reports.
pub const REPORT_SHEET: &str = "matches";

const HEADER_FILL: u32 = 0xD9D9D9;

// ---------------------------------------------------------------------------
// Import
// ---------------------------------------------------------------------------

/// Read one worksheet (named, or the first) into a [`Table`].
pub fn read_table(path: &Path, sheet: Option<&str>) -> Result<Table, String> {
    let mut workbook: Sheets<_> = open_workbook_auto(path)
        .map_err(|e| format!("Failed to open spreadsheet {}: {}", path.display(), e))?;

    let sheet_names: Vec<String> = workbook.sheet_names().to_vec();
    let sheet_name = match sheet {
        Some(name) => {
            if !sheet_names.iter().any(|s| s == name) {
                return Err(format!(
                    "{}: no sheet named '{}' (available: {})",
                    path.display(),
                    name,
                    sheet_names.join(", ")
                ));
            }
            name.to_string()
        }
        None => sheet_names
            .first()
            .cloned()
            .ok_or_else(|| format!("{}: spreadsheet contains no sheets", path.display()))?,
    };

    let range = workbook
        .worksheet_range(&sheet_name)
        .map_err(|e| format!("Failed to read sheet '{}': {}", sheet_name, e))?;

    let grid = range
        .rows()
        .map(|row| row.iter().map(cell_text).collect())
        .collect();

    Ok(Table::from_grid(grid))
}

/// Text form of a spreadsheet cell. Integral floats drop the fractional part
/// so numeric identifiers compare as text.
fn cell_text(cell: &Data) -> Option<String> {
    match cell {
        Data::Empty => None,
        Data::String(s) => (!s.is_empty()).then(|| s.clone()),
        Data::Float(n) => {
            if n.fract() == 0.0 && n.abs() < 1e15 {
                Some(format!("{}", *n as i64))
            } else {
                Some(format!("{}", n))
            }
        }
        Data::Int(n) => Some(n.to_string()),
        Data::Bool(b) => Some(if *b { "True" } else { "False" }.to_string()),
        Data::Error(e) => {
            log::debug!("treating error cell #{e:?} as empty");
            None
        }
        Data::DateTime(dt) => Some(format!("{}", dt.as_f64())),
        Data::DateTimeIso(s) | Data::DurationIso(s) => Some(s.clone()),
    }
}

// ---------------------------------------------------------------------------
// Export
// ---------------------------------------------------------------------------

/// Write the report as a single styled worksheet.
///
/// Header: bold on a light-gray fill, centered, frozen. Every written cell
/// gets a thin border; absent values are left unwritten. Column width is the
/// longest non-falsy rendered value plus 2.
pub fn export_matches(run: &MatchRun, path: &Path) -> Result<(), String> {
    let columns = run.columns();

    let mut workbook = Workbook::new();
    let worksheet = workbook
        .add_worksheet()
        .set_name(REPORT_SHEET)
        .map_err(|e| format!("Failed to create sheet '{}': {}", REPORT_SHEET, e))?;

    let header_format = Format::new()
        .set_bold()
        .set_background_color(Color::RGB(HEADER_FILL))
        .set_align(FormatAlign::Center)
        .set_align(FormatAlign::VerticalCenter)
        .set_border(FormatBorder::Thin);
    let cell_format = Format::new().set_border(FormatBorder::Thin);

    let mut widths: Vec<usize> = vec![0; columns.len()];

    for (col, name) in columns.iter().enumerate() {
        worksheet
            .write_string_with_format(0, col as u16, *name, &header_format)
            .map_err(|e| format!("Failed to write header: {}", e))?;
        widths[col] = name.chars().count();
    }

    for (i, row) in run.rows.iter().enumerate() {
        let r = (i + 1) as u32;
        for (col, cell) in row.cells().iter().enumerate() {
            let c = col as u16;
            match cell {
                CellValue::Empty => continue,
                CellValue::Text(s) => worksheet.write_string_with_format(r, c, s, &cell_format),
                CellValue::Flag(b) => worksheet.write_boolean_with_format(r, c, *b, &cell_format),
                CellValue::Ratio(n) => {
                    worksheet.write_number_with_format(r, c, f64::from(*n), &cell_format)
                }
            }
            .map_err(|e| format!("Failed to write row {}: {}", r + 1, e))?;

            if !cell.is_falsy() {
                widths[col] = widths[col].max(cell.render().chars().count());
            }
        }
    }

    for (col, width) in widths.iter().enumerate() {
        worksheet
            .set_column_width(col as u16, (width + 2) as f64)
            .map_err(|e| format!("Failed to set column {} width: {}", col, e))?;
    }

    worksheet
        .set_freeze_panes(1, 0)
        .map_err(|e| format!("Failed to set freeze panes: {}", e))?;

    workbook
        .save(path)
        .map_err(|e| format!("Failed to save XLSX file: {}", e))?;

    log::debug!("wrote {} row(s) to {}", run.rows.len(), path.display());
    Ok(())
}
