// CSV/TSV import and match-report export

use std::path::Path;

use ownercheck_match::MatchRun;

use crate::table::Table;

pub fn read_table(path: &Path) -> Result<Table, String> {
    let content = read_file_as_utf8(path)?;
    let delimiter = sniff_delimiter(&content);
    read_table_from_str(&content, delimiter).map_err(|e| format!("{}: {e}", path.display()))
}

pub fn read_table_with_delimiter(path: &Path, delimiter: u8) -> Result<Table, String> {
    let content = read_file_as_utf8(path)?;
    read_table_from_str(&content, delimiter).map_err(|e| format!("{}: {e}", path.display()))
}

const DELIMITERS: [u8; 4] = [b'\t', b';', b',', b'|'];
const SNIFF_LINES: usize = 10;

/// Pick the delimiter whose header field count is repeated by the most sample
/// lines, weighted by that count. Candidates splitting the header into a single
/// field are ignored; earlier candidates win ties.
fn sniff_delimiter(content: &str) -> u8 {
    let sample: Vec<&str> = content.lines().take(SNIFF_LINES).collect();
    let Some((header, body)) = sample.split_first() else {
        return b',';
    };

    let mut chosen = (b',', 0usize);
    for delim in DELIMITERS {
        let width = field_count(header, delim);
        if width < 2 {
            continue;
        }
        let agreeing = 1 + body.iter().filter(|line| field_count(line, delim) == width).count();
        if agreeing * width > chosen.1 {
            chosen = (delim, agreeing * width);
        }
    }
    chosen.0
}

fn field_count(line: &str, delimiter: u8) -> usize {
    csv::ReaderBuilder::new()
        .delimiter(delimiter)
        .has_headers(false)
        .flexible(true)
        .from_reader(line.as_bytes())
        .records()
        .next()
        .and_then(Result::ok)
        .map_or(1, |record| record.len())
}

/// Load a text file, decoding as Windows-1252 when it is not valid UTF-8
/// (legacy Excel CSV exports).
pub fn read_file_as_utf8(path: &Path) -> Result<String, String> {
    let bytes = std::fs::read(path).map_err(|e| format!("cannot open {}: {e}", path.display()))?;
    String::from_utf8(bytes).or_else(|e| {
        log::debug!("{}: not UTF-8, decoding as Windows-1252", path.display());
        let (decoded, _, _) = encoding_rs::WINDOWS_1252.decode(e.as_bytes());
        Ok(decoded.into_owned())
    })
}

fn read_table_from_str(content: &str, delimiter: u8) -> Result<Table, String> {
    let content = content.trim_start_matches('\u{feff}');
    let mut reader = csv::ReaderBuilder::new()
        .delimiter(delimiter)
        .has_headers(false)
        .flexible(true)
        .from_reader(content.as_bytes());

    let mut grid = Vec::new();
    for result in reader.records() {
        let record = result.map_err(|e| e.to_string())?;
        grid.push(
            record
                .iter()
                .map(|field| (!field.is_empty()).then(|| field.to_string()))
                .collect(),
        );
    }

    Ok(Table::from_grid(grid))
}

/// Write the report rows as CSV, header first.
pub fn export_matches(run: &MatchRun, path: &Path) -> Result<(), String> {
    let mut writer = csv::WriterBuilder::new()
        .from_path(path)
        .map_err(|e| format!("cannot create {}: {e}", path.display()))?;

    writer.write_record(run.columns()).map_err(|e| e.to_string())?;
    for row in &run.rows {
        let record: Vec<String> = row.cells().iter().map(|c| c.render()).collect();
        writer.write_record(&record).map_err(|e| e.to_string())?;
    }

    writer.flush().map_err(|e| e.to_string())?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;
    use tempfile::tempdir;

    #[test]
    fn test_sniff_semicolon_delimiter() {
        let content = "name;surname;pesel\nJan;Kowalski;1\nAnna;Nowak;2\n";
        assert_eq!(sniff_delimiter(content), b';');
    }

    #[test]
    fn test_sniff_comma_delimiter() {
        let content = "name,surname,pesel\nJan,Kowalski,1\nAnna,Nowak,2\n";
        assert_eq!(sniff_delimiter(content), b',');
    }

    #[test]
    fn test_sniff_tab_delimiter() {
        let content = "name\tsurname\tpesel\nJan\tKowalski\t1\n";
        assert_eq!(sniff_delimiter(content), b'\t');
    }

    #[test]
    fn test_sniff_pipe_delimiter() {
        let content = "name|surname|pesel\nJan|Kowalski|1\n";
        assert_eq!(sniff_delimiter(content), b'|');
    }

    #[test]
    fn test_sniff_semicolon_with_commas_in_values() {
        let content = "company_name;address\n\"Kwiat, s.c.\";\"Kwiatowa 5, Warszawa\"\nLis;\"Długa 1, Kraków\"\n";
        assert_eq!(sniff_delimiter(content), b';');
    }

    #[test]
    fn test_read_semicolon_csv() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("employees.csv");
        fs::write(&path, "Name;Surname;PESEL\nJan;Kowalski;85010112345\n;;\nAnna;;2\n").unwrap();

        let table = read_table(&path).unwrap();
        assert_eq!(table.columns, vec!["name", "surname", "pesel"]);
        assert_eq!(table.rows.len(), 2);
        assert_eq!(table.rows[0][2].as_deref(), Some("85010112345"));
        assert_eq!(table.rows[1][1], None);
    }

    #[test]
    fn test_windows_1252_fallback() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("legacy.csv");
        // "Müller" in Windows-1252
        fs::write(&path, b"name,city\nM\xfcller,Berlin\n").unwrap();

        let table = read_table(&path).unwrap();
        assert_eq!(table.rows[0][0].as_deref(), Some("Müller"));
    }

    #[test]
    fn test_bom_is_ignored() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("bom.csv");
        fs::write(&path, "\u{feff}name,pesel\nJan,1\n").unwrap();

        let table = read_table(&path).unwrap();
        assert_eq!(table.columns[0], "name");
    }

    #[test]
    fn test_missing_file() {
        let err = read_table(Path::new("/nonexistent/people.csv")).unwrap_err();
        assert!(err.contains("cannot open"));
    }
}
