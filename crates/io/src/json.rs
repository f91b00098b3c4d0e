// JSON export

use std::fs::File;
use std::io::BufWriter;
use std::path::Path;

use ownercheck_match::MatchRun;

/// Export the whole run (meta, summary, rows) as pretty JSON.
pub fn export_run(run: &MatchRun, path: &Path) -> Result<(), String> {
    let file = File::create(path).map_err(|e| format!("cannot create {}: {e}", path.display()))?;
    let writer = BufWriter::new(file);
    serde_json::to_writer_pretty(writer, run).map_err(|e| e.to_string())?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;
    use tempfile::tempdir;

    use ownercheck_match::{run_with_criteria, Criteria, MatchInput};

    #[test]
    fn test_json_export() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("matches.json");

        let run = run_with_criteria("json", Criteria::all(), MatchInput::default());
        export_run(&run, &path).unwrap();

        let content = fs::read_to_string(&path).unwrap();
        let parsed: serde_json::Value = serde_json::from_str(&content).unwrap();

        assert_eq!(parsed["meta"]["config_name"], "json");
        assert_eq!(parsed["summary"]["rows"], 0);
        assert!(parsed["rows"].as_array().unwrap().is_empty());
        assert!(content.contains('\n'), "pretty output spans lines");
    }
}
