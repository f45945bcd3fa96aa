//! One page per CSV record.

use std::path::Path;

use crate::error::Result;

/// Renders each record as `header: value` lines.
pub(super) fn extract(path: &Path) -> Result<Vec<String>> {
    let mut reader = csv::ReaderBuilder::new().flexible(true).from_path(path)?;
    let headers = reader.headers()?.clone();

    let mut rows = Vec::new();
    for record in reader.records() {
        let record = record?;
        let row = headers
            .iter()
            .zip(record.iter())
            .map(|(header, value)| format!("{}: {}", header.trim(), value.trim()))
            .collect::<Vec<_>>()
            .join("\n");
        rows.push(row);
    }
    Ok(rows)
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::tempdir;

    #[test]
    fn records_become_header_value_lines() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("accounts.csv");
        std::fs::write(&path, "stage, owner\nDiscovery, AE\n\"Closed, Won\",CSM\n").unwrap();

        let rows = extract(&path).unwrap();
        assert_eq!(rows, ["stage: Discovery\nowner: AE", "stage: Closed, Won\nowner: CSM"]);
    }

    #[test]
    fn header_only_file_has_no_rows() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("empty.csv");
        std::fs::write(&path, "stage,owner\n").unwrap();
        assert!(extract(&path).unwrap().is_empty());
    }
}
