//! CSV serialization of result tables

use std::io::Write;
use std::path::Path;
use tracing::info;

use super::table::ResultTable;
use crate::error::Result;

/// Serialize a table: header line then one line per row
pub fn to_csv(table: &ResultTable) -> String {
    let mut out = String::new();
    push_line(&mut out, table.header().iter().map(String::as_str));
    for record in table.records() {
        push_line(&mut out, record.into_iter());
    }
    out
}

/// Write a table as CSV to a file, or to stdout when the path is `-`
pub fn write_csv(table: &ResultTable, path: &Path) -> Result<()> {
    let content = to_csv(table);

    if path == Path::new("-") {
        let mut stdout = std::io::stdout().lock();
        stdout.write_all(content.as_bytes())?;
        stdout.flush()?;
    } else {
        std::fs::write(path, content)?;
        info!("Wrote {} rows to {}", table.rows.len(), path.display());
    }
    Ok(())
}

fn push_line<'a>(out: &mut String, cells: impl Iterator<Item = &'a str>) {
    for (i, cell) in cells.enumerate() {
        if i > 0 {
            out.push(',');
        }
        out.push_str(&escape(cell));
    }
    out.push('\n');
}

fn escape(cell: &str) -> std::borrow::Cow<'_, str> {
    if cell.contains([',', '"', '\n', '\r']) {
        format!("\"{}\"", cell.replace('"', "\"\"")).into()
    } else {
        cell.into()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::export::table::ResultRow;

    fn table() -> ResultTable {
        ResultTable {
            rows: vec![
                ResultRow {
                    holder: "0xa".to_string(),
                    cluster_key: "alice/".to_string(),
                    targets: vec!["So1".to_string(), "So2".to_string()],
                },
                ResultRow {
                    holder: "0xb".to_string(),
                    cluster_key: String::new(),
                    targets: vec![],
                },
            ],
            target_columns: 2,
            holder_count: 2,
        }
    }

    #[test]
    fn test_rows_are_rectangular() {
        let csv = to_csv(&table());
        assert_eq!(
            csv,
            "Holder Address,Cluster Name,Target Address 1,Target Address 2\n\
             0xa,alice/,So1,So2\n\
             0xb,,,\n"
        );
        for line in csv.lines() {
            assert_eq!(line.matches(',').count(), 3);
        }
    }

    #[test]
    fn test_escaping() {
        assert_eq!(escape("plain"), "plain");
        assert_eq!(escape("a,b"), "\"a,b\"");
        assert_eq!(escape("say \"hi\""), "\"say \"\"hi\"\"\"");
    }

    #[test]
    fn test_write_csv_to_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("results.csv");

        write_csv(&table(), &path).unwrap();

        let written = std::fs::read_to_string(&path).unwrap();
        assert_eq!(written, to_csv(&table()));
    }
}
