//! Manually supplied address lists

use std::io::Read;
use std::path::Path;
use tracing::info;

use crate::error::Result;

/// Split newline-delimited text into addresses.
///
/// Lines are trimmed and blank lines dropped; no format validation is done.
pub fn parse_address_list(text: &str) -> Vec<String> {
    text.lines()
        .map(str::trim)
        .filter(|line| !line.is_empty())
        .map(String::from)
        .collect()
}

/// Read an address list from a file, or from stdin when the path is `-`
pub fn read_address_list(path: &Path) -> Result<Vec<String>> {
    let text = if path == Path::new("-") {
        let mut buf = String::new();
        std::io::stdin().read_to_string(&mut buf)?;
        buf
    } else {
        std::fs::read_to_string(path)?
    };

    let addresses = parse_address_list(&text);
    info!("Parsed {} addresses from {}", addresses.len(), path.display());
    Ok(addresses)
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    #[test]
    fn test_parse_trims_and_drops_blank_lines() {
        let text = "  0xabc \n\n0xdef\r\n   \nSo1anaAddr\n";
        assert_eq!(parse_address_list(text), vec!["0xabc", "0xdef", "So1anaAddr"]);
    }

    #[test]
    fn test_parse_keeps_duplicates_and_garbage() {
        // dedup and validation happen downstream
        let text = "a\nnot-an-address\na";
        assert_eq!(parse_address_list(text), vec!["a", "not-an-address", "a"]);
    }

    #[test]
    fn test_read_from_file() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        writeln!(file, "0x1").unwrap();
        writeln!(file).unwrap();
        writeln!(file, "0x2 ").unwrap();

        let addresses = read_address_list(file.path()).unwrap();
        assert_eq!(addresses, vec!["0x1", "0x2"]);
    }

    #[test]
    fn test_read_missing_file() {
        let err = read_address_list(Path::new("/nonexistent/holders.csv")).unwrap_err();
        assert!(matches!(err, crate::error::Error::Io(_)));
    }
}
