/// Read taxon IDs from a column of a tab-separated file
use crate::bio::taxonomy::TaxonId;
use crate::Result;
use std::fs::File;
use std::io::{BufRead, BufReader, ErrorKind};
use std::path::Path;
use tracing::{debug, error};

/// Read taxon IDs from `column` (zero-based) of a tab-separated file.
///
/// Bad values and short lines are logged and skipped. A missing file is
/// logged and yields no IDs; other I/O errors are returned.
pub fn read_taxon_ids<P: AsRef<Path>>(path: P, column: usize) -> Result<Vec<TaxonId>> {
    let path = path.as_ref();
    let file = match File::open(path) {
        Ok(file) => file,
        Err(e) if e.kind() == ErrorKind::NotFound => {
            error!(
                "Taxon ID input file {} does not exist, continuing without it",
                path.display()
            );
            return Ok(Vec::new());
        }
        Err(e) => return Err(e.into()),
    };

    let ids = parse_taxon_ids(BufReader::new(file), column)?;
    debug!("Read {} taxon IDs from {}", ids.len(), path.display());
    Ok(ids)
}

/// Parse taxon IDs from an already opened reader, see [`read_taxon_ids`]
pub fn parse_taxon_ids<R: BufRead>(reader: R, column: usize) -> Result<Vec<TaxonId>> {
    let mut ids = Vec::new();
    for (index, line) in reader.lines().enumerate() {
        let line = line?;
        let line = line.trim_end_matches(['\r', '\n']);
        if line.trim().is_empty() {
            continue;
        }

        let Some(field) = line.split('\t').nth(column) else {
            error!(
                "Line {} of taxon input file has no column {}, skipped",
                index + 1,
                column
            );
            continue;
        };

        let field = field.trim();
        match field.parse::<TaxonId>() {
            Ok(taxon) if field.bytes().all(|b| b.is_ascii_digit()) => ids.push(taxon),
            _ => error!(
                "Value '{}' in line {} of taxon input file is not a taxon ID. Right column specified?",
                field,
                index + 1
            ),
        }
    }
    Ok(ids)
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Cursor;
    use tempfile::TempDir;

    #[test]
    fn test_reads_selected_column() {
        let input = "sample\t9606\thuman\nother\t562\tecoli\n";
        let ids = parse_taxon_ids(Cursor::new(input), 1).unwrap();
        assert_eq!(ids, vec![9606, 562]);
    }

    #[test]
    fn test_skips_bad_values_and_short_lines() {
        let input = "9606\nheader\n+12\n\n10090\r\n";
        let ids = parse_taxon_ids(Cursor::new(input), 0).unwrap();
        assert_eq!(ids, vec![9606, 10090]);

        let ids = parse_taxon_ids(Cursor::new("9606\n"), 3).unwrap();
        assert!(ids.is_empty());
    }

    #[test]
    fn test_missing_file_yields_nothing() {
        let temp_dir = TempDir::new().unwrap();
        let ids = read_taxon_ids(temp_dir.path().join("absent.tsv"), 0).unwrap();
        assert!(ids.is_empty());
    }

    #[test]
    fn test_reads_file() {
        let temp_dir = TempDir::new().unwrap();
        let path = temp_dir.path().join("taxa.tsv");
        std::fs::write(&path, "1\ta\n2\tb\n").unwrap();
        assert_eq!(read_taxon_ids(&path, 0).unwrap(), vec![1, 2]);
    }
}
