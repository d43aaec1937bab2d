/// Binary snapshots of a built graph so later runs skip dump parsing
use super::graph::AncestryGraph;
use crate::{Result, TaxGraphError};
use std::fs::{self, File};
use std::io::{BufReader, BufWriter, Read, Write};
use std::path::Path;
use tracing::debug;

/// Magic bytes for snapshot files: "TXG" + version byte
pub const SNAPSHOT_MAGIC: &[u8] = b"TXG\x01";

/// Write `graph` to `path`. The file is written next to its destination and
/// renamed into place, so readers never see a half-written snapshot.
pub fn save_snapshot<P: AsRef<Path>>(graph: &AncestryGraph, path: P) -> Result<()> {
    let path = path.as_ref();
    if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
        fs::create_dir_all(parent)?;
    }

    let tmp_path = path.with_extension("tmp");
    {
        let mut writer = BufWriter::new(File::create(&tmp_path)?);
        writer.write_all(SNAPSHOT_MAGIC)?;
        bincode::serialize_into(&mut writer, graph).map_err(|e| {
            TaxGraphError::Snapshot(format!("Failed to encode {}: {}", path.display(), e))
        })?;
        writer.flush()?;
    }
    fs::rename(&tmp_path, path)?;

    debug!("Saved taxon graph snapshot to {}", path.display());
    Ok(())
}

/// Read a snapshot written by [`save_snapshot`]
pub fn load_snapshot<P: AsRef<Path>>(path: P) -> Result<AncestryGraph> {
    let path = path.as_ref();
    let mut reader = BufReader::new(File::open(path)?);

    let mut magic = [0u8; 4];
    reader.read_exact(&mut magic).map_err(|_| corrupted(path, "file is truncated"))?;
    if magic != SNAPSHOT_MAGIC {
        return Err(corrupted(path, "not a taxon graph snapshot"));
    }

    let graph: AncestryGraph =
        bincode::deserialize_from(reader).map_err(|e| corrupted(path, &e.to_string()))?;
    debug!("Loaded taxon graph snapshot from {}", path.display());
    Ok(graph)
}

fn corrupted(path: &Path, reason: &str) -> TaxGraphError {
    TaxGraphError::Snapshot(format!(
        "{} is corrupted ({}). Delete the file to rebuild it from the taxonomy dump",
        path.display(),
        reason
    ))
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    fn graph() -> AncestryGraph {
        let mut builder = AncestryGraph::builder();
        builder
            .add_node(1, 1, "no rank")
            .add_node(2, 1, "genus")
            .add_node(3, 2, "species")
            .add_redirect(30, 3);
        builder.build().unwrap()
    }

    #[test]
    fn test_snapshot_preserves_graph() {
        let temp_dir = TempDir::new().unwrap();
        let path = temp_dir.path().join("nested").join("taxon_graph");

        let graph = graph();
        save_snapshot(&graph, &path).unwrap();
        let restored = load_snapshot(&path).unwrap();

        assert_eq!(restored, graph);
        assert_eq!(restored.resolve(30), Some(3));
        assert!(!path.with_extension("tmp").exists());
    }

    #[test]
    fn test_wrong_magic() {
        let temp_dir = TempDir::new().unwrap();
        let path = temp_dir.path().join("taxon_graph");
        fs::write(&path, b"PKL\x04garbage").unwrap();

        let err = load_snapshot(&path).unwrap_err();
        assert!(matches!(err, TaxGraphError::Snapshot(_)));
        assert!(err.to_string().contains("Delete the file"));
    }

    #[test]
    fn test_truncated_snapshot() {
        let temp_dir = TempDir::new().unwrap();
        let path = temp_dir.path().join("taxon_graph");
        save_snapshot(&graph(), &path).unwrap();

        let bytes = fs::read(&path).unwrap();
        fs::write(&path, &bytes[..bytes.len() / 2]).unwrap();

        assert!(matches!(
            load_snapshot(&path),
            Err(TaxGraphError::Snapshot(_))
        ));
    }
}
