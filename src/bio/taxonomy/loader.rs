/// Parse NCBI taxonomy dumps (`nodes.dmp`, `merged.dmp`) into an ancestry graph
use super::graph::{AncestryGraph, GraphBuilder, TaxonId};
use crate::{Result, TaxGraphError};
use flate2::read::GzDecoder;
use std::fs::File;
use std::io::{BufRead, BufReader};
use std::path::Path;
use tar::Archive;
use tracing::{debug, info, warn};

pub const NODES_FILE: &str = "nodes.dmp";
pub const MERGED_FILE: &str = "merged.dmp";

/// Load a graph from either an extracted dump directory or a
/// `taxdump.tar.gz` archive.
pub fn load<P: AsRef<Path>>(path: P) -> Result<AncestryGraph> {
    let path = path.as_ref();
    if path.is_dir() {
        load_from_dir(path)
    } else {
        load_from_archive(path)
    }
}

/// Load from a directory holding `nodes.dmp` and, optionally, `merged.dmp`
pub fn load_from_dir<P: AsRef<Path>>(dir: P) -> Result<AncestryGraph> {
    let dir = dir.as_ref();
    let nodes_path = dir.join(NODES_FILE);
    if !nodes_path.is_file() {
        return Err(TaxGraphError::Parse(format!(
            "{} not found in {}",
            NODES_FILE,
            dir.display()
        )));
    }

    let nodes = BufReader::new(open_dump(&nodes_path)?);
    let merged_path = dir.join(MERGED_FILE);
    let merged = if merged_path.is_file() {
        Some(BufReader::new(open_dump(&merged_path)?))
    } else {
        warn!(
            "{} not found in {}, retired taxon IDs will not be resolved",
            MERGED_FILE,
            dir.display()
        );
        None
    };

    let graph = load_from_readers(nodes, merged)?;
    log_summary(&graph, dir);
    Ok(graph)
}

/// Stream a gzipped tar archive and pick `nodes.dmp` / `merged.dmp` by file
/// name, wherever they sit inside the archive.
pub fn load_from_archive<P: AsRef<Path>>(path: P) -> Result<AncestryGraph> {
    let path = path.as_ref();
    let file = open_dump(path)?;
    let mut archive = Archive::new(GzDecoder::new(BufReader::new(file)));

    let mut builder = GraphBuilder::new();
    let mut saw_nodes = false;
    let mut saw_merged = false;

    let entries = archive
        .entries()
        .map_err(|e| archive_error(path, e))?;
    for entry in entries {
        let entry = entry.map_err(|e| archive_error(path, e))?;
        let name = entry
            .path()
            .map_err(|e| archive_error(path, e))?
            .file_name()
            .and_then(|name| name.to_str())
            .map(str::to_owned);

        match name.as_deref() {
            Some(NODES_FILE) => {
                let count = read_nodes(BufReader::new(entry), &mut builder)?;
                debug!("Read {} node records from archive", count);
                saw_nodes = true;
            }
            Some(MERGED_FILE) => {
                let count = read_merged(BufReader::new(entry), &mut builder)?;
                debug!("Read {} merged records from archive", count);
                saw_merged = true;
            }
            _ => {}
        }
    }

    if !saw_nodes {
        return Err(TaxGraphError::Parse(format!(
            "{} not found in archive {}",
            NODES_FILE,
            path.display()
        )));
    }
    if !saw_merged {
        warn!(
            "{} not found in archive {}, retired taxon IDs will not be resolved",
            MERGED_FILE,
            path.display()
        );
    }

    let graph = builder.build()?;
    log_summary(&graph, path);
    Ok(graph)
}

/// Build a graph from already opened record streams
pub fn load_from_readers<N, M>(nodes: N, merged: Option<M>) -> Result<AncestryGraph>
where
    N: BufRead,
    M: BufRead,
{
    let mut builder = GraphBuilder::new();
    read_nodes(nodes, &mut builder)?;
    if let Some(merged) = merged {
        read_merged(merged, &mut builder)?;
    }
    builder.build()
}

/// Read `child | parent | rank | ...` records. Returns the record count.
pub fn read_nodes<R: BufRead>(reader: R, builder: &mut GraphBuilder) -> Result<usize> {
    let mut count = 0;
    for (index, line) in reader.lines().enumerate() {
        let line_num = index + 1;
        let line = line.map_err(|e| stream_error(NODES_FILE, line_num, e))?;
        if line.trim().is_empty() {
            continue;
        }

        let fields = split_fields(&line);
        if fields.len() < 3 {
            return Err(TaxGraphError::Parse(format!(
                "{} line {}: expected at least 3 fields, got {}",
                NODES_FILE,
                line_num,
                fields.len()
            )));
        }

        let child = parse_taxon_id(fields[0], NODES_FILE, line_num)?;
        let parent = parse_taxon_id(fields[1], NODES_FILE, line_num)?;
        builder.add_node(child, parent, fields[2]);
        count += 1;
    }
    Ok(count)
}

/// Read `old | new | ...` records. Returns the record count.
pub fn read_merged<R: BufRead>(reader: R, builder: &mut GraphBuilder) -> Result<usize> {
    let mut count = 0;
    for (index, line) in reader.lines().enumerate() {
        let line_num = index + 1;
        let line = line.map_err(|e| stream_error(MERGED_FILE, line_num, e))?;
        if line.trim().is_empty() {
            continue;
        }

        let fields = split_fields(&line);
        if fields.len() < 2 {
            return Err(TaxGraphError::Parse(format!(
                "{} line {}: expected at least 2 fields, got {}",
                MERGED_FILE,
                line_num,
                fields.len()
            )));
        }

        let retired = parse_taxon_id(fields[0], MERGED_FILE, line_num)?;
        let replacement = parse_taxon_id(fields[1], MERGED_FILE, line_num)?;
        builder.add_redirect(retired, replacement);
        count += 1;
    }
    Ok(count)
}

/// Split on `|` and trim, which covers both the NCBI `\t|\t` layout and
/// plain pipes. A trailing delimiter yields an empty last field.
fn split_fields(line: &str) -> Vec<&str> {
    line.split('|').map(str::trim).collect()
}

fn parse_taxon_id(field: &str, stream: &str, line_num: usize) -> Result<TaxonId> {
    field.parse::<TaxonId>().map_err(|e| {
        TaxGraphError::Parse(format!(
            "{} line {}: invalid taxon ID '{}': {}",
            stream, line_num, field, e
        ))
    })
}

fn stream_error(stream: &str, line_num: usize, e: std::io::Error) -> TaxGraphError {
    TaxGraphError::Parse(format!("{} line {}: read failed: {}", stream, line_num, e))
}

/// An unreadable dump is as fatal as a malformed one
fn open_dump(path: &Path) -> Result<File> {
    File::open(path)
        .map_err(|e| TaxGraphError::Parse(format!("Cannot read {}: {}", path.display(), e)))
}

fn archive_error(path: &Path, e: std::io::Error) -> TaxGraphError {
    TaxGraphError::Parse(format!("Failed to read archive {}: {}", path.display(), e))
}

fn log_summary(graph: &AncestryGraph, source: &Path) {
    info!(
        "Loaded {} taxa and {} redirects from {}",
        graph.len(),
        graph.redirect_count(),
        source.display()
    );
    debug!("Root taxa: {:?}", graph.roots());
}
