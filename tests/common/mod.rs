/// Shared taxonomy fixtures for integration tests
///
/// A small slice of the NCBI taxonomy (E. coli, human, mouse) written in the
/// real `nodes.dmp` / `merged.dmp` layout, either as loose files or packed
/// into a `taxdump.tar.gz`.
use flate2::write::GzEncoder;
use flate2::Compression;
use std::fs;
use std::io::Cursor;
use std::path::Path;
use taxgraph::bio::taxonomy::loader;
use taxgraph::AncestryGraph;

/// (taxon, parent, rank)
pub const NODES: &[(u32, u32, &str)] = &[
    (1, 1, "no rank"),
    (131567, 1, "no rank"),
    (2, 131567, "superkingdom"),
    (1224, 2, "phylum"),
    (1236, 1224, "class"),
    (91347, 1236, "order"),
    (543, 91347, "family"),
    (561, 543, "genus"),
    (562, 561, "species"),
    (83333, 562, "strain"),
    (511145, 83333, "no rank"),
    (2759, 131567, "superkingdom"),
    (33208, 2759, "kingdom"),
    (7711, 33208, "phylum"),
    (40674, 7711, "class"),
    (9443, 40674, "order"),
    (9604, 9443, "family"),
    (9605, 9604, "genus"),
    (9606, 9605, "species"),
    (63221, 9606, "subspecies"),
    (9989, 40674, "order"),
    (10066, 9989, "family"),
    (10088, 10066, "genus"),
    (10090, 10088, "species"),
];

/// (retired, replacement)
pub const MERGED: &[(u32, u32)] = &[(469598, 562), (36313, 9606)];

pub fn nodes_dmp() -> String {
    NODES
        .iter()
        .map(|(taxon, parent, rank)| format!("{}\t|\t{}\t|\t{}\t|\t0\t|\n", taxon, parent, rank))
        .collect()
}

pub fn merged_dmp() -> String {
    MERGED
        .iter()
        .map(|(old, new)| format!("{}\t|\t{}\t|\n", old, new))
        .collect()
}

#[allow(dead_code)]
pub fn fixture_graph() -> AncestryGraph {
    loader::load_from_readers(Cursor::new(nodes_dmp()), Some(Cursor::new(merged_dmp())))
        .expect("fixture taxonomy must load")
}

/// Write `nodes.dmp` (and `merged.dmp` when asked) into `dir`
#[allow(dead_code)]
pub fn write_dump_dir(dir: &Path, with_merged: bool) {
    fs::create_dir_all(dir).expect("Failed to create dump dir");
    fs::write(dir.join("nodes.dmp"), nodes_dmp()).expect("Failed to write nodes.dmp");
    if with_merged {
        fs::write(dir.join("merged.dmp"), merged_dmp()).expect("Failed to write merged.dmp");
    }
}

/// Pack arbitrary `(name, content)` entries into a gzipped tar archive
#[allow(dead_code)]
pub fn write_archive(path: &Path, entries: &[(&str, String)]) {
    let file = fs::File::create(path).expect("Failed to create archive");
    let mut builder = tar::Builder::new(GzEncoder::new(file, Compression::default()));
    for (name, content) in entries {
        let mut header = tar::Header::new_gnu();
        header.set_size(content.len() as u64);
        header.set_mode(0o644);
        header.set_cksum();
        builder
            .append_data(&mut header, name, content.as_bytes())
            .expect("Failed to append archive entry");
    }
    builder
        .into_inner()
        .expect("Failed to finish tar stream")
        .finish()
        .expect("Failed to finish gzip stream");
}

/// A taxdump archive shaped like the NCBI download, with unrelated members
#[allow(dead_code)]
pub fn write_taxdump(path: &Path) {
    write_archive(
        path,
        &[
            ("names.dmp", "1\t|\troot\t|\t\t|\tscientific name\t|\n".to_string()),
            ("nodes.dmp", nodes_dmp()),
            ("merged.dmp", merged_dmp()),
            ("readme.txt", "taxdump fixture\n".to_string()),
        ],
    );
}
