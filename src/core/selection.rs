/// Batch taxon selection: level normalization plus descendant expansion
use crate::bio::taxonomy::{loader, rank, snapshot, AncestryGraph, TaxonId};
use crate::core::config::{SelectionConfig, TaxonomyConfig};
use crate::{Result, TaxGraphError};
use rayon::prelude::*;
use serde::Serialize;
use std::collections::{BTreeSet, HashSet};
use std::path::{Path, PathBuf};
use std::time::SystemTime;
use tracing::{debug, info, warn};

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SelectionOptions {
    /// Lift every taxon to this rank first
    pub level: Option<String>,
    /// Stop expansion at species
    pub species_only: bool,
    /// Expand to descendants; when false only the (normalized) taxa are kept
    pub include_descendants: bool,
}

impl Default for SelectionOptions {
    fn default() -> Self {
        Self {
            level: None,
            species_only: false,
            include_descendants: true,
        }
    }
}

impl From<&SelectionConfig> for SelectionOptions {
    fn from(config: &SelectionConfig) -> Self {
        Self {
            level: config.level.clone(),
            species_only: config.species_only,
            include_descendants: config.include_descendants,
        }
    }
}

/// Result of a selection run. All ID lists are sorted.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct TaxonSelection {
    /// Distinct requested IDs
    pub requested: Vec<TaxonId>,
    /// Requested IDs that could not be resolved
    pub skipped: Vec<TaxonId>,
    /// Resolved IDs after level normalization
    pub normalized: Vec<TaxonId>,
    /// Final selection
    pub taxa: Vec<TaxonId>,
}

impl TaxonSelection {
    /// Run the selection pipeline. Unknown IDs are skipped with a warning so
    /// one bad ID never aborts the batch.
    pub fn run(graph: &AncestryGraph, taxa: &[TaxonId], options: &SelectionOptions) -> Result<Self> {
        if taxa.is_empty() {
            return Err(TaxGraphError::InvalidArgument(
                "no taxon ID given".to_string(),
            ));
        }
        if let Some(level) = &options.level {
            if rank::rank_order(level) == 0 {
                return Err(TaxGraphError::InvalidArgument(format!(
                    "'{}' is not a rank that can be normalized to",
                    level
                )));
            }
        }

        let requested: BTreeSet<TaxonId> = taxa.iter().copied().collect();
        let mut skipped = Vec::new();
        let mut resolved = BTreeSet::new();
        for &taxon in &requested {
            match graph.resolve(taxon) {
                Some(current) => {
                    resolved.insert(current);
                }
                None => {
                    warn!("Taxon {} is not in the taxonomy, skipped", taxon);
                    skipped.push(taxon);
                }
            }
        }

        let normalized: BTreeSet<TaxonId> = match &options.level {
            Some(level) => {
                debug!("Lifting {} taxa to level {}", resolved.len(), level);
                let lifted = resolved
                    .par_iter()
                    .map(|&taxon| graph.normalize_to_rank(taxon, level))
                    .collect::<Result<BTreeSet<_>>>()?;
                info!(
                    "Taxon IDs at level {}: {}",
                    level,
                    lifted.iter().map(|t| t.to_string()).collect::<Vec<_>>().join(" ")
                );
                lifted
            }
            None => resolved,
        };

        let selected: BTreeSet<TaxonId> = if options.include_descendants {
            debug!("Searching descendants of {} taxa", normalized.len());
            normalized
                .par_iter()
                .map(|&taxon| graph.find_descendants(taxon, options.species_only))
                .reduce(HashSet::new, |mut acc, found| {
                    acc.extend(found);
                    acc
                })
                .into_iter()
                .collect()
        } else {
            normalized.clone()
        };
        debug!("Number of selected taxon IDs: {}", selected.len());

        Ok(Self {
            requested: requested.into_iter().collect(),
            skipped,
            normalized: normalized.into_iter().collect(),
            taxa: selected.into_iter().collect(),
        })
    }
}

/// Where to read the dump from and where its snapshot lives
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GraphSource {
    pub taxdump: PathBuf,
    pub snapshot: Option<PathBuf>,
}

impl GraphSource {
    /// Resolve paths from the config; an explicit dump path keeps its
    /// snapshot in the same directory
    pub fn from_config(config: &TaxonomyConfig, taxdump: Option<&Path>) -> Self {
        Self {
            taxdump: taxdump
                .map(Path::to_path_buf)
                .unwrap_or_else(|| config.taxdump_path()),
            snapshot: config
                .use_snapshot
                .then(|| snapshot_location(config, taxdump)),
        }
    }
}

/// Where the snapshot of `taxdump` belongs, whether or not snapshots are in use
pub fn snapshot_location(config: &TaxonomyConfig, taxdump: Option<&Path>) -> PathBuf {
    match taxdump {
        Some(path) => path
            .parent()
            .map(Path::to_path_buf)
            .unwrap_or_default()
            .join(&config.snapshot_name),
        None => config.snapshot_path(),
    }
}

/// Load the graph, preferring a snapshot that is newer than the dump and
/// writing a fresh snapshot after parsing.
pub fn open_graph(source: &GraphSource) -> Result<AncestryGraph> {
    if let Some(snapshot_path) = &source.snapshot {
        if snapshot_is_current(snapshot_path, &source.taxdump) {
            debug!("Loading taxon graph from {}", snapshot_path.display());
            return snapshot::load_snapshot(snapshot_path);
        }
    }

    debug!("Building taxon graph from {}", source.taxdump.display());
    let graph = loader::load(&source.taxdump)?;

    if let Some(snapshot_path) = &source.snapshot {
        if let Err(e) = snapshot::save_snapshot(&graph, snapshot_path) {
            warn!(
                "Could not save taxon graph snapshot to {}: {}",
                snapshot_path.display(),
                e
            );
        }
    }
    Ok(graph)
}

fn snapshot_is_current(snapshot_path: &Path, taxdump: &Path) -> bool {
    match (modified(snapshot_path), dump_modified(taxdump)) {
        (Some(snapshot), Some(dump)) => snapshot >= dump,
        (Some(_), None) => true,
        _ => false,
    }
}

fn modified(path: &Path) -> Option<SystemTime> {
    path.metadata().and_then(|m| m.modified()).ok()
}

/// Newest modification time of the dump; for an extracted directory, of its
/// member files
fn dump_modified(taxdump: &Path) -> Option<SystemTime> {
    if taxdump.is_dir() {
        [loader::NODES_FILE, loader::MERGED_FILE]
            .iter()
            .filter_map(|name| modified(&taxdump.join(name)))
            .max()
    } else {
        modified(taxdump)
    }
}
