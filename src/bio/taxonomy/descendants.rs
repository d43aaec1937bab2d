/// Descendant closure queries
use super::graph::{AncestryGraph, TaxonId};
use super::rank::{Rank, SPECIES};
use crate::Result;
use std::collections::HashSet;
use tracing::warn;

impl AncestryGraph {
    /// All taxa below `taxon`, including `taxon` itself.
    ///
    /// With `only_species_leaves` the start is first lifted to its species
    /// ancestor and the walk does not descend below species nodes. Unknown
    /// IDs are logged and yield an empty set so batch callers can carry on.
    pub fn find_descendants(&self, taxon: TaxonId, only_species_leaves: bool) -> HashSet<TaxonId> {
        match self.try_find_descendants(taxon, only_species_leaves) {
            Ok(found) => found,
            Err(e) => {
                warn!("Skipping taxon {}: {}", taxon, e);
                HashSet::new()
            }
        }
    }

    /// [`find_descendants`](Self::find_descendants) that reports unknown IDs
    /// as an error instead of logging them
    pub fn try_find_descendants(
        &self,
        taxon: TaxonId,
        only_species_leaves: bool,
    ) -> Result<HashSet<TaxonId>> {
        let mut start = self.try_resolve(taxon)?;
        if only_species_leaves {
            start = self.resolve_rank(start, SPECIES)?.taxon();
        }

        let mut found = HashSet::new();
        let mut pending = vec![start];
        while let Some(node) = pending.pop() {
            if !found.insert(node) {
                continue;
            }
            if only_species_leaves && self.rank(node).is_some_and(Rank::is_species) {
                continue;
            }
            pending.extend(
                self.children(node)
                    .iter()
                    .copied()
                    .filter(|child| !found.contains(child)),
            );
        }

        Ok(found)
    }
}
