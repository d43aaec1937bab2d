/// Nearest common ancestor of a set of taxa
use super::graph::{AncestryGraph, TaxonId};
use crate::{Result, TaxGraphError};
use std::collections::HashMap;
use tracing::warn;

impl AncestryGraph {
    /// Nearest common ancestor of `taxa`.
    ///
    /// Retired IDs are resolved through the redirect table; IDs that cannot
    /// be resolved are skipped with a warning. The least specific taxon seeds
    /// the candidate path to the root, which every other taxon then cuts down
    /// to the first node its own lineage shares with it.
    pub fn find_common_ancestor(&self, taxa: &[TaxonId]) -> Result<TaxonId> {
        if taxa.is_empty() {
            return Err(TaxGraphError::InvalidArgument(
                "common ancestor of an empty taxon list".to_string(),
            ));
        }

        let mut working = Vec::with_capacity(taxa.len());
        let mut first_unknown = None;
        for &taxon in taxa {
            match self.resolve(taxon) {
                Some(resolved) => working.push(resolved),
                None => {
                    warn!("Skipping unknown taxon {} in common ancestor search", taxon);
                    first_unknown.get_or_insert(taxon);
                }
            }
        }
        if working.is_empty() {
            return Err(TaxGraphError::UnknownTaxon(first_unknown.unwrap_or(taxa[0])));
        }

        let mut seed_index = 0;
        let mut seed_order = self.rank_order(self.nearest_ranked(working[0]));
        for (index, &taxon) in working.iter().enumerate().skip(1) {
            let order = self.rank_order(self.nearest_ranked(taxon));
            if order > seed_order {
                seed_index = index;
                seed_order = order;
            }
        }
        let seed = working.remove(seed_index);

        let path: Vec<TaxonId> = self.ancestors(seed).collect();
        let position: HashMap<TaxonId, usize> = path
            .iter()
            .enumerate()
            .map(|(index, taxon)| (*taxon, index))
            .collect();

        let mut start = 0;
        for taxon in working {
            let shared = self
                .ancestors(taxon)
                .find_map(|node| position.get(&node).copied().filter(|&pos| pos >= start));
            match shared {
                Some(pos) => start = pos,
                None => {
                    return Err(TaxGraphError::InvalidArgument(format!(
                        "taxa {} and {} do not share a root",
                        seed, taxon
                    )))
                }
            }
        }

        Ok(path[start])
    }
}
