/// Immutable parent/child/rank graph built from a taxonomy dump
use super::rank::Rank;
use crate::{Result, TaxGraphError};
use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use tracing::{debug, warn};

pub type TaxonId = u32;

/// In-memory ancestry graph.
///
/// Built once through [`GraphBuilder`] and read-only afterwards, so a single
/// instance can be shared by reference across threads. Roots are stored as
/// their own parent but never appear in their own child list.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct AncestryGraph {
    parent_of: HashMap<TaxonId, TaxonId>,
    children_of: HashMap<TaxonId, Vec<TaxonId>>,
    rank_of: HashMap<TaxonId, Rank>,
    redirect: HashMap<TaxonId, TaxonId>,
}

impl AncestryGraph {
    pub fn builder() -> GraphBuilder {
        GraphBuilder::new()
    }

    /// Number of taxa in the graph
    pub fn len(&self) -> usize {
        self.rank_of.len()
    }

    pub fn is_empty(&self) -> bool {
        self.rank_of.is_empty()
    }

    /// Whether `taxon` is a current node (redirects are not followed)
    pub fn contains(&self, taxon: TaxonId) -> bool {
        self.rank_of.contains_key(&taxon)
    }

    pub fn parent(&self, taxon: TaxonId) -> Option<TaxonId> {
        self.parent_of.get(&taxon).copied()
    }

    /// Direct children of `taxon`; empty for leaves and unknown IDs
    pub fn children(&self, taxon: TaxonId) -> &[TaxonId] {
        self.children_of
            .get(&taxon)
            .map(Vec::as_slice)
            .unwrap_or(&[])
    }

    pub fn rank(&self, taxon: TaxonId) -> Option<&Rank> {
        self.rank_of.get(&taxon)
    }

    /// Order value of the rank of `taxon`, 0 when unknown or unranked
    pub fn rank_order(&self, taxon: TaxonId) -> u8 {
        self.rank(taxon).map(Rank::order).unwrap_or(0)
    }

    pub fn is_root(&self, taxon: TaxonId) -> bool {
        self.parent(taxon) == Some(taxon)
    }

    /// All self-parented taxa, sorted
    pub fn roots(&self) -> Vec<TaxonId> {
        let mut roots: Vec<TaxonId> = self
            .parent_of
            .iter()
            .filter(|(child, parent)| child == parent)
            .map(|(child, _)| *child)
            .collect();
        roots.sort_unstable();
        roots
    }

    /// Replacement ID recorded for a retired taxon
    pub fn redirect_target(&self, retired: TaxonId) -> Option<TaxonId> {
        self.redirect.get(&retired).copied()
    }

    pub fn redirect_count(&self) -> usize {
        self.redirect.len()
    }

    /// Iterate over every current taxon ID in no particular order
    pub fn taxa(&self) -> impl Iterator<Item = TaxonId> + '_ {
        self.rank_of.keys().copied()
    }

    /// Map `taxon` to a current node, following the redirect table for
    /// retired IDs
    pub fn resolve(&self, taxon: TaxonId) -> Option<TaxonId> {
        if self.contains(taxon) {
            return Some(taxon);
        }
        self.redirect_target(taxon)
            .filter(|target| self.contains(*target))
    }

    /// Like [`resolve`](Self::resolve) but reports a miss as
    /// [`TaxGraphError::UnknownTaxon`]
    pub fn try_resolve(&self, taxon: TaxonId) -> Result<TaxonId> {
        let resolved = self
            .resolve(taxon)
            .ok_or(TaxGraphError::UnknownTaxon(taxon))?;
        if resolved != taxon {
            debug!("Taxon {} was merged into {}", taxon, resolved);
        }
        Ok(resolved)
    }

    /// Walk from `taxon` (inclusive) up to its root.
    ///
    /// The walk is bounded by the graph size so a corrupt parent cycle ends
    /// the iteration instead of looping forever.
    pub fn ancestors(&self, taxon: TaxonId) -> Ancestors<'_> {
        Ancestors {
            graph: self,
            next: self.contains(taxon).then_some(taxon),
            remaining: self.len(),
        }
    }

    /// Taxa from `taxon` up to the root, redirects resolved
    pub fn lineage(&self, taxon: TaxonId) -> Result<Vec<TaxonId>> {
        let resolved = self.try_resolve(taxon)?;
        Ok(self.ancestors(resolved).collect())
    }

    /// First ancestor (inclusive) whose rank is not `no rank`. Stops at the
    /// root when the whole lineage is unranked.
    pub fn nearest_ranked(&self, taxon: TaxonId) -> TaxonId {
        let mut last = taxon;
        for node in self.ancestors(taxon) {
            last = node;
            if self.rank(node).is_some_and(Rank::is_ranked) {
                return node;
            }
        }
        last
    }
}

/// Iterator returned by [`AncestryGraph::ancestors`]
pub struct Ancestors<'a> {
    graph: &'a AncestryGraph,
    next: Option<TaxonId>,
    remaining: usize,
}

impl Iterator for Ancestors<'_> {
    type Item = TaxonId;

    fn next(&mut self) -> Option<TaxonId> {
        let current = self.next?;
        if self.remaining == 0 {
            self.next = None;
            return None;
        }
        self.remaining -= 1;
        self.next = match self.graph.parent(current) {
            Some(parent) if parent != current => Some(parent),
            _ => None,
        };
        Some(current)
    }
}

/// Collects node and merge records, then derives the child adjacency
#[derive(Debug, Default)]
pub struct GraphBuilder {
    parent_of: HashMap<TaxonId, TaxonId>,
    rank_of: HashMap<TaxonId, Rank>,
    redirect: HashMap<TaxonId, TaxonId>,
}

impl GraphBuilder {
    pub fn new() -> Self {
        Self::default()
    }

    /// Record a `child -> parent` edge and the rank of `child`. A repeated
    /// child replaces the earlier record.
    pub fn add_node(&mut self, child: TaxonId, parent: TaxonId, rank: impl Into<Rank>) -> &mut Self {
        self.parent_of.insert(child, parent);
        self.rank_of.insert(child, rank.into());
        self
    }

    /// Record that `retired` was merged into `replacement`
    pub fn add_redirect(&mut self, retired: TaxonId, replacement: TaxonId) -> &mut Self {
        self.redirect.insert(retired, replacement);
        self
    }

    pub fn node_count(&self) -> usize {
        self.rank_of.len()
    }

    /// Invert the parent map and validate references.
    ///
    /// Fails when a parent is never declared as a node. Redirect chains are
    /// collapsed to their final target; redirects that do not end on a node
    /// are dropped with a warning.
    pub fn build(self) -> Result<AncestryGraph> {
        let GraphBuilder {
            parent_of,
            rank_of,
            redirect,
        } = self;

        let mut undeclared: Vec<(TaxonId, TaxonId)> = parent_of
            .iter()
            .filter(|(_, parent)| !rank_of.contains_key(parent))
            .map(|(child, parent)| (*child, *parent))
            .collect();
        if !undeclared.is_empty() {
            undeclared.sort_unstable();
            let (child, parent) = undeclared[0];
            return Err(TaxGraphError::Parse(format!(
                "taxon {} references parent {} which is not a node ({} dangling parent references)",
                child,
                parent,
                undeclared.len()
            )));
        }

        let mut children_of: HashMap<TaxonId, Vec<TaxonId>> =
            rank_of.keys().map(|taxon| (*taxon, Vec::new())).collect();
        for (&child, &parent) in &parent_of {
            if child == parent {
                continue;
            }
            children_of.entry(parent).or_default().push(child);
        }
        for children in children_of.values_mut() {
            children.sort_unstable();
        }

        let redirect = collapse_redirects(&redirect, &rank_of);

        Ok(AncestryGraph {
            parent_of,
            children_of,
            rank_of,
            redirect,
        })
    }
}

fn collapse_redirects(
    redirect: &HashMap<TaxonId, TaxonId>,
    rank_of: &HashMap<TaxonId, Rank>,
) -> HashMap<TaxonId, TaxonId> {
    let mut collapsed = HashMap::with_capacity(redirect.len());
    let mut dropped = 0usize;

    for (&retired, &replacement) in redirect {
        let mut target = replacement;
        let mut hops = 0usize;
        while !rank_of.contains_key(&target) && hops < redirect.len() {
            match redirect.get(&target) {
                Some(&next) => {
                    target = next;
                    hops += 1;
                }
                None => break,
            }
        }

        if rank_of.contains_key(&target) {
            collapsed.insert(retired, target);
        } else {
            dropped += 1;
            debug!("Dropping redirect {} -> {}: target is not a node", retired, replacement);
        }
    }

    if dropped > 0 {
        warn!("Dropped {} redirects that do not resolve to a current taxon", dropped);
    }
    collapsed
}
