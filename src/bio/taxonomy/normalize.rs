/// Lift taxa to the nearest ancestor at a requested rank
use super::graph::{AncestryGraph, TaxonId};
use super::rank::{rank_order, NO_RANK};
use crate::{Result, TaxGraphError};
use tracing::{debug, warn};

/// Outcome of a rank normalization
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RankResolution {
    /// Found a node at exactly the requested rank
    Exact(TaxonId),
    /// The nearest ranked ancestor already sits above the requested rank;
    /// the taxon is returned unchanged
    AlreadyAbove(TaxonId),
    /// The lineage skips the requested rank. `taxon` is the last ranked node
    /// below the gap, or the start taxon when the lineage has no ranked node.
    /// `overshoot` is the first ancestor above the requested rank, if any.
    Gap {
        taxon: TaxonId,
        overshoot: Option<TaxonId>,
    },
}

impl RankResolution {
    pub fn taxon(&self) -> TaxonId {
        match *self {
            Self::Exact(taxon) | Self::AlreadyAbove(taxon) => taxon,
            Self::Gap { taxon, .. } => taxon,
        }
    }

    pub fn is_gap(&self) -> bool {
        matches!(self, Self::Gap { .. })
    }
}

impl AncestryGraph {
    /// Nearest ancestor of `taxon` at `target_rank`, with best-effort fallback
    /// when the lineage has no node at that rank.
    pub fn normalize_to_rank(&self, taxon: TaxonId, target_rank: &str) -> Result<TaxonId> {
        Ok(self.resolve_rank(taxon, target_rank)?.taxon())
    }

    /// Same walk as [`normalize_to_rank`](Self::normalize_to_rank), reporting
    /// which case applied
    pub fn resolve_rank(&self, taxon: TaxonId, target_rank: &str) -> Result<RankResolution> {
        let target_order = rank_order(target_rank);
        if target_order == 0 {
            return Err(TaxGraphError::InvalidArgument(format!(
                "'{}' is not a rank that can be normalized to",
                target_rank
            )));
        }

        let original = self.try_resolve(taxon)?;
        let ranked = self.nearest_ranked(original);
        let found_order = self.rank_order(ranked);

        if found_order > target_order {
            debug!(
                "Taxon {} is already above rank '{}', returned unchanged",
                original, target_rank
            );
            return Ok(RankResolution::AlreadyAbove(original));
        }
        if found_order == target_order {
            return Ok(RankResolution::Exact(ranked));
        }

        let mut remembered = (found_order > 0).then_some(ranked);
        for node in self.ancestors(ranked).skip(1) {
            let order = self.rank_order(node);
            if order == target_order {
                return Ok(RankResolution::Exact(node));
            }
            if order > target_order {
                return Ok(self.rank_gap(original, remembered, Some(node), target_rank));
            }
            if order > 0 {
                remembered = Some(node);
            }
        }

        Ok(self.rank_gap(original, remembered, None, target_rank))
    }

    fn rank_gap(
        &self,
        original: TaxonId,
        remembered: Option<TaxonId>,
        overshoot: Option<TaxonId>,
        target_rank: &str,
    ) -> RankResolution {
        match remembered {
            Some(fallback) => {
                let rank = self.rank(fallback).map(|r| r.as_str()).unwrap_or(NO_RANK);
                warn!(
                    "Lineage of taxon {} has no '{}' rank, using closest ancestor {} ({})",
                    original, target_rank, fallback, rank
                );
                RankResolution::Gap {
                    taxon: fallback,
                    overshoot,
                }
            }
            None => {
                warn!(
                    "Taxon {} has no ranked ancestor up to '{}', returned unchanged",
                    original, target_rank
                );
                RankResolution::Gap {
                    taxon: original,
                    overshoot,
                }
            }
        }
    }
}
