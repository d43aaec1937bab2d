pub mod ancestor;
pub mod descendants;
pub mod graph;
pub mod loader;
pub mod normalize;
pub mod rank;
pub mod snapshot;

// Re-export commonly used types
pub use graph::{AncestryGraph, Ancestors, GraphBuilder, TaxonId};
pub use normalize::RankResolution;
pub use rank::{rank_order, Rank, NO_RANK, RANK_TABLE, SPECIES};
pub use snapshot::{load_snapshot, save_snapshot};
