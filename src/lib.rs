pub mod bio;
pub mod cli;
pub mod core;

pub use crate::bio::taxonomy::{AncestryGraph, Rank, RankResolution, TaxonId};
pub use crate::core::selection::{SelectionOptions, TaxonSelection};

use thiserror::Error;

#[derive(Error, Debug)]
pub enum TaxGraphError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Parse error: {0}")]
    Parse(String),

    #[error("Unknown taxon ID: {0}")]
    UnknownTaxon(TaxonId),

    #[error("Invalid argument: {0}")]
    InvalidArgument(String),

    #[error("Invalid configuration: {0}")]
    Config(String),

    #[error("Snapshot error: {0}")]
    Snapshot(String),
}

pub type Result<T> = std::result::Result<T, TaxGraphError>;
