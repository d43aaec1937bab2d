pub mod commands;
pub mod output;

use clap::{Parser, Subcommand};

#[derive(Parser)]
#[command(
    name = "taxgraph",
    version,
    about = "Taxon ancestry queries over NCBI taxonomy dumps",
    long_about = "taxgraph builds an ancestry graph from an NCBI taxdump (taxdump.tar.gz or its \
                  extracted nodes.dmp/merged.dmp) and selects taxa by descendants, taxonomic \
                  level or common ancestry."
)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,

    /// Verbosity level (can be repeated)
    #[arg(short, long, action = clap::ArgAction::Count, global = true)]
    pub verbose: u8,

    /// Number of threads to use (0 = all available)
    #[arg(short = 'j', long, default_value = "0", global = true)]
    pub threads: usize,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Parse a taxonomy dump and write the graph snapshot
    Build(commands::build::BuildArgs),

    /// Select taxon IDs and their descendants
    Select(commands::select::SelectArgs),

    /// Lift taxon IDs to a taxonomic level
    Level(commands::level::LevelArgs),

    /// Find the nearest common ancestor of taxon IDs
    Lca(commands::lca::LcaArgs),

    /// Show the lineage of a taxon up to the root
    Lineage(commands::lineage::LineageArgs),
}

/// Levels accepted on the command line, most specific first
pub const LEVEL_CHOICES: [&str; 13] = [
    "species",
    "section",
    "genus",
    "tribe",
    "subfamily",
    "family",
    "superfamily",
    "order",
    "superorder",
    "class",
    "phylum",
    "kingdom",
    "superkingdom",
];
