pub mod build;
pub mod lca;
pub mod level;
pub mod lineage;
pub mod select;

use crate::bio::taxonomy::AncestryGraph;
use crate::cli::output;
use crate::core::config::{self, Config};
use crate::core::selection::{self, GraphSource};
use anyhow::Context;
use clap::Args;
use std::path::PathBuf;

/// Options shared by every command that needs the taxon graph
#[derive(Args, Debug, Clone, Default)]
pub struct GraphArgs {
    /// Taxonomy dump: taxdump.tar.gz or a directory with nodes.dmp/merged.dmp
    /// (default: ${TAXGRAPH_HOME}/databases/taxdump.tar.gz)
    #[arg(long, value_name = "PATH", env = "TAXGRAPH_TAXDUMP")]
    pub taxdump: Option<PathBuf>,

    /// Config file (default: ${TAXGRAPH_HOME}/config.toml)
    #[arg(long, value_name = "FILE")]
    pub config: Option<PathBuf>,

    /// Neither read nor write the graph snapshot
    #[arg(long)]
    pub no_snapshot: bool,
}

impl GraphArgs {
    pub fn load_config(&self) -> anyhow::Result<Config> {
        let mut config =
            config::load_or_default(self.config.as_deref()).context("Failed to load config")?;
        if self.no_snapshot {
            config.taxonomy.use_snapshot = false;
        }
        Ok(config)
    }

    pub fn source(&self, config: &Config) -> GraphSource {
        GraphSource::from_config(&config.taxonomy, self.taxdump.as_deref())
    }

    /// Load the graph behind a spinner
    pub fn open_graph(&self, config: &Config) -> anyhow::Result<AncestryGraph> {
        let source = self.source(config);
        let pb = output::spinner(format!("Loading taxonomy from {}...", source.taxdump.display()));
        let graph = selection::open_graph(&source);
        match &graph {
            Ok(graph) => pb.finish_with_message(format!("Loaded {} taxa", graph.len())),
            Err(_) => pb.finish_and_clear(),
        }
        graph.with_context(|| format!("Failed to load taxonomy from {}", source.taxdump.display()))
    }
}
