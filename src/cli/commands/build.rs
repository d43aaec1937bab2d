use super::GraphArgs;
use crate::bio::taxonomy::{loader, save_snapshot};
use crate::cli::output;
use crate::core::selection;
use anyhow::Context;
use clap::Args;
use std::path::PathBuf;
use tracing::info;

#[derive(Args)]
pub struct BuildArgs {
    #[command(flatten)]
    pub graph: GraphArgs,

    /// Snapshot destination (default: taxon_graph next to the dump)
    #[arg(short, long, value_name = "FILE")]
    pub output: Option<PathBuf>,
}

pub fn run(args: BuildArgs) -> anyhow::Result<()> {
    let config = args.graph.load_config()?;
    let source = args.graph.source(&config);
    let destination = args.output.clone().unwrap_or_else(|| {
        selection::snapshot_location(&config.taxonomy, args.graph.taxdump.as_deref())
    });

    let pb = output::spinner(format!("Parsing {}...", source.taxdump.display()));
    let graph = loader::load(&source.taxdump);
    pb.finish_and_clear();
    let graph =
        graph.with_context(|| format!("Failed to parse {}", source.taxdump.display()))?;

    save_snapshot(&graph, &destination)
        .with_context(|| format!("Failed to write {}", destination.display()))?;
    info!("Taxon graph snapshot written to {}", destination.display());

    output::success(&format!(
        "Built graph with {} taxa and {} redirects: {}",
        graph.len(),
        graph.redirect_count(),
        destination.display()
    ));
    Ok(())
}
