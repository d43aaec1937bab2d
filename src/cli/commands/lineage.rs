use super::GraphArgs;
use crate::bio::taxonomy::{TaxonId, NO_RANK};
use crate::cli::output;
use clap::Args;
use std::io::Write;

#[derive(Args)]
pub struct LineageArgs {
    /// Taxon ID
    #[arg(value_name = "TAXID")]
    pub taxon: TaxonId,

    #[command(flatten)]
    pub graph: GraphArgs,
}

/// Prints `taxon<TAB>rank` from the taxon up to the root
pub fn run(args: LineageArgs) -> anyhow::Result<()> {
    let config = args.graph.load_config()?;
    let graph = args.graph.open_graph(&config)?;

    let mut out = output::writer(None)?;
    for taxon in graph.lineage(args.taxon)? {
        let rank = graph.rank(taxon).map(|r| r.as_str()).unwrap_or(NO_RANK);
        writeln!(out, "{}\t{}", taxon, rank)?;
    }
    out.flush()?;
    Ok(())
}
