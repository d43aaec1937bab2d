use super::GraphArgs;
use crate::bio::taxonomy::{TaxonId, NO_RANK};
use clap::Args;

#[derive(Args)]
pub struct LcaArgs {
    /// Taxon IDs
    #[arg(value_name = "TAXID", required = true)]
    pub taxa: Vec<TaxonId>,

    #[command(flatten)]
    pub graph: GraphArgs,
}

pub fn run(args: LcaArgs) -> anyhow::Result<()> {
    let config = args.graph.load_config()?;
    let graph = args.graph.open_graph(&config)?;

    let ancestor = graph.find_common_ancestor(&args.taxa)?;
    let rank = graph.rank(ancestor).map(|r| r.as_str()).unwrap_or(NO_RANK);
    println!("{}\t{}", ancestor, rank);
    Ok(())
}
