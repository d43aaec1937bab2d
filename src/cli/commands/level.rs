use super::GraphArgs;
use crate::bio::taxonomy::TaxonId;
use crate::cli::{output, LEVEL_CHOICES};
use clap::builder::PossibleValuesParser;
use clap::Args;
use std::io::Write;
use tracing::warn;

#[derive(Args)]
pub struct LevelArgs {
    /// Taxon IDs to lift
    #[arg(value_name = "TAXID", required = true)]
    pub taxa: Vec<TaxonId>,

    /// Target level
    #[arg(short, long, value_parser = PossibleValuesParser::new(LEVEL_CHOICES))]
    pub level: String,

    #[command(flatten)]
    pub graph: GraphArgs,
}

/// Prints `input<TAB>lifted` per taxon; unknown IDs are skipped
pub fn run(args: LevelArgs) -> anyhow::Result<()> {
    let config = args.graph.load_config()?;
    let graph = args.graph.open_graph(&config)?;

    let mut out = output::writer(None)?;
    for &taxon in &args.taxa {
        match graph.normalize_to_rank(taxon, &args.level) {
            Ok(lifted) => writeln!(out, "{}\t{}", taxon, lifted)?,
            Err(crate::TaxGraphError::UnknownTaxon(_)) => {
                warn!("Taxon {} is not in the taxonomy, skipped", taxon)
            }
            Err(e) => return Err(e.into()),
        }
    }
    out.flush()?;
    Ok(())
}
