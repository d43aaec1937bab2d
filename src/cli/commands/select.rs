use super::GraphArgs;
use crate::bio::taxonomy::TaxonId;
use crate::cli::{output, LEVEL_CHOICES};
use crate::core::selection::{SelectionOptions, TaxonSelection};
use crate::core::taxid_input;
use clap::builder::PossibleValuesParser;
use clap::Args;
use std::io::Write;
use std::path::PathBuf;
use tracing::debug;

#[derive(Args)]
pub struct SelectArgs {
    /// Taxon IDs to select (multiple IDs separated by space)
    #[arg(short, long, value_name = "TAXID", num_args = 1..)]
    pub taxon: Vec<TaxonId>,

    /// Tab-separated file with a column of taxon IDs
    #[arg(short, long, value_name = "FILE")]
    pub input: Option<PathBuf>,

    /// Zero-based column of the input file that holds the taxon IDs
    #[arg(short, long, default_value = "0")]
    pub column: usize,

    /// Lift every taxon to this level before expanding
    #[arg(short, long, value_parser = PossibleValuesParser::new(LEVEL_CHOICES))]
    pub level: Option<String>,

    /// Expand only down to species level
    #[arg(short, long)]
    pub species: bool,

    /// Keep the given taxa only, without descendants
    #[arg(short = 'z', long)]
    pub no_descendants: bool,

    /// Output file (default: stdout)
    #[arg(short, long, value_name = "FILE")]
    pub output: Option<PathBuf>,

    /// Output format (text, json)
    #[arg(long, default_value = "text", value_parser = ["text", "json"])]
    pub format: String,

    #[command(flatten)]
    pub graph: GraphArgs,
}

pub fn run(args: SelectArgs) -> anyhow::Result<()> {
    let config = args.graph.load_config()?;

    let mut taxa = args.taxon.clone();
    if let Some(input) = &args.input {
        taxa.extend(taxid_input::read_taxon_ids(input, args.column)?);
    }
    if taxa.is_empty() {
        return Err(crate::TaxGraphError::InvalidArgument(
            "no taxon ID given, use --taxon or --input".to_string(),
        )
        .into());
    }
    debug!("Given taxon IDs: {:?}", taxa);

    let mut options = SelectionOptions::from(&config.selection);
    if args.level.is_some() {
        options.level = args.level.clone();
    }
    options.species_only |= args.species;
    options.include_descendants &= !args.no_descendants;

    let graph = args.graph.open_graph(&config)?;
    let selection = TaxonSelection::run(&graph, &taxa, &options)?;

    let mut out = output::writer(args.output.as_deref())?;
    match args.format.as_str() {
        "json" => {
            serde_json::to_writer_pretty(&mut out, &selection)?;
            writeln!(out)?;
            out.flush()?;
        }
        _ => output::write_ids(&mut out, &selection.taxa)?,
    }

    if !selection.skipped.is_empty() {
        tracing::warn!(
            "{} of {} taxon IDs were not found in the taxonomy",
            selection.skipped.len(),
            selection.requested.len()
        );
    }
    output::success(&format!("Selected {} taxon IDs", selection.taxa.len()));
    Ok(())
}
