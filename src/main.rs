use clap::Parser;
use colored::*;
use std::process;
use taxgraph::cli::{Cli, Commands};
use tracing_subscriber::EnvFilter;

fn main() {
    let cli = Cli::parse();

    // Initialize logging with TAXGRAPH_LOG environment variable support
    let default_level = if cli.verbose > 0 { "debug" } else { "info" };
    let log_level = std::env::var("TAXGRAPH_LOG").unwrap_or_else(|_| default_level.to_string());

    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(&log_level)),
        )
        .with_writer(std::io::stderr)
        .init();

    if let Err(e) = run(cli) {
        eprintln!("{} {:#}", "Error:".red().bold(), e);

        let exit_code = match e.downcast_ref::<taxgraph::TaxGraphError>() {
            Some(taxgraph::TaxGraphError::Config(_)) => 2,
            Some(taxgraph::TaxGraphError::Io(_)) => 3,
            Some(taxgraph::TaxGraphError::Parse(_)) => 4,
            Some(taxgraph::TaxGraphError::Snapshot(_)) => 5,
            Some(taxgraph::TaxGraphError::InvalidArgument(_))
            | Some(taxgraph::TaxGraphError::UnknownTaxon(_)) => 6,
            None => 1,
        };
        process::exit(exit_code);
    }
}

fn run(cli: Cli) -> anyhow::Result<()> {
    let num_threads = if cli.threads == 0 {
        num_cpus::get()
    } else {
        cli.threads
    };

    rayon::ThreadPoolBuilder::new()
        .num_threads(num_threads)
        .build_global()?;
    tracing::debug!("Using {} threads", num_threads);

    match cli.command {
        Commands::Build(args) => taxgraph::cli::commands::build::run(args),
        Commands::Select(args) => taxgraph::cli::commands::select::run(args),
        Commands::Level(args) => taxgraph::cli::commands::level::run(args),
        Commands::Lca(args) => taxgraph::cli::commands::lca::run(args),
        Commands::Lineage(args) => taxgraph::cli::commands::lineage::run(args),
    }
}
