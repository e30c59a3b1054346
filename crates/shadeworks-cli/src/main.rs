mod commands;

use std::path::PathBuf;

use clap::{Parser, Subcommand};
use tracing_subscriber::EnvFilter;

#[derive(Debug, Parser)]
#[command(name = "shadeworks-cli")]
#[command(about = "Inspect and exercise the blinds pricing catalog")]
struct Cli {
    /// Catalog file to use instead of `SHADEWORKS_CATALOG_PATH`
    #[arg(long, global = true)]
    catalog: Option<PathBuf>,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Debug, Subcommand)]
enum Commands {
    /// Load the catalog and run every integrity check
    Validate,
    /// List the customization steps offered for a product, in display order
    Options {
        /// Product id (e.g. roller-blackout)
        product_id: String,
    },
    /// Price a selection read from a JSON file and print the breakdown
    Quote {
        /// Product id (e.g. roller-blackout)
        product_id: String,
        /// JSON file holding the selection (`width_mm`, `height_mm`, `options`)
        #[arg(long)]
        selection: PathBuf,
    },
}

fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    let settings = shadeworks_core::load_catalog_settings()?;
    let env_filter = EnvFilter::try_from_default_env()
        .or_else(|_| EnvFilter::try_new(settings.log_level.clone()))?;
    tracing_subscriber::fmt()
        .with_env_filter(env_filter)
        .with_writer(std::io::stderr)
        .init();

    let policy = settings.catalog_policy();
    let catalog_path = cli.catalog.unwrap_or(settings.catalog_path);
    let mut out = std::io::stdout().lock();

    match cli.command {
        Commands::Validate => commands::run_validate(&catalog_path, policy, &mut out),
        Commands::Options { product_id } => {
            commands::run_options(&catalog_path, policy, &product_id, &mut out)
        }
        Commands::Quote {
            product_id,
            selection,
        } => commands::run_quote(&catalog_path, policy, &product_id, &selection, &mut out),
    }
}
