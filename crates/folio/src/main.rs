//! Folio CLI - image manifest builder and upload compressor for photo sites.
//!
//! Folio scans a static site's project directory for source images and
//! writes `images_data.json`, the manifest the gallery page reads. It can
//! also downscale and re-encode photos before they are uploaded.
//!
//! # Usage
//!
//! ```bash
//! # Build the manifest for the current project
//! folio scan
//!
//! # Scan another project without thumbnails
//! folio scan ../my-site --no-thumbnails
//!
//! # Compress a folder of photos into ./upload
//! folio compress ./raw -o ./upload --quality 80
//!
//! # View configuration
//! folio config show
//! ```

use clap::{Parser, Subcommand};

mod cli;
mod logging;

/// Folio - image manifest builder and upload compressor for photo sites.
#[derive(Parser, Debug)]
#[command(name = "folio")]
#[command(author, version, about, long_about = None)]
#[command(propagate_version = true)]
struct Cli {
    /// Enable verbose (debug) logging
    #[arg(short, long, global = true)]
    verbose: bool,

    /// Output logs in JSON format
    #[arg(long, global = true)]
    json_logs: bool,

    #[command(subcommand)]
    command: Commands,
}

/// Available commands.
#[derive(Subcommand, Debug)]
enum Commands {
    /// Scan a project directory and write its image manifest
    Scan(cli::scan::ScanArgs),

    /// Downscale and re-encode photos as JPEG for upload
    Compress(cli::compress::CompressArgs),

    /// View and manage configuration
    Config(cli::config::ConfigArgs),
}

fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    // Logging isn't initialized yet, so config warnings go through eprintln.
    let config = match folio_core::Config::load() {
        Ok(config) => config,
        Err(e) => {
            eprintln!(
                "Warning: Failed to load config: {e}\n  \
                 Using default configuration. Check your config file with `folio config path`."
            );
            folio_core::Config::default()
        }
    };
    logging::init_from_config(&config, cli.verbose, cli.json_logs);

    tracing::debug!("Folio v{}", folio_core::VERSION);

    match cli.command {
        Commands::Scan(args) => cli::scan::execute(args, config),
        Commands::Compress(args) => cli::compress::execute(args, config),
        Commands::Config(args) => cli::config::execute(args),
    }
}
