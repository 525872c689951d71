//! The `folio scan` command: build the image manifest for a project.

use std::path::PathBuf;

use clap::Args;
use console::style;
use folio_core::pipeline::SUPPORTED_EXTENSIONS;
use folio_core::{Config, ScanOutcome, Scanner};
use indicatif::{ProgressBar, ProgressStyle};

use super::types::Dimensions;

/// Arguments for the `scan` command.
#[derive(Args, Debug)]
pub struct ScanArgs {
    /// Project root to scan
    #[arg(default_value = ".")]
    pub root: PathBuf,

    /// Skip thumbnail generation
    #[arg(long)]
    pub no_thumbnails: bool,

    /// Thumbnail bounding box in pixels
    #[arg(long, value_parser = clap::value_parser!(u32).range(1..))]
    pub thumbnail_size: Option<u32>,

    /// How image dimensions are read
    #[arg(long, value_enum)]
    pub dimensions: Option<Dimensions>,

    /// Manifest file name, written under the project root
    #[arg(long)]
    pub manifest: Option<String>,
}

impl ScanArgs {
    /// Layer the command-line flags over the loaded configuration.
    fn apply_to(&self, config: &mut Config) {
        if self.no_thumbnails {
            config.thumbnail.enabled = false;
        }
        if let Some(size) = self.thumbnail_size {
            config.thumbnail.size = size;
        }
        if let Some(dimensions) = self.dimensions {
            config.scan.dimensions = dimensions.into();
        }
        if let Some(manifest) = &self.manifest {
            config.scan.manifest_file = manifest.clone();
        }
    }
}

/// Execute the scan command.
pub fn execute(args: ScanArgs, mut config: Config) -> anyhow::Result<()> {
    args.apply_to(&mut config);
    config.validate()?;

    let scanner = Scanner::new(&args.root, &config)?;
    println!("{}", style("=== Folio image scan ===").bold());
    println!("Scanning {} for images...", scanner.root().display());
    if !scanner.thumbnails_enabled() {
        tracing::debug!("Thumbnail generation is off for this run");
    }

    let progress = create_spinner();
    let outcome = scanner.run_with_progress(|path| {
        progress.inc(1);
        let shown = path.strip_prefix(scanner.root()).unwrap_or(path);
        progress.set_message(shown.display().to_string());
    });
    progress.finish_and_clear();

    print_report(&outcome?);
    Ok(())
}

fn create_spinner() -> ProgressBar {
    let pb = ProgressBar::new_spinner();
    if let Ok(template) = ProgressStyle::default_spinner()
        .template("{spinner:.green} [{elapsed_precise}] {pos} image(s) {wide_msg}")
    {
        pb.set_style(template);
    }
    pb.enable_steady_tick(std::time::Duration::from_millis(100));
    pb
}

fn print_report(outcome: &ScanOutcome) {
    let manifest = &outcome.manifest;

    if manifest.images.is_empty() {
        println!();
        println!("{}", style("No images found.").yellow());
        println!("Make sure the project contains image files with one of these extensions:");
        println!("  {}", extension_list());
        println!(
            "An empty manifest was written to {}",
            outcome.manifest_path.display()
        );
        return;
    }

    println!("Found {} image(s):", manifest.total_images);
    for image in &manifest.images {
        println!("  - {} ({})", image.path, image.size);
    }
    println!();
    println!("Total size: {}", manifest.total_size_formatted());
    if outcome.failed > 0 {
        println!(
            "{}",
            style(format!("Skipped {} unreadable file(s)", outcome.failed)).red()
        );
    }
    println!(
        "{} Saved {} image(s) to {}",
        style("✓").green(),
        manifest.total_images,
        outcome.manifest_path.display()
    );
    println!("The gallery picks up the new manifest on its next load.");
}

/// Supported extensions as `.jpg, .jpeg, ...`.
fn extension_list() -> String {
    SUPPORTED_EXTENSIONS
        .iter()
        .map(|ext| format!(".{ext}"))
        .collect::<Vec<_>>()
        .join(", ")
}
