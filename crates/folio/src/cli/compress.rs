//! The `folio compress` command: shrink photos before uploading them.

use std::path::{Path, PathBuf};

use clap::Args;
use console::style;
use folio_core::config::CompressConfig;
use folio_core::{
    format_size, CompressionResult, CompressionSummary, Config, ImageCompressor, PipelineResult,
};
use indicatif::{ProgressBar, ProgressStyle};

/// Arguments for the `compress` command.
#[derive(Args, Debug)]
pub struct CompressArgs {
    /// Image file or directory to compress
    pub input: PathBuf,

    /// Output file or directory (defaults to overwriting the input)
    #[arg(short, long)]
    pub output: Option<PathBuf>,

    /// JPEG quality, 1-100
    #[arg(short, long, value_parser = clap::value_parser!(u8).range(1..=100))]
    pub quality: Option<u8>,

    /// Maximum output width in pixels
    #[arg(long, value_parser = clap::value_parser!(u32).range(1..))]
    pub max_width: Option<u32>,

    /// Maximum output height in pixels
    #[arg(long, value_parser = clap::value_parser!(u32).range(1..))]
    pub max_height: Option<u32>,
}

impl CompressArgs {
    fn apply_to(&self, config: &mut CompressConfig) {
        if let Some(quality) = self.quality {
            config.quality = quality;
        }
        if let Some(width) = self.max_width {
            config.max_width = width;
        }
        if let Some(height) = self.max_height {
            config.max_height = height;
        }
    }
}

/// Execute the compress command.
pub fn execute(args: CompressArgs, mut config: Config) -> anyhow::Result<()> {
    if !args.input.exists() {
        anyhow::bail!(
            "Input path does not exist: {:?}\n\n  Hint: Check the file path and try again.",
            args.input
        );
    }

    args.apply_to(&mut config.compress);
    config.validate()?;

    print_banner(&args, &config.compress);
    let compressor = ImageCompressor::new(config.compress);

    if args.input.is_file() {
        let target = args.output.as_deref().map(|out| single_target(&args.input, out));
        let result = compressor.compress_file(&args.input, target.as_deref());
        if let Err(e) = &result {
            tracing::error!("Compression failed: {}", e);
        }
        print_outcome(&args.input, &result);
        return Ok(());
    }

    let files = ImageCompressor::discover(&args.input)?;
    if files.is_empty() {
        println!("{}", style("✗ No images found").red());
        return Ok(());
    }
    println!("Found {} image(s)", files.len());
    println!("{}", "=".repeat(50));

    let progress = create_progress_bar(files.len() as u64);
    let summary = compressor.compress_directory(
        &args.input,
        args.output.as_deref(),
        |path, result| {
            progress.suspend(|| print_outcome(path, result));
            progress.inc(1);
        },
    )?;
    progress.finish_and_clear();

    print_summary(&summary);
    Ok(())
}

/// Where a single-file run writes: inside `output` when it is a directory.
fn single_target(input: &Path, output: &Path) -> PathBuf {
    match input.file_name() {
        Some(name) if output.is_dir() => output.join(name),
        _ => output.to_path_buf(),
    }
}

fn print_banner(args: &CompressArgs, config: &CompressConfig) {
    let output = args
        .output
        .as_ref()
        .map(|p| p.display().to_string())
        .unwrap_or_else(|| "overwrite originals".to_string());

    println!("{}", style("Folio image compressor").cyan().bold());
    println!("  Input:    {}", args.input.display());
    println!("  Output:   {}", output);
    println!("  Quality:  {}", config.quality);
    println!("  Max size: {}×{}", config.max_width, config.max_height);
    println!("{}", "=".repeat(50));
}

fn create_progress_bar(total: u64) -> ProgressBar {
    let pb = ProgressBar::new(total);
    if let Ok(template) = ProgressStyle::default_bar()
        .template("{spinner:.green} [{elapsed_precise}] [{bar:40.cyan/blue}] {pos}/{len} ({percent}%)")
    {
        pb.set_style(template.progress_chars("##-"));
    }
    pb
}

fn print_outcome(path: &Path, result: &PipelineResult<CompressionResult>) {
    match result {
        Ok(done) => print_result(done),
        Err(e) => println!("{} {}: {}", style("✗").red(), path.display(), e),
    }
}

fn print_result(result: &CompressionResult) {
    let name = result
        .input
        .file_name()
        .map(|n| n.to_string_lossy().into_owned())
        .unwrap_or_default();
    let (ow, oh) = result.original_dimensions;
    let (cw, ch) = result.compressed_dimensions;

    println!("{} {}", style("✓").green(), name);
    println!("   Original:   {}×{}, {}", ow, oh, format_size(result.original_size));
    println!("   Compressed: {}×{}, {}", cw, ch, format_size(result.compressed_size));
    println!("   Saved:      {:.1}%", result.compression_ratio());
    println!();
}

fn print_summary(summary: &CompressionSummary) {
    println!("{}", "=".repeat(50));
    println!(
        "Compressed {}/{} image(s)",
        summary.succeeded, summary.total_files
    );
    if summary.failed > 0 {
        println!("{}", style(format!("Failed: {}", summary.failed)).red());
    }
    println!(
        "Total size: {} → {}",
        format_size(summary.original_bytes),
        format_size(summary.compressed_bytes)
    );
    println!("Overall saved: {:.1}%", summary.compression_ratio());

    if summary.exceeds_upload_budget() {
        println!();
        println!("{}", style("The compressed set is still large:").yellow());
        println!("   - upload in batches of 50-80 images");
        println!("   - lower --quality");
        println!("   - or reduce --max-width / --max-height");
    }
}
