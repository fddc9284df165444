//! Generates `input_<W>x<H>.jpg` files for the blur benchmarks.

use std::path::PathBuf;

use anyhow::Context;
use blur::raster::INPUT_JPEG_QUALITY;
use blur::{Pattern, Size, STANDARD_SIZES};
use clap::Parser;

#[derive(Parser)]
#[command(name = "test-images", version, about = "Create synthetic test images")]
struct Cli {
    /// Pattern to draw
    #[arg(long, default_value = "gradient")]
    pattern: Pattern,

    /// Extra sizes as WIDTHxHEIGHT (repeatable)
    #[arg(long)]
    custom: Vec<Size>,

    /// Skip the standard sizes and only write --custom ones
    #[arg(long)]
    custom_only: bool,

    /// Seed for the `noise` pattern
    #[arg(long, default_value_t = 42)]
    seed: u64,

    /// Directory to write into
    #[arg(short, long, default_value = ".")]
    out_dir: PathBuf,
}

fn main() -> anyhow::Result<()> {
    harness::init_logging();
    let cli = Cli::parse();

    let mut sizes: Vec<Size> = if cli.custom_only {
        Vec::new()
    } else {
        STANDARD_SIZES.to_vec()
    };
    sizes.extend(cli.custom.iter().copied());
    anyhow::ensure!(!sizes.is_empty(), "no sizes selected (pass --custom WIDTHxHEIGHT)");

    std::fs::create_dir_all(&cli.out_dir)
        .with_context(|| format!("creating {}", cli.out_dir.display()))?;

    println!("Creating test images with pattern: {}", cli.pattern);
    println!("{}", "=".repeat(50));

    for size in sizes {
        let path = cli.out_dir.join(format!("input_{size}.jpg"));
        println!("Creating {size} image: {}", path.display());

        let raster = cli.pattern.render(size.width, size.height, cli.seed);
        raster
            .save_with_quality(&path, INPUT_JPEG_QUALITY)
            .with_context(|| format!("writing {}", path.display()))?;

        let bytes = std::fs::metadata(&path)?.len();
        println!("  Saved: {} ({:.1} MB)", path.display(), bytes as f64 / (1024.0 * 1024.0));
        log::debug!("{} written, {} bytes", path.display(), bytes);
    }

    println!("{}", "=".repeat(50));
    println!("All test images created.");
    Ok(())
}
