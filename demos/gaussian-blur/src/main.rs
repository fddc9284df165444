//! Blur one image and report how long the convolution took.
//!
//! The last line on stdout is the elapsed time in seconds so that sweep
//! drivers can pick it up without parsing anything else.

use std::path::PathBuf;

use anyhow::Context;
use blur::{Kernel, Pattern, Raster, Schedule, Size};
use clap::Parser;

#[derive(Parser)]
#[command(name = "gaussian-blur", version, about = "Gaussian blur benchmark")]
struct Cli {
    /// Image to blur; a synthetic image is used when omitted
    #[arg(short, long)]
    input: Option<PathBuf>,

    /// Size of the synthetic image
    #[arg(long, default_value = "1920x1080")]
    size: Size,

    /// Pattern of the synthetic image
    #[arg(long, default_value = "gradient")]
    pattern: Pattern,

    /// Seed for the `noise` pattern
    #[arg(long, default_value_t = 42)]
    seed: u64,

    /// Kernel side length (3, 5 or 7)
    #[arg(short, long, default_value_t = 3)]
    kernel: usize,

    /// How interior rows are distributed over worker threads
    #[arg(short, long, default_value = "static")]
    schedule: Schedule,

    /// Worker threads (0 = one per core)
    #[arg(short, long, env = "PARBENCH_THREADS", default_value_t = 4)]
    threads: usize,

    /// Where to write the result (default: output_<schedule>_<k>x<k>.jpg)
    #[arg(short, long)]
    output: Option<PathBuf>,

    /// Skip writing the result
    #[arg(long, conflicts_with = "output")]
    no_output: bool,
}

fn main() -> anyhow::Result<()> {
    harness::init_logging();
    let cli = Cli::parse();

    let kernel = Kernel::gaussian(cli.kernel)?;
    let src = match &cli.input {
        Some(path) => {
            Raster::load(path).with_context(|| format!("reading {}", path.display()))?
        }
        None => {
            log::info!("no input given, rendering {} {}", cli.size, cli.pattern);
            cli.pattern.render(cli.size.width, cli.size.height, cli.seed)
        }
    };
    log::info!(
        "image {}x{} with {} channels, kernel {}x{}, schedule {}",
        src.width(),
        src.height(),
        src.channels(),
        kernel.size(),
        kernel.size(),
        cli.schedule
    );

    let (out, elapsed) = match cli.schedule {
        Schedule::Sequential => harness::time(|| blur::convolve(&src, &kernel, cli.schedule)),
        schedule => {
            let pool = harness::thread_pool(cli.threads).context("building worker pool")?;
            println!("Running with {} threads", pool.current_num_threads());
            harness::time(|| pool.install(|| blur::convolve(&src, &kernel, schedule)))
        }
    };

    if !cli.no_output {
        let path = cli.output.clone().unwrap_or_else(|| {
            PathBuf::from(format!("output_{}_{}x{}.jpg", cli.schedule, cli.kernel, cli.kernel))
        });
        out.save(&path)
            .with_context(|| format!("writing {}", path.display()))?;
        log::info!("wrote {}", path.display());
    }

    println!("{:.6}", elapsed.as_secs_f64());
    Ok(())
}
