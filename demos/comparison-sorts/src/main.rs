//! Times every algorithm/variant pair on the same seeded input for a series
//! of sizes and prints one table per size.

use anyhow::Context;
use clap::Parser;
use serde::Serialize;
use sort::{random_vec, Algorithm, ForkJoinOptionsBuilder, Variant};

use harness::Measurement;

#[derive(Parser)]
#[command(name = "comparison-sorts", version, about = "Compare sequential and parallel sorts")]
struct Cli {
    /// Input sizes to test (repeatable)
    #[arg(short = 'n', long = "size", default_values_t = [1000, 5000, 10000, 20000])]
    sizes: Vec<usize>,

    /// Only run these algorithms (repeatable; default all)
    #[arg(short, long = "algorithm")]
    algorithms: Vec<Algorithm>,

    /// Seed for the input data
    #[arg(long, default_value_t = sort::DEFAULT_SEED)]
    seed: u64,

    /// Worker threads (0 = one per core)
    #[arg(short, long, env = "PARBENCH_THREADS", default_value_t = 0)]
    threads: usize,

    /// Recursion depth up to which halves are sorted as separate tasks
    #[arg(long, default_value_t = sort::MAX_DEPTH)]
    max_depth: u32,

    /// Print all measurements as JSON instead of tables
    #[arg(long)]
    json: bool,
}

#[derive(Serialize)]
struct SizeReport {
    size: usize,
    results: Vec<Measurement>,
}

fn main() -> anyhow::Result<()> {
    harness::init_logging();
    let cli = Cli::parse();

    let algorithms = if cli.algorithms.is_empty() {
        Algorithm::ALL.to_vec()
    } else {
        cli.algorithms.clone()
    };
    let options = ForkJoinOptionsBuilder::default()
        .max_depth(cli.max_depth)
        .build()?;
    let pool = harness::thread_pool(cli.threads).context("building worker pool")?;

    if !cli.json {
        println!("{}", "=".repeat(61));
        println!("    COMPARISON SORTS");
        println!("{}", "=".repeat(61));
        println!("Worker threads: {}", pool.current_num_threads());
        println!(
            "Algorithms: {}",
            algorithms.iter().map(|a| a.name()).collect::<Vec<_>>().join(", ")
        );
        println!("Each algorithm runs sequential and parallel");
        println!("{}\n", "=".repeat(61));
    }

    let mut reports = Vec::with_capacity(cli.sizes.len());
    for &size in &cli.sizes {
        log::info!("size {size}: generating input with seed {}", cli.seed);
        let input = random_vec(size, cli.seed);

        let mut results = Vec::new();
        for &algorithm in &algorithms {
            for variant in Variant::ALL {
                let (_, m) = pool.install(|| {
                    harness::measure_sort(algorithm, variant, &options, &input[..])
                });
                results.push(m);
            }
        }
        harness::fill_speedups(&mut results);

        if !cli.json {
            println!("SIZE: {size} elements");
            println!("{}", "-".repeat(61));
            print!("{}", harness::render_table(&results));
            if let Some(best) = harness::fastest(&results) {
                println!(
                    "\nFastest: {} sort ({}) - {:.6}s",
                    best.algorithm, best.variant, best.seconds
                );
            }
            println!("\n{}\n", "=".repeat(61));
        }

        reports.push(SizeReport { size, results });
    }

    if cli.json {
        println!("{}", serde_json::to_string_pretty(&reports)?);
    }

    let failed = reports
        .iter()
        .flat_map(|r| &r.results)
        .filter(|m| !m.correct)
        .count();
    anyhow::ensure!(failed == 0, "{failed} runs produced unsorted output");
    Ok(())
}
