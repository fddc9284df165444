//! Odd-even transposition sort demo on a small fixed array.

use anyhow::Context;
use clap::Parser;
use sort::{bubble_sort_parallel, is_sorted};

const INPUT: [i32; 10] = [9, 4, 7, 3, 1, 8, 5, 2, 10, 6];

#[derive(Parser)]
#[command(name = "odd-even-sort", version, about = "Parallel bubble sort demo")]
struct Cli {
    /// Worker threads (0 = one per core)
    #[arg(short, long, env = "PARBENCH_THREADS", default_value_t = 0)]
    threads: usize,
}

fn show(v: &[i32]) -> String {
    v.iter().map(|x| x.to_string()).collect::<Vec<_>>().join(" ")
}

fn main() -> anyhow::Result<()> {
    harness::init_logging();
    let cli = Cli::parse();
    let pool = harness::thread_pool(cli.threads).context("building worker pool")?;

    println!("Before sorting:");
    println!("{}", show(&INPUT));

    let mut v = INPUT;
    log::info!(
        "[odd-even-sort] {} phases on {} threads",
        v.len(),
        pool.current_num_threads()
    );
    let ((), elapsed) = harness::time(|| pool.install(|| bubble_sort_parallel(&mut v)));

    println!("After sorting:");
    println!("{}", show(&v));
    println!("Elapsed: {} microseconds", elapsed.as_micros());
    println!("Elapsed: {:.6} seconds", elapsed.as_secs_f64());

    anyhow::ensure!(is_sorted(&v), "odd-even sort left the array unsorted");
    Ok(())
}
