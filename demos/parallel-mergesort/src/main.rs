//! Parallel merge sort demo.
//!
//! Sorts a small fixed sequence once on the calling thread and once with the
//! fork-join variant, then checks that both agree.

use anyhow::{ensure, Context};
use clap::Parser;
use sort::{is_sorted, merge_sort_parallel, merge_sort_sequential, ForkJoinOptionsBuilder};

const INPUT: [i32; 10] = [38, 27, 43, 3, 9, 82, 10, 1, 15, 25];

#[derive(Parser)]
#[command(name = "parallel-mergesort", version, about = "Merge sort, sequential vs fork-join")]
struct Cli {
    /// Worker threads (0 = one per core)
    #[arg(short, long, env = "PARBENCH_THREADS", default_value_t = 0)]
    threads: usize,

    /// Recursion depth up to which halves are sorted as separate tasks
    #[arg(long, default_value_t = sort::MAX_DEPTH)]
    max_depth: u32,
}

fn print_array(v: &[i32]) {
    let items: Vec<String> = v.iter().map(|x| x.to_string()).collect();
    println!("{}", items.join(" "));
}

fn main() -> anyhow::Result<()> {
    harness::init_logging();
    let cli = Cli::parse();

    let options = ForkJoinOptionsBuilder::default()
        .max_depth(cli.max_depth)
        .build()?;
    let pool = harness::thread_pool(cli.threads).context("building worker pool")?;

    log::info!("[parallel-mergesort] starting, max_depth={}", options.max_depth);
    println!("=== MERGE SORT DEMONSTRATION ===");
    println!("Worker threads: {}", pool.current_num_threads());

    println!("\nInput:");
    print_array(&INPUT);

    let mut seq = INPUT;
    let ((), seq_time) = harness::time(|| merge_sort_sequential(&mut seq));

    println!("\nSequential merge sort:");
    print!("Result: ");
    print_array(&seq);
    println!("Time: {} microseconds", seq_time.as_micros());
    println!("Sorted: {}", if is_sorted(&seq) { "yes" } else { "no" });

    let mut par = INPUT;
    let ((), par_time) = harness::time(|| pool.install(|| merge_sort_parallel(&mut par, &options)));

    println!("\nParallel merge sort:");
    print!("Result: ");
    print_array(&par);
    println!("Time: {} microseconds", par_time.as_micros());
    println!("Sorted: {}", if is_sorted(&par) { "yes" } else { "no" });

    let same = seq == par;
    println!("\nResults identical: {}", if same { "yes" } else { "no" });
    log::info!("[parallel-mergesort] done");

    ensure!(same && is_sorted(&par), "sequential and parallel results disagree");
    Ok(())
}
