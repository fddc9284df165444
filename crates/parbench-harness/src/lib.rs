//! Shared plumbing for the benchmark binaries: timing a run, tabulating
//! results, building the worker pool and wiring up logging.

pub mod report;
pub mod timing;

pub use report::{fastest, fill_speedups, render_table, Measurement};
pub use timing::{measure_sort, time};

/// Initialise `env_logger`; `RUST_LOG` overrides the `warn` default.
pub fn init_logging() {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("warn"))
        .format_timestamp(None)
        .init();
}

/// Build a rayon pool with `threads` workers; `0` lets rayon pick.
pub fn thread_pool(threads: usize) -> Result<rayon::ThreadPool, rayon::ThreadPoolBuildError> {
    let pool = rayon::ThreadPoolBuilder::new()
        .num_threads(threads)
        .thread_name(|i| format!("parbench-{i}"))
        .build()?;
    log::info!("worker pool ready with {} threads", pool.current_num_threads());
    Ok(pool)
}
