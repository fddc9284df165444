use std::time::{Duration, Instant};

use sort::{is_sorted, sort_with, Algorithm, ForkJoinOptions, Variant};

use crate::Measurement;

/// Run `f` once and return its result with the wall-clock time it took.
pub fn time<R>(f: impl FnOnce() -> R) -> (R, Duration) {
    let start = Instant::now();
    let result = f();
    (result, start.elapsed())
}

/// Sort a copy of `input` and record how long it took and whether the
/// result came out ordered. `speedup` is left for [`crate::fill_speedups`].
pub fn measure_sort<T>(
    algorithm: Algorithm,
    variant: Variant,
    options: &ForkJoinOptions,
    input: &[T],
) -> (Vec<T>, Measurement)
where
    T: Ord + Clone + Send,
{
    let mut v = input.to_vec();
    let ((), elapsed) = time(|| sort_with(algorithm, variant, options, &mut v));
    let correct = is_sorted(&v);
    log::info!(
        "{algorithm}/{variant}: n={} {:.6}s sorted={correct}",
        v.len(),
        elapsed.as_secs_f64()
    );

    let m = Measurement {
        algorithm,
        variant,
        seconds: elapsed.as_secs_f64(),
        correct,
        speedup: None,
    };
    (v, m)
}
