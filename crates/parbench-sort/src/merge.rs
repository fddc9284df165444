//! Merge sort with a depth-bounded fork-join fan-out.
//!
//! Above the depth cutoff each split hands its two halves to `rayon::join`,
//! which is also the join barrier in front of the merge. At or below the
//! cutoff the halves are sorted on the calling thread.

use crate::ForkJoinOptions;

/// Merge two sorted slices into the output buffer.
///
/// Ties are taken from `left` first, so equal elements keep their order.
pub fn merge_into<T: Ord + Clone>(left: &[T], right: &[T], output: &mut [T]) {
    debug_assert_eq!(left.len() + right.len(), output.len());

    let mut i = 0;
    let mut j = 0;
    let mut k = 0;

    while i < left.len() && j < right.len() {
        if left[i] <= right[j] {
            output[k] = left[i].clone();
            i += 1;
        } else {
            output[k] = right[j].clone();
            j += 1;
        }
        k += 1;
    }

    while i < left.len() {
        output[k] = left[i].clone();
        i += 1;
        k += 1;
    }

    while j < right.len() {
        output[k] = right[j].clone();
        j += 1;
        k += 1;
    }
}

/// Merge the sorted runs `v[left..=mid]` and `v[mid + 1..=right]` in place.
///
/// Both runs are copied out into their own temporary buffer first. Bounds
/// that do not describe two adjacent runs inside `v` leave `v` untouched.
pub fn merge<T: Ord + Clone>(v: &mut [T], left: usize, mid: usize, right: usize) {
    if left > mid || mid > right || right >= v.len() {
        return;
    }

    let lo = v[left..=mid].to_vec();
    let hi = v[mid + 1..=right].to_vec();
    merge_into(&lo, &hi, &mut v[left..=right]);
}

/// Single-threaded top-down merge sort.
pub fn merge_sort_sequential<T: Ord + Clone>(v: &mut [T]) {
    let n = v.len();
    if n <= 1 {
        return;
    }

    let mid = (n - 1) / 2;
    let (lo, hi) = v.split_at_mut(mid + 1);
    merge_sort_sequential(lo);
    merge_sort_sequential(hi);

    merge(v, 0, mid, n - 1);
}

/// Sort the inclusive range `v[left..=right]`, entering the recursion at
/// `depth`.
///
/// `left >= right` is the base case. A `right` past the end of `v` is
/// treated the same way: nothing is sorted and nothing is reported.
pub fn sort_range<T>(v: &mut [T], left: usize, right: usize, depth: u32, options: &ForkJoinOptions)
where
    T: Ord + Clone + Send,
{
    if left >= right || right >= v.len() {
        return;
    }
    let forks = fork_join(&mut v[left..=right], depth, options.max_depth);
    log::trace!("[merge-sort] [{left}, {right}] done with {forks} forks");
}

/// Parallel merge sort over the whole slice.
///
/// Runs on the rayon pool the caller is installed in, or the global pool.
pub fn merge_sort_parallel<T>(v: &mut [T], options: &ForkJoinOptions)
where
    T: Ord + Clone + Send,
{
    log::debug!(
        "[merge-sort] len={} max_depth={} threads={}",
        v.len(),
        options.max_depth,
        rayon::current_num_threads()
    );
    if let Some(right) = v.len().checked_sub(1) {
        sort_range(v, 0, right, 0, options);
    }
}

/// Returns the number of `rayon::join` calls made, at most
/// `2^(max_depth - depth) - 1`.
fn fork_join<T>(v: &mut [T], depth: u32, max_depth: u32) -> usize
where
    T: Ord + Clone + Send,
{
    let n = v.len();
    if n <= 1 {
        return 0;
    }

    let mid = (n - 1) / 2;
    let (lo, hi) = v.split_at_mut(mid + 1);

    let forks = if depth < max_depth {
        let (a, b) = rayon::join(
            || fork_join(lo, depth + 1, max_depth),
            || fork_join(hi, depth + 1, max_depth),
        );
        1 + a + b
    } else {
        merge_sort_sequential(lo);
        merge_sort_sequential(hi);
        0
    };

    merge(v, 0, mid, n - 1);
    forks
}
