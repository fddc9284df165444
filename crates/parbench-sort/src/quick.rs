//! Quick sort with the same depth-bounded fan-out as merge sort.

use crate::ForkJoinOptions;

/// Lomuto partition around the last element.
///
/// Elements strictly less than the pivot end up left of the returned index,
/// the pivot lands on it. An empty slice returns 0.
pub fn partition<T: Ord>(v: &mut [T]) -> usize {
    let Some(high) = v.len().checked_sub(1) else {
        return 0;
    };

    let mut store = 0;
    for j in 0..high {
        if v[j] < v[high] {
            v.swap(store, j);
            store += 1;
        }
    }
    v.swap(store, high);
    store
}

/// Single-threaded quick sort.
///
/// Recurses into the smaller side and loops on the larger one, so already
/// sorted input costs quadratic time but only logarithmic stack.
pub fn quick_sort_sequential<T: Ord>(mut v: &mut [T]) {
    while v.len() > 1 {
        let slice = core::mem::take(&mut v);
        let p = partition(slice);
        let (lo, rest) = slice.split_at_mut(p);
        let hi = &mut rest[1..];
        if lo.len() < hi.len() {
            quick_sort_sequential(lo);
            v = hi;
        } else {
            quick_sort_sequential(hi);
            v = lo;
        }
    }
}

/// Parallel quick sort over the whole slice.
pub fn quick_sort_parallel<T: Ord + Send>(v: &mut [T], options: &ForkJoinOptions) {
    log::debug!(
        "[quick-sort] len={} max_depth={} threads={}",
        v.len(),
        options.max_depth,
        rayon::current_num_threads()
    );
    fork_join(v, 0, options.max_depth);
}

fn fork_join<T: Ord + Send>(v: &mut [T], depth: u32, max_depth: u32) {
    if v.len() <= 1 {
        return;
    }

    let p = partition(v);
    let (lo, rest) = v.split_at_mut(p);
    let hi = &mut rest[1..];

    if depth < max_depth {
        rayon::join(
            || fork_join(lo, depth + 1, max_depth),
            || fork_join(hi, depth + 1, max_depth),
        );
    } else {
        quick_sort_sequential(lo);
        quick_sort_sequential(hi);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{is_permutation_of, is_sorted, random_vec};

    #[test]
    fn test_partition() {
        let mut v = [7, 2, 9, 1, 5];
        let p = partition(&mut v);
        assert_eq!(p, 2);
        assert_eq!(v[p], 5);
        assert!(v[..p].iter().all(|&x| x < 5));
        assert!(v[p + 1..].iter().all(|&x| x >= 5));
    }

    #[test]
    fn test_partition_empty_and_single() {
        let mut empty: [u8; 0] = [];
        assert_eq!(partition(&mut empty), 0);
        let mut one = [4];
        assert_eq!(partition(&mut one), 0);
    }

    #[test]
    fn test_example_sequence() {
        let mut v = [38, 27, 43, 3, 9, 82, 10, 1, 15, 25];
        quick_sort_parallel(&mut v, &ForkJoinOptions::default());
        assert_eq!(v, [1, 3, 9, 10, 15, 25, 27, 38, 43, 82]);
    }

    #[test]
    fn test_parallel_matches_sequential() {
        for (len, seed) in [(0, 1), (1, 2), (31, 3), (2000, 4)] {
            let original = random_vec(len, seed);

            let mut seq = original.clone();
            quick_sort_sequential(&mut seq);

            let mut par = original.clone();
            quick_sort_parallel(&mut par, &ForkJoinOptions::default());

            assert!(is_sorted(&seq));
            assert!(is_permutation_of(&seq, &original));
            assert_eq!(seq, par);
        }
    }

    #[test]
    fn test_many_duplicates() {
        let mut v: Vec<i32> = (0..600).map(|i| i % 3).collect();
        quick_sort_parallel(&mut v, &ForkJoinOptions::default());
        assert!(is_sorted(&v));
        assert_eq!(v.iter().filter(|&&x| x == 1).count(), 200);
    }

    #[test]
    fn test_sorted_and_reversed_input() {
        let mut up: Vec<u32> = (0..3000).collect();
        quick_sort_sequential(&mut up);
        assert!(is_sorted(&up));

        let mut down: Vec<u32> = (0..3000).rev().collect();
        quick_sort_parallel(&mut down, &ForkJoinOptions::default());
        assert_eq!(down, (0..3000).collect::<Vec<_>>());
    }
}
