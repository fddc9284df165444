//! Bubble sort and its parallel cousin, odd-even transposition sort.

use rayon::prelude::*;

/// Classic bubble sort: `n - 1` passes of adjacent swaps.
pub fn bubble_sort_sequential<T: Ord>(v: &mut [T]) {
    let n = v.len();
    for i in 0..n.saturating_sub(1) {
        for j in 0..n - i - 1 {
            if v[j] > v[j + 1] {
                v.swap(j, j + 1);
            }
        }
    }
}

/// Odd-even transposition sort.
///
/// Phase `i` compares the pairs starting at index `i % 2`. The pairs of one
/// phase never overlap, so each phase is a single parallel loop. `n` phases
/// are needed to sort any input of length `n`.
pub fn bubble_sort_parallel<T: Ord + Send>(v: &mut [T]) {
    let n = v.len();
    log::debug!("[odd-even-sort] len={} phases={}", n, n);
    if n <= 1 {
        return;
    }

    for phase in 0..n {
        let first = phase % 2;
        v[first..].par_chunks_mut(2).for_each(|pair| {
            if pair.len() == 2 && pair[0] > pair[1] {
                pair.swap(0, 1);
            }
        });
    }
}
