//! Comparison sorts in a sequential and a thread-parallel flavour.
//!
//! Merge sort and quick sort split recursively and hand both halves to
//! `rayon::join` until a fixed recursion depth, after which they continue on
//! the calling thread. Bubble sort is parallelised as odd-even transposition.

use core::fmt;
use core::str::FromStr;

use derive_builder::Builder;
use serde::Serialize;

pub mod bubble;
pub mod data;
pub mod merge;
pub mod quick;
pub mod verify;

pub use bubble::{bubble_sort_parallel, bubble_sort_sequential};
pub use data::{random_vec, DEFAULT_SEED};
pub use merge::{merge, merge_sort_parallel, merge_sort_sequential, sort_range};
pub use quick::{partition, quick_sort_parallel, quick_sort_sequential};
pub use verify::{is_permutation_of, is_sorted};

/// Default recursion depth below which no more tasks are forked.
pub const MAX_DEPTH: u32 = 3;

/// Tuning for the fork-join sorts.
#[derive(Clone, Debug, Builder)]
#[builder(default)]
pub struct ForkJoinOptions {
    /// Splits at a depth lower than this run their halves as two tasks.
    /// At most `2^max_depth` leaf tasks are created.
    pub max_depth: u32,
}

impl Default for ForkJoinOptions {
    fn default() -> Self {
        Self {
            max_depth: MAX_DEPTH,
        }
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "kebab-case")]
pub enum Algorithm {
    Bubble,
    Merge,
    Quick,
}

impl Algorithm {
    pub const ALL: [Algorithm; 3] = [Algorithm::Bubble, Algorithm::Merge, Algorithm::Quick];

    pub fn name(self) -> &'static str {
        match self {
            Algorithm::Bubble => "bubble",
            Algorithm::Merge => "merge",
            Algorithm::Quick => "quick",
        }
    }
}

impl fmt::Display for Algorithm {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl FromStr for Algorithm {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::ALL
            .into_iter()
            .find(|a| a.name().eq_ignore_ascii_case(s))
            .ok_or_else(|| format!("unknown algorithm '{s}' (expected bubble, merge or quick)"))
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "kebab-case")]
pub enum Variant {
    Sequential,
    Parallel,
}

impl Variant {
    pub const ALL: [Variant; 2] = [Variant::Sequential, Variant::Parallel];

    pub fn name(self) -> &'static str {
        match self {
            Variant::Sequential => "sequential",
            Variant::Parallel => "parallel",
        }
    }
}

impl fmt::Display for Variant {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl FromStr for Variant {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::ALL
            .into_iter()
            .find(|v| v.name().eq_ignore_ascii_case(s))
            .ok_or_else(|| format!("unknown variant '{s}' (expected sequential or parallel)"))
    }
}

/// Sort `v` in place with the chosen algorithm and variant.
pub fn sort_with<T>(algorithm: Algorithm, variant: Variant, options: &ForkJoinOptions, v: &mut [T])
where
    T: Ord + Clone + Send,
{
    match (algorithm, variant) {
        (Algorithm::Bubble, Variant::Sequential) => bubble_sort_sequential(v),
        (Algorithm::Bubble, Variant::Parallel) => bubble_sort_parallel(v),
        (Algorithm::Merge, Variant::Sequential) => merge_sort_sequential(v),
        (Algorithm::Merge, Variant::Parallel) => merge_sort_parallel(v, options),
        (Algorithm::Quick, Variant::Sequential) => quick_sort_sequential(v),
        (Algorithm::Quick, Variant::Parallel) => quick_sort_parallel(v, options),
    }
}
