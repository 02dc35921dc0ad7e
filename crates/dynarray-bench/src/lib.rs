//! Workload builders for the dynarray benchmarks.
//!
//! Provides deterministic input generators so benchmark runs are
//! comparable across machines and invocations:
//!
//! - [`ascending`]: a pre-filled array of sequential values
//! - [`edit_positions`]: a seeded pseudo-random index sequence for
//!   mid-sequence insert/remove workloads

#![forbid(unsafe_code)]
#![deny(rustdoc::broken_intra_doc_links)]

use dynarray::DynArray;

/// Build an array holding `0..n`, pre-reserved so construction itself
/// performs exactly one allocation.
pub fn ascending(n: usize) -> DynArray<u64> {
    let mut array = DynArray::with_capacity(n);
    for i in 0..n as u64 {
        array.push(i);
    }
    array
}

/// Generate `n` deterministic pseudo-random edit positions, each valid
/// for an array of `i` elements at step `i`.
///
/// Uses a fixed LCG so the same seed always produces the same workload.
pub fn edit_positions(n: usize, seed: u64) -> Vec<usize> {
    let mut state = seed;
    (0..n)
        .map(|i| {
            state = state
                .wrapping_mul(6364136223846793005)
                .wrapping_add(1442695040888963407);
            (state >> 33) as usize % (i + 1)
        })
        .collect()
}
