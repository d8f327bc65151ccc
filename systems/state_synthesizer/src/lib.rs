#![deny(
    unsafe_code,
    missing_docs,
    dead_code,
    unused_results,
    non_snake_case,
    unreachable_pub
)]

//! Random initial-state synthesis for descriptors that omit encoded states.

use std::num::NonZeroU32;

use cell_society_core::{cell_count, Grid};
use rand::{Rng, SeedableRng};
use rand_chacha::ChaCha8Rng;

/// Creates a reproducible random source for synthesis.
#[must_use]
pub fn seeded_source(seed: u64) -> ChaCha8Rng {
    ChaCha8Rng::seed_from_u64(seed)
}

/// Draws a `width` by `height` grid of uniformly random states.
///
/// Every cell holds an independent draw from `0..num_states`.
pub fn synthesize<R>(width: u32, height: u32, num_states: NonZeroU32, rng: &mut R) -> Grid<i32>
where
    R: Rng + ?Sized,
{
    let upper = i32::try_from(num_states.get()).unwrap_or(i32::MAX);
    let cells: Vec<i32> = (0..cell_count(width, height))
        .map(|_| rng.gen_range(0..upper))
        .collect();

    match Grid::from_row_major(width, height, cells) {
        Ok(grid) => grid,
        Err(error) => unreachable!("synthesized cell count always matches dimensions: {error}"),
    }
}
