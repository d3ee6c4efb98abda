//! Ghost particle purge (spec.md §4.7).
//!
//! Compacts the grain array with the swap-with-last-and-shrink pattern:
//! scan from the front, and whenever a ghost (`pos == 0`) is found, swap the
//! last element into its slot and shrink, then re-test the same slot (it now
//! holds what used to be the last element). `Vec::swap_remove` is exactly
//! this operation.

use crate::grain::{status, Grain};
use crate::grid::Grid;

/// Removes all ghost grains (`pos == 0`) from `grains`, decrementing the
/// per-species live counters in `grid` by the number of ghosts removed for
/// each species. Must run to completion before any integrator loop.
pub fn purge(grid: &mut Grid, grains: &mut Vec<Grain>) {
    let mut i = 0;
    while i < grains.len() {
        if grains[i].pos == status::GHOST {
            let species = grains[i].species;
            let count = &mut grid
                .species
                .get_mut(species)
                .expect("grain references an unknown species")
                .num;
            *count = count
                .checked_sub(1)
                .expect("species live-particle counter underflowed during ghost purge");
            grains.swap_remove(i);
            // Do not advance `i`: the slot now holds the former last
            // element and must be re-tested.
        } else {
            i += 1;
        }
    }
}
