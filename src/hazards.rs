use rand::Rng;
use std::collections::{BTreeMap, BTreeSet};

use crate::error::LayoutError;
use crate::tiles::{Coordinate, TileKind};

const MIN_DRAW_BUDGET: usize = 1024;
const DRAWS_PER_CELL: usize = 64;

/// Draws `count` distinct coordinates not present in `occupied`.
///
/// Pure rejection sampling over the whole grid, capped at a draw budget.
/// Asking for more cells than are free fails immediately.
pub fn sample_dangerous<R: Rng + ?Sized>(
    rng: &mut R,
    grid_size: u32,
    occupied: &BTreeMap<Coordinate, TileKind>,
    count: usize,
) -> Result<BTreeSet<Coordinate>, LayoutError> {
    let cells = (grid_size * grid_size) as usize;
    let free = cells.saturating_sub(occupied.len());
    if count > free {
        return Err(LayoutError::HazardSamplingExhausted {
            requested: count,
            free,
        });
    }

    let budget = MIN_DRAW_BUDGET.max(DRAWS_PER_CELL * cells);
    let mut picked = BTreeSet::new();
    let mut draws = 0;
    while picked.len() < count {
        if draws == budget {
            return Err(LayoutError::HazardSamplingExhausted {
                requested: count,
                free,
            });
        }
        draws += 1;
        let candidate = Coordinate::new(rng.gen_range(0..grid_size), rng.gen_range(0..grid_size));
        if !occupied.contains_key(&candidate) {
            picked.insert(candidate);
        }
    }
    Ok(picked)
}
