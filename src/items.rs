use rand::Rng;
use std::collections::BTreeMap;

use crate::tiles::{Coordinate, ItemKind, TileKind};

/// Scatters up to `limit - 1` items over the Normal tiles of `tiles`.
///
/// The count is drawn from `[0, limit)`; each item takes a distinct tile,
/// removed from the pool once used.
pub fn place_items<R: Rng + ?Sized>(
    rng: &mut R,
    tiles: &BTreeMap<Coordinate, TileKind>,
    limit: usize,
) -> BTreeMap<Coordinate, ItemKind> {
    let item_count = if limit == 0 { 0 } else { rng.gen_range(0..limit) };
    let mut pool: Vec<Coordinate> = tiles
        .iter()
        .filter(|(_, kind)| **kind == TileKind::Normal)
        .map(|(coord, _)| *coord)
        .collect();

    let mut items = BTreeMap::new();
    for _ in 0..item_count.min(pool.len()) {
        let kind = ItemKind::from_roll(rng.gen::<f64>());
        let coord = pool.swap_remove(rng.gen_range(0..pool.len()));
        items.insert(coord, kind);
    }
    log::debug!("placed {} of at most {} items", items.len(), limit.saturating_sub(1));
    items
}
