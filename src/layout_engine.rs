use glam::Vec3;
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};
use std::collections::BTreeMap;

use crate::config::GridConfig;
use crate::difficulty::DifficultyState;
use crate::error::LayoutError;
use crate::hazards::sample_dangerous;
use crate::items::place_items;
use crate::layout::GridLayout;
use crate::route::find_random_route;
use crate::tiles::{Coordinate, TileKind};

/// Level grid generator. Owns the difficulty curve and the RNG; each call
/// returns a fresh [`GridLayout`].
pub struct GridLayoutEngine {
    config: GridConfig,
    difficulty: DifficultyState,
    rng: StdRng,
}

impl GridLayoutEngine {
    pub fn new(config: GridConfig) -> Self {
        let rng = match config.seed {
            Some(seed) => StdRng::seed_from_u64(seed),
            None => StdRng::from_entropy(),
        };
        Self {
            difficulty: DifficultyState::new(&config),
            config,
            rng,
        }
    }

    pub fn config(&self) -> &GridConfig {
        &self.config
    }

    pub fn difficulty(&self) -> &DifficultyState {
        &self.difficulty
    }

    pub fn reset_difficulty(&mut self) {
        self.difficulty.reset();
    }

    pub fn advance_difficulty(&mut self, level_index: u32) {
        self.difficulty.advance(level_index);
    }

    /// Advance the difficulty for `level_index`, then build its grid.
    pub fn generate_layout(&mut self, level_index: u32) -> Result<GridLayout, LayoutError> {
        self.advance_difficulty(level_index);
        self.generate_layout_without_advance(level_index)
    }

    /// Build a grid with the current difficulty as-is.
    pub fn generate_layout_without_advance(
        &mut self,
        level_index: u32,
    ) -> Result<GridLayout, LayoutError> {
        let grid_size = self.difficulty.grid_size();
        let last = grid_size - 1;

        // 1. Endpoints on opposite edges
        let start = Coordinate::new(self.rng.gen_range(0..=last), 0);
        let finish = Coordinate::new(self.rng.gen_range(0..=last), last);

        let mut tiles = BTreeMap::new();
        tiles.insert(start, TileKind::Start);
        tiles.insert(finish, TileKind::Finish);

        // 2. Route
        let route = find_random_route(
            &mut self.rng,
            grid_size,
            start,
            finish,
            self.config.max_route_attempts,
        );
        for coord in &route {
            tiles.insert(*coord, TileKind::Normal);
        }

        // 3. Hazards around the route
        let requested = self.dangerous_count();
        for coord in sample_dangerous(&mut self.rng, grid_size, &tiles, requested)? {
            tiles.insert(coord, TileKind::Dangerous);
        }

        // 4. Backfill
        for y in 0..grid_size {
            for x in 0..grid_size {
                tiles.entry(Coordinate::new(x, y)).or_insert(TileKind::Normal);
            }
        }

        // 5. Items
        let items = place_items(&mut self.rng, &tiles, self.difficulty.item_count_limit());

        log::info!(
            "level {level_index}: {grid_size}x{grid_size} grid, route {} cells, {} dangerous, {} items",
            route.len(),
            tiles.values().filter(|k| **k == TileKind::Dangerous).count(),
            items.len()
        );

        Ok(GridLayout {
            level: level_index,
            grid_size,
            tiles,
            items,
            route,
            start,
            finish,
            start_position: start.to_world() + Vec3::Y * self.config.player_spawn_offset,
            item_spawn_offset: self.config.item_spawn_offset,
        })
    }

    fn dangerous_count(&mut self) -> usize {
        let (low, high) = self.difficulty.dangerous_count_bounds();
        self.rng.gen_range(low..=high) as usize
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::route::route_length_limit;

    fn seeded(grid_size: u32, seed: u64) -> GridLayoutEngine {
        GridLayoutEngine::new(GridConfig {
            grid_size,
            seed: Some(seed),
            ..GridConfig::default()
        })
    }

    #[test]
    fn test_basic_invariants() {
        let mut engine = seeded(8, 42);
        for level in 1..=15 {
            let layout = engine.generate_layout(level).unwrap();
            let size = layout.grid_size();
            let cells = (size * size) as usize;
            assert_eq!(layout.tiles().len(), cells);
            assert_eq!(layout.count(TileKind::Start), 1);
            assert_eq!(layout.count(TileKind::Finish), 1);
            assert_eq!(layout.tile_at(layout.start()), Some(TileKind::Start));
            assert_eq!(layout.tile_at(layout.finish()), Some(TileKind::Finish));
            assert!(layout.route().len() < route_length_limit(size));
        }
    }

    #[test]
    fn test_route_tiles_stay_normal() {
        let mut engine = seeded(8, 7);
        for level in 1..=10 {
            let layout = engine.generate_layout(level).unwrap();
            for coord in layout.route() {
                assert_eq!(layout.tile_at(*coord), Some(TileKind::Normal));
            }
        }
    }

    #[test]
    fn test_dangerous_count_in_bounds() {
        let mut engine = seeded(8, 99);
        for level in 1..=20 {
            engine.advance_difficulty(level);
            let (low, high) = engine.difficulty().dangerous_count_bounds();
            let layout = engine.generate_layout_without_advance(level).unwrap();
            let dangerous = layout.count(TileKind::Dangerous);
            assert!(dangerous >= low.floor() as usize, "{dangerous} < {low}");
            assert!(dangerous <= high.ceil() as usize, "{dangerous} > {high}");
        }
    }

    #[test]
    fn test_items_on_normal_tiles() {
        let mut engine = seeded(12, 5);
        for level in 1..=10 {
            let layout = engine.generate_layout(level).unwrap();
            assert!(layout.items().len() < engine.difficulty().item_count_limit());
            for coord in layout.items().keys() {
                assert_eq!(layout.tile_at(*coord), Some(TileKind::Normal));
            }
        }
    }

    #[test]
    fn test_start_position_uses_spawn_offset() {
        let mut engine = GridLayoutEngine::new(GridConfig {
            player_spawn_offset: 2.0,
            seed: Some(1),
            ..GridConfig::default()
        });
        let layout = engine.generate_layout(1).unwrap();
        let start = layout.start();
        assert_eq!(
            layout.start_position(),
            Vec3::new(start.x as f32, 2.0, start.y as f32)
        );
    }

    #[test]
    fn test_small_grid_has_no_items() {
        let mut engine = seeded(4, 3);
        let layout = engine.generate_layout_without_advance(1).unwrap();
        assert_eq!(layout.tiles().len(), 16);
        assert!(layout.items().is_empty());
    }

    #[test]
    fn test_too_few_free_cells_is_an_error() {
        let mut failures = 0;
        for seed in 0..200 {
            let mut engine = GridLayoutEngine::new(GridConfig {
                grid_size: 4,
                min_dangerous_fraction: 0.5,
                max_dangerous_fraction: 0.5,
                seed: Some(seed),
                ..GridConfig::default()
            });
            match engine.generate_layout_without_advance(1) {
                Ok(layout) => assert_eq!(layout.count(TileKind::Dangerous), 8, "seed {seed}"),
                Err(LayoutError::HazardSamplingExhausted { requested, free }) => {
                    assert_eq!(requested, 8);
                    assert!(free < requested);
                    failures += 1;
                }
            }
        }
        assert!(failures > 0);
    }

    #[test]
    fn test_same_seed_same_layout() {
        let first = seeded(8, 1234).generate_layout(1).unwrap();
        let second = seeded(8, 1234).generate_layout(1).unwrap();
        assert_eq!(first, second);
    }

    #[test]
    fn test_generate_advances_difficulty() {
        let mut engine = seeded(8, 0);
        for level in 1..=5 {
            engine.generate_layout(level).unwrap();
        }
        assert_eq!(engine.difficulty().grid_size(), 10);
        engine.reset_difficulty();
        assert_eq!(engine.difficulty().grid_size(), 8);
        assert_eq!(engine.difficulty().max_dangerous_fraction(), 0.30);
    }
}
