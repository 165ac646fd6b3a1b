use glam::Vec3;
use serde::Serialize;
use std::collections::{btree_map, BTreeMap, BTreeSet};

use crate::tiles::{Coordinate, ItemKind, TileKind};

/// One generated level. Built once per request and never mutated.
#[derive(Debug, Clone, PartialEq)]
pub struct GridLayout {
    pub(crate) level: u32,
    pub(crate) grid_size: u32,
    pub(crate) tiles: BTreeMap<Coordinate, TileKind>,
    pub(crate) items: BTreeMap<Coordinate, ItemKind>,
    pub(crate) route: BTreeSet<Coordinate>,
    pub(crate) start: Coordinate,
    pub(crate) finish: Coordinate,
    pub(crate) start_position: Vec3,
    pub(crate) item_spawn_offset: f32,
}

impl GridLayout {
    pub fn level(&self) -> u32 {
        self.level
    }

    pub fn grid_size(&self) -> u32 {
        self.grid_size
    }

    pub fn tiles(&self) -> &BTreeMap<Coordinate, TileKind> {
        &self.tiles
    }

    pub fn items(&self) -> &BTreeMap<Coordinate, ItemKind> {
        &self.items
    }

    /// Cells carved by the route, not counting backfill.
    pub fn route(&self) -> &BTreeSet<Coordinate> {
        &self.route
    }

    pub fn start(&self) -> Coordinate {
        self.start
    }

    pub fn finish(&self) -> Coordinate {
        self.finish
    }

    /// World position where the player should be placed.
    pub fn start_position(&self) -> Vec3 {
        self.start_position
    }

    pub fn tile_at(&self, coord: Coordinate) -> Option<TileKind> {
        self.tiles.get(&coord).copied()
    }

    pub fn count(&self, kind: TileKind) -> usize {
        self.tiles.values().filter(|k| **k == kind).count()
    }

    /// Fresh spawn sequence in row-major order.
    pub fn spawn_sequence(&self) -> SpawnSequence<'_> {
        SpawnSequence {
            tiles: self.tiles.iter(),
            items: &self.items,
            item_spawn_offset: self.item_spawn_offset,
        }
    }

    /// Text grid, top row last so the start row is at the bottom.
    pub fn render_ascii(&self) -> String {
        let mut out = String::new();
        for y in (0..self.grid_size).rev() {
            for x in 0..self.grid_size {
                let coord = Coordinate::new(x, y);
                let glyph = match (self.items.get(&coord), self.tiles.get(&coord)) {
                    (Some(item), _) => item.glyph(),
                    (None, Some(tile)) => tile.glyph(),
                    (None, None) => ' ',
                };
                out.push(glyph);
                out.push(' ');
            }
            out.pop();
            out.push('\n');
        }
        out
    }

    pub fn to_json(&self) -> Result<String, serde_json::Error> {
        let export = LayoutExport {
            level: self.level,
            grid_size: self.grid_size,
            start: self.start,
            finish: self.finish,
            start_position: self.start_position.to_array(),
            cells: self
                .tiles
                .iter()
                .map(|(coord, tile)| CellExport {
                    x: coord.x,
                    y: coord.y,
                    tile: *tile,
                    item: self.items.get(coord).copied(),
                })
                .collect(),
        };
        serde_json::to_string_pretty(&export)
    }
}

#[derive(Serialize)]
struct LayoutExport {
    level: u32,
    grid_size: u32,
    start: Coordinate,
    finish: Coordinate,
    start_position: [f32; 3],
    cells: Vec<CellExport>,
}

#[derive(Serialize)]
struct CellExport {
    x: u32,
    y: u32,
    tile: TileKind,
    #[serde(skip_serializing_if = "Option::is_none")]
    item: Option<ItemKind>,
}

/// Everything a spawner needs to place one cell.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SpawnInstruction {
    pub coordinate: Coordinate,
    pub tile: TileKind,
    pub item: Option<ItemKind>,
    pub tile_position: Vec3,
    /// Set only when `item` is.
    pub item_position: Option<Vec3>,
}

/// Finite row-major iterator over a layout's cells.
pub struct SpawnSequence<'a> {
    tiles: btree_map::Iter<'a, Coordinate, TileKind>,
    items: &'a BTreeMap<Coordinate, ItemKind>,
    item_spawn_offset: f32,
}

impl Iterator for SpawnSequence<'_> {
    type Item = SpawnInstruction;

    fn next(&mut self) -> Option<Self::Item> {
        let (&coordinate, &tile) = self.tiles.next()?;
        let tile_position = coordinate.to_world();
        let item = self.items.get(&coordinate).copied();
        Some(SpawnInstruction {
            coordinate,
            tile,
            item,
            tile_position,
            item_position: item.map(|_| tile_position + Vec3::Y * self.item_spawn_offset),
        })
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        self.tiles.size_hint()
    }
}

impl ExactSizeIterator for SpawnSequence<'_> {}
