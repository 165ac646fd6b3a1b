use glam::Vec3;
use serde::{Deserialize, Serialize};
use std::cmp::Ordering;

/// Grid cell address. Ordered row-major (`y`, then `x`), which is also the spawn order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Coordinate {
    pub x: u32,
    pub y: u32,
}

impl Coordinate {
    pub const fn new(x: u32, y: u32) -> Self {
        Self { x, y }
    }

    /// Applies a step that the caller has already clamped to the grid.
    pub fn offset(self, dx: i32, dy: i32) -> Self {
        Self {
            x: self.x.wrapping_add_signed(dx),
            y: self.y.wrapping_add_signed(dy),
        }
    }

    /// Grid cell to world space: `(x, 0, y)`.
    pub fn to_world(self) -> Vec3 {
        Vec3::new(self.x as f32, 0.0, self.y as f32)
    }
}

impl Ord for Coordinate {
    fn cmp(&self, other: &Self) -> Ordering {
        (self.y, self.x).cmp(&(other.y, other.x))
    }
}

impl PartialOrd for Coordinate {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum TileKind {
    Normal,
    Start,
    Finish,
    Dangerous,
}

impl TileKind {
    /// Single-character glyph for terminal dumps.
    pub fn glyph(self) -> char {
        match self {
            TileKind::Normal => '.',
            TileKind::Start => 'S',
            TileKind::Finish => 'F',
            TileKind::Dangerous => 'x',
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ItemKind {
    Gold,
    Vial,
    RarePickup,
}

/// What picking an item up grants the player. Applied by the player-stats owner.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum ItemEffect {
    AddTimePoints(f32),
    Invulnerability { seconds: f32 },
    ExtraLife,
}

const GOLD_TIME_POINTS: f32 = 5.0;
const VIAL_INVULNERABILITY_SECS: f32 = 5.0;

impl ItemKind {
    /// Maps a uniform roll in `[0, 1)` onto the 80 / 15 / 5 spawn weights.
    pub fn from_roll(roll: f64) -> Self {
        if roll < 0.80 {
            ItemKind::Gold
        } else if roll < 0.95 {
            ItemKind::Vial
        } else {
            ItemKind::RarePickup
        }
    }

    pub fn effect(self) -> ItemEffect {
        match self {
            ItemKind::Gold => ItemEffect::AddTimePoints(GOLD_TIME_POINTS),
            ItemKind::Vial => ItemEffect::Invulnerability {
                seconds: VIAL_INVULNERABILITY_SECS,
            },
            ItemKind::RarePickup => ItemEffect::ExtraLife,
        }
    }

    pub fn glyph(self) -> char {
        match self {
            ItemKind::Gold => 'g',
            ItemKind::Vial => 'v',
            ItemKind::RarePickup => '*',
        }
    }
}
