use crate::config::GridConfig;

/// Levels between two grid size increases.
pub const GRID_GROWTH_INTERVAL: u32 = 5;
pub const GRID_GROWTH_STEP: u32 = 2;
/// Fraction bounds are tracked in hundredths so the cap is hit exactly.
pub const DANGER_STEP_PCT: u32 = 2;
pub const DANGER_CAP_PCT: u32 = 50;
pub const MAX_ITEM_PCT: u32 = 5;

/// Generation parameters that evolve as the player advances.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct DifficultyState {
    grid_size: u32,
    min_dangerous_pct: u32,
    max_dangerous_pct: u32,
    initial: (u32, u32, u32),
}

impl DifficultyState {
    pub fn new(config: &GridConfig) -> Self {
        let initial = (
            config.grid_size,
            to_pct(config.min_dangerous_fraction),
            to_pct(config.max_dangerous_fraction),
        );
        Self {
            grid_size: initial.0,
            min_dangerous_pct: initial.1,
            max_dangerous_pct: initial.2,
            initial,
        }
    }

    /// Back to the configured starting values. The item fraction is constant.
    pub fn reset(&mut self) {
        let (grid_size, min_pct, max_pct) = self.initial;
        self.grid_size = grid_size;
        self.min_dangerous_pct = min_pct;
        self.max_dangerous_pct = max_pct;
    }

    /// Progression applied once per level, before that level is generated.
    ///
    /// Both danger bounds move together and are gated only on the upper one,
    /// so `min` always trails `max` by the configured spread.
    pub fn advance(&mut self, level_index: u32) {
        if level_index % GRID_GROWTH_INTERVAL == 0 {
            self.grid_size += GRID_GROWTH_STEP;
        }
        if self.max_dangerous_pct < DANGER_CAP_PCT {
            self.min_dangerous_pct += DANGER_STEP_PCT;
            self.max_dangerous_pct += DANGER_STEP_PCT;
        }
        log::debug!(
            "level {level_index}: grid {}x{}, danger {:.2}..{:.2}",
            self.grid_size,
            self.grid_size,
            self.min_dangerous_fraction(),
            self.max_dangerous_fraction()
        );
    }

    pub fn grid_size(&self) -> u32 {
        self.grid_size
    }

    pub fn cell_count(&self) -> usize {
        (self.grid_size * self.grid_size) as usize
    }

    pub fn min_dangerous_fraction(&self) -> f32 {
        self.min_dangerous_pct as f32 / 100.0
    }

    pub fn max_dangerous_fraction(&self) -> f32 {
        self.max_dangerous_pct as f32 / 100.0
    }

    pub fn max_item_fraction(&self) -> f32 {
        MAX_ITEM_PCT as f32 / 100.0
    }

    /// Bounds on the number of dangerous tiles for the current grid.
    pub fn dangerous_count_bounds(&self) -> (f32, f32) {
        let cells = self.cell_count() as f32;
        (
            self.min_dangerous_fraction() * cells,
            self.max_dangerous_fraction() * cells,
        )
    }

    /// Exclusive upper bound on the number of items for the current grid.
    pub fn item_count_limit(&self) -> usize {
        self.cell_count() * MAX_ITEM_PCT as usize / 100
    }
}

fn to_pct(fraction: f32) -> u32 {
    (fraction * 100.0).round() as u32
}
