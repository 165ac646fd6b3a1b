use crate::config::GridConfig;
use crate::error::LayoutError;
use crate::events::{EventBus, GameEvent};
use crate::layout::GridLayout;
use crate::layout_engine::GridLayoutEngine;

/// Top-level owner of the layout engine and event bus for one play-through.
pub struct GameSession {
    engine: GridLayoutEngine,
    bus: EventBus,
    next_level: u32,
    current: Option<GridLayout>,
}

impl GameSession {
    pub fn new(config: GridConfig) -> Self {
        Self {
            engine: GridLayoutEngine::new(config),
            bus: EventBus::new(),
            next_level: 1,
            current: None,
        }
    }

    pub fn engine(&self) -> &GridLayoutEngine {
        &self.engine
    }

    pub fn bus_mut(&mut self) -> &mut EventBus {
        &mut self.bus
    }

    pub fn current_layout(&self) -> Option<&GridLayout> {
        self.current.as_ref()
    }

    pub fn next_level(&self) -> u32 {
        self.next_level
    }

    /// Progress the difficulty, build the level and announce its start position.
    pub fn on_level_loaded(&mut self, level: u32) -> Result<&GridLayout, LayoutError> {
        self.bus.publish(&GameEvent::LevelLoaded { level });
        let layout = self.engine.generate_layout(level)?;
        self.bus.publish(&GameEvent::LayoutGenerated {
            level,
            start_position: layout.start_position(),
        });
        self.next_level = level + 1;
        Ok(&*self.current.insert(layout))
    }

    pub fn load_next_level(&mut self) -> Result<&GridLayout, LayoutError> {
        self.on_level_loaded(self.next_level)
    }

    /// Back to the first level with the initial difficulty.
    pub fn on_restart_requested(&mut self) {
        self.bus.publish(&GameEvent::RestartRequested);
        self.engine.reset_difficulty();
        self.next_level = 1;
        self.current = None;
    }
}
