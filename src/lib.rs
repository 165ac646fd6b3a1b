// Library exports for the grid generator and its game-flow glue
pub mod config;
pub mod difficulty;
pub mod error;
pub mod events;
pub mod hazards;
pub mod items;
pub mod layout;
pub mod layout_engine;
pub mod route;
pub mod session;
pub mod spawner;
pub mod tiles;

// Re-export main types
pub use config::GridConfig;
pub use difficulty::DifficultyState;
pub use error::{ConfigError, LayoutError};
pub use events::{EventBus, GameEvent};
pub use layout::{GridLayout, SpawnInstruction, SpawnSequence};
pub use layout_engine::GridLayoutEngine;
pub use session::GameSession;
pub use tiles::{Coordinate, ItemEffect, ItemKind, TileKind};
