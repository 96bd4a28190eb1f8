//! Procedural level layout split into coherent submodules.
//!
//! Generation is one-shot: rooms are placed, linked by a minimum-spanning
//! corridor plan, stamped onto a flat tile grid and summarized once.

pub mod model;

mod corridors;
mod generator;
mod grid;
mod level;
mod pathing;
mod placement;
mod random;
mod shapes;
mod statistics;

use tracing::warn;

use crate::config::LevelConfig;

pub use generator::LevelGenerator;
pub use level::Level;
pub use model::{Corridor, Room, RoomRect};
pub use random::{BoundedRandom, SequenceSource, UnitSource};
pub use shapes::ShapeKind;
pub use statistics::LevelStatistics;

/// Lenient entry point: an invalid configuration yields an empty, uninitialized level.
pub fn generate_level(config: &LevelConfig, seed: u64) -> Level {
    match LevelGenerator::new(config.clone()) {
        Ok(generator) => generator.generate_seeded(seed),
        Err(error) => {
            warn!(%error, "level configuration rejected");
            Level::uninitialized(config.level_width, config.level_height)
        }
    }
}
