pub mod config;
pub mod levelgen;
pub mod types;

pub use config::{Axis, ConfigError, LevelConfig};
pub use levelgen::{
    BoundedRandom, Corridor, Level, LevelGenerator, LevelStatistics, Room, RoomRect, SequenceSource,
    ShapeKind, UnitSource, generate_level,
};
pub use types::*;
