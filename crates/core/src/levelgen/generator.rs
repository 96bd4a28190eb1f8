//! One-shot level generation orchestrating placement, corridors and grid assembly.

use tracing::debug;

use crate::config::{ConfigError, LevelConfig};

use super::corridors::CorridorConnector;
use super::grid::assemble_tiles;
use super::level::Level;
use super::placement::RoomPlacer;
use super::random::{BoundedRandom, UnitSource};

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct LevelGenerator {
    config: LevelConfig,
}

impl LevelGenerator {
    pub fn new(config: LevelConfig) -> Result<Self, ConfigError> {
        config.validate()?;
        Ok(Self { config })
    }

    pub fn generate_seeded(&self, seed: u64) -> Level {
        debug!(seed, "generating level");
        self.generate(&mut BoundedRandom::from_seed(seed))
    }

    pub fn generate<S: UnitSource>(&self, random: &mut BoundedRandom<S>) -> Level {
        let config = &self.config;
        let rooms = RoomPlacer::new(config).place(random);
        let connections = CorridorConnector::new(config, &rooms).connect(random);
        let tiles = assemble_tiles(
            config.level_width,
            config.level_height,
            config.border,
            &rooms,
            &connections.corridors,
        );

        debug!(
            rooms_placed = rooms.len(),
            rooms_requested = config.number_of_rooms,
            corridors = connections.corridors.len(),
            all_corridors = connections.all_connected,
            "level generated"
        );
        Level::assembled(
            config.level_width,
            config.level_height,
            tiles,
            rooms,
            connections.corridors,
            connections.all_connected,
        )
    }
}
