//! The immutable generation result and its read-only query surface.

use std::fmt;
use std::hash::Hasher;

use serde::Serialize;
use xxhash_rust::xxh3::Xxh3;

use crate::config::cell_count;
use crate::types::{Point, TileKind};

use super::grid::{in_bounds, tile_index};
use super::model::{Corridor, Room};
use super::statistics::LevelStatistics;

#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
pub struct Level {
    width: usize,
    height: usize,
    tiles: Vec<TileKind>,
    rooms: Vec<Room>,
    corridors: Vec<Corridor>,
    statistics: LevelStatistics,
}

impl Level {
    pub(super) fn assembled(
        width: usize,
        height: usize,
        tiles: Vec<TileKind>,
        rooms: Vec<Room>,
        corridors: Vec<Corridor>,
        all_corridors: bool,
    ) -> Self {
        let statistics =
            LevelStatistics::derive(width, height, &tiles, &rooms, &corridors, all_corridors);
        Self { width, height, tiles, rooms, corridors, statistics }
    }

    /// Empty grid of the requested size, standing in for a generation that could not run.
    ///
    /// A size too large to address keeps its dimensions but gets no tile buffer.
    pub(super) fn uninitialized(width: usize, height: usize) -> Self {
        let cells = cell_count(width, height).unwrap_or(0);
        Self {
            width,
            height,
            tiles: vec![TileKind::Empty; cells],
            rooms: Vec::new(),
            corridors: Vec::new(),
            statistics: LevelStatistics::uninitialized(),
        }
    }

    /// Axis 0 is the height, axis 1 the width.
    pub fn size(&self, axis: usize) -> Option<usize> {
        match axis {
            0 => Some(self.height),
            1 => Some(self.width),
            _ => None,
        }
    }

    pub fn width(&self) -> usize {
        self.width
    }

    pub fn height(&self) -> usize {
        self.height
    }

    /// Row-major cells, `y * width + x`.
    pub fn tiles(&self) -> &[TileKind] {
        &self.tiles
    }

    pub fn tile_codes(&self) -> Vec<u8> {
        self.tiles.iter().map(|tile| tile.code()).collect()
    }

    pub fn tile_at(&self, pos: Point) -> Option<TileKind> {
        if !in_bounds(self.width, self.height, pos) {
            return None;
        }
        self.tiles.get(tile_index(self.width, pos)).copied()
    }

    /// Rooms in placement order.
    pub fn rooms(&self) -> &[Room] {
        &self.rooms
    }

    pub fn corridors(&self) -> &[Corridor] {
        &self.corridors
    }

    pub fn statistics(&self) -> &LevelStatistics {
        &self.statistics
    }

    /// Stable hash of the grid, rooms and corridors for determinism checks.
    pub fn fingerprint(&self) -> u64 {
        let mut hasher = Xxh3::new();
        hasher.write_u64(self.width as u64);
        hasher.write_u64(self.height as u64);
        for tile in &self.tiles {
            hasher.write_u8(tile.code());
        }
        hasher.write_u64(self.rooms.len() as u64);
        for room in &self.rooms {
            let bounds = room.bounds();
            hasher.write_u8(room.shape() as u8);
            hasher.write_u64(bounds.x as u64);
            hasher.write_u64(bounds.y as u64);
            hasher.write_u64(bounds.width as u64);
            hasher.write_u64(bounds.height as u64);
        }
        hasher.write_u64(self.corridors.len() as u64);
        for corridor in &self.corridors {
            let (from, to) = corridor.rooms();
            hasher.write_u64(from as u64);
            hasher.write_u64(to as u64);
            hasher.write_u64(corridor.cells().len() as u64);
            for cell in corridor.cells() {
                hasher.write_i32(cell.x);
                hasher.write_i32(cell.y);
            }
        }
        hasher.write_u8(u8::from(self.statistics.all_corridors()));
        hasher.finish()
    }
}

impl fmt::Display for Level {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.width == 0 {
            return Ok(());
        }
        for row in self.tiles.chunks(self.width) {
            let line: String = row.iter().map(|tile| tile.glyph()).collect();
            writeln!(f, "{line}")?;
        }
        Ok(())
    }
}
