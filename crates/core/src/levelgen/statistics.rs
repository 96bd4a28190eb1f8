//! Read-only summary derived once from a finished level.

use serde::Serialize;

use crate::config::cell_count;
use crate::types::{Point, TileKind};

use super::grid::in_bounds;
use super::model::{Corridor, Room};

#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
pub struct LevelStatistics {
    init: bool,
    rooms_count: usize,
    corridors_count: usize,
    all_corridors: bool,
    room_centers: Vec<Point>,
}

impl LevelStatistics {
    /// Single pass over the assembled parts; `init` stays false on any inconsistency.
    pub(super) fn derive(
        width: usize,
        height: usize,
        tiles: &[TileKind],
        rooms: &[Room],
        corridors: &[Corridor],
        all_corridors: bool,
    ) -> Self {
        let room_centers: Vec<Point> = rooms.iter().map(Room::center).collect();
        let init = cell_count(width, height) == Some(tiles.len())
            && room_centers.iter().all(|&center| in_bounds(width, height, center));
        Self {
            init,
            rooms_count: rooms.len(),
            corridors_count: corridors.len(),
            all_corridors,
            room_centers,
        }
    }

    pub(super) fn uninitialized() -> Self {
        Self {
            init: false,
            rooms_count: 0,
            corridors_count: 0,
            all_corridors: false,
            room_centers: Vec::new(),
        }
    }

    pub fn is_valid(&self) -> bool {
        self.init
    }

    pub fn rooms_count(&self) -> usize {
        self.rooms_count
    }

    pub fn corridors_count(&self) -> usize {
        self.corridors_count
    }

    pub fn all_corridors(&self) -> bool {
        self.all_corridors
    }

    pub fn room_centers(&self) -> &[Point] {
        &self.room_centers
    }

    /// Centers as `x0, y0, x1, y1, ...` for hosts that take flat integer arrays.
    pub fn room_centers_flat(&self) -> Vec<i32> {
        self.room_centers.iter().flat_map(|center| [center.x, center.y]).collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::levelgen::model::RoomRect;
    use crate::levelgen::shapes::ShapeKind;

    fn rooms() -> Vec<Room> {
        vec![
            Room::new(ShapeKind::Square, RoomRect { x: 1, y: 1, width: 3, height: 3 }),
            Room::new(ShapeKind::Diamond, RoomRect { x: 6, y: 2, width: 5, height: 5 }),
        ]
    }

    #[test]
    fn statistics_mirror_the_assembled_parts() {
        let corridor = Corridor::new(0, 1, vec![Point::new(2, 2), Point::new(8, 4)]);
        let tiles = vec![TileKind::Empty; 12 * 8];
        let stats = LevelStatistics::derive(12, 8, &tiles, &rooms(), &[corridor], true);
        assert!(stats.is_valid());
        assert_eq!(stats.rooms_count(), 2);
        assert_eq!(stats.corridors_count(), 1);
        assert!(stats.all_corridors());
        assert_eq!(stats.room_centers(), &[Point::new(2, 2), Point::new(8, 4)]);
        assert_eq!(stats.room_centers_flat(), vec![2, 2, 8, 4]);
    }

    #[test]
    fn short_tile_buffers_leave_statistics_uninitialized() {
        let tiles = vec![TileKind::Empty; 10];
        let stats = LevelStatistics::derive(12, 8, &tiles, &rooms(), &[], false);
        assert!(!stats.is_valid());
        assert_eq!(stats.rooms_count(), 2);
    }

    #[test]
    fn centers_outside_the_grid_leave_statistics_uninitialized() {
        let tiles = vec![TileKind::Empty; 6 * 6];
        let stats = LevelStatistics::derive(6, 6, &tiles, &rooms(), &[], false);
        assert!(!stats.is_valid());
    }

    #[test]
    fn uninitialized_statistics_are_empty() {
        let stats = LevelStatistics::uninitialized();
        assert!(!stats.is_valid());
        assert_eq!(stats.rooms_count(), 0);
        assert!(stats.room_centers_flat().is_empty());
    }
}
