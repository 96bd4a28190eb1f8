//! Structural checks every generated level must pass.

use std::collections::VecDeque;

use promethean::{Level, LevelConfig, Point, TileKind};

#[derive(Clone, Debug, PartialEq, Eq)]
pub enum Violation {
    Uninitialized,
    TileCount { expected: usize, actual: usize },
    TooManyRooms { requested: usize, placed: usize },
    CenterCountMismatch { rooms: usize, centers: usize },
    RoomCrossesBorder { room: usize },
    RoomsOverlap { left: usize, right: usize },
    TooFewCorridors { rooms: usize, corridors: usize },
    UnreachableRoom { room: usize, center: Point },
}

/// First violated invariant, if any.
pub fn check_level(config: &LevelConfig, level: &Level) -> Result<(), Violation> {
    let stats = level.statistics();
    if !stats.is_valid() {
        return Err(Violation::Uninitialized);
    }
    let expected = config.level_width * config.level_height;
    if level.tiles().len() != expected {
        return Err(Violation::TileCount { expected, actual: level.tiles().len() });
    }
    if stats.rooms_count() > config.number_of_rooms {
        return Err(Violation::TooManyRooms {
            requested: config.number_of_rooms,
            placed: stats.rooms_count(),
        });
    }
    if stats.room_centers().len() != stats.rooms_count() {
        return Err(Violation::CenterCountMismatch {
            rooms: stats.rooms_count(),
            centers: stats.room_centers().len(),
        });
    }

    let rooms = level.rooms();
    for (index, room) in rooms.iter().enumerate() {
        let bounds = room.bounds();
        let inside = bounds.x >= config.border
            && bounds.y >= config.border
            && bounds.right() + config.border < config.level_width
            && bounds.bottom() + config.border < config.level_height;
        if !inside {
            return Err(Violation::RoomCrossesBorder { room: index });
        }
    }
    if !config.overlap_rooms {
        for (left, left_room) in rooms.iter().enumerate() {
            let left_box = left_room.bounds().expanded(config.room_border);
            for (right, right_room) in rooms.iter().enumerate().skip(left + 1) {
                if left_box.intersects(&right_room.bounds().expanded(config.room_border)) {
                    return Err(Violation::RoomsOverlap { left, right });
                }
            }
        }
    }

    if stats.all_corridors() {
        if stats.corridors_count() + 1 < stats.rooms_count() {
            return Err(Violation::TooFewCorridors {
                rooms: stats.rooms_count(),
                corridors: stats.corridors_count(),
            });
        }
        if let Some(&origin) = stats.room_centers().first() {
            let reachable = walkable_region(level, origin);
            for (room, &center) in stats.room_centers().iter().enumerate() {
                if !reachable[cell_index(level, center)] {
                    return Err(Violation::UnreachableRoom { room, center });
                }
            }
        }
    }
    Ok(())
}

fn cell_index(level: &Level, pos: Point) -> usize {
    pos.y as usize * level.width() + pos.x as usize
}

/// Flood fill over Floor and Corridor tiles.
fn walkable_region(level: &Level, start: Point) -> Vec<bool> {
    let mut seen = vec![false; level.tiles().len()];
    if !level.tile_at(start).is_some_and(TileKind::is_walkable) {
        return seen;
    }
    seen[cell_index(level, start)] = true;
    let mut queue = VecDeque::from([start]);
    while let Some(pos) = queue.pop_front() {
        for next in pos.neighbors() {
            if level.tile_at(next).is_some_and(TileKind::is_walkable) {
                let index = cell_index(level, next);
                if !seen[index] {
                    seen[index] = true;
                    queue.push_back(next);
                }
            }
        }
    }
    seen
}
