//! Flat tile-buffer primitives and grid assembly.

use crate::types::{Point, TileKind};

use super::model::{Corridor, Room};

pub(super) fn in_bounds(width: usize, height: usize, pos: Point) -> bool {
    pos.x >= 0 && pos.y >= 0 && (pos.x as usize) < width && (pos.y as usize) < height
}

/// In bounds and outside the `border` margin.
pub(super) fn in_interior(width: usize, height: usize, border: usize, pos: Point) -> bool {
    if !in_bounds(width, height, pos) {
        return false;
    }
    let (x, y) = (pos.x as usize, pos.y as usize);
    x >= border && y >= border && x + border < width && y + border < height
}

pub(super) fn tile_index(width: usize, pos: Point) -> usize {
    (pos.y as usize) * width + (pos.x as usize)
}

/// Writes `tile` unless the cell already holds a higher-precedence tile.
fn stamp(tiles: &mut [TileKind], width: usize, height: usize, pos: Point, tile: TileKind) {
    if !in_bounds(width, height, pos) {
        return;
    }
    let slot = &mut tiles[tile_index(width, pos)];
    if tile.stamp_rank() > slot.stamp_rank() {
        *slot = tile;
    }
}

pub(super) fn assemble_tiles(
    width: usize,
    height: usize,
    border: usize,
    rooms: &[Room],
    corridors: &[Corridor],
) -> Vec<TileKind> {
    let mut tiles = vec![TileKind::Empty; width * height];
    for y in 0..height {
        for x in 0..width {
            let pos = Point::new(x as i32, y as i32);
            if !in_interior(width, height, border, pos) {
                tiles[tile_index(width, pos)] = TileKind::Border;
            }
        }
    }
    for room in rooms {
        for cell in room.cells() {
            stamp(&mut tiles, width, height, cell, TileKind::Floor);
        }
    }
    for corridor in corridors {
        for &cell in corridor.cells() {
            stamp(&mut tiles, width, height, cell, TileKind::Corridor);
        }
    }
    tiles
}
