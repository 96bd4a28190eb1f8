//! Public data models for placed rooms and carved corridors.

use serde::Serialize;

use crate::types::Point;

use super::shapes::ShapeKind;

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize)]
pub struct RoomRect {
    pub x: usize,
    pub y: usize,
    pub width: usize,
    pub height: usize,
}

impl RoomRect {
    pub fn right(self) -> usize {
        self.x + self.width - 1
    }

    pub fn bottom(self) -> usize {
        self.y + self.height - 1
    }

    pub fn expanded(self, margin: usize) -> Self {
        let expanded_x = self.x.saturating_sub(margin);
        let expanded_y = self.y.saturating_sub(margin);
        let expanded_right = self.right().saturating_add(margin);
        let expanded_bottom = self.bottom().saturating_add(margin);
        Self {
            x: expanded_x,
            y: expanded_y,
            width: expanded_right - expanded_x + 1,
            height: expanded_bottom - expanded_y + 1,
        }
    }

    pub fn intersects(self, other: &Self) -> bool {
        self.x <= other.right()
            && self.right() >= other.x
            && self.y <= other.bottom()
            && self.bottom() >= other.y
    }

    pub fn contains(self, pos: Point) -> bool {
        if pos.x < 0 || pos.y < 0 {
            return false;
        }
        let px = pos.x as usize;
        let py = pos.y as usize;
        px >= self.x && px <= self.right() && py >= self.y && py <= self.bottom()
    }
}

#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
pub struct Room {
    shape: ShapeKind,
    bounds: RoomRect,
    center: Point,
}

impl Room {
    pub fn new(shape: ShapeKind, bounds: RoomRect) -> Self {
        let (dx, dy) = shape.center_offset(bounds.width, bounds.height);
        let center = Point::new((bounds.x + dx) as i32, (bounds.y + dy) as i32);
        Self { shape, bounds, center }
    }

    pub fn shape(&self) -> ShapeKind {
        self.shape
    }

    pub fn bounds(&self) -> RoomRect {
        self.bounds
    }

    pub fn center(&self) -> Point {
        self.center
    }

    pub fn occupies(&self, pos: Point) -> bool {
        if !self.bounds.contains(pos) {
            return false;
        }
        let dx = pos.x as usize - self.bounds.x;
        let dy = pos.y as usize - self.bounds.y;
        self.shape.contains(self.bounds.width, self.bounds.height, dx, dy)
    }

    /// Occupied cells in row-major order.
    pub fn cells(&self) -> impl Iterator<Item = Point> + '_ {
        let RoomRect { x, y, width, height } = self.bounds;
        (0..height).flat_map(move |dy| {
            (0..width).filter_map(move |dx| {
                self.shape
                    .contains(width, height, dx, dy)
                    .then(|| Point::new((x + dx) as i32, (y + dy) as i32))
            })
        })
    }

    /// Whether `pos` lies on the center row or column inside `reach` of the box.
    pub(crate) fn on_center_lane(&self, pos: Point, reach: usize) -> bool {
        self.bounds.expanded(reach).contains(pos)
            && (pos.x == self.center.x || pos.y == self.center.y)
    }
}

#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
pub struct Corridor {
    from_room: usize,
    to_room: usize,
    cells: Vec<Point>,
}

impl Corridor {
    pub(crate) fn new(from_room: usize, to_room: usize, cells: Vec<Point>) -> Self {
        Self { from_room, to_room, cells }
    }

    /// Indices into the level's room list.
    pub fn rooms(&self) -> (usize, usize) {
        (self.from_room, self.to_room)
    }

    /// Path cells from one room center to the other, both inclusive.
    pub fn cells(&self) -> &[Point] {
        &self.cells
    }
}
