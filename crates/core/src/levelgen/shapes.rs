//! Room footprints: which cells of a bounding box a shape occupies, and where its center is.

use serde::{Deserialize, Serialize};

use crate::config::LevelConfig;

use super::random::{BoundedRandom, UnitSource};

#[repr(u8)]
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub enum ShapeKind {
    Square = 0,
    Rectangle = 1,
    Cross = 2,
    Diamond = 3,
}

/// Per-kind footprint rules. Offsets are relative to the box origin.
#[derive(Clone, Copy)]
struct ShapeStrategy {
    contains: fn(width: usize, height: usize, dx: usize, dy: usize) -> bool,
    requires_odd: bool,
    square_box: bool,
}

const STRATEGIES: [ShapeStrategy; 4] = [
    ShapeStrategy { contains: filled_contains, requires_odd: false, square_box: true },
    ShapeStrategy { contains: filled_contains, requires_odd: false, square_box: false },
    ShapeStrategy { contains: cross_contains, requires_odd: true, square_box: false },
    ShapeStrategy { contains: diamond_contains, requires_odd: true, square_box: true },
];

fn filled_contains(width: usize, height: usize, dx: usize, dy: usize) -> bool {
    dx < width && dy < height
}

fn cross_contains(width: usize, height: usize, dx: usize, dy: usize) -> bool {
    filled_contains(width, height, dx, dy) && (dx == midpoint(width) || dy == midpoint(height))
}

fn diamond_contains(width: usize, height: usize, dx: usize, dy: usize) -> bool {
    if !filled_contains(width, height, dx, dy) {
        return false;
    }
    let radius = midpoint(width.min(height));
    dx.abs_diff(midpoint(width)) + dy.abs_diff(midpoint(height)) <= radius
}

/// Midpoint offset of a span, rounded toward the origin for even spans.
pub(crate) fn midpoint(span: usize) -> usize {
    span.saturating_sub(1) / 2
}

impl ShapeKind {
    pub const ALL: [Self; 4] = [Self::Square, Self::Rectangle, Self::Cross, Self::Diamond];

    fn strategy(self) -> &'static ShapeStrategy {
        &STRATEGIES[self as usize]
    }

    pub fn contains(self, width: usize, height: usize, dx: usize, dy: usize) -> bool {
        (self.strategy().contains)(width, height, dx, dy)
    }

    /// Center offset inside a `width` x `height` box.
    pub fn center_offset(self, width: usize, height: usize) -> (usize, usize) {
        (midpoint(width), midpoint(height))
    }

    /// Draws a box size for this shape from the configured room bounds.
    pub(crate) fn draw_size<S: UnitSource>(
        self,
        random: &mut BoundedRandom<S>,
        config: &LevelConfig,
    ) -> (usize, usize) {
        let strategy = self.strategy();
        let mut draw = |min: usize, max: usize| {
            if strategy.requires_odd { random.next_odd(min, max) } else { random.next(min, max) }
        };
        let width = draw(config.min_room_width, config.max_room_width);
        let height = if strategy.square_box {
            width
        } else {
            draw(config.min_room_height, config.max_room_height)
        };
        (width, height)
    }
}
