//! Declarative generation settings and their structural validation.

use std::fmt;

use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::levelgen::ShapeKind;

pub const DEFAULT_PLACEMENT_ATTEMPTS: usize = 64;
pub const DEFAULT_CORRIDOR_SEARCH_LIMIT: usize = 2000;

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Axis {
    Width,
    Height,
}

impl fmt::Display for Axis {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Width => f.write_str("width"),
            Self::Height => f.write_str("height"),
        }
    }
}

#[derive(Clone, Debug, PartialEq, Eq, Error)]
pub enum ConfigError {
    #[error("level size {width}x{height} has no cells")]
    EmptyLevel { width: usize, height: usize },
    #[error("level size {width}x{height} exceeds the addressable grid")]
    LevelTooLarge { width: usize, height: usize },
    #[error("border {border} leaves no interior in a {width}x{height} level")]
    BorderTooWide { border: usize, width: usize, height: usize },
    #[error("room {axis} bounds must be at least 1")]
    ZeroRoomDimension { axis: Axis },
    #[error("room {axis} minimum {min} exceeds maximum {max}")]
    InvertedRange { axis: Axis, min: usize, max: usize },
    #[error("no room shape is enabled")]
    NoShapeEnabled,
}

#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct LevelConfig {
    pub level_height: usize,
    pub level_width: usize,
    pub min_room_width: usize,
    pub max_room_width: usize,
    pub min_room_height: usize,
    pub max_room_height: usize,
    pub number_of_rooms: usize,
    pub border: usize,
    pub room_border: usize,
    pub overlap_rooms: bool,
    pub rooms_square: bool,
    pub rooms_rectangle: bool,
    pub rooms_cross: bool,
    pub rooms_diamond: bool,
    /// Candidate draws per requested room before the room is skipped.
    #[serde(default = "default_placement_attempts")]
    pub placement_attempts: usize,
    /// Node expansions allowed per corridor search.
    #[serde(default = "default_corridor_search_limit")]
    pub corridor_search_limit: usize,
    /// Spiral search around the last rejected candidate before a room is skipped.
    #[serde(default = "default_reposition_rooms")]
    pub reposition_rooms: bool,
}

/// Cell count of a `width` x `height` grid, or `None` when it cannot be addressed
/// with `i32` coordinates and a `usize` buffer length.
pub fn cell_count(width: usize, height: usize) -> Option<usize> {
    let max_side = i32::MAX as usize;
    if width > max_side || height > max_side {
        return None;
    }
    width.checked_mul(height)
}

fn default_placement_attempts() -> usize {
    DEFAULT_PLACEMENT_ATTEMPTS
}

fn default_corridor_search_limit() -> usize {
    DEFAULT_CORRIDOR_SEARCH_LIMIT
}

fn default_reposition_rooms() -> bool {
    true
}

impl Default for LevelConfig {
    fn default() -> Self {
        Self {
            level_height: 64,
            level_width: 64,
            min_room_width: 5,
            max_room_width: 7,
            min_room_height: 5,
            max_room_height: 7,
            number_of_rooms: 45,
            border: 1,
            room_border: 1,
            overlap_rooms: false,
            rooms_square: true,
            rooms_rectangle: true,
            rooms_cross: true,
            rooms_diamond: true,
            placement_attempts: DEFAULT_PLACEMENT_ATTEMPTS,
            corridor_search_limit: DEFAULT_CORRIDOR_SEARCH_LIMIT,
            reposition_rooms: true,
        }
    }
}

impl LevelConfig {
    pub fn validate(&self) -> Result<(), ConfigError> {
        let (width, height) = (self.level_width, self.level_height);
        if width == 0 || height == 0 {
            return Err(ConfigError::EmptyLevel { width, height });
        }
        if cell_count(width, height).is_none() {
            return Err(ConfigError::LevelTooLarge { width, height });
        }
        if self.border.saturating_mul(2) >= width.min(height) {
            return Err(ConfigError::BorderTooWide { border: self.border, width, height });
        }
        for (axis, min, max) in [
            (Axis::Width, self.min_room_width, self.max_room_width),
            (Axis::Height, self.min_room_height, self.max_room_height),
        ] {
            if min == 0 {
                return Err(ConfigError::ZeroRoomDimension { axis });
            }
            if min > max {
                return Err(ConfigError::InvertedRange { axis, min, max });
            }
        }
        if self.enabled_shapes().is_empty() {
            return Err(ConfigError::NoShapeEnabled);
        }
        Ok(())
    }

    /// Enabled shapes in their fixed declaration order.
    pub fn enabled_shapes(&self) -> Vec<ShapeKind> {
        [
            (ShapeKind::Square, self.rooms_square),
            (ShapeKind::Rectangle, self.rooms_rectangle),
            (ShapeKind::Cross, self.rooms_cross),
            (ShapeKind::Diamond, self.rooms_diamond),
        ]
        .into_iter()
        .filter_map(|(shape, enabled)| enabled.then_some(shape))
        .collect()
    }

    /// Sets both room size ranges, swapping any bound pair given as `(max, min)`.
    pub fn with_room_size(
        mut self,
        (min_width, max_width): (usize, usize),
        (min_height, max_height): (usize, usize),
    ) -> Self {
        self.min_room_width = min_width.min(max_width);
        self.max_room_width = min_width.max(max_width);
        self.min_room_height = min_height.min(max_height);
        self.max_room_height = min_height.max(max_height);
        self
    }

    pub fn with_only_shape(mut self, shape: ShapeKind) -> Self {
        self.rooms_square = shape == ShapeKind::Square;
        self.rooms_rectangle = shape == ShapeKind::Rectangle;
        self.rooms_cross = shape == ShapeKind::Cross;
        self.rooms_diamond = shape == ShapeKind::Diamond;
        self
    }
}
