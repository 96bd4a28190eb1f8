use std::fmt;

use serde::{Deserialize, Serialize};

#[derive(
    Clone, Copy, Debug, Default, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize,
)]
pub struct Point {
    pub x: i32,
    pub y: i32,
}

impl Point {
    pub const fn new(x: i32, y: i32) -> Self {
        Self { x, y }
    }

    pub fn manhattan(self, other: Self) -> u32 {
        self.x.abs_diff(other.x) + self.y.abs_diff(other.y)
    }

    pub fn neighbors(self) -> [Self; 4] {
        [
            Self { x: self.x, y: self.y - 1 },
            Self { x: self.x + 1, y: self.y },
            Self { x: self.x, y: self.y + 1 },
            Self { x: self.x - 1, y: self.y },
        ]
    }
}

impl fmt::Display for Point {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "({}, {})", self.x, self.y)
    }
}

/// Classification of one grid cell.
///
/// The discriminants are the integer codes handed to host adapters.
#[repr(u8)]
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub enum TileKind {
    Floor = 0,
    Empty = 1,
    Border = 2,
    Corridor = 3,
}

impl TileKind {
    pub fn code(self) -> u8 {
        self as u8
    }

    pub fn from_code(code: u8) -> Option<Self> {
        match code {
            0 => Some(Self::Floor),
            1 => Some(Self::Empty),
            2 => Some(Self::Border),
            3 => Some(Self::Corridor),
            _ => None,
        }
    }

    /// Stamping precedence: a tile only replaces a tile of strictly lower rank.
    pub(crate) fn stamp_rank(self) -> u8 {
        match self {
            Self::Empty => 0,
            Self::Corridor => 1,
            Self::Floor => 2,
            Self::Border => 3,
        }
    }

    pub fn is_walkable(self) -> bool {
        matches!(self, Self::Floor | Self::Corridor)
    }

    pub fn glyph(self) -> char {
        match self {
            Self::Floor => '.',
            Self::Empty => ' ',
            Self::Border => '#',
            Self::Corridor => '+',
        }
    }
}
