//! Bounded-random room placement under border and overlap policy.

use tracing::trace;

use crate::config::LevelConfig;

use super::model::{Room, RoomRect};
use super::random::{BoundedRandom, UnitSource};
use super::shapes::ShapeKind;

pub(super) struct RoomPlacer<'a> {
    config: &'a LevelConfig,
    shapes: Vec<ShapeKind>,
}

impl<'a> RoomPlacer<'a> {
    pub(super) fn new(config: &'a LevelConfig) -> Self {
        Self { config, shapes: config.enabled_shapes() }
    }

    /// Places up to `number_of_rooms` rooms; a room whose attempt budget runs out is
    /// repositioned around its last rejected candidate, or skipped.
    pub(super) fn place<S: UnitSource>(&self, random: &mut BoundedRandom<S>) -> Vec<Room> {
        let mut rooms: Vec<Room> = Vec::with_capacity(self.config.number_of_rooms);
        if self.shapes.is_empty() {
            return rooms;
        }

        for room_index in 0..self.config.number_of_rooms {
            let mut placed = None;
            let mut last_rejected = None;
            for _ in 0..self.config.placement_attempts.max(1) {
                match self.try_candidate(random, &rooms) {
                    Attempt::Placed(room) => {
                        placed = Some(room);
                        break;
                    }
                    Attempt::Rejected(room) => last_rejected = Some(room),
                    Attempt::NoFit => {}
                }
            }
            let placed = placed.or_else(|| {
                let rejected = last_rejected.filter(|_| self.config.reposition_rooms)?;
                self.reposition(&rejected, &rooms)
            });
            match placed {
                Some(room) => rooms.push(room),
                None => trace!(room_index, "room skipped after exhausting placement attempts"),
            }
        }
        rooms
    }

    fn try_candidate<S: UnitSource>(
        &self,
        random: &mut BoundedRandom<S>,
        accepted: &[Room],
    ) -> Attempt {
        let shape = self.shapes[random.choose_index(self.shapes.len())];
        let (width, height) = shape.draw_size(random, self.config);

        let Some((min_x, max_x)) = self.origin_range(self.config.level_width, width) else {
            return Attempt::NoFit;
        };
        let Some((min_y, max_y)) = self.origin_range(self.config.level_height, height) else {
            return Attempt::NoFit;
        };
        let x = random.next(min_x, max_x);
        let y = random.next(min_y, max_y);
        let candidate = Room::new(shape, RoomRect { x, y, width, height });

        if !self.config.overlap_rooms && self.conflicts(&candidate, accepted) {
            trace!(x, y, width, height, "placement rejected by room margin");
            return Attempt::Rejected(candidate);
        }
        Attempt::Placed(candidate)
    }

    /// First free origin on square rings of growing offset around `rejected`.
    fn reposition(&self, rejected: &Room, accepted: &[Room]) -> Option<Room> {
        let bounds = rejected.bounds();
        let (min_x, max_x) = self.origin_range(self.config.level_width, bounds.width)?;
        let (min_y, max_y) = self.origin_range(self.config.level_height, bounds.height)?;
        let max_offset = (max_x - min_x).max(max_y - min_y);

        let found = (1..=max_offset as isize).find_map(|offset| {
            ring_offsets(offset).find_map(|(dx, dy)| {
                let x = bounds.x.checked_add_signed(dx)?;
                let y = bounds.y.checked_add_signed(dy)?;
                if !(min_x..=max_x).contains(&x) || !(min_y..=max_y).contains(&y) {
                    return None;
                }
                let candidate = Room::new(rejected.shape(), RoomRect { x, y, ..bounds });
                (!self.conflicts(&candidate, accepted)).then_some(candidate)
            })
        });
        if let Some(room) = &found {
            let moved = room.bounds();
            trace!(
                from_x = bounds.x,
                from_y = bounds.y,
                x = moved.x,
                y = moved.y,
                "room repositioned"
            );
        }
        found
    }

    /// Origins keeping the margin-expanded room inside `[border, level_dim - border)`.
    fn origin_range(&self, level_dim: usize, room_dim: usize) -> Option<(usize, usize)> {
        let inset = self.config.border + self.config.room_border;
        let max_origin = level_dim.checked_sub(inset + room_dim)?;
        (max_origin >= inset).then_some((inset, max_origin))
    }

    fn conflicts(&self, candidate: &Room, accepted: &[Room]) -> bool {
        let margin = self.config.room_border;
        let candidate_with_margin = candidate.bounds().expanded(margin);
        accepted
            .iter()
            .any(|existing| existing.bounds().expanded(margin).intersects(&candidate_with_margin))
    }
}

enum Attempt {
    Placed(Room),
    Rejected(Room),
    NoFit,
}

/// Offsets on the square ring at Chebyshev distance `offset`, clockwise from the top-left.
fn ring_offsets(offset: isize) -> impl Iterator<Item = (isize, isize)> {
    let top = (-offset..=offset).map(move |dx| (dx, -offset));
    let right = (1 - offset..=offset).map(move |dy| (offset, dy));
    let bottom = (-offset..offset).rev().map(move |dx| (dx, offset));
    let left = (1 - offset..offset).rev().map(move |dy| (-offset, dy));
    top.chain(right).chain(bottom).chain(left)
}
