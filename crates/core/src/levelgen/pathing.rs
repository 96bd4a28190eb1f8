//! Corridor routing: passability rules, axis-aligned L paths and bounded A* search.

use std::collections::{BTreeMap, BTreeSet};

use crate::types::Point;

use super::grid::in_interior;
use super::model::Room;

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub(super) enum Crossing {
    /// Third rooms, their margins and blocked corridor corners are walls.
    Strict,
    /// Third rooms may be crossed along their center row or column.
    ThroughLanes,
}

pub(super) struct Passability<'a> {
    pub(super) width: usize,
    pub(super) height: usize,
    pub(super) border: usize,
    pub(super) margin: usize,
    pub(super) rooms: &'a [Room],
    /// Inside corners of earlier corridors.
    pub(super) blocked: &'a BTreeSet<Point>,
}

impl Passability<'_> {
    /// Whether a corridor linking rooms `from` and `to` may use `pos`.
    pub(super) fn allows(&self, pos: Point, from: usize, to: usize, crossing: Crossing) -> bool {
        if !in_interior(self.width, self.height, self.border, pos) {
            return false;
        }
        let endpoint_cell = [from, to].into_iter().any(|index| {
            let room = &self.rooms[index];
            room.occupies(pos) || room.on_center_lane(pos, self.margin)
        });
        if endpoint_cell {
            return true;
        }
        if crossing == Crossing::Strict && self.blocked.contains(&pos) {
            return false;
        }

        self.rooms.iter().enumerate().all(|(index, room)| {
            if !room.bounds().expanded(self.margin).contains(pos) {
                return true;
            }
            if index == from || index == to {
                return false;
            }
            crossing == Crossing::ThroughLanes && room.on_center_lane(pos, self.margin)
        })
    }
}

/// Diagonal cells on the inner side of each turn in `path`.
pub(super) fn inside_corners(path: &[Point]) -> impl Iterator<Item = Point> + '_ {
    path.windows(3).filter_map(|window| {
        let (previous, turn, next) = (window[0], window[1], window[2]);
        (previous.x != next.x && previous.y != next.y)
            .then(|| Point::new(previous.x + next.x - turn.x, previous.y + next.y - turn.y))
    })
}

/// Straight or L-shaped path from `start` to `goal`, both inclusive.
pub(super) fn l_shaped_path(start: Point, goal: Point, horizontal_first: bool) -> Vec<Point> {
    let corner =
        if horizontal_first { Point::new(goal.x, start.y) } else { Point::new(start.x, goal.y) };
    let mut path = straight_run(start, corner);
    path.extend(straight_run(corner, goal).into_iter().skip(1));
    path
}

fn straight_run(from: Point, to: Point) -> Vec<Point> {
    let step_x = (to.x - from.x).signum();
    let step_y = (to.y - from.y).signum();
    let length = from.manhattan(to) as i32;
    (0..=length).map(|step| Point::new(from.x + step * step_x, from.y + step * step_y)).collect()
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord)]
struct OpenNode {
    f: u32,
    h: u32,
    y: i32,
    x: i32,
}

/// A* over 4-connected cells, giving up after `search_limit` expansions.
///
/// `start` and `goal` are always enterable; every other cell must satisfy `passable`.
pub(super) fn find_path(
    start: Point,
    goal: Point,
    search_limit: usize,
    mut passable: impl FnMut(Point) -> bool,
) -> Option<Vec<Point>> {
    if start == goal {
        return Some(vec![start]);
    }
    let mut open_set = BTreeSet::new();
    let mut g_score = BTreeMap::new();
    let mut came_from = BTreeMap::new();
    let h = start.manhattan(goal);
    open_set.insert(OpenNode { f: h, h, y: start.y, x: start.x });
    g_score.insert(start, 0_u32);

    let mut expanded = 0_usize;
    while let Some(current) = open_set.pop_first() {
        let pos = Point::new(current.x, current.y);
        if pos == goal {
            return Some(reconstruct_path(&came_from, start, goal));
        }
        if expanded >= search_limit {
            return None;
        }
        expanded += 1;

        let Some(&current_g) = g_score.get(&pos) else {
            continue;
        };
        for next in pos.neighbors() {
            if next != goal && !passable(next) {
                continue;
            }
            let tentative_g = current_g + 1;
            if tentative_g < g_score.get(&next).copied().unwrap_or(u32::MAX) {
                came_from.insert(next, pos);
                g_score.insert(next, tentative_g);
                let h = next.manhattan(goal);
                open_set.insert(OpenNode { f: tentative_g + h, h, y: next.y, x: next.x });
            }
        }
    }
    None
}

fn reconstruct_path(came_from: &BTreeMap<Point, Point>, start: Point, goal: Point) -> Vec<Point> {
    let mut pos = goal;
    let mut path = vec![pos];
    while pos != start {
        let Some(&previous) = came_from.get(&pos) else {
            break;
        };
        pos = previous;
        path.push(pos);
    }
    path.reverse();
    path
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::levelgen::model::RoomRect;
    use crate::levelgen::shapes::ShapeKind;

    fn room(x: usize, y: usize, side: usize) -> Room {
        Room::new(ShapeKind::Square, RoomRect { x, y, width: side, height: side })
    }

    #[test]
    fn l_paths_turn_once_and_include_both_ends() {
        let path = l_shaped_path(Point::new(1, 1), Point::new(3, 4), true);
        assert_eq!(
            path,
            vec![
                Point::new(1, 1),
                Point::new(2, 1),
                Point::new(3, 1),
                Point::new(3, 2),
                Point::new(3, 3),
                Point::new(3, 4),
            ]
        );
        let vertical_first = l_shaped_path(Point::new(1, 1), Point::new(3, 4), false);
        assert_eq!(vertical_first[3], Point::new(1, 4));
        assert_eq!(l_shaped_path(Point::new(2, 2), Point::new(2, 2), true), vec![Point::new(2, 2)]);
    }

    #[test]
    fn astar_detours_around_walls() {
        // Wall at x = 3 for y in 0..=3, open below.
        let wall = |pos: Point| pos.x == 3 && pos.y <= 3;
        let inside = |pos: Point| (0..7).contains(&pos.x) && (0..6).contains(&pos.y);
        let passable = |pos: Point| inside(pos) && !wall(pos);
        let path =
            find_path(Point::new(1, 1), Point::new(5, 1), 500, passable).expect("a detour exists");
        assert_eq!(path.first(), Some(&Point::new(1, 1)));
        assert_eq!(path.last(), Some(&Point::new(5, 1)));
        assert_eq!(path.len(), 11);
        assert!(path.iter().all(|&pos| !wall(pos)));
        for pair in path.windows(2) {
            assert_eq!(pair[0].manhattan(pair[1]), 1);
        }
    }

    #[test]
    fn astar_gives_up_when_the_budget_is_spent() {
        let open = |pos: Point| (0..40).contains(&pos.x) && (0..40).contains(&pos.y);
        assert!(find_path(Point::new(0, 0), Point::new(39, 39), 10, open).is_none());
        assert!(find_path(Point::new(0, 0), Point::new(39, 39), 10_000, open).is_some());
    }

    #[test]
    fn astar_reports_enclosed_goals() {
        let passable =
            |pos: Point| (0..5).contains(&pos.x) && (0..5).contains(&pos.y) && pos.x != 2;
        assert!(find_path(Point::new(0, 0), Point::new(4, 4), 1_000, passable).is_none());
    }

    #[test]
    fn third_room_margins_block_strictly_and_open_lanes_when_relaxed() {
        let rooms = [room(2, 2, 3), room(14, 2, 3), room(8, 2, 3)];
        let blocked = BTreeSet::new();
        let passability = Passability {
            width: 20,
            height: 10,
            border: 1,
            margin: 1,
            rooms: &rooms,
            blocked: &blocked,
        };
        let lane = Point::new(9, 3);
        let corner = Point::new(8, 2);
        assert!(!passability.allows(lane, 0, 1, Crossing::Strict));
        assert!(passability.allows(lane, 0, 1, Crossing::ThroughLanes));
        assert!(!passability.allows(corner, 0, 1, Crossing::ThroughLanes));
        assert!(passability.allows(Point::new(9, 7), 0, 1, Crossing::Strict));
        assert!(!passability.allows(Point::new(0, 5), 0, 1, Crossing::Strict));
    }

    #[test]
    fn endpoint_rooms_admit_floor_and_lanes_but_not_their_margin() {
        let rooms = [room(2, 2, 3), room(14, 2, 3)];
        let blocked = BTreeSet::new();
        let passability = Passability {
            width: 20,
            height: 10,
            border: 1,
            margin: 1,
            rooms: &rooms,
            blocked: &blocked,
        };
        assert!(passability.allows(Point::new(2, 2), 0, 1, Crossing::Strict));
        assert!(passability.allows(Point::new(5, 3), 0, 1, Crossing::Strict));
        assert!(!passability.allows(Point::new(5, 2), 0, 1, Crossing::Strict));
    }

    #[test]
    fn inside_corners_sit_diagonally_within_each_turn() {
        let path = l_shaped_path(Point::new(1, 1), Point::new(3, 4), true);
        assert_eq!(inside_corners(&path).collect::<Vec<_>>(), vec![Point::new(2, 2)]);
        let straight = l_shaped_path(Point::new(1, 1), Point::new(6, 1), false);
        assert_eq!(inside_corners(&straight).count(), 0);
    }

    #[test]
    fn blocked_corners_close_strict_passage_only() {
        let rooms = [room(2, 2, 3), room(14, 2, 3)];
        let blocked = BTreeSet::from([Point::new(9, 6), Point::new(3, 3)]);
        let passability = Passability {
            width: 20,
            height: 10,
            border: 1,
            margin: 1,
            rooms: &rooms,
            blocked: &blocked,
        };
        assert!(!passability.allows(Point::new(9, 6), 0, 1, Crossing::Strict));
        assert!(passability.allows(Point::new(9, 6), 0, 1, Crossing::ThroughLanes));
        // Endpoint floor stays open.
        assert!(passability.allows(Point::new(3, 3), 0, 1, Crossing::Strict));
    }
}
