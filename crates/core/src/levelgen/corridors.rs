//! Minimum-spanning connection plan over room centers and corridor carving.

use std::collections::BTreeSet;

use tracing::trace;

use crate::config::LevelConfig;
use crate::types::Point;

use super::model::{Corridor, Room};
use super::pathing::{Crossing, Passability, find_path, inside_corners, l_shaped_path};
use super::random::{BoundedRandom, UnitSource};

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub(super) struct PlannedLink {
    pub(super) from: usize,
    pub(super) to: usize,
    pub(super) distance: u32,
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub(super) struct Connections {
    pub(super) corridors: Vec<Corridor>,
    pub(super) all_connected: bool,
}

/// Greedy nearest-pending-room growth (Prim) over Manhattan distances between centers.
///
/// Ties resolve by lowest `(distance, connected index, pending index)`.
pub(super) fn plan_links(rooms: &[Room]) -> Vec<PlannedLink> {
    if rooms.len() < 2 {
        return Vec::new();
    }

    let mut connected_room_indices = vec![0_usize];
    let mut pending_room_indices: Vec<usize> = (1..rooms.len()).collect();
    let mut links = Vec::with_capacity(rooms.len() - 1);

    while !pending_room_indices.is_empty() {
        let mut best_choice: Option<(u32, usize, usize)> = None;
        for &connected_index in &connected_room_indices {
            let connected_center = rooms[connected_index].center();
            for &pending_index in &pending_room_indices {
                let distance = connected_center.manhattan(rooms[pending_index].center());
                let candidate = (distance, connected_index, pending_index);
                if best_choice.is_none_or(|best| candidate < best) {
                    best_choice = Some(candidate);
                }
            }
        }

        let Some((distance, connected_index, pending_index)) = best_choice else {
            break;
        };
        links.push(PlannedLink { from: connected_index, to: pending_index, distance });
        connected_room_indices.push(pending_index);
        pending_room_indices.retain(|&index| index != pending_index);
    }
    links
}

pub(super) struct CorridorConnector<'a> {
    config: &'a LevelConfig,
    rooms: &'a [Room],
}

impl<'a> CorridorConnector<'a> {
    pub(super) fn new(config: &'a LevelConfig, rooms: &'a [Room]) -> Self {
        Self { config, rooms }
    }

    pub(super) fn connect<S: UnitSource>(&self, random: &mut BoundedRandom<S>) -> Connections {
        let mut components = Components::new(self.rooms.len());
        let mut corridors = Vec::new();
        let mut blocked = BTreeSet::new();
        for link in plan_links(self.rooms) {
            match self.carve(link, &blocked, random) {
                Some(cells) => {
                    components.union(link.from, link.to);
                    blocked.extend(inside_corners(&cells));
                    corridors.push(Corridor::new(link.from, link.to, cells));
                }
                None => trace!(from = link.from, to = link.to, "corridor link dropped"),
            }
        }
        Connections { corridors, all_connected: components.count() <= 1 }
    }

    /// L paths first, then bounded search: strict, then through third-room lanes.
    ///
    /// `blocked` holds the inside corners of corridors carved so far; strict passes avoid them.
    fn carve<S: UnitSource>(
        &self,
        link: PlannedLink,
        blocked: &BTreeSet<Point>,
        random: &mut BoundedRandom<S>,
    ) -> Option<Vec<Point>> {
        let passability = Passability {
            width: self.config.level_width,
            height: self.config.level_height,
            border: self.config.border,
            margin: self.config.room_border,
            rooms: self.rooms,
            blocked,
        };
        let start = self.rooms[link.from].center();
        let goal = self.rooms[link.to].center();
        let allows =
            |pos: Point, crossing: Crossing| passability.allows(pos, link.from, link.to, crossing);

        let horizontal_first = random.choose_index(2) == 0;
        for orientation in [horizontal_first, !horizontal_first] {
            let path = l_shaped_path(start, goal, orientation);
            if path.iter().all(|&pos| allows(pos, Crossing::Strict)) {
                return Some(path);
            }
        }

        [Crossing::Strict, Crossing::ThroughLanes].into_iter().find_map(|crossing| {
            find_path(start, goal, self.config.corridor_search_limit, |pos| allows(pos, crossing))
        })
    }
}

/// Union-find over room indices.
struct Components {
    parent: Vec<usize>,
    count: usize,
}

impl Components {
    fn new(size: usize) -> Self {
        Self { parent: (0..size).collect(), count: size }
    }

    fn find(&mut self, index: usize) -> usize {
        let mut root = index;
        while self.parent[root] != root {
            root = self.parent[root];
        }
        let mut cursor = index;
        while self.parent[cursor] != root {
            let next = self.parent[cursor];
            self.parent[cursor] = root;
            cursor = next;
        }
        root
    }

    fn union(&mut self, left: usize, right: usize) {
        let (left_root, right_root) = (self.find(left), self.find(right));
        if left_root != right_root {
            self.parent[right_root] = left_root;
            self.count -= 1;
        }
    }

    fn count(&self) -> usize {
        self.count
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::levelgen::model::RoomRect;
    use crate::levelgen::shapes::ShapeKind;

    fn square(x: usize, y: usize) -> Room {
        Room::new(ShapeKind::Square, RoomRect { x, y, width: 3, height: 3 })
    }

    fn config(width: usize, height: usize) -> LevelConfig {
        LevelConfig { level_width: width, level_height: height, ..LevelConfig::default() }
    }

    #[test]
    fn plan_links_every_room_with_minimal_total_distance() {
        // Centers: (3,3), (23,3), (9,3), (9,15).
        let rooms = [square(2, 2), square(22, 2), square(8, 2), square(8, 14)];
        let links = plan_links(&rooms);
        let pairs: Vec<(usize, usize)> = links.iter().map(|link| (link.from, link.to)).collect();
        assert_eq!(pairs, vec![(0, 2), (2, 3), (2, 1)]);
        assert_eq!(links.iter().map(|link| link.distance).sum::<u32>(), 6 + 12 + 14);
    }

    #[test]
    fn plan_is_empty_for_fewer_than_two_rooms() {
        assert!(plan_links(&[]).is_empty());
        assert!(plan_links(&[square(2, 2)]).is_empty());
    }

    #[test]
    fn open_floor_links_with_straight_corridors() {
        let rooms = [square(2, 2), square(10, 2)];
        let config = config(20, 10);
        let connections =
            CorridorConnector::new(&config, &rooms).connect(&mut BoundedRandom::from_seed(1));
        assert!(connections.all_connected);
        assert_eq!(connections.corridors.len(), 1);
        let cells = connections.corridors[0].cells();
        assert_eq!(cells.first(), Some(&Point::new(3, 3)));
        assert_eq!(cells.last(), Some(&Point::new(11, 3)));
        assert!(cells.iter().all(|pos| pos.y == 3));
    }

    #[test]
    fn corridors_detour_around_third_rooms() {
        let blocker = Room::new(ShapeKind::Rectangle, RoomRect { x: 9, y: 2, width: 3, height: 8 });
        let rooms = [square(2, 4), square(16, 4), blocker];
        let config = config(24, 14);
        let connector = CorridorConnector::new(&config, &rooms);
        let link = PlannedLink { from: 0, to: 1, distance: 14 };
        let cells = connector
            .carve(link, &BTreeSet::new(), &mut BoundedRandom::from_seed(5))
            .expect("detour exists");
        let blocker_zone = rooms[2].bounds().expanded(1);
        assert!(cells.iter().all(|&pos| !blocker_zone.contains(pos)));
        for pair in cells.windows(2) {
            assert_eq!(pair[0].manhattan(pair[1]), 1);
        }
    }

    #[test]
    fn lane_crossing_is_the_fallback_when_no_strict_detour_exists() {
        // The wall room's margin spans every interior row.
        let wall = Room::new(ShapeKind::Rectangle, RoomRect { x: 7, y: 2, width: 3, height: 6 });
        let rooms = [square(2, 3), square(12, 3), wall];
        let config = config(16, 10);
        let blocked = BTreeSet::new();
        let passability = Passability {
            width: 16,
            height: 10,
            border: 1,
            margin: 1,
            rooms: &rooms,
            blocked: &blocked,
        };
        let strict = find_path(Point::new(3, 4), Point::new(13, 4), 2_000, |pos| {
            passability.allows(pos, 0, 1, Crossing::Strict)
        });
        assert!(strict.is_none());

        let connector = CorridorConnector::new(&config, &rooms);
        let link = PlannedLink { from: 0, to: 1, distance: 10 };
        let cells = connector
            .carve(link, &BTreeSet::new(), &mut BoundedRandom::from_seed(2))
            .expect("lane crossing");
        assert!(cells.contains(&rooms[2].center()));
    }

    #[test]
    fn unreachable_links_are_dropped_and_reported_as_disconnected() {
        let cross = |x, y, side| {
            Room::new(ShapeKind::Cross, RoomRect { x, y, width: side, height: side })
        };
        let rooms = [cross(2, 2, 3), cross(10, 2, 5)];

        let starved = LevelConfig { corridor_search_limit: 0, ..config(20, 10) };
        let connections =
            CorridorConnector::new(&starved, &rooms).connect(&mut BoundedRandom::from_seed(4));
        assert!(connections.corridors.is_empty());
        assert!(!connections.all_connected);

        let config = config(20, 10);
        let connections =
            CorridorConnector::new(&config, &rooms).connect(&mut BoundedRandom::from_seed(4));
        assert_eq!(connections.corridors.len(), 1);
        assert!(connections.all_connected);
    }

    #[test]
    fn components_track_merges() {
        let mut components = Components::new(4);
        components.union(0, 1);
        components.union(2, 3);
        assert_eq!(components.count(), 2);
        components.union(1, 3);
        components.union(0, 2);
        assert_eq!(components.count(), 1);
    }
}
