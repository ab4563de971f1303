//! Seeded door, stairs and trap placement
//!
//! Objects are placed after classification: doors at room/corridor
//! junctions with a weighted kind roll, stairs anchoring the exploration
//! entry and exit, and sparse corridor traps. Iteration orders are fixed
//! (corridor id, then tile order) so placement is bit-reproducible from
//! the seed.

use std::collections::{BTreeSet, HashMap};

use crate::dungeon::data::{Corridor, DungeonObject, ObjectKind, Room};
use crate::io::configuration::{DOOR_CHANCE, TRAP_CHANCE};
use crate::math::RandomSource;
use crate::spatial::Direction;

/// Door kind distribution for junction rolls
const DOOR_KINDS: [(ObjectKind, f64); 6] = [
    (ObjectKind::DoorArchway, 0.30),
    (ObjectKind::DoorPlain, 0.40),
    (ObjectKind::DoorLocked, 0.10),
    (ObjectKind::DoorBarred, 0.05),
    (ObjectKind::DoorPortcullis, 0.05),
    (ObjectKind::DoorSecret, 0.10),
];

/// Place all objects for an assembled dungeon
///
/// `starter` is the index of the room exploration begins in; stairs are
/// skipped when there are no rooms.
pub fn place_objects(
    rooms: &[Room],
    corridors: &[Corridor],
    starter: Option<usize>,
    rng: &mut RandomSource,
) -> Vec<DungeonObject> {
    let mut objects = Vec::new();
    let mut occupied = BTreeSet::new();

    place_doors(rooms, corridors, rng, &mut objects, &mut occupied);
    place_stairs(rooms, starter, &mut objects, &mut occupied);
    place_traps(corridors, rng, &mut objects, &mut occupied);

    objects
}

fn place_doors(
    rooms: &[Room],
    corridors: &[Corridor],
    rng: &mut RandomSource,
    objects: &mut Vec<DungeonObject>,
    occupied: &mut BTreeSet<[i32; 2]>,
) {
    let room_tiles: BTreeSet<([i32; 2], usize)> = rooms
        .iter()
        .flat_map(|room| room.tiles.iter().map(|&pos| (pos, room.id)))
        .collect();
    let room_at = |pos: [i32; 2]| -> Option<usize> {
        room_tiles
            .range((pos, 0)..=(pos, usize::MAX))
            .next()
            .map(|&(_, id)| id)
    };

    for corridor in corridors {
        // One door per room this corridor opens into, at the first
        // junction tile in corridor order
        let mut doored_rooms = BTreeSet::new();
        for &pos in &corridor.tiles {
            for dir in Direction::ALL {
                let [dx, dy] = dir.offset();
                let Some(room) = room_at([pos[0] + dx, pos[1] + dy]) else {
                    continue;
                };
                if doored_rooms.contains(&room) || occupied.contains(&pos) {
                    continue;
                }
                doored_rooms.insert(room);
                if !rng.chance(DOOR_CHANCE) {
                    continue;
                }

                let weights: Vec<f64> = DOOR_KINDS.iter().map(|&(_, weight)| weight).collect();
                let kind = DOOR_KINDS
                    .get(rng.weighted_choice(&weights))
                    .map_or(ObjectKind::DoorPlain, |&(kind, _)| kind);
                let rotation = match dir {
                    Direction::North | Direction::South => 0,
                    Direction::East | Direction::West => 90,
                };

                let mut properties = HashMap::new();
                match kind {
                    ObjectKind::DoorLocked => {
                        properties.insert("locked".to_string(), "true".to_string());
                    }
                    ObjectKind::DoorSecret => {
                        properties.insert("concealed".to_string(), "true".to_string());
                    }
                    _ => {}
                }

                occupied.insert(pos);
                objects.push(DungeonObject {
                    kind,
                    x: pos[0],
                    y: pos[1],
                    rotation,
                    properties,
                });
            }
        }
    }
}

fn place_stairs(
    rooms: &[Room],
    starter: Option<usize>,
    objects: &mut Vec<DungeonObject>,
    occupied: &mut BTreeSet<[i32; 2]>,
) {
    let Some(starter_room) = starter.and_then(|id| rooms.get(id)) else {
        return;
    };

    let up = representative_tile(starter_room);
    occupied.insert(up);
    objects.push(DungeonObject {
        kind: ObjectKind::StairsUp,
        x: up[0],
        y: up[1],
        rotation: 0,
        properties: HashMap::new(),
    });

    // Stairs down go to the room whose centroid sits farthest from the
    // starter; in a single-room dungeon they share that room
    let target = rooms
        .iter()
        .max_by_key(|room| distance_sq(room.centroid, starter_room.centroid))
        .unwrap_or(starter_room);

    let down = target
        .tiles
        .iter()
        .copied()
        .filter(|pos| !occupied.contains(pos))
        .max_by_key(|&pos| distance_sq(pos, up));
    if let Some(down) = down {
        occupied.insert(down);
        objects.push(DungeonObject {
            kind: ObjectKind::StairsDown,
            x: down[0],
            y: down[1],
            rotation: 0,
            properties: HashMap::new(),
        });
    }
}

fn place_traps(
    corridors: &[Corridor],
    rng: &mut RandomSource,
    objects: &mut Vec<DungeonObject>,
    occupied: &mut BTreeSet<[i32; 2]>,
) {
    for corridor in corridors {
        for &pos in &corridor.tiles {
            if occupied.contains(&pos) {
                continue;
            }
            if rng.chance(TRAP_CHANCE) {
                occupied.insert(pos);
                objects.push(DungeonObject {
                    kind: ObjectKind::Trap,
                    x: pos[0],
                    y: pos[1],
                    rotation: 0,
                    properties: HashMap::new(),
                });
            }
        }
    }
}

/// The room tile nearest the room centroid
fn representative_tile(room: &Room) -> [i32; 2] {
    room.tiles
        .iter()
        .copied()
        .min_by_key(|&pos| distance_sq(pos, room.centroid))
        .unwrap_or(room.centroid)
}

const fn distance_sq(a: [i32; 2], b: [i32; 2]) -> i64 {
    let dx = (a[0] - b[0]) as i64;
    let dy = (a[1] - b[1]) as i64;
    dx * dx + dy * dy
}

#[cfg(test)]
mod tests {
    use super::*;

    fn room_block(id: usize, x0: i32, y0: i32, w: i32, h: i32) -> Room {
        let tiles = (0..w)
            .flat_map(|dx| (0..h).map(move |dy| [x0 + dx, y0 + dy]))
            .collect();
        Room::from_tiles(id, tiles)
    }

    // Confirms stairs land in the starter room and the farthest room
    // Verified by anchoring stairs down to the starter centroid
    #[test]
    fn test_stairs_placement() {
        let rooms = vec![
            room_block(0, 0, 0, 3, 3),
            room_block(1, 8, 0, 3, 3),
            room_block(2, 16, 0, 3, 3),
        ];
        let mut rng = RandomSource::new(1);
        let objects = place_objects(&rooms, &[], Some(0), &mut rng);

        let up = objects
            .iter()
            .find(|object| object.kind == ObjectKind::StairsUp)
            .map(|object| [object.x, object.y]);
        let down = objects
            .iter()
            .find(|object| object.kind == ObjectKind::StairsDown)
            .map(|object| [object.x, object.y]);

        assert_eq!(up, Some([1, 1]));
        let down = down.unwrap_or([0, 0]);
        assert!(rooms.get(2).is_some_and(|room| room.contains(down)));
    }

    // Confirms no stairs appear without rooms and placement still succeeds
    // Verified by unwrapping the starter room unconditionally
    #[test]
    fn test_no_rooms_no_stairs() {
        let corridors = vec![Corridor {
            id: 0,
            tiles: vec![[0, 0], [1, 0], [2, 0]],
            width: 1,
        }];
        let mut rng = RandomSource::new(1);
        let objects = place_objects(&[], &corridors, None, &mut rng);
        assert!(
            objects
                .iter()
                .all(|object| object.kind == ObjectKind::Trap)
        );
    }

    // Confirms doors only appear on junction tiles
    // Verified by rolling doors for every corridor tile
    #[test]
    fn test_doors_sit_on_junctions() {
        let rooms = vec![room_block(0, 0, 0, 3, 3), room_block(1, 10, 0, 3, 3)];
        let corridors = vec![Corridor {
            id: 0,
            tiles: (3..10).map(|x| [x, 1]).collect(),
            width: 1,
        }];

        // Across many seeds every door must touch a room
        for seed in 0..32 {
            let mut rng = RandomSource::new(seed);
            let objects = place_objects(&rooms, &corridors, Some(0), &mut rng);
            for object in objects.iter().filter(|object| object.kind.is_door()) {
                assert!(
                    [[3, 1], [9, 1]].contains(&[object.x, object.y]),
                    "door off junction at [{}, {}]",
                    object.x,
                    object.y
                );
            }
        }
    }

    // Confirms placement replays identically for a fixed seed
    // Verified by iterating rooms through a hash set
    #[test]
    fn test_placement_deterministic() {
        let rooms = vec![room_block(0, 0, 0, 4, 4), room_block(1, 10, 0, 4, 4)];
        let corridors = vec![Corridor {
            id: 0,
            tiles: (4..10).map(|x| [x, 2]).collect(),
            width: 1,
        }];

        let mut first_rng = RandomSource::new(77);
        let first = place_objects(&rooms, &corridors, Some(0), &mut first_rng);
        let mut second_rng = RandomSource::new(77);
        let second = place_objects(&rooms, &corridors, Some(0), &mut second_rng);
        assert_eq!(first, second);
    }
}
