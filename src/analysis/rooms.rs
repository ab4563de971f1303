//! Room graph distances and furthest-room selection
//!
//! Builds the room-adjacency graph from the dungeon's connections, derives
//! per-room traversal costs from the tile cost map, and selects a
//! spatially-distributed set of "special" rooms: candidates are taken in
//! descending cost order, but candidates close (by room hops) to an
//! already-selected room are suppressed probabilistically so the set
//! spreads instead of clustering at the far end of one branch.

use std::collections::VecDeque;

use crate::analysis::costmap::{CostMap, UNREACHABLE_COST, compute_cost_map};
use crate::dungeon::{DungeonData, Room};
use crate::io::configuration::{
    FURTHEST_ROOM_DIVISOR, SPECIAL_DOOR_BONUS, SPECIAL_TIER_ADJACENT, SPECIAL_TIER_MID,
    SPECIAL_TIER_NEAR,
};
use crate::math::RandomSource;

/// A room selected by the furthest-room pass
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct FurthestRoom {
    /// Selected room id
    pub room_id: usize,
    /// Insertion order within the special set, from 0
    pub rank: usize,
    /// Traversal cost of the room from the start
    pub cost: u32,
    /// Marks the room for downstream content placement
    pub is_target: bool,
}

/// Per-room traversal summary from the start position
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RoomRoute {
    /// Room id this summary belongs to
    pub room_id: usize,
    /// Traversal cost; [`UNREACHABLE_COST`] when the room is cut off
    pub cost: u32,
    /// Room hops from the start room along the adjacency graph
    pub hops: u32,
    /// Surcharge-door crossings on the tile-level shortest path
    pub doors: u32,
}

/// Full output of the analysis pass
#[derive(Debug, Clone, PartialEq)]
pub struct DungeonAnalysis {
    /// Resolved start position, `None` when the dungeon has none
    pub start: Option<[i32; 2]>,
    /// Selected special rooms in insertion order
    pub furthest_rooms: Vec<FurthestRoom>,
    /// Per-room traversal summaries, indexed by room id
    pub room_routes: Vec<RoomRoute>,
    /// Tile-level cost map the summaries were derived from
    pub cost_map: CostMap,
}

/// Room-adjacency edge list with door tags
///
/// An edge carries `true` when a surcharge door lies on the connection's
/// corridor (or, for direct adjacency, on a boundary tile of either room).
fn adjacency(dungeon: &DungeonData) -> Vec<Vec<(usize, bool)>> {
    let mut edges = vec![Vec::new(); dungeon.rooms.len()];

    for connection in &dungeon.connections {
        let has_door = connection.via_corridor.map_or_else(
            || direct_edge_has_door(dungeon, connection.room_a, connection.room_b),
            |corridor_id| corridor_has_door(dungeon, corridor_id),
        );
        if let Some(list) = edges.get_mut(connection.room_a) {
            list.push((connection.room_b, has_door));
        }
        if let Some(list) = edges.get_mut(connection.room_b) {
            list.push((connection.room_a, has_door));
        }
    }

    for list in &mut edges {
        list.sort_unstable();
        list.dedup();
    }
    edges
}

fn corridor_has_door(dungeon: &DungeonData, corridor_id: usize) -> bool {
    let Some(corridor) = dungeon.corridors.iter().find(|c| c.id == corridor_id) else {
        return false;
    };
    dungeon.objects.iter().any(|object| {
        object.kind.door_surcharge() > 0 && corridor.tiles.contains(&[object.x, object.y])
    })
}

fn direct_edge_has_door(dungeon: &DungeonData, room_a: usize, room_b: usize) -> bool {
    let tiles_of = |id: usize| dungeon.room(id).map(|room| room.tiles.as_slice());
    let (Some(a_tiles), Some(b_tiles)) = (tiles_of(room_a), tiles_of(room_b)) else {
        return false;
    };
    dungeon.objects.iter().any(|object| {
        object.kind.door_surcharge() > 0
            && (a_tiles.contains(&[object.x, object.y]) || b_tiles.contains(&[object.x, object.y]))
    })
}

/// BFS over the room graph from one room
///
/// Returns per-room `(hops, doors)` along the first-found shortest hop
/// path; unvisited rooms stay `None`. Neighbor order is the sorted edge
/// list, so tie-breaking is deterministic.
fn hop_distances(edges: &[Vec<(usize, bool)>], from: usize) -> Vec<Option<(u32, u32)>> {
    let mut visited: Vec<Option<(u32, u32)>> = vec![None; edges.len()];
    let Some(slot) = visited.get_mut(from) else {
        return visited;
    };
    *slot = Some((0, 0));

    let mut queue = VecDeque::new();
    queue.push_back(from);
    while let Some(room) = queue.pop_front() {
        let Some(&Some((hops, doors))) = visited.get(room) else {
            continue;
        };
        let Some(neighbors) = edges.get(room) else {
            continue;
        };
        for &(next, has_door) in neighbors {
            let Some(state) = visited.get_mut(next) else {
                continue;
            };
            if state.is_none() {
                *state = Some((hops + 1, doors + u32::from(has_door)));
                queue.push_back(next);
            }
        }
    }
    visited
}

/// Minimum hop distance from a candidate to any already-selected room
///
/// Returns the `(hops, doors)` of the nearest selected room by hop count,
/// or `None` when no selected room is reachable.
fn distance_to_selected(
    edges: &[Vec<(usize, bool)>],
    candidate: usize,
    selected: &[usize],
) -> Option<(u32, u32)> {
    let distances = hop_distances(edges, candidate);
    selected
        .iter()
        .filter_map(|&room| distances.get(room).copied().flatten())
        .min()
}

/// Inclusion probability for a candidate at the given separation
fn inclusion_probability(separation: Option<(u32, u32)>) -> f64 {
    separation.map_or(1.0, |(hops, doors)| {
        let tier = if hops <= 1 {
            SPECIAL_TIER_ADJACENT
        } else if hops <= 2 {
            SPECIAL_TIER_NEAR
        } else if hops <= 3 {
            SPECIAL_TIER_MID
        } else {
            1.0
        };
        f64::from(doors)
            .mul_add(SPECIAL_DOOR_BONUS, tier)
            .min(1.0)
    })
}

/// Resolve the exploration start position
///
/// The stairs-up object wins; otherwise the first room's centroid (or its
/// nearest in-room tile when the centroid falls outside the room).
fn resolve_start(dungeon: &DungeonData) -> Option<[i32; 2]> {
    if let Some(stairs) = dungeon.stairs_up() {
        return Some([stairs.x, stairs.y]);
    }
    let first = dungeon.rooms.first()?;
    if first.contains(first.centroid) {
        return Some(first.centroid);
    }
    nearest_tile(first, first.centroid)
}

fn nearest_tile(room: &Room, to: [i32; 2]) -> Option<[i32; 2]> {
    room.tiles.iter().copied().min_by_key(|&pos| {
        let dx = i64::from(pos[0] - to[0]);
        let dy = i64::from(pos[1] - to[1]);
        dx * dx + dy * dy
    })
}

/// Per-room cost: centroid tile cost, else minimum cost over any tile
fn room_cost(room: &Room, cost_map: &CostMap) -> u32 {
    if let Some(cost) = cost_map.cost_at(room.centroid) {
        return cost;
    }
    room.tiles
        .iter()
        .filter_map(|&pos| cost_map.cost_at(pos))
        .min()
        .unwrap_or(UNREACHABLE_COST)
}

/// Run the full analysis pass over an assembled dungeon
///
/// A dungeon with no resolvable start (no stairs and zero rooms) yields
/// empty result sets rather than an error; callers check for emptiness.
pub fn analyze(dungeon: &DungeonData, rng: &mut RandomSource) -> DungeonAnalysis {
    let Some(start) = resolve_start(dungeon) else {
        return DungeonAnalysis {
            start: None,
            furthest_rooms: Vec::new(),
            room_routes: Vec::new(),
            cost_map: CostMap::unreachable(dungeon),
        };
    };

    let cost_map = compute_cost_map(dungeon, start);
    let edges = adjacency(dungeon);

    let start_room = dungeon
        .rooms
        .iter()
        .find(|room| room.contains(start))
        .map_or(0, |room| room.id);
    let from_start = hop_distances(&edges, start_room);

    let mut room_routes = Vec::with_capacity(dungeon.rooms.len());
    for room in &dungeon.rooms {
        let cost = room_cost(room, &cost_map);
        let doors = room
            .tiles
            .iter()
            .filter_map(|&pos| cost_map.route_counts_at(pos))
            .map(|(_, doors)| doors)
            .min()
            .unwrap_or(0);
        let hops = from_start
            .get(room.id)
            .copied()
            .flatten()
            .map_or(u32::MAX, |(hops, _)| hops);
        room_routes.push(RoomRoute {
            room_id: room.id,
            cost,
            hops,
            doors,
        });
    }

    let furthest_rooms = select_furthest(&room_routes, &edges, rng);

    DungeonAnalysis {
        start: Some(start),
        furthest_rooms,
        room_routes,
        cost_map,
    }
}

/// Anti-clustered furthest-room selection
fn select_furthest(
    room_routes: &[RoomRoute],
    edges: &[Vec<(usize, bool)>],
    rng: &mut RandomSource,
) -> Vec<FurthestRoom> {
    let mut candidates: Vec<&RoomRoute> = room_routes
        .iter()
        .filter(|route| route.cost != UNREACHABLE_COST)
        .collect();
    candidates.sort_by(|a, b| b.cost.cmp(&a.cost).then_with(|| a.room_id.cmp(&b.room_id)));

    let target_count = 1.max(room_routes.len() / FURTHEST_ROOM_DIVISOR);
    let mut selected_ids = Vec::new();
    let mut furthest = Vec::new();

    for route in candidates {
        if furthest.len() >= target_count {
            break;
        }
        let separation = distance_to_selected(edges, route.room_id, &selected_ids);
        let probability = inclusion_probability(separation);
        if rng.next_f64() < probability {
            furthest.push(FurthestRoom {
                room_id: route.room_id,
                rank: furthest.len(),
                cost: route.cost,
                is_target: true,
            });
            selected_ids.push(route.room_id);
        }
    }
    furthest
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::dungeon::{Connection, DungeonData};
    use std::collections::HashMap;

    fn room_block(id: usize, x0: i32, y0: i32, w: i32, h: i32) -> Room {
        let tiles = (0..w)
            .flat_map(|dx| (0..h).map(move |dy| [x0 + dx, y0 + dy]))
            .collect();
        Room::from_tiles(id, tiles)
    }

    /// A 4x5 lattice of 2x2 rooms, each directly touching its neighbors
    ///
    /// The central cell comes first so the analysis start (first room's
    /// centroid) sits mid-lattice and the far candidates spread to the
    /// corners.
    fn lattice_dungeon() -> DungeonData {
        let mut cells: Vec<(usize, usize)> = vec![(1, 2)];
        for gy in 0..5 {
            for gx in 0..4 {
                if (gx, gy) != (1, 2) {
                    cells.push((gx, gy));
                }
            }
        }

        let mut id_of = std::collections::HashMap::new();
        let mut rooms = Vec::new();
        for (id, &(gx, gy)) in cells.iter().enumerate() {
            id_of.insert((gx, gy), id);
            rooms.push(room_block(id, gx as i32 * 2, gy as i32 * 2, 2, 2));
        }

        let mut connections = Vec::new();
        for &(gx, gy) in &cells {
            for (nx, ny) in [(gx + 1, gy), (gx, gy + 1)] {
                let (Some(&a), Some(&b)) = (id_of.get(&(gx, gy)), id_of.get(&(nx, ny))) else {
                    continue;
                };
                connections.push(Connection {
                    room_a: a.min(b),
                    room_b: a.max(b),
                    via_corridor: None,
                });
            }
        }
        DungeonData {
            grid_width: 8,
            grid_height: 10,
            rooms,
            corridors: Vec::new(),
            connections,
            objects: Vec::new(),
            spine_tiles: Vec::new(),
            seed: 0,
        }
    }

    // Confirms the empty dungeon yields empty result sets, not a panic
    // Verified by resolving a start from an empty room list
    #[test]
    fn test_empty_dungeon_empty_results() {
        let dungeon = DungeonData {
            grid_width: 8,
            grid_height: 8,
            rooms: Vec::new(),
            corridors: Vec::new(),
            connections: Vec::new(),
            objects: Vec::new(),
            spine_tiles: Vec::new(),
            seed: 0,
        };
        let mut rng = RandomSource::new(1);
        let analysis = analyze(&dungeon, &mut rng);
        assert_eq!(analysis.start, None);
        assert!(analysis.furthest_rooms.is_empty());
        assert!(analysis.room_routes.is_empty());
    }

    // Confirms the 20-room lattice selects max(1, 20/5) special rooms
    // Verified by flooring the target count to zero
    #[test]
    fn test_lattice_selects_four() {
        let dungeon = lattice_dungeon();

        let trials = 50;
        let mut full_count = 0;
        for seed in 0..trials {
            let mut rng = RandomSource::new(seed);
            let analysis = analyze(&dungeon, &mut rng);
            assert!(!analysis.furthest_rooms.is_empty());
            assert!(analysis.furthest_rooms.len() <= 4);
            if analysis.furthest_rooms.len() == 4 {
                full_count += 1;
            }
            for (rank, room) in analysis.furthest_rooms.iter().enumerate() {
                assert_eq!(room.rank, rank);
                assert!(room.is_target);
            }
        }
        // Candidate exhaustion before the fourth pick is possible but rare
        assert!(full_count >= trials * 9 / 10, "only {full_count}/{trials} full sets");
    }

    // Confirms anti-clustering rarely selects hop-adjacent specials
    // Verified by inverting the tier table
    #[test]
    fn test_anti_clustering_statistics() {
        let dungeon = lattice_dungeon();
        let edges = adjacency(&dungeon);

        let trials = 200;
        let mut adjacent_trials = 0;
        for seed in 0..trials {
            let mut rng = RandomSource::new(seed);
            let analysis = analyze(&dungeon, &mut rng);
            let ids: Vec<usize> = analysis
                .furthest_rooms
                .iter()
                .map(|room| room.room_id)
                .collect();

            let mut has_adjacent_pair = false;
            for (i, &a) in ids.iter().enumerate() {
                let distances = hop_distances(&edges, a);
                for &b in ids.iter().skip(i + 1) {
                    if distances
                        .get(b)
                        .copied()
                        .flatten()
                        .is_some_and(|(h, _)| h <= 1)
                    {
                        has_adjacent_pair = true;
                    }
                }
            }
            if has_adjacent_pair {
                adjacent_trials += 1;
            }
        }
        // Selecting 1-hop neighbors is suppressed to a 0.10 draw, so only
        // a small share of seeds should ever produce an adjacent pair
        assert!(
            adjacent_trials * 100 / trials < 25,
            "{adjacent_trials}/{trials} trials had hop-adjacent specials"
        );
    }

    // Confirms analysis monotonicity: k room transitions with no doors
    // cost at least k
    // Verified by waiving the entry surcharge for corridor-free paths
    #[test]
    fn test_cost_monotonicity() {
        let dungeon = lattice_dungeon();
        let mut rng = RandomSource::new(3);
        let analysis = analyze(&dungeon, &mut rng);

        for route in &analysis.room_routes {
            if route.cost == UNREACHABLE_COST || route.hops == u32::MAX {
                continue;
            }
            assert!(
                route.cost >= route.hops,
                "room {} costs {} over {} hops",
                route.room_id,
                route.cost,
                route.hops
            );
        }
    }

    // Confirms a surcharge door on the connecting corridor tags the edge
    // Verified by tagging edges from any door in the dungeon
    #[test]
    fn test_edge_door_tags() {
        let mut dungeon = DungeonData {
            grid_width: 16,
            grid_height: 8,
            rooms: vec![room_block(0, 0, 0, 3, 3), room_block(1, 8, 0, 3, 3)],
            corridors: vec![crate::dungeon::Corridor {
                id: 0,
                tiles: (3..8).map(|x| [x, 1]).collect(),
                width: 1,
            }],
            connections: vec![Connection {
                room_a: 0,
                room_b: 1,
                via_corridor: Some(0),
            }],
            objects: Vec::new(),
            spine_tiles: Vec::new(),
            seed: 0,
        };

        let without = adjacency(&dungeon);
        assert_eq!(without.first().and_then(|e| e.first()), Some(&(1, false)));

        dungeon.objects.push(crate::dungeon::DungeonObject {
            kind: crate::dungeon::ObjectKind::DoorSecret,
            x: 5,
            y: 1,
            rotation: 0,
            properties: HashMap::new(),
        });
        let with = adjacency(&dungeon);
        assert_eq!(with.first().and_then(|e| e.first()), Some(&(1, true)));
    }
}
