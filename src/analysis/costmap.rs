//! Dijkstra cost maps over the walk-graph
//!
//! Every room, corridor and spine tile is a walkable node. Moving to an
//! orthogonal neighbor costs 1, entering a different room adds the room
//! entry surcharge, and crossing a surcharge door adds its toll. The pass
//! simultaneously tracks, per tile, how many distinct-room transitions and
//! surcharge-door crossings its shortest path took.

use std::cmp::{Ordering, Reverse};
use std::collections::BinaryHeap;

use bitvec::prelude::{BitVec, bitvec};
use ndarray::Array2;

use crate::dungeon::DungeonData;
use crate::io::configuration::ROOM_ENTRY_COST;
use crate::spatial::Direction;

/// Cost marker for tiles the start cannot reach
pub const UNREACHABLE_COST: u32 = u32::MAX;

/// Bit mask over the grid marking walkable tiles
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct WalkMask {
    bits: BitVec,
    width: usize,
    height: usize,
}

impl WalkMask {
    fn new(width: usize, height: usize) -> Self {
        Self {
            bits: bitvec![0; width * height],
            width,
            height,
        }
    }

    const fn bit_of(&self, pos: [i32; 2]) -> Option<usize> {
        if pos[0] < 0
            || pos[1] < 0
            || pos[0] as usize >= self.width
            || pos[1] as usize >= self.height
        {
            return None;
        }
        Some(pos[1] as usize * self.width + pos[0] as usize)
    }

    fn insert(&mut self, pos: [i32; 2]) {
        if let Some(bit) = self.bit_of(pos) {
            self.bits.set(bit, true);
        }
    }

    /// Whether a position is walkable
    pub fn contains(&self, pos: [i32; 2]) -> bool {
        self.bit_of(pos)
            .and_then(|bit| self.bits.get(bit).as_deref().copied())
            .unwrap_or(false)
    }

    /// Number of walkable tiles
    pub fn count(&self) -> usize {
        self.bits.count_ones()
    }

    /// Walkable positions in scan order
    pub fn to_vec(&self) -> Vec<[i32; 2]> {
        self.bits
            .iter_ones()
            .map(|bit| [(bit % self.width) as i32, (bit / self.width) as i32])
            .collect()
    }
}

/// Per-tile output of the Dijkstra pass
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CostMap {
    /// Accumulated movement cost per tile; [`UNREACHABLE_COST`] when unreached
    pub costs: Array2<u32>,
    /// Distinct-room transitions on each tile's shortest path
    pub room_transitions: Array2<u32>,
    /// Surcharge-door crossings on each tile's shortest path
    pub door_crossings: Array2<u32>,
    /// The walkable tile set the pass ran over
    pub walkable: WalkMask,
}

impl CostMap {
    /// All-unreachable map for dungeons with no resolvable start
    pub fn unreachable(dungeon: &DungeonData) -> Self {
        Self {
            costs: Array2::from_elem(
                (dungeon.grid_height, dungeon.grid_width),
                UNREACHABLE_COST,
            ),
            room_transitions: Array2::zeros((dungeon.grid_height, dungeon.grid_width)),
            door_crossings: Array2::zeros((dungeon.grid_height, dungeon.grid_width)),
            walkable: walk_mask(dungeon),
        }
    }

    fn index_of(&self, pos: [i32; 2]) -> Option<[usize; 2]> {
        let (height, width) = self.costs.dim();
        if pos[0] < 0 || pos[1] < 0 || pos[0] as usize >= width || pos[1] as usize >= height {
            return None;
        }
        Some([pos[1] as usize, pos[0] as usize])
    }

    /// Cost at a position; `None` when unreachable or out of bounds
    pub fn cost_at(&self, pos: [i32; 2]) -> Option<u32> {
        self.index_of(pos)
            .and_then(|index| self.costs.get(index).copied())
            .filter(|&cost| cost != UNREACHABLE_COST)
    }

    /// Room transitions and door crossings at a reachable position
    pub fn route_counts_at(&self, pos: [i32; 2]) -> Option<(u32, u32)> {
        self.cost_at(pos)?;
        let index = self.index_of(pos)?;
        let transitions = self.room_transitions.get(index).copied()?;
        let doors = self.door_crossings.get(index).copied()?;
        Some((transitions, doors))
    }
}

/// Heap entry ordered by cost, tie-broken on the flat tile index
///
/// The index tie-break keeps pop order total, so equal-cost frontiers
/// expand identically on every run.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
struct HeapNode {
    cost: u32,
    tile: usize,
}

impl Ord for HeapNode {
    fn cmp(&self, other: &Self) -> Ordering {
        self.cost
            .cmp(&other.cost)
            .then_with(|| self.tile.cmp(&other.tile))
    }
}

impl PartialOrd for HeapNode {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

/// Walkable mask of a dungeon: room, corridor and spine tiles
pub fn walk_mask(dungeon: &DungeonData) -> WalkMask {
    let mut mask = WalkMask::new(dungeon.grid_width, dungeon.grid_height);
    for room in &dungeon.rooms {
        for &pos in &room.tiles {
            mask.insert(pos);
        }
    }
    for corridor in &dungeon.corridors {
        for &pos in &corridor.tiles {
            mask.insert(pos);
        }
    }
    for &pos in &dungeon.spine_tiles {
        mask.insert(pos);
    }
    mask
}

/// Per-tile room id map; -1 for corridor and spine tiles
fn room_label_map(dungeon: &DungeonData) -> Array2<i64> {
    let mut labels = Array2::from_elem((dungeon.grid_height, dungeon.grid_width), -1_i64);
    for room in &dungeon.rooms {
        for &pos in &room.tiles {
            if pos[0] < 0
                || pos[1] < 0
                || pos[0] as usize >= dungeon.grid_width
                || pos[1] as usize >= dungeon.grid_height
            {
                continue;
            }
            if let Some(slot) = labels.get_mut([pos[1] as usize, pos[0] as usize]) {
                *slot = room.id as i64;
            }
        }
    }
    labels
}

/// Per-tile door surcharge map from placed door objects
fn door_surcharge_map(dungeon: &DungeonData) -> Array2<u32> {
    let mut surcharges = Array2::zeros((dungeon.grid_height, dungeon.grid_width));
    for object in &dungeon.objects {
        let toll = object.kind.door_surcharge();
        if toll == 0 {
            continue;
        }
        if object.x < 0
            || object.y < 0
            || object.x as usize >= dungeon.grid_width
            || object.y as usize >= dungeon.grid_height
        {
            continue;
        }
        if let Some(slot) = surcharges.get_mut([object.y as usize, object.x as usize]) {
            *slot = toll;
        }
    }
    surcharges
}

/// Single-source Dijkstra over the dungeon walk-graph
///
/// An unwalkable start yields the all-unreachable map rather than an
/// error; callers check for emptiness.
pub fn compute_cost_map(dungeon: &DungeonData, start: [i32; 2]) -> CostMap {
    let mut map = CostMap::unreachable(dungeon);
    if !map.walkable.contains(start) {
        return map;
    }

    let room_labels = room_label_map(dungeon);
    let surcharges = door_surcharge_map(dungeon);
    let width = dungeon.grid_width;

    let flat = |pos: [i32; 2]| -> usize { pos[1] as usize * width + pos[0] as usize };
    let unflat = |tile: usize| -> [i32; 2] { [(tile % width) as i32, (tile / width) as i32] };

    if let Some(slot) = map.index_of(start).and_then(|index| map.costs.get_mut(index)) {
        *slot = 0;
    }

    let mut heap = BinaryHeap::new();
    heap.push(Reverse(HeapNode {
        cost: 0,
        tile: flat(start),
    }));

    while let Some(Reverse(node)) = heap.pop() {
        let pos = unflat(node.tile);
        let Some(index) = map.index_of(pos) else {
            continue;
        };
        let settled = map.costs.get(index).copied().unwrap_or(UNREACHABLE_COST);
        if node.cost > settled {
            continue;
        }

        let here_room = room_labels.get(index).copied().unwrap_or(-1);
        let here_transitions = map.room_transitions.get(index).copied().unwrap_or(0);
        let here_doors = map.door_crossings.get(index).copied().unwrap_or(0);

        for dir in Direction::ALL {
            let [dx, dy] = dir.offset();
            let next = [pos[0] + dx, pos[1] + dy];
            if !map.walkable.contains(next) {
                continue;
            }
            let Some(next_index) = map.index_of(next) else {
                continue;
            };

            let next_room = room_labels.get(next_index).copied().unwrap_or(-1);
            let enters_room = next_room >= 0 && next_room != here_room;
            let toll = surcharges.get(next_index).copied().unwrap_or(0);

            let mut step = 1;
            if enters_room {
                step += ROOM_ENTRY_COST;
            }
            step += toll;

            let next_cost = node.cost + step;
            let known = map
                .costs
                .get(next_index)
                .copied()
                .unwrap_or(UNREACHABLE_COST);
            if next_cost < known {
                if let Some(slot) = map.costs.get_mut(next_index) {
                    *slot = next_cost;
                }
                if let Some(slot) = map.room_transitions.get_mut(next_index) {
                    *slot = here_transitions + u32::from(enters_room);
                }
                if let Some(slot) = map.door_crossings.get_mut(next_index) {
                    *slot = here_doors + u32::from(toll > 0);
                }
                heap.push(Reverse(HeapNode {
                    cost: next_cost,
                    tile: flat(next),
                }));
            }
        }
    }

    map
}
