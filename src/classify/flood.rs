//! Flood-fill component classification
//!
//! Labels 4-connected components of the grown tile set. A component large
//! enough becomes a room; everything else is folded into the corridor
//! network and re-segmented so corridor ids stay dense.

use std::collections::VecDeque;

use ndarray::Array2;

use crate::classify::thickness::tile_thickness;
use crate::dungeon::{Corridor, Room};
use crate::spatial::{Direction, GridState};

/// 4-connected components of an arbitrary tile set, in scan order
///
/// Component discovery order and the tile order inside each component are
/// both deterministic, which keeps downstream ids stable for a seed.
pub fn connected_components(
    tiles: &[[i32; 2]],
    width: usize,
    height: usize,
) -> Vec<Vec<[i32; 2]>> {
    let mut member = Array2::<bool>::from_elem((height, width), false);
    for pos in tiles {
        if let Some(slot) = index_of(pos, width, height).and_then(|index| member.get_mut(index)) {
            *slot = true;
        }
    }

    let mut visited = Array2::<bool>::from_elem((height, width), false);
    let mut components = Vec::new();

    for &start in tiles {
        let Some(start_index) = index_of(&start, width, height) else {
            continue;
        };
        if visited.get(start_index).copied().unwrap_or(true) {
            continue;
        }

        let mut component = Vec::new();
        let mut queue = VecDeque::new();
        queue.push_back(start);
        if let Some(slot) = visited.get_mut(start_index) {
            *slot = true;
        }

        while let Some(pos) = queue.pop_front() {
            component.push(pos);
            for dir in Direction::ALL {
                let [dx, dy] = dir.offset();
                let neighbor = [pos[0] + dx, pos[1] + dy];
                let Some(index) = index_of(&neighbor, width, height) else {
                    continue;
                };
                if member.get(index).copied().unwrap_or(false)
                    && !visited.get(index).copied().unwrap_or(true)
                {
                    if let Some(slot) = visited.get_mut(index) {
                        *slot = true;
                    }
                    queue.push_back(neighbor);
                }
            }
        }
        components.push(component);
    }

    components
}

/// Partition grown tiles by component size
///
/// Components with at least `min_room_area` tiles become rooms; smaller
/// components are folded into the corridor network.
pub fn partition(grid: &GridState, min_room_area: usize) -> (Vec<Room>, Vec<Corridor>) {
    let grown = grid.grown_tiles();
    let components = connected_components(&grown, grid.width(), grid.height());

    let mut rooms = Vec::new();
    let mut corridor_pool = Vec::new();
    for component in components {
        if component.len() >= min_room_area {
            rooms.push(Room::from_tiles(rooms.len(), component));
        } else {
            corridor_pool.extend(component);
        }
    }

    let corridors = segment_corridors(grid, &corridor_pool);
    (rooms, corridors)
}

/// Re-segment pooled corridor tiles into dense-id corridor segments
pub fn segment_corridors(grid: &GridState, pool: &[[i32; 2]]) -> Vec<Corridor> {
    connected_components(pool, grid.width(), grid.height())
        .into_iter()
        .enumerate()
        .map(|(id, tiles)| {
            let width = tiles
                .iter()
                .map(|&pos| tile_thickness(grid, pos))
                .max()
                .unwrap_or(1);
            Corridor { id, tiles, width }
        })
        .collect()
}

const fn index_of(pos: &[i32; 2], width: usize, height: usize) -> Option<[usize; 2]> {
    if pos[0] < 0 || pos[1] < 0 || pos[0] as usize >= width || pos[1] as usize >= height {
        return None;
    }
    Some([pos[1] as usize, pos[0] as usize])
}

#[cfg(test)]
mod tests {
    use super::*;

    fn grid_with(tiles: &[[i32; 2]]) -> GridState {
        let mut grid = GridState::new(16, 16);
        for &pos in tiles {
            grid.grow(pos, None);
        }
        grid
    }

    // Confirms diagonal contact does not join components
    // Verified by adding diagonal offsets to the BFS neighborhood
    #[test]
    fn test_components_are_4_connected() {
        let tiles = [[1, 1], [2, 1], [3, 2], [3, 3]];
        let components = connected_components(&tiles, 16, 16);
        assert_eq!(components.len(), 2);
    }

    // Confirms an empty grid classifies to empty lists, not an error
    // Verified by asserting on a sentinel room for empty input
    #[test]
    fn test_empty_grid_empty_output() {
        let grid = GridState::new(16, 16);
        let (rooms, corridors) = partition(&grid, 6);
        assert!(rooms.is_empty());
        assert!(corridors.is_empty());
    }

    // Confirms the area threshold separates rooms from corridor segments
    // Verified by folding large components into the corridor pool
    #[test]
    fn test_partition_by_area() {
        // A 3x3 block and a detached 3-tile strip
        let block: Vec<[i32; 2]> = (0..3)
            .flat_map(|x| (0..3).map(move |y| [x + 1, y + 1]))
            .collect();
        let strip = [[8, 8], [9, 8], [10, 8]];

        let mut tiles = block.clone();
        tiles.extend(strip);
        let grid = grid_with(&tiles);

        let (rooms, corridors) = partition(&grid, 6);
        assert_eq!(rooms.len(), 1);
        assert_eq!(rooms.first().map(Room::area), Some(9));
        assert_eq!(corridors.len(), 1);
        assert_eq!(corridors.first().map(|c| c.tiles.len()), Some(3));
        assert_eq!(corridors.first().map(|c| c.width), Some(1));
    }

    // Confirms room ids are dense and ordered by discovery
    // Verified by assigning component indices before thresholding
    #[test]
    fn test_room_ids_dense() {
        let first: Vec<[i32; 2]> = (0..3)
            .flat_map(|x| (0..2).map(move |y| [x, y]))
            .collect();
        let second: Vec<[i32; 2]> = (0..2)
            .flat_map(|x| (0..3).map(move |y| [x + 6, y + 6]))
            .collect();
        let lone = [[12, 12]];

        let mut tiles = first.clone();
        tiles.extend(&second);
        tiles.extend(lone);
        let grid = grid_with(&tiles);

        let (rooms, corridors) = partition(&grid, 6);
        assert_eq!(rooms.len(), 2);
        assert_eq!(rooms.iter().map(|r| r.id).collect::<Vec<_>>(), vec![0, 1]);
        assert_eq!(corridors.len(), 1);
    }
}
