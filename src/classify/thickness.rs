//! Thickness-based interior classification
//!
//! For every grown tile, measures the largest grown-only square centered
//! on it. Tiles thicker than the corridor cutoff are room interior
//! candidates; connected candidates plus their immediate thin border form
//! rooms, and all remaining grown tiles stay corridors. More robust than
//! flood-fill when growth produces locally wide corridors that should
//! still read as corridors.

use ndarray::Array2;

use crate::classify::flood::{connected_components, segment_corridors};
use crate::dungeon::{Corridor, Room};
use crate::spatial::GridState;

/// 8-neighborhood offsets used to collect the thin border around interiors
///
/// Diagonals are included so block corners stay with their room instead of
/// shedding into single-tile corridor fragments.
const BORDER_OFFSETS: [[i32; 2]; 8] = [
    [-1, -1],
    [0, -1],
    [1, -1],
    [-1, 0],
    [1, 0],
    [-1, 1],
    [0, 1],
    [1, 1],
];

/// Side length of the largest grown square centered on a tile
///
/// Returns 0 for ungrown tiles; grown tiles measure at least 1. Sides are
/// always odd since the square is centered.
pub fn tile_thickness(grid: &GridState, pos: [i32; 2]) -> usize {
    if !grid.is_grown(pos) {
        return 0;
    }

    let limit = (grid.width().min(grid.height()) as i32) / 2;
    let mut radius = 0;
    'expand: while radius < limit {
        let next = radius + 1;
        for dx in -next..=next {
            for dy in -next..=next {
                if dx.abs() != next && dy.abs() != next {
                    continue;
                }
                if !grid.is_grown([pos[0] + dx, pos[1] + dy]) {
                    break 'expand;
                }
            }
        }
        radius = next;
    }
    (2 * radius + 1) as usize
}

/// Partition grown tiles by thickness
///
/// Tiles whose thickness exceeds `max_corridor_width` seed room
/// interiors; the rest of the grown set becomes corridor segments.
pub fn partition(grid: &GridState, max_corridor_width: usize) -> (Vec<Room>, Vec<Corridor>) {
    let grown = grid.grown_tiles();

    let mut interior = Vec::new();
    for &pos in &grown {
        if tile_thickness(grid, pos) > max_corridor_width {
            interior.push(pos);
        }
    }

    let interior_components = connected_components(&interior, grid.width(), grid.height());

    // Claim tracking so border tiles join exactly one room
    let mut claimed = Array2::<bool>::from_elem((grid.height(), grid.width()), false);
    for pos in &interior {
        if let Some(slot) = claim_slot(&mut claimed, pos) {
            *slot = true;
        }
    }

    let mut rooms = Vec::new();
    for component in interior_components {
        let mut tiles = component.clone();
        for &pos in &component {
            for [dx, dy] in BORDER_OFFSETS {
                let border = [pos[0] + dx, pos[1] + dy];
                if !grid.is_grown(border) {
                    continue;
                }
                let Some(slot) = claim_slot(&mut claimed, &border) else {
                    continue;
                };
                if !*slot {
                    *slot = true;
                    tiles.push(border);
                }
            }
        }
        rooms.push(Room::from_tiles(rooms.len(), tiles));
    }

    let mut corridor_pool = Vec::new();
    for &pos in &grown {
        let taken = claim_slot(&mut claimed, &pos).is_some_and(|slot| *slot);
        if !taken {
            corridor_pool.push(pos);
        }
    }

    let corridors = segment_corridors(grid, &corridor_pool);
    (rooms, corridors)
}

fn claim_slot<'a>(claimed: &'a mut Array2<bool>, pos: &[i32; 2]) -> Option<&'a mut bool> {
    let (height, width) = claimed.dim();
    if pos[0] < 0 || pos[1] < 0 || pos[0] as usize >= width || pos[1] as usize >= height {
        return None;
    }
    claimed.get_mut([pos[1] as usize, pos[0] as usize])
}

#[cfg(test)]
mod tests {
    use super::*;

    fn grid_with(tiles: &[[i32; 2]]) -> GridState {
        let mut grid = GridState::new(20, 20);
        for &pos in tiles {
            grid.grow(pos, None);
        }
        grid
    }

    fn block(x0: i32, y0: i32, w: i32, h: i32) -> Vec<[i32; 2]> {
        (0..w)
            .flat_map(|dx| (0..h).map(move |dy| [x0 + dx, y0 + dy]))
            .collect()
    }

    // Confirms thickness measures the largest centered odd square
    // Verified by measuring the inscribed rectangle instead
    #[test]
    fn test_tile_thickness() {
        let grid = grid_with(&block(2, 2, 5, 5));
        assert_eq!(tile_thickness(&grid, [4, 4]), 5);
        assert_eq!(tile_thickness(&grid, [3, 3]), 3);
        assert_eq!(tile_thickness(&grid, [2, 2]), 1);
        assert_eq!(tile_thickness(&grid, [0, 0]), 0);
    }

    // Confirms a wide blob joined by a thin passage splits into one room
    // plus a corridor instead of one oversized room
    // Verified by skipping the thickness cutoff and keeping one component
    #[test]
    fn test_blob_and_passage_split() {
        let mut tiles = block(2, 2, 5, 5);
        // 1-wide passage leaving the blob to the east
        tiles.extend([[7, 4], [8, 4], [9, 4], [10, 4]]);
        let grid = grid_with(&tiles);

        let (rooms, corridors) = partition(&grid, 2);
        assert_eq!(rooms.len(), 1);
        assert_eq!(corridors.len(), 1);

        let room = rooms.first();
        let corridor = corridors.first();
        // The 5x5 blob reads as room, the strip as corridor
        assert_eq!(room.map(Room::area), Some(25));
        assert_eq!(corridor.map(|c| c.tiles.len()), Some(4));
    }

    // Confirms a uniformly wide strip stays corridor under the cutoff
    // Verified by comparing thickness with >= instead of >
    #[test]
    fn test_wide_corridor_stays_corridor() {
        // 2-wide, 8-long strip never exceeds thickness 1
        let grid = grid_with(&block(2, 2, 8, 2));
        let (rooms, corridors) = partition(&grid, 2);
        assert!(rooms.is_empty());
        assert_eq!(corridors.len(), 1);
        assert_eq!(corridors.first().map(|c| c.tiles.len()), Some(16));
    }

    // Confirms border tiles join their interior's room exactly once
    // Verified by pushing borders without consulting the claim mask
    #[test]
    fn test_border_tiles_claimed_once() {
        let grid = grid_with(&block(2, 2, 5, 5));
        let (rooms, corridors) = partition(&grid, 2);
        assert_eq!(rooms.len(), 1);
        assert!(corridors.is_empty());

        let mut tiles: Vec<[i32; 2]> = rooms.iter().flat_map(|r| r.tiles.clone()).collect();
        tiles.sort_unstable();
        let before = tiles.len();
        tiles.dedup();
        assert_eq!(before, tiles.len());
        assert_eq!(before, 25);
    }
}
