//! Per-session vision state grid
//!
//! Tracks each tile through `unexplored → explored → visible` as a flat
//! array. The previous frame's visible set is kept separately so the
//! downgrade pass touches only those tiles instead of rescanning the
//! whole grid.

use crate::visibility::shadowcast::cast_light;

/// Visibility state of a single tile
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum VisionState {
    /// Never seen
    #[default]
    Unexplored,
    /// Seen before, not currently lit
    Explored,
    /// Currently lit
    Visible,
}

/// Flat per-tile vision states for one exploration session
///
/// Created once per session and mutated only through
/// [`compute_visibility`](VisionGrid::compute_visibility).
#[derive(Debug, Clone)]
pub struct VisionGrid {
    states: Vec<VisionState>,
    width: usize,
    height: usize,
    /// Flat indices of the tiles visible in the current frame
    visible: Vec<usize>,
}

impl VisionGrid {
    /// Create an all-unexplored grid
    pub fn new(width: usize, height: usize) -> Self {
        Self {
            states: vec![VisionState::Unexplored; width * height],
            width,
            height,
            visible: Vec::new(),
        }
    }

    /// Grid width in tiles
    pub const fn width(&self) -> usize {
        self.width
    }

    /// Grid height in tiles
    pub const fn height(&self) -> usize {
        self.height
    }

    const fn index_of(&self, x: i32, y: i32) -> Option<usize> {
        if x < 0 || y < 0 || x as usize >= self.width || y as usize >= self.height {
            return None;
        }
        Some(y as usize * self.width + x as usize)
    }

    /// State of a tile; out-of-bounds reads as unexplored
    pub fn state_at(&self, x: i32, y: i32) -> VisionState {
        self.index_of(x, y)
            .and_then(|index| self.states.get(index).copied())
            .unwrap_or(VisionState::Unexplored)
    }

    /// Number of tiles visible in the current frame
    pub const fn visible_count(&self) -> usize {
        self.visible.len()
    }

    /// Positions visible in the current frame, in mark order
    pub fn visible_tiles(&self) -> Vec<[i32; 2]> {
        self.visible
            .iter()
            .map(|&index| [(index % self.width) as i32, (index / self.width) as i32])
            .collect()
    }

    fn mark_visible(&mut self, x: i32, y: i32) {
        let Some(index) = self.index_of(x, y) else {
            return;
        };
        let Some(state) = self.states.get_mut(index) else {
            return;
        };
        if *state != VisionState::Visible {
            *state = VisionState::Visible;
            self.visible.push(index);
        }
    }

    /// Recompute the visible set for an observer
    ///
    /// Downgrades last frame's visible tiles to explored (never back to
    /// unexplored), then shadowcasts from the origin. Origins or radii
    /// reaching outside the grid are safe: out-of-grid tiles are simply
    /// never marked, and `blocks_sight` decides opacity everywhere else.
    /// Recomputing with identical inputs yields an identical visible set.
    pub fn compute_visibility<B>(&mut self, origin_x: i32, origin_y: i32, radius: u32, blocks_sight: B)
    where
        B: Fn(i32, i32) -> bool,
    {
        for index in std::mem::take(&mut self.visible) {
            if let Some(state) = self.states.get_mut(index) {
                *state = VisionState::Explored;
            }
        }

        self.mark_visible(origin_x, origin_y);

        let mut lit = Vec::new();
        cast_light([origin_x, origin_y], radius, &blocks_sight, &mut |x, y| {
            lit.push([x, y]);
        });
        for [x, y] in lit {
            self.mark_visible(x, y);
        }
    }
}
