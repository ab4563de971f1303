//! Frontier bookkeeping for growth candidates
//!
//! The frontier is the set of unvisited tiles adjacent to at least one
//! grown tile. Candidates are kept in insertion order with a bit mask for
//! O(1) membership tests; both together make the selection distribution a
//! pure function of grid state, independent of how the run is chunked.

use bitvec::prelude::{BitVec, bitvec};

use crate::spatial::{Direction, GridState};

/// A growable tile adjacent to the grown region
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Candidate {
    /// Position of the growable tile
    pub position: [i32; 2],
    /// The grown neighbor that first proposed this candidate
    ///
    /// Direction continuity is scored against this tile's heading.
    pub parent: [i32; 2],
}

/// Insertion-ordered candidate set with O(1) membership
#[derive(Debug, Clone)]
pub struct Frontier {
    candidates: Vec<Candidate>,
    membership: BitVec,
    width: usize,
    height: usize,
}

impl Frontier {
    /// Create an empty frontier for a grid of the given dimensions
    pub fn new(width: usize, height: usize) -> Self {
        Self {
            candidates: Vec::new(),
            membership: bitvec![0; width * height],
            width,
            height,
        }
    }

    /// Number of candidates
    pub const fn len(&self) -> usize {
        self.candidates.len()
    }

    /// Whether the frontier is exhausted
    pub const fn is_empty(&self) -> bool {
        self.candidates.is_empty()
    }

    /// Candidates in their current storage order
    pub fn candidates(&self) -> &[Candidate] {
        &self.candidates
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

    /// Whether a position is currently in the frontier
    pub fn contains(&self, pos: [i32; 2]) -> bool {
        self.bit_of(pos)
            .and_then(|bit| self.membership.get(bit).as_deref().copied())
            .unwrap_or(false)
    }

    /// Insert a candidate, ignoring duplicates and out-of-grid positions
    ///
    /// Returns whether the candidate was inserted. The first grown neighbor
    /// to propose a tile stays its parent; later proposals are dropped.
    pub fn push(&mut self, candidate: Candidate) -> bool {
        let Some(bit) = self.bit_of(candidate.position) else {
            return false;
        };
        if self.membership.get(bit).as_deref().copied().unwrap_or(false) {
            return false;
        }
        self.membership.set(bit, true);
        self.candidates.push(candidate);
        true
    }

    /// Remove and return the candidate at a storage slot
    ///
    /// Uses swap removal; slot order changes deterministically.
    pub fn take(&mut self, slot: usize) -> Option<Candidate> {
        if slot >= self.candidates.len() {
            return None;
        }
        let candidate = self.candidates.swap_remove(slot);
        if let Some(bit) = self.bit_of(candidate.position) {
            self.membership.set(bit, false);
        }
        Some(candidate)
    }

    /// Remove the candidate covering a position, if present
    ///
    /// Used when a tile leaves the growable set through mirroring or a
    /// strict-symmetry rejection rather than through selection.
    pub fn discard_position(&mut self, pos: [i32; 2]) -> bool {
        if !self.contains(pos) {
            return false;
        }
        let found = self
            .candidates
            .iter()
            .position(|candidate| candidate.position == pos);
        if let Some(slot) = found {
            self.take(slot);
            return true;
        }
        false
    }

    /// Propose the growable neighbors of a freshly grown tile
    ///
    /// Neighbors are visited in [`Direction::ALL`] order, which fixes
    /// parent assignment deterministically.
    pub fn extend_around(&mut self, grid: &GridState, grown: [i32; 2]) {
        for dir in Direction::ALL {
            let [dx, dy] = dir.offset();
            let neighbor = [grown[0] + dx, grown[1] + dy];
            if grid.is_growable(neighbor) {
                self.push(Candidate {
                    position: neighbor,
                    parent: grown,
                });
            }
        }
    }
}
