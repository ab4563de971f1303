//! Room/corridor classification
//!
//! The growth algorithms do not tag semantic role, so the grown tile set
//! is partitioned after the fact. Two algorithms are available: plain
//! flood-fill component labeling, and a thickness transform that is more
//! robust to growth producing locally wide corridors.

/// Room connection discovery
pub mod connections;
/// Flood-fill component classification
pub mod flood;
/// Thickness-based interior classification
pub mod thickness;

use crate::dungeon::{Connection, Corridor, Room};
use crate::io::configuration::{DEFAULT_MAX_CORRIDOR_WIDTH, DEFAULT_MIN_ROOM_AREA};
use crate::spatial::GridState;

/// Which partitioning algorithm to run
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ClassifierMode {
    /// Connected components thresholded by area
    FloodFill,
    /// Largest-contained-square transform with corridor cutoff
    Thickness,
}

/// Classifier parameters
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ClassifierSettings {
    /// Partitioning algorithm
    pub mode: ClassifierMode,
    /// Minimum component area for a flood-fill room
    pub min_room_area: usize,
    /// Widest square side still treated as corridor by thickness mode
    pub max_corridor_width: usize,
}

impl Default for ClassifierSettings {
    fn default() -> Self {
        Self {
            mode: ClassifierMode::Thickness,
            min_room_area: DEFAULT_MIN_ROOM_AREA,
            max_corridor_width: DEFAULT_MAX_CORRIDOR_WIDTH,
        }
    }
}

/// Classified output of a growth run
///
/// An empty grid classifies to empty lists; that is a valid result, not
/// an error.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct Classification {
    /// Rooms with disjoint tile sets
    pub rooms: Vec<Room>,
    /// Corridor segments covering the remaining grown tiles
    pub corridors: Vec<Corridor>,
    /// Room adjacencies found via corridors or direct contact
    pub connections: Vec<Connection>,
}

/// Partition the grown tile set into rooms, corridors and connections
pub fn classify(grid: &GridState, settings: &ClassifierSettings) -> Classification {
    let (rooms, corridors) = match settings.mode {
        ClassifierMode::FloodFill => flood::partition(grid, settings.min_room_area),
        ClassifierMode::Thickness => thickness::partition(grid, settings.max_corridor_width),
    };
    let connections =
        connections::find_connections(&rooms, &corridors, grid.width(), grid.height());
    Classification {
        rooms,
        corridors,
        connections,
    }
}
