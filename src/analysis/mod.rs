//! Dungeon analysis over the assembled walk-graph
//!
//! Read-only consumers of [`DungeonData`](crate::dungeon::DungeonData):
//! a single-source Dijkstra pass with structural cost terms, and the
//! spatially-distributed furthest-room selection built on top of it.

/// Dijkstra cost maps with room-entry and door surcharges
pub mod costmap;
/// Room graph distances and furthest-room selection
pub mod rooms;

pub use costmap::{CostMap, UNREACHABLE_COST, WalkMask, compute_cost_map};
pub use rooms::{DungeonAnalysis, FurthestRoom, RoomRoute, analyze};
