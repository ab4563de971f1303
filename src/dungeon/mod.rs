//! Dungeon data model and assembly
//!
//! Merges classified rooms, corridors, connections and placed objects into
//! one immutable [`DungeonData`] snapshot, produced once per generation
//! cycle and read-only thereafter.

/// Snapshot assembly from classified growth output
pub mod assembler;
/// Core dungeon data structures
pub mod data;
/// Seeded door, stairs and trap placement
pub mod objects;

pub use assembler::{assemble, generate};
pub use data::{Connection, Corridor, DungeonData, DungeonObject, ObjectKind, Room, RoomClass};
