//! Field-of-view computation
//!
//! Recursive shadowcasting over a walkable-tile predicate, invoked per
//! player move. Independent of generation and analysis; the only state it
//! owns is the per-session [`VisionGrid`].

/// Recursive shadowcasting over the 8 octants
pub mod shadowcast;
/// Per-session vision state grid
pub mod vision;

pub use shadowcast::cast_light;
pub use vision::{VisionGrid, VisionState};
