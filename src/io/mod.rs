//! Input/output operations: CLI, exports, progress and error handling

/// Command-line interface and batch generation driver
pub mod cli;
/// Generation constants and runtime configuration defaults
pub mod configuration;
/// Error types and the crate-wide `Result` alias
pub mod error;
/// PNG export of dungeon maps and cost heatmaps
pub mod image;
/// Multi-dungeon progress display
pub mod progress;
/// Growth replay GIF export
pub mod visualization;
