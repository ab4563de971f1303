//! Growth generators
//!
//! Deterministically grow a connected tile region from one or more seed
//! points up to a tile budget. Two variants share the frontier scoring
//! machinery: organic free-form blob growth, and a spine variant that walks
//! a backbone corridor first and grows room blobs from points along it.

/// Growth state machine and step driver
pub mod engine;
/// Frontier bookkeeping for growth candidates
pub mod frontier;
/// Candidate scoring from directional bias and branch pressure
pub mod scoring;
/// Seed placement strategies
pub mod seeds;
/// Generation settings and validation
pub mod settings;
/// Backbone walk for the spine variant
pub mod spine;

pub use engine::{CompletionReason, GrowthEngine, GrowthPhase, StepOutcome};
pub use settings::{GenerationSettings, GrowthVariant, SeedPlacement, SpineSettings};
