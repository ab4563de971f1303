//! Snapshot assembly from classified growth output
//!
//! The assembler is the single place where a `DungeonData` snapshot is
//! created: it marks the starter room, places objects and freezes
//! everything into the immutable value the analysis and visibility
//! systems consume.

use crate::classify::{Classification, ClassifierSettings, classify};
use crate::dungeon::data::{DungeonData, RoomClass};
use crate::dungeon::objects::place_objects;
use crate::growth::{GenerationSettings, GrowthEngine};
use crate::io::error::Result;
use crate::math::RandomSource;
use crate::spatial::GridState;

/// Merge classified output into an immutable dungeon snapshot
///
/// The room containing the lowest growth order becomes the starter room.
/// Object placement draws from `rng`, so assembly participates in the
/// seed-reproducibility contract of the whole pipeline.
pub fn assemble(
    grid: &GridState,
    classification: Classification,
    spine_tiles: &[[i32; 2]],
    seed: u64,
    rng: &mut RandomSource,
) -> DungeonData {
    let Classification {
        mut rooms,
        corridors,
        connections,
    } = classification;

    let starter = rooms
        .iter()
        .enumerate()
        .filter_map(|(index, room)| {
            room.tiles
                .iter()
                .map(|&pos| grid.growth_order_at(pos))
                .filter(|&order| order > 0)
                .min()
                .map(|order| (order, index))
        })
        .min()
        .map(|(_, index)| index);

    if let Some(slot) = starter.and_then(|index| rooms.get_mut(index)) {
        slot.class = RoomClass::Starter;
    }

    let objects = place_objects(&rooms, &corridors, starter, rng);

    DungeonData {
        grid_width: grid.width(),
        grid_height: grid.height(),
        rooms,
        corridors,
        connections,
        objects,
        spine_tiles: spine_tiles.to_vec(),
        seed,
    }
}

/// Run the full generation pipeline for a settings value
///
/// Grows to completion, classifies, and assembles in one call. Chunked
/// callers drive a [`GrowthEngine`] themselves and call [`assemble`]
/// when it completes; the result is identical either way.
///
/// # Errors
///
/// Returns a settings validation error; every later stage is total.
pub fn generate(
    settings: &GenerationSettings,
    classifier: &ClassifierSettings,
) -> Result<DungeonData> {
    let mut engine = GrowthEngine::new(settings.clone())?;
    engine.run_to_completion();

    let classification = classify(engine.grid(), classifier);
    let mut rng = RandomSource::new(settings.seed);
    Ok(assemble(
        engine.grid(),
        classification,
        engine.spine_tiles(),
        settings.seed,
        &mut rng,
    ))
}
