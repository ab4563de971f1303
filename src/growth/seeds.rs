//! Seed placement strategies
//!
//! Seeds are the first grown tiles of a run and consume budget like any
//! other growth. Placement happens during `reset`, so a canceled and
//! restarted run replays the exact same seed draws.

use crate::growth::settings::{GenerationSettings, SeedPlacement};
use crate::io::configuration::SEED_PLACEMENT_ATTEMPTS;
use crate::math::RandomSource;
use crate::spatial::GridState;

/// Place all seeds for a run and return their positions in growth order
pub fn place_seeds(
    grid: &mut GridState,
    settings: &GenerationSettings,
    rng: &mut RandomSource,
) -> Vec<[i32; 2]> {
    match settings.seed_placement {
        SeedPlacement::Center => place_center(grid),
        SeedPlacement::Random => place_random(grid, settings, rng),
        SeedPlacement::SymmetricPairs => place_symmetric_pairs(grid, settings, rng),
    }
}

fn place_center(grid: &mut GridState) -> Vec<[i32; 2]> {
    let center = [grid.width() as i32 / 2, grid.height() as i32 / 2];
    grid.grow(center, None);
    vec![center]
}

fn place_random(
    grid: &mut GridState,
    settings: &GenerationSettings,
    rng: &mut RandomSource,
) -> Vec<[i32; 2]> {
    let mut placed = Vec::with_capacity(settings.seed_count);
    while placed.len() < settings.seed_count {
        let pos = sample_distant(grid, &placed, settings.min_seed_distance, rng);
        if grid.grow(pos, None) > 0 {
            placed.push(pos);
        } else {
            // The fallback draw landed on an occupied tile; grids tight
            // enough for that cannot honor the distance constraint anyway
            break;
        }
    }
    placed
}

fn place_symmetric_pairs(
    grid: &mut GridState,
    settings: &GenerationSettings,
    rng: &mut RandomSource,
) -> Vec<[i32; 2]> {
    let mut placed = Vec::with_capacity(settings.seed_count);
    while placed.len() < settings.seed_count {
        let pos = sample_distant(grid, &placed, settings.min_seed_distance, rng);
        if grid.grow(pos, None) == 0 {
            break;
        }
        placed.push(pos);

        if placed.len() == settings.seed_count {
            break;
        }
        let mirror = grid.mirror_of(pos, settings.symmetry_axis);
        if grid.grow(mirror, None) > 0 {
            placed.push(mirror);
        }
    }
    placed
}

/// Rejection-sample a position at least `min_distance` from every placed seed
///
/// Falls back to the final draw when the attempt limit is reached, so seed
/// placement always makes progress on crowded grids.
fn sample_distant(
    grid: &GridState,
    placed: &[[i32; 2]],
    min_distance: f64,
    rng: &mut RandomSource,
) -> [i32; 2] {
    let min_distance_sq = min_distance * min_distance;
    let mut pos = [0, 0];
    for _ in 0..SEED_PLACEMENT_ATTEMPTS {
        pos = [
            rng.index_below(grid.width()) as i32,
            rng.index_below(grid.height()) as i32,
        ];
        if !grid.is_growable(pos) {
            continue;
        }
        let clear = placed.iter().all(|&other| {
            let dx = f64::from(pos[0] - other[0]);
            let dy = f64::from(pos[1] - other[1]);
            dx.mul_add(dx, dy * dy) >= min_distance_sq
        });
        if clear {
            return pos;
        }
    }
    pos
}
