//! Candidate scoring for frontier selection
//!
//! Each frontier candidate is scored from three structural terms: direction
//! continuity with its parent (rewarded), a turn away from the parent's
//! heading (penalized) and the number of grown neighbors it would acquire
//! beyond its parent (penalized, discouraging immediate branch points).
//! Raw scores are exponentiated by `gamma` before the weighted draw.

use crate::growth::frontier::{Candidate, Frontier};
use crate::growth::settings::GenerationSettings;
use crate::io::configuration::MIN_CANDIDATE_SCORE;
use crate::math::probability::sharpened_weights;
use crate::spatial::{Direction, GridState};

/// Raw structural score of a single candidate
///
/// Scores are floored at a small positive value so the selection total
/// stays positive even under heavy penalties.
pub fn candidate_score(
    grid: &GridState,
    candidate: &Candidate,
    settings: &GenerationSettings,
) -> f64 {
    let mut score = 1.0;

    if let Some(entry) = Direction::between(candidate.parent, candidate.position) {
        match grid.entry_direction_at(candidate.parent) {
            Some(heading) if heading == entry => score += settings.straight_bias,
            Some(_) => score -= settings.turn_penalty,
            // Seeds carry no heading; their neighbors score neutrally
            None => {}
        }
    }

    let extra_neighbors = grid.grown_neighbor_count(candidate.position).saturating_sub(1);
    score = (extra_neighbors as f64).mul_add(-settings.branch_penalty, score);

    score.max(MIN_CANDIDATE_SCORE)
}

/// Selection weights for every candidate in the frontier
///
/// Returns gamma-sharpened weights aligned with the frontier's storage
/// order, ready for a cumulative weighted draw.
pub fn selection_weights(
    grid: &GridState,
    frontier: &Frontier,
    settings: &GenerationSettings,
) -> Vec<f64> {
    let scores: Vec<f64> = frontier
        .candidates()
        .iter()
        .map(|candidate| candidate_score(grid, candidate, settings))
        .collect();
    sharpened_weights(&scores, settings.gamma)
}
