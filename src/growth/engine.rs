//! Growth state machine and step driver
//!
//! `GrowthEngine` owns the grid, frontier and random source of a run and
//! advances them one growth event at a time. The three entry points
//! `step`, `run_steps` and `run_to_completion` are interchangeable: the
//! final grid for a fixed seed is identical however the run is chunked,
//! because chunk size never feeds the scoring or the random stream.

use crate::growth::frontier::Frontier;
use crate::growth::scoring::selection_weights;
use crate::growth::seeds::place_seeds;
use crate::growth::settings::{GenerationSettings, GrowthVariant};
use crate::growth::spine::BackboneWalk;
use crate::io::error::Result;
use crate::math::RandomSource;
use crate::spatial::{Direction, GridState};

/// Why a growth run stopped
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CompletionReason {
    /// The grown tile count reached the tile budget
    BudgetReached,
    /// The frontier emptied before the budget was spent
    ///
    /// A valid terminal state, reported rather than raised.
    FrontierExhausted,
}

/// Lifecycle of a growth run
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum GrowthPhase {
    /// Reset and ready; no step taken yet
    Idle,
    /// At least one step taken, budget and frontier both open
    Growing,
    /// Terminal; further steps are no-ops
    Complete(CompletionReason),
}

/// Result of driving the engine one step
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StepOutcome {
    /// One growth event happened (two tiles when mirrored)
    Grew,
    /// The run is complete; nothing was grown
    Complete(CompletionReason),
}

/// Deterministic growth driver for both generator variants
#[derive(Debug, Clone)]
pub struct GrowthEngine {
    settings: GenerationSettings,
    grid: GridState,
    frontier: Frontier,
    rng: RandomSource,
    phase: GrowthPhase,
    backbone: Option<BackboneWalk>,
    spine_tiles: Vec<[i32; 2]>,
}

impl GrowthEngine {
    /// Create an engine and reset it to the start of the run
    ///
    /// # Errors
    ///
    /// Returns a settings validation error; this is the only failure mode
    /// of the growth pipeline.
    pub fn new(settings: GenerationSettings) -> Result<Self> {
        settings.validate()?;
        let mut engine = Self {
            grid: GridState::new(settings.grid_width, settings.grid_height),
            frontier: Frontier::new(settings.grid_width, settings.grid_height),
            rng: RandomSource::new(settings.seed),
            phase: GrowthPhase::Idle,
            backbone: None,
            spine_tiles: Vec::new(),
            settings,
        };
        engine.reset();
        Ok(engine)
    }

    /// Reinitialize the RNG, grid and frontier from the settings
    ///
    /// A canceled-then-restarted run is indistinguishable from a fresh run
    /// with the same seed.
    pub fn reset(&mut self) {
        self.rng = RandomSource::new(self.settings.seed);
        self.grid = GridState::new(self.settings.grid_width, self.settings.grid_height);
        self.frontier = Frontier::new(self.settings.grid_width, self.settings.grid_height);
        self.spine_tiles.clear();
        self.phase = GrowthPhase::Idle;

        match self.settings.variant {
            GrowthVariant::Organic => {
                let seeds = place_seeds(&mut self.grid, &self.settings, &mut self.rng);
                for seed in seeds {
                    self.frontier.extend_around(&self.grid, seed);
                }
                self.backbone = None;
            }
            GrowthVariant::Spine(spine) => {
                self.backbone = Some(BackboneWalk::new(&self.settings, spine, &mut self.rng));
            }
        }
    }

    /// Current lifecycle phase
    pub const fn phase(&self) -> GrowthPhase {
        self.phase
    }

    /// The grid being grown
    pub const fn grid(&self) -> &GridState {
        &self.grid
    }

    /// Settings this engine was built from
    pub const fn settings(&self) -> &GenerationSettings {
        &self.settings
    }

    /// Backbone tiles grown by the spine variant, in growth order
    pub fn spine_tiles(&self) -> &[[i32; 2]] {
        &self.spine_tiles
    }

    /// Advance by exactly one growth event
    ///
    /// A mirrored event grows two tiles. Calling `step` on a complete run
    /// reports the completion reason without touching any state.
    pub fn step(&mut self) -> StepOutcome {
        match self.phase {
            GrowthPhase::Complete(reason) => return StepOutcome::Complete(reason),
            GrowthPhase::Idle => self.phase = GrowthPhase::Growing,
            GrowthPhase::Growing => {}
        }

        if self.grid.grown_count() >= self.settings.tile_budget {
            return self.complete(CompletionReason::BudgetReached);
        }

        if self.backbone.is_some() && self.backbone_step() {
            return self.after_growth();
        }

        self.organic_step()
    }

    /// Advance up to `n` growth events or until complete
    pub fn run_steps(&mut self, n: usize) -> GrowthPhase {
        for _ in 0..n {
            if let StepOutcome::Complete(_) = self.step() {
                break;
            }
            if matches!(self.phase, GrowthPhase::Complete(_)) {
                break;
            }
        }
        self.phase
    }

    /// Advance until the run completes and return why it stopped
    pub fn run_to_completion(&mut self) -> CompletionReason {
        loop {
            if let StepOutcome::Complete(reason) = self.step() {
                return reason;
            }
            if let GrowthPhase::Complete(reason) = self.phase {
                return reason;
            }
        }
    }

    fn complete(&mut self, reason: CompletionReason) -> StepOutcome {
        self.phase = GrowthPhase::Complete(reason);
        StepOutcome::Complete(reason)
    }

    fn after_growth(&mut self) -> StepOutcome {
        if self.grid.grown_count() >= self.settings.tile_budget {
            self.phase = GrowthPhase::Complete(CompletionReason::BudgetReached);
        }
        StepOutcome::Grew
    }

    /// Advance the backbone walk by one tile
    ///
    /// Returns whether a tile was grown. When the walk finishes, its
    /// attachment seeds are sown into the frontier for the blob stage and
    /// the caller falls through to organic growth within the same step.
    fn backbone_step(&mut self) -> bool {
        let Some(walk) = self.backbone.as_mut() else {
            return false;
        };

        if let Some(pos) = walk.step(&mut self.grid, &self.settings, &mut self.rng) {
            self.spine_tiles.push(pos);
            return true;
        }

        let seeds = walk.attachment_seeds();
        self.backbone = None;
        for seed in seeds {
            self.frontier.extend_around(&self.grid, seed);
        }
        false
    }

    /// One stochastic growth event from the frontier
    ///
    /// Candidates retired by strict symmetry do not count as growth; the
    /// loop keeps drawing until a tile grows or the frontier empties.
    fn organic_step(&mut self) -> StepOutcome {
        loop {
            if self.frontier.is_empty() {
                return self.complete(CompletionReason::FrontierExhausted);
            }

            let weights = selection_weights(&self.grid, &self.frontier, &self.settings);
            let slot = self.rng.weighted_choice(&weights);
            let Some(candidate) = self.frontier.take(slot) else {
                return self.complete(CompletionReason::FrontierExhausted);
            };
            if !self.grid.is_growable(candidate.position) {
                continue;
            }
            let entry = Direction::between(candidate.parent, candidate.position);

            let mirrored = self.settings.symmetry_chance > 0.0
                && self.rng.chance(self.settings.symmetry_chance);
            if !mirrored {
                self.claim(candidate.position, entry);
                return self.after_growth();
            }

            let mirror = self
                .grid
                .mirror_of(candidate.position, self.settings.symmetry_axis);
            if mirror == candidate.position {
                // On-axis tiles are their own mirror
                self.claim(candidate.position, entry);
                return self.after_growth();
            }

            let mirror_entry = entry.map(|dir| dir.mirrored(self.settings.symmetry_axis));
            if self.settings.symmetry_strict && !self.grid.is_growable(mirror) {
                // Atomic placement: neither tile grows and the candidate
                // is retired so it cannot be drawn again
                self.grid.kill(candidate.position);
                continue;
            }

            self.claim(candidate.position, entry);
            if self.grid.is_growable(mirror) && self.grid.grown_count() < self.settings.tile_budget
            {
                self.claim(mirror, mirror_entry);
            }
            return self.after_growth();
        }
    }

    /// Grow a tile and update the frontier around it
    fn claim(&mut self, pos: [i32; 2], entry: Option<Direction>) {
        self.frontier.discard_position(pos);
        self.grid.grow(pos, entry);
        self.frontier.extend_around(&self.grid, pos);
    }
}
