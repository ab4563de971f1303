//! Generation settings and their validation gate

use crate::io::configuration::{
    DEFAULT_BRANCH_PENALTY, DEFAULT_GAMMA, DEFAULT_GRID_HEIGHT, DEFAULT_GRID_WIDTH,
    DEFAULT_MIN_SEED_DISTANCE, DEFAULT_SEED, DEFAULT_SEED_COUNT, DEFAULT_SPINE_ATTACHMENT_SPACING,
    DEFAULT_SPINE_WIDTH, DEFAULT_STRAIGHT_BIAS, DEFAULT_TILE_BUDGET, DEFAULT_TURN_PENALTY,
};
use crate::io::error::{Result, invalid_settings};
use crate::spatial::SymmetryAxis;

/// Strategy for placing the initial growth seeds
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SeedPlacement {
    /// One seed at the grid center
    Center,
    /// Uniformly sampled seeds kept at least `min_seed_distance` apart
    Random,
    /// Seeds placed in mirrored pairs across the symmetry axis
    SymmetricPairs,
}

/// Parameters specific to the spine growth variant
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SpineSettings {
    /// Backbone corridor width in tiles
    pub width: usize,
    /// Backbone tiles between attachment seeds
    pub attachment_spacing: usize,
}

impl Default for SpineSettings {
    fn default() -> Self {
        Self {
            width: DEFAULT_SPINE_WIDTH,
            attachment_spacing: DEFAULT_SPINE_ATTACHMENT_SPACING,
        }
    }
}

/// Which growth algorithm a run uses
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum GrowthVariant {
    /// Free-form blob growth from the seeds
    Organic,
    /// Backbone corridor first, then room blobs attached along it
    Spine(SpineSettings),
}

/// The sole configuration surface of a generation run
///
/// Validated once up front; a settings value that passes [`validate`]
/// cannot make the pipeline fail mid-algorithm.
///
/// [`validate`]: GenerationSettings::validate
#[derive(Debug, Clone, PartialEq)]
pub struct GenerationSettings {
    /// Seed for the run's random source
    pub seed: u64,
    /// Grid width in tiles
    pub grid_width: usize,
    /// Grid height in tiles
    pub grid_height: usize,
    /// Maximum number of tiles the run may claim
    pub tile_budget: usize,
    /// Number of growth seeds to place
    pub seed_count: usize,
    /// Seed placement strategy
    pub seed_placement: SeedPlacement,
    /// Minimum pairwise Euclidean distance between random seeds
    pub min_seed_distance: f64,
    /// Sharpening exponent applied to candidate scores before selection
    pub gamma: f64,
    /// Reward for continuing the parent's growth direction
    pub straight_bias: f64,
    /// Penalty for turning away from the parent's heading
    pub turn_penalty: f64,
    /// Penalty per extra grown neighbor a candidate would acquire
    pub branch_penalty: f64,
    /// Probability that a growth event is mirrored, in `[0, 1]`
    pub symmetry_chance: f64,
    /// Axis mirrored growth reflects across
    pub symmetry_axis: SymmetryAxis,
    /// Whether mirrored placement is atomic (both tiles or neither)
    pub symmetry_strict: bool,
    /// Growth algorithm variant
    pub variant: GrowthVariant,
}

impl Default for GenerationSettings {
    fn default() -> Self {
        Self {
            seed: DEFAULT_SEED,
            grid_width: DEFAULT_GRID_WIDTH,
            grid_height: DEFAULT_GRID_HEIGHT,
            tile_budget: DEFAULT_TILE_BUDGET,
            seed_count: DEFAULT_SEED_COUNT,
            seed_placement: SeedPlacement::Center,
            min_seed_distance: DEFAULT_MIN_SEED_DISTANCE,
            gamma: DEFAULT_GAMMA,
            straight_bias: DEFAULT_STRAIGHT_BIAS,
            turn_penalty: DEFAULT_TURN_PENALTY,
            branch_penalty: DEFAULT_BRANCH_PENALTY,
            symmetry_chance: 0.0,
            symmetry_axis: SymmetryAxis::Vertical,
            symmetry_strict: false,
            variant: GrowthVariant::Organic,
        }
    }
}

impl GenerationSettings {
    /// Organic settings with the given seed, grid size and budget
    pub fn organic(seed: u64, grid_width: usize, grid_height: usize, tile_budget: usize) -> Self {
        Self {
            seed,
            grid_width,
            grid_height,
            tile_budget,
            ..Self::default()
        }
    }

    /// Spine settings with the given seed, grid size and budget
    pub fn spine(
        seed: u64,
        grid_width: usize,
        grid_height: usize,
        tile_budget: usize,
        spine: SpineSettings,
    ) -> Self {
        Self {
            variant: GrowthVariant::Spine(spine),
            ..Self::organic(seed, grid_width, grid_height, tile_budget)
        }
    }

    /// Total tile capacity of the configured grid
    pub const fn grid_area(&self) -> usize {
        self.grid_width * self.grid_height
    }

    /// Validate every field, rejecting malformed settings with a typed error
    ///
    /// # Errors
    ///
    /// Returns [`GenerationError::InvalidSettings`] naming the first field
    /// that fails validation.
    ///
    /// [`GenerationError::InvalidSettings`]: crate::io::error::GenerationError::InvalidSettings
    pub fn validate(&self) -> Result<()> {
        if self.grid_width == 0 {
            return Err(invalid_settings(
                "grid_width",
                &self.grid_width,
                &"grid dimensions must be positive",
            ));
        }
        if self.grid_height == 0 {
            return Err(invalid_settings(
                "grid_height",
                &self.grid_height,
                &"grid dimensions must be positive",
            ));
        }
        if self.tile_budget == 0 {
            return Err(invalid_settings(
                "tile_budget",
                &self.tile_budget,
                &"budget must allow at least one tile",
            ));
        }
        if self.tile_budget > self.grid_area() {
            return Err(invalid_settings(
                "tile_budget",
                &self.tile_budget,
                &format!("exceeds grid area {}", self.grid_area()),
            ));
        }
        if self.seed_count == 0 {
            return Err(invalid_settings(
                "seed_count",
                &self.seed_count,
                &"at least one seed is required",
            ));
        }
        if self.seed_count > self.tile_budget {
            return Err(invalid_settings(
                "seed_count",
                &self.seed_count,
                &format!("exceeds tile budget {}", self.tile_budget),
            ));
        }
        if !self.min_seed_distance.is_finite() || self.min_seed_distance < 0.0 {
            return Err(invalid_settings(
                "min_seed_distance",
                &self.min_seed_distance,
                &"must be finite and non-negative",
            ));
        }
        if !self.gamma.is_finite() || self.gamma <= 0.0 {
            return Err(invalid_settings(
                "gamma",
                &self.gamma,
                &"sharpening exponent must be finite and positive",
            ));
        }
        for (field, value) in [
            ("straight_bias", self.straight_bias),
            ("turn_penalty", self.turn_penalty),
            ("branch_penalty", self.branch_penalty),
        ] {
            if !value.is_finite() || value < 0.0 {
                return Err(invalid_settings(
                    field,
                    &value,
                    &"scoring terms must be finite and non-negative",
                ));
            }
        }
        if !(0.0..=1.0).contains(&self.symmetry_chance) {
            return Err(invalid_settings(
                "symmetry_chance",
                &self.symmetry_chance,
                &"must lie in [0, 1]",
            ));
        }
        if let GrowthVariant::Spine(spine) = self.variant {
            if spine.width == 0 {
                return Err(invalid_settings(
                    "spine.width",
                    &spine.width,
                    &"backbone width must be positive",
                ));
            }
            if spine.width > self.grid_width.min(self.grid_height) {
                return Err(invalid_settings(
                    "spine.width",
                    &spine.width,
                    &"backbone width exceeds the grid",
                ));
            }
            if spine.attachment_spacing == 0 {
                return Err(invalid_settings(
                    "spine.attachment_spacing",
                    &spine.attachment_spacing,
                    &"attachment spacing must be positive",
                ));
            }
        }
        Ok(())
    }
}
