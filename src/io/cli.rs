//! Command-line interface for batch dungeon generation
//!
//! Maps flags onto `GenerationSettings`, drives growth in cooperative
//! chunks (a scheduling knob only, invisible in the output), and exports
//! the PNG map plus optional analysis heatmap and growth replay GIF per
//! generated dungeon.

use crate::analysis::{UNREACHABLE_COST, analyze};
use crate::classify::{ClassifierMode, ClassifierSettings, classify};
use crate::dungeon::assemble;
use crate::growth::{
    GenerationSettings, GrowthEngine, GrowthPhase, GrowthVariant, SeedPlacement, SpineSettings,
};
use crate::io::configuration::{
    DEFAULT_BRANCH_PENALTY, DEFAULT_GAMMA, DEFAULT_GRID_HEIGHT, DEFAULT_GRID_WIDTH,
    DEFAULT_MIN_SEED_DISTANCE, DEFAULT_SEED, DEFAULT_SEED_COUNT, DEFAULT_STRAIGHT_BIAS,
    DEFAULT_TILE_BUDGET, DEFAULT_TURN_PENALTY, GENERATION_CHUNK_SIZE, GIF_FRAME_DELAY_MS,
};
use crate::io::error::{GenerationError, Result};
use crate::io::image::{export_cost_heatmap, export_dungeon_map};
use crate::io::progress::ProgressManager;
use crate::io::visualization::GrowthReplay;
use crate::math::RandomSource;
use crate::spatial::SymmetryAxis;
use clap::{Parser, ValueEnum};
use std::path::PathBuf;

/// Growth variant selector
#[derive(Clone, Copy, Debug, PartialEq, Eq, ValueEnum)]
pub enum VariantArg {
    /// Free-form blob growth
    Organic,
    /// Backbone corridor with attached rooms
    Spine,
}

/// Classifier algorithm selector
#[derive(Clone, Copy, Debug, PartialEq, Eq, ValueEnum)]
pub enum ClassifierArg {
    /// Connected components thresholded by area
    Flood,
    /// Largest-contained-square transform
    Thickness,
}

/// Seed placement selector
#[derive(Clone, Copy, Debug, PartialEq, Eq, ValueEnum)]
pub enum PlacementArg {
    /// One seed at the grid center
    Center,
    /// Distance-constrained random seeds
    Random,
    /// Mirrored seed pairs
    Pairs,
}

/// Symmetry axis selector
#[derive(Clone, Copy, Debug, PartialEq, Eq, ValueEnum)]
pub enum AxisArg {
    /// Mirror left/right
    Vertical,
    /// Mirror top/bottom
    Horizontal,
}

#[derive(Parser)]
#[command(name = "dungrow")]
#[command(
    author,
    version,
    about = "Generate dungeon layouts with seeded organic growth"
)]
/// Command-line arguments for the dungeon generation tool
// CLI tools commonly need multiple boolean flags for various features and user preferences
#[allow(clippy::struct_excessive_bools)]
pub struct Cli {
    /// Base random seed; batch runs use consecutive seeds from here
    #[arg(short, long, default_value_t = DEFAULT_SEED)]
    pub seed: u64,

    /// Number of dungeons to generate
    #[arg(short = 'n', long, default_value_t = 1)]
    pub count: usize,

    /// Grid width in tiles
    #[arg(long, default_value_t = DEFAULT_GRID_WIDTH)]
    pub width: usize,

    /// Grid height in tiles
    #[arg(long, default_value_t = DEFAULT_GRID_HEIGHT)]
    pub height: usize,

    /// Maximum number of tiles to grow
    #[arg(short = 'b', long, default_value_t = DEFAULT_TILE_BUDGET)]
    pub budget: usize,

    /// Growth variant
    #[arg(long, value_enum, default_value = "organic")]
    pub variant: VariantArg,

    /// Classifier algorithm
    #[arg(long, value_enum, default_value = "thickness")]
    pub classifier: ClassifierArg,

    /// Number of growth seeds
    #[arg(long, default_value_t = DEFAULT_SEED_COUNT)]
    pub seeds: usize,

    /// Seed placement strategy
    #[arg(long, value_enum, default_value = "center")]
    pub placement: PlacementArg,

    /// Score sharpening exponent; above 1 favors linear corridors
    #[arg(short, long, default_value_t = DEFAULT_GAMMA)]
    pub gamma: f64,

    /// Reward for continuing straight growth
    #[arg(long, default_value_t = DEFAULT_STRAIGHT_BIAS)]
    pub straight_bias: f64,

    /// Penalty for turning away from the growth direction
    #[arg(long, default_value_t = DEFAULT_TURN_PENALTY)]
    pub turn_penalty: f64,

    /// Penalty per extra grown neighbor
    #[arg(long, default_value_t = DEFAULT_BRANCH_PENALTY)]
    pub branch_penalty: f64,

    /// Chance of mirroring each growth event, in [0, 1]
    #[arg(long, default_value_t = 0.0)]
    pub symmetry: f64,

    /// Axis mirrored growth reflects across
    #[arg(long, value_enum, default_value = "vertical")]
    pub axis: AxisArg,

    /// Mirrored placement is atomic: both tiles grow or neither does
    #[arg(long)]
    pub strict_symmetry: bool,

    /// Output directory for generated files
    #[arg(short, long, default_value = ".")]
    pub output: PathBuf,

    /// Export a growth replay GIF per dungeon
    #[arg(short, long)]
    pub visualize: bool,

    /// Run dungeon analysis and export a cost heatmap per dungeon
    #[arg(short, long)]
    pub analyze: bool,

    /// Suppress progress and summary output
    #[arg(short, long)]
    pub quiet: bool,
}

impl Cli {
    /// Check if progress should be displayed
    pub const fn should_show_progress(&self) -> bool {
        !self.quiet
    }

    /// Settings for one dungeon of the batch
    pub fn settings_for(&self, seed: u64) -> GenerationSettings {
        GenerationSettings {
            seed,
            grid_width: self.width,
            grid_height: self.height,
            tile_budget: self.budget,
            seed_count: self.seeds,
            seed_placement: match self.placement {
                PlacementArg::Center => SeedPlacement::Center,
                PlacementArg::Random => SeedPlacement::Random,
                PlacementArg::Pairs => SeedPlacement::SymmetricPairs,
            },
            min_seed_distance: DEFAULT_MIN_SEED_DISTANCE,
            gamma: self.gamma,
            straight_bias: self.straight_bias,
            turn_penalty: self.turn_penalty,
            branch_penalty: self.branch_penalty,
            symmetry_chance: self.symmetry,
            symmetry_axis: match self.axis {
                AxisArg::Vertical => SymmetryAxis::Vertical,
                AxisArg::Horizontal => SymmetryAxis::Horizontal,
            },
            symmetry_strict: self.strict_symmetry,
            variant: match self.variant {
                VariantArg::Organic => GrowthVariant::Organic,
                VariantArg::Spine => GrowthVariant::Spine(SpineSettings::default()),
            },
        }
    }

    /// Classifier settings from the flags
    pub fn classifier_settings(&self) -> ClassifierSettings {
        ClassifierSettings {
            mode: match self.classifier {
                ClassifierArg::Flood => ClassifierMode::FloodFill,
                ClassifierArg::Thickness => ClassifierMode::Thickness,
            },
            ..ClassifierSettings::default()
        }
    }
}

/// Orchestrates batch generation with progress tracking
pub struct BatchRunner {
    cli: Cli,
    progress: Option<ProgressManager>,
}

impl BatchRunner {
    /// Create a runner from parsed CLI arguments
    pub fn new(cli: Cli) -> Self {
        let progress = cli.should_show_progress().then(ProgressManager::new);
        Self { cli, progress }
    }

    /// Generate the whole batch
    ///
    /// # Errors
    ///
    /// Returns an error if the settings fail validation or any export
    /// fails; generation itself cannot fail once settings are accepted.
    pub fn run(&mut self) -> Result<()> {
        std::fs::create_dir_all(&self.cli.output).map_err(|e| GenerationError::FileSystem {
            path: self.cli.output.clone(),
            operation: "create directory",
            source: e,
        })?;

        if let Some(ref mut pm) = self.progress {
            pm.initialize(self.cli.count);
        }

        for index in 0..self.cli.count {
            let seed = self.cli.seed.wrapping_add(index as u64);
            self.generate_one(index, seed)?;
        }

        if let Some(ref mut pm) = self.progress {
            pm.finish();
        }

        Ok(())
    }

    // Summaries go to stderr so piped output stays clean
    #[allow(clippy::print_stderr)]
    fn generate_one(&mut self, index: usize, seed: u64) -> Result<()> {
        let settings = self.cli.settings_for(seed);

        if let Some(ref mut pm) = self.progress {
            pm.start_dungeon(index, &format!("seed {seed}"), settings.tile_budget);
        }

        let mut engine = GrowthEngine::new(settings)?;
        loop {
            let phase = engine.run_steps(GENERATION_CHUNK_SIZE);
            if let Some(ref mut pm) = self.progress {
                pm.update_step(index, engine.grid().grown_count());
            }
            if matches!(phase, GrowthPhase::Complete(_)) {
                break;
            }
        }

        let classification = classify(engine.grid(), &self.cli.classifier_settings());
        let mut rng = RandomSource::new(seed);
        let dungeon = assemble(
            engine.grid(),
            classification,
            engine.spine_tiles(),
            seed,
            &mut rng,
        );

        let map_path = self.cli.output.join(format!("dungeon_{seed}_map.png"));
        export_dungeon_map(&dungeon, &map_path)?;

        if self.cli.analyze {
            let mut analysis_rng = RandomSource::new(seed);
            let analysis = analyze(&dungeon, &mut analysis_rng);
            let heat_path = self.cli.output.join(format!("dungeon_{seed}_cost.png"));
            export_cost_heatmap(&analysis.cost_map, &heat_path)?;

            if !self.cli.quiet {
                let max_cost = analysis
                    .room_routes
                    .iter()
                    .map(|route| route.cost)
                    .filter(|&cost| cost != UNREACHABLE_COST)
                    .max()
                    .unwrap_or(0);
                eprintln!(
                    "seed {seed}: {} rooms, {} corridors, {} special, max room cost {max_cost}",
                    dungeon.rooms.len(),
                    dungeon.corridors.len(),
                    analysis.furthest_rooms.len(),
                );
            }
        }

        if self.cli.visualize {
            let replay = GrowthReplay::from_grid(engine.grid());
            let gif_path = self.cli.output.join(format!("dungeon_{seed}_growth.gif"));
            replay.export_gif(&gif_path, GIF_FRAME_DELAY_MS)?;
        }

        if let Some(ref mut pm) = self.progress {
            pm.complete_dungeon(index);
        }

        Ok(())
    }
}
