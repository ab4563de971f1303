//! Generation constants and runtime configuration defaults

// Growth defaults
/// Fixed seed for reproducible generation
pub const DEFAULT_SEED: u64 = 42;
/// Default grid width in tiles
pub const DEFAULT_GRID_WIDTH: usize = 48;
/// Default grid height in tiles
pub const DEFAULT_GRID_HEIGHT: usize = 48;
/// Default number of tiles a growth run may claim
pub const DEFAULT_TILE_BUDGET: usize = 800;
/// Default number of growth seeds
pub const DEFAULT_SEED_COUNT: usize = 1;
/// Default minimum pairwise distance between random seeds
pub const DEFAULT_MIN_SEED_DISTANCE: f64 = 8.0;

// Frontier scoring defaults
/// Default sharpening exponent applied to candidate scores
pub const DEFAULT_GAMMA: f64 = 1.6;
/// Default reward for continuing the parent's growth direction
pub const DEFAULT_STRAIGHT_BIAS: f64 = 0.5;
/// Default penalty for changing direction away from the parent's heading
pub const DEFAULT_TURN_PENALTY: f64 = 0.3;
/// Default penalty per extra grown neighbor a candidate would touch
pub const DEFAULT_BRANCH_PENALTY: f64 = 0.35;
/// Floor applied to candidate scores so the selection total stays positive
pub const MIN_CANDIDATE_SCORE: f64 = 1e-3;

// Attempt limit for rejection-sampled random seed placement
/// Maximum placement attempts per random seed
pub const SEED_PLACEMENT_ATTEMPTS: usize = 100;

// Spine variant defaults
/// Default backbone corridor width in tiles
pub const DEFAULT_SPINE_WIDTH: usize = 2;
/// Default backbone tiles between attachment seeds
pub const DEFAULT_SPINE_ATTACHMENT_SPACING: usize = 6;
/// Share of the tile budget devoted to the backbone walk
pub const SPINE_BUDGET_SHARE: f64 = 0.35;

// Classifier defaults
/// Default minimum component area for a flood-fill room
pub const DEFAULT_MIN_ROOM_AREA: usize = 6;
/// Default widest square side still treated as corridor by thickness mode
pub const DEFAULT_MAX_CORRIDOR_WIDTH: usize = 2;

// Room size tiers, shared by every consumer that classifies by area
/// Maximum area of a small room
pub const ROOM_SMALL_MAX_AREA: usize = 6;
/// Minimum area of a large room
pub const ROOM_LARGE_MIN_AREA: usize = 32;

// Walk-graph cost terms
/// Movement surcharge for stepping into a different room
pub const ROOM_ENTRY_COST: u32 = 5;
/// Door surcharge for secret doors
pub const DOOR_SURCHARGE_SECRET: u32 = 20;
/// Door surcharge for locked, barred and portcullis doors
pub const DOOR_SURCHARGE_HEAVY: u32 = 10;

// Furthest-room selection
/// Rooms per selected special room
pub const FURTHEST_ROOM_DIVISOR: usize = 5;
/// Inclusion probability one room-hop from a selected special room
pub const SPECIAL_TIER_ADJACENT: f64 = 0.10;
/// Inclusion probability two room-hops from a selected special room
pub const SPECIAL_TIER_NEAR: f64 = 0.25;
/// Inclusion probability three room-hops from a selected special room
pub const SPECIAL_TIER_MID: f64 = 0.50;
/// Inclusion probability bonus per surcharge door on the separating path
pub const SPECIAL_DOOR_BONUS: f64 = 0.05;

// Object placement
/// Chance of a door at each room/corridor junction
pub const DOOR_CHANCE: f64 = 0.45;
/// Chance of a trap on each corridor tile
pub const TRAP_CHANCE: f64 = 0.02;

// Scheduling
/// Growth steps per cooperative chunk when driving generation from the CLI
pub const GENERATION_CHUNK_SIZE: usize = 64;

// Progress bar display settings
/// Threshold for switching to batch progress mode
pub const MAX_INDIVIDUAL_PROGRESS_BARS: usize = 5;

// Output settings
/// Delay between growth replay GIF frames
pub const GIF_FRAME_DELAY_MS: u32 = 5;
/// Minimum frame delay that viewers reliably support (in milliseconds)
pub const VIEWER_MIN_FRAME_DELAY_MS: u32 = 50;
