//! Egg Quest - a side-scrolling flappy arcade game
//!
//! Core modules:
//! - `sim`: Deterministic simulation (physics, pipe stream, collisions, scoring)
//! - `session`: One play-through of a level and its win/lose/exit outcomes
//! - `driver`: Per-frame clock driving a session
//! - `renderer`: WebGPU rendering pipeline
//! - `platform`: Browser animation-frame loop
//! - `level` / `character` / `progress`: Meta-game data consumed by the shell

#[cfg(target_arch = "wasm32")]
pub mod audio;
pub mod character;
pub mod driver;
pub mod error;
pub mod level;
pub mod platform;
pub mod progress;
pub mod renderer;
pub mod session;
pub mod settings;
pub mod sim;

pub use character::{Character, CharacterIcon};
pub use driver::{Driver, FrameClock, FrameControl};
pub use error::{ConfigError, ProgressError, RenderError};
pub use level::LevelConfig;
pub use progress::Progress;
pub use session::{Outcomes, Session};
pub use settings::Settings;

/// Game configuration constants
pub mod consts {
    /// Playfield size in pixels
    pub const PLAYFIELD_WIDTH: f32 = 400.0;
    pub const PLAYFIELD_HEIGHT: f32 = 600.0;
    /// Height of the ground strip painted at the bottom of the playfield
    pub const GROUND_HEIGHT: f32 = 20.0;

    /// Bird sprite size (square)
    pub const BIRD_SIZE: f32 = 36.0;
    /// Fixed horizontal lane of the bird's left edge
    pub const BIRD_X: f32 = 100.0;
    /// Vertical position the bird starts from
    pub const BIRD_START_Y: f32 = 250.0;
    /// Hitbox shrink on every side, keeps grazes forgiving
    pub const HITBOX_INSET: f32 = 4.0;

    /// Downward acceleration (px/tick²)
    pub const GRAVITY: f32 = 0.55;
    /// Velocity set by a flap (px/tick, negative is up)
    pub const JUMP_IMPULSE: f32 = -8.5;
    /// Maximum downward velocity (px/tick)
    pub const TERMINAL_VELOCITY: f32 = 10.0;

    /// Pipe width in pixels
    pub const PIPE_WIDTH: f32 = 70.0;
    /// Shortest allowed pipe segment
    pub const MIN_PIPE_HEIGHT: f32 = 80.0;
    /// Extra clearance kept between the gap and the ground
    pub const SPAWN_MARGIN: f32 = 50.0;
    /// Where the first pipe of a session is placed
    pub const FIRST_PIPE_X: f32 = PLAYFIELD_WIDTH + 100.0;
    /// Where later pipes are placed
    pub const SPAWN_X: f32 = PLAYFIELD_WIDTH + 50.0;
    /// Newest pipe must be left of this before the next one spawns
    pub const SPAWN_THRESHOLD_X: f32 = PLAYFIELD_WIDTH - 200.0;

    /// Smallest gap a level may ask for
    pub const MIN_GAP: f32 = BIRD_SIZE * 2.0;
    /// Largest gap that still leaves a valid top-height range
    pub const MAX_GAP: f32 = PLAYFIELD_HEIGHT - 2.0 * MIN_PIPE_HEIGHT - SPAWN_MARGIN;

    /// Egg pickup distance (bird center to egg center)
    pub const EGG_PICKUP_RADIUS: f32 = 30.0;
    /// Egg half extents, only used for drawing
    pub const EGG_RADIUS_X: f32 = 14.0;
    pub const EGG_RADIUS_Y: f32 = 18.0;

    /// Delay between clearing a level and reporting the win
    pub const WIN_DELAY_MS: f64 = 1200.0;
    /// Nominal frame period used by headless runs (60 Hz)
    pub const FRAME_MS: f64 = 1000.0 / 60.0;
}

/// Lowest y the bird may reach before touching the ground
#[inline]
pub fn ground_limit() -> f32 {
    consts::PLAYFIELD_HEIGHT - consts::BIRD_SIZE - consts::GROUND_HEIGHT
}
