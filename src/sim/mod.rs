//! Deterministic simulation module
//!
//! All gameplay logic lives here. This module must be pure and deterministic:
//! - One tick per call, no wall-clock reads
//! - Seeded RNG only
//! - Pipes kept in spawn order
//! - No rendering or platform dependencies

pub mod autopilot;
pub mod collision;
pub mod physics;
pub mod snapshot;
pub mod state;
pub mod stream;
pub mod tick;

pub use collision::{PipeSegment, Rect, bird_ground_collision, bird_pipe_collision, egg_in_reach};
pub use snapshot::{PipeView, Snapshot};
pub use state::{Bird, Egg, GameEvent, GamePhase, GameState, Pipe};
pub use tick::{TickInput, tick};
