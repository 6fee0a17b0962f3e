//! Demo-mode autopilot
//!
//! Steers the bird toward the center of the next gap it still has to clear.
//! It flaps whenever the bird sits too far below that line; the overshoot of
//! a single flap stays well inside any gap the level sanitizer allows.

use super::state::{GamePhase, GameState};
use crate::consts::PLAYFIELD_HEIGHT;

/// How far below the target line the bird may sink before flapping
const SINK_TOLERANCE: f32 = 20.0;

/// Vertical line the autopilot is currently aiming for
pub fn target_line(state: &GameState) -> f32 {
    let hitbox_left = state.bird.hitbox().left;
    state
        .pipes
        .iter()
        .find(|pipe| pipe.trailing_edge() >= hitbox_left)
        .map(|pipe| pipe.top_height + state.level.gap_size / 2.0)
        .unwrap_or(PLAYFIELD_HEIGHT / 2.0)
}

/// Whether the autopilot wants a flap this tick
pub fn wants_flap(state: &GameState) -> bool {
    match state.phase {
        GamePhase::PreStart => true,
        GamePhase::Active => state.bird.center().y > target_line(state) + SINK_TOLERANCE,
        GamePhase::GameOver | GamePhase::Win => false,
    }
}
