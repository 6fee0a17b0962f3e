//! Pipe stream: spawning, scrolling and recycling
//!
//! The queue is ordered by x (oldest, leftmost first). New pipes are always
//! pushed at the back, recycled pipes always popped from the front.

use rand::Rng;

use super::state::{Egg, GameState, Pipe};
use crate::consts::*;

/// Valid `[min, max]` range for a pipe's top-segment height given a gap.
///
/// The gap is clamped first so the range can never invert.
pub fn top_height_range(gap: f32) -> (f32, f32) {
    let gap = gap.clamp(MIN_GAP, MAX_GAP);
    let max = PLAYFIELD_HEIGHT - gap - MIN_PIPE_HEIGHT - SPAWN_MARGIN;
    (MIN_PIPE_HEIGHT, max.max(MIN_PIPE_HEIGHT))
}

/// Append a new pipe at `x` with a random gap position and maybe an egg
pub fn spawn_pipe(state: &mut GameState, x: f32) {
    let gap = state.level.gap_size;
    let egg_probability = state.level.egg_probability;
    let (min, max) = top_height_range(gap);

    let rng = state.rng();
    let top_height = if max > min {
        rng.random_range(min..max)
    } else {
        min
    };
    let has_egg = rng.random_bool(egg_probability);

    let id = state.next_entity_id();
    state.pipes.push_back(Pipe {
        id,
        x,
        top_height,
        passed: false,
        egg: has_egg.then_some(Egg {
            y: top_height + gap / 2.0,
            collected: false,
        }),
    });
    state.spawned += 1;

    log::trace!(
        "Spawned pipe {} at x={} top={:.1} egg={}",
        id,
        x,
        top_height,
        has_egg
    );
}

/// Scroll every live pipe left by the level speed
pub fn advance(state: &mut GameState) {
    let speed = state.level.speed;
    for pipe in &mut state.pipes {
        pipe.x -= speed;
    }
    state.distance += speed;
}

/// Drop pipes that have fully left the playfield on the left side
pub fn recycle(state: &mut GameState) {
    while state
        .pipes
        .front()
        .is_some_and(|p| p.x < -PIPE_WIDTH)
    {
        if let Some(pipe) = state.pipes.pop_front() {
            log::trace!("Recycled pipe {}", pipe.id);
        }
    }
}

/// Whether the stream wants another pipe right now
pub fn should_spawn(state: &GameState) -> bool {
    if state.spawned >= state.level.pipes_to_pass {
        return false;
    }
    match state.pipes.back() {
        None => true,
        Some(newest) => newest.x < SPAWN_THRESHOLD_X,
    }
}

/// Spawn at the right edge if spacing and the level budget allow
pub fn maybe_spawn(state: &mut GameState) {
    if should_spawn(state) {
        spawn_pipe(state, SPAWN_X);
    }
}
