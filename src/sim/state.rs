//! Game state and core simulation types
//!
//! Everything a session mutates lives in `GameState`. It is owned by exactly
//! one session and only touched from the tick handler.

use std::collections::VecDeque;

use glam::Vec2;
use rand::SeedableRng;
use rand_pcg::Pcg32;
use serde::{Deserialize, Serialize};

use super::collision::Rect;
use crate::consts::*;
use crate::level::LevelConfig;

/// Lifecycle phase of a session
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum GamePhase {
    /// Waiting for the first flap; nothing moves
    PreStart,
    /// Physics, pipes and scoring run
    Active,
    /// Crashed (terminal); the bird may keep falling for effect
    GameOver,
    /// Level cleared (terminal)
    Win,
}

impl GamePhase {
    pub fn is_terminal(&self) -> bool {
        matches!(self, GamePhase::GameOver | GamePhase::Win)
    }
}

/// Things that happened during a tick, drained by the shell for audio/effects
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum GameEvent {
    Flap,
    Scored { score: u32 },
    EggCollected { total: u32 },
    Crashed,
    Cleared { eggs: u32 },
}

/// The player
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Bird {
    /// Top edge (px, grows downward)
    pub y: f32,
    /// Vertical velocity (px/tick, positive is down)
    pub vel: f32,
}

impl Default for Bird {
    fn default() -> Self {
        Self {
            y: BIRD_START_Y,
            vel: 0.0,
        }
    }
}

impl Bird {
    pub fn center(&self) -> Vec2 {
        Vec2::new(BIRD_X + BIRD_SIZE / 2.0, self.y + BIRD_SIZE / 2.0)
    }

    /// Collision box, inset from the sprite
    pub fn hitbox(&self) -> Rect {
        Rect::new(BIRD_X, self.y, BIRD_SIZE, BIRD_SIZE).inset(HITBOX_INSET)
    }
}

/// Bonus egg carried in a pipe's gap
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Egg {
    /// Vertical center (px)
    pub y: f32,
    pub collected: bool,
}

/// A top/bottom pipe pair
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Pipe {
    pub id: u32,
    /// Leading (left) edge
    pub x: f32,
    /// Height of the top segment; the gap starts here
    pub top_height: f32,
    /// Scored flag, set once
    pub passed: bool,
    pub egg: Option<Egg>,
}

impl Pipe {
    pub fn trailing_edge(&self) -> f32 {
        self.x + PIPE_WIDTH
    }

    pub fn top_rect(&self) -> Rect {
        Rect::new(self.x, 0.0, PIPE_WIDTH, self.top_height)
    }

    pub fn bottom_rect(&self, gap: f32) -> Rect {
        let top = self.top_height + gap;
        Rect::new(self.x, top, PIPE_WIDTH, PLAYFIELD_HEIGHT - top)
    }

    /// Center of the attached egg, if any
    pub fn egg_center(&self) -> Option<Vec2> {
        self.egg
            .map(|egg| Vec2::new(self.x + PIPE_WIDTH / 2.0, egg.y))
    }
}

/// Complete session state (deterministic for a given seed and input stream)
#[derive(Debug, Clone)]
pub struct GameState {
    /// Seed the RNG was created from
    pub seed: u64,
    rng: Pcg32,
    /// Level parameters, sanitized
    pub level: LevelConfig,
    pub phase: GamePhase,
    pub bird: Bird,
    /// Live pipes, oldest (leftmost) first
    pub pipes: VecDeque<Pipe>,
    /// Pipes passed
    pub score: u32,
    /// Eggs picked up
    pub eggs: u32,
    /// Pixels scrolled while active
    pub distance: f32,
    /// Pipes ever spawned this session
    pub spawned: u32,
    /// Simulation tick counter (active ticks only)
    pub time_ticks: u64,
    /// Events produced since the last drain
    pub events: Vec<GameEvent>,
    next_id: u32,
}

impl GameState {
    /// Create a fresh session state in `PreStart` with the first pipe queued
    pub fn new(level: &LevelConfig, seed: u64) -> Self {
        let mut state = Self {
            seed,
            rng: Pcg32::seed_from_u64(seed),
            level: level.sanitized(),
            phase: GamePhase::PreStart,
            bird: Bird::default(),
            pipes: VecDeque::new(),
            score: 0,
            eggs: 0,
            distance: 0.0,
            spawned: 0,
            time_ticks: 0,
            events: Vec::new(),
            next_id: 1,
        };

        super::stream::spawn_pipe(&mut state, FIRST_PIPE_X);

        state
    }

    /// Allocate a new entity ID
    pub fn next_entity_id(&mut self) -> u32 {
        let id = self.next_id;
        self.next_id += 1;
        id
    }

    pub fn rng(&mut self) -> &mut Pcg32 {
        &mut self.rng
    }

    /// Take all pending events
    pub fn drain_events(&mut self) -> Vec<GameEvent> {
        std::mem::take(&mut self.events)
    }
}
