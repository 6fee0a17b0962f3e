//! Per-frame simulation tick
//!
//! One call advances the session by exactly one logical step: input, physics,
//! pipe scrolling, collisions, eggs, scoring, recycling and spawning.

use super::collision::{bird_ground_collision, bird_pipe_collision, egg_in_reach};
use super::state::{GameEvent, GamePhase, GameState};
use super::{autopilot, physics, stream};
use crate::consts::BIRD_X;

/// Input commands for a single tick
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct TickInput {
    /// Flap (pointer down / space)
    pub flap: bool,
    /// Demo mode: the autopilot decides when to flap
    pub autopilot: bool,
}

/// Advance the game state by one tick
pub fn tick(state: &mut GameState, input: &TickInput) {
    let flap = input.flap || (input.autopilot && autopilot::wants_flap(state));
    if flap {
        apply_flap(state);
    }

    match state.phase {
        GamePhase::PreStart | GamePhase::Win => return,
        GamePhase::GameOver => {
            physics::fall(&mut state.bird);
            return;
        }
        GamePhase::Active => {}
    }

    state.time_ticks += 1;

    physics::integrate(&mut state.bird);
    if bird_ground_collision(&state.bird) {
        state.bird.y = crate::ground_limit();
        crash(state);
        return;
    }

    stream::advance(state);

    let gap = state.level.gap_size;
    let hit = state
        .pipes
        .iter()
        .find_map(|pipe| bird_pipe_collision(&state.bird, pipe, gap).map(|seg| (pipe.id, seg)));
    if let Some((id, segment)) = hit {
        log::debug!("Bird hit {:?} segment of pipe {}", segment, id);
        crash(state);
        return;
    }

    collect_eggs(state);
    score_pipes(state);

    if state.score >= state.level.pipes_to_pass {
        state.phase = GamePhase::Win;
        state.events.push(GameEvent::Cleared { eggs: state.eggs });
        log::info!(
            "Level {} cleared with {} eggs after {} ticks",
            state.level.id,
            state.eggs,
            state.time_ticks
        );
        return;
    }

    stream::recycle(state);
    stream::maybe_spawn(state);
}

/// Flap input: starts the session from `PreStart`, ignored once terminal
fn apply_flap(state: &mut GameState) {
    match state.phase {
        GamePhase::PreStart => {
            state.phase = GamePhase::Active;
            log::info!("Level {} started (seed {})", state.level.id, state.seed);
        }
        GamePhase::Active => {}
        GamePhase::GameOver | GamePhase::Win => return,
    }
    physics::flap(&mut state.bird);
    state.events.push(GameEvent::Flap);
}

/// Enter `GameOver`; a no-op if already terminal
fn crash(state: &mut GameState) {
    if state.phase != GamePhase::Active {
        return;
    }
    state.phase = GamePhase::GameOver;
    state.events.push(GameEvent::Crashed);
    log::info!(
        "Crashed on level {} at score {}/{}",
        state.level.id,
        state.score,
        state.level.pipes_to_pass
    );
}

fn collect_eggs(state: &mut GameState) {
    let bird = state.bird;
    for pipe in state.pipes.iter_mut() {
        if !egg_in_reach(&bird, pipe) {
            continue;
        }
        if let Some(egg) = pipe.egg.as_mut() {
            egg.collected = true;
            state.eggs += 1;
            state.events.push(GameEvent::EggCollected { total: state.eggs });
        }
    }
}

/// Score every pipe whose trailing edge crossed the bird's lane, once each
fn score_pipes(state: &mut GameState) {
    for pipe in state.pipes.iter_mut() {
        if !pipe.passed && pipe.trailing_edge() < BIRD_X {
            pipe.passed = true;
            state.score += 1;
            state.events.push(GameEvent::Scored { score: state.score });
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::consts::*;
    use crate::level::LevelConfig;
    use crate::sim::Snapshot;
    use crate::sim::state::{Egg, Pipe};

    const FLAP: TickInput = TickInput {
        flap: true,
        autopilot: false,
    };
    const IDLE: TickInput = TickInput {
        flap: false,
        autopilot: false,
    };

    fn level(speed: f32, gap: f32, pipes: u32, eggs: f64) -> LevelConfig {
        LevelConfig {
            speed,
            gap_size: gap,
            pipes_to_pass: pipes,
            egg_probability: eggs,
            ..LevelConfig::default()
        }
    }

    fn active_state(lvl: &LevelConfig) -> GameState {
        let mut state = GameState::new(lvl, 7);
        state.phase = GamePhase::Active;
        state
    }

    fn safe_pipe(id: u32, x: f32, bird_y: f32) -> Pipe {
        // Gap centered on the bird
        Pipe {
            id,
            x,
            top_height: bird_y - 60.0,
            passed: false,
            egg: None,
        }
    }

    #[test]
    fn test_pre_start_is_frozen() {
        let mut state = GameState::new(&level(4.0, 180.0, 5, 0.0), 1);
        let pipes = state.pipes.clone();
        let bird = state.bird;
        for _ in 0..10 {
            tick(&mut state, &IDLE);
        }
        assert_eq!(state.phase, GamePhase::PreStart);
        assert_eq!(state.bird, bird);
        assert_eq!(state.pipes, pipes);
        assert_eq!(state.time_ticks, 0);
    }

    #[test]
    fn test_first_flap_starts() {
        let mut state = GameState::new(&level(4.0, 180.0, 5, 0.0), 1);
        tick(&mut state, &FLAP);
        assert_eq!(state.phase, GamePhase::Active);
        assert_eq!(state.bird.vel, JUMP_IMPULSE + GRAVITY);
        assert_eq!(state.bird.y, BIRD_START_Y + JUMP_IMPULSE + GRAVITY);
        assert_eq!(state.drain_events(), vec![GameEvent::Flap]);
    }

    #[test]
    fn test_flap_ignored_when_terminal() {
        let mut state = active_state(&level(4.0, 180.0, 5, 0.0));
        state.phase = GamePhase::Win;
        let bird = state.bird;
        tick(&mut state, &FLAP);
        assert_eq!(state.bird, bird);
        assert!(state.events.is_empty());

        state.phase = GamePhase::GameOver;
        state.bird.vel = 2.0;
        tick(&mut state, &FLAP);
        assert!(state.bird.vel > 0.0, "flap must not lift a crashed bird");
    }

    #[test]
    fn test_ground_contact_crashes_once() {
        let mut state = active_state(&level(4.0, 180.0, 5, 0.0));
        state.bird.y = crate::ground_limit() - 1.0;
        state.bird.vel = 5.0;
        tick(&mut state, &IDLE);
        assert_eq!(state.phase, GamePhase::GameOver);
        tick(&mut state, &IDLE);
        tick(&mut state, &IDLE);
        let crashes = state
            .drain_events()
            .into_iter()
            .filter(|e| *e == GameEvent::Crashed)
            .count();
        assert_eq!(crashes, 1);
    }

    #[test]
    fn test_pipe_collision_crashes() {
        let mut state = active_state(&level(4.0, 180.0, 5, 0.0));
        state.pipes.clear();
        state.pipes.push_back(Pipe {
            id: 99,
            x: BIRD_X,
            top_height: 400.0,
            passed: false,
            egg: None,
        });
        tick(&mut state, &IDLE);
        assert_eq!(state.phase, GamePhase::GameOver);
    }

    #[test]
    fn test_game_over_passive_fall_no_scoring() {
        let mut state = active_state(&level(4.0, 180.0, 5, 0.0));
        state.phase = GamePhase::GameOver;
        let pipes = state.pipes.clone();
        let y = state.bird.y;
        tick(&mut state, &IDLE);
        assert!(state.bird.y > y);
        assert_eq!(state.pipes, pipes, "pipes freeze after a crash");
        assert_eq!(state.score, 0);
    }

    #[test]
    fn test_crash_while_rising_stays_below_ceiling() {
        let mut state = active_state(&level(0.0, 180.0, 5, 0.0));
        state.pipes.clear();
        state.pipes.push_back(Pipe {
            id: 42,
            x: BIRD_X,
            top_height: 100.0,
            passed: false,
            egg: None,
        });
        state.bird.y = 40.0;
        tick(&mut state, &FLAP);
        assert_eq!(state.phase, GamePhase::GameOver);
        assert!(state.bird.vel < 0.0, "still rising at the crash");

        for _ in 0..40 {
            tick(&mut state, &IDLE);
            assert!(state.bird.y >= 0.0, "bird above ceiling: {}", state.bird.y);
            assert!(Snapshot::capture(&state).bird_y >= 0.0);
        }
        assert!(state.bird.y > 0.0, "bird falls again after touching the ceiling");
    }

    #[test]
    fn test_scoring_once_when_trailing_edge_crosses_lane() {
        let mut state = active_state(&level(4.0, 180.0, 5, 0.0));
        state.pipes.clear();
        let y = state.bird.y;
        // Trailing edge at BIRD_X + 2: one tick (4px) takes it past the lane
        state.pipes.push_back(safe_pipe(50, BIRD_X + 2.0 - PIPE_WIDTH, y));
        tick(&mut state, &FLAP);
        assert_eq!(state.score, 1);
        assert!(state.pipes[0].passed);
        tick(&mut state, &FLAP);
        assert_eq!(state.score, 1);
    }

    #[test]
    fn test_egg_collected_once() {
        let mut state = active_state(&level(0.0, 180.0, 5, 0.0));
        state.pipes.clear();
        state.bird.vel = -GRAVITY; // hover for one tick
        let center = state.bird.center();
        let mut pipe = safe_pipe(50, center.x - PIPE_WIDTH / 2.0, state.bird.y);
        pipe.egg = Some(Egg {
            y: center.y,
            collected: false,
        });
        state.pipes.push_back(pipe);

        tick(&mut state, &IDLE);
        assert_eq!(state.eggs, 1);
        assert!(state.pipes[0].egg.unwrap().collected);
        tick(&mut state, &IDLE);
        assert_eq!(state.eggs, 1);
    }

    #[test]
    fn test_win_when_target_reached() {
        let mut state = active_state(&level(4.0, 180.0, 1, 0.0));
        state.pipes.clear();
        let y = state.bird.y;
        state.pipes.push_back(safe_pipe(50, BIRD_X + 2.0 - PIPE_WIDTH, y));
        state.eggs = 3;
        tick(&mut state, &FLAP);
        assert_eq!(state.phase, GamePhase::Win);
        assert!(state.events.contains(&GameEvent::Cleared { eggs: 3 }));

        // Win is frozen
        let bird = state.bird;
        tick(&mut state, &IDLE);
        assert_eq!(state.bird, bird);
    }

    #[test]
    fn test_speed_zero_never_scores() {
        let mut state = active_state(&level(0.0, 999.0, 1, 1.0));
        for i in 0..2000 {
            let flap = state.bird.center().y > 300.0;
            tick(
                &mut state,
                &TickInput {
                    flap,
                    autopilot: false,
                },
            );
            assert_eq!(state.phase, GamePhase::Active, "tick {i}");
        }
        assert_eq!(state.score, 0);
        assert_eq!(state.pipes.len(), 1);
    }

    #[test]
    fn test_recycle_and_spawn_during_play() {
        let mut state = active_state(&level(4.0, 180.0, 10, 0.0));
        state.pipes[0].x = -PIPE_WIDTH - 1.0;
        state.pipes[0].passed = true;
        state.score = 1;
        tick(&mut state, &FLAP);
        assert_eq!(state.pipes.len(), 1);
        assert_eq!(state.pipes[0].x, SPAWN_X);
        assert_eq!(state.spawned, 2);
    }
}
