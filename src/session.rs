//! One play-through of a level and the outcomes it reports
//!
//! A `Session` owns the `GameState` and an `Outcomes` observer. The host calls
//! `flap()` on input and `frame(elapsed_ms)` once per display refresh; the
//! session forwards a single tick to the simulation and turns phase changes
//! into callbacks:
//!
//! - `on_lose()` the moment the bird crashes
//! - `on_win(eggs)` once `WIN_DELAY_MS` of frame time has passed after clearing
//! - `on_exit()` when the host abandons the run; any pending win is dropped
//!
//! Each callback fires at most once per session. `retry()` starts a new one.

use crate::consts::WIN_DELAY_MS;
use crate::level::LevelConfig;
use crate::sim::{GameEvent, GamePhase, GameState, Snapshot, TickInput, tick};

/// Receiver of session outcomes (implemented by the surrounding application)
pub trait Outcomes {
    /// Level cleared; `eggs` is the number of eggs picked up this session
    fn on_win(&mut self, eggs: u32);

    /// Bird crashed
    fn on_lose(&mut self);

    /// Host tore the session down early
    fn on_exit(&mut self) {}
}

/// Where the session stands with respect to its outcome callbacks
#[derive(Debug, Clone, Copy, PartialEq)]
enum Outcome {
    Pending,
    /// Cleared, waiting out the celebration delay (ms accumulated so far)
    WinDelay(f64),
    Won,
    Lost,
    Exited,
}

/// A single run of one level
pub struct Session<O: Outcomes> {
    level: LevelConfig,
    state: GameState,
    outcomes: O,
    input: TickInput,
    outcome: Outcome,
}

impl<O: Outcomes> Session<O> {
    pub fn new(level: LevelConfig, seed: u64, outcomes: O) -> Self {
        let state = GameState::new(&level, seed);
        log::info!(
            "Session created: level {} (speed {}, gap {}, {} pipes), seed {}",
            state.level.id,
            state.level.speed,
            state.level.gap_size,
            state.level.pipes_to_pass,
            seed
        );
        Self {
            level,
            state,
            outcomes,
            input: TickInput::default(),
            outcome: Outcome::Pending,
        }
    }

    /// Queue a flap for the next frame
    pub fn flap(&mut self) {
        self.input.flap = true;
    }

    /// Let the autopilot fly (demo mode)
    pub fn set_autopilot(&mut self, enabled: bool) {
        self.input.autopilot = enabled;
    }

    /// Advance one frame: a single tick plus outcome bookkeeping
    pub fn frame(&mut self, elapsed_ms: f64) {
        if self.outcome == Outcome::Exited {
            return;
        }

        tick(&mut self.state, &self.input);
        self.input.flap = false;

        match (self.state.phase, self.outcome) {
            (GamePhase::GameOver, Outcome::Pending) => {
                self.outcome = Outcome::Lost;
                log::info!("Session lost at {}/{}", self.state.score, self.state.level.pipes_to_pass);
                self.outcomes.on_lose();
            }
            (GamePhase::Win, Outcome::Pending) => {
                // The clearing frame itself starts the countdown
                self.outcome = Outcome::WinDelay(0.0);
            }
            (GamePhase::Win, Outcome::WinDelay(waited)) => {
                let waited = waited + elapsed_ms.max(0.0);
                if waited >= WIN_DELAY_MS {
                    self.outcome = Outcome::Won;
                    log::info!("Session won with {} eggs", self.state.eggs);
                    self.outcomes.on_win(self.state.eggs);
                } else {
                    self.outcome = Outcome::WinDelay(waited);
                }
            }
            _ => {}
        }
    }

    /// Abandon the session; suppresses a pending win
    pub fn exit(&mut self) {
        if self.outcome == Outcome::Exited {
            return;
        }
        log::info!("Session exited in phase {:?}", self.state.phase);
        self.outcome = Outcome::Exited;
        self.input = TickInput::default();
        self.outcomes.on_exit();
    }

    /// Throw away the current run and start over in `PreStart`
    pub fn retry(&mut self, seed: u64) {
        log::info!("Session retry: level {}, seed {}", self.level.id, seed);
        let autopilot = self.input.autopilot;
        self.state = GameState::new(&self.level, seed);
        self.input = TickInput {
            flap: false,
            autopilot,
        };
        self.outcome = Outcome::Pending;
    }

    /// Nothing left to simulate or report
    pub fn is_settled(&self) -> bool {
        match self.outcome {
            Outcome::Exited | Outcome::Won => true,
            Outcome::Lost => self.state.bird.y >= crate::ground_limit(),
            Outcome::Pending | Outcome::WinDelay(_) => false,
        }
    }

    /// Whether `on_win` is still waiting for its delay
    pub fn win_pending(&self) -> bool {
        matches!(self.outcome, Outcome::WinDelay(_))
    }

    pub fn snapshot(&self) -> Snapshot {
        Snapshot::capture(&self.state)
    }

    pub fn state(&self) -> &GameState {
        &self.state
    }

    pub fn level(&self) -> &LevelConfig {
        &self.level
    }

    pub fn outcomes(&self) -> &O {
        &self.outcomes
    }

    /// Events from ticks since the last drain (audio, effects)
    pub fn drain_events(&mut self) -> Vec<GameEvent> {
        self.state.drain_events()
    }
}

#[cfg(test)]
pub(crate) mod tests {
    use super::*;
    use crate::consts::FRAME_MS;

    /// Records every callback in order
    #[derive(Debug, Default)]
    pub(crate) struct Recorder {
        pub wins: Vec<u32>,
        pub losses: u32,
        pub exits: u32,
    }

    impl Outcomes for Recorder {
        fn on_win(&mut self, eggs: u32) {
            self.wins.push(eggs);
        }

        fn on_lose(&mut self) {
            assert!(self.wins.is_empty(), "lose after win");
            self.losses += 1;
        }

        fn on_exit(&mut self) {
            self.exits += 1;
        }
    }

    fn level(speed: f32, gap: f32, pipes: u32, eggs: f64) -> LevelConfig {
        LevelConfig {
            speed,
            gap_size: gap,
            pipes_to_pass: pipes,
            egg_probability: eggs,
            ..LevelConfig::default()
        }
    }

    fn run(session: &mut Session<Recorder>, frames: usize) {
        for _ in 0..frames {
            session.frame(FRAME_MS);
        }
    }

    #[test]
    fn test_no_jumps_loses_once() {
        let mut session = Session::new(level(4.0, 180.0, 5, 0.0), 11, Recorder::default());
        session.flap();
        run(&mut session, 600);

        let rec = session.outcomes();
        assert_eq!(rec.losses, 1);
        assert!(rec.wins.is_empty());
        assert!(session.state().score < 5);
        assert!(session.is_settled());
    }

    #[test]
    fn test_frozen_pipe_never_wins() {
        let mut session = Session::new(level(0.0, 999.0, 1, 1.0), 3, Recorder::default());
        session.set_autopilot(true);
        run(&mut session, 5000);

        assert_eq!(session.state().phase, GamePhase::Active);
        assert_eq!(session.state().score, 0);
        assert!(session.outcomes().wins.is_empty());
        assert_eq!(session.outcomes().losses, 0);
        assert!(!session.is_settled());
    }

    #[test]
    fn test_autopilot_wins_once_with_egg_count() {
        let mut session = Session::new(level(3.0, 200.0, 4, 1.0), 21, Recorder::default());
        session.set_autopilot(true);

        let mut collected = 0;
        for _ in 0..5000 {
            session.frame(FRAME_MS);
            collected += session
                .drain_events()
                .iter()
                .filter(|e| matches!(e, GameEvent::EggCollected { .. }))
                .count() as u32;
            if session.is_settled() {
                break;
            }
        }

        let rec = session.outcomes();
        assert_eq!(rec.wins, vec![collected]);
        assert_eq!(rec.losses, 0);
        assert_eq!(session.state().eggs, collected);
        assert_eq!(session.state().score, 4);
    }

    #[test]
    fn test_win_waits_for_delay() {
        let mut session = Session::new(level(3.0, 200.0, 1, 0.0), 5, Recorder::default());
        session.set_autopilot(true);
        while session.state().phase != GamePhase::Win {
            session.frame(FRAME_MS);
            assert!(session.state().time_ticks < 10_000);
        }
        assert!(session.win_pending());

        // 1100 ms: still pending
        session.frame(1100.0);
        assert!(session.outcomes().wins.is_empty());
        session.frame(50.0);
        assert!(session.outcomes().wins.is_empty());
        session.frame(50.0);
        assert_eq!(session.outcomes().wins, vec![0]);

        session.frame(5000.0);
        assert_eq!(session.outcomes().wins.len(), 1);
        assert!(session.is_settled());
    }

    #[test]
    fn test_exit_suppresses_pending_win() {
        let mut session = Session::new(level(3.0, 200.0, 1, 0.0), 5, Recorder::default());
        session.set_autopilot(true);
        while session.state().phase != GamePhase::Win {
            session.frame(FRAME_MS);
        }
        session.exit();
        session.exit();
        session.frame(10_000.0);

        let rec = session.outcomes();
        assert!(rec.wins.is_empty());
        assert_eq!(rec.exits, 1);
        assert!(session.is_settled());
    }

    #[test]
    fn test_frames_after_exit_are_noops() {
        let mut session = Session::new(level(4.0, 180.0, 5, 0.0), 5, Recorder::default());
        session.flap();
        session.frame(FRAME_MS);
        session.exit();
        let before = session.snapshot();
        session.flap();
        run(&mut session, 100);
        assert_eq!(session.snapshot(), before);
        assert_eq!(session.outcomes().losses, 0);
    }

    #[test]
    fn test_retry_resets_everything() {
        let mut session = Session::new(level(4.0, 180.0, 5, 0.0), 5, Recorder::default());
        session.flap();
        run(&mut session, 600);
        assert_eq!(session.outcomes().losses, 1);

        session.retry(6);
        assert_eq!(session.level().pipes_to_pass, 5);
        assert_eq!(session.state().phase, GamePhase::PreStart);
        assert_eq!(session.state().score, 0);
        assert_eq!(session.state().pipes.len(), 1);
        assert!(!session.is_settled());

        session.flap();
        run(&mut session, 600);
        assert_eq!(session.outcomes().losses, 2, "one loss per session");
    }

    #[test]
    fn test_pre_start_waits_for_flap() {
        let mut session = Session::new(level(4.0, 180.0, 5, 0.0), 5, Recorder::default());
        run(&mut session, 300);
        assert_eq!(session.state().phase, GamePhase::PreStart);
        assert_eq!(session.outcomes().losses, 0);
    }
}
