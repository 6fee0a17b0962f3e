//! Frame driver: turns display-refresh timestamps into session frames
//!
//! The driver is platform-neutral. In the browser `platform::AnimationLoop`
//! feeds it `requestAnimationFrame` timestamps; natively `run_headless` feeds
//! it a synthetic 60 Hz clock.

use crate::consts::FRAME_MS;
use crate::session::{Outcomes, Session};

/// Elapsed-time sampler
///
/// The first sample is a baseline (0 ms). Later samples return the raw
/// difference with no catch-up, so a long pause yields one large sample.
#[derive(Debug, Clone, Copy, Default)]
pub struct FrameClock {
    last_ms: Option<f64>,
}

impl FrameClock {
    pub fn new() -> Self {
        Self::default()
    }

    /// Record `now_ms` and return the time since the previous sample
    pub fn sample(&mut self, now_ms: f64) -> f64 {
        let elapsed = match self.last_ms {
            Some(last) => (now_ms - last).max(0.0),
            None => 0.0,
        };
        self.last_ms = Some(now_ms);
        elapsed
    }

    /// Forget the baseline; the next sample is 0 again
    pub fn reset(&mut self) {
        self.last_ms = None;
    }
}

/// Whether the host should request another frame
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FrameControl {
    Continue,
    Halt,
}

/// Owns a session and its clock, and decides when the loop ends
pub struct Driver<O: Outcomes> {
    session: Session<O>,
    clock: FrameClock,
    running: bool,
    frames: u64,
}

impl<O: Outcomes> Driver<O> {
    pub fn new(session: Session<O>) -> Self {
        Self {
            session,
            clock: FrameClock::new(),
            running: true,
            frames: 0,
        }
    }

    /// Handle one display refresh at `now_ms`
    pub fn frame(&mut self, now_ms: f64) -> FrameControl {
        if !self.running {
            return FrameControl::Halt;
        }

        let elapsed = self.clock.sample(now_ms);
        if elapsed > 250.0 {
            log::debug!("Long frame gap: {:.0} ms", elapsed);
        }
        self.session.frame(elapsed);
        self.frames += 1;

        if self.session.is_settled() {
            log::debug!("Session settled after {} frames, halting", self.frames);
            self.running = false;
            FrameControl::Halt
        } else {
            FrameControl::Continue
        }
    }

    /// Stop driving; later frames are no-ops
    pub fn stop(&mut self) {
        self.running = false;
    }

    /// Exit the session and stop
    pub fn exit(&mut self) {
        self.session.exit();
        self.stop();
    }

    /// Start a fresh session on the same level and resume driving
    pub fn restart(&mut self, seed: u64) {
        self.session.retry(seed);
        self.clock.reset();
        self.running = true;
    }

    pub fn is_running(&self) -> bool {
        self.running
    }

    pub fn frames(&self) -> u64 {
        self.frames
    }

    pub fn session(&self) -> &Session<O> {
        &self.session
    }

    pub fn session_mut(&mut self) -> &mut Session<O> {
        &mut self.session
    }
}

/// Drive at a fixed 60 Hz until the driver halts or `max_frames` pass.
///
/// Returns the number of frames actually run.
pub fn run_headless<O: Outcomes>(driver: &mut Driver<O>, max_frames: u64) -> u64 {
    let mut now = 0.0;
    let mut ran = 0;
    while ran < max_frames {
        ran += 1;
        if driver.frame(now) == FrameControl::Halt {
            break;
        }
        now += FRAME_MS;
    }
    ran
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::level::LevelConfig;
    use crate::session::tests::Recorder;
    use crate::sim::GamePhase;
    use proptest::prelude::*;

    fn driver(speed: f32, gap: f32, pipes: u32, autopilot: bool) -> Driver<Recorder> {
        let level = LevelConfig {
            speed,
            gap_size: gap,
            pipes_to_pass: pipes,
            egg_probability: 0.5,
            ..LevelConfig::default()
        };
        let mut session = Session::new(level, 17, Recorder::default());
        session.set_autopilot(autopilot);
        Driver::new(session)
    }

    #[test]
    fn test_clock_baseline_and_deltas() {
        let mut clock = FrameClock::new();
        assert_eq!(clock.sample(1000.0), 0.0);
        assert_eq!(clock.sample(1016.0), 16.0);
        // Backgrounded tab: one big sample, no catch-up
        assert_eq!(clock.sample(6016.0), 5000.0);
        // Non-monotonic timestamps clamp to zero
        assert_eq!(clock.sample(6000.0), 0.0);
        clock.reset();
        assert_eq!(clock.sample(9000.0), 0.0);
    }

    #[test]
    fn test_halts_after_loss() {
        let mut d = driver(4.0, 180.0, 5, false);
        d.session_mut().flap();
        let ran = run_headless(&mut d, 10_000);
        assert!(ran < 10_000);
        assert!(!d.is_running());
        assert_eq!(d.session().outcomes().losses, 1);
        assert_eq!(d.frame(99_999.0), FrameControl::Halt);
    }

    #[test]
    fn test_halts_after_win_delay() {
        let mut d = driver(3.0, 200.0, 2, true);
        run_headless(&mut d, 10_000);
        assert_eq!(d.session().state().phase, GamePhase::Win);
        assert_eq!(d.session().outcomes().wins.len(), 1);
        assert!(!d.is_running());
    }

    #[test]
    fn test_stop_makes_frames_noops() {
        let mut d = driver(4.0, 180.0, 5, true);
        d.frame(0.0);
        d.frame(16.0);
        d.stop();
        let ticks = d.session().state().time_ticks;
        for i in 0..50 {
            assert_eq!(d.frame(32.0 + i as f64 * 16.0), FrameControl::Halt);
        }
        assert_eq!(d.session().state().time_ticks, ticks);
    }

    #[test]
    fn test_exit_fires_on_exit_only() {
        let mut d = driver(4.0, 180.0, 5, true);
        run_headless(&mut d, 30);
        d.exit();
        assert_eq!(d.frame(10_000.0), FrameControl::Halt);
        let rec = d.session().outcomes();
        assert_eq!(rec.exits, 1);
        assert_eq!(rec.losses, 0);
        assert!(rec.wins.is_empty());
    }

    #[test]
    fn test_restart_resumes() {
        let mut d = driver(4.0, 180.0, 5, false);
        d.session_mut().flap();
        run_headless(&mut d, 10_000);
        assert!(!d.is_running());

        d.restart(18);
        assert!(d.is_running());
        assert_eq!(d.session().state().phase, GamePhase::PreStart);
        assert_eq!(d.frame(50_000.0), FrameControl::Continue);
    }

    #[test]
    fn test_one_tick_per_frame_regardless_of_gap() {
        let mut d = driver(4.0, 180.0, 5, true);
        d.frame(0.0);
        d.frame(10_000.0);
        assert_eq!(d.session().state().time_ticks, 2);
    }

    proptest! {
        #[test]
        fn prop_outcomes_fire_at_most_once(seed in any::<u64>(), autopilot in any::<bool>(), flaps in prop::collection::vec(any::<bool>(), 0..400)) {
            let level = LevelConfig::numbered((seed % 30) as u32 + 1);
            let mut session = Session::new(level, seed, Recorder::default());
            session.set_autopilot(autopilot);
            let mut d = Driver::new(session);
            for (i, flap) in flaps.iter().chain(std::iter::repeat(&false).take(2000)).enumerate() {
                if *flap {
                    d.session_mut().flap();
                }
                if d.frame(i as f64 * FRAME_MS) == FrameControl::Halt {
                    break;
                }
            }
            let rec = d.session().outcomes();
            prop_assert!(rec.losses <= 1);
            prop_assert!(rec.wins.len() <= 1);
            prop_assert!(rec.losses == 0 || rec.wins.is_empty());
            if let Some(&eggs) = rec.wins.first() {
                prop_assert_eq!(eggs, d.session().state().eggs);
                prop_assert!(d.session().state().score >= d.session().state().level.pipes_to_pass);
            }
        }
    }
}
