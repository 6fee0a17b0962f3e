//! Read-only view of a session for rendering and HUD display

use serde::Serialize;

use super::state::{GamePhase, GameState};

/// One pipe as the renderer sees it
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct PipeView {
    pub x: f32,
    pub top_height: f32,
    pub gap: f32,
    /// Center y of an uncollected egg
    pub egg_y: Option<f32>,
}

/// Everything needed to draw one frame
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Snapshot {
    pub level_id: u32,
    pub phase: GamePhase,
    pub bird_y: f32,
    pub bird_vel: f32,
    pub pipes: Vec<PipeView>,
    pub score: u32,
    pub target: u32,
    pub eggs: u32,
    pub distance: f32,
    pub ticks: u64,
}

impl Snapshot {
    pub fn capture(state: &GameState) -> Self {
        let gap = state.level.gap_size;
        Self {
            level_id: state.level.id,
            phase: state.phase,
            bird_y: state.bird.y,
            bird_vel: state.bird.vel,
            pipes: state
                .pipes
                .iter()
                .map(|pipe| PipeView {
                    x: pipe.x,
                    top_height: pipe.top_height,
                    gap,
                    egg_y: pipe.egg.filter(|egg| !egg.collected).map(|egg| egg.y),
                })
                .collect(),
            score: state.score,
            target: state.level.pipes_to_pass,
            eggs: state.eggs,
            distance: state.distance,
            ticks: state.time_ticks,
        }
    }

    /// "score / target" progress text for the HUD
    pub fn progress_label(&self) -> String {
        format!("{} / {}", self.score, self.target)
    }

    /// Bird tilt in radians, nose up when rising
    pub fn bird_tilt(&self) -> f32 {
        (self.bird_vel * 0.1).clamp(-0.5, 1.2)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::level::LevelConfig;
    use crate::sim::state::Egg;

    #[test]
    fn test_capture_hides_collected_eggs() {
        let mut state = GameState::new(&LevelConfig::numbered(3), 5);
        state.pipes[0].egg = Some(Egg {
            y: 200.0,
            collected: true,
        });
        let snap = Snapshot::capture(&state);
        assert_eq!(snap.pipes.len(), 1);
        assert_eq!(snap.pipes[0].egg_y, None);
        assert_eq!(snap.pipes[0].gap, state.level.gap_size);
        assert_eq!(snap.progress_label(), format!("0 / {}", state.level.pipes_to_pass));
    }

    #[test]
    fn test_serializes_to_json() {
        let state = GameState::new(&LevelConfig::numbered(1), 5);
        let json = serde_json::to_string(&Snapshot::capture(&state)).unwrap();
        assert!(json.contains("\"phase\":\"PreStart\""));
        assert!(json.contains("\"level_id\":1"));
    }
}
