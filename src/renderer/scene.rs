//! Turns a simulation snapshot into vertices
//!
//! Output is in playfield pixels (origin top-left, y down). The pipeline maps
//! it to clip space.

use glam::Vec2;

use super::shapes::{circle, ellipse, rect, triangle};
use super::vertex::{Vertex, colors};
use crate::character::{Character, CharacterIcon};
use crate::consts::*;
use crate::level::LevelConfig;
use crate::sim::{GamePhase, Snapshot};

/// Colors and toggles that do not come from the simulation
#[derive(Debug, Clone, PartialEq)]
pub struct SceneStyle {
    pub background: [f32; 4],
    pub pipe: [f32; 4],
    pub bird: [f32; 4],
    pub icon: CharacterIcon,
    /// Tilt the bird with its velocity
    pub tilt: bool,
    /// Horizontal offset applied to everything (crash shake)
    pub shake: f32,
}

impl SceneStyle {
    pub fn new(level: &LevelConfig, character: &Character) -> Self {
        Self {
            background: level.background_rgba(),
            pipe: level.pipe_rgba(),
            bird: character.rgba(),
            icon: character.icon,
            tilt: true,
            shake: 0.0,
        }
    }
}

/// Build the full frame
pub fn build(snapshot: &Snapshot, style: &SceneStyle) -> Vec<Vertex> {
    let mut out = Vec::with_capacity(1024);
    let dx = style.shake;

    rect(&mut out, 0.0, 0.0, PLAYFIELD_WIDTH, PLAYFIELD_HEIGHT, style.background);

    for pipe in &snapshot.pipes {
        let x = pipe.x + dx;
        let bottom_top = pipe.top_height + pipe.gap;
        rect(&mut out, x, 0.0, PIPE_WIDTH, pipe.top_height, style.pipe);
        rect(&mut out, x, bottom_top, PIPE_WIDTH, PLAYFIELD_HEIGHT - bottom_top, style.pipe);
        // Lips at the gap edges
        rect(&mut out, x - 4.0, pipe.top_height - 16.0, PIPE_WIDTH + 8.0, 16.0, style.pipe);
        rect(&mut out, x - 4.0, bottom_top, PIPE_WIDTH + 8.0, 16.0, style.pipe);
        rect(&mut out, x - 4.0, pipe.top_height - 4.0, PIPE_WIDTH + 8.0, 4.0, colors::PIPE_LIP);
        rect(&mut out, x - 4.0, bottom_top, PIPE_WIDTH + 8.0, 4.0, colors::PIPE_LIP);

        if let Some(egg_y) = pipe.egg_y {
            let center = Vec2::new(x + PIPE_WIDTH / 2.0, egg_y);
            ellipse(
                &mut out,
                center,
                Vec2::new(EGG_RADIUS_X, EGG_RADIUS_Y),
                0.0,
                colors::EGG,
                20,
            );
            circle(&mut out, center + Vec2::new(-4.0, -5.0), 3.0, colors::EGG_SPOT, 8);
            circle(&mut out, center + Vec2::new(5.0, 4.0), 2.5, colors::EGG_SPOT, 8);
        }
    }

    let ground_top = PLAYFIELD_HEIGHT - GROUND_HEIGHT;
    rect(&mut out, 0.0, ground_top, PLAYFIELD_WIDTH, GROUND_HEIGHT, colors::GROUND);
    rect(&mut out, 0.0, ground_top, PLAYFIELD_WIDTH, 4.0, colors::GRASS);

    bird(&mut out, snapshot, style);

    out
}

fn bird(out: &mut Vec<Vertex>, snapshot: &Snapshot, style: &SceneStyle) {
    let half = BIRD_SIZE / 2.0;
    let center = Vec2::new(BIRD_X + half + style.shake, snapshot.bird_y + half);
    let angle = if style.tilt { snapshot.bird_tilt() } else { 0.0 };
    let rot = Vec2::from_angle(angle);
    let at = |local: Vec2| center + rot.rotate(local);

    ellipse(out, center, Vec2::new(half, half * 0.85), angle, style.bird, 24);
    // Wing
    ellipse(out, at(Vec2::new(-6.0, 4.0)), Vec2::new(9.0, 5.0), angle - 0.3, colors::SHADE, 12);

    // Eye and beak face forward (+x)
    circle(out, at(Vec2::new(7.0, -6.0)), 6.0, colors::EYE, 12);
    let pupil = if snapshot.phase == GamePhase::GameOver {
        // Dazed: pupil rolls up
        Vec2::new(8.0, -9.0)
    } else {
        Vec2::new(9.0, -6.0)
    };
    circle(out, at(pupil), 2.5, colors::PUPIL, 8);
    triangle(
        out,
        at(Vec2::new(12.0, -1.0)),
        at(Vec2::new(22.0, 3.0)),
        at(Vec2::new(12.0, 7.0)),
        colors::BEAK,
    );

    icon(out, &at, style);
}

/// Small crest on top of the head telling the skins apart
fn icon(out: &mut Vec<Vertex>, at: &impl Fn(Vec2) -> Vec2, style: &SceneStyle) {
    let accent = colors::BEAK;
    match style.icon {
        CharacterIcon::Bird => {}
        CharacterIcon::Flame => {
            for (x, h) in [(-6.0, 10.0), (0.0, 14.0), (6.0, 9.0)] {
                triangle(
                    out,
                    at(Vec2::new(x - 3.0, -13.0)),
                    at(Vec2::new(x, -13.0 - h)),
                    at(Vec2::new(x + 3.0, -13.0)),
                    accent,
                );
            }
        }
        CharacterIcon::Ghost => {
            let mut faded = style.bird;
            faded[3] = 0.45;
            ellipse(out, at(Vec2::new(-14.0, 6.0)), Vec2::new(8.0, 6.0), 0.0, faded, 12);
        }
        CharacterIcon::Zap => {
            triangle(
                out,
                at(Vec2::new(-2.0, -26.0)),
                at(Vec2::new(-6.0, -14.0)),
                at(Vec2::new(1.0, -17.0)),
                accent,
            );
            triangle(
                out,
                at(Vec2::new(1.0, -20.0)),
                at(Vec2::new(-3.0, -17.0)),
                at(Vec2::new(4.0, -9.0)),
                accent,
            );
        }
        CharacterIcon::Crown => {
            let gold = [1.0, 0.84, 0.0, 1.0];
            let base = -13.0;
            for x in [-8.0, 0.0, 8.0] {
                triangle(
                    out,
                    at(Vec2::new(x - 4.0, base)),
                    at(Vec2::new(x, base - 9.0)),
                    at(Vec2::new(x + 4.0, base)),
                    gold,
                );
            }
        }
    }
}
