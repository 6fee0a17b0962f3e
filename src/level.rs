//! Level configuration and the built-in level catalog
//!
//! A level is immutable for the lifetime of a session. Difficulty is pure
//! data: speed, gap size, how many pipes must be passed and how often eggs
//! appear. Colors are cosmetic and never read by the simulation.

use serde::{Deserialize, Serialize};

use crate::consts::{MAX_GAP, MIN_GAP};
use crate::error::ConfigError;

/// Number of levels in the built-in catalog
pub const TOTAL_LEVELS: u32 = 30;

const BACKGROUND_COLORS: [&str; 5] = ["#87CEEB", "#98FB98", "#FFB6C1", "#DDA0DD", "#F0E68C"];
const PIPE_COLORS: [&str; 5] = ["#228B22", "#556B2F", "#8B4513", "#483D8B", "#2F4F4F"];

/// Parameters of a single level
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LevelConfig {
    pub id: u32,
    /// Horizontal pipe speed (px/tick)
    pub speed: f32,
    /// Vertical gap between top and bottom pipe segments (px)
    pub gap_size: f32,
    /// Pipes that must be passed to clear the level
    pub pipes_to_pass: u32,
    /// Chance that a spawned pipe carries an egg
    pub egg_probability: f64,
    #[serde(default = "default_background")]
    pub background_color: String,
    #[serde(default = "default_pipe_color")]
    pub pipe_color: String,
}

fn default_background() -> String {
    BACKGROUND_COLORS[0].to_string()
}

fn default_pipe_color() -> String {
    PIPE_COLORS[0].to_string()
}

impl Default for LevelConfig {
    fn default() -> Self {
        Self::numbered(1)
    }
}

impl LevelConfig {
    /// Level `id` of the catalog (ids start at 1)
    pub fn numbered(id: u32) -> Self {
        let id = id.clamp(1, TOTAL_LEVELS);
        let difficulty = id as f32 / TOTAL_LEVELS as f32;
        Self {
            id,
            speed: 2.0 + difficulty * 3.5,
            gap_size: 180.0 - difficulty * 60.0,
            pipes_to_pass: 5 + id,
            egg_probability: 0.25 + difficulty as f64 * 0.35,
            background_color: BACKGROUND_COLORS[id as usize % BACKGROUND_COLORS.len()].to_string(),
            pipe_color: PIPE_COLORS[id as usize % PIPE_COLORS.len()].to_string(),
        }
    }

    /// Parse a custom level from JSON; the result is sanitized
    pub fn from_json(json: &str) -> Result<Self, ConfigError> {
        let level: LevelConfig = serde_json::from_str(json)?;
        parse_hex_color(&level.background_color)?;
        parse_hex_color(&level.pipe_color)?;
        Ok(level.sanitized())
    }

    /// Clamp degenerate values into a playable range.
    ///
    /// The gap is kept within `[MIN_GAP, MAX_GAP]` so the random top-height
    /// range is never empty or negative.
    pub fn sanitized(&self) -> Self {
        let mut level = self.clone();

        let gap = if self.gap_size.is_finite() {
            self.gap_size.clamp(MIN_GAP, MAX_GAP)
        } else {
            MIN_GAP
        };
        if gap != self.gap_size {
            log::warn!(
                "Level {}: gap {} clamped to {}",
                self.id,
                self.gap_size,
                gap
            );
        }
        level.gap_size = gap;

        if !self.speed.is_finite() || self.speed < 0.0 {
            log::warn!("Level {}: speed {} clamped to 0", self.id, self.speed);
            level.speed = 0.0;
        }

        if self.pipes_to_pass == 0 {
            log::warn!("Level {}: pipes_to_pass 0 raised to 1", self.id);
            level.pipes_to_pass = 1;
        }

        level.egg_probability = if self.egg_probability.is_nan() {
            0.0
        } else {
            self.egg_probability.clamp(0.0, 1.0)
        };

        level
    }

    /// Background color as linear RGBA (falls back to sky blue)
    pub fn background_rgba(&self) -> [f32; 4] {
        parse_hex_color(&self.background_color).unwrap_or([0.53, 0.81, 0.92, 1.0])
    }

    /// Pipe color as linear RGBA (falls back to forest green)
    pub fn pipe_rgba(&self) -> [f32; 4] {
        parse_hex_color(&self.pipe_color).unwrap_or([0.13, 0.55, 0.13, 1.0])
    }
}

/// The full built-in level table
pub fn catalog() -> Vec<LevelConfig> {
    (1..=TOTAL_LEVELS).map(LevelConfig::numbered).collect()
}

/// Parse `#rrggbb` into RGBA components in 0..=1
pub fn parse_hex_color(hex: &str) -> Result<[f32; 4], ConfigError> {
    let invalid = || ConfigError::InvalidColor(hex.to_string());
    let digits = hex.strip_prefix('#').ok_or_else(invalid)?;
    if digits.len() != 6 || !digits.is_ascii() {
        return Err(invalid());
    }
    let channel = |i: usize| {
        u8::from_str_radix(&digits[i..i + 2], 16)
            .map(|v| v as f32 / 255.0)
            .map_err(|_| invalid())
    };
    Ok([channel(0)?, channel(2)?, channel(4)?, 1.0])
}
