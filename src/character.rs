//! Playable bird skins
//!
//! Purely cosmetic: the simulation never looks at the chosen character.

use serde::{Deserialize, Serialize};

use crate::level::parse_hex_color;

/// Icon painted on the bird
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum CharacterIcon {
    Bird,
    Flame,
    Ghost,
    Zap,
    Crown,
}

/// A purchasable bird skin
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Character {
    pub id: String,
    pub name: String,
    /// Body color as `#rrggbb`
    pub color: String,
    pub icon: CharacterIcon,
    /// Price in eggs
    pub price: u32,
}

impl Character {
    fn new(id: &str, name: &str, color: &str, icon: CharacterIcon, price: u32) -> Self {
        Self {
            id: id.to_string(),
            name: name.to_string(),
            color: color.to_string(),
            icon,
            price,
        }
    }

    /// The built-in roster, cheapest first
    pub fn roster() -> Vec<Character> {
        vec![
            Self::new("bird-1", "Original Blue", "#60A5FA", CharacterIcon::Bird, 0),
            Self::new("bird-2", "Fire Phoenix", "#F87171", CharacterIcon::Flame, 50),
            Self::new("bird-3", "Ghost Flyer", "#E5E7EB", CharacterIcon::Ghost, 150),
            Self::new("bird-4", "Emerald Wing", "#34D399", CharacterIcon::Zap, 300),
            Self::new("bird-5", "Golden King", "#FBBF24", CharacterIcon::Crown, 1000),
        ]
    }

    /// Look up a roster entry
    pub fn find(id: &str) -> Option<Character> {
        Self::roster().into_iter().find(|c| c.id == id)
    }

    /// Look up a roster entry, falling back to the free starter bird
    pub fn by_id(id: &str) -> Character {
        Self::find(id).unwrap_or_else(Self::starter)
    }

    /// The free starter bird
    pub fn starter() -> Character {
        Self::new("bird-1", "Original Blue", "#60A5FA", CharacterIcon::Bird, 0)
    }

    /// Body color as RGBA
    pub fn rgba(&self) -> [f32; 4] {
        parse_hex_color(&self.color).unwrap_or([0.38, 0.65, 0.98, 1.0])
    }
}

impl Default for Character {
    fn default() -> Self {
        Self::starter()
    }
}
