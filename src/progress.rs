//! Player progression: unlocked levels, egg wallet and owned characters
//!
//! Kept in memory for the lifetime of the page. The shell applies session
//! outcomes here; nothing in the simulation reads it.

use serde::{Deserialize, Serialize};

use crate::character::Character;
use crate::error::ProgressError;
use crate::level::TOTAL_LEVELS;

/// Progress of one player
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Progress {
    /// Level played next
    pub current_level: u32,
    /// Highest level the player may pick
    pub unlocked_levels: u32,
    /// Egg wallet
    pub total_eggs: u32,
    /// Character ids owned, starter first
    pub unlocked_characters: Vec<String>,
    pub selected_character: String,
}

impl Default for Progress {
    fn default() -> Self {
        let starter = Character::starter().id;
        Self {
            current_level: 1,
            unlocked_levels: 1,
            total_eggs: 0,
            unlocked_characters: vec![starter.clone()],
            selected_character: starter,
        }
    }
}

impl Progress {
    pub fn new() -> Self {
        Self::default()
    }

    /// Credit a cleared level and advance to the next one
    pub fn apply_win(&mut self, eggs: u32) {
        let next = self.current_level + 1;
        self.total_eggs = self.total_eggs.saturating_add(eggs);
        self.unlocked_levels = self.unlocked_levels.max(next).min(TOTAL_LEVELS);
        self.current_level = next.min(TOTAL_LEVELS);
        log::info!(
            "Level cleared: +{} eggs (wallet {}), {} levels unlocked",
            eggs,
            self.total_eggs,
            self.unlocked_levels
        );
    }

    pub fn owns(&self, character_id: &str) -> bool {
        self.unlocked_characters.iter().any(|id| id == character_id)
    }

    /// Buy a character with eggs
    pub fn purchase(&mut self, character_id: &str) -> Result<(), ProgressError> {
        let character = Character::find(character_id)
            .ok_or_else(|| ProgressError::UnknownCharacter(character_id.to_string()))?;
        if self.owns(&character.id) {
            return Err(ProgressError::AlreadyOwned(character.id));
        }
        if self.total_eggs < character.price {
            return Err(ProgressError::InsufficientEggs {
                price: character.price,
                available: self.total_eggs,
            });
        }

        self.total_eggs -= character.price;
        log::info!("Bought {} for {} eggs", character.name, character.price);
        self.unlocked_characters.push(character.id);
        Ok(())
    }

    /// Equip an owned character
    pub fn select(&mut self, character_id: &str) -> Result<(), ProgressError> {
        if Character::find(character_id).is_none() {
            return Err(ProgressError::UnknownCharacter(character_id.to_string()));
        }
        if !self.owns(character_id) {
            return Err(ProgressError::Locked(character_id.to_string()));
        }
        self.selected_character = character_id.to_string();
        Ok(())
    }

    /// Pick an unlocked level to play next
    pub fn select_level(&mut self, level_id: u32) -> Result<(), ProgressError> {
        if level_id == 0 || level_id > self.unlocked_levels {
            return Err(ProgressError::LevelLocked(level_id));
        }
        self.current_level = level_id;
        Ok(())
    }

    /// The equipped character (starter if the id went stale)
    pub fn character(&self) -> Character {
        Character::by_id(&self.selected_character)
    }
}
