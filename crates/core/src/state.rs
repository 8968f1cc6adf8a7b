//! Run progress that survives level rebuilds: level number, lives and score.

use serde::{Deserialize, Serialize};

use crate::error::GenerationError;
use crate::mapgen::level_config::{LevelConfig, is_bonus_trigger};

pub const STARTING_LIVES: u32 = 3;

#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct GameProgressState {
    pub level: u32,
    pub lives: u32,
    pub score: u64,
    /// Playing the bonus stage that follows `level`.
    pub in_bonus_level: bool,
}

impl Default for GameProgressState {
    fn default() -> Self {
        Self::new()
    }
}

impl GameProgressState {
    pub fn new() -> Self {
        Self { level: 1, lives: STARTING_LIVES, score: 0, in_bonus_level: false }
    }

    pub fn at_level(level: u32) -> Self {
        Self { level, ..Self::new() }
    }

    pub fn current_config(&self) -> Result<LevelConfig, GenerationError> {
        if self.in_bonus_level {
            LevelConfig::bonus_after(self.level)
        } else {
            LevelConfig::for_level(self.level)
        }
    }

    /// Moves to whatever is played next: the bonus stage or the next level.
    pub fn complete_level(&mut self) {
        if !self.in_bonus_level && is_bonus_trigger(self.level) {
            self.in_bonus_level = true;
            return;
        }
        self.in_bonus_level = false;
        self.level = self.level.saturating_add(1);
    }

    /// Returns true once the last life is gone.
    pub fn lose_life(&mut self) -> bool {
        self.lives = self.lives.saturating_sub(1);
        self.lives == 0
    }

    pub fn add_score(&mut self, points: u32) {
        self.score = self.score.saturating_add(u64::from(points));
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn new_run_starts_on_level_one() {
        let state = GameProgressState::new();
        assert_eq!(state.level, 1);
        assert_eq!(state.lives, 3);
        assert_eq!(state.score, 0);
        assert!(!state.current_config().expect("valid").is_bonus());
    }

    #[test]
    fn every_tenth_level_leads_into_a_bonus_stage() {
        let mut state = GameProgressState::at_level(10);
        state.complete_level();
        assert!(state.in_bonus_level);
        assert_eq!(state.level, 10);
        let config = state.current_config().expect("valid");
        assert!(config.is_bonus());
        assert_eq!(config.display_level(), 10);

        state.complete_level();
        assert!(!state.in_bonus_level);
        assert_eq!(state.level, 11);
    }

    #[test]
    fn ordinary_and_endless_levels_advance_directly() {
        let mut state = GameProgressState::at_level(7);
        state.complete_level();
        assert_eq!((state.level, state.in_bonus_level), (8, false));

        let mut state = GameProgressState::at_level(60);
        state.complete_level();
        assert_eq!((state.level, state.in_bonus_level), (61, false));
    }

    #[test]
    fn losing_the_last_life_ends_the_run() {
        let mut state = GameProgressState::new();
        assert!(!state.lose_life());
        assert!(!state.lose_life());
        assert!(state.lose_life());
        assert!(state.lose_life());
        assert_eq!(state.lives, 0);
    }

    #[test]
    fn score_accumulates() {
        let mut state = GameProgressState::new();
        state.add_score(100);
        state.add_score(1_000);
        assert_eq!(state.score, 1_100);
    }

    #[test]
    fn level_zero_is_a_contract_violation() {
        let state = GameProgressState::at_level(0);
        assert!(matches!(state.current_config(), Err(GenerationError::InvalidLevel(0))));
    }
}
