//! Level number to layout size, unlocked collectibles, and difficulty.

use serde::Serialize;

use crate::error::GenerationError;
use crate::types::CollectibleKind;

use super::progression::{MAX_TIERED_LEVEL, TierProfile};

pub const BONUS_FLOOR_COUNT: usize = 5;
pub const ENDLESS_INITIAL_FLOORS: usize = 30;
pub const FIRST_ENDLESS_LEVEL: u32 = MAX_TIERED_LEVEL + 1;
pub const FIRST_CHEST_LEVEL: u32 = 2;

#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum LevelKind {
    Regular,
    /// Beast mode: floors keep being appended as the player climbs.
    Endless,
    Bonus { display_level: u32 },
}

#[derive(Clone, Debug, PartialEq, Serialize)]
pub struct LevelConfig {
    pub level: u32,
    pub kind: LevelKind,
    pub floor_count: usize,
    pub world_width: usize,
    pub collectible_kinds: Vec<CollectibleKind>,
    pub treasure_chests_enabled: bool,
    pub difficulty: TierProfile,
}

impl LevelConfig {
    pub fn for_level(level: u32) -> Result<Self, GenerationError> {
        if level == 0 {
            return Err(GenerationError::InvalidLevel(level));
        }
        let endless = level >= FIRST_ENDLESS_LEVEL;
        Ok(Self {
            level,
            kind: if endless { LevelKind::Endless } else { LevelKind::Regular },
            floor_count: floor_count_for_level(level),
            world_width: world_width_for_level(level),
            collectible_kinds: collectibles_for_level(level),
            treasure_chests_enabled: level >= FIRST_CHEST_LEVEL,
            difficulty: TierProfile::for_level(level),
        })
    }

    /// The bonus stage played after clearing `level`; shows `level` on the HUD.
    pub fn bonus_after(level: u32) -> Result<Self, GenerationError> {
        let regular = Self::for_level(level)?;
        Ok(Self {
            kind: LevelKind::Bonus { display_level: level },
            floor_count: BONUS_FLOOR_COUNT,
            treasure_chests_enabled: true,
            ..regular
        })
    }

    pub fn is_endless(&self) -> bool {
        self.kind == LevelKind::Endless
    }

    pub fn is_bonus(&self) -> bool {
        matches!(self.kind, LevelKind::Bonus { .. })
    }

    pub fn display_level(&self) -> u32 {
        match self.kind {
            LevelKind::Bonus { display_level } => display_level,
            LevelKind::Regular | LevelKind::Endless => self.level,
        }
    }

    /// Topmost floor of a discrete level; endless levels have no exit door.
    pub fn door_floor(&self) -> Option<usize> {
        if self.is_endless() { None } else { self.floor_count.checked_sub(1) }
    }

    pub fn enemies_enabled(&self) -> bool {
        !self.is_bonus()
    }
}

pub fn floor_count_for_level(level: u32) -> usize {
    let level = level.max(1) as usize;
    match level {
        1..=10 => 10 + (2 * (level - 1)) / 9,
        11..=25 => 13 + (5 * (level - 11)) / 14,
        26..=40 => 19 + (6 * (level - 26)) / 14,
        41..=50 => 25 + (5 * (level - 41)) / 9,
        _ => ENDLESS_INITIAL_FLOORS,
    }
}

pub fn world_width_for_level(level: u32) -> usize {
    match level {
        0..=24 => 24,
        25..=49 => 32,
        _ => 40,
    }
}

pub fn collectibles_for_level(level: u32) -> Vec<CollectibleKind> {
    let unlocked = match level {
        0..=2 => 1,
        3 => 2,
        4 => 3,
        5 => 4,
        _ => CollectibleKind::ALL.len(),
    };
    CollectibleKind::ALL[..unlocked].to_vec()
}

/// Clearing one of these levels leads into a bonus stage first.
pub fn is_bonus_trigger(level: u32) -> bool {
    level > 0 && level <= MAX_TIERED_LEVEL && level % 10 == 0
}
