//! Difficulty tiers and the level-number curves that drive enemy spawning.

use std::ops::RangeInclusive;

use serde::{Deserialize, Serialize};

use crate::types::EnemyKind;

/// Highest level with its own difficulty; later (endless) levels reuse it.
pub const MAX_TIERED_LEVEL: u32 = 50;
pub const BEAST_SPEED_MULTIPLIER: f64 = 1.25;

#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum DifficultyTier {
    TutorialEarly,
    TutorialLate,
    Patrol,
    Hopper,
    Blocker,
    Pressure,
    Gauntlet,
    Elite,
    Beast,
}

const TUTORIAL_EARLY_WEIGHTS: &[(EnemyKind, f64)] = &[
    (EnemyKind::Caterpillar, 0.4),
    (EnemyKind::Beetle, 0.4),
    (EnemyKind::BlueCaterpillar, 0.2),
];
const TUTORIAL_LATE_WEIGHTS: &[(EnemyKind, f64)] = &[
    (EnemyKind::Caterpillar, 0.3),
    (EnemyKind::Beetle, 0.3),
    (EnemyKind::BlueCaterpillar, 0.25),
    (EnemyKind::Frog, 0.15),
];
const PATROL_WEIGHTS: &[(EnemyKind, f64)] = &[
    (EnemyKind::Caterpillar, 0.25),
    (EnemyKind::Beetle, 0.25),
    (EnemyKind::BlueCaterpillar, 0.2),
    (EnemyKind::Frog, 0.15),
    (EnemyKind::Rhino, 0.15),
];
const HOPPER_WEIGHTS: &[(EnemyKind, f64)] = &[
    (EnemyKind::Caterpillar, 0.2),
    (EnemyKind::Beetle, 0.2),
    (EnemyKind::BlueCaterpillar, 0.2),
    (EnemyKind::Frog, 0.15),
    (EnemyKind::Flea, 0.1),
    (EnemyKind::Rhino, 0.15),
];
const BLOCKER_WEIGHTS: &[(EnemyKind, f64)] = &[
    (EnemyKind::Caterpillar, 0.15),
    (EnemyKind::Beetle, 0.15),
    (EnemyKind::BlueCaterpillar, 0.15),
    (EnemyKind::Frog, 0.15),
    (EnemyKind::Flea, 0.1),
    (EnemyKind::Rhino, 0.15),
    (EnemyKind::Blu, 0.15),
];
const PRESSURE_WEIGHTS: &[(EnemyKind, f64)] = &[
    (EnemyKind::Caterpillar, 0.1),
    (EnemyKind::Beetle, 0.15),
    (EnemyKind::BlueCaterpillar, 0.15),
    (EnemyKind::Frog, 0.15),
    (EnemyKind::Flea, 0.15),
    (EnemyKind::Rhino, 0.15),
    (EnemyKind::Blu, 0.15),
];
const GAUNTLET_WEIGHTS: &[(EnemyKind, f64)] = &[
    (EnemyKind::Caterpillar, 0.05),
    (EnemyKind::Beetle, 0.1),
    (EnemyKind::BlueCaterpillar, 0.15),
    (EnemyKind::Frog, 0.15),
    (EnemyKind::Flea, 0.15),
    (EnemyKind::Rhino, 0.2),
    (EnemyKind::Blu, 0.2),
];
const ELITE_WEIGHTS: &[(EnemyKind, f64)] = &[
    (EnemyKind::Beetle, 0.1),
    (EnemyKind::BlueCaterpillar, 0.15),
    (EnemyKind::Frog, 0.15),
    (EnemyKind::Flea, 0.2),
    (EnemyKind::Rhino, 0.2),
    (EnemyKind::Blu, 0.2),
];
const BEAST_WEIGHTS: &[(EnemyKind, f64)] = &[
    (EnemyKind::Beetle, 0.05),
    (EnemyKind::BlueCaterpillar, 0.15),
    (EnemyKind::Frog, 0.2),
    (EnemyKind::Flea, 0.2),
    (EnemyKind::Rhino, 0.2),
    (EnemyKind::Blu, 0.2),
];

impl DifficultyTier {
    pub const ALL: [DifficultyTier; 9] = [
        DifficultyTier::TutorialEarly,
        DifficultyTier::TutorialLate,
        DifficultyTier::Patrol,
        DifficultyTier::Hopper,
        DifficultyTier::Blocker,
        DifficultyTier::Pressure,
        DifficultyTier::Gauntlet,
        DifficultyTier::Elite,
        DifficultyTier::Beast,
    ];

    pub fn for_level(level: u32) -> Self {
        match spawn_level(level) {
            0..=3 => DifficultyTier::TutorialEarly,
            4..=6 => DifficultyTier::TutorialLate,
            7..=10 => DifficultyTier::Patrol,
            11..=14 => DifficultyTier::Hopper,
            15..=20 => DifficultyTier::Blocker,
            21..=30 => DifficultyTier::Pressure,
            31..=40 => DifficultyTier::Gauntlet,
            41..=49 => DifficultyTier::Elite,
            _ => DifficultyTier::Beast,
        }
    }

    pub fn levels(self) -> RangeInclusive<u32> {
        match self {
            DifficultyTier::TutorialEarly => 1..=3,
            DifficultyTier::TutorialLate => 4..=6,
            DifficultyTier::Patrol => 7..=10,
            DifficultyTier::Hopper => 11..=14,
            DifficultyTier::Blocker => 15..=20,
            DifficultyTier::Pressure => 21..=30,
            DifficultyTier::Gauntlet => 31..=40,
            DifficultyTier::Elite => 41..=49,
            DifficultyTier::Beast => MAX_TIERED_LEVEL..=u32::MAX,
        }
    }

    pub fn name(self) -> &'static str {
        match self {
            DifficultyTier::TutorialEarly => "tutorial_early",
            DifficultyTier::TutorialLate => "tutorial_late",
            DifficultyTier::Patrol => "patrol",
            DifficultyTier::Hopper => "hopper",
            DifficultyTier::Blocker => "blocker",
            DifficultyTier::Pressure => "pressure",
            DifficultyTier::Gauntlet => "gauntlet",
            DifficultyTier::Elite => "elite",
            DifficultyTier::Beast => "beast",
        }
    }

    /// Spawn weights of every kind this tier can field; absent kinds weigh zero.
    pub fn spawn_weights(self) -> &'static [(EnemyKind, f64)] {
        match self {
            DifficultyTier::TutorialEarly => TUTORIAL_EARLY_WEIGHTS,
            DifficultyTier::TutorialLate => TUTORIAL_LATE_WEIGHTS,
            DifficultyTier::Patrol => PATROL_WEIGHTS,
            DifficultyTier::Hopper => HOPPER_WEIGHTS,
            DifficultyTier::Blocker => BLOCKER_WEIGHTS,
            DifficultyTier::Pressure => PRESSURE_WEIGHTS,
            DifficultyTier::Gauntlet => GAUNTLET_WEIGHTS,
            DifficultyTier::Elite => ELITE_WEIGHTS,
            DifficultyTier::Beast => BEAST_WEIGHTS,
        }
    }

    pub fn weight_of(self, kind: EnemyKind) -> f64 {
        self.spawn_weights()
            .iter()
            .find(|(candidate, _)| *candidate == kind)
            .map_or(0.0, |&(_, weight)| weight)
    }

    pub fn max_enemies_per_floor(self) -> usize {
        match self {
            DifficultyTier::TutorialEarly | DifficultyTier::TutorialLate => 2,
            DifficultyTier::Patrol | DifficultyTier::Hopper | DifficultyTier::Blocker => 3,
            DifficultyTier::Pressure | DifficultyTier::Gauntlet => 4,
            DifficultyTier::Elite | DifficultyTier::Beast => 5,
        }
    }
}

/// Everything the enemy spawner needs to know about one level's difficulty.
#[derive(Clone, Debug, PartialEq, Serialize)]
pub struct TierProfile {
    pub tier: DifficultyTier,
    pub max_enemies_per_floor: usize,
    pub speed_multiplier: f64,
    pub zone_size: usize,
    pub blocker_max_per_floor: usize,
}

impl TierProfile {
    pub fn for_level(level: u32) -> Self {
        let tier = DifficultyTier::for_level(level);
        Self {
            tier,
            max_enemies_per_floor: tier.max_enemies_per_floor(),
            speed_multiplier: speed_multiplier(level),
            zone_size: zone_size(level),
            blocker_max_per_floor: blocker_max_per_floor(level),
        }
    }

    pub fn spawn_weights(&self) -> &'static [(EnemyKind, f64)] {
        self.tier.spawn_weights()
    }
}

/// Level used for every spawn table lookup; endless levels stop escalating.
pub fn spawn_level(level: u32) -> u32 {
    level.min(MAX_TIERED_LEVEL)
}

/// 1.00 at level 1 rising to 1.25 at level 50 across five ten-level phases.
pub fn speed_multiplier(level: u32) -> f64 {
    let level = spawn_level(level).max(1);
    if level >= MAX_TIERED_LEVEL {
        return BEAST_SPEED_MULTIPLIER;
    }
    let phase = (level - 1) / 10;
    let step = (level - 1) % 10;
    let progress = f64::from(phase * 9 + step) / 45.0;
    1.0 + (BEAST_SPEED_MULTIPLIER - 1.0) * progress
}

/// Tiles per spawn zone; smaller zones mean denser, more even spawns.
pub fn zone_size(level: u32) -> usize {
    match level {
        0..=10 => 6,
        11..=30 => 5,
        _ => 4,
    }
}

pub fn blocker_max_per_floor(level: u32) -> usize {
    if level <= 14 { 0 } else { 1 }
}

pub fn enemy_count_range(level: u32) -> RangeInclusive<usize> {
    if level <= 1 {
        return 1..=1;
    }
    let max = DifficultyTier::for_level(level).max_enemies_per_floor();
    max.saturating_sub(1).max(1)..=max
}
