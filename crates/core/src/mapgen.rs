//! Procedural level generation split into one submodule per phase.

pub mod audit;
pub mod collectibles;
pub mod floors;
pub mod grid;
pub mod ladders;
pub mod level_config;
pub mod model;
pub mod progression;
pub mod spawns;
pub mod tiles;

mod generator;
mod seed;

pub use audit::{Violation, audit_level};
pub use generator::LevelGenerator;
pub use level_config::{LevelConfig, LevelKind, is_bonus_trigger};
pub use model::{
    ChestPlacement, CollectiblePlacement, EnemyBehavior, EnemyPlacement, GeneratedLevel,
    PlacementCommand,
};
pub use progression::{DifficultyTier, MAX_TIERED_LEVEL, TierProfile};
pub use seed::derive_level_seed;

use crate::error::GenerationError;
use crate::random::SeededRandom;
use crate::state::GameProgressState;

/// Builds the level `progress` is on with default settings and a stream derived from `run_seed`.
pub fn generate_level(
    run_seed: u64,
    progress: &GameProgressState,
) -> Result<GeneratedLevel, GenerationError> {
    let seed = derive_level_seed(run_seed, progress.level, progress.in_bonus_level);
    LevelGenerator::default().build(progress, &mut SeededRandom::new(seed))
}
