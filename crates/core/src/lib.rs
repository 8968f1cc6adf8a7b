pub mod content;
pub mod error;
pub mod mapgen;
pub mod random;
pub mod settings;
pub mod state;
pub mod types;

pub use error::GenerationError;
pub use mapgen::{GeneratedLevel, LevelConfig, LevelGenerator, PlacementCommand, generate_level};
pub use random::{RandomSource, ScriptedRandom, SeededRandom};
pub use settings::GeneratorSettings;
pub use state::GameProgressState;
pub use types::*;
