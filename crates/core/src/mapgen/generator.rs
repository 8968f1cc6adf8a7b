//! High-level level generation that composes floors, ladders, tiles, items and spawns.

mod doors;
mod pipeline;

use crate::error::GenerationError;
use crate::random::RandomSource;
use crate::settings::GeneratorSettings;
use crate::state::GameProgressState;

use super::level_config::LevelConfig;
use super::model::GeneratedLevel;

#[derive(Clone, Debug, Default)]
pub struct LevelGenerator {
    settings: GeneratorSettings,
}

impl LevelGenerator {
    pub fn new(settings: GeneratorSettings) -> Self {
        Self { settings }
    }

    pub fn settings(&self) -> &GeneratorSettings {
        &self.settings
    }

    /// Builds whatever `progress` is about to play: a regular, endless or bonus level.
    pub fn build(
        &self,
        progress: &GameProgressState,
        rng: &mut dyn RandomSource,
    ) -> Result<GeneratedLevel, GenerationError> {
        let config = progress.current_config()?;
        Ok(self.build_config(config, rng))
    }

    pub fn build_config(&self, config: LevelConfig, rng: &mut dyn RandomSource) -> GeneratedLevel {
        pipeline::build_level(&self.settings, config, rng)
    }

    /// Adds the next floor to an endless level; other levels are left untouched.
    pub fn extend_endless(&self, level: &mut GeneratedLevel, rng: &mut dyn RandomSource) {
        pipeline::extend_endless(&self.settings, level, rng);
    }
}
