//! Tunable generator settings, loadable from TOML.

use std::fs;
use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::error::GenerationError;

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct GeneratorSettings {
    pub tile_size_px: f64,
    /// Vertical distance between two floor surfaces.
    pub floor_spacing_px: f64,
    pub gap_chance: f64,
    pub door_exclusion_radius: usize,
    pub anti_stack_radius: usize,
    pub ground_ladder_separation: usize,
    pub ground_ladder_min_separation: usize,
}

impl Default for GeneratorSettings {
    fn default() -> Self {
        Self {
            tile_size_px: 32.0,
            floor_spacing_px: 128.0,
            gap_chance: 0.7,
            door_exclusion_radius: 2,
            anti_stack_radius: 3,
            ground_ladder_separation: 6,
            ground_ladder_min_separation: 3,
        }
    }
}

impl GeneratorSettings {
    pub fn from_toml_str(raw: &str) -> Result<Self, GenerationError> {
        let settings: Self =
            toml::from_str(raw).map_err(|e| GenerationError::Settings(e.to_string()))?;
        settings.validate()?;
        Ok(settings)
    }

    pub fn load(path: &Path) -> Result<Self, GenerationError> {
        let raw = fs::read_to_string(path)?;
        Self::from_toml_str(&raw)
    }

    pub fn validate(&self) -> Result<(), GenerationError> {
        if !(0.0..=1.0).contains(&self.gap_chance) {
            return Err(GenerationError::Settings(format!(
                "gap_chance must be within [0, 1], got {}",
                self.gap_chance
            )));
        }
        if self.tile_size_px <= 0.0 || self.floor_spacing_px <= 0.0 {
            return Err(GenerationError::Settings("pixel sizes must be positive".to_string()));
        }
        if self.ground_ladder_min_separation == 0
            || self.ground_ladder_min_separation > self.ground_ladder_separation
        {
            return Err(GenerationError::Settings(format!(
                "ground ladder separation must satisfy 0 < min ({}) <= preferred ({})",
                self.ground_ladder_min_separation, self.ground_ladder_separation
            )));
        }
        Ok(())
    }

    /// Left edge of a tile column, or any fractional tile x, in pixels.
    pub fn column_to_px(&self, tile_x: f64) -> f64 {
        tile_x * self.tile_size_px
    }

    /// Surface height of a floor in pixels, measured upward from the ground floor.
    pub fn floor_to_px(&self, floor_index: usize) -> f64 {
        floor_index as f64 * self.floor_spacing_px
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;
    use tempfile::NamedTempFile;

    #[test]
    fn partial_toml_keeps_defaults_for_missing_keys() {
        let settings = GeneratorSettings::from_toml_str("gap_chance = 0.5\n").expect("parse");
        assert_eq!(settings.gap_chance, 0.5);
        assert_eq!(settings.door_exclusion_radius, 2);
        assert_eq!(settings.ground_ladder_separation, 6);
    }

    #[test]
    fn rejects_out_of_range_gap_chance() {
        let err = GeneratorSettings::from_toml_str("gap_chance = 1.5\n").expect_err("invalid");
        assert!(matches!(err, GenerationError::Settings(_)));
    }

    #[test]
    fn rejects_min_separation_above_preferred() {
        let raw = "ground_ladder_separation = 4\nground_ladder_min_separation = 5\n";
        assert!(GeneratorSettings::from_toml_str(raw).is_err());
    }

    #[test]
    fn rejects_malformed_toml() {
        let err = GeneratorSettings::from_toml_str("gap_chance = [").expect_err("malformed");
        assert!(matches!(err, GenerationError::Settings(_)));
    }

    #[test]
    fn loads_settings_from_file() {
        let mut file = NamedTempFile::new().expect("tempfile");
        writeln!(file, "tile_size_px = 16.0\nanti_stack_radius = 4").expect("write");
        let settings = GeneratorSettings::load(file.path()).expect("load");
        assert_eq!(settings.tile_size_px, 16.0);
        assert_eq!(settings.anti_stack_radius, 4);
    }

    #[test]
    fn missing_file_is_an_io_error() {
        let dir = tempfile::tempdir().expect("tempdir");
        let err = GeneratorSettings::load(&dir.path().join("absent.toml")).expect_err("missing");
        assert!(matches!(err, GenerationError::Io(_)));
    }

    #[test]
    fn pixel_projection_uses_tile_and_floor_sizes() {
        let settings = GeneratorSettings::default();
        assert_eq!(settings.column_to_px(1.5), 48.0);
        assert_eq!(settings.floor_to_px(3), 384.0);
    }
}
