//! Generation options and configuration file loading

use serde::{Deserialize, Serialize};
use std::path::Path;
use strum::Display;

use crate::errors::ConfigError;

/// Shape of the region rooms are spawned into.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize, Display)]
#[serde(rename_all = "lowercase")]
#[strum(serialize_all = "lowercase")]
pub enum SpawnShape {
    #[default]
    Oval,
    Rectangle,
}

/// All knobs recognized by the generation pipeline.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct GenConfig {
    /// Shape of the random spawn region.
    pub spawn_shape: SpawnShape,
    /// Half-extents of the spawn region.
    pub spawn_region: (i32, i32),
    /// How many rooms to spawn in total.
    pub generate_rooms: usize,
    /// How many of them to select as main rooms.
    pub select_rooms: usize,
    /// Size range (min, max) for main-room candidates; sizes are drawn
    /// per axis and doubled, so footprints are always even.
    pub room_size: (i32, i32),
    /// Size range for the remaining small rooms.
    pub small_room_size: (i32, i32),
    /// Overlap tolerance subtracted from the shared extent when
    /// deciding between a straight and an L-shaped corridor.
    pub overlap_width: i32,
    /// Cellular-automata threshold, 1-9. 9 disables smoothing (a cell
    /// has only 8 neighbors).
    pub smooth_level: u32,
    /// Bound on the settle relaxation before the layout is used as-is.
    pub max_settle_iterations: u32,
}

impl Default for GenConfig {
    fn default() -> Self {
        Self {
            spawn_shape: SpawnShape::Oval,
            spawn_region: (20, 12),
            generate_rooms: 60,
            select_rooms: 8,
            room_size: (4, 10),
            small_room_size: (2, 5),
            overlap_width: 2,
            smooth_level: 5,
            max_settle_iterations: 200,
        }
    }
}

impl GenConfig {
    /// Load a config from a JSON file and validate it.
    pub fn load_from_file(path: &Path) -> Result<Self, ConfigError> {
        let contents =
            std::fs::read_to_string(path).map_err(|e| ConfigError::Io(e.to_string()))?;
        let config: GenConfig =
            serde_json::from_str(&contents).map_err(|e| ConfigError::Parse(e.to_string()))?;
        config.validate()?;
        Ok(config)
    }

    /// Check cross-field constraints.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.generate_rooms == 0 {
            return Err(ConfigError::Invalid("generate_rooms must be > 0".into()));
        }
        if self.select_rooms < 3 {
            return Err(ConfigError::Invalid(
                "select_rooms must be at least 3 (triangulation needs 3 points)".into(),
            ));
        }
        if self.select_rooms > self.generate_rooms {
            return Err(ConfigError::Invalid(
                "select_rooms cannot exceed generate_rooms".into(),
            ));
        }
        for (name, (lo, hi)) in [
            ("room_size", self.room_size),
            ("small_room_size", self.small_room_size),
        ] {
            if lo <= 0 || hi < lo {
                return Err(ConfigError::Invalid(format!(
                    "{name} must satisfy 0 < min <= max"
                )));
            }
        }
        if self.spawn_region.0 <= 0 || self.spawn_region.1 <= 0 {
            return Err(ConfigError::Invalid("spawn_region must be positive".into()));
        }
        if self.overlap_width < 0 {
            return Err(ConfigError::Invalid("overlap_width must be >= 0".into()));
        }
        if !(1..=9).contains(&self.smooth_level) {
            return Err(ConfigError::Invalid("smooth_level must be 1-9".into()));
        }
        Ok(())
    }
}
