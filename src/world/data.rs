//! Level data structures and RON loading.

use bevy::prelude::*;
use serde::Deserialize;

use crate::core::{load_ron, parse_ron, DataLoadError};

/// Default location of the level file.
pub const LEVEL_PATH: &str = "assets/data/level.ron";

/// Solid, walkable or blocking geometry.
#[derive(Debug, Clone, Deserialize)]
pub struct BlockDef {
    /// Center position
    pub position: (f32, f32),
    /// Width and height
    pub size: (f32, f32),
    /// Counter-clockwise rotation in degrees
    #[serde(default)]
    pub angle: f32,
}

/// Sensor area that hurts whatever enters it.
#[derive(Debug, Clone, Deserialize)]
pub struct HazardDef {
    pub position: (f32, f32),
    pub size: (f32, f32),
    pub damage: i32,
}

/// A whole level: geometry, hazards and respawn points.
#[derive(Resource, Debug, Clone, Deserialize)]
pub struct LevelDefinition {
    pub name: String,
    pub blocks: Vec<BlockDef>,
    #[serde(default)]
    pub hazards: Vec<HazardDef>,
    /// Respawn points in activation order; the first one is the spawn
    pub checkpoints: Vec<(f32, f32)>,
}

impl LevelDefinition {
    /// Position of checkpoint `index`, if it exists.
    pub fn checkpoint(&self, index: usize) -> Option<Vec2> {
        self.checkpoints.get(index).map(|&(x, y)| Vec2::new(x, y))
    }

    pub fn spawn_point(&self) -> Vec2 {
        self.checkpoint(0).unwrap_or(Vec2::ZERO)
    }

    /// Check that the level can be built.
    pub fn validate(&self) -> Result<(), String> {
        if self.checkpoints.is_empty() {
            return Err(format!("level '{}' has no checkpoints", self.name));
        }
        for (i, block) in self.blocks.iter().enumerate() {
            if block.size.0 <= 0.0 || block.size.1 <= 0.0 {
                return Err(format!("block {} has a non-positive size", i));
            }
        }
        for (i, hazard) in self.hazards.iter().enumerate() {
            if hazard.size.0 <= 0.0 || hazard.size.1 <= 0.0 {
                return Err(format!("hazard {} has a non-positive size", i));
            }
            if hazard.damage < 0 {
                return Err(format!("hazard {} has negative damage", i));
            }
        }
        Ok(())
    }

    pub fn parse(contents: &str, path: &str) -> Result<Self, DataLoadError> {
        let level: Self = parse_ron(contents, path)?;
        level.checked(path)
    }

    pub fn load_from(path: &str) -> Result<Self, DataLoadError> {
        let level: Self = load_ron(path)?;
        level.checked(path)
    }

    fn checked(self, path: &str) -> Result<Self, DataLoadError> {
        self.validate().map_err(|details| DataLoadError::Invalid {
            path: path.to_string(),
            details,
        })?;
        Ok(self)
    }
}

impl Default for LevelDefinition {
    /// Small test course: flat ground, a walkable slope, a slope too steep
    /// to stand on, a spike pit and two checkpoints.
    fn default() -> Self {
        Self {
            name: "Test Course".to_string(),
            blocks: vec![
                BlockDef { position: (0.0, -200.0), size: (2000.0, 40.0), angle: 0.0 },
                BlockDef { position: (1000.0, -120.0), size: (400.0, 40.0), angle: 25.0 },
                BlockDef { position: (1500.0, -40.0), size: (600.0, 40.0), angle: 0.0 },
                BlockDef { position: (-900.0, 0.0), size: (400.0, 40.0), angle: -60.0 },
                BlockDef { position: (1900.0, -250.0), size: (200.0, 20.0), angle: 0.0 },
                BlockDef { position: (2300.0, -200.0), size: (600.0, 40.0), angle: 0.0 },
            ],
            hazards: vec![HazardDef {
                position: (1900.0, -220.0),
                size: (200.0, 20.0),
                damage: 1,
            }],
            checkpoints: vec![(0.0, -120.0), (1500.0, 40.0)],
        }
    }
}

/// Load the level at startup, falling back to the built-in course.
pub fn load_level_definition(mut commands: Commands) {
    let level = match LevelDefinition::load_from(LEVEL_PATH) {
        Ok(level) => {
            info!("Loaded level: {}", level.name);
            level
        }
        Err(e @ DataLoadError::ReadError { .. }) => {
            warn!("{}. Using built-in level.", e);
            LevelDefinition::default()
        }
        Err(e) => {
            error!("{}. Using built-in level.", e);
            LevelDefinition::default()
        }
    };
    commands.insert_resource(level);
}
