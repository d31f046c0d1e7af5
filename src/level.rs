//! Authored level descriptors
//!
//! Levels come from the level editor as JSON with absolute positions on a
//! 3000 px tall canvas (y grows downward, the start is at the bottom).
//! They are validated here before the simulation ever sees them.

use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::sim::state::{PlatformKind, TurretSide};

/// Authored platform
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct LevelPlatform {
    pub x: f32,
    pub y: f32,
    pub width: f32,
    pub height: f32,
    #[serde(rename = "type")]
    pub kind: PlatformKind,
    #[serde(default)]
    pub dx: f32,
}

/// Authored turret
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct LevelTurret {
    pub y: f32,
    pub side: TurretSide,
    #[serde(default)]
    pub fire_cooldown: u32,
}

/// A complete authored level
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CustomLevel {
    #[serde(default)]
    pub id: String,
    #[serde(default)]
    pub name: String,
    pub platforms: Vec<LevelPlatform>,
    #[serde(default)]
    pub turrets: Vec<LevelTurret>,
}

/// Why a level was refused
#[derive(Debug, Error)]
pub enum LevelError {
    #[error("malformed level data: {0}")]
    Parse(#[from] serde_json::Error),
    #[error("level has no platforms")]
    NoPlatforms,
    #[error("platform {index} has non-finite coordinates")]
    NonFinitePlatform { index: usize },
    #[error("platform {index} has non-positive size {width}x{height}")]
    DegeneratePlatform { index: usize, width: f32, height: f32 },
    #[error("turret {index} has non-finite altitude")]
    NonFiniteTurret { index: usize },
}

impl CustomLevel {
    /// Parse and validate a level exported by the editor
    pub fn from_json(json: &str) -> Result<Self, LevelError> {
        let level: Self = serde_json::from_str(json)?;
        level.validate()?;
        Ok(level)
    }

    /// Reject levels the simulation cannot run
    pub fn validate(&self) -> Result<(), LevelError> {
        if self.platforms.is_empty() {
            return Err(LevelError::NoPlatforms);
        }
        for (index, p) in self.platforms.iter().enumerate() {
            if !(p.x.is_finite() && p.y.is_finite() && p.dx.is_finite()) {
                return Err(LevelError::NonFinitePlatform { index });
            }
            if !(p.width > 0.0 && p.height > 0.0) {
                return Err(LevelError::DegeneratePlatform {
                    index,
                    width: p.width,
                    height: p.height,
                });
            }
        }
        for (index, t) in self.turrets.iter().enumerate() {
            if !t.y.is_finite() {
                return Err(LevelError::NonFiniteTurret { index });
            }
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const EDITOR_EXPORT: &str = r#"{
        "id": "1718000000000",
        "name": "STAIRWAY",
        "platforms": [
            { "x": 160, "y": 2950, "width": 85, "height": 12, "type": "normal", "dx": 0 },
            { "x": 60, "y": 2880, "width": 85, "height": 12, "type": "spring", "dx": 0 },
            { "x": 200, "y": 2600, "width": 85, "height": 12, "type": "moving",
              "dx": 1.5, "broken": false }
        ],
        "turrets": [ { "y": 2700, "side": "left", "fireCooldown": 0, "fired": false } ]
    }"#;

    #[test]
    fn test_parse_editor_export() {
        let level = CustomLevel::from_json(EDITOR_EXPORT).expect("valid level");
        assert_eq!(level.name, "STAIRWAY");
        assert_eq!(level.platforms.len(), 3);
        assert_eq!(level.platforms[1].kind, PlatformKind::Spring);
        assert_eq!(level.platforms[2].dx, 1.5);
        assert_eq!(level.turrets[0].side, TurretSide::Left);
    }

    #[test]
    fn test_empty_level_rejected() {
        let err = CustomLevel::from_json(r#"{ "platforms": [] }"#).unwrap_err();
        assert!(matches!(err, LevelError::NoPlatforms));
    }

    #[test]
    fn test_unknown_platform_type_rejected() {
        let json = r#"{ "platforms": [
            { "x": 0, "y": 0, "width": 85, "height": 12, "type": "lava" }
        ] }"#;
        assert!(matches!(CustomLevel::from_json(json), Err(LevelError::Parse(_))));
    }

    #[test]
    fn test_degenerate_platform_rejected() {
        let level = CustomLevel {
            id: String::new(),
            name: String::new(),
            platforms: vec![LevelPlatform {
                x: 0.0,
                y: 0.0,
                width: 0.0,
                height: 12.0,
                kind: PlatformKind::Normal,
                dx: 0.0,
            }],
            turrets: Vec::new(),
        };
        assert!(matches!(
            level.validate(),
            Err(LevelError::DegeneratePlatform { index: 0, .. })
        ));
    }

    #[test]
    fn test_non_finite_turret_rejected() {
        let mut level = CustomLevel::from_json(EDITOR_EXPORT).expect("valid level");
        level.turrets[0].y = f32::NAN;
        assert!(matches!(
            level.validate(),
            Err(LevelError::NonFiniteTurret { index: 0 })
        ));
    }
}
