//! Controller configuration (JSON) + validation.
//!
//! Все секции `#[serde(default)]`: в файле достаточно указать только
//! изменённые значения.

use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::animation::AnimationClipNames;
use crate::camera::CameraSettings;
use crate::debug::DebugTimeScale;
use crate::movement::{JumpSettings, MovementSettings};
use crate::physics::{
    mask_layer_names, GroundProbeSettings, COLLISION_LAYER_CHARACTERS, COLLISION_LAYER_TRIGGERS,
};

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("failed to read config {}: {source}", .path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
    #[error("parse error: {0}")]
    Parse(#[from] serde_json::Error),
    #[error("{field} = {value} is out of range (expected {expected})")]
    OutOfRange {
        field: &'static str,
        value: f32,
        expected: &'static str,
    },
    #[error("camera bottom clamp {bottom} is above top clamp {top}")]
    InvertedClamp { bottom: f32, top: f32 },
}

/// Full tuning of one character type.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ControllerConfig {
    pub movement: MovementSettings,
    pub jump: JumpSettings,
    pub ground: GroundProbeSettings,
    pub camera: CameraSettings,
    pub animation: AnimationClipNames,
    pub debug: DebugTimeScale,
}

/// `min <= value <= max`; NaN не проходит.
fn check_range(
    field: &'static str,
    value: f32,
    min: f32,
    max: f32,
    expected: &'static str,
) -> Result<(), ConfigError> {
    if value >= min && value <= max {
        Ok(())
    } else {
        Err(ConfigError::OutOfRange {
            field,
            value,
            expected,
        })
    }
}

impl ControllerConfig {
    /// Parse and validate.
    pub fn from_json_str(json: &str) -> Result<Self, ConfigError> {
        let config: Self = serde_json::from_str(json)?;
        config.validate()?;
        Ok(config)
    }

    pub fn load(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        let path = path.as_ref();
        let json = std::fs::read_to_string(path).map_err(|source| ConfigError::Io {
            path: path.to_path_buf(),
            source,
        })?;
        Self::from_json_str(&json)
    }

    pub fn to_json_pretty(&self) -> Result<String, ConfigError> {
        Ok(serde_json::to_string_pretty(self)?)
    }

    pub fn validate(&self) -> Result<(), ConfigError> {
        let movement = &self.movement;
        check_range("movement.move_speed", movement.move_speed, 0.0, f32::MAX, ">= 0")?;
        check_range("movement.sprint_speed", movement.sprint_speed, 0.0, f32::MAX, ">= 0")?;
        check_range(
            "movement.rotation_smooth_time",
            movement.rotation_smooth_time,
            0.0,
            0.3,
            "0..=0.3",
        )?;
        check_range(
            "movement.speed_change_rate",
            movement.speed_change_rate,
            0.0,
            f32::MAX,
            ">= 0",
        )?;

        let jump = &self.jump;
        check_range("jump.jump_height", jump.jump_height, 0.0, f32::MAX, ">= 0")?;
        check_range("jump.gravity", jump.gravity, f32::MIN, -f32::EPSILON, "< 0")?;
        check_range("jump.jump_timeout", jump.jump_timeout, 0.0, f32::MAX, ">= 0")?;
        check_range("jump.fall_timeout", jump.fall_timeout, 0.0, f32::MAX, ">= 0")?;
        check_range(
            "jump.terminal_velocity",
            jump.terminal_velocity,
            f32::EPSILON,
            f32::MAX,
            "> 0",
        )?;

        check_range(
            "ground.grounded_radius",
            self.ground.grounded_radius,
            f32::EPSILON,
            f32::MAX,
            "> 0",
        )?;
        check_range(
            "ground.grounded_offset",
            self.ground.grounded_offset,
            f32::MIN,
            f32::MAX,
            "finite",
        )?;

        let camera = &self.camera;
        check_range("camera.top_clamp", camera.top_clamp, -360.0, 360.0, "-360..=360")?;
        check_range("camera.bottom_clamp", camera.bottom_clamp, -360.0, 360.0, "-360..=360")?;
        if camera.bottom_clamp > camera.top_clamp {
            return Err(ConfigError::InvertedClamp {
                bottom: camera.bottom_clamp,
                top: camera.top_clamp,
            });
        }

        check_range("debug.game_speed", self.debug.game_speed, 0.0, 1.0, "0..=1")?;

        if self.ground.ground_layers == 0 {
            crate::log_warning("ControllerConfig: ground.ground_layers = 0, probe never finds ground");
        }
        let non_ground = self.ground.ground_layers & (COLLISION_LAYER_CHARACTERS | COLLISION_LAYER_TRIGGERS);
        if non_ground != 0 {
            crate::log_warning(&format!(
                "ControllerConfig: ground.ground_layers includes {}, probe will stand on them",
                mask_layer_names(non_ground).join(", ")
            ));
        }

        Ok(())
    }
}
