//! Horizontal speed + heading integrator.
//!
//! Каждый tick:
//! 1. target speed из input (0 / walk / sprint)
//! 2. экспоненциальное сглаживание текущей горизонтальной скорости мотора
//! 3. yaw персонажа smooth-damp'ится к camera-relative направлению input
//! 4. displacement (горизонталь + vertical velocity) уходит в CharacterMotor

use bevy::prelude::*;
use serde::{Deserialize, Serialize};

use super::heading::{direction_from_yaw, rotation_from_yaw, yaw_from_input, yaw_from_rotation};
use super::smoothing::{lerp_clamped, round_to_millis, smooth_damp_angle};
use crate::camera::{CameraRig, MainCamera};
use crate::input::ControllerInput;
use crate::movement::JumpState;
use crate::physics::CharacterMotor;

/// Band around the target speed inside which the speed snaps to it.
pub const SPEED_OFFSET: f32 = 0.1;

/// `Vector2 == zero` tolerance (squared length).
pub const MOVE_EPSILON_SQ: f32 = 9.999_999_4e-11;

/// Ground movement tuning.
#[derive(Component, Debug, Clone, Copy, PartialEq, Reflect, Serialize, Deserialize)]
#[reflect(Component)]
#[serde(default)]
pub struct MovementSettings {
    /// Walk speed (m/s)
    pub move_speed: f32,
    /// Sprint speed (m/s)
    pub sprint_speed: f32,
    /// Время поворота к целевому yaw (секунды), допустимо 0.0..=0.3
    pub rotation_smooth_time: f32,
    /// Acceleration/deceleration rate
    pub speed_change_rate: f32,
}

impl Default for MovementSettings {
    fn default() -> Self {
        Self {
            move_speed: 2.0,
            sprint_speed: 5.0,
            rotation_smooth_time: 0.12,
            speed_change_rate: 10.0,
        }
    }
}

/// Integrator state carried between ticks.
#[derive(Component, Debug, Clone, Copy, Default, PartialEq, Reflect)]
#[reflect(Component)]
pub struct Locomotion {
    /// Horizontal speed used for the last displacement (m/s)
    pub speed: f32,
    /// Smoothed target speed fed to the `Speed` animation parameter
    pub animation_blend: f32,
    /// Last input magnitude (`MotionSpeed` parameter)
    pub input_magnitude: f32,
    /// Heading the character moves along (degrees)
    pub target_rotation: f32,
    /// smooth_damp_angle state
    pub rotation_velocity: f32,
}

/// Inputs of one integration step.
#[derive(Debug, Clone, Copy)]
pub struct LocomotionFrame {
    pub move_axis: Vec2,
    pub sprint: bool,
    pub analog_movement: bool,
    /// Motor's effective velocity from the previous tick
    pub current_velocity: Vec3,
    /// Main camera yaw (degrees)
    pub camera_yaw: f32,
    /// Current character yaw (degrees)
    pub character_yaw: f32,
    pub vertical_velocity: f32,
    pub delta: f32,
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct LocomotionOutput {
    /// Displacement for this tick (world space)
    pub displacement: Vec3,
    /// New character yaw, `None` when there was no movement input
    pub yaw: Option<f32>,
}

pub fn has_move_input(move_axis: Vec2) -> bool {
    move_axis.length_squared() >= MOVE_EPSILON_SQ
}

impl Locomotion {
    pub fn target_speed(settings: &MovementSettings, move_axis: Vec2, sprint: bool) -> f32 {
        if !has_move_input(move_axis) {
            0.0
        } else if sprint {
            settings.sprint_speed
        } else {
            settings.move_speed
        }
    }

    pub fn step(&mut self, settings: &MovementSettings, frame: &LocomotionFrame) -> LocomotionOutput {
        let moving = has_move_input(frame.move_axis);
        let target_speed = Self::target_speed(settings, frame.move_axis, frame.sprint);

        let current_horizontal_speed =
            Vec3::new(frame.current_velocity.x, 0.0, frame.current_velocity.z).length();

        let input_magnitude = if frame.analog_movement {
            frame.move_axis.length()
        } else {
            1.0
        };

        let blend = frame.delta * settings.speed_change_rate;

        if current_horizontal_speed < target_speed - SPEED_OFFSET
            || current_horizontal_speed > target_speed + SPEED_OFFSET
        {
            // Кривая, а не линейный разгон; t клампится в lerp_clamped
            let speed = lerp_clamped(current_horizontal_speed, target_speed * input_magnitude, blend);
            self.speed = round_to_millis(speed);
        } else {
            self.speed = target_speed;
        }

        self.animation_blend = lerp_clamped(self.animation_blend, target_speed, blend);
        self.input_magnitude = input_magnitude;

        let mut yaw = None;
        if moving {
            self.target_rotation = yaw_from_input(frame.move_axis) + frame.camera_yaw;
            yaw = Some(smooth_damp_angle(
                frame.character_yaw,
                self.target_rotation,
                &mut self.rotation_velocity,
                settings.rotation_smooth_time,
                frame.delta,
            ));
        }

        // Без input направление = последний target_rotation (торможение по инерции)
        let displacement = direction_from_yaw(self.target_rotation) * (self.speed * frame.delta)
            + Vec3::new(0.0, frame.vertical_velocity, 0.0) * frame.delta;

        LocomotionOutput { displacement, yaw }
    }
}

/// Yaw the character steers relative to.
///
/// Main camera if there is one; otherwise the character's own camera rig;
/// otherwise world forward.
pub(crate) fn resolve_camera_yaw(main_camera: Option<&GlobalTransform>, rig: Option<&CameraRig>) -> f32 {
    if let Some(camera) = main_camera {
        return yaw_from_rotation(camera.compute_transform().rotation);
    }
    rig.map(|rig| rig.yaw).unwrap_or(0.0)
}

/// Система: horizontal movement + rotation → CharacterMotor displacement.
pub fn apply_locomotion(
    mut query: Query<(
        &ControllerInput,
        &MovementSettings,
        &JumpState,
        &mut Locomotion,
        &mut CharacterMotor,
        &mut Transform,
        Option<&CameraRig>,
    )>,
    main_camera: Query<&GlobalTransform, With<MainCamera>>,
    time: Res<Time<Fixed>>,
    mut warned_no_camera: Local<bool>,
) {
    let delta = time.delta_secs();
    let camera = main_camera.single().ok();

    if camera.is_none() && !*warned_no_camera && !query.is_empty() {
        *warned_no_camera = true;
        crate::log_warning("Locomotion: no MainCamera entity, steering relative to camera rig yaw");
    }

    for (input, settings, jump, mut locomotion, mut motor, mut transform, rig) in query.iter_mut() {
        let frame = LocomotionFrame {
            move_axis: input.move_axis,
            sprint: input.sprint,
            analog_movement: input.analog_movement,
            current_velocity: motor.velocity,
            camera_yaw: resolve_camera_yaw(camera, rig),
            character_yaw: yaw_from_rotation(transform.rotation),
            vertical_velocity: jump.vertical_velocity,
            delta,
        };

        let output = locomotion.step(settings, &frame);

        if let Some(yaw) = output.yaw {
            transform.rotation = rotation_from_yaw(yaw);
        }
        motor.displacement += output.displacement;
    }
}
