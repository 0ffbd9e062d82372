//! Follow camera: yaw/pitch аккумулятор + follow target.
//!
//! Контроллер пишет только rotation/translation follow target'а. Main camera
//! (виртуальная камера хоста) следует за target'ом; `CameraFollow` — простая
//! встроенная версия для headless и примеров.

use bevy::prelude::*;
use serde::{Deserialize, Serialize};

use crate::input::ControllerInput;
use crate::movement::heading::look_rotation;
use crate::movement::smoothing::clamp_angle;
use crate::ControllerSet;

/// Look input below this squared length is ignored.
pub const LOOK_THRESHOLD_SQ: f32 = 0.01;

/// Follow camera tuning.
#[derive(Component, Debug, Clone, Copy, PartialEq, Reflect, Serialize, Deserialize)]
#[reflect(Component)]
#[serde(default)]
pub struct CameraSettings {
    /// Max pitch (degrees, положительный = вниз)
    pub top_clamp: f32,
    /// Min pitch (degrees)
    pub bottom_clamp: f32,
    /// Extra pitch added to the follow target
    pub angle_override: f32,
    /// Ignore look input
    pub locked: bool,
    /// Follow target offset from the character's feet
    pub target_offset: Vec3,
}

impl Default for CameraSettings {
    fn default() -> Self {
        Self {
            top_clamp: 70.0,
            bottom_clamp: -30.0,
            angle_override: 0.0,
            locked: false,
            target_offset: Vec3::new(0.0, 1.375, 0.0),
        }
    }
}

/// Accumulated camera angles of one character.
#[derive(Component, Debug, Clone, Copy, Default, PartialEq, Reflect)]
#[reflect(Component)]
pub struct CameraRig {
    /// Degrees, по часовой сверху, 0 = вперёд
    pub yaw: f32,
    /// Degrees, положительный = вниз
    pub pitch: f32,
    /// Follow target entity (spawn helper создаёт его)
    pub target: Option<Entity>,
}

impl CameraRig {
    pub fn with_yaw(yaw: f32) -> Self {
        Self { yaw, ..default() }
    }

    /// Apply one tick of look input, then clamp.
    pub fn accumulate(&mut self, look: Vec2, settings: &CameraSettings, delta: f32) {
        if look.length_squared() >= LOOK_THRESHOLD_SQ && !settings.locked {
            self.yaw += look.x * delta;
            self.pitch += look.y * delta;
        }

        self.yaw = clamp_angle(self.yaw, f32::MIN, f32::MAX);
        self.pitch = clamp_angle(self.pitch, settings.bottom_clamp, settings.top_clamp);
    }

    pub fn target_rotation(&self, settings: &CameraSettings) -> Quat {
        look_rotation(self.yaw, self.pitch + settings.angle_override)
    }
}

/// Marker: follow target entity.
#[derive(Component, Debug, Clone, Copy, Default, Reflect)]
#[reflect(Component)]
pub struct CameraTarget;

/// Marker: the camera whose yaw steers movement.
#[derive(Component, Debug, Clone, Copy, Default, Reflect)]
#[reflect(Component)]
pub struct MainCamera;

/// Built-in third-person follow for a `MainCamera` (хост может заменить своей).
#[derive(Component, Debug, Clone, Copy, PartialEq, Reflect)]
#[reflect(Component)]
pub struct CameraFollow {
    pub target: Entity,
    /// Distance behind the target (m)
    pub distance: f32,
    /// Shoulder offset in target space (x = right)
    pub shoulder_offset: Vec3,
}

impl CameraFollow {
    pub fn new(target: Entity) -> Self {
        Self {
            target,
            distance: 4.0,
            shoulder_offset: Vec3::new(1.0, 0.0, 0.0),
        }
    }

    pub fn place(&self, target: &Transform) -> Transform {
        // Bevy: -Z вперёд, камера позади target'а по +Z
        let local = self.shoulder_offset + Vec3::new(0.0, 0.0, self.distance);
        Transform {
            translation: target.translation + target.rotation * local,
            rotation: target.rotation,
            scale: Vec3::ONE,
        }
    }
}

/// Система: look input → CameraRig → follow target Transform.
pub fn rotate_camera_target(
    mut characters: Query<(&ControllerInput, &CameraSettings, &mut CameraRig, &Transform), Without<CameraTarget>>,
    mut targets: Query<&mut Transform, With<CameraTarget>>,
    time: Res<Time<Fixed>>,
) {
    let delta = time.delta_secs();

    for (input, settings, mut rig, transform) in characters.iter_mut() {
        rig.accumulate(input.look, settings, delta);

        let Some(target) = rig.target else {
            continue;
        };
        let Ok(mut target_transform) = targets.get_mut(target) else {
            continue;
        };

        target_transform.rotation = rig.target_rotation(settings);
        target_transform.translation = transform.translation + settings.target_offset;
    }
}

/// Система: MainCamera с CameraFollow → позиция за target'ом.
pub fn follow_camera_target(
    mut cameras: Query<(&CameraFollow, &mut Transform), (With<MainCamera>, Without<CameraTarget>)>,
    targets: Query<&Transform, With<CameraTarget>>,
) {
    for (follow, mut transform) in cameras.iter_mut() {
        let Ok(target) = targets.get(follow.target) else {
            continue;
        };
        *transform = follow.place(target);
    }
}

/// Plugin: camera systems (после мотора).
pub struct CameraPlugin;

impl Plugin for CameraPlugin {
    fn build(&self, app: &mut App) {
        app.register_type::<CameraSettings>()
            .register_type::<CameraRig>()
            .register_type::<CameraTarget>()
            .register_type::<MainCamera>()
            .register_type::<CameraFollow>()
            .add_systems(
                FixedUpdate,
                (rotate_camera_target, follow_camera_target)
                    .chain()
                    .in_set(ControllerSet::Camera),
            );
    }
}
