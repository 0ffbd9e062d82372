//! Character markers + spawn helpers.

use bevy::prelude::*;

use crate::animation::{
    AnimationClipNames, AnimationParameters, AnimationStateReport, SimulatedAnimationGraph,
};
use crate::camera::{CameraRig, CameraSettings, CameraTarget};
use crate::config::ControllerConfig;
use crate::input::ControllerInput;
use crate::movement::{JumpSettings, JumpState, Locomotion, MovementSettings};
use crate::physics::{CharacterMotor, GroundProbeSettings, ProbeDebugShape};

/// Marker component для player-controlled entity
///
/// Input systems используют `With<Player>` (DeviceInputPlugin). Персонажи без
/// него управляются ScriptedInput/RandomWander или сетевым слоем хоста.
///
/// Передача контроля:
/// ```ignore
/// commands.entity(old_character).remove::<Player>();
/// commands.entity(new_character).insert(Player);
/// ```
#[derive(Component, Debug, Clone, Copy, Default)]
pub struct Player;

/// Third-person character: всё состояние контроллера через Required Components.
///
/// Tuning-компоненты берут значения по умолчанию; для конфига из файла
/// используй `spawn_third_person_character`.
#[derive(Component, Debug, Clone, Copy, Default, Reflect)]
#[reflect(Component)]
#[require(
    Transform,
    ControllerInput,
    MovementSettings,
    JumpSettings,
    JumpState,
    Locomotion,
    CharacterMotor,
    GroundProbeSettings,
    CameraSettings,
    CameraRig,
    AnimationClipNames,
    ProbeDebugShape
)]
pub struct ThirdPersonController;

/// Spawn a character at `position` (ноги) with its camera follow target.
pub fn spawn_third_person_character(
    commands: &mut Commands,
    position: Vec3,
    config: &ControllerConfig,
) -> Entity {
    let target = commands
        .spawn((
            CameraTarget,
            Transform::from_translation(position + config.camera.target_offset),
        ))
        .id();

    commands
        .spawn((
            ThirdPersonController,
            Transform::from_translation(position),
            config.movement,
            config.jump,
            JumpState::new(&config.jump),
            config.ground,
            config.camera,
            CameraRig {
                target: Some(target),
                ..default()
            },
            config.animation.clone(),
        ))
        .id()
}

/// Parameters + built-in graph, для headless прогонов с полной обратной связью.
pub fn simulated_animation_components() -> impl Bundle {
    (
        AnimationParameters::default(),
        AnimationStateReport::default(),
        SimulatedAnimationGraph::default(),
    )
}
