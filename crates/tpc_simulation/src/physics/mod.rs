//! Physics seam: grounded probe + character motor.
//!
//! Два backend'а с одинаковым контрактом (JumpState.grounded, CharacterMotor):
//! - Headless: GroundSurfaces, прямая интеграция Transform (тесты, сервер)
//! - Rapier: shape intersection + KinematicCharacterController

pub mod ground;
pub mod layers;
pub mod motor;
pub mod rapier;

use bevy::prelude::*;

use crate::ControllerSet;

pub use ground::{
    probe_center, probe_ground_headless, update_probe_debug_shape, GroundProbeSettings, GroundSlab,
    GroundSurfaces, ProbeDebugShape,
};
pub use layers::*;
pub use motor::{apply_motion_headless, CharacterMotor};
pub use rapier::{rapier_character_components, RapierBackendPlugin, CHARACTER_SKIN};

/// Which physics implementation answers the probe and moves the capsule.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum PhysicsBackend {
    #[default]
    Headless,
    Rapier,
}

/// Plugin: headless backend.
pub struct HeadlessPhysicsPlugin;

impl Plugin for HeadlessPhysicsPlugin {
    fn build(&self, app: &mut App) {
        app.init_resource::<GroundSurfaces>().add_systems(
            FixedUpdate,
            (
                probe_ground_headless.in_set(ControllerSet::GroundProbe),
                apply_motion_headless.in_set(ControllerSet::Motor),
            ),
        );
    }
}

/// Plugin: backend + общие системы (debug shape).
pub struct PhysicsPlugin {
    pub backend: PhysicsBackend,
}

impl Plugin for PhysicsPlugin {
    fn build(&self, app: &mut App) {
        app.register_type::<GroundProbeSettings>()
            .register_type::<CharacterMotor>()
            .register_type::<ProbeDebugShape>()
            .add_systems(FixedUpdate, update_probe_debug_shape.in_set(ControllerSet::Report));

        match self.backend {
            PhysicsBackend::Headless => app.add_plugins(HeadlessPhysicsPlugin),
            PhysicsBackend::Rapier => app.add_plugins(RapierBackendPlugin),
        };
    }
}
