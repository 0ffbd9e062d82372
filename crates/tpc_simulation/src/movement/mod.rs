//! Movement domain — jump/fall/landing FSM + speed/heading integrator
//!
//! Содержит:
//! - JumpState / JumpSettings (state machine, gravity)
//! - Locomotion / MovementSettings (speed smoothing, yaw smooth-damp)
//! - smoothing / heading (скалярная математика, конвенция углов)
//! - PhaseChanged / Jumped / Landed (events)

pub mod events;
pub mod heading;
pub mod jump;
pub mod locomotion;
pub mod smoothing;
pub mod systems;

#[cfg(test)]
mod jump_tests;

pub use events::*;
pub use jump::{JumpOutcome, JumpPhase, JumpSettings, JumpState, GROUNDED_VERTICAL_VELOCITY};
pub use locomotion::{
    apply_locomotion, Locomotion, LocomotionFrame, LocomotionOutput, MovementSettings,
};
pub use systems::{apply_jump_and_gravity, report_state_changes};

use bevy::prelude::*;

use crate::ControllerSet;

/// Plugin: jump/gravity, locomotion, события переходов.
pub struct MovementPlugin;

impl Plugin for MovementPlugin {
    fn build(&self, app: &mut App) {
        app.add_event::<PhaseChanged>()
            .add_event::<Jumped>()
            .add_event::<Landed>()
            .register_type::<MovementSettings>()
            .register_type::<Locomotion>()
            .register_type::<JumpSettings>()
            .register_type::<JumpState>()
            .add_systems(
                FixedUpdate,
                (
                    apply_jump_and_gravity.in_set(ControllerSet::JumpAndGravity),
                    apply_locomotion.in_set(ControllerSet::Locomotion),
                    report_state_changes.in_set(ControllerSet::Report),
                ),
            );
    }
}
