//! Movement systems (FixedUpdate, порядок задаёт ControllerSet).

use bevy::prelude::*;

use super::events::{Jumped, Landed, PhaseChanged};
use super::{JumpSettings, JumpState};
use crate::input::ControllerInput;

/// Система: jump & gravity (до ground probe).
pub fn apply_jump_and_gravity(
    mut query: Query<(&JumpSettings, &mut JumpState, &mut ControllerInput)>,
    time: Res<Time<Fixed>>,
) {
    let delta = time.delta_secs();

    for (settings, mut state, mut input) in query.iter_mut() {
        // До первого probe grounded неизвестен
        if !state.probed() {
            continue;
        }

        let outcome = state.step(settings, input.jump, delta);

        // В воздухе jump input сбрасывается (не буферизуем)
        if outcome.clear_jump_input && input.jump {
            input.jump = false;
        }
    }
}

/// Система: события и логи переходов (после probe и motor).
pub fn report_state_changes(
    mut query: Query<(Entity, &mut JumpState)>,
    mut phase_changed: EventWriter<PhaseChanged>,
    mut jumped: EventWriter<Jumped>,
    mut landed: EventWriter<Landed>,
) {
    for (entity, mut state) in query.iter_mut() {
        if let Some(velocity) = state.impulse_fired.take() {
            jumped.write(Jumped { entity, velocity });
            crate::log(&format!("{:?}: jump impulse {:.2} m/s", entity, velocity));
        }

        if state.grounded && !state.was_grounded {
            let fall_speed = (-state.vertical_velocity).max(0.0);
            landed.write(Landed { entity, fall_speed });
            crate::log(&format!("{:?}: landed at {:.2} m/s", entity, fall_speed));
        }
        state.was_grounded = state.grounded;

        let phase = state.phase();
        if phase != state.last_phase {
            let from = state.last_phase;
            state.last_phase = phase;
            phase_changed.write(PhaseChanged { entity, from, to: phase });
            crate::log(&format!("{:?}: {} → {}", entity, from.as_str(), phase.as_str()));
        }
    }
}
