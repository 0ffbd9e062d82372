//! Movement events (state machine → host: звуки, VFX, камера shake и т.п.)

use bevy::prelude::*;

use super::JumpPhase;

/// Phase transition of the jump state machine.
#[derive(Event, Debug, Clone, Copy, PartialEq)]
pub struct PhaseChanged {
    pub entity: Entity,
    pub from: JumpPhase,
    pub to: JumpPhase,
}

/// Jump impulse applied (граф вошёл в jumping clip).
#[derive(Event, Debug, Clone, Copy, PartialEq)]
pub struct Jumped {
    pub entity: Entity,
    /// Launch velocity (m/s)
    pub velocity: f32,
}

/// Ground probe went from "not grounded" to "grounded".
#[derive(Event, Debug, Clone, Copy, PartialEq)]
pub struct Landed {
    pub entity: Entity,
    /// Downward speed at touchdown (m/s, ≥ 0)
    pub fall_speed: f32,
}
