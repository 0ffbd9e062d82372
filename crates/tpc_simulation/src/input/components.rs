//! Input snapshot component.

use bevy::prelude::*;

/// Per-frame input intent of a character.
///
/// Заполняется хостом (DeviceInputPlugin, ScriptedInput, сетевой слой и т.п.).
/// Контроллер сам сбрасывает `jump`, пока персонаж в воздухе.
///
/// # Coordinate System
/// - `move_axis.x`: -1.0 (left) → +1.0 (right)
/// - `move_axis.y`: -1.0 (backward) → +1.0 (forward), относительно камеры
/// - `look.x`: yaw rate (deg/s, + = вправо)
/// - `look.y`: pitch rate (deg/s, + = вниз)
#[derive(Component, Debug, Clone, Copy, Default, PartialEq, Reflect)]
#[reflect(Component)]
pub struct ControllerInput {
    pub move_axis: Vec2,
    pub look: Vec2,
    pub jump: bool,
    pub sprint: bool,
    /// Stick magnitude scales target speed (keyboard = false → magnitude 1)
    pub analog_movement: bool,
}

impl ControllerInput {
    pub fn moving(move_axis: Vec2) -> Self {
        Self {
            move_axis,
            ..default()
        }
    }

    pub fn with_sprint(mut self, sprint: bool) -> Self {
        self.sprint = sprint;
        self
    }

    pub fn with_jump(mut self, jump: bool) -> Self {
        self.jump = jump;
        self
    }

    pub fn with_look(mut self, look: Vec2) -> Self {
        self.look = look;
        self
    }
}
