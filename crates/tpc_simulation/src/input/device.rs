//! Keyboard + mouse → ControllerInput (клиент, не headless).
//!
//! Требует bevy InputPlugin у хоста (MinimalPlugins его не включают).

use bevy::input::mouse::AccumulatedMouseMotion;
use bevy::input::InputSystem;
use bevy::prelude::*;

use super::ControllerInput;
use crate::player::Player;

/// Key bindings + mouse look tuning.
#[derive(Resource, Debug, Clone)]
pub struct InputBindings {
    pub forward: KeyCode,
    pub backward: KeyCode,
    pub left: KeyCode,
    pub right: KeyCode,
    pub jump: KeyCode,
    pub sprint: KeyCode,
    /// Look rate per pixel of mouse motion (deg/s per px)
    pub look_sensitivity: f32,
    pub invert_y: bool,
}

impl Default for InputBindings {
    fn default() -> Self {
        Self {
            forward: KeyCode::KeyW,
            backward: KeyCode::KeyS,
            left: KeyCode::KeyA,
            right: KeyCode::KeyD,
            jump: KeyCode::Space,
            sprint: KeyCode::ShiftLeft,
            look_sensitivity: 12.0,
            invert_y: false,
        }
    }
}

impl InputBindings {
    /// WASD → movement axis, normalized (диагональ не быстрее).
    pub fn move_axis(&self, keys: &ButtonInput<KeyCode>) -> Vec2 {
        let mut axis = Vec2::ZERO;
        if keys.pressed(self.forward) {
            axis.y += 1.0;
        }
        if keys.pressed(self.backward) {
            axis.y -= 1.0;
        }
        if keys.pressed(self.left) {
            axis.x -= 1.0;
        }
        if keys.pressed(self.right) {
            axis.x += 1.0;
        }
        axis.normalize_or_zero()
    }

    /// Mouse delta (px, y вниз) → look rate.
    pub fn look(&self, mouse_delta: Vec2) -> Vec2 {
        let y = if self.invert_y { -mouse_delta.y } else { mouse_delta.y };
        Vec2::new(mouse_delta.x, y) * self.look_sensitivity
    }
}

/// Система: читает клавиатуру/мышь → ControllerInput всех Player entity.
pub fn gather_device_input(
    bindings: Res<InputBindings>,
    keys: Res<ButtonInput<KeyCode>>,
    mouse_motion: Option<Res<AccumulatedMouseMotion>>,
    mut players: Query<&mut ControllerInput, With<Player>>,
) {
    let move_axis = bindings.move_axis(&keys);
    let look = mouse_motion
        .map(|motion| bindings.look(motion.delta))
        .unwrap_or(Vec2::ZERO);

    for mut input in players.iter_mut() {
        input.move_axis = move_axis;
        input.look = look;
        input.sprint = keys.pressed(bindings.sprint);
        // Latch: нажатие держится до прыжка, контроллер гасит его в воздухе
        if keys.just_pressed(bindings.jump) {
            input.jump = true;
        }
        input.analog_movement = false;
    }
}

/// Client plugin: device input for `Player` characters.
pub struct DeviceInputPlugin;

impl Plugin for DeviceInputPlugin {
    fn build(&self, app: &mut App) {
        app.init_resource::<InputBindings>()
            .add_systems(PreUpdate, gather_device_input.after(InputSystem));
    }
}
