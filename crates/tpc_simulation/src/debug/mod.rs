//! Debug helpers: замедление игрового времени.

use bevy::prelude::*;
use serde::{Deserialize, Serialize};

/// Slow-motion toggle applied to the virtual clock.
#[derive(Resource, Debug, Clone, Copy, PartialEq, Reflect, Serialize, Deserialize)]
#[reflect(Resource)]
#[serde(default)]
pub struct DebugTimeScale {
    pub enabled: bool,
    /// Relative speed while enabled (0..=1)
    pub game_speed: f32,
}

impl Default for DebugTimeScale {
    fn default() -> Self {
        Self {
            enabled: false,
            game_speed: 0.5,
        }
    }
}

impl DebugTimeScale {
    pub fn relative_speed(&self) -> f32 {
        if self.enabled {
            self.game_speed.clamp(0.0, 1.0)
        } else {
            1.0
        }
    }
}

/// Система: DebugTimeScale → Time<Virtual> (каждый кадр).
pub fn apply_debug_time_scale(scale: Res<DebugTimeScale>, mut time: ResMut<Time<Virtual>>) {
    let speed = scale.relative_speed();
    if time.relative_speed() != speed {
        time.set_relative_speed(speed);
    }
}

/// Plugin: debug time scale (в Update: FixedUpdate тикает от Time<Virtual>).
pub struct DebugPlugin;

impl Plugin for DebugPlugin {
    fn build(&self, app: &mut App) {
        app.init_resource::<DebugTimeScale>()
            .register_type::<DebugTimeScale>()
            .add_systems(Update, apply_debug_time_scale);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_relative_speed() {
        let mut scale = DebugTimeScale::default();
        assert_eq!(scale.relative_speed(), 1.0);

        scale.enabled = true;
        assert_eq!(scale.relative_speed(), 0.5);

        scale.game_speed = 3.0;
        assert_eq!(scale.relative_speed(), 1.0);
    }

    #[test]
    fn test_system_sets_virtual_speed() {
        let mut app = App::new();
        app.add_plugins(MinimalPlugins).add_plugins(DebugPlugin);
        app.world_mut().resource_mut::<DebugTimeScale>().enabled = true;

        app.update();
        assert_eq!(app.world().resource::<Time<Virtual>>().relative_speed(), 0.5);

        app.world_mut().resource_mut::<DebugTimeScale>().enabled = false;
        app.update();
        assert_eq!(app.world().resource::<Time<Virtual>>().relative_speed(), 1.0);
    }
}
