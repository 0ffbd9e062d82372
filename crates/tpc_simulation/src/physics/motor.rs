//! Character motor: накопленный за tick displacement → Transform.
//!
//! Locomotion пишет в `displacement`, мотор двигает персонажа и выставляет
//! `velocity` = фактическое перемещение / dt (после столкновений), которое
//! locomotion читает на следующем tick'е.

use bevy::prelude::*;

use super::ground::GroundSurfaces;

/// Kinematic motor state.
#[derive(Component, Debug, Clone, Copy, Default, PartialEq, Reflect)]
#[reflect(Component)]
pub struct CharacterMotor {
    /// Requested displacement for the current tick (обнуляется мотором)
    pub displacement: Vec3,
    /// Effective velocity of the last move (m/s)
    pub velocity: Vec3,
}

impl CharacterMotor {
    /// Consume the pending displacement and record the effective velocity.
    pub fn finish_move(&mut self, moved: Vec3, delta: f32) {
        self.velocity = if delta > 0.0 { moved / delta } else { Vec3::ZERO };
        self.displacement = Vec3::ZERO;
    }
}

/// Система: headless motor (GroundSurfaces вместо collision world).
pub fn apply_motion_headless(
    surfaces: Res<GroundSurfaces>,
    mut query: Query<(&mut Transform, &mut CharacterMotor)>,
    time: Res<Time<Fixed>>,
) {
    let delta = time.delta_secs();

    for (mut transform, mut motor) in query.iter_mut() {
        let previous = transform.translation;
        let resolved = surfaces.resolve_feet(previous, previous + motor.displacement);

        transform.translation = resolved;
        motor.finish_move(resolved - previous, delta);
    }
}
