//! Rapier backend: probe через `intersect_shape`, мотор через
//! `KinematicCharacterController`.
//!
//! Rapier шагает в FixedPostUpdate (`in_fixed_schedule`), поэтому результат
//! движения (`KinematicCharacterControllerOutput`) читается в начале
//! следующего tick'а.

use bevy::prelude::*;
use bevy_rapier3d::prelude::*;

use super::ground::{probe_center, GroundProbeSettings};
use super::layers::{COLLISION_LAYER_CHARACTERS, COLLISION_LAYER_DEFAULT, COLLISION_LAYER_ENVIRONMENT};
use super::motor::CharacterMotor;
use crate::movement::JumpState;
use crate::ControllerSet;

/// Capsule radius (m), совпадает с grounded_radius по умолчанию
pub const CAPSULE_RADIUS: f32 = 0.28;
/// Full capsule height (m)
pub const CAPSULE_HEIGHT: f32 = 1.8;
/// KCC skin (m): зазор, который controller держит до препятствий
pub const CHARACTER_SKIN: f32 = 0.02;

fn capsule_half_segment() -> f32 {
    (CAPSULE_HEIGHT * 0.5 - CAPSULE_RADIUS).max(0.0)
}

/// Query filter for the grounded probe: ground layers, no sensors.
pub fn probe_query_filter<'a>(settings: &GroundProbeSettings) -> QueryFilter<'a> {
    QueryFilter::new()
        .groups(CollisionGroups::new(
            Group::ALL,
            Group::from_bits_truncate(settings.ground_layers),
        ))
        .exclude_sensors()
}

/// Collision groups of the character capsule.
pub fn character_collision_groups() -> CollisionGroups {
    CollisionGroups::new(
        Group::from_bits_truncate(COLLISION_LAYER_CHARACTERS),
        Group::from_bits_truncate(
            COLLISION_LAYER_DEFAULT | COLLISION_LAYER_ENVIRONMENT | COLLISION_LAYER_CHARACTERS,
        ),
    )
}

/// Capsule center above the feet: низ капсулы на skin выше ног.
fn capsule_lift() -> f32 {
    capsule_half_segment() + CAPSULE_RADIUS + CHARACTER_SKIN
}

/// Rapier components for a character whose Transform sits at the feet.
///
/// Капсула смещена вверх через `custom_shape`, чтобы origin оставался на ногах.
/// Персонаж, заспавненный ногами на полу, стоит ровно на дистанции skin и не
/// начинает tick в penetration.
pub fn rapier_character_components() -> impl Bundle {
    (
        RigidBody::KinematicPositionBased,
        KinematicCharacterController {
            custom_shape: Some((
                Collider::capsule_y(capsule_half_segment(), CAPSULE_RADIUS),
                Vec3::new(0.0, capsule_lift(), 0.0),
                Quat::IDENTITY,
            )),
            offset: CharacterLength::Absolute(CHARACTER_SKIN),
            filter_flags: QueryFilterFlags::EXCLUDE_SENSORS,
            filter_groups: Some(character_collision_groups()),
            // Ground detection делает probe
            snap_to_ground: None,
            ..default()
        },
    )
}

/// Система: ground probe через Rapier spatial query.
pub fn probe_ground_rapier(
    rapier: ReadRapierContext,
    mut query: Query<(Entity, &Transform, &GroundProbeSettings, &mut JumpState)>,
) {
    let Ok(context) = rapier.single() else {
        return;
    };

    for (entity, transform, settings, mut state) in query.iter_mut() {
        let center = probe_center(transform.translation, settings);
        let shape = Collider::ball(settings.grounded_radius);
        let filter = probe_query_filter(settings)
            .exclude_collider(entity)
            .exclude_rigid_body(entity);

        state.apply_probe(|| {
            let mut hit = false;
            context.intersect_shape(center, Quat::IDENTITY, shape.raw.as_ref(), filter, |_| {
                hit = true;
                false
            });
            hit
        });
    }
}

/// Система: фактическое перемещение прошлого tick'а → CharacterMotor.velocity.
pub fn read_rapier_motor_output(
    mut query: Query<(&mut CharacterMotor, &KinematicCharacterControllerOutput)>,
    time: Res<Time<Fixed>>,
) {
    let delta = time.delta_secs();

    for (mut motor, output) in query.iter_mut() {
        motor.velocity = if delta > 0.0 {
            output.effective_translation / delta
        } else {
            Vec3::ZERO
        };
    }
}

/// Система: displacement → KinematicCharacterController.translation.
pub fn drive_rapier_motor(
    mut query: Query<(&mut CharacterMotor, &mut KinematicCharacterController)>,
) {
    for (mut motor, mut controller) in query.iter_mut() {
        controller.translation = Some(motor.displacement);
        motor.displacement = Vec3::ZERO;
    }
}

/// Plugin: Rapier backend (добавляет RapierPhysicsPlugin, если хост ещё не добавил).
pub struct RapierBackendPlugin;

impl Plugin for RapierBackendPlugin {
    fn build(&self, app: &mut App) {
        if !app.is_plugin_added::<RapierPhysicsPlugin<NoUserData>>() {
            app.add_plugins(RapierPhysicsPlugin::<NoUserData>::default().in_fixed_schedule());
        }

        app.add_systems(
            FixedUpdate,
            (
                (read_rapier_motor_output, probe_ground_rapier)
                    .chain()
                    .in_set(ControllerSet::GroundProbe),
                drive_rapier_motor.in_set(ControllerSet::Motor),
            ),
        );
    }
}
