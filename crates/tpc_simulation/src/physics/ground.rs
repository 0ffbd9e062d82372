//! Grounded probe: sphere overlap под ногами персонажа.
//!
//! Отдельно от collider'а мотора: мотор может "стоять" на краю, а probe уже
//! не видит землю (и наоборот), что и даёт coyote time на уступах.
//!
//! Headless backend: `GroundSurfaces` (набор горизонтальных slab'ов).
//! Rapier backend: см. `physics::rapier`.

use bevy::prelude::*;
use serde::{Deserialize, Serialize};

use super::layers::{COLLISION_LAYER_ENVIRONMENT, COLLISION_MASK_GROUND};
use crate::movement::JumpState;

/// Probe geometry and filter.
#[derive(Component, Debug, Clone, Copy, PartialEq, Reflect, Serialize, Deserialize)]
#[reflect(Component)]
#[serde(default)]
pub struct GroundProbeSettings {
    /// Центр сферы = position.y - offset (отрицательный offset поднимает сферу)
    pub grounded_offset: f32,
    /// Should match the motor capsule radius
    pub grounded_radius: f32,
    /// Layer mask of surfaces that count as ground
    pub ground_layers: u32,
}

impl Default for GroundProbeSettings {
    fn default() -> Self {
        Self {
            grounded_offset: -0.14,
            grounded_radius: 0.28,
            ground_layers: COLLISION_MASK_GROUND,
        }
    }
}

/// Sphere centre for a character standing at `position`.
pub fn probe_center(position: Vec3, settings: &GroundProbeSettings) -> Vec3 {
    Vec3::new(position.x, position.y - settings.grounded_offset, position.z)
}

/// Horizontal solid (or trigger) slab: верхняя грань на `top`, толщина вниз.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct GroundSlab {
    pub top: f32,
    pub thickness: f32,
    /// XZ footprint (min, max); `None` = бесконечная плоскость
    pub footprint: Option<(Vec2, Vec2)>,
    pub layer: u32,
    /// Triggers never count as ground and never block the motor
    pub trigger: bool,
}

impl GroundSlab {
    /// Infinite floor on the environment layer.
    pub fn floor(top: f32) -> Self {
        Self {
            top,
            thickness: f32::INFINITY,
            footprint: None,
            layer: COLLISION_LAYER_ENVIRONMENT,
            trigger: false,
        }
    }

    /// Rectangular platform (`min`/`max` in XZ).
    pub fn platform(top: f32, min: Vec2, max: Vec2) -> Self {
        Self {
            top,
            thickness: 1.0,
            footprint: Some((min.min(max), min.max(max))),
            layer: COLLISION_LAYER_ENVIRONMENT,
            trigger: false,
        }
    }

    pub fn with_layer(mut self, layer: u32) -> Self {
        self.layer = layer;
        self
    }

    pub fn as_trigger(mut self) -> Self {
        self.trigger = true;
        self
    }

    /// Closest point of the slab volume to `point`.
    fn closest_point(&self, point: Vec3) -> Vec3 {
        let (x, z) = match self.footprint {
            Some((min, max)) => (point.x.max(min.x).min(max.x), point.z.max(min.y).min(max.y)),
            None => (point.x, point.z),
        };
        let y = point.y.max(self.top - self.thickness).min(self.top);
        Vec3::new(x, y, z)
    }

    pub fn contains_xz(&self, point: Vec3) -> bool {
        match self.footprint {
            Some((min, max)) => {
                point.x >= min.x && point.x <= max.x && point.z >= min.y && point.z <= max.y
            }
            None => true,
        }
    }

    pub fn intersects_sphere(&self, center: Vec3, radius: f32) -> bool {
        self.closest_point(center).distance_squared(center) <= radius * radius
    }
}

/// Headless world geometry for the probe and the motor.
#[derive(Resource, Debug, Clone)]
pub struct GroundSurfaces {
    pub slabs: Vec<GroundSlab>,
}

impl Default for GroundSurfaces {
    /// Пол на y = 0 (как заглушка ground detection у kinematic контроллера)
    fn default() -> Self {
        Self {
            slabs: vec![GroundSlab::floor(0.0)],
        }
    }
}

/// Motor skin: feet this far below a top still count as "were above it".
const MOTOR_SKIN: f32 = 1e-3;

impl GroundSurfaces {
    pub fn new(slabs: Vec<GroundSlab>) -> Self {
        Self { slabs }
    }

    pub fn empty() -> Self {
        Self { slabs: Vec::new() }
    }

    /// Sphere overlap against non-trigger slabs on `mask` layers.
    pub fn check_sphere(&self, center: Vec3, radius: f32, mask: u32) -> bool {
        self.slabs.iter().any(|slab| {
            !slab.trigger && slab.layer & mask != 0 && slab.intersects_sphere(center, radius)
        })
    }

    /// Feet moving `previous → next` stop on the highest top they crossed.
    pub fn resolve_feet(&self, previous: Vec3, next: Vec3) -> Vec3 {
        let support = self
            .slabs
            .iter()
            .filter(|slab| !slab.trigger && slab.contains_xz(next))
            .filter(|slab| previous.y >= slab.top - MOTOR_SKIN && next.y < slab.top)
            .map(|slab| slab.top)
            .reduce(f32::max);

        match support {
            Some(top) => Vec3::new(next.x, top, next.z),
            None => next,
        }
    }
}

/// Система: headless ground probe.
pub fn probe_ground_headless(
    surfaces: Res<GroundSurfaces>,
    mut query: Query<(&Transform, &GroundProbeSettings, &mut JumpState)>,
) {
    for (transform, settings, mut state) in query.iter_mut() {
        let center = probe_center(transform.translation, settings);
        state.apply_probe(|| {
            surfaces.check_sphere(center, settings.grounded_radius, settings.ground_layers)
        });
    }
}

const PROBE_COLOR_GROUNDED: [f32; 4] = [0.0, 1.0, 0.0, 0.35];
const PROBE_COLOR_AIRBORNE: [f32; 4] = [1.0, 0.0, 0.0, 0.35];

/// Probe sphere for host-side debug drawing (gizmos, overlay).
#[derive(Component, Debug, Clone, Copy, PartialEq, Default, Reflect)]
#[reflect(Component)]
pub struct ProbeDebugShape {
    pub center: Vec3,
    pub radius: f32,
    /// Linear RGBA: translucent green = grounded, red = not
    pub color: [f32; 4],
}

impl ProbeDebugShape {
    pub fn from_probe(position: Vec3, settings: &GroundProbeSettings, grounded: bool) -> Self {
        Self {
            center: probe_center(position, settings),
            radius: settings.grounded_radius,
            color: if grounded {
                PROBE_COLOR_GROUNDED
            } else {
                PROBE_COLOR_AIRBORNE
            },
        }
    }
}

/// Система: обновляет ProbeDebugShape после probe.
pub fn update_probe_debug_shape(
    mut query: Query<(&Transform, &GroundProbeSettings, &JumpState, &mut ProbeDebugShape)>,
) {
    for (transform, settings, state, mut shape) in query.iter_mut() {
        *shape = ProbeDebugShape::from_probe(transform.translation, settings, state.grounded);
    }
}
