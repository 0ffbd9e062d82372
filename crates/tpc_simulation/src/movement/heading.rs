//! Yaw/pitch convention ↔ Bevy transforms.
//!
//! Controller angles are degrees, yaw clockwise seen from above with 0 =
//! forward, pitch positive = looking down. Bevy is right-handed with `-Z`
//! forward, so the sign flips happen only here.

use bevy::prelude::*;

/// Character rotation for a yaw.
pub fn rotation_from_yaw(yaw: f32) -> Quat {
    Quat::from_rotation_y(-yaw.to_radians())
}

/// Horizontal unit direction for a yaw (world space).
pub fn direction_from_yaw(yaw: f32) -> Vec3 {
    let radians = yaw.to_radians();
    Vec3::new(radians.sin(), 0.0, -radians.cos())
}

/// Yaw of a rotation in `[0, 360)`. A rotation looking straight up/down yields 0.
pub fn yaw_from_rotation(rotation: Quat) -> f32 {
    let forward = rotation * Vec3::NEG_Z;
    if forward.x.abs() < 1e-6 && forward.z.abs() < 1e-6 {
        return 0.0;
    }
    forward.x.atan2(-forward.z).to_degrees().rem_euclid(360.0)
}

/// Yaw of a movement input (x = right, y = forward) relative to the viewer.
pub fn yaw_from_input(move_axis: Vec2) -> f32 {
    let direction = move_axis.normalize_or_zero();
    direction.x.atan2(direction.y).to_degrees()
}

/// Follow-target rotation: `Euler(pitch, yaw, 0)` in controller convention.
pub fn look_rotation(yaw: f32, pitch: f32) -> Quat {
    Quat::from_euler(EulerRot::YXZ, -yaw.to_radians(), -pitch.to_radians(), 0.0)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn approx(a: Vec3, b: Vec3) -> bool {
        (a - b).length() < 1e-4
    }

    #[test]
    fn test_direction_from_yaw_cardinals() {
        assert!(approx(direction_from_yaw(0.0), Vec3::NEG_Z));
        assert!(approx(direction_from_yaw(90.0), Vec3::X));
        assert!(approx(direction_from_yaw(180.0), Vec3::Z));
        assert!(approx(direction_from_yaw(-90.0), Vec3::NEG_X));
    }

    #[test]
    fn test_rotation_matches_direction() {
        for yaw in [0.0, 33.0, 90.0, 200.0, 315.0] {
            let forward = rotation_from_yaw(yaw) * Vec3::NEG_Z;
            assert!(approx(forward, direction_from_yaw(yaw)), "yaw {}", yaw);
        }
    }

    #[test]
    fn test_yaw_roundtrip_through_rotation() {
        for yaw in [0.0_f32, 45.0, 135.0, 270.0] {
            let back = yaw_from_rotation(rotation_from_yaw(yaw));
            assert!((back - yaw).abs() < 1e-3, "{} -> {}", yaw, back);
        }
        let back = yaw_from_rotation(rotation_from_yaw(-90.0));
        assert!((back - 270.0).abs() < 1e-3);
    }

    #[test]
    fn test_yaw_from_input() {
        assert_eq!(yaw_from_input(Vec2::new(0.0, 1.0)), 0.0);
        assert!((yaw_from_input(Vec2::new(1.0, 0.0)) - 90.0).abs() < 1e-4);
        assert!((yaw_from_input(Vec2::new(0.0, -1.0)).abs() - 180.0).abs() < 1e-4);
        assert!((yaw_from_input(Vec2::new(0.5, 0.5)) - 45.0).abs() < 1e-4);
    }

    #[test]
    fn test_look_rotation_positive_pitch_looks_down() {
        let forward = look_rotation(0.0, 30.0) * Vec3::NEG_Z;
        assert!(forward.y < 0.0);
        let forward = look_rotation(90.0, 0.0) * Vec3::NEG_Z;
        assert!(approx(forward, Vec3::X));
    }
}
