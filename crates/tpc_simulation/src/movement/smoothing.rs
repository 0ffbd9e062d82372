//! Scalar smoothing helpers (lerp, rounding, critically damped springs, angle wrap).
//!
//! Углы в градусах. Семантика совпадает с тем, как контроллер тюнили:
//! lerp клампит t в [0, 1], rounding — banker's (half to even).

/// Linear interpolation with `t` clamped to `[0, 1]`.
#[inline]
pub fn lerp_clamped(a: f32, b: f32, t: f32) -> f32 {
    a + (b - a) * t.clamp(0.0, 1.0)
}

/// Rounds to 3 decimal places, ties to even.
#[inline]
pub fn round_to_millis(value: f32) -> f32 {
    (value * 1000.0).round_ties_even() / 1000.0
}

/// Wraps `t` into `[0, length]`.
#[inline]
pub fn repeat(t: f32, length: f32) -> f32 {
    (t - (t / length).floor() * length).max(0.0).min(length)
}

/// Shortest signed difference `target - current`, in `(-180, 180]`.
pub fn delta_angle(current: f32, target: f32) -> f32 {
    let mut delta = repeat(target - current, 360.0);
    if delta > 180.0 {
        delta -= 360.0;
    }
    delta
}

/// Wraps once by ±360 then clamps to `[min, max]`.
///
/// Не паникует при `min > max` (в отличие от `f32::clamp`): ниже `min` даёт
/// `min`, иначе выше `max` даёт `max`.
pub fn clamp_angle(angle: f32, min: f32, max: f32) -> f32 {
    let mut angle = angle;
    if angle < -360.0 {
        angle += 360.0;
    }
    if angle > 360.0 {
        angle -= 360.0;
    }
    if angle < min {
        min
    } else if angle > max {
        max
    } else {
        angle
    }
}

/// Critically damped spring toward `target`.
///
/// `velocity` is carried between calls. `smooth_time` is roughly the time to
/// reach the target; values below 1e-4 are treated as 1e-4. Never overshoots.
pub fn smooth_damp(
    current: f32,
    target: f32,
    velocity: &mut f32,
    smooth_time: f32,
    max_speed: f32,
    delta: f32,
) -> f32 {
    if delta <= 0.0 {
        return current;
    }

    let smooth_time = smooth_time.max(0.0001);
    let omega = 2.0 / smooth_time;

    // Аппроксимация exp(-omega * dt) полиномом
    let x = omega * delta;
    let exp = 1.0 / (1.0 + x + 0.48 * x * x + 0.235 * x * x * x);

    let requested_target = target;
    let max_change = max_speed * smooth_time;
    let change = (current - target).max(-max_change).min(max_change);
    let target = current - change;

    let temp = (*velocity + omega * change) * delta;
    *velocity = (*velocity - omega * temp) * exp;
    let mut output = target + (change + temp) * exp;

    // Не перелетаем цель
    if (requested_target - current > 0.0) == (output > requested_target) {
        output = requested_target;
        *velocity = (output - requested_target) / delta;
    }

    output
}

/// [`smooth_damp`] along the shortest arc between two angles (degrees).
pub fn smooth_damp_angle(
    current: f32,
    target: f32,
    velocity: &mut f32,
    smooth_time: f32,
    delta: f32,
) -> f32 {
    let target = current + delta_angle(current, target);
    smooth_damp(current, target, velocity, smooth_time, f32::INFINITY, delta)
}
