//! Scripted и random input drivers (headless binary, soak/determinism тесты).

use bevy::prelude::*;
use rand::Rng;

use super::ControllerInput;
use crate::{ControllerSet, DeterministicRng};

/// Input held from `at` (seconds since the script started) until the next frame.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ScriptedFrame {
    pub at: f32,
    pub input: ControllerInput,
}

/// Timeline of input frames replayed into `ControllerInput`.
#[derive(Component, Debug, Clone, Default)]
pub struct ScriptedInput {
    frames: Vec<ScriptedFrame>,
    pub elapsed: f32,
}

impl ScriptedInput {
    pub fn new(mut frames: Vec<ScriptedFrame>) -> Self {
        frames.sort_by(|a, b| a.at.total_cmp(&b.at));
        Self { frames, elapsed: 0.0 }
    }

    /// Builder: hold `input` from `at` on.
    pub fn then(mut self, at: f32, input: ControllerInput) -> Self {
        let index = self.frames.partition_point(|frame| frame.at <= at);
        self.frames.insert(index, ScriptedFrame { at, input });
        self
    }

    /// Active frame at time `t` (последний с `at <= t`).
    pub fn sample(&self, t: f32) -> Option<ControllerInput> {
        let index = self.frames.partition_point(|frame| frame.at <= t);
        index.checked_sub(1).map(|i| self.frames[i].input)
    }

    pub fn duration(&self) -> f32 {
        self.frames.last().map(|frame| frame.at).unwrap_or(0.0)
    }
}

/// Система: ScriptedInput → ControllerInput.
pub fn drive_scripted_input(
    mut query: Query<(&mut ScriptedInput, &mut ControllerInput)>,
    time: Res<Time<Fixed>>,
) {
    let delta = time.delta_secs();

    for (mut script, mut input) in query.iter_mut() {
        if let Some(frame) = script.sample(script.elapsed) {
            *input = frame;
        }
        script.elapsed += delta;
    }
}

/// Seeded random walk: every `change_interval` picks one of 8 directions or idle.
#[derive(Component, Debug, Clone, Reflect)]
#[reflect(Component)]
pub struct RandomWander {
    /// Секунды между сменами направления
    pub change_interval: f32,
    /// Probability of a jump press on each change (0..=1)
    pub jump_chance: f64,
    /// Probability of sprinting on each change (0..=1)
    pub sprint_chance: f64,
    /// Max look rate picked per change (deg/s)
    pub max_look_rate: f32,
    pub timer: f32,
}

impl Default for RandomWander {
    fn default() -> Self {
        Self {
            change_interval: 0.75,
            jump_chance: 0.3,
            sprint_chance: 0.4,
            max_look_rate: 90.0,
            timer: 0.0,
        }
    }
}

/// Система: RandomWander → ControllerInput (RNG из DeterministicRng).
pub fn drive_random_wander(
    mut query: Query<(&mut RandomWander, &mut ControllerInput)>,
    mut rng: ResMut<DeterministicRng>,
    time: Res<Time<Fixed>>,
) {
    let delta = time.delta_secs();

    for (mut wander, mut input) in query.iter_mut() {
        wander.timer -= delta;
        if wander.timer > 0.0 {
            // Jump — короткое нажатие, только на tick смены
            input.jump = false;
            continue;
        }
        wander.timer = wander.change_interval;

        let generator = &mut rng.rng;
        let direction = generator.gen_range(0..9);
        input.move_axis = if direction == 8 {
            Vec2::ZERO
        } else {
            let angle = direction as f32 * std::f32::consts::FRAC_PI_4;
            Vec2::new(angle.sin(), angle.cos())
        };
        input.sprint = generator.gen_bool(wander.sprint_chance.clamp(0.0, 1.0));
        input.jump = generator.gen_bool(wander.jump_chance.clamp(0.0, 1.0));

        let look_rate = wander.max_look_rate.abs();
        input.look = if look_rate > 0.0 {
            Vec2::new(generator.gen_range(-look_rate..=look_rate), 0.0)
        } else {
            Vec2::ZERO
        };
    }
}

/// Plugin: scripted + random drivers (headless).
pub struct ScriptedInputPlugin;

impl Plugin for ScriptedInputPlugin {
    fn build(&self, app: &mut App) {
        app.register_type::<RandomWander>().add_systems(
            FixedUpdate,
            (drive_scripted_input, drive_random_wander).in_set(ControllerSet::Input),
        );
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_sample_holds_last_frame() {
        let script = ScriptedInput::default()
            .then(0.0, ControllerInput::moving(Vec2::Y))
            .then(1.0, ControllerInput::default().with_jump(true))
            .then(2.0, ControllerInput::default());

        assert_eq!(script.sample(0.5).map(|i| i.move_axis), Some(Vec2::Y));
        assert_eq!(script.sample(1.0).map(|i| i.jump), Some(true));
        assert_eq!(script.sample(10.0), Some(ControllerInput::default()));
        assert_eq!(script.duration(), 2.0);
    }

    #[test]
    fn test_sample_before_first_frame_is_none() {
        let script = ScriptedInput::new(vec![ScriptedFrame {
            at: 0.5,
            input: ControllerInput::moving(Vec2::X),
        }]);
        assert!(script.sample(0.1).is_none());
    }

    #[test]
    fn test_frames_sorted_on_new() {
        let script = ScriptedInput::new(vec![
            ScriptedFrame { at: 2.0, input: ControllerInput::moving(Vec2::X) },
            ScriptedFrame { at: 0.0, input: ControllerInput::moving(Vec2::Y) },
        ]);
        assert_eq!(script.sample(1.0).map(|i| i.move_axis), Some(Vec2::Y));
    }
}
