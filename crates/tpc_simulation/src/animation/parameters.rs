//! Animation parameters, которые контроллер пушит в граф хоста.

use bevy::prelude::*;

use crate::movement::{JumpState, Locomotion};

/// FNV-1a (32 bit) of a parameter name.
pub const fn fnv1a_32(name: &str) -> u32 {
    let bytes = name.as_bytes();
    let mut hash: u32 = 0x811c_9dc5;
    let mut i = 0;
    while i < bytes.len() {
        hash ^= bytes[i] as u32;
        hash = hash.wrapping_mul(0x0100_0193);
        i += 1;
    }
    hash
}

/// Parameter of the host animation graph.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum AnimParam {
    Speed,
    MotionSpeed,
    Grounded,
    Jump,
    FreeFall,
    Landing,
}

impl AnimParam {
    pub const ALL: [AnimParam; 6] = [
        AnimParam::Speed,
        AnimParam::MotionSpeed,
        AnimParam::Grounded,
        AnimParam::Jump,
        AnimParam::FreeFall,
        AnimParam::Landing,
    ];

    /// Name as the graph knows it.
    pub const fn name(self) -> &'static str {
        match self {
            AnimParam::Speed => "Speed",
            AnimParam::MotionSpeed => "MotionSpeed",
            AnimParam::Grounded => "Grounded",
            AnimParam::Jump => "Jump",
            AnimParam::FreeFall => "FreeFall",
            AnimParam::Landing => "Landing",
        }
    }

    /// Stable id for hosts that key parameters by hash.
    pub const fn id(self) -> u32 {
        fnv1a_32(self.name())
    }

    pub fn from_name(name: &str) -> Option<Self> {
        Self::ALL.into_iter().find(|param| param.name() == name)
    }
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub enum AnimParamValue {
    Float(f32),
    Bool(bool),
}

/// Current parameter values of one character (хост читает их после tick'а).
#[derive(Component, Debug, Clone, Copy, Default, PartialEq, Reflect)]
#[reflect(Component)]
pub struct AnimationParameters {
    pub speed: f32,
    pub motion_speed: f32,
    pub grounded: bool,
    pub jump: bool,
    pub free_fall: bool,
    pub landing: bool,
}

impl AnimationParameters {
    pub fn get(&self, param: AnimParam) -> AnimParamValue {
        match param {
            AnimParam::Speed => AnimParamValue::Float(self.speed),
            AnimParam::MotionSpeed => AnimParamValue::Float(self.motion_speed),
            AnimParam::Grounded => AnimParamValue::Bool(self.grounded),
            AnimParam::Jump => AnimParamValue::Bool(self.jump),
            AnimParam::FreeFall => AnimParamValue::Bool(self.free_fall),
            AnimParam::Landing => AnimParamValue::Bool(self.landing),
        }
    }

    /// All parameters in declaration order.
    pub fn iter(&self) -> impl Iterator<Item = (AnimParam, AnimParamValue)> + '_ {
        AnimParam::ALL.into_iter().map(move |param| (param, self.get(param)))
    }

    pub fn capture(locomotion: &Locomotion, state: &JumpState) -> Self {
        Self {
            speed: locomotion.animation_blend,
            motion_speed: locomotion.input_magnitude,
            grounded: state.grounded,
            jump: state.jump,
            free_fall: state.free_fall,
            landing: state.landing,
        }
    }
}

/// Система: Locomotion + JumpState → AnimationParameters.
///
/// Персонажи без AnimationParameters просто пропускаются.
pub fn push_animation_parameters(
    mut query: Query<(&Locomotion, &JumpState, &mut AnimationParameters)>,
) {
    for (locomotion, state, mut parameters) in query.iter_mut() {
        let next = AnimationParameters::capture(locomotion, state);
        // set_if_neq: change detection только при реальном изменении
        parameters.set_if_neq(next);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_fnv1a_reference_values() {
        assert_eq!(fnv1a_32(""), 0x811c_9dc5);
        assert_eq!(fnv1a_32("a"), 0xe40c_292c);
    }

    #[test]
    fn test_param_names_and_ids_are_unique() {
        let mut ids: Vec<u32> = AnimParam::ALL.iter().map(|param| param.id()).collect();
        ids.sort_unstable();
        ids.dedup();
        assert_eq!(ids.len(), AnimParam::ALL.len());

        assert_eq!(AnimParam::from_name("MotionSpeed"), Some(AnimParam::MotionSpeed));
        assert_eq!(AnimParam::from_name("motionspeed"), None);
    }

    #[test]
    fn test_capture_reads_blend_and_flags() {
        let locomotion = Locomotion {
            animation_blend: 1.5,
            input_magnitude: 0.5,
            ..default()
        };
        let mut state = JumpState::default();
        state.free_fall = true;

        let parameters = AnimationParameters::capture(&locomotion, &state);

        assert_eq!(parameters.get(AnimParam::Speed), AnimParamValue::Float(1.5));
        assert_eq!(parameters.get(AnimParam::MotionSpeed), AnimParamValue::Float(0.5));
        assert_eq!(parameters.get(AnimParam::Grounded), AnimParamValue::Bool(true));
        assert_eq!(parameters.get(AnimParam::FreeFall), AnimParamValue::Bool(true));
        assert_eq!(parameters.iter().count(), 6);
    }
}
