//! Animation seam — граф принадлежит хосту
//!
//! - parameters: Speed/MotionSpeed/Grounded/Jump/FreeFall/Landing → хост
//! - feedback: текущий clip хоста → флаги JumpState
//! - simulated: встроенный граф для headless (опционально)

pub mod feedback;
pub mod parameters;
pub mod simulated;

use bevy::prelude::*;

use crate::ControllerSet;

pub use feedback::{apply_animation_feedback, AnimationClipNames, AnimationStateReport};
pub use parameters::{
    fnv1a_32, push_animation_parameters, AnimParam, AnimParamValue, AnimationParameters,
};
pub use simulated::{advance_simulated_graph, SimulatedAnimationGraph, SimulatedClip};

/// Plugin: feedback в начале tick'а, параметры и simulated граф в конце.
pub struct AnimationFeedbackPlugin;

impl Plugin for AnimationFeedbackPlugin {
    fn build(&self, app: &mut App) {
        app.register_type::<AnimationClipNames>()
            .register_type::<AnimationStateReport>()
            .register_type::<AnimationParameters>()
            .register_type::<SimulatedAnimationGraph>()
            .add_systems(
                FixedUpdate,
                (
                    apply_animation_feedback.in_set(ControllerSet::AnimationFeedback),
                    (push_animation_parameters, advance_simulated_graph)
                        .chain()
                        .in_set(ControllerSet::Animation),
                ),
            );
    }
}
