//! Simulated animation graph для headless прогонов.
//!
//! Повторяет переходы графа хоста по параметрам, чтобы у контроллера была
//! обратная связь (jump impulse ждёт jumping clip, landing живёт landing_duration).

use bevy::prelude::*;

use super::feedback::{AnimationClipNames, AnimationStateReport};
use super::parameters::AnimationParameters;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Reflect)]
pub enum SimulatedClip {
    #[default]
    Locomotion,
    Jumping,
    Falling,
    Landing,
}

impl SimulatedClip {
    pub fn clip_name<'a>(&self, names: &'a AnimationClipNames) -> &'a str {
        match self {
            SimulatedClip::Locomotion => &names.default,
            SimulatedClip::Jumping => &names.jumping,
            SimulatedClip::Falling => &names.falling,
            SimulatedClip::Landing => &names.landing,
        }
    }
}

#[derive(Component, Debug, Clone, Copy, PartialEq, Reflect)]
#[reflect(Component)]
pub struct SimulatedAnimationGraph {
    pub clip: SimulatedClip,
    /// Time spent in the current clip (s)
    pub elapsed: f32,
    /// Landing clip length before returning to locomotion (s)
    pub landing_duration: f32,
}

impl Default for SimulatedAnimationGraph {
    fn default() -> Self {
        Self {
            clip: SimulatedClip::Locomotion,
            elapsed: 0.0,
            landing_duration: 0.35,
        }
    }
}

impl SimulatedAnimationGraph {
    /// Next clip for the given parameters (без учёта elapsed).
    fn transition(&self, parameters: &AnimationParameters) -> SimulatedClip {
        match self.clip {
            SimulatedClip::Locomotion if parameters.jump => SimulatedClip::Jumping,
            SimulatedClip::Locomotion if parameters.free_fall => SimulatedClip::Falling,
            SimulatedClip::Jumping if parameters.free_fall => SimulatedClip::Falling,
            SimulatedClip::Falling if parameters.grounded => SimulatedClip::Landing,
            SimulatedClip::Landing if parameters.jump => SimulatedClip::Jumping,
            SimulatedClip::Landing if self.elapsed >= self.landing_duration => {
                SimulatedClip::Locomotion
            }
            clip => clip,
        }
    }

    /// Advance by `delta`; returns true when the clip changed.
    pub fn advance(&mut self, parameters: &AnimationParameters, delta: f32) -> bool {
        self.elapsed += delta;
        let next = self.transition(parameters);
        if next == self.clip {
            return false;
        }
        self.clip = next;
        self.elapsed = 0.0;
        true
    }
}

/// Система: SimulatedAnimationGraph → AnimationStateReport (после push параметров).
pub fn advance_simulated_graph(
    mut query: Query<(
        &AnimationParameters,
        &AnimationClipNames,
        &mut SimulatedAnimationGraph,
        &mut AnimationStateReport,
    )>,
    time: Res<Time<Fixed>>,
) {
    let delta = time.delta_secs();

    for (parameters, names, mut graph, mut report) in query.iter_mut() {
        graph.advance(parameters, delta);

        let clip = graph.clip.clip_name(names);
        if report.current_clip != clip {
            report.current_clip = clip.to_string();
        }
    }
}
