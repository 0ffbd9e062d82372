//! Animation feedback: текущий clip слоя 0 → флаги JumpState.

use bevy::prelude::*;
use serde::{Deserialize, Serialize};

use crate::movement::JumpState;

/// Clip names the state machine reacts to (сравнение строк, регистр важен).
#[derive(Component, Debug, Clone, PartialEq, Eq, Reflect, Serialize, Deserialize)]
#[reflect(Component)]
#[serde(default)]
pub struct AnimationClipNames {
    pub default: String,
    pub jumping: String,
    pub falling: String,
    pub landing: String,
}

impl Default for AnimationClipNames {
    fn default() -> Self {
        Self {
            default: "IDOL WALK RUN".to_string(),
            jumping: "JUMP_Jumping".to_string(),
            falling: "JUMP_Falling".to_string(),
            landing: "JUMP_LandingStart".to_string(),
        }
    }
}

/// Clip currently playing on layer 0 (пишет хост или SimulatedAnimationGraph).
#[derive(Component, Debug, Clone, Default, PartialEq, Eq, Reflect)]
#[reflect(Component)]
pub struct AnimationStateReport {
    pub current_clip: String,
}

impl AnimationStateReport {
    pub fn new(clip: impl Into<String>) -> Self {
        Self {
            current_clip: clip.into(),
        }
    }
}

/// Система: animation feedback (первая в tick'е).
///
/// Без AnimationStateReport clip выводится из флагов (`JumpState::inferred_clip`).
pub fn apply_animation_feedback(
    mut query: Query<(&AnimationClipNames, &mut JumpState, Option<&AnimationStateReport>)>,
) {
    for (names, mut state, report) in query.iter_mut() {
        let clip = match report {
            Some(report) => report.current_clip.as_str(),
            None => state.inferred_clip(names),
        };
        state.apply_clip(clip, names);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn feedback_app() -> App {
        let mut app = App::new();
        app.add_systems(Update, apply_animation_feedback);
        app
    }

    #[test]
    fn test_reported_clip_drives_flags() {
        let mut app = feedback_app();
        let names = AnimationClipNames::default();
        let mut state = JumpState::default();
        state.jump = true;
        state.jump_start = true;

        let entity = app
            .world_mut()
            .spawn((names.clone(), state, AnimationStateReport::new("JUMP_Jumping")))
            .id();
        app.update();

        let state = app.world().get::<JumpState>(entity).copied().unwrap_or_default();
        assert!(!state.jump_start);
        assert!(state.jump);
    }

    #[test]
    fn test_unknown_clip_changes_nothing() {
        let mut app = feedback_app();
        let mut state = JumpState::default();
        state.landing = true;

        let entity = app
            .world_mut()
            .spawn((
                AnimationClipNames::default(),
                state,
                AnimationStateReport::new("idol walk run"),
            ))
            .id();
        app.update();

        let after = app.world().get::<JumpState>(entity).copied().unwrap_or_default();
        assert!(after.landing);
    }

    #[test]
    fn test_missing_report_uses_inferred_clip() {
        let mut app = feedback_app();
        let mut state = JumpState::default();
        state.jump = true;
        state.jump_start = true;

        let entity = app
            .world_mut()
            .spawn((AnimationClipNames::default(), state))
            .id();
        app.update();

        let state = app.world().get::<JumpState>(entity).copied().unwrap_or_default();
        assert!(!state.jump_start);
    }

    #[test]
    fn test_clip_names_deserialize_partially() {
        let names: AnimationClipNames =
            serde_json::from_str(r#"{ "landing": "Land" }"#).unwrap_or_default();
        assert_eq!(names.landing, "Land");
        assert_eq!(names.default, "IDOL WALK RUN");
    }
}
