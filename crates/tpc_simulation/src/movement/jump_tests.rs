//! Tests for the jump/fall/landing state machine.

#[cfg(test)]
mod tests {
    use crate::animation::AnimationClipNames;
    use crate::movement::{JumpPhase, JumpSettings, JumpState, GROUNDED_VERTICAL_VELOCITY};

    const DT: f32 = 1.0 / 60.0;

    /// Grounded state with the jump cooldown already elapsed.
    fn ready_to_jump(settings: &JumpSettings) -> JumpState {
        let mut state = JumpState::new(settings);
        state.jump_timeout_delta = 0.0;
        state
    }

    #[test]
    fn test_new_state_is_grounded_with_armed_timeouts() {
        let settings = JumpSettings::default();
        let state = JumpState::new(&settings);

        assert!(state.grounded);
        assert_eq!(state.phase(), JumpPhase::Grounded);
        assert_eq!(state.jump_timeout_delta, 0.5);
        assert_eq!(state.fall_timeout_delta, 0.15);
    }

    #[test]
    fn test_launch_velocity_reaches_jump_height() {
        let settings = JumpSettings::default();
        // sqrt(1.2 * 2 * 15) = 6
        assert!((settings.launch_velocity() - 6.0).abs() < 1e-5);
    }

    #[test]
    fn test_jump_blocked_during_cooldown() {
        let settings = JumpSettings::default();
        let mut state = JumpState::new(&settings);

        let outcome = state.step(&settings, true, DT);

        assert!(!state.jump);
        assert!(!outcome.clear_jump_input); // На земле input не трогаем
        assert!((state.jump_timeout_delta - (0.5 - DT)).abs() < 1e-6);
    }

    #[test]
    fn test_grounded_clamps_downward_velocity() {
        let settings = JumpSettings::default();
        let mut state = JumpState::new(&settings);
        state.vertical_velocity = -12.0;

        state.step(&settings, false, DT);

        let expected = GROUNDED_VERTICAL_VELOCITY + settings.gravity * DT;
        assert!((state.vertical_velocity - expected).abs() < 1e-6);
    }

    #[test]
    fn test_jump_waits_for_jumping_clip_before_impulse() {
        let settings = JumpSettings::default();
        let names = AnimationClipNames::default();
        let mut state = ready_to_jump(&settings);

        state.step(&settings, true, DT);
        assert!(state.jump);
        assert!(state.jump_start);
        assert_eq!(state.phase(), JumpPhase::Jumping);

        // Probe пропускается во время прыжка
        state.apply_probe(|| true);
        assert!(!state.grounded);

        // Граф ещё не в jumping clip: импульса нет, jump input сброшен
        let outcome = state.step(&settings, true, DT);
        assert!(outcome.impulse.is_none());
        assert!(outcome.clear_jump_input);
        assert!(state.vertical_velocity < 0.0);

        state.apply_clip(&names.jumping, &names);
        assert!(!state.jump_start);

        let outcome = state.step(&settings, false, DT);
        assert_eq!(outcome.impulse, Some(6.0));
        assert!((state.vertical_velocity - (6.0 + settings.gravity * DT)).abs() < 1e-4);

        // Импульс только один раз
        let outcome = state.step(&settings, false, DT);
        assert!(outcome.impulse.is_none());
    }

    #[test]
    fn test_jump_enters_free_fall_after_apex() {
        let settings = JumpSettings::default();
        let names = AnimationClipNames::default();
        let mut state = ready_to_jump(&settings);

        state.step(&settings, true, DT);
        state.apply_probe(|| true);
        state.apply_clip(&names.jumping, &names);

        let mut ticks = 0;
        while !state.free_fall && ticks < 120 {
            state.step(&settings, false, DT);
            ticks += 1;
        }

        // 6 m/s при g = -15 → apex через 0.4 s ≈ 24 tick'а
        assert!(state.free_fall);
        assert!((23..=27).contains(&ticks), "ticks = {}", ticks);
        assert_eq!(state.phase(), JumpPhase::FreeFall);
        assert!(state.jump, "jump stays set until the falling clip");
    }

    #[test]
    fn test_full_cycle_through_landing() {
        let settings = JumpSettings::default();
        let names = AnimationClipNames::default();
        let mut state = ready_to_jump(&settings);

        state.step(&settings, true, DT);
        state.apply_probe(|| true);
        state.apply_clip(&names.jumping, &names);
        for _ in 0..30 {
            state.step(&settings, false, DT);
        }
        assert!(state.free_fall);

        // Falling clip → jump снят, probe снова работает
        state.apply_clip(&names.falling, &names);
        assert!(!state.jump);
        state.apply_probe(|| true);
        assert!(state.grounded);

        // На земле флаги сбрасываются
        state.step(&settings, false, DT);
        assert!(!state.free_fall);
        assert!(!state.jump_trigger);

        state.apply_clip(&names.landing, &names);
        assert!(state.landing);
        assert_eq!(state.phase(), JumpPhase::Landing);

        state.apply_clip(&names.default, &names);
        assert!(!state.landing);
        assert_eq!(state.phase(), JumpPhase::Grounded);
    }

    #[test]
    fn test_ledge_drop_uses_fall_timeout() {
        let settings = JumpSettings::default();
        let mut state = JumpState::new(&settings);

        state.apply_probe(|| false);

        // Coyote time: 0.15 s ≈ 9 tick'ов
        for _ in 0..5 {
            state.step(&settings, false, DT);
        }
        assert!(!state.free_fall);
        assert_eq!(state.phase(), JumpPhase::Grounded);

        for _ in 0..10 {
            state.step(&settings, false, DT);
        }
        assert!(state.free_fall);
        assert!(!state.jump);
    }

    #[test]
    fn test_airborne_resets_jump_cooldown() {
        let settings = JumpSettings::default();
        let mut state = ready_to_jump(&settings);
        state.grounded = false;

        state.step(&settings, false, DT);
        assert_eq!(state.jump_timeout_delta, settings.jump_timeout);
    }

    #[test]
    fn test_fall_speed_unbounded_by_default() {
        let settings = JumpSettings::default();
        let mut state = JumpState::new(&settings);
        state.grounded = false;

        for _ in 0..60 * 10 {
            state.step(&settings, false, DT);
        }

        // Gravity не ограничена снизу: 10 s * -15 m/s²
        assert!(state.vertical_velocity < -settings.terminal_velocity);
        assert!((state.vertical_velocity + 150.0).abs() < 0.1);
    }

    #[test]
    fn test_gravity_stops_above_terminal_velocity() {
        let settings = JumpSettings::default();
        let mut state = JumpState::new(&settings);
        state.grounded = false;
        state.vertical_velocity = 60.0;

        state.step(&settings, false, DT);

        assert_eq!(state.vertical_velocity, 60.0);
    }

    #[test]
    fn test_fall_speed_clamp_when_enabled() {
        let settings = JumpSettings {
            clamp_fall_speed: true,
            ..Default::default()
        };
        let mut state = JumpState::new(&settings);
        state.grounded = false;

        for _ in 0..60 * 10 {
            state.step(&settings, false, DT);
        }

        assert_eq!(state.vertical_velocity, -settings.terminal_velocity);
    }

    #[test]
    fn test_first_ground_check_seeds_was_grounded() {
        let mut state = JumpState::default();
        assert!(!state.probed());

        state.apply_probe(|| false);

        assert!(state.probed());
        assert!(!state.grounded);
        assert!(!state.was_grounded);

        // Второй probe уже считается переходом
        state.apply_probe(|| true);
        assert!(state.grounded);
        assert!(!state.was_grounded);
    }

    #[test]
    fn test_apply_probe_skipped_while_jumping() {
        let mut state = JumpState::default();
        state.jump = true;

        let mut probed = false;
        state.apply_probe(|| {
            probed = true;
            true
        });

        assert!(!probed);
        assert!(!state.grounded);
    }

    #[test]
    fn test_inferred_clip_follows_flags() {
        let names = AnimationClipNames::default();
        let mut state = JumpState::default();
        assert_eq!(state.inferred_clip(&names), names.default);

        state.jump = true;
        state.jump_start = true;
        assert_eq!(state.inferred_clip(&names), names.jumping);

        state.jump_start = false;
        state.free_fall = true;
        assert_eq!(state.inferred_clip(&names), names.falling);

        // Touchdown после падения: один tick landing clip
        state.jump = false;
        state.grounded = true;
        assert_eq!(state.inferred_clip(&names), names.landing);
    }
}
