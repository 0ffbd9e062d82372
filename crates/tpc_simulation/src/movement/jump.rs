//! Jump / fall / landing state machine + vertical velocity.
//!
//! Флаги не взаимоисключающие (Jump и FreeFall одновременно во время
//! снижения после прыжка, Landing живёт пока граф не вернулся в locomotion),
//! поэтому состояние = набор флагов, а `JumpPhase` выводится из них.
//!
//! Переходы:
//! - Grounded → Jumping: jump input + истёкший jump timeout
//! - Jumping: импульс только после того, как граф вошёл в jumping clip
//! - Jumping → FreeFall: vertical velocity ≤ 0
//! - Grounded → FreeFall: сошли с уступа и fall timeout истёк (coyote time)
//! - FreeFall → Landing: граф вошёл в landing clip
//! - Landing → Grounded: граф вернулся в default clip

use bevy::prelude::*;
use serde::{Deserialize, Serialize};

use crate::animation::AnimationClipNames;

/// Vertical velocity kept while grounded (прижимает к земле на спусках).
pub const GROUNDED_VERTICAL_VELOCITY: f32 = -2.0;

/// Jump and gravity tuning.
#[derive(Component, Debug, Clone, Copy, PartialEq, Reflect, Serialize, Deserialize)]
#[reflect(Component)]
#[serde(default)]
pub struct JumpSettings {
    /// Apex height (m)
    pub jump_height: f32,
    /// Gravity (m/s², negative)
    pub gravity: f32,
    /// Cooldown between jumps (s)
    pub jump_timeout: f32,
    /// Coyote time before a ledge drop counts as a fall (s)
    pub fall_timeout: f32,
    /// Gravity добавляется, пока vertical velocity ниже этого значения (m/s)
    pub terminal_velocity: f32,
    /// Ограничивать скорость падения `-terminal_velocity`
    pub clamp_fall_speed: bool,
}

impl Default for JumpSettings {
    fn default() -> Self {
        Self {
            jump_height: 1.2,
            gravity: -15.0,
            jump_timeout: 0.5,
            fall_timeout: 0.15,
            terminal_velocity: 53.0,
            clamp_fall_speed: false,
        }
    }
}

impl JumpSettings {
    /// Launch speed reaching `jump_height` under `gravity`.
    pub fn launch_velocity(&self) -> f32 {
        (self.jump_height * -2.0 * self.gravity).max(0.0).sqrt()
    }
}

/// Phase derived from the state flags (для логов, событий, хоста).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Reflect)]
pub enum JumpPhase {
    #[default]
    Grounded,
    Jumping,
    FreeFall,
    Landing,
}

impl JumpPhase {
    pub fn as_str(&self) -> &'static str {
        match self {
            JumpPhase::Grounded => "Grounded",
            JumpPhase::Jumping => "Jumping",
            JumpPhase::FreeFall => "FreeFall",
            JumpPhase::Landing => "Landing",
        }
    }
}

/// Per-character state machine.
///
/// Инвариант: пока `jump == true`, ground probe не выполняется и `grounded == false`.
#[derive(Component, Debug, Clone, Copy, PartialEq, Reflect)]
#[reflect(Component)]
pub struct JumpState {
    /// Ground probe result (отдельно от collider'а мотора)
    pub grounded: bool,
    pub jump: bool,
    pub free_fall: bool,
    /// Jump accepted, ждём пока граф войдёт в jumping clip
    pub jump_start: bool,
    pub landing: bool,
    /// Impulse already applied for the current jump
    pub jump_trigger: bool,
    pub vertical_velocity: f32,
    /// Velocity the pending jump will launch with
    pub jump_velocity: f32,
    pub jump_timeout_delta: f32,
    pub fall_timeout_delta: f32,

    // Bookkeeping для событий (report_state_changes)
    pub(crate) was_grounded: bool,
    pub(crate) last_phase: JumpPhase,
    pub(crate) impulse_fired: Option<f32>,
    /// Ground probe уже отработал хотя бы раз
    pub(crate) probed: bool,
}

impl Default for JumpState {
    fn default() -> Self {
        Self::new(&JumpSettings::default())
    }
}

/// What the caller must do after a tick.
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct JumpOutcome {
    /// Drop the jump input (airborne presses are not buffered)
    pub clear_jump_input: bool,
    /// Launch velocity if the impulse fired this tick
    pub impulse: Option<f32>,
}

impl JumpState {
    /// Fresh state, both cooldowns armed.
    ///
    /// `grounded` здесь только начальное значение: `apply_jump_and_gravity`
    /// не трогает персонажа до первого ground probe.
    pub fn new(settings: &JumpSettings) -> Self {
        Self {
            grounded: true,
            jump: false,
            free_fall: false,
            jump_start: false,
            landing: false,
            jump_trigger: false,
            vertical_velocity: 0.0,
            jump_velocity: 0.0,
            jump_timeout_delta: settings.jump_timeout,
            fall_timeout_delta: settings.fall_timeout,
            was_grounded: true,
            last_phase: JumpPhase::Grounded,
            impulse_fired: None,
            probed: false,
        }
    }

    /// True once the ground probe has run for this character.
    pub fn probed(&self) -> bool {
        self.probed
    }

    pub fn phase(&self) -> JumpPhase {
        if self.free_fall {
            JumpPhase::FreeFall
        } else if self.jump {
            JumpPhase::Jumping
        } else if self.landing {
            JumpPhase::Landing
        } else {
            JumpPhase::Grounded
        }
    }

    /// Animation feedback: the clip layer 0 is currently playing.
    pub fn apply_clip(&mut self, clip: &str, names: &AnimationClipNames) {
        if clip == names.default {
            self.landing = false;
        }
        if clip == names.jumping {
            self.jump_start = false;
        }
        if clip == names.falling {
            self.jump = false;
        }
        if clip == names.landing {
            self.free_fall = false;
            self.landing = true;
        }
    }

    /// Clip a graph would be in given only these flags.
    ///
    /// Для персонажей без AnimationStateReport: иначе jump_start никогда не
    /// сбросится и импульс не произойдёт.
    pub fn inferred_clip<'a>(&self, names: &'a AnimationClipNames) -> &'a str {
        if self.jump_start {
            &names.jumping
        } else if self.jump && self.free_fall {
            &names.falling
        } else if self.grounded && self.free_fall {
            &names.landing
        } else {
            &names.default
        }
    }

    /// Jump & gravity for one tick. Runs before the ground probe.
    pub fn step(&mut self, settings: &JumpSettings, jump_requested: bool, delta: f32) -> JumpOutcome {
        let mut outcome = JumpOutcome::default();

        if self.grounded {
            self.fall_timeout_delta = settings.fall_timeout;

            self.jump_trigger = false;
            self.jump = false;
            self.free_fall = false;

            if self.vertical_velocity < 0.0 {
                self.vertical_velocity = GROUNDED_VERTICAL_VELOCITY;
            }

            if jump_requested && self.jump_timeout_delta <= 0.0 {
                self.jump_velocity = settings.launch_velocity();
                self.jump = true;
                self.jump_start = true;
            }

            if self.jump_timeout_delta >= 0.0 {
                self.jump_timeout_delta -= delta;
            }
        } else {
            // Cooldown перезапускается каждый airborne tick
            self.jump_timeout_delta = settings.jump_timeout;

            if self.jump {
                if !self.jump_start && !self.jump_trigger {
                    self.jump_trigger = true;
                    self.vertical_velocity = self.jump_velocity;
                    outcome.impulse = Some(self.jump_velocity);
                    self.impulse_fired = Some(self.jump_velocity);
                }

                if self.vertical_velocity <= 0.0 {
                    self.free_fall = true;
                }
            } else if self.fall_timeout_delta >= 0.0 {
                // Небольшой уступ: ещё не падение
                self.fall_timeout_delta -= delta;
            } else {
                self.free_fall = true;
            }

            outcome.clear_jump_input = true;
        }

        if self.vertical_velocity < settings.terminal_velocity {
            self.vertical_velocity += settings.gravity * delta;
        }
        if settings.clamp_fall_speed {
            self.vertical_velocity = self.vertical_velocity.max(-settings.terminal_velocity.abs());
        }

        outcome
    }

    /// Ground probe result. While a jump is in progress the probe is skipped.
    ///
    /// Первый probe задаёт и `was_grounded`: спавн на земле не считается приземлением.
    pub fn apply_probe(&mut self, probe: impl FnOnce() -> bool) {
        self.grounded = if self.jump { false } else { probe() };
        if !self.probed {
            self.probed = true;
            self.was_grounded = self.grounded;
        }
    }
}
