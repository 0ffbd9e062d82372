//! Third-person character controller — simulation core
//!
//! ECS-контроллер на Bevy 0.16, headless: input → jump/fall/landing FSM →
//! locomotion → motor → follow camera → animation parameters.
//!
//! Хост (движок/клиент) владеет:
//! - физикой (headless GroundSurfaces или Rapier backend)
//! - анимационным графом (AnimationParameters / AnimationStateReport)
//! - main camera (MainCamera, yaw для camera-relative движения)
//!
//! Все системы контроллера — FixedUpdate, порядок задаёт `ControllerSet`.

use std::time::Duration;

use bevy::prelude::*;
use rand::SeedableRng;
use rand_chacha::ChaCha8Rng;

// Публичные модули
pub mod animation;
pub mod camera;
pub mod config;
pub mod debug;
pub mod input;
pub mod logger;
pub mod movement;
pub mod physics;
pub mod player;

// Re-export базовых типов для удобства
pub use animation::{
    AnimParam, AnimationClipNames, AnimationFeedbackPlugin, AnimationParameters,
    AnimationStateReport, SimulatedAnimationGraph,
};
pub use camera::{CameraFollow, CameraPlugin, CameraRig, CameraSettings, CameraTarget, MainCamera};
pub use config::{ConfigError, ControllerConfig};
pub use debug::{DebugPlugin, DebugTimeScale};
pub use input::{ControllerInput, DeviceInputPlugin, RandomWander, ScriptedInput, ScriptedInputPlugin};
pub use logger::{
    init_logger, log, log_error, log_info, log_warning, set_log_level, set_logger, LogLevel,
    LogPrinter,
};
pub use movement::{
    JumpPhase, JumpSettings, JumpState, Jumped, Landed, Locomotion, MovementPlugin,
    MovementSettings, PhaseChanged,
};
pub use physics::{
    rapier_character_components, CharacterMotor, GroundProbeSettings, GroundSlab, GroundSurfaces,
    PhysicsBackend, PhysicsPlugin, ProbeDebugShape, CHARACTER_SKIN,
};
pub use player::{
    simulated_animation_components, spawn_third_person_character, Player, ThirdPersonController,
};

/// Simulation tick rate (Hz)
pub const TICK_HZ: f64 = 60.0;

/// Seed used when the host did not insert a DeterministicRng.
pub const DEFAULT_SEED: u64 = 42;

pub fn tick_duration() -> Duration {
    Duration::from_secs_f64(1.0 / TICK_HZ)
}

/// Порядок систем контроллера внутри одного FixedUpdate tick'а.
#[derive(SystemSet, Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ControllerSet {
    /// Input drivers (scripted, random)
    Input,
    /// Current clip → state flags
    AnimationFeedback,
    JumpAndGravity,
    GroundProbe,
    Locomotion,
    /// Displacement → Transform (backend)
    Motor,
    Camera,
    /// Parameters → graph
    Animation,
    /// Events, logs, debug shapes
    Report,
}

/// Главный plugin контроллера (объединяет все подсистемы)
pub struct SimulationPlugin {
    pub backend: PhysicsBackend,
    pub tick_hz: f64,
}

impl Default for SimulationPlugin {
    fn default() -> Self {
        Self {
            backend: PhysicsBackend::Headless,
            tick_hz: TICK_HZ,
        }
    }
}

impl SimulationPlugin {
    pub fn rapier() -> Self {
        Self {
            backend: PhysicsBackend::Rapier,
            ..default()
        }
    }
}

impl Plugin for SimulationPlugin {
    fn build(&self, app: &mut App) {
        // Хост мог уже вставить свой seed — не перетираем
        if !app.world().contains_resource::<DeterministicRng>() {
            app.insert_resource(DeterministicRng::new(DEFAULT_SEED));
        }

        app.insert_resource(Time::<Fixed>::from_hz(self.tick_hz))
            .configure_sets(
                FixedUpdate,
                (
                    ControllerSet::Input,
                    ControllerSet::AnimationFeedback,
                    ControllerSet::JumpAndGravity,
                    ControllerSet::GroundProbe,
                    ControllerSet::Locomotion,
                    ControllerSet::Motor,
                    ControllerSet::Camera,
                    ControllerSet::Animation,
                    ControllerSet::Report,
                )
                    .chain(),
            )
            .register_type::<ControllerInput>()
            .register_type::<ThirdPersonController>()
            .add_plugins((
                ScriptedInputPlugin,
                AnimationFeedbackPlugin,
                MovementPlugin,
                PhysicsPlugin {
                    backend: self.backend,
                },
                CameraPlugin,
                DebugPlugin,
            ));

        log_info(&format!(
            "SimulationPlugin: {:?} backend, {} Hz",
            self.backend, self.tick_hz
        ));
    }
}

/// Детерминистичный RNG resource (seeded)
#[derive(Resource)]
pub struct DeterministicRng {
    pub rng: ChaCha8Rng,
    pub seed: u64,
}

impl DeterministicRng {
    pub fn new(seed: u64) -> Self {
        Self {
            rng: ChaCha8Rng::seed_from_u64(seed),
            seed,
        }
    }
}

/// Создаёт minimal Bevy App для headless симуляции
///
/// Время ручное: каждый `app.update()` = ровно один tick (первый update
/// только инициализирует часы).
pub fn create_headless_app(seed: u64) -> App {
    let mut app = App::new();
    init_logger();
    app.add_plugins((MinimalPlugins, bevy::transform::TransformPlugin))
        .insert_resource(DeterministicRng::new(seed))
        .insert_resource(Time::<Fixed>::from_hz(TICK_HZ))
        .insert_resource(bevy::time::TimeUpdateStrategy::ManualDuration(tick_duration()));

    app
}

/// Snapshot мира для сравнения детерминизма
pub fn world_snapshot<T: Component>(world: &mut World) -> Vec<u8>
where
    T: std::fmt::Debug,
{
    let mut snapshot = Vec::new();

    let mut query = world.query::<(Entity, &T)>();
    let mut entities: Vec<_> = query.iter(world).collect();

    // Сортируем по Entity ID для детерминизма
    entities.sort_by_key(|(entity, _)| entity.index());

    // Debug формат: f32 печатаются точно (shortest roundtrip)
    for (entity, component) in entities {
        snapshot.extend_from_slice(&entity.index().to_le_bytes());
        snapshot.extend_from_slice(format!("{:?}", component).as_bytes());
    }

    snapshot
}
