//! Headless прогон контроллера
//!
//! Персонаж на платформе: идёт к краю, падает на пол, прыгает, бежит.
//! Usage: `tpc_simulation [config.json]`

use std::process::ExitCode;

use bevy::prelude::*;
use tpc_simulation::*;

/// Длительность сценария (секунды)
const SCENARIO_SECONDS: f32 = 8.0;

fn scenario() -> ScriptedInput {
    ScriptedInput::default()
        .then(0.0, ControllerInput::default())
        .then(0.5, ControllerInput::moving(Vec2::Y))
        .then(4.0, ControllerInput::default().with_jump(true))
        .then(4.1, ControllerInput::default())
        .then(5.0, ControllerInput::moving(Vec2::X).with_sprint(true))
        .then(6.0, ControllerInput::moving(Vec2::X).with_sprint(true).with_jump(true))
        .then(6.1, ControllerInput::moving(Vec2::X).with_sprint(true))
        .then(7.0, ControllerInput::default())
}

fn main() -> ExitCode {
    init_logger();

    let config = match std::env::args().nth(1) {
        Some(path) => match ControllerConfig::load(&path) {
            Ok(config) => {
                log_info(&format!("Loaded controller config from {}", path));
                config
            }
            Err(error) => {
                log_error(&format!("Config error: {}", error));
                return ExitCode::FAILURE;
            }
        },
        None => ControllerConfig::default(),
    };

    let mut app = create_headless_app(DEFAULT_SEED);
    app.add_plugins(SimulationPlugin::default())
        .insert_resource(config.debug)
        // Платформа 6x6 на высоте 1 м над полом
        .insert_resource(GroundSurfaces::new(vec![
            GroundSlab::platform(1.0, Vec2::new(-3.0, -3.0), Vec2::new(3.0, 3.0)),
            GroundSlab::floor(0.0),
        ]));

    let character = {
        let mut commands = app.world_mut().commands();
        spawn_third_person_character(&mut commands, Vec3::new(0.0, 1.0, 0.0), &config)
    };
    app.world_mut().flush();
    app.world_mut()
        .entity_mut(character)
        .insert((Player, scenario(), simulated_animation_components()));

    if let Some(target) = app.world().get::<CameraRig>(character).and_then(|rig| rig.target) {
        app.world_mut()
            .spawn((MainCamera, CameraFollow::new(target), Transform::default()));
    }

    log_info(&format!(
        "Starting headless controller run (seed: {}, {:.1} s)",
        DEFAULT_SEED, SCENARIO_SECONDS
    ));

    let ticks = (SCENARIO_SECONDS as f64 * TICK_HZ) as usize + 1;
    for tick in 0..ticks {
        app.update();

        if tick % 60 == 0 {
            let world = app.world();
            let (Some(transform), Some(state)) = (
                world.get::<Transform>(character),
                world.get::<JumpState>(character),
            ) else {
                continue;
            };
            log_info(&format!(
                "Tick {}: pos {:.2?}, {}",
                tick,
                transform.translation,
                state.phase().as_str()
            ));
        }
    }

    log_info("Run complete");
    ExitCode::SUCCESS
}
