//! Тесты детерминизма контроллера
//!
//! Персонажи с RandomWander (ChaCha8 из DeterministicRng): одинаковый seed →
//! побайтно одинаковые Transform/JumpState после прогона.

use bevy::prelude::*;
use tpc_simulation::*;

const CHARACTER_COUNT: usize = 4;
const TICK_COUNT: usize = 600;

/// Запускает симуляцию и возвращает snapshot мира
fn run_simulation(seed: u64, character_count: usize, tick_count: usize) -> Vec<u8> {
    let mut app = create_headless_app(seed);
    app.add_plugins(SimulationPlugin::default())
        .insert_resource(GroundSurfaces::new(vec![
            GroundSlab::platform(1.0, Vec2::new(-2.0, -2.0), Vec2::new(2.0, 2.0)),
            GroundSlab::floor(0.0),
        ]));

    let config = ControllerConfig::default();
    let characters: Vec<Entity> = {
        let mut commands = app.world_mut().commands();
        (0..character_count)
            .map(|i| {
                let position = Vec3::new(i as f32 * 3.0 - 4.5, 1.0, 0.0);
                spawn_third_person_character(&mut commands, position, &config)
            })
            .collect()
    };
    app.world_mut().flush();
    for character in characters {
        app.world_mut()
            .entity_mut(character)
            .insert((RandomWander::default(), simulated_animation_components()));
    }

    for _ in 0..tick_count {
        app.update();
    }

    let mut snapshot = world_snapshot::<Transform>(app.world_mut());
    snapshot.extend(world_snapshot::<JumpState>(app.world_mut()));
    snapshot
}

#[test]
fn test_determinism_same_seed() {
    const SEED: u64 = 12345;

    let snapshot1 = run_simulation(SEED, CHARACTER_COUNT, TICK_COUNT);
    let snapshot2 = run_simulation(SEED, CHARACTER_COUNT, TICK_COUNT);

    assert_eq!(
        snapshot1, snapshot2,
        "Симуляция с одинаковым seed ({}) дала разные результаты!",
        SEED
    );
}

#[test]
fn test_determinism_multiple_runs() {
    const SEED: u64 = 42;

    // 3 прогона — все должны совпадать с первым
    let snapshots: Vec<_> = (0..3)
        .map(|_| run_simulation(SEED, CHARACTER_COUNT, TICK_COUNT))
        .collect();

    for (i, snapshot) in snapshots.iter().enumerate().skip(1) {
        assert_eq!(
            snapshots[0], *snapshot,
            "Прогон {} дал результат отличный от прогона 0",
            i
        );
    }
}

#[test]
fn test_different_seeds_diverge() {
    let snapshot1 = run_simulation(1, CHARACTER_COUNT, TICK_COUNT);
    let snapshot2 = run_simulation(2, CHARACTER_COUNT, TICK_COUNT);

    assert_ne!(snapshot1, snapshot2);
}
