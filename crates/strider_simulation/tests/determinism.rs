//! Тесты детерминизма
//!
//! Одинаковый scripted input + одинаковый шаг кадра → идентичная траектория

use std::time::Duration;

use bevy::prelude::*;
use bevy::time::TimeUpdateStrategy;
use strider_simulation::*;

const TICK_COUNT: usize = 240;

/// Scripted input: каждые 60 тиков новый режим/направление
fn script(tick: usize, input: &mut FrameInput, view: &ViewProjection) {
    match tick {
        0 => input.set_axis(MOVE_ACTION, Vec2::new(0.7, -0.4)),
        60 => {
            input.set_axis(MOVE_ACTION, Vec2::ZERO);
            input.mode_switches.press(MovementMode::Navigate);
            if let Some(screen) = view.world_to_screen(Vec3::new(-5.0, 0.0, 6.0)) {
                input.primary_click = true;
                input.pointer_position = screen;
            }
        }
        120 => {
            input.mode_switches.press(MovementMode::DualStick);
            input.sticks.move_stick = Vec2::new(-0.3, 0.9);
            input.sticks.look_stick = Vec2::new(0.8, 0.8);
        }
        180 => {
            input.sticks = StickInput::default();
            input.mode_switches.press(MovementMode::Direct);
            input.set_axis(MOVE_ACTION, Vec2::new(-1.0, -1.0));
        }
        _ => {}
    }
}

/// Прогон сценария, возвращает траекторию (позиция + rotation каждый тик)
fn run_scenario() -> Vec<(Vec3, Quat, bool)> {
    let mut app = create_headless_app();
    app.insert_resource(TimeUpdateStrategy::ManualDuration(Duration::from_millis(16)));

    let bundle = player_controller_bundle(Vec3::ZERO, ControllerConfig::default()).expect("valid config");
    let player = app.world_mut().spawn(bundle).id();

    let mut trajectory = Vec::with_capacity(TICK_COUNT);
    for tick in 0..TICK_COUNT {
        let view = *app.world().resource::<ViewProjection>();
        script(tick, &mut app.world_mut().resource_mut::<FrameInput>(), &view);
        app.update();

        let entity = app.world().entity(player);
        let transform = entity.get::<Transform>().unwrap();
        let trail = entity.get::<TrailEffect>().unwrap();
        trajectory.push((transform.translation, transform.rotation, trail.emitting));
    }

    trajectory
}

#[test]
fn test_same_script_same_trajectory() {
    let first = run_scenario();
    let second = run_scenario();

    assert_eq!(first, second, "Одинаковый input дал разные траектории");
}

#[test]
fn test_scenario_invariants() {
    for (tick, (position, rotation, _)) in run_scenario().into_iter().enumerate() {
        // Движение только по плоскости
        assert_eq!(position.y, 0.0, "tick {}: y = {}", tick, position.y);

        // Facing всегда yaw-only
        let up = rotation * Vec3::Y;
        assert!(up.distance(Vec3::Y) < 1e-4, "tick {}: up = {:?}", tick, up);
    }
}
