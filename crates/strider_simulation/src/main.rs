//! Headless прогон STRIDER
//!
//! Scripted input проходит все три режима и печатает pose + trail state.

use std::time::Duration;

use bevy::prelude::*;
use bevy::time::TimeUpdateStrategy;
use strider_simulation::{
    create_headless_app, player_controller_bundle, ControllerConfig, FrameInput, MovementMode,
    TrailEffect, ViewProjection, MOVE_ACTION,
};

const TICKS_PER_PHASE: usize = 60;

fn main() {
    let mut app = create_headless_app();
    app.insert_resource(TimeUpdateStrategy::ManualDuration(Duration::from_secs_f32(1.0 / 60.0)));

    let bundle = match player_controller_bundle(Vec3::ZERO, ControllerConfig::default()) {
        Ok(bundle) => bundle,
        Err(err) => {
            strider_simulation::log_error(&format!("Failed to spawn player: {}", err));
            return;
        }
    };
    let player = app.world_mut().spawn(bundle).id();

    strider_simulation::log_info("Starting STRIDER headless run");

    // Фаза 1: Direct, идём вправо-вперёд
    app.world_mut()
        .resource_mut::<FrameInput>()
        .set_axis(MOVE_ACTION, Vec2::new(1.0, 1.0));
    run_phase(&mut app, player, "direct");

    // Фаза 2: Navigate, клик в (−6, 0, 4)
    let click = app
        .world()
        .resource::<ViewProjection>()
        .world_to_screen(Vec3::new(-6.0, 0.0, 4.0));
    {
        let mut input = app.world_mut().resource_mut::<FrameInput>();
        input.set_axis(MOVE_ACTION, Vec2::ZERO);
        input.mode_switches.press(MovementMode::Navigate);
        input.primary_click = click.is_some();
        input.pointer_position = click.unwrap_or_default();
    }
    run_phase(&mut app, player, "navigate");

    // Фаза 3: DualStick, назад и смотрим влево
    {
        let mut input = app.world_mut().resource_mut::<FrameInput>();
        input.mode_switches.press(MovementMode::DualStick);
        input.sticks.move_stick = Vec2::new(0.0, -1.0);
        input.sticks.look_stick = Vec2::new(-1.0, 0.0);
    }
    run_phase(&mut app, player, "dual-stick");

    strider_simulation::log_info("Headless run complete!");
}

fn run_phase(app: &mut App, player: Entity, name: &str) {
    for tick in 0..TICKS_PER_PHASE {
        app.update();

        if tick % 20 == 0 {
            let entity = app.world().entity(player);
            let (Some(transform), Some(trail)) = (entity.get::<Transform>(), entity.get::<TrailEffect>())
            else {
                continue;
            };
            strider_simulation::log_info(&format!(
                "[{}] tick {}: position {:.2?}, forward {:.2?}, trail emitting {}",
                name,
                tick,
                transform.translation,
                transform.forward().as_vec3(),
                trail.emitting
            ));
        }
    }
}
