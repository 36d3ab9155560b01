//! STRIDER Simulation Core
//!
//! Per-frame контроллер движения персонажа на Bevy 0.16 (headless ECS)
//!
//! Три взаимоисключающих режима input'а:
//! - Direct: "Move" axis (WASD / digital direction)
//! - Navigate: click/tap-to-move по navigable surface
//! - DualStick: виртуальные джойстики move + look
//!
//! Выход один: Transform (позиция + yaw facing) и trail toggle.
//! Input, камера и navigable surfaces - внешние сервисы (см. `input`, `ground`),
//! их предоставляет host (strider_client или тест).

use bevy::prelude::*;

// Публичные модули
pub mod config;
pub mod error;
pub mod ground;
pub mod input;
pub mod logger;
pub mod movement;
pub mod trail;

// Re-export основных типов
pub use config::{ControllerConfig, TrailSettings};
pub use error::ControllerError;
pub use ground::{nearest_ground_hit, NavigableSurface, SurfaceLayers, ViewProjection};
pub use input::{FrameInput, ModeSwitchEdges, StickInput, MOVE_ACTION};
pub use logger::{log, log_error, log_info, log_warning};
pub use movement::*;
pub use trail::{TrailEffect, TrailSamples};

/// Главный plugin симуляции
///
/// Внешние сервисы (`FrameInput`, `ViewProjection`) plugin НЕ создаёт -
/// их обязан зарегистрировать host. Отсутствие → panic в `finish()`
/// (fail fast на инициализации, а не тихий no-op каждый кадр).
pub struct SimulationPlugin;

impl Plugin for SimulationPlugin {
    fn build(&self, app: &mut App) {
        app.add_plugins(MovementControllerPlugin);
    }

    fn finish(&self, app: &mut App) {
        if let Err(err) = verify_services(app.world()) {
            logger::log_error(&format!("SimulationPlugin: {}", err));
            panic!("SimulationPlugin: {}", err);
        }
    }
}

/// Проверка обязательных внешних сервисов
pub fn verify_services(world: &World) -> Result<(), ControllerError> {
    if !world.contains_resource::<FrameInput>() {
        return Err(ControllerError::MissingService("FrameInput"));
    }
    if !world.contains_resource::<ViewProjection>() {
        return Err(ControllerError::MissingService("ViewProjection"));
    }
    Ok(())
}

/// Камера headless режима: сверху-сбоку на origin, 1280x720
pub fn headless_view() -> ViewProjection {
    ViewProjection::looking_at(
        Vec3::new(0.0, 12.0, 12.0),
        Vec3::ZERO,
        std::f32::consts::FRAC_PI_4,
        Vec2::new(1280.0, 720.0),
    )
}

/// Создаёт minimal Bevy App для headless симуляции
///
/// Scripted input: тест/runner пишет `FrameInput` перед `app.update()`.
/// Ground: одна плоскость 100x100 на y = 0.
pub fn create_headless_app() -> App {
    let mut app = App::new();
    logger::init_logger();
    app.add_plugins(MinimalPlugins)
        .insert_resource(FrameInput::default())
        .insert_resource(headless_view())
        .add_plugins(SimulationPlugin);

    app.world_mut().spawn((
        Transform::IDENTITY,
        NavigableSurface::new(Vec2::splat(50.0)),
    ));

    // Plugins готовы → verify_services
    app.finish();
    app.cleanup();

    app
}
