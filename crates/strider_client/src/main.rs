use std::path::PathBuf;

use bevy::prelude::*;
use clap::Parser;
use strider_simulation::logger::{set_log_level, LogLevel};
use strider_simulation::{
    headless_view, spawn_player_controller, ControllerConfig, FrameInput, MovementMode,
    NavigableSurface, SimulationPlugin,
};

mod camera;
mod input;
mod rendering;

use camera::CameraPlugin;
use input::InputSamplingPlugin;
use rendering::RenderingSyncPlugin;

/// STRIDER - movement controller playground
#[derive(Parser, Debug)]
#[command(version, about)]
struct Args {
    /// JSON файл с ControllerConfig (отсутствующие поля = defaults)
    #[arg(long)]
    config: Option<PathBuf>,

    /// Стартовый режим: direct, navigate, dual-stick
    #[arg(long)]
    mode: Option<MovementMode>,

    /// Минимальный уровень логов: debug, info, warning, error
    #[arg(long, default_value = "info")]
    log_level: LogLevel,
}

/// Config игрока до spawn (Startup)
#[derive(Resource, Clone)]
struct PlayerConfig(ControllerConfig);

fn main() {
    strider_simulation::logger::init_logger();
    let args = Args::parse();
    set_log_level(args.log_level);

    let mut config = match args.config.as_deref().map(ControllerConfig::load).transpose() {
        Ok(config) => config.unwrap_or_default(),
        Err(err) => {
            strider_simulation::log_error(&format!("❌ {}", err));
            std::process::exit(1);
        }
    };
    if let Some(mode) = args.mode {
        if args.config.is_some() && mode != config.default_mode {
            strider_simulation::log_warning(&format!(
                "⚠️ --mode {} overrides default_mode {} from config",
                mode, config.default_mode
            ));
        }
        config.default_mode = mode;
    }

    App::new()
        // Bevy defaults (rendering, input, time, etc.)
        .add_plugins(DefaultPlugins.set(WindowPlugin {
            primary_window: Some(Window {
                title: "STRIDER - 1 WASD / 2 Click / 3 Dual-stick".to_string(),
                resolution: (1280., 720.).into(),
                ..default()
            }),
            ..default()
        }))
        // Внешние сервисы контроллера (обновляются InputSamplingPlugin)
        .insert_resource(FrameInput::default())
        .insert_resource(headless_view())
        .insert_resource(PlayerConfig(config))
        // Контроллер (headless ECS logic)
        .add_plugins(SimulationPlugin)
        // Keyboard / mouse / touch / gamepad → FrameInput
        .add_plugins(InputSamplingPlugin)
        // Rendering sync (simulation → visuals)
        .add_plugins(RenderingSyncPlugin)
        // Camera controls
        .add_plugins(CameraPlugin)
        .add_systems(Startup, setup_scene)
        .run();
}

/// Spawn ground, lights, camera и игрока
fn setup_scene(
    mut commands: Commands,
    mut meshes: ResMut<Assets<Mesh>>,
    mut materials: ResMut<Assets<StandardMaterial>>,
    player_config: Res<PlayerConfig>,
) {
    // Ground plane (100x100m) - единственная navigable surface
    commands.spawn((
        Mesh3d(meshes.add(Plane3d::new(Vec3::Y, Vec2::splat(50.0)))),
        MeshMaterial3d(materials.add(Color::srgb(0.3, 0.5, 0.3))),
        Transform::from_xyz(0.0, 0.0, 0.0),
        NavigableSurface::new(Vec2::splat(50.0)),
    ));

    // Directional light (sun)
    commands.spawn((
        DirectionalLight {
            illuminance: 10000.0,
            shadows_enabled: true,
            ..default()
        },
        Transform::from_rotation(Quat::from_rotation_x(-std::f32::consts::FRAC_PI_4)),
    ));

    // Ambient light
    commands.insert_resource(AmbientLight {
        color: Color::WHITE,
        brightness: 0.3,
        affects_lightmapped_meshes: false,
    });

    // Camera (orbit вокруг игрока)
    commands.spawn((
        Camera3d::default(),
        Transform::from_xyz(0.0, 12.0, 12.0).looking_at(Vec3::ZERO, Vec3::Y),
        camera::OrbitCamera::default(),
    ));

    // Player (simulation entity), visual добавит RenderingSyncPlugin
    match spawn_player_controller(&mut commands, Vec3::ZERO, player_config.0.clone()) {
        Ok(player) => {
            commands.entity(player).insert(rendering::NeedsVisual);
            strider_simulation::log_info(&format!(
                "✅ Player ready in {} mode",
                player_config.0.default_mode
            ));
        }
        Err(err) => strider_simulation::log_error(&format!("❌ Player spawn failed: {}", err)),
    }
}
