use bevy::input::mouse::{MouseMotion, MouseWheel};
use bevy::prelude::*;
use strider_simulation::{ControllerSet, Player};

pub struct CameraPlugin;

impl Plugin for CameraPlugin {
    fn build(&self, app: &mut App) {
        // После контроллера: focus = позиция игрока этого кадра
        app.add_systems(
            Update,
            (follow_player, orbit_camera_controls, update_camera_transform)
                .chain()
                .after(ControllerSet::Activity),
        );
    }
}

#[derive(Component)]
pub struct OrbitCamera {
    pub focus: Vec3,
    pub distance: f32,
    pub yaw: f32,   // Horizontal rotation (radians)
    pub pitch: f32, // Vertical rotation (radians)
    pub sensitivity: f32,
    pub zoom_speed: f32,
}

impl Default for OrbitCamera {
    fn default() -> Self {
        Self {
            focus: Vec3::ZERO,
            distance: 17.0,
            yaw: 0.0,                           // За спиной (+Z)
            pitch: std::f32::consts::FRAC_PI_4, // 45°
            sensitivity: 0.005,
            zoom_speed: 1.0,
        }
    }
}

/// Focus камеры следует за игроком
fn follow_player(
    player: Query<&Transform, (With<Player>, Changed<Transform>)>,
    mut cameras: Query<&mut OrbitCamera>,
) {
    let Ok(player_transform) = player.single() else {
        return;
    };

    for mut camera in cameras.iter_mut() {
        camera.focus = player_transform.translation;
    }
}

/// Handle mouse input for orbit camera
///
/// Left button занят Navigate (click-to-move), orbit только на Right.
fn orbit_camera_controls(
    mut query: Query<&mut OrbitCamera>,
    mouse_buttons: Res<ButtonInput<MouseButton>>,
    mut mouse_motion: EventReader<MouseMotion>,
    mut mouse_wheel: EventReader<MouseWheel>,
) {
    let mut camera = match query.single_mut() {
        Ok(cam) => cam,
        Err(_) => return,
    };

    // Right mouse button: orbit
    if mouse_buttons.pressed(MouseButton::Right) {
        for motion in mouse_motion.read() {
            camera.yaw -= motion.delta.x * camera.sensitivity;
            camera.pitch += motion.delta.y * camera.sensitivity;

            // Камера всегда над землёй, иначе ground raycast теряет смысл
            camera.pitch = camera
                .pitch
                .clamp(0.15, std::f32::consts::FRAC_PI_2 - 0.1);
        }
    } else {
        // Consume motion events even when not orbiting
        mouse_motion.clear();
    }

    // Mouse wheel: zoom
    for wheel in mouse_wheel.read() {
        camera.distance -= wheel.y * camera.zoom_speed;
        camera.distance = camera.distance.clamp(4.0, 60.0);
    }
}

/// Update camera transform based on orbit parameters
fn update_camera_transform(
    mut query: Query<(&OrbitCamera, &mut Transform), Changed<OrbitCamera>>,
) {
    for (camera, mut transform) in query.iter_mut() {
        // Calculate position from spherical coordinates
        let x = camera.distance * camera.pitch.cos() * camera.yaw.sin();
        let y = camera.distance * camera.pitch.sin();
        let z = camera.distance * camera.pitch.cos() * camera.yaw.cos();

        let position = camera.focus + Vec3::new(x, y, z);

        *transform = Transform::from_translation(position).looking_at(camera.focus, Vec3::Y);
    }
}
