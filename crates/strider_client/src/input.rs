//! Input sampler - Bevy input → `FrameInput` snapshot
//!
//! Flow (каждый кадр, `ControllerSet::Sample`):
//! 1. update_view_projection: камера → ViewProjection (screen → ray)
//! 2. sample_frame_input: WASD, 1/2/3, LMB/tap, pointer, gamepad sticks
//! 3. mode_button_interaction: UI кнопки режимов → те же edges что 1/2/3
//!
//! Контроллер читает только `FrameInput`, о Bevy input ничего не знает.

use bevy::prelude::*;
use bevy::window::PrimaryWindow;
use strider_simulation::{
    ActiveMode, ControllerSet, FrameInput, MovementMode, Player, StickInput, ViewProjection,
    MOVE_ACTION,
};

use crate::camera::OrbitCamera;

pub struct InputSamplingPlugin;

impl Plugin for InputSamplingPlugin {
    fn build(&self, app: &mut App) {
        app.add_systems(Startup, spawn_mode_buttons);
        app.add_systems(
            Update,
            (
                update_view_projection,
                sample_frame_input,
                mode_button_interaction,
                highlight_active_mode,
            )
                .chain()
                .in_set(ControllerSet::Sample),
        );
    }
}

/// UI кнопка переключения режима
#[derive(Component)]
pub struct ModeButton(pub MovementMode);

const BUTTON_IDLE: Color = Color::srgba(0.15, 0.15, 0.15, 0.8);
const BUTTON_ACTIVE: Color = Color::srgba(0.2, 0.5, 0.8, 0.9);

/// Клавиши mode switch (edge по just_pressed)
const MODE_KEYS: [(KeyCode, MovementMode); 3] = [
    (KeyCode::Digit1, MovementMode::Direct),
    (KeyCode::Digit2, MovementMode::Navigate),
    (KeyCode::Digit3, MovementMode::DualStick),
];

/// Камера → ViewProjection (матрицы прошлого кадра, достаточно для клика)
fn update_view_projection(
    cameras: Query<(&Camera, &GlobalTransform), With<OrbitCamera>>,
    mut view: ResMut<ViewProjection>,
) {
    let Ok((camera, transform)) = cameras.single() else {
        return;
    };
    let Some(viewport_size) = camera.logical_viewport_size() else {
        return;
    };

    *view = ViewProjection {
        world_from_view: transform.compute_matrix(),
        clip_from_view: camera.clip_from_view(),
        viewport_size,
    };
}

/// Bevy input → FrameInput
fn sample_frame_input(
    keys: Res<ButtonInput<KeyCode>>,
    mouse: Res<ButtonInput<MouseButton>>,
    touches: Res<Touches>,
    windows: Query<&Window, With<PrimaryWindow>>,
    gamepads: Query<&Gamepad>,
    interactions: Query<&Interaction>,
    mut input: ResMut<FrameInput>,
) {
    // WASD → "Move" axis (x = right, y = forward)
    let move_axis = key_axis(&keys, KeyCode::KeyW, KeyCode::KeyS, KeyCode::KeyA, KeyCode::KeyD);
    input.set_axis(MOVE_ACTION, move_axis);

    // Mode switch edges
    for (key, mode) in MODE_KEYS {
        if keys.just_pressed(key) {
            input.mode_switches.press(mode);
        }
    }

    // Pointer: tap приоритетнее курсора
    if let Some(touch) = touches.iter_just_pressed().next() {
        input.pointer_position = touch.position();
    } else if let Some(cursor) = windows.single().ok().and_then(Window::cursor_position) {
        input.pointer_position = cursor;
    }

    input.primary_click = mouse.just_pressed(MouseButton::Left) || touches.any_just_pressed();
    input.pointer_over_ui = interactions
        .iter()
        .any(|interaction| *interaction != Interaction::None);

    // Sticks: первый gamepad, иначе keyboard fallback (стрелки = move, IJKL = look)
    input.sticks = match gamepads.iter().next() {
        Some(gamepad) => StickInput {
            move_stick: gamepad.left_stick(),
            look_stick: gamepad.right_stick(),
        },
        None => StickInput {
            move_stick: key_axis(
                &keys,
                KeyCode::ArrowUp,
                KeyCode::ArrowDown,
                KeyCode::ArrowLeft,
                KeyCode::ArrowRight,
            ),
            look_stick: key_axis(&keys, KeyCode::KeyI, KeyCode::KeyK, KeyCode::KeyJ, KeyCode::KeyL),
        },
    };
}

/// Четыре клавиши → digital 2D axis
fn key_axis(
    keys: &ButtonInput<KeyCode>,
    up: KeyCode,
    down: KeyCode,
    left: KeyCode,
    right: KeyCode,
) -> Vec2 {
    let mut axis = Vec2::ZERO;
    if keys.pressed(up) {
        axis.y += 1.0;
    }
    if keys.pressed(down) {
        axis.y -= 1.0;
    }
    if keys.pressed(left) {
        axis.x -= 1.0;
    }
    if keys.pressed(right) {
        axis.x += 1.0;
    }
    axis
}

/// Overlay с тремя кнопками режимов (top-left)
fn spawn_mode_buttons(mut commands: Commands) {
    commands
        .spawn(Node {
            position_type: PositionType::Absolute,
            top: Val::Px(12.0),
            left: Val::Px(12.0),
            column_gap: Val::Px(8.0),
            ..default()
        })
        .with_children(|parent| {
            for (index, mode) in MovementMode::ALL.into_iter().enumerate() {
                parent
                    .spawn((
                        Button,
                        Node {
                            padding: UiRect::axes(Val::Px(12.0), Val::Px(6.0)),
                            ..default()
                        },
                        BackgroundColor(BUTTON_IDLE),
                        ModeButton(mode),
                    ))
                    .with_child((
                        Text::new(format!("{} {}", index + 1, mode)),
                        TextFont {
                            font_size: 16.0,
                            ..default()
                        },
                        TextColor(Color::WHITE),
                    ));
            }
        });
}

/// Нажатие UI кнопки = тот же edge что клавиша 1/2/3
fn mode_button_interaction(
    buttons: Query<(&Interaction, &ModeButton), Changed<Interaction>>,
    mut input: ResMut<FrameInput>,
) {
    for (interaction, button) in buttons.iter() {
        if *interaction == Interaction::Pressed {
            input.mode_switches.press(button.0);
        }
    }
}

/// Подсветка кнопки текущего режима игрока
fn highlight_active_mode(
    player: Query<&ActiveMode, With<Player>>,
    mut buttons: Query<(&ModeButton, &mut BackgroundColor)>,
) {
    let Ok(active) = player.single() else {
        return;
    };

    for (button, mut background) in buttons.iter_mut() {
        let color = if button.0 == active.mode {
            BUTTON_ACTIVE
        } else {
            BUTTON_IDLE
        };
        if background.0 != color {
            background.0 = color;
        }
    }
}
