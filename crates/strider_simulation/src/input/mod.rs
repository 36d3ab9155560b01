//! Input snapshot - единственный контракт между input sampler и контроллером
//!
//! # Архитектура
//!
//! ```text
//! Host input (keyboard / mouse / touch / gamepad)
//!     ↓  ControllerSet::Sample (client или тест пишет FrameInput)
//! FrameInput (Resource, "current value" snapshot)
//!     ↓  ControllerSet::ModeSwitch .. ControllerSet::Activity
//! ActiveMode / NavigationTarget / Transform
//!     ↓  consume_frame_edges (конец кадра)
//! edges сброшены
//! ```
//!
//! Никакой очереди событий: все чтения - снапшот текущего кадра.

use std::collections::HashMap;

use bevy::prelude::*;

use crate::movement::MovementMode;

/// Идентификатор оси для direct-режима
pub const MOVE_ACTION: &str = "Move";

/// Edge-события переключения режима (true только в кадр нажатия)
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct ModeSwitchEdges {
    pressed: [bool; 3],
}

impl ModeSwitchEdges {
    pub fn press(&mut self, mode: MovementMode) {
        self.pressed[mode.index()] = true;
    }

    pub fn is_pressed(&self, mode: MovementMode) -> bool {
        self.pressed[mode.index()]
    }

    pub fn any(&self) -> bool {
        self.pressed.iter().any(|pressed| *pressed)
    }

    pub fn clear(&mut self) {
        self.pressed = [false; 3];
    }
}

/// Два независимых виртуальных джойстика (dual-stick режим)
///
/// Каждый вектор примерно в [-1, 1] по осям, `Vec2::ZERO` когда стик отпущен.
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct StickInput {
    pub move_stick: Vec2,
    pub look_stick: Vec2,
}

/// Снапшот input текущего кадра
///
/// # Fields
/// - `axes`: именованные 2D оси (`"Move"` для direct режима)
/// - `mode_switches`: три edge-триггера переключения режима
/// - `primary_click`: edge основного клика / тапа
/// - `pointer_position`: экранные координаты (logical px, origin top-left)
/// - `pointer_over_ui`: pointer над интерактивным overlay (блокирует click-to-move)
/// - `sticks`: move/look джойстики
#[derive(Resource, Debug, Clone, Default)]
pub struct FrameInput {
    axes: HashMap<String, Vec2>,
    pub mode_switches: ModeSwitchEdges,
    pub primary_click: bool,
    pub pointer_position: Vec2,
    pub pointer_over_ui: bool,
    pub sticks: StickInput,
}

impl FrameInput {
    /// Значение оси; неизвестная ось читается как `Vec2::ZERO`
    pub fn axis(&self, action: &str) -> Vec2 {
        self.axes.get(action).copied().unwrap_or(Vec2::ZERO)
    }

    pub fn set_axis(&mut self, action: &str, value: Vec2) {
        match self.axes.get_mut(action) {
            Some(slot) => *slot = value,
            None => {
                self.axes.insert(action.to_string(), value);
            }
        }
    }

    /// Shortcut для `"Move"` оси
    pub fn move_axis(&self) -> Vec2 {
        self.axis(MOVE_ACTION)
    }

    /// Клик по миру: edge без UI-окклюзии
    pub fn world_click(&self) -> bool {
        self.primary_click && !self.pointer_over_ui
    }

    /// Сбрасывает edge-события после того как контроллер их прочитал
    ///
    /// Continuous значения (оси, стики, pointer) остаются - sampler перезапишет их.
    pub fn consume_edges(&mut self) {
        self.mode_switches.clear();
        self.primary_click = false;
    }
}

/// Конец кадра контроллера: edges живут ровно один кадр
pub fn consume_frame_edges(mut input: ResMut<FrameInput>) {
    if input.mode_switches.any() || input.primary_click {
        input.consume_edges();
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_unknown_axis_is_zero() {
        let input = FrameInput::default();
        assert_eq!(input.axis("Jump"), Vec2::ZERO);
        assert_eq!(input.move_axis(), Vec2::ZERO);
    }

    #[test]
    fn test_set_axis_overwrites() {
        let mut input = FrameInput::default();
        input.set_axis(MOVE_ACTION, Vec2::X);
        input.set_axis(MOVE_ACTION, Vec2::Y);
        assert_eq!(input.move_axis(), Vec2::Y);
    }

    #[test]
    fn test_click_over_ui_is_not_world_click() {
        let mut input = FrameInput {
            primary_click: true,
            pointer_over_ui: true,
            ..default()
        };
        assert!(!input.world_click());

        input.pointer_over_ui = false;
        assert!(input.world_click());
    }

    #[test]
    fn test_consume_edges_keeps_continuous_state() {
        let mut input = FrameInput {
            primary_click: true,
            sticks: StickInput {
                move_stick: Vec2::X,
                look_stick: Vec2::Y,
            },
            ..default()
        };
        input.mode_switches.press(MovementMode::Navigate);
        input.set_axis(MOVE_ACTION, Vec2::X);

        input.consume_edges();

        assert!(!input.primary_click);
        assert!(!input.mode_switches.any());
        assert_eq!(input.move_axis(), Vec2::X);
        assert_eq!(input.sticks.move_stick, Vec2::X);
    }
}
