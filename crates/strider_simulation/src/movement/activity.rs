//! Motion-Activity Detector - moving vs idle по смещению между кадрами

use bevy::prelude::*;

/// Порог движения (единицы мира за кадр)
pub const MOVEMENT_THRESHOLD: f32 = 0.01;

/// Позиция прошлого кадра + последняя классификация
///
/// `previous_position` обновляется каждый кадр безусловно, в любом режиме.
#[derive(Component, Debug, Clone, Copy, PartialEq)]
pub struct MotionActivity {
    pub previous_position: Vec3,
    pub moving: bool,
    pub threshold: f32,
}

impl MotionActivity {
    pub fn new(position: Vec3, threshold: f32) -> Self {
        Self {
            previous_position: position,
            moving: false,
            threshold,
        }
    }

    /// Классифицирует кадр и сдвигает snapshot позиции
    pub fn sample(&mut self, current_position: Vec3) -> bool {
        self.moving = is_moving(current_position, self.previous_position, self.threshold);
        self.previous_position = current_position;
        self.moving
    }
}

impl Default for MotionActivity {
    fn default() -> Self {
        Self::new(Vec3::ZERO, MOVEMENT_THRESHOLD)
    }
}

pub fn is_moving(current: Vec3, previous: Vec3, threshold: f32) -> bool {
    current.distance(previous) > threshold
}
