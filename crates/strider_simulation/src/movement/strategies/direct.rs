//! Direct стратегия (keyboard / digital direction)

use bevy::prelude::*;

use super::{look_rotation, plane_vector, step_along, MotionIntent};
use crate::config::ControllerConfig;

/// "Move" axis → смещение + facing вдоль направления движения
///
/// Input не обязан быть нормализован (диагональ WASD = (1, 1)), скорость
/// всё равно постоянная. `|v|² ≤ move_deadzone_sq` - нет input.
pub fn direct_motion(input: Vec2, config: &ControllerConfig, delta_secs: f32) -> MotionIntent {
    let movement = plane_vector(input);
    if movement.length_squared() <= config.move_deadzone_sq {
        return MotionIntent::NONE;
    }

    MotionIntent {
        delta: step_along(movement, config.speed, delta_secs),
        desired_facing: look_rotation(movement),
    }
}
