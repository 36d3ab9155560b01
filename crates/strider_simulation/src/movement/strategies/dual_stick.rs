//! Dual-stick стратегия (виртуальные джойстики)
//!
//! Move stick двигает, look stick поворачивает. Facing от движения НЕ
//! зависит - можно идти назад глядя вперёд.

use super::{look_rotation, plane_vector, step_along, MotionIntent};
use crate::config::ControllerConfig;
use crate::input::StickInput;

pub fn dual_stick_motion(sticks: StickInput, config: &ControllerConfig, delta_secs: f32) -> MotionIntent {
    let mut intent = MotionIntent::NONE;

    let movement = plane_vector(sticks.move_stick);
    if movement.length_squared() > config.move_deadzone_sq {
        intent.delta = step_along(movement, config.speed, delta_secs);
    }

    let look = plane_vector(sticks.look_stick);
    if look.length_squared() > config.look_deadzone_sq {
        intent.desired_facing = look_rotation(look);
    }

    intent
}
