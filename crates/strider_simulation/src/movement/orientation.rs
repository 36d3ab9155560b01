//! Orientation Integrator - поворот к desired facing с ограниченной угловой скоростью
//!
//! Работаем в yaw-углах, а не через slerp: так roll/pitch гарантированно
//! не появляются даже если на вход пришёл "грязный" quaternion.

use std::f32::consts::{PI, TAU};

use bevy::prelude::*;

/// Yaw (вокруг +Y) из rotation
pub fn yaw_of(rotation: Quat) -> f32 {
    let (yaw, _pitch, _roll) = rotation.to_euler(EulerRot::YXZ);
    yaw
}

/// Кратчайшая знаковая разница углов, результат в [-π, π]
pub fn shortest_angle(from: f32, to: f32) -> f32 {
    let diff = (to - from).rem_euclid(TAU);
    if diff > PI {
        diff - TAU
    } else {
        diff
    }
}

/// Поворачивает `current` к `desired` максимум на `max_degrees_per_sec × delta_secs`
///
/// Никогда не перелетает desired; результат всегда yaw-only.
pub fn rotate_towards(current: Quat, desired: Quat, max_degrees_per_sec: f32, delta_secs: f32) -> Quat {
    let current_yaw = yaw_of(current);
    let remaining = shortest_angle(current_yaw, yaw_of(desired));
    let max_step = (max_degrees_per_sec * delta_secs).to_radians().max(0.0);

    let step = remaining.clamp(-max_step, max_step);
    Quat::from_rotation_y(current_yaw + step)
}

/// Угловое расстояние по yaw между двумя ориентациями (радианы, [0, π])
pub fn yaw_distance(a: Quat, b: Quat) -> f32 {
    shortest_angle(yaw_of(a), yaw_of(b)).abs()
}
