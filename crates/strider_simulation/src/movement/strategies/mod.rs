//! Motion Strategies - три независимые стратегии, один выход
//!
//! Каждая стратегия - чистая функция: input режима → `MotionIntent`
//! (смещение позиции + опциональный desired facing). Вращение стратегии НЕ
//! применяют, только запрашивают - единственная точка интеграции в
//! `integrate_orientation`.

pub mod direct;
pub mod dual_stick;
pub mod navigate;

pub use direct::direct_motion;
pub use dual_stick::dual_stick_motion;
pub use navigate::navigate_motion;

use bevy::prelude::*;

use super::mode::MovementMode;
use crate::config::ControllerConfig;
use crate::input::FrameInput;

/// Результат стратегии за кадр
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct MotionIntent {
    /// Смещение позиции за кадр (вертикаль всегда 0)
    pub delta: Vec3,
    /// Желаемая ориентация; `None` - facing не меняем
    pub desired_facing: Option<Quat>,
}

impl MotionIntent {
    pub const NONE: MotionIntent = MotionIntent {
        delta: Vec3::ZERO,
        desired_facing: None,
    };

    pub fn is_empty(&self) -> bool {
        self.delta == Vec3::ZERO && self.desired_facing.is_none()
    }
}

/// 2D input → плоскость движения
///
/// x → +X, y → forward. Forward в Bevy это −Z, поэтому y идёт в −Z.
pub fn plane_vector(input: Vec2) -> Vec3 {
    Vec3::new(input.x, 0.0, -input.y)
}

/// Yaw-only rotation, у которой forward (−Z) смотрит вдоль `direction`
///
/// Вертикальная компонента игнорируется. Нулевой горизонтальный вектор → `None`.
pub fn look_rotation(direction: Vec3) -> Option<Quat> {
    let flat = Vec2::new(direction.x, direction.z);
    if flat.length_squared() <= f32::EPSILON {
        return None;
    }
    Some(Quat::from_rotation_y(f32::atan2(-direction.x, -direction.z)))
}

/// Смещение вдоль нормализованного направления с заданной скоростью
pub(crate) fn step_along(direction: Vec3, speed: f32, delta_secs: f32) -> Vec3 {
    direction.normalize() * speed * delta_secs
}

/// Dispatch по активному режиму
///
/// Вызывается только для активного режима → стратегии неактивных режимов
/// не могут тронуть pose или target.
pub fn motion_intent(
    mode: MovementMode,
    input: &FrameInput,
    position: Vec3,
    target: Option<Vec3>,
    config: &ControllerConfig,
    delta_secs: f32,
) -> MotionIntent {
    match mode {
        MovementMode::Direct => direct_motion(input.move_axis(), config, delta_secs),
        MovementMode::Navigate => navigate_motion(position, target, config, delta_secs),
        MovementMode::DualStick => dual_stick_motion(input.sticks, config, delta_secs),
    }
}
