//! Navigate стратегия (click/tap-to-move) - фаза pursuit
//!
//! Фаза acquisition живёт в `systems::acquire_navigation_target`: ей нужен
//! ground query, а pursuit - чистая геометрия.

use bevy::prelude::*;

use super::{look_rotation, step_along, MotionIntent};
use crate::config::ControllerConfig;

/// Движение к target по плоскости
///
/// - target ещё не задан → no-op (как будто target = текущая позиция)
/// - `|d|² ≤ arrival_radius_sq` → цель достигнута, движения нет
///
/// Шаг к цели не клампится: внутри arrival радиуса остановимся на следующем кадре.
pub fn navigate_motion(
    position: Vec3,
    target: Option<Vec3>,
    config: &ControllerConfig,
    delta_secs: f32,
) -> MotionIntent {
    let Some(target) = target else {
        return MotionIntent::NONE;
    };

    let mut direction = target - position;
    direction.y = 0.0;

    if direction.length_squared() <= config.arrival_radius_sq {
        return MotionIntent::NONE;
    }

    MotionIntent {
        delta: step_along(direction, config.speed, delta_secs),
        desired_facing: look_rotation(direction),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_no_target_is_noop() {
        let config = ControllerConfig::default();
        assert_eq!(
            navigate_motion(Vec3::new(3.0, 0.0, 3.0), None, &config, 1.0),
            MotionIntent::NONE
        );
    }

    #[test]
    fn test_two_steps_reach_target_then_stop() {
        let config = ControllerConfig {
            speed: 5.0,
            ..default()
        };
        let target = Some(Vec3::new(10.0, 0.0, 0.0));
        let mut position = Vec3::ZERO;

        position += navigate_motion(position, target, &config, 1.0).delta;
        assert!(position.distance(Vec3::new(5.0, 0.0, 0.0)) < 1e-4, "{:?}", position);

        position += navigate_motion(position, target, &config, 1.0).delta;
        assert!(position.distance(Vec3::new(10.0, 0.0, 0.0)) < 1e-4, "{:?}", position);

        // Дальше - idempotent
        for _ in 0..10 {
            let intent = navigate_motion(position, target, &config, 1.0);
            assert_eq!(intent, MotionIntent::NONE);
        }
    }

    #[test]
    fn test_vertical_offset_ignored() {
        let config = ControllerConfig::default();
        // Target прямо под/над нами - считается достигнутым
        let intent = navigate_motion(Vec3::ZERO, Some(Vec3::new(0.0, 4.0, 0.0)), &config, 1.0);
        assert_eq!(intent, MotionIntent::NONE);

        // Target выше и в стороне - движение только по плоскости
        let intent = navigate_motion(Vec3::ZERO, Some(Vec3::new(0.0, 4.0, -8.0)), &config, 0.1);
        assert_eq!(intent.delta.y, 0.0);
        assert!(intent.delta.z < 0.0);
        let forward = intent.desired_facing.unwrap() * Vec3::NEG_Z;
        assert!(forward.distance(Vec3::NEG_Z) < 1e-5);
    }

    #[test]
    fn test_inside_arrival_radius() {
        let config = ControllerConfig::default();
        // |d|² = 0.09 ≤ 0.1
        let intent = navigate_motion(Vec3::ZERO, Some(Vec3::new(0.3, 0.0, 0.0)), &config, 1.0);
        assert_eq!(intent, MotionIntent::NONE);
        // |d|² = 0.16 > 0.1
        let intent = navigate_motion(Vec3::ZERO, Some(Vec3::new(0.4, 0.0, 0.0)), &config, 1.0);
        assert!(!intent.is_empty());
    }
}
