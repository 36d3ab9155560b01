//! Spawn helpers для controlled entity

use bevy::prelude::*;

use super::activity::MotionActivity;
use super::components::{MovementController, Player};
use super::mode::ActiveMode;
use crate::config::ControllerConfig;
use crate::error::ControllerError;
use crate::trail::TrailEffect;

/// Полный набор компонентов player-контроллера
///
/// Здесь же one-time настройка trail (Trail Effect Configurator) - per-frame
/// логика его больше не конфигурирует. Невалидный config отклоняется сразу.
pub fn player_controller_bundle(
    position: Vec3,
    config: ControllerConfig,
) -> Result<impl Bundle, ControllerError> {
    config.validate()?;

    Ok((
        Player,
        MovementController,
        Transform::from_translation(position),
        ActiveMode::new(config.default_mode),
        MotionActivity::new(position, config.movement_threshold),
        TrailEffect::configure(&config.trail),
        config,
    ))
}

/// Spawn player-контроллера через Commands
pub fn spawn_player_controller(
    commands: &mut Commands,
    position: Vec3,
    config: ControllerConfig,
) -> Result<Entity, ControllerError> {
    let bundle = player_controller_bundle(position, config)?;
    Ok(commands.spawn(bundle).id())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::movement::{MovementMode, NavigationTarget};
    use crate::trail::TrailSamples;

    #[test]
    fn test_bundle_applies_config() {
        let mut world = World::new();
        let config = ControllerConfig {
            default_mode: MovementMode::Navigate,
            movement_threshold: 0.05,
            ..default()
        };
        let position = Vec3::new(1.0, 0.0, 2.0);
        let bundle = player_controller_bundle(position, config).unwrap();
        let entity = world.spawn(bundle).id();

        let entity_ref = world.entity(entity);
        assert_eq!(entity_ref.get::<ActiveMode>().unwrap().mode, MovementMode::Navigate);
        assert_eq!(entity_ref.get::<Transform>().unwrap().translation, position);

        let activity = entity_ref.get::<MotionActivity>().unwrap();
        assert_eq!(activity.previous_position, position);
        assert_eq!(activity.threshold, 0.05);

        // Required components
        assert_eq!(entity_ref.get::<NavigationTarget>().unwrap().target, None);
        assert!(entity_ref.get::<TrailSamples>().unwrap().is_empty());
        assert!(!entity_ref.get::<TrailEffect>().unwrap().emitting);
    }

    #[test]
    fn test_invalid_config_rejected() {
        let config = ControllerConfig {
            rotation_speed: f32::NAN,
            ..default()
        };
        assert!(matches!(
            player_controller_bundle(Vec3::ZERO, config),
            Err(ControllerError::InvalidConfig { field: "rotation_speed", .. })
        ));
    }
}
