//! ControllerConfig - все параметры контроллера в одном месте
//!
//! Defaults = значения из inspector'а прототипа (speed 5, rotation 720°/s,
//! trail 0.5s cyan → blue). Загружается из JSON, пустой JSON = defaults.

use std::path::Path;

use bevy::prelude::*;
use serde::{Deserialize, Serialize};

use crate::error::ControllerError;
use crate::ground::SurfaceLayers;
use crate::movement::{MovementMode, MOVEMENT_THRESHOLD};

/// Внешний вид trail (применяется один раз при spawn)
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct TrailSettings {
    /// Время жизни точки trail (секунды)
    pub lifetime: f32,
    pub start_width: f32,
    pub end_width: f32,
    /// sRGBA, полная непрозрачность в начале
    pub start_color: [f32; 4],
    /// sRGBA, нулевая непрозрачность в конце
    pub end_color: [f32; 4],
}

impl Default for TrailSettings {
    fn default() -> Self {
        Self {
            lifetime: 0.5,
            start_width: 0.3,
            end_width: 0.0,
            start_color: [0.0, 1.0, 1.0, 1.0], // cyan
            end_color: [0.0, 0.0, 1.0, 0.0],   // blue, прозрачный
        }
    }
}

/// Параметры контроллера движения
///
/// Пороги `*_sq` сравниваются с КВАДРАТОМ длины вектора.
#[derive(Component, Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ControllerConfig {
    /// Скорость движения (м/с), одинаковая для всех режимов
    pub speed: f32,
    /// Максимальная угловая скорость поворота (градусы/с)
    pub rotation_speed: f32,
    /// Режим при spawn
    pub default_mode: MovementMode,
    /// Deadzone для "Move" axis и move stick
    pub move_deadzone_sq: f32,
    /// Deadzone для look stick
    pub look_deadzone_sq: f32,
    /// Радиус "цель достигнута" для navigate режима
    pub arrival_radius_sq: f32,
    /// Порог Motion-Activity Detector (дистанция за кадр)
    pub movement_threshold: f32,
    /// Дальность ground query
    pub ground_max_distance: f32,
    /// Какие navigable surfaces принимают клик
    pub ground_filter: SurfaceLayers,
    pub trail: TrailSettings,
}

impl Default for ControllerConfig {
    fn default() -> Self {
        Self {
            speed: 5.0,
            rotation_speed: 720.0,
            default_mode: MovementMode::Direct,
            move_deadzone_sq: 0.01,
            look_deadzone_sq: 0.1,
            arrival_radius_sq: 0.1,
            movement_threshold: MOVEMENT_THRESHOLD,
            ground_max_distance: 10_000.0,
            ground_filter: SurfaceLayers::ALL,
            trail: TrailSettings::default(),
        }
    }
}

impl ControllerConfig {
    pub fn from_json(json: &str) -> Result<Self, ControllerError> {
        let config: ControllerConfig = serde_json::from_str(json)?;
        config.validate()?;
        Ok(config)
    }

    pub fn load(path: impl AsRef<Path>) -> Result<Self, ControllerError> {
        let json = std::fs::read_to_string(path)?;
        Self::from_json(&json)
    }

    pub fn validate(&self) -> Result<(), ControllerError> {
        positive("speed", self.speed)?;
        positive("rotation_speed", self.rotation_speed)?;
        positive("ground_max_distance", self.ground_max_distance)?;
        positive("trail.lifetime", self.trail.lifetime)?;

        non_negative("move_deadzone_sq", self.move_deadzone_sq)?;
        non_negative("look_deadzone_sq", self.look_deadzone_sq)?;
        non_negative("arrival_radius_sq", self.arrival_radius_sq)?;
        non_negative("movement_threshold", self.movement_threshold)?;
        non_negative("trail.start_width", self.trail.start_width)?;
        non_negative("trail.end_width", self.trail.end_width)?;

        Ok(())
    }
}

fn positive(field: &'static str, value: f32) -> Result<(), ControllerError> {
    if value.is_finite() && value > 0.0 {
        return Ok(());
    }
    Err(ControllerError::InvalidConfig {
        field,
        reason: format!("expected a finite value > 0, got {}", value),
    })
}

fn non_negative(field: &'static str, value: f32) -> Result<(), ControllerError> {
    if value.is_finite() && value >= 0.0 {
        return Ok(());
    }
    Err(ControllerError::InvalidConfig {
        field,
        reason: format!("expected a finite value >= 0, got {}", value),
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults_are_valid() {
        let config = ControllerConfig::default();
        assert!(config.validate().is_ok());
        assert_eq!(config.speed, 5.0);
        assert_eq!(config.rotation_speed, 720.0);
        assert_eq!(config.default_mode, MovementMode::Direct);
        assert_eq!(config.trail.lifetime, 0.5);
        assert_eq!(config.trail.start_width, 0.3);
    }

    #[test]
    fn test_empty_json_is_default() {
        let config = ControllerConfig::from_json("{}").unwrap();
        assert_eq!(config, ControllerConfig::default());
    }

    #[test]
    fn test_partial_json_overrides() {
        let config = ControllerConfig::from_json(
            r#"{ "speed": 8.0, "default_mode": "dual-stick", "trail": { "lifetime": 1.5 } }"#,
        )
        .unwrap();

        assert_eq!(config.speed, 8.0);
        assert_eq!(config.default_mode, MovementMode::DualStick);
        assert_eq!(config.trail.lifetime, 1.5);
        // Остальное - defaults
        assert_eq!(config.trail.start_width, 0.3);
        assert_eq!(config.rotation_speed, 720.0);
    }

    #[test]
    fn test_invalid_values_rejected() {
        let err = ControllerConfig::from_json(r#"{ "speed": 0.0 }"#).unwrap_err();
        assert!(matches!(err, ControllerError::InvalidConfig { field: "speed", .. }));

        let err = ControllerConfig::from_json(r#"{ "arrival_radius_sq": -1.0 }"#).unwrap_err();
        assert!(matches!(
            err,
            ControllerError::InvalidConfig { field: "arrival_radius_sq", .. }
        ));
    }

    #[test]
    fn test_malformed_json_is_parse_error() {
        let err = ControllerConfig::from_json("{ speed: ").unwrap_err();
        assert!(matches!(err, ControllerError::ConfigParse(_)));
    }

    #[test]
    fn test_unknown_mode_is_parse_error() {
        let err = ControllerConfig::from_json(r#"{ "default_mode": "hover" }"#).unwrap_err();
        assert!(matches!(err, ControllerError::ConfigParse(_)));
    }

    #[test]
    fn test_missing_file_is_io_error() {
        let err = ControllerConfig::load("/definitely/not/here/strider.json").unwrap_err();
        assert!(matches!(err, ControllerError::ConfigIo(_)));
    }
}
