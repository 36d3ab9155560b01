//! Ошибки контроллера
//!
//! Per-frame логика ошибок не возвращает (soft failures: ground miss, стик в покое,
//! клик поверх UI). Ошибки возможны только на инициализации: конфиг и внешние сервисы.

use thiserror::Error;

#[derive(Debug, Error)]
pub enum ControllerError {
    /// Обязательный внешний сервис (input source, camera) не зарегистрирован
    #[error("required service `{0}` is not registered")]
    MissingService(&'static str),

    #[error("invalid config field `{field}`: {reason}")]
    InvalidConfig { field: &'static str, reason: String },

    #[error("failed to parse controller config: {0}")]
    ConfigParse(#[from] serde_json::Error),

    #[error("failed to read controller config: {0}")]
    ConfigIo(#[from] std::io::Error),

    #[error("unknown movement mode `{0}` (expected direct, navigate or dual-stick)")]
    UnknownMode(String),
}
