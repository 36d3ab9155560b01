//! Mode State - активный режим движения
//!
//! Три взаимоисключающих режима. Переключение безусловное (без guards),
//! любой режим достижим из любого.

use std::fmt;
use std::str::FromStr;

use bevy::prelude::*;
use serde::{Deserialize, Serialize};

use crate::error::ControllerError;
use crate::input::ModeSwitchEdges;

/// Режим движения
///
/// Порядок объявления = порядок обработки switch-событий внутри кадра
/// (Direct < Navigate < DualStick, последний обработанный побеждает).
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum MovementMode {
    /// Клавиатура / digital direction ("Move" axis)
    #[default]
    Direct,
    /// Click/tap-to-move по navigable surface
    Navigate,
    /// Два виртуальных джойстика (move + look)
    DualStick,
}

impl MovementMode {
    pub const ALL: [MovementMode; 3] = [
        MovementMode::Direct,
        MovementMode::Navigate,
        MovementMode::DualStick,
    ];

    /// Индекс в `ModeSwitchEdges`
    pub fn index(self) -> usize {
        match self {
            MovementMode::Direct => 0,
            MovementMode::Navigate => 1,
            MovementMode::DualStick => 2,
        }
    }

    pub fn as_str(self) -> &'static str {
        match self {
            MovementMode::Direct => "direct",
            MovementMode::Navigate => "navigate",
            MovementMode::DualStick => "dual-stick",
        }
    }
}

impl fmt::Display for MovementMode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for MovementMode {
    type Err = ControllerError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "direct" | "wasd" => Ok(MovementMode::Direct),
            "navigate" | "click" => Ok(MovementMode::Navigate),
            "dual-stick" | "dualstick" | "dual_stick" | "mobile" => Ok(MovementMode::DualStick),
            _ => Err(ControllerError::UnknownMode(s.to_string())),
        }
    }
}

/// Активный режим controlled entity
///
/// Пишется только `apply_mode_switches` (и внешним tooling - поле публичное).
#[derive(Component, Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct ActiveMode {
    pub mode: MovementMode,
}

impl ActiveMode {
    pub fn new(mode: MovementMode) -> Self {
        Self { mode }
    }

    /// Безусловно перезаписывает режим. Возвращает предыдущий если режим изменился.
    pub fn switch_mode(&mut self, requested: MovementMode) -> Option<MovementMode> {
        if self.mode == requested {
            return None;
        }
        let previous = self.mode;
        self.mode = requested;
        Some(previous)
    }
}

/// Режим, который контроллер видел на прошлом проходе
///
/// Ловит смену режима любым путём, включая прямую запись `ActiveMode` извне.
/// `None` до первого прохода: стартовый режим не считается переходом.
#[derive(Component, Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct ModeTracker {
    pub last: Option<MovementMode>,
}

impl ModeTracker {
    /// Запоминает `current`, возвращает прошлый режим если он отличался
    pub fn observe(&mut self, current: MovementMode) -> Option<MovementMode> {
        let previous = self.last.replace(current)?;
        (previous != current).then_some(previous)
    }
}

/// Итоговый режим после всех switch-событий кадра
///
/// Обходим режимы по возрастанию, последний нажатый побеждает.
/// Без нажатий возвращает `current`.
pub fn resolve_mode_switch(current: MovementMode, edges: &ModeSwitchEdges) -> MovementMode {
    MovementMode::ALL
        .into_iter()
        .filter(|mode| edges.is_pressed(*mode))
        .last()
        .unwrap_or(current)
}
