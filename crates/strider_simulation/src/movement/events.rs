//! Movement events

use bevy::prelude::*;

use super::mode::MovementMode;

/// Event: режим движения реально изменился (from != to)
///
/// Генерируется `apply_mode_switches`, максимум один на entity за кадр.
#[derive(Event, Debug, Clone, Copy, PartialEq)]
pub struct MovementModeChanged {
    pub entity: Entity,
    pub from: MovementMode,
    pub to: MovementMode,
}

/// Event: клик попал в navigable surface, target обновлён
#[derive(Event, Debug, Clone, Copy, PartialEq)]
pub struct NavigationTargetAcquired {
    pub entity: Entity,
    pub target: Vec3,
}

/// Event: внешний tooling принудительно ставит режим
///
/// Обрабатывается после input edges того же кадра → tooling побеждает.
#[derive(Event, Debug, Clone, Copy, PartialEq)]
pub struct ForceMovementMode {
    pub entity: Entity,
    pub mode: MovementMode,
}
