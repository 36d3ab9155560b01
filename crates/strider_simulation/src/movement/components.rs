//! Movement компоненты controlled entity

use bevy::prelude::*;

use super::activity::MotionActivity;
use super::mode::{ActiveMode, ModeTracker};
use super::strategies::MotionIntent;
use crate::config::ControllerConfig;
use crate::trail::{TrailEffect, TrailSamples};

/// Entity, которым управляет контроллер движения
///
/// Pose = `Transform` этой entity (translation = позиция, rotation = yaw facing).
/// Контроллер - единственный writer pose внутри кадра.
///
/// Остальное состояние добавляется через Required Components.
#[derive(Component, Debug, Clone, Copy, Default)]
#[require(
    Transform,
    ControllerConfig,
    ActiveMode,
    ModeTracker,
    NavigationTarget,
    FrameIntent,
    MotionActivity,
    TrailEffect,
    TrailSamples
)]
pub struct MovementController;

/// Marker для player-controlled entity
///
/// Input sampler клиента пишет в общий `FrameInput`, а камера следует за `Player`.
#[derive(Component, Debug, Clone, Copy, Default)]
#[require(MovementController)]
pub struct Player;

/// Цель click-to-move
///
/// Пишется только acquisition-фазой navigate режима; сбрасывается при выходе
/// из Navigate (иначе старая цель "оживёт" при возврате в режим).
#[derive(Component, Debug, Clone, Copy, Default, PartialEq)]
pub struct NavigationTarget {
    pub target: Option<Vec3>,
}

impl NavigationTarget {
    pub fn set(&mut self, point: Vec3) {
        self.target = Some(point);
    }

    pub fn clear(&mut self) {
        self.target = None;
    }
}

/// Intent активной стратегии за текущий кадр
///
/// Единственный канал strategy → Orientation Integrator.
#[derive(Component, Debug, Clone, Copy, Default, PartialEq)]
pub struct FrameIntent(pub MotionIntent);
