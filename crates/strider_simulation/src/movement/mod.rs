//! Movement domain - режимы, стратегии, ориентация, детектор движения
//!
//! Содержит:
//! - ActiveMode / MovementMode (Mode State)
//! - strategies: Direct, Navigate, DualStick → MotionIntent
//! - orientation: bounded-rate yaw интегратор
//! - activity: Motion-Activity Detector (trail toggle)
//! - events: MovementModeChanged, NavigationTargetAcquired, ForceMovementMode

pub mod activity;
pub mod components;
pub mod events;
pub mod mode;
pub mod orientation;
pub mod spawn;
pub mod strategies;
pub mod systems;

mod mode_tests;

pub use activity::{is_moving, MotionActivity, MOVEMENT_THRESHOLD};
pub use components::*;
pub use events::*;
pub use mode::{resolve_mode_switch, ActiveMode, ModeTracker, MovementMode};
pub use orientation::rotate_towards;
pub use spawn::{player_controller_bundle, spawn_player_controller};
pub use strategies::{look_rotation, motion_intent, MotionIntent};

use bevy::prelude::*;

use crate::input::consume_frame_edges;

/// Фазы кадра контроллера (выполняются строго по порядку)
///
/// Host регистрирует свой input sampler в `ControllerSet::Sample`.
#[derive(SystemSet, Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ControllerSet {
    Sample,
    ModeSwitch,
    Acquire,
    Strategy,
    Orientation,
    Activity,
}

/// Movement Controller Plugin
///
/// Все системы в `Update` (один проход на rendered frame), цепочкой:
/// 1. apply_mode_switches
/// 2. acquire_navigation_target
/// 3. drive_active_strategy
/// 4. integrate_orientation
/// 5. detect_motion_activity → record_trail_samples → consume_frame_edges
pub struct MovementControllerPlugin;

impl Plugin for MovementControllerPlugin {
    fn build(&self, app: &mut App) {
        app.add_event::<MovementModeChanged>()
            .add_event::<NavigationTargetAcquired>()
            .add_event::<ForceMovementMode>();

        app.configure_sets(
            Update,
            (
                ControllerSet::Sample,
                ControllerSet::ModeSwitch,
                ControllerSet::Acquire,
                ControllerSet::Strategy,
                ControllerSet::Orientation,
                ControllerSet::Activity,
            )
                .chain(),
        );

        app.add_systems(
            Update,
            (
                systems::apply_mode_switches.in_set(ControllerSet::ModeSwitch),
                systems::acquire_navigation_target.in_set(ControllerSet::Acquire),
                systems::drive_active_strategy.in_set(ControllerSet::Strategy),
                systems::integrate_orientation.in_set(ControllerSet::Orientation),
                (
                    systems::detect_motion_activity,
                    systems::record_trail_samples,
                    consume_frame_edges,
                )
                    .chain()
                    .in_set(ControllerSet::Activity),
            ),
        );
    }
}
