//! Per-frame системы контроллера
//!
//! Порядок внутри кадра (см. `ControllerSet`):
//! 1. apply_mode_switches - Mode State
//! 2. acquire_navigation_target - navigate acquisition (ground query)
//! 3. drive_active_strategy - стратегия активного режима → смещение + FrameIntent
//! 4. integrate_orientation - единственная точка поворота
//! 5. detect_motion_activity → record_trail_samples - trail toggle, в любом режиме

use bevy::prelude::*;

use super::activity::MotionActivity;
use super::components::{FrameIntent, MovementController, NavigationTarget};
use super::events::{ForceMovementMode, MovementModeChanged, NavigationTargetAcquired};
use super::mode::{resolve_mode_switch, ActiveMode, ModeTracker, MovementMode};
use super::orientation::rotate_towards;
use super::strategies::motion_intent;
use crate::config::ControllerConfig;
use crate::ground::{NavigableSurface, ViewProjection};
use crate::input::FrameInput;
use crate::logger;
use crate::trail::{TrailEffect, TrailSamples};

/// Mode State: input edges (по возрастанию режима), затем ForceMovementMode
///
/// Переход детектится через `ModeTracker`, поэтому прямая запись `ActiveMode`
/// извне обрабатывается так же: выход из Navigate сбрасывает NavigationTarget,
/// на каждый переход ровно один MovementModeChanged.
pub fn apply_mode_switches(
    input: Res<FrameInput>,
    mut force_events: EventReader<ForceMovementMode>,
    mut changed_events: EventWriter<MovementModeChanged>,
    mut controllers: Query<
        (Entity, &mut ActiveMode, &mut ModeTracker, &mut NavigationTarget),
        With<MovementController>,
    >,
) {
    let forced: Vec<ForceMovementMode> = force_events.read().copied().collect();
    let has_requests = input.mode_switches.any() || !forced.is_empty();

    for (entity, mut active, mut tracker, mut target) in controllers.iter_mut() {
        // Новый контроллер: стартовый режим фиксируем до запросов этого кадра
        if tracker.last.is_none() {
            tracker.last = Some(active.mode);
        }

        if has_requests {
            let mut requested = resolve_mode_switch(active.mode, &input.mode_switches);
            if let Some(force) = forced.iter().rev().find(|force| force.entity == entity) {
                requested = force.mode;
            }
            if active.mode != requested {
                active.switch_mode(requested);
            }
        }

        let current = active.mode;
        let Some(previous) = tracker.observe(current) else {
            continue;
        };

        if previous == MovementMode::Navigate && target.target.is_some() {
            target.clear();
        }

        changed_events.write(MovementModeChanged {
            entity,
            from: previous,
            to: current,
        });
        logger::log_info(&format!(
            "🎮 {:?}: movement mode {} → {}",
            entity, previous, current
        ));
    }
}

/// Navigate acquisition: клик → ground query → NavigationTarget
///
/// Клик поверх UI отбрасывается ДО ground query. Промах оставляет старую цель.
pub fn acquire_navigation_target(
    input: Res<FrameInput>,
    view: Res<ViewProjection>,
    surfaces: Query<(&Transform, &NavigableSurface)>,
    mut controllers: Query<
        (Entity, &ActiveMode, &ControllerConfig, &mut NavigationTarget),
        With<MovementController>,
    >,
    mut acquired_events: EventWriter<NavigationTargetAcquired>,
) {
    if !input.primary_click {
        return;
    }

    if !input.world_click() {
        logger::log("Click over UI - navigation target unchanged");
        return;
    }

    for (entity, active, config, mut target) in controllers.iter_mut() {
        if active.mode != MovementMode::Navigate {
            continue;
        }

        let Some(point) = view.ground_point(
            input.pointer_position,
            surfaces.iter(),
            config.ground_max_distance,
            config.ground_filter,
        ) else {
            logger::log(&format!(
                "Click at {:?} missed navigable surfaces - keeping previous target",
                input.pointer_position
            ));
            continue;
        };

        target.set(point);
        acquired_events.write(NavigationTargetAcquired { entity, target: point });
        logger::log(&format!("📍 {:?}: navigation target {:?}", entity, point));
    }
}

/// Стратегия активного режима: смещение применяется сразу, facing - только запрос
pub fn drive_active_strategy(
    time: Res<Time>,
    input: Res<FrameInput>,
    mut controllers: Query<
        (
            &ActiveMode,
            &ControllerConfig,
            &NavigationTarget,
            &mut Transform,
            &mut FrameIntent,
        ),
        With<MovementController>,
    >,
) {
    let delta_secs = time.delta_secs();

    for (active, config, target, mut transform, mut frame_intent) in controllers.iter_mut() {
        let intent = motion_intent(
            active.mode,
            &input,
            transform.translation,
            target.target,
            config,
            delta_secs,
        );

        // Без движения Transform не трогаем (не триггерим change detection)
        if intent.delta != Vec3::ZERO {
            transform.translation += intent.delta;
        }
        frame_intent.0 = intent;
    }
}

/// Orientation Integrator: поворот к desired facing с ограниченной скоростью
pub fn integrate_orientation(
    time: Res<Time>,
    mut controllers: Query<(&ControllerConfig, &FrameIntent, &mut Transform), With<MovementController>>,
) {
    let delta_secs = time.delta_secs();

    for (config, frame_intent, mut transform) in controllers.iter_mut() {
        let Some(desired) = frame_intent.0.desired_facing else {
            continue;
        };
        transform.rotation = rotate_towards(transform.rotation, desired, config.rotation_speed, delta_secs);
    }
}

/// Motion-Activity Detector: moving → trail emitting
///
/// Работает каждый кадр в любом режиме, previous position обновляется всегда.
pub fn detect_motion_activity(
    mut controllers: Query<(&Transform, &mut MotionActivity, &mut TrailEffect), With<MovementController>>,
) {
    for (transform, mut activity, mut trail) in controllers.iter_mut() {
        let moving = activity.sample(transform.translation);
        if trail.emitting != moving {
            trail.emitting = moving;
        }
    }
}

/// Точки trail для renderer'а
pub fn record_trail_samples(
    time: Res<Time>,
    mut controllers: Query<(&Transform, &TrailEffect, &mut TrailSamples), With<MovementController>>,
) {
    let now = time.elapsed_secs();

    for (transform, trail, mut samples) in controllers.iter_mut() {
        // Нечего добавлять и нечего чистить - не трогаем компонент
        if !trail.emitting && samples.is_empty() {
            continue;
        }
        samples.record(trail, transform.translation, now);
    }
}
