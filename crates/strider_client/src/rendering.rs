use bevy::math::Isometry3d;
use bevy::prelude::*;
use strider_simulation::{ControllerSet, NavigationTarget, TrailEffect, TrailSamples};

pub struct RenderingSyncPlugin;

impl Plugin for RenderingSyncPlugin {
    fn build(&self, app: &mut App) {
        app.add_systems(
            Update,
            (
                spawn_visuals_for_new_entities,
                sync_transforms,
                update_trail_heads,
                draw_trails,
                draw_navigation_targets,
            )
                .chain()
                .after(ControllerSet::Activity),
        );
    }
}

/// Trail рисуется чуть выше земли (без z-fighting с ground plane)
const TRAIL_LIFT: Vec3 = Vec3::new(0.0, 0.02, 0.0);

/// Marker: simulation entity needs visual representation
#[derive(Component)]
pub struct NeedsVisual;

/// Link: visual entity → simulation entity
#[derive(Component)]
pub struct VisualOf(pub Entity);

/// Link: simulation entity → visual entity
#[derive(Component)]
pub struct HasVisual(pub Entity);

/// Голова trail'а (unlit sphere у ног), видна пока trail emitting
#[derive(Component)]
pub struct TrailHead {
    pub owner: Entity,
}

/// Spawn visual representation (capsule + nose) for new controller entities
fn spawn_visuals_for_new_entities(
    mut commands: Commands,
    query: Query<(Entity, &Transform, &TrailEffect), With<NeedsVisual>>,
    mut meshes: ResMut<Assets<Mesh>>,
    mut materials: ResMut<Assets<StandardMaterial>>,
) {
    for (sim_entity, sim_transform, trail) in query.iter() {
        // Capsule (pivot на земле → поднимаем mesh на половину высоты)
        let visual_entity = commands
            .spawn((*sim_transform, Visibility::default(), VisualOf(sim_entity)))
            .with_children(|parent| {
                parent.spawn((
                    Mesh3d(meshes.add(Capsule3d::new(0.4, 1.2))),
                    MeshMaterial3d(materials.add(Color::srgb(0.2, 0.4, 0.9))),
                    Transform::from_xyz(0.0, 1.0, 0.0),
                ));
                // Nose: показывает facing (forward = −Z)
                parent.spawn((
                    Mesh3d(meshes.add(Cuboid::new(0.2, 0.2, 0.4))),
                    MeshMaterial3d(materials.add(Color::srgb(0.9, 0.9, 0.2))),
                    Transform::from_xyz(0.0, 1.4, -0.45),
                ));
            })
            .id();

        // Trail head: материал из TrailEffect (unlit + tint)
        commands.spawn((
            Mesh3d(meshes.add(Sphere::new(0.15))),
            MeshMaterial3d(materials.add(StandardMaterial {
                base_color: trail.material.tint,
                unlit: trail.material.unlit,
                alpha_mode: AlphaMode::Blend,
                ..default()
            })),
            Transform::from_translation(sim_transform.translation + TRAIL_LIFT),
            Visibility::Hidden,
            TrailHead { owner: sim_entity },
        ));

        // Link simulation ↔ visual
        commands
            .entity(sim_entity)
            .remove::<NeedsVisual>()
            .insert(HasVisual(visual_entity));
    }
}

/// Sync simulation transforms → visual transforms
fn sync_transforms(
    sim_query: Query<(&Transform, &HasVisual), Changed<Transform>>,
    mut visual_query: Query<&mut Transform, (With<VisualOf>, Without<HasVisual>)>,
) {
    for (sim_transform, has_visual) in sim_query.iter() {
        if let Ok(mut visual_transform) = visual_query.get_mut(has_visual.0) {
            *visual_transform = *sim_transform;
        }
    }
}

/// Trail head следует за владельцем и скрывается когда trail выключен
fn update_trail_heads(
    owners: Query<(&Transform, &TrailEffect)>,
    mut heads: Query<(&TrailHead, &mut Transform, &mut Visibility), Without<TrailEffect>>,
) {
    for (head, mut transform, mut visibility) in heads.iter_mut() {
        let Ok((owner_transform, trail)) = owners.get(head.owner) else {
            *visibility = Visibility::Hidden;
            continue;
        };

        transform.translation = owner_transform.translation + TRAIL_LIFT;
        *visibility = if trail.emitting {
            Visibility::Visible
        } else {
            Visibility::Hidden
        };
    }
}

/// Trail: gradient polyline через samples + круги шириной по WidthCurve
fn draw_trails(time: Res<Time>, trails: Query<(&TrailEffect, &TrailSamples)>, mut gizmos: Gizmos) {
    let now = time.elapsed_secs();
    // Gizmo circle лежит в XY → поворачиваем в плоскость земли
    let flat = Quat::from_rotation_x(std::f32::consts::FRAC_PI_2);

    for (effect, samples) in trails.iter() {
        for (older, newer) in samples.iter().zip(samples.iter().skip(1)) {
            let older_age = TrailSamples::age_fraction(older, effect, now);
            let newer_age = TrailSamples::age_fraction(newer, effect, now);
            gizmos.line_gradient(
                older.position + TRAIL_LIFT,
                newer.position + TRAIL_LIFT,
                effect.gradient.color_at(older_age),
                effect.gradient.color_at(newer_age),
            );
        }

        for sample in samples.iter() {
            let age = TrailSamples::age_fraction(sample, effect, now);
            let radius = effect.width.width_at(age) * 0.5;
            if radius <= f32::EPSILON {
                continue;
            }
            gizmos.circle(
                Isometry3d::new(sample.position + TRAIL_LIFT, flat),
                radius,
                effect.gradient.color_at(age),
            );
        }
    }
}

/// Marker активной navigation цели (Navigate mode)
fn draw_navigation_targets(targets: Query<&NavigationTarget>, mut gizmos: Gizmos) {
    let flat = Quat::from_rotation_x(std::f32::consts::FRAC_PI_2);

    for target in targets.iter() {
        let Some(point) = target.target else {
            continue;
        };
        gizmos.circle(
            Isometry3d::new(point + TRAIL_LIFT, flat),
            0.5,
            Color::srgb(1.0, 0.6, 0.1),
        );
    }
}
