//! Ground Query - экранная точка → луч → точка на navigable surface
//!
//! Два внешних сервиса:
//! - `ViewProjection` (Resource): snapshot камеры, host обновляет каждый кадр
//! - `NavigableSurface` (Component + Transform): прямоугольные патчи земли с
//!   layer mask, по которой фильтрует ground query
//!
//! Промах (луч не задел ни одну поверхность в пределах `max_distance`) - не ошибка.

use bevy::prelude::*;
use serde::{Deserialize, Serialize};

/// Bitmask слоёв поверхности (navigable-surface filter)
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct SurfaceLayers(pub u32);

impl SurfaceLayers {
    pub const NONE: SurfaceLayers = SurfaceLayers(0);
    pub const ALL: SurfaceLayers = SurfaceLayers(u32::MAX);
    /// Слой по умолчанию для земли
    pub const GROUND: SurfaceLayers = SurfaceLayers(1);

    /// Один слой по индексу 0..32; индекс вне диапазона → `NONE`
    pub const fn layer(index: u32) -> SurfaceLayers {
        match 1u32.checked_shl(index) {
            Some(bits) => SurfaceLayers(bits),
            None => SurfaceLayers::NONE,
        }
    }

    pub fn intersects(self, other: SurfaceLayers) -> bool {
        self.0 & other.0 != 0
    }
}

impl Default for SurfaceLayers {
    fn default() -> Self {
        Self::GROUND
    }
}

/// Прямоугольная navigable поверхность
///
/// Плоскость проходит через `Transform::translation`, нормаль = `Transform::up()`,
/// размер задаётся `half_size` в локальных X/Z.
#[derive(Component, Debug, Clone, Copy, PartialEq)]
pub struct NavigableSurface {
    pub half_size: Vec2,
    pub layers: SurfaceLayers,
}

impl NavigableSurface {
    pub fn new(half_size: Vec2) -> Self {
        Self {
            half_size,
            layers: SurfaceLayers::GROUND,
        }
    }

    pub fn with_layers(mut self, layers: SurfaceLayers) -> Self {
        self.layers = layers;
        self
    }

    /// Дистанция вдоль луча до пересечения с патчем
    pub fn intersect(&self, transform: &Transform, ray: Ray3d) -> Option<f32> {
        let plane = InfinitePlane3d { normal: transform.up() };
        let distance = ray.intersect_plane(transform.translation, plane)?;

        let local = transform.rotation.inverse() * (ray.get_point(distance) - transform.translation);
        let inside = local.x.abs() <= self.half_size.x && local.z.abs() <= self.half_size.y;
        inside.then_some(distance)
    }
}

/// Ближайшее попадание луча в поверхности, прошедшие `filter`
pub fn nearest_ground_hit<'a>(
    ray: Ray3d,
    surfaces: impl IntoIterator<Item = (&'a Transform, &'a NavigableSurface)>,
    max_distance: f32,
    filter: SurfaceLayers,
) -> Option<Vec3> {
    surfaces
        .into_iter()
        .filter(|(_, surface)| surface.layers.intersects(filter))
        .filter_map(|(transform, surface)| surface.intersect(transform, ray))
        .filter(|distance| *distance <= max_distance)
        .min_by(|a, b| a.total_cmp(b))
        .map(|distance| ray.get_point(distance))
}

/// Snapshot камеры для перевода экранных координат в мировые лучи
///
/// Reverse-Z (near plane = ndc z 1.0), как у Bevy камер.
/// Экранные координаты: logical px, origin в левом верхнем углу.
#[derive(Resource, Debug, Clone, Copy, PartialEq)]
pub struct ViewProjection {
    pub world_from_view: Mat4,
    pub clip_from_view: Mat4,
    pub viewport_size: Vec2,
}

impl ViewProjection {
    /// Perspective камера в `eye`, смотрящая на `target`
    pub fn looking_at(eye: Vec3, target: Vec3, fov_y_radians: f32, viewport_size: Vec2) -> Self {
        let aspect = viewport_size.x / viewport_size.y.max(1.0);
        Self {
            world_from_view: Transform::from_translation(eye)
                .looking_at(target, Vec3::Y)
                .compute_matrix(),
            clip_from_view: Mat4::perspective_infinite_reverse_rh(fov_y_radians, aspect, 0.1),
            viewport_size,
        }
    }

    pub fn screen_point_to_ray(&self, screen: Vec2) -> Option<Ray3d> {
        if self.viewport_size.x <= 0.0 || self.viewport_size.y <= 0.0 {
            return None;
        }

        let mut ndc = screen * 2.0 / self.viewport_size - Vec2::ONE;
        ndc.y = -ndc.y;

        let world_from_ndc = self.world_from_view * self.clip_from_view.inverse();
        let world_near = world_from_ndc.project_point3(ndc.extend(1.0));
        let world_far = world_from_ndc.project_point3(ndc.extend(f32::EPSILON));

        if !world_near.is_finite() || !world_far.is_finite() {
            return None;
        }

        Dir3::new(world_far - world_near)
            .ok()
            .map(|direction| Ray3d::new(world_near, direction))
    }

    /// Обратная проекция (для scripted кликов и debug overlay)
    pub fn world_to_screen(&self, world: Vec3) -> Option<Vec2> {
        let clip = self.clip_from_view * self.world_from_view.inverse() * world.extend(1.0);
        if clip.w <= 0.0 {
            return None;
        }

        let ndc = clip.truncate() / clip.w;
        Some(Vec2::new(
            (ndc.x + 1.0) * 0.5 * self.viewport_size.x,
            (1.0 - ndc.y) * 0.5 * self.viewport_size.y,
        ))
    }

    /// Луч из экранной точки → точка на земле
    pub fn ground_point<'a>(
        &self,
        screen: Vec2,
        surfaces: impl IntoIterator<Item = (&'a Transform, &'a NavigableSurface)>,
        max_distance: f32,
        filter: SurfaceLayers,
    ) -> Option<Vec3> {
        let ray = self.screen_point_to_ray(screen)?;
        nearest_ground_hit(ray, surfaces, max_distance, filter)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn camera() -> ViewProjection {
        ViewProjection::looking_at(
            Vec3::new(0.0, 10.0, 10.0),
            Vec3::ZERO,
            std::f32::consts::FRAC_PI_4,
            Vec2::new(1280.0, 720.0),
        )
    }

    fn ground() -> (Transform, NavigableSurface) {
        (Transform::IDENTITY, NavigableSurface::new(Vec2::splat(50.0)))
    }

    #[test]
    fn test_center_ray_follows_camera_forward() {
        let view = camera();
        let ray = view.screen_point_to_ray(Vec2::new(640.0, 360.0)).unwrap();

        let expected = (Vec3::ZERO - Vec3::new(0.0, 10.0, 10.0)).normalize();
        assert!(ray.direction.as_vec3().distance(expected) < 1e-3, "{:?}", ray.direction);
    }

    #[test]
    fn test_center_click_hits_origin() {
        let view = camera();
        let (transform, surface) = ground();
        let hit = view
            .ground_point(
                Vec2::new(640.0, 360.0),
                [(&transform, &surface)],
                10_000.0,
                SurfaceLayers::ALL,
            )
            .unwrap();
        assert!(hit.distance(Vec3::ZERO) < 1e-2, "hit = {:?}", hit);
    }

    #[test]
    fn test_projected_world_point_hits_back() {
        let view = camera();
        let (transform, surface) = ground();
        let world = Vec3::new(3.0, 0.0, -2.0);

        let screen = view.world_to_screen(world).unwrap();
        let hit = view
            .ground_point(screen, [(&transform, &surface)], 10_000.0, SurfaceLayers::ALL)
            .unwrap();
        assert!(hit.distance(world) < 1e-2, "hit = {:?}", hit);
    }

    #[test]
    fn test_ray_pointing_at_sky_misses() {
        let ray = Ray3d::new(Vec3::new(0.0, 5.0, 0.0), Dir3::Y);
        let (transform, surface) = ground();
        assert!(nearest_ground_hit(ray, [(&transform, &surface)], 10_000.0, SurfaceLayers::ALL).is_none());
    }

    #[test]
    fn test_outside_patch_misses() {
        let ray = Ray3d::new(Vec3::new(100.0, 5.0, 0.0), Dir3::NEG_Y);
        let (transform, surface) = ground();
        assert!(nearest_ground_hit(ray, [(&transform, &surface)], 10_000.0, SurfaceLayers::ALL).is_none());
    }

    #[test]
    fn test_nearest_surface_wins() {
        let ray = Ray3d::new(Vec3::new(1.0, 10.0, 1.0), Dir3::NEG_Y);
        let floor = (Transform::IDENTITY, NavigableSurface::new(Vec2::splat(10.0)));
        let platform = (
            Transform::from_xyz(0.0, 3.0, 0.0),
            NavigableSurface::new(Vec2::splat(2.0)),
        );

        let hit = nearest_ground_hit(
            ray,
            [(&floor.0, &floor.1), (&platform.0, &platform.1)],
            10_000.0,
            SurfaceLayers::ALL,
        )
        .unwrap();
        assert!(hit.distance(Vec3::new(1.0, 3.0, 1.0)) < 1e-4);
    }

    #[test]
    fn test_filter_and_range() {
        let ray = Ray3d::new(Vec3::new(0.0, 10.0, 0.0), Dir3::NEG_Y);
        let (transform, surface) = ground();
        let water = surface.with_layers(SurfaceLayers::layer(3));

        // Слой не проходит фильтр
        assert!(nearest_ground_hit(ray, [(&transform, &water)], 10_000.0, SurfaceLayers::GROUND).is_none());
        // Слишком далеко
        assert!(nearest_ground_hit(ray, [(&transform, &surface)], 5.0, SurfaceLayers::ALL).is_none());
        // В пределах
        assert!(nearest_ground_hit(ray, [(&transform, &surface)], 10.0, SurfaceLayers::GROUND).is_some());
    }

    #[test]
    fn test_layer_index_range() {
        assert_eq!(SurfaceLayers::layer(0), SurfaceLayers::GROUND);
        assert_eq!(SurfaceLayers::layer(31), SurfaceLayers(1 << 31));
        assert_eq!(SurfaceLayers::layer(32), SurfaceLayers::NONE);
        assert!(!SurfaceLayers::layer(40).intersects(SurfaceLayers::ALL));
    }

    #[test]
    fn test_degenerate_viewport_has_no_ray() {
        let mut view = camera();
        view.viewport_size = Vec2::ZERO;
        assert!(view.screen_point_to_ray(Vec2::ZERO).is_none());
    }
}
