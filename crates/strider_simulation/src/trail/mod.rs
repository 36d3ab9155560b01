//! Trail effect - визуальный след при движении
//!
//! Конфигурация применяется один раз (`TrailEffect::configure` при spawn).
//! Per-frame меняется только `emitting` (Motion-Activity Detector) и
//! `TrailSamples` (точки, которые рисует renderer).

use std::collections::VecDeque;

use bevy::prelude::*;
use bevy_color::{Color, Mix, Srgba};

use crate::config::TrailSettings;

/// Двухточечный градиент: start (t = 0, голова trail) → end (t = 1, хвост)
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct TrailGradient {
    pub start: Color,
    pub end: Color,
}

impl TrailGradient {
    /// Смешивание в sRGB (как gradient keys в редакторах)
    pub fn color_at(&self, t: f32) -> Color {
        let start = Srgba::from(self.start);
        let end = Srgba::from(self.end);
        Color::from(start.mix(&end, t.clamp(0.0, 1.0)))
    }
}

/// Линейное сужение ширины по времени жизни
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct WidthCurve {
    pub start: f32,
    pub end: f32,
}

impl WidthCurve {
    pub fn width_at(&self, t: f32) -> f32 {
        let t = t.clamp(0.0, 1.0);
        self.start + (self.end - self.start) * t
    }
}

/// Flat/unlit материал trail, тонированный start цветом
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct TrailMaterial {
    pub unlit: bool,
    pub tint: Color,
}

/// Состояние trail эффекта controlled entity
#[derive(Component, Debug, Clone, PartialEq)]
pub struct TrailEffect {
    pub emitting: bool,
    /// Время жизни точки (секунды)
    pub lifetime: f32,
    pub width: WidthCurve,
    pub gradient: TrailGradient,
    pub material: TrailMaterial,
}

impl TrailEffect {
    /// One-time setup внешнего вида
    pub fn configure(settings: &TrailSettings) -> Self {
        let [r, g, b, a] = settings.start_color;
        let start = Color::srgba(r, g, b, a);
        let [r, g, b, a] = settings.end_color;
        let end = Color::srgba(r, g, b, a);

        Self {
            emitting: false,
            lifetime: settings.lifetime,
            width: WidthCurve {
                start: settings.start_width,
                end: settings.end_width,
            },
            gradient: TrailGradient { start, end },
            material: TrailMaterial {
                unlit: true,
                tint: start,
            },
        }
    }
}

impl Default for TrailEffect {
    fn default() -> Self {
        Self::configure(&TrailSettings::default())
    }
}

/// Точка trail: позиция + момент эмиссии (elapsed секунды)
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct TrailSample {
    pub position: Vec3,
    pub emitted_at: f32,
}

/// Живые точки trail, от старых к новым
#[derive(Component, Debug, Clone, Default)]
pub struct TrailSamples {
    samples: VecDeque<TrailSample>,
}

impl TrailSamples {
    /// Добавляет точку если trail эмитит, и удаляет точки старше lifetime
    pub fn record(&mut self, effect: &TrailEffect, position: Vec3, now: f32) {
        if effect.emitting {
            self.samples.push_back(TrailSample {
                position,
                emitted_at: now,
            });
        }

        while let Some(oldest) = self.samples.front() {
            if now - oldest.emitted_at <= effect.lifetime {
                break;
            }
            self.samples.pop_front();
        }
    }

    pub fn len(&self) -> usize {
        self.samples.len()
    }

    pub fn is_empty(&self) -> bool {
        self.samples.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = &TrailSample> {
        self.samples.iter()
    }

    /// Нормализованный возраст точки: 0 - только что, 1 - умирает
    pub fn age_fraction(sample: &TrailSample, effect: &TrailEffect, now: f32) -> f32 {
        ((now - sample.emitted_at) / effect.lifetime).clamp(0.0, 1.0)
    }
}
