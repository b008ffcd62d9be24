//! Коллайдеры для probe-запросов: Collider2D, CollisionLayer, Aabb2

use bevy::prelude::*;

/// Слой коллайдера (фильтр для probe-запросов)
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Reflect)]
pub enum CollisionLayer {
    /// Стены, пол, двери: всё что блокирует патруль
    Environment,
    Player,
    Enemy,
    Projectile,
}

/// Axis-aligned bounding box в мировых координатах
#[derive(Debug, Clone, Copy, PartialEq, Reflect)]
pub struct Aabb2 {
    pub center: Vec2,
    pub half_extents: Vec2,
}

impl Aabb2 {
    pub fn new(center: Vec2, half_extents: Vec2) -> Self {
        Self { center, half_extents }
    }

    pub fn min(&self) -> Vec2 {
        self.center - self.half_extents
    }

    pub fn max(&self) -> Vec2 {
        self.center + self.half_extents
    }

    /// Сжимает box на `skin` с каждой стороны (не меньше нуля)
    pub fn inset(&self, skin: f32) -> Self {
        Self {
            center: self.center,
            half_extents: (self.half_extents - Vec2::splat(skin)).max(Vec2::ZERO),
        }
    }
}

/// AABB коллайдер, центрированный на Transform entity
///
/// `enabled == false`: коллайдер не участвует в probe-запросах
/// (закрытая дверь включает свои коллайдеры).
#[derive(Component, Debug, Clone, Copy, Reflect)]
#[reflect(Component)]
pub struct Collider2D {
    pub half_extents: Vec2,
    pub layer: CollisionLayer,
    pub enabled: bool,
}

impl Default for Collider2D {
    fn default() -> Self {
        Self::new(Vec2::splat(0.5), CollisionLayer::Environment)
    }
}

impl Collider2D {
    pub fn new(half_extents: Vec2, layer: CollisionLayer) -> Self {
        Self {
            half_extents,
            layer,
            enabled: true,
        }
    }

    pub fn from_size(size: Vec2, layer: CollisionLayer) -> Self {
        Self::new(size * 0.5, layer)
    }

    pub fn disabled(mut self) -> Self {
        self.enabled = false;
        self
    }

    pub fn aabb_at(&self, center: Vec2) -> Aabb2 {
        Aabb2::new(center, self.half_extents)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_aabb_bounds() {
        let aabb = Aabb2::new(Vec2::new(1.0, 2.0), Vec2::new(0.5, 1.0));
        assert_eq!(aabb.min(), Vec2::new(0.5, 1.0));
        assert_eq!(aabb.max(), Vec2::new(1.5, 3.0));
    }

    #[test]
    fn test_aabb_inset_clamps_to_zero() {
        let aabb = Aabb2::new(Vec2::ZERO, Vec2::new(0.5, 0.1));
        let inner = aabb.inset(0.15);
        assert!((inner.half_extents.x - 0.35).abs() < 1e-6);
        assert_eq!(inner.half_extents.y, 0.0);
    }

    #[test]
    fn test_collider_from_size() {
        let collider = Collider2D::from_size(Vec2::new(2.0, 4.0), CollisionLayer::Player);
        assert_eq!(collider.half_extents, Vec2::new(1.0, 2.0));
        assert!(collider.enabled);
        assert!(!collider.disabled().enabled);
    }
}
