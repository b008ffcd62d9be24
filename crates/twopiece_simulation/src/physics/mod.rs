//! Headless probe-запросы поверх AABB коллайдеров.
//!
//! Хост-движок обычно даёт свой raycast; здесь простая замена для headless
//! симуляции и тестов: snapshot коллайдеров за тик + slab-тест луча.

use bevy::prelude::*;

use crate::ai::ports::{HitInfo, SensorPort};
use crate::components::{Aabb2, Collider2D, CollisionLayer};

/// Коллайдер, попавший в snapshot тика
#[derive(Debug, Clone, Copy)]
pub struct SensedCollider {
    pub entity: Entity,
    pub aabb: Aabb2,
    pub layer: CollisionLayer,
}

/// Собирает включённые коллайдеры в snapshot (позиции на начало тика)
pub fn sensed_colliders<'a>(
    colliders: impl Iterator<Item = (Entity, &'a Transform, &'a Collider2D)>,
) -> Vec<SensedCollider> {
    colliders
        .filter(|(_, _, collider)| collider.enabled)
        .map(|(entity, transform, collider)| SensedCollider {
            entity,
            aabb: collider.aabb_at(transform.translation.truncate()),
            layer: collider.layer,
        })
        .collect()
}

/// Расстояние до входа луча в AABB (slab test).
///
/// Луч, начинающийся внутри box, попадает на дистанции 0.
/// Границы box включительно: касание считается попаданием.
pub fn raycast_aabb(origin: Vec2, direction: Vec2, max_distance: f32, aabb: &Aabb2) -> Option<f32> {
    let min = aabb.min();
    let max = aabb.max();
    let mut t_enter = 0.0_f32;
    let mut t_exit = max_distance;

    for axis in 0..2 {
        let o = origin[axis];
        let d = direction[axis];

        if d.abs() < f32::EPSILON {
            // Луч параллелен slab: должен лежать внутри
            if o < min[axis] || o > max[axis] {
                return None;
            }
            continue;
        }

        let inv = 1.0 / d;
        let mut t0 = (min[axis] - o) * inv;
        let mut t1 = (max[axis] - o) * inv;
        if t0 > t1 {
            std::mem::swap(&mut t0, &mut t1);
        }

        t_enter = t_enter.max(t0);
        t_exit = t_exit.min(t1);
        if t_enter > t_exit {
            return None;
        }
    }

    Some(t_enter)
}

/// `SensorPort` над snapshot коллайдеров
pub struct WorldSensor<'a> {
    colliders: &'a [SensedCollider],
    exclude: Option<Entity>,
}

impl<'a> WorldSensor<'a> {
    pub fn new(colliders: &'a [SensedCollider]) -> Self {
        Self {
            colliders,
            exclude: None,
        }
    }

    /// Игнорировать собственный коллайдер юнита
    pub fn excluding(mut self, entity: Entity) -> Self {
        self.exclude = Some(entity);
        self
    }
}

impl SensorPort for WorldSensor<'_> {
    fn range_probe(
        &self,
        origin: Vec2,
        direction: Vec2,
        max_distance: f32,
        layer: CollisionLayer,
    ) -> Option<HitInfo> {
        self.colliders
            .iter()
            .filter(|collider| collider.layer == layer && Some(collider.entity) != self.exclude)
            .filter_map(|collider| {
                raycast_aabb(origin, direction, max_distance, &collider.aabb).map(|distance| HitInfo {
                    entity: collider.entity,
                    point: origin + direction * distance,
                    distance,
                })
            })
            .min_by(|a, b| a.distance.total_cmp(&b.distance))
    }
}
