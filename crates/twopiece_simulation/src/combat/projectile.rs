//! Снаряды босса: движение по прямой и самоуничтожение по lifetime.

use bevy::prelude::*;

use crate::components::{Collider2D, CollisionLayer};

/// Размер снаряда (AABB)
pub const PROJECTILE_SIZE: Vec2 = Vec2::new(0.25, 0.25);

#[derive(Component, Debug, Clone, Copy, PartialEq, Reflect)]
#[reflect(Component)]
pub struct Projectile {
    pub owner: Entity,
    pub velocity: Vec2,
    /// Оставшееся время жизни (секунды)
    pub lifetime: f32,
}

pub fn projectile_bundle(
    owner: Entity,
    position: Vec2,
    velocity: Vec2,
    lifetime: f32,
) -> (Projectile, Transform, Collider2D) {
    (
        Projectile {
            owner,
            velocity,
            lifetime,
        },
        Transform::from_translation(position.extend(0.0)),
        Collider2D::from_size(PROJECTILE_SIZE, CollisionLayer::Projectile),
    )
}

/// Система: движение снарядов + деспавн по истечении lifetime
pub fn move_projectiles(
    mut commands: Commands,
    mut projectiles: Query<(Entity, &mut Projectile, &mut Transform)>,
    time: Res<Time<Fixed>>,
) {
    let delta = time.delta_secs();

    for (entity, mut projectile, mut transform) in projectiles.iter_mut() {
        transform.translation += (projectile.velocity * delta).extend(0.0);
        projectile.lifetime -= delta;

        if projectile.lifetime <= 0.0 {
            commands.entity(entity).despawn();
        }
    }
}
