//! Actor domain: готовые наборы компонентов для спавна юнитов
//!
//! - player_bundle: Health + Player-слой коллайдера
//! - basic_enemy_bundle: PatrolAttack автомат + WeaponHealth
//! - boss_bundle: ApproachFlee автомат + явная цель

use bevy::prelude::*;

use crate::ai::approach_flee::ApproachFleeStateMachine;
use crate::ai::components::{ApproachFleeConfig, PatrolAttackConfig};
use crate::ai::patrol_attack::PatrolAttackStateMachine;
use crate::ai::systems::BossTarget;
use crate::components::{Collider2D, CollisionLayer, Facing, Health, WeaponHealth};

/// Размеры AABB (ширина × высота)
pub const PLAYER_SIZE: Vec2 = Vec2::new(0.8, 1.6);
pub const BASIC_ENEMY_SIZE: Vec2 = Vec2::new(1.0, 2.0);
pub const BOSS_SIZE: Vec2 = Vec2::new(1.5, 1.5);

/// Маркер игрока
#[derive(Component, Debug, Clone, Copy, Default, Reflect)]
#[reflect(Component)]
pub struct Player;

pub fn player_bundle(position: Vec2, health: u32) -> impl Bundle {
    (
        Player,
        Health::new(health),
        Facing::Right,
        Transform::from_translation(position.extend(0.0)),
        Collider2D::from_size(PLAYER_SIZE, CollisionLayer::Player),
    )
}

pub fn basic_enemy_bundle(position: Vec2, facing: Facing, config: PatrolAttackConfig) -> impl Bundle {
    let weapon_health = WeaponHealth::new(config.club_health, config.sword_health);
    (
        PatrolAttackStateMachine::new(config, facing),
        weapon_health,
        facing,
        Transform::from_translation(position.extend(0.0)),
        Collider2D::from_size(BASIC_ENEMY_SIZE, CollisionLayer::Enemy),
    )
}

/// Босс спит до `WakeUp`; спрайт смотрит влево
pub fn boss_bundle(position: Vec2, target: Entity, config: ApproachFleeConfig) -> impl Bundle {
    (
        ApproachFleeStateMachine::new(config),
        BossTarget { entity: target },
        Facing::Left,
        Transform::from_translation(position.extend(0.0)),
        Collider2D::from_size(BOSS_SIZE, CollisionLayer::Enemy),
    )
}
