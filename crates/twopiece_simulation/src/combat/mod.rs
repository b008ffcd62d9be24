//! Combat module
//!
//! ECS ответственность:
//! - Melee scan (probe геометрия врага)
//! - Damage события, здоровье игрока, маркеры смерти
//! - Снаряды босса
//!
//! Урон врагам с автоматами применяется в `ai::systems::reactions`.

use bevy::prelude::*;

pub mod damage;
pub mod melee;
pub mod projectile;

// Re-export основных типов
pub use damage::{DamageKind, DamageTaken, Dead, DespawnAfter, EntityDied};
pub use melee::{melee_probe_origins, melee_scan, ProbeOrigins};
pub use projectile::{projectile_bundle, Projectile};

use crate::SimulationSet;

/// Combat Plugin
///
/// Порядок выполнения (FixedUpdate):
/// 1. Reactions: apply_player_damage: урон за прошлый тик
/// 2. Movement: move_projectiles, despawn_after_timeout
pub struct CombatPlugin;

impl Plugin for CombatPlugin {
    fn build(&self, app: &mut App) {
        app.add_event::<DamageTaken>()
            .add_event::<EntityDied>()
            .register_type::<Projectile>();

        app.add_systems(
            FixedUpdate,
            damage::apply_player_damage.in_set(SimulationSet::Reactions),
        )
        .add_systems(
            FixedUpdate,
            (projectile::move_projectiles, damage::despawn_after_timeout)
                .chain()
                .in_set(SimulationSet::Movement),
        );
    }
}
