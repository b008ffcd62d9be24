//! AI decision-making module
//!
//! Два автомата поведения, не зависящие от ECS:
//! - `PatrolAttackStateMachine`: наземный враг (patrol → windup → swing)
//! - `ApproachFleeStateMachine`: босс (approach / flee / jump, стрельба)
//!
//! Мир они видят через `SensorPort`, влияют через `ActuatorPort`.
//! ECS-системы в `systems` связывают их с Bevy миром.

use bevy::prelude::*;

pub mod approach_flee;
pub mod components;
pub mod events;
pub mod patrol_attack;
pub mod ports;
pub mod systems;

#[cfg(test)]
mod patrol_attack_tests;

// Re-export основных типов
pub use approach_flee::{ApproachFleeStateMachine, DamageOutcome};
pub use components::{ApproachFleeConfig, ApproachFleeState, PatrolAttackConfig, PatrolAttackState};
pub use events::{FeedbackRequested, TierTriggersActivated, WakeUp};
pub use patrol_attack::PatrolAttackStateMachine;
pub use ports::{ActuatorCommand, ActuatorPort, CommandBuffer, Feedback, HealthTier, HitInfo, SensorPort};
pub use systems::BossTarget;

use crate::SimulationSet;

/// AI Plugin
///
/// Регистрирует AI системы в FixedUpdate для детерминизма.
/// Порядок выполнения:
/// 1. Reactions: apply_enemy_damage, apply_boss_damage: урон до тика автоматов
/// 2. Behaviour: handle_wake_up → tick_patrol_attack → tick_approach_flee
pub struct AIPlugin;

impl Plugin for AIPlugin {
    fn build(&self, app: &mut App) {
        app.add_event::<WakeUp>()
            .add_event::<FeedbackRequested>()
            .add_event::<TierTriggersActivated>()
            .register_type::<PatrolAttackStateMachine>()
            .register_type::<ApproachFleeStateMachine>()
            .register_type::<BossTarget>();

        app.add_systems(
            FixedUpdate,
            (systems::apply_enemy_damage, systems::apply_boss_damage)
                .chain()
                .in_set(SimulationSet::Reactions),
        )
        .add_systems(
            FixedUpdate,
            (
                systems::handle_wake_up,
                systems::tick_patrol_attack,
                systems::tick_approach_flee,
            )
                .chain() // Последовательное выполнение для детерминизма
                .in_set(SimulationSet::Behaviour),
        );
    }
}
