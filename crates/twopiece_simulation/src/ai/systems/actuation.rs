//! Применение записанных команд актуатора к ECS миру.

use bevy::ecs::system::SystemParam;
use bevy::prelude::*;

use crate::ai::events::{FeedbackRequested, TierTriggersActivated};
use crate::ai::ports::{ActuatorCommand, CommandBuffer};
use crate::combat::damage::{DamageKind, DamageTaken};
use crate::combat::projectile::projectile_bundle;
use crate::components::Facing;

/// Всё, куда пишут команды актуатора
#[derive(SystemParam)]
pub struct ActuatorOutputs<'w, 's> {
    pub commands: Commands<'w, 's>,
    pub damage: EventWriter<'w, DamageTaken>,
    pub feedback: EventWriter<'w, FeedbackRequested>,
    pub tier_triggers: EventWriter<'w, TierTriggersActivated>,
}

impl ActuatorOutputs<'_, '_> {
    /// Применяет (и опустошает) буфер команд юнита `entity`.
    pub fn apply(
        &mut self,
        entity: Entity,
        buffer: &mut CommandBuffer,
        transform: &mut Transform,
        facing: &mut Facing,
    ) {
        for command in buffer.drain() {
            match command {
                ActuatorCommand::Move(delta) => {
                    transform.translation += delta.extend(0.0);
                }
                ActuatorCommand::Face(new_facing) => {
                    if *facing != new_facing {
                        *facing = new_facing;
                    }
                }
                ActuatorCommand::SpawnProjectile {
                    position,
                    velocity,
                    lifetime,
                } => {
                    self.commands
                        .spawn(projectile_bundle(entity, position, velocity, lifetime));
                }
                ActuatorCommand::Damage(target) => {
                    self.damage.write(DamageTaken {
                        source: Some(entity),
                        target,
                        kind: DamageKind::Melee,
                    });
                }
                ActuatorCommand::Feedback(kind) => {
                    self.feedback.write(FeedbackRequested { entity, kind });
                }
                ActuatorCommand::ActivateTier(tier) => {
                    self.tier_triggers.write(TierTriggersActivated { owner: entity, tier });
                }
            }
        }
    }
}
