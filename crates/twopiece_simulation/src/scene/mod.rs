//! Scene: триггеры тиров босса и двери арены.
//!
//! Босс после урона активирует триггеры своего тира. Активный триггер с
//! `Door` закрывает дверь один раз: коллайдер включается (блокирует probe
//! патруля), дочерние entity (открытый спрайт) удаляются, хост получает
//! `Feedback::DoorClosed`.

use bevy::prelude::*;

use crate::ai::events::{FeedbackRequested, TierTriggersActivated};
use crate::ai::ports::{Feedback, HealthTier};
use crate::components::Collider2D;
use crate::SimulationSet;

/// Триггер, привязанный к тиру здоровья босса `owner`
#[derive(Component, Debug, Clone, Copy, PartialEq, Reflect)]
#[reflect(Component)]
pub struct TierTrigger {
    pub owner: Entity,
    pub tier: HealthTier,
    pub active: bool,
}

impl TierTrigger {
    pub fn new(owner: Entity, tier: HealthTier) -> Self {
        Self {
            owner,
            tier,
            active: false,
        }
    }
}

/// Дверь, закрываемая своим `TierTrigger`
#[derive(Component, Debug, Clone, Copy, Default, PartialEq, Reflect)]
#[reflect(Component)]
pub struct Door {
    pub closed: bool,
}

/// Система: TierTriggersActivated → триггеры этого босса и тира активны
pub fn activate_tier_triggers(
    mut events: EventReader<TierTriggersActivated>,
    mut triggers: Query<&mut TierTrigger>,
) {
    for event in events.read() {
        for mut trigger in triggers.iter_mut() {
            if trigger.owner == event.owner && trigger.tier == event.tier && !trigger.active {
                trigger.active = true;
            }
        }
    }
}

/// Система: закрытие дверей с активным триггером (один раз)
pub fn close_doors(
    mut commands: Commands,
    mut doors: Query<(
        Entity,
        &TierTrigger,
        &mut Door,
        Option<&mut Collider2D>,
        Option<&Children>,
    )>,
    mut feedback: EventWriter<FeedbackRequested>,
) {
    for (entity, trigger, mut door, collider, children) in doors.iter_mut() {
        if !trigger.active || door.closed {
            continue;
        }
        door.closed = true;

        if let Some(mut collider) = collider {
            collider.enabled = true;
        }
        if let Some(children) = children {
            for child in children.to_vec() {
                commands.entity(child).despawn();
            }
        }

        feedback.write(FeedbackRequested {
            entity,
            kind: Feedback::DoorClosed,
        });
        crate::log_info(&format!(
            "Door {:?} closed (boss {:?}, tier {})",
            entity, trigger.owner, trigger.tier.0
        ));
    }
}

/// Scene Plugin: триггеры и двери после поведения юнитов
pub struct ScenePlugin;

impl Plugin for ScenePlugin {
    fn build(&self, app: &mut App) {
        app.register_type::<TierTrigger>()
            .register_type::<Door>()
            .add_systems(
                FixedUpdate,
                (activate_tier_triggers, close_doors)
                    .chain()
                    .in_set(SimulationSet::Scene),
            );
    }
}
