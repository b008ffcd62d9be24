//! AI Events: сигналы между сценой хоста и поведенческими автоматами
//!
//! Входящие: WakeUp (сцена начинает бой с боссом).
//! Исходящие: FeedbackRequested (спрайт/звук), TierTriggersActivated (сцена).

use bevy::prelude::*;

use crate::ai::ports::{Feedback, HealthTier};

/// Сцена будит босса ("fight started")
#[derive(Event, Debug, Clone)]
pub struct WakeUp {
    pub boss: Entity,
}

/// Хост должен проиграть feedback на entity
#[derive(Event, Debug, Clone, PartialEq)]
pub struct FeedbackRequested {
    pub entity: Entity,
    pub kind: Feedback,
}

/// Босс `owner` перешёл в тир `tier`: включить привязанные триггеры
#[derive(Event, Debug, Clone, PartialEq)]
pub struct TierTriggersActivated {
    pub owner: Entity,
    pub tier: HealthTier,
}
