//! Порты между поведенческими автоматами и хостом.
//!
//! `SensorPort`: probe-запросы (raycast) к миру хоста.
//! `ActuatorPort`: команды хосту: движение, поворот, снаряды, урон, feedback.
//!
//! Автоматы не знают про ECS: ECS-системы строят `WorldSensor` из
//! коллайдеров и применяют записанные в `CommandBuffer` команды.

use bevy::prelude::*;

use crate::components::{CollisionLayer, Facing};

/// Дистанция probe на препятствие впереди
pub const OBSTACLE_PROBE_DISTANCE: f32 = 0.5;

/// Дистанция probe на пол (вниз)
pub const GROUND_PROBE_DISTANCE: f32 = 0.1;

/// Результат успешного probe
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct HitInfo {
    pub entity: Entity,
    pub point: Vec2,
    pub distance: f32,
}

pub trait SensorPort {
    /// Raycast от `origin` по `direction` (нормализован) до `max_distance`.
    /// Возвращает ближайший коллайдер слоя `layer`.
    fn range_probe(
        &self,
        origin: Vec2,
        direction: Vec2,
        max_distance: f32,
        layer: CollisionLayer,
    ) -> Option<HitInfo>;

    /// Есть ли стена/препятствие в `OBSTACLE_PROBE_DISTANCE` впереди
    fn obstacle_probe(&self, origin: Vec2, direction: Vec2) -> bool {
        self.range_probe(
            origin,
            direction,
            OBSTACLE_PROBE_DISTANCE,
            CollisionLayer::Environment,
        )
        .is_some()
    }

    /// Есть ли пол в `GROUND_PROBE_DISTANCE` под `origin`
    fn ground_probe(&self, origin: Vec2) -> bool {
        self.range_probe(
            origin,
            Vec2::NEG_Y,
            GROUND_PROBE_DISTANCE,
            CollisionLayer::Environment,
        )
        .is_some()
    }
}

/// Визуальный/звуковой feedback, который проигрывает хост
#[derive(Debug, Clone, Copy, PartialEq, Eq, Reflect)]
pub enum Feedback {
    /// Спрайт окрашен (начало вспышки урона)
    FlashOn,
    /// Спрайт вернулся к нормальному цвету
    FlashOff,
    /// Звук смерти
    Death,
    /// Дверь закрылась: смена спрайта + звук
    DoorClosed,
}

/// Тир здоровья босса (1: после первого урона, 2: после второго)
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Reflect)]
pub struct HealthTier(pub u8);

pub trait ActuatorPort {
    fn move_by(&mut self, delta: Vec2);
    fn set_facing(&mut self, facing: Facing);
    fn spawn_projectile(&mut self, position: Vec2, velocity: Vec2, lifetime: f32);
    /// Удар по цели (типизированная замена message-dispatch "DamageTaken")
    fn notify_damage(&mut self, target: Entity);
    fn play_feedback(&mut self, kind: Feedback);
    /// Включить scene-триггеры, привязанные к тиру
    fn activate_tier_triggers(&mut self, tier: HealthTier);
}

/// Записанная команда актуатора
#[derive(Debug, Clone, PartialEq)]
pub enum ActuatorCommand {
    Move(Vec2),
    Face(Facing),
    SpawnProjectile {
        position: Vec2,
        velocity: Vec2,
        lifetime: f32,
    },
    Damage(Entity),
    Feedback(Feedback),
    ActivateTier(HealthTier),
}

/// Актуатор, записывающий команды в порядке вызова
#[derive(Debug, Default, Clone)]
pub struct CommandBuffer {
    commands: Vec<ActuatorCommand>,
}

impl CommandBuffer {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn commands(&self) -> &[ActuatorCommand] {
        &self.commands
    }

    pub fn is_empty(&self) -> bool {
        self.commands.is_empty()
    }

    pub fn drain(&mut self) -> std::vec::Drain<'_, ActuatorCommand> {
        self.commands.drain(..)
    }

    /// Суммарное смещение всех Move команд
    pub fn total_movement(&self) -> Vec2 {
        self.commands
            .iter()
            .filter_map(|command| match command {
                ActuatorCommand::Move(delta) => Some(*delta),
                _ => None,
            })
            .sum()
    }

    pub fn damaged_targets(&self) -> Vec<Entity> {
        self.commands
            .iter()
            .filter_map(|command| match command {
                ActuatorCommand::Damage(target) => Some(*target),
                _ => None,
            })
            .collect()
    }

    pub fn feedback(&self) -> Vec<Feedback> {
        self.commands
            .iter()
            .filter_map(|command| match command {
                ActuatorCommand::Feedback(kind) => Some(*kind),
                _ => None,
            })
            .collect()
    }
}

impl ActuatorPort for CommandBuffer {
    fn move_by(&mut self, delta: Vec2) {
        self.commands.push(ActuatorCommand::Move(delta));
    }

    fn set_facing(&mut self, facing: Facing) {
        self.commands.push(ActuatorCommand::Face(facing));
    }

    fn spawn_projectile(&mut self, position: Vec2, velocity: Vec2, lifetime: f32) {
        self.commands.push(ActuatorCommand::SpawnProjectile {
            position,
            velocity,
            lifetime,
        });
    }

    fn notify_damage(&mut self, target: Entity) {
        self.commands.push(ActuatorCommand::Damage(target));
    }

    fn play_feedback(&mut self, kind: Feedback) {
        self.commands.push(ActuatorCommand::Feedback(kind));
    }

    fn activate_tier_triggers(&mut self, tier: HealthTier) {
        self.commands.push(ActuatorCommand::ActivateTier(tier));
    }
}
