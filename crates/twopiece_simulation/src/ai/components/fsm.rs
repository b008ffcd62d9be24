//! FSM компоненты: состояния автоматов и их параметры.

use bevy::prelude::*;
use serde::{Deserialize, Serialize};

/// Состояния патрульного врага
#[derive(Debug, Clone, Copy, PartialEq, Reflect)]
pub enum PatrolAttackState {
    /// Ходит вперёд, разворачивается у стен и обрывов
    Patrolling,

    /// Замах: атака начата, урон ещё не нанесён
    PreparingToSwing {
        /// Время до удара (секунды)
        windup_remaining: f32,
    },
}

impl Default for PatrolAttackState {
    fn default() -> Self {
        Self::Patrolling
    }
}

/// Состояния босса
#[derive(Debug, Clone, Copy, PartialEq, Reflect)]
pub enum ApproachFleeState {
    /// Подходит к игроку по горизонтали
    Approaching,

    /// "Spooked": игрок слишком близко по вертикали, босс убегает.
    /// Липкое состояние: выходит только через Jumping.
    Fleeing,

    /// Прыжок после урона: поднимается до высоты тира
    Jumping {
        target_height: f32,
    },
}

impl Default for ApproachFleeState {
    fn default() -> Self {
        Self::Approaching
    }
}

/// Параметры патрульного врага
#[derive(Debug, Clone, PartialEq, Reflect, Serialize, Deserialize)]
#[serde(default)]
pub struct PatrolAttackConfig {
    /// Скорость патруля (units/sec)
    pub walk_speed: f32,
    /// Дальность melee scan
    pub melee_range: f32,
    /// Длительность замаха (секунды)
    pub time_to_swing: f32,
    /// Восстановление после удара (секунды)
    pub weapon_swing_cooldown: f32,
    /// Стартовые счётчики WeaponHealth
    pub club_health: u32,
    pub sword_health: u32,
}

impl Default for PatrolAttackConfig {
    fn default() -> Self {
        Self {
            walk_speed: 1.0,
            melee_range: 1.0,
            time_to_swing: 1.0,
            weapon_swing_cooldown: 1.0,
            club_health: 2,
            sword_health: 1,
        }
    }
}

impl PatrolAttackConfig {
    /// Cooldown, выставляемый в момент начала атаки (замах + восстановление)
    pub fn attack_cooldown(&self) -> f32 {
        self.time_to_swing + self.weapon_swing_cooldown
    }
}

/// Параметры босса
#[derive(Debug, Clone, PartialEq, Reflect, Serialize, Deserialize)]
#[serde(default)]
pub struct ApproachFleeConfig {
    /// Базовая скорость (units/sec); бегство: x3
    pub walk_speed: f32,
    /// Левее этой границы босс идёт к игроку напрямую
    pub left_bound: f32,
    /// Правее этой границы босс перестаёт убегать
    pub right_bound: f32,
    /// Высоты прыжков по тирам: [после 1-го урона, после 2-го]
    pub jump_heights: [f32; 2],
    /// Снаряд спавнится когда счётчик тиков превышает порог
    pub fire_threshold: u32,
    pub initial_fire_counter: u32,
    /// Смещение точки спавна снаряда вниз от центра босса
    pub projectile_drop: f32,
    /// Скорость снаряда вниз (units/sec)
    pub projectile_speed: f32,
    pub projectile_lifetime: f32,
    /// Сколько труп живёт после смерти (звук смерти)
    pub death_linger: f32,
}

impl Default for ApproachFleeConfig {
    fn default() -> Self {
        Self {
            walk_speed: 6.0,
            left_bound: -10.0,
            right_bound: 10.0,
            jump_heights: [82.5, 101.5],
            fire_threshold: 60,
            initial_fire_counter: 40,
            projectile_drop: 0.5,
            projectile_speed: 4.0,
            projectile_lifetime: 7.0,
            death_linger: 1.0,
        }
    }
}
