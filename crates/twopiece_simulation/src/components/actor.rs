//! Базовые компоненты юнитов: Facing, Health, WeaponHealth

use bevy::prelude::*;
use serde::{Deserialize, Serialize};

/// Направление взгляда юнита (2D платформер: только влево/вправо)
#[derive(
    Component, Debug, Clone, Copy, PartialEq, Eq, Default, Reflect, Serialize, Deserialize,
)]
#[reflect(Component)]
pub enum Facing {
    Left,
    #[default]
    Right,
}

impl Facing {
    /// -1.0 для Left, 1.0 для Right
    pub fn sign(self) -> f32 {
        match self {
            Facing::Left => -1.0,
            Facing::Right => 1.0,
        }
    }

    pub fn as_vec2(self) -> Vec2 {
        Vec2::X * self.sign()
    }

    pub fn flipped(self) -> Self {
        match self {
            Facing::Left => Facing::Right,
            Facing::Right => Facing::Left,
        }
    }

    /// Направление от `from` к `to` по оси X (равные координаты → Right)
    pub fn toward(from: f32, to: f32) -> Self {
        if from > to {
            Facing::Left
        } else {
            Facing::Right
        }
    }
}

/// Здоровье игрока
///
/// Инвариант: 0 ≤ current ≤ max
#[derive(Component, Debug, Clone, Copy, Reflect)]
#[reflect(Component)]
pub struct Health {
    pub current: u32,
    pub max: u32,
}

impl Default for Health {
    fn default() -> Self {
        Self::new(3)
    }
}

impl Health {
    pub fn new(max: u32) -> Self {
        Self { current: max, max }
    }

    pub fn is_alive(&self) -> bool {
        self.current > 0
    }

    pub fn take_damage(&mut self, amount: u32) {
        self.current = self.current.saturating_sub(amount);
    }
}

/// Здоровье базового врага: отдельный счётчик на каждый тип оружия игрока
///
/// Меч и дубина бьют по разным счётчикам. Враг умирает когда любой
/// из счётчиков дошёл до нуля.
#[derive(Component, Debug, Clone, Copy, PartialEq, Eq, Reflect)]
#[reflect(Component)]
pub struct WeaponHealth {
    pub club: u32,
    pub sword: u32,
}

impl Default for WeaponHealth {
    fn default() -> Self {
        Self { club: 2, sword: 1 }
    }
}

impl WeaponHealth {
    pub fn new(club: u32, sword: u32) -> Self {
        Self { club, sword }
    }

    pub fn is_alive(&self) -> bool {
        self.club > 0 && self.sword > 0
    }

    pub fn hit_by_club(&mut self) {
        self.club = self.club.saturating_sub(1);
    }

    pub fn hit_by_sword(&mut self) {
        self.sword = self.sword.saturating_sub(1);
    }
}
