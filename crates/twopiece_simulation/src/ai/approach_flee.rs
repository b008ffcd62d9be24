//! Approach / flee автомат босса.
//!
//! Порядок тика:
//! 1. Вспышка урона (таймер, независимо от боя)
//! 2. Пока бой не начат (`wake_up`) или босс уничтожен: ничего
//! 3. Jumping: подъём до высоты тира, движение по X подавлено
//!    Approaching/Fleeing: решение по позиции игрока
//! 4. Счётчик стрельбы (независимо от состояния)

use bevy::prelude::*;

use crate::ai::components::{ApproachFleeConfig, ApproachFleeState};
use crate::ai::ports::{ActuatorPort, Feedback, HealthTier};
use crate::components::Facing;

/// |Δy| строго меньше: игрок "сверху/снизу", босс пугается
pub const VERTICAL_SPOOK_DISTANCE: f32 = 0.6;

/// |Δx| строго меньше: босс уже под игроком, не двигается
pub const HORIZONTAL_SETTLE_DISTANCE: f32 = 0.2;

pub const FLEE_SPEED_MULTIPLIER: f32 = 3.0;

/// Здоровье босса. Тиры и высоты прыжков привязаны к этому числу.
pub const BOSS_MAX_HEALTH: u32 = 3;

pub const FLASH_COUNT: u32 = 2;

/// Длительность каждой фазы вспышки (окрашен / нормальный)
pub const FLASH_PHASE_SECONDS: f32 = 0.1;

/// Сравнение модулей координат (как в исходной сцене: арена в положительных y)
pub fn is_vertically_close(position: Vec2, target: Vec2) -> bool {
    (target.y.abs() - position.y.abs()).abs() < VERTICAL_SPOOK_DISTANCE
}

pub fn is_horizontally_close(position: Vec2, target: Vec2) -> bool {
    (target.x.abs() - position.x.abs()).abs() < HORIZONTAL_SETTLE_DISTANCE
}

/// Тир после урона: 3→2 даёт тир 1, 2→1 даёт тир 2
pub fn tier_for_health(health: u32) -> Option<HealthTier> {
    match health {
        2 => Some(HealthTier(1)),
        1 => Some(HealthTier(2)),
        _ => None,
    }
}

/// Вспышка урона: FlashOn / FlashOff по таймеру, `FLASH_COUNT` раз
#[derive(Debug, Clone, PartialEq, Reflect)]
pub struct FlashSequence {
    flashes_left: u32,
    tinted: bool,
    timer: f32,
}

impl FlashSequence {
    /// Начинает в окрашенной фазе (FlashOn уже отправлен вызывающим)
    pub fn new(count: u32) -> Self {
        Self {
            flashes_left: count,
            tinted: true,
            timer: FLASH_PHASE_SECONDS,
        }
    }

    /// Возвращает `true` когда последовательность закончилась
    pub fn advance(&mut self, dt: f32, actuators: &mut impl ActuatorPort) -> bool {
        self.timer -= dt;
        if self.timer > 0.0 {
            return false;
        }

        if self.tinted {
            actuators.play_feedback(Feedback::FlashOff);
            self.tinted = false;
            self.flashes_left = self.flashes_left.saturating_sub(1);
            if self.flashes_left == 0 {
                return true;
            }
        } else {
            actuators.play_feedback(Feedback::FlashOn);
            self.tinted = true;
        }
        self.timer = FLASH_PHASE_SECONDS;
        false
    }
}

/// Результат `apply_damage`
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DamageOutcome {
    Hurt { tier: HealthTier },
    Destroyed,
    /// Босс уже уничтожен: урон игнорируется
    Ignored,
}

#[derive(Component, Debug, Clone, Reflect)]
#[reflect(Component)]
pub struct ApproachFleeStateMachine {
    pub config: ApproachFleeConfig,
    state: ApproachFleeState,
    awake: bool,
    health: u32,
    last_facing: Facing,
    fire_counter: u32,
    flash: Option<FlashSequence>,
    destroyed: bool,
}

impl Default for ApproachFleeStateMachine {
    fn default() -> Self {
        Self::new(ApproachFleeConfig::default())
    }
}

impl ApproachFleeStateMachine {
    pub fn new(config: ApproachFleeConfig) -> Self {
        let fire_counter = config.initial_fire_counter;
        Self {
            config,
            state: ApproachFleeState::Approaching,
            awake: false,
            health: BOSS_MAX_HEALTH,
            last_facing: Facing::Left,
            fire_counter,
            flash: None,
            destroyed: false,
        }
    }

    pub fn state(&self) -> ApproachFleeState {
        self.state
    }

    pub fn health(&self) -> u32 {
        self.health
    }

    pub fn is_awake(&self) -> bool {
        self.awake
    }

    pub fn is_destroyed(&self) -> bool {
        self.destroyed
    }

    pub fn is_spooked(&self) -> bool {
        self.state == ApproachFleeState::Fleeing
    }

    pub fn is_flashing(&self) -> bool {
        self.flash.is_some()
    }

    pub fn fire_counter(&self) -> u32 {
        self.fire_counter
    }

    pub fn last_facing(&self) -> Facing {
        self.last_facing
    }

    /// Сигнал "бой начался" от сцены
    pub fn wake_up(&mut self) {
        if !self.awake {
            self.awake = true;
            crate::log_info("Boss: fight started");
        }
    }

    pub fn tick(
        &mut self,
        dt: f32,
        position: Vec2,
        target: Vec2,
        actuators: &mut impl ActuatorPort,
    ) {
        if self.destroyed {
            return;
        }

        if let Some(flash) = self.flash.as_mut() {
            if flash.advance(dt, actuators) {
                self.flash = None;
            }
        }

        if !self.awake {
            return;
        }

        match self.state {
            ApproachFleeState::Jumping { target_height } => {
                self.ascend(dt, position, target_height, actuators);
            }
            ApproachFleeState::Approaching | ApproachFleeState::Fleeing => {
                self.decide(dt, position, target, actuators);
            }
        }

        self.advance_fire_counter(position, actuators);
    }

    /// Урон боссу: -1 здоровья.
    ///
    /// 0 → feedback смерти, босс уничтожен (вспышка не проигрывается).
    /// Иначе → вспышка, прыжок на высоту тира, сброс счётчика стрельбы,
    /// активация триггеров тира.
    pub fn apply_damage(&mut self, actuators: &mut impl ActuatorPort) -> DamageOutcome {
        if self.destroyed {
            return DamageOutcome::Ignored;
        }

        self.health = self.health.saturating_sub(1);

        let Some(tier) = tier_for_health(self.health) else {
            self.destroyed = true;
            self.flash = None;
            actuators.play_feedback(Feedback::Death);
            crate::log_info("Boss: destroyed");
            return DamageOutcome::Destroyed;
        };

        actuators.play_feedback(Feedback::FlashOn);
        self.flash = Some(FlashSequence::new(FLASH_COUNT));

        let target_height = self.config.jump_heights[usize::from(tier.0) - 1];
        self.state = ApproachFleeState::Jumping { target_height };
        self.fire_counter = 0;
        actuators.activate_tier_triggers(tier);

        crate::log_info(&format!(
            "Boss: hit, health {} → tier {} (jump to {:.1})",
            self.health, tier.0, target_height
        ));
        DamageOutcome::Hurt { tier }
    }

    fn ascend(
        &mut self,
        dt: f32,
        position: Vec2,
        target_height: f32,
        actuators: &mut impl ActuatorPort,
    ) {
        let remaining = target_height - position.y;
        if remaining > 0.0 {
            let step = (self.config.walk_speed * dt).min(remaining);
            actuators.move_by(Vec2::Y * step);
            if step < remaining {
                return;
            }
        }

        // Долетел: обычная логика со следующего тика, испуг сброшен
        self.state = ApproachFleeState::Approaching;
        crate::log("Boss: Jumping → Approaching");
    }

    fn decide(&mut self, dt: f32, position: Vec2, target: Vec2, actuators: &mut impl ActuatorPort) {
        let toward = Facing::toward(position.x, target.x);

        if is_vertically_close(position, target) || self.state == ApproachFleeState::Fleeing {
            if self.state != ApproachFleeState::Fleeing {
                self.state = ApproachFleeState::Fleeing;
                crate::log("Boss: Approaching → Fleeing");
            }

            if position.x < self.config.right_bound {
                let away = toward.flipped();
                self.face(away, actuators);
                let speed = self.config.walk_speed * FLEE_SPEED_MULTIPLIER;
                actuators.move_by(self.last_facing.as_vec2() * speed * dt);
            }
            return;
        }

        if is_horizontally_close(position, target) {
            return;
        }

        if position.x > self.config.left_bound {
            actuators.move_by(toward.as_vec2() * self.config.walk_speed * dt);
            // Спрайт босса нарисован смотрящим влево
            self.face(toward.flipped(), actuators);
        } else if position.x < target.x {
            actuators.move_by(Vec2::X * self.config.walk_speed * dt);
            self.face(Facing::Right, actuators);
        }
    }

    fn advance_fire_counter(&mut self, position: Vec2, actuators: &mut impl ActuatorPort) {
        self.fire_counter += 1;
        if self.fire_counter > self.config.fire_threshold {
            let spawn_at = position - Vec2::Y * self.config.projectile_drop;
            let velocity = Vec2::NEG_Y * self.config.projectile_speed;
            actuators.spawn_projectile(spawn_at, velocity, self.config.projectile_lifetime);
            self.fire_counter = 0;
        }
    }

    fn face(&mut self, facing: Facing, actuators: &mut impl ActuatorPort) {
        if self.last_facing != facing {
            actuators.set_facing(facing);
        }
        self.last_facing = facing;
    }
}
