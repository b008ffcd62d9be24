//! Patrol → windup → swing автомат для наземного врага.
//!
//! ```text
//! Patrolling ──(цель в melee range && cooldown <= 0)──► PreparingToSwing
//!     ▲                                                     │
//!     └────────────(замах истёк: melee scan + урон)─────────┘
//! ```
//!
//! Cooldown выставляется в момент начала атаки (`time_to_swing +
//! weapon_swing_cooldown`) и уменьшается каждый тик в любом состоянии.

use bevy::prelude::*;

use crate::ai::components::{PatrolAttackConfig, PatrolAttackState};
use crate::ai::ports::{ActuatorPort, SensorPort};
use crate::combat::melee::{melee_scan, ProbeOrigins};
use crate::components::{Aabb2, Facing};

/// Разворот патруля: стена впереди ИЛИ нет пола впереди
pub fn should_turn(obstacle_ahead: bool, ground_ahead: bool) -> bool {
    obstacle_ahead || !ground_ahead
}

#[derive(Component, Debug, Clone, Reflect)]
#[reflect(Component)]
pub struct PatrolAttackStateMachine {
    pub config: PatrolAttackConfig,
    state: PatrolAttackState,
    attack_cooldown: f32,
    facing: Facing,
}

impl Default for PatrolAttackStateMachine {
    fn default() -> Self {
        Self::new(PatrolAttackConfig::default(), Facing::Right)
    }
}

impl PatrolAttackStateMachine {
    pub fn new(config: PatrolAttackConfig, facing: Facing) -> Self {
        Self {
            config,
            state: PatrolAttackState::Patrolling,
            attack_cooldown: 0.0,
            facing,
        }
    }

    pub fn state(&self) -> PatrolAttackState {
        self.state
    }

    pub fn attack_cooldown(&self) -> f32 {
        self.attack_cooldown
    }

    pub fn facing(&self) -> Facing {
        self.facing
    }

    pub fn is_winding_up(&self) -> bool {
        matches!(self.state, PatrolAttackState::PreparingToSwing { .. })
    }

    /// Один тик поведения.
    ///
    /// `bounds`: текущий AABB юнита (позицией владеет хост).
    pub fn tick(
        &mut self,
        dt: f32,
        bounds: Aabb2,
        sensors: &impl SensorPort,
        actuators: &mut impl ActuatorPort,
    ) {
        self.attack_cooldown -= dt;

        match self.state {
            PatrolAttackState::Patrolling => {
                let target_in_range =
                    melee_scan(&bounds, self.facing, self.config.melee_range, sensors).is_some();

                if target_in_range {
                    if self.attack_cooldown <= 0.0 {
                        self.begin_windup();
                    }
                    // cooldown > 0: стоим и ждём
                } else {
                    self.patrol(dt, &bounds, sensors, actuators);
                }
            }

            PatrolAttackState::PreparingToSwing { windup_remaining } => {
                let remaining = windup_remaining - dt;
                if remaining > 0.0 {
                    self.state = PatrolAttackState::PreparingToSwing {
                        windup_remaining: remaining,
                    };
                } else {
                    self.swing(&bounds, sensors, actuators);
                    self.state = PatrolAttackState::Patrolling;
                }
            }
        }
    }

    fn begin_windup(&mut self) {
        self.state = PatrolAttackState::PreparingToSwing {
            windup_remaining: self.config.time_to_swing,
        };
        self.attack_cooldown = self.config.attack_cooldown();
        crate::log(&format!(
            "PatrolAttack: Patrolling → PreparingToSwing (windup {:.2}s, cooldown {:.2}s)",
            self.config.time_to_swing, self.attack_cooldown
        ));
    }

    /// Удар: независимый от проверки дальности melee scan.
    /// Цель могла уйти за время замаха: тогда промах.
    fn swing(&self, bounds: &Aabb2, sensors: &impl SensorPort, actuators: &mut impl ActuatorPort) {
        match melee_scan(bounds, self.facing, self.config.melee_range, sensors) {
            Some(hit) => {
                crate::log(&format!("PatrolAttack: swing hit {:?} at {:.2}", hit.entity, hit.distance));
                actuators.notify_damage(hit.entity);
            }
            None => crate::log("PatrolAttack: swing missed"),
        }
    }

    fn patrol(
        &mut self,
        dt: f32,
        bounds: &Aabb2,
        sensors: &impl SensorPort,
        actuators: &mut impl ActuatorPort,
    ) {
        let origins = ProbeOrigins::from_bounds(bounds);
        let ahead = self.facing.as_vec2();

        let obstacle_ahead = sensors.obstacle_probe(origins.center_edge(self.facing), ahead);
        let ground_ahead = sensors.ground_probe(origins.ground_probe_origin(self.facing));

        if should_turn(obstacle_ahead, ground_ahead) {
            self.facing = self.facing.flipped();
            actuators.set_facing(self.facing);
        } else {
            actuators.move_by(ahead * self.config.walk_speed * dt);
        }
    }
}
