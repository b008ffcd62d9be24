//! TwoPiece Simulation Core
//!
//! ECS-симуляция врагов 2D платформера на Bevy 0.16 (headless).
//!
//! Поведение врагов: чистые автоматы (`ai::patrol_attack`, `ai::approach_flee`),
//! которые видят мир через `SensorPort` и действуют через `ActuatorPort`.
//! ECS слой (FixedUpdate) строит сенсоры из AABB коллайдеров и применяет команды.

use std::time::Duration;

use bevy::prelude::*;
use rand::SeedableRng;
use rand_chacha::ChaCha8Rng;

// Публичные модули
pub mod actor;
pub mod ai;
pub mod combat;
pub mod components;
pub mod config;
pub mod logger;
pub mod physics;
pub mod scene;

// Re-export базовых компонентов для удобства
pub use actor::{basic_enemy_bundle, boss_bundle, player_bundle, Player};
pub use ai::{
    AIPlugin, ApproachFleeConfig, ApproachFleeState, ApproachFleeStateMachine, BossTarget,
    Feedback, FeedbackRequested, HealthTier, PatrolAttackConfig, PatrolAttackState,
    PatrolAttackStateMachine, TierTriggersActivated, WakeUp,
};
pub use combat::{CombatPlugin, DamageKind, DamageTaken, Dead, DespawnAfter, EntityDied, Projectile};
pub use components::*;
pub use config::{Tuning, TuningError};
pub use logger::{
    init_logger, log, log_error, log_info, log_warning, log_with_level, set_log_level, set_logger,
    set_logger_if_needed, LogLevel, LogPrinter,
};
pub use scene::{Door, ScenePlugin, TierTrigger};

/// Порядок фаз fixed-тика
///
/// 1. Reactions: урон, накопленный до тика (игрок, враги, босс)
/// 2. Behaviour: пробуждение босса, тик автоматов, применение команд
/// 3. Movement: снаряды, отложенный деспавн
/// 4. Scene: триггеры тиров, двери
#[derive(SystemSet, Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum SimulationSet {
    Reactions,
    Behaviour,
    Movement,
    Scene,
}

/// Главный plugin симуляции (объединяет все подсистемы)
pub struct SimulationPlugin {
    /// Шаг FixedUpdate (ненулевой)
    pub timestep: Duration,
}

impl Default for SimulationPlugin {
    fn default() -> Self {
        Self {
            timestep: Duration::from_secs_f64(1.0 / config::DEFAULT_FIXED_HZ),
        }
    }
}

impl SimulationPlugin {
    pub fn from_tuning(tuning: &Tuning) -> Result<Self, TuningError> {
        Ok(Self {
            timestep: tuning.fixed_timestep()?,
        })
    }
}

impl Plugin for SimulationPlugin {
    fn build(&self, app: &mut App) {
        app.insert_resource(Time::<Fixed>::from_duration(self.timestep))
            .configure_sets(
                FixedUpdate,
                (
                    SimulationSet::Reactions,
                    SimulationSet::Behaviour,
                    SimulationSet::Movement,
                    SimulationSet::Scene,
                )
                    .chain(), // Последовательное выполнение для детерминизма
            )
            .add_plugins((CombatPlugin, AIPlugin, ScenePlugin));
    }
}

/// Детерминистичный RNG resource (seeded)
#[derive(Resource)]
pub struct DeterministicRng {
    pub rng: ChaCha8Rng,
    pub seed: u64,
}

impl DeterministicRng {
    pub fn new(seed: u64) -> Self {
        Self {
            rng: ChaCha8Rng::seed_from_u64(seed),
            seed,
        }
    }
}

/// Создаёт minimal Bevy App для headless симуляции
pub fn create_headless_app(seed: u64) -> App {
    let mut app = App::new();
    init_logger();
    app.add_plugins(MinimalPlugins)
        .insert_resource(DeterministicRng::new(seed))
        .add_plugins(SimulationPlugin::default());

    app
}

/// Snapshot мира для сравнения детерминизма
pub fn world_snapshot<T: Component>(world: &mut World) -> Vec<u8>
where
    T: std::fmt::Debug,
{
    let mut snapshot = Vec::new();

    let mut query = world.query::<(Entity, &T)>();
    let mut entities: Vec<_> = query.iter(world).collect();

    // Сортируем по Entity ID для детерминизма
    entities.sort_by_key(|(entity, _)| entity.index());

    // Сериализуем в байты через Debug (простейший способ)
    for (entity, component) in entities {
        snapshot.extend_from_slice(&entity.index().to_le_bytes());
        snapshot.extend_from_slice(format!("{:?}", component).as_bytes());
    }

    snapshot
}
