//! Tuning: параметры автоматов и частота fixed-тика из JSON.
//!
//! Все поля необязательны (`#[serde(default)]`), значения по умолчанию
//! совпадают с настройками исходной сцены.

use std::path::Path;
use std::time::Duration;

use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::ai::components::{ApproachFleeConfig, PatrolAttackConfig};

/// Частота FixedUpdate по умолчанию (Hz)
pub const DEFAULT_FIXED_HZ: f64 = 60.0;

#[derive(Debug, Error)]
pub enum TuningError {
    #[error("failed to read tuning file: {0}")]
    Io(#[from] std::io::Error),

    #[error("failed to parse tuning JSON: {0}")]
    Parse(#[from] serde_json::Error),

    #[error("invalid tuning value `{field}`: {reason}")]
    Invalid { field: &'static str, reason: String },
}

impl TuningError {
    fn invalid(field: &'static str, reason: impl Into<String>) -> Self {
        Self::Invalid {
            field,
            reason: reason.into(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Tuning {
    pub fixed_hz: f64,
    pub patrol_attack: PatrolAttackConfig,
    pub approach_flee: ApproachFleeConfig,
}

impl Default for Tuning {
    fn default() -> Self {
        Self {
            fixed_hz: DEFAULT_FIXED_HZ,
            patrol_attack: PatrolAttackConfig::default(),
            approach_flee: ApproachFleeConfig::default(),
        }
    }
}

impl Tuning {
    /// Парсинг + валидация
    pub fn from_json_str(json: &str) -> Result<Self, TuningError> {
        let tuning: Tuning = serde_json::from_str(json)?;
        tuning.validate()?;
        Ok(tuning)
    }

    pub fn load(path: impl AsRef<Path>) -> Result<Self, TuningError> {
        let json = std::fs::read_to_string(path)?;
        Self::from_json_str(&json)
    }

    /// Шаг FixedUpdate для `fixed_hz`.
    ///
    /// Частота, для которой шаг не представим в `Duration` (слишком мал или
    /// округляется до нуля), отклоняется здесь, а не паникой в Bevy.
    pub fn fixed_timestep(&self) -> Result<Duration, TuningError> {
        // NaN тоже отклоняется: сравнения с NaN ложны
        if !(self.fixed_hz > 0.0) {
            return Err(TuningError::invalid("fixed_hz", "must be positive"));
        }
        match Duration::try_from_secs_f64(1.0 / self.fixed_hz) {
            Ok(timestep) if !timestep.is_zero() => Ok(timestep),
            _ => Err(TuningError::invalid(
                "fixed_hz",
                format!("{} Hz has no representable timestep", self.fixed_hz),
            )),
        }
    }

    pub fn validate(&self) -> Result<(), TuningError> {
        self.fixed_timestep()?;

        let patrol = &self.patrol_attack;
        non_negative("patrol_attack.walk_speed", patrol.walk_speed)?;
        non_negative("patrol_attack.melee_range", patrol.melee_range)?;
        non_negative("patrol_attack.time_to_swing", patrol.time_to_swing)?;
        non_negative("patrol_attack.weapon_swing_cooldown", patrol.weapon_swing_cooldown)?;
        if patrol.club_health == 0 || patrol.sword_health == 0 {
            return Err(TuningError::invalid(
                "patrol_attack.club_health",
                "weapon health counters must start above zero",
            ));
        }

        let boss = &self.approach_flee;
        non_negative("approach_flee.walk_speed", boss.walk_speed)?;
        non_negative("approach_flee.projectile_speed", boss.projectile_speed)?;
        non_negative("approach_flee.projectile_lifetime", boss.projectile_lifetime)?;
        non_negative("approach_flee.death_linger", boss.death_linger)?;
        if !(boss.left_bound < boss.right_bound) {
            return Err(TuningError::invalid(
                "approach_flee.left_bound",
                format!("{} is not below right_bound {}", boss.left_bound, boss.right_bound),
            ));
        }
        let [first, second] = boss.jump_heights;
        if !(first > 0.0 && second > first) {
            return Err(TuningError::invalid(
                "approach_flee.jump_heights",
                format!("expected positive ascending heights, got [{}, {}]", first, second),
            ));
        }

        Ok(())
    }
}

fn non_negative(field: &'static str, value: f32) -> Result<(), TuningError> {
    if value >= 0.0 {
        Ok(())
    } else {
        Err(TuningError::invalid(field, format!("{} is negative", value)))
    }
}
