//! ECS Components для игровых entity
//!
//! Организация по доменам:
//! - actor: направление взгляда и здоровье (Facing, Health, WeaponHealth)
//! - world: AABB коллайдеры и слои для probe-запросов (Collider2D, CollisionLayer)

pub mod actor;
pub mod world;

// Re-exports для удобного импорта
pub use actor::*;
pub use world::*;
