//! AI systems (ECS adapter для автоматов)

pub mod actuation;
pub mod boss;
pub mod patrol;
pub mod reactions;

// Re-export all systems
pub use actuation::*;
pub use boss::*;
pub use patrol::*;
pub use reactions::*;
