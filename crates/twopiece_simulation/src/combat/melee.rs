//! Melee scan: parallel horizontal probes across the upper half of a unit.
//!
//! # Probe layout
//!
//! ```text
//!            ┌──────────┐
//!  probe 4 → │          │ ──►   (above the upper half: see below)
//!  probe 3 → │          │ ──►   center.y + half_height / 2
//!  probe 2 → │          │ ──►
//!  probe 1 → │          │ ──►
//!  probe 0 → │    ●     │ ──►   center.y
//!            │          │
//!            └──────────┘
//! ```
//!
//! Spacing is `(half_height / 2) / (MELEE_PROBE_COUNT - 1)` and the loop runs
//! over `0..=MELEE_PROBE_COUNT`, so a scan casts **five** probes, the last one
//! sitting above the upper half. This matches the shipped enemy behaviour and
//! is kept as-is.

use bevy::prelude::*;

use crate::ai::ports::{HitInfo, SensorPort};
use crate::components::{Aabb2, CollisionLayer, Facing};

/// Inset applied to unit bounds before picking edge probe origins.
pub const SKIN_WIDTH: f32 = 0.15;

/// Nominal probe count used in the spacing formula.
pub const MELEE_PROBE_COUNT: usize = 4;

/// Probes actually cast per scan (`0..=MELEE_PROBE_COUNT`).
pub const MELEE_PROBES_CAST: usize = MELEE_PROBE_COUNT + 1;

/// How far ahead of the leading bottom corner the ground probe starts.
pub const GROUND_PROBE_LEAD: f32 = 0.1;

/// Edge origins for a unit's probes.
///
/// Center edges come from the skin-inset bounds (close-range checks);
/// bottom corners come from the full bounds (the ground probe is cast in
/// front of the unit anyway).
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ProbeOrigins {
    pub center_left: Vec2,
    pub center_right: Vec2,
    pub bottom_left: Vec2,
    pub bottom_right: Vec2,
}

impl ProbeOrigins {
    pub fn from_bounds(bounds: &Aabb2) -> Self {
        let inner = bounds.inset(SKIN_WIDTH);
        Self {
            center_left: Vec2::new(inner.min().x, inner.center.y),
            center_right: Vec2::new(inner.max().x, inner.center.y),
            bottom_left: bounds.min(),
            bottom_right: Vec2::new(bounds.max().x, bounds.min().y),
        }
    }

    pub fn center_edge(&self, facing: Facing) -> Vec2 {
        match facing {
            Facing::Left => self.center_left,
            Facing::Right => self.center_right,
        }
    }

    pub fn bottom_corner(&self, facing: Facing) -> Vec2 {
        match facing {
            Facing::Left => self.bottom_left,
            Facing::Right => self.bottom_right,
        }
    }

    /// Ground probe start: leading bottom corner, `GROUND_PROBE_LEAD` ahead.
    pub fn ground_probe_origin(&self, facing: Facing) -> Vec2 {
        self.bottom_corner(facing) + facing.as_vec2() * GROUND_PROBE_LEAD
    }
}

/// Vertical spacing between consecutive melee probes.
pub fn melee_probe_spacing(bounds: &Aabb2) -> f32 {
    (bounds.half_extents.y / 2.0) / (MELEE_PROBE_COUNT as f32 - 1.0)
}

/// Origins of every probe cast by a melee scan, bottom first.
pub fn melee_probe_origins(bounds: &Aabb2, facing: Facing) -> [Vec2; MELEE_PROBES_CAST] {
    let base = ProbeOrigins::from_bounds(bounds).center_edge(facing);
    let spacing = melee_probe_spacing(bounds);
    std::array::from_fn(|i| base + Vec2::Y * spacing * i as f32)
}

/// Casts the melee probes in `facing` up to `range` against the player layer.
///
/// Returns the hit of the first (lowest) probe that intersects a target.
pub fn melee_scan(
    bounds: &Aabb2,
    facing: Facing,
    range: f32,
    sensors: &impl SensorPort,
) -> Option<HitInfo> {
    melee_probe_origins(bounds, facing)
        .into_iter()
        .find_map(|origin| sensors.range_probe(origin, facing.as_vec2(), range, CollisionLayer::Player))
}
