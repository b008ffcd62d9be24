//! Система: тик патрульных врагов.

use bevy::prelude::*;

use crate::ai::patrol_attack::PatrolAttackStateMachine;
use crate::ai::ports::CommandBuffer;
use crate::ai::systems::actuation::ActuatorOutputs;
use crate::combat::damage::Dead;
use crate::components::{Collider2D, Facing};
use crate::physics::{sensed_colliders, WorldSensor};

/// Система: PatrolAttack тик
///
/// 1. Snapshot коллайдеров на начало тика (все юниты видят один и тот же мир)
/// 2. Тик автомата каждого живого врага с `WorldSensor` (без своего коллайдера)
/// 3. Применение команд: движение, поворот, урон игроку
pub fn tick_patrol_attack(
    mut units: ParamSet<(
        Query<(Entity, &Transform, &Collider2D)>,
        Query<
            (
                Entity,
                &mut PatrolAttackStateMachine,
                &mut Transform,
                &Collider2D,
                &mut Facing,
            ),
            Without<Dead>,
        >,
    )>,
    time: Res<Time<Fixed>>,
    mut outputs: ActuatorOutputs,
) {
    let delta = time.delta_secs();
    let snapshot = sensed_colliders(units.p0().iter());

    let mut enemies = units.p1();
    for (entity, mut machine, mut transform, collider, mut facing) in enemies.iter_mut() {
        let bounds = collider.aabb_at(transform.translation.truncate());
        let sensor = WorldSensor::new(&snapshot).excluding(entity);
        let mut buffer = CommandBuffer::new();

        machine.tick(delta, bounds, &sensor, &mut buffer);
        outputs.apply(
            entity,
            &mut buffer,
            &mut transform,
            &mut facing,
        );
    }
}
