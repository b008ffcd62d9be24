//! Системы босса: пробуждение и тик approach/flee.

use bevy::prelude::*;

use crate::ai::approach_flee::ApproachFleeStateMachine;
use crate::ai::events::WakeUp;
use crate::ai::ports::CommandBuffer;
use crate::ai::systems::actuation::ActuatorOutputs;
use crate::combat::damage::Dead;
use crate::components::Facing;

/// Явная ссылка на цель босса (вместо глобального поиска игрока)
#[derive(Component, Debug, Clone, Copy, Reflect)]
#[reflect(Component)]
pub struct BossTarget {
    pub entity: Entity,
}

/// Система: WakeUp → автомат босса начинает бой
pub fn handle_wake_up(
    mut events: EventReader<WakeUp>,
    mut bosses: Query<&mut ApproachFleeStateMachine>,
) {
    for event in events.read() {
        let Ok(mut machine) = bosses.get_mut(event.boss) else {
            crate::log_warning(&format!("WakeUp: {:?} is not a boss", event.boss));
            continue;
        };
        machine.wake_up();
    }
}

/// Система: ApproachFlee тик
///
/// Цель без Transform (despawned): босс пропускает тик.
pub fn tick_approach_flee(
    mut bosses: Query<
        (
            Entity,
            &mut ApproachFleeStateMachine,
            &BossTarget,
            &mut Transform,
            &mut Facing,
        ),
        Without<Dead>,
    >,
    targets: Query<&Transform, Without<ApproachFleeStateMachine>>,
    time: Res<Time<Fixed>>,
    mut outputs: ActuatorOutputs,
) {
    let delta = time.delta_secs();

    for (entity, mut machine, target, mut transform, mut facing) in bosses.iter_mut() {
        let Ok(target_transform) = targets.get(target.entity) else {
            continue;
        };

        let mut buffer = CommandBuffer::new();
        machine.tick(
            delta,
            transform.translation.truncate(),
            target_transform.translation.truncate(),
            &mut buffer,
        );
        outputs.apply(
            entity,
            &mut buffer,
            &mut transform,
            &mut facing,
        );
    }
}
