//! Tests for the patrol/attack state machine.

#[cfg(test)]
mod tests {
    use bevy::prelude::*;
    use rand::{Rng, SeedableRng};
    use rand_chacha::ChaCha8Rng;

    use crate::ai::components::{PatrolAttackConfig, PatrolAttackState};
    use crate::ai::patrol_attack::{should_turn, PatrolAttackStateMachine};
    use crate::ai::ports::{ActuatorCommand, CommandBuffer};
    use crate::combat::melee::melee_probe_origins;
    use crate::components::{Aabb2, CollisionLayer, Facing};
    use crate::physics::{SensedCollider, WorldSensor};

    const PLAYER: u32 = 100;

    fn bounds() -> Aabb2 {
        Aabb2::new(Vec2::new(0.0, 1.0), Vec2::new(0.5, 1.0))
    }

    fn collider(index: u32, center: Vec2, half: Vec2, layer: CollisionLayer) -> SensedCollider {
        SensedCollider {
            entity: Entity::from_raw(index),
            aabb: Aabb2::new(center, half),
            layer,
        }
    }

    fn wide_floor() -> SensedCollider {
        collider(1, Vec2::new(0.0, -0.5), Vec2::new(50.0, 0.5), CollisionLayer::Environment)
    }

    /// Пол обрывается сразу за передним краем юнита (x = 0.55)
    fn floor_ending_ahead() -> SensedCollider {
        collider(1, Vec2::new(-24.725, -0.5), Vec2::new(25.275, 0.5), CollisionLayer::Environment)
    }

    fn wall_ahead() -> SensedCollider {
        collider(2, Vec2::new(0.75, 1.0), Vec2::new(0.1, 1.0), CollisionLayer::Environment)
    }

    /// Игрок прямо перед юнитом на высоте нижнего probe
    fn player_in_reach() -> SensedCollider {
        let y = melee_probe_origins(&bounds(), Facing::Right)[0].y;
        collider(PLAYER, Vec2::new(1.0, y), Vec2::new(0.2, 0.5), CollisionLayer::Player)
    }

    fn tick(
        machine: &mut PatrolAttackStateMachine,
        dt: f32,
        colliders: &[SensedCollider],
    ) -> CommandBuffer {
        let sensor = WorldSensor::new(colliders);
        let mut buffer = CommandBuffer::new();
        machine.tick(dt, bounds(), &sensor, &mut buffer);
        buffer
    }

    #[test]
    fn test_turn_rule_truth_table() {
        assert!(!should_turn(false, true));
        assert!(should_turn(true, true));
        assert!(should_turn(false, false));
        assert!(should_turn(true, false));
    }

    #[test]
    fn test_patrol_moves_forward_on_open_ground() {
        let mut machine = PatrolAttackStateMachine::default();
        let buffer = tick(&mut machine, 0.5, &[wide_floor()]);

        assert_eq!(buffer.commands(), &[ActuatorCommand::Move(Vec2::new(0.5, 0.0))]);
        assert_eq!(machine.facing(), Facing::Right);
        assert_eq!(machine.state(), PatrolAttackState::Patrolling);
    }

    #[test]
    fn test_patrol_flips_iff_obstacle_or_no_ground() {
        for obstacle in [false, true] {
            for ground in [false, true] {
                let mut colliders = vec![if ground { wide_floor() } else { floor_ending_ahead() }];
                if obstacle {
                    colliders.push(wall_ahead());
                }

                let mut machine = PatrolAttackStateMachine::default();
                let buffer = tick(&mut machine, 0.1, &colliders);
                let expect_flip = should_turn(obstacle, ground);

                assert_eq!(
                    machine.facing() == Facing::Left,
                    expect_flip,
                    "obstacle={} ground={}",
                    obstacle,
                    ground
                );
                if expect_flip {
                    assert_eq!(buffer.commands(), &[ActuatorCommand::Face(Facing::Left)]);
                } else {
                    assert_eq!(buffer.total_movement(), Vec2::new(0.1, 0.0));
                }
            }
        }
    }

    #[test]
    fn test_target_in_range_starts_windup_once() {
        let mut machine = PatrolAttackStateMachine::default();
        let colliders = [wide_floor(), player_in_reach()];

        let buffer = tick(&mut machine, 0.1, &colliders);
        assert!(buffer.is_empty(), "no movement while starting the attack");
        assert_eq!(
            machine.state(),
            PatrolAttackState::PreparingToSwing { windup_remaining: 1.0 }
        );
        // Cooldown выставлен сразу: замах + восстановление
        assert_eq!(machine.attack_cooldown(), 2.0);

        // Следующий тик не перезапускает замах
        tick(&mut machine, 0.1, &colliders);
        assert!(matches!(
            machine.state(),
            PatrolAttackState::PreparingToSwing { windup_remaining } if (windup_remaining - 0.9).abs() < 1e-6
        ));
        assert!((machine.attack_cooldown() - 1.9).abs() < 1e-6);
    }

    #[test]
    fn test_swing_damages_target_when_windup_expires() {
        let mut machine = PatrolAttackStateMachine::default();
        let colliders = [wide_floor(), player_in_reach()];

        tick(&mut machine, 0.25, &colliders); // windup начат
        for _ in 0..3 {
            let buffer = tick(&mut machine, 0.25, &colliders);
            assert!(buffer.damaged_targets().is_empty());
            assert!(machine.is_winding_up());
        }

        let buffer = tick(&mut machine, 0.25, &colliders);
        assert_eq!(buffer.damaged_targets(), vec![Entity::from_raw(PLAYER)]);
        assert_eq!(machine.state(), PatrolAttackState::Patrolling);
        // Осталось только восстановление
        assert!((machine.attack_cooldown() - 1.0).abs() < 1e-6);
    }

    #[test]
    fn test_target_juking_during_windup_is_missed() {
        let mut machine = PatrolAttackStateMachine::default();

        tick(&mut machine, 0.5, &[wide_floor(), player_in_reach()]);
        tick(&mut machine, 0.5, &[wide_floor()]);
        let buffer = tick(&mut machine, 0.5, &[wide_floor()]);

        assert!(buffer.damaged_targets().is_empty());
        assert_eq!(machine.state(), PatrolAttackState::Patrolling);
    }

    #[test]
    fn test_cooldown_blocks_retrigger_while_target_stays() {
        let mut machine = PatrolAttackStateMachine::default();
        let colliders = [wide_floor(), player_in_reach()];

        // Начало + 4 тика замаха → удар, cooldown = 1.0
        for _ in 0..5 {
            tick(&mut machine, 0.25, &colliders);
        }
        assert_eq!(machine.state(), PatrolAttackState::Patrolling);

        // Три тика ждём: цель в зоне, но cooldown > 0, юнит стоит
        for _ in 0..3 {
            let buffer = tick(&mut machine, 0.25, &colliders);
            assert!(buffer.is_empty());
            assert_eq!(machine.state(), PatrolAttackState::Patrolling);
        }

        // Cooldown дошёл до 0 → новый замах
        tick(&mut machine, 0.25, &colliders);
        assert!(machine.is_winding_up());
    }

    #[test]
    fn test_cooldown_invariant_under_random_ticks() {
        let mut rng = ChaCha8Rng::seed_from_u64(7);
        let config = PatrolAttackConfig {
            time_to_swing: 0.4,
            weapon_swing_cooldown: 0.7,
            ..PatrolAttackConfig::default()
        };
        let mut machine = PatrolAttackStateMachine::new(config.clone(), Facing::Right);
        let mut transitions = 0;

        for _ in 0..5_000 {
            let dt = rng.gen_range(0.005..0.2);
            let colliders = if rng.gen_bool(0.7) {
                vec![wide_floor(), player_in_reach()]
            } else {
                vec![wide_floor()]
            };

            let cooldown_before = machine.attack_cooldown();
            let was_patrolling = machine.state() == PatrolAttackState::Patrolling;
            tick(&mut machine, dt, &colliders);

            if was_patrolling && machine.is_winding_up() {
                transitions += 1;
                assert!(cooldown_before - dt <= 0.0, "attack started with cooldown left");
                assert_eq!(machine.attack_cooldown(), config.attack_cooldown());
            }
        }

        assert!(transitions > 10, "expected several attacks, got {}", transitions);
    }
}
