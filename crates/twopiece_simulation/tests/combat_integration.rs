//! Combat integration test
//!
//! Headless App со всеми plugins, fixed-тики прогоняются вручную.
//!
//! Проверяем:
//! - Патрульный враг бьёт игрока после замаха
//! - Убитый во время замаха враг не бьёт
//! - Урон боссу закрывает дверь своего тира
//! - Снаряды босса улетают и исчезают

use std::time::Duration;

use bevy::prelude::*;
use twopiece_simulation::*;

/// Helper: прогнать `ticks` fixed-тиков с шагом timestep
fn step_fixed(app: &mut App, ticks: usize) {
    for _ in 0..ticks {
        let timestep = app.world().resource::<Time<Fixed>>().timestep();
        app.world_mut()
            .resource_mut::<Time<Fixed>>()
            .advance_by(timestep);
        app.world_mut().run_schedule(FixedUpdate);
    }
}

fn spawn_floor(app: &mut App) {
    app.world_mut().spawn((
        Transform::from_xyz(0.0, -0.5, 0.0),
        Collider2D::new(Vec2::new(30.0, 0.5), CollisionLayer::Environment),
    ));
}

fn player_health(app: &App, player: Entity) -> Option<u32> {
    app.world().get::<Health>(player).map(|health| health.current)
}

fn collect_events<E: Event + Clone>(app: &App) -> Vec<E> {
    let events = app.world().resource::<Events<E>>();
    events.get_cursor().read(events).cloned().collect()
}

/// Враг на полу лицом вправо, игрок стоит прямо перед ним
fn duel_setup() -> (App, Entity, Entity) {
    let mut app = create_headless_app(42);
    spawn_floor(&mut app);
    let enemy = app
        .world_mut()
        .spawn(basic_enemy_bundle(
            Vec2::new(0.0, 1.0),
            Facing::Right,
            PatrolAttackConfig::default(),
        ))
        .id();
    let player = app
        .world_mut()
        .spawn(player_bundle(Vec2::new(1.2, 0.8), 3))
        .id();
    (app, enemy, player)
}

#[test]
fn test_patrol_enemy_hits_player_after_windup() {
    let (mut app, enemy, player) = duel_setup();

    step_fixed(&mut app, 1);
    let machine = app.world().get::<PatrolAttackStateMachine>(enemy).cloned();
    assert!(machine.is_some_and(|m| m.is_winding_up()));

    // Замах 1s при 60Hz: урон не раньше ~60-го тика
    step_fixed(&mut app, 50);
    assert_eq!(player_health(&app, player), Some(3));

    step_fixed(&mut app, 40);
    assert_eq!(player_health(&app, player), Some(2));

    // Враг не сдвинулся: цель в зоне, ждёт cooldown
    let transform = app.world().get::<Transform>(enemy).copied();
    assert_eq!(transform.map(|t| t.translation.x), Some(0.0));
}

#[test]
fn test_enemy_killed_mid_windup_never_swings() {
    let (mut app, enemy, player) = duel_setup();

    step_fixed(&mut app, 10);
    app.world_mut().send_event(DamageTaken {
        source: Some(player),
        target: enemy,
        kind: DamageKind::Sword,
    });
    step_fixed(&mut app, 120);

    assert_eq!(player_health(&app, player), Some(3));
    assert!(app.world().get_entity(enemy).is_err());
    assert_eq!(
        collect_events::<EntityDied>(&app),
        vec![EntityDied {
            entity: enemy,
            killer: Some(player),
        }]
    );
}

#[test]
fn test_club_needs_two_hits() {
    let (mut app, enemy, player) = duel_setup();

    for _ in 0..2 {
        app.world_mut().send_event(DamageTaken {
            source: Some(player),
            target: enemy,
            kind: DamageKind::Club,
        });
        step_fixed(&mut app, 1);
    }

    assert!(app.world().get_entity(enemy).is_err());
}

#[test]
fn test_boss_damage_closes_tier_door() {
    let mut app = create_headless_app(7);
    let player = app
        .world_mut()
        .spawn(player_bundle(Vec2::new(-5.0, 0.8), 3))
        .id();
    let boss = app
        .world_mut()
        .spawn(boss_bundle(Vec2::new(0.0, 4.0), player, ApproachFleeConfig::default()))
        .id();

    let spawn_door = |app: &mut App, tier: u8| -> (Entity, Entity) {
        let mut door = app.world_mut().spawn((
            Transform::from_xyz(12.0, 1.5, 0.0),
            Collider2D::new(Vec2::new(0.5, 1.5), CollisionLayer::Environment).disabled(),
            Door::default(),
            TierTrigger::new(boss, HealthTier(tier)),
        ));
        let mut sprite = Entity::PLACEHOLDER;
        door.with_children(|parent| {
            sprite = parent.spawn(Transform::default()).id();
        });
        (door.id(), sprite)
    };
    let (first_door, first_sprite) = spawn_door(&mut app, 1);
    let (second_door, _) = spawn_door(&mut app, 2);

    app.world_mut().send_event(DamageTaken {
        source: Some(player),
        target: boss,
        kind: DamageKind::Sword,
    });
    step_fixed(&mut app, 1);

    assert_eq!(app.world().get::<Door>(first_door), Some(&Door { closed: true }));
    assert_eq!(
        app.world().get::<Collider2D>(first_door).map(|c| c.enabled),
        Some(true)
    );
    assert!(app.world().get_entity(first_sprite).is_err());
    assert_eq!(app.world().get::<Door>(second_door), Some(&Door { closed: false }));

    let feedback = collect_events::<FeedbackRequested>(&app);
    assert!(feedback.contains(&FeedbackRequested {
        entity: boss,
        kind: Feedback::FlashOn,
    }));
    assert!(feedback.contains(&FeedbackRequested {
        entity: first_door,
        kind: Feedback::DoorClosed,
    }));

    // Второй удар → тир 2, третий → смерть и деспавн после death_linger
    for _ in 0..2 {
        app.world_mut().send_event(DamageTaken {
            source: Some(player),
            target: boss,
            kind: DamageKind::Club,
        });
        step_fixed(&mut app, 1);
    }
    assert_eq!(app.world().get::<Door>(second_door), Some(&Door { closed: true }));
    assert!(app.world().get::<Dead>(boss).is_some());
    assert_eq!(collect_events::<EntityDied>(&app).len(), 1);

    step_fixed(&mut app, 70);
    assert!(app.world().get_entity(boss).is_err());
}

#[test]
fn test_wake_up_boss_approaches_with_reversed_facing() {
    let mut app = create_headless_app(7);
    let player = app
        .world_mut()
        .spawn(player_bundle(Vec2::new(-5.0, 0.8), 3))
        .id();
    let boss = app
        .world_mut()
        .spawn(boss_bundle(Vec2::new(0.0, 4.0), player, ApproachFleeConfig::default()))
        .id();

    // Спит до WakeUp
    step_fixed(&mut app, 10);
    assert_eq!(
        app.world().get::<Transform>(boss).map(|t| t.translation.x),
        Some(0.0)
    );

    app.world_mut().send_event(WakeUp { boss });
    step_fixed(&mut app, 10);

    let x = app.world().get::<Transform>(boss).map(|t| t.translation.x);
    assert!(x.is_some_and(|x| x < 0.0), "boss x = {:?}", x);
    assert_eq!(app.world().get::<Facing>(boss), Some(&Facing::Right));
}

#[test]
fn test_boss_projectiles_fall_and_expire() {
    let mut app = create_headless_app(7);
    let player = app
        .world_mut()
        .spawn(player_bundle(Vec2::new(0.1, 0.8), 3))
        .id();
    let config = ApproachFleeConfig {
        // Один выстрел на первом тике, дальше счётчик не успевает
        fire_threshold: 10_000,
        initial_fire_counter: 10_000,
        ..ApproachFleeConfig::default()
    };
    let boss = app
        .world_mut()
        .spawn(boss_bundle(Vec2::new(0.0, 4.0), player, config))
        .id();
    app.world_mut().send_event(WakeUp { boss });

    step_fixed(&mut app, 1);
    let mut projectiles = app.world_mut().query::<(&Projectile, &Transform)>();
    let spawned: Vec<_> = projectiles
        .iter(app.world())
        .map(|(projectile, transform)| (projectile.owner, transform.translation.y))
        .collect();
    assert_eq!(spawned.len(), 1);
    assert_eq!(spawned[0].0, boss);
    assert!(spawned[0].1 <= 3.5);

    // lifetime 7s при 60Hz
    step_fixed(&mut app, 400);
    assert_eq!(projectiles.iter(app.world()).count(), 1);

    step_fixed(&mut app, 25);
    assert_eq!(projectiles.iter(app.world()).count(), 0);
}

#[test]
fn test_fixed_timestep_matches_tuning() {
    let app = create_headless_app(1);
    let timestep = app.world().resource::<Time<Fixed>>().timestep();
    assert_eq!(timestep, Duration::from_secs_f64(1.0 / 60.0));
}

#[test]
fn test_plugin_rejects_unrepresentable_tick_rate() {
    for fixed_hz in [1e-30, 1e308] {
        let tuning = Tuning {
            fixed_hz,
            ..Tuning::default()
        };
        assert!(matches!(
            SimulationPlugin::from_tuning(&tuning),
            Err(TuningError::Invalid { field: "fixed_hz", .. })
        ));
    }

    let plugin = SimulationPlugin::from_tuning(&Tuning::default()).unwrap();
    let mut app = App::new();
    app.add_plugins(plugin);
    let timestep = app.world().resource::<Time<Fixed>>().timestep();
    assert_eq!(timestep, Duration::from_secs_f64(1.0 / 60.0));
}
