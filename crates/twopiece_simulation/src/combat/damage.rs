//! Damage события и обработка урона игрока.
//!
//! Урон врагам (WeaponHealth) и боссу (автомат): в `ai::systems::reactions`,
//! здесь только общие события, маркеры смерти и здоровье игрока.

use bevy::prelude::*;

use crate::components::Health;

/// Чем нанесён урон
#[derive(Debug, Clone, Copy, PartialEq, Eq, Reflect)]
pub enum DamageKind {
    /// Меч игрока
    Sword,
    /// Дубина игрока
    Club,
    /// Удар врага (melee scan)
    Melee,
}

/// Событие: entity получил удар
#[derive(Event, Debug, Clone, PartialEq)]
pub struct DamageTaken {
    /// `None`: урон от сцены (шипы, тест)
    pub source: Option<Entity>,
    pub target: Entity,
    pub kind: DamageKind,
}

/// Событие: entity умер
#[derive(Event, Debug, Clone, PartialEq)]
pub struct EntityDied {
    pub entity: Entity,
    pub killer: Option<Entity>,
}

/// Компонент-маркер: entity мертв, автоматы больше не тикают
#[derive(Component, Debug)]
pub struct Dead;

/// Деспавн через `remaining` секунд fixed-времени (труп доигрывает звук смерти)
#[derive(Component, Debug, Clone, Copy)]
pub struct DespawnAfter {
    pub remaining: f32,
}

/// Система: урон игроку (-1 за удар)
///
/// Убийственный удар → маркер `Dead` + `EntityDied`.
pub fn apply_player_damage(
    mut commands: Commands,
    mut damage_events: EventReader<DamageTaken>,
    mut died_events: EventWriter<EntityDied>,
    mut players: Query<&mut Health, Without<Dead>>,
) {
    for event in damage_events.read() {
        let Ok(mut health) = players.get_mut(event.target) else {
            continue;
        };
        if !health.is_alive() {
            continue;
        }

        health.take_damage(1);
        crate::log(&format!(
            "Player {:?} hit by {:?} ({:?}), health {}/{}",
            event.target, event.source, event.kind, health.current, health.max
        ));

        if !health.is_alive() {
            commands.entity(event.target).insert(Dead);
            died_events.write(EntityDied {
                entity: event.target,
                killer: event.source,
            });
            crate::log_info(&format!("Player {:?} died", event.target));
        }
    }
}

/// Система: деспавн entities с истёкшим DespawnAfter
pub fn despawn_after_timeout(
    mut commands: Commands,
    mut query: Query<(Entity, &mut DespawnAfter)>,
    time: Res<Time<Fixed>>,
) {
    let delta = time.delta_secs();

    for (entity, mut despawn_after) in query.iter_mut() {
        despawn_after.remaining -= delta;
        if despawn_after.remaining <= 0.0 {
            crate::log(&format!("Despawning entity {:?} (timeout)", entity));
            commands.entity(entity).despawn();
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::time::Duration;

    fn app() -> App {
        let mut app = App::new();
        app.add_event::<DamageTaken>()
            .add_event::<EntityDied>()
            .init_resource::<Time<Fixed>>()
            .add_systems(Update, (apply_player_damage, despawn_after_timeout));
        app
    }

    fn died(app: &App) -> Vec<EntityDied> {
        let events = app.world().resource::<Events<EntityDied>>();
        events.get_cursor().read(events).cloned().collect()
    }

    #[test]
    fn test_player_loses_one_health_per_hit() {
        let mut app = app();
        let player = app.world_mut().spawn(Health::new(3)).id();

        for _ in 0..2 {
            app.world_mut().send_event(DamageTaken {
                source: None,
                target: player,
                kind: DamageKind::Melee,
            });
        }
        app.update();

        assert_eq!(app.world().get::<Health>(player).map(|h| h.current), Some(1));
        assert!(died(&app).is_empty());
    }

    #[test]
    fn test_killing_blow_marks_dead_once() {
        let mut app = app();
        let player = app.world_mut().spawn(Health::new(1)).id();
        let enemy = app.world_mut().spawn_empty().id();

        for _ in 0..3 {
            app.world_mut().send_event(DamageTaken {
                source: Some(enemy),
                target: player,
                kind: DamageKind::Melee,
            });
        }
        app.update();

        assert!(app.world().get::<Dead>(player).is_some());
        assert_eq!(
            died(&app),
            vec![EntityDied {
                entity: player,
                killer: Some(enemy),
            }]
        );
    }

    #[test]
    fn test_despawn_after_counts_fixed_time() {
        let mut app = app();
        let corpse = app.world_mut().spawn(DespawnAfter { remaining: 0.25 }).id();

        app.world_mut()
            .resource_mut::<Time<Fixed>>()
            .advance_by(Duration::from_millis(200));
        app.update();
        assert!(app.world().get_entity(corpse).is_ok());

        app.world_mut()
            .resource_mut::<Time<Fixed>>()
            .advance_by(Duration::from_millis(100));
        app.update();
        assert!(app.world().get_entity(corpse).is_err());
    }
}
