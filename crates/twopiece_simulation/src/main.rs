//! Headless симуляция TwoPiece
//!
//! Сцена: пол, патрульный враг, босс над ареной, дверь на тир 1.
//! Игрок бродит случайно (seeded), бьёт врагов рядом; итог в лог.

use std::path::PathBuf;

use bevy::prelude::*;
use bevy::time::TimeUpdateStrategy;
use clap::Parser;
use rand::Rng;

use twopiece_simulation::{
    basic_enemy_bundle, boss_bundle, init_logger, log_error, log_info, player_bundle,
    set_log_level, Collider2D, CollisionLayer, DamageKind, DamageTaken, DeterministicRng, Door,
    EntityDied, Facing, Health, HealthTier, LogLevel, Player, SimulationPlugin, SimulationSet,
    TierTrigger, Tuning, WakeUp,
};

/// Headless прогон сцены с патрульным врагом и боссом
#[derive(Parser)]
#[command(author, version, about, long_about = None)]
struct Args {
    /// JSON с параметрами автоматов (по умолчанию: значения сцены)
    #[arg(short, long)]
    tuning: Option<PathBuf>,

    /// Сколько fixed-тиков прогнать
    #[arg(long, default_value_t = 1200)]
    ticks: u32,

    /// Seed для блуждания игрока
    #[arg(long, default_value_t = 42)]
    seed: u64,

    /// Печатать debug лог (переходы автоматов)
    #[arg(short, long)]
    verbose: bool,
}

/// Игрок бьёт врагов на этом расстоянии по X
const PLAYER_REACH: f32 = 1.2;

/// Шанс удара за тик, когда враг в радиусе
const PLAYER_ATTACK_CHANCE: f64 = 0.05;

const PLAYER_SPEED: f32 = 2.0;

fn main() {
    let args = Args::parse();
    init_logger();
    set_log_level(if args.verbose {
        LogLevel::Debug
    } else {
        LogLevel::Info
    });

    let tuning = match &args.tuning {
        Some(path) => match Tuning::load(path) {
            Ok(tuning) => tuning,
            Err(err) => {
                log_error(&format!("{}: {}", path.display(), err));
                std::process::exit(1);
            }
        },
        None => Tuning::default(),
    };

    let plugin = match SimulationPlugin::from_tuning(&tuning) {
        Ok(plugin) => plugin,
        Err(err) => {
            log_error(&format!("invalid tuning: {}", err));
            std::process::exit(1);
        }
    };
    let timestep = plugin.timestep;

    log_info(&format!(
        "Starting TwoPiece headless simulation (seed: {}, ticks: {}, {} Hz)",
        args.seed, args.ticks, tuning.fixed_hz
    ));

    let mut app = App::new();
    app.add_plugins(MinimalPlugins)
        .add_plugins(plugin)
        .insert_resource(DeterministicRng::new(args.seed))
        .insert_resource(TimeUpdateStrategy::ManualDuration(timestep))
        .add_systems(
            FixedUpdate,
            (wander_player, player_attacks)
                .chain()
                .before(SimulationSet::Reactions),
        )
        .add_systems(Update, report_deaths);

    spawn_scene(app.world_mut(), &tuning);

    for _ in 0..args.ticks {
        app.update();
    }

    let survivors = app
        .world_mut()
        .query::<&Health>()
        .iter(app.world())
        .map(|health| health.current)
        .collect::<Vec<_>>();
    log_info(&format!("Simulation complete! Player health: {:?}", survivors));
}

fn spawn_scene(world: &mut World, tuning: &Tuning) {
    // Пол арены
    world.spawn((
        Transform::from_xyz(0.0, -0.5, 0.0),
        Collider2D::new(Vec2::new(30.0, 0.5), CollisionLayer::Environment),
    ));

    let player = world.spawn(player_bundle(Vec2::new(-4.0, 0.8), 3)).id();

    world.spawn(basic_enemy_bundle(
        Vec2::new(3.0, 1.0),
        Facing::Left,
        tuning.patrol_attack.clone(),
    ));

    let boss = world
        .spawn(boss_bundle(Vec2::new(0.0, 4.0), player, tuning.approach_flee.clone()))
        .id();

    // Дверь справа: закрывается после первого урона боссу
    world
        .spawn((
            Transform::from_xyz(12.0, 1.5, 0.0),
            Collider2D::new(Vec2::new(0.5, 1.5), CollisionLayer::Environment).disabled(),
            Door::default(),
            TierTrigger::new(boss, HealthTier(1)),
        ))
        .with_children(|parent| {
            parent.spawn(Transform::default());
        });

    world.send_event(WakeUp { boss });
}

/// Игрок бродит влево/вправо случайными шагами
fn wander_player(
    mut rng: ResMut<DeterministicRng>,
    mut players: Query<(&mut Transform, &mut Facing), With<Player>>,
    time: Res<Time<Fixed>>,
) {
    let delta = time.delta_secs();
    for (mut transform, mut facing) in players.iter_mut() {
        if rng.rng.gen_bool(0.02) {
            *facing = facing.flipped();
        }
        transform.translation.x += facing.sign() * PLAYER_SPEED * delta;
        transform.translation.x = transform.translation.x.clamp(-12.0, 12.0);
    }
}

/// Игрок иногда бьёт ближайшего врага (меч или дубина)
fn player_attacks(
    mut rng: ResMut<DeterministicRng>,
    players: Query<(Entity, &Transform), With<Player>>,
    enemies: Query<(Entity, &Transform, &Collider2D), Without<Player>>,
    mut damage: EventWriter<DamageTaken>,
) {
    for (player, player_transform) in players.iter() {
        let player_x = player_transform.translation.x;
        for (enemy, transform, collider) in enemies.iter() {
            if collider.layer != CollisionLayer::Enemy {
                continue;
            }
            // Только по X: босс над ареной достаётся прыжком
            if (transform.translation.x - player_x).abs() > PLAYER_REACH {
                continue;
            }
            if !rng.rng.gen_bool(PLAYER_ATTACK_CHANCE) {
                continue;
            }
            let kind = if rng.rng.gen_bool(0.5) {
                DamageKind::Sword
            } else {
                DamageKind::Club
            };
            damage.write(DamageTaken {
                source: Some(player),
                target: enemy,
                kind,
            });
        }
    }
}

fn report_deaths(mut events: EventReader<EntityDied>) {
    for event in events.read() {
        log_info(&format!("{:?} died (killer: {:?})", event.entity, event.killer));
    }
}
