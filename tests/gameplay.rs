//! System wiring tests: health events, sensors, respawn and flashlight.
//!
//! These run the fixed schedule by hand without the physics plugin, feeding
//! collision events directly.

use std::time::Duration;

use bevy::prelude::*;
use bevy::state::app::StatesPlugin;
use bevy_rapier2d::prelude::*;
use bevy_rapier2d::rapier::geometry::CollisionEventFlags;

use morkel::core::*;
use morkel::health::{Health, HealthPlugin};
use morkel::player::{
    Flashlight, FlashlightConfig, GroundContact, GroundQuery, GroundSensor, Incapacitated,
    Locomotion, LocomotionConfig, LocomotionInput, Player, PlayerColliders, PlayerConfig,
    PlayerInput, PlayerPlugin,
};
use morkel::world::{Checkpoint, DamageZone, WorldPlugin};

fn test_app() -> App {
    let mut app = App::new();
    app.add_plugins((MinimalPlugins, StatesPlugin))
        .add_event::<CollisionEvent>()
        .init_resource::<ButtonInput<KeyCode>>()
        .init_resource::<ButtonInput<MouseButton>>()
        .add_plugins((CorePlugin, HealthPlugin, PlayerPlugin, WorldPlugin))
        .insert_resource(PlayerConfig::default())
        .insert_resource(GameSession::default());
    app.world_mut()
        .insert_resource(State::new(GameState::InGame));
    app
}

fn tick(app: &mut App) {
    app.world_mut().run_schedule(FixedUpdate);
}

fn events<E: Event + Clone>(app: &App) -> Vec<E> {
    app.world()
        .resource::<Events<E>>()
        .iter_current_update_events()
        .cloned()
        .collect()
}

fn spawn_test_player(app: &mut App, position: Vec2) -> Entity {
    app.world_mut()
        .spawn((
            Player,
            Health::new(3, 0.0),
            Flashlight::new(&FlashlightConfig::default()),
            PlayerInput::default(),
            Locomotion::default(),
            Transform::from_translation(position.extend(0.0)),
        ))
        .id()
}

/// Flat floor under whatever box is asked about.
struct FlatFloor;

impl GroundQuery for FlatFloor {
    fn cast_box(&self, origin: Vec2, _size: Vec2) -> Vec<GroundContact> {
        vec![GroundContact {
            point: origin,
            normal: Vec2::Y,
        }]
    }
}

/// Locomotion state after one tick standing on flat ground.
fn grounded_locomotion() -> Locomotion {
    let mut locomotion = Locomotion::default();
    let sensor = GroundSensor::new(Vec2::new(0.0, -48.0), Vec2::new(28.0, 8.0), 47.5);
    locomotion.step(
        &mut Default::default(),
        &LocomotionInput::default(),
        &sensor,
        &FlatFloor,
        false,
        &LocomotionConfig::default(),
        1.0 / 64.0,
    );
    assert!(locomotion.is_grounded());
    locomotion
}

fn drained_flashlight() -> Flashlight {
    let mut flashlight = Flashlight::new(&FlashlightConfig::default());
    flashlight.activate();
    flashlight.tick(100.0);
    assert!(flashlight.can_recharge());
    flashlight
}

fn press_recharge(app: &mut App, player: Entity, held: bool) {
    let mut input = app.world_mut().get_mut::<PlayerInput>(player).unwrap();
    input.recharge_pressed = held;
    input.recharge_held = held;
}

fn touch(app: &mut App, sensor: Entity, other: Entity) {
    app.world_mut()
        .send_event(CollisionEvent::Started(sensor, other, CollisionEventFlags::SENSOR));
}

#[test]
fn damage_request_is_answered_with_hurt_then_death() {
    let mut app = test_app();
    let target = app.world_mut().spawn(Health::new(2, 0.0)).id();

    app.world_mut().send_event(DamageEvent { target, amount: 1 });
    tick(&mut app);
    assert_eq!(
        events::<HurtEvent>(&app),
        vec![HurtEvent { entity: target, amount: 1 }]
    );

    app.world_mut().send_event(DamageEvent { target, amount: 5 });
    tick(&mut app);
    assert_eq!(events::<DeathEvent>(&app), vec![DeathEvent { entity: target }]);
    assert_eq!(events::<HurtEvent>(&app).len(), 1);
    assert!(app.world().get::<Health>(target).unwrap().is_dead());
}

#[test]
fn heal_request_reports_clamped_amount() {
    let mut app = test_app();
    let target = app.world_mut().spawn(Health::new(5, 0.0)).id();

    app.world_mut().send_event(DamageEvent { target, amount: 2 });
    app.world_mut().send_event(HealEvent { target, amount: Some(10) });
    tick(&mut app);

    assert_eq!(
        events::<HealedEvent>(&app),
        vec![HealedEvent { entity: target, amount: 2 }]
    );
    assert!(app.world().get::<Health>(target).unwrap().is_full());
}

#[test]
fn invincibility_blocks_follow_up_damage() {
    let mut app = test_app();
    let target = app.world_mut().spawn(Health::new(3, 1.0)).id();

    app.world_mut().send_event(DamageEvent { target, amount: 1 });
    tick(&mut app);
    app.world_mut().send_event(DamageEvent { target, amount: 1 });
    tick(&mut app);

    assert_eq!(events::<HurtEvent>(&app).len(), 1);
    assert_eq!(app.world().get::<Health>(target).unwrap().current(), 2);
}

#[test]
fn damage_zone_hurts_whatever_touches_it() {
    let mut app = test_app();
    let zone = app.world_mut().spawn(DamageZone { damage: 1 }).id();
    let target = app.world_mut().spawn(Health::new(3, 0.0)).id();
    let prop = app.world_mut().spawn(Transform::default()).id();

    // Either ordering of the pair counts.
    touch(&mut app, target, zone);
    touch(&mut app, zone, prop);
    tick(&mut app);

    assert_eq!(
        events::<HurtEvent>(&app),
        vec![HurtEvent { entity: target, amount: 1 }]
    );
}

#[test]
fn checkpoint_only_activates_for_the_player() {
    let mut app = test_app();
    let checkpoint = app
        .world_mut()
        .spawn((Checkpoint { index: 1 }, Transform::default()))
        .id();
    let stranger = app.world_mut().spawn(Health::new(1, 0.0)).id();

    touch(&mut app, checkpoint, stranger);
    tick(&mut app);
    assert_eq!(app.world().resource::<GameSession>().checkpoint, 0);

    let player = spawn_test_player(&mut app, Vec2::ZERO);
    touch(&mut app, checkpoint, player);
    touch(&mut app, player, checkpoint);
    tick(&mut app);

    assert_eq!(app.world().resource::<GameSession>().checkpoint, 1);
    assert_eq!(
        events::<CheckpointReachedEvent>(&app),
        vec![CheckpointReachedEvent { index: 1 }]
    );
}

#[test]
fn dead_player_respawns_at_active_checkpoint() {
    let mut app = test_app();
    app.world_mut()
        .spawn((Checkpoint { index: 0 }, Transform::default()));
    let second = app
        .world_mut()
        .spawn((Checkpoint { index: 1 }, Transform::from_xyz(500.0, 100.0, 0.0)))
        .id();
    let player = spawn_test_player(&mut app, Vec2::new(40.0, 0.0));

    // Killed while crouching.
    let standing = Collider::capsule_y(32.0, 16.0);
    let crouching = Collider::compound(vec![(
        Vec2::new(0.0, -16.0),
        0.0,
        Collider::capsule_y(16.0, 16.0),
    )]);
    app.world_mut().entity_mut(player).insert((
        crouching.clone(),
        PlayerColliders {
            standing,
            crouching,
        },
    ));

    touch(&mut app, second, player);
    app.world_mut().send_event(DamageEvent { target: player, amount: 3 });
    tick(&mut app);

    assert_eq!(events::<DeathEvent>(&app).len(), 1);
    assert!(app.world().get::<Incapacitated>(player).is_some());
    assert!(app.world().resource::<GameSession>().respawn.is_running());
    assert_eq!(app.world().resource::<ScreenCover>().target, 1.0);

    // Dead players ignore further damage.
    app.world_mut().send_event(DamageEvent { target: player, amount: 1 });
    tick(&mut app);
    assert_eq!(events::<HurtEvent>(&app).len(), 0);

    app.world_mut().resource_mut::<ScreenCover>().opacity = 1.0;
    tick(&mut app);
    let position = app.world().get::<Transform>(player).unwrap().translation;
    assert_eq!(position.truncate(), Vec2::new(500.0, 100.0));
    assert!(app.world().get::<Collider>(player).unwrap().as_compound().is_none());
    assert!(!app.world().get::<Locomotion>(player).unwrap().is_crouching());

    tick(&mut app);
    assert_eq!(app.world().resource::<ScreenCover>().target, 0.0);

    app.world_mut().resource_mut::<ScreenCover>().opacity = 0.0;
    tick(&mut app);
    assert!(app.world().get::<Incapacitated>(player).is_some());

    app.world_mut()
        .resource_mut::<Time>()
        .advance_by(Duration::from_secs_f32(DEFAULT_RECOVERY_DELAY));
    tick(&mut app);

    assert!(app.world().get::<Incapacitated>(player).is_none());
    assert!(!app.world().resource::<GameSession>().respawn.is_running());
    let health = app.world().get::<Health>(player).unwrap();
    assert!(health.is_full());
    assert!(health.is_enabled());
}

#[test]
fn flashlight_button_switches_the_light() {
    let mut app = test_app();
    let player = spawn_test_player(&mut app, Vec2::ZERO);

    app.world_mut()
        .get_mut::<PlayerInput>(player)
        .unwrap()
        .flashlight_pressed = true;
    tick(&mut app);

    assert!(app.world().get::<Flashlight>(player).unwrap().is_on());
    assert_eq!(
        events::<FlashlightEvent>(&app),
        vec![FlashlightEvent { entity: player, signal: FlashlightSignal::On }]
    );
    // The press was consumed by the tick.
    assert!(!app.world().get::<PlayerInput>(player).unwrap().flashlight_pressed);

    app.world_mut()
        .get_mut::<PlayerInput>(player)
        .unwrap()
        .flashlight_pressed = true;
    tick(&mut app);
    assert!(!app.world().get::<Flashlight>(player).unwrap().is_on());
}

#[test]
fn incapacitated_player_ignores_the_flashlight_button() {
    let mut app = test_app();
    let player = spawn_test_player(&mut app, Vec2::ZERO);
    app.world_mut().entity_mut(player).insert(Incapacitated);

    app.world_mut()
        .get_mut::<PlayerInput>(player)
        .unwrap()
        .flashlight_pressed = true;
    tick(&mut app);

    assert!(!app.world().get::<Flashlight>(player).unwrap().is_on());
    assert!(events::<FlashlightEvent>(&app).is_empty());
}

#[test]
fn grounded_recharge_starts_and_grips_the_floor() {
    let mut app = test_app();
    let player = spawn_test_player(&mut app, Vec2::ZERO);
    app.world_mut().entity_mut(player).insert((
        drained_flashlight(),
        grounded_locomotion(),
        Friction::coefficient(0.0),
    ));

    press_recharge(&mut app, player, true);
    tick(&mut app);

    assert!(app.world().get::<Flashlight>(player).unwrap().is_recharging());
    let idle = PlayerConfig::default().friction.idle;
    assert_eq!(app.world().get::<Friction>(player).unwrap().coefficient, idle);
}

#[test]
fn releasing_recharge_cancels_but_keeps_the_lock() {
    let mut app = test_app();
    let player = spawn_test_player(&mut app, Vec2::ZERO);
    app.world_mut()
        .entity_mut(player)
        .insert((drained_flashlight(), grounded_locomotion()));

    press_recharge(&mut app, player, true);
    tick(&mut app);
    assert!(app.world().get::<Flashlight>(player).unwrap().is_recharging());

    // Let go and wait out the press buffer.
    press_recharge(&mut app, player, false);
    app.world_mut()
        .resource_mut::<Time>()
        .advance_by(Duration::from_secs_f32(0.2));
    tick(&mut app);

    let flashlight = app.world().get::<Flashlight>(player).unwrap();
    assert!(!flashlight.is_recharging());
    assert!(flashlight.can_recharge());
    assert!(flashlight.energy() < 100.0);
}

#[test]
fn recharge_is_refused_in_the_air() {
    let mut app = test_app();
    let player = spawn_test_player(&mut app, Vec2::ZERO);
    app.world_mut().entity_mut(player).insert((
        drained_flashlight(),
        Friction::coefficient(0.0),
    ));

    press_recharge(&mut app, player, true);
    tick(&mut app);

    let flashlight = app.world().get::<Flashlight>(player).unwrap();
    assert!(!flashlight.is_recharging());
    assert!(flashlight.can_recharge());
    assert_eq!(app.world().get::<Friction>(player).unwrap().coefficient, 0.0);
}
