//! Tick integration tests for the animation driver.
//!
//! # Usage
//!
//! ```sh
//! cargo test --test animation_tick_integration
//! ```

use std::sync::{Arc, Mutex};

use bevy_ecs::observer::On;
use bevy_ecs::prelude::*;
use glam::Vec2;

use spriteclip::components::animation::{AnimationComponent, Clip, Frame};
use spriteclip::components::mapposition::MapPosition;
use spriteclip::components::sprite::Sprite;
use spriteclip::driver::{Animatable, AnimatedBundle, AnimationDriver};
use spriteclip::events::animation::ClipFinished;
use spriteclip::resources::spritesheet::{Drawable, SpriteRegion};
use spriteclip::resources::worldtime::WorldTime;

const EPSILON: f32 = 1e-6;

fn approx_eq(a: f32, b: f32) -> bool {
    (a - b).abs() < EPSILON
}

fn drawable(slot: usize) -> Drawable {
    Drawable {
        tex_key: Arc::from("hero.png"),
        region: SpriteRegion::new(slot as f32 * 32.0, 0.0, 32.0, 32.0),
    }
}

fn clip(name: &str, slots: &[usize], looped: bool) -> Arc<Clip> {
    let frames = slots
        .iter()
        .map(|&slot| Frame::new(slot, Vec2::new(-(slot as f32), slot as f32 * 2.0)))
        .collect();
    Arc::new(Clip::new(name, frames, looped))
}

fn bundle(rate: f32) -> AnimatedBundle {
    let drawables: Vec<_> = (0..6).map(drawable).collect();
    let mut animation = AnimationComponent::new(drawables, rate);
    animation.add_clips([clip("walk", &[1, 2, 3], true), clip("attack", &[4, 5], false)]);
    animation.add_default_clip(clip("idle", &[0], false));
    AnimatedBundle {
        animation,
        sprite: Sprite::new(drawable(0)),
        position: MapPosition::new(10.0, 20.0),
    }
}

fn finished_log(world: &mut World) -> Arc<Mutex<Vec<ClipFinished>>> {
    let log = Arc::new(Mutex::new(Vec::new()));
    let sink = log.clone();
    world.add_observer(move |trigger: On<ClipFinished>| {
        sink.lock().unwrap().push(trigger.event().clone());
    });
    world.flush();
    log
}

fn sprite_slot(world: &World, entity: Entity) -> usize {
    let sprite = world.get::<Sprite>(entity).unwrap();
    (sprite.drawable.region.position.x / 32.0) as usize
}

#[test]
fn tracked_entity_plays_default_clip() {
    let mut world = World::new();
    let mut driver = AnimationDriver::new();
    let entity = world.spawn_empty().id();
    assert!(driver.track(&mut world, entity, bundle(0.1)));

    driver.update(&mut world, 0.1);

    let anim = world.get::<AnimationComponent>(entity).unwrap();
    // One-frame one-shot idle: shown and already finished.
    assert!(anim.current_clip().is_none());
    assert_eq!(sprite_slot(&world, entity), 0);
    assert!(approx_eq(world.resource::<WorldTime>().delta, 0.1));
}

#[test]
fn selected_clip_advances_at_rate() {
    let mut world = World::new();
    let mut driver = AnimationDriver::new();
    let entity = world.spawn_empty().id();
    driver.track(&mut world, entity, bundle(0.1));
    world
        .get_mut::<AnimationComponent>(entity)
        .unwrap()
        .select_by_name("walk");

    let mut shown = Vec::new();
    for _ in 0..8 {
        driver.update(&mut world, 0.05);
        shown.push(sprite_slot(&world, entity));
    }

    // A new frame every second tick, looping 1, 2, 3.
    assert_eq!(shown, vec![0, 1, 1, 2, 2, 3, 3, 1]);
    let pos = world.get::<MapPosition>(entity).unwrap();
    assert!(approx_eq(pos.pos.x, 1.0));
    assert!(approx_eq(pos.pos.y, 2.0));
}

#[test]
fn one_shot_clip_reports_and_falls_back_to_default() {
    let mut world = World::new();
    let finished = finished_log(&mut world);
    let mut driver = AnimationDriver::new();
    let entity = world.spawn_empty().id();
    driver.track(&mut world, entity, bundle(0.0));
    world
        .get_mut::<AnimationComponent>(entity)
        .unwrap()
        .select_by_name("attack");

    driver.update(&mut world, 0.016);
    assert_eq!(sprite_slot(&world, entity), 4);
    driver.update(&mut world, 0.016);
    assert_eq!(sprite_slot(&world, entity), 5);
    assert_eq!(
        *finished.lock().unwrap(),
        vec![ClipFinished {
            entity,
            clip: "attack".to_string()
        }]
    );

    driver.update(&mut world, 0.016);
    assert_eq!(sprite_slot(&world, entity), 0);
}

#[test]
fn unregistered_clip_name_falls_back_to_default_clip() {
    let mut world = World::new();
    let mut driver = AnimationDriver::new();
    let entity = world.spawn_empty().id();
    let mut parts = bundle(0.0);
    parts.animation.add_default_clip(clip("idle", &[5], true));
    driver.track(&mut world, entity, parts);
    world
        .get_mut::<AnimationComponent>(entity)
        .unwrap()
        .select_by_name("walk");
    driver.update(&mut world, 0.016);
    assert_eq!(sprite_slot(&world, entity), 1);

    world
        .get_mut::<AnimationComponent>(entity)
        .unwrap()
        .select_by_name("moonwalk");
    for _ in 0..3 {
        driver.update(&mut world, 0.016);
        assert_eq!(sprite_slot(&world, entity), 5);
    }

    let anim = world.get::<AnimationComponent>(entity).unwrap();
    assert_eq!(anim.current_clip().unwrap().name, "idle");
    let pos = world.get::<MapPosition>(entity).unwrap();
    assert!(approx_eq(pos.pos.x, 5.0));
    assert!(approx_eq(pos.pos.y, 10.0));
}

#[test]
fn unregistered_clip_name_without_default_degrades_to_slot_zero() {
    let mut world = World::new();
    let mut driver = AnimationDriver::new();
    let entity = world.spawn_empty().id();
    let mut parts = bundle(0.0);
    parts.animation = AnimationComponent::new((0..6).map(drawable).collect::<Vec<_>>(), 0.0);
    parts.animation.add_clip(clip("walk", &[1, 2, 3], true));
    driver.track(&mut world, entity, parts);
    world
        .get_mut::<AnimationComponent>(entity)
        .unwrap()
        .select_by_name("walk");
    driver.update(&mut world, 0.016);
    assert_eq!(sprite_slot(&world, entity), 1);

    world
        .get_mut::<AnimationComponent>(entity)
        .unwrap()
        .select_by_name("moonwalk");
    driver.update(&mut world, 0.016);
    driver.update(&mut world, 0.016);

    assert_eq!(sprite_slot(&world, entity), 0);
    let pos = world.get::<MapPosition>(entity).unwrap();
    assert!(approx_eq(pos.pos.x, 1.0));
    assert!(approx_eq(pos.pos.y, 2.0));
}

#[test]
fn untracked_entity_is_frozen() {
    let mut world = World::new();
    let mut driver = AnimationDriver::new();
    let entity = world.spawn_empty().id();
    driver.track(&mut world, entity, bundle(0.0));
    world
        .get_mut::<AnimationComponent>(entity)
        .unwrap()
        .select_by_name("walk");
    driver.update(&mut world, 0.016);

    let state = driver.untrack(&mut world, entity).unwrap();
    assert_eq!(state.current_clip().unwrap().name, "walk");
    assert!(!driver.is_tracked(&world, entity));

    driver.update(&mut world, 0.016);
    driver.update(&mut world, 0.016);
    assert_eq!(sprite_slot(&world, entity), 1);
}

#[test]
fn untracking_unknown_entities_is_a_no_op() {
    let mut world = World::new();
    let driver = AnimationDriver::new();
    let plain = world.spawn(MapPosition::new(0.0, 0.0)).id();
    assert!(driver.untrack(&mut world, plain).is_none());
    assert!(world.get::<MapPosition>(plain).is_some());

    let gone = world.spawn_empty().id();
    world.despawn(gone);
    assert!(driver.untrack(&mut world, gone).is_none());
    assert!(!driver.track(&mut world, gone, bundle(0.1)));
}

#[test]
fn tracking_again_replaces_state() {
    let mut world = World::new();
    let driver = AnimationDriver::new();
    let entity = world.spawn_empty().id();
    driver.track(&mut world, entity, bundle(0.1));

    let mut replacement = bundle(0.5);
    replacement.position = MapPosition::new(-1.0, -1.0);
    driver.track(&mut world, entity, replacement);

    assert!(approx_eq(world.get::<AnimationComponent>(entity).unwrap().rate, 0.5));
    assert_eq!(*world.get::<MapPosition>(entity).unwrap(), MapPosition::new(-1.0, -1.0));
}

#[test]
fn entities_advance_independently() {
    let mut world = World::new();
    let mut driver = AnimationDriver::new();
    let fast = world.spawn_empty().id();
    let slow = world.spawn_empty().id();
    driver.track(&mut world, fast, bundle(0.0));
    driver.track(&mut world, slow, bundle(1.0));
    for entity in [fast, slow] {
        world
            .get_mut::<AnimationComponent>(entity)
            .unwrap()
            .select_by_name("walk");
    }

    for _ in 0..3 {
        driver.update(&mut world, 0.1);
    }

    assert_eq!(sprite_slot(&world, fast), 3);
    assert_eq!(sprite_slot(&world, slow), 0);
}

struct Hero {
    animation: AnimationComponent,
    sprite: Sprite,
    position: MapPosition,
}

impl Animatable for Hero {
    fn animation_component(&self) -> &AnimationComponent {
        &self.animation
    }

    fn sprite(&self) -> &Sprite {
        &self.sprite
    }

    fn map_position(&self) -> &MapPosition {
        &self.position
    }
}

#[test]
fn animatable_types_can_be_tracked() {
    let mut world = World::new();
    let mut driver = AnimationDriver::new();
    let parts = bundle(0.0);
    let hero = Hero {
        animation: parts.animation,
        sprite: parts.sprite,
        position: parts.position,
    };
    let entity = world.spawn_empty().id();

    assert!(driver.track_animatable(&mut world, entity, &hero));
    assert!(driver.is_tracked(&world, entity));
    driver.update(&mut world, 0.016);
    assert_eq!(sprite_slot(&world, entity), 0);
}
