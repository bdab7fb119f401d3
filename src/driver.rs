//! Host-facing entry point for animation playback.
//!
//! The host owns the [`World`] and calls [`AnimationDriver::update`] once per
//! simulation tick. Entities become animated by being
//! [tracked](AnimationDriver::track) with an [`AnimatedBundle`]: the
//! playback state plus the sprite and position the system writes to.

use bevy_ecs::prelude::*;
use log::{debug, warn};

use crate::components::animation::AnimationComponent;
use crate::components::mapposition::MapPosition;
use crate::components::sprite::Sprite;
use crate::systems::animation::animation;
use crate::systems::time::update_world_time;

/// The components an animated entity needs.
#[derive(Bundle, Clone, Debug)]
pub struct AnimatedBundle {
    pub animation: AnimationComponent,
    pub sprite: Sprite,
    pub position: MapPosition,
}

/// Anything that can hand out the three components of an animated entity.
pub trait Animatable {
    fn animation_component(&self) -> &AnimationComponent;
    fn sprite(&self) -> &Sprite;
    fn map_position(&self) -> &MapPosition;

    fn animated_bundle(&self) -> AnimatedBundle {
        AnimatedBundle {
            animation: self.animation_component().clone(),
            sprite: self.sprite().clone(),
            position: *self.map_position(),
        }
    }
}

impl Animatable for AnimatedBundle {
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

/// Runs the animation schedule.
pub struct AnimationDriver {
    schedule: Schedule,
}

impl Default for AnimationDriver {
    fn default() -> Self {
        Self::new()
    }
}

impl AnimationDriver {
    pub fn new() -> Self {
        let mut schedule = Schedule::default();
        schedule.add_systems(animation);
        Self { schedule }
    }

    /// Start animating `entity`. Tracking it again replaces its components.
    ///
    /// Returns `false` if the entity does not exist.
    pub fn track(&self, world: &mut World, entity: Entity, bundle: AnimatedBundle) -> bool {
        match world.get_entity_mut(entity) {
            Ok(mut entity_mut) => {
                entity_mut.insert(bundle);
                debug!("Tracking {:?}", entity);
                true
            }
            Err(_) => {
                warn!("Cannot track {:?}: entity does not exist", entity);
                false
            }
        }
    }

    pub fn track_animatable(
        &self,
        world: &mut World,
        entity: Entity,
        animatable: &impl Animatable,
    ) -> bool {
        self.track(world, entity, animatable.animated_bundle())
    }

    /// Stop animating `entity` and hand back its playback state.
    ///
    /// The sprite and position stay on the entity. Untracking an entity that
    /// is not tracked, or does not exist, does nothing.
    pub fn untrack(&self, world: &mut World, entity: Entity) -> Option<AnimationComponent> {
        let mut entity_mut = world.get_entity_mut(entity).ok()?;
        let animation = entity_mut.take::<AnimationComponent>();
        if animation.is_some() {
            debug!("Untracked {:?}", entity);
        }
        animation
    }

    pub fn is_tracked(&self, world: &World, entity: Entity) -> bool {
        world.get::<AnimationComponent>(entity).is_some()
    }

    /// Advance every tracked entity by `dt` seconds.
    pub fn update(&mut self, world: &mut World, dt: f32) {
        update_world_time(world, dt);
        self.schedule.run(world);
    }
}
