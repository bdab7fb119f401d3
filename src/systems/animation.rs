//! Animation system.
//!
//! [`animation`] advances every entity carrying an
//! [`AnimationComponent`] once per tick and publishes the result to the
//! entity's [`Sprite`] and [`MapPosition`].
//!
//! # Per-entity flow
//!
//! 1. No active clip and no default clip: nothing happens.
//! 2. No active clip but a default clip: the default clip is selected and
//!    the tick continues with it.
//! 3. The tick delta is added to the elapsed time. Once it reaches the
//!    component's `rate`, the current drawable is written to the sprite, the
//!    frame bias is written to the position, and the cursor advances.
//!    Advancing past the end of a one-shot clip stops it and triggers
//!    [`ClipFinished`].
//!
//! Entities are processed in no particular order.
//!
//! # Related
//!
//! - [`crate::components::animation::AnimationComponent`] – per-entity playback state
//! - [`crate::driver::AnimationDriver`] – tracking and tick entry point for hosts

use std::sync::Arc;

use bevy_ecs::prelude::*;
use log::{debug, warn};

use crate::components::animation::{AnimationComponent, Clip};
use crate::components::mapposition::MapPosition;
use crate::components::sprite::Sprite;
use crate::events::animation::ClipFinished;
use crate::resources::worldtime::WorldTime;

/// What one tick did to an entity.
#[derive(Debug, Clone, PartialEq)]
pub enum StepOutcome {
    /// Nothing to play.
    Idle,
    /// Time accumulated, frame unchanged.
    Waiting,
    /// A frame was published and the cursor moved on.
    Advanced,
    /// A frame was published and the one-shot clip ended.
    Finished(Arc<Clip>),
}

/// Advance a single entity by `dt` seconds.
pub fn advance_animation(
    anim: &mut AnimationComponent,
    sprite: &mut Sprite,
    position: &mut MapPosition,
    dt: f32,
) -> StepOutcome {
    if anim.current_clip().is_none() {
        let Some(default) = anim.default_clip().cloned() else {
            return StepOutcome::Idle;
        };
        anim.select_by_clip(Some(default));
    }

    anim.accumulate(dt);
    if anim.elapsed() < anim.rate {
        return StepOutcome::Waiting;
    }

    match anim.current_visual() {
        Some(drawable) => sprite.drawable = drawable.clone(),
        None => warn!("Drawable table is empty, sprite left unchanged"),
    }
    position.pos = anim.bias_at(position.pos);

    let playing = anim.current_clip().cloned();
    anim.advance_frame();
    match (playing, anim.current_clip()) {
        (Some(clip), None) => StepOutcome::Finished(clip),
        _ => StepOutcome::Advanced,
    }
}

/// Advance all animated entities using the [`WorldTime`] delta.
pub fn animation(
    mut query: Query<(Entity, &mut AnimationComponent, &mut Sprite, &mut MapPosition)>,
    time: Res<WorldTime>,
    mut commands: Commands,
) {
    for (entity, mut anim, mut sprite, mut position) in query.iter_mut() {
        if let StepOutcome::Finished(clip) =
            advance_animation(&mut anim, &mut sprite, &mut position, time.delta)
        {
            debug!("{:?} finished clip {:?}", entity, clip.name);
            commands.trigger(ClipFinished {
                entity,
                clip: clip.name.clone(),
            });
        }
    }
}
