//! Clip lifecycle events.
//!
//! When a non-looping clip plays its last frame, the
//! [`animation`](crate::systems::animation::animation) system triggers a
//! [`ClipFinished`] event for the entity. On the next tick the entity falls
//! back to its default clip, if it has one.
//!
//! # Example
//!
//! ```ignore
//! world.add_observer(|trigger: On<ClipFinished>| {
//!     let event = trigger.event();
//!     log::info!("{:?} finished {}", event.entity, event.clip);
//! });
//! ```

use bevy_ecs::prelude::*;

/// Event emitted when a one-shot clip ends.
#[derive(Event, Debug, Clone, PartialEq, Eq)]
pub struct ClipFinished {
    /// The entity whose clip ended.
    pub entity: Entity,
    /// Name of the clip that ended.
    pub clip: String,
}
