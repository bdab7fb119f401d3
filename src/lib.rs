//! spriteclip library.
//!
//! Frame based sprite animation on top of `bevy_ecs`: movie clip parsing,
//! per-entity playback state and the system that advances it every tick.
//! Everything is exposed for use in integration tests and by hosts that
//! drive their own [`World`](bevy_ecs::world::World).

pub mod components;
pub mod driver;
pub mod error;
pub mod events;
pub mod resources;
pub mod systems;
