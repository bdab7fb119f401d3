//! Event types emitted by the animation systems.
//!
//! Submodules:
//! - [`animation`] – notifications about clip playback
//!
//! See each submodule for concrete event data, semantics, and example usage.
pub mod animation;
