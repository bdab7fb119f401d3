//! Animation systems.
//!
//! Submodules overview
//! - [`animation`] – advance sprite animations and publish frames
//! - [`time`] – update simulation time and delta

pub mod animation;
pub mod time;
