//! ECS components for entities.
//!
//! This module groups the component types attached to animated entities.
//!
//! Submodules overview:
//! - [`animation`] – frames, clips and per-entity playback state
//! - [`mapposition`] – world-space position (pivot) for an entity
//! - [`sprite`] – the drawable currently shown by an entity

pub mod animation;
pub mod mapposition;
pub mod sprite;
