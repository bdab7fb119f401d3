//! ECS resources and asset data made available to systems.
//!
//! This module groups the long-lived data injected into the ECS world and the
//! asset types parsed from disk. Each submodule documents the semantics and
//! intended usage of its resource(s).
//!
//! Overview
//! - `animationconfig` – INI backed playback defaults
//! - `assetstore` – asset loading by URL and the [`assetstore::AssetLoader`] seam
//! - `movieclip` – movie clip descriptions and the parser turning them into clips
//! - `movieclipstore` – parsed movie clips cached by URL
//! - `spritesheet` – texture regions and the drawables cut from them
//! - `worldtime` – simulation time and delta
pub mod animationconfig;
pub mod assetstore;
pub mod movieclip;
pub mod movieclipstore;
pub mod spritesheet;
pub mod worldtime;
