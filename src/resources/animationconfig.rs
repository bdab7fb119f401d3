//! Animation configuration resource.
//!
//! Playback and parsing settings loaded from an INI configuration file.
//! Provides defaults for safe startup and methods to load/save configuration.
//!
//! # Configuration File Format
//!
//! ```ini
//! [animation]
//! rate = 0.1
//! loop_clips = false
//! default_marker = idle
//! ```

use bevy_ecs::prelude::*;
use configparser::ini::Ini;
use log::info;
use std::path::PathBuf;

use crate::resources::movieclip::{DEFAULT_CLIP_MARKER, MovieClipOptions};

/// Default safe values for startup
const DEFAULT_RATE: f32 = 0.1;
const DEFAULT_LOOP_CLIPS: bool = false;
const DEFAULT_CONFIG_PATH: &str = "./spriteclip.ini";

/// Animation configuration resource.
#[derive(Resource, Debug, Clone, PartialEq)]
pub struct AnimationConfig {
    /// Seconds each frame stays on screen.
    pub rate: f32,
    /// Loop flag applied to clips parsed from movie clip descriptions.
    pub loop_clips: bool,
    /// Label substring selecting the default clip.
    pub default_marker: String,
    /// Path to the configuration file.
    pub config_path: PathBuf,
}

impl Default for AnimationConfig {
    fn default() -> Self {
        Self::new()
    }
}

impl AnimationConfig {
    /// Create a new configuration with safe default values.
    pub fn new() -> Self {
        Self {
            rate: DEFAULT_RATE,
            loop_clips: DEFAULT_LOOP_CLIPS,
            default_marker: DEFAULT_CLIP_MARKER.to_string(),
            config_path: PathBuf::from(DEFAULT_CONFIG_PATH),
        }
    }

    /// Create a new configuration with a custom config file path.
    pub fn with_path(path: impl Into<PathBuf>) -> Self {
        Self {
            config_path: path.into(),
            ..Self::new()
        }
    }

    /// Load configuration from the INI file.
    ///
    /// Missing values retain their current (default) values.
    /// Returns an error if the file cannot be read or parsed.
    pub fn load_from_file(&mut self) -> Result<(), String> {
        let mut config = Ini::new();
        config
            .load(&self.config_path)
            .map_err(|e| format!("Failed to load config file: {}", e))?;

        if let Some(rate) = config.getfloat("animation", "rate").ok().flatten() {
            self.rate = rate as f32;
        }
        if let Some(loop_clips) = config.getbool("animation", "loop_clips").ok().flatten() {
            self.loop_clips = loop_clips;
        }
        if let Some(marker) = config.get("animation", "default_marker") {
            self.default_marker = marker;
        }

        info!(
            "Loaded config: rate={}, loop_clips={}, default_marker={:?}",
            self.rate, self.loop_clips, self.default_marker
        );

        Ok(())
    }

    /// Save configuration to the INI file.
    ///
    /// Creates the file if it doesn't exist.
    pub fn save_to_file(&self) -> Result<(), String> {
        let mut config = Ini::new();

        config.set("animation", "rate", Some(self.rate.to_string()));
        config.set("animation", "loop_clips", Some(self.loop_clips.to_string()));
        config.set(
            "animation",
            "default_marker",
            Some(self.default_marker.clone()),
        );

        config
            .write(&self.config_path)
            .map_err(|e| format!("Failed to save config file: {}", e))?;

        info!("Saved config to {:?}", self.config_path);

        Ok(())
    }

    /// Parser options matching this configuration.
    pub fn movie_clip_options(&self) -> MovieClipOptions {
        MovieClipOptions {
            looped: self.loop_clips,
            default_marker: self.default_marker.clone(),
        }
    }
}
