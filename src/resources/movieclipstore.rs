//! Movie clip resource registry.
//!
//! Parsed [`MovieClipResource`]s are cached by the URL they were loaded
//! from, so several entities built from the same description share one
//! spritesheet and one set of clips.

use bevy_ecs::prelude::Resource;
use log::info;
use rustc_hash::FxHashMap;

use crate::error::Result;
use crate::resources::assetstore::AssetLoader;
use crate::resources::movieclip::{MovieClipOptions, MovieClipResource, load_movie_clip};

/// Registry of parsed movie clips keyed by URL.
#[derive(Resource, Debug, Default)]
pub struct MovieClipStore {
    pub map: FxHashMap<String, MovieClipResource>,
}

impl MovieClipStore {
    /// Create an empty store.
    pub fn new() -> Self {
        MovieClipStore {
            map: FxHashMap::default(),
        }
    }

    /// Load and parse `url` unless it is already cached.
    pub fn load<L: AssetLoader + ?Sized>(
        &mut self,
        url: &str,
        loader: &mut L,
        options: &MovieClipOptions,
    ) -> Result<&MovieClipResource> {
        if !self.map.contains_key(url) {
            let resource = load_movie_clip(url, loader, options)?;
            info!(
                "Loaded movie clip {} ({} clips, {} regions)",
                url,
                resource.clips.len(),
                resource.spritesheet.len()
            );
            self.map.insert(url.to_string(), resource);
        }
        Ok(&self.map[url])
    }

    /// Get a movie clip by its URL.
    pub fn get(&self, url: impl AsRef<str>) -> Option<&MovieClipResource> {
        self.map.get(url.as_ref())
    }

    /// Insert an already parsed movie clip under its own URL.
    pub fn insert(&mut self, resource: MovieClipResource) {
        self.map.insert(resource.url.clone(), resource);
    }

    /// Drop a cached movie clip. Entities keep the clips they already hold.
    pub fn unload(&mut self, url: impl AsRef<str>) -> Option<MovieClipResource> {
        self.map.remove(url.as_ref())
    }

    /// Clear all cached movie clips.
    pub fn clear(&mut self) {
        self.map.clear();
    }
}
