//! Asset loading seam used by the movie clip parser.
//!
//! The parser never touches the filesystem directly. It asks an
//! [`AssetLoader`] to load a URL and then fetches the loaded [`Asset`] by the
//! same URL. [`AssetStore`] is the stock implementation: it resolves URLs
//! against a root directory and caches what it loaded. Hosts can also
//! [`insert`](AssetStore::insert) assets they produced themselves (for
//! example textures already uploaded to a GPU).

use std::path::{Path, PathBuf};
use std::sync::Arc;

use bevy_ecs::prelude::Resource;
use log::debug;
use rustc_hash::FxHashMap;

use crate::error::ResourceLoadError;

/// Headless handle to a loaded texture.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Texture {
    /// URL the texture was loaded from. Doubles as the render-side key.
    pub key: Arc<str>,
    pub width: u32,
    pub height: u32,
}

impl Texture {
    pub fn new(key: impl Into<Arc<str>>, width: u32, height: u32) -> Self {
        Self {
            key: key.into(),
            width,
            height,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AssetKind {
    Texture,
    Data,
}

/// A loaded asset.
#[derive(Debug, Clone)]
pub enum Asset {
    Texture(Texture),
    /// Raw bytes, e.g. a movie clip description.
    Data(Arc<[u8]>),
}

impl Asset {
    pub fn kind(&self) -> AssetKind {
        match self {
            Asset::Texture(_) => AssetKind::Texture,
            Asset::Data(_) => AssetKind::Data,
        }
    }
}

/// Loads assets by URL and hands them out once loaded.
pub trait AssetLoader {
    /// Make `url` available through [`AssetLoader::resource`].
    fn load(&mut self, url: &str) -> Result<(), ResourceLoadError>;

    /// A previously loaded asset.
    fn resource(&self, url: &str) -> Result<&Asset, ResourceLoadError>;

    /// A previously loaded texture. Fails with
    /// [`ResourceLoadError::WrongKind`] for any other asset kind.
    fn texture(&self, url: &str) -> Result<&Texture, ResourceLoadError> {
        match self.resource(url)? {
            Asset::Texture(texture) => Ok(texture),
            _ => Err(ResourceLoadError::WrongKind {
                url: url.to_string(),
                expected: AssetKind::Texture,
            }),
        }
    }

    /// The bytes of a previously loaded data asset.
    fn data(&self, url: &str) -> Result<Arc<[u8]>, ResourceLoadError> {
        match self.resource(url)? {
            Asset::Data(bytes) => Ok(bytes.clone()),
            _ => Err(ResourceLoadError::WrongKind {
                url: url.to_string(),
                expected: AssetKind::Data,
            }),
        }
    }
}

const TEXTURE_EXTENSIONS: [&str; 3] = ["png", "jpg", "jpeg"];

/// Filesystem-backed asset cache keyed by URL.
#[derive(Resource, Debug, Default)]
pub struct AssetStore {
    root: PathBuf,
    pub map: FxHashMap<String, Asset>,
}

impl AssetStore {
    /// Create a store resolving URLs relative to `root`.
    pub fn new(root: impl Into<PathBuf>) -> Self {
        AssetStore {
            root: root.into(),
            map: FxHashMap::default(),
        }
    }

    pub fn root(&self) -> &Path {
        &self.root
    }

    /// Insert an asset under a specific URL, replacing any previous one.
    pub fn insert(&mut self, url: impl Into<String>, asset: Asset) {
        self.map.insert(url.into(), asset);
    }

    /// Forget a loaded asset. Returns it if it was present.
    pub fn unload(&mut self, url: impl AsRef<str>) -> Option<Asset> {
        self.map.remove(url.as_ref())
    }

    pub fn is_loaded(&self, url: impl AsRef<str>) -> bool {
        self.map.contains_key(url.as_ref())
    }

    /// Clear all loaded assets.
    pub fn clear(&mut self) {
        self.map.clear();
    }

    fn read(&self, url: &str) -> Result<Asset, ResourceLoadError> {
        let path = self.root.join(url);
        let is_texture = path
            .extension()
            .and_then(|ext| ext.to_str())
            .map(|ext| {
                TEXTURE_EXTENSIONS
                    .iter()
                    .any(|known| ext.eq_ignore_ascii_case(known))
            })
            .unwrap_or(false);

        if is_texture {
            let (width, height) = image::image_dimensions(&path)
                .map_err(|source| ResourceLoadError::Image { path, source })?;
            return Ok(Asset::Texture(Texture::new(url, width, height)));
        }

        let bytes = std::fs::read(&path).map_err(|source| ResourceLoadError::Io { path, source })?;
        Ok(Asset::Data(bytes.into()))
    }
}

impl AssetLoader for AssetStore {
    fn load(&mut self, url: &str) -> Result<(), ResourceLoadError> {
        if self.map.contains_key(url) {
            return Ok(());
        }
        let asset = self.read(url)?;
        debug!("Loaded {:?} asset {:?}", asset.kind(), url);
        self.map.insert(url.to_string(), asset);
        Ok(())
    }

    fn resource(&self, url: &str) -> Result<&Asset, ResourceLoadError> {
        self.map
            .get(url)
            .ok_or_else(|| ResourceLoadError::NotFound(url.to_string()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn inserted_assets_are_served_without_touching_disk() {
        let mut store = AssetStore::new("/does/not/exist");
        store.insert("hero.png", Asset::Texture(Texture::new("hero.png", 64, 32)));

        store.load("hero.png").unwrap();
        let texture = store.texture("hero.png").unwrap();
        assert_eq!((texture.width, texture.height), (64, 32));
    }

    #[test]
    fn texture_of_wrong_kind_is_rejected() {
        let mut store = AssetStore::default();
        store.insert("hero.png", Asset::Data(Arc::from(&b"not an image"[..])));

        let err = store.texture("hero.png").unwrap_err();
        assert!(matches!(
            err,
            ResourceLoadError::WrongKind {
                expected: AssetKind::Texture,
                ..
            }
        ));
    }

    #[test]
    fn missing_file_reports_io_error() {
        let dir = tempfile::tempdir().unwrap();
        let mut store = AssetStore::new(dir.path());

        let err = store.load("nothing.mc.json").unwrap_err();
        assert!(matches!(err, ResourceLoadError::Io { .. }));
        assert!(!store.is_loaded("nothing.mc.json"));
    }

    #[test]
    fn files_are_classified_by_extension() {
        let dir = tempfile::tempdir().unwrap();
        std::fs::write(dir.path().join("clip.json"), b"{}").unwrap();
        image::RgbaImage::new(8, 4)
            .save(dir.path().join("sheet.png"))
            .unwrap();

        let mut store = AssetStore::new(dir.path());
        store.load("clip.json").unwrap();
        store.load("sheet.png").unwrap();

        assert_eq!(&*store.data("clip.json").unwrap(), b"{}");
        let texture = store.texture("sheet.png").unwrap();
        assert_eq!(&*texture.key, "sheet.png");
        assert_eq!((texture.width, texture.height), (8, 4));
    }

    #[test]
    fn unknown_url_is_not_found() {
        let store = AssetStore::default();
        assert!(matches!(
            store.resource("ghost.png"),
            Err(ResourceLoadError::NotFound(_))
        ));
    }
}
