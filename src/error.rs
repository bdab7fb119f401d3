//! Error types for resource construction.
//!
//! Only parse-time work can fail. Playback anomalies (unknown clip names,
//! empty clips, unmatched regions) are logged and degraded instead, see
//! [`crate::components::animation`].

use std::path::PathBuf;

use thiserror::Error;

use crate::resources::assetstore::AssetKind;

/// The movie-clip payload could not be decoded.
#[derive(Error, Debug)]
#[error("Malformed movie clip description {url:?}: {source}")]
pub struct DecodeError {
    pub url: String,
    #[source]
    pub source: serde_json::Error,
}

/// An asset required by a movie clip could not be provided by the loader.
#[derive(Error, Debug)]
pub enum ResourceLoadError {
    #[error("Resource not loaded: {0:?}")]
    NotFound(String),

    #[error("Failed to read {path:?}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("Failed to probe image {path:?}: {source}")]
    Image {
        path: PathBuf,
        #[source]
        source: image::ImageError,
    },

    #[error("Resource {url:?} is not of kind {expected:?}")]
    WrongKind { url: String, expected: AssetKind },
}

/// Any failure while building a [`MovieClipResource`](crate::resources::movieclip::MovieClipResource).
#[derive(Error, Debug)]
pub enum MovieClipError {
    #[error(transparent)]
    Decode(#[from] DecodeError),

    #[error(transparent)]
    ResourceLoad(#[from] ResourceLoadError),
}

pub type Result<T> = std::result::Result<T, MovieClipError>;
