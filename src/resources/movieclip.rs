//! Movie clip resources.
//!
//! A movie clip description is a JSON document listing a texture, named
//! rectangular regions on it, and one or more clip groups. Each group has a
//! flat list of frames (each naming a region and carrying a pixel offset)
//! and labels that cut named ranges out of that list.
//!
//! ```json
//! {
//!   "file": "hero.png",
//!   "mc": {
//!     "hero": {
//!       "frameRate": 12,
//!       "labels": [{ "name": "idle", "frame": 1, "end": 5 }],
//!       "frames": [{ "res": "hero_01", "x": -3, "y": 4 }]
//!     }
//!   },
//!   "res": { "hero_01": { "x": 0, "y": 0, "w": 32, "h": 48 } }
//! }
//! ```
//!
//! Parsing turns this into a [`Spritesheet`] (one slot per frame whose
//! region exists) and a list of [`Clip`]s, one per label. The label whose
//! name contains the default marker (`"idle"` unless configured otherwise)
//! becomes the resource's default clip.

use std::collections::BTreeMap;
use std::sync::Arc;

use glam::Vec2;
use log::{debug, warn};
use rustc_hash::FxHashMap;
use serde::{Deserialize, Serialize};

use crate::components::animation::{Clip, Frame};
use crate::error::{DecodeError, Result};
use crate::resources::assetstore::AssetLoader;
use crate::resources::spritesheet::{Drawable, SpriteRegion, Spritesheet};

/// Substring that marks a label as the default clip.
pub const DEFAULT_CLIP_MARKER: &str = "idle";

/// Region rectangle in texture pixels.
#[derive(Debug, Clone, Copy, PartialEq, Deserialize, Serialize)]
pub struct RegionData {
    pub x: u32,
    pub y: u32,
    pub w: u32,
    pub h: u32,
}

/// One entry of a group's flat frame list.
///
/// Other keys (such as `duration`) are accepted and ignored.
#[derive(Debug, Clone, PartialEq, Deserialize, Serialize)]
pub struct FrameData {
    #[serde(rename = "res")]
    pub region_name: String,
    #[serde(default)]
    pub x: f32,
    #[serde(default)]
    pub y: f32,
}

/// A named range of a group's frames. Bounds are 1-based.
#[derive(Debug, Clone, PartialEq, Deserialize, Serialize)]
pub struct LabelData {
    pub name: String,
    #[serde(rename = "frame")]
    pub frame_start: usize,
    #[serde(rename = "end")]
    pub frame_end: usize,
}

#[derive(Debug, Clone, PartialEq, Default, Deserialize, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct MovieClipData {
    #[serde(default)]
    pub frame_rate: Option<f32>,
    #[serde(default)]
    pub labels: Vec<LabelData>,
    #[serde(default)]
    pub frames: Vec<FrameData>,
}

/// The decoded description, before any texture is involved.
#[derive(Debug, Clone, PartialEq, Deserialize, Serialize)]
pub struct MovieClipFile {
    pub file: String,
    #[serde(default)]
    pub mc: BTreeMap<String, MovieClipData>,
    #[serde(default, rename = "res")]
    pub regions: FxHashMap<String, RegionData>,
}

impl MovieClipFile {
    pub fn decode(url: &str, bytes: &[u8]) -> std::result::Result<Self, DecodeError> {
        serde_json::from_slice(bytes).map_err(|source| DecodeError {
            url: url.to_string(),
            source,
        })
    }

    /// Every group's frames, concatenated in group order.
    pub fn all_frames(&self) -> impl Iterator<Item = &FrameData> {
        self.mc.values().flat_map(|group| group.frames.iter())
    }
}

/// Parse-time policy that is not part of the description itself.
#[derive(Debug, Clone, PartialEq)]
pub struct MovieClipOptions {
    /// Loop flag given to every parsed clip.
    pub looped: bool,
    /// A label whose name contains this becomes the default clip.
    pub default_marker: String,
}

impl Default for MovieClipOptions {
    fn default() -> Self {
        Self {
            looped: false,
            default_marker: DEFAULT_CLIP_MARKER.to_string(),
        }
    }
}

/// A parsed movie clip: atlas plus clips.
#[derive(Debug, Clone, PartialEq)]
pub struct MovieClipResource {
    pub url: String,
    pub spritesheet: Spritesheet,
    pub clips: Vec<Arc<Clip>>,
    pub default_clip: Option<Arc<Clip>>,
    frame_rate: Option<f32>,
}

impl MovieClipResource {
    pub fn clip(&self, name: &str) -> Option<&Arc<Clip>> {
        self.clips.iter().find(|clip| clip.name == name)
    }

    /// Drawable for slot 0, the natural initial visual of an entity.
    pub fn first_drawable(&self) -> Option<Drawable> {
        self.spritesheet.drawable(0)
    }

    /// Seconds per frame declared by the description, if any group has a
    /// frame rate.
    pub fn suggested_rate(&self) -> Option<f32> {
        self.frame_rate
            .filter(|fps| *fps > 0.0)
            .map(|fps| 1.0 / fps)
    }
}

/// Texture URL for a description at `url` referring to `file`.
fn texture_url(url: &str, file: &str) -> String {
    match url.rfind('/') {
        Some(slash) => clean_url(&format!("{}/{}", &url[..slash], file)),
        None => clean_url(file),
    }
}

/// Lexically normalize a slash separated URL: empty and `.` segments are
/// removed and `..` consumes the segment before it.
fn clean_url(url: &str) -> String {
    let rooted = url.starts_with('/');
    let mut segments: Vec<&str> = Vec::new();
    for segment in url.split('/') {
        match segment {
            "" | "." => {}
            ".." => match segments.last() {
                Some(&last) if last != ".." => {
                    segments.pop();
                }
                _ if rooted => {}
                _ => segments.push(".."),
            },
            _ => segments.push(segment),
        }
    }

    let joined = segments.join("/");
    if rooted {
        format!("/{joined}")
    } else if joined.is_empty() {
        ".".to_string()
    } else {
        joined
    }
}

/// Load the description at `url` through `loader` and parse it.
pub fn load_movie_clip<L: AssetLoader + ?Sized>(
    url: &str,
    loader: &mut L,
    options: &MovieClipOptions,
) -> Result<MovieClipResource> {
    loader.load(url)?;
    let bytes = loader.data(url)?;
    parse_movie_clip(url, &bytes, loader, options)
}

/// Build a [`MovieClipResource`] from raw description bytes.
///
/// `url` is the description's own location; the texture is looked up next
/// to it. Frames naming a region that does not exist get no slot of their
/// own and show the drawable of the frame before them.
pub fn parse_movie_clip<L: AssetLoader + ?Sized>(
    url: &str,
    bytes: &[u8],
    loader: &mut L,
    options: &MovieClipOptions,
) -> Result<MovieClipResource> {
    let file = MovieClipFile::decode(url, bytes)?;

    let texture_name = texture_url(url, &file.file);
    loader.load(&texture_name)?;
    let texture = loader.texture(&texture_name)?.clone();

    // Slot of every raw frame, per group. None when its region is missing.
    let mut regions = Vec::new();
    let mut slots: Vec<Vec<Option<usize>>> = Vec::with_capacity(file.mc.len());
    for group in file.mc.values() {
        let group_slots: Vec<Option<usize>> = group
            .frames
            .iter()
            .map(|frame| {
                let region = file.regions.get(&frame.region_name)?;
                regions.push(SpriteRegion::new(
                    region.x as f32,
                    region.y as f32,
                    region.w as f32,
                    region.h as f32,
                ));
                Some(regions.len() - 1)
            })
            .collect();
        slots.push(group_slots);
    }
    let slots: Vec<Vec<usize>> = slots.iter().map(|group| fill_slots(group)).collect();
    if regions.len() < file.all_frames().count() {
        debug!(
            "{}: {} frame(s) reference missing regions and reuse a neighbouring drawable",
            url,
            file.all_frames().count() - regions.len()
        );
    }

    let mut clips = Vec::new();
    let mut default_clip = None;
    for ((group_name, group), group_slots) in file.mc.iter().zip(&slots) {
        for label in &group.labels {
            let clip = Arc::new(build_clip(group_name, group, group_slots, label, options.looped));

            if !options.default_marker.is_empty() && label.name.contains(&options.default_marker) {
                default_clip = Some(clip.clone());
            }
            clips.push(clip);
        }
    }

    debug!(
        "Parsed movie clip {}: {} region(s), {} clip(s), default {:?}",
        url,
        regions.len(),
        clips.len(),
        default_clip.as_ref().map(|clip: &Arc<Clip>| clip.name.as_str())
    );

    Ok(MovieClipResource {
        url: url.to_string(),
        spritesheet: Spritesheet::from_regions(texture, regions),
        clips,
        default_clip,
        frame_rate: file.mc.values().find_map(|group| group.frame_rate),
    })
}

/// Give raw frames without a region the slot of the nearest earlier frame
/// that has one, or of the first later one at the start of the group.
/// A group with no regions at all points every frame at slot 0.
fn fill_slots(slots: &[Option<usize>]) -> Vec<usize> {
    let first = slots.iter().flatten().next().copied().unwrap_or(0);
    let mut previous = first;
    slots
        .iter()
        .map(|slot| {
            if let Some(slot) = slot {
                previous = *slot;
            }
            previous
        })
        .collect()
}

/// Cut one label out of a group: raw frames `[frame_start - 1, frame_end - 1)`.
fn build_clip(
    group_name: &str,
    group: &MovieClipData,
    slots: &[usize],
    label: &LabelData,
    looped: bool,
) -> Clip {
    let count = group.frames.len();
    let start = label.frame_start.saturating_sub(1);
    let end = label.frame_end.saturating_sub(1);
    if label.frame_start == 0 || end > count {
        warn!(
            "Label {:?} in {:?} spans frames {}..{} but the group has {} frame(s)",
            label.name, group_name, label.frame_start, label.frame_end, count
        );
    }
    let end = end.min(count);
    let start = start.min(end);

    let frames = (start..end)
        .map(|position| {
            let raw = &group.frames[position];
            Frame::new(slots[position], Vec2::new(raw.x, raw.y))
        })
        .collect();

    Clip::new(label.name.clone(), frames, looped)
}
