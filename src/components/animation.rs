//! Frame-based sprite animation state.
//!
//! [`Clip`]s are immutable, shared definitions (usually parsed from a movie
//! clip resource). An [`AnimationComponent`] holds the clips an entity can
//! play, which one is active, and the playback cursor. The
//! [`animation`](crate::systems::animation::animation) system advances it
//! once per tick.
//!
//! Playback is tolerant: selecting an unknown clip, playing a clip without
//! frames or pointing past the drawable table never fails. These cases log a
//! warning and fall back to the default clip, to drawable slot 0 or to the
//! unchanged position.

use std::sync::Arc;

use bevy_ecs::prelude::Component;
use glam::Vec2;
use log::warn;
use rustc_hash::FxHashMap;

use crate::resources::spritesheet::Drawable;

/// A single step of a clip.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Frame {
    /// Slot in the drawable table.
    pub index: usize,
    /// Pivot correction. Only its absolute value is ever used.
    pub bias: Vec2,
}

impl Frame {
    pub fn new(index: usize, bias: Vec2) -> Self {
        Self { index, bias }
    }
}

/// A named sequence of frames.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct Clip {
    pub name: String,
    pub frames: Vec<Frame>,
    pub looped: bool,
}

impl Clip {
    pub fn new(name: impl Into<String>, frames: Vec<Frame>, looped: bool) -> Self {
        Self {
            name: name.into(),
            frames,
            looped,
        }
    }

    /// A clip with no frame data. Used as the stand-in for unknown names.
    pub fn empty(name: impl Into<String>) -> Self {
        Self::new(name, Vec::new(), false)
    }

    pub fn len(&self) -> usize {
        self.frames.len()
    }

    pub fn is_empty(&self) -> bool {
        self.frames.is_empty()
    }
}

/// Per-entity playback state.
#[derive(Debug, Clone, Component)]
pub struct AnimationComponent {
    /// Drawable table addressed by [`Frame::index`].
    pub drawables: Arc<[Drawable]>,
    /// Every clip this entity can play, by name.
    pub clips: FxHashMap<String, Arc<Clip>>,
    /// Seconds a frame stays on screen.
    pub rate: f32,
    current: Option<Arc<Clip>>,
    default: Option<Arc<Clip>>,
    index: usize,
    elapsed: f32,
}

impl AnimationComponent {
    pub fn new(drawables: impl Into<Arc<[Drawable]>>, rate: f32) -> Self {
        Self {
            drawables: drawables.into(),
            clips: FxHashMap::default(),
            rate,
            current: None,
            default: None,
            index: 0,
            elapsed: 0.0,
        }
    }

    /// Make the clip registered as `name` the active one.
    ///
    /// An unregistered name leaves no active clip when a default clip is
    /// set, so the default plays on the next tick. Without a default it
    /// activates an empty clip of that name, which renders drawable slot 0
    /// until another clip is selected.
    pub fn select_by_name(&mut self, name: &str) {
        self.current = match self.clips.get(name) {
            Some(clip) => Some(clip.clone()),
            None if self.default.is_some() => {
                warn!(
                    "Animation clip {:?} is not registered, falling back to the default clip",
                    name
                );
                None
            }
            None => {
                warn!("Animation clip {:?} is not registered", name);
                Some(Arc::new(Clip::empty(name)))
            }
        };
        self.index = 0;
    }

    /// Make `clip` the active one. `None` stops playback.
    pub fn select_by_clip(&mut self, clip: Option<Arc<Clip>>) {
        self.current = clip;
        self.index = 0;
    }

    /// Register a clip under its name, replacing a previous one.
    pub fn add_clip(&mut self, clip: Arc<Clip>) {
        self.clips.insert(clip.name.clone(), clip);
    }

    pub fn add_clips(&mut self, clips: impl IntoIterator<Item = Arc<Clip>>) {
        for clip in clips {
            self.add_clip(clip);
        }
    }

    /// Register a clip and play it whenever nothing else is playing.
    pub fn add_default_clip(&mut self, clip: Arc<Clip>) {
        self.default = Some(clip.clone());
        self.add_clip(clip);
    }

    pub fn current_clip(&self) -> Option<&Arc<Clip>> {
        self.current.as_ref()
    }

    pub fn default_clip(&self) -> Option<&Arc<Clip>> {
        self.default.as_ref()
    }

    /// Position of the playback cursor within the active clip.
    pub fn cursor(&self) -> usize {
        self.index
    }

    /// Seconds accumulated since the last frame change.
    pub fn elapsed(&self) -> f32 {
        self.elapsed
    }

    pub(crate) fn accumulate(&mut self, dt: f32) {
        self.elapsed += dt;
    }

    /// The frame under the cursor, if the active clip has one.
    pub fn current_frame(&self) -> Option<&Frame> {
        let clip = self.current.as_ref()?;
        if clip.is_empty() {
            warn!(
                "No frame data for clip {:?}. Selecting drawable 0; add frames to the clip if this is incorrect.",
                clip.name
            );
            return None;
        }
        clip.frames.get(self.index)
    }

    /// The drawable for the current frame, or slot 0 without one.
    ///
    /// `None` only when the drawable table itself is empty.
    pub fn current_visual(&self) -> Option<&Drawable> {
        let Some(frame) = self.current_frame() else {
            return self.drawables.first();
        };
        match self.drawables.get(frame.index) {
            Some(drawable) => Some(drawable),
            None => {
                warn!(
                    "Frame index {} is outside the drawable table ({} entries). Selecting drawable 0.",
                    frame.index,
                    self.drawables.len()
                );
                self.drawables.first()
            }
        }
    }

    /// Position to publish for the current frame.
    ///
    /// Without a current frame, `position` is returned unchanged. Otherwise
    /// the result is the absolute value of the frame bias; `position` is
    /// replaced, not offset.
    pub fn bias_at(&self, position: Vec2) -> Vec2 {
        match self.current_frame() {
            Some(frame) => frame.bias.abs(),
            None => position,
        }
    }

    /// Move the cursor to the next frame.
    ///
    /// Past the last frame the cursor wraps to 0; a non-looping clip is
    /// deactivated at that point.
    pub fn advance_frame(&mut self) {
        let Some(clip) = self.current.as_ref() else {
            return;
        };
        if clip.is_empty() {
            warn!("No frame data for clip {:?}", clip.name);
            return;
        }

        let len = clip.len();
        let looped = clip.looped;
        self.index += 1;
        self.elapsed = 0.0;
        if self.index >= len {
            self.index = 0;
            if !looped {
                self.current = None;
            }
        }
    }
}
