//! Sprite atlas lookup.
//!
//! A [`Spritesheet`] binds a [`Texture`] to an ordered table of rectangular
//! regions. The position of a region in that table is the slot index that
//! [`Frame::index`](crate::components::animation::Frame::index) refers to.

use std::sync::Arc;

use glam::Vec2;

use super::assetstore::Texture;

/// A rectangle on a texture, in pixels.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct SpriteRegion {
    /// Top-left corner.
    pub position: Vec2,
    pub width: f32,
    pub height: f32,
}

impl SpriteRegion {
    pub fn new(x: f32, y: f32, width: f32, height: f32) -> Self {
        Self {
            position: Vec2::new(x, y),
            width,
            height,
        }
    }
}

/// One addressable visual: a region of a specific texture.
///
/// This is what the animation system publishes to the render side.
#[derive(Debug, Clone, PartialEq)]
pub struct Drawable {
    pub tex_key: Arc<str>,
    pub region: SpriteRegion,
}

impl Drawable {
    pub fn width(&self) -> f32 {
        self.region.width
    }

    pub fn height(&self) -> f32 {
        self.region.height
    }
}

/// Texture plus region table. Immutable once built.
#[derive(Debug, Clone, PartialEq)]
pub struct Spritesheet {
    texture: Texture,
    regions: Vec<SpriteRegion>,
}

impl Spritesheet {
    /// Atlas with arbitrary, possibly differently sized, regions.
    pub fn from_regions(texture: Texture, regions: Vec<SpriteRegion>) -> Self {
        Self { texture, regions }
    }

    /// Atlas made of equally sized cells, numbered row by row.
    ///
    /// Partial cells at the right and bottom edges are not included.
    pub fn from_grid(texture: Texture, cell_width: u32, cell_height: u32) -> Self {
        let columns = texture.width.checked_div(cell_width).unwrap_or(0);
        let rows = texture.height.checked_div(cell_height).unwrap_or(0);

        let regions = (0..rows)
            .flat_map(|row| (0..columns).map(move |column| (column, row)))
            .map(|(column, row)| {
                SpriteRegion::new(
                    (column * cell_width) as f32,
                    (row * cell_height) as f32,
                    cell_width as f32,
                    cell_height as f32,
                )
            })
            .collect();

        Self { texture, regions }
    }

    pub fn texture(&self) -> &Texture {
        &self.texture
    }

    pub fn regions(&self) -> &[SpriteRegion] {
        &self.regions
    }

    pub fn len(&self) -> usize {
        self.regions.len()
    }

    pub fn is_empty(&self) -> bool {
        self.regions.is_empty()
    }

    pub fn region(&self, index: usize) -> Option<&SpriteRegion> {
        self.regions.get(index)
    }

    pub fn drawable(&self, index: usize) -> Option<Drawable> {
        self.region(index).map(|region| Drawable {
            tex_key: self.texture.key.clone(),
            region: *region,
        })
    }

    /// The whole region table as drawables, in slot order.
    pub fn drawables(&self) -> Arc<[Drawable]> {
        self.regions
            .iter()
            .map(|region| Drawable {
                tex_key: self.texture.key.clone(),
                region: *region,
            })
            .collect()
    }
}
