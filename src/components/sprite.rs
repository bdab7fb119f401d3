use bevy_ecs::prelude::Component;

use crate::resources::spritesheet::Drawable;

/// Sprite is the visual an entity currently shows: a region of a texture.
/// The animation system replaces the drawable as frames advance.
#[derive(Component, Clone, Debug, PartialEq)]
pub struct Sprite {
    pub drawable: Drawable,
}

impl Sprite {
    pub fn new(drawable: Drawable) -> Self {
        Self { drawable }
    }

    pub fn width(&self) -> f32 {
        self.drawable.width()
    }

    pub fn height(&self) -> f32 {
        self.drawable.height()
    }
}
